//! 관리자 계정 생성 도구
//!
//! 서버와 같은 환경 설정(`PROFILE`, `.env.*`)으로 저장소에 연결해 슈퍼유저를 만듭니다.
//!
//! ```bash
//! SUPERUSER_PASSWORD='correct horse' cargo run --bin create_superuser -- --email admin@example.com
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use profile_service_backend::config::AppConfig;
use profile_service_backend::core::{AppState, Stores};
use profile_service_backend::errors::AppError;
use profile_service_backend::services::mail::LogMailer;
use profile_service_backend::services::users::{ExtraFields, PasswordPolicy};

#[derive(Debug, Parser)]
#[command(name = "create_superuser", about = "Create an active staff + superuser account")]
struct Args {
    /// 로그인 이메일
    #[arg(long)]
    email: String,

    #[arg(long, env = "SUPERUSER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    display_name: Option<String>,
}

#[actix_web::main]
async fn main() -> ExitCode {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
    if dotenv::from_filename(format!(".env.{}", profile)).is_err() {
        dotenv::dotenv().ok();
    }
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    match run(args).await {
        Ok(email) => {
            println!("Superuser created: {}", email);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<String, AppError> {
    let config = AppConfig::from_env();

    PasswordPolicy::new(config.password.min_length).validate("password", &args.password, Some(&args.email))?;

    let stores = Stores::from_config(&config).await?;
    let state = AppState::new(config, stores, Arc::new(LogMailer));

    let extra = ExtraFields {
        display_name: args.display_name,
        ..Default::default()
    };
    let user = state
        .user_service
        .create_superuser(&args.email, &args.password, extra)
        .await?;

    Ok(user.email)
}
