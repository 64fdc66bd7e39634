//! 프로필 서비스 메인 애플리케이션
//!
//! 설정을 읽고 저장소와 서비스를 조립한 뒤 Actix-web HTTP 서버를 구동합니다.

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use profile_service_backend::config::AppConfig;
use profile_service_backend::core::{AppState, Stores};
use profile_service_backend::routes::{configure_all_routes, configure_media};
use profile_service_backend::services::mail::build_mailer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 프로필 서비스 시작중...");

    let config = AppConfig::from_env();
    let state = initialize_state(config).await?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(state).await
}

/// 저장소, 메일러, 서비스를 조립합니다
///
/// 연결 실패는 `std::io::Error`로 변환되어 프로세스가 종료 코드와 함께 끝납니다.
async fn initialize_state(config: AppConfig) -> std::io::Result<web::Data<AppState>> {
    info!("📡 저장소 연결 중... ({:?})", config.storage.backend);

    let stores = Stores::from_config(&config).await.map_err(|e| {
        error!("저장소 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let mailer = build_mailer(&config.email).map_err(|e| {
        error!("메일 백엔드 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    tokio::fs::create_dir_all(&config.media.root).await?;

    Ok(web::Data::new(AppState::new(config, stores, mailer)))
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화 미들웨어를 순서대로 적용합니다.
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let config = state.config.clone();
    let bind_address = config.server.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api/v1", bind_address);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit.per_second)
        .burst_size(config.rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다 (0 값)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        config.rate_limit.per_second, config.rate_limit.burst_size
    );

    let media = config.media.clone();

    HttpServer::new(move || {
        let media = media.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .configure(configure_all_routes)
            .configure(move |cfg| configure_media(cfg, &media))
    })
    .bind(&bind_address)?
    .workers(config.server.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기반 로깅 초기화 (기본값: "info,actix_web=debug")
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 프론트엔드는 별도 도메인에서 제공되므로 모든 Origin을 허용합니다
fn configure_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}
