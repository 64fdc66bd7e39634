//! # Core Module
//!
//! 애플리케이션 상태([`AppState`])와 저장소 구성([`Stores`])을 제공합니다.
//! 전역 싱글톤 없이 `main`에서 한 번 생성해 `web::Data`로 공유합니다.
//!
//! ```rust,ignore
//! let config = AppConfig::from_env();
//! let stores = Stores::from_config(&config).await?;
//! let mailer = build_mailer(&config.email)?;
//! let state = web::Data::new(AppState::new(config, stores, mailer));
//! ```

pub mod context;

pub use context::*;
