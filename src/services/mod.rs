//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 트레이트 객체(`Arc<dyn ...Store>`)를 주입받아 생성되며,
//! `main`에서 한 번 만들어 [`AppState`](crate::core::AppState)로 공유합니다.
//!
//! ```text
//! services/
//! ├── users/          # 계정 생명주기, 비밀번호 정책, 아바타 저장
//! ├── authors/        # 작성자 목록 (읽기 전용)
//! ├── social_links/   # 소셜 링크 CRUD
//! ├── followers/      # 팔로우 관계
//! ├── auth/           # 토큰, 요청 인증, Google 로그인, 계정 메일 플로우
//! └── mail/           # 메일 발송 백엔드
//! ```

pub mod auth;
pub mod authors;
pub mod followers;
pub mod mail;
pub mod social_links;
pub mod users;
