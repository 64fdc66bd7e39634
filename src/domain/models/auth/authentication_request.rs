/// 인증 미들웨어 동작 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 인증 정보가 없으면 401
    Required,
    /// 인증 정보가 없으면 익명으로 진행. 잘못된 인증 정보는 여전히 401.
    Optional,
}
