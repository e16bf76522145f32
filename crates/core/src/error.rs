//! 에러 타입 -- 도메인별 에러 정의

/// spdx-builder 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum SpdxBuilderError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 스캔 및 문서 조립 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 스캔 및 문서 조립 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 파일 목록 로딩 실패 (패키지 스캔 전체 중단)
    #[error("file list failed: {0}")]
    FileList(String),

    /// 문서 모델 불변식 위반
    #[error("document invariant violated: {0}")]
    Document(String),

    /// SPDX JSON 직렬화 또는 기록 실패
    #[error("output failed: {0}")]
    Output(String),
}
