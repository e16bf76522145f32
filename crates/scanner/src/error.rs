//! 스캐너 에러 타입
//!
//! [`ScannerError`]는 스캔-조립 엔진 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<ScannerError> for SpdxBuilderError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **파일 목록 (치명적)**: `FileList`, `EmptyFileList`, `TooManyFiles`
//! - **문서 모델 불변식**: `DuplicateId`
//! - **JSON 생성**: `Serialize`
//! - **설정**: `Config`
//! - **출력 I/O**: `Io`
//!
//! 개별 파일의 해시 실패, 라이선스 태그 부재, 텍스트 디코딩 실패는
//! 에러가 아니며 이 타입으로 표현되지 않습니다.

use spdx_builder_core::error::{ConfigError, ScanError, SpdxBuilderError};

/// 스캐너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// 파일 목록을 열거나 읽을 수 없음
    #[error("file list error: {path}: {reason}")]
    FileList {
        /// 파일 목록 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 파일 목록에 경로가 하나도 없음
    #[error("file list is empty: {path}")]
    EmptyFileList {
        /// 파일 목록 경로
        path: String,
    },

    /// 파일 목록 항목 수 초과
    #[error("file list too large: {path}: {count} entries (max: {max})")]
    TooManyFiles {
        /// 파일 목록 경로
        path: String,
        /// 실제 항목 수
        count: usize,
        /// 최대 허용 항목 수
        max: usize,
    },

    /// 문서 내 SPDX ID 중복
    #[error("duplicate SPDX ID in document: {id}")]
    DuplicateId {
        /// 중복된 SPDX ID
        id: String,
    },

    /// SPDX JSON 직렬화 실패
    #[error("spdx serialization error: {0}")]
    Serialize(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl From<ScannerError> for SpdxBuilderError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::FileList { .. }
            | ScannerError::EmptyFileList { .. }
            | ScannerError::TooManyFiles { .. } => {
                SpdxBuilderError::Scan(ScanError::FileList(err.to_string()))
            }
            ScannerError::DuplicateId { .. } => {
                SpdxBuilderError::Scan(ScanError::Document(err.to_string()))
            }
            ScannerError::Serialize(msg) => SpdxBuilderError::Scan(ScanError::Output(msg)),
            ScannerError::Config { field, reason } => {
                SpdxBuilderError::Config(ConfigError::InvalidValue { field, reason })
            }
            ScannerError::Io { path, source } => SpdxBuilderError::Io(std::io::Error::new(
                source.kind(),
                format!("{path}: {source}"),
            )),
        }
    }
}
