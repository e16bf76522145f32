//! SBOM 생성 유틸리티 -- 공유 헬퍼 함수

use chrono::{DateTime, Utc};

/// 문서 생성 도구 식별자 (`Tool: spdx-builder-<version>`)
pub fn tool_creator() -> String {
    format!("Tool: spdx-builder-{}", env!("CARGO_PKG_VERSION"))
}

/// 현재 UTC 시각을 RFC3339 `Z` 형식으로 반환합니다.
pub fn current_timestamp() -> String {
    format_timestamp(&Utc::now())
}

/// 시각을 `YYYY-MM-DDTHH:MM:SSZ` 형식으로 변환합니다.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
