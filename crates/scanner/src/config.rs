//! 스캐너 설정
//!
//! [`ScannerConfig`]는 core의 [`ScanConfig`](spdx_builder_core::config::ScanConfig)에서
//! 파생되며, 한 번의 실행마다 생성되어 각 패키지 스캔에 명시적으로 전달됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use spdx_builder_scanner::ScannerConfig;
//!
//! // 기본값으로 생성
//! let config = ScannerConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use spdx_builder_scanner::ScannerConfigBuilder;
//!
//! let config = ScannerConfigBuilder::new()
//!     .num_lines_scanned(0)
//!     .do_sha256(false)
//!     .build()
//!     .unwrap();
//! ```

use serde::{Deserialize, Serialize};

use spdx_builder_core::config::MAX_FILES_LIMIT;

use crate::error::ScannerError;

/// 스캐너 설정
///
/// # 필드
///
/// - **conclude_package_license**: 파일 라이선스를 집계해 패키지 라이선스를 결론지을지
/// - **conclude_file_licenses**: 감지된 태그로 파일 라이선스를 결론지을지
/// - **num_lines_scanned**: `SPDX-License-Identifier:` 태그 탐색 줄 수 (0이면 전체)
/// - **do_sha256**: SHA-256 해시도 계산할지 (SHA-1은 항상 계산)
/// - **max_files**: 패키지 하나의 파일 목록 최대 항목 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub conclude_package_license: bool,
    pub conclude_file_licenses: bool,
    pub num_lines_scanned: usize,
    pub do_sha256: bool,
    pub max_files: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            conclude_package_license: true,
            conclude_file_licenses: true,
            num_lines_scanned: 20,
            do_sha256: true,
            max_files: 100_000,
        }
    }
}

impl ScannerConfig {
    /// core의 `ScanConfig`에서 스캐너 설정을 생성합니다.
    pub fn from_core(core: &spdx_builder_core::config::ScanConfig) -> Self {
        Self {
            conclude_package_license: core.conclude_package_license,
            conclude_file_licenses: core.conclude_file_licenses,
            num_lines_scanned: core.num_lines_scanned,
            do_sha256: core.do_sha256,
            max_files: core.max_files,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `max_files`: 1-1000000
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.max_files == 0 || self.max_files > MAX_FILES_LIMIT {
            return Err(ScannerError::Config {
                field: "max_files".to_owned(),
                reason: format!("must be 1-{MAX_FILES_LIMIT}"),
            });
        }

        Ok(())
    }
}

/// [`ScannerConfig`] 빌더
///
/// 빌드 시 유효성 검증을 수행합니다.
#[derive(Default)]
pub struct ScannerConfigBuilder {
    config: ScannerConfig,
}

impl ScannerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 패키지 라이선스 결론 여부를 설정합니다.
    pub fn conclude_package_license(mut self, enabled: bool) -> Self {
        self.config.conclude_package_license = enabled;
        self
    }

    /// 파일 라이선스 결론 여부를 설정합니다.
    pub fn conclude_file_licenses(mut self, enabled: bool) -> Self {
        self.config.conclude_file_licenses = enabled;
        self
    }

    /// 태그 탐색 줄 수를 설정합니다 (0이면 전체).
    pub fn num_lines_scanned(mut self, lines: usize) -> Self {
        self.config.num_lines_scanned = lines;
        self
    }

    /// SHA-256 계산 여부를 설정합니다.
    pub fn do_sha256(mut self, enabled: bool) -> Self {
        self.config.do_sha256 = enabled;
        self
    }

    /// 파일 목록 최대 항목 수를 설정합니다.
    pub fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ScannerError::Config` 반환
    pub fn build(self) -> Result<ScannerConfig, ScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
