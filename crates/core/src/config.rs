//! 설정 관리 -- spdx-builder.toml 파싱 및 런타임 설정
//!
//! [`SpdxBuilderConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SPDX_BUILDER_SCANNER_DO_SHA256=false` 형식)
//! 3. 설정 파일 (`spdx-builder.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), spdx_builder_core::error::SpdxBuilderError> {
//! use spdx_builder_core::config::SpdxBuilderConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SpdxBuilderConfig::load("spdx-builder.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SpdxBuilderConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, SpdxBuilderError};

/// 파일 목록 최대 항목 수 상한
pub const MAX_FILES_LIMIT: usize = 1_000_000;

/// spdx-builder 통합 설정
///
/// `spdx-builder.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 크레이트는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpdxBuilderConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 파일 스캔 설정
    #[serde(default)]
    pub scanner: ScanConfig,
    /// SPDX 문서 설정
    #[serde(default)]
    pub document: DocumentSection,
    /// 패키지 메타데이터
    #[serde(default)]
    pub package: PackageSection,
}

impl SpdxBuilderConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpdxBuilderError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 없이 기본값에 환경변수 오버라이드만 적용합니다.
    pub fn from_env() -> Result<Self, SpdxBuilderError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpdxBuilderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpdxBuilderError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                SpdxBuilderError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, SpdxBuilderError> {
        toml::from_str(toml_str).map_err(|e| {
            SpdxBuilderError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SPDX_BUILDER_{SECTION}_{FIELD}`
    /// 예: `SPDX_BUILDER_DOCUMENT_PRETTY=true`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "SPDX_BUILDER_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "SPDX_BUILDER_GENERAL_LOG_FORMAT");

        // Scanner
        override_bool(
            &mut self.scanner.conclude_package_license,
            "SPDX_BUILDER_SCANNER_CONCLUDE_PACKAGE_LICENSE",
        );
        override_bool(
            &mut self.scanner.conclude_file_licenses,
            "SPDX_BUILDER_SCANNER_CONCLUDE_FILE_LICENSES",
        );
        override_usize(
            &mut self.scanner.num_lines_scanned,
            "SPDX_BUILDER_SCANNER_NUM_LINES_SCANNED",
        );
        override_bool(&mut self.scanner.do_sha256, "SPDX_BUILDER_SCANNER_DO_SHA256");
        override_usize(&mut self.scanner.max_files, "SPDX_BUILDER_SCANNER_MAX_FILES");

        // Document
        override_string(
            &mut self.document.namespace_prefix,
            "SPDX_BUILDER_DOCUMENT_NAMESPACE_PREFIX",
        );
        override_string(&mut self.document.output_dir, "SPDX_BUILDER_DOCUMENT_OUTPUT_DIR");
        override_string(&mut self.document.file_name, "SPDX_BUILDER_DOCUMENT_FILE_NAME");
        override_bool(&mut self.document.pretty, "SPDX_BUILDER_DOCUMENT_PRETTY");

        // Package
        override_string(&mut self.package.name, "SPDX_BUILDER_PACKAGE_NAME");
        override_string(&mut self.package.version, "SPDX_BUILDER_PACKAGE_VERSION");
        override_string(
            &mut self.package.declared_license,
            "SPDX_BUILDER_PACKAGE_DECLARED_LICENSE",
        );
        override_string(
            &mut self.package.supplier_person,
            "SPDX_BUILDER_PACKAGE_SUPPLIER_PERSON",
        );
        override_string(&mut self.package.supplier_org, "SPDX_BUILDER_PACKAGE_SUPPLIER_ORG");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SpdxBuilderError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.scanner.max_files == 0 || self.scanner.max_files > MAX_FILES_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "scanner.max_files".to_owned(),
                reason: format!("must be 1-{MAX_FILES_LIMIT}"),
            }
            .into());
        }

        if self.document.namespace_prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "document.namespace_prefix".to_owned(),
                reason: "must not end with '/'".to_owned(),
            }
            .into());
        }

        if self.document.output_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "document.output_dir".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        // 출력 파일명에 경로 구분자 금지 (output_dir 밖으로 기록 방지)
        if self.document.file_name.is_empty()
            || self.document.file_name.contains('/')
            || self.document.file_name.contains('\\')
        {
            return Err(ConfigError::InvalidValue {
                field: "document.file_name".to_owned(),
                reason: "must be a plain, non-empty file name".to_owned(),
            }
            .into());
        }

        if self.package.declared_license.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "package.declared_license".to_owned(),
                reason: "must not be empty (use NOASSERTION)".to_owned(),
            }
            .into());
        }

        // 공급자는 Person 또는 Organization 중 하나만
        if !self.package.supplier_person.is_empty() && !self.package.supplier_org.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "package.supplier".to_owned(),
                reason: "supplier_person and supplier_org are mutually exclusive".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 파일 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 파일 라이선스를 모아 패키지 라이선스를 결론지을지 여부
    pub conclude_package_license: bool,
    /// 감지된 태그로 파일 라이선스를 결론지을지 여부
    pub conclude_file_licenses: bool,
    /// 태그 탐색 줄 수 (0이면 파일 전체)
    pub num_lines_scanned: usize,
    /// SHA-1 외에 SHA-256도 계산할지 여부
    pub do_sha256: bool,
    /// 파일 목록 최대 항목 수
    pub max_files: usize,
}

impl Default for ScanConfig {
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

/// SPDX 문서 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSection {
    /// 문서 네임스페이스 접두어 (비어 있으면 UUID 기반으로 생성)
    pub namespace_prefix: String,
    pub output_dir: String,
    pub file_name: String,
    /// 2칸 들여쓰기 출력 여부
    pub pretty: bool,
}

impl Default for DocumentSection {
    fn default() -> Self {
        Self {
            namespace_prefix: String::new(),
            output_dir: ".".to_owned(),
            file_name: "doc.spdx.json".to_owned(),
            pretty: false,
        }
    }
}

/// 패키지 메타데이터 (sources / builds 패키지 공통)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    pub name: String,
    pub version: String,
    pub declared_license: String,
    pub supplier_person: String,
    pub supplier_org: String,
}

impl Default for PackageSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: String::new(),
            declared_license: "NOASSERTION".to_owned(),
            supplier_person: String::new(),
            supplier_org: String::new(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
