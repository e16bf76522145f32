//! SBOM 문서 생성과 기록
//!
//! - [`spdx`]: 문서 그래프를 SPDX 2.2 JSON 구조로 투영
//! - [`util`]: 타임스탬프, 도구 식별자
//!
//! [`write_spdx`]는 투영 결과를 `<output_dir>/<file_name>`에 기록하고,
//! 기록한 내용의 SHA-1을 함께 반환합니다.

pub mod spdx;
pub mod util;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ScannerError;
use crate::hash::sha1_hex;
use crate::types::Document;

pub use spdx::{SpdxDocument, make_document, make_document_at};

/// 기록된 SPDX 문서 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenDocument {
    /// 기록된 파일 경로
    pub path: PathBuf,
    /// 기록된 내용의 SHA-1 (다른 문서에서 이 문서를 참조할 때 사용)
    pub sha1: String,
    pub packages: usize,
    pub files: usize,
    pub relationships: usize,
}

/// SPDX JSON 구조를 문자열로 직렬화합니다.
///
/// `pretty`이면 2칸 들여쓰기, 아니면 한 줄로 출력합니다.
pub fn serialize_document(json: &SpdxDocument, pretty: bool) -> Result<String, ScannerError> {
    let result = if pretty {
        serde_json::to_string_pretty(json)
    } else {
        serde_json::to_string(json)
    };
    result.map_err(|e| ScannerError::Serialize(format!("SPDX serialization failed: {e}")))
}

/// 문서를 SPDX JSON 문자열로 변환합니다.
pub fn to_json(doc: &Document, pretty: bool) -> Result<String, ScannerError> {
    serialize_document(&make_document(doc), pretty)
}

/// 문서를 `<output_dir>/<file_name>`에 SPDX JSON으로 기록합니다.
///
/// `output_dir`이 없으면 상위 디렉토리까지 함께 생성합니다.
///
/// # Errors
///
/// - 직렬화 실패 시 `ScannerError::Serialize`
/// - 디렉토리 생성 또는 파일 쓰기 실패 시 `ScannerError::Io` (재시도하지 않음)
pub fn write_spdx(
    output_dir: &Path,
    file_name: &str,
    doc: &Document,
    pretty: bool,
) -> Result<WrittenDocument, ScannerError> {
    let json = make_document(doc);
    let content = serialize_document(&json, pretty)?;
    std::fs::create_dir_all(output_dir).map_err(|e| ScannerError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let path = output_dir.join(file_name);
    std::fs::write(&path, content.as_bytes()).map_err(|e| ScannerError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let written = WrittenDocument {
        sha1: sha1_hex(content.as_bytes()),
        packages: json.packages.len(),
        files: json.files.len(),
        relationships: json.relationships.len(),
        path,
    };
    tracing::info!(
        path = %written.path.display(),
        sha1 = %written.sha1,
        packages = written.packages,
        files = written.files,
        "wrote SPDX JSON document"
    );
    Ok(written)
}
