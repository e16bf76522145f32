//! 파일 해시 계산
//!
//! 파일 전체 내용을 읽어 SHA-1과 SHA-256 다이제스트를 소문자 hex로 반환합니다.
//! 파일을 열거나 읽을 수 없으면 `None`을 반환하며, 호출자는 해당 파일의
//! 라이선스 탐색을 건너뜁니다.

use std::path::Path;

use sha1::Sha1;
use sha2::{Digest, Sha256};

/// 파일 하나의 해시 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHashes {
    pub sha1: String,
    pub sha256: String,
}

/// 파일 내용의 SHA-1, SHA-256 해시를 계산합니다.
///
/// 읽기 실패는 파일 단위로 복구 가능한 상황이므로 에러 대신 `None`을 반환합니다.
pub fn get_hashes(path: &Path) -> Option<FileHashes> {
    match std::fs::read(path) {
        Ok(buf) => Some(hash_bytes(&buf)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read file for hashing");
            None
        }
    }
}

/// 바이트 버퍼의 SHA-1, SHA-256 해시를 계산합니다.
pub fn hash_bytes(buf: &[u8]) -> FileHashes {
    FileHashes {
        sha1: sha1_hex(buf),
        sha256: hex::encode(Sha256::digest(buf)),
    }
}

/// 바이트 버퍼의 SHA-1 hex 다이제스트
pub fn sha1_hex(buf: &[u8]) -> String {
    hex::encode(Sha1::digest(buf))
}
