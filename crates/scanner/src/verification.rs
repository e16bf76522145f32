//! 패키지 검증 코드 계산
//!
//! 파일 SHA-1 다이제스트를 사전순 정렬해 구분자 없이 이어 붙인 뒤,
//! 그 문자열의 SHA-1을 구합니다. 같은 해시 집합이면 스캔 순서와 무관하게
//! 같은 코드가 나옵니다.
//!
//! 해시 계산에 실패한 파일은 빈 문자열로 참여합니다. 파일 수를 보존하기 위해
//! 제외하지 않습니다.

use crate::hash::sha1_hex;
use crate::types::File;

/// 파일 목록의 패키지 검증 코드를 계산합니다.
pub fn calculate_verification_code<'a, I>(files: I) -> String
where
    I: IntoIterator<Item = &'a File>,
{
    verification_code_from_hashes(files.into_iter().map(|f| f.sha1.as_str()))
}

/// SHA-1 hex 다이제스트 목록에서 검증 코드를 계산합니다.
pub fn verification_code_from_hashes<'a, I>(hashes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hashes: Vec<&str> = hashes.into_iter().collect();
    hashes.sort_unstable();
    sha1_hex(hashes.concat().as_bytes())
}
