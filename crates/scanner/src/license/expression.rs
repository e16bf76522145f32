//! `SPDX-License-Identifier:` 태그 탐지와 라이선스 표현식 분해
//!
//! 파일 앞부분에서 첫 번째 태그를 찾아 표현식을 추출하고, 표현식을 개별
//! 라이선스 ID 토큰으로 분해합니다. 토큰은 라이선스 목록에 대해 검증하지 않습니다.
//!
//! # 예시
//!
//! ```
//! use spdx_builder_scanner::license::{parse_line_for_expression, split_expression};
//!
//! let expr = parse_line_for_expression("// SPDX-License-Identifier: MIT OR Apache-2.0 */");
//! assert_eq!(expr.as_deref(), Some("MIT OR Apache-2.0"));
//!
//! let ids = split_expression("MIT AND (Apache-2.0 OR BSD-3-Clause)");
//! assert_eq!(ids, vec!["Apache-2.0", "BSD-3-Clause", "MIT"]);
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// 라이선스 태그 마커
pub const LICENSE_TAG: &str = "SPDX-License-Identifier:";

/// 공백으로 둘러싸인 단어 연산자 (대소문자 무시)
static OPERATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i) AND | OR | WITH ").expect("operator regex is valid"));

/// 한 줄에서 라이선스 표현식을 추출합니다.
///
/// 마커 뒤의 내용을 trim한 뒤 끝의 `/`, `*` 문자(주석 닫기)를 제거하고 다시 trim합니다.
/// 마커가 없거나 마커 뒤가 비어 있으면 `None`입니다.
pub fn parse_line_for_expression(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(LICENSE_TAG)?;
    let expression = rest
        .trim()
        .trim_end_matches(['/', '*'])
        .trim();

    if expression.is_empty() {
        return None;
    }
    Some(expression.to_owned())
}

/// 파일 앞부분에서 첫 번째 라이선스 표현식을 찾습니다.
///
/// 마커가 있는 첫 줄에서 탐색을 멈춥니다. `num_lines`가 0이면 파일 전체를 탐색합니다.
/// 줄 끝은 `\n`, `\r\n`, `\r` 모두 인식합니다.
/// 파일을 열 수 없거나 UTF-8이 아닌 줄을 만나면 태그가 없는 것으로 취급합니다.
pub fn get_expression_data(path: &Path, num_lines: usize) -> Option<String> {
    let buf = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to open file for license scan");
            return None;
        }
    };

    for (idx, line) in universal_lines(&buf).enumerate() {
        if num_lines > 0 && idx >= num_lines {
            break;
        }
        let Ok(line) = std::str::from_utf8(line) else {
            tracing::warn!(path = %path.display(), line = idx + 1, "undecodable text, skipping license scan");
            return None;
        };
        if line.contains(LICENSE_TAG) {
            return parse_line_for_expression(line);
        }
    }

    None
}

/// 바이트 버퍼를 줄 단위로 나눕니다. 줄 끝 문자는 포함하지 않습니다.
fn universal_lines(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut rest = buf;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(pos) => {
                let line = &rest[..pos];
                let crlf = rest[pos] == b'\r' && rest.get(pos + 1) == Some(&b'\n');
                rest = &rest[pos + if crlf { 2 } else { 1 }..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = &[];
                Some(line)
            }
        }
    })
}

/// 라이선스 표현식을 개별 ID 토큰으로 분해합니다.
///
/// 괄호와 `+`를 제거하고, `AND`/`OR`/`WITH` 연산자를 공백 하나로 바꾼 뒤
/// 공백으로 나눠 사전순으로 정렬합니다. 빈 토큰은 버립니다.
pub fn split_expression(expression: &str) -> Vec<String> {
    let stripped: String = expression
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '+'))
        .collect();

    let replaced = OPERATORS.replace_all(&stripped, " ");

    let mut tokens: Vec<String> = replaced
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect();
    tokens.sort();
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.c");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn parse_line_without_marker() {
        assert_eq!(parse_line_for_expression("int main(void) {}"), None);
    }

    #[test]
    fn parse_line_strips_comment_closer() {
        assert_eq!(
            parse_line_for_expression("/* SPDX-License-Identifier: GPL-2.0-only */").as_deref(),
            Some("GPL-2.0-only")
        );
        assert_eq!(
            parse_line_for_expression("# SPDX-License-Identifier:   Apache-2.0   ").as_deref(),
            Some("Apache-2.0")
        );
    }

    #[test]
    fn parse_line_strips_multiple_trailing_marks() {
        assert_eq!(
            parse_line_for_expression("SPDX-License-Identifier: MIT **//").as_deref(),
            Some("MIT")
        );
    }

    #[test]
    fn parse_line_marker_with_nothing_after() {
        assert_eq!(parse_line_for_expression("// SPDX-License-Identifier:"), None);
        assert_eq!(parse_line_for_expression("// SPDX-License-Identifier: */"), None);
    }

    #[test]
    fn expression_found_on_third_line() {
        let (_dir, path) = write_temp(
            b"/*\n * header\n// SPDX-License-Identifier: MIT OR Apache-2.0 */\nint x;\n",
        );
        let expr = get_expression_data(&path, 20).unwrap();
        assert_eq!(expr, "MIT OR Apache-2.0");
        assert_eq!(split_expression(&expr), vec!["Apache-2.0", "MIT"]);
    }

    #[test]
    fn expression_beyond_window_is_not_found() {
        let (_dir, path) = write_temp(b"a\nb\nc\n// SPDX-License-Identifier: MIT\n");
        assert_eq!(get_expression_data(&path, 3), None);
        assert_eq!(get_expression_data(&path, 4).as_deref(), Some("MIT"));
    }

    #[test]
    fn zero_window_scans_whole_file() {
        let mut content = "x\n".repeat(500);
        content.push_str("# SPDX-License-Identifier: BSD-3-Clause\n");
        let (_dir, path) = write_temp(content.as_bytes());
        assert_eq!(get_expression_data(&path, 0).as_deref(), Some("BSD-3-Clause"));
    }

    #[test]
    fn first_tag_wins() {
        let (_dir, path) = write_temp(
            b"// SPDX-License-Identifier: MIT\n// SPDX-License-Identifier: GPL-2.0-only\n",
        );
        assert_eq!(get_expression_data(&path, 0).as_deref(), Some("MIT"));
    }

    #[test]
    fn empty_first_tag_stops_scan() {
        let (_dir, path) = write_temp(
            b"// SPDX-License-Identifier: */\n// SPDX-License-Identifier: MIT\n",
        );
        assert_eq!(get_expression_data(&path, 0), None);
    }

    #[test]
    fn invalid_utf8_is_treated_as_no_expression() {
        let (_dir, path) = write_temp(b"\xff\xfe\xfd\n// SPDX-License-Identifier: MIT\n");
        assert_eq!(get_expression_data(&path, 20), None);
    }

    #[test]
    fn invalid_utf8_after_tag_does_not_matter() {
        let (_dir, path) = write_temp(b"// SPDX-License-Identifier: MIT\n\xff\xfe\n");
        assert_eq!(get_expression_data(&path, 20).as_deref(), Some("MIT"));
    }

    #[test]
    fn universal_lines_splits_all_line_endings() {
        let lines: Vec<&[u8]> = universal_lines(b"a\nb\r\nc\rd\r\re").collect();
        assert_eq!(
            lines,
            vec![&b"a"[..], &b"b"[..], &b"c"[..], &b"d"[..], &b""[..], &b"e"[..]]
        );
        assert_eq!(universal_lines(b"x\n").count(), 1);
        assert_eq!(universal_lines(b"").count(), 0);
    }

    #[test]
    fn cr_only_line_endings_end_the_expression() {
        let (_dir, path) =
            write_temp(b"/* header */\r// SPDX-License-Identifier: MIT\rint x;\r");
        let expr = get_expression_data(&path, 20).unwrap();
        assert_eq!(expr, "MIT");
        assert_eq!(split_expression(&expr), vec!["MIT"]);
    }

    #[test]
    fn cr_only_line_endings_count_toward_window() {
        let (_dir, path) = write_temp(b"a\rb\rc\r// SPDX-License-Identifier: Zlib\r");
        assert_eq!(get_expression_data(&path, 3), None);
        assert_eq!(get_expression_data(&path, 4).as_deref(), Some("Zlib"));
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let (_dir, path) = write_temp(b"// SPDX-License-Identifier: Apache-2.0\r\nint x;\r\n");
        assert_eq!(get_expression_data(&path, 20).as_deref(), Some("Apache-2.0"));
    }

    #[test]
    fn missing_file_is_no_expression() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(get_expression_data(&dir.path().join("nope.c"), 20), None);
    }

    #[test]
    fn split_removes_parens_and_operators() {
        assert_eq!(
            split_expression("MIT AND (Apache-2.0 OR BSD-3-Clause)"),
            vec!["Apache-2.0", "BSD-3-Clause", "MIT"]
        );
    }

    #[test]
    fn split_is_case_insensitive_for_operators() {
        assert_eq!(
            split_expression("GPL-2.0-only with Linux-syscall-note or MIT"),
            vec!["GPL-2.0-only", "Linux-syscall-note", "MIT"]
        );
    }

    #[test]
    fn split_removes_plus_suffix() {
        assert_eq!(split_expression("GPL-2.0+"), vec!["GPL-2.0"]);
    }

    #[test]
    fn split_drops_empty_tokens() {
        assert_eq!(split_expression("MIT  AND   Zlib"), vec!["MIT", "Zlib"]);
        assert!(split_expression("").is_empty());
    }

    #[test]
    fn split_keeps_operator_like_substrings_inside_ids() {
        assert_eq!(split_expression("LicenseRef-ORACLE"), vec!["LicenseRef-ORACLE"]);
    }
}
