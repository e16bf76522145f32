//! 패키지 수준 라이선스 집계
//!
//! 파일들의 결론 라이선스와 파일 내 라이선스 ID를 모아 패키지 필드를 결정합니다.

use std::collections::BTreeSet;

use crate::types::{File, NOASSERTION, NONE};

/// 파일들에서 집계한 라이선스 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageLicenses {
    /// 파일 결론 라이선스의 고유 값 (정렬, NOASSERTION 포함 가능)
    pub concluded: Vec<String>,
    /// 파일 내 라이선스 ID의 합집합 (정렬)
    pub from_files: Vec<String>,
}

/// 파일 목록에서 결론 라이선스 집합과 파일 유래 라이선스 집합을 추출합니다.
pub fn get_package_licenses<'a, I>(files: I) -> PackageLicenses
where
    I: IntoIterator<Item = &'a File>,
{
    let mut concluded = BTreeSet::new();
    let mut from_files = BTreeSet::new();

    for file in files {
        concluded.insert(file.concluded_license.clone());
        from_files.extend(file.license_info_in_file.iter().cloned());
    }

    PackageLicenses {
        concluded: concluded.into_iter().collect(),
        from_files: from_files.into_iter().collect(),
    }
}

/// 결론 라이선스 목록을 하나의 AND 표현식으로 결합합니다.
///
/// - 0개: `NOASSERTION`
/// - 1개: 그대로 반환
/// - 2개 이상: `NONE`/`NOASSERTION`을 제외하고, 공백이 있는 표현식은 괄호로 감싼 뒤
///   ` AND `로 연결합니다. 남는 항목이 없으면 `NOASSERTION`입니다.
pub fn normalize_expression(concluded: &[String]) -> String {
    match concluded {
        [] => NOASSERTION.to_owned(),
        [single] => single.clone(),
        _ => {
            let revised: Vec<String> = concluded
                .iter()
                .filter(|lic| lic.as_str() != NONE && lic.as_str() != NOASSERTION)
                .map(|lic| {
                    if lic.contains(' ') {
                        format!("({lic})")
                    } else {
                        lic.clone()
                    }
                })
                .collect();

            if revised.is_empty() {
                NOASSERTION.to_owned()
            } else {
                revised.join(" AND ")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn file(concluded: &str, info: &[&str]) -> File {
        let mut f = File::new(
            "SPDXRef-Package-sources",
            format!("SPDXRef-File-{concluded}"),
            "a.c".to_owned(),
            PathBuf::from("/a.c"),
        );
        f.concluded_license = concluded.to_owned();
        f.license_info_in_file = strings(info);
        f
    }

    #[test]
    fn normalize_empty_is_noassertion() {
        assert_eq!(normalize_expression(&[]), "NOASSERTION");
    }

    #[test]
    fn normalize_single_is_verbatim() {
        assert_eq!(normalize_expression(&strings(&["MIT"])), "MIT");
        assert_eq!(normalize_expression(&strings(&["NOASSERTION"])), "NOASSERTION");
    }

    #[test]
    fn normalize_joins_with_and() {
        assert_eq!(
            normalize_expression(&strings(&["Apache-2.0", "MIT"])),
            "Apache-2.0 AND MIT"
        );
    }

    #[test]
    fn normalize_drops_sentinels() {
        assert_eq!(normalize_expression(&strings(&["MIT", "NOASSERTION"])), "MIT");
        assert_eq!(
            normalize_expression(&strings(&["Apache-2.0", "MIT", "NONE"])),
            "Apache-2.0 AND MIT"
        );
    }

    #[test]
    fn normalize_wraps_compound_expressions() {
        assert_eq!(
            normalize_expression(&strings(&["Apache-2.0 OR MIT", "BSD-3-Clause"])),
            "(Apache-2.0 OR MIT) AND BSD-3-Clause"
        );
    }

    #[test]
    fn normalize_only_sentinels_is_noassertion() {
        assert_eq!(
            normalize_expression(&strings(&["NOASSERTION", "NONE"])),
            "NOASSERTION"
        );
    }

    #[test]
    fn package_licenses_are_sorted_and_deduplicated() {
        let files = vec![
            file("MIT", &["MIT"]),
            file("Apache-2.0 OR MIT", &["Apache-2.0", "MIT"]),
            file("NOASSERTION", &[]),
            file("MIT", &["MIT"]),
        ];
        let lics = get_package_licenses(&files);

        assert_eq!(
            lics.concluded,
            strings(&["Apache-2.0 OR MIT", "MIT", "NOASSERTION"])
        );
        assert_eq!(lics.from_files, strings(&["Apache-2.0", "MIT"]));
        assert_eq!(
            normalize_expression(&lics.concluded),
            "(Apache-2.0 OR MIT) AND MIT"
        );
    }

    #[test]
    fn package_licenses_of_no_files() {
        let lics = get_package_licenses(std::iter::empty());
        assert!(lics.concluded.is_empty());
        assert!(lics.from_files.is_empty());
    }
}
