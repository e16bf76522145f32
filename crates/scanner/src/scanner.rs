//! 패키지 스캐너 -- 파일 목록에서 패키지 하나를 채우는 오케스트레이터
//!
//! # 처리 흐름
//!
//! ```text
//! file list --> read_file_list --> [relpath, ...]
//!                                      |
//!                     for each path (list order)
//!                                      |
//!              File(id, abspath) --> get_hashes --+--> None: 기본 라이선스 필드 유지
//!                                                 |
//!                                                 +--> get_expression_data --> split_expression
//!                                      |
//!              get_package_licenses --> normalize_expression --> calculate_verification_code
//!                                      |
//!                                   Package (이후 읽기 전용)
//! ```
//!
//! 파일 목록을 읽지 못하면 패키지 전체가 실패합니다. 개별 파일의 읽기 실패는
//! 해당 파일만 빈 해시로 남기고 계속 진행합니다.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::error::ScannerError;
use crate::hash::get_hashes;
use crate::license::{get_expression_data, get_package_licenses, normalize_expression, split_expression};
use crate::types::{File, Package, PackageConfig};
use crate::verification::calculate_verification_code;

/// 파일 SPDX ID 접두어
pub const FILE_ID_PREFIX: &str = "SPDXRef-File-";

/// 패키지 스캐너
///
/// 실행마다 한 번 생성한 [`ScannerConfig`]를 소유하며, 같은 스캐너로
/// 여러 패키지를 독립적으로 스캔할 수 있습니다.
#[derive(Debug, Clone)]
pub struct PackageScanner {
    config: ScannerConfig,
}

impl PackageScanner {
    /// 설정으로 새 스캐너를 생성합니다.
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// 스캐너 설정을 반환합니다.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// 파일 목록을 읽어 상대 경로 목록을 반환합니다.
    ///
    /// 한 줄에 경로 하나이며, 끝 공백은 제거하고 빈 줄은 무시합니다.
    ///
    /// # Errors
    ///
    /// - 파일 목록을 읽을 수 없으면 `ScannerError::FileList`
    /// - 경로가 하나도 없으면 `ScannerError::EmptyFileList`
    /// - 항목 수가 `max_files`를 넘으면 `ScannerError::TooManyFiles`
    pub fn read_file_list(&self, path: &Path) -> Result<Vec<String>, ScannerError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScannerError::FileList {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let paths: Vec<String> = content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        if paths.is_empty() {
            return Err(ScannerError::EmptyFileList {
                path: path.display().to_string(),
            });
        }
        if paths.len() > self.config.max_files {
            return Err(ScannerError::TooManyFiles {
                path: path.display().to_string(),
                count: paths.len(),
                max: self.config.max_files,
            });
        }

        debug!(path = %path.display(), entries = paths.len(), "file list loaded");
        Ok(paths)
    }

    /// 패키지 설정의 파일 목록을 읽어 패키지를 스캔합니다.
    ///
    /// # Errors
    ///
    /// 파일 목록 읽기 실패 또는 기준 디렉토리 해석 실패 시 에러를 반환하며,
    /// 부분적으로 채운 패키지는 반환하지 않습니다.
    pub fn scan(&self, pkg_cfg: PackageConfig) -> Result<Package, ScannerError> {
        let paths = self.read_file_list(&pkg_cfg.file_list_path)?;
        self.scan_files(pkg_cfg, &paths)
    }

    /// 주어진 상대 경로 목록으로 패키지를 스캔합니다.
    ///
    /// 목록 순서대로 파일을 만들며, 이미 나온 경로는 경고 후 건너뜁니다.
    pub fn scan_files(
        &self,
        pkg_cfg: PackageConfig,
        relpaths: &[String],
    ) -> Result<Package, ScannerError> {
        let basedir = absolute_basedir(&pkg_cfg.basedir)?;
        let mut pkg = Package::new(pkg_cfg);
        let mut seen: HashSet<&str> = HashSet::with_capacity(relpaths.len());
        let mut unhashed = 0usize;

        for relpath in relpaths {
            if !seen.insert(relpath.as_str()) {
                warn!(package = %pkg.spdx_id(), relpath = %relpath, "duplicate path in file list, skipping");
                continue;
            }

            let file = self.scan_file(pkg.spdx_id(), &basedir, relpath);
            if !file.is_hashed() {
                unhashed += 1;
            }
            pkg.files.push(file);
        }

        let licenses = get_package_licenses(&pkg.files);
        if self.config.conclude_package_license {
            pkg.concluded_license = normalize_expression(&licenses.concluded);
        }
        pkg.license_info_from_files = licenses.from_files;
        pkg.verification_code = calculate_verification_code(&pkg.files);

        info!(
            package = %pkg.spdx_id(),
            files = pkg.file_count(),
            unhashed,
            license = %pkg.concluded_license,
            verification_code = %pkg.verification_code,
            "package scan completed"
        );

        Ok(pkg)
    }

    /// 파일 하나를 해시하고 라이선스 태그를 탐지합니다.
    fn scan_file(&self, package_id: &str, basedir: &Path, relpath: &str) -> File {
        let abspath = normalize_path(&basedir.join(relpath));
        let spdx_id = format!("{FILE_ID_PREFIX}{}", uuid::Uuid::new_v4());
        let mut file = File::new(package_id, spdx_id, relpath.to_owned(), abspath);

        let Some(hashes) = get_hashes(&file.abspath) else {
            return file;
        };
        file.sha1 = hashes.sha1;
        if self.config.do_sha256 {
            file.sha256 = hashes.sha256;
        }

        if let Some(expression) = get_expression_data(&file.abspath, self.config.num_lines_scanned) {
            file.license_info_in_file = split_expression(&expression);
            if self.config.conclude_file_licenses {
                file.concluded_license = expression;
            }
        }

        debug!(
            relpath = %file.relpath,
            sha1 = %file.sha1,
            license = %file.concluded_license,
            "file scanned"
        );
        file
    }
}

/// 기준 디렉토리를 절대 경로로 만듭니다. 빈 경로는 현재 디렉토리입니다.
fn absolute_basedir(basedir: &Path) -> Result<PathBuf, ScannerError> {
    let dir = if basedir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        basedir
    };
    std::path::absolute(dir)
        .map(|p| normalize_path(&p))
        .map_err(|e| ScannerError::Io {
            path: dir.display().to_string(),
            source: e,
        })
}

/// 경로를 어휘적으로 정규화합니다 (`.` 제거, `..` 병합, 심볼릭 링크 미해석).
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfigBuilder;
    use crate::types::NOASSERTION;

    struct Fixture {
        dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn write(&self, relpath: &str, content: &str) {
            let path = self.dir.path().join(relpath);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(path, content).unwrap();
        }

        fn list(&self, name: &str, entries: &[&str]) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, entries.join("\n")).unwrap();
            path
        }

        fn package_config(&self, list: PathBuf) -> PackageConfig {
            PackageConfig {
                file_list_path: list,
                basedir: self.dir.path().to_path_buf(),
                name: "demo sources".to_owned(),
                spdx_id: "SPDXRef-Package-sources".to_owned(),
                ..Default::default()
            }
        }
    }

    #[test]
    fn read_file_list_skips_blank_lines_and_trailing_space() {
        let fx = Fixture::new();
        let list = fx.list("list.txt", &["a.c  ", "", "   ", "lib/b.c"]);
        let scanner = PackageScanner::new(ScannerConfig::default());

        let paths = scanner.read_file_list(&list).unwrap();
        assert_eq!(paths, vec!["a.c", "lib/b.c"]);
    }

    #[test]
    fn read_file_list_missing_is_fatal() {
        let fx = Fixture::new();
        let scanner = PackageScanner::new(ScannerConfig::default());
        let err = scanner
            .read_file_list(&fx.dir.path().join("missing.txt"))
            .unwrap_err();
        assert!(matches!(err, ScannerError::FileList { .. }));
    }

    #[test]
    fn read_file_list_empty_is_fatal() {
        let fx = Fixture::new();
        let list = fx.list("empty.txt", &["", ""]);
        let scanner = PackageScanner::new(ScannerConfig::default());
        assert!(matches!(
            scanner.read_file_list(&list),
            Err(ScannerError::EmptyFileList { .. })
        ));
    }

    #[test]
    fn read_file_list_over_limit() {
        let fx = Fixture::new();
        let list = fx.list("big.txt", &["a", "b", "c"]);
        let scanner = PackageScanner::new(ScannerConfigBuilder::new().max_files(2).build().unwrap());
        assert!(matches!(
            scanner.read_file_list(&list),
            Err(ScannerError::TooManyFiles { count: 3, max: 2, .. })
        ));
    }

    #[test]
    fn scan_populates_hashes_and_licenses() {
        let fx = Fixture::new();
        fx.write("main.c", "// SPDX-License-Identifier: MIT\nint main;\n");
        fx.write("lib/util.c", "/* SPDX-License-Identifier: Apache-2.0 OR MIT */\n");
        fx.write("README", "no tag here\n");
        let list = fx.list("sources.txt", &["main.c", "lib/util.c", "README"]);

        let scanner = PackageScanner::new(ScannerConfig::default());
        let pkg = scanner.scan(fx.package_config(list)).unwrap();

        assert_eq!(pkg.file_count(), 3);
        let main = pkg.file_by_relpath("main.c").unwrap();
        assert_eq!(main.concluded_license, "MIT");
        assert_eq!(main.license_info_in_file, vec!["MIT"]);
        assert_eq!(main.sha1.len(), 40);
        assert_eq!(main.sha256.len(), 64);
        assert!(main.spdx_id.starts_with(FILE_ID_PREFIX));
        assert_eq!(main.package_id, "SPDXRef-Package-sources");

        let readme = pkg.file_by_relpath("README").unwrap();
        assert_eq!(readme.concluded_license, NOASSERTION);
        assert!(readme.license_info_in_file.is_empty());

        assert_eq!(pkg.concluded_license, "(Apache-2.0 OR MIT) AND MIT");
        assert_eq!(pkg.license_info_from_files, vec!["Apache-2.0", "MIT"]);
        assert_eq!(pkg.verification_code.len(), 40);
    }

    #[test]
    fn scan_keeps_unreadable_file_with_empty_hashes() {
        let fx = Fixture::new();
        fx.write("present.c", "// SPDX-License-Identifier: MIT\n");
        let list = fx.list("sources.txt", &["present.c", "absent.c"]);

        let pkg = PackageScanner::new(ScannerConfig::default())
            .scan(fx.package_config(list))
            .unwrap();

        assert_eq!(pkg.file_count(), 2);
        let absent = pkg.file_by_relpath("absent.c").unwrap();
        assert!(absent.sha1.is_empty());
        assert!(absent.sha256.is_empty());
        assert_eq!(absent.concluded_license, NOASSERTION);
        assert_eq!(pkg.concluded_license, "MIT");

        // 읽지 못한 파일도 빈 문자열로 검증 코드에 포함된다
        let present = pkg.file_by_relpath("present.c").unwrap();
        assert_eq!(
            pkg.verification_code,
            crate::verification::verification_code_from_hashes([present.sha1.as_str(), ""])
        );
        assert_ne!(
            pkg.verification_code,
            crate::verification::verification_code_from_hashes([present.sha1.as_str()])
        );
    }

    #[test]
    fn scan_skips_duplicate_paths() {
        let fx = Fixture::new();
        fx.write("a.c", "a\n");
        let list = fx.list("sources.txt", &["a.c", "a.c"]);

        let pkg = PackageScanner::new(ScannerConfig::default())
            .scan(fx.package_config(list))
            .unwrap();
        assert_eq!(pkg.file_count(), 1);
    }

    #[test]
    fn scan_respects_disabled_flags() {
        let fx = Fixture::new();
        fx.write("a.c", "// SPDX-License-Identifier: GPL-2.0-only\n");
        let list = fx.list("sources.txt", &["a.c"]);
        let config = ScannerConfigBuilder::new()
            .conclude_package_license(false)
            .conclude_file_licenses(false)
            .do_sha256(false)
            .build()
            .unwrap();

        let pkg = PackageScanner::new(config).scan(fx.package_config(list)).unwrap();
        let file = pkg.file_by_relpath("a.c").unwrap();

        assert_eq!(file.concluded_license, NOASSERTION);
        assert_eq!(file.license_info_in_file, vec!["GPL-2.0-only"]);
        assert!(file.sha256.is_empty());
        assert!(!file.sha1.is_empty());
        assert_eq!(pkg.concluded_license, NOASSERTION);
        assert_eq!(pkg.license_info_from_files, vec!["GPL-2.0-only"]);
    }

    #[test]
    fn verification_code_independent_of_list_order() {
        let fx = Fixture::new();
        fx.write("x.c", "x\n");
        fx.write("y.c", "y\n");
        let scanner = PackageScanner::new(ScannerConfig::default());

        let forward = scanner
            .scan(fx.package_config(fx.list("fwd.txt", &["x.c", "y.c"])))
            .unwrap();
        let backward = scanner
            .scan(fx.package_config(fx.list("bwd.txt", &["y.c", "x.c"])))
            .unwrap();

        assert_eq!(forward.verification_code, backward.verification_code);
    }

    #[test]
    fn file_ids_are_unique() {
        let fx = Fixture::new();
        let relpaths: Vec<String> = (0..50).map(|i| format!("f{i}.c")).collect();
        let pkg = PackageScanner::new(ScannerConfig::default())
            .scan_files(fx.package_config(PathBuf::new()), &relpaths)
            .unwrap();

        let ids: HashSet<&str> = pkg.files.iter().map(|f| f.spdx_id.as_str()).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn abspath_is_normalized() {
        let fx = Fixture::new();
        fx.write("src/a.c", "a\n");
        let relpaths = vec!["src/./sub/../a.c".to_owned()];
        let pkg = PackageScanner::new(ScannerConfig::default())
            .scan_files(fx.package_config(PathBuf::new()), &relpaths)
            .unwrap();

        let file = &pkg.files[0];
        assert!(file.abspath.is_absolute());
        assert!(file.abspath.ends_with("src/a.c"));
        assert!(file.is_hashed());
        assert_eq!(file.relpath, "src/./sub/../a.c");
    }

    #[test]
    fn normalize_path_collapses_dots() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }
}
