//! 도메인 타입 -- SPDX 문서 그래프
//!
//! [`Document`]가 [`Package`]를 소유하고, [`Package`]가 [`File`]을 소유합니다.
//! [`File`]의 소속 패키지는 포인터가 아닌 SPDX ID로 기록하며,
//! 소속 문서를 통해 조회합니다.
//!
//! ```text
//! Document ──owns──> Package ──owns──> File
//!    │                  ^                │
//!    │                  └── package_id ──┘
//!    └── relationships: (subject, object, kind)
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ScannerError;
use crate::license::expression::split_expression;

/// "주장하지 않음" 센티널
pub const NOASSERTION: &str = "NOASSERTION";

/// "해당 없음" 센티널
pub const NONE: &str = "NONE";

/// 문서 자신의 SPDX ID
pub const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// 사용자 정의 라이선스 ID 접두어
pub const LICENSE_REF_PREFIX: &str = "LicenseRef-";

/// 패키지 공급자 (Person 또는 Organization 중 정확히 하나)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Supplier {
    /// 개인 공급자
    Person(String),
    /// 조직 공급자
    Organization(String),
}

impl Supplier {
    /// person/organization 문자열 쌍에서 공급자를 결정합니다.
    ///
    /// 조직이 지정되면 조직을 우선하고, 둘 다 비어 있으면 `None`입니다.
    pub fn from_parts(person: &str, organization: &str) -> Option<Self> {
        if !organization.is_empty() {
            Some(Self::Organization(organization.to_owned()))
        } else if !person.is_empty() {
            Some(Self::Person(person.to_owned()))
        } else {
            None
        }
    }
}

impl fmt::Display for Supplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(name) => write!(f, "Person: {name}"),
            Self::Organization(name) => write!(f, "Organization: {name}"),
        }
    }
}

/// 패키지 생성 설정
///
/// 동작 없는 불변 값이며, 스캔 시 값으로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    /// 패키지에 포함될 파일 경로 목록 파일
    pub file_list_path: PathBuf,
    /// 파일 상대 경로의 기준 디렉토리
    pub basedir: PathBuf,
    pub name: String,
    pub version: String,
    pub supplier: Option<Supplier>,
    /// 호출자가 지정하는 고정 SPDX ID (`SPDXRef-` 포함)
    pub spdx_id: String,
    pub declared_license: String,
    pub copyright_text: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            file_list_path: PathBuf::new(),
            basedir: PathBuf::new(),
            name: String::new(),
            version: String::new(),
            supplier: None,
            spdx_id: String::new(),
            declared_license: NOASSERTION.to_owned(),
            copyright_text: NOASSERTION.to_owned(),
        }
    }
}

/// 문서 생성 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub name: String,
    /// 실행마다 전역적으로 고유한 URI 형태의 네임스페이스
    pub namespace: String,
    /// 다른 문서가 이 문서를 참조할 `DocumentRef-` ID
    pub doc_ref_id: String,
}

/// 스캔된 단일 파일
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub abspath: PathBuf,
    /// 소속 패키지 basedir 기준 상대 경로 (패키지 내 고유)
    pub relpath: String,
    pub spdx_id: String,
    /// 해시 실패 시 빈 문자열
    pub sha1: String,
    /// SHA-256 미계산 또는 해시 실패 시 빈 문자열
    pub sha256: String,
    pub concluded_license: String,
    /// 결론 표현식에서 추출한 개별 라이선스 ID (정렬됨)
    pub license_info_in_file: Vec<String>,
    pub copyright_text: String,
    /// 소속 패키지의 SPDX ID (비소유 역참조)
    pub package_id: String,
}

impl File {
    /// 기본 라이선스 필드를 가진 새 파일을 생성합니다.
    pub fn new(package_id: &str, spdx_id: String, relpath: String, abspath: PathBuf) -> Self {
        Self {
            abspath,
            relpath,
            spdx_id,
            sha1: String::new(),
            sha256: String::new(),
            concluded_license: NOASSERTION.to_owned(),
            license_info_in_file: Vec::new(),
            copyright_text: NOASSERTION.to_owned(),
            package_id: package_id.to_owned(),
        }
    }

    /// 해시가 계산되었는지 반환합니다.
    pub fn is_hashed(&self) -> bool {
        !self.sha1.is_empty()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.relpath, self.spdx_id)
    }
}

/// 스캔이 끝난 패키지
///
/// [`PackageScanner`](crate::scanner::PackageScanner)가 한 번에 채운 뒤 읽기 전용으로 다룹니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub config: PackageConfig,
    /// 패키지 검증 코드 (SPDX 2.2 §3.9)
    pub verification_code: String,
    /// 결론 라이선스 (집계 비활성 시 NOASSERTION)
    pub concluded_license: String,
    /// 파일들에서 발견된 라이선스 ID (정렬, 중복 제거)
    pub license_info_from_files: Vec<String>,
    /// 스캔 순서대로의 파일 목록 (SPDX ID, 상대 경로 모두 고유)
    pub files: Vec<File>,
}

impl Package {
    /// 파일이 없는 새 패키지를 생성합니다.
    pub fn new(config: PackageConfig) -> Self {
        Self {
            config,
            verification_code: String::new(),
            concluded_license: NOASSERTION.to_owned(),
            license_info_from_files: Vec::new(),
            files: Vec::new(),
        }
    }

    /// 패키지 SPDX ID를 반환합니다.
    pub fn spdx_id(&self) -> &str {
        &self.config.spdx_id
    }

    /// 파일 수를 반환합니다.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// SPDX ID로 파일을 검색합니다.
    pub fn file(&self, spdx_id: &str) -> Option<&File> {
        self.files.iter().find(|f| f.spdx_id == spdx_id)
    }

    /// 상대 경로로 파일을 검색합니다.
    pub fn file_by_relpath(&self, relpath: &str) -> Option<&File> {
        self.files.iter().find(|f| f.relpath == relpath)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Package({}, {} files, license={})",
            self.config.spdx_id,
            self.files.len(),
            self.concluded_license,
        )
    }
}

/// 관계 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// 문서 -> 패키지
    Describes,
    /// 빌드 결과 -> 소스
    GeneratedFrom,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Describes => write!(f, "DESCRIBES"),
            Self::GeneratedFrom => write!(f, "GENERATED_FROM"),
        }
    }
}

/// 방향이 있는 관계 `(subject, object, kind)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub subject_id: String,
    pub object_id: String,
    pub kind: RelationshipType,
}

impl Relationship {
    pub fn new(subject_id: impl Into<String>, object_id: impl Into<String>, kind: RelationshipType) -> Self {
        Self {
            subject_id: subject_id.into(),
            object_id: object_id.into(),
            kind,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject_id, self.kind, self.object_id)
    }
}

/// SPDX 문서 -- 최상위 컨테이너
///
/// 패키지 ID와 파일 ID는 문서 안에서 전역적으로 고유합니다.
/// 중복 삽입은 [`ScannerError::DuplicateId`]로 거부됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub config: DocumentConfig,
    /// 등록 순서대로의 패키지 목록
    packages: Vec<Package>,
    /// 문서 범위 관계 (순서는 출력 가독성에만 영향)
    relationships: Vec<Relationship>,
    /// 교차 문서 참조 자리 (이 엔진은 채우지 않음)
    pub external_documents: HashSet<String>,
    /// 선언이 필요한 `LicenseRef-` 라이선스 ID
    custom_license_ids: HashSet<String>,
}

impl Document {
    /// 빈 문서를 생성합니다.
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            config,
            packages: Vec::new(),
            relationships: Vec::new(),
            external_documents: HashSet::new(),
            custom_license_ids: HashSet::new(),
        }
    }

    /// 패키지를 등록합니다.
    ///
    /// 패키지 ID 또는 소속 파일 ID가 이미 문서에 있으면 실패합니다.
    pub fn add_package(&mut self, package: Package) -> Result<(), ScannerError> {
        let mut seen: HashSet<&str> = self.element_ids().collect();
        seen.insert(DOCUMENT_SPDX_ID);

        if !seen.insert(package.spdx_id()) {
            return Err(ScannerError::DuplicateId {
                id: package.spdx_id().to_owned(),
            });
        }
        for file in &package.files {
            if !seen.insert(file.spdx_id.as_str()) {
                return Err(ScannerError::DuplicateId {
                    id: file.spdx_id.clone(),
                });
            }
        }

        self.custom_license_ids.extend(custom_license_refs(&package));
        self.packages.push(package);
        Ok(())
    }

    /// 관계를 추가합니다.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    /// 등록 순서대로의 패키지 목록을 반환합니다.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// 관계 목록을 반환합니다.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// 정렬된 사용자 정의 라이선스 ID 목록을 반환합니다.
    pub fn custom_license_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.custom_license_ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// ID로 패키지를 검색합니다.
    pub fn package(&self, spdx_id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.spdx_id() == spdx_id)
    }

    /// ID로 파일을 검색합니다 (모든 패키지 대상).
    pub fn file(&self, spdx_id: &str) -> Option<&File> {
        self.packages.iter().find_map(|p| p.file(spdx_id))
    }

    /// 파일의 소속 패키지를 역참조로 조회합니다.
    pub fn package_of(&self, file: &File) -> Option<&Package> {
        self.package(&file.package_id)
    }

    /// 문서 내 전체 파일 수를 반환합니다.
    pub fn file_count(&self) -> usize {
        self.packages.iter().map(Package::file_count).sum()
    }

    fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().flat_map(|p| {
            std::iter::once(p.spdx_id()).chain(p.files.iter().map(|f| f.spdx_id.as_str()))
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document({}, {} packages, {} files, {} relationships)",
            self.config.name,
            self.packages.len(),
            self.file_count(),
            self.relationships.len(),
        )
    }
}

/// 패키지의 선언 라이선스와 파일 유래 라이선스에서 `LicenseRef-` 토큰을 수집합니다.
fn custom_license_refs(package: &Package) -> impl Iterator<Item = String> + '_ {
    split_expression(&package.config.declared_license)
        .into_iter()
        .chain(package.license_info_from_files.iter().cloned())
        .filter(|id| id.starts_with(LICENSE_REF_PREFIX))
}
