//! 문서 조립 -- 스캔된 두 패키지를 하나의 문서로 연결
//!
//! ```text
//! SPDXRef-DOCUMENT --DESCRIBES--> SPDXRef-Package-sources
//! SPDXRef-DOCUMENT --DESCRIBES--> SPDXRef-Package-builds
//! SPDXRef-Package-builds --GENERATED_FROM--> SPDXRef-Package-sources
//! ```

use std::fmt;
use std::path::PathBuf;

use crate::error::ScannerError;
use crate::types::{
    DOCUMENT_SPDX_ID, Document, DocumentConfig, Package, PackageConfig, Relationship,
    RelationshipType, Supplier,
};

/// 네임스페이스 접두어가 없을 때 사용하는 기본 접두어
pub const DEFAULT_NAMESPACE_PREFIX: &str = "http://spdx.org/spdxdocs";

/// 문서 안에서 패키지가 맡는 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageRole {
    Sources,
    Builds,
}

impl PackageRole {
    /// 역할별 고정 패키지 SPDX ID
    pub fn spdx_id(self) -> &'static str {
        match self {
            Self::Sources => "SPDXRef-Package-sources",
            Self::Builds => "SPDXRef-Package-builds",
        }
    }

    /// 기본 이름에 역할 접미어를 붙인 패키지 이름
    pub fn package_name(self, base: &str) -> String {
        format!("{base} {self}")
    }
}

impl fmt::Display for PackageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sources => write!(f, "sources"),
            Self::Builds => write!(f, "builds"),
        }
    }
}

/// 두 패키지에 공통으로 적용되는 메타데이터
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub supplier: Option<Supplier>,
    pub declared_license: String,
}

impl PackageMetadata {
    /// 역할에 맞는 [`PackageConfig`]를 만듭니다.
    pub fn package_config(
        &self,
        role: PackageRole,
        file_list_path: PathBuf,
        basedir: PathBuf,
    ) -> PackageConfig {
        let mut cfg = PackageConfig {
            file_list_path,
            basedir,
            name: role.package_name(&self.name),
            version: self.version.clone(),
            supplier: self.supplier.clone(),
            spdx_id: role.spdx_id().to_owned(),
            ..Default::default()
        };
        if !self.declared_license.is_empty() {
            cfg.declared_license = self.declared_license.clone();
        }
        cfg
    }
}

/// 네임스페이스 접두어와 새 UUID로 문서 설정을 만듭니다.
///
/// 접두어가 비어 있으면 [`DEFAULT_NAMESPACE_PREFIX`]를 사용합니다.
pub fn document_config(name: &str, namespace_prefix: &str) -> DocumentConfig {
    let prefix = if namespace_prefix.is_empty() {
        DEFAULT_NAMESPACE_PREFIX
    } else {
        namespace_prefix
    };
    DocumentConfig {
        name: name.to_owned(),
        namespace: format!("{prefix}/{}", uuid::Uuid::new_v4()),
        doc_ref_id: format!("DocumentRef-{name}"),
    }
}

/// 소스 패키지와 빌드 패키지로 문서를 조립합니다.
///
/// # Errors
///
/// 두 패키지의 ID 또는 파일 ID가 겹치면 `ScannerError::DuplicateId`
pub fn assemble_document(
    config: DocumentConfig,
    sources: Package,
    builds: Package,
) -> Result<Document, ScannerError> {
    let sources_id = sources.spdx_id().to_owned();
    let builds_id = builds.spdx_id().to_owned();

    let mut doc = Document::new(config);
    doc.add_package(sources)?;
    doc.add_package(builds)?;

    doc.add_relationship(Relationship::new(
        DOCUMENT_SPDX_ID,
        sources_id.as_str(),
        RelationshipType::Describes,
    ));
    doc.add_relationship(Relationship::new(
        DOCUMENT_SPDX_ID,
        builds_id.as_str(),
        RelationshipType::Describes,
    ));
    doc.add_relationship(Relationship::new(
        builds_id,
        sources_id,
        RelationshipType::GeneratedFrom,
    ));

    tracing::debug!(document = %doc, "document assembled");
    Ok(doc)
}
