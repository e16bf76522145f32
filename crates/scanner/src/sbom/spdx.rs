//! SPDX 2.2 JSON 투영
//!
//! 문서 그래프를 [SPDX](https://spdx.dev/) 2.2 JSON 구조로 변환합니다.
//! 파일은 문서 수준의 `files` 배열에 한 번만 나오고, 소속 패키지의
//! `hasFiles`에서 ID로 참조됩니다.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::util;
use crate::types::{DOCUMENT_SPDX_ID, Document, File, NOASSERTION, Package, Relationship};

/// SPDX 버전
pub const SPDX_VERSION: &str = "SPDX-2.2";

/// 문서 데이터 라이선스
pub const DATA_LICENSE: &str = "CC0-1.0";

/// SPDX 2.2 문서 루트 구조
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxDocument {
    pub spdx_version: String,
    pub data_license: String,
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub name: String,
    pub document_namespace: String,
    pub creation_info: SpdxCreationInfo,
    pub document_describes: Vec<String>,
    pub packages: Vec<SpdxPackage>,
    pub files: Vec<SpdxFile>,
    pub relationships: Vec<SpdxRelationship>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has_extracted_licensing_infos: Vec<SpdxExtractedLicense>,
}

/// SPDX 생성 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpdxCreationInfo {
    pub created: String,
    pub creators: Vec<String>,
}

/// SPDX 패키지
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxPackage {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub license_declared: String,
    pub copyright_text: String,
    pub download_location: String,
    pub license_concluded: String,
    pub license_info_from_files: Vec<String>,
    pub files_analyzed: bool,
    pub package_verification_code: SpdxVerificationCode,
    pub has_files: Vec<String>,
}

/// SPDX 패키지 검증 코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxVerificationCode {
    pub package_verification_code_value: String,
}

/// SPDX 파일
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxFile {
    #[serde(rename = "SPDXID")]
    pub spdx_id: String,
    pub file_name: String,
    pub license_concluded: String,
    pub license_info_in_files: Vec<String>,
    pub copyright_text: String,
    pub checksums: Vec<SpdxChecksum>,
}

/// SPDX 체크섬
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxChecksum {
    pub algorithm: String,
    pub checksum_value: String,
}

/// SPDX 관계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxRelationship {
    pub spdx_element_id: String,
    pub related_spdx_element: String,
    pub relationship_type: String,
}

/// 추출된 라이선스 정보 (`LicenseRef-` 선언)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxExtractedLicense {
    pub license_id: String,
    pub comment: String,
    pub extracted_text: String,
    pub name: String,
}

/// 현재 시각으로 문서를 SPDX JSON 구조로 변환합니다.
pub fn make_document(doc: &Document) -> SpdxDocument {
    make_document_at(doc, util::current_timestamp())
}

/// 주어진 생성 시각으로 문서를 SPDX JSON 구조로 변환합니다.
pub fn make_document_at(doc: &Document, created: String) -> SpdxDocument {
    let mut files = Vec::with_capacity(doc.file_count());
    let mut listed: HashSet<&str> = HashSet::with_capacity(doc.file_count());

    let packages = doc
        .packages()
        .iter()
        .map(|pkg| {
            for file in &pkg.files {
                if listed.insert(file.spdx_id.as_str()) {
                    files.push(make_file(file));
                }
            }
            make_package(pkg)
        })
        .collect();

    SpdxDocument {
        spdx_version: SPDX_VERSION.to_owned(),
        data_license: DATA_LICENSE.to_owned(),
        spdx_id: DOCUMENT_SPDX_ID.to_owned(),
        name: doc.config.name.clone(),
        document_namespace: doc.config.namespace.clone(),
        creation_info: SpdxCreationInfo {
            created,
            creators: vec![util::tool_creator()],
        },
        document_describes: doc.packages().iter().map(|p| p.spdx_id().to_owned()).collect(),
        packages,
        files,
        relationships: doc.relationships().iter().map(make_relationship).collect(),
        has_extracted_licensing_infos: doc
            .custom_license_ids()
            .into_iter()
            .map(make_extracted_license)
            .collect(),
    }
}

fn make_package(pkg: &Package) -> SpdxPackage {
    let cfg = &pkg.config;
    SpdxPackage {
        spdx_id: cfg.spdx_id.clone(),
        name: cfg.name.clone(),
        version_info: (!cfg.version.is_empty()).then(|| cfg.version.clone()),
        supplier: cfg.supplier.as_ref().map(ToString::to_string),
        license_declared: cfg.declared_license.clone(),
        copyright_text: cfg.copyright_text.clone(),
        download_location: NOASSERTION.to_owned(),
        license_concluded: pkg.concluded_license.clone(),
        license_info_from_files: pkg.license_info_from_files.clone(),
        files_analyzed: true,
        package_verification_code: SpdxVerificationCode {
            package_verification_code_value: pkg.verification_code.clone(),
        },
        has_files: pkg.files.iter().map(|f| f.spdx_id.clone()).collect(),
    }
}

fn make_file(file: &File) -> SpdxFile {
    let mut checksums = vec![SpdxChecksum {
        algorithm: "SHA1".to_owned(),
        checksum_value: file.sha1.clone(),
    }];
    if !file.sha256.is_empty() {
        checksums.push(SpdxChecksum {
            algorithm: "SHA256".to_owned(),
            checksum_value: file.sha256.clone(),
        });
    }

    SpdxFile {
        spdx_id: file.spdx_id.clone(),
        file_name: file.relpath.clone(),
        license_concluded: file.concluded_license.clone(),
        license_info_in_files: file.license_info_in_file.clone(),
        copyright_text: file.copyright_text.clone(),
        checksums,
    }
}

fn make_relationship(rel: &Relationship) -> SpdxRelationship {
    SpdxRelationship {
        spdx_element_id: rel.subject_id.clone(),
        related_spdx_element: rel.object_id.clone(),
        relationship_type: rel.kind.to_string(),
    }
}

fn make_extracted_license(id: String) -> SpdxExtractedLicense {
    SpdxExtractedLicense {
        comment: format!(
            "Corresponds to the license ID `{id}` detected in an SPDX-License-Identifier: tag."
        ),
        extracted_text: id.clone(),
        name: id.clone(),
        license_id: id,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::types::{DocumentConfig, PackageConfig, RelationshipType, Supplier};

    fn sample_file(package_id: &str, id: &str, sha256: &str) -> File {
        let mut f = File::new(package_id, id.to_owned(), format!("{id}.c"), PathBuf::from("/x"));
        f.sha1 = "a9993e364706816aba3e25717850c26c9cd0d89d".to_owned();
        f.sha256 = sha256.to_owned();
        f.concluded_license = "MIT".to_owned();
        f.license_info_in_file = vec!["MIT".to_owned()];
        f
    }

    fn sample_document() -> Document {
        let mut sources = Package::new(PackageConfig {
            spdx_id: "SPDXRef-Package-sources".to_owned(),
            name: "demo sources".to_owned(),
            version: "1.2.3".to_owned(),
            supplier: Some(Supplier::Organization("Acme".to_owned())),
            declared_license: "LicenseRef-acme".to_owned(),
            ..Default::default()
        });
        sources.files.push(sample_file("SPDXRef-Package-sources", "SPDXRef-File-1", "ff"));
        sources.verification_code = "abc".to_owned();
        sources.concluded_license = "MIT".to_owned();
        sources.license_info_from_files = vec!["MIT".to_owned()];

        let mut builds = Package::new(PackageConfig {
            spdx_id: "SPDXRef-Package-builds".to_owned(),
            name: "demo builds".to_owned(),
            ..Default::default()
        });
        builds.files.push(sample_file("SPDXRef-Package-builds", "SPDXRef-File-2", ""));

        let mut doc = Document::new(DocumentConfig {
            name: "demo".to_owned(),
            namespace: "https://example.com/spdx/demo".to_owned(),
            doc_ref_id: "DocumentRef-demo".to_owned(),
        });
        doc.add_package(sources).unwrap();
        doc.add_package(builds).unwrap();
        doc.add_relationship(Relationship::new(
            "SPDXRef-Package-builds",
            "SPDXRef-Package-sources",
            RelationshipType::GeneratedFrom,
        ));
        doc
    }

    #[test]
    fn document_header_fields() {
        let json = make_document_at(&sample_document(), "2024-01-01T00:00:00Z".to_owned());
        assert_eq!(json.spdx_version, "SPDX-2.2");
        assert_eq!(json.data_license, "CC0-1.0");
        assert_eq!(json.spdx_id, "SPDXRef-DOCUMENT");
        assert_eq!(json.name, "demo");
        assert_eq!(json.creation_info.created, "2024-01-01T00:00:00Z");
        assert_eq!(
            json.document_describes,
            vec!["SPDXRef-Package-sources", "SPDXRef-Package-builds"]
        );
    }

    #[test]
    fn packages_reference_files_by_id() {
        let json = make_document(&sample_document());
        assert_eq!(json.packages.len(), 2);
        assert_eq!(json.files.len(), 2);
        assert_eq!(json.packages[0].has_files, vec!["SPDXRef-File-1"]);
        assert_eq!(json.packages[1].has_files, vec!["SPDXRef-File-2"]);
        assert!(json.packages.iter().all(|p| p.files_analyzed));
    }

    #[test]
    fn optional_package_fields_are_omitted() {
        let value = serde_json::to_value(make_document(&sample_document())).unwrap();
        let sources = &value["packages"][0];
        let builds = &value["packages"][1];

        assert_eq!(sources["versionInfo"], "1.2.3");
        assert_eq!(sources["supplier"], "Organization: Acme");
        assert_eq!(sources["downloadLocation"], "NOASSERTION");
        assert_eq!(
            sources["packageVerificationCode"]["packageVerificationCodeValue"],
            "abc"
        );
        assert!(builds.get("versionInfo").is_none());
        assert!(builds.get("supplier").is_none());
    }

    #[test]
    fn sha256_checksum_only_when_present() {
        let json = make_document(&sample_document());
        assert_eq!(json.files[0].checksums.len(), 2);
        assert_eq!(json.files[0].checksums[1].algorithm, "SHA256");
        assert_eq!(json.files[1].checksums.len(), 1);
        assert_eq!(json.files[1].checksums[0].algorithm, "SHA1");
    }

    #[test]
    fn relationships_use_wire_names() {
        let value = serde_json::to_value(make_document(&sample_document())).unwrap();
        let rel = &value["relationships"][0];
        assert_eq!(rel["spdxElementId"], "SPDXRef-Package-builds");
        assert_eq!(rel["relatedSpdxElement"], "SPDXRef-Package-sources");
        assert_eq!(rel["relationshipType"], "GENERATED_FROM");
    }

    #[test]
    fn extracted_licensing_infos_for_license_refs() {
        let json = make_document(&sample_document());
        assert_eq!(json.has_extracted_licensing_infos.len(), 1);
        let info = &json.has_extracted_licensing_infos[0];
        assert_eq!(info.license_id, "LicenseRef-acme");
        assert_eq!(info.name, "LicenseRef-acme");
        assert_eq!(info.extracted_text, "LicenseRef-acme");
        assert!(info.comment.contains("`LicenseRef-acme`"));
    }

    #[test]
    fn extracted_licensing_infos_omitted_when_empty() {
        let doc = Document::new(DocumentConfig::default());
        let value = serde_json::to_value(make_document(&doc)).unwrap();
        assert!(value.get("hasExtractedLicensingInfos").is_none());
        assert_eq!(value["files"].as_array().unwrap().len(), 0);
    }
}
