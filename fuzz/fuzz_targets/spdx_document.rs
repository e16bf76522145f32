#![no_main]

use std::path::PathBuf;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use spdx_builder_scanner::sbom::{make_document_at, serialize_document};
use spdx_builder_scanner::{Document, DocumentConfig, File, Package, PackageConfig};

/// 퍼저용 구조적 패키지 입력
#[derive(Arbitrary, Debug)]
struct FuzzPackage {
    name: String,
    declared_license: String,
    files: Vec<FuzzFile>,
}

#[derive(Arbitrary, Debug)]
struct FuzzFile {
    relpath: String,
    sha1: String,
    license: Option<String>,
}

fuzz_target!(|input: FuzzPackage| {
    let config = PackageConfig {
        name: input.name,
        spdx_id: "SPDXRef-Package-fuzz".to_owned(),
        declared_license: input.declared_license,
        ..Default::default()
    };
    let mut pkg = Package::new(config);

    // 파일 수 제한 (퍼징 성능)
    for (i, f) in input.files.into_iter().take(100).enumerate() {
        let mut file = File::new(
            "SPDXRef-Package-fuzz",
            format!("SPDXRef-File-{i}"),
            f.relpath.clone(),
            PathBuf::from(f.relpath),
        );
        file.sha1 = f.sha1;
        if let Some(license) = f.license {
            file.license_info_in_file = vec![license.clone()];
            file.concluded_license = license;
        }
        pkg.files.push(file);
    }

    let mut doc = Document::new(DocumentConfig {
        name: "fuzz".to_owned(),
        namespace: "http://spdx.org/spdxdocs/fuzz".to_owned(),
        doc_ref_id: "DocumentRef-fuzz".to_owned(),
    });
    if doc.add_package(pkg).is_err() {
        return;
    }

    let json = make_document_at(&doc, "2024-01-01T00:00:00Z".to_owned());
    if let Ok(text) = serialize_document(&json, false) {
        let _: serde_json::Value =
            serde_json::from_str(&text).expect("SPDX output must be valid JSON");
    }
});
