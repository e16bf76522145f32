//! `spdx-builder generate` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use spdx_builder_core::config::{PackageSection, SpdxBuilderConfig};
use spdx_builder_scanner::{
    Document, PackageMetadata, PackageRole, PackageScanner, ScannerConfig, Supplier,
    WrittenDocument, assemble_document, document_config, write_spdx,
};

use crate::cli::GenerateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Document name used when no package name is configured.
const DEFAULT_DOCUMENT_NAME: &str = "sbom";

/// Execute the `generate` command.
pub fn execute(
    args: GenerateArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = super::load_config_or_default(config_path)?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let scanner_config = ScannerConfig::from_core(&config.scanner);
    scanner_config.validate()?;
    let scanner = PackageScanner::new(scanner_config);
    let meta = package_metadata(&config.package);

    info!(
        sources = %args.sources.display(),
        builds = %args.builds.display(),
        "scanning packages"
    );
    let sources = scanner.scan(meta.package_config(
        PackageRole::Sources,
        args.sources.clone(),
        args.srcdir.clone(),
    ))?;
    let builds = scanner.scan(meta.package_config(
        PackageRole::Builds,
        args.builds.clone(),
        args.builddir.clone(),
    ))?;

    let doc_name = document_name(&config.package);
    let doc = assemble_document(
        document_config(&doc_name, &config.document.namespace_prefix),
        sources,
        builds,
    )?;

    let written = write_spdx(
        Path::new(&config.document.output_dir),
        &config.document.file_name,
        &doc,
        config.document.pretty,
    )?;

    writer.render(&GenerateReport::new(&doc, &written, args.verbose))?;
    Ok(())
}

/// Apply command-line flags on top of file and environment configuration.
fn apply_overrides(config: &mut SpdxBuilderConfig, args: &GenerateArgs) {
    if let Some(dir) = &args.output_dir {
        config.document.output_dir = dir.display().to_string();
    }
    if let Some(prefix) = &args.namespace_prefix {
        config.document.namespace_prefix = prefix.clone();
    }
    if args.pretty {
        config.document.pretty = true;
    }
    if let Some(name) = &args.package_name {
        config.package.name = name.clone();
    }
    if let Some(version) = &args.package_version {
        config.package.version = version.clone();
    }
    if let Some(license) = &args.package_license {
        config.package.declared_license = license.clone();
    }
    // A supplier given on the command line replaces either supplier from config.
    if let Some(person) = &args.supplier_person {
        config.package.supplier_person = person.clone();
        config.package.supplier_org.clear();
    }
    if let Some(org) = &args.supplier_org {
        config.package.supplier_org = org.clone();
        config.package.supplier_person.clear();
    }
}

fn package_metadata(section: &PackageSection) -> PackageMetadata {
    PackageMetadata {
        name: section.name.clone(),
        version: section.version.clone(),
        supplier: Supplier::from_parts(&section.supplier_person, &section.supplier_org),
        declared_license: section.declared_license.clone(),
    }
}

fn document_name(section: &PackageSection) -> String {
    if section.name.is_empty() {
        DEFAULT_DOCUMENT_NAME.to_owned()
    } else {
        section.name.clone()
    }
}

/// Summary of a generated SPDX document.
#[derive(Serialize)]
pub struct GenerateReport {
    pub path: String,
    pub sha1: String,
    pub name: String,
    pub namespace: String,
    pub packages: Vec<PackageSummary>,
    pub files: usize,
    pub relationships: usize,
    pub extracted_licenses: Vec<String>,
}

/// Per-package summary.
#[derive(Serialize)]
pub struct PackageSummary {
    pub spdx_id: String,
    pub name: String,
    pub files: usize,
    pub license_concluded: String,
    pub license_info_from_files: Vec<String>,
    pub verification_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_details: Option<Vec<FileSummary>>,
}

/// Per-file details (verbose mode only).
#[derive(Serialize)]
pub struct FileSummary {
    pub relpath: String,
    pub abspath: String,
    pub sha1: String,
    pub sha256: String,
    pub license_concluded: String,
    pub license_info_in_file: Vec<String>,
}

impl GenerateReport {
    pub fn new(doc: &Document, written: &WrittenDocument, verbose: bool) -> Self {
        let packages = doc
            .packages()
            .iter()
            .map(|pkg| PackageSummary {
                spdx_id: pkg.spdx_id().to_owned(),
                name: pkg.config.name.clone(),
                files: pkg.file_count(),
                license_concluded: pkg.concluded_license.clone(),
                license_info_from_files: pkg.license_info_from_files.clone(),
                verification_code: pkg.verification_code.clone(),
                file_details: verbose.then(|| {
                    pkg.files
                        .iter()
                        .map(|f| FileSummary {
                            relpath: f.relpath.clone(),
                            abspath: f.abspath.display().to_string(),
                            sha1: f.sha1.clone(),
                            sha256: f.sha256.clone(),
                            license_concluded: f.concluded_license.clone(),
                            license_info_in_file: f.license_info_in_file.clone(),
                        })
                        .collect()
                }),
            })
            .collect();

        Self {
            path: written.path.display().to_string(),
            sha1: written.sha1.clone(),
            name: doc.config.name.clone(),
            namespace: doc.config.namespace.clone(),
            packages,
            files: written.files,
            relationships: written.relationships,
            extracted_licenses: doc.custom_license_ids(),
        }
    }
}

impl Render for GenerateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Wrote SPDX JSON document to {}", self.path.bold())?;
        writeln!(w, "  Name:          {}", self.name)?;
        writeln!(w, "  Namespace:     {}", self.namespace)?;
        writeln!(w, "  SHA1:          {}", self.sha1)?;
        writeln!(w, "  Files:         {}", self.files)?;
        writeln!(w, "  Relationships: {}", self.relationships)?;
        if !self.extracted_licenses.is_empty() {
            writeln!(w, "  LicenseRefs:   {}", self.extracted_licenses.join(", "))?;
        }

        for pkg in &self.packages {
            writeln!(w)?;
            writeln!(w, "{} ({})", pkg.name.bold(), pkg.spdx_id)?;
            writeln!(w, "  Files:             {}", pkg.files)?;
            writeln!(w, "  Concluded license: {}", pkg.license_concluded.green())?;
            writeln!(
                w,
                "  Licenses in files: {}",
                pkg.license_info_from_files.join(", ")
            )?;
            writeln!(w, "  Verification code: {}", pkg.verification_code)?;

            if let Some(files) = &pkg.file_details {
                for f in files {
                    writeln!(w, "  * {}", f.relpath)?;
                    writeln!(w, "    - abspath:           {}", f.abspath)?;
                    if f.sha1.is_empty() {
                        writeln!(w, "    - SHA1:              {}", "(unreadable)".red())?;
                    } else {
                        writeln!(w, "    - SHA1:              {}", f.sha1)?;
                    }
                    writeln!(w, "    - SHA256:            {}", f.sha256)?;
                    writeln!(w, "    - concludedLicense:  {}", f.license_concluded)?;
                    writeln!(
                        w,
                        "    - licenseInfoInFile: {}",
                        f.license_info_in_file.join(",")
                    )?;
                }
            }
        }

        Ok(())
    }
}
