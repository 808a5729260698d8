//! Bundle directory persistence: write/verify a run report on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   declaration.json       -- grounded facts, operators, init, goal
//!   plan.json              -- steps + plan fingerprint (solvable runs only)
//!   search_stats.json      -- run counters
//!   bundle_manifest.json   -- artifact listing with content hashes
//!   bundle_digest.txt      -- ASCII digest of the manifest bytes
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing declared artifact files -> error
//! - Content hash mismatch -> error
//! - Digest mismatch -> error

use std::path::Path;

use strider_search::fingerprint::{canonical_hash, DOMAIN_DECLARATION};

use crate::runner::PlanReport;

/// Domain prefix for the bundle digest.
const DOMAIN_BUNDLE: &[u8] = b"STRIDER::BUNDLE::V1\0";

/// Fixed metadata filenames in the bundle directory.
const MANIFEST_FILENAME: &str = "bundle_manifest.json";
const DIGEST_FILENAME: &str = "bundle_digest.txt";

/// Error writing a bundle directory.
#[derive(Debug)]
pub enum BundleWriteError {
    /// I/O error during write.
    Io { detail: String },
}

impl std::fmt::Display for BundleWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for BundleWriteError {}

/// Error verifying a bundle directory.
#[derive(Debug)]
pub enum BundleVerifyError {
    /// I/O error during read.
    Io { detail: String },
    /// A required metadata file is missing.
    MissingMetadata { filename: String },
    /// A declared artifact file is missing from the directory.
    MissingArtifact { name: String },
    /// `bundle_manifest.json` is not valid JSON of the expected shape.
    ManifestInvalid { detail: String },
    /// An artifact's content hash does not match the manifest.
    HashMismatch { name: String },
    /// `bundle_digest.txt` does not match the recomputed manifest digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingMetadata { filename } => {
                write!(f, "missing metadata file: {filename}")
            }
            Self::MissingArtifact { name } => write!(f, "missing artifact: {name}"),
            Self::ManifestInvalid { detail } => write!(f, "manifest invalid: {detail}"),
            Self::HashMismatch { name } => write!(f, "content hash mismatch: {name}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for BundleVerifyError {}

/// JSON rendering of a declaration with deterministic key order.
#[must_use]
pub fn declaration_json(report: &PlanReport) -> serde_json::Value {
    let declaration = &report.declaration;
    serde_json::json!({
        "facts": declaration
            .facts()
            .iter()
            .map(|(_, fact)| fact.to_string())
            .collect::<Vec<_>>(),
        "goal": declaration.goal().iter().collect::<Vec<_>>(),
        "init": declaration.init().iter().collect::<Vec<_>>(),
        "operators": declaration
            .operators()
            .iter()
            .map(|op| {
                serde_json::json!({
                    "add": op.add.iter().collect::<Vec<_>>(),
                    "cost": op.cost,
                    "del": op.del.iter().collect::<Vec<_>>(),
                    "name": op.name,
                    "pre_neg": op.pre_neg.iter().collect::<Vec<_>>(),
                    "pre_pos": op.pre_pos.iter().collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
        "world": report.world,
    })
}

/// Write a run report to `dir` as a bundle directory.
///
/// Creates the directory if it does not exist. `plan.json` is only written
/// when the run produced a plan.
///
/// # Errors
///
/// Returns [`BundleWriteError`] on I/O failure.
pub fn write_bundle_dir(report: &PlanReport, dir: &Path) -> Result<(), BundleWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| BundleWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    let mut artifacts: Vec<(&str, Vec<u8>)> = vec![
        ("declaration.json", render(&declaration_json(report))),
        ("search_stats.json", render(&report.run.stats.to_json())),
    ];
    if let Some(plan) = &report.plan {
        artifacts.push(("plan.json", render(&plan.to_json())));
    }
    artifacts.sort_by_key(|(name, _)| *name);

    let manifest_entries: Vec<serde_json::Value> = artifacts
        .iter()
        .map(|(name, content)| {
            serde_json::json!({
                "content_hash": canonical_hash(DOMAIN_DECLARATION, content),
                "name": name,
            })
        })
        .collect();
    let manifest = render(&serde_json::json!({
        "artifacts": manifest_entries,
        "schema_version": "bundle.v1",
        "world": report.world,
    }));
    let digest = canonical_hash(DOMAIN_BUNDLE, &manifest);

    for (name, content) in &artifacts {
        write_atomic(&dir.join(name), content)?;
    }
    write_atomic(&dir.join(MANIFEST_FILENAME), &manifest)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_bytes())?;
    Ok(())
}

/// Verify a bundle directory: recompute every artifact hash and the
/// manifest digest, failing closed on any mismatch.
///
/// # Errors
///
/// Returns [`BundleVerifyError`] on any validation failure.
pub fn verify_bundle_dir(dir: &Path) -> Result<(), BundleVerifyError> {
    let manifest_bytes = std::fs::read(dir.join(MANIFEST_FILENAME)).map_err(|_| {
        BundleVerifyError::MissingMetadata {
            filename: MANIFEST_FILENAME.into(),
        }
    })?;
    let digest_bytes = std::fs::read(dir.join(DIGEST_FILENAME)).map_err(|_| {
        BundleVerifyError::MissingMetadata {
            filename: DIGEST_FILENAME.into(),
        }
    })?;

    let recomputed = canonical_hash(DOMAIN_BUNDLE, &manifest_bytes);
    let stored = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    if stored != recomputed {
        return Err(BundleVerifyError::DigestMismatch { stored, recomputed });
    }

    let manifest: serde_json::Value =
        serde_json::from_slice(&manifest_bytes).map_err(|e| BundleVerifyError::ManifestInvalid {
            detail: format!("{e}"),
        })?;
    let entries = manifest["artifacts"]
        .as_array()
        .ok_or_else(|| BundleVerifyError::ManifestInvalid {
            detail: "\"artifacts\" is not an array".into(),
        })?;

    for entry in entries {
        let name = entry["name"]
            .as_str()
            .ok_or_else(|| BundleVerifyError::ManifestInvalid {
                detail: "missing \"name\" field".into(),
            })?;
        let declared_hash =
            entry["content_hash"]
                .as_str()
                .ok_or_else(|| BundleVerifyError::ManifestInvalid {
                    detail: format!("missing \"content_hash\" for {name}"),
                })?;
        let content = std::fs::read(dir.join(name))
            .map_err(|_| BundleVerifyError::MissingArtifact { name: name.into() })?;
        if canonical_hash(DOMAIN_DECLARATION, &content) != declared_hash {
            return Err(BundleVerifyError::HashMismatch { name: name.into() });
        }
    }
    Ok(())
}

/// `serde_json`'s default map is ordered, so `to_vec` over our values is a
/// canonical byte rendering.
fn render(value: &serde_json::Value) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Write bytes via temp file + rename (best-effort atomicity on Unix).
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), BundleWriteError> {
    let dir = path.parent().ok_or_else(|| BundleWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| BundleWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| BundleWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })?;
    Ok(())
}
