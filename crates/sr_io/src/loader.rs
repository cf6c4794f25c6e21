//! Loader: read a local report JSON (config → overview → clusters → translations),
//! validate it against the embedded schema plus structural rules, and return a
//! typed `LoadedReport` together with the digest of the exact input bytes.
//! Also reads locale-override files. No network I/O.

#![forbid(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sr_core::{Report, TranslationEntry};
use tracing::{debug, info, warn};

use crate::{hasher, looks_like_url_strict, schema, IoError};

/// Reports larger than this are refused before parsing.
pub const MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// Loaded, validated report plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedReport {
    pub report: Report,
    /// Lowercase hex SHA-256 of the raw input bytes.
    pub input_sha256: String,
    pub source: PathBuf,
}

// ----------------------------- Orchestration -----------------------------

/// Load a report from a local path.
pub fn load_report(path: &Path) -> Result<LoadedReport, IoError> {
    let bytes = read_local(path)?;
    let report = parse_report_bytes(&bytes)?;
    let input_sha256 = hasher::try_sha256_hex(&bytes)?;

    info!(
        path = %path.display(),
        clusters = report.clusters.len(),
        translations = report.translations.len(),
        "loaded report"
    );

    Ok(LoadedReport { report, input_sha256, source: path.to_path_buf() })
}

/// Parse + validate in-memory report bytes (schema, then structure).
pub fn parse_report_bytes(bytes: &[u8]) -> Result<Report, IoError> {
    let value: Value = serde_json::from_slice(bytes)?;
    schema::validate_report_value(&value)?;
    let report: Report = serde_json::from_value(value)?;
    check_structure(&report)?;
    Ok(report)
}

/// Read a JSON object of `source text → override text`.
pub fn load_overrides(path: &Path) -> Result<BTreeMap<String, String>, IoError> {
    let bytes = read_local(path)?;
    let value: Value = serde_json::from_slice(&bytes)?;
    let Value::Object(map) = value else {
        return Err(IoError::Json { pointer: "/".into(), msg: "overrides must be a JSON object".into() });
    };

    let mut out = BTreeMap::new();
    for (key, v) in map {
        match v {
            Value::String(s) => {
                out.insert(key, s);
            }
            _ => {
                return Err(IoError::Json {
                    pointer: format!("/{}", escape_pointer_token(&key)),
                    msg: "override value must be a string".into(),
                })
            }
        }
    }
    debug!(path = %path.display(), entries = out.len(), "loaded locale overrides");
    Ok(out)
}

// ----------------------------- Structural checks -----------------------------

/// Rules the schema cannot express:
/// - cluster ids are non-blank and unique within the report
/// - argument weights and coordinates are finite
///
/// Translation rows with fewer columns than configured languages are allowed
/// (those columns fall back to the source text) but are logged.
pub fn check_structure(report: &Report) -> Result<(), IoError> {
    let mut seen = BTreeSet::new();
    for (ci, c) in report.clusters.iter().enumerate() {
        if c.cluster_id.as_str().trim().is_empty() {
            return Err(IoError::Invalid(format!("/clusters/{ci}/cluster_id is blank")));
        }
        if !seen.insert(c.cluster_id.as_str()) {
            return Err(IoError::Invalid(format!(
                "duplicate cluster_id {} at /clusters/{ci}",
                c.cluster_id
            )));
        }
        for (ai, a) in c.arguments.iter().enumerate() {
            if !(a.p.is_finite() && a.x.is_finite() && a.y.is_finite()) {
                return Err(IoError::Invalid(format!(
                    "/clusters/{ci}/arguments/{ai} has a non-finite number"
                )));
            }
        }
    }

    let languages = report
        .config
        .translation
        .as_ref()
        .map(|t| t.languages.len())
        .unwrap_or(0);
    let short_rows = report
        .translations
        .values()
        .filter(|e| matches!(e, TranslationEntry::PerLanguage(cols) if cols.len() < languages))
        .count();
    if short_rows > 0 {
        warn!(short_rows, languages, "translation rows with missing language columns");
    }
    Ok(())
}

// ----------------------------- Helpers -----------------------------

fn read_local(path: &Path) -> Result<Vec<u8>, IoError> {
    if let Some(s) = path.to_str() {
        if looks_like_url_strict(s) {
            return Err(IoError::Path(format!("not a local path: {s}")));
        }
    }
    let meta = fs::metadata(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    if !meta.is_file() {
        return Err(IoError::Path(format!("{}: not a regular file", path.display())));
    }
    if meta.len() > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {} bytes (limit {MAX_INPUT_BYTES})",
            path.display(),
            meta.len()
        )));
    }
    fs::read(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}

/// RFC 6901 token escaping.
fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}
