//! Shared file-store plumbing
//!
//! Records live as individual TOML documents in a per-kind directory.
//! Writes go to a temp file in the same directory and are renamed into
//! place, which makes each upsert atomic per document.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use super::StoreError;

/// Current time as ISO-8601 UTC with a trailing `Z`
pub(crate) fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Convert a record id to a safe filename stem
pub(crate) fn safe_filename(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .to_lowercase()
}

fn doc_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.toml", safe_filename(id)))
}

/// Read the document for `id`, if one exists
pub(crate) fn read_doc(dir: &Path, id: &str) -> Result<Option<String>, StoreError> {
    let path = doc_path(dir, id);
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(&path)?))
}

/// Atomically write the document for `id`
pub(crate) fn write_doc(dir: &Path, id: &str, content: &str) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;

    let path = doc_path(dir, id);
    let tmp = dir.join(format!(".{}.tmp-{}", safe_filename(id), std::process::id()));
    fs::write(&tmp, content)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}

/// Read every document in the directory
pub(crate) fn read_all_docs(dir: &Path) -> Result<Vec<String>, StoreError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut docs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("toml") {
            docs.push(fs::read_to_string(&path)?);
        }
    }
    Ok(docs)
}
