//! # Reference Table Files
//!
//! Loads and saves [`ReferenceTables`] as TOML so flour presets, yeast types
//! and poolish options can be tuned without recompiling.
//!
//! - **Validated loads**: a file is parsed and checked before it is returned
//! - **Atomic saves**: write to `.tmp`, verify it parses, rename over the target
//!
//! ## Example
//!
//! ```rust,no_run
//! use dough_core::file_io::{load_tables, save_tables};
//! use dough_core::ingredients::ReferenceTables;
//! use std::path::Path;
//!
//! let path = Path::new("flours.toml");
//! save_tables(ReferenceTables::builtin(), path)?;
//! let tables = load_tables(path)?;
//! assert_eq!(&tables, ReferenceTables::builtin());
//! # Ok::<(), dough_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::{CalcError, CalcResult};
use crate::ingredients::ReferenceTables;

/// Save reference tables to a TOML file atomically.
///
/// # Returns
///
/// * `Ok(())` - The file at `path` now holds the tables
/// * `Err(CalcError::InvalidTable)` - The tables fail validation
/// * `Err(CalcError::FileError)` - I/O error; the previous file is untouched
pub fn save_tables(tables: &ReferenceTables, path: &Path) -> CalcResult<()> {
    tables.validate()?;
    let text = tables.to_toml_string()?;

    let tmp_path = path.with_extension("toml.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(text.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    // Verify before replacing the target
    let written = fs::read_to_string(&tmp_path).map_err(|e| {
        CalcError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    if let Err(err) = ReferenceTables::from_toml_str(&written) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), "saved reference tables");
    Ok(())
}

/// Load and validate reference tables from a TOML file.
///
/// # Returns
///
/// * `Ok(ReferenceTables)` - Parsed and validated tables
/// * `Err(CalcError::SerializationError)` - Invalid TOML or missing fields
/// * `Err(CalcError::InvalidTable)` - Parsed, but an entry is inconsistent
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_tables(path: &Path) -> CalcResult<ReferenceTables> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let tables = ReferenceTables::from_toml_str(&contents).map_err(|err| match err {
        CalcError::SerializationError { reason } => {
            CalcError::serialization(format!("Invalid TOML in {}: {}", path.display(), reason))
        }
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        flours = tables.flours.len(),
        yeasts = tables.yeasts.len(),
        poolish_options = tables.poolish_options.len(),
        "loaded reference tables"
    );
    Ok(tables)
}
