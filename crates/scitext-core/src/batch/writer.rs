//! Atomic output writes.
//!
//! Content goes to a `.partial` sibling first and is renamed into place,
//! so a failed write never leaves a truncated output file behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScitextError};

/// Suffix appended to the destination name while a write is in flight.
pub const PARTIAL_SUFFIX: &str = "partial";

/// Path of the in-flight sibling for `dest`.
pub fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

/// Write `content` to `dest`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ScitextError::Io`] if writing or renaming fails. The partial
/// file is removed on failure.
pub fn write_atomic(dest: &Path, content: &str) -> Result<()> {
    let partial = partial_path(dest);

    if let Err(e) = fs::write(&partial, content) {
        let _ = fs::remove_file(&partial);
        return Err(ScitextError::io(&partial, e));
    }

    fs::rename(&partial, dest).map_err(|e| {
        let _ = fs::remove_file(&partial);
        ScitextError::io(dest, e)
    })
}

/// Delete a previously written output at `dest`.
///
/// Returns `Ok(true)` if a file was removed and `Ok(false)` if there was
/// nothing to remove.
///
/// # Errors
///
/// Returns [`ScitextError::Io`] if the file exists but cannot be removed.
pub fn remove_stale_output(dest: &Path) -> Result<bool> {
    match fs::remove_file(dest) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ScitextError::io(dest, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("out/docA.txt")),
            PathBuf::from("out/docA.txt.partial")
        );
    }

    #[test]
    fn write_atomic_creates_and_replaces() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("docA.txt");

        write_atomic(&dest, "first\n").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "first\n");

        write_atomic(&dest, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second\n");
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn write_atomic_into_missing_dir_leaves_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("missing").join("docA.txt");

        let err = write_atomic(&dest, "text").unwrap_err();
        assert!(matches!(err, ScitextError::Io { .. }));
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn remove_stale_output_reports_removal() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("docC.txt");
        fs::write(&dest, "old raw").unwrap();

        assert!(remove_stale_output(&dest).unwrap());
        assert!(!dest.exists());
        assert!(!remove_stale_output(&dest).unwrap());
    }
}
