//! Reading memory-map snapshots, live from `/proc` or from a capture.

use crate::domain::Pid;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read the maps pseudo-file of a running process.
///
/// This is the only point where the tool touches a live process; the
/// snapshot is taken in a single read and parsed like any captured
/// file.
///
/// # Errors
/// Returns an error if the process does not exist or the pseudo-file
/// is not readable (e.g. insufficient privileges for another user's
/// process).
pub fn read_maps(pid: Pid) -> Result<String> {
    let maps_path = format!("/proc/{pid}/maps");
    fs::read_to_string(&maps_path).with_context(|| format!("Failed to read {maps_path}"))
}

/// Read a captured maps dump from disk.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_maps_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read maps dump {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_own_maps() {
        // Reading our own maps should always work on Linux; parse it to
        // make sure real kernel output passes the grammar.
        let pid = Pid(std::process::id() as i32);
        let text = read_maps(pid).expect("own maps must be readable");
        let space = crate::maps::parse_str(&text).expect("own maps must parse");
        assert!(!space.is_empty());
    }

    #[test]
    fn test_missing_dump_file_is_context_error() {
        let err = read_maps_file(Path::new("/nonexistent/maps.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/maps.txt"));
    }
}
