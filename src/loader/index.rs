//! Library index built from a directory scan.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Scan `dir` non-recursively and map each logical library name to its
/// absolute path.
///
/// A file participates when it is a regular file whose name ends with
/// `extension`; its key is the file name with the extension suffix stripped.
/// Duplicate keys are last-write-wins. A missing or non-directory `dir`
/// yields an empty map: an empty index is valid when libraries resolve via
/// explicit paths or system defaults instead.
pub fn build(dir: &Path, extension: &str) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return index,
    };

    for entry in entries.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(stripped) = name.strip_suffix(extension) else {
            continue;
        };
        let path = std::path::absolute(entry.path()).unwrap_or_else(|_| entry.path());
        index.insert(stripped.to_string(), path);
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_strips_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("libfoo.so"), b"x").unwrap();
        std::fs::write(dir.path().join("libbar.so"), b"x").unwrap();

        let index = build(dir.path(), ".so");
        assert_eq!(index.len(), 2);
        assert_eq!(index["libfoo"], dir.path().join("libfoo.so"));
        assert_eq!(index["libbar"], dir.path().join("libbar.so"));
    }

    #[test]
    fn test_build_ignores_other_extensions_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("libfoo.so"), b"x").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.so")).unwrap();

        let index = build(dir.path(), ".so");
        assert_eq!(index.len(), 1);
        assert!(index.contains_key("libfoo"));
    }

    #[test]
    fn test_build_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = build(&dir.path().join("missing"), ".so");
        assert!(index.is_empty());
    }

    #[test]
    fn test_build_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("libdeep.so"), b"x").unwrap();

        let index = build(dir.path(), ".so");
        assert!(index.is_empty());
    }
}
