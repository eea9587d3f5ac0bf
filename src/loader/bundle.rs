//! Bundle discovery and extraction.
//!
//! A bundle is a gzipped tar archive shipped with the application, holding one
//! directory per platform tag with the native libraries for that platform
//! inside. The active search path is the host's `NATIVE_BUNDLE_PATH`
//! environment variable, read-only, split like any platform path list.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{Error, Result};

const BUNDLE_PATH_VAR: &str = "NATIVE_BUNDLE_PATH";
const BUNDLE_SUFFIXES: &[&str] = &[".tar.gz", ".tgz"];

/// Enumerate the bundle archives on the active search path.
///
/// Entries that do not exist or do not carry a recognized bundle suffix are
/// skipped. Order follows the search path's natural order.
pub fn bundle_search_path() -> Vec<PathBuf> {
    let raw = match std::env::var_os(BUNDLE_PATH_VAR) {
        Some(raw) => raw,
        None => return Vec::new(),
    };
    std::env::split_paths(&raw)
        .filter(|entry| is_bundle(entry) && entry.is_file())
        .collect()
}

/// Check whether a path names a bundle archive.
pub fn is_bundle(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| BUNDLE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
        .unwrap_or(false)
}

/// Extract every regular-file entry under `prefix/` in the archive into
/// `dest`, with the prefix stripped.
///
/// Re-extracting into a populated destination overwrites existing files, so
/// the operation is idempotent. Entry paths are validated before writing;
/// absolute paths and parent-directory components are rejected.
pub fn extract(archive: &Path, prefix: &str, dest: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| Error::Extract {
        path: archive.to_path_buf(),
        reason: e.to_string(),
    })?;
    let decoder = GzDecoder::new(file);
    let mut tarball = Archive::new(decoder);

    for entry in tarball.entries().map_err(|e| read_failure(archive, e))? {
        let mut entry = entry.map_err(|e| read_failure(archive, e))?;
        let path = entry
            .path()
            .map_err(|e| read_failure(archive, e))?
            .into_owned();

        let path_str = path.to_string_lossy();
        if path_str.starts_with('/') || path_str.contains("..") {
            return Err(Error::Extract {
                path: archive.to_path_buf(),
                reason: format!("Unsafe path in archive: {}", path_str),
            });
        }

        let relative = match path.strip_prefix(prefix) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            _ => continue,
        };

        if !entry.header().entry_type().is_file() {
            continue;
        }

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = entry.header().mode().unwrap_or(0o755);
            std::fs::set_permissions(&target, std::fs::Permissions::from_mode(mode))?;
        }

        log::debug!("Extracted {} -> {}", path_str, target.display());
    }

    Ok(())
}

fn read_failure(archive: &Path, e: io::Error) -> Error {
    Error::Extract {
        path: archive.to_path_buf(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn write_bundle(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            // Header::set_path (used by append_data) refuses `..` components,
            // which the traversal test needs in the archive, so write the
            // path bytes directly.
            header.as_gnu_mut().unwrap().name[..name.len()].copy_from_slice(name.as_bytes());
            header.set_cksum();
            builder.append(&header, *content).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_is_bundle() {
        assert!(is_bundle(Path::new("app.tar.gz")));
        assert!(is_bundle(Path::new("/opt/app/bundle.tgz")));
        assert!(!is_bundle(Path::new("app.zip")));
        assert!(!is_bundle(Path::new("app")));
    }

    #[test]
    fn test_extract_filters_on_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("app.tar.gz");
        write_bundle(
            &bundle,
            &[
                ("linux64/libfoo.so", b"foo".as_slice()),
                ("win64/foo.dll", b"bar".as_slice()),
            ],
        );

        let out = dir.path().join("out");
        extract(&bundle, "linux64", &out).unwrap();

        assert_eq!(std::fs::read(out.join("libfoo.so")).unwrap(), b"foo");
        assert!(!out.join("foo.dll").exists());
        assert!(!out.join("win64").exists());
    }

    #[test]
    fn test_extract_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("app.tar.gz");
        write_bundle(&bundle, &[("linux64/libfoo.so", b"foo".as_slice())]);

        let out = dir.path().join("out");
        extract(&bundle, "linux64", &out).unwrap();
        extract(&bundle, "linux64", &out).unwrap();

        assert_eq!(std::fs::read(out.join("libfoo.so")).unwrap(), b"foo");
    }

    #[test]
    fn test_extract_rejects_parent_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("evil.tar.gz");
        write_bundle(&bundle, &[("linux64/../escape.so", b"x".as_slice())]);

        let out = dir.path().join("out");
        let err = extract(&bundle, "linux64", &out).unwrap_err();
        assert!(matches!(err, Error::Extract { .. }));
    }

    #[test]
    fn test_extract_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract(&dir.path().join("none.tar.gz"), "linux64", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Extract { .. }));
    }
}
