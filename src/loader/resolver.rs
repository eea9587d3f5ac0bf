//! Resolution of logical library names to loadable absolute paths.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::platform::PlatformVariant;

/// Resolves a logical library name, or a filesystem path, to the absolute
/// path of the library file.
///
/// Strategies are tried in order, first success wins: explicit file match,
/// index lookup, system-default directory probe. When all three miss and the
/// input does not already carry the conventional `lib` prefix, the whole
/// sequence is retried once with the prefix prepended.
pub struct LibraryResolver {
    variant: PlatformVariant,
    index: HashMap<String, PathBuf>,
}

impl LibraryResolver {
    pub fn new(variant: PlatformVariant, index: HashMap<String, PathBuf>) -> Self {
        Self { variant, index }
    }

    /// Give the full path of a library.
    ///
    /// Fails with [`Error::EmptyLibraryName`] on empty input, before any
    /// filesystem access, and with [`Error::LibraryNotFound`] naming the
    /// original, un-prefixed input when every strategy misses.
    pub fn resolve(&self, lib: &str) -> Result<PathBuf> {
        if lib.is_empty() {
            return Err(Error::EmptyLibraryName);
        }

        let mut candidates = vec![lib.to_string()];
        if !lib.starts_with("lib") {
            candidates.push(format!("lib{lib}"));
        }

        for candidate in &candidates {
            if let Some(path) = self.try_resolve(candidate) {
                return Ok(path);
            }
        }

        Err(Error::LibraryNotFound(lib.to_string()))
    }

    fn try_resolve(&self, lib: &str) -> Option<PathBuf> {
        let extension = self.variant.extension;

        // Explicit file match bypasses the index entirely.
        let file = if lib.ends_with(extension) {
            PathBuf::from(lib)
        } else {
            PathBuf::from(format!("{lib}{extension}"))
        };
        if file.is_file() {
            return std::path::absolute(&file).ok();
        }

        if let Some(path) = self.index.get(lib) {
            return Some(path.clone());
        }

        if let Some(system_dir) = self.variant.system_lib_dir() {
            let fallback = system_dir.join(format!("{lib}{extension}"));
            if fallback.is_file() {
                return Some(fallback);
            }
        }

        None
    }
}
