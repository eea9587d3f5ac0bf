//! Platform variant descriptors and current-platform selection.

use std::path::Path;

use crate::error::{Error, Result};

/// A supported operating-system/architecture target.
///
/// Each variant names the directory holding its native libraries inside a
/// bundle, the shared-library file extension it uses, and a predicate
/// answering "is this the running platform".
#[derive(Debug, Clone, Copy)]
pub struct PlatformVariant {
    /// Directory tag holding the files for this system, e.g. `win64`,
    /// `linux64`.
    pub tag: &'static str,
    /// Library file extension, `.dll` on Windows, `.so` on Linux.
    pub extension: &'static str,
    /// System-default library directory probed as a resolution fallback.
    ///
    /// `None` where the platform's own loader search path covers system
    /// libraries.
    pub system_lib_dir: Option<&'static str>,
    /// Whether this variant describes the running platform.
    pub current: fn() -> bool,
}

impl PlatformVariant {
    /// Windows 64 bits.
    pub fn win64() -> Self {
        Self {
            tag: "win64",
            extension: ".dll",
            system_lib_dir: None,
            current: || cfg!(all(target_os = "windows", target_pointer_width = "64")),
        }
    }

    /// Linux 64 bits.
    pub fn linux64() -> Self {
        Self {
            tag: "linux64",
            extension: ".so",
            system_lib_dir: Some("/usr/lib/x86_64-linux-gnu"),
            current: || cfg!(all(target_os = "linux", target_pointer_width = "64")),
        }
    }

    /// All built-in variants, in selection order.
    pub fn all() -> Vec<Self> {
        vec![Self::win64(), Self::linux64()]
    }

    /// The system-default library directory, if this variant has one.
    pub fn system_lib_dir(&self) -> Option<&Path> {
        self.system_lib_dir.map(Path::new)
    }
}

/// Select the variant describing the running platform.
///
/// Iterates the candidates in order and returns the first whose predicate
/// holds. Production configurations are expected to supply mutually-exclusive
/// predicates; order only matters when a test harness supplies overlapping
/// ones.
///
/// Fails with [`Error::UnsupportedPlatform`] when no candidate matches.
pub fn select_current(candidates: &[PlatformVariant]) -> Result<PlatformVariant> {
    candidates
        .iter()
        .find(|variant| (variant.current)())
        .copied()
        .ok_or(Error::UnsupportedPlatform)
}
