//! Native library loader orchestration.

use std::path::{Path, PathBuf};

use libloading::Library;

use crate::error::{Error, Result};
use crate::loader::{bundle, index, resolver::LibraryResolver};
use crate::platform::{select_current, PlatformVariant};

/// Configuration record for [`NativeLoader`] construction.
///
/// Collapses the construction surface into one explicit record: where the
/// libraries live (or get extracted to), whether bundle extraction runs, the
/// ordered platform variants to consider, and an optional override of the
/// bundle search path.
pub struct LoaderConfig {
    /// Directory holding (or receiving) the per-platform library
    /// directories. `None` selects the default user-scoped data directory.
    pub destination: Option<PathBuf>,
    /// Whether to extract bundles from the search path at construction.
    pub extract: bool,
    /// Ordered platform variants to consider.
    pub variants: Vec<PlatformVariant>,
    /// Bundle archives to extract from. `None` reads the active search path.
    pub bundles: Option<Vec<PathBuf>>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            destination: None,
            extract: true,
            variants: PlatformVariant::all(),
            bundles: None,
        }
    }
}

fn default_destination() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("native-libraries")
}

/// Loads native libraries for the running platform.
///
/// Construction selects the current platform variant, optionally extracts
/// bundle contents, and indexes the resulting library directory. Loaded
/// libraries stay loaded for the loader's lifetime; there is no unload
/// operation. One initialization thread owns the loader; no concurrent
/// mutation is supported.
pub struct NativeLoader {
    variant: PlatformVariant,
    lib_directory: PathBuf,
    resolver: LibraryResolver,
    loaded: Vec<String>,
    // Keeps the OS-side modules mapped; dropping a Library would unload it.
    libraries: Vec<Library>,
}

impl NativeLoader {
    /// Extract the bundles on the active search path into the default
    /// user-scoped destination and index the result.
    pub fn from_bundles(variants: Vec<PlatformVariant>) -> Result<Self> {
        Self::with_config(LoaderConfig {
            variants,
            ..LoaderConfig::default()
        })
    }

    /// Extract the bundles on the active search path into `destination` and
    /// index the result.
    pub fn from_bundles_in(
        destination: impl Into<PathBuf>,
        variants: Vec<PlatformVariant>,
    ) -> Result<Self> {
        Self::with_config(LoaderConfig {
            destination: Some(destination.into()),
            variants,
            ..LoaderConfig::default()
        })
    }

    /// Index libraries already present under `destination`, without
    /// extraction.
    pub fn from_dir(
        destination: impl Into<PathBuf>,
        variants: Vec<PlatformVariant>,
    ) -> Result<Self> {
        Self::with_config(LoaderConfig {
            destination: Some(destination.into()),
            extract: false,
            variants,
            bundles: None,
        })
    }

    /// Index libraries deployed one directory above the current working
    /// directory, without extraction. Intended for externally-deployed
    /// native artifacts.
    pub fn external(variants: Vec<PlatformVariant>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let destination = cwd.parent().map(Path::to_path_buf).unwrap_or(cwd);
        Self::from_dir(destination, variants)
    }

    /// Build a loader from an explicit configuration record.
    pub fn with_config(config: LoaderConfig) -> Result<Self> {
        let variant = select_current(&config.variants)?;
        let lib_directory = config.destination.unwrap_or_else(default_destination);
        let platform_dir = lib_directory.join(variant.tag);

        if config.extract {
            let bundles = config.bundles.unwrap_or_else(bundle::bundle_search_path);
            for archive in &bundles {
                log::info!(
                    "Extracting {} into {}",
                    archive.display(),
                    platform_dir.display()
                );
                bundle::extract(archive, variant.tag, &platform_dir)?;
            }
        }

        let index = index::build(&platform_dir, variant.extension);
        Ok(Self {
            variant,
            lib_directory,
            resolver: LibraryResolver::new(variant, index),
            loaded: Vec::new(),
            libraries: Vec::new(),
        })
    }

    /// Load native libraries, strictly in the given order.
    ///
    /// Each name is resolved and handed to the platform's dynamic loader,
    /// then recorded in the loaded set. The first resolution or load failure
    /// aborts the remaining names and propagates. Repeated requests for the
    /// same library are not deduplicated; the platform loader is relied upon
    /// to be idempotent or to fail loudly.
    pub fn load<S: AsRef<str>>(&mut self, libs: &[S]) -> Result<()> {
        for lib in libs {
            let lib = lib.as_ref();
            log::debug!("Loading native: {}", lib);
            let path = self.resolver.resolve(lib)?;
            // SAFETY: library initialization routines run here; the caller
            // chose the library and accepts its initializer side effects.
            let library = unsafe { Library::new(&path) }.map_err(|source| Error::Load {
                path: path.clone(),
                source,
            })?;
            self.libraries.push(library);
            self.loaded.push(lib.to_string());
            log::debug!("{} loaded.", path.display());
        }
        Ok(())
    }

    /// Load the compiler runtime-support libraries, then any extras.
    ///
    /// Some native toolchains produce artifacts with an external GCC/C++
    /// runtime dependency that must be mapped before the artifact itself
    /// will link. The runtime filename differs by target pointer width.
    /// A no-op on Linux, where the system runtime is always present.
    pub fn load_runtime_dependencies<S: AsRef<str>>(&mut self, libs: &[S]) -> Result<()> {
        if cfg!(target_os = "linux") {
            return Ok(());
        }
        if cfg!(target_pointer_width = "32") {
            self.load(&["libgcc_s_sjlj-1.dll", "libstdc++-6.dll"])?;
        } else {
            self.load(&["libgcc_s_seh-1.dll", "libstdc++-6.dll"])?;
        }
        if !libs.is_empty() {
            self.load(libs)?;
        }
        Ok(())
    }

    /// Give the full path of a library without loading it.
    pub fn library_path(&self, lib: &str) -> Result<PathBuf> {
        self.resolver.resolve(lib)
    }

    /// Logical names successfully loaded in this session, in load order.
    ///
    /// Entries are never removed; the underlying runtime provides no unload
    /// primitive. Diagnostics only.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    /// Directory tag of the selected platform, e.g. `linux64`.
    pub fn platform_tag(&self) -> &str {
        self.variant.tag
    }

    /// Library file extension of the selected platform, e.g. `.so`.
    pub fn library_extension(&self) -> &str {
        self.variant.extension
    }

    /// Root directory holding the per-platform library directories.
    pub fn lib_directory(&self) -> &Path {
        &self.lib_directory
    }
}
