//! Native resources - resolution, extraction and loading of platform-specific
//! native shared libraries, plus a liveness-tracking handle over raw native
//! addresses.
//!
//! A [`NativeLoader`] selects the running platform variant, optionally
//! extracts the native libraries shipped inside the application's bundle
//! archives, indexes the resulting directory, and loads libraries by logical
//! name exactly where the resolution strategies find them. [`NativeHandle`]
//! wraps an address obtained from such a library and enforces use-after-release
//! safety.
//!
//! All operations are synchronous one-time startup work; any failure is a
//! startup failure for the dependent subsystem, never retried.

pub mod error;
pub mod handle;
pub mod loader;
pub mod platform;

pub use error::{Error, Result};

pub use handle::NativeHandle;
pub use loader::{LibraryResolver, LoaderConfig, NativeLoader};
pub use platform::{select_current, PlatformVariant};
