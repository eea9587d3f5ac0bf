//! Native library resolution and loading.
//!
//! This module provides:
//! - Bundle discovery and extraction (`bundle`)
//! - Library indexing over a scanned directory (`index`)
//! - Name-to-path resolution (`resolver`)
//! - Loader orchestration (`native`)

pub mod bundle;
pub mod index;
pub mod native;
pub mod resolver;

pub use native::{LoaderConfig, NativeLoader};
pub use resolver::LibraryResolver;
