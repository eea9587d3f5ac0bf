//! Supported operating-system/architecture variants.

pub mod variant;

pub use variant::{select_current, PlatformVariant};
