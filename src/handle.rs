//! Wrapper type for an address pointer in native code.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// A handle to an object living in native memory.
///
/// The handle tracks only the liveness of the address, never the pointee's
/// contents, and never dereferences it. The component that obtained the raw
/// address owns the handle and is responsible for calling [`release`] exactly
/// when the native-side object is destroyed, and for not using the handle
/// afterward.
///
/// Equality and hashing are defined purely over the address, independent of
/// the released flag: a released handle still compares equal to a live handle
/// sharing the same address. Identity of the native object, not liveness, is
/// the equality contract.
///
/// No internal synchronization: concurrent `release` and `address` calls on
/// the same handle must be prevented by the owner.
///
/// [`release`]: NativeHandle::release
#[derive(Debug)]
pub struct NativeHandle {
    /// Address of the native object. Immutable for the handle's lifetime.
    address: u64,
    /// Whether the native-side object has been destroyed.
    released: bool,
}

impl NativeHandle {
    /// Build a new handle from a raw address.
    ///
    /// The address is not validated; the native side is responsible for its
    /// correctness.
    pub fn create(address: u64) -> Self {
        Self {
            address,
            released: false,
        }
    }

    /// Provide the address.
    ///
    /// Fails with [`Error::HandleReleased`] once the handle is released.
    pub fn address(&self) -> Result<u64> {
        if self.released {
            return Err(Error::HandleReleased);
        }
        Ok(self.address)
    }

    /// Mark the native-side object as destroyed.
    ///
    /// Irreversible; calling it again has no additional effect.
    pub fn release(&mut self) {
        self.released = true;
    }

    /// Check if the handle is released.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl PartialEq for NativeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for NativeHandle {}

impl Hash for NativeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
