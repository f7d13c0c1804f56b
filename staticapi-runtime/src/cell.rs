//! The delegate holder behind a generated facade

use crate::error::DelegateError;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Optional-valued slot holding a facade's implementation.
///
/// Usable as a `static`: construction is `const` and the slot is guarded by
/// an `RwLock`, which is what safe Rust requires for shared mutable statics.
/// Nothing else is coordinated; replacing the delegate while calls are in
/// flight is allowed, and those calls finish on the delegate they started with.
pub struct DelegateCell<T: ?Sized> {
    facade: &'static str,
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> DelegateCell<T> {
    pub const fn new(facade: &'static str) -> Self {
        Self {
            facade,
            slot: RwLock::new(None),
        }
    }

    /// Name of the facade this cell belongs to
    pub fn facade(&self) -> &'static str {
        self.facade
    }

    /// Install `delegate`, returning the one it replaces
    pub fn install(&self, delegate: Arc<T>) -> Option<Arc<T>> {
        // A panic while holding the lock cannot leave the slot half-written
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.replace(delegate)
    }

    pub fn get(&self) -> Result<Arc<T>, DelegateError> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.clone().ok_or(DelegateError::Uninitialized {
            facade: self.facade,
        })
    }

    /// The installed delegate.
    ///
    /// # Panics
    ///
    /// When no delegate has been installed. This is the "not initialized"
    /// failure forwarding functions surface at the call site.
    pub fn require(&self) -> Arc<T> {
        match self.get() {
            Ok(delegate) => delegate,
            Err(error) => panic!("{error}"),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Remove the delegate, leaving the cell uninitialized
    pub fn take(&self) -> Option<Arc<T>> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<T: ?Sized> fmt::Debug for DelegateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateCell")
            .field("facade", &self.facade)
            .field("installed", &self.is_installed())
            .finish()
    }
}
