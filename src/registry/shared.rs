use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::base::FormatSymbol;

use super::format::{FormatNode, Registration};
use super::table::FormatRegistry;

/// A process-wide handle to a [`FormatRegistry`].
///
/// Registration is an administrative operation (startup, reconfiguration);
/// negotiation only reads. Cloning the handle is cheap and every clone sees
/// the same registry. The convenience methods take the lock for the duration
/// of one call and return owned data, so no guard outlives the call.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<FormatRegistry>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: FormatRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Lock for reading. Keep the guard short-lived.
    pub fn read(&self) -> RwLockReadGuard<'_, FormatRegistry> {
        self.inner.read()
    }

    /// Lock for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, FormatRegistry> {
        self.inner.write()
    }

    pub fn register(&self, registration: Registration) -> bool {
        self.inner.write().register(registration)
    }

    pub fn unregister(&self, symbol: &str) -> bool {
        self.inner.write().unregister(symbol)
    }

    pub fn unregister_all(&self) -> usize {
        self.inner.write().unregister_all()
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    /// Snapshot of a single format.
    pub fn get(&self, symbol: &str) -> Option<FormatNode> {
        self.inner.read().get(symbol).cloned()
    }

    pub fn exists(&self, symbol: &str) -> bool {
        self.inner.read().exists(symbol)
    }

    /// Snapshot of the ancestor chain of `symbol`.
    pub fn ancestors(&self, symbol: &str) -> Vec<FormatSymbol> {
        self.inner.read().ancestors(symbol)
    }
}
