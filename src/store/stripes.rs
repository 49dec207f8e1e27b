//! Striped read/write locks keyed by arbitrary byte strings.
//!
//! Keys hash onto a fixed array of locks allocated once at construction. Two operations on the
//! same key always meet on the same lock; unrelated keys usually land on different stripes and
//! run in parallel, but may share one and serialize. Memory stays bounded by the stripe count no
//! matter how many keys are ever seen.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use xxhash_rust::xxh3::xxh3_64;

/// Requested access mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockMode {
    /// Shared with other readers of the stripe.
    Read,
    /// Exclusive over the whole stripe.
    Write,
}

/// Held stripe lock; released on drop.
#[must_use = "the stripe is unlocked as soon as the guard is dropped"]
pub enum StripeGuard<'a> {
    /// Shared hold.
    Read(RwLockReadGuard<'a, ()>),
    /// Exclusive hold.
    Write(RwLockWriteGuard<'a, ()>),
}

impl StripeGuard<'_> {
    /// Mode this guard was acquired in.
    pub fn mode(&self) -> LockMode {
        match self {
            Self::Read(_) => LockMode::Read,
            Self::Write(_) => LockMode::Write,
        }
    }
}

/// Fixed-size array of read/write locks indexed by `xxh3(key) % stripes`.
///
/// Callers must hold at most one stripe at a time; nothing here orders multiple acquisitions.
pub struct StripedRwLock {
    stripes: Vec<RwLock<()>>,
}

impl StripedRwLock {
    /// Create `num_stripes` locks.
    ///
    /// # Panics
    ///
    /// Panics if `num_stripes` is 0.
    pub fn new(num_stripes: usize) -> Self {
        assert!(num_stripes > 0, "num_stripes must be positive");
        Self {
            stripes: (0..num_stripes).map(|_| RwLock::new(())).collect(),
        }
    }

    /// Number of stripes.
    pub fn stripes(&self) -> usize {
        self.stripes.len()
    }

    /// Stripe a key maps to. Pure function of the key and the stripe count.
    pub fn stripe_index(&self, key: &[u8]) -> usize {
        (xxh3_64(key) % self.stripes.len() as u64) as usize
    }

    /// Block until `key`'s stripe is held in `mode`.
    pub fn acquire(&self, key: &[u8], mode: LockMode) -> StripeGuard<'_> {
        match mode {
            LockMode::Read => StripeGuard::Read(self.read(key)),
            LockMode::Write => StripeGuard::Write(self.write(key)),
        }
    }

    /// Shared hold on `key`'s stripe.
    pub fn read(&self, key: &[u8]) -> RwLockReadGuard<'_, ()> {
        self.stripes[self.stripe_index(key)].read()
    }

    /// Exclusive hold on `key`'s stripe.
    pub fn write(&self, key: &[u8]) -> RwLockWriteGuard<'_, ()> {
        self.stripes[self.stripe_index(key)].write()
    }
}

impl std::fmt::Debug for StripedRwLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripedRwLock")
            .field("stripes", &self.stripes.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/stripes.rs"]
mod tests;
