//! Shared running maximum of windowed average reward. Environments on
//! different threads publish their window averages here without a lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// An f64 maximum stored as bits in an `AtomicU64`.
pub struct RewardMax {
    bits: AtomicU64,
}

impl RewardMax {
    pub fn new() -> Self {
        Self {
            bits: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
        }
    }

    /// Raise the maximum to `value` if it is higher. Returns true when
    /// this call moved the maximum.
    pub fn observe(&self, value: f64) -> bool {
        let mut current = self.bits.load(Ordering::Acquire);
        loop {
            if value <= f64::from_bits(current) {
                return false;
            }
            match self.bits.compare_exchange_weak(
                current,
                value.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Default for RewardMax {
    fn default() -> Self {
        Self::new()
    }
}
