use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` stored as raw bits in an `AtomicU64`.
///
/// Loads and stores are single 64-bit operations, so a reader can never see a
/// half-written value.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, order: Ordering) -> f64 {
        f64::from_bits(self.bits.load(order))
    }

    #[inline]
    pub fn store(&self, value: f64, order: Ordering) {
        self.bits.store(value.to_bits(), order);
    }

    #[inline]
    pub fn swap(&self, value: f64, order: Ordering) -> f64 {
        f64::from_bits(self.bits.swap(value.to_bits(), order))
    }

    /// Add `delta` as one indivisible read-modify-write. Returns the previous
    /// value.
    pub fn fetch_add(&self, delta: f64, order: Ordering) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, order, Ordering::Relaxed)
            {
                Ok(previous) => return f64::from_bits(previous),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn swap_returns_previous() {
        let value = AtomicF64::new(1.5);
        assert_eq!(value.swap(0.0, Ordering::AcqRel), 1.5);
        assert_eq!(value.load(Ordering::Acquire), 0.0);
    }

    #[test]
    fn concurrent_fetch_add_loses_nothing() {
        let value = Arc::new(AtomicF64::new(0.0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let value = Arc::clone(&value);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        value.fetch_add(1.0, Ordering::AcqRel);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(value.load(Ordering::Acquire), 40_000.0);
    }
}
