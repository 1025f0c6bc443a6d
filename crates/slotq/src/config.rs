//! Queue configuration parameters.

use crate::error::QueueError;

/// Configuration for a [`Queue`](crate::Queue) buffer.
///
/// Controls the size of the first allocation and how aggressively the
/// buffer grows when a push finds it full. Validated by
/// [`Queue::with_config`](crate::Queue::with_config); the values are
/// fixed for the lifetime of the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueConfig {
    /// Number of element slots reserved at construction.
    ///
    /// Default: 1. Must be at least 1 so that every queue owns a buffer.
    pub initial_capacity: usize,

    /// Multiplier applied to the capacity on each growth.
    ///
    /// Default: 2. Must be at least 2; a factor of 1 would never make
    /// room and break the amortized O(1) push bound.
    pub growth_factor: usize,
}

impl QueueConfig {
    /// Default initial capacity: a single slot.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1;

    /// Default growth factor: capacity doubles.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Create a config with the given initial capacity and the default
    /// growth factor.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Builder-style override of the growth factor.
    pub fn growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<(), QueueError> {
        if self.initial_capacity == 0 {
            return Err(QueueError::InvalidConfig {
                reason: "initial_capacity must be at least 1".into(),
            });
        }
        if self.growth_factor < 2 {
            return Err(QueueError::InvalidConfig {
                reason: format!(
                    "growth_factor must be at least 2, got {}",
                    self.growth_factor
                ),
            });
        }
        Ok(())
    }

    /// Size in bytes of the initial buffer for element type `T`.
    ///
    /// Saturates at `usize::MAX` rather than overflowing.
    pub fn initial_bytes<T>(&self) -> usize {
        self.initial_capacity
            .saturating_mul(std::mem::size_of::<T>())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_slot_doubling() {
        let config = QueueConfig::default();
        assert_eq!(config.initial_capacity, 1);
        assert_eq!(config.growth_factor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_initial_capacity_rejected() {
        let err = QueueConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, QueueError::InvalidConfig { .. }));
    }

    #[test]
    fn growth_factor_below_two_rejected() {
        assert!(QueueConfig::new(4).growth_factor(1).validate().is_err());
        assert!(QueueConfig::new(4).growth_factor(0).validate().is_err());
        assert!(QueueConfig::new(4).growth_factor(3).validate().is_ok());
    }

    #[test]
    fn initial_bytes_scales_with_element_size() {
        let config = QueueConfig::new(8);
        assert_eq!(config.initial_bytes::<u64>(), 64);
        assert_eq!(config.initial_bytes::<()>(), 0);
    }
}
