//! List configuration parameters.

use crate::error::ListError;
use crate::policy::ErrorPolicy;

/// Configuration for an [`ArenaList`](crate::ArenaList).
///
/// Controls the initial arena size, the growth ceiling and the error policy.
/// Checked once at construction; the list keeps a copy for its lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Number of slots pre-linked into the free chain at creation.
    ///
    /// Default: 8. Must be at least 1 and no larger than the ceiling; see
    /// [`resolve_initial_capacity`](Self::resolve_initial_capacity) for how
    /// out-of-range values are handled.
    pub initial_capacity: usize,

    /// Largest capacity the arena may grow to, in slots.
    ///
    /// Default: `None`, bounded only by the index space
    /// ([`ListConfig::INDEX_SPACE`] slots) and the system allocator. Growth
    /// past the ceiling fails with [`ListError::AllocationFailed`].
    pub max_capacity: Option<u32>,

    /// How faults are handled.
    pub policy: ErrorPolicy,
}

impl ListConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 8;

    /// Number of distinct physical indices (index 0 is reserved).
    pub const INDEX_SPACE: u32 = u32::MAX;

    /// Create a config with the given initial capacity and defaults elsewhere.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity: None,
            policy: ErrorPolicy::default(),
        }
    }

    /// Cap arena growth at `max_capacity` slots.
    pub fn with_max_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Use the given error policy.
    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The effective capacity ceiling.
    pub fn ceiling(&self) -> u32 {
        self.max_capacity.unwrap_or(Self::INDEX_SPACE)
    }

    /// Work out the capacity the arena should start with.
    ///
    /// Returns the capacity plus, when the requested value had to be coerced
    /// under [`ErrorPolicy::Accumulate`], the error describing the coercion so
    /// the list can record it. Under [`ErrorPolicy::FailFast`] an
    /// out-of-range request is returned as an error. A ceiling of zero is
    /// rejected under either policy.
    pub fn resolve_initial_capacity(&self) -> Result<(u32, Option<ListError>), ListError> {
        let ceiling = self.ceiling();
        let invalid = ListError::InvalidCapacity {
            requested: self.initial_capacity,
            max: ceiling,
        };
        if ceiling == 0 {
            return Err(invalid);
        }
        if (1..=ceiling as usize).contains(&self.initial_capacity) {
            return Ok((self.initial_capacity as u32, None));
        }
        match self.policy {
            ErrorPolicy::FailFast => Err(invalid),
            ErrorPolicy::Accumulate => {
                let coerced = self.initial_capacity.clamp(1, ceiling as usize) as u32;
                Ok((coerced, Some(invalid)))
            }
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}
