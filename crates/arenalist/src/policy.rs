//! Error policy and reporting.
//!
//! All list operations share one failure path. Every error is recorded in the
//! list's [`ErrorFlags`], handed to the list's [`ErrorReporter`], and then
//! returned to the caller. The configured [`ErrorPolicy`] decides whether the
//! list keeps accepting mutations afterwards.

use crate::error::{CorruptionReason, ErrorFlags, ErrorKind, ListError};

/// How a list reacts to faults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the error and keep going. An invalid initial capacity is
    /// coerced into range.
    #[default]
    Accumulate,
    /// Stop at the first fault: later mutating operations return
    /// [`ListError::Halted`] until [`clear_errors`](crate::ArenaList::clear_errors).
    /// An invalid initial capacity is rejected.
    FailFast,
}

/// Sink for errors raised by a list.
///
/// Implemented for [`LogReporter`], [`NullReporter`] and any
/// `FnMut(&ListError)` closure.
pub trait ErrorReporter {
    /// Called once for every error, before it is returned to the caller.
    fn report(&mut self, error: &ListError);
}

/// Reports faults through the `log` facade (when the `logging` feature is on).
///
/// [`NotFound`](ListError::NotFound) is logged at debug level, everything
/// else at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&mut self, error: &ListError) {
        if error.kind().is_fault() {
            warn!(target: "arenalist", "{error}");
        } else {
            debug!(target: "arenalist", "{error}");
        }
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&mut self, _error: &ListError) {}
}

impl<F> ErrorReporter for F
where
    F: FnMut(&ListError),
{
    fn report(&mut self, error: &ListError) {
        self(error)
    }
}

/// Per-list error bookkeeping.
#[derive(Clone, Debug, Default)]
pub(crate) struct ErrorState {
    flags: ErrorFlags,
    last: Option<ListError>,
    /// Kind of the fault that halted a fail-fast list.
    halted: Option<ErrorKind>,
    /// Set on the first corruption. Survives `clear`.
    poisoned: Option<CorruptionReason>,
}

impl ErrorState {
    /// Record `error` and apply `policy` to it.
    pub(crate) fn absorb(&mut self, error: &ListError, policy: ErrorPolicy) {
        let kind = error.kind();
        self.flags |= kind.flag();
        self.last = Some(error.clone());

        if let ListError::Corrupted { reason } = error {
            if self.poisoned.is_none() {
                debug!(target: "arenalist", "list poisoned: {reason}");
                self.poisoned = Some(*reason);
            }
        }

        if policy == ErrorPolicy::FailFast && kind.is_fault() && self.halted.is_none() {
            debug!(target: "arenalist", "fail-fast list halted on {kind}");
            self.halted = Some(kind);
        }
    }

    /// The error a mutating operation must return instead of running, if any.
    pub(crate) fn refusal(&self) -> Option<ListError> {
        if let Some(reason) = self.poisoned {
            return Some(ListError::corrupted(reason));
        }
        self.halted.map(|kind| ListError::Halted { kind })
    }

    /// Forget recorded errors and lift a fail-fast halt. Corruption stays.
    pub(crate) fn clear(&mut self) {
        self.flags = ErrorFlags::empty();
        self.last = None;
        self.halted = None;
    }

    /// Forget everything, including corruption.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn flags(&self) -> ErrorFlags {
        self.flags
    }

    pub(crate) fn last(&self) -> Option<&ListError> {
        self.last.as_ref()
    }

    pub(crate) fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub(crate) fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Chain;

    fn corruption() -> ListError {
        ListError::corrupted(CorruptionReason::ChainTooLong {
            chain: Chain::Free,
            expected: 2,
        })
    }

    #[test]
    fn accumulate_records_without_halting() {
        let mut state = ErrorState::default();
        state.absorb(
            &ListError::InvalidPosition { pos: 5, len: 0 },
            ErrorPolicy::Accumulate,
        );
        state.absorb(&ListError::NotFound, ErrorPolicy::Accumulate);
        assert_eq!(
            state.flags(),
            ErrorFlags::INVALID_INDEX | ErrorFlags::NOT_FOUND
        );
        assert_eq!(state.last(), Some(&ListError::NotFound));
        assert!(state.refusal().is_none());
    }

    #[test]
    fn fail_fast_halts_on_first_fault() {
        let mut state = ErrorState::default();
        state.absorb(&ListError::NotFound, ErrorPolicy::FailFast);
        assert!(!state.is_halted());

        state.absorb(
            &ListError::AllocationFailed {
                requested: 8,
                limit: 4,
            },
            ErrorPolicy::FailFast,
        );
        state.absorb(
            &ListError::InvalidPosition { pos: 1, len: 0 },
            ErrorPolicy::FailFast,
        );
        assert_eq!(
            state.refusal(),
            Some(ListError::Halted {
                kind: ErrorKind::AllocationFailure
            })
        );

        state.clear();
        assert!(state.refusal().is_none());
        assert!(state.flags().is_empty());
    }

    #[test]
    fn corruption_survives_clear() {
        let mut state = ErrorState::default();
        state.absorb(&corruption(), ErrorPolicy::Accumulate);
        state.clear();
        assert!(state.is_poisoned());
        assert_eq!(state.refusal(), Some(corruption()));

        state.reset();
        assert!(!state.is_poisoned());
        assert!(state.refusal().is_none());
    }

    #[test]
    fn closures_are_reporters() {
        let mut seen = Vec::new();
        {
            let mut reporter = |e: &ListError| seen.push(e.kind());
            reporter.report(&ListError::NotFound);
            reporter.report(&ListError::NotInitialized);
        }
        assert_eq!(seen, vec![ErrorKind::NotFound, ErrorKind::NullReference]);
    }
}
