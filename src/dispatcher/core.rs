//! Dispatcher core - hot path for candidate selection.

// The selection loop runs once per invocation; keep allocations confined to
// error construction, which is off the fast path.
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::unnecessary_to_owned)]

use crate::candidate::{CallResult, Candidate};
use crate::contract::{classify, CallError, ConfigError, ContractViolation, Disposition};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// First-fit overload dispatcher over an ordered candidate list.
///
/// Built once from its candidates and immutable afterwards: clones share the
/// same list, and concurrent invocation from multiple threads is safe
/// provided the candidates themselves are. Every invocation re-runs
/// selection from the first candidate; nothing is memoized between calls,
/// since arguments may differ in shape each time.
///
/// A dispatcher is itself a [`Candidate`], so it can be supplied wherever a
/// single plain procedure could be, including inside another dispatcher.
#[derive(Clone)]
pub struct Dispatcher {
    candidates: Arc<[Box<dyn Candidate>]>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("candidates", &self.candidates.len())
            .finish()
    }
}

impl Dispatcher {
    /// Build a dispatcher from candidates in priority order.
    ///
    /// Order is significant and total: it is the sole tie-break among
    /// candidates accepting the same arguments.
    ///
    /// # Errors
    ///
    /// Fails eagerly with [`ConfigError::MissingCandidates`] when the list
    /// is empty; an empty dispatcher could never resolve any call.
    pub fn build<I>(candidates: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Box<dyn Candidate>>,
    {
        let candidates: Arc<[Box<dyn Candidate>]> = candidates.into_iter().collect();
        if candidates.is_empty() {
            return Err(ConfigError::MissingCandidates);
        }
        debug!(candidates = candidates.len(), "dispatcher built");
        Ok(Self { candidates })
    }

    /// Number of candidates, in priority order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the dispatcher has no candidates. Always false after a
    /// successful [`build`](Dispatcher::build).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Select and run the first candidate whose entry contract accepts
    /// `args`.
    ///
    /// Success is defined purely as "entry and exit contracts satisfied":
    /// the first candidate that accepts the arguments runs to completion and
    /// its result is returned, even if a later candidate would also have
    /// matched.
    ///
    /// # Errors
    ///
    /// - the exit violation or nested contract failure of the selected
    ///   candidate, with no fallback attempt
    /// - an ordinary application error from the selected candidate's body,
    ///   propagated exactly as raised
    /// - the most recent entry rejection, when no candidate accepts
    pub fn invoke(&self, args: &[Value]) -> CallResult {
        let mut last_rejection: Option<ContractViolation> = None;
        for (index, candidate) in self.candidates.iter().enumerate() {
            debug!(
                candidate = index,
                name = candidate.name(),
                argc = args.len(),
                "trying candidate"
            );
            match candidate.call(args) {
                Ok(value) => {
                    debug!(candidate = index, name = candidate.name(), "candidate matched");
                    return Ok(value);
                }
                Err(CallError::Contract(violation)) => match classify(&violation) {
                    Disposition::NextCandidate => {
                        debug!(
                            candidate = index,
                            name = candidate.name(),
                            rejection = %violation,
                            "entry contract rejected the call, trying next"
                        );
                        last_rejection = Some(violation);
                    }
                    Disposition::Terminal => {
                        warn!(
                            candidate = index,
                            name = candidate.name(),
                            kind = ?violation.kind(),
                            depth = violation.depth(),
                            "candidate matched but failed, aborting dispatch"
                        );
                        return Err(CallError::Contract(violation));
                    }
                },
                Err(err) => return Err(err),
            }
        }
        match last_rejection {
            Some(violation) => Err(CallError::Contract(violation)),
            // Unreachable after a successful build; kept so the loop is
            // total under the deferred-validation policy as well.
            None => Err(CallError::Config(ConfigError::MissingCandidates)),
        }
    }
}

impl Candidate for Dispatcher {
    fn call(&self, args: &[Value]) -> CallResult {
        self.invoke(args).map_err(|err| err.through("dispatcher"))
    }

    fn name(&self) -> &'static str {
        "dispatcher"
    }
}

/// Build a [`Dispatcher`] from candidate adapters in priority order.
///
/// Boxes each adapter expression and delegates to [`Dispatcher::build`];
/// evaluates to `Result<Dispatcher, ConfigError>`.
///
/// ```
/// use polycall::{overload, typed};
/// use serde_json::json;
///
/// let add = overload![
///     typed(|a: i64, b: i64| a + b),
///     typed(|a: String, b: String| format!("{a}{b}")),
/// ]?;
///
/// assert_eq!(add.invoke(&[json!(1), json!(2)])?, json!(3));
/// assert_eq!(add.invoke(&[json!("1"), json!("2")])?, json!("12"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! overload {
    ($($candidate:expr),+ $(,)?) => {
        $crate::Dispatcher::build(vec![
            $(Box::new($candidate) as Box<dyn $crate::Candidate>),+
        ])
    };
}
