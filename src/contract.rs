//! Contract violation taxonomy and failure classification.
//!
//! A [`ContractViolation`] is the signal raised by the calling convention
//! when a candidate's entry contract rejects an argument list, or when its
//! exit contract rejects the value the candidate produced. Each violation
//! carries an origin trace: the call boundaries it crossed while propagating
//! toward the dispatcher that observes it. The trace exists solely to answer
//! one question - did this failure originate at the immediate call boundary,
//! or inside work the candidate performed? - and is consumed by the
//! classification step of the selection loop. It appears in `Debug` output
//! but is never part of the caller-facing `Display` text.

use smallvec::SmallVec;
use std::fmt;

/// Maximum inline origin-trace frames before heap allocation
///
/// The common case is a single boundary between a dispatcher and its
/// candidate; nesting deeper than this is rare.
pub const MAX_INLINE_FRAMES: usize = 4;

/// Stack-allocated origin trace for the dispatch hot path
pub type FrameVec = SmallVec<[&'static str; MAX_INLINE_FRAMES]>;

/// Which side of a candidate's contract was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Argument binding was rejected before the candidate produced a value
    Entry,
    /// The candidate produced a value that fails its declared return contract
    Exit,
}

/// A contract violation raised somewhere below a dispatcher's call site.
///
/// Construct one with [`ContractViolation::entry`] or
/// [`ContractViolation::exit`] at the point where the contract check fails;
/// every call boundary the violation then propagates through records itself
/// with [`ContractViolation::through`]. A dispatcher reads the resulting
/// [`depth`](ContractViolation::depth) as the frame depth of the origin
/// relative to its own invocation.
#[derive(Debug, Clone)]
pub struct ContractViolation {
    kind: ViolationKind,
    message: String,
    trace: FrameVec,
}

impl ContractViolation {
    /// Raise an entry-contract violation at the current call site.
    pub fn entry(message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Entry,
            message: message.into(),
            trace: FrameVec::new(),
        }
    }

    /// Raise an exit-contract violation at the current call site.
    pub fn exit(message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::Exit,
            message: message.into(),
            trace: FrameVec::new(),
        }
    }

    /// The side of the contract that was violated.
    #[must_use]
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Human-readable description of the mismatch.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Number of call boundaries crossed since the violation was raised.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.trace.len()
    }

    /// Record one crossed call boundary on the origin trace.
    #[must_use]
    pub fn through(mut self, boundary: &'static str) -> Self {
        self.trace.push(boundary);
        self
    }
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Entry => write!(f, "entry contract violated: {}", self.message),
            ViolationKind::Exit => write!(f, "exit contract violated: {}", self.message),
        }
    }
}

impl std::error::Error for ContractViolation {}

/// Dispatcher configuration error
///
/// Returned by [`Dispatcher::build`](crate::Dispatcher::build) when the
/// supplied candidate list could never resolve any call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The candidate list was empty
    MissingCandidates,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCandidates => {
                write!(
                    f,
                    "missing overload declaration: a dispatcher requires at least one candidate"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error surface of a candidate invocation.
///
/// Only the `Contract` variant participates in fallback classification;
/// configuration errors and ordinary application failures are terminal and
/// pass through the selection loop untouched.
#[derive(Debug)]
pub enum CallError {
    /// An entry or exit contract rejected the call
    Contract(ContractViolation),
    /// The dispatcher had nothing to select from
    Config(ConfigError),
    /// An ordinary application failure from a candidate body
    Failed(anyhow::Error),
}

impl CallError {
    /// Record a crossed call boundary on a propagating contract violation.
    ///
    /// Configuration and application errors carry no origin trace and are
    /// returned unchanged.
    #[must_use]
    pub fn through(self, boundary: &'static str) -> Self {
        match self {
            CallError::Contract(violation) => CallError::Contract(violation.through(boundary)),
            other => other,
        }
    }

    /// The contract violation, if that is what this error carries.
    #[must_use]
    pub fn as_contract(&self) -> Option<&ContractViolation> {
        match self {
            CallError::Contract(violation) => Some(violation),
            _ => None,
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Contract(violation) => write!(f, "{violation}"),
            CallError::Config(err) => write!(f, "{err}"),
            CallError::Failed(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CallError {}

impl From<ContractViolation> for CallError {
    fn from(violation: ContractViolation) -> Self {
        CallError::Contract(violation)
    }
}

impl From<ConfigError> for CallError {
    fn from(err: ConfigError) -> Self {
        CallError::Config(err)
    }
}

impl From<anyhow::Error> for CallError {
    fn from(err: anyhow::Error) -> Self {
        CallError::Failed(err)
    }
}

/// What a selection loop should do with a violation it caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// The candidate's shape did not fit the call; try the next one
    NextCandidate,
    /// The candidate was selected and genuinely failed; stop and propagate
    Terminal,
}

/// Classify a violation caught at a dispatcher's own call site.
///
/// The only evidence distinguishing "wrong candidate" from "candidate chosen,
/// then it broke" is where the violation originated relative to that call
/// site:
///
/// - an exit violation is terminal regardless of origin: the arguments were
///   accepted and the failure is independent of them
/// - an entry violation one boundary down is the recoverable "signature
///   didn't fit" case, whether argument binding rejected the call or the
///   candidate body raised the rejection itself before delegating anywhere
/// - anything deeper came from nested work the chosen candidate performed,
///   which is not evidence about fit
pub(crate) fn classify(violation: &ContractViolation) -> Disposition {
    if violation.kind() == ViolationKind::Exit {
        return Disposition::Terminal;
    }
    if violation.depth() > 1 {
        return Disposition::Terminal;
    }
    Disposition::NextCandidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_violation_at_the_call_boundary_is_recoverable() {
        let violation = ContractViolation::entry("arity mismatch").through("adapter");
        assert_eq!(violation.depth(), 1);
        assert_eq!(classify(&violation), Disposition::NextCandidate);
    }

    #[test]
    fn entry_violation_from_nested_work_is_terminal() {
        let violation = ContractViolation::entry("arity mismatch")
            .through("inner adapter")
            .through("outer adapter");
        assert_eq!(violation.depth(), 2);
        assert_eq!(classify(&violation), Disposition::Terminal);
    }

    #[test]
    fn exit_violation_is_terminal_at_any_depth() {
        let shallow = ContractViolation::exit("bad return").through("adapter");
        assert_eq!(classify(&shallow), Disposition::Terminal);

        let deep = shallow.through("outer adapter");
        assert_eq!(classify(&deep), Disposition::Terminal);
    }

    #[test]
    fn display_omits_the_origin_trace() {
        let violation = ContractViolation::entry("argument 1 does not satisfy i64")
            .through("adapter")
            .through("dispatcher");
        assert_eq!(
            violation.to_string(),
            "entry contract violated: argument 1 does not satisfy i64"
        );
    }

    #[test]
    fn boundary_recording_skips_non_contract_errors() {
        let err = CallError::Failed(anyhow::anyhow!("storage offline")).through("adapter");
        match err {
            CallError::Failed(inner) => assert_eq!(inner.to_string(), "storage offline"),
            other => panic!("expected an application failure, got {other:?}"),
        }
    }
}
