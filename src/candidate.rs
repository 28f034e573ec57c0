//! The candidate capability and raw dynamic adapters.
//!
//! A candidate is an opaque invokable procedure with an intrinsic entry
//! contract (the arguments it accepts) and exit contract (the value it
//! returns), enforced by the calling convention rather than the dispatcher.
//! Everything a dispatcher can select - plain functions, closures capturing
//! state, and composite callables such as a nested dispatcher - implements
//! the one [`Candidate`] operation, so the selection loop never
//! distinguishes callable kinds.

use crate::contract::{CallError, ContractViolation};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::any::type_name;
use std::marker::PhantomData;

/// Outcome of invoking a candidate with a dynamic argument list.
pub type CallResult = Result<Value, CallError>;

/// An invokable procedure with intrinsic entry and exit contracts.
///
/// # Call protocol
///
/// Implementations must record their own boundary on any
/// [`ContractViolation`] they return - raised locally or propagated from
/// nested contract-checked work - via [`CallError::through`]. The adapters
/// in this crate and in [`crate::typed`] all do; a hand-written
/// implementation that skips the bookkeeping will have its failures
/// misclassified by the dispatcher.
pub trait Candidate: Send + Sync {
    /// Invoke with a positional dynamic argument list.
    fn call(&self, args: &[Value]) -> CallResult;

    /// Short label recorded on origin traces and log events.
    fn name(&self) -> &'static str {
        "candidate"
    }
}

/// A host-lenient candidate over the raw argument list.
///
/// The body sees every supplied argument regardless of arity, the way hosts
/// that silently swallow excess positional arguments behave. A body may
/// enforce a stricter contract than its shape by returning a
/// [`ContractViolation`]; a rejection raised directly by the body surfaces
/// one boundary below the dispatcher and triggers fallback exactly like a
/// binding rejection would.
pub struct RawFn<F> {
    body: F,
    label: &'static str,
}

/// Wrap a closure over the raw argument list as a [`Candidate`].
///
/// ```
/// use polycall::{raw, Candidate};
/// use serde_json::json;
///
/// let arity = raw(|args| Ok(json!(args.len())));
/// assert_eq!(arity.call(&[json!("a"), json!("b")])?, json!(2));
/// # Ok::<(), polycall::CallError>(())
/// ```
pub fn raw<F>(body: F) -> RawFn<F>
where
    F: Fn(&[Value]) -> CallResult + Send + Sync,
{
    RawFn {
        body,
        label: type_name::<F>(),
    }
}

impl<F> RawFn<F> {
    /// Declare a return contract: the body's result must deserialize as `R`.
    pub fn returning<R: DeserializeOwned>(self) -> CheckedFn<F, R> {
        CheckedFn {
            body: self.body,
            label: self.label,
            _returns: PhantomData,
        }
    }
}

impl<F> Candidate for RawFn<F>
where
    F: Fn(&[Value]) -> CallResult + Send + Sync,
{
    fn call(&self, args: &[Value]) -> CallResult {
        (self.body)(args).map_err(|err| err.through(self.label))
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

/// A raw candidate with a declared return contract.
///
/// Built with [`RawFn::returning`]. The return check is part of this
/// candidate's own contract, not a separate call boundary: a failing check
/// raises an exit violation at the same depth a binding rejection would
/// surface at, which the dispatcher treats as terminal.
pub struct CheckedFn<F, R> {
    body: F,
    label: &'static str,
    _returns: PhantomData<fn() -> R>,
}

impl<F, R> Candidate for CheckedFn<F, R>
where
    F: Fn(&[Value]) -> CallResult + Send + Sync,
    R: DeserializeOwned,
{
    fn call(&self, args: &[Value]) -> CallResult {
        let value = (self.body)(args).map_err(|err| err.through(self.label))?;
        match R::deserialize(&value) {
            Ok(_) => Ok(value),
            Err(err) => Err(CallError::Contract(
                ContractViolation::exit(format!(
                    "return value does not satisfy {}: {err}",
                    type_name::<R>()
                ))
                .through(self.label),
            )),
        }
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
