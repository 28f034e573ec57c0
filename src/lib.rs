//! # polycall
//!
//! **polycall** emulates ad-hoc function overloading in a host with no
//! native overload resolution: an ordered list of candidate procedures
//! becomes a single callable that, per invocation, selects and runs the
//! first candidate whose entry contract accepts the supplied arguments, and
//! propagates the correct failure when none do.
//!
//! ## Overview
//!
//! Arguments travel as positional [`serde_json::Value`]s, and serde is the
//! contract oracle: binding an argument to a typed parameter enforces the
//! entry contract, and converting the result back enforces the exit
//! contract. The hard part is not the selection loop but the failure
//! classification - telling "this candidate's signature didn't fit" (try
//! the next one) apart from "this candidate matched and then broke" (stop
//! and report). That distinction is made from where a violation originated
//! relative to the dispatcher's call site, so every violation carries an
//! origin trace recorded at each call boundary it crosses.
//!
//! ## Architecture
//!
//! - **[`contract`]** - violation taxonomy, origin traces, classification
//! - **[`candidate`]** - the single invokable capability and raw adapters
//! - **[`typed`]** - serde-backed adapters for ordinary Rust callables
//! - **[`dispatcher`]** - construction and the first-fit selection loop
//!
//! ## Quick Start
//!
//! ```
//! use polycall::{overload, typed};
//! use serde_json::json;
//!
//! let describe = overload![
//!     typed(|n: i64| format!("integer {n}")),
//!     typed(|s: String| format!("string {s}")),
//!     typed(|a: f64, b: f64| format!("pair {a}/{b}")),
//! ]?;
//!
//! assert_eq!(describe.invoke(&[json!(7)])?, json!("integer 7"));
//! assert_eq!(describe.invoke(&[json!("x")])?, json!("string x"));
//! assert_eq!(describe.invoke(&[json!(1.5), json!(2.5)])?, json!("pair 1.5/2.5"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Failure semantics
//!
//! Exactly one error reaches the caller, never an aggregate of attempts:
//!
//! - an entry rejection of the last candidate tried, when every candidate
//!   rejects the arguments
//! - an exit-contract violation of the selected candidate, with no fallback
//! - a contract violation raised by nested work the selected candidate
//!   performed, with no fallback
//! - an ordinary application error from the selected candidate's body,
//!   propagated exactly as raised
//!
//! A dispatcher holds no mutable state after construction, so clones and
//! concurrent invocations are safe whenever the candidates themselves are.

pub mod candidate;
pub mod contract;
pub mod dispatcher;
pub mod typed;

pub use candidate::{raw, CallResult, Candidate, CheckedFn, RawFn};
pub use contract::{CallError, ConfigError, ContractViolation, ViolationKind};
pub use dispatcher::Dispatcher;
pub use typed::{typed, variadic, FromArgs, Overloadable, TypedFn, VariadicFn};
