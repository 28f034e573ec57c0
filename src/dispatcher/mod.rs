//! # Dispatcher Module
//!
//! The dispatcher is the heart of the crate: a single callable built from an
//! ordered candidate list that, per invocation, selects and runs the first
//! candidate whose entry contract accepts the supplied arguments.
//!
//! ## Selection
//!
//! Candidates are tried strictly in list order; position is the sole
//! priority. A candidate whose argument binding is rejected at the call
//! boundary is skipped, and the most recent rejection becomes the terminal
//! error if every candidate is exhausted. Failures that are not evidence of
//! a wrong match never trigger fallback: exit-contract violations, contract
//! violations originating in nested work the candidate performed, and
//! ordinary application errors all propagate immediately.
//!
//! ## Construction
//!
//! [`Dispatcher::build`] validates eagerly - an empty candidate list is a
//! configuration error at build time, not at first call. The
//! [`overload!`](crate::overload) macro provides a variadic construction
//! surface over the same entry point.

mod core;

pub use core::Dispatcher;
