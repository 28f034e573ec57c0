//! # Typed Module
//!
//! Typed candidate adapters: the bridge between ordinary Rust callables and
//! the dynamic calling convention. Positional `Value` arguments bind to a
//! callable's declared parameter types through serde (the entry contract),
//! and its result is converted back through serde (the exit contract), so a
//! plain closure becomes a [`Candidate`](crate::Candidate) with
//! host-enforced contracts.
//!
//! ## Adapters
//!
//! - [`typed`] - a fixed-arity callable over `DeserializeOwned` parameters;
//!   strict about surplus arguments unless made [`lenient`](TypedFn::lenient)
//! - [`variadic`] - a rest-parameter callable; every argument binds as the
//!   same element type
//!
//! The binding oracle itself ([`FromArgs`] / [`bind_arg`]) is public so raw
//! candidate bodies can reuse it when they enforce contracts by hand.

mod core;

pub use core::{bind_arg, typed, variadic, FromArgs, Overloadable, TypedFn, VariadicFn};
