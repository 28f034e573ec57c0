//! Typed adapter core - serde-backed entry and exit contracts.

use crate::candidate::{CallResult, Candidate};
use crate::contract::{CallError, ContractViolation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::type_name;
use std::marker::PhantomData;

/// Positional binding of a dynamic argument list to a parameter tuple.
///
/// Missing trailing arguments bind as `Value::Null`, so trailing `Option<T>`
/// parameters express optional-with-default semantics: absent and explicit
/// `null` both bind to `None`, and the body chooses the default value.
/// Surplus-argument policy belongs to the adapter, not the binding.
///
/// Implemented for parameter tuples of arity 0 through 6.
pub trait FromArgs: Sized {
    /// Declared parameter count.
    const ARITY: usize;

    /// Bind `args` positionally, reporting the first argument the oracle
    /// rejects.
    fn from_args(args: &[Value]) -> Result<Self, ContractViolation>;
}

/// Bind one positional argument through the serde oracle.
pub fn bind_arg<T: DeserializeOwned>(
    args: &[Value],
    index: usize,
) -> Result<T, ContractViolation> {
    let bound = match args.get(index) {
        Some(value) => T::deserialize(value),
        None => T::deserialize(Value::Null),
    };
    bound.map_err(|err| {
        ContractViolation::entry(format!(
            "argument {} does not satisfy {}: {err}",
            index + 1,
            type_name::<T>()
        ))
    })
}

macro_rules! impl_from_args {
    ($arity:literal $(, $ty:ident => $idx:tt)*) => {
        impl<$($ty: DeserializeOwned),*> FromArgs for ($($ty,)*) {
            const ARITY: usize = $arity;

            #[allow(unused_variables)]
            fn from_args(args: &[Value]) -> Result<Self, ContractViolation> {
                Ok(($(bind_arg::<$ty>(args, $idx)?,)*))
            }
        }
    };
}

impl_from_args!(0);
impl_from_args!(1, A1 => 0);
impl_from_args!(2, A1 => 0, A2 => 1);
impl_from_args!(3, A1 => 0, A2 => 1, A3 => 2);
impl_from_args!(4, A1 => 0, A2 => 1, A3 => 2, A4 => 3);
impl_from_args!(5, A1 => 0, A2 => 1, A3 => 2, A4 => 3, A5 => 4);
impl_from_args!(6, A1 => 0, A2 => 1, A3 => 2, A4 => 3, A5 => 4, A6 => 5);

/// A callable the typed adapter can drive with a bound parameter tuple.
///
/// Implemented for `Fn` items and closures of arity 0 through 6. The
/// associated [`Output`](Overloadable::Output) is the callable's declared
/// return type, checked against the exit contract by the adapter.
pub trait Overloadable<Args>: Send + Sync {
    /// Declared return type.
    type Output;

    /// Invoke with bound arguments.
    fn apply(&self, args: Args) -> Self::Output;
}

macro_rules! impl_overloadable {
    ($($ty:ident => $var:ident),*) => {
        impl<Func, Out, $($ty),*> Overloadable<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) -> Out + Send + Sync,
        {
            type Output = Out;

            fn apply(&self, ($($var,)*): ($($ty,)*)) -> Out {
                self($($var),*)
            }
        }
    };
}

impl_overloadable!();
impl_overloadable!(A1 => a1);
impl_overloadable!(A1 => a1, A2 => a2);
impl_overloadable!(A1 => a1, A2 => a2, A3 => a3);
impl_overloadable!(A1 => a1, A2 => a2, A3 => a3, A4 => a4);
impl_overloadable!(A1 => a1, A2 => a2, A3 => a3, A4 => a4, A5 => a5);
impl_overloadable!(A1 => a1, A2 => a2, A3 => a3, A4 => a4, A5 => a5, A6 => a6);

/// A typed candidate: an ordinary Rust callable with serde-backed contracts.
pub struct TypedFn<F, A> {
    body: F,
    label: &'static str,
    lenient: bool,
    _params: PhantomData<fn(A)>,
}

/// Wrap a typed closure or fn item as a [`Candidate`].
///
/// Parameter types must be annotated on closures so the adapter knows the
/// entry contract to enforce. Note that a single `Vec<T>` parameter binds
/// one JSON array argument; use [`variadic`] to spread the whole argument
/// list instead.
///
/// ```
/// use polycall::{typed, Candidate};
/// use serde_json::json;
///
/// let join = typed(|left: String, right: String| format!("{left}/{right}"));
/// assert_eq!(join.call(&[json!("a"), json!("b")])?, json!("a/b"));
/// # Ok::<(), polycall::CallError>(())
/// ```
pub fn typed<F, A>(body: F) -> TypedFn<F, A>
where
    F: Overloadable<A>,
    F::Output: Serialize,
    A: FromArgs,
{
    TypedFn {
        body,
        label: type_name::<F>(),
        lenient: false,
        _params: PhantomData,
    }
}

impl<F, A> TypedFn<F, A> {
    /// Swallow surplus positional arguments instead of rejecting them.
    ///
    /// Matches hosts whose functions silently accept extra arguments; the
    /// declared parameters bind positionally and the rest never reach the
    /// body.
    #[must_use]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }
}

impl<F, A> Candidate for TypedFn<F, A>
where
    F: Overloadable<A>,
    F::Output: Serialize,
    A: FromArgs,
{
    fn call(&self, args: &[Value]) -> CallResult {
        if !self.lenient && args.len() > A::ARITY {
            return Err(CallError::Contract(
                ContractViolation::entry(format!(
                    "expects at most {} arguments, {} given",
                    A::ARITY,
                    args.len()
                ))
                .through(self.label),
            ));
        }
        let bound = A::from_args(args)
            .map_err(|violation| CallError::Contract(violation.through(self.label)))?;
        let output = self.body.apply(bound);
        serde_json::to_value(output).map_err(|err| {
            CallError::Contract(
                ContractViolation::exit(format!(
                    "return value does not satisfy its declared contract: {err}"
                ))
                .through(self.label),
            )
        })
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

/// A rest-parameter candidate: every argument binds as the same type.
pub struct VariadicFn<F, T> {
    body: F,
    label: &'static str,
    _item: PhantomData<fn(Vec<T>)>,
}

/// Wrap a closure over a homogeneous rest parameter as a [`Candidate`].
///
/// Accepts any arity, including zero arguments; the entry contract is that
/// every supplied argument satisfies `T`.
pub fn variadic<F, T, R>(body: F) -> VariadicFn<F, T>
where
    F: Fn(Vec<T>) -> R + Send + Sync,
    T: DeserializeOwned,
    R: Serialize,
{
    VariadicFn {
        body,
        label: type_name::<F>(),
        _item: PhantomData,
    }
}

impl<F, T, R> Candidate for VariadicFn<F, T>
where
    F: Fn(Vec<T>) -> R + Send + Sync,
    T: DeserializeOwned,
    R: Serialize,
{
    fn call(&self, args: &[Value]) -> CallResult {
        let mut items = Vec::with_capacity(args.len());
        for index in 0..args.len() {
            let item = bind_arg::<T>(args, index)
                .map_err(|violation| CallError::Contract(violation.through(self.label)))?;
            items.push(item);
        }
        let output = (self.body)(items);
        serde_json::to_value(output).map_err(|err| {
            CallError::Contract(
                ContractViolation::exit(format!(
                    "return value does not satisfy its declared contract: {err}"
                ))
                .through(self.label),
            )
        })
    }

    fn name(&self) -> &'static str {
        self.label
    }
}
