//! Type-erased effects.
//!
//! [`BoxEffect`] hides the concrete type of an effect behind a trait object
//! while keeping both capabilities: executing a `BoxEffect` executes the
//! wrapped effect, and interpreting it interprets the wrapped effect. The box
//! itself never reaches a visitor.

use std::fmt::{self, Debug, Formatter};

use super::capability::Effect;
use super::visitor::Visitor;

/// Object-safe mirror of [`Effect`] for boxed values.
trait DynEffect<T, E> {
    fn execute_boxed(self: Box<Self>) -> Result<T, E>;

    fn interpret_boxed(self: Box<Self>, visitor: &mut dyn Visitor) -> Result<T, E>;
}

impl<Eff: Effect> DynEffect<Eff::Output, Eff::Error> for Eff {
    #[inline]
    fn execute_boxed(self: Box<Self>) -> Result<Eff::Output, Eff::Error> {
        (*self).execute()
    }

    #[inline]
    fn interpret_boxed(self: Box<Self>, visitor: &mut dyn Visitor) -> Result<Eff::Output, Eff::Error> {
        (*self).interpret(visitor)
    }
}

/// An effect whose concrete type has been erased.
///
/// Useful when effects of different types have to be stored together, or
/// when the branches of a continuation build different effect types.
///
/// # Examples
///
/// ```rust
/// use effect_pipe::effect::{BoxEffect, Effect, fail, pure};
///
/// fn check(age: u32) -> BoxEffect<u32, String> {
///     if age >= 18 {
///         pure(age).boxed()
///     } else {
///         fail(format!("{age} is under age")).boxed()
///     }
/// }
///
/// assert_eq!(check(30).execute(), Ok(30));
/// assert_eq!(check(12).execute(), Err("12 is under age".to_string()));
/// ```
pub struct BoxEffect<T, E> {
    inner: Box<dyn DynEffect<T, E>>,
}

impl<T: 'static, E: 'static> BoxEffect<T, E> {
    /// Boxes `effect`.
    pub fn new<Eff>(effect: Eff) -> Self
    where
        Eff: Effect<Output = T, Error = E>,
    {
        Self {
            inner: Box::new(effect),
        }
    }
}

impl<T: 'static, E: 'static> Effect for BoxEffect<T, E> {
    type Output = T;
    type Error = E;

    fn execute(self) -> Result<T, E> {
        self.inner.execute_boxed()
    }

    fn interpret(self, visitor: &mut dyn Visitor) -> Result<T, E> {
        self.inner.interpret_boxed(visitor)
    }

    fn boxed(self) -> BoxEffect<T, E> {
        self
    }
}

impl<T, E> Debug for BoxEffect<T, E> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("BoxEffect").finish_non_exhaustive()
    }
}
