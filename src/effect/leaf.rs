//! Terminal effects: [`Pure`] and [`Fail`].
//!
//! Both resolve without side effects, so they answer
//! [`interpret`](Effect::interpret) themselves and never reach a visitor.

use std::convert::Infallible;
use std::marker::PhantomData;

use super::capability::Effect;
use super::visitor::Visitor;

/// An effect that always succeeds with `value`.
///
/// # Examples
///
/// ```rust
/// use effect_pipe::effect::{Effect, Pure};
///
/// let effect: Pure<i32> = Pure::new(42);
/// assert_eq!(effect.execute(), Ok(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pure<T, E = Infallible> {
    value: T,
    _error: PhantomData<fn() -> E>,
}

impl<T, E> Pure<T, E> {
    /// Wraps `value`.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            _error: PhantomData,
        }
    }

    /// Returns the wrapped value without going through execution.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: 'static, E: 'static> Effect for Pure<T, E> {
    type Output = T;
    type Error = E;

    fn execute(self) -> Result<T, E> {
        Ok(self.value)
    }

    fn interpret(self, _visitor: &mut dyn Visitor) -> Result<T, E> {
        Ok(self.value)
    }
}

/// An effect that always fails with `error`.
///
/// # Examples
///
/// ```rust
/// use effect_pipe::effect::{Effect, Fail};
///
/// let effect: Fail<i32, &str> = Fail::new("oops");
/// assert_eq!(effect.execute(), Err("oops"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fail<T, E> {
    error: E,
    _output: PhantomData<fn() -> T>,
}

impl<T, E> Fail<T, E> {
    /// Wraps `error`.
    pub const fn new(error: E) -> Self {
        Self {
            error,
            _output: PhantomData,
        }
    }

    /// Returns the wrapped error without going through execution.
    pub fn into_inner(self) -> E {
        self.error
    }
}

impl<T: 'static, E: 'static> Effect for Fail<T, E> {
    type Output = T;
    type Error = E;

    fn execute(self) -> Result<T, E> {
        Err(self.error)
    }

    fn interpret(self, _visitor: &mut dyn Visitor) -> Result<T, E> {
        Err(self.error)
    }
}

/// Shorthand for [`Pure::new`].
pub const fn pure<T, E>(value: T) -> Pure<T, E> {
    Pure::new(value)
}

/// Shorthand for [`Fail::new`].
pub const fn fail<T, E>(error: E) -> Fail<T, E> {
    Fail::new(error)
}
