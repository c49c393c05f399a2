//! The composition primitives: [`Map`], [`Bind`] and [`BindErr`].
//!
//! Each combinator owns its inner effect and a single-use function. All three
//! override [`Effect::interpret`] so that interpretation walks into the inner
//! effect instead of treating the combinator as a leaf.

use std::fmt::{self, Debug, Formatter};

use super::capability::Effect;
use super::visitor::Visitor;

/// Applies `transform` to the success value of `inner`.
///
/// On failure the error propagates unchanged and `transform` is never
/// invoked.
pub struct Map<Eff, F> {
    inner: Eff,
    transform: F,
}

impl<Eff, F> Map<Eff, F> {
    /// Creates a new `Map` node.
    pub const fn new(inner: Eff, transform: F) -> Self {
        Self { inner, transform }
    }
}

impl<Eff, F, T> Effect for Map<Eff, F>
where
    Eff: Effect,
    F: FnOnce(Eff::Output) -> T + 'static,
    T: 'static,
{
    type Output = T;
    type Error = Eff::Error;

    fn execute(self) -> Result<T, Eff::Error> {
        self.inner.execute().map(self.transform)
    }

    fn interpret(self, visitor: &mut dyn Visitor) -> Result<T, Eff::Error> {
        self.inner.interpret(visitor).map(self.transform)
    }
}

impl<Eff: Debug, F> Debug for Map<Eff, F> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Map")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Runs `inner`, then the effect built by `continuation` from its value.
///
/// On failure of `inner` the continuation is never invoked.
///
/// Execution recurses into `inner`, so a chain of `n` nested binds needs
/// `n` native stack frames. Long sequences of steps belong in a
/// [`Pipe`](crate::pipe::Pipe), which runs its steps in a loop.
pub struct Bind<Eff, F> {
    inner: Eff,
    continuation: F,
}

impl<Eff, F> Bind<Eff, F> {
    /// Creates a new `Bind` node.
    pub const fn new(inner: Eff, continuation: F) -> Self {
        Self {
            inner,
            continuation,
        }
    }
}

impl<Eff, F, Next> Effect for Bind<Eff, F>
where
    Eff: Effect,
    F: FnOnce(Eff::Output) -> Next + 'static,
    Next: Effect<Error = Eff::Error>,
{
    type Output = Next::Output;
    type Error = Eff::Error;

    fn execute(self) -> Result<Next::Output, Eff::Error> {
        let value = self.inner.execute()?;
        (self.continuation)(value).execute()
    }

    fn interpret(self, visitor: &mut dyn Visitor) -> Result<Next::Output, Eff::Error> {
        let value = self.inner.interpret(visitor)?;
        (self.continuation)(value).interpret(visitor)
    }
}

impl<Eff: Debug, F> Debug for Bind<Eff, F> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Bind")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Runs `inner`, and on failure the effect built by `recovery` from its
/// error.
///
/// On success of `inner` the value propagates unchanged and `recovery` is
/// never invoked.
pub struct BindErr<Eff, F> {
    inner: Eff,
    recovery: F,
}

impl<Eff, F> BindErr<Eff, F> {
    /// Creates a new `BindErr` node.
    pub const fn new(inner: Eff, recovery: F) -> Self {
        Self { inner, recovery }
    }
}

impl<Eff, F, Next> Effect for BindErr<Eff, F>
where
    Eff: Effect,
    F: FnOnce(Eff::Error) -> Next + 'static,
    Next: Effect<Output = Eff::Output>,
{
    type Output = Eff::Output;
    type Error = Next::Error;

    fn execute(self) -> Result<Eff::Output, Next::Error> {
        match self.inner.execute() {
            Ok(value) => Ok(value),
            Err(error) => (self.recovery)(error).execute(),
        }
    }

    fn interpret(self, visitor: &mut dyn Visitor) -> Result<Eff::Output, Next::Error> {
        match self.inner.interpret(visitor) {
            Ok(value) => Ok(value),
            Err(error) => (self.recovery)(error).interpret(visitor),
        }
    }
}

impl<Eff: Debug, F> Debug for BindErr<Eff, F> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BindErr")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
