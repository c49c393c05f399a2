//! The effect capability: execution plus optional structural interpretation.
//!
//! Every effect, leaf or composite, implements [`Effect`]. Implementors must
//! provide [`Effect::execute`], which performs the real work. The provided
//! [`Effect::interpret`] treats the value as an opaque leaf and hands it to a
//! [`Visitor`]; composite effects override it to recurse into the effects
//! they embed.
//!
//! # Implementing a leaf effect
//!
//! ```rust
//! use effect_pipe::effect::{Effect, Stub};
//!
//! struct ReadConfig {
//!     path: &'static str,
//! }
//!
//! impl Effect for ReadConfig {
//!     type Output = String;
//!     type Error = String;
//!
//!     fn execute(self) -> Result<String, String> {
//!         std::fs::read_to_string(self.path).map_err(|error| error.to_string())
//!     }
//! }
//!
//! let program = ReadConfig { path: "/etc/app.toml" }.map(|text| text.len());
//!
//! // Dry run: the file is never touched.
//! let mut stub = Stub::new().on(|_: ReadConfig| Ok("debug = true".to_string()));
//! assert_eq!(program.interpret(&mut stub), Ok(12));
//! ```
//!
//! # Implementing a composite effect
//!
//! A composite that embeds other effects **must** override
//! [`Effect::interpret`]. Without the override the whole composite reaches the
//! visitor as a single leaf, and a visitor that executes leaves would run the
//! embedded effects for real during a dry run.
//!
//! ```rust
//! use effect_pipe::effect::{Effect, Visitor};
//!
//! struct Both<First, Second> {
//!     first: First,
//!     second: Second,
//! }
//!
//! impl<First, Second> Effect for Both<First, Second>
//! where
//!     First: Effect,
//!     Second: Effect<Error = First::Error>,
//! {
//!     type Output = (First::Output, Second::Output);
//!     type Error = First::Error;
//!
//!     fn execute(self) -> Result<Self::Output, Self::Error> {
//!         Ok((self.first.execute()?, self.second.execute()?))
//!     }
//!
//!     fn interpret(self, visitor: &mut dyn Visitor) -> Result<Self::Output, Self::Error> {
//!         Ok((self.first.interpret(visitor)?, self.second.interpret(visitor)?))
//!     }
//! }
//! ```

use super::boxed::BoxEffect;
use super::combinator::{Bind, BindErr, Map};
use super::leaf::{Fail, fail};
use super::visitor::{Leaf, Visitor};

/// A deferred computation that either succeeds with `Output` or fails with
/// `Error` once executed.
///
/// Effects are inert values: constructing and combining them performs no
/// work. Work happens only in [`execute`](Effect::execute), which consumes
/// the effect, so every node of an effect tree runs at most once.
///
/// # Laws
///
/// 1. **Map**: `inner.map(f).execute() == inner.execute().map(f)`
/// 2. **Left Identity**: `pure(a).bind(k).execute() == k(a).execute()`
/// 3. **Recovery Identity**: `pure(a).bind_err(k).execute() == Ok(a)`
pub trait Effect: Sized + 'static {
    /// The success payload.
    type Output: 'static;

    /// The failure payload.
    type Error: 'static;

    /// Performs the effect.
    ///
    /// # Errors
    ///
    /// Returns the effect's own error value when it fails.
    fn execute(self) -> Result<Self::Output, Self::Error>;

    /// Interprets the effect with `visitor` standing in for real execution
    /// of every embedded leaf.
    ///
    /// The default hands `self` to the visitor as an opaque [`Leaf`].
    /// Implementations must never call [`execute`](Effect::execute); they only
    /// recurse into `interpret` or delegate to the visitor.
    ///
    /// [`Pure`](crate::effect::Pure) and [`Fail`](crate::effect::Fail) are
    /// leaves without side effects and override this method to resolve
    /// themselves: a visitor never receives them, only user-defined leaves
    /// and composites that keep this default.
    ///
    /// # Errors
    ///
    /// Returns whatever error the visitor produced for a leaf, or the error
    /// propagated through the composite.
    ///
    /// # Panics
    ///
    /// Raises [`Fault::OutcomeMismatch`](crate::Fault::OutcomeMismatch) when
    /// the visitor answers with an outcome built for another effect type.
    fn interpret(self, visitor: &mut dyn Visitor) -> Result<Self::Output, Self::Error> {
        visitor.visit(Leaf::new(self)).into_result::<Self>()
    }

    /// Transforms the success value, leaving errors untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effect_pipe::effect::{Effect, Pure};
    ///
    /// let effect = Pure::<i32, String>::new(21).map(|value| value * 2);
    /// assert_eq!(effect.execute(), Ok(42));
    /// ```
    fn map<T, F>(self, transform: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> T + 'static,
        T: 'static,
    {
        Map::new(self, transform)
    }

    /// Chains a continuation that builds the next effect from the success
    /// value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effect_pipe::effect::{Effect, pure};
    ///
    /// let effect = pure::<i32, String>(10).bind(|value| pure(value + 5));
    /// assert_eq!(effect.execute(), Ok(15));
    /// ```
    fn bind<Next, F>(self, continuation: F) -> Bind<Self, F>
    where
        F: FnOnce(Self::Output) -> Next + 'static,
        Next: Effect<Error = Self::Error>,
    {
        Bind::new(self, continuation)
    }

    /// Chains a recovery that builds the next effect from the error value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effect_pipe::effect::{Effect, fail, pure};
    ///
    /// let effect = fail::<i32, &str>("missing").bind_err(|error| pure::<_, ()>(error.len() as i32));
    /// assert_eq!(effect.execute(), Ok(7));
    /// ```
    fn bind_err<Next, F>(self, recovery: F) -> BindErr<Self, F>
    where
        F: FnOnce(Self::Error) -> Next + 'static,
        Next: Effect<Output = Self::Output>,
    {
        BindErr::new(self, recovery)
    }

    /// Transforms the error value, leaving successes untouched.
    ///
    /// This is [`bind_err`](Effect::bind_err) followed by [`fail`].
    fn map_err<E2, F>(
        self,
        transform: F,
    ) -> BindErr<Self, impl FnOnce(Self::Error) -> Fail<Self::Output, E2> + 'static>
    where
        F: FnOnce(Self::Error) -> E2 + 'static,
        E2: 'static,
    {
        self.bind_err(move |error| fail(transform(error)))
    }

    /// Erases the concrete effect type.
    fn boxed(self) -> BoxEffect<Self::Output, Self::Error> {
        BoxEffect::new(self)
    }
}

/// Executes `effect` at the program boundary.
///
/// # Errors
///
/// Returns the error of the first failing node that was not recovered.
pub fn execute<E: Effect>(effect: E) -> Result<E::Output, E::Error> {
    effect.execute()
}

/// Interprets `effect` with `visitor` in place of real leaf execution.
///
/// # Errors
///
/// Returns the error produced by the visitor or propagated by a composite.
pub fn interpret<E, V>(effect: E, visitor: &mut V) -> Result<E::Output, E::Error>
where
    E: Effect,
    V: Visitor,
{
    effect.interpret(visitor)
}
