//! Keyed pipelines of effects.
//!
//! A [`Pipe`] is an ordered sequence of named steps. Each step builds an
//! effect from the results of the steps before it; executing the pipe runs
//! the steps in order, collecting every success under its key. The first
//! failing step stops the pipe and yields a [`PipeError`] carrying the
//! partial results and the failing key.
//!
//! Each step lowers into [`Bind`](crate::effect::Bind),
//! [`Map`](crate::effect::Map), [`BindErr`](crate::effect::BindErr),
//! [`Pure`](crate::effect::Pure) and [`Fail`](crate::effect::Fail), so a pipe
//! is interpreted like any other effect. The steps themselves run in a loop
//! over an explicit stack of spliced pipes, so pipes of any length run in
//! constant native stack depth.
//!
//! # Examples
//!
//! ```rust
//! use effect_pipe::effect::{Effect, pure};
//! use effect_pipe::pipe::{Pipe, Results};
//!
//! let results = Pipe::new()
//!     .then("x", |_| pure::<i32, String>(1))
//!     .then("y", |results: &Results<_, _>| pure(results["x"] + 1))
//!     .execute();
//!
//! assert_eq!(results, Ok(Results::from([("x", 1), ("y", 2)])));
//! ```
//!
//! # Key Uniqueness
//!
//! Keys are unique across one composed pipeline. Appending a key twice is a
//! programming error and raises [`Fault::DuplicateKey`] on the spot, before
//! anything runs.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Formatter};

use smallvec::{SmallVec, smallvec};

use crate::effect::{BoxEffect, Effect, Visitor, fail, pure};
use crate::fault::{Fault, raise};

mod error;

pub use error::PipeError;

/// Step results collected by a pipe, keyed by step.
pub type Results<K, V> = BTreeMap<K, V>;

type StepFn<K, V, E> = Box<dyn FnOnce(&Results<K, V>) -> BoxEffect<V, E>>;

type SpliceFn<K, V, E> = Box<dyn FnOnce(&Results<K, V>) -> Pipe<K, V, E>>;

type Lowered<K, V, E> = BoxEffect<Results<K, V>, PipeError<K, V, E>>;

enum Step<K, V, E> {
    Then { key: K, run: StepFn<K, V, E> },
    Switch { splice: SpliceFn<K, V, E> },
}

/// An ordered, keyed composition of effect-producing steps.
///
/// `K` is the step key, `V` the value every step produces and `E` the error
/// every step may fail with.
pub struct Pipe<K, V, E> {
    steps: SmallVec<[Step<K, V, E>; 8]>,
    keys: BTreeSet<K>,
}

impl<K, V, E> Pipe<K, V, E>
where
    K: Ord + Clone + Debug + 'static,
    V: 'static,
    E: 'static,
{
    /// Creates an empty pipe, which succeeds with empty results.
    pub fn new() -> Self {
        Self {
            steps: SmallVec::new(),
            keys: BTreeSet::new(),
        }
    }

    /// Creates a pipe with a single step that runs `effect` under `key`.
    pub fn start<Eff>(key: K, effect: Eff) -> Self
    where
        Eff: Effect<Output = V, Error = E>,
    {
        Self::new().then(key, move |_| effect)
    }

    /// Appends a step storing the result of the effect built by `step` under
    /// `key`.
    ///
    /// `step` receives the results of every earlier step.
    ///
    /// # Panics
    ///
    /// Raises [`Fault::DuplicateKey`] if `key` was already appended.
    #[must_use]
    pub fn then<F, Eff>(self, key: K, step: F) -> Self
    where
        F: FnOnce(&Results<K, V>) -> Eff + 'static,
        Eff: Effect<Output = V, Error = E>,
    {
        match self.try_then(key, step) {
            Ok(pipe) => pipe,
            Err(fault) => raise(fault),
        }
    }

    /// Appends a step like [`then`](Self::then), reporting a duplicate key as
    /// a value.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::DuplicateKey`] if `key` was already appended.
    pub fn try_then<F, Eff>(mut self, key: K, step: F) -> Result<Self, Fault>
    where
        F: FnOnce(&Results<K, V>) -> Eff + 'static,
        Eff: Effect<Output = V, Error = E>,
    {
        if self.keys.contains(&key) {
            return Err(Fault::duplicate_key(&key));
        }
        self.keys.insert(key.clone());
        self.steps.push(Step::Then {
            key,
            run: Box::new(move |results: &Results<K, V>| step(results).boxed()),
        });
        Ok(self)
    }

    /// Appends a step that splices in the pipe built by `splice`.
    ///
    /// The spliced pipe continues from the results collected so far and its
    /// keys merge into the same mapping. A spliced key that collides with a
    /// key of any enclosing pipe raises [`Fault::DuplicateKey`] when the
    /// splice happens, before any spliced step runs.
    ///
    /// `splice` must return a pipe; anything else is rejected at compile time:
    ///
    /// ```rust,compile_fail
    /// use effect_pipe::effect::pure;
    /// use effect_pipe::pipe::Pipe;
    ///
    /// let pipe = Pipe::<&str, i32, ()>::new().switch(|_| pure::<i32, ()>(1));
    /// ```
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effect_pipe::effect::{Effect, pure};
    /// use effect_pipe::pipe::{Pipe, Results};
    ///
    /// let results = Pipe::start("x", pure::<i32, ()>(1))
    ///     .switch(|results| Pipe::start("y", pure(results["x"] + 1)))
    ///     .execute();
    ///
    /// assert_eq!(results, Ok(Results::from([("x", 1), ("y", 2)])));
    /// ```
    #[must_use]
    pub fn switch<F>(mut self, splice: F) -> Self
    where
        F: FnOnce(&Results<K, V>) -> Self + 'static,
    {
        self.steps.push(Step::Switch {
            splice: Box::new(splice),
        });
        self
    }

    /// Keys registered with [`then`](Self::then), in key order.
    ///
    /// Keys of pipes spliced in with [`switch`](Self::switch) are only known
    /// once the pipe runs.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Number of appended steps, splices included.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step was appended.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Erases the pipe into a boxed effect over its results.
    pub fn into_effect(self) -> BoxEffect<Results<K, V>, PipeError<K, V, E>> {
        self.boxed()
    }

    fn into_frame(self) -> Frame<K, V, E> {
        Frame {
            steps: self.steps.into_iter(),
            keys: self.keys,
        }
    }

    /// Runs the steps in a loop, handing each lowered step to `run_lowered`.
    ///
    /// Spliced pipes are pushed as frames on an explicit stack, so neither
    /// the number of steps nor the splice depth grows the native stack.
    fn drive<R>(self, mut run_lowered: R) -> Result<Results<K, V>, PipeError<K, V, E>>
    where
        R: FnMut(Lowered<K, V, E>) -> Result<Results<K, V>, PipeError<K, V, E>>,
    {
        let mut results = Results::new();
        let mut frames: SmallVec<[Frame<K, V, E>; 4]> = smallvec![self.into_frame()];

        while let Some(frame) = frames.last_mut() {
            let Some(step) = frame.steps.next() else {
                frames.pop();
                continue;
            };

            match step {
                Step::Then { key, run } => {
                    results = run_lowered(lower_step(key, run, results))?;
                }
                Step::Switch { splice } => {
                    let spliced = splice(&results);
                    tracing::trace!(keys = ?spliced.keys, depth = frames.len(), "splicing pipe");

                    if let Some(key) = spliced.keys.iter().find(|key| {
                        results.contains_key(*key)
                            || frames.iter().any(|frame| frame.keys.contains(*key))
                    }) {
                        raise(Fault::duplicate_key(key));
                    }
                    frames.push(spliced.into_frame());
                }
            }
        }

        Ok(results)
    }
}

/// A pipe being run: its remaining steps and the keys it registered.
struct Frame<K, V, E> {
    steps: smallvec::IntoIter<[Step<K, V, E>; 8]>,
    keys: BTreeSet<K>,
}

/// Lowers one step into the core algebra, continuing from `results`.
fn lower_step<K, V, E>(key: K, run: StepFn<K, V, E>, results: Results<K, V>) -> Lowered<K, V, E>
where
    K: Ord + Clone + Debug + 'static,
    V: 'static,
    E: 'static,
{
    tracing::trace!(key = ?key, completed = results.len(), "running pipe step");

    run(&results)
        .map(Ok::<V, E>)
        .bind_err(|error| pure(Err(error)))
        .bind(move |outcome| match outcome {
            Ok(value) => {
                tracing::trace!(key = ?key, "pipe step succeeded");
                let mut results = results;
                results.insert(key, value);
                pure(results).boxed()
            }
            Err(error) => {
                tracing::trace!(key = ?key, "pipe step failed");
                fail(PipeError::new(key, error, results)).boxed()
            }
        })
        .boxed()
}

impl<K, V, E> Default for Pipe<K, V, E>
where
    K: Ord + Clone + Debug + 'static,
    V: 'static,
    E: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> Effect for Pipe<K, V, E>
where
    K: Ord + Clone + Debug + 'static,
    V: 'static,
    E: 'static,
{
    type Output = Results<K, V>;
    type Error = PipeError<K, V, E>;

    fn execute(self) -> Result<Results<K, V>, PipeError<K, V, E>> {
        self.drive(|step| step.execute())
    }

    fn interpret(self, visitor: &mut dyn Visitor) -> Result<Results<K, V>, PipeError<K, V, E>> {
        self.drive(|step| step.interpret(&mut *visitor))
    }
}

impl<K: Debug, V, E> Debug for Pipe<K, V, E> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipe")
            .field("keys", &self.keys)
            .field("steps", &self.steps.len())
            .finish()
    }
}
