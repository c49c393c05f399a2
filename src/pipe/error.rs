//! The failure payload of a pipe execution.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use super::Results;

/// Partial results and the failing step of a pipe execution.
///
/// `errors` holds exactly one entry: the key of the step that failed, mapped
/// to that step's raw error. `results` holds every step that succeeded
/// before it.
///
/// # Examples
///
/// ```rust
/// use effect_pipe::effect::{Effect, fail, pure};
/// use effect_pipe::pipe::Pipe;
///
/// let error = Pipe::new()
///     .then("x", |_| pure(1))
///     .then("y", |_| fail("oops"))
///     .execute()
///     .expect_err("step y fails");
///
/// assert_eq!(error.failure(), Some((&"y", &"oops")));
/// assert_eq!(error.results().get("x"), Some(&1));
/// assert_eq!(error.to_string(), "pipe step \"y\" failed: oops");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "K: serde::Serialize, V: serde::Serialize, E: serde::Serialize",
        deserialize = "K: Ord + serde::Deserialize<'de>, V: serde::Deserialize<'de>, E: serde::Deserialize<'de>"
    ))
)]
pub struct PipeError<K, V, E> {
    errors: BTreeMap<K, E>,
    results: Results<K, V>,
}

impl<K: Ord, V, E> PipeError<K, V, E> {
    pub(crate) fn new(key: K, error: E, results: Results<K, V>) -> Self {
        Self {
            errors: BTreeMap::from([(key, error)]),
            results,
        }
    }

    /// The failing step's key mapped to its error.
    pub const fn errors(&self) -> &BTreeMap<K, E> {
        &self.errors
    }

    /// Results of the steps that succeeded before the failure.
    pub const fn results(&self) -> &Results<K, V> {
        &self.results
    }

    /// The failing step's key and error.
    pub fn failure(&self) -> Option<(&K, &E)> {
        self.errors.iter().next()
    }

    /// Splits the error into `(errors, results)`.
    pub fn into_parts(self) -> (BTreeMap<K, E>, Results<K, V>) {
        (self.errors, self.results)
    }
}

impl<K: Debug, V, E: Display> Display for PipeError<K, V, E> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.errors.iter().next() {
            Some((key, error)) => write!(formatter, "pipe step {key:?} failed: {error}"),
            None => write!(formatter, "pipe failed"),
        }
    }
}

impl<K, V, E> Error for PipeError<K, V, E>
where
    K: Debug,
    V: Debug,
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.errors
            .values()
            .next()
            .map(|error| error as &(dyn Error + 'static))
    }
}
