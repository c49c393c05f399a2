//! Programmer errors raised by the effect core.
//!
//! A [`Fault`] signals a bug in the calling code, never a failure of a side
//! effect. Faults are therefore not returned as `Err` values: they abort the
//! current construction or execution through [`std::panic::panic_any`], with
//! the `Fault` itself as the panic payload. This keeps them distinguishable
//! from ordinary effect errors, which always travel as data.
//!
//! Use [`Fault::catch`] at a boundary (typically a test) to turn a raised
//! fault back into a value.
//!
//! # Examples
//!
//! ```rust
//! use effect_pipe::Fault;
//!
//! let caught: Result<i32, Fault> = Fault::catch(|| {
//!     std::panic::panic_any(Fault::UnhandledLeaf { effect_type: "SendMail" });
//! });
//! assert_eq!(caught, Err(Fault::UnhandledLeaf { effect_type: "SendMail" }));
//!
//! assert_eq!(Fault::catch(|| 42), Ok(42));
//! ```

use std::fmt::Debug;
use std::panic::{AssertUnwindSafe, catch_unwind, panic_any, resume_unwind};

use static_assertions::assert_impl_all;
use thiserror::Error;

/// A programmer error detected while building or running effects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// A pipe step key was registered twice within one composed pipeline.
    #[error("duplicate pipe step key: {key}")]
    DuplicateKey {
        /// `Debug` rendering of the offending key.
        key: String,
    },

    /// A visitor was handed a leaf effect it has no handler for.
    #[error("no handler registered for leaf effect `{effect_type}`")]
    UnhandledLeaf {
        /// Type name of the leaf effect.
        effect_type: &'static str,
    },

    /// A visitor answered a leaf with an outcome built for another effect type.
    #[error("visitor answered leaf `{expected}` with an outcome for `{found}`")]
    OutcomeMismatch {
        /// Type name of the leaf that was visited.
        expected: &'static str,
        /// Type name the outcome was built for.
        found: &'static str,
    },
}

assert_impl_all!(Fault: Send, Sync, std::error::Error);

impl Fault {
    /// Builds a [`Fault::DuplicateKey`] from any debuggable key.
    pub fn duplicate_key<K: Debug>(key: &K) -> Self {
        Self::DuplicateKey {
            key: format!("{key:?}"),
        }
    }

    /// Runs `function`, converting a raised fault into `Err(fault)`.
    ///
    /// Panics whose payload is not a [`Fault`] are resumed unchanged.
    pub fn catch<T, F>(function: F) -> Result<T, Self>
    where
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(function)) {
            Ok(value) => Ok(value),
            Err(payload) => match payload.downcast::<Self>() {
                Ok(fault) => Err(*fault),
                Err(other) => resume_unwind(other),
            },
        }
    }
}

/// Aborts with `fault` as the panic payload.
pub(crate) fn raise(fault: Fault) -> ! {
    panic_any(fault)
}
