//! # effect-pipe
//!
//! Side effects as inert data.
//!
//! ## Overview
//!
//! Business logic builds effect values instead of performing I/O. A single
//! call to [`execute`](effect::execute) at the program's edge walks the value
//! and does the real work; in tests the same value can be
//! [`interpret`](effect::interpret)ed with a visitor that answers every leaf
//! effect without touching the outside world.
//!
//! - **Effect Algebra**: `Pure`, `Fail`, `Map`, `Bind`, `BindErr`
//! - **Interpretation**: visitors, stubs, passthrough execution
//! - **Pipe**: keyed step sequences with partial results on failure
//! - **Faults**: programmer errors kept apart from effect errors
//!
//! ## Feature Flags
//!
//! - `pipe`: The keyed pipeline orchestrator (default)
//! - `serde`: Serialization of pipe errors
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use effect_pipe::prelude::*;
//!
//! struct Lookup(&'static str);
//!
//! impl Effect for Lookup {
//!     type Output = u32;
//!     type Error = String;
//!
//!     fn execute(self) -> Result<u32, String> {
//!         Err(format!("no backend for {}", self.0))
//!     }
//! }
//!
//! let signup = Pipe::new()
//!     .then("user", |_| Lookup("alice"))
//!     .then("team", |results: &Results<_, _>| pure(results["user"] * 10));
//!
//! let mut stub = Stub::new().on(|_: Lookup| Ok(7));
//! let results = signup.interpret(&mut stub);
//!
//! assert_eq!(results, Ok(Results::from([("team", 70), ("user", 7)])));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use effect_pipe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::effect::*;

    pub use crate::fault::Fault;

    #[cfg(feature = "pipe")]
    pub use crate::pipe::*;
}

pub mod effect;

mod fault;

pub use fault::Fault;

#[cfg(feature = "pipe")]
pub mod pipe;
