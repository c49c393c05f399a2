//! The effect algebra.
//!
//! Side effects are described by inert values implementing [`Effect`]. Nothing
//! happens until [`execute`] is called at the program's edge, which walks the
//! value and performs the real work. The same value can instead be
//! [`interpret`]ed with a [`Visitor`] that stands in for every leaf effect,
//! so business logic can be tested without performing any side effect.
//!
//! # The Algebra
//!
//! - [`Pure`]: always succeeds with a value
//! - [`Fail`]: always fails with an error
//! - [`Map`]: transforms a success value
//! - [`Bind`]: chains an effect built from a success value
//! - [`BindErr`]: chains an effect built from an error value
//!
//! Anything else is a leaf effect supplied by the user of this crate.
//!
//! ```rust
//! use effect_pipe::effect::{Effect, fail, pure};
//!
//! let effect = pure::<i32, String>(10)
//!     .map(|x| x * 2)
//!     .bind(|x| if x > 15 { fail(format!("{x} is too large")).boxed() } else { pure(x).boxed() })
//!     .bind_err(|error| pure::<_, ()>(error.len() as i32));
//!
//! assert_eq!(effect.execute(), Ok(15));
//! ```
//!
//! # Interpretation
//!
//! ```rust
//! use effect_pipe::effect::{Effect, Stub};
//!
//! struct Insert(&'static str);
//!
//! impl Effect for Insert {
//!     type Output = u64;
//!     type Error = String;
//!
//!     fn execute(self) -> Result<u64, String> {
//!         Err("no database in doctests".to_string())
//!     }
//! }
//!
//! let program = Insert("alice").bind(|first| Insert("bob").map(move |second| [first, second]));
//!
//! let mut next_id = 0;
//! let mut stub = Stub::new().on(move |_: Insert| {
//!     next_id += 1;
//!     Ok(next_id)
//! });
//!
//! assert_eq!(program.interpret(&mut stub), Ok([1, 2]));
//! assert_eq!(stub.count::<Insert>(), 2);
//! ```

// =============================================================================
// Capability
// =============================================================================

mod capability;

pub use capability::{Effect, execute, interpret};

// =============================================================================
// Leaves and Combinators
// =============================================================================

mod boxed;
mod combinator;
mod leaf;

pub use boxed::BoxEffect;
pub use combinator::{Bind, BindErr, Map};
pub use leaf::{Fail, Pure, fail, pure};

// =============================================================================
// Visitors
// =============================================================================

mod stub;
mod visitor;

pub use stub::{Stub, effect_name};
pub use visitor::{Leaf, Outcome, Passthrough, Visitor};
