//! Visitors: substitutes for real execution during interpretation.
//!
//! When an effect tree is interpreted, every opaque leaf is wrapped in a
//! [`Leaf`] and handed to a [`Visitor`], which answers with an [`Outcome`].
//! Both carriers are type-erased so that a single visitor can handle leaves
//! of any type; the typed [`Outcome`] constructors and the downcasts on
//! [`Leaf`] recover the static types at the edges.
//!
//! Any `FnMut(Leaf) -> Outcome` closure is a visitor.
//!
//! # Examples
//!
//! ```rust
//! use effect_pipe::effect::{Effect, Leaf, Outcome};
//!
//! struct Now;
//!
//! impl Effect for Now {
//!     type Output = u64;
//!     type Error = ();
//!
//!     fn execute(self) -> Result<u64, ()> {
//!         Ok(std::time::SystemTime::now()
//!             .duration_since(std::time::UNIX_EPOCH)
//!             .map_err(|_| ())?
//!             .as_secs())
//!     }
//! }
//!
//! let mut frozen_clock = |leaf: Leaf| {
//!     assert!(leaf.is::<Now>());
//!     Outcome::ok::<Now>(1_700_000_000)
//! };
//!
//! let elapsed = Now.map(|now| now - 1_600_000_000);
//! assert_eq!(elapsed.interpret(&mut frozen_clock), Ok(100_000_000));
//! ```

use std::any::{Any, TypeId, type_name};
use std::fmt::{self, Debug, Formatter};

use super::capability::Effect;
use crate::fault::{Fault, raise};

/// Stands in for real execution of leaf effects.
pub trait Visitor {
    /// Produces the outcome of `leaf`.
    fn visit(&mut self, leaf: Leaf) -> Outcome;
}

impl<F> Visitor for F
where
    F: FnMut(Leaf) -> Outcome,
{
    fn visit(&mut self, leaf: Leaf) -> Outcome {
        self(leaf)
    }
}

/// Object-safe view of a leaf effect.
trait ErasedLeaf {
    fn execute_erased(self: Box<Self>) -> Outcome;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<L: Effect> ErasedLeaf for L {
    fn execute_erased(self: Box<Self>) -> Outcome {
        Outcome::new::<L>((*self).execute())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A leaf effect on its way to a visitor.
pub struct Leaf {
    effect: Box<dyn ErasedLeaf>,
    effect_type: &'static str,
}

impl Leaf {
    /// Wraps `effect`.
    pub fn new<L: Effect>(effect: L) -> Self {
        Self {
            effect: Box::new(effect),
            effect_type: type_name::<L>(),
        }
    }

    /// Type name of the wrapped effect.
    pub const fn effect_type(&self) -> &'static str {
        self.effect_type
    }

    /// [`TypeId`] of the wrapped effect.
    pub fn type_id(&self) -> TypeId {
        self.effect.as_any().type_id()
    }

    /// Returns `true` if the wrapped effect is an `L`.
    pub fn is<L: Effect>(&self) -> bool {
        self.effect.as_any().is::<L>()
    }

    /// Borrows the wrapped effect as an `L`.
    pub fn downcast_ref<L: Effect>(&self) -> Option<&L> {
        self.effect.as_any().downcast_ref::<L>()
    }

    /// Takes the wrapped effect back as an `L`, or returns the leaf unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when the wrapped effect is not an `L`.
    pub fn downcast<L: Effect>(self) -> Result<L, Self> {
        if !self.is::<L>() {
            return Err(self);
        }
        match self.effect.into_any().downcast::<L>() {
            Ok(effect) => Ok(*effect),
            Err(_) => unreachable!("leaf type was checked before downcasting"),
        }
    }

    /// Performs the wrapped effect for real.
    pub fn execute(self) -> Outcome {
        self.effect.execute_erased()
    }
}

impl Debug for Leaf {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Leaf")
            .field("effect_type", &self.effect_type)
            .finish_non_exhaustive()
    }
}

/// The result a visitor produced for a leaf.
///
/// Build it with the constructor typed by the leaf effect so the result can
/// be recovered as that effect's `Result<Output, Error>`.
pub struct Outcome {
    result: Box<dyn Any>,
    effect_type: &'static str,
}

impl Outcome {
    /// An outcome for a leaf of type `L`.
    pub fn new<L: Effect>(result: Result<L::Output, L::Error>) -> Self {
        Self {
            result: Box::new(result),
            effect_type: type_name::<L>(),
        }
    }

    /// A successful outcome for a leaf of type `L`.
    pub fn ok<L: Effect>(value: L::Output) -> Self {
        Self::new::<L>(Ok(value))
    }

    /// A failed outcome for a leaf of type `L`.
    pub fn err<L: Effect>(error: L::Error) -> Self {
        Self::new::<L>(Err(error))
    }

    /// Type name of the effect this outcome was built for.
    pub const fn effect_type(&self) -> &'static str {
        self.effect_type
    }

    /// Recovers the typed result for a leaf of type `L`.
    pub(crate) fn into_result<L: Effect>(self) -> Result<L::Output, L::Error> {
        let Self {
            result,
            effect_type,
        } = self;
        match result.downcast::<Result<L::Output, L::Error>>() {
            Ok(result) => *result,
            Err(_) => raise(Fault::OutcomeMismatch {
                expected: type_name::<L>(),
                found: effect_type,
            }),
        }
    }
}

impl Debug for Outcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Outcome")
            .field("effect_type", &self.effect_type)
            .finish_non_exhaustive()
    }
}

/// A visitor that executes every leaf for real.
///
/// Interpreting with `Passthrough` is observably the same as executing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Visitor for Passthrough {
    fn visit(&mut self, leaf: Leaf) -> Outcome {
        leaf.execute()
    }
}
