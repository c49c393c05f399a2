//! A dry-run visitor with one handler per leaf effect type.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};

use super::capability::Effect;
use super::visitor::{Leaf, Outcome, Visitor};
use crate::fault::{Fault, raise};

type Handler = Box<dyn FnMut(Leaf) -> Outcome>;

/// A visitor answering each leaf from a handler registered for its type.
///
/// Every visit is recorded, so tests can assert which leaves a program
/// would have performed and in which order. Visiting a leaf type without a
/// handler raises [`Fault::UnhandledLeaf`]: a stub never falls back to real
/// execution unless asked to with [`Stub::passthrough`].
///
/// # Examples
///
/// ```rust
/// use effect_pipe::effect::{Effect, Stub};
///
/// struct Charge {
///     cents: u64,
/// }
///
/// impl Effect for Charge {
///     type Output = String;
///     type Error = String;
///
///     fn execute(self) -> Result<String, String> {
///         unimplemented!("talks to the payment provider")
///     }
/// }
///
/// let checkout = Charge { cents: 500 }.bind(|receipt| Charge { cents: 50 }.map(move |tip| (receipt, tip)));
///
/// let mut stub = Stub::new().on(|charge: Charge| Ok(format!("receipt-{}", charge.cents)));
/// let result = checkout.interpret(&mut stub);
///
/// assert_eq!(result, Ok(("receipt-500".to_string(), "receipt-50".to_string())));
/// assert_eq!(stub.count::<Charge>(), 2);
/// ```
#[derive(Default)]
pub struct Stub {
    handlers: HashMap<TypeId, Handler>,
    visited: Vec<&'static str>,
    visited_ids: Vec<TypeId>,
}

impl Stub {
    /// Creates a stub without handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for leaves of type `L`, replacing any previous one.
    #[must_use]
    pub fn on<L, F>(mut self, mut handler: F) -> Self
    where
        L: Effect,
        F: FnMut(L) -> Result<L::Output, L::Error> + 'static,
    {
        let handler: Handler = Box::new(move |leaf: Leaf| match leaf.downcast::<L>() {
            Ok(effect) => Outcome::new::<L>(handler(effect)),
            Err(leaf) => raise(Fault::UnhandledLeaf {
                effect_type: leaf.effect_type(),
            }),
        });
        self.handlers.insert(TypeId::of::<L>(), handler);
        self
    }

    /// Lets leaves of type `L` execute for real.
    #[must_use]
    pub fn passthrough<L: Effect>(self) -> Self {
        self.on(L::execute)
    }

    /// Type names of every visited leaf, in visiting order.
    pub fn visited(&self) -> &[&'static str] {
        &self.visited
    }

    /// Number of visited leaves of type `L`.
    pub fn count<L: Effect>(&self) -> usize {
        let wanted = TypeId::of::<L>();
        self.visited_ids.iter().filter(|id| **id == wanted).count()
    }

    /// Returns `true` if a handler is registered for `L`.
    pub fn handles<L: Effect>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<L>())
    }
}

impl Visitor for Stub {
    fn visit(&mut self, leaf: Leaf) -> Outcome {
        let id = leaf.type_id();
        let effect_type = leaf.effect_type();
        tracing::trace!(effect_type, "stub visiting leaf effect");
        self.visited.push(effect_type);
        self.visited_ids.push(id);

        match self.handlers.get_mut(&id) {
            Some(handler) => handler(leaf),
            None => raise(Fault::UnhandledLeaf { effect_type }),
        }
    }
}

impl Debug for Stub {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Stub")
            .field("handlers", &self.handlers.len())
            .field("visited", &self.visited)
            .finish()
    }
}

/// Type name helper for assertions against [`Stub::visited`].
pub fn effect_name<L: Effect>() -> &'static str {
    type_name::<L>()
}
