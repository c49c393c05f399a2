//! Leaf effects shared by the integration tests.
//!
//! A [`Probe`] counts its real executions, so tests can tell true execution
//! apart from interpretation.

#![allow(dead_code)]

use effect_pipe::effect::Effect;
use std::cell::Cell;
use std::rc::Rc;

/// Counts real executions of [`Probe`] effects.
#[derive(Debug, Clone, Default)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }

    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// A probe that succeeds with `value`.
    pub fn succeed(&self, value: i32) -> Probe {
        Probe {
            counter: self.clone(),
            result: Ok(value),
        }
    }

    /// A probe that fails with `error`.
    pub fn fail(&self, error: &str) -> Probe {
        Probe {
            counter: self.clone(),
            result: Err(error.to_string()),
        }
    }
}

/// A leaf effect with an observable side effect: it bumps its counter.
#[derive(Debug)]
pub struct Probe {
    counter: Counter,
    result: Result<i32, String>,
}

impl Probe {
    pub fn planned(&self) -> &Result<i32, String> {
        &self.result
    }
}

impl Effect for Probe {
    type Output = i32;
    type Error = String;

    fn execute(self) -> Result<i32, String> {
        self.counter.bump();
        self.result
    }
}

/// A second leaf type, for visitors that must tell leaves apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greet(pub &'static str);

impl Effect for Greet {
    type Output = String;
    type Error = String;

    fn execute(self) -> Result<String, String> {
        Ok(format!("hello, {}", self.0))
    }
}
