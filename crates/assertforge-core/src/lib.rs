//! AssertForge Core - Constraint expressions and their evaluation
//!
//! This crate provides the assertion engine of AssertForge:
//! - A fluent `Expression` builder guarded by an explicit state machine
//! - A precedence-driven stack machine resolving token streams to constraints
//! - Constraint trees that test values and render "Expected / But was" messages
//! - The `that` front-end and the process-wide assertion counter

pub mod assert;
pub mod constraint;
pub mod counter;
pub mod error;
pub mod expression;
pub mod machine;
pub mod message;
pub mod syntax;
pub mod token;
pub mod value;
pub mod writer;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod expression_tests;

#[cfg(test)]
mod machine_tests;


pub use assert::{fail, ignore, inconclusive, pass, that, that_with, Asserter, Settings};
pub use constraint::{Comparison, Constraint, Failure, Observed, Quantifier, TextPosition, Tolerance, ToleranceMode, Verdict};
pub use counter::{assert_count, AssertCounter};
pub use error::{AssertError, BuildError, FormatError, Result};
pub use expression::{BuilderState, Expression, Resolve, Step};
pub use message::Message;
pub use syntax::{Has, Is, Throws};
pub use token::Token;
pub use value::{Actual, Code, Fault, Inspect, Value};
pub use writer::{MessageWriter, RenderOptions};
