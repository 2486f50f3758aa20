//! AssertForge - Fluent constraint-based assertions in Rust
//!
//! Build a constraint with the `Is`, `Has` and `Throws` vocabulary and check a
//! value against it with `that`.
//!
//! # Example
//!
//! ```rust
//! use assertforge::prelude::*;
//!
//! that(5, Is::greater_than(3).and().less_than(10)).unwrap();
//! that("hello", Has::length().equal_to(5)).unwrap();
//!
//! let err = that(vec![1, 2, 3], Is::empty()).unwrap_err();
//! assert!(err.is_failure());
//! assert!(err.message().contains("(3 elements)"));
//! ```

pub mod classic;

// Fluent vocabulary
pub use assertforge_core::{BuilderState, Expression, Has, Is, Resolve, Step, Throws};

// Resolved constraints
pub use assertforge_core::{Comparison, Constraint, Quantifier, TextPosition, Tolerance, ToleranceMode};

// Values and the host inspection capability
pub use assertforge_core::{Actual, Code, Fault, Inspect, Value};

// Front-end
pub use assertforge_core::{
    assert_count, fail, ignore, inconclusive, pass, that, that_with, AssertCounter, Asserter, Message,
    RenderOptions, Settings,
};

// Errors
pub use assertforge_core::{AssertError, BuildError, FormatError, Result};

// Configuration
pub use assertforge_config::{AssertConfig, ConfigError};

/// Console output, available with the `console` feature.
#[cfg(feature = "console")]
pub use assertforge_console as console;

pub mod prelude {
    pub use super::{that, that_with, Has, Is, Throws};
    pub use super::{fail, ignore, inconclusive, pass};
    pub use super::{AssertError, Message, Resolve, Value};
}
