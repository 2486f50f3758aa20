//! Assertion front-end.
//!
//! `that` resolves an expression, counts the assertion, evaluates the
//! constraint against the actual value and turns a rejection into an
//! `AssertError::AssertionFailed` carrying the rendered message.

use tracing::{debug, trace};

use crate::counter::{self, AssertCounter};
use crate::error::{AssertError, Result};
use crate::expression::Resolve;
use crate::message::Message;
use crate::value::Actual;
use crate::writer::{MessageWriter, RenderOptions};

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    pub render: RenderOptions,
    /// Tolerance given to floating-point equality without an explicit `within`.
    pub default_tolerance: Option<f64>,
}

impl Settings {
    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn with_default_tolerance(mut self, amount: f64) -> Self {
        self.default_tolerance = Some(amount);
        self
    }
}

/// Evaluates assertions with a fixed set of settings.
#[derive(Debug, Clone, Copy)]
pub struct Asserter {
    settings: Settings,
    counter: &'static AssertCounter,
}

impl Default for Asserter {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Asserter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            counter: counter::global(),
        }
    }

    /// Counts assertions on `counter` instead of the process-wide one.
    pub fn with_counter(mut self, counter: &'static AssertCounter) -> Self {
        self.counter = counter;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Asserts that `actual` satisfies `expression`.
    pub fn that(&self, actual: impl Into<Actual>, expression: impl Resolve) -> Result<()> {
        self.that_with(actual, expression, Message::empty())
    }

    /// Asserts that `actual` satisfies `expression`, prefixing a failure with
    /// `message`.
    pub fn that_with(
        &self,
        actual: impl Into<Actual>,
        expression: impl Resolve,
        message: impl Into<Message>,
    ) -> Result<()> {
        let mut constraint = expression.resolve()?;
        let count = self.counter.increment();

        // Lazy actuals are computed only after the assertion has been counted.
        let actual = actual.into().into_value();
        if let Some(amount) = self.settings.default_tolerance {
            constraint.apply_default_tolerance(amount);
        }

        let verdict = constraint.evaluate(&actual);
        let Some(failure) = verdict.failure() else {
            trace!(event = "assert_pass", count);
            return Ok(());
        };

        let mut writer = MessageWriter::new(self.settings.render);
        writer.write_message_line(&message.into().render()?);
        failure.write_message_to(&mut writer);
        let text = writer.into_string();
        debug!(event = "assert_fail", count, constraint = %constraint, message = %text);
        Err(AssertError::AssertionFailed(text))
    }
}

/// Asserts with default settings.
///
/// # Examples
///
/// ```
/// use assertforge_core::{that, Is};
///
/// assert!(that(5, Is::greater_than(3).and().less_than(10)).is_ok());
/// let err = that(15, Is::greater_than(3).and().less_than(10)).unwrap_err();
/// assert!(err.message().contains("less than 10"));
/// ```
pub fn that(actual: impl Into<Actual>, expression: impl Resolve) -> Result<()> {
    Asserter::default().that(actual, expression)
}

/// Asserts with default settings and a failure message.
pub fn that_with(actual: impl Into<Actual>, expression: impl Resolve, message: impl Into<Message>) -> Result<()> {
    Asserter::default().that_with(actual, expression, message)
}

fn signal(message: impl Into<Message>, kind: fn(String) -> AssertError) -> Result<()> {
    let text = message.into().render()?;
    debug!(event = "assert_signal", signal = %kind(text.clone()));
    Err(kind(text))
}

/// Ends the test early with a passing result.
pub fn pass(message: impl Into<Message>) -> Result<()> {
    signal(message, AssertError::PassedEarly)
}

/// Fails the test without evaluating a constraint.
pub fn fail(message: impl Into<Message>) -> Result<()> {
    signal(message, AssertError::AssertionFailed)
}

/// Reports the test as ignored.
pub fn ignore(message: impl Into<Message>) -> Result<()> {
    signal(message, AssertError::Ignored)
}

/// Reports the test as inconclusive.
pub fn inconclusive(message: impl Into<Message>) -> Result<()> {
    signal(message, AssertError::Inconclusive)
}
