//! Outcome of evaluating a constraint tree.

use super::Constraint;
use crate::value::Value;
use crate::writer::MessageWriter;

/// Result of `Constraint::evaluate`.
#[derive(Debug)]
pub enum Verdict<'c> {
    Pass,
    Fail(Failure<'c>),
}

impl<'c> Verdict<'c> {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn failure(&self) -> Option<&Failure<'c>> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(f) => Some(f),
        }
    }

    /// Records that the verdict was reached through a context modifier.
    pub(crate) fn within(self, frame: &'c Constraint) -> Self {
        match self {
            Verdict::Pass => Verdict::Pass,
            Verdict::Fail(mut failure) => {
                failure.frames.push(frame);
                Verdict::Fail(failure)
            }
        }
    }
}

/// What a failing node observed, as shown on the `But was:` line.
#[derive(Debug, Clone, PartialEq)]
pub enum Observed {
    Value(Value),
    /// A non-empty collection, reported with its element count.
    Counted(Value, usize),
    /// Code that completed without raising a fault.
    NoFault,
}

/// The node that rejected the actual value.
#[derive(Debug)]
pub struct Failure<'c> {
    // Context modifiers passed on the way down, innermost first.
    frames: Vec<&'c Constraint>,
    constraint: &'c Constraint,
    observed: Observed,
}

impl<'c> Failure<'c> {
    pub(crate) fn new(constraint: &'c Constraint, observed: Observed) -> Self {
        Self {
            frames: Vec::new(),
            constraint,
            observed,
        }
    }

    /// The constraint whose expectation was not met.
    pub fn constraint(&self) -> &'c Constraint {
        self.constraint
    }

    pub fn observed(&self) -> &Observed {
        &self.observed
    }

    /// Writes the expectation, including the property or fault context it
    /// was reached through.
    pub fn write_expected_to(&self, writer: &mut MessageWriter) {
        for frame in self.frames.iter().rev() {
            frame.write_context_to(writer);
        }
        self.constraint.write_description_to(writer);
    }

    pub fn write_observed_to(&self, writer: &mut MessageWriter) {
        match &self.observed {
            Observed::Value(v) => writer.write_value(v),
            Observed::Counted(v, count) => {
                writer.write_value(v);
                let noun = if *count == 1 { "element" } else { "elements" };
                writer.write_text(&format!(" ({count} {noun})"));
            }
            Observed::NoFault => writer.write_text("no fault"),
        }
    }

    /// Writes the `Expected:` and `But was:` lines.
    pub fn write_message_to(&self, writer: &mut MessageWriter) {
        writer.start_expected_line();
        self.write_expected_to(writer);
        writer.end_line();
        writer.start_actual_line();
        self.write_observed_to(writer);
        writer.end_line();
    }
}
