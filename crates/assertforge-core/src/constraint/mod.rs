//! Resolved constraint trees.
//!
//! A `Constraint` is the product of resolving an expression. Every node can
//! test an actual value and describe its own expectation:
//!
//! - terminal predicates (`Equal`, `Ordering`, `Null`, `Empty`, ...)
//! - decorators (`Not`, `Items`)
//! - combinators (`And`, `Or`), which short-circuit
//! - context modifiers (`Property`, `Attribute`, `ThrowsMatching`), which
//!   apply their inner constraint to a value derived from the actual one

mod compare;
mod verdict;


use std::fmt;
use std::sync::Arc;

pub use compare::{compare_values, same_instance, values_equal, Comparison, Tolerance, ToleranceMode};
pub use verdict::{Failure, Observed, Verdict};

use crate::value::Value;
use crate::writer::MessageWriter;

/// Where a text constraint looks for its expected substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPosition {
    Anywhere,
    Start,
    End,
}

/// How many items of a collection must satisfy an item constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    All,
    Some,
    None,
}

impl Quantifier {
    fn label(self) -> &'static str {
        match self {
            Quantifier::All => "all items",
            Quantifier::Some => "some item",
            Quantifier::None => "no item",
        }
    }
}

/// A node of a resolved constraint tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Equal {
        expected: Value,
        tolerance: Option<Tolerance>,
        ignore_case: bool,
    },
    Ordering {
        comparison: Comparison,
        expected: Value,
    },
    SameAs(Value),
    Null,
    True,
    False,
    NaN,
    /// Empty string or empty list.
    Empty,
    /// List containing an item equal to the value.
    Contains(Value),
    Text {
        expected: Arc<str>,
        position: TextPosition,
        ignore_case: bool,
    },
    InstanceOf(Arc<str>),
    ExactType(Arc<str>),
    /// Object whose type accepts values of the named type.
    AssignableFrom(Arc<str>),
    PropertyExists(Arc<str>),
    AttributeExists(Arc<str>),
    /// Code that raises any fault.
    Throws,
    ThrowsNothing,

    Not(Box<Constraint>),
    Items {
        quantifier: Quantifier,
        inner: Box<Constraint>,
    },

    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),

    Property {
        name: Arc<str>,
        inner: Box<Constraint>,
    },
    Attribute {
        name: Arc<str>,
        inner: Box<Constraint>,
    },
    /// Code that raises a fault satisfying the inner constraint.
    ThrowsMatching(Box<Constraint>),
}

impl Constraint {
    // Constructors for common constraints

    pub fn equal(expected: impl Into<Value>) -> Self {
        Constraint::Equal {
            expected: expected.into(),
            tolerance: None,
            ignore_case: false,
        }
    }

    pub fn equal_within(expected: impl Into<Value>, delta: f64) -> Self {
        Constraint::Equal {
            expected: expected.into(),
            tolerance: Some(Tolerance::linear(delta)),
            ignore_case: false,
        }
    }

    pub fn ordering(comparison: Comparison, expected: impl Into<Value>) -> Self {
        Constraint::Ordering {
            comparison,
            expected: expected.into(),
        }
    }

    pub fn greater_than(expected: impl Into<Value>) -> Self {
        Self::ordering(Comparison::GreaterThan, expected)
    }

    pub fn less_than(expected: impl Into<Value>) -> Self {
        Self::ordering(Comparison::LessThan, expected)
    }

    pub fn text(expected: &str, position: TextPosition) -> Self {
        Constraint::Text {
            expected: Arc::from(expected),
            position,
            ignore_case: false,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Constraint) -> Self {
        Constraint::Not(Box::new(inner))
    }

    pub fn and(left: Constraint, right: Constraint) -> Self {
        Constraint::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Constraint, right: Constraint) -> Self {
        Constraint::Or(Box::new(left), Box::new(right))
    }

    pub fn items(quantifier: Quantifier, inner: Constraint) -> Self {
        Constraint::Items {
            quantifier,
            inner: Box::new(inner),
        }
    }

    pub fn property(name: &str, inner: Constraint) -> Self {
        Constraint::Property {
            name: Arc::from(name),
            inner: Box::new(inner),
        }
    }

    pub fn attribute(name: &str, inner: Constraint) -> Self {
        Constraint::Attribute {
            name: Arc::from(name),
            inner: Box::new(inner),
        }
    }

    /// Tests the actual value. Never panics on a type mismatch; mismatched
    /// types simply do not match.
    pub fn matches(&self, actual: &Value) -> bool {
        self.evaluate(actual).is_pass()
    }

    /// Tests the actual value and, on failure, reports the node that
    /// rejected it. `And` stops at the first failing branch and `Or` stops at
    /// the first passing one.
    pub fn evaluate(&self, actual: &Value) -> Verdict<'_> {
        match self {
            Constraint::Equal {
                expected,
                tolerance,
                ignore_case,
            } => self.check(values_equal(expected, actual, *tolerance, *ignore_case), actual),

            Constraint::Ordering {
                comparison,
                expected,
            } => {
                let holds = compare_values(actual, expected).is_some_and(|o| comparison.holds(o));
                self.check(holds, actual)
            }

            Constraint::SameAs(expected) => self.check(same_instance(expected, actual), actual),

            Constraint::Null => self.check(actual.is_null(), actual),
            Constraint::True => self.check(actual.as_bool() == Some(true), actual),
            Constraint::False => self.check(actual.as_bool() == Some(false), actual),
            Constraint::NaN => self.check(matches!(actual, Value::Float(f) if f.is_nan()), actual),

            Constraint::Empty => match actual {
                Value::Str(s) => self.check(s.is_empty(), actual),
                Value::List(items) if items.is_empty() => Verdict::Pass,
                Value::List(items) => {
                    Verdict::Fail(Failure::new(self, Observed::Counted(actual.clone(), items.len())))
                }
                _ => self.reject(actual),
            },

            Constraint::Contains(expected) => {
                let found = actual
                    .as_list()
                    .is_some_and(|items| items.iter().any(|item| values_equal(expected, item, None, false)));
                self.check(found, actual)
            }

            Constraint::Text {
                expected,
                position,
                ignore_case,
            } => {
                let found = actual
                    .as_str()
                    .is_some_and(|s| text_matches(s, expected, *position, *ignore_case));
                self.check(found, actual)
            }

            Constraint::InstanceOf(type_name) => self.check(actual.is_instance_of(type_name), actual),
            Constraint::ExactType(type_name) => {
                self.check(!actual.is_null() && actual.type_name() == &**type_name, actual)
            }
            Constraint::AssignableFrom(type_name) => {
                self.check(actual.is_assignable_from(type_name), actual)
            }

            Constraint::PropertyExists(name) => self.check(actual.property(name).is_some(), actual),
            Constraint::AttributeExists(name) => self.check(actual.attribute(name).is_some(), actual),

            Constraint::Throws => match actual {
                Value::Code(code) => match code.run() {
                    Some(_) => Verdict::Pass,
                    None => Verdict::Fail(Failure::new(self, Observed::NoFault)),
                },
                _ => self.reject(actual),
            },

            Constraint::ThrowsNothing => match actual {
                Value::Code(code) => match code.run() {
                    None => Verdict::Pass,
                    Some(fault) => Verdict::Fail(Failure::new(self, Observed::Value(fault.into()))),
                },
                _ => self.reject(actual),
            },

            Constraint::Not(inner) => self.check(!inner.matches(actual), actual),

            Constraint::Items { quantifier, inner } => match actual.as_list() {
                Some(items) => {
                    let holds = match quantifier {
                        Quantifier::All => items.iter().all(|item| inner.matches(item)),
                        Quantifier::Some => items.iter().any(|item| inner.matches(item)),
                        Quantifier::None => !items.iter().any(|item| inner.matches(item)),
                    };
                    self.check(holds, actual)
                }
                None => self.reject(actual),
            },

            Constraint::And(left, right) => match left.evaluate(actual) {
                Verdict::Pass => right.evaluate(actual),
                failed => failed,
            },

            Constraint::Or(left, right) => {
                if left.matches(actual) || right.matches(actual) {
                    Verdict::Pass
                } else {
                    self.reject(actual)
                }
            }

            Constraint::Property { name, inner } => match actual.property(name) {
                Some(value) => inner.evaluate(&value).within(self),
                None => self.reject(actual),
            },

            Constraint::Attribute { name, inner } => match actual.attribute(name) {
                Some(value) => inner.evaluate(&value).within(self),
                None => self.reject(actual),
            },

            Constraint::ThrowsMatching(inner) => match actual {
                Value::Code(code) => match code.run() {
                    Some(fault) => inner.evaluate(&Value::from(fault)).within(self),
                    None => Verdict::Fail(Failure::new(self, Observed::NoFault)),
                },
                _ => self.reject(actual),
            },
        }
    }

    fn check(&self, holds: bool, actual: &Value) -> Verdict<'_> {
        if holds {
            Verdict::Pass
        } else {
            self.reject(actual)
        }
    }

    fn reject(&self, actual: &Value) -> Verdict<'_> {
        Verdict::Fail(Failure::new(self, Observed::Value(actual.clone())))
    }

    /// Writes the expectation of this node and its children.
    pub fn write_description_to(&self, writer: &mut MessageWriter) {
        match self {
            Constraint::Equal {
                expected,
                tolerance,
                ignore_case,
            } => {
                writer.write_value(expected);
                if let Some(t) = tolerance {
                    match t.mode {
                        ToleranceMode::Percent => writer.write_text(&format!(" +/- {}%", t.amount)),
                        ToleranceMode::Linear | ToleranceMode::Fallback => {
                            writer.write_text(&format!(" +/- {:?}", t.amount))
                        }
                    }
                }
                if *ignore_case {
                    writer.write_text(", ignoring case");
                }
            }
            Constraint::Ordering {
                comparison,
                expected,
            } => {
                writer.write_predicate(comparison.label());
                writer.write_value(expected);
            }
            Constraint::SameAs(expected) => {
                writer.write_predicate("same as");
                writer.write_value(expected);
            }
            Constraint::Null => writer.write_text("null"),
            Constraint::True => writer.write_text("true"),
            Constraint::False => writer.write_text("false"),
            Constraint::NaN => writer.write_text("NaN"),
            Constraint::Empty => writer.write_text("<empty>"),
            Constraint::Contains(expected) => {
                writer.write_predicate("collection containing");
                writer.write_value(expected);
            }
            Constraint::Text {
                expected,
                position,
                ignore_case,
            } => {
                writer.write_predicate(match position {
                    TextPosition::Anywhere => "string containing",
                    TextPosition::Start => "string starting with",
                    TextPosition::End => "string ending with",
                });
                writer.write_value(&Value::Str(expected.clone()));
                if *ignore_case {
                    writer.write_text(", ignoring case");
                }
            }
            Constraint::InstanceOf(type_name) => writer.write_text(&format!("instance of <{type_name}>")),
            Constraint::ExactType(type_name) => writer.write_text(&format!("<{type_name}>")),
            Constraint::AssignableFrom(type_name) => {
                writer.write_text(&format!("assignable from <{type_name}>"))
            }
            Constraint::PropertyExists(name) => writer.write_text(&format!("property {name}")),
            Constraint::AttributeExists(name) => writer.write_text(&format!("attribute {name}")),
            Constraint::Throws => writer.write_text("a fault"),
            Constraint::ThrowsNothing => writer.write_text("no fault"),
            Constraint::Not(inner) => {
                writer.write_predicate("not");
                inner.write_description_to(writer);
            }
            Constraint::Items { quantifier, inner } => {
                writer.write_predicate(quantifier.label());
                inner.write_description_to(writer);
            }
            Constraint::And(left, right) => {
                left.write_description_to(writer);
                writer.write_connector("and");
                right.write_description_to(writer);
            }
            Constraint::Or(left, right) => {
                left.write_description_to(writer);
                writer.write_connector("or");
                right.write_description_to(writer);
            }
            Constraint::Property { inner, .. }
            | Constraint::Attribute { inner, .. }
            | Constraint::ThrowsMatching(inner) => {
                self.write_context_to(writer);
                inner.write_description_to(writer);
            }
        }
    }

    // Prefix written before the description of a node reached through this
    // context modifier.
    pub(crate) fn write_context_to(&self, writer: &mut MessageWriter) {
        match self {
            Constraint::Property { name, .. } => writer.write_predicate(&format!("property {name}")),
            Constraint::Attribute { name, .. } => writer.write_predicate(&format!("attribute {name}")),
            Constraint::ThrowsMatching(_) => writer.write_predicate("fault"),
            _ => {}
        }
    }

    /// Renders the description with default options.
    pub fn describe(&self) -> String {
        let mut writer = MessageWriter::default();
        self.write_description_to(&mut writer);
        writer.into_string()
    }

    /// Installs `amount` as the tolerance of every equality node that has
    /// none. It only takes effect when a float is compared.
    pub fn apply_default_tolerance(&mut self, amount: f64) {
        match self {
            Constraint::Equal { tolerance, .. } => {
                if tolerance.is_none() {
                    *tolerance = Some(Tolerance::fallback(amount));
                }
            }
            Constraint::Not(inner)
            | Constraint::Items { inner, .. }
            | Constraint::Property { inner, .. }
            | Constraint::Attribute { inner, .. }
            | Constraint::ThrowsMatching(inner) => inner.apply_default_tolerance(amount),
            Constraint::And(left, right) | Constraint::Or(left, right) => {
                left.apply_default_tolerance(amount);
                right.apply_default_tolerance(amount);
            }
            _ => {}
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Constraint::Not(inner)
            | Constraint::Items { inner, .. }
            | Constraint::Property { inner, .. }
            | Constraint::Attribute { inner, .. }
            | Constraint::ThrowsMatching(inner) => 1 + inner.node_count(),
            Constraint::And(left, right) | Constraint::Or(left, right) => {
                1 + left.node_count() + right.node_count()
            }
            _ => 1,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn text_matches(actual: &str, expected: &str, position: TextPosition, ignore_case: bool) -> bool {
    let (actual, expected) = if ignore_case {
        (actual.to_lowercase(), expected.to_lowercase())
    } else {
        (actual.to_string(), expected.to_string())
    };
    match position {
        TextPosition::Anywhere => actual.contains(&expected),
        TextPosition::Start => actual.starts_with(&expected),
        TextPosition::End => actual.ends_with(&expected),
    }
}
