//! Entry points of the fluent vocabulary.
//!
//! `Is`, `Has` and `Throws` start a fresh `Expression`; everything after the
//! first call is a method on the expression itself.

use crate::expression::Expression;
use crate::value::Value;

/// Predicates on the actual value itself.
pub struct Is;

impl Is {
    pub fn null() -> Expression {
        Expression::new().null()
    }

    pub fn true_() -> Expression {
        Expression::new().true_()
    }

    pub fn false_() -> Expression {
        Expression::new().false_()
    }

    pub fn nan() -> Expression {
        Expression::new().nan()
    }

    pub fn empty() -> Expression {
        Expression::new().empty()
    }

    pub fn equal_to(expected: impl Into<Value>) -> Expression {
        Expression::new().equal_to(expected)
    }

    pub fn same_as(expected: impl Into<Value>) -> Expression {
        Expression::new().same_as(expected)
    }

    pub fn greater_than(expected: impl Into<Value>) -> Expression {
        Expression::new().greater_than(expected)
    }

    pub fn greater_than_or_equal_to(expected: impl Into<Value>) -> Expression {
        Expression::new().greater_than_or_equal_to(expected)
    }

    pub fn less_than(expected: impl Into<Value>) -> Expression {
        Expression::new().less_than(expected)
    }

    pub fn less_than_or_equal_to(expected: impl Into<Value>) -> Expression {
        Expression::new().less_than_or_equal_to(expected)
    }

    pub fn at_least(expected: impl Into<Value>) -> Expression {
        Expression::new().at_least(expected)
    }

    pub fn at_most(expected: impl Into<Value>) -> Expression {
        Expression::new().at_most(expected)
    }

    pub fn instance_of(type_name: &str) -> Expression {
        Expression::new().instance_of(type_name)
    }

    pub fn type_of(type_name: &str) -> Expression {
        Expression::new().type_of(type_name)
    }

    /// The actual object's type accepts values of `type_name`.
    pub fn assignable_from(type_name: &str) -> Expression {
        Expression::new().assignable_from(type_name)
    }

    pub fn containing(text: &str) -> Expression {
        Expression::new().containing(text)
    }

    pub fn starting_with(text: &str) -> Expression {
        Expression::new().starting_with(text)
    }

    pub fn ending_with(text: &str) -> Expression {
        Expression::new().ending_with(text)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not() -> Expression {
        Expression::new().not()
    }

    pub fn all() -> Expression {
        Expression::new().all()
    }
}

/// Predicates on a part of the actual value: a property, an attribute, an
/// item of a collection.
pub struct Has;

impl Has {
    pub fn property(name: &str) -> Expression {
        Expression::new().property(name)
    }

    pub fn attribute(name: &str) -> Expression {
        Expression::new().attribute(name)
    }

    pub fn length() -> Expression {
        Expression::new().length()
    }

    pub fn count() -> Expression {
        Expression::new().count()
    }

    pub fn member(expected: impl Into<Value>) -> Expression {
        Expression::new().member(expected)
    }

    pub fn no() -> Expression {
        Expression::new().no()
    }

    pub fn all() -> Expression {
        Expression::new().all()
    }

    pub fn some() -> Expression {
        Expression::new().some()
    }

    pub fn none() -> Expression {
        Expression::new().none()
    }
}

/// Predicates on the fault raised by code under test.
pub struct Throws;

impl Throws {
    /// Any fault. Followed by a constraint, tests the fault itself.
    pub fn fault() -> Expression {
        Expression::new().throws()
    }

    /// A fault of the given kind.
    pub fn kind(kind: &str) -> Expression {
        Expression::new().throws().instance_of(kind)
    }

    pub fn nothing() -> Expression {
        Expression::new().nothing()
    }
}
