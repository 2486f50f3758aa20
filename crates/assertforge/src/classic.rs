//! Classic assertions.
//!
//! Shorthand for common checks, each a single `that` call with a fixed
//! constraint. Arguments follow the `(expected, actual)` order.

use std::sync::{Arc, Mutex, PoisonError};

use assertforge_core::{that, Actual, Code, Fault, Has, Is, Result, Throws, Value};

pub fn are_equal(expected: impl Into<Value>, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::equal_to(expected))
}

/// Equality within `delta`. A NaN or infinite `expected` ignores the delta.
pub fn are_equal_within(expected: f64, actual: f64, delta: f64) -> Result<()> {
    that(actual, Is::equal_to(expected).within(delta))
}

pub fn are_not_equal(expected: impl Into<Value>, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().equal_to(expected))
}

pub fn are_same(expected: impl Into<Value>, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::same_as(expected))
}

pub fn are_not_same(expected: impl Into<Value>, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().same_as(expected))
}

pub fn is_true(condition: bool) -> Result<()> {
    that(condition, Is::true_())
}

pub fn is_false(condition: bool) -> Result<()> {
    that(condition, Is::false_())
}

pub fn is_null(actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::null())
}

pub fn is_not_null(actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().null())
}

pub fn is_nan(actual: f64) -> Result<()> {
    that(actual, Is::nan())
}

/// Empty string or empty list.
pub fn is_empty(actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::empty())
}

pub fn is_not_empty(actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().empty())
}

pub fn is_null_or_empty(actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::null().or().empty())
}

pub fn is_not_null_or_empty(actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().null().and().not().empty())
}

/// The collection holds an item equal to `expected`.
pub fn contains(expected: impl Into<Value>, collection: impl Into<Actual>) -> Result<()> {
    that(collection, Has::member(expected))
}

/// `first > second`.
pub fn greater(first: impl Into<Actual>, second: impl Into<Value>) -> Result<()> {
    that(first, Is::greater_than(second))
}

pub fn greater_or_equal(first: impl Into<Actual>, second: impl Into<Value>) -> Result<()> {
    that(first, Is::greater_than_or_equal_to(second))
}

/// `first < second`.
pub fn less(first: impl Into<Actual>, second: impl Into<Value>) -> Result<()> {
    that(first, Is::less_than(second))
}

pub fn less_or_equal(first: impl Into<Actual>, second: impl Into<Value>) -> Result<()> {
    that(first, Is::less_than_or_equal_to(second))
}

pub fn is_instance_of(type_name: &str, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::instance_of(type_name))
}

pub fn is_not_instance_of(type_name: &str, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().instance_of(type_name))
}

/// `actual`'s type accepts values of `type_name`.
pub fn is_assignable_from(type_name: &str, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::assignable_from(type_name))
}

pub fn is_not_assignable_from(type_name: &str, actual: impl Into<Actual>) -> Result<()> {
    that(actual, Is::not().assignable_from(type_name))
}

pub fn does_not_throw(code: impl Fn() -> std::result::Result<(), Fault> + Send + Sync + 'static) -> Result<()> {
    that(Code::new(code), Throws::nothing())
}

/// Asserts that `code` raises a fault of `kind` and returns that fault.
pub fn throws(
    kind: &str,
    code: impl Fn() -> std::result::Result<(), Fault> + Send + Sync + 'static,
) -> Result<Fault> {
    let inner = Code::new(code);
    let raised: Arc<Mutex<Option<Fault>>> = Arc::default();
    let slot = Arc::clone(&raised);
    let recording = Code::new(move || match inner.run() {
        Some(fault) => {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(fault.clone());
            Err(fault)
        }
        None => Ok(()),
    });

    that(recording, Throws::kind(kind))?;

    let recorded = raised.lock().unwrap_or_else(PoisonError::into_inner).take();
    Ok(recorded.unwrap_or_else(|| Fault::new(kind, "")))
}
