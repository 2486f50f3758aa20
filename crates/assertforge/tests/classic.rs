//! Tests for the classic assertion helpers.

use assertforge::classic;
use assertforge::{Fault, Value};
use assertforge_test::code::withdraw;
use assertforge_test::{Employee, Manager};

#[test]
fn test_equality() {
    classic::are_equal(4, 2 + 2).unwrap();
    classic::are_equal("abc", "abc").unwrap();
    classic::are_not_equal(4, 5).unwrap();
    assert!(classic::are_equal(4, 5).is_err());

    let err = classic::are_equal(vec![1, 2], vec![1, 3]).unwrap_err();
    assert_eq!(err.message(), "  Expected: < 1, 2 >\n  But was:  < 1, 3 >\n");
}

#[test]
fn test_equal_within() {
    classic::are_equal_within(1.0, 1.05, 0.1).unwrap();
    assert!(classic::are_equal_within(1.0, 1.2, 0.1).is_err());
    classic::are_equal_within(f64::NAN, f64::NAN, 0.0).unwrap();
    classic::are_equal_within(f64::INFINITY, f64::INFINITY, 0.0).unwrap();
    assert!(classic::are_equal_within(f64::INFINITY, 1e308, 1e300).is_err());
}

#[test]
fn test_identity() {
    let ada = Employee::new("Ada", 36).into_value();
    classic::are_same(ada.clone(), ada.clone()).unwrap();
    classic::are_not_same(ada, Employee::new("Ada", 36).into_value()).unwrap();
}

#[test]
fn test_conditions_and_nulls() {
    classic::is_true(1 < 2).unwrap();
    classic::is_false(1 > 2).unwrap();
    classic::is_null(Value::Null).unwrap();
    classic::is_null(None::<&str>).unwrap();
    classic::is_not_null(Some("x")).unwrap();
    classic::is_nan(f64::NAN).unwrap();
    assert!(classic::is_nan(1.0).is_err());
}

#[test]
fn test_emptiness() {
    classic::is_empty("").unwrap();
    classic::is_empty(Vec::<i32>::new()).unwrap();
    classic::is_not_empty(vec![1]).unwrap();
    classic::is_null_or_empty(Value::Null).unwrap();
    classic::is_null_or_empty("").unwrap();
    classic::is_not_null_or_empty("x").unwrap();
    assert!(classic::is_not_null_or_empty(Value::Null).is_err());
    assert!(classic::is_not_null_or_empty("").is_err());
}

#[test]
fn test_containment_and_ordering() {
    classic::contains(2, vec![1, 2, 3]).unwrap();
    assert!(classic::contains(4, vec![1, 2, 3]).is_err());

    classic::greater(5, 3).unwrap();
    classic::greater_or_equal(3, 3).unwrap();
    classic::less(2.5, 3).unwrap();
    classic::less_or_equal("a", "b").unwrap();

    let err = classic::greater(1, 3).unwrap_err();
    assert_eq!(err.message(), "  Expected: greater than 3\n  But was:  1\n");
}

#[test]
fn test_types() {
    let boss = Manager::new(Employee::new("Ada", 36)).into_value();
    classic::is_instance_of("Employee", boss.clone()).unwrap();
    classic::is_not_instance_of("Invoice", boss).unwrap();
    classic::is_instance_of("number", 1.5).unwrap();
}

#[test]
fn test_assignable_from() {
    let ada = Employee::new("Ada", 36).into_value();
    let boss = Manager::new(Employee::new("Ada", 36)).into_value();

    classic::is_assignable_from("Manager", ada.clone()).unwrap();
    classic::is_assignable_from("Employee", ada.clone()).unwrap();
    classic::is_not_assignable_from("Employee", boss.clone()).unwrap();
    classic::is_not_assignable_from("Invoice", ada).unwrap();
    assert!(classic::is_assignable_from("Manager", Value::Null).is_err());

    let err = classic::is_assignable_from("Employee", boss).unwrap_err();
    assert_eq!(
        err.message(),
        "  Expected: assignable from <Employee>\n  But was:  <Manager Ada>\n"
    );
}

#[test]
fn test_throws_returns_fault() {
    let fault = classic::throws("LedgerError", || {
        withdraw(10, 25).map_err(|e| Fault::from_error(&e))?;
        Ok(())
    })
    .unwrap();
    assert_eq!(fault.message(), "insufficient funds: balance 10, requested 25");

    let fault = classic::throws("panic", || panic!("unreachable state")).unwrap();
    assert_eq!(fault.message(), "unreachable state");

    assert!(classic::throws("LedgerError", || Ok(())).is_err());
    assert!(classic::throws("io", || Err(Fault::new("parse", "bad digit"))).is_err());
}

#[test]
fn test_does_not_throw() {
    classic::does_not_throw(|| withdraw(10, 5).map(|_| ()).map_err(|e| Fault::from_error(&e))).unwrap();
    assert!(classic::does_not_throw(|| Err(Fault::new("io", "closed"))).is_err());
}
