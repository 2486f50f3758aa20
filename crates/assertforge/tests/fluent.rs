//! End-to-end tests of fluent assertions against host objects.

use assertforge::prelude::*;
use assertforge::{AssertConfig, BuildError, Settings, Asserter};
use assertforge_test::{
    panicking, returning_error, succeeding, withdrawing_from_frozen, Employee, Manager,
};

fn ada() -> Employee {
    Employee::new("Ada", 36)
        .with_email("ada@example.com")
        .with_skill("rust")
        .with_skill("sql")
}

#[test]
fn test_ordering_chain() {
    assert!(that(5, Is::greater_than(3).and().less_than(10)).is_ok());

    let err = that(15, Is::greater_than(3).and().less_than(10)).unwrap_err();
    assert!(err.is_failure());
    assert_eq!(err.message(), "  Expected: less than 10\n  But was:  15\n");
}

#[test]
fn test_properties_of_host_objects() {
    let ada = ada().into_value();

    that(ada.clone(), Has::property("name").equal_to("ada").ignore_case()).unwrap();
    that(ada.clone(), Has::property("age").at_least(18).and().property("age").less_than(67)).unwrap();
    that(ada.clone(), Has::property("email").ending_with("@example.com")).unwrap();
    that(ada.clone(), Has::property("skills").member("rust")).unwrap();
    that(ada.clone(), Has::property("skills").count().equal_to(2)).unwrap();
    that(ada.clone(), Has::property("badge").or().property("email")).unwrap();

    let err = that(ada, Has::property("age").greater_than(40)).unwrap_err();
    assert_eq!(
        err.message(),
        "  Expected: property age greater than 40\n  But was:  36\n"
    );
}

#[test]
fn test_missing_property() {
    let bob = Employee::new("Bob", 29).into_value();

    that(bob.clone(), Has::property("email").null()).unwrap();
    let err = that(bob, Has::property("salary")).unwrap_err();
    assert_eq!(err.message(), "  Expected: property salary\n  But was:  <Employee Bob>\n");
}

#[test]
fn test_attributes_and_types() {
    let boss = Manager::new(ada()).with_report(Employee::new("Bob", 29)).into_value();

    that(boss.clone(), Is::instance_of("Employee")).unwrap();
    that(boss.clone(), Is::type_of("Manager")).unwrap();
    assert!(that(boss.clone(), Is::type_of("Employee")).is_err());
    that(boss.clone(), Has::attribute("Table").equal_to("employees")).unwrap();
    that(boss.clone(), Has::no().attribute("Obsolete")).unwrap();
    that(
        boss,
        Has::property("reports").all().property("age").less_than(30),
    )
    .unwrap();
}

#[test]
fn test_collection_quantifiers() {
    that(vec![3, 5, 7], Is::all().greater_than(2).and().less_than(8)).unwrap();
    that(vec![3, 5, 7], Has::some().equal_to(5)).unwrap();
    that(vec![3, 5, 7], Has::none().equal_to(4)).unwrap();
    that(vec!["a", "b"], Has::member("b").and().not().empty()).unwrap();

    let err = that(vec![1, 2, 3], Is::empty()).unwrap_err();
    assert_eq!(
        err.message(),
        "  Expected: <empty>\n  But was:  < 1, 2, 3 > (3 elements)\n"
    );
}

#[test]
fn test_throws() {
    that(returning_error(), Throws::kind("LedgerError")).unwrap();
    that(
        returning_error(),
        Throws::fault().property("message").starting_with("insufficient funds"),
    )
    .unwrap();
    that(panicking("index out of range"), Throws::kind("panic")).unwrap();
    that(
        withdrawing_from_frozen("acme"),
        Throws::kind("LedgerError")
            .and()
            .property("message")
            .equal_to("account acme is frozen"),
    )
    .unwrap();
    that(succeeding(), Throws::nothing()).unwrap();
    that(returning_error(), Throws::fault().or().nothing()).unwrap();
    that(succeeding(), Throws::fault().or().nothing()).unwrap();
    assert!(that(returning_error(), Throws::fault().and().nothing()).unwrap_err().is_failure());

    let err = that(succeeding(), Throws::fault()).unwrap_err();
    assert_eq!(err.message(), "  Expected: a fault\n  But was:  no fault\n");

    let err = that(returning_error(), Throws::nothing()).unwrap_err();
    assert!(err.message().contains("<LedgerError: insufficient funds"));
}

#[test]
fn test_floating_point_equality() {
    that(f64::NAN, Is::equal_to(f64::NAN).within(0.0)).unwrap();
    that(f64::INFINITY, Is::equal_to(f64::INFINITY).within(0.0)).unwrap();
    assert!(that(1e308, Is::equal_to(f64::INFINITY).within(1e300)).is_err());
    that(10.4, Is::equal_to(10.0).within(5.0).percent()).unwrap();
}

#[test]
fn test_large_integer_equality() {
    let big = 9_007_199_254_740_992i64;
    assert!(that(big + 1, Is::equal_to(big).within(0.5)).is_err());
    that(big + 1, Is::equal_to(big).within(1.0)).unwrap();
}

#[test]
fn test_lazy_actual() {
    that(assertforge::Actual::lazy(|| "computed".len()), Is::equal_to(8)).unwrap();
}

#[test]
fn test_malformed_expression() {
    let err = that(1, Is::equal_to(1).within(0.1).within(0.2)).unwrap_err();
    assert!(!err.is_failure());
    assert!(matches!(
        err,
        AssertError::BuilderMalformed(BuildError::IllegalStep { .. })
    ));
}

#[test]
fn test_config_driven_asserter() {
    let config = AssertConfig::from_toml_str(
        r#"
        default_tolerance = 1e-9

        [render]
        max_items = 2
        "#,
    )
    .unwrap();
    let asserter: Asserter = config.asserter();

    asserter.that(0.1 + 0.2, Is::equal_to(0.3)).unwrap();
    let err = asserter.that(vec![1, 2, 3], Is::empty()).unwrap_err();
    assert_eq!(
        err.message(),
        "  Expected: <empty>\n  But was:  < 1, 2, ... > (3 elements)\n"
    );
    assert_eq!(Asserter::default().settings(), &Settings::default());
}

#[test]
fn test_messages_and_signals() {
    let err = that_with(
        "draft",
        Is::equal_to("published"),
        Message::new("post {0} has wrong status").with_arg(42),
    )
    .unwrap_err();
    assert_eq!(
        err.message(),
        "  post 42 has wrong status\n  Expected: \"published\"\n  But was:  \"draft\"\n"
    );

    assert_eq!(ignore("slow"), Err(AssertError::Ignored("slow".to_string())));
    assert_eq!(pass(""), Err(AssertError::PassedEarly(String::new())));
    assert!(fail("boom").unwrap_err().is_failure());
    assert!(matches!(inconclusive("?"), Err(AssertError::Inconclusive(_))));
}
