//! Tests for the builder state machine.

use crate::constraint::Constraint;
use crate::error::BuildError;
use crate::expression::{BuilderState, Expression, Resolve, Step};
use crate::test_utils::resolved;
use crate::value::Value;
use crate::{Has, Is};

#[test]
fn test_permits_table() {
    use BuilderState::*;

    for state in [Empty, AwaitingOperand, Open] {
        assert!(state.permits(Step::Terminal), "{state:?}");
        assert!(state.permits(Step::Prefix), "{state:?}");
        assert!(state.permits(Step::SelfResolving), "{state:?}");
    }
    for state in [Open, Complete, Equality, Tolerance, Text] {
        assert!(state.permits(Step::Infix), "{state:?}");
        assert!(state.is_resolvable(), "{state:?}");
    }
    assert!(!Empty.is_resolvable());
    assert!(!AwaitingOperand.is_resolvable());
    assert!(!Complete.permits(Step::Terminal));
    assert!(!Complete.permits(Step::Within));
    assert!(Equality.permits(Step::Within));
    assert!(!Equality.permits(Step::Percent));
    assert!(Tolerance.permits(Step::Percent));
    assert!(!Tolerance.permits(Step::Within));
    assert!(Text.permits(Step::IgnoreCase));
    assert!(!Text.permits(Step::Within));
}

#[test]
fn test_states_follow_chain() {
    assert_eq!(Expression::new().state(), BuilderState::Empty);
    assert_eq!(Is::not().state(), BuilderState::AwaitingOperand);
    assert_eq!(Has::length().state(), BuilderState::Open);
    assert_eq!(Is::null().state(), BuilderState::Complete);
    assert_eq!(Is::equal_to(1.0).state(), BuilderState::Equality);
    assert_eq!(Is::equal_to(1.0).within(0.5).state(), BuilderState::Tolerance);
    assert_eq!(Is::equal_to(1.0).within(0.5).percent().state(), BuilderState::Complete);
    assert_eq!(Is::containing("a").state(), BuilderState::Text);
    assert_eq!(Is::containing("a").ignore_case().state(), BuilderState::Complete);
}

#[test]
fn test_illegal_step_is_recorded() {
    let expr = Is::null().within(0.1);
    assert_eq!(
        expr.error(),
        Some(&BuildError::IllegalStep {
            step: Step::Within,
            state: BuilderState::Complete,
            position: 1,
        })
    );

    let expr = Is::null().and().or();
    assert_eq!(
        expr.clone().resolve(),
        Err(BuildError::IllegalStep {
            step: Step::Infix,
            state: BuilderState::AwaitingOperand,
            position: 2,
        })
    );
}

#[test]
fn test_first_error_is_sticky() {
    let expr = Is::null().null().and().true_();
    assert_eq!(expr.tokens().len(), 1);
    assert_eq!(
        expr.resolve(),
        Err(BuildError::IllegalStep {
            step: Step::Terminal,
            state: BuilderState::Complete,
            position: 1,
        })
    );
}

#[test]
fn test_error_messages() {
    let err = Is::equal_to(1).within(0.1).within(0.2).resolve().unwrap_err();
    assert_eq!(err.to_string(), "`within` is not allowed after a tolerance (token 1)");
}

#[test]
fn test_partial_expression_is_rejected() {
    assert_eq!(Expression::new().resolve(), Err(BuildError::EmptyExpression));
    assert_eq!(Is::not().resolve(), Err(BuildError::Incomplete));
    assert_eq!(Is::null().and().resolve(), Err(BuildError::Incomplete));
}

#[test]
fn test_with_is_a_connective() {
    let tree = resolved(Has::property("name").equal_to("pen").with().property("price").less_than(2));
    assert_eq!(
        tree,
        Constraint::and(
            Constraint::property("name", Constraint::equal("pen")),
            Constraint::property("price", Constraint::less_than(2))
        )
    );

    let expr = Is::null().and().with();
    assert_eq!(expr.tokens().len(), 2);
    assert!(expr.error().is_none());
}

#[test]
fn test_modifiers_edit_last_terminal() {
    let c = resolved(Is::equal_to("ABC").ignore_case());
    assert!(c.matches(&Value::from("abc")));

    let c = resolved(Is::equal_to(100.0).within(5.0).percent());
    assert!(c.matches(&Value::Float(104.0)));
    assert!(!c.matches(&Value::Float(106.0)));
    assert_eq!(c.describe(), "100.0 +/- 5%");

    let c = resolved(Is::containing("ELL").ignore_case());
    assert!(c.matches(&Value::from("hello")));

    let c = resolved(Is::not().equal_to(2.0).within(0.5));
    assert!(!c.matches(&Value::Float(2.25)));
    assert!(c.matches(&Value::Float(3.0)));
}

#[test]
fn test_constraint_resolves_to_itself() {
    assert_eq!(Constraint::Null.resolve(), Ok(Constraint::Null));
}
