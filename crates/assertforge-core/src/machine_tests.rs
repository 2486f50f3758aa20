//! Tests for token stream reduction.

use crate::constraint::{Constraint, Quantifier, TextPosition};
use crate::error::BuildError;
use crate::machine::resolve;
use crate::test_utils::resolved;
use crate::token::{InfixOperator, PrefixOperator, SelfResolvingOperator, Token};
use crate::{Has, Is, Throws};

fn t(c: Constraint) -> Token {
    Token::Terminal(c)
}

fn and() -> Token {
    Token::Infix(InfixOperator::And)
}

fn or() -> Token {
    Token::Infix(InfixOperator::Or)
}

#[test]
fn test_and_chain_is_left_associative() {
    let (a, b, c) = (Constraint::Null, Constraint::True, Constraint::Empty);
    let tree = resolve(vec![t(a.clone()), and(), t(b.clone()), and(), t(c.clone())]).unwrap();
    assert_eq!(tree, Constraint::and(Constraint::and(a, b), c));
}

#[test]
fn test_or_chain_is_left_associative() {
    let (a, b, c) = (Constraint::equal(1), Constraint::equal(2), Constraint::equal(3));
    let tree = resolve(vec![t(a.clone()), or(), t(b.clone()), or(), t(c.clone())]).unwrap();
    assert_eq!(tree, Constraint::or(Constraint::or(a, b), c));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let (a, b, c) = (Constraint::Null, Constraint::True, Constraint::False);

    let tree = resolve(vec![t(a.clone()), or(), t(b.clone()), and(), t(c.clone())]).unwrap();
    assert_eq!(tree, Constraint::or(a.clone(), Constraint::and(b.clone(), c.clone())));

    let tree = resolve(vec![t(a.clone()), and(), t(b.clone()), or(), t(c.clone())]).unwrap();
    assert_eq!(tree, Constraint::or(Constraint::and(a, b), c));
}

#[test]
fn test_not_binds_to_next_operand() {
    let tree = resolved(Is::not().null().and().greater_than(3));
    assert_eq!(
        tree,
        Constraint::and(Constraint::not(Constraint::Null), Constraint::greater_than(3))
    );

    let tree = resolved(Is::not().not().null());
    assert_eq!(tree, Constraint::not(Constraint::not(Constraint::Null)));
}

#[test]
fn test_quantifier_captures_trailing_chain() {
    let tree = resolved(Is::all().greater_than(1).and().less_than(9));
    assert_eq!(
        tree,
        Constraint::items(
            Quantifier::All,
            Constraint::and(Constraint::greater_than(1), Constraint::less_than(9))
        )
    );
}

#[test]
fn test_property_wraps_following_operand() {
    let tree = resolved(Has::length().greater_than(3));
    assert_eq!(tree, Constraint::property("length", Constraint::greater_than(3)));

    let tree = resolved(Has::property("name").not().null());
    assert_eq!(tree, Constraint::property("name", Constraint::not(Constraint::Null)));

    let tree = resolved(Has::property("name").null().and().true_());
    assert_eq!(
        tree,
        Constraint::and(Constraint::property("name", Constraint::Null), Constraint::True)
    );
}

#[test]
fn test_self_resolving_degrades_to_existence() {
    assert_eq!(
        resolved(Has::property("name")),
        Constraint::PropertyExists("name".into())
    );
    assert_eq!(
        resolved(Has::attribute("Serializable")),
        Constraint::AttributeExists("Serializable".into())
    );
    assert_eq!(resolved(Throws::fault()), Constraint::Throws);

    let tree = resolved(Has::property("name").and().property("price"));
    assert_eq!(
        tree,
        Constraint::and(
            Constraint::PropertyExists("name".into()),
            Constraint::PropertyExists("price".into())
        )
    );
}

#[test]
fn test_degraded_throws_combines_with_infix() {
    assert_eq!(
        resolved(Throws::fault().and().nothing()),
        Constraint::and(Constraint::Throws, Constraint::ThrowsNothing)
    );
    assert_eq!(
        resolved(Throws::fault().or().nothing()),
        Constraint::or(Constraint::Throws, Constraint::ThrowsNothing)
    );
    assert_eq!(
        resolved(Is::not().null().or().throws()),
        Constraint::or(Constraint::not(Constraint::Null), Constraint::Throws)
    );

    let tree = resolve(vec![
        Token::SelfResolving(SelfResolvingOperator::Throws),
        or(),
        Token::SelfResolving(SelfResolvingOperator::Attribute("Obsolete".into())),
        and(),
        t(Constraint::Null),
    ])
    .unwrap();
    assert_eq!(
        tree,
        Constraint::or(
            Constraint::Throws,
            Constraint::and(Constraint::AttributeExists("Obsolete".into()), Constraint::Null)
        )
    );
}

#[test]
fn test_throws_captures_whole_chain() {
    let tree = resolved(
        Throws::kind("io")
            .and()
            .property("message")
            .containing("disk"),
    );
    assert_eq!(
        tree,
        Constraint::ThrowsMatching(Box::new(Constraint::and(
            Constraint::InstanceOf("io".into()),
            Constraint::property("message", Constraint::text("disk", TextPosition::Anywhere)),
        )))
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let tokens = vec![
        Token::Prefix(PrefixOperator::Not),
        t(Constraint::Null),
        and(),
        Token::SelfResolving(SelfResolvingOperator::Property("length".into())),
        t(Constraint::greater_than(2)),
        or(),
        t(Constraint::Empty),
    ];
    let first = resolve(tokens.clone()).unwrap();
    let second = resolve(tokens).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.node_count(), 7);
}

#[test]
fn test_malformed_streams() {
    assert_eq!(resolve(Vec::new()), Err(BuildError::EmptyExpression));
    assert_eq!(
        resolve(vec![and()]),
        Err(BuildError::OperandUnderflow { operator: "and" })
    );
    assert_eq!(
        resolve(vec![Token::Prefix(PrefixOperator::Not)]),
        Err(BuildError::OperandUnderflow { operator: "not" })
    );
    assert_eq!(
        resolve(vec![t(Constraint::Null), t(Constraint::True)]),
        Err(BuildError::Unreduced { operands: 2 })
    );
}
