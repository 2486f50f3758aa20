//! Tokens of a constraint expression and the operators among them.
//!
//! Precedences are binding powers: a higher number binds tighter. When an
//! operator arrives, every operator on the stack whose right precedence is at
//! least the newcomer's left precedence is reduced first. Operators that take
//! nothing from their left carry `OPEN_LEFT`, so their arrival never forces a
//! reduction.

use std::fmt;
use std::sync::Arc;

use crate::constraint::{Constraint, Quantifier};
use crate::error::BuildError;
use crate::machine::ConstraintStack;

/// Left precedence of operators with no left operand.
pub const OPEN_LEFT: u8 = u8::MAX;

/// Left/right binding power of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precedence {
    pub left: u8,
    pub right: u8,
}

impl Precedence {
    pub const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }
}

/// Operators applied to the single operand on their right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Not,
    /// Every item of a collection.
    All,
    /// At least one item of a collection.
    Some,
    /// No item of a collection.
    None,
}

impl PrefixOperator {
    pub fn precedence(self) -> Precedence {
        match self {
            PrefixOperator::Not => Precedence::new(OPEN_LEFT, 200),
            // Quantifiers capture a trailing and/or chain.
            PrefixOperator::All | PrefixOperator::Some | PrefixOperator::None => {
                Precedence::new(OPEN_LEFT, 10)
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrefixOperator::Not => "not",
            PrefixOperator::All => "all",
            PrefixOperator::Some => "some",
            PrefixOperator::None => "none",
        }
    }

    fn apply(self, operand: Constraint) -> Constraint {
        match self {
            PrefixOperator::Not => Constraint::not(operand),
            PrefixOperator::All => Constraint::items(Quantifier::All, operand),
            PrefixOperator::Some => Constraint::items(Quantifier::Some, operand),
            PrefixOperator::None => Constraint::items(Quantifier::None, operand),
        }
    }
}

/// Binary combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    And,
    Or,
}

impl InfixOperator {
    pub fn precedence(self) -> Precedence {
        match self {
            InfixOperator::And => Precedence::new(40, 40),
            InfixOperator::Or => Precedence::new(30, 30),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InfixOperator::And => "and",
            InfixOperator::Or => "or",
        }
    }

    fn apply(self, left: Constraint, right: Constraint) -> Constraint {
        match self {
            InfixOperator::And => Constraint::and(left, right),
            InfixOperator::Or => Constraint::or(left, right),
        }
    }
}

/// Operators whose reduction depends on the token that follows them.
///
/// Followed by an operand they wrap it; followed by an infix operator or
/// nothing they degrade to an existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfResolvingOperator {
    Property(Arc<str>),
    Attribute(Arc<str>),
    Throws,
}

impl SelfResolvingOperator {
    pub fn precedence(&self) -> Precedence {
        match self {
            SelfResolvingOperator::Property(_) | SelfResolvingOperator::Attribute(_) => {
                Precedence::new(OPEN_LEFT, 200)
            }
            // Throws applies to everything after it, and/or chains included.
            SelfResolvingOperator::Throws => Precedence::new(OPEN_LEFT, 5),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SelfResolvingOperator::Property(_) => "property",
            SelfResolvingOperator::Attribute(_) => "attribute",
            SelfResolvingOperator::Throws => "throws",
        }
    }

    fn stands_alone(right: RightContext) -> bool {
        matches!(right, RightContext::End | RightContext::Infix)
    }
}

/// One unit of a fluent expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Terminal(Constraint),
    Prefix(PrefixOperator),
    Infix(InfixOperator),
    SelfResolving(SelfResolvingOperator),
}

impl Token {
    /// Splits the token into an operand or an operator.
    pub fn into_operator(self) -> Result<Operator, Constraint> {
        match self {
            Token::Terminal(c) => Err(c),
            Token::Prefix(op) => Ok(Operator::Prefix(op)),
            Token::Infix(op) => Ok(Operator::Infix(op)),
            Token::SelfResolving(op) => Ok(Operator::SelfResolving(op)),
        }
    }
}

/// Kind of the token that follows an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightContext {
    End,
    Terminal,
    Prefix,
    Infix,
    SelfResolving,
}

impl RightContext {
    pub fn of(next: Option<&Token>) -> Self {
        match next {
            None => RightContext::End,
            Some(Token::Terminal(_)) => RightContext::Terminal,
            Some(Token::Prefix(_)) => RightContext::Prefix,
            Some(Token::Infix(_)) => RightContext::Infix,
            Some(Token::SelfResolving(_)) => RightContext::SelfResolving,
        }
    }
}

/// An operator waiting on the operator stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Prefix(PrefixOperator),
    Infix(InfixOperator),
    SelfResolving(SelfResolvingOperator),
}

impl Operator {
    pub fn precedence(&self) -> Precedence {
        match self {
            Operator::Prefix(op) => op.precedence(),
            Operator::Infix(op) => op.precedence(),
            Operator::SelfResolving(op) => op.precedence(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Prefix(op) => op.name(),
            Operator::Infix(op) => op.name(),
            Operator::SelfResolving(op) => op.name(),
        }
    }

    /// Whether the operator takes no operand given what follows it. Such an
    /// operator reduces as soon as it arrives.
    pub fn stands_alone(&self, right: RightContext) -> bool {
        matches!(self, Operator::SelfResolving(_)) && SelfResolvingOperator::stands_alone(right)
    }

    /// Pops this operator's operands off the stack and pushes the composite
    /// constraint.
    pub fn reduce(self, right: RightContext, stack: &mut ConstraintStack) -> Result<(), BuildError> {
        let name = self.name();
        match self {
            Operator::Prefix(op) => {
                let operand = stack.pop(name)?;
                stack.push(op.apply(operand));
            }
            Operator::Infix(op) => {
                let rhs = stack.pop(name)?;
                let lhs = stack.pop(name)?;
                stack.push(op.apply(lhs, rhs));
            }
            Operator::SelfResolving(op) => {
                let alone = SelfResolvingOperator::stands_alone(right);
                let reduced = match op {
                    SelfResolvingOperator::Property(key) if alone => Constraint::PropertyExists(key),
                    SelfResolvingOperator::Property(key) => Constraint::Property {
                        name: key,
                        inner: Box::new(stack.pop(name)?),
                    },
                    SelfResolvingOperator::Attribute(key) if alone => Constraint::AttributeExists(key),
                    SelfResolvingOperator::Attribute(key) => Constraint::Attribute {
                        name: key,
                        inner: Box::new(stack.pop(name)?),
                    },
                    SelfResolvingOperator::Throws if alone => Constraint::Throws,
                    SelfResolvingOperator::Throws => {
                        Constraint::ThrowsMatching(Box::new(stack.pop(name)?))
                    }
                };
                stack.push(reduced);
            }
        }
        Ok(())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::SelfResolving(SelfResolvingOperator::Property(key)) => write!(f, "property({key})"),
            Operator::SelfResolving(SelfResolvingOperator::Attribute(key)) => write!(f, "attribute({key})"),
            _ => f.write_str(self.name()),
        }
    }
}
