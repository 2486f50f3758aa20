//! Fluent expression builder.
//!
//! Each chained call appends one token to the expression. Legal chaining is
//! checked by an explicit state machine: the first illegal step is recorded
//! and reported when the expression is resolved, and the tokens after it are
//! dropped.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::constraint::{Comparison, Constraint, TextPosition, Tolerance, ToleranceMode};
use crate::error::BuildError;
use crate::machine;
use crate::token::{InfixOperator, PrefixOperator, SelfResolvingOperator, Token};
use crate::value::Value;

/// Anything that resolves to a single constraint.
pub trait Resolve {
    fn resolve(self) -> Result<Constraint, BuildError>;
}

impl Resolve for Constraint {
    fn resolve(self) -> Result<Constraint, BuildError> {
        Ok(self)
    }
}

/// Position of the builder in its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    /// After a prefix or infix operator.
    AwaitingOperand,
    /// After a self-resolving operator, which may stand alone.
    Open,
    /// After a terminal that takes no modifiers.
    Complete,
    /// After an equality terminal.
    Equality,
    /// After `within`.
    Tolerance,
    /// After a string terminal.
    Text,
}

/// Kinds of builder calls, as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Terminal,
    Prefix,
    Infix,
    SelfResolving,
    Within,
    Percent,
    IgnoreCase,
    Resolve,
}

impl BuilderState {
    /// Transition table of legal steps.
    pub fn permits(self, step: Step) -> bool {
        use BuilderState::*;
        match (self, step) {
            (Empty | AwaitingOperand | Open, Step::Terminal | Step::Prefix | Step::SelfResolving) => true,
            (Open | Complete | Equality | Tolerance | Text, Step::Infix | Step::Resolve) => true,
            (Equality, Step::Within | Step::IgnoreCase) => true,
            (Tolerance, Step::Percent) => true,
            (Text, Step::IgnoreCase) => true,
            _ => false,
        }
    }

    /// True when the expression can be resolved as it stands.
    pub fn is_resolvable(self) -> bool {
        self.permits(Step::Resolve)
    }

    /// True when the last token completed an operand.
    fn closes_operand(self) -> bool {
        matches!(
            self,
            BuilderState::Complete | BuilderState::Equality | BuilderState::Tolerance | BuilderState::Text
        )
    }
}

impl fmt::Display for BuilderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuilderState::Empty => "at the start of an expression",
            BuilderState::AwaitingOperand => "where an operand is expected",
            BuilderState::Open => "after a self-resolving operator",
            BuilderState::Complete => "after a complete constraint",
            BuilderState::Equality => "after an equality constraint",
            BuilderState::Tolerance => "after a tolerance",
            BuilderState::Text => "after a string constraint",
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Terminal => "constraint",
            Step::Prefix => "prefix operator",
            Step::Infix => "and/or",
            Step::SelfResolving => "self-resolving operator",
            Step::Within => "within",
            Step::Percent => "percent",
            Step::IgnoreCase => "ignore_case",
            Step::Resolve => "resolve",
        })
    }
}

/// An append-only constraint expression under construction.
///
/// # Examples
///
/// ```
/// use assertforge_core::{Is, Resolve, Value};
///
/// let constraint = Is::not().null().and().greater_than(3).resolve().unwrap();
/// assert!(constraint.matches(&Value::from(5)));
/// assert!(!constraint.matches(&Value::Null));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    tokens: Vec<Token>,
    state: BuilderState,
    error: Option<BuildError>,
}

impl Default for Expression {
    fn default() -> Self {
        Self::new()
    }
}

impl Expression {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            state: BuilderState::Empty,
            error: None,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// The first illegal step, if any was taken.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    // Checks `step` against the state machine. On the first illegal step the
    // error is recorded and every later call becomes a no-op.
    fn admit(&mut self, step: Step) -> bool {
        if self.error.is_some() {
            return false;
        }
        if self.state.permits(step) {
            return true;
        }
        warn!(event = "illegal_step", step = %step, state = %self.state, position = self.tokens.len());
        self.error = Some(BuildError::IllegalStep {
            step,
            state: self.state,
            position: self.tokens.len(),
        });
        false
    }

    /// Appends a token of the given step kind and moves to `next`.
    pub fn append(mut self, step: Step, token: Token, next: BuilderState) -> Self {
        if self.admit(step) {
            self.tokens.push(token);
            self.state = next;
        }
        self
    }

    fn terminal(self, constraint: Constraint, next: BuilderState) -> Self {
        self.append(Step::Terminal, Token::Terminal(constraint), next)
    }

    fn prefix(self, op: PrefixOperator) -> Self {
        self.append(Step::Prefix, Token::Prefix(op), BuilderState::AwaitingOperand)
    }

    fn infix(self, op: InfixOperator) -> Self {
        self.append(Step::Infix, Token::Infix(op), BuilderState::AwaitingOperand)
    }

    fn self_resolving(self, op: SelfResolvingOperator) -> Self {
        self.append(Step::SelfResolving, Token::SelfResolving(op), BuilderState::Open)
    }

    // Rewrites the last terminal in place; used by the modifiers.
    fn modify_last(mut self, step: Step, next: BuilderState, edit: impl FnOnce(&mut Constraint)) -> Self {
        if self.admit(step) {
            if let Some(Token::Terminal(constraint)) = self.tokens.last_mut() {
                edit(constraint);
            }
            self.state = next;
        }
        self
    }

    // Terminals

    pub fn null(self) -> Self {
        self.terminal(Constraint::Null, BuilderState::Complete)
    }

    pub fn true_(self) -> Self {
        self.terminal(Constraint::True, BuilderState::Complete)
    }

    pub fn false_(self) -> Self {
        self.terminal(Constraint::False, BuilderState::Complete)
    }

    pub fn nan(self) -> Self {
        self.terminal(Constraint::NaN, BuilderState::Complete)
    }

    pub fn empty(self) -> Self {
        self.terminal(Constraint::Empty, BuilderState::Complete)
    }

    pub fn equal_to(self, expected: impl Into<Value>) -> Self {
        self.terminal(Constraint::equal(expected), BuilderState::Equality)
    }

    pub fn same_as(self, expected: impl Into<Value>) -> Self {
        self.terminal(Constraint::SameAs(expected.into()), BuilderState::Complete)
    }

    fn ordering(self, comparison: Comparison, expected: impl Into<Value>) -> Self {
        self.terminal(Constraint::ordering(comparison, expected), BuilderState::Complete)
    }

    pub fn greater_than(self, expected: impl Into<Value>) -> Self {
        self.ordering(Comparison::GreaterThan, expected)
    }

    pub fn greater_than_or_equal_to(self, expected: impl Into<Value>) -> Self {
        self.ordering(Comparison::GreaterThanOrEqual, expected)
    }

    pub fn less_than(self, expected: impl Into<Value>) -> Self {
        self.ordering(Comparison::LessThan, expected)
    }

    pub fn less_than_or_equal_to(self, expected: impl Into<Value>) -> Self {
        self.ordering(Comparison::LessThanOrEqual, expected)
    }

    pub fn at_least(self, expected: impl Into<Value>) -> Self {
        self.greater_than_or_equal_to(expected)
    }

    pub fn at_most(self, expected: impl Into<Value>) -> Self {
        self.less_than_or_equal_to(expected)
    }

    pub fn instance_of(self, type_name: &str) -> Self {
        self.terminal(Constraint::InstanceOf(Arc::from(type_name)), BuilderState::Complete)
    }

    /// Exact type test.
    pub fn type_of(self, type_name: &str) -> Self {
        self.terminal(Constraint::ExactType(Arc::from(type_name)), BuilderState::Complete)
    }

    pub fn assignable_from(self, type_name: &str) -> Self {
        self.terminal(Constraint::AssignableFrom(Arc::from(type_name)), BuilderState::Complete)
    }

    /// Collection containing an item equal to `expected`.
    pub fn member(self, expected: impl Into<Value>) -> Self {
        self.terminal(Constraint::Contains(expected.into()), BuilderState::Complete)
    }

    pub fn containing(self, text: &str) -> Self {
        self.terminal(Constraint::text(text, TextPosition::Anywhere), BuilderState::Text)
    }

    pub fn starting_with(self, text: &str) -> Self {
        self.terminal(Constraint::text(text, TextPosition::Start), BuilderState::Text)
    }

    pub fn ending_with(self, text: &str) -> Self {
        self.terminal(Constraint::text(text, TextPosition::End), BuilderState::Text)
    }

    /// Code that completes without a fault.
    pub fn nothing(self) -> Self {
        self.terminal(Constraint::ThrowsNothing, BuilderState::Complete)
    }

    // Modifiers

    /// Allows an absolute difference on the preceding equality.
    pub fn within(self, amount: f64) -> Self {
        self.modify_last(Step::Within, BuilderState::Tolerance, |c| {
            if let Constraint::Equal { tolerance, .. } = c {
                *tolerance = Some(Tolerance::linear(amount));
            }
        })
    }

    /// Reads the preceding `within` amount as a percentage of the expected value.
    pub fn percent(self) -> Self {
        self.modify_last(Step::Percent, BuilderState::Complete, |c| {
            if let Constraint::Equal {
                tolerance: Some(t), ..
            } = c
            {
                t.mode = ToleranceMode::Percent;
            }
        })
    }

    pub fn ignore_case(self) -> Self {
        self.modify_last(Step::IgnoreCase, BuilderState::Complete, |c| match c {
            Constraint::Equal { ignore_case, .. } | Constraint::Text { ignore_case, .. } => *ignore_case = true,
            _ => {}
        })
    }

    // Prefix operators

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        self.prefix(PrefixOperator::Not)
    }

    /// Same as `not`, reading better after `Has`.
    pub fn no(self) -> Self {
        self.prefix(PrefixOperator::Not)
    }

    pub fn all(self) -> Self {
        self.prefix(PrefixOperator::All)
    }

    pub fn some(self) -> Self {
        self.prefix(PrefixOperator::Some)
    }

    pub fn none(self) -> Self {
        self.prefix(PrefixOperator::None)
    }

    // Infix operators

    pub fn and(self) -> Self {
        self.infix(InfixOperator::And)
    }

    pub fn or(self) -> Self {
        self.infix(InfixOperator::Or)
    }

    /// Connective: `and` after a complete operand, nothing after an operator.
    pub fn with(self) -> Self {
        if self.state.closes_operand() {
            self.and()
        } else {
            self
        }
    }

    // Self-resolving operators

    pub fn property(self, name: &str) -> Self {
        self.self_resolving(SelfResolvingOperator::Property(Arc::from(name)))
    }

    pub fn length(self) -> Self {
        self.property("length")
    }

    pub fn count(self) -> Self {
        self.property("count")
    }

    pub fn attribute(self, name: &str) -> Self {
        self.self_resolving(SelfResolvingOperator::Attribute(Arc::from(name)))
    }

    pub fn throws(self) -> Self {
        self.self_resolving(SelfResolvingOperator::Throws)
    }
}

impl Resolve for Expression {
    fn resolve(self) -> Result<Constraint, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        match self.state {
            BuilderState::Empty => Err(BuildError::EmptyExpression),
            state if !state.is_resolvable() => Err(BuildError::Incomplete),
            _ => machine::resolve(self.tokens),
        }
    }
}
