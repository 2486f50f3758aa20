//! Precedence-driven reduction of a token stream into one constraint.
//!
//! The machine keeps an operand stack of constraints and an operator stack.
//! Terminals are pushed as operands. An arriving operator first reduces every
//! stacked operator whose right precedence is at least its own left
//! precedence, then waits on the stack together with the kind of token that
//! follows it. A self-resolving operator followed by an infix operator or by
//! nothing is reduced on arrival instead of waiting. After the last token the
//! operator stack is drained. Exactly one operand must remain.
//!
//! Equal precedences reduce the leftmost operator first, so `a and b and c`
//! groups as `(a and b) and c`.

use tracing::{debug, trace};

use crate::constraint::Constraint;
use crate::error::BuildError;
use crate::token::{Operator, RightContext, Token};

/// Operand stack used during reduction.
#[derive(Debug, Default)]
pub struct ConstraintStack {
    items: Vec<Constraint>,
}

impl ConstraintStack {
    pub fn push(&mut self, constraint: Constraint) {
        self.items.push(constraint);
    }

    /// Pops the top operand on behalf of `operator`.
    pub fn pop(&mut self, operator: &'static str) -> Result<Constraint, BuildError> {
        self.items
            .pop()
            .ok_or(BuildError::OperandUnderflow { operator })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_single(mut self) -> Result<Constraint, BuildError> {
        match self.items.len() {
            1 => self.items.pop().ok_or(BuildError::Unreduced { operands: 0 }),
            operands => Err(BuildError::Unreduced { operands }),
        }
    }
}

struct PendingOperator {
    operator: Operator,
    right: RightContext,
}

impl PendingOperator {
    fn reduce(self, operands: &mut ConstraintStack) -> Result<(), BuildError> {
        trace!(event = "reduce", operator = %self.operator, operands = operands.len());
        self.operator.reduce(self.right, operands)
    }
}

/// Reduces a token stream to its root constraint.
///
/// The stream is consumed. Identical streams always produce structurally
/// equal trees.
pub fn resolve(tokens: Vec<Token>) -> Result<Constraint, BuildError> {
    if tokens.is_empty() {
        return Err(BuildError::EmptyExpression);
    }
    let token_count = tokens.len();

    let mut operands = ConstraintStack::default();
    let mut operators: Vec<PendingOperator> = Vec::new();

    let mut stream = tokens.into_iter().peekable();
    while let Some(token) = stream.next() {
        match token.into_operator() {
            Err(terminal) => operands.push(terminal),
            Ok(operator) => {
                let arriving = operator.precedence();
                while operators
                    .last()
                    .is_some_and(|top| top.operator.precedence().right >= arriving.left)
                {
                    if let Some(top) = operators.pop() {
                        top.reduce(&mut operands)?;
                    }
                }
                let right = RightContext::of(stream.peek());
                let pending = PendingOperator { operator, right };
                if pending.operator.stands_alone(right) {
                    pending.reduce(&mut operands)?;
                } else {
                    operators.push(pending);
                }
            }
        }
    }

    while let Some(top) = operators.pop() {
        top.reduce(&mut operands)?;
    }

    let root = operands.into_single()?;
    debug!(event = "resolve", tokens = token_count, nodes = root.node_count());
    Ok(root)
}
