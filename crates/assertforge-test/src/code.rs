//! Code value fixtures for the throws constraints.

use assertforge_core::{Code, Fault, Value};
use thiserror::Error;

/// Error raised by the ledger fixture.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: i64, requested: i64 },

    #[error("account {0} is frozen")]
    Frozen(String),
}

/// Withdraws from a balance, failing when it would go negative.
pub fn withdraw(balance: i64, requested: i64) -> Result<i64, LedgerError> {
    if requested > balance {
        return Err(LedgerError::InsufficientFunds { balance, requested });
    }
    Ok(balance - requested)
}

/// Code that completes normally.
pub fn succeeding() -> Value {
    Value::Code(Code::new(|| Ok(())))
}

/// Code that returns a `LedgerError` as a fault of kind `LedgerError`.
pub fn returning_error() -> Value {
    Value::code(|| {
        withdraw(10, 25).map_err(|e| Fault::from_error(&e))?;
        Ok(())
    })
}

/// Code that withdraws from a frozen account.
pub fn withdrawing_from_frozen(account: &'static str) -> Value {
    Value::code(move || Err(Fault::from_error(&LedgerError::Frozen(account.to_string()))))
}

/// Code that panics with `message`.
pub fn panicking(message: &'static str) -> Value {
    Value::code(move || panic!("{message}"))
}
