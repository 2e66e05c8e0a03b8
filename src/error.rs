use crate::ledger::PayeeId;
use thiserror::Error;

/// Failure taxonomy for the splitter.
///
/// Every variant aborts the triggering call with zero partial effect; nothing
/// is retried or recovered internally.
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Invalid construction parameters; the ledger is never created.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The pro-rata multiplication (or the balance/released sum) exceeded
    /// the `u128` width. Surfaced instead of wrapping or truncating.
    #[error("pro-rata arithmetic overflow")]
    ArithmeticOverflow,
    /// Release requested for a party with zero registered weight.
    #[error("unknown payee: {0}")]
    UnknownPayee(PayeeId),
    /// The computed releasable amount is zero.
    #[error("nothing due for payee: {0}")]
    NothingDue(PayeeId),
    /// The recipient rejected the transfer; balance and bookkeeping are
    /// unchanged.
    #[error("transfer of {amount} units to {payee} failed")]
    TransferFailed { payee: PayeeId, amount: u128 },
    /// A payee's released counter exceeds its entitlement. This cannot
    /// happen under correct bookkeeping; it is surfaced loudly rather than
    /// underflowing.
    #[error("bookkeeping corrupted: released for {0} exceeds entitlement")]
    Corrupted(PayeeId),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid scenario file content or sequencing.
    #[error("invalid scenario: {0}")]
    Scenario(String),
}

pub type Result<T> = std::result::Result<T, SplitterError>;
