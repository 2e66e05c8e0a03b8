//! Pure pro-rata computation.
//!
//! Given a snapshot of the aggregate state, computes how much a payee is
//! currently owed. All arithmetic is overflow-checked: the multiplication in
//! the entitlement formula can exceed `u128` for large weights and must
//! surface as an error rather than wrap.

use crate::error::{Result, SplitterError};
use crate::ledger::PayeeId;

/// Unpaid portion of `payee`'s entitlement at this snapshot:
///
/// ```text
/// owed    = floor((balance + total_released) * shares / total_shares)
/// pending = owed - released
/// ```
///
/// Division rounds toward zero; the remainder stays in the balance and is not
/// reconciled across payees. A zero-weight payee owes nothing. A `released`
/// counter above `owed` means the bookkeeping was corrupted and fails loudly
/// instead of underflowing.
pub fn releasable(
    payee: &PayeeId,
    balance: u128,
    total_released: u128,
    shares: u128,
    total_shares: u128,
    released: u128,
) -> Result<u128> {
    if shares == 0 {
        return Ok(0);
    }
    debug_assert!(total_shares > 0, "ledger invariant: total_shares > 0");

    let total_received = balance
        .checked_add(total_released)
        .ok_or(SplitterError::ArithmeticOverflow)?;
    let owed = total_received
        .checked_mul(shares)
        .ok_or(SplitterError::ArithmeticOverflow)?
        / total_shares;

    owed.checked_sub(released)
        .ok_or_else(|| SplitterError::Corrupted(payee.clone()))
}
