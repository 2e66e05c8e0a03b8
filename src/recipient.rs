use crate::treasury::Treasury;
use std::cell::Cell;

/// A recipient refused a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected;

/// Capability for paying a payee. Exactly two outcomes: the recipient
/// accepts the units or rejects them.
///
/// The recipient runs arbitrary code during `receive` and may itself push
/// value back into a treasury or re-enter the splitter; the splitter
/// tolerates both by recomputing entitlement from live state on every call.
pub trait Recipient {
    fn receive(&self, amount: u128) -> Result<(), Rejected>;
}

/// Accepts every transfer and records the cumulative amount received.
#[derive(Debug, Default)]
pub struct Wallet {
    received: Cell<u128>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> u128 {
        self.received.get()
    }
}

impl Recipient for Wallet {
    fn receive(&self, amount: u128) -> Result<(), Rejected> {
        self.received.set(self.received.get().saturating_add(amount));
        Ok(())
    }
}

/// Refuses every transfer unconditionally.
#[derive(Debug, Default)]
pub struct RejectingRecipient;

impl Recipient for RejectingRecipient {
    fn receive(&self, _amount: u128) -> Result<(), Rejected> {
        Err(Rejected)
    }
}

/// Accepts, then immediately forwards a fixed number of units back into a
/// treasury from its own reserves.
#[derive(Debug)]
pub struct ForwardingRecipient {
    treasury: Treasury,
    forward: u128,
}

impl ForwardingRecipient {
    pub fn new(treasury: Treasury, forward: u128) -> Self {
        Self { treasury, forward }
    }
}

impl Recipient for ForwardingRecipient {
    fn receive(&self, _amount: u128) -> Result<(), Rejected> {
        self.treasury.deposit(self.forward);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_accumulates() {
        let wallet = Wallet::new();
        assert!(wallet.receive(3).is_ok());
        assert!(wallet.receive(4).is_ok());
        assert_eq!(wallet.received(), 7);
    }

    #[test]
    fn test_rejecting_recipient() {
        assert_eq!(RejectingRecipient.receive(1), Err(Rejected));
    }

    #[test]
    fn test_forwarding_recipient_pushes_back() {
        let treasury = Treasury::with_balance(3);
        let recipient = ForwardingRecipient::new(treasury.clone(), 3);
        assert!(recipient.receive(1).is_ok());
        assert_eq!(treasury.balance(), 6);
    }
}
