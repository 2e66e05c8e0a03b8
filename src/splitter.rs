use crate::accounting;
use crate::error::{Result, SplitterError};
use crate::ledger::{PayeeId, ShareLedger};
use crate::recipient::Recipient;
use crate::treasury::Treasury;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Notification recorded for every successful release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReleased {
    pub payee: PayeeId,
    pub amount: u128,
}

/// The release executor and aggregate bookkeeping state.
///
/// Per-payee `released` counters are the single source of truth;
/// `total_released` is a derived cache kept in lockstep. Both mutate only
/// when a release commits, strictly after the recipient confirmed the
/// transfer.
///
/// Methods take `&self`: the hosting environment serializes calls, and a
/// recipient holding an `Rc<PaymentSplitter>` may legally re-enter `release`
/// from within its own `receive`. No borrow is held across the recipient
/// callback, and entitlement is recomputed from live state on every call, so
/// reentry can only observe pre-commit state and no payee can ever collect
/// more than its fair share. The residual balance after a sequence of
/// releases does depend on call order when recipients push value back.
pub struct PaymentSplitter {
    ledger: ShareLedger,
    treasury: Treasury,
    recipients: HashMap<PayeeId, Rc<dyn Recipient>>,
    released: RefCell<HashMap<PayeeId, u128>>,
    total_released: RefCell<u128>,
    events: RefCell<Vec<PaymentReleased>>,
}

impl PaymentSplitter {
    /// Binds a share ledger to a treasury and one recipient capability per
    /// registered payee.
    pub fn new(
        ledger: ShareLedger,
        treasury: Treasury,
        recipients: HashMap<PayeeId, Rc<dyn Recipient>>,
    ) -> Result<Self> {
        for payee in ledger.payees() {
            if !recipients.contains_key(payee) {
                return Err(SplitterError::Config(format!(
                    "payee {payee} has no recipient"
                )));
            }
        }
        Ok(Self {
            ledger,
            treasury,
            recipients,
            released: RefCell::new(HashMap::new()),
            total_released: RefCell::new(0),
            events: RefCell::new(Vec::new()),
        })
    }

    pub fn ledger(&self) -> &ShareLedger {
        &self.ledger
    }

    pub fn shares_of(&self, payee: &PayeeId) -> u128 {
        self.ledger.shares_of(payee)
    }

    pub fn total_shares(&self) -> u128 {
        self.ledger.total_shares()
    }

    /// Current balance of atomic units held by the splitter.
    pub fn balance(&self) -> u128 {
        self.treasury.balance()
    }

    /// Cumulative amount ever paid to `payee`. Monotonically non-decreasing.
    pub fn released(&self, payee: &PayeeId) -> u128 {
        self.released.borrow().get(payee).copied().unwrap_or(0)
    }

    /// Sum of all payees' released counters.
    pub fn total_released(&self) -> u128 {
        *self.total_released.borrow()
    }

    /// Currently unpaid portion of `payee`'s pro-rata entitlement.
    /// `Ok(0)` for an unregistered payee.
    pub fn releasable(&self, payee: &PayeeId) -> Result<u128> {
        accounting::releasable(
            payee,
            self.treasury.balance(),
            self.total_released(),
            self.ledger.shares_of(payee),
            self.ledger.total_shares(),
            self.released(payee),
        )
    }

    /// Diagnostic sum of `releasable` over all registered payees.
    ///
    /// Not guaranteed to equal the current balance: floor-rounding
    /// remainders stay in the balance and are never attributed to anyone.
    pub fn total_releasable(&self) -> Result<u128> {
        let mut sum: u128 = 0;
        for payee in self.ledger.payees() {
            sum = sum
                .checked_add(self.releasable(payee)?)
                .ok_or(SplitterError::ArithmeticOverflow)?;
        }
        Ok(sum)
    }

    /// Pays `payee` its outstanding pro-rata amount.
    ///
    /// The treasury is debited before the recipient callback runs, so the
    /// callback observes the post-transfer balance; bookkeeping commits only
    /// after the recipient accepted. On any failure nothing is observable
    /// afterwards: the balance and every counter read exactly as before.
    pub fn release(&self, payee: &PayeeId) -> Result<()> {
        let shares = self.ledger.shares_of(payee);
        if shares == 0 {
            return Err(SplitterError::UnknownPayee(payee.clone()));
        }

        let amount = self.releasable(payee)?;
        if amount == 0 {
            return Err(SplitterError::NothingDue(payee.clone()));
        }

        let recipient = self
            .recipients
            .get(payee)
            .cloned()
            .ok_or_else(|| SplitterError::UnknownPayee(payee.clone()))?;

        self.treasury.debit(amount);
        if recipient.receive(amount).is_err() {
            self.treasury.deposit(amount);
            return Err(SplitterError::TransferFailed {
                payee: payee.clone(),
                amount,
            });
        }

        *self
            .released
            .borrow_mut()
            .entry(payee.clone())
            .or_insert(0) += amount;
        *self.total_released.borrow_mut() += amount;
        tracing::info!(payee = %payee, amount, "payment released");
        self.events.borrow_mut().push(PaymentReleased {
            payee: payee.clone(),
            amount,
        });
        Ok(())
    }

    /// Notifications recorded so far, oldest first.
    pub fn events(&self) -> Vec<PaymentReleased> {
        self.events.borrow().clone()
    }

    /// Drains and returns the recorded notifications.
    pub fn take_events(&self) -> Vec<PaymentReleased> {
        self.events.borrow_mut().drain(..).collect()
    }
}
