use std::cell::Cell;
use std::rc::Rc;

/// Cloneable handle to the splitter's balance of atomic value units.
///
/// There is no explicit deposit entry point on the splitter itself: anyone
/// holding a clone of the handle can push value in at any time, and the
/// inflow is visible to the very next `releasable` computation. The balance
/// only decreases through a successful release.
///
/// Single-threaded by design: the hosting environment serializes calls, so a
/// lock here would add nothing and could deadlock a recipient that calls
/// back into the splitter during its own receipt.
#[derive(Debug, Clone, Default)]
pub struct Treasury {
    units: Rc<Cell<u128>>,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the treasury with an initial funding, like value attached at
    /// deployment.
    pub fn with_balance(units: u128) -> Self {
        let treasury = Self::new();
        treasury.deposit(units);
        treasury
    }

    pub fn balance(&self) -> u128 {
        self.units.get()
    }

    /// Unsolicited inflow. Saturates at `u128::MAX`; the total supply of
    /// units is assumed to fit the width.
    pub fn deposit(&self, amount: u128) {
        self.units.set(self.units.get().saturating_add(amount));
    }

    /// Removes `amount` from the balance. Callers stage this before the
    /// external transfer and credit it back if the transfer is rejected.
    pub(crate) fn debit(&self, amount: u128) {
        debug_assert!(amount <= self.units.get(), "debit exceeds balance");
        self.units.set(self.units.get() - amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_visible_through_clones() {
        let treasury = Treasury::new();
        let handle = treasury.clone();
        handle.deposit(7);
        assert_eq!(treasury.balance(), 7);
        treasury.deposit(3);
        assert_eq!(handle.balance(), 10);
    }

    #[test]
    fn test_debit_and_credit_back() {
        let treasury = Treasury::with_balance(10);
        treasury.debit(4);
        assert_eq!(treasury.balance(), 6);
        treasury.deposit(4);
        assert_eq!(treasury.balance(), 10);
    }
}
