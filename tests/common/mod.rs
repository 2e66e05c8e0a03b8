use prorata::ledger::{PayeeId, ShareLedger};
use prorata::recipient::{Recipient, Wallet};
use prorata::splitter::PaymentSplitter;
use prorata::treasury::Treasury;
use std::collections::HashMap;
use std::rc::Rc;

pub struct Setup {
    pub splitter: PaymentSplitter,
    pub treasury: Treasury,
    pub wallets: HashMap<PayeeId, Rc<Wallet>>,
}

/// Builds a splitter whose payees all accept transfers into wallets.
pub fn wallet_splitter(weights: &[(&str, u128)], funding: u128) -> Setup {
    let ledger = ShareLedger::from_pairs(weights.iter().map(|&(p, w)| (p, w))).unwrap();
    let treasury = Treasury::with_balance(funding);

    let mut wallets = HashMap::new();
    let mut recipients: HashMap<PayeeId, Rc<dyn Recipient>> = HashMap::new();
    for &(p, _) in weights {
        let wallet = Rc::new(Wallet::new());
        wallets.insert(PayeeId::new(p), Rc::clone(&wallet));
        recipients.insert(PayeeId::new(p), wallet);
    }

    let splitter = PaymentSplitter::new(ledger, treasury.clone(), recipients).unwrap();
    Setup {
        splitter,
        treasury,
        wallets,
    }
}

pub fn id(s: &str) -> PayeeId {
    PayeeId::new(s)
}
