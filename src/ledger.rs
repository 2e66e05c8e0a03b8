use crate::error::{Result, SplitterError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// External identity of a party entitled to a share of inflows.
///
/// Identities are opaque non-empty strings; emptiness stands in for the null
/// identity and is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayeeId(String);

impl PayeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_null(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PayeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PayeeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Immutable registry mapping each payee to its integer weight.
///
/// Fixed at construction: no payee can be added, removed, or reweighted
/// afterwards. Registration order is preserved for iteration.
#[derive(Debug, Clone)]
pub struct ShareLedger {
    order: Vec<PayeeId>,
    shares: HashMap<PayeeId, u128>,
    total_shares: u128,
}

impl ShareLedger {
    /// Builds a ledger from two equal-length sequences (array form).
    pub fn new(payees: Vec<PayeeId>, weights: Vec<u128>) -> Result<Self> {
        if payees.len() != weights.len() {
            return Err(SplitterError::Config(format!(
                "{} payees but {} weights",
                payees.len(),
                weights.len()
            )));
        }
        Self::build(payees.into_iter().zip(weights))
    }

    /// Builds a ledger from explicit `(payee, weight)` pairs (fixed-slot
    /// form). Produces the identical runtime contract as [`ShareLedger::new`].
    pub fn from_pairs<I, P>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, u128)>,
        P: Into<PayeeId>,
    {
        Self::build(pairs.into_iter().map(|(p, w)| (p.into(), w)))
    }

    fn build(pairs: impl Iterator<Item = (PayeeId, u128)>) -> Result<Self> {
        let mut order = Vec::new();
        let mut shares = HashMap::new();
        let mut total_shares: u128 = 0;

        for (payee, weight) in pairs {
            if payee.is_null() {
                return Err(SplitterError::Config("empty payee identity".into()));
            }
            if weight == 0 {
                return Err(SplitterError::Config(format!(
                    "payee {payee} has zero weight"
                )));
            }
            if shares.contains_key(&payee) {
                return Err(SplitterError::Config(format!("duplicate payee {payee}")));
            }
            total_shares = total_shares.checked_add(weight).ok_or_else(|| {
                SplitterError::Config("total shares exceed arithmetic width".into())
            })?;
            shares.insert(payee.clone(), weight);
            order.push(payee);
        }

        if order.is_empty() {
            return Err(SplitterError::Config("no payees".into()));
        }

        Ok(Self {
            order,
            shares,
            total_shares,
        })
    }

    /// Weight registered for `payee`, or 0 if it is not registered.
    pub fn shares_of(&self, payee: &PayeeId) -> u128 {
        self.shares.get(payee).copied().unwrap_or(0)
    }

    /// Sum of all registered weights. Constant and strictly positive.
    pub fn total_shares(&self) -> u128 {
        self.total_shares
    }

    /// Registered payees in registration order.
    pub fn payees(&self) -> impl Iterator<Item = &PayeeId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
