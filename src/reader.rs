use crate::error::{Result, SplitterError};
use crate::ledger::PayeeId;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

/// Operations a scenario file can request.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Declare a payee with a weight and a recipient behavior. Only valid
    /// before the first release (parties are fixed at construction).
    Payee,
    /// Unsolicited inflow into the treasury.
    Fund,
    /// Pull payment for a payee.
    Release,
}

/// How a scenario payee reacts to incoming transfers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Behavior {
    /// Accepts everything.
    Accept,
    /// Refuses every transfer.
    Reject,
    /// Accepts, then forwards this many units back into the treasury.
    Forward(u128),
}

impl FromStr for Behavior {
    type Err = SplitterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            _ => match s.strip_prefix("forward:") {
                Some(n) => n
                    .parse()
                    .map(Self::Forward)
                    .map_err(|_| SplitterError::Scenario(format!("bad forward amount: {n}"))),
                None => Err(SplitterError::Scenario(format!("unknown behavior: {s}"))),
            },
        }
    }
}

fn deserialize_behavior<'de, D>(deserializer: D) -> std::result::Result<Option<Behavior>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One row of a scenario file: `op,payee,value,behavior`.
///
/// `value` is a weight for `payee` rows and an amount for `fund` rows.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ScenarioRow {
    pub op: Op,
    pub payee: Option<PayeeId>,
    pub value: Option<u128>,
    #[serde(default, deserialize_with = "deserialize_behavior")]
    pub behavior: Option<Behavior>,
}

/// Reads scenario rows from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// yielding rows lazily so large scenarios stream.
pub struct ScenarioReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScenarioReader<R> {
    /// Creates a new `ScenarioReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes rows.
    pub fn rows(self) -> impl Iterator<Item = Result<ScenarioRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(SplitterError::from))
    }
}
