use crate::error::Result;
use crate::splitter::PaymentSplitter;
use std::io::Write;

/// Writes the final per-payee state as CSV: `payee,shares,released,releasable`.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes one row per registered payee, in registration order.
    pub fn write_report(&mut self, splitter: &PaymentSplitter) -> Result<()> {
        self.writer
            .write_record(["payee", "shares", "released", "releasable"])?;
        for payee in splitter.ledger().payees() {
            self.writer.write_record([
                payee.as_str(),
                &splitter.shares_of(payee).to_string(),
                &splitter.released(payee).to_string(),
                &splitter.releasable(payee)?.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
