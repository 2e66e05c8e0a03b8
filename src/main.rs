use clap::Parser;
use miette::{IntoDiagnostic, Result};
use prorata::error::SplitterError;
use prorata::ledger::{PayeeId, ShareLedger};
use prorata::reader::{Behavior, Op, ScenarioReader, ScenarioRow};
use prorata::recipient::{ForwardingRecipient, Recipient, RejectingRecipient, Wallet};
use prorata::splitter::PaymentSplitter;
use prorata::treasury::Treasury;
use prorata::writer::ReportWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input scenario CSV file (`op,payee,value,behavior`)
    scenario: PathBuf,

    /// Print released-payment events as JSON lines after the report
    #[arg(long)]
    events: bool,
}

/// Drives one scenario: payee declarations accumulate until the first
/// release, at which point the splitter is built and the party set is fixed.
struct ScenarioRunner {
    treasury: Treasury,
    pending: Vec<(PayeeId, u128, Rc<dyn Recipient>)>,
    splitter: Option<PaymentSplitter>,
}

impl ScenarioRunner {
    fn new() -> Self {
        Self {
            treasury: Treasury::new(),
            pending: Vec::new(),
            splitter: None,
        }
    }

    fn apply(&mut self, row: ScenarioRow) -> prorata::error::Result<()> {
        match row.op {
            Op::Payee => {
                if self.splitter.is_some() {
                    return Err(SplitterError::Scenario(
                        "payee declared after first release; parties are fixed at construction"
                            .into(),
                    ));
                }
                let payee = row
                    .payee
                    .ok_or_else(|| SplitterError::Scenario("payee row without identity".into()))?;
                let weight = row
                    .value
                    .ok_or_else(|| SplitterError::Scenario("payee row without weight".into()))?;
                let recipient: Rc<dyn Recipient> =
                    match row.behavior.unwrap_or(Behavior::Accept) {
                        Behavior::Accept => Rc::new(Wallet::new()),
                        Behavior::Reject => Rc::new(RejectingRecipient),
                        Behavior::Forward(n) => {
                            Rc::new(ForwardingRecipient::new(self.treasury.clone(), n))
                        }
                    };
                self.pending.push((payee, weight, recipient));
                Ok(())
            }
            Op::Fund => {
                let amount = row
                    .value
                    .ok_or_else(|| SplitterError::Scenario("fund row without amount".into()))?;
                self.treasury.deposit(amount);
                Ok(())
            }
            Op::Release => {
                let payee = row.payee.ok_or_else(|| {
                    SplitterError::Scenario("release row without identity".into())
                })?;
                self.splitter()?.release(&payee)
            }
        }
    }

    fn splitter(&mut self) -> prorata::error::Result<&PaymentSplitter> {
        if self.splitter.is_none() {
            let ledger =
                ShareLedger::from_pairs(self.pending.iter().map(|(p, w, _)| (p.clone(), *w)))?;
            let pending = std::mem::take(&mut self.pending);
            let recipients = pending.into_iter().map(|(p, _, r)| (p, r)).collect();
            self.splitter = Some(PaymentSplitter::new(
                ledger,
                self.treasury.clone(),
                recipients,
            )?);
        }
        self.splitter
            .as_ref()
            .ok_or_else(|| SplitterError::Scenario("no payees declared".into()))
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();

    let file = File::open(&cli.scenario).into_diagnostic()?;
    let mut runner = ScenarioRunner::new();
    for row_result in ScenarioReader::new(file).rows() {
        match row_result {
            Ok(row) => {
                if let Err(e) = runner.apply(row) {
                    eprintln!("Error processing operation: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading scenario row: {}", e);
            }
        }
    }

    // Scenarios without a release still get a report of the constructed state.
    let splitter = runner.splitter().into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(splitter).into_diagnostic()?;

    if cli.events {
        for event in splitter.events() {
            println!("{}", serde_json::to_string(&event).into_diagnostic()?);
        }
    }

    Ok(())
}
