use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use siparis_bosch::{reconcile, to_json, write_xlsx, MatchPolicy};
use siparis_xlsx::read_sheet;
use tracing::info;

#[derive(Debug, Args)]
pub struct BoschArgs {
    /// Supplier balance report.
    #[arg(long)]
    pub balance: PathBuf,
    /// Inbound deliveries file.
    #[arg(long)]
    pub inbound: PathBuf,
    /// Open order-lines export.
    #[arg(long)]
    pub order_lines: PathBuf,
    /// Use the legacy first-match join instead of quantity reconciliation.
    #[arg(long)]
    pub first_match: bool,
    /// Output workbook path.
    #[arg(long, default_value = "bosch_verileri.xlsx")]
    pub output: PathBuf,
    /// Also write the records as pretty-printed JSON to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn run(args: &BoschArgs) -> anyhow::Result<()> {
    let balance = read_sheet(&args.balance)
        .with_context(|| format!("reading {}", args.balance.display()))?;
    let inbound = read_sheet(&args.inbound)
        .with_context(|| format!("reading {}", args.inbound.display()))?;
    let order_lines = read_sheet(&args.order_lines)
        .with_context(|| format!("reading {}", args.order_lines.display()))?;

    let policy = if args.first_match {
        MatchPolicy::FirstMatch
    } else {
        MatchPolicy::Reconcile
    };
    let output = reconcile(&balance, &inbound, &order_lines, policy)?;

    write_xlsx(&output.records, &args.output)?;
    if let Some(path) = &args.json {
        std::fs::write(path, to_json(&output.records)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    info!(
        records = output.records.len(),
        dropped = output.dropped_depot_rows,
        "bosch reconciliation written"
    );
    println!(
        "{} kayıt yazıldı ({} satır depo filtresinde elendi, {} inbound satırı eklendi)",
        output.records.len(),
        output.dropped_depot_rows,
        output.inbound_rows_added
    );
    Ok(())
}
