use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use siparis_core::{AppConfig, RunReport};
use siparis_pipeline::{
    load_brand_sheets, merge_inbound, reconcile_brands, transform_main_sheet,
    write_order_workbook, Brand,
};
use siparis_xlsx::read_sheet;
use tracing::info;

#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Primary stock workbook.
    #[arg(long)]
    pub input: PathBuf,
    /// Current month (1-12); the forecast columns are labelled with the
    /// two months that follow it.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,
    /// Inbound deliveries workbook.
    #[arg(long)]
    pub inbound: Option<PathBuf>,
    /// Brand balance file as `slug=path`, repeatable
    /// (e.g. `--brand valeo=valeo.xlsx --brand mann=mann.xlsx`).
    #[arg(long = "brand", value_parser = parse_brand_file)]
    pub brands: Vec<(Brand, PathBuf)>,
    /// Output workbook path.
    #[arg(long, default_value = "siparis.xlsx")]
    pub output: PathBuf,
}

/// First brand listed more than once, if any. Each brand gets at most one
/// file; merging two files for the same brand would double its balances.
pub(crate) fn duplicate_brand(brands: &[(Brand, PathBuf)]) -> Option<Brand> {
    let mut seen = std::collections::HashSet::new();
    brands.iter().map(|(brand, _)| *brand).find(|brand| !seen.insert(*brand))
}

fn parse_brand_file(raw: &str) -> Result<(Brand, PathBuf), String> {
    let (slug, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected slug=path, got `{raw}`"))?;
    let brand = Brand::from_slug(slug).ok_or_else(|| {
        let known: Vec<&str> = Brand::ALL.iter().map(|b| b.slug()).collect();
        format!("unknown brand `{slug}`, expected one of: {}", known.join(", "))
    })?;
    Ok((brand, PathBuf::from(path)))
}

pub async fn run(args: TransformArgs, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(brand) = duplicate_brand(&args.brands) {
        anyhow::bail!("brand `{}` given more than once", brand.slug());
    }

    let sheet = read_sheet(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut report = RunReport::new();
    let mut table = transform_main_sheet(&sheet, args.month, &mut report)?;

    if let Some(path) = &args.inbound {
        let inbound =
            read_sheet(path).with_context(|| format!("reading {}", path.display()))?;
        report.push(merge_inbound(&mut table, &inbound));
    }

    if !args.brands.is_empty() {
        let sheets = load_brand_sheets(
            args.brands,
            config.effective_brand_concurrency(),
            Duration::from_secs(config.brand_load_timeout_secs),
        )
        .await;
        reconcile_brands(&mut table, &sheets, config.brand_fuzzy_threshold, &mut report);
    }

    write_order_workbook(&table, &args.output)?;
    info!(path = %args.output.display(), rows = table.rows.len(), "order workbook written");
    println!("{report}");
    Ok(())
}
