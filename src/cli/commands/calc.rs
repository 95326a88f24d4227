//! `lce calc` command - Landed cost breakdown of a shipment

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_etb, format_factor, format_thousands, format_usd, load_with_overrides};
use crate::cli::output::{effective_format, emit_structured, emit_tsv};
use crate::cli::viz::{render_cost_bar, BAR_WIDTH};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::landed_cost::{calculate, tax_stages, CostBreakdown, CostInputs, TaxStage};
use crate::core::{Config, Entity};

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Shipment file (*.lce.yaml)
    pub file: PathBuf,

    /// Override a numeric input without editing the file (repeatable), e.g. --set duty_rate=20
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Show the stacked cost-composition bar
    #[arg(long)]
    pub bar: bool,
}

/// Structured output document
#[derive(Serialize)]
struct CalcOutput<'a> {
    id: String,
    title: &'a str,
    inputs: &'a CostInputs,
    breakdown: &'a CostBreakdown,
    tax_stages: &'a [TaxStage],
}

#[derive(Tabled)]
struct StageRow {
    #[tabled(rename = "Tax")]
    name: &'static str,
    #[tabled(rename = "Base (ETB)")]
    base: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Amount (ETB)")]
    amount: String,
}

impl From<&TaxStage> for StageRow {
    fn from(stage: &TaxStage) -> Self {
        Self {
            name: stage.name,
            base: format_thousands(stage.base, 2),
            rate: format!("{}%", stage.rate),
            amount: format_thousands(stage.amount, 2),
        }
    }
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load().map_err(|e| miette::miette!("{}", e))?;
    let shipment = load_with_overrides(&args.file, &args.overrides)?;
    let breakdown = calculate(&shipment.inputs);
    let stages = tax_stages(&shipment.inputs, &breakdown);

    let format = effective_format(global.format, &config);
    let doc = CalcOutput {
        id: shipment.id_string(),
        title: &shipment.title,
        inputs: &shipment.inputs,
        breakdown: &breakdown,
        tax_stages: &stages,
    };
    if emit_structured(&doc, format)? {
        return Ok(());
    }

    let rows: Vec<StageRow> = stages.iter().map(StageRow::from).collect();

    match format {
        OutputFormat::Tsv => {
            emit_tsv(breakdown_rows(&breakdown));
        }
        OutputFormat::Table => {
            println!("{}", Table::new(rows).with(Style::ascii()));
            emit_tsv(breakdown_rows(&breakdown));
        }
        _ => {
            let inputs = &shipment.inputs;
            println!("{} {}", style("⚙").cyan(), style(shipment.title()).bold());
            println!("  {} by {}", style(shipment.id_string()).dim(), shipment.author());
            if !inputs.item_name.is_empty() {
                println!(
                    "  {} {} {}{}",
                    format_thousands(inputs.quantity, 0),
                    inputs.unit,
                    inputs.item_name,
                    if inputs.hs_code.is_empty() {
                        String::new()
                    } else {
                        format!(" (HS {})", inputs.hs_code)
                    }
                );
            }
            println!();

            println!(
                "  CIF value:        {}  ({})",
                style(format_usd(breakdown.cif_usd)).cyan(),
                format_etb(breakdown.cif_etb)
            );
            println!();
            println!("{}", Table::new(rows).with(Style::rounded()));
            println!();
            println!("  Total tax:        {}", style(format_etb(breakdown.total_tax)).yellow());
            println!("  Total logistics:  {}", format_etb(breakdown.total_logistics));
            println!(
                "  Total landed cost: {}",
                style(format_etb(breakdown.total_landed_cost)).green().bold()
            );
            println!(
                "  Cost per {}:     {}",
                inputs.unit,
                style(format_etb(breakdown.cost_per_unit)).green()
            );
            println!("  Landed factor:    {}", format_factor(breakdown.landed_factor));

            if args.bar {
                println!();
                println!("{}", render_cost_bar(&breakdown, BAR_WIDTH));
            }
        }
    }

    Ok(())
}

fn breakdown_rows(b: &CostBreakdown) -> Vec<(&'static str, String)> {
    vec![
        ("cif_usd", format!("{:.2}", b.cif_usd)),
        ("cif_etb", format!("{:.2}", b.cif_etb)),
        ("duty", format!("{:.2}", b.duty)),
        ("excise", format!("{:.2}", b.excise)),
        ("sur_tax", format!("{:.2}", b.sur_tax)),
        ("vat", format!("{:.2}", b.vat)),
        ("withholding", format!("{:.2}", b.withholding)),
        ("total_tax", format!("{:.2}", b.total_tax)),
        ("total_logistics", format!("{:.2}", b.total_logistics)),
        ("total_landed_cost", format!("{:.2}", b.total_landed_cost)),
        ("cost_per_unit", format!("{:.2}", b.cost_per_unit)),
        ("landed_factor", format_factor(b.landed_factor)),
    ]
}
