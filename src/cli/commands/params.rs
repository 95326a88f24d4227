//! `lce params` command - List the analysis parameter catalog

use console::style;
use miette::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::filters::ParamTypeFilter;
use crate::cli::output::{effective_format, emit_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::params::{
    AnalysisParameter, ParamKey, ParamType, CATALOG, FALLBACK_BASE, HR_COST_BASE,
    WAREHOUSE_COST_BASE,
};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct ParamsArgs {
    /// Only list parameters of this type
    #[arg(long, short = 't', default_value = "all")]
    pub r#type: ParamTypeFilter,
}

#[derive(Tabled)]
struct ParamRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Label")]
    label: &'static str,
    #[tabled(rename = "Type")]
    param_type: ParamType,
    #[tabled(rename = "Base")]
    base: String,
}

/// Where the scenario generator takes the base value from
fn base_source(key: ParamKey) -> String {
    match key {
        ParamKey::HrCost => format!("fixed {}", HR_COST_BASE),
        ParamKey::WarehouseCost => format!("fixed {}", WAREHOUSE_COST_BASE),
        ParamKey::Revenue | ParamKey::NetProfit => format!("fallback {}", FALLBACK_BASE),
        _ => "shipment".to_string(),
    }
}

pub fn run(args: ParamsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load().map_err(|e| miette::miette!("{}", e))?;
    let selected: Vec<&AnalysisParameter> = CATALOG
        .iter()
        .filter(|p| args.r#type.matches(p.param_type))
        .collect();

    let format = effective_format(global.format, &config);
    if emit_structured(&selected, format)? {
        return Ok(());
    }

    match format {
        OutputFormat::Tsv => {
            for p in &selected {
                println!("{}\t{}\t{}", p.key, p.label, p.param_type);
            }
        }
        _ => {
            let rows: Vec<ParamRow> = selected
                .iter()
                .map(|p| ParamRow {
                    key: p.key.as_str(),
                    label: p.label,
                    param_type: p.param_type,
                    base: base_source(p.key),
                })
                .collect();
            let mut table = Table::new(rows);
            if format == OutputFormat::Table {
                table.with(Style::ascii());
            } else {
                table.with(Style::rounded());
            }
            println!("{}", table);
            if format == OutputFormat::Auto {
                println!(
                    "\n{} X axes take inputs, Y axes take outputs",
                    style("→").blue()
                );
            }
        }
    }

    Ok(())
}
