//! `lce new` command - Create a shipment file from the template

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::format_etb;
use crate::core::landed_cost::{calculate, CostInputs};
use crate::core::Config;
use crate::entities::shipment::{file_name_for, Shipment};
use crate::schema::template::{TemplateContext, TemplateGenerator};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Shipment title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Supplier name
    #[arg(long)]
    pub supplier: Option<String>,

    /// Item description
    #[arg(long)]
    pub item: Option<String>,

    /// HS tariff code, e.g. 8413.70
    #[arg(long)]
    pub hs_code: Option<String>,

    /// Number of units
    #[arg(long)]
    pub quantity: Option<f64>,

    /// Unit of measure
    #[arg(long)]
    pub unit: Option<String>,

    /// FOB value in USD
    #[arg(long)]
    pub fob: Option<f64>,

    /// Freight in USD
    #[arg(long)]
    pub freight: Option<f64>,

    /// Insurance in USD
    #[arg(long)]
    pub insurance: Option<f64>,

    /// ETB per USD (default: from config)
    #[arg(long)]
    pub exchange_rate: Option<f64>,

    /// Start from the reference shipment instead of zeros
    #[arg(long)]
    pub sample: bool,

    /// Output path (default: <slugified-title>.lce.yaml)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,

    /// Use interactive wizard to fill in fields
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

pub fn run(args: NewArgs) -> Result<()> {
    let config = Config::load().map_err(|e| miette::miette!("{}", e))?;

    let mut inputs = if args.sample {
        CostInputs::sample()
    } else {
        CostInputs {
            exchange_rate: config.default_exchange_rate,
            ..CostInputs::default()
        }
    };
    apply_flags(&mut inputs, &args);

    let (title, supplier) = if args.interactive {
        prompt(&mut inputs, &args)?
    } else {
        let title = args
            .title
            .clone()
            .ok_or_else(|| miette::miette!("Title is required (use --title or --interactive)"))?;
        (title, args.supplier.clone())
    };

    let mut ctx = TemplateContext::new(&title, &config.author, inputs);
    if let Some(s) = supplier.filter(|s| !s.trim().is_empty()) {
        ctx = ctx.with_supplier(s);
    }

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(file_name_for(&title, &ctx.id)));

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ctx = ctx.with_filename(filename);

    let generator = TemplateGenerator::new().map_err(|e| miette::miette!("{}", e))?;
    let yaml = generator
        .generate_shipment(&ctx)
        .map_err(|e| miette::miette!("{}", e))?;

    let shipment = Shipment::create(&path, &yaml, args.force)?;
    tracing::info!(path = %path.display(), id = %shipment.id, "created shipment");

    let breakdown = calculate(&shipment.inputs);
    println!(
        "{} Created shipment {}",
        style("✓").green(),
        style(shipment.id.to_string()).cyan()
    );
    println!("   {}", style(path.display()).dim());
    println!(
        "   Landed cost: {}",
        style(format_etb(breakdown.total_landed_cost)).yellow()
    );

    Ok(())
}

fn apply_flags(inputs: &mut CostInputs, args: &NewArgs) {
    if let Some(item) = &args.item {
        inputs.item_name = item.clone();
    }
    if let Some(code) = &args.hs_code {
        inputs.hs_code = code.clone();
    }
    if let Some(q) = args.quantity {
        inputs.quantity = q;
    }
    if let Some(unit) = &args.unit {
        inputs.unit = unit.clone();
    }
    if let Some(v) = args.fob {
        inputs.fob_usd = v;
    }
    if let Some(v) = args.freight {
        inputs.freight_usd = v;
    }
    if let Some(v) = args.insurance {
        inputs.insurance_usd = v;
    }
    if let Some(v) = args.exchange_rate {
        inputs.exchange_rate = v;
    }
}

fn prompt(inputs: &mut CostInputs, args: &NewArgs) -> Result<(String, Option<String>)> {
    let theme = ColorfulTheme::default();

    let mut title_input = Input::<String>::with_theme(&theme).with_prompt("Title");
    if let Some(t) = &args.title {
        title_input = title_input.default(t.clone());
    }
    let title = title_input.interact_text().into_diagnostic()?;

    let supplier: String = Input::with_theme(&theme)
        .with_prompt("Supplier (optional)")
        .default(args.supplier.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    inputs.item_name = Input::with_theme(&theme)
        .with_prompt("Item")
        .default(inputs.item_name.clone())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;
    inputs.quantity = Input::with_theme(&theme)
        .with_prompt("Quantity")
        .default(inputs.quantity)
        .interact_text()
        .into_diagnostic()?;
    inputs.fob_usd = Input::with_theme(&theme)
        .with_prompt("FOB (USD)")
        .default(inputs.fob_usd)
        .interact_text()
        .into_diagnostic()?;
    inputs.freight_usd = Input::with_theme(&theme)
        .with_prompt("Freight (USD)")
        .default(inputs.freight_usd)
        .interact_text()
        .into_diagnostic()?;
    inputs.exchange_rate = Input::with_theme(&theme)
        .with_prompt("Exchange rate (ETB/USD)")
        .default(inputs.exchange_rate)
        .interact_text()
        .into_diagnostic()?;
    inputs.duty_rate = Input::with_theme(&theme)
        .with_prompt("Customs duty (%)")
        .default(inputs.duty_rate)
        .interact_text()
        .into_diagnostic()?;

    let supplier = if supplier.is_empty() { None } else { Some(supplier) };
    Ok((title, supplier))
}
