//! `lce correlate` command - What-if scenario with correlation analysis

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::helpers::{format_thousands, load_with_overrides};
use crate::cli::output::{effective_format, emit_structured, emit_tsv};
use crate::cli::viz::{render_scatter, PLOT_HEIGHT, PLOT_WIDTH};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::params::ParamKey;
use crate::core::recommend::RecommendationKind;
use crate::core::state::{CorrelationReport, EngineState, View};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct CorrelateArgs {
    /// Shipment file (*.lce.yaml)
    pub file: PathBuf,

    /// Input parameter on the X axis (see `lce params`); defaults to config
    #[arg(long)]
    pub x: Option<ParamKey>,

    /// Output parameter on the Y axis (see `lce params`); defaults to config
    #[arg(long)]
    pub y: Option<ParamKey>,

    /// Number of scenario samples; defaults to config
    #[arg(long, short = 'n')]
    pub samples: Option<usize>,

    /// Print the scenario points as CSV instead of the report
    #[arg(long)]
    pub csv: bool,

    /// Skip the scatter plot
    #[arg(long)]
    pub no_plot: bool,

    /// Override a numeric input before simulating (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

pub fn run(args: CorrelateArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load().map_err(|e| miette::miette!("{}", e))?;
    let shipment = load_with_overrides(&args.file, &args.overrides)?;

    let x = args.x.unwrap_or(config.default_x);
    let y = args.y.unwrap_or(config.default_y);
    let samples = args.samples.unwrap_or(config.sample_count);
    if samples == 0 {
        return Err(miette::miette!("--samples must be at least 1"));
    }

    let mut state = EngineState::new(shipment.inputs.clone())
        .with_sample_count(samples)
        .with_neutral_zero(config.neutral_zero_direction);
    state
        .set_axes(x, y)
        .map_err(|e| miette::miette!("{} (run `lce params` to list parameter types)", e))?;
    state.set_view(View::Correlation);

    let report = state
        .correlation()
        .ok_or_else(|| miette::miette!("Correlation view is not active"))?;
    tracing::info!(
        x = %report.x,
        y = %report.y,
        r = report.stats.r,
        samples = report.points.len(),
        "correlation computed"
    );

    if args.csv {
        return write_csv(&report);
    }

    let format = effective_format(global.format, &config);
    if emit_structured(&report, format)? {
        return Ok(());
    }

    match format {
        OutputFormat::Tsv | OutputFormat::Table => {
            emit_tsv([
                ("x", report.x.to_string()),
                ("y", report.y.to_string()),
                ("r", format!("{:.4}", report.stats.r)),
                ("slope", format!("{:.6}", report.stats.slope)),
                ("intercept", format!("{:.4}", report.stats.intercept)),
                ("strength", report.strength.to_string()),
                ("direction", report.direction.to_string()),
            ]);
            for rec in &report.recommendations {
                println!("recommendation\t{}\t{}", rec.kind, rec.title);
            }
        }
        _ => print_report(&shipment.title, &report, args.no_plot),
    }

    Ok(())
}

fn print_report(title: &str, report: &CorrelationReport, no_plot: bool) {
    println!(
        "{} {} vs {}  ({})",
        style("⚙").cyan(),
        style(report.x.label()).bold(),
        style(report.y.label()).bold(),
        title
    );
    println!(
        "  {} samples, noise factor {}, relevance {}",
        report.points.len(),
        report.profile.noise_factor,
        report.profile.relevance
    );
    println!();

    println!("  Correlation (r): {}", style(format!("{:.4}", report.stats.r)).cyan().bold());
    println!("  Strength:        {}", report.strength);
    println!("  Direction:       {}", report.direction);
    println!(
        "  Trend line:      y = {:.4} x + {}",
        report.stats.slope,
        format_thousands(report.stats.intercept, 2)
    );
    println!();

    if !no_plot {
        println!(
            "{}",
            render_scatter(&report.points, &report.stats, PLOT_WIDTH, PLOT_HEIGHT)
        );
        println!();
    }

    println!("{}", style("Recommendations").bold());
    for rec in &report.recommendations {
        let icon = match rec.kind {
            RecommendationKind::Warning => style("!").yellow(),
            RecommendationKind::Success => style("✓").green(),
            RecommendationKind::Info => style("→").blue(),
        };
        println!("  {} {}", icon, style(rec.title).bold());
        println!("    {}", rec.desc);
    }
}

fn write_csv(report: &CorrelationReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer
        .write_record([report.x.as_str(), report.y.as_str(), "z"])
        .into_diagnostic()?;
    for p in &report.points {
        writer
            .write_record([p.x.to_string(), p.y.to_string(), p.z.to_string()])
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}
