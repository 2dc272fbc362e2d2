//! Analyze command implementation

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use monthcast_core::{parse_csv, Analysis, Analyzer, Config, DisplayConfig, Extremum, TrendChart};
use tracing::info;

use super::load_config;

pub fn cmd_analyze(
    config_path: Option<&Path>,
    file: &Path,
    json: bool,
    charts: Option<&Path>,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let analysis = run_analysis(&config, file)?;

    if json {
        println!("{}", analysis.to_json_pretty()?);
    } else {
        print_report(&analysis, &config);
    }

    if let Some(dir) = charts {
        let written = write_charts(&analysis, &config.display, dir)?;
        if !json {
            println!();
            for path in &written {
                println!("   🖼️  Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

/// Load `file` and run one analysis pass over it
pub fn run_analysis(config: &Config, file: &Path) -> Result<Analysis> {
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let series = parse_csv(reader, &config.columns)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    info!(file = %file.display(), observations = series.len(), "Loaded CSV");

    let analysis = Analyzer::new(&config.forecast)
        .analyze(&series)
        .with_context(|| format!("Failed to analyze {}", file.display()))?;
    Ok(analysis)
}

/// Write both trend charts as SVG files, returning their paths
pub fn write_charts(
    analysis: &Analysis,
    display: &DisplayConfig,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create chart directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(2);
    for chart in TrendChart::pair(analysis, display) {
        let path = dir.join(chart.file_name());
        fs::write(&path, chart.to_svg())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    info!(dir = %dir.display(), "Wrote trend charts");
    Ok(written)
}

fn print_report(analysis: &Analysis, config: &Config) {
    let display = &config.display;
    let columns = &config.columns;

    println!();
    println!("🔍 Uploaded Data ({} months)", analysis.len());
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<16} {:>14} {:>14} {:>14}",
        columns.period, columns.income, columns.expense, "Balance"
    );
    for (obs, balance) in analysis
        .series
        .observations()
        .iter()
        .zip(&analysis.balances)
    {
        println!(
            "   {:<16} {:>14} {:>14} {:>14}",
            obs.period,
            display.money(obs.income),
            display.money(obs.expense),
            display.money(*balance)
        );
    }

    let extrema = &analysis.extrema;

    println!();
    println!("📈 Spending Insights");
    print_extremum("Highest Spending", &extrema.max_expense, display);
    print_extremum("Lowest Spending", &extrema.min_expense, display);

    println!();
    println!("📥 Income Insights");
    print_extremum("Highest Income", &extrema.max_income, display);
    print_extremum("Lowest Income", &extrema.min_income, display);

    println!();
    println!("🔮 Next Month Forecast");
    println!(
        "   💰 Estimated Income:  {}",
        display.money(analysis.income.value())
    );
    println!(
        "   💸 Estimated Expense: {}",
        display.money(analysis.expense.value())
    );
    println!(
        "   🧾 Projected Balance: {}",
        display.money(analysis.projected_balance)
    );
    if analysis.projected_balance < 0.0 {
        println!("   ⚠️  Expenses are projected to exceed income");
    }
}

fn print_extremum(label: &str, extremum: &Extremum, display: &DisplayConfig) {
    println!(
        "   {}: {} - {}",
        label,
        extremum.period,
        display.money(extremum.value)
    );
}
