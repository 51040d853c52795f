//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_report::ConsoleReportAdapter;
use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_report::SvgReportAdapter;
use crate::domain::allocation::allocation_for;
use crate::domain::backtest::run_backtest;
use crate::domain::config::ModelConfig;
use crate::domain::error::AiptError;
use crate::domain::indicators::IndicatorSet;
use crate::domain::metrics::Summary;
use crate::domain::phase::classify;
use crate::domain::prices::{ClosePoint, PriceHistory, ReturnTable};
use crate::domain::quarters::signal_table;
use crate::domain::tier::Tier;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "aipt",
    about = "AI market-cycle phase classifier and allocation backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the historical allocation backtest
    Backtest {
        /// INI config overriding the compiled-in model
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Backtest start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Backtest end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Directory of per-ticker CSV price files
        #[arg(short, long)]
        data: PathBuf,
        /// Directory for generated charts
        #[arg(short, long, default_value = "backtest_output")]
        output: PathBuf,
    },
    /// Classify one quarter's raw metrics and print the phase report
    Classify {
        #[arg(long)]
        capex_growth: f64,
        #[arg(long)]
        revenue_growth: f64,
        #[arg(long)]
        cloud_growth: f64,
        #[arg(long)]
        dc_growth: f64,
        #[arg(long)]
        margin_change: f64,
        #[arg(long)]
        fcf_growth: f64,
        #[arg(long, default_value_t = 0.0)]
        rate_change: f64,
        #[arg(long, default_value_t = 0.0)]
        credit_spread_change: f64,
        /// Price-confirmation score (0 below the 200-day average, else 50)
        #[arg(long, default_value_t = 50.0)]
        price_confirmation: f64,
    },
    /// Print the curated quarterly signal table
    Signals,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            start,
            end,
            data,
            output,
        } => run_backtest_cmd(config.as_ref(), start, end, &data, &output),
        Command::Classify {
            capex_growth,
            revenue_growth,
            cloud_growth,
            dc_growth,
            margin_change,
            fcf_growth,
            rate_change,
            credit_spread_change,
            price_confirmation,
        } => run_classify(IndicatorSet::from_metrics(
            capex_growth,
            revenue_growth,
            cloud_growth,
            dc_growth,
            margin_change,
            fcf_growth,
            rate_change,
            credit_spread_change,
            price_confirmation,
        )),
        Command::Signals => run_signals(),
    }
}

/// Resolve the model configuration: optional INI file, then explicit date
/// overrides on top.
pub fn resolve_model_config(
    config_path: Option<&PathBuf>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<ModelConfig, AiptError> {
    let mut model = match config_path {
        Some(path) => {
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| AiptError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            ModelConfig::from_config(&adapter)?
        }
        None => ModelConfig::default_model(),
    };

    if let Some(start) = start {
        model.backtest.start_date = start;
    }
    if let Some(end) = end {
        model.backtest.end_date = end;
    }

    Ok(model)
}

/// Fetch close series for every ticker, downgrading missing histories to
/// warnings. Returns the loaded series plus the tickers skipped.
pub fn load_price_series(
    data_port: &dyn PriceDataPort,
    tickers: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> (Vec<(String, Vec<ClosePoint>)>, Vec<String>) {
    let mut series = Vec::with_capacity(tickers.len());
    let mut skipped = Vec::new();

    for ticker in tickers {
        match data_port.fetch_closes(ticker, start, end) {
            Ok(points) if points.is_empty() => {
                eprintln!("warning: skipping {} (no price history in range)", ticker);
                skipped.push(ticker.clone());
            }
            Ok(points) => series.push((ticker.clone(), points)),
            Err(e) => {
                eprintln!("warning: skipping {} ({})", ticker, e);
                skipped.push(ticker.clone());
            }
        }
    }

    (series, skipped)
}

fn run_backtest_cmd(
    config_path: Option<&PathBuf>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    data_dir: &PathBuf,
    output_dir: &PathBuf,
) -> ExitCode {
    // Stage 1: Resolve model configuration
    if let Some(path) = config_path {
        eprintln!("Loading config from {}", path.display());
    }
    let model = match resolve_model_config(config_path, start, end) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 2: Load price data
    let tickers = model.all_tickers();
    eprintln!(
        "Loading prices for {} tickers from {}",
        tickers.len(),
        data_dir.display()
    );
    let data_port = CsvPriceAdapter::new(data_dir.clone());
    let (series, skipped) = load_price_series(
        &data_port,
        &tickers,
        model.fetch_start,
        model.backtest.end_date,
    );
    if series.is_empty() {
        let e = AiptError::PriceData {
            reason: "no price data loaded for any ticker".into(),
        };
        eprintln!("error: {e}");
        return (&e).into();
    }
    if !skipped.is_empty() {
        eprintln!("  {} tickers excluded: {}", skipped.len(), skipped.join(", "));
    }

    // Stage 3: Align prices and build tier returns
    let history = PriceHistory::from_series(series);
    let returns = ReturnTable::build(&history, &model.baskets, &model.benchmark);
    eprintln!("  {} trading days loaded", history.timeline().len());

    // Stage 4: Run the simulation
    let signals = signal_table();
    eprintln!(
        "Running backtest: {} to {}",
        model.backtest.start_date, model.backtest.end_date
    );
    let result = match run_backtest(&returns, &signals, &model.backtest) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Phase-change log
    for change in &result.phase_changes {
        eprintln!(
            "  {} | {} | {} - {}",
            change.date,
            change.quarter,
            change.phase.code(),
            change.note
        );
        eprintln!(
            "      CPX={:.0} DMD={:.0} MGN={:.0} LIQ={:.1}",
            change.indicators.capex_momentum,
            change.indicators.demand_realization,
            change.indicators.margin_quality,
            change.indicators.liquidity_pressure,
        );
        let pct = change.weights.as_percentages();
        eprintln!(
            "      allocation: {}",
            Tier::ALL
                .iter()
                .map(|t| format!("{}={:.0}%", t.code(), pct[t.index()]))
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    // Stage 6: Summary statistics
    let portfolio = Summary::compute(&result.portfolio_nav, model.backtest.risk_free_rate);
    let benchmark = Summary::compute(&result.benchmark_nav, model.backtest.risk_free_rate);

    let console = ConsoleReportAdapter::new();
    if let Err(e) = console.write(&result, &portfolio, &benchmark, output_dir) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 7: Charts
    eprintln!("\nWriting charts to {}", output_dir.display());
    let charts = SvgReportAdapter::new();
    match charts.write(&result, &portfolio, &benchmark, output_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_classify(indicators: IndicatorSet) -> ExitCode {
    let phase = classify(&indicators);
    let weights = allocation_for(phase);
    let pct = weights.as_percentages();

    println!("========== AI Cycle Report ==========");
    println!("Current Phase: {} ({})", phase, phase.code());
    println!();
    println!("Indicators:");
    println!("  CapEx Momentum:      {:.1}", indicators.capex_momentum);
    println!("  Demand Realization:  {:.1}", indicators.demand_realization);
    println!("  Margin Quality:      {:.1}", indicators.margin_quality);
    println!("  Liquidity Pressure:  {:.1}", indicators.liquidity_pressure);
    println!("  Price Confirmation:  {:.0}", indicators.price_confirmation);
    println!();
    println!("Suggested Allocation:");
    for tier in Tier::ALL {
        println!(
            "  {} {:<24} {:>4.0}%",
            tier.code(),
            tier.label(),
            pct[tier.index()]
        );
    }
    println!("=====================================");
    ExitCode::SUCCESS
}

fn run_signals() -> ExitCode {
    println!(
        "{:<8} {:<12} {:<12} {:>5} {:>5} {:>5} {:>5}  {}",
        "Quarter", "Effective", "Phase", "CPX", "DMD", "MGN", "LIQ", "Note"
    );
    for record in signal_table() {
        println!(
            "{:<8} {:<12} {:<12} {:>5.0} {:>5.0} {:>5.0} {:>5.1}  {}",
            record.quarter,
            record.effective_date.to_string(),
            record.phase.code(),
            record.indicators.capex_momentum,
            record.indicators.demand_realization,
            record.indicators.margin_quality,
            record.indicators.liquidity_pressure,
            record.note,
        );
    }
    ExitCode::SUCCESS
}
