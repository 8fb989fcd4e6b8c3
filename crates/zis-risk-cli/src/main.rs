mod commands;
mod input;
mod output;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use zis_risk_core::repository::{HttpRiskRepository, RepositoryConfig};
use zis_risk_core::ZisRiskResult;

use commands::aggregation::{NextIdArgs, RisksInputArgs};
use commands::compliance::ChecklistArgs;
use commands::dashboard::DashboardArgs;
use commands::early_warning::{GaugesArgs, MonitorArgs, WarningsArgs};
use commands::risks::RisksArgs;
use commands::severity::ClassifyArgs;
use commands::suggestion::SuggestArgs;
use commands::zis::ZisSummaryArgs;

/// Risk management for ZIS philanthropic institutions
#[derive(Parser)]
#[command(
    name = "zisrm",
    version,
    about = "Risk management for ZIS philanthropic institutions",
    long_about = "Classify, aggregate and monitor the operational, reputational and \
                  Sharia-compliance risks of a zakat, infaq and sadaqah institution. \
                  Pure computations read JSON from --input or stdin; the risks and \
                  zis-stats commands talk to the risk backend."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Dashboard configuration file (YAML, or JSON by extension)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    remote: RemoteArgs,
}

/// Connection to the risk backend
#[derive(Args)]
pub struct RemoteArgs {
    /// Base URL of the risk backend
    #[arg(
        long,
        env = "ZIS_RISK_API_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub base_url: String,

    /// Request timeout in seconds; unset waits indefinitely
    #[arg(long, env = "ZIS_RISK_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl RemoteArgs {
    pub fn repository(&self) -> ZisRiskResult<HttpRiskRepository> {
        HttpRiskRepository::new(&RepositoryConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one impact/likelihood pair into a severity tier
    Classify(ClassifyArgs),
    /// Bucket risks into the 4x3 severity matrix
    Matrix(RisksInputArgs),
    /// Open risks of Critical or High impact
    HighPriority(RisksInputArgs),
    /// Risk counts per category and status
    CategoryCounts(RisksInputArgs),
    /// Headline dashboard KPIs
    Kpis(RisksInputArgs),
    /// Evaluate the early-warning rules
    Warnings(WarningsArgs),
    /// RHA and ACR gauge readings
    Gauges(GaugesArgs),
    /// Full dashboard snapshot
    Dashboard(DashboardArgs),
    /// Next manual risk id
    NextId(NextIdArgs),
    /// DPS Sharia compliance checklist
    Checklist(ChecklistArgs),
    /// ZIS collection and distribution summary
    ZisSummary(ZisSummaryArgs),
    /// Watch the simulated RHA/ACR feed
    Monitor(MonitorArgs),
    /// Identify risks from a scenario with the scripted assistant
    Suggest(SuggestArgs),
    /// List, create, update or delete risks on the backend
    Risks(RisksArgs),
    /// Fetch public ZIS statistics from the backend
    ZisStats,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::config::load_dashboard_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    let config_given = cli.config.is_some();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Classify(args) => commands::severity::run_classify(args),
        Commands::Matrix(args) => commands::aggregation::run_matrix(args),
        Commands::HighPriority(args) => commands::aggregation::run_high_priority(args),
        Commands::CategoryCounts(args) => commands::aggregation::run_category_counts(args),
        Commands::Kpis(args) => commands::aggregation::run_kpis(args, &config),
        Commands::Warnings(args) => {
            commands::early_warning::run_warnings(args, &config, config_given)
        }
        Commands::Gauges(args) => commands::early_warning::run_gauges(args, &config),
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args, &config, config_given),
        Commands::NextId(args) => commands::aggregation::run_next_id(args),
        Commands::Checklist(args) => commands::compliance::run_checklist(args),
        Commands::ZisSummary(args) => commands::zis::run_zis_summary(args),
        Commands::Monitor(args) => commands::early_warning::run_monitor(args, &config),
        Commands::Suggest(args) => commands::suggestion::run_suggest(args, &cli.remote, &config),
        Commands::Risks(args) => commands::risks::run_risks(args, &cli.remote, &config),
        Commands::ZisStats => commands::zis::run_zis_stats(&cli.remote),
        Commands::Version => {
            println!("zisrm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
