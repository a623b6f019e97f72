use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cycletint-cli", version, about = "cycletint CLI")]
struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Phase and color for one day
    Day(commands::day::DayArgs),
    /// Phase and color for every day in a range
    Range(commands::day::RangeArgs),
    /// Month calendar painted with cycle colors
    Month(commands::month::MonthArgs),
    /// Stylesheet for a list of date keys
    Css(commands::css::CssArgs),
    /// Re-render the stylesheet whenever the date keys or settings change
    Watch(commands::watch::WatchArgs),
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Day(args) => commands::day::run_day(args),
        Commands::Range(args) => commands::day::run_range(args),
        Commands::Month(args) => commands::month::run(args),
        Commands::Css(args) => commands::css::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
