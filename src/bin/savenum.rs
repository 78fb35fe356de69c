use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use savenum::{
    Config, DashboardSettings, DashboardSummary, DateWindow, Error, TransactionStore,
    config::DEFAULT_TIMEZONE,
    export_chart_of_accounts, export_transactions, format_currency, import_transactions,
    render_report,
    spreadsheet::{CHART_OF_ACCOUNTS_FILE_NAME, TRANSACTIONS_FILE_NAME},
    timezone::now_in,
    transaction::format_date,
};

/// Bookkeeping dashboard for online merchants.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Canonical timezone used to get the current date, e.g. "America/Sao_Paulo".
    #[arg(long, env = "SAVENUM_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// CSV spreadsheet of transactions to load, may be given more than once.
    #[arg(long = "import", value_name = "FILE")]
    imports: Vec<PathBuf>,

    /// Start from an empty store instead of the sample transactions.
    #[arg(long)]
    no_sample_data: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the headline figures and by-day totals.
    Summary {
        #[command(flatten)]
        windows: WindowArgs,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write the dashboard as a standalone HTML page.
    Report {
        #[command(flatten)]
        windows: WindowArgs,

        /// Where to write the page.
        #[arg(long, short, default_value = "dashboard.html")]
        output: PathBuf,
    },
    /// Write every transaction to a CSV spreadsheet.
    Export {
        /// Where to write the spreadsheet.
        #[arg(long, short, default_value = TRANSACTIONS_FILE_NAME)]
        output: PathBuf,
    },
    /// Write the chart of accounts reference to a CSV spreadsheet.
    ChartOfAccounts {
        /// Where to write the spreadsheet.
        #[arg(long, short, default_value = CHART_OF_ACCOUNTS_FILE_NAME)]
        output: PathBuf,
    },
}

/// The date window of each chart.
#[derive(Args, Debug)]
struct WindowArgs {
    /// Window for the expenses chart: 1w, 1m, 1y or all.
    #[arg(long, default_value = "1m")]
    expenses_window: DateWindow,

    /// Window for the revenue chart: 1w, 1m, 1y or all.
    #[arg(long, default_value = "1m")]
    revenue_window: DateWindow,

    /// Window for the net income chart: 1w, 1m, 1y or all.
    #[arg(long, default_value = "1m")]
    net_income_window: DateWindow,
}

impl From<WindowArgs> for DashboardSettings {
    fn from(args: WindowArgs) -> Self {
        Self {
            expenses_window: args.expenses_window,
            revenue_window: args.revenue_window,
            net_income_window: args.net_income_window,
        }
    }
}

fn main() -> ExitCode {
    setup_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config {
        timezone: cli.timezone,
        seed_sample_data: !cli.no_sample_data,
        ..Default::default()
    };

    let store = load_store(&config, &cli.imports)?;

    match cli.command {
        Command::Summary { windows, json } => {
            let now = now_in(&config.timezone)?;
            let summary = DashboardSummary::compute(&store, windows.into(), now);

            if json {
                println!("{}", summary.to_json()?);
            } else {
                print_summary(&summary);
            }
        }
        Command::Report { windows, output } => {
            let now = now_in(&config.timezone)?;
            let summary = DashboardSummary::compute(&store, windows.into(), now);
            let page = render_report(&store, &summary);

            std::fs::write(&output, page)?;
            tracing::info!("Wrote dashboard to {}", output.display());
        }
        Command::Export { output } => {
            export_transactions(create_file(&output)?, store.transactions())?;
            tracing::info!("Wrote transactions to {}", output.display());
        }
        Command::ChartOfAccounts { output } => {
            export_chart_of_accounts(create_file(&output)?)?;
            tracing::info!("Wrote chart of accounts to {}", output.display());
        }
    }

    Ok(())
}

fn load_store(config: &Config, imports: &[PathBuf]) -> Result<TransactionStore, Error> {
    let mut store = if config.seed_sample_data {
        TransactionStore::with_sample_data()
    } else {
        TransactionStore::new()
    };

    for path in imports {
        let file = File::open(path)?;
        let outcome = import_transactions(BufReader::new(file), &config.import_defaults)?;

        if !outcome.skipped.is_empty() {
            tracing::warn!(
                "Skipped {} rows of {}",
                outcome.skipped.len(),
                path.display()
            );
        }

        store.add_all(outcome.accepted);
    }

    Ok(store)
}

fn create_file(path: &Path) -> Result<BufWriter<File>, Error> {
    Ok(BufWriter::new(File::create(path)?))
}

fn print_summary(summary: &DashboardSummary) {
    match summary.last_updated {
        Some(date) => println!("Última atualização: {}", format_date(date)),
        None => println!("Sem transações"),
    }

    for (title, series) in [
        ("Receitas", &summary.revenue),
        ("Despesas", &summary.expenses),
        ("Lucro Líquido", &summary.net_income),
    ] {
        println!();
        println!("{title} ({}): {}", series.window, format_currency(series.total));
        for total in &series.by_day {
            println!("  {}  {}", total.label, format_currency(total.value));
        }
    }

    println!();
    println!(
        "Lucro do mês: {}",
        format_currency(summary.current_month.net_income)
    );
    for slice in &summary.current_month.by_category {
        println!("  {}  {}", slice.name, format_currency(slice.value));
    }
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .init();
}
