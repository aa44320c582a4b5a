//! Command line front-end for the savings simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use savings_simulator::accounts::{capitalize_type, AccountCatalog, AccountFilter};
use savings_simulator::format::{describe_term, format_currency};
use savings_simulator::simulation::{batch, load_scenarios, run_batch};
use savings_simulator::{ProjectionEngine, SimulationForm, SimulationLimits, SimulationResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "savings_simulator")]
#[command(about = "Compound-interest savings simulator with monthly contributions")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a single savings plan month by month
    Simulate {
        /// Initial deposit (thousands separators allowed, e.g. 1,000,000)
        #[arg(long)]
        principal: String,

        /// Monthly contribution
        #[arg(long)]
        contribution: String,

        /// Term in months
        #[arg(long)]
        term: String,

        /// Annual interest rate in percent
        #[arg(long, default_value = "5")]
        rate: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// JSON file overriding the validation limits
        #[arg(long)]
        limits: Option<PathBuf>,
    },

    /// Project every scenario in a CSV file
    Batch {
        /// CSV with principal,monthly_contribution,term_months,annual_rate_percent
        #[arg(long)]
        input: PathBuf,

        /// Summary CSV destination (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        limits: Option<PathBuf>,
    },

    /// Summarise and filter a savings account catalog
    Accounts {
        /// JSON catalog ({"accounts": [...]})
        #[arg(long)]
        catalog: PathBuf,

        /// Holder name or account number fragment
        #[arg(long)]
        search: Option<String>,

        /// Account type ("all" for every type)
        #[arg(long = "type")]
        account_type: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Simulate { principal, contribution, term, rate, format, limits } => {
            let form = SimulationForm::new(principal, contribution, term, rate);
            simulate(&form, format, limits.as_deref())
        }
        Command::Batch { input, output, limits } => {
            batch_command(&input, output.as_deref(), limits.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Accounts { catalog, search, account_type, json } => {
            let filter = AccountFilter { search, account_type };
            accounts(&catalog, &filter, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_limits(path: Option<&Path>) -> Result<SimulationLimits> {
    match path {
        Some(p) => SimulationLimits::from_json_file(p)
            .with_context(|| format!("Failed to load limits from {}", p.display())),
        None => Ok(SimulationLimits::default()),
    }
}

fn simulate(form: &SimulationForm, format: OutputFormat, limits: Option<&Path>) -> Result<ExitCode> {
    let engine = ProjectionEngine::new(load_limits(limits)?);

    let outcome = form
        .parse(engine.limits())
        .and_then(|input| engine.simulate(&input));

    let result = match outcome {
        Ok(result) => result,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {}", error.field.label(), error.message);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => print_table(&mut out, &result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => result.write_csv(&mut out)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn print_table<W: Write>(out: &mut W, result: &SimulationResult) -> io::Result<()> {
    writeln!(out, "Final balance:     {}", format_currency(result.final_balance, 0))?;
    writeln!(out, "Total contributed: {}", format_currency(result.total_contributed, 0))?;
    writeln!(
        out,
        "Interest earned:   {} ({:.2}%)",
        format_currency(result.total_interest, 0),
        result.gain_percent()
    )?;
    writeln!(out, "Term:              {}", describe_term(result.entries.len() as u32))?;
    writeln!(out)?;
    writeln!(out, "{:<6} {:>22} {:>18} {:>18}", "Month", "Balance", "Interest", "Contribution")?;
    for entry in &result.entries {
        writeln!(
            out,
            "{:<6} {:>22} {:>18} {:>18}",
            entry.month,
            format_currency(entry.balance, 0),
            format_currency(entry.interest, 0),
            format_currency(entry.contribution, 0)
        )?;
    }
    Ok(())
}

fn batch_command(input: &Path, output: Option<&Path>, limits: Option<&Path>) -> Result<()> {
    let engine = ProjectionEngine::new(load_limits(limits)?);
    let scenarios = load_scenarios(input)
        .with_context(|| format!("Failed to load scenarios from {}", input.display()))?;
    info!("Loaded {} scenarios from {}", scenarios.len(), input.display());

    let results = run_batch(&engine, &scenarios);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            batch::write_batch_summary(BufWriter::new(file), &scenarios, &results)?;
            info!("Summary written to {}", path.display());
        }
        None => batch::write_batch_summary(io::stdout().lock(), &scenarios, &results)?,
    }
    Ok(())
}

fn accounts(path: &Path, filter: &AccountFilter, json: bool) -> Result<()> {
    let catalog = AccountCatalog::from_json_file(path)
        .with_context(|| format!("Failed to load account catalog from {}", path.display()))?;
    let summary = catalog.summary();
    let listed: Vec<_> = catalog.filter(filter).into_iter().map(|a| a.listing()).collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let doc = serde_json::json!({
            "summary": summary,
            "accounts": listed,
        });
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Total balance:   {}", format_currency(summary.total_balance, 2))?;
    writeln!(out, "Active accounts: {} / {}", summary.active_accounts, summary.total_accounts)?;
    match summary.average_interest_rate {
        Some(rate) => writeln!(out, "Average rate:    {:.2}%", rate)?,
        None => writeln!(out, "Average rate:    n/a")?,
    }
    let types: Vec<String> = summary.account_types.iter().map(|t| capitalize_type(t)).collect();
    writeln!(out, "Account types:   {}", types.join(", "))?;
    writeln!(out)?;

    writeln!(out, "Accounts ({})", listed.len())?;
    if listed.is_empty() {
        writeln!(out, "  no accounts match the current filters")?;
    }
    for entry in &listed {
        let account = entry.account;
        writeln!(
            out,
            "  {:<12} {:<28} {:<14} {:<9} {:>22} {:>6.2}% {:?}",
            account.account_number,
            account.holder_name,
            capitalize_type(&account.account_type),
            entry.tier.label(),
            format_currency(account.balance, 2),
            account.interest_rate,
            account.status,
        )?;
    }
    Ok(())
}
