//! Command execution
//!
//! Resolves configuration and the current date from [`CliArgs`], opens the
//! ledger over the file-backed store and runs one [`Command`], writing its
//! result to the given output.

use crate::cli::args::{CliArgs, Command};
use crate::core::{KvTenantStore, RentLedger, TenantStore};
use crate::io::open_input;
use crate::types::input::{parse_amount, parse_date, parse_optional_date};
use crate::types::{LedgerConfig, LedgerError};
use chrono::{Local, NaiveDate};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::debug;

/// Build the effective configuration
///
/// Precedence, lowest first: defaults, `--config` file, flags and
/// environment variables.
pub fn resolve_config(args: &CliArgs) -> Result<LedgerConfig, LedgerError> {
    let base = match &args.config {
        Some(path) => LedgerConfig::from_json_file(path)?,
        None => LedgerConfig::default(),
    };
    base.with_overrides(args.grace_period_days, args.daily_rate)
}

/// `--today` if given, otherwise the local calendar date
pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, LedgerError> {
    match raw {
        Some(raw) => parse_date("today", raw),
        None => Ok(Local::now().date_naive()),
    }
}

/// Run the command described by `args` against the store in `--data-dir`
///
/// # Errors
///
/// Returns the first error raised by configuration, the store, or the
/// command itself. Nothing is written to `output` in that case.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), LedgerError> {
    let config = resolve_config(args)?;
    let today = resolve_today(args.today.as_deref())?;
    debug!(data_dir = %args.data_dir.display(), %today, "running command");

    let store = KvTenantStore::in_dir(&args.data_dir);
    let mut ledger = RentLedger::open(store, config)?;
    let command = args.command.clone().unwrap_or(Command::Pending);

    execute(&mut ledger, &command, today, output)
}

/// Run a single command against an open ledger
pub fn execute<S: TenantStore>(
    ledger: &mut RentLedger<S>,
    command: &Command,
    today: NaiveDate,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match command {
        Command::Add {
            name,
            phone,
            last_rent_date,
        } => {
            let last_rent_date =
                parse_optional_date("last rent date", last_rent_date.as_deref().unwrap_or(""))?;
            let due = ledger.add_tenant(name, phone, last_rent_date, today)?;
            writeln!(output, "Tenant added successfully. Rent due: {}", due.normalize())?;
        }
        Command::Pay { name, amount, date } => {
            let amount = parse_amount("amount", amount)?;
            let date_paid = match date {
                Some(raw) => parse_date("payment date", raw)?,
                None => today,
            };
            let due = ledger.record_payment(name, amount, date_paid)?;
            writeln!(
                output,
                "Rent payment recorded successfully. Rent due: {}",
                due.normalize()
            )?;
        }
        Command::Increment { name, amount } => {
            let amount = parse_amount("amount", amount)?;
            let due = ledger.increment_rent(name, amount, today)?;
            writeln!(
                output,
                "Rent increment recorded successfully. Rent due: {}",
                due.normalize()
            )?;
        }
        Command::SetRentDate { name, date } => {
            let new_date = parse_date("rent date", date)?;
            let due = ledger.update_rent_start_date(name, new_date, today)?;
            writeln!(
                output,
                "Rent date updated successfully. Rent due: {}",
                due.normalize()
            )?;
        }
        Command::Status { name } => {
            writeln!(output, "{}", ledger.status_of(name, today)?)?;
        }
        Command::Profile { name } => {
            writeln!(output, "{}", ledger.profile_of(name)?)?;
        }
        Command::Pending => {
            writeln!(output, "{}", ledger.pending_report(today))?;
        }
        Command::Export { output: None } => {
            ledger.export_csv(output)?;
        }
        Command::Export { output: Some(path) } => {
            let file = File::create(path).map_err(|e| LedgerError::Io {
                message: format!("Failed to create file '{}': {}", path.display(), e),
            })?;
            let mut writer = BufWriter::new(file);
            ledger.export_csv(&mut writer)?;
            writer.flush()?;
            writeln!(
                output,
                "Exported {} tenants to {}",
                ledger.tenants().len(),
                path.display()
            )?;
        }
        Command::Import { input } => {
            let summary = ledger.import_csv(open_input(input)?)?;
            writeln!(
                output,
                "Data imported successfully. {} rows imported, {} skipped.",
                summary.imported, summary.skipped
            )?;
        }
    }
    Ok(())
}
