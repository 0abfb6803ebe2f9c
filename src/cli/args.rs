use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Track tenants, rent accrual and payments
#[derive(Parser, Debug)]
#[command(name = "rent-ledger")]
#[command(about = "Track tenants, rent accrual and payments", long_about = None)]
pub struct CliArgs {
    /// Directory holding the persisted tenant store
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "RENT_LEDGER_DATA_DIR",
        default_value = ".",
        global = true,
        help = "Directory holding tenants.json"
    )]
    pub data_dir: PathBuf,

    /// JSON configuration file
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help = "JSON file with gracePeriodDays and dailyRate"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "grace-period-days",
        value_name = "DAYS",
        env = "RENT_LEDGER_GRACE_PERIOD_DAYS",
        global = true,
        help = "Days of grace before rent accrues (default: 10)"
    )]
    pub grace_period_days: Option<u32>,

    #[arg(
        long = "daily-rate",
        value_name = "AMOUNT",
        env = "RENT_LEDGER_DAILY_RATE",
        global = true,
        allow_hyphen_values = true,
        help = "Rent charged per overdue day (default: 100)"
    )]
    pub daily_rate: Option<Decimal>,

    /// Date treated as today
    #[arg(
        long = "today",
        value_name = "DATE",
        global = true,
        help = "Override the current date (YYYY-MM-DD)"
    )]
    pub today: Option<String>,

    /// Operation to run; prints the pending report when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Ledger operations
///
/// Amounts and dates are kept as raw text here and validated by the ledger's
/// input parsers, so bad values surface as ledger errors.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new tenant
    Add {
        name: String,
        phone: String,
        /// Rent start date
        #[arg(long = "last-rent-date", value_name = "DATE")]
        last_rent_date: Option<String>,
    },

    /// Record a rent payment
    Pay {
        name: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date paid (default: today)
        #[arg(long = "date", value_name = "DATE")]
        date: Option<String>,
    },

    /// Raise a tenant's outstanding balance
    Increment {
        name: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Move the rent start date and re-accrue from it
    SetRentDate { name: String, date: String },

    /// Show a tenant's rent status
    Status { name: String },

    /// Show a tenant's profile
    Profile { name: String },

    /// List tenants overdue in the current month
    Pending,

    /// Write all tenants as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace all tenants with the contents of a CSV file
    Import {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}
