//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tenta_model::{RecordStatus, SerialEpoch, ValidityPolicy};

#[derive(Parser)]
#[command(
    name = "tenta",
    version,
    about = "Tenta - reconcile supplier price lists with the product catalog",
    long_about = "Merge a barcode equivalence table with a supplier price list,\n\
                  review which prices are current and write them to the product catalog.\n\n\
                  Reads CSV, XLSX, XLS, XLSB and ODS spreadsheets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include product keys and prices in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Preview a merge without writing anything.
    Merge(MergeArgs),

    /// Merge and write current prices to the catalog.
    Import(ImportArgs),

    /// Search the catalog by id, barcode or description.
    Search(SearchArgs),

    /// Show one product by id or barcode.
    Show(ShowArgs),

    /// Set the price or photo of a product.
    Edit(EditArgs),

    /// Write a timestamped snapshot of the catalog.
    Backup(BackupArgs),

    /// Import products from the legacy JSON dump.
    ImportLegacy(ImportLegacyArgs),

    /// Print the effective settings as TOML.
    Settings(SettingsArgs),
}

/// The two spreadsheets of a merge.
#[derive(Args)]
pub struct InputArgs {
    /// Equivalence table (barcode, product key, description).
    #[arg(value_name = "EQUIVALENCES")]
    pub equivalences: PathBuf,

    /// Supplier price list.
    #[arg(value_name = "PRICES")]
    pub prices: PathBuf,

    /// Reference date for the validity window (default: today).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,
}

/// Overrides for the merge settings.
#[derive(Args, Default)]
pub struct MergeFlags {
    /// Which validity window bounds are enforced.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Validity window length in months.
    #[arg(long = "window-months", value_name = "N")]
    pub window_months: Option<u32>,

    /// Date serial convention of the spreadsheets.
    #[arg(long = "epoch", value_enum)]
    pub epoch: Option<EpochArg>,

    /// Barcode shown for products missing from the equivalence table.
    #[arg(long = "barcode-placeholder", value_name = "TEXT")]
    pub barcode_placeholder: Option<String>,
}

#[derive(Args)]
pub struct StoreArg {
    /// Product catalog file (default: `store_path` from settings).
    #[arg(long = "store", value_name = "PATH")]
    pub store: Option<PathBuf>,
}

#[derive(Args)]
pub struct MergeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub flags: MergeFlags,

    /// Print records as JSON instead of tables.
    #[arg(long = "json", conflicts_with = "csv")]
    pub json: bool,

    /// Print records as CSV instead of tables.
    #[arg(long = "csv")]
    pub csv: bool,

    /// Only list records with this status.
    #[arg(long = "only", value_enum)]
    pub only: Option<StatusArg>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub flags: MergeFlags,

    #[command(flatten)]
    pub store: StoreArg,

    /// Merge and report without writing to the catalog.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive).
    #[arg(value_name = "TERM")]
    pub term: String,

    #[command(flatten)]
    pub store: StoreArg,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Product id or scanned barcode.
    #[arg(value_name = "ID_OR_BARCODE")]
    pub key: String,

    #[command(flatten)]
    pub store: StoreArg,
}

#[derive(Args)]
pub struct EditArgs {
    /// Product id.
    #[arg(value_name = "ID")]
    pub id: String,

    /// New price, `1.234,56` style or plain.
    #[arg(long = "price", value_name = "PRICE", required_unless_present = "photo_url")]
    pub price: Option<String>,

    /// New photo URL.
    #[arg(long = "photo-url", value_name = "URL")]
    pub photo_url: Option<String>,

    #[command(flatten)]
    pub store: StoreArg,
}

#[derive(Args)]
pub struct BackupArgs {
    #[command(flatten)]
    pub store: StoreArg,

    /// Folder for the snapshot (default: `backup_dir` from settings).
    #[arg(long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportLegacyArgs {
    /// Legacy JSON dump.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// First accepted validity date (inclusive).
    #[arg(long = "from", value_name = "YYYY-MM-DD")]
    pub from: NaiveDate,

    /// Last accepted validity date (inclusive).
    #[arg(long = "to", value_name = "YYYY-MM-DD")]
    pub to: NaiveDate,

    /// Date serial convention of the dump.
    #[arg(long = "epoch", value_enum)]
    pub epoch: Option<EpochArg>,

    #[command(flatten)]
    pub store: StoreArg,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Also save the effective settings to the platform settings file.
    #[arg(long = "save")]
    pub save: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    TwoSided,
    NotAfter,
    NotBefore,
}

impl From<PolicyArg> for ValidityPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::TwoSided => Self::TwoSided,
            PolicyArg::NotAfter => Self::NotAfter,
            PolicyArg::NotBefore => Self::NotBefore,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EpochArg {
    /// Serial 2 is 1900-01-01 (current spreadsheet programs).
    Proleptic1899,
    /// Serial 1 is 1900-01-01, with the phantom 1900-02-29.
    Lotus1900,
}

impl From<EpochArg> for SerialEpoch {
    fn from(arg: EpochArg) -> Self {
        match arg {
            EpochArg::Proleptic1899 => Self::Proleptic1899,
            EpochArg::Lotus1900 => Self::Lotus1900,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    ToWrite,
    Skipped,
    OutOfValidity,
}

impl From<StatusArg> for RecordStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::ToWrite => Self::ToWrite,
            StatusArg::Skipped => Self::Skipped,
            StatusArg::OutOfValidity => Self::OutOfValidity,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
