use std::path::PathBuf;
use std::sync::LazyLock;

use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};
use makemkv::codes::messages::Severity;
use makemkv::input::Input;
use makemkv::runner::TitleSelection;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{} ({})\nmakemkv {}\nbuilt {}",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown revision"),
        option_env!("MAKEMKV_VERSION").unwrap_or("unknown"),
        option_env!("BUILD_TIMESTAMP").unwrap_or("at an unknown time"),
    )
});

#[derive(Debug, ClapParser)]
#[command(
    name         = env!("CARGO_PKG_NAME"),
    version      = env!("CARGO_PKG_VERSION"),
    long_version = LONG_VERSION.as_str(),
    author       = env!("CARGO_PKG_AUTHORS"),
    about        = "Inspect and rip discs with makemkvcon",
    long_about   = None,
)]
pub struct Cli {
    /// Set the log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Treat makemkvcon error messages as fatal (stop on first error).
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show progress bars during operations.
    #[arg(long, global = true)]
    pub progress: bool,

    /// Path to the makemkvcon executable.
    #[arg(long, global = true, value_name = "PATH", env = "MAKEMKVCON")]
    pub makemkvcon: Option<PathBuf>,

    /// Choose an operation to perform.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Lowest makemkvcon message severity that aborts a run.
    pub fn fail_level(&self) -> Severity {
        if self.strict {
            Severity::Error
        } else {
            Severity::Critical
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Display information about a disc.
    Info(InfoArgs),

    /// Copy titles from disc into MKV files.
    Mkv(MkvArgs),

    /// Backup whole disc.
    Backup(BackupArgs),
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Args)]
pub struct MkvArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Title to rip, a number starting with 0 or "all".
    #[arg(short, long, value_name = "NR", default_value = "0")]
    pub title: TitleSelection,

    /// Output directory for created MKV files.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output directory for the backup.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Decrypt stream files during backup.
    #[arg(short, long)]
    pub decrypt: bool,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// What makemkvcon reads and how.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Disc number. Alternatively specify an input with -i/--input.
    #[arg(short = 'n', long, value_name = "NR", default_value_t = 0)]
    pub disc_nr: u32,

    /// Input, either a device, an ISO image, a .IFO file or a VIDEO_TS folder.
    #[arg(short, long, value_name = "PATH", conflicts_with = "disc_nr")]
    pub input: Option<PathBuf>,

    /// Minimum title length in seconds.
    #[arg(short = 'l', long, value_name = "SECS")]
    pub minlength: Option<u32>,

    /// Size of the read cache in megabytes.
    #[arg(short, long, value_name = "MB")]
    pub cache: Option<u32>,
}

impl SourceArgs {
    pub fn to_input(&self) -> Input {
        match &self.input {
            Some(path) => Input::Path(path.clone()),
            None => Input::Disc(self.disc_nr),
        }
    }
}

/// What happens with the decoded report.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Write disc info to this file as JSON instead of printing it.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub info_file: Option<PathBuf>,

    /// Presentation of the printed disc info.
    #[arg(long, value_enum, default_value_t = ReportFormat::Tree)]
    pub format: ReportFormat,

    /// Don't show disc info.
    #[arg(long)]
    pub no_info: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Indented tree.
    Tree,
    /// Pretty-printed JSON with sorted keys.
    Json,
    /// YAML document.
    Yaml,
}
