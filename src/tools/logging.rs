use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use super::options::Verbosity;

impl Verbosity {
    /// Log level enabled at this verbosity.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Install a terminal logger on stderr. Stdout is left alone since it may carry
/// a compressed stream.
pub fn init_logging(verbosity: Verbosity) -> Result<(), log::SetLoggerError> {
    TermLogger::init(
        verbosity.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
