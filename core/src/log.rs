//! Logger initialization.
//!
//! Services log through the `log` facade macros; the daemon wires them to a
//! log4rs console appender via [`init_logger`].

pub use log::{Level, LevelFilter};

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const CONSOLE_APPENDER: &str = "stdout";
const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {m}{n}";

fn build_config(level: LevelFilter) -> Config {
    let stdout = ConsoleAppender::builder().encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN))).build();
    Config::builder()
        .appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(stdout)))
        .build(Root::builder().appender(CONSOLE_APPENDER).build(level))
        .unwrap()
}

/// Initializes the global logger. The filter string is a `log::LevelFilter`
/// name (`off`, `error`, `warn`, `info`, `debug`, `trace`); unknown values
/// fall back to `info`.
pub fn init_logger(filters: &str) {
    log4rs::init_config(build_config(parse_level(filters))).unwrap();
}

/// Tries to init the global logger, but does not panic if it was already setup.
/// Should be used for tests.
pub fn try_init_logger(filters: &str) {
    let _ = log4rs::init_config(build_config(parse_level(filters)));
}

fn parse_level(filters: &str) -> LevelFilter {
    filters.parse().unwrap_or(LevelFilter::Info)
}
