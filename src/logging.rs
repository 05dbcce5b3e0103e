#![cfg(feature = "std")]
//! Logger for the `crossword` binaries.
//!
//! Lines go to stderr so the board and the simulator's JSON own stdout.
//! `CROSSWORD_LOG` takes a default level plus optional per-module levels,
//! e.g. `warn,crossword::storage=debug`.

use std::env;
use std::sync::OnceLock;

use chrono::Local;
use log::{self, LevelFilter, Metadata, Record};

const LOG_ENV: &str = "CROSSWORD_LOG";

#[derive(Debug, PartialEq)]
struct Filter {
    default: LevelFilter,
    modules: Vec<(String, LevelFilter)>,
}

impl Filter {
    /// Unknown directives are skipped; an empty value means `info`.
    fn parse(directives: &str) -> Self {
        let mut filter = Filter {
            default: LevelFilter::Info,
            modules: Vec::new(),
        };
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((module, level)) => {
                    if let Ok(level) = level.trim().parse() {
                        filter.modules.push((module.trim().to_string(), level));
                    }
                }
                None => {
                    if let Ok(level) = directive.parse() {
                        filter.default = level;
                    }
                }
            }
        }
        filter
    }

    /// Level of the most specific module prefix matching `target`.
    fn level_for(&self, target: &str) -> LevelFilter {
        self.modules
            .iter()
            .filter(|(module, _)| {
                target == module
                    || target
                        .strip_prefix(module.as_str())
                        .is_some_and(|rest| rest.starts_with("::"))
            })
            .max_by_key(|(module, _)| module.len())
            .map_or(self.default, |&(_, level)| level)
    }

    fn max_level(&self) -> LevelFilter {
        self.modules
            .iter()
            .map(|&(_, level)| level)
            .fold(self.default, Ord::max)
    }
}

struct StderrLogger {
    filter: OnceLock<Filter>,
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter
            .get()
            .is_some_and(|f| metadata.level() <= f.level_for(metadata.target()))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {:<5} {}: {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger {
    filter: OnceLock::new(),
};

/// Install the logger configured from `CROSSWORD_LOG`. Later calls are no-ops.
pub fn init_logging() {
    let filter = Filter::parse(&env::var(LOG_ENV).unwrap_or_default());
    let max = filter.max_level();
    if LOGGER.filter.set(filter).is_ok() {
        let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_means_info() {
        let filter = Filter::parse("");
        assert_eq!(filter.default, LevelFilter::Info);
        assert!(filter.modules.is_empty());
        assert_eq!(Filter::parse("off").max_level(), LevelFilter::Off);
    }

    #[test]
    fn module_levels_use_longest_prefix() {
        let filter = Filter::parse("warn, crossword::storage=debug,crossword=error,bogus=loud");
        assert_eq!(filter.modules.len(), 2);
        assert_eq!(filter.level_for("crossword::storage"), LevelFilter::Debug);
        assert_eq!(filter.level_for("crossword::core::session"), LevelFilter::Error);
        assert_eq!(filter.level_for("crossword_extra"), LevelFilter::Warn);
        assert_eq!(filter.level_for("tokio"), LevelFilter::Warn);
        assert_eq!(filter.max_level(), LevelFilter::Debug);
    }
}
