use std::io::Write;

use log::{LevelFilter, Metadata, Record};

/// Implementation of `log::Log` writing all messages to the standard error
/// stream, as `LEVEL target -- message`.
struct StderrLogger {
    level: LevelFilter,
}

/// Install the stderr logger as the global logger, keeping messages up to
/// `level`.
pub fn init(level: LevelFilter) {
    // a logger can only be set once, later calls keep the first one
    let _ = log::set_boxed_logger(Box::new(StderrLogger { level }));
    log::set_max_level(level);
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        return metadata.level() <= self.level;
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr().lock();
            // nowhere to report a failure to write to stderr
            let _ = writeln!(stderr, "{:<5} {} -- {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Get the log level corresponding to the number of `-v` flags given on the
/// command line
pub fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
