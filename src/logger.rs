//! Sets up the [`fern`] logger.

use fern::Dispatch;
use log::LevelFilter;

/// Maps the number of `-v` flags to a maximum log level.
///
/// Returns the level and whether the verbose (timestamped) format applies.
fn max_level(verbosity: u8) -> (LevelFilter, bool) {
    match verbosity {
        0 => (LevelFilter::Warn, false),
        1 => (LevelFilter::Debug, true),
        _ => (LevelFilter::Trace, true),
    }
}

/// Installs the global logger. Output goes to stderr so stdout stays free for templates.
pub(crate) fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let (level, verbose) = max_level(verbosity);
    if verbose {
        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "{}[{}][{}] {}",
                    chrono::Local::now().format("[%Y-%m-%dT%H:%M:%S%z]"),
                    record.target(),
                    record.level(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()?;
    } else {
        Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!("[{}] {}", record.level(), message))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()?;
    }
    log::debug!("logger up at {}", level);
    Ok(())
}
