use tracing_subscriber::filter::LevelFilter;

/// Sends `log` records to stderr, keeping stdout for the game itself.
pub(crate) fn init(level: log::Level) {
    let max_level = match level {
        log::Level::Error => LevelFilter::ERROR,
        log::Level::Warn => LevelFilter::WARN,
        log::Level::Info => LevelFilter::INFO,
        log::Level::Debug => LevelFilter::DEBUG,
        log::Level::Trace => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
