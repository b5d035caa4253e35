use tracing_appender::non_blocking::WorkerGuard;

use crate::config::MazeConfig;

pub const LOG_FILE_NAME: &str = "mazeweave.log";

/// Sends tracing output to a log file in the configured directory so it does not mix with the
/// maze drawn on the terminal.
///
/// Keep the returned guard alive until the program exits, otherwise buffered lines are lost.
pub fn init_logging(config: &MazeConfig) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;
    let appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .init();
    tracing::info!("[logging] writing logs at level {}", config.log_level);
    Ok(guard)
}
