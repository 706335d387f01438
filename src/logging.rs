use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError,
    Logger, LoggerHandle, Naming,
};

/// Starts the global logger. `RUST_LOG` wins over `level`. Without a
/// directory everything goes to stderr; with one, records go to rotated files
/// and are duplicated on stderr.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(level: &str, log_dir: Option<&str>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level)?;
    match log_dir {
        None => logger.format(colored_default_format).start(),
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("mancala"))
            .format_for_files(opt_format)
            .format_for_stderr(colored_default_format)
            .duplicate_to_stderr(Duplicate::All)
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // rotate at 10 MB
                Naming::Numbers,
                Cleanup::KeepLogFiles(7),
            )
            .start(),
    }
}
