use crate::cli::{LogFormat, LogLevel, LogOutput};

/// Initializes the global `tracing` subscriber from the resolved CLI/env
/// values. Mirrors the plain `tracing_subscriber::fmt()` setup used
/// elsewhere in this workspace, generalized to the level/format/output
/// triple this service exposes as flags.
pub fn init(level: LogLevel, format: LogFormat, output: LogOutput) {
    let filter = tracing_subscriber::EnvFilter::new(level.as_str());

    match (format, output) {
        (LogFormat::Text, LogOutput::Stdout) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stdout)
                .init();
        }
        (LogFormat::Text, LogOutput::Stderr) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        (LogFormat::Json, LogOutput::Stdout) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .json()
                .with_writer(std::io::stdout)
                .init();
        }
        (LogFormat::Json, LogOutput::Stderr) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .json()
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
