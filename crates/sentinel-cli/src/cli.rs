use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "sentinel", about = "Reconciliation sentinel control-loop service", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the sentinel loop and its HTTP listeners until signaled to stop.
    Serve {
        /// Path to the YAML sentinel configuration.
        #[arg(short, long)]
        config: PathBuf,

        #[arg(long, env = "LOG_LEVEL", default_value = "info")]
        log_level: LogLevel,

        #[arg(long, env = "LOG_FORMAT", default_value = "text")]
        log_format: LogFormat,

        #[arg(long, env = "LOG_OUTPUT", default_value = "stdout")]
        log_output: LogOutput,

        #[arg(long, default_value = ":8080")]
        health_server_bindaddress: String,

        #[arg(long, default_value = ":9090")]
        metrics_server_bindaddress: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogOutput {
    Stdout,
    Stderr,
}
