use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `novibe-activities` - persona activity service with XP rewards.
#[derive(Parser, Debug)]
#[command(name = "novibe-activities")]
#[command(version)]
#[command(about = "Persona activity service with XP rewards.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.novibe/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to listen on (overrides config; 0 picks a free port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Complete one activity and print the response envelope
    Complete {
        /// JSON request file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List activities and their XP values
    Activities,
}
