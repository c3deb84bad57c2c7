use clap::{Parser, Subcommand};

use crate::triage::{Location, YesNo};

pub mod commands;
pub mod render;

#[derive(Parser)]
#[command(name = "leak-triage")]
#[command(about = "Decide whether a water leak should be monitored, submitted, or escalated")]
#[command(long_about = "leak-triage asks three quick questions about a water leak and recommends whether to \
                       monitor it, submit a maintenance request, or escalate now, with a ready-to-send \
                       message. Start with 'leak-triage check'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer the three questions interactively
    Check,
    /// Evaluate a known set of answers without the interactive flow
    Evaluate {
        /// Where the leak is
        #[arg(long, help = "under_sink, toilet, ceiling_wall or unknown")]
        location: Location,
        /// Whether it is actively leaking right now
        #[arg(long, help = "yes or no")]
        active: YesNo,
        /// Whether any danger sign is present
        #[arg(long, help = "yes or no (near electrical, ceiling bulging, fast pooling, can't stop it)")]
        danger: YesNo,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the decision for every combination of answers
    Matrix {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}
