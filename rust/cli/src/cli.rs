//! Command-line surface of the `holdem` binary.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "No-limit Texas Hold'em against persona bots"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play at a table against persona bots (you sit in seat 0)
    Play {
        /// Number of hands to play
        #[arg(long)]
        hands: Option<u32>,
        /// Seed for shuffling and bot decisions
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let bots play every seat and report the results
    Sim {
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the final table snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["play", "sim", "cfg"];
}
