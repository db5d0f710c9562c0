mod entsoe;
mod home_assistant;
mod peek;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{peek::PeekArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: keep publishing the current price to the sensor.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Fetch the prices once and print them.
    #[clap(name = "peek")]
    Peek(Box<PeekArgs>),
}
