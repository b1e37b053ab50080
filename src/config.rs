//! Configuration and CLI argument handling

use clap::Parser;

use crate::engine::GameDescriptor;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "play-mode")]
#[command(about = "Host for the in-session play mode timer and scoreboard")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Open a play session for this game at startup
    #[arg(short, long)]
    pub game_name: Option<String>,

    /// Minimum duration in minutes of the startup game
    #[arg(short, long, requires = "game_name")]
    pub duration: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Game to open at startup, if one was requested
    pub fn startup_game(&self) -> Option<GameDescriptor> {
        self.game_name.as_ref().map(|name| GameDescriptor {
            name: name.clone(),
            duration_min_minutes: self.duration,
            duration: None,
        })
    }
}
