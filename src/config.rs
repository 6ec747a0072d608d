//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::state::{ButtonPolicy, Direction, EngineOptions};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "findwatch")]
#[command(about = "A watch-face countdown/stopwatch timer with vibration and flash alerts")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File the timer settings are loaded from and saved to
    #[arg(short, long, default_value = "findwatch-settings.yml")]
    pub settings: PathBuf,

    /// Count down to zero or up to the configured duration
    #[arg(short, long, value_enum, default_value_t = Direction::Countdown)]
    pub direction: Direction,

    /// What the watch button does
    #[arg(short, long, value_enum, default_value_t = ButtonPolicy::Toggle)]
    pub button: ButtonPolicy,

    /// Keep showing the final time after a run completes until the button is pressed
    #[arg(long)]
    pub linger_on_finish: bool,

    /// Do not start the timer when the face is first shown
    #[arg(long)]
    pub no_autostart: bool,

    /// Treat each line typed on stdin as a button press
    #[arg(long)]
    pub stdin_button: bool,

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

    /// Engine behaviour selected on the command line
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            direction: self.direction,
            button: self.button,
            linger_on_finish: self.linger_on_finish,
        }
    }

    pub fn autostart(&self) -> bool {
        !self.no_autostart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["findwatch"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.engine_options(), EngineOptions::default());
        assert!(config.autostart());
        assert!(!config.stdin_button);
    }

    #[test]
    fn test_variant_flags() {
        let config = Config::try_parse_from([
            "findwatch",
            "--direction",
            "count-up",
            "--button",
            "stop-only",
            "--linger-on-finish",
            "--no-autostart",
            "-v",
        ])
        .unwrap();

        let options = config.engine_options();
        assert_eq!(options.direction, Direction::CountUp);
        assert_eq!(options.button, ButtonPolicy::StopOnly);
        assert!(options.linger_on_finish);
        assert!(!config.autostart());
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_rejects_unknown_direction() {
        assert!(Config::try_parse_from(["findwatch", "--direction", "sideways"]).is_err());
    }
}
