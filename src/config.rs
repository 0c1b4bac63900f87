//! Server configuration
//!
//! Built once at startup from command-line flags and `KARMA_*` environment
//! variables, then handed to the server. Nothing reads process-wide state
//! after that.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use serde::Deserialize;

/// Karma server configuration
#[derive(Debug, Clone, Parser, Deserialize)]
#[command(name = "karma", version, about = "Chat-command karma counter")]
#[serde(default)]
pub struct Config {
    /// Token every incoming request must carry
    #[arg(long, env = "KARMA_TOKEN", default_value = "")]
    pub token: String,

    /// Trigger word the chat integration must report
    #[arg(long, env = "KARMA_TRIGGER", default_value = "karma")]
    pub trigger: String,

    /// Storage backend name
    #[arg(long = "storage", env = "KARMA_STORAGE", default_value = "memory")]
    pub storage: String,

    /// Address the HTTP server binds to
    #[arg(long, env = "KARMA_ADDR", default_value = "0.0.0.0:8081")]
    pub addr: String,

    /// Shards for the in-memory backend (defaults to the CPU count, max 16)
    #[arg(long, env = "KARMA_SHARDS")]
    pub shards: Option<usize>,

    /// Reject malformed `+=` / `-=` amounts instead of treating them as queries
    #[arg(
        long,
        env = "KARMA_STRICT_AMOUNTS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub strict_amounts: bool,
}

impl Config {
    /// Number of in-memory shards to create (one per CPU core, min 1, max 16)
    pub fn shard_count(&self) -> usize {
        self.shards.unwrap_or_else(num_cpus::get).clamp(1, 16)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            token: String::new(),
            trigger: "karma".to_string(),
            storage: "memory".to_string(),
            addr: "0.0.0.0:8081".to_string(),
            shards: None,
            strict_amounts: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let parsed = Config::parse_from(["karma"]);
        let defaults = Config::default();

        assert_eq!(parsed.trigger, defaults.trigger);
        assert_eq!(parsed.storage, defaults.storage);
        assert_eq!(parsed.addr, defaults.addr);
    }

    #[test]
    fn test_flags_override() {
        let config = Config::parse_from([
            "karma",
            "--token",
            "secret",
            "--trigger",
            "points",
            "--storage",
            "dynamodb",
            "--shards",
            "64",
            "--strict-amounts",
        ]);

        assert_eq!(config.token, "secret");
        assert_eq!(config.trigger, "points");
        assert_eq!(config.storage, "dynamodb");
        assert_eq!(config.shard_count(), 16);
        assert!(config.strict_amounts);
    }

    #[test]
    fn test_strict_amounts_from_env() {
        // Only this test touches KARMA_STRICT_AMOUNTS
        std::env::set_var("KARMA_STRICT_AMOUNTS", "1");
        let enabled = Config::try_parse_from(["karma"]);
        std::env::set_var("KARMA_STRICT_AMOUNTS", "off");
        let disabled = Config::try_parse_from(["karma"]);
        std::env::remove_var("KARMA_STRICT_AMOUNTS");

        assert!(enabled.unwrap().strict_amounts);
        assert!(!disabled.unwrap().strict_amounts);
    }

    #[test]
    fn test_shard_count_bounds() {
        let config = Config { shards: Some(0), ..Config::default() };
        assert_eq!(config.shard_count(), 1);

        let config = Config::default();
        assert!((1..=16).contains(&config.shard_count()));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"token": "abc", "strict_amounts": true}"#).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.trigger, "karma");
        assert!(config.strict_amounts);
    }
}
