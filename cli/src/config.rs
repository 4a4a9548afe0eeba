//! Replay configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use ballotbox_election::ElectionError;
use ballotbox_types::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid {field}: {source}")]
    Parse {
        field: &'static str,
        source: ParseError,
    },

    #[error(transparent)]
    Election(#[from] ElectionError),
}

impl CliError {
    pub fn parse(field: &'static str) -> impl FnOnce(ParseError) -> Self {
        move |source| CliError::Parse { field, source }
    }
}

/// An election described as a file: who runs it, who may vote, and the
/// votes to apply in order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Operator identity, `0x`-prefixed hex.
    pub operator: String,

    /// Length of the voting window.
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u64,

    /// Clock value, in seconds, at which the election is configured.
    #[serde(default = "default_start_secs")]
    pub start_secs: u64,

    /// Candidates registered before the window opens.
    #[serde(default)]
    pub candidates: Vec<String>,

    /// Candidates removed after registration, before any vote.
    #[serde(default)]
    pub removals: Vec<String>,

    #[serde(default)]
    pub credentials: Vec<CredentialEntry>,

    #[serde(default)]
    pub votes: Vec<VoteEntry>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// A credential to issue: derived from `voter_id`, held by `holder`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub voter_id: String,
    pub holder: String,
}

/// One vote submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteEntry {
    pub voter_id: String,
    pub candidate: String,
    /// 65-byte signature, hex.
    pub signature: String,
    /// Seconds after configuration at which the vote is submitted.
    #[serde(default = "default_at_secs")]
    pub at_secs: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_duration_hours() -> u64 {
    24
}

fn default_start_secs() -> u64 {
    1_700_000_000
}

fn default_at_secs() -> u64 {
    1
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ReplayConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERATOR: &str = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23";

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ReplayConfig::from_toml_str(&format!("operator = \"{OPERATOR}\""))
            .expect("operator alone should parse");
        assert_eq!(config.duration_hours, 24);
        assert_eq!(config.start_secs, 1_700_000_000);
        assert!(config.candidates.is_empty());
        assert!(config.votes.is_empty());
        assert_eq!(config.log_format, "human");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn operator_is_required() {
        let err = ReplayConfig::from_toml_str("duration_hours = 1").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn tables_parse() {
        let toml = format!(
            r#"
            operator = "{OPERATOR}"
            duration_hours = 2
            candidates = ["alice", "bob"]
            removals = ["bob"]

            [[credentials]]
            voter_id = "voter-1"
            holder = "{OPERATOR}"

            [[votes]]
            voter_id = "voter-1"
            candidate = "alice"
            signature = "0x00"
            at_secs = 30
        "#
        );
        let config = ReplayConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.duration_hours, 2);
        assert_eq!(config.removals, vec!["bob".to_string()]);
        assert_eq!(config.credentials[0].voter_id, "voter-1");
        assert_eq!(config.votes[0].at_secs, 30);
    }

    #[test]
    fn round_trips_through_toml() {
        let source = format!("operator = \"{OPERATOR}\"\ncandidates = [\"x\"]");
        let config = ReplayConfig::from_toml_str(&source).unwrap();
        let text = config.to_toml_string().unwrap();
        let parsed = ReplayConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.candidates, config.candidates);
        assert_eq!(parsed.operator, OPERATOR);
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = ReplayConfig::from_toml_file(Path::new("/nonexistent/ballotbox.toml"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
