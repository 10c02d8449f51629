use std::path::PathBuf;

use clap::Parser;
use pageshell_core::RegionId;
use serde_json::Value;

use crate::logging::LogFormat;

/// pageshell: bootstrap a page shell against an in-memory document
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Configuration file (.json, .yaml, .yml or .toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Module path, relative to the base directory. Overrides the config file.
    #[arg(long, value_name = "PATH")]
    pub module: Option<String>,

    /// Directory the module path is resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Start with the document still loading and finish parsing after bootstrap
    #[arg(long)]
    pub loading: bool,

    /// Leave a region out of the document (app, nav or message_bar)
    #[arg(long, value_name = "REGION")]
    pub omit: Vec<RegionId>,

    /// JSON payload to emit as `new_message` on the app region. Repeatable.
    #[arg(long, value_name = "JSON", value_parser = parse_payload)]
    pub emit: Vec<Value>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

fn parse_payload(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_repeated_flags() {
        let args = CliArgs::try_parse_from([
            "pageshell",
            "--omit", "nav",
            "--omit", "#message_bar",
            "--emit", r#"{"text":"hello"}"#,
            "--emit", "42",
            "--log-format", "json",
        ])
        .unwrap();
        assert_eq!(args.omit, vec![RegionId::Nav, RegionId::MessageBar]);
        assert_eq!(args.emit, vec![serde_json::json!({"text": "hello"}), serde_json::json!(42)]);
        assert_eq!(args.log_format, LogFormat::Json);
        assert_eq!(args.base_dir, PathBuf::from("."));
        assert!(!args.loading);
    }

    #[test]
    fn test_rejects_bad_payload_and_region() {
        assert!(CliArgs::try_parse_from(["pageshell", "--emit", "{oops"]).is_err());
        assert!(CliArgs::try_parse_from(["pageshell", "--omit", "sidebar"]).is_err());
    }
}
