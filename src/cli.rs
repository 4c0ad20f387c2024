use anyhow::{Result, anyhow};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "chart-style-preview",
    about = "Edit matplotlib style settings and preview rendered charts",
    version
)]
pub struct Cli {
    /// Chart renderer endpoint receiving the style payload.
    #[arg(long, default_value = "http://127.0.0.1:8080/generate-chart")]
    pub endpoint: String,

    /// Show every setting in one flat grid instead of grouped sections.
    #[arg(long)]
    pub flat: bool,

    /// Override a style entry before the window opens.
    /// Can be used multiple times: --set lines.linewidth=2.5
    #[arg(long = "set", value_name = "KEY=VALUE", action = clap::ArgAction::Append)]
    pub set: Vec<String>,
}

/// Split a `--set` argument into its key and value parts.
pub fn parse_override(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim(), value))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| anyhow!("Invalid --set override '{raw}' (expected KEY=VALUE)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_splits_at_first_equals() {
        assert_eq!(
            parse_override("figure.figsize=10, 4").unwrap(),
            ("figure.figsize", "10, 4")
        );
        // Values may themselves contain an equals sign.
        assert_eq!(parse_override("text.color=a=b").unwrap(), ("text.color", "a=b"));
    }

    #[test]
    fn override_without_equals_is_rejected() {
        assert!(parse_override("lines.linewidth").is_err());
    }

    #[test]
    fn override_with_empty_key_is_rejected() {
        assert!(parse_override("=2.5").is_err());
        assert!(parse_override("  =2.5").is_err());
    }
}
