// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   session — interactive form on stdin/stdout
//   predict — one-shot: --value N=90 --value P=42 ...
//   check   — load and cross-check the artifact bundle
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::advise_use_case::AdvisorConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill in the form interactively, then review the recommendation
    Session(SessionArgs),

    /// Predict once from --value flags and exit
    Predict(PredictArgs),

    /// Validate the artifact bundle and print the feature schema
    Check(CheckArgs),
}

/// Where the model store lives; shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Directory with schema.json, scaler.json, label files and models
    #[arg(long, env = "CROP_ADVISOR_ARTIFACTS", default_value = "artifacts")]
    pub artifacts_dir: String,
}

/// Convert CLI args into the application-layer config so the
/// application layer never sees clap types.
impl From<ArtifactArgs> for AdvisorConfig {
    fn from(a: ArtifactArgs) -> Self {
        AdvisorConfig { artifacts_dir: a.artifacts_dir }
    }
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// One feature value, as name=value; repeat for every feature
    #[arg(long = "value", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub values: Vec<(String, String)>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,
}

/// Split "name=value" at the first '='. The value may be empty.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("N=90"), Ok(("N".into(), "90".into())));
        assert_eq!(parse_key_value(" ph =6.5"), Ok(("ph".into(), "6.5".into())));
        assert_eq!(parse_key_value("rainfall="), Ok(("rainfall".into(), String::new())));
        assert!(parse_key_value("=3").is_err());
        assert!(parse_key_value("N").is_err());
    }
}
