use crate::{Error, Result};

/// Default extension for generated schema files.
pub const DEFAULT_EXTENSION: &str = "graphql";

/// Normalized settings for one generator run.
///
/// Built once per invocation, either from CLI flags ([`crate::cli::Args`]) or
/// from the protoc plugin parameter string, and passed through the pipeline
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Prepend a per-file namespace to generated type names.
    pub type_prefix: bool,
    /// Model path for `@goModel` binding directives.
    pub go_model: Option<String>,
    /// Explicit output path. Overrides file name resolution for every schema.
    pub output: Option<String>,
    /// Extension of generated files, stored without leading dots.
    pub extension: String,
    /// Merge all generated proto files into one schema.
    pub merge_files: bool,
    /// Emit query/mutation/subscription nodes for GRPC calls.
    pub generate_service_nodes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_prefix: false,
            go_model: None,
            output: None,
            extension: DEFAULT_EXTENSION.to_string(),
            merge_files: false,
            generate_service_nodes: false,
        }
    }
}

impl Config {
    /// The explicit output path, if one was configured and is non-empty.
    pub fn output_override(&self) -> Option<&str> {
        self.output.as_deref().filter(|o| !o.is_empty())
    }
}

/// Decode a comma-separated `key` / `key=value` plugin parameter string.
///
/// Unknown keys are ignored so that parameter spellings added by newer
/// releases do not break older binaries.
impl TryFrom<&str> for Config {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        let mut config = Config::default();
        for param in s.split(',') {
            let (key, value) = match param.split_once('=') {
                Some((key, value)) => (key, value),
                None => (param, ""),
            };
            match key {
                "svc" => config.generate_service_nodes = parse_bool(key, value)?,
                "merge" => config.merge_files = parse_bool(key, value)?,
                "prefix" => config.type_prefix = parse_bool(key, value)?,
                "ext" => config.extension = value.trim_matches('.').to_string(),
                "go_model" => config.go_model = Some(value.to_string()),
                "output" => config.output = Some(value.to_string()),
                _ => {}
            }
        }
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| {
        Error::InvalidParameter(format!("{key}: expected `true` or `false`, got `{value}`"))
    })
}
