//! CLI for generating GraphQL schemas from proto files.
use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, DEFAULT_EXTENSION};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory in which to search for imports. May be specified multiple
    /// times.
    #[arg(short = 'I', value_name = "DIR")]
    pub import_paths: Vec<PathBuf>,
    /// Proto files to generate GraphQL schemas for. May be specified
    /// multiple times.
    #[arg(short = 'f', value_name = "FILE")]
    pub file_names: Vec<PathBuf>,
    /// Generate nodes for operations corresponding to a GRPC call.
    #[arg(long)]
    pub svc: bool,
    /// Merge all the proto files found in one directory into one GraphQL
    /// file.
    #[arg(long)]
    pub merge: bool,
    /// Extension of the generated GraphQL files.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,
    /// Prepend a namespace to all type names to prevent collisions.
    #[arg(long = "type_prefix")]
    pub type_prefix: bool,
    /// Add a goModel directive to all types for automatic model binding.
    #[arg(long = "go_model", value_name = "MODEL")]
    pub go_model: Option<String>,
    /// Output path for the generated schema; overrides per-file naming.
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            type_prefix: args.type_prefix,
            go_model: args.go_model.clone(),
            output: args.output.clone(),
            extension: args.ext.trim_matches('.').to_string(),
            merge_files: args.merge,
            generate_service_nodes: args.svc,
        }
    }
}
