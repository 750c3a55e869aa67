//! Output file name resolution.
use std::path;

use crate::config::Config;
use crate::translate::SchemaGroup;
use crate::{Error, Result};

/// Resolve the output file name for one schema group.
///
/// A group spanning more than one descriptor file cannot be named after a
/// single source, so merge-style naming is forced regardless of the
/// configured flag. An explicit `output` override takes precedence for every
/// group in the run.
pub fn resolve_output(group: &SchemaGroup, config: &Config) -> Result<String> {
    if group.source_files.is_empty() {
        return Err(Error::SchemaFileCount(0));
    }
    if let Some(output) = config.output_override() {
        return Ok(output.to_string());
    }
    let merge = config.merge_files || group.source_files.len() > 1;
    Ok(graphql_file_name(
        &group.source_files[0],
        merge,
        &config.extension,
    ))
}

fn graphql_file_name(proto_file: &str, merge: bool, extension: &str) -> String {
    if !merge {
        return swap_extension(proto_file, extension);
    }
    // Merged schemas are named after the parent directory of the source
    // file's absolute path, falling back to a fixed name when the path
    // cannot be resolved. The original directory component is kept.
    let file_name = path::absolute(proto_file)
        .ok()
        .and_then(|p| Some(p.parent()?.file_name()?.to_string_lossy().into_owned()))
        .map(|dir| format!("{dir}.{extension}"))
        .unwrap_or_else(|| format!("schema.{extension}"));
    match proto_file.rsplit_once('/') {
        Some((dir, _)) => format!("{dir}/{file_name}"),
        None => file_name,
    }
}

/// `a/b/c.proto` with extension `graphql` becomes `a/b/c.graphql`. A name
/// without an extension keeps its whole final segment.
fn swap_extension(proto_file: &str, extension: &str) -> String {
    let stem = match proto_file.rfind('.') {
        Some(i) if !proto_file[i + 1..].contains('/') => &proto_file[..i],
        _ => proto_file,
    };
    format!("{stem}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::{graphql_file_name, resolve_output, swap_extension};
    use crate::graphql::Schema;
    use crate::translate::SchemaGroup;
    use crate::{Config, Error};

    fn group(source_files: &[&str]) -> SchemaGroup {
        SchemaGroup {
            schema: Schema::default(),
            source_files: source_files.iter().map(|s| s.to_string()).collect(),
        }
    }

    macro_rules! test_swap_extension {
        ($name:ident, $input:expr, $expected:expr) => {
            #[test]
            fn $name() {
                assert_eq!(swap_extension($input, "graphql"), $expected);
            }
        };
    }

    test_swap_extension!(swap_nested, "a/b/c.proto", "a/b/c.graphql");
    test_swap_extension!(swap_flat, "c.proto", "c.graphql");
    test_swap_extension!(swap_no_extension, "a/b/c", "a/b/c.graphql");
    test_swap_extension!(swap_dotted_directory, "a.b/c", "a.b/c.graphql");

    #[test]
    fn test_merge_uses_parent_directory_basename() {
        assert_eq!(
            graphql_file_name("svc/foo.proto", true, "graphql"),
            "svc/svc.graphql"
        );
        assert_eq!(
            graphql_file_name("/abs/svc/foo.proto", true, "gql"),
            "/abs/svc/svc.gql"
        );
    }

    #[test]
    fn test_resolve_single_file_group() {
        let config = Config::default();
        assert_eq!(
            resolve_output(&group(&["pkg/a.proto"]), &config).unwrap(),
            "pkg/a.graphql"
        );
    }

    #[test]
    fn test_resolve_merge_flag() {
        let config = Config {
            merge_files: true,
            ..Config::default()
        };
        assert_eq!(
            resolve_output(&group(&["pkg/a.proto"]), &config).unwrap(),
            "pkg/pkg.graphql"
        );
    }

    #[test]
    fn test_multi_file_group_forces_merge_naming() {
        // merge_files is off, but the group spans two descriptor files.
        let config = Config::default();
        assert_eq!(
            resolve_output(&group(&["svc/a.proto", "svc/b.proto"]), &config).unwrap(),
            "svc/svc.graphql"
        );
    }

    #[test]
    fn test_output_override_short_circuits() {
        let config = Config {
            output: Some("out.graphql".to_string()),
            merge_files: true,
            ..Config::default()
        };
        assert_eq!(
            resolve_output(&group(&["pkg/a.proto"]), &config).unwrap(),
            "out.graphql"
        );
        assert_eq!(
            resolve_output(&group(&["svc/a.proto", "svc/b.proto"]), &config).unwrap(),
            "out.graphql"
        );
    }

    #[test]
    fn test_zero_source_files_is_rejected() {
        let config = Config {
            output: Some("out.graphql".to_string()),
            ..Config::default()
        };
        // The count check fires before the override is considered.
        assert!(matches!(
            resolve_output(&group(&[]), &config).unwrap_err(),
            Error::SchemaFileCount(0)
        ));
    }

    #[test]
    fn test_custom_extension() {
        let config = Config {
            extension: "gql".to_string(),
            ..Config::default()
        };
        assert_eq!(
            resolve_output(&group(&["pkg/a.proto"]), &config).unwrap(),
            "pkg/a.gql"
        );
    }
}
