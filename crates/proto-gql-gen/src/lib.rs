use std::fs;
use std::io::Write;

use protobuf::descriptor::FileDescriptorProto;

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod graphql;
pub mod resolve;
pub mod translate;

pub use config::Config;
pub use error::{Error, Result};
pub use translate::SchemaGroup;

/// A resolved output file, ready for emission through either channel.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    pub name: String,
    pub content: String,
}

/// Run the shared pipeline: deduplicate descriptors, translate the files to
/// generate, resolve output names and render SDL.
///
/// Both the CLI and the protoc plugin call this; they differ only in how the
/// returned files are emitted.
pub fn generate(
    files: Vec<FileDescriptorProto>,
    files_to_generate: &[String],
    config: &Config,
) -> Result<Vec<OutputFile>> {
    let files = descriptor::unique_files(files);
    let groups = translate::translate(&files, files_to_generate, config)?;
    groups
        .iter()
        .map(|group| {
            Ok(OutputFile {
                name: resolve::resolve_output(group, config)?,
                content: group.schema.to_string(),
            })
        })
        .collect()
}

/// Write one output file to disk, truncating any existing file.
pub fn write_output(output: &OutputFile) -> Result<()> {
    let mut file = fs::File::create(&output.name)?;
    file.write_all(output.content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use protobuf::EnumOrUnknown;
    use protobuf::descriptor::field_descriptor_proto::Type;
    use protobuf::descriptor::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

    use crate::{Config, OutputFile};

    fn post_file(name: &str) -> FileDescriptorProto {
        let mut field = FieldDescriptorProto::new();
        field.set_name("title".to_string());
        field.set_number(1);
        field.type_ = Some(EnumOrUnknown::new(Type::TYPE_STRING));
        let mut message = DescriptorProto::new();
        message.set_name("Post".to_string());
        message.field.push(field);
        let mut file = FileDescriptorProto::new();
        file.set_name(name.to_string());
        file.set_package("pkg".to_string());
        file.message_type.push(message);
        file
    }

    #[test]
    fn test_generate_single_file() {
        let outputs = crate::generate(
            vec![post_file("pkg/a.proto")],
            &["pkg/a.proto".to_string()],
            &Config::default(),
        )
        .unwrap();
        assert_eq!(
            outputs,
            [OutputFile {
                name: "pkg/a.graphql".to_string(),
                content: "type Post {\n  title: String\n}\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_generate_deduplicates_descriptors() {
        // The same file reachable through two import chains appears twice.
        let outputs = crate::generate(
            vec![post_file("pkg/a.proto"), post_file("pkg/a.proto")],
            &["pkg/a.proto".to_string()],
            &Config::default(),
        )
        .unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].content, "type Post {\n  title: String\n}\n");
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.graphql");
        let output = OutputFile {
            name: path.to_string_lossy().into_owned(),
            content: "type Post\n".to_string(),
        };
        crate::write_output(&output).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "type Post\n");
    }

    #[test]
    fn test_write_output_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("post.graphql");
        let output = OutputFile {
            name: path.to_string_lossy().into_owned(),
            content: String::new(),
        };
        assert!(crate::write_output(&output).is_err());
    }
}
