//! Descriptor set assembly.
use std::collections::HashSet;

use protobuf::descriptor::FileDescriptorProto;

/// Drop duplicate descriptor entries, keyed by declared file name.
///
/// A file reachable through several import chains appears once per chain in
/// the parsed set; the first occurrence wins and keeps its position.
pub fn unique_files(files: Vec<FileDescriptorProto>) -> Vec<FileDescriptorProto> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|file| seen.insert(file.name().to_string()))
        .collect()
}
