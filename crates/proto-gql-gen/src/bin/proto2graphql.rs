use anyhow::Context;
use clap::Parser;

use proto_gql_gen::Config;
use proto_gql_gen::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from(&args);

    let mut parser = protobuf_parse::Parser::new();
    parser.pure();
    if args.import_paths.is_empty() {
        parser.include(".");
    } else {
        parser.includes(&args.import_paths);
    }
    parser.inputs(&args.file_names);
    let parsed = parser
        .parse_and_typecheck()
        .context("cannot parse proto files")?;

    let files_to_generate: Vec<String> = parsed
        .relative_paths
        .iter()
        .map(|path| path.to_string())
        .collect();
    let outputs = proto_gql_gen::generate(parsed.file_descriptors, &files_to_generate, &config)?;
    for output in &outputs {
        proto_gql_gen::write_output(output)
            .with_context(|| format!("cannot write {}", output.name))?;
    }
    Ok(())
}
