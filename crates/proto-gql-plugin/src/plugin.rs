use protobuf::plugin::code_generator_response::{Feature, File};
use protobuf::plugin::{CodeGeneratorRequest, CodeGeneratorResponse};

use proto_gql_gen::{Config, Result};

/// Run the generator over one decoded request.
///
/// Pipeline failures are reported through the response `error` field so the
/// invoking compiler can surface them in its own diagnostics; the handshake
/// itself still succeeds and the supported-features mask is always set.
pub fn process(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse::new();
    response.set_supported_features(Feature::FEATURE_PROTO3_OPTIONAL as u64);
    match generate(request) {
        Ok(files) => response.file = files,
        Err(err) => response.set_error(err.to_string()),
    }
    response
}

fn generate(request: &CodeGeneratorRequest) -> Result<Vec<File>> {
    let config = Config::try_from(request.parameter())?;
    let outputs = proto_gql_gen::generate(
        request.proto_file.clone(),
        &request.file_to_generate,
        &config,
    )?;
    Ok(outputs
        .into_iter()
        .map(|output| {
            let mut file = File::new();
            file.set_name(output.name);
            file.set_content(output.content);
            file
        })
        .collect())
}
