use std::io::{Read, Write};

use protobuf::Message;

// A request that cannot be decoded is a hard failure: no response can be
// produced for it. Later failures are embedded in the response instead.
fn main() -> proto_gql_plugin::Result<()> {
    let mut buf = Vec::new();
    std::io::stdin().read_to_end(&mut buf)?;
    let req = protobuf::plugin::CodeGeneratorRequest::parse_from_bytes(&buf)?;
    let resp = proto_gql_plugin::process(&req);
    let out = resp.write_to_bytes()?;
    std::io::stdout().write_all(&out)?;
    Ok(())
}
