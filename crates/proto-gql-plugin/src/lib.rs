mod plugin;

pub use plugin::process;
pub use proto_gql_gen::{Error, Result};
