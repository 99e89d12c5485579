pub mod swagger;

pub use swagger::{check_version, from_value, load_swagger, parse_swagger, SUPPORTED_VERSION};
