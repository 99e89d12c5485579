pub mod swagger;

pub use swagger::{
    HeaderDef, Operation, ParameterDef, ParameterLocation, ParameterType, PathItem, ResponseDef,
    SwaggerSpec,
};
