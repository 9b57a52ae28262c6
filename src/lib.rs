// Cartographer - OpenAPI documents from endpoint metadata
//
// Re-exports the metadata model and the document generator so hosts can
// depend on a single crate.

pub use cartographer_core::*;

pub use cartographer_openapi;

pub mod prelude {
    pub use cartographer_core::{
        EndpointRecord, EndpointSet, Field, HttpMethod, ParameterDescriptor, ResponseDescriptor,
        TypeCatalog, TypeDescriptor,
    };
    pub use cartographer_openapi::{
        BuildResult, BuildWarning, DocumentBuilder, EndpointSource, InlinePolicy, OpenApiConfig,
        OpenApiError, OpenApiService, OpenApiSpec, SchemaDialect, SchemaRegistry,
    };
}
