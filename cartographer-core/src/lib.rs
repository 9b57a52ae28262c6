//! Endpoint metadata and type model for Cartographer
//!
//! This crate holds the inputs of OpenAPI document generation:
//!
//! - [`types`] - semantic type descriptors and the [`TypeCatalog`] arena
//! - [`equivalence`] - structural keys deciding when two descriptors describe
//!   the same shape
//! - [`endpoint`] - endpoint metadata records and their validation
//! - [`route`] - route template normalisation
//! - [`logging`] - `tracing` subscriber configuration
//!
//! ## Example
//!
//! ```
//! use cartographer_core::{
//!     EndpointRecord, EndpointSet, Field, ParameterDescriptor, StructuralKey, TypeCatalog,
//!     TypeDescriptor,
//! };
//!
//! let mut types = TypeCatalog::new();
//! let user = types.object(
//!     "User",
//!     vec![
//!         Field::required("id", TypeDescriptor::int64()),
//!         Field::required("name", TypeDescriptor::string()),
//!     ],
//! );
//! let person = types.object(
//!     "Person",
//!     vec![
//!         Field::required("id", TypeDescriptor::int64()),
//!         Field::required("name", TypeDescriptor::string()),
//!     ],
//! );
//! assert_eq!(StructuralKey::of(&user, &types), StructuralKey::of(&person, &types));
//!
//! let set = EndpointSet::new(types).endpoint(
//!     EndpointRecord::new("GET", "/users/{id:int}")
//!         .parameter(ParameterDescriptor::path("id", TypeDescriptor::int64()))
//!         .returns(200, user),
//! );
//! let routes = set.validate().unwrap();
//! assert_eq!(routes[0].template.as_str(), "/users/{id}");
//! ```

pub mod endpoint;
pub mod equivalence;
pub mod error;
pub mod logging;
pub mod route;
pub mod types;

pub use endpoint::{
    EndpointRecord, EndpointSet, HttpMethod, ParameterDescriptor, ParameterLocation,
    ResponseDescriptor, ValidatedRoute,
};
pub use equivalence::StructuralKey;
pub use error::{Error, Result};
pub use route::RouteTemplate;
pub use types::{
    DeclaredKind, DeclaredType, Field, Primitive, PrimitiveKind, TypeCatalog, TypeDescriptor,
    TypeHandle,
};
