//! OpenAPI document generation for Cartographer
//!
//! This crate turns endpoint metadata (see `cartographer-core`) into an
//! OpenAPI document whose payload types live in a deduplicated library of
//! reusable schema components.
//!
//! ## Features
//!
//! - **Structural deduplication** - equivalent types share one component
//! - **Stable names** - `Item`, `Item2`, ... for distinct types sharing a name
//! - **Recursive types** - self and mutual references become `$ref`s
//! - **Deterministic output** - ordering depends only on input ordering
//! - **OpenAPI 3.0 and 3.1** - dialect-specific nullable encoding
//! - **JSON/YAML Export**
//!
//! ## Quick Start
//!
//! ```
//! use cartographer_core::{EndpointRecord, EndpointSet, Field, ParameterDescriptor, TypeCatalog, TypeDescriptor};
//! use cartographer_openapi::{OpenApiConfig, OpenApiService};
//!
//! let mut types = TypeCatalog::new();
//! let user = types.object(
//!     "User",
//!     vec![
//!         Field::required("id", TypeDescriptor::int64()),
//!         Field::required("name", TypeDescriptor::string()),
//!     ],
//! );
//!
//! let endpoints = EndpointSet::new(types)
//!     .endpoint(
//!         EndpointRecord::new("GET", "/users/{id}")
//!             .parameter(ParameterDescriptor::path("id", TypeDescriptor::int64()))
//!             .returns(200, user.clone()),
//!     )
//!     .endpoint(
//!         EndpointRecord::new("POST", "/users")
//!             .parameter(ParameterDescriptor::body("user", user.clone()))
//!             .returns(201, user),
//!     );
//!
//! let service = OpenApiService::new(OpenApiConfig::new("User API", "1.0.0")).unwrap();
//! let result = service.generate(&endpoints).unwrap();
//!
//! assert!(result.warnings.is_empty());
//! assert_eq!(result.document.paths.len(), 2);
//! assert!(result.document.component("User").is_some());
//! ```
//!
//! ## Sharing a Registry
//!
//! ```
//! use std::sync::Arc;
//! use cartographer_openapi::{InlineEnums, OpenApiConfig, OpenApiService, SchemaRegistry};
//!
//! let registry = Arc::new(SchemaRegistry::new().with_policy(InlineEnums));
//! let public = OpenApiService::with_registry(OpenApiConfig::new("Public", "1.0.0"), registry.clone());
//! let admin = OpenApiService::with_registry(OpenApiConfig::new("Admin", "1.0.0"), registry);
//!
//! assert!(Arc::ptr_eq(public.registry(), admin.registry()));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod policy;
pub mod registry;
pub mod service;
pub mod spec;
pub mod warning;

pub use builder::{BuildResult, DocumentBuilder};
pub use config::{ConfigFormat, ConfigLoader, DEFAULT_ENV_PREFIX, OpenApiConfig};
pub use error::{OpenApiError, Result};
pub use policy::{ComponentPerDeclaredType, InlineEnums, InlinePolicy};
pub use registry::{ComponentEntry, Resolved, SchemaDialect, SchemaRegistry};
pub use service::{EndpointSource, OpenApiService};
pub use spec::*;
pub use warning::BuildWarning;
