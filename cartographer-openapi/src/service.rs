//! Host-facing entry point
//!
//! [`OpenApiService`] is what a host registers once at startup. It owns the
//! shared [`SchemaRegistry`] for its whole lifetime and creates a fresh
//! [`DocumentBuilder`] for every generation call.

use crate::builder::{BuildResult, DocumentBuilder};
use crate::config::OpenApiConfig;
use crate::error::Result;
use crate::registry::SchemaRegistry;
use cartographer_core::EndpointSet;
use std::sync::Arc;
use tracing::info;

/// Supplies endpoint metadata, typically by walking a host's routing table.
pub trait EndpointSource: Send + Sync {
    fn endpoints(&self) -> EndpointSet;
}

impl EndpointSource for EndpointSet {
    fn endpoints(&self) -> EndpointSet {
        self.clone()
    }
}

/// Generates documents against one long-lived registry.
#[derive(Debug, Clone)]
pub struct OpenApiService {
    config: Arc<OpenApiConfig>,
    registry: Arc<SchemaRegistry>,
}

impl OpenApiService {
    /// Create a service whose registry matches the configured OpenAPI version.
    pub fn new(config: OpenApiConfig) -> Result<Self> {
        let registry = SchemaRegistry::with_dialect(config.dialect()?);
        Ok(Self::with_registry(config, Arc::new(registry)))
    }

    /// Create a service around an existing registry.
    pub fn with_registry(config: OpenApiConfig, registry: Arc<SchemaRegistry>) -> Self {
        info!(
            title = %config.title,
            openapi = %config.openapi_version,
            "OpenAPI service ready"
        );
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub fn generate(&self, endpoints: &EndpointSet) -> Result<BuildResult> {
        DocumentBuilder::new(&self.registry, &self.config).build(endpoints)
    }

    pub fn generate_from(&self, source: &impl EndpointSource) -> Result<BuildResult> {
        self.generate(&source.endpoints())
    }

    /// Generate and serialize as pretty JSON.
    pub fn generate_json(&self, endpoints: &EndpointSet) -> Result<String> {
        self.generate(endpoints)?.document.to_json()
    }

    pub fn generate_yaml(&self, endpoints: &EndpointSet) -> Result<String> {
        self.generate(endpoints)?.document.to_yaml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpenApiError;
    use crate::registry::SchemaDialect;
    use cartographer_core::{EndpointRecord, Field, TypeCatalog, TypeDescriptor};

    fn users() -> EndpointSet {
        let mut types = TypeCatalog::new();
        let user = types.object("User", vec![Field::required("id", TypeDescriptor::uuid())]);
        EndpointSet::new(types).endpoint(
            EndpointRecord::new("GET", "/users").returns(200, TypeDescriptor::array(user)),
        )
    }

    #[test]
    fn test_registry_follows_config_version() {
        let service = OpenApiService::new(OpenApiConfig::default().openapi_version("3.1.0")).unwrap();
        assert_eq!(service.registry().dialect(), SchemaDialect::OpenApi31);

        let err = OpenApiService::new(OpenApiConfig::default().openapi_version("4.0")).unwrap_err();
        assert!(matches!(err, OpenApiError::Config(_)));
    }

    #[test]
    fn test_registry_survives_generations() {
        let service = OpenApiService::new(OpenApiConfig::new("Users", "1.0.0")).unwrap();

        let first = service.generate(&users()).unwrap();
        let second = service.generate_from(&users()).unwrap();
        assert_eq!(first.document, second.document);
        assert_eq!(service.registry().len(), 1);
    }

    #[test]
    fn test_serialized_output() {
        let service = OpenApiService::new(OpenApiConfig::new("Users", "1.0.0")).unwrap();

        let json = service.generate_json(&users()).unwrap();
        assert!(json.contains("\"$ref\": \"#/components/schemas/User\""));

        let yaml = service.generate_yaml(&users()).unwrap();
        assert!(yaml.contains("openapi: 3.0.3"));
        assert!(yaml.contains("title: Users"));
    }
}
