//! Document assembly
//!
//! A [`DocumentBuilder`] lives for one generation call. It validates the
//! endpoint set, asks the shared [`SchemaRegistry`] for every payload type and
//! assembles the path items. Nothing but the registry outlives it.

use crate::config::OpenApiConfig;
use crate::error::{OpenApiError, Result};
use crate::registry::SchemaRegistry;
use crate::spec::{
    Components, MediaType, OpenApiSpec, Operation, Parameter, ParameterLocation, PathItem,
    RequestBody, Response, SchemaRef, Tag,
};
use crate::warning::BuildWarning;
use cartographer_core::{
    EndpointRecord, EndpointSet, HttpMethod, ParameterDescriptor, ParameterLocation as Location,
    TypeCatalog, TypeDescriptor, ValidatedRoute,
};
use http::StatusCode;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A generated document plus the non-fatal problems met while building it.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub document: OpenApiSpec,
    pub warnings: Vec<BuildWarning>,
}

/// Builds one document from one endpoint set.
pub struct DocumentBuilder<'a> {
    registry: &'a SchemaRegistry,
    config: &'a OpenApiConfig,
    warnings: Vec<BuildWarning>,
    /// Warnings of the operation being built, committed only if it survives.
    pending: Vec<BuildWarning>,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(registry: &'a SchemaRegistry, config: &'a OpenApiConfig) -> Self {
        Self {
            registry,
            config,
            warnings: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Build the document.
    ///
    /// Fails without touching the registry when a record is malformed or the
    /// configured OpenAPI version needs a different schema dialect than the
    /// registry emits.
    pub fn build(mut self, endpoints: &EndpointSet) -> Result<BuildResult> {
        let routes = endpoints.validate()?;

        let requested = self.config.dialect()?;
        if requested != self.registry.dialect() {
            return Err(OpenApiError::DialectMismatch {
                registry: self.registry.dialect(),
                requested,
                version: self.config.openapi_version.clone(),
            });
        }

        debug!(endpoints = endpoints.len(), "Building OpenAPI document");

        // The last record for a (template, method) pair is the one kept.
        let winners: HashMap<(&str, HttpMethod), usize> = routes
            .iter()
            .enumerate()
            .map(|(index, route)| ((route.template.as_str(), route.method), index))
            .collect();

        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        for (index, (record, route)) in endpoints.endpoints.iter().zip(&routes).enumerate() {
            let operation = self.operation(&endpoints.types, record, route);
            if winners.get(&(route.template.as_str(), route.method)) != Some(&index) {
                self.pending.clear();
            }
            let item = paths.entry(route.template.as_str().to_string()).or_default();
            if item.set_operation(route.method, operation).is_some() {
                self.warn(BuildWarning::DuplicateOperation {
                    method: route.method.to_string(),
                    route: route.template.to_string(),
                });
            }
            self.commit();
        }

        self.check_operation_ids(&paths);
        self.commit();
        let tags = document_tags(&paths);

        let schemas = self.registry.components();
        let components = (!schemas.is_empty()).then_some(Components { schemas });

        let document = OpenApiSpec {
            openapi: self.config.openapi_version.clone(),
            info: self.config.info(),
            servers: self.config.servers.clone(),
            paths,
            components,
            tags,
        };

        debug!(
            paths = document.paths.len(),
            warnings = self.warnings.len(),
            "Built OpenAPI document"
        );

        Ok(BuildResult {
            document,
            warnings: self.warnings,
        })
    }

    fn warn(&mut self, warning: BuildWarning) {
        if !self.pending.contains(&warning) {
            self.pending.push(warning);
        }
    }

    /// Move pending warnings into the result once each, in first-seen order.
    fn commit(&mut self) {
        for warning in std::mem::take(&mut self.pending) {
            if !self.warnings.contains(&warning) {
                warn!(%warning, "OpenAPI generation warning");
                self.warnings.push(warning);
            }
        }
    }

    fn schema(&mut self, types: &TypeCatalog, ty: &TypeDescriptor) -> SchemaRef {
        let resolved = self.registry.resolve(types, ty);
        for warning in resolved.warnings {
            self.warn(warning);
        }
        resolved.schema
    }

    fn operation(
        &mut self,
        types: &TypeCatalog,
        record: &EndpointRecord,
        route: &ValidatedRoute,
    ) -> Operation {
        let mut parameters = Vec::new();
        let mut bodies = Vec::new();
        for descriptor in &record.parameters {
            match location(descriptor.location) {
                Some(location) => parameters.push(self.parameter(types, descriptor, location)),
                None => bodies.push(descriptor),
            }
        }

        for name in route.template.parameters() {
            let declared = record
                .parameters
                .iter()
                .any(|p| p.location == Location::Path && &p.name == name);
            if !declared {
                parameters.push(Parameter {
                    name: name.clone(),
                    location: ParameterLocation::Path,
                    description: None,
                    required: true,
                    schema: Some(self.schema(types, &TypeDescriptor::string())),
                });
            }
        }

        let request_body = match bodies.split_first() {
            Some((body, ignored)) => {
                if !ignored.is_empty() {
                    self.warn(BuildWarning::MultipleRequestBodies {
                        method: route.method.to_string(),
                        route: route.template.to_string(),
                        ignored: ignored.iter().map(|p| p.name.clone()).collect(),
                    });
                }
                Some(self.request_body(types, record, body))
            }
            None => None,
        };

        let tags = if record.tags.is_empty() {
            self.config.default_tag.iter().cloned().collect()
        } else {
            record.tags.clone()
        };

        Operation {
            tags,
            summary: record.summary.clone(),
            description: record.description.clone(),
            operation_id: record.operation_id.clone(),
            parameters,
            request_body,
            responses: self.responses(types, record, route),
            deprecated: record.deprecated.then_some(true),
        }
    }

    fn parameter(
        &mut self,
        types: &TypeCatalog,
        descriptor: &ParameterDescriptor,
        location: ParameterLocation,
    ) -> Parameter {
        Parameter {
            name: descriptor.name.clone(),
            location,
            description: descriptor.description.clone(),
            required: descriptor.required,
            schema: Some(self.schema(types, &descriptor.ty)),
        }
    }

    fn request_body(
        &mut self,
        types: &TypeCatalog,
        record: &EndpointRecord,
        body: &ParameterDescriptor,
    ) -> RequestBody {
        let schema = self.schema(types, &body.ty);
        let content_types = if record.accepts.is_empty() {
            vec![self.config.default_content_type.clone()]
        } else {
            record.accepts.clone()
        };

        let content = content_types
            .into_iter()
            .map(|content_type| {
                (
                    content_type,
                    MediaType {
                        schema: Some(schema.clone()),
                    },
                )
            })
            .collect();

        RequestBody {
            description: body.description.clone(),
            content,
            required: Some(body.required),
        }
    }

    fn responses(
        &mut self,
        types: &TypeCatalog,
        record: &EndpointRecord,
        route: &ValidatedRoute,
    ) -> IndexMap<String, Response> {
        let mut responses: IndexMap<String, Response> = IndexMap::new();
        let mut seen = HashSet::new();

        for descriptor in &record.responses {
            let content_type = match (&descriptor.ty, descriptor.content_type.is_empty()) {
                (Some(_), true) => self.config.default_content_type.clone(),
                _ => descriptor.content_type.clone(),
            };
            let duplicate = !seen.insert((descriptor.status, content_type.clone()));
            if duplicate {
                self.warn(BuildWarning::DuplicateResponse {
                    method: route.method.to_string(),
                    route: route.template.to_string(),
                    status: descriptor.status,
                    content_type: content_type.clone(),
                });
            }

            let schema = descriptor.ty.as_ref().map(|ty| self.schema(types, ty));
            let response = responses
                .entry(descriptor.status.to_string())
                .or_insert_with(|| Response {
                    description: reason_phrase(descriptor.status).to_string(),
                    content: None,
                });
            match &descriptor.description {
                Some(description) => response.description = description.clone(),
                None if duplicate => {
                    response.description = reason_phrase(descriptor.status).to_string()
                }
                None => {}
            }

            match schema {
                Some(schema) => {
                    response.content.get_or_insert_with(IndexMap::new).insert(
                        content_type,
                        MediaType {
                            schema: Some(schema),
                        },
                    );
                }
                // A later untyped response replaces the earlier media entry.
                None if duplicate => {
                    let emptied = response.content.as_mut().is_some_and(|content| {
                        content.shift_remove(&content_type);
                        content.is_empty()
                    });
                    if emptied {
                        response.content = None;
                    }
                }
                None => {}
            }
        }

        if responses.is_empty() {
            responses.insert(
                StatusCode::OK.as_u16().to_string(),
                Response {
                    description: reason_phrase(StatusCode::OK.as_u16()).to_string(),
                    content: None,
                },
            );
        }
        responses
    }

    fn check_operation_ids(&mut self, paths: &IndexMap<String, PathItem>) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for (_, operation) in paths.values().flat_map(PathItem::operations) {
            if let Some(id) = operation.operation_id.as_deref() {
                let count = counts.entry(id).or_insert(0);
                *count += 1;
                if *count == 2 {
                    order.push(id.to_string());
                }
            }
        }
        for operation_id in order {
            self.warn(BuildWarning::DuplicateOperationId { operation_id });
        }
    }
}

fn location(location: Location) -> Option<ParameterLocation> {
    match location {
        Location::Path => Some(ParameterLocation::Path),
        Location::Query => Some(ParameterLocation::Query),
        Location::Header => Some(ParameterLocation::Header),
        Location::Cookie => Some(ParameterLocation::Cookie),
        Location::Body => None,
    }
}

fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Response")
}

/// Union of operation tags in first-seen order.
fn document_tags(paths: &IndexMap<String, PathItem>) -> Vec<Tag> {
    let mut seen = HashSet::new();
    paths
        .values()
        .flat_map(PathItem::operations)
        .flat_map(|(_, operation)| operation.tags.iter())
        .filter(|tag| seen.insert(*tag))
        .map(|name| Tag {
            name: name.clone(),
            description: None,
        })
        .collect()
}
