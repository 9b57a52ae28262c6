//! Endpoint metadata records
//!
//! These are the read-only inputs of document generation: one
//! [`EndpointRecord`] per route and method, as reported by the host's routing
//! introspection, plus the [`TypeCatalog`] their type descriptors point into.

use crate::error::{Error, Result};
use crate::route::RouteTemplate;
use crate::types::{TypeCatalog, TypeDescriptor};
use std::fmt;
use std::str::FromStr;

/// HTTP methods that can carry an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Where a parameter travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Body => "body",
        }
    }
}

/// One declared parameter of an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub location: ParameterLocation,
    pub ty: TypeDescriptor,
    pub required: bool,
    pub description: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(
        name: impl Into<String>,
        location: ParameterLocation,
        ty: TypeDescriptor,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            ty,
            required,
            description: None,
        }
    }

    /// Required path parameter.
    pub fn path(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ParameterLocation::Path, ty, true)
    }

    /// Optional query parameter.
    pub fn query(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ParameterLocation::Query, ty, false)
    }

    /// Optional header parameter.
    pub fn header(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ParameterLocation::Header, ty, false)
    }

    /// Optional cookie parameter.
    pub fn cookie(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ParameterLocation::Cookie, ty, false)
    }

    /// Required request body.
    pub fn body(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ParameterLocation::Body, ty, true)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One possible response of an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    pub status: u16,
    /// Payload type; `None` for responses without a body.
    pub ty: Option<TypeDescriptor>,
    pub content_type: String,
    pub description: Option<String>,
}

impl ResponseDescriptor {
    pub fn new(status: u16, ty: Option<TypeDescriptor>, content_type: impl Into<String>) -> Self {
        Self {
            status,
            ty,
            content_type: content_type.into(),
            description: None,
        }
    }

    /// JSON response carrying `ty`.
    pub fn json(status: u16, ty: TypeDescriptor) -> Self {
        Self::new(status, Some(ty), "application/json")
    }

    /// Response without a body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, None, "")
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Metadata of one route + method, as reported by the host.
///
/// The method and route are kept as the raw strings the host produced;
/// [`EndpointRecord::validate`] checks and normalises them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EndpointRecord {
    pub method: String,
    pub route: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub responses: Vec<ResponseDescriptor>,
    /// Content types accepted for the request body.
    pub accepts: Vec<String>,
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub deprecated: bool,
}

impl EndpointRecord {
    pub fn new(method: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            route: route.into(),
            ..Default::default()
        }
    }

    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn response(mut self, response: ResponseDescriptor) -> Self {
        self.responses.push(response);
        self
    }

    /// Shorthand for a JSON response.
    pub fn returns(self, status: u16, ty: TypeDescriptor) -> Self {
        self.response(ResponseDescriptor::json(status, ty))
    }

    pub fn accepts(mut self, content_type: impl Into<String>) -> Self {
        self.accepts.push(content_type.into());
        self
    }

    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Check the record and normalise its method and route.
    ///
    /// `index` is the record's position in its [`EndpointSet`] and is only
    /// used for error reporting.
    pub fn validate(&self, index: usize) -> Result<ValidatedRoute> {
        if self.method.trim().is_empty() {
            return Err(Error::MissingField {
                index,
                field: "method",
            });
        }
        let method = self.method.parse::<HttpMethod>().map_err(|method| Error::InvalidMethod {
            index,
            method,
        })?;

        if self.route.trim().is_empty() {
            return Err(Error::MissingField {
                index,
                field: "route",
            });
        }
        let template = RouteTemplate::parse(&self.route).map_err(|reason| Error::InvalidRoute {
            index,
            route: self.route.clone(),
            reason,
        })?;

        if let Some(position) = self.parameters.iter().position(|p| p.name.trim().is_empty()) {
            return Err(Error::UnnamedParameter { index, position });
        }

        Ok(ValidatedRoute { method, template })
    }
}

/// Method and normalised template of a record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoute {
    pub method: HttpMethod,
    pub template: RouteTemplate,
}

/// Endpoint records together with the catalog their types live in.
#[derive(Debug, Clone, Default)]
pub struct EndpointSet {
    pub types: TypeCatalog,
    pub endpoints: Vec<EndpointRecord>,
}

impl EndpointSet {
    pub fn new(types: TypeCatalog) -> Self {
        Self {
            types,
            endpoints: Vec::new(),
        }
    }

    pub fn endpoint(mut self, record: EndpointRecord) -> Self {
        self.endpoints.push(record);
        self
    }

    pub fn push(&mut self, record: EndpointRecord) {
        self.endpoints.push(record);
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Validate every record, stopping at the first malformed one.
    pub fn validate(&self) -> Result<Vec<ValidatedRoute>> {
        self.endpoints
            .iter()
            .enumerate()
            .map(|(index, record)| record.validate(index))
            .collect()
    }
}
