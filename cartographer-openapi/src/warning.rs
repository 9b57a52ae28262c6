//! Non-fatal build diagnostics

use serde::Serialize;
use std::fmt;

/// A condition that did not stop the build but degraded or altered its output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A type could not be described and was emitted as the empty schema.
    Unrepresentable { type_name: String, reason: String },
    /// Two records share a route template and method; the later one was kept.
    DuplicateOperation { method: String, route: String },
    /// Two responses of one operation share status and content type; the later one was kept.
    DuplicateResponse {
        method: String,
        route: String,
        status: u16,
        content_type: String,
    },
    /// Body parameters after the first one were dropped.
    MultipleRequestBodies {
        method: String,
        route: String,
        ignored: Vec<String>,
    },
    DuplicateOperationId { operation_id: String },
}

impl BuildWarning {
    pub(crate) fn unrepresentable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildWarning::Unrepresentable {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::Unrepresentable { type_name, reason } => {
                write!(f, "type `{}` emitted as an unconstrained schema: {}", type_name, reason)
            }
            BuildWarning::DuplicateOperation { method, route } => {
                write!(f, "duplicate operation {} {}; the last registration wins", method, route)
            }
            BuildWarning::DuplicateResponse {
                method,
                route,
                status,
                content_type,
            } => write!(
                f,
                "{} {}: duplicate response {} `{}`; the last one wins",
                method, route, status, content_type
            ),
            BuildWarning::MultipleRequestBodies {
                method,
                route,
                ignored,
            } => write!(
                f,
                "{} {}: only one request body is supported, ignored: {}",
                method,
                route,
                ignored.join(", ")
            ),
            BuildWarning::DuplicateOperationId { operation_id } => {
                write!(f, "operationId `{}` is used by more than one operation", operation_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = BuildWarning::DuplicateOperation {
            method: "GET".to_string(),
            route: "/users".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "duplicate operation GET /users; the last registration wins"
        );

        let warning = BuildWarning::unrepresentable("Stream", "opaque type");
        assert!(warning.to_string().contains("`Stream`"));
    }

    #[test]
    fn test_serialize_tagged() {
        let warning = BuildWarning::DuplicateOperationId {
            operation_id: "getUser".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "duplicate_operation_id");
        assert_eq!(json["operation_id"], "getUser");
    }
}
