//! Inline-versus-component policy
//!
//! Anonymous shapes (primitives, arrays, nullable wrappers, maps) are always
//! written inline. Declared types are offered to an [`InlinePolicy`]; a type
//! the policy inlines is expanded at every use site instead of becoming a
//! component. Recursive types are always components regardless of policy.

use cartographer_core::{DeclaredKind, DeclaredType};

/// Decides whether a declared type is written inline.
pub trait InlinePolicy: Send + Sync {
    fn inline(&self, declared: &DeclaredType) -> bool;
}

/// Every declared object and enumeration becomes a component.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentPerDeclaredType;

impl InlinePolicy for ComponentPerDeclaredType {
    fn inline(&self, _declared: &DeclaredType) -> bool {
        false
    }
}

/// Enumerations are inlined, objects become components.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineEnums;

impl InlinePolicy for InlineEnums {
    fn inline(&self, declared: &DeclaredType) -> bool {
        matches!(declared.kind(), Some(DeclaredKind::Enum(_)))
    }
}

impl<F> InlinePolicy for F
where
    F: Fn(&DeclaredType) -> bool + Send + Sync,
{
    fn inline(&self, declared: &DeclaredType) -> bool {
        self(declared)
    }
}
