//! Structural equivalence of type descriptors
//!
//! Two descriptors are equivalent when they describe the same shape, no
//! matter which declaration they came from. [`StructuralKey`] is the
//! canonical encoding of that shape; equal keys mean equivalent descriptors.
//!
//! Records reached again while they are still being expanded are written as
//! a back-reference (`^n`, where `n` counts enclosing records from the
//! innermost one outwards), so self-referential graphs produce finite keys.

use crate::types::{DeclaredKind, Primitive, TypeCatalog, TypeDescriptor, TypeHandle};
use std::fmt::{self, Write};

/// Key written for shapes that cannot be described.
const ANY: &str = "any";

/// Canonical encoding of a descriptor's shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructuralKey(String);

impl StructuralKey {
    /// Compute the key of `ty`, looking declared types up in `catalog`.
    pub fn of(ty: &TypeDescriptor, catalog: &TypeCatalog) -> Self {
        let mut out = String::new();
        let mut expanding = Vec::new();
        write_key(ty, catalog, &mut expanding, &mut out);
        StructuralKey(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StructuralKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_primitive(primitive: &Primitive, out: &mut String) {
    out.push_str(primitive.kind.as_str());
    if let Some(format) = &primitive.format {
        let _ = write!(out, ":{:?}", format);
    }
}

fn write_key(
    ty: &TypeDescriptor,
    catalog: &TypeCatalog,
    expanding: &mut Vec<TypeHandle>,
    out: &mut String,
) {
    match ty {
        TypeDescriptor::Primitive(primitive) => write_primitive(primitive, out),
        TypeDescriptor::Array(items) => {
            out.push_str("array<");
            write_key(items, catalog, expanding, out);
            out.push('>');
        }
        TypeDescriptor::Nullable(inner) => {
            out.push_str("nullable<");
            write_key(inner, catalog, expanding, out);
            out.push('>');
        }
        TypeDescriptor::Map { key, value } => {
            out.push_str("map<");
            write_key(key, catalog, expanding, out);
            out.push(',');
            write_key(value, catalog, expanding, out);
            out.push('>');
        }
        TypeDescriptor::Opaque(_) => out.push_str(ANY),
        TypeDescriptor::Declared(handle) => {
            if let Some(depth) = expanding.iter().rev().position(|open| open == handle) {
                let _ = write!(out, "^{}", depth);
                return;
            }

            match catalog.get(*handle).and_then(|declared| declared.kind()) {
                None => out.push_str(ANY),
                Some(DeclaredKind::Enum(variants)) => {
                    out.push_str("enum[");
                    for (i, variant) in variants.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        let _ = write!(out, "{:?}", variant);
                    }
                    out.push(']');
                }
                Some(DeclaredKind::Object(fields)) => {
                    expanding.push(*handle);
                    out.push_str("object{");
                    for (i, field) in fields.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        let _ = write!(out, "{:?}:", field.name);
                        write_key(&field.ty, catalog, expanding, out);
                        if field.required {
                            out.push('!');
                        }
                    }
                    out.push('}');
                    expanding.pop();
                }
            }
        }
    }
}
