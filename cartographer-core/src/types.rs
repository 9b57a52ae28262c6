//! Semantic type descriptors
//!
//! A [`TypeDescriptor`] describes the shape of a payload independent of the
//! language it was declared in. Anonymous shapes (primitives, arrays,
//! nullable wrappers, maps) are plain values; named records and enumerations
//! live in a [`TypeCatalog`] arena and are referenced through a
//! [`TypeHandle`]. Going through the arena is what lets a record refer to
//! itself, or two records refer to each other, without building an
//! ownership cycle:
//!
//! ```
//! use cartographer_core::types::{Field, TypeCatalog, TypeDescriptor};
//!
//! let mut types = TypeCatalog::new();
//! let node = types.declare("Node");
//! let node_ty = types
//!     .define_object(
//!         node,
//!         vec![
//!             Field::required("value", TypeDescriptor::int32()),
//!             Field::optional("next", TypeDescriptor::nullable(TypeDescriptor::declared(node))),
//!         ],
//!     )
//!     .unwrap();
//!
//! assert!(types.is_recursive(node));
//! assert_eq!(node_ty.handle(), Some(node));
//! ```

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CATALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Primitive kinds understood by the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
        }
    }
}

/// A primitive kind with an optional format qualifier (`int64`, `date-time`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub format: Option<String>,
}

impl Primitive {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind, format: None }
    }

    pub fn with_format(kind: PrimitiveKind, format: impl Into<String>) -> Self {
        Self {
            kind,
            format: Some(format.into()),
        }
    }
}

/// Handle to a declared type inside a [`TypeCatalog`].
///
/// Handles remember which catalog issued them, so a descriptor paired with
/// the wrong catalog is detected instead of silently resolving to an
/// unrelated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle {
    catalog: u64,
    index: usize,
}

/// Abstract description of a value's shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Array(Box<TypeDescriptor>),
    Nullable(Box<TypeDescriptor>),
    /// Dictionary keyed by `key`. Only string keys can be documented.
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    /// A named record or enumeration held by a [`TypeCatalog`].
    Declared(TypeHandle),
    /// Something the host could not describe (streams, callbacks, ...).
    Opaque(String),
}

impl TypeDescriptor {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        TypeDescriptor::Primitive(Primitive::new(kind))
    }

    pub fn formatted(kind: PrimitiveKind, format: impl Into<String>) -> Self {
        TypeDescriptor::Primitive(Primitive::with_format(kind, format))
    }

    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    pub fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    pub fn int32() -> Self {
        Self::formatted(PrimitiveKind::Integer, "int32")
    }

    pub fn int64() -> Self {
        Self::formatted(PrimitiveKind::Integer, "int64")
    }

    pub fn number() -> Self {
        Self::primitive(PrimitiveKind::Number)
    }

    pub fn float() -> Self {
        Self::formatted(PrimitiveKind::Number, "float")
    }

    pub fn double() -> Self {
        Self::formatted(PrimitiveKind::Number, "double")
    }

    pub fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub fn date_time() -> Self {
        Self::formatted(PrimitiveKind::String, "date-time")
    }

    pub fn uuid() -> Self {
        Self::formatted(PrimitiveKind::String, "uuid")
    }

    pub fn binary() -> Self {
        Self::formatted(PrimitiveKind::String, "binary")
    }

    pub fn array(items: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(items))
    }

    pub fn nullable(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Nullable(Box::new(inner))
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Dictionary with string keys.
    pub fn string_map(value: TypeDescriptor) -> Self {
        Self::map(Self::string(), value)
    }

    pub fn declared(handle: TypeHandle) -> Self {
        TypeDescriptor::Declared(handle)
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        TypeDescriptor::Opaque(name.into())
    }

    /// Handle of the declared type, if this descriptor is one.
    pub fn handle(&self) -> Option<TypeHandle> {
        match self {
            TypeDescriptor::Declared(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Whether any declared type appears anywhere in this descriptor.
    pub fn contains_declared(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(_) | TypeDescriptor::Opaque(_) => false,
            TypeDescriptor::Declared(_) => true,
            TypeDescriptor::Array(inner) | TypeDescriptor::Nullable(inner) => {
                inner.contains_declared()
            }
            TypeDescriptor::Map { key, value } => key.contains_declared() || value.contains_declared(),
        }
    }

    fn collect_handles(&self, out: &mut Vec<TypeHandle>) {
        match self {
            TypeDescriptor::Primitive(_) | TypeDescriptor::Opaque(_) => {}
            TypeDescriptor::Declared(handle) => out.push(*handle),
            TypeDescriptor::Array(inner) | TypeDescriptor::Nullable(inner) => {
                inner.collect_handles(out)
            }
            TypeDescriptor::Map { key, value } => {
                key.collect_handles(out);
                value.collect_handles(out);
            }
        }
    }
}

/// One named field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
    pub required: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor, required: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            required,
        }
    }

    pub fn required(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ty, true)
    }

    pub fn optional(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::new(name, ty, false)
    }
}

/// Body of a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredKind {
    /// Record with ordered fields.
    Object(Vec<Field>),
    /// String enumeration with ordered variants.
    Enum(Vec<String>),
}

/// A named type in the catalog. The body is `None` until defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    name: String,
    kind: Option<DeclaredKind>,
}

impl DeclaredType {
    /// Declared name, as reported by the host.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<&DeclaredKind> {
        self.kind.as_ref()
    }

    pub fn is_defined(&self) -> bool {
        self.kind.is_some()
    }

    pub fn fields(&self) -> Option<&[Field]> {
        match &self.kind {
            Some(DeclaredKind::Object(fields)) => Some(fields),
            _ => None,
        }
    }

    pub fn variants(&self) -> Option<&[String]> {
        match &self.kind {
            Some(DeclaredKind::Enum(variants)) => Some(variants),
            _ => None,
        }
    }
}

/// Arena of declared types.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    id: u64,
    types: Vec<DeclaredType>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self {
            id: NEXT_CATALOG_ID.fetch_add(1, Ordering::Relaxed),
            types: Vec::new(),
        }
    }

    /// Reserve a handle for a named type whose body is defined later.
    pub fn declare(&mut self, name: impl Into<String>) -> TypeHandle {
        let index = self.types.len();
        self.types.push(DeclaredType {
            name: name.into(),
            kind: None,
        });
        TypeHandle {
            catalog: self.id,
            index,
        }
    }

    /// Define the fields of a previously declared record.
    pub fn define_object(&mut self, handle: TypeHandle, fields: Vec<Field>) -> Result<TypeDescriptor> {
        self.define(handle, DeclaredKind::Object(collapse_fields(fields)))
    }

    /// Define the variants of a previously declared enumeration.
    pub fn define_enum<I, S>(&mut self, handle: TypeHandle, variants: I) -> Result<TypeDescriptor>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        self.define(handle, DeclaredKind::Enum(variants))
    }

    fn define(&mut self, handle: TypeHandle, kind: DeclaredKind) -> Result<TypeDescriptor> {
        if handle.catalog != self.id {
            return Err(Error::UnknownType);
        }
        let declared = self.types.get_mut(handle.index).ok_or(Error::UnknownType)?;
        if declared.kind.is_some() {
            return Err(Error::TypeAlreadyDefined(declared.name.clone()));
        }
        declared.kind = Some(kind);
        Ok(TypeDescriptor::Declared(handle))
    }

    /// Declare and define a record in one step.
    pub fn object(&mut self, name: impl Into<String>, fields: Vec<Field>) -> TypeDescriptor {
        let index = self.types.len();
        self.types.push(DeclaredType {
            name: name.into(),
            kind: Some(DeclaredKind::Object(collapse_fields(fields))),
        });
        TypeDescriptor::Declared(TypeHandle {
            catalog: self.id,
            index,
        })
    }

    /// Declare and define a string enumeration in one step.
    pub fn enumeration<I, S>(&mut self, name: impl Into<String>, variants: I) -> TypeDescriptor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = self.types.len();
        self.types.push(DeclaredType {
            name: name.into(),
            kind: Some(DeclaredKind::Enum(
                variants.into_iter().map(Into::into).collect(),
            )),
        });
        TypeDescriptor::Declared(TypeHandle {
            catalog: self.id,
            index,
        })
    }

    /// Whether `handle` was issued by this catalog.
    pub fn owns(&self, handle: TypeHandle) -> bool {
        handle.catalog == self.id && handle.index < self.types.len()
    }

    pub fn get(&self, handle: TypeHandle) -> Option<&DeclaredType> {
        if handle.catalog != self.id {
            return None;
        }
        self.types.get(handle.index)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Whether the declared type can reach itself through its fields.
    pub fn is_recursive(&self, handle: TypeHandle) -> bool {
        let mut visited = HashSet::new();
        let mut pending = Vec::new();
        self.push_references(handle, &mut pending);

        while let Some(next) = pending.pop() {
            if next == handle {
                return true;
            }
            if visited.insert(next) {
                self.push_references(next, &mut pending);
            }
        }
        false
    }

    fn push_references(&self, handle: TypeHandle, out: &mut Vec<TypeHandle>) {
        if let Some(fields) = self.get(handle).and_then(DeclaredType::fields) {
            for field in fields {
                field.ty.collect_handles(out);
            }
        }
    }
}

/// A repeated field name replaces the earlier field in its original position.
fn collapse_fields(fields: Vec<Field>) -> Vec<Field> {
    let mut collapsed: Vec<Field> = Vec::with_capacity(fields.len());
    for field in fields {
        match collapsed.iter_mut().find(|existing| existing.name == field.name) {
            Some(existing) => *existing = field,
            None => collapsed.push(field),
        }
    }
    collapsed
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
