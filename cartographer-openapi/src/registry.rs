//! Schema component registry
//!
//! The registry turns [`TypeDescriptor`]s into schema fragments and keeps the
//! table of reusable components those fragments point at. It lives as long as
//! its host and is shared by every document build.
//!
//! Declared types are identified by their [`StructuralKey`], not their name:
//! two declarations with the same shape share one component, and two
//! declarations with the same name but different shapes get distinct
//! components (`Item`, `Item2`, ...). A name, once assigned, always denotes the
//! same shape.
//!
//! # Locking
//!
//! The table sits behind one [`RwLock`]. A resolution first runs against a
//! read guard in lookup-only mode, which is enough when every declared type
//! it meets is already registered. On the first miss it retries under the
//! write guard, re-checking every key before registering anything, so
//! concurrent builds never register the same shape twice.

use crate::policy::{ComponentPerDeclaredType, InlinePolicy};
use crate::spec::{Schema, SchemaRef, SchemaType};
use crate::warning::BuildWarning;
use cartographer_core::{
    DeclaredKind, Primitive, PrimitiveKind, StructuralKey, TypeCatalog, TypeDescriptor,
    TypeHandle,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Schema flavour a registry emits. Only nullable encoding differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaDialect {
    /// `nullable: true`
    #[default]
    OpenApi30,
    /// `anyOf: [.., {type: null}]`
    OpenApi31,
}

impl SchemaDialect {
    /// Dialect of an OpenAPI version string such as `3.0.3` or `3.1.0`.
    pub fn from_version(version: &str) -> Option<Self> {
        let mut parts = version.trim().split('.');
        match (parts.next(), parts.next()) {
            (Some("3"), Some("0")) => Some(SchemaDialect::OpenApi30),
            (Some("3"), Some("1")) => Some(SchemaDialect::OpenApi31),
            _ => None,
        }
    }

    /// Version string written into documents of this dialect by default.
    pub fn default_version(&self) -> &'static str {
        match self {
            SchemaDialect::OpenApi30 => "3.0.3",
            SchemaDialect::OpenApi31 => "3.1.0",
        }
    }
}

impl fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDialect::OpenApi30 => f.write_str("OpenAPI 3.0"),
            SchemaDialect::OpenApi31 => f.write_str("OpenAPI 3.1"),
        }
    }
}

/// Outcome of resolving one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub schema: SchemaRef,
    /// Degradations in the descriptor or in any component it references.
    pub warnings: Vec<BuildWarning>,
}

/// A registered component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentEntry {
    /// Canonical name, unique for the registry's lifetime.
    pub name: String,
    pub schema: Schema,
    /// Declared name of the type that first produced this shape.
    pub origin: String,
    pub key: StructuralKey,
}

#[derive(Debug)]
struct Slot {
    origin: String,
    key: StructuralKey,
    /// `None` while the component's own fields are being resolved.
    body: Option<Schema>,
    warnings: Vec<BuildWarning>,
    /// Components referenced directly from the body.
    refs: Vec<String>,
}

#[derive(Debug, Default)]
struct ComponentTable {
    by_key: HashMap<StructuralKey, String>,
    slots: IndexMap<String, Slot>,
    /// Shapes the inline policy chose to inline. The first decision for a
    /// shape binds every equivalent declaration.
    inlined: HashSet<StructuralKey>,
}

impl ComponentTable {
    fn name_for(&self, key: &StructuralKey) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    fn is_inlined(&self, key: &StructuralKey) -> bool {
        self.inlined.contains(key)
    }

    /// Claim a canonical name for `key` before its body exists.
    fn reserve(&mut self, origin: &str, key: StructuralKey) -> String {
        let base = sanitize(origin);
        let mut name = base.clone();
        let mut suffix = 2;
        while self.slots.contains_key(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }

        self.by_key.insert(key.clone(), name.clone());
        self.slots.insert(
            name.clone(),
            Slot {
                origin: origin.to_string(),
                key,
                body: None,
                warnings: Vec::new(),
                refs: Vec::new(),
            },
        );
        name
    }

    fn complete(&mut self, name: &str, body: Schema, frame: Frame) {
        if let Some(slot) = self.slots.get_mut(name) {
            slot.body = Some(body);
            slot.warnings = frame.warnings;
            slot.refs = frame.refs;
        }
    }

    /// Warnings of `roots` and of every component reachable from them.
    fn transitive_warnings(&self, roots: &[String]) -> Vec<BuildWarning> {
        let mut warnings = Vec::new();
        let mut visited = HashSet::new();
        let mut queue: Vec<&str> = roots.iter().map(String::as_str).collect();
        let mut next = 0;

        while let Some(name) = queue.get(next).copied() {
            next += 1;
            if !visited.insert(name) {
                continue;
            }
            if let Some(slot) = self.slots.get(name) {
                warnings.extend(slot.warnings.iter().cloned());
                queue.extend(slot.refs.iter().map(String::as_str));
            }
        }
        warnings
    }
}

/// Keep `[A-Za-z0-9._-]`, which is what component names may contain.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    if cleaned.is_empty() {
        "Schema".to_string()
    } else {
        cleaned
    }
}

/// Registry of reusable schema components.
pub struct SchemaRegistry {
    dialect: SchemaDialect,
    policy: Arc<dyn InlinePolicy>,
    table: RwLock<ComponentTable>,
}

impl SchemaRegistry {
    /// OpenAPI 3.0 registry that makes every declared type a component.
    pub fn new() -> Self {
        Self::with_dialect(SchemaDialect::OpenApi30)
    }

    pub fn with_dialect(dialect: SchemaDialect) -> Self {
        Self {
            dialect,
            policy: Arc::new(ComponentPerDeclaredType),
            table: RwLock::new(ComponentTable::default()),
        }
    }

    /// Replace the inline policy.
    pub fn with_policy(mut self, policy: impl InlinePolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    pub fn dialect(&self) -> SchemaDialect {
        self.dialect
    }

    /// Resolve `ty` to an inline schema or a component reference, registering
    /// any component it needs.
    pub fn resolve(&self, catalog: &TypeCatalog, ty: &TypeDescriptor) -> Resolved {
        {
            let table = self.table.read();
            if let Some(resolved) = Resolver::new(self, catalog, TableAccess::Shared(&*table)).run(ty)
            {
                return resolved;
            }
        }

        let mut table = self.table.write();
        // A writer never misses, so the fallback is unreachable.
        Resolver::new(self, catalog, TableAccess::Exclusive(&mut *table))
            .run(ty)
            .unwrap_or_else(|| Resolved {
                schema: SchemaRef::inline(Schema::any()),
                warnings: Vec::new(),
            })
    }

    /// Snapshot of all components in registration order.
    pub fn components(&self) -> IndexMap<String, Schema> {
        self.table
            .read()
            .slots
            .iter()
            .filter_map(|(name, slot)| Some((name.clone(), slot.body.clone()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<ComponentEntry> {
        let table = self.table.read();
        let slot = table.slots.get(name)?;
        Some(ComponentEntry {
            name: name.to_string(),
            schema: slot.body.clone()?,
            origin: slot.origin.clone(),
            key: slot.key.clone(),
        })
    }

    /// Canonical name registered for a structural key.
    pub fn name_of(&self, key: &StructuralKey) -> Option<String> {
        self.table.read().name_for(key).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.table.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("dialect", &self.dialect)
            .field("components", &self.len())
            .finish()
    }
}

enum TableAccess<'t> {
    /// Lookup only; any unregistered component is a miss.
    Shared(&'t ComponentTable),
    Exclusive(&'t mut ComponentTable),
}

impl TableAccess<'_> {
    fn table(&self) -> &ComponentTable {
        match self {
            TableAccess::Shared(table) => table,
            TableAccess::Exclusive(table) => table,
        }
    }

    fn mark_inlined(&mut self, key: StructuralKey) -> Option<()> {
        match self {
            TableAccess::Shared(_) => None,
            TableAccess::Exclusive(table) => {
                table.inlined.insert(key);
                Some(())
            }
        }
    }

    fn reserve(&mut self, origin: &str, key: StructuralKey) -> Option<String> {
        match self {
            TableAccess::Shared(_) => None,
            TableAccess::Exclusive(table) => Some(table.reserve(origin, key)),
        }
    }

    fn complete(&mut self, name: &str, body: Schema, frame: Frame) {
        if let TableAccess::Exclusive(table) = self {
            table.complete(name, body, frame);
        }
    }
}

/// Diagnostics gathered for the schema currently being built.
#[derive(Debug, Default)]
struct Frame {
    warnings: Vec<BuildWarning>,
    refs: Vec<String>,
}

struct Resolver<'r, 't> {
    registry: &'r SchemaRegistry,
    catalog: &'r TypeCatalog,
    table: TableAccess<'t>,
    frames: Vec<Frame>,
}

impl<'r, 't> Resolver<'r, 't> {
    fn new(registry: &'r SchemaRegistry, catalog: &'r TypeCatalog, table: TableAccess<'t>) -> Self {
        Self {
            registry,
            catalog,
            table,
            frames: vec![Frame::default()],
        }
    }

    /// `None` means a component is missing and the table is read-only.
    fn run(mut self, ty: &TypeDescriptor) -> Option<Resolved> {
        let schema = self.resolve(ty)?;
        let frame = self.frames.pop().unwrap_or_default();

        let mut warnings = frame.warnings;
        warnings.extend(self.table.table().transitive_warnings(&frame.refs));
        let mut seen = HashSet::new();
        warnings.retain(|warning| seen.insert(warning.clone()));

        Some(Resolved { schema, warnings })
    }

    fn frame(&mut self) -> &mut Frame {
        if self.frames.is_empty() {
            self.frames.push(Frame::default());
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn degrade(&mut self, type_name: &str, reason: &str) -> SchemaRef {
        debug!(type_name, reason, "Emitting unconstrained schema");
        self.frame()
            .warnings
            .push(BuildWarning::unrepresentable(type_name, reason));
        SchemaRef::inline(Schema::any())
    }

    fn resolve(&mut self, ty: &TypeDescriptor) -> Option<SchemaRef> {
        match ty {
            TypeDescriptor::Primitive(primitive) => Some(SchemaRef::inline(primitive_schema(primitive))),
            TypeDescriptor::Array(items) => {
                let items = self.resolve(items)?;
                Some(SchemaRef::inline(Schema::array(items)))
            }
            TypeDescriptor::Nullable(inner) => {
                let inner = self.resolve(inner)?;
                Some(SchemaRef::inline(self.nullable(inner)))
            }
            TypeDescriptor::Map { key, value } => match key.as_ref() {
                TypeDescriptor::Primitive(Primitive {
                    kind: PrimitiveKind::String,
                    ..
                }) => {
                    let value = self.resolve(value)?;
                    Some(SchemaRef::inline(Schema::map(value)))
                }
                _ => Some(self.degrade("map", "dictionary keys must be strings")),
            },
            TypeDescriptor::Opaque(name) => Some(self.degrade(name, "type has no describable shape")),
            TypeDescriptor::Declared(handle) => self.resolve_declared(*handle),
        }
    }

    fn resolve_declared(&mut self, handle: TypeHandle) -> Option<SchemaRef> {
        let catalog = self.catalog;
        let Some(declared) = catalog.get(handle) else {
            return Some(self.degrade("<unknown>", "type handle belongs to another catalog"));
        };
        let Some(kind) = declared.kind() else {
            return Some(self.degrade(declared.name(), "type was declared but never defined"));
        };

        let key = StructuralKey::of(&TypeDescriptor::Declared(handle), catalog);
        if let Some(name) = self.table.table().name_for(&key) {
            let name = name.to_string();
            trace!(component = %name, "Schema component cache hit");
            return Some(self.reference(name));
        }

        if self.table.table().is_inlined(&key) {
            return self.body(kind).map(SchemaRef::inline);
        }
        if self.registry.policy.inline(declared) && !catalog.is_recursive(handle) {
            self.table.mark_inlined(key)?;
            return self.body(kind).map(SchemaRef::inline);
        }

        // Reserved before the fields so that cycles resolve to this name.
        let name = self.table.reserve(declared.name(), key)?;
        self.frames.push(Frame::default());
        let body = self.body(kind);
        let frame = self.frames.pop().unwrap_or_default();
        let body = body?;

        debug!(component = %name, origin = declared.name(), "Registered schema component");
        self.table.complete(&name, body, frame);
        Some(self.reference(name))
    }

    fn reference(&mut self, name: String) -> SchemaRef {
        let schema = SchemaRef::component(&name);
        self.frame().refs.push(name);
        schema
    }

    fn body(&mut self, kind: &DeclaredKind) -> Option<Schema> {
        match kind {
            DeclaredKind::Enum(variants) => Some(Schema::string_enum(variants.clone())),
            DeclaredKind::Object(fields) => {
                let mut properties = IndexMap::with_capacity(fields.len());
                let mut required = Vec::new();
                for field in fields {
                    let schema = self.resolve(&field.ty)?;
                    properties.insert(field.name.clone(), schema);
                    if field.required && !required.contains(&field.name) {
                        required.push(field.name.clone());
                    }
                }
                Some(Schema::object(properties, required))
            }
        }
    }

    fn nullable(&self, inner: SchemaRef) -> Schema {
        match self.registry.dialect {
            SchemaDialect::OpenApi30 => match inner {
                SchemaRef::Inline(schema) => Schema {
                    nullable: Some(true),
                    ..*schema
                },
                reference @ SchemaRef::Ref(_) => Schema {
                    all_of: Some(vec![reference]),
                    nullable: Some(true),
                    ..Schema::default()
                },
            },
            SchemaDialect::OpenApi31 => Schema {
                any_of: Some(vec![inner, SchemaRef::inline(Schema::of_type(SchemaType::Null))]),
                ..Schema::default()
            },
        }
    }
}

fn primitive_schema(primitive: &Primitive) -> Schema {
    let schema_type = match primitive.kind {
        PrimitiveKind::String => SchemaType::String,
        PrimitiveKind::Integer => SchemaType::Integer,
        PrimitiveKind::Number => SchemaType::Number,
        PrimitiveKind::Boolean => SchemaType::Boolean,
    };
    Schema {
        format: primitive.format.clone(),
        ..Schema::of_type(schema_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::InlineEnums;
    use cartographer_core::{DeclaredType, Field};

    fn user_fields() -> Vec<Field> {
        vec![
            Field::required("id", TypeDescriptor::int64()),
            Field::optional("name", TypeDescriptor::string()),
        ]
    }

    #[test]
    fn test_primitives_inline() {
        let registry = SchemaRegistry::new();
        let types = TypeCatalog::new();

        let resolved = registry.resolve(&types, &TypeDescriptor::uuid());
        let schema = resolved.schema.as_inline().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(schema.format.as_deref(), Some("uuid"));
        assert!(resolved.warnings.is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_declared_type_becomes_component() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let user = types.object("User", user_fields());

        let resolved = registry.resolve(&types, &user);
        assert_eq!(resolved.schema.component_name(), Some("User"));

        let entry = registry.get("User").unwrap();
        assert_eq!(entry.origin, "User");
        assert_eq!(entry.schema.required, vec!["id".to_string()]);
        let properties = entry.schema.properties.unwrap();
        assert_eq!(properties.keys().collect::<Vec<_>>(), vec!["id", "name"]);
    }

    #[test]
    fn test_equivalent_types_share_component() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let user = types.object("User", user_fields());
        let person = types.object("Person", user_fields());

        let first = registry.resolve(&types, &user);
        let second = registry.resolve(&types, &person);
        assert_eq!(first.schema, second.schema);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("Person").is_none());
    }

    #[test]
    fn test_name_collision_gets_suffix() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let first = types.object("Item", vec![Field::required("sku", TypeDescriptor::string())]);
        let second = types.object("Item", vec![Field::required("id", TypeDescriptor::int32())]);
        let third = types.object("Item", vec![Field::required("tag", TypeDescriptor::boolean())]);

        assert_eq!(registry.resolve(&types, &first).schema.component_name(), Some("Item"));
        assert_eq!(registry.resolve(&types, &second).schema.component_name(), Some("Item2"));
        assert_eq!(registry.resolve(&types, &third).schema.component_name(), Some("Item3"));
        assert_eq!(registry.resolve(&types, &first).schema.component_name(), Some("Item"));
    }

    #[test]
    fn test_names_are_sanitized() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let page = types.object("Page<User>", vec![Field::required("total", TypeDescriptor::int32())]);
        let blank = types.object("<>", vec![Field::required("x", TypeDescriptor::int32())]);

        assert_eq!(registry.resolve(&types, &page).schema.component_name(), Some("PageUser"));
        assert_eq!(registry.resolve(&types, &blank).schema.component_name(), Some("Schema"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let node = types.declare("Node");
        let node = types
            .define_object(
                node,
                vec![
                    Field::required("value", TypeDescriptor::int32()),
                    Field::optional("next", TypeDescriptor::nullable(TypeDescriptor::declared(node))),
                ],
            )
            .unwrap();

        let resolved = registry.resolve(&types, &node);
        assert_eq!(resolved.schema.component_name(), Some("Node"));

        let body = registry.get("Node").unwrap().schema;
        let next = body.properties.unwrap()["next"].clone();
        let next = next.as_inline().unwrap();
        assert_eq!(next.nullable, Some(true));
        assert_eq!(
            next.all_of.as_ref().unwrap()[0].component_name(),
            Some("Node")
        );
    }

    #[test]
    fn test_mutual_recursion() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let parent = types.declare("Parent");
        let child = types.declare("Child");
        types
            .define_object(
                parent,
                vec![Field::required(
                    "children",
                    TypeDescriptor::array(TypeDescriptor::declared(child)),
                )],
            )
            .unwrap();
        types
            .define_object(child, vec![Field::required("parent", TypeDescriptor::declared(parent))])
            .unwrap();

        registry.resolve(&types, &TypeDescriptor::declared(parent));
        let components = registry.components();
        assert_eq!(components.keys().collect::<Vec<_>>(), vec!["Parent", "Child"]);

        let child_body = &components["Child"];
        assert_eq!(
            child_body.properties.as_ref().unwrap()["parent"].component_name(),
            Some("Parent")
        );
    }

    #[test]
    fn test_nullable_in_openapi_31() {
        let registry = SchemaRegistry::with_dialect(SchemaDialect::OpenApi31);
        let types = TypeCatalog::new();

        let resolved = registry.resolve(&types, &TypeDescriptor::nullable(TypeDescriptor::string()));
        let schema = resolved.schema.as_inline().unwrap();
        let variants = schema.any_of.as_ref().unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(
            variants[1].as_inline().unwrap().schema_type,
            Some(SchemaType::Null)
        );
        assert!(schema.nullable.is_none());
    }

    #[test]
    fn test_map_with_string_keys() {
        let registry = SchemaRegistry::new();
        let types = TypeCatalog::new();

        let resolved = registry.resolve(&types, &TypeDescriptor::string_map(TypeDescriptor::int32()));
        let schema = resolved.schema.as_inline().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert!(schema.additional_properties.is_some());
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_unrepresentable_shapes_degrade() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let pending = types.declare("Pending");
        let foreign = TypeCatalog::new().declare("Elsewhere");

        let cases = [
            TypeDescriptor::opaque("Stream"),
            TypeDescriptor::declared(pending),
            TypeDescriptor::declared(foreign),
            TypeDescriptor::map(TypeDescriptor::int32(), TypeDescriptor::string()),
        ];
        for ty in &cases {
            let resolved = registry.resolve(&types, ty);
            assert!(resolved.schema.as_inline().unwrap().is_any());
            assert_eq!(resolved.warnings.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_degraded_field_warns_on_every_reference() {
        let registry = SchemaRegistry::new();
        let mut types = TypeCatalog::new();
        let upload = types.object(
            "Upload",
            vec![Field::required("content", TypeDescriptor::opaque("Stream"))],
        );
        let batch = types.object(
            "Batch",
            vec![Field::required("uploads", TypeDescriptor::array(upload.clone()))],
        );

        let first = registry.resolve(&types, &upload);
        assert_eq!(first.warnings.len(), 1);

        let again = registry.resolve(&types, &upload);
        assert_eq!(again.warnings, first.warnings);

        let transitive = registry.resolve(&types, &batch);
        assert_eq!(transitive.warnings, first.warnings);
    }

    #[test]
    fn test_inline_policy() {
        let registry = SchemaRegistry::new().with_policy(InlineEnums);
        let mut types = TypeCatalog::new();
        let color = types.enumeration("Color", ["red", "green"]);

        let resolved = registry.resolve(&types, &color);
        let schema = resolved.schema.as_inline().unwrap();
        assert_eq!(
            schema.enum_values.as_deref(),
            Some(&["red".to_string(), "green".to_string()][..])
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_inline_decision_binds_equivalent_types() {
        let policy = |declared: &DeclaredType| declared.name() == "Leaf";
        let mut types = TypeCatalog::new();
        let leaf = types.object("Leaf", vec![Field::required("v", TypeDescriptor::int32())]);
        let person = types.object("Person", vec![Field::required("v", TypeDescriptor::int32())]);

        let registry = SchemaRegistry::new().with_policy(policy);
        let first = registry.resolve(&types, &leaf).schema;
        assert!(first.as_inline().is_some());
        assert_eq!(registry.resolve(&types, &person).schema, first);
        assert_eq!(registry.resolve(&types, &leaf).schema, first);
        assert!(registry.is_empty());

        let registry = SchemaRegistry::new().with_policy(policy);
        let first = registry.resolve(&types, &person).schema;
        assert_eq!(first.component_name(), Some("Person"));
        assert_eq!(registry.resolve(&types, &leaf).schema, first);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_recursive_type_ignores_inline_policy() {
        let registry = SchemaRegistry::new().with_policy(|_: &DeclaredType| true);
        let mut types = TypeCatalog::new();
        let tree = types.declare("Tree");
        let tree = types
            .define_object(
                tree,
                vec![Field::required("children", TypeDescriptor::array(TypeDescriptor::declared(tree)))],
            )
            .unwrap();
        let leaf = types.object("Leaf", vec![Field::required("v", TypeDescriptor::int32())]);

        assert_eq!(registry.resolve(&types, &tree).schema.component_name(), Some("Tree"));
        assert!(registry.resolve(&types, &leaf).schema.as_inline().is_some());
    }

    #[test]
    fn test_dialect_from_version() {
        assert_eq!(SchemaDialect::from_version("3.0.3"), Some(SchemaDialect::OpenApi30));
        assert_eq!(SchemaDialect::from_version("3.1.0"), Some(SchemaDialect::OpenApi31));
        assert_eq!(SchemaDialect::from_version("3.1"), Some(SchemaDialect::OpenApi31));
        assert_eq!(SchemaDialect::from_version("2.0"), None);
        assert_eq!(SchemaDialect::OpenApi31.default_version(), "3.1.0");
    }
}
