//! Structural equivalence across catalogs and declaration orders

use cartographer_core::*;
use proptest::prelude::*;

fn leaf(kind: u8) -> TypeDescriptor {
    match kind % 6 {
        0 => TypeDescriptor::string(),
        1 => TypeDescriptor::int64(),
        2 => TypeDescriptor::boolean(),
        3 => TypeDescriptor::nullable(TypeDescriptor::date_time()),
        4 => TypeDescriptor::string_map(TypeDescriptor::number()),
        _ => TypeDescriptor::array(TypeDescriptor::int32()),
    }
}

fn object(types: &mut TypeCatalog, name: &str, spec: &[(String, u8, bool)]) -> TypeDescriptor {
    let fields = spec
        .iter()
        .map(|(field, kind, required)| Field::new(field.clone(), leaf(*kind), *required))
        .collect();
    types.object(name, fields)
}

fn linked_list(types: &mut TypeCatalog, name: &str) -> TypeDescriptor {
    let node = types.declare(name);
    types
        .define_object(
            node,
            vec![
                Field::required("value", TypeDescriptor::string()),
                Field::optional("next", TypeDescriptor::nullable(TypeDescriptor::declared(node))),
            ],
        )
        .unwrap()
}

#[test]
fn test_keys_ignore_catalog_identity() {
    let mut left = TypeCatalog::new();
    let mut right = TypeCatalog::new();
    let a = linked_list(&mut left, "Node");
    let b = linked_list(&mut right, "ListNode");

    assert_eq!(StructuralKey::of(&a, &left), StructuralKey::of(&b, &right));
    assert!(left.is_recursive(a.handle().unwrap()));
}

#[test]
fn test_field_order_and_required_flag_matter() {
    let mut types = TypeCatalog::new();
    let ab = types.object(
        "Pair",
        vec![
            Field::required("a", TypeDescriptor::string()),
            Field::required("b", TypeDescriptor::string()),
        ],
    );
    let ba = types.object(
        "Pair",
        vec![
            Field::required("b", TypeDescriptor::string()),
            Field::required("a", TypeDescriptor::string()),
        ],
    );
    let optional = types.object(
        "Pair",
        vec![
            Field::required("a", TypeDescriptor::string()),
            Field::optional("b", TypeDescriptor::string()),
        ],
    );

    let keys = [&ab, &ba, &optional].map(|ty| StructuralKey::of(ty, &types));
    assert_ne!(keys[0], keys[1]);
    assert_ne!(keys[0], keys[2]);
}

#[test]
fn test_undefined_and_opaque_collapse_to_any() {
    let mut types = TypeCatalog::new();
    let later = types.declare("Later");

    let undefined = StructuralKey::of(&TypeDescriptor::declared(later), &types);
    let opaque = StructuralKey::of(&TypeDescriptor::opaque("Stream"), &types);
    assert_eq!(undefined, opaque);
    assert_eq!(undefined.as_str(), "any");
}

#[test]
fn test_enum_variant_order() {
    let mut types = TypeCatalog::new();
    let a = types.enumeration("Level", ["low", "high"]);
    let b = types.enumeration("Priority", ["low", "high"]);
    let c = types.enumeration("Level", ["high", "low"]);

    assert_eq!(StructuralKey::of(&a, &types), StructuralKey::of(&b, &types));
    assert_ne!(StructuralKey::of(&a, &types), StructuralKey::of(&c, &types));
}

proptest! {
    #[test]
    fn prop_names_never_affect_keys(
        spec in prop::collection::vec(("[a-z]{1,8}", any::<u8>(), any::<bool>()), 0..8),
        a in "[A-Za-z]{1,10}",
        b in "[A-Za-z]{1,10}",
    ) {
        let mut types = TypeCatalog::new();
        let first = object(&mut types, &a, &spec);
        let second = object(&mut types, &b, &spec);
        prop_assert_eq!(StructuralKey::of(&first, &types), StructuralKey::of(&second, &types));
    }

    #[test]
    fn prop_wrapping_changes_key(kind in any::<u8>()) {
        let types = TypeCatalog::new();
        let inner = leaf(kind);
        let key = StructuralKey::of(&inner, &types);
        prop_assert_ne!(&key, &StructuralKey::of(&TypeDescriptor::array(inner.clone()), &types));
        prop_assert_ne!(&key, &StructuralKey::of(&TypeDescriptor::nullable(inner), &types));
    }
}
