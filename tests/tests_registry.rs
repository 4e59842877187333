//! Registry Tests - Key/Tag Lookup
//!
//! Every registered tag resolves back to itself, keys are unique, and raw
//! `(key, payload, name)` triples convert only through registered keys.

use rstest::rstest;

use archmodel::base::{Literal, RegistryError, Tag, TagSubset, TokenStream, TypeRegistry};
use archmodel::model::{Cia, ComponentImplKind, ConnectionEndKind, ExpressionKind, InstanceFlag};

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_lookup_of_name_is_identity() {
    let registry = TypeRegistry::global();
    for &tag in Tag::ALL {
        assert_eq!(registry.lookup(registry.name(tag)), Some(tag), "{tag:?}");
    }
    assert_eq!(registry.len(), Tag::ALL.len());
}

#[rstest]
#[case("kind", Tag::DataKind)]
#[case("mk_some", Tag::Some)]
#[case("None", Tag::None)]
#[case("EOF", Tag::Eof)]
#[case("component_impl", Tag::ComponentImpls)]
#[case("CIAPort", Tag::CiaPort)]
#[case("Block_Impl", Tag::BlockImplKind)]
#[case("ConditionalExpr", Tag::ConditionalExpr)]
#[case("thenBranch", Tag::ThenBranch)]
fn test_known_keys(#[case] key: &str, #[case] tag: Tag) {
    assert_eq!(TypeRegistry::global().lookup(key), Some(tag));
}

#[rstest]
#[case("")]
#[case("Kind")]
#[case("component_impls")]
#[case("not_a_key")]
fn test_unknown_keys(#[case] key: &str) {
    assert_eq!(TypeRegistry::global().lookup(key), None);
    assert!(matches!(
        TypeRegistry::global().require(key),
        Err(RegistryError::UnknownKey(_))
    ));
}

#[test]
fn test_duplicate_key_rejected() {
    let err = TypeRegistry::from_pairs(&[("Port", Tag::Port), ("Port", Tag::Model)]).unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateKey {
            key: "Port",
            first: Tag::Port,
            second: Tag::Model,
        }
    );
}

// ============================================================================
// Closed subsets
// ============================================================================

fn assert_subset_round_trips<E: TagSubset + PartialEq + std::fmt::Debug>() {
    for &variant in E::ALL {
        assert_eq!(E::from_tag(variant.tag()), Some(variant));
        assert_eq!(
            TypeRegistry::global().lookup(variant.key()),
            Some(variant.tag())
        );
    }
}

#[test]
fn test_subsets_round_trip_through_registry() {
    assert_subset_round_trips::<Cia>();
    assert_subset_round_trips::<ExpressionKind>();
    assert_subset_round_trips::<InstanceFlag>();
    assert_subset_round_trips::<ComponentImplKind>();
    assert_subset_round_trips::<ConnectionEndKind>();
}

#[test]
fn test_subset_rejects_foreign_tag() {
    assert_eq!(Cia::from_tag(Tag::Port), None);
    assert_eq!(ExpressionKind::ALL.len(), 31);
}

// ============================================================================
// Raw triples
// ============================================================================

#[test]
fn test_from_raw_appends_eof() {
    let stream = TokenStream::from_raw(
        TypeRegistry::global(),
        [
            ("Model", Literal::None, "m"),
            ("String", Literal::None, "name"),
            ("string", Literal::Str("demo".into()), ""),
        ],
    )
    .unwrap();
    assert_eq!(stream.len(), 4);
    assert_eq!(stream.tokens()[1].tag, Tag::String);
    assert_eq!(stream.tokens()[3].tag, Tag::Eof);
}

#[test]
fn test_from_raw_rejects_unknown_key() {
    let err = TokenStream::from_raw(TypeRegistry::global(), [("Widget", Literal::None, "w")])
        .unwrap_err();
    assert_eq!(err, RegistryError::UnknownKey("Widget".into()));
}
