//! Resolution against the built-in country table.

use std::sync::LazyLock;

use proptest::prelude::*;
use scoring_map::{CountryResolver, MatchKind, token_sort_ratio};
use scoring_standards::CountryTable;

static TABLE: LazyLock<CountryTable> =
    LazyLock::new(|| CountryTable::builtin().expect("built-in table"));
static RESOLVER: LazyLock<CountryResolver<'static>> =
    LazyLock::new(|| CountryResolver::new(&TABLE));

const AFRICAN_NAMES: &[&str] = &[
    "Nigeria",
    "Kenya",
    "South Africa",
    "Côte d'Ivoire",
    "Democratic Republic of the Congo",
    "Eswatini",
    "Tanzania",
    "Sao Tome and Principe",
    "Guinea-Bissau",
    "Cabo Verde",
];

#[test]
fn historical_names_resolve() {
    for (name, code) in [
        ("Swaziland", "SWZ"),
        ("Zaire", "COD"),
        ("Ivory Coast", "CIV"),
        ("Tanganyika", "TZA"),
    ] {
        let resolution = RESOLVER.resolve(name);
        assert_eq!(resolution.code(), Some(code), "{name}");
        assert_eq!(resolution.kind, MatchKind::Exact);
    }
}

#[test]
fn word_order_and_typos_resolve_fuzzily() {
    let resolution = RESOLVER.resolve("Congo Democratic Republic of the");
    assert_eq!(resolution.code(), Some("COD"));
    assert_eq!(resolution.kind, MatchKind::Fuzzy);
    assert_eq!(resolution.confidence, 1.0);

    let resolution = RESOLVER.resolve("Nigerria");
    assert_eq!(resolution.code(), Some("NGA"));
    assert_eq!(resolution.kind, MatchKind::Fuzzy);
}

#[test]
fn threshold_is_inclusive() {
    let table =
        CountryTable::from_reader("code,african,names\nABC,true,Abcdefghij\n".as_bytes(), "test")
            .expect("table");
    // Ten characters each, eight in common: 2 * 8 / 20.
    let score = token_sort_ratio("Abcdefghxy", "Abcdefghij");
    assert_eq!(score, 80.0);

    let resolution = CountryResolver::new(&table).resolve("Abcdefghxy");
    assert_eq!(resolution.code(), Some("ABC"));
    assert_eq!(resolution.kind, MatchKind::Fuzzy);
    assert_eq!(resolution.confidence, 0.8);

    let strict = CountryResolver::new(&table).with_threshold(score.next_up());
    assert!(!strict.resolve("Abcdefghxy").is_resolved());
}

#[test]
fn region_names_do_not_drift_to_african_countries() {
    for (name, code) in [
        ("South Asia", "SAS"),
        ("North Africa", "XNA"),
        ("Southern Africa", "XSA"),
        ("Central Africa", "XMA"),
        ("South America", "XSM"),
        ("French Guiana", "GUF"),
        ("Guiana", "XGN"),
    ] {
        let resolution = RESOLVER.resolve(name);
        assert_eq!(resolution.code(), Some(code), "{name}");
        assert_eq!(resolution.kind, MatchKind::Exact, "{name}");
        assert!(!resolution.is_african, "{name}");
    }
    // Reordered region names land on the region, not a country.
    let resolution = RESOLVER.resolve("Eastern and Southern Africa");
    assert_eq!(resolution.code(), Some("AFE"));
    assert_eq!(resolution.kind, MatchKind::Fuzzy);
    assert!(!resolution.is_african);
}

#[test]
fn non_african_names_resolve_but_are_flagged() {
    let resolution = RESOLVER.resolve("France");
    assert_eq!(resolution.code(), Some("FRA"));
    assert!(!resolution.is_african);
}

#[test]
fn gibberish_is_unresolved() {
    let resolution = RESOLVER.resolve("Qwxzt Plorb");
    assert!(!resolution.is_resolved());
    assert_eq!(resolution.confidence, 0.0);
    assert_eq!(resolution.matched_alias, None);
}

#[test]
fn resolve_many_keeps_order() {
    let codes: Vec<_> = RESOLVER
        .resolve_many(["Kenya", "", "NGA"])
        .into_iter()
        .map(|resolution| resolution.code)
        .collect();
    assert_eq!(
        codes,
        vec![Some("KEN".to_string()), None, Some("NGA".to_string())]
    );
}

#[test]
fn resolution_wire_shape() {
    let json = serde_json::to_string_pretty(&RESOLVER.resolve("kenya")).expect("serialize");
    insta::assert_snapshot!(json, @r#"
    {
      "code": "KEN",
      "confidence": 1.0,
      "matchedAlias": "kenya",
      "isAfrican": true,
      "kind": "exact"
    }
    "#);
}

proptest! {
    #[test]
    fn resolution_is_deterministic(text in "[A-Za-z ,.'-]{0,24}") {
        prop_assert_eq!(RESOLVER.resolve(&text), RESOLVER.resolve(&text));
    }

    #[test]
    fn resolution_ignores_case_and_padding(
        name in prop::sample::select(AFRICAN_NAMES),
        left in " {0,3}",
        right in "[ \t]{0,3}",
    ) {
        let expected = RESOLVER.resolve(name);
        prop_assert!(expected.is_resolved());
        prop_assert!(expected.is_african);
        let padded = format!("{left}{name}{right}");
        prop_assert_eq!(&RESOLVER.resolve(&padded), &expected);
        prop_assert_eq!(&RESOLVER.resolve(&name.to_uppercase()), &expected);
        prop_assert_eq!(&RESOLVER.resolve(&name.to_lowercase()), &expected);
    }
}
