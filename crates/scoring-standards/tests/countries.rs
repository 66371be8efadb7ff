//! Tests for the country alias table.

use std::io::Write;

use scoring_standards::{AFRICAN_CODE_COUNT, CountryTable, StandardsError, normalize_key};

fn builtin() -> CountryTable {
    CountryTable::builtin().expect("load built-in table")
}

#[test]
fn resolves_official_short_and_historical_names() {
    let table = builtin();
    let cases = [
        ("Nigeria", "NGA"),
        ("Federal Republic of Nigeria", "NGA"),
        ("Swaziland", "SWZ"),
        ("Eswatini", "SWZ"),
        ("Zaire", "COD"),
        ("Congo, Dem. Rep.", "COD"),
        ("Congo", "COG"),
        ("Upper Volta", "BFA"),
        ("Dahomey", "BEN"),
        ("Ivory Coast", "CIV"),
        ("Côte d'Ivoire", "CIV"),
        ("Cape Verde", "CPV"),
        ("São Tomé and Príncipe", "STP"),
        ("Gambia, The", "GMB"),
        ("United Republic of Tanzania", "TZA"),
        ("Rhodesia", "ZWE"),
        ("zaf", "ZAF"),
    ];
    for (text, code) in cases {
        assert_eq!(table.resolve_alias(text), Some(code), "{text}");
    }
}

#[test]
fn every_african_code_resolves_from_its_name_and_code() {
    let table = builtin();
    for code in table.african_codes() {
        let name = table.display_name(code).expect("display name");
        assert_eq!(table.resolve_alias(name), Some(code.as_str()), "{name}");
        assert_eq!(table.resolve_alias(code), Some(code.as_str()));
    }
}

#[test]
fn non_african_names_resolve_but_are_not_african() {
    let table = builtin();
    assert_eq!(table.resolve_alias("France"), Some("FRA"));
    assert!(!table.is_african("FRA"));
    assert_eq!(table.resolve_alias("United States of America"), Some("USA"));
    assert_eq!(table.resolve_alias("Western Sahara"), Some("ESH"));
    assert!(!table.is_african("ESH"));
}

#[test]
fn regional_aggregates_are_listed_as_non_african() {
    let table = builtin();
    for (name, code) in [
        ("South Asia", "SAS"),
        ("Sub-Saharan Africa", "SSF"),
        ("Middle East & North Africa", "MEA"),
        ("North Africa", "XNA"),
        ("Southern Africa", "XSA"),
        ("Central Africa", "XMA"),
        ("South America", "XSM"),
        ("Low income", "LIC"),
        ("World", "WLD"),
    ] {
        assert_eq!(table.resolve_alias(name), Some(code), "{name}");
        assert!(!table.is_african(code), "{name}");
    }
}

#[test]
fn foreign_spellings_resolve() {
    let table = builtin();
    assert_eq!(table.resolve_alias("Libia"), Some("LBY"));
    assert_eq!(table.resolve_alias("Ägypten"), Some("EGY"));
    assert_eq!(table.resolve_alias("Afrique du Sud"), Some("ZAF"));
    assert_eq!(table.resolve_alias("French Guiana"), Some("GUF"));
}

#[test]
fn lookup_is_case_and_whitespace_insensitive() {
    let table = builtin();
    for text in ["nigeria", " Nigeria ", "NIGERIA", "\tNiGeRiA\n"] {
        assert_eq!(table.resolve_alias(text), Some("NGA"));
    }
}

#[test]
fn unknown_text_is_none() {
    let table = builtin();
    assert_eq!(table.resolve_alias("Atlantis"), None);
    assert_eq!(table.resolve_alias(""), None);
}

#[test]
fn entries_are_keyed_by_normalized_variant() {
    let table = builtin();
    for entry in table.entries() {
        assert_eq!(entry.variant, normalize_key(&entry.variant));
        assert_eq!(entry.is_african, table.is_african(&entry.code));
    }
    assert!(table.len() > AFRICAN_CODE_COUNT * 2);
}

#[test]
fn loads_replacement_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "code,african,names").unwrap();
    writeln!(file, "NGA,yes,Nigeria|Naija").unwrap();
    writeln!(file, "FRA,no,France").unwrap();

    let table = CountryTable::from_path(file.path()).expect("load table");
    assert_eq!(table.resolve_alias("naija"), Some("NGA"));
    assert_eq!(table.african_codes().len(), 1);
    assert_eq!(table.codes().collect::<Vec<_>>(), vec!["FRA", "NGA"]);
}

#[test]
fn missing_file_is_io_error() {
    let err = CountryTable::from_path(std::path::Path::new("/nonexistent/countries.csv"))
        .unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}
