//! Edge cases: awkward keys and values, empty inputs, format boundaries.

use proptest::prelude::*;
use sealed_props::properties::{codec, parse_plaintext, write_plaintext};
use sealed_props::{
    load_properties, store_properties, ChaChaEncryptor, PropertiesError, PropertyStore,
};

fn encryptor() -> ChaChaEncryptor {
    ChaChaEncryptor::from_key_bytes(&[0x11u8; 32]).unwrap()
}

fn sealed_round_trip(props: &PropertyStore) -> PropertyStore {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("edge.properties");
    let enc = encryptor();
    store_properties(&path, props, "edge cases", &enc).unwrap();
    load_properties(Some(&path), Some(true), &enc).unwrap()
}

#[test]
fn edge_empty_store_round_trips() {
    let props = PropertyStore::new();
    assert!(sealed_round_trip(&props).is_empty());
}

#[test]
fn edge_empty_key_and_value() {
    let mut props = PropertyStore::new();
    props.add("", "");
    props.add("empty.value", "");
    let loaded = sealed_round_trip(&props);
    assert_eq!(loaded.get(""), Some(""));
    assert_eq!(loaded.get("empty.value"), Some(""));
}

#[test]
fn edge_separator_and_comment_characters_in_keys() {
    let mut props = PropertyStore::new();
    for key in ["a=b", "a:b", "#not-a-comment", "!bang", " leading", "trailing ", "x\\y"] {
        props.add(key, format!("value for {key}"));
    }
    let loaded = sealed_round_trip(&props);
    assert_eq!(loaded, props);
}

#[test]
fn edge_control_characters_in_values() {
    let mut props = PropertyStore::new();
    props.add("multiline", "line one\nline two\r\nline three");
    props.add("tabs", "\tindented\t");
    props.add("nul", "before\0after");
    let loaded = sealed_round_trip(&props);
    assert_eq!(loaded, props);
}

#[test]
fn edge_large_value() {
    let mut props = PropertyStore::new();
    let big = "x".repeat(1024 * 1024);
    props.add("blob", big.clone());
    let loaded = sealed_round_trip(&props);
    assert_eq!(loaded.get("blob").map(str::len), Some(big.len()));
}

#[test]
fn edge_unicode_everywhere() {
    let mut props = PropertyStore::new();
    props.add("clé", "valeur ✓");
    props.add("键", "值");
    props.add("emoji 🔑", "🔒 sealed");
    let loaded = sealed_round_trip(&props);
    assert_eq!(loaded, props);
}

#[test]
fn edge_only_comments_file_is_empty_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("comments.properties");
    std::fs::write(&path, "# one\n! two\n\n   \n# three\n").unwrap();

    let loaded = load_properties(Some(&path), Some(true), &encryptor()).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn edge_crlf_sealed_file() {
    let enc = encryptor();
    let mut props = PropertyStore::new();
    props.add("a", "1");
    props.add("b", "2");
    let text = codec::encode(&props, "windows", &enc).unwrap().replace('\n', "\r\n");
    assert_eq!(codec::decode(&text, &enc).unwrap(), props);
}

#[test]
fn edge_multiline_comment_header() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("header.properties");
    let enc = encryptor();
    let mut props = PropertyStore::new();
    props.add("k", "v");
    store_properties(&path, &props, "line one\nsneaky=entry\nline three", &enc).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.lines().take(3).all(|l| l.starts_with("# ")));
    let first = raw.lines().next().unwrap();
    assert!(first.starts_with("# line one "), "got: {first}");
    assert!(first.ends_with('Z'), "timestamp belongs on the first line: {first}");
    assert_eq!(raw.lines().nth(2), Some("# line three"));
    let loaded = load_properties(Some(&path), Some(true), &enc).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(!loaded.contains_key("sneaky"));
}

#[test]
fn edge_plaintext_java_style_input() {
    let text = [
        "# comment",
        "! another comment",
        "db.url = jdbc:mysql://localhost/app",
        "db.user:admin",
        "spaced\\ key = value with trailing space\\ ",
        "long.value = first \\",
        "             second",
        "unicode = caf\\u00e9",
    ]
    .join("\n");
    let props = parse_plaintext(&text).unwrap();
    assert_eq!(props.get("db.url"), Some("jdbc:mysql://localhost/app"));
    assert_eq!(props.get("db.user"), Some("admin"));
    assert_eq!(props.get("spaced key"), Some("value with trailing space "));
    assert_eq!(props.get("long.value"), Some("first second"));
    assert_eq!(props.get("unicode"), Some("café"));
}

#[test]
fn edge_plaintext_without_separator_is_parse_error() {
    let err = parse_plaintext("good=1\nbad line\n").unwrap_err();
    assert!(matches!(err, PropertiesError::Parse { line: 2, .. }));
}

#[test]
fn edge_plaintext_missing_file_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("absent.properties");
    let err = load_properties(Some(&path), Some(false), &encryptor()).unwrap_err();
    assert!(matches!(err, PropertiesError::FileNotFound(_)));
}

fn arb_store() -> impl Strategy<Value = PropertyStore> {
    prop::collection::vec((any::<String>(), any::<String>()), 0..16)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sealed_codec_round_trip(store in arb_store()) {
        let enc = encryptor();
        let text = codec::encode(&store, "proptest", &enc).unwrap();
        let decoded = codec::decode(&text, &enc).unwrap();
        prop_assert_eq!(decoded, store);
    }

    #[test]
    fn prop_plaintext_round_trip(store in arb_store()) {
        let text = write_plaintext(&store, "proptest");
        let parsed = parse_plaintext(&text).unwrap();
        prop_assert_eq!(parsed, store);
    }

    #[test]
    fn prop_decode_never_panics(text in "\\PC*") {
        let _ = codec::decode(&text, &encryptor());
    }
}
