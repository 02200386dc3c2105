//! End-to-end workflows: create, import, amend, re-persist.

use sealed_props::properties::write_plaintext;
use sealed_props::{load_properties, store_properties, ChaChaEncryptor, PropertyStore};

const KEY1: &str = "quick";
const VALUE1: &str = "brown fox";
const KEY2: &str = "jumps";
const VALUE2: &str = "lazy dog";
const KEY3: &str = "joe bob";
const VALUE3: &str = "jim bob";
const KEY4: &str = "sally sue";
const VALUE4: &str = "betty mae";

const COMMENT: &str = "Encrypted Properties File generated by full_workflow";

fn encryptor() -> ChaChaEncryptor {
    ChaChaEncryptor::from_key_bytes(&[0x5Au8; 32]).unwrap()
}

/// As if running `sprops seal --out encrypted.properties`.
#[test]
fn workflow_create_new() {
    let tmp = tempfile::tempdir().unwrap();
    let encrypted = tmp.path().join("encrypted.properties");
    let enc = encryptor();

    let mut props = load_properties(None, None, &enc).unwrap();
    assert!(props.is_empty());

    let prop1 = props.add(KEY1, VALUE1);
    assert!(prop1.is_none(), "expected None but got {prop1:?}");
    let prop2 = props.add(KEY2, VALUE2);
    assert!(prop2.is_none(), "expected None but got {prop2:?}");

    store_properties(&encrypted, &props, COMMENT, &enc).unwrap();

    let loaded = load_properties(Some(&encrypted), Some(true), &enc).unwrap();
    assert_eq!(loaded.get(KEY1), Some(VALUE1));
    assert_eq!(loaded.get(KEY2), Some(VALUE2));
}

/// As if running
/// `sprops seal --in plaintext.properties --in-encrypted false --out encrypted.properties`.
#[test]
fn workflow_load_plaintext_and_encrypt() {
    let tmp = tempfile::tempdir().unwrap();
    let plaintext = tmp.path().join("plaintext.properties");
    let encrypted = tmp.path().join("encrypted.properties");
    let enc = encryptor();

    let mut initial = PropertyStore::new();
    initial.add(KEY3, VALUE3);
    initial.add(KEY4, VALUE4);
    std::fs::write(
        &plaintext,
        write_plaintext(&initial, "Plaintext test file created by full_workflow"),
    )
    .unwrap();

    let props = load_properties(Some(&plaintext), Some(false), &enc).unwrap();
    assert_eq!(props.get(KEY3), Some(VALUE3));
    assert_eq!(props.get(KEY4), Some(VALUE4));

    store_properties(&encrypted, &props, COMMENT, &enc).unwrap();

    let raw = std::fs::read_to_string(&encrypted).unwrap();
    assert!(!raw.contains(VALUE3));
    assert!(!raw.contains(VALUE4));

    let loaded = load_properties(Some(&encrypted), Some(true), &enc).unwrap();
    assert_eq!(loaded.get(KEY3), Some(VALUE3));
    assert_eq!(loaded.get(KEY4), Some(VALUE4));
}

/// As if running
/// `sprops seal --in encrypted.properties --out encrypted.2.properties --set ...`.
#[test]
fn workflow_load_encrypted_and_add() {
    let tmp = tempfile::tempdir().unwrap();
    let encrypted = tmp.path().join("encrypted.properties");
    let encrypted2 = tmp.path().join("encrypted.2.properties");
    let enc = encryptor();

    let mut existing = PropertyStore::new();
    existing.add(KEY3, VALUE3);
    store_properties(&encrypted, &existing, COMMENT, &enc).unwrap();

    let mut props = load_properties(Some(&encrypted), Some(true), &enc).unwrap();
    props.add(KEY1, VALUE1);
    props.add(KEY2, VALUE2);
    assert_eq!(props.get(KEY1), Some(VALUE1));
    assert_eq!(props.get(KEY2), Some(VALUE2));

    store_properties(&encrypted2, &props, COMMENT, &enc).unwrap();

    let loaded = load_properties(Some(&encrypted2), Some(true), &enc).unwrap();
    assert_eq!(loaded.get(KEY1), Some(VALUE1));
    assert_eq!(loaded.get(KEY2), Some(VALUE2));
    assert_eq!(loaded.get(KEY3), Some(VALUE3));
    assert_eq!(loaded.len(), 3);
}

/// A freshly created, still empty file loads as an empty store.
#[test]
fn workflow_load_empty_encrypted_file_and_add() {
    let tmp = tempfile::tempdir().unwrap();
    let encrypted = tmp.path().join("encrypted.properties");
    let encrypted2 = tmp.path().join("encrypted.2.properties");
    std::fs::File::create(&encrypted).unwrap();
    let enc = encryptor();

    let mut props = load_properties(Some(&encrypted), Some(true), &enc).unwrap();
    assert!(props.is_empty());
    props.add(KEY1, VALUE1);
    store_properties(&encrypted2, &props, COMMENT, &enc).unwrap();

    let loaded = load_properties(Some(&encrypted2), Some(true), &enc).unwrap();
    assert_eq!(loaded.get(KEY1), Some(VALUE1));
}

#[test]
fn workflow_overwrite_reports_previous_value() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("encrypted.properties");
    let enc = encryptor();

    let mut props = PropertyStore::new();
    assert_eq!(props.add(KEY1, VALUE1), None);
    store_properties(&path, &props, COMMENT, &enc).unwrap();

    let mut reloaded = load_properties(Some(&path), Some(true), &enc).unwrap();
    assert_eq!(reloaded.add(KEY1, "red fox"), Some(VALUE1.to_string()));
    assert_eq!(reloaded.add(KEY2, VALUE2), None);
    store_properties(&path, &reloaded, COMMENT, &enc).unwrap();

    let last = load_properties(Some(&path), Some(true), &enc).unwrap();
    assert_eq!(last.get(KEY1), Some("red fox"));
    assert_eq!(last.get(KEY2), Some(VALUE2));
}

#[test]
fn workflow_order_survives_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("ordered.properties");
    let enc = encryptor();

    let props: PropertyStore = ["zeta", "alpha", "mike", "bravo"]
        .iter()
        .map(|k| (k.to_string(), format!("value of {k}")))
        .collect();
    store_properties(&path, &props, COMMENT, &enc).unwrap();

    let loaded = load_properties(Some(&path), Some(true), &enc).unwrap();
    assert_eq!(
        loaded.keys().collect::<Vec<_>>(),
        vec!["zeta", "alpha", "mike", "bravo"]
    );
}

#[test]
fn workflow_passphrase_key_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("passphrase.properties");
    let salt = b"deployment-salt-01";

    let writer = ChaChaEncryptor::from_passphrase("correct horse battery staple", salt).unwrap();
    let mut props = PropertyStore::new();
    props.add("smtp.password", "p@ss=word");
    store_properties(&path, &props, COMMENT, &writer).unwrap();

    let reader = ChaChaEncryptor::from_passphrase("correct horse battery staple", salt).unwrap();
    let loaded = load_properties(Some(&path), Some(true), &reader).unwrap();
    assert_eq!(loaded.get("smtp.password"), Some("p@ss=word"));
}
