use kiln_properties::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn store_in(temp: &TempDir, name: &str) -> PropertiesFile {
    PropertiesFile::open(temp.path().join(name))
}

#[test]
fn test_put_all_rewrites_sorted() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "app.properties");
    fs::write(store.path(), "b=0\nc=3\n").unwrap();

    store.put_all([("a", "1"), ("b", "2")]).unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "a=1\nb=2\nc=3\n");
}

#[test]
fn test_rewriting_equal_content_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "app.properties").with_header("Generated by kiln");

    store.replace_all([("zeta", "z"), ("alpha", "a"), ("mid dle", "m é")]).unwrap();
    let first = fs::read(store.path()).unwrap();

    store.replace_all([("mid dle", "m é"), ("alpha", "a"), ("zeta", "z")]).unwrap();
    let second = fs::read(store.path()).unwrap();
    assert_eq!(first, second);

    store.remove("missing").unwrap();
    assert_eq!(fs::read(store.path()).unwrap(), first);
}

#[test]
fn test_put_then_remove_restores_absence() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "app.properties");
    store.put("existing", "1").unwrap();

    assert_eq!(store.put("k", "v").unwrap(), None);
    assert_eq!(store.remove("k").unwrap(), Some("v".to_owned()));
    assert_eq!(store.get("k").unwrap(), None);
    assert_eq!(store.get("existing").unwrap().as_deref(), Some("1"));
}

#[test]
fn test_put_returns_previous_value() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "app.properties");

    assert_eq!(store.put("k", "1").unwrap(), None);
    assert_eq!(store.put("k", "2").unwrap(), Some("1".to_owned()));
    assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
}

#[test]
fn test_replace_all_drops_old_keys() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "app.properties");
    store.put_all([("old", "1"), ("kept", "2")]).unwrap();

    store.replace_all([("kept", "3"), ("new", "4")]).unwrap();

    let keys: Vec<String> = store.keys().unwrap().into_iter().collect();
    assert_eq!(keys, ["kept", "new"]);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "kept=3\nnew=4\n");
}

#[test]
fn test_every_call_sees_external_edits() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "app.properties");
    store.put("a", "1").unwrap();

    fs::write(store.path(), "a=changed elsewhere\n").unwrap();

    assert_eq!(store.get("a").unwrap().as_deref(), Some("changed elsewhere"));
}

#[test]
fn test_list_entries_are_addressable() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "messages.properties");
    fs::write(store.path(), "title = Welcome\n# comment\ngreeting: Hello\n").unwrap();

    let entries = store.list_entries().unwrap();
    let rendered: Vec<String> = entries.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["greeting=Hello", "title=Welcome"]);

    let first = &entries[0];
    assert_eq!(first.file(), store.path());
    assert_eq!(first.address(), format!("{}#greeting", store.path().display()));
    assert_eq!(store.entry("greeting").unwrap().as_ref(), Some(first));
    assert!(store.entry("absent").unwrap().is_none());
}

#[test]
fn test_hand_written_file_is_normalized_on_first_mutation() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "legacy.properties");
    fs::write(
        store.path(),
        "! legacy header\r\nz.key   value with spaces\r\nmulti=one \\\r\n    two\r\na.key:caf\\u00e9\r\n",
    )
    .unwrap();

    store.put("m.key", "new").unwrap();

    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "a.key=caf\\u00E9\nm.key=new\nmulti=one two\nz.key=value with spaces\n"
    );
}

#[test]
fn test_first_put_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "src/main/resources/import.properties");
    assert!(store.keys().unwrap().is_empty());
    assert!(!store.path().exists());

    store.put("k", "v").unwrap();

    assert_eq!(fs::read_to_string(store.path()).unwrap(), "k=v\n");
}

#[test]
fn test_unreadable_backing_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let dir_as_file = store_in(&temp, "");
    let err = dir_as_file.get("k").expect_err("a directory is not a properties file");
    assert!(matches!(err, PropertiesError::Unavailable { .. }), "{err}");

    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let store = PropertiesFile::open(blocker.join("app.properties"));
    let err = store.put("k", "v").expect_err("parent is a regular file");
    assert!(matches!(err, PropertiesError::Unavailable { .. }), "{err}");
}

#[test]
fn test_sibling_writes_next_to_origin() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "messages.properties").with_header("i18n");
    let french = store.sibling("messages_fr.properties");

    french.put("greeting", "Bonjour").unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("messages_fr.properties")).unwrap(),
        "#i18n\ngreeting=Bonjour\n"
    );
}

proptest! {
    #[test]
    fn prop_replace_all_reads_back_exactly(
        entries in prop::collection::btree_map("\\PC{0,12}", "\\PC{0,24}", 0..16)
    ) {
        let resource = MemoryResource::new("prop.properties");
        let store = PropertiesFile::with_resource(resource);

        store.replace_all(entries.clone()).unwrap();

        let read_back: BTreeMap<String, String> = store.entries().unwrap();
        prop_assert_eq!(read_back, entries);
    }
}
