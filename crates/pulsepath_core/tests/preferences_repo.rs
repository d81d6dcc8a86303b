use pulsepath_core::db::open_db_in_memory;
use pulsepath_core::{
    PrefKind, PrefValue, PreferenceRepository, RepoError, SqlitePreferenceRepository,
    DEFAULT_NAMESPACE, LEGACY_SETTINGS_NAMESPACE,
};
use rusqlite::Connection;

#[test]
fn typed_values_roundtrip_with_their_kind() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();

    repo.put("text", PrefValue::Text("hello".to_string())).unwrap();
    repo.put("int", PrefValue::Int(-3)).unwrap();
    repo.put("long", PrefValue::Long(1_700_000_000_000)).unwrap();
    repo.put("bool", PrefValue::Bool(true)).unwrap();

    assert_eq!(repo.get_text("text").unwrap().as_deref(), Some("hello"));
    assert_eq!(repo.get_int("int").unwrap(), Some(-3));
    assert_eq!(repo.get_long("long").unwrap(), Some(1_700_000_000_000));
    assert_eq!(repo.get_bool("bool").unwrap(), Some(true));
    assert_eq!(repo.get("missing").unwrap(), None);
}

#[test]
fn put_overwrites_previous_value_and_kind() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();

    repo.put("k", PrefValue::Int(1)).unwrap();
    repo.put("k", PrefValue::Text("now text".to_string())).unwrap();

    assert_eq!(
        repo.get("k").unwrap(),
        Some(PrefValue::Text("now text".to_string()))
    );
}

#[test]
fn reading_with_the_wrong_kind_is_a_type_mismatch() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();
    repo.put("water_target", PrefValue::Text("eight".to_string())).unwrap();

    let err = repo.get_int("water_target").unwrap_err();
    assert!(matches!(
        err,
        RepoError::TypeMismatch {
            expected: PrefKind::Int,
            found: PrefKind::Text,
            ..
        }
    ));
}

#[test]
fn namespaces_are_isolated_and_clear_is_scoped() {
    let conn = open_db_in_memory().unwrap();
    let main = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();
    let legacy = SqlitePreferenceRepository::try_new(&conn, LEGACY_SETTINGS_NAMESPACE).unwrap();

    main.put("dark_mode_enabled", PrefValue::Bool(false)).unwrap();
    main.put("user_name", PrefValue::Text("Ada".to_string())).unwrap();
    legacy.put("dark_mode_enabled", PrefValue::Bool(true)).unwrap();

    assert_eq!(main.get_bool("dark_mode_enabled").unwrap(), Some(false));
    assert_eq!(legacy.get_bool("dark_mode_enabled").unwrap(), Some(true));
    assert_eq!(main.keys().unwrap(), vec!["dark_mode_enabled", "user_name"]);

    assert_eq!(main.clear().unwrap(), 2);
    assert!(main.keys().unwrap().is_empty());
    assert_eq!(legacy.get_bool("dark_mode_enabled").unwrap(), Some(true));
}

#[test]
fn remove_reports_whether_a_value_existed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();
    repo.put("streak_days", PrefValue::Int(3)).unwrap();

    assert!(repo.remove("streak_days").unwrap());
    assert!(!repo.remove("streak_days").unwrap());
}

#[test]
fn put_all_writes_every_entry() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();

    repo.put_all(vec![
        ("a", PrefValue::Int(1)),
        ("b", PrefValue::Bool(false)),
    ])
    .unwrap();

    assert_eq!(repo.keys().unwrap(), vec!["a", "b"]);
}

#[test]
fn try_new_rejects_blank_namespace_and_unmigrated_connection() {
    let conn = open_db_in_memory().unwrap();
    let err = SqlitePreferenceRepository::try_new(&conn, "  ").unwrap_err();
    assert!(matches!(err, RepoError::InvalidNamespace(_)));

    let raw = Connection::open_in_memory().unwrap();
    let err = SqlitePreferenceRepository::try_new(&raw, DEFAULT_NAMESPACE).unwrap_err();
    assert!(matches!(err, RepoError::SchemaNotReady));
}

#[test]
fn corrupt_bool_payload_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO preferences (namespace, key, value_kind, value)
         VALUES (?1, 'notifications_enabled', 'bool', 7);",
        [DEFAULT_NAMESPACE],
    )
    .unwrap();
    let repo = SqlitePreferenceRepository::try_new(&conn, DEFAULT_NAMESPACE).unwrap();

    let err = repo.get("notifications_enabled").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
