use tempfile::tempdir;
use sezam::{CredentialStore, SaveMode, StoreError};

// Две независимые сессии над одним файлом: у каждой свой handle,
// внутрипроцессный затвор их не связывает.

#[test]
fn test_overwrite_mode_interleaved_sessions_lose_one_update() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users.json");
    let session_a = CredentialStore::new(&path);
    let session_b = CredentialStore::new(&path);

    // Обе сессии читают одно и то же исходное состояние.
    let mut snap_a = session_a.snapshot().unwrap();
    let mut snap_b = session_b.snapshot().unwrap();

    snap_a.users.insert("from_a".into(), "hash_a".into());
    session_a.save(&snap_a).unwrap();

    snap_b.users.insert("from_b".into(), "hash_b".into());
    session_b.save(&snap_b).unwrap();

    // Последний писатель побеждает: запись первой сессии молча потеряна.
    let users = session_a.load().unwrap();
    assert!(users.contains_key("from_b"));
    assert!(!users.contains_key("from_a"));
}

#[test]
fn test_checked_mode_interleaved_sessions_reject_stale_writer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users.json");
    let session_a = CredentialStore::with_save_mode(&path, SaveMode::Checked);
    let session_b = CredentialStore::with_save_mode(&path, SaveMode::Checked);

    let mut snap_a = session_a.snapshot().unwrap();
    let mut snap_b = session_b.snapshot().unwrap();

    snap_a.users.insert("from_a".into(), "hash_a".into());
    session_a.save(&snap_a).unwrap();

    snap_b.users.insert("from_b".into(), "hash_b".into());
    let err = session_b.save(&snap_b).unwrap_err();
    assert!(matches!(err, StoreError::ConcurrentModification));

    // Проигравшая сессия перечитывает и повторяет — ничего не потеряно.
    let mut retry = session_b.snapshot().unwrap();
    retry.users.insert("from_b".into(), "hash_b".into());
    session_b.save(&retry).unwrap();

    let users = session_a.load().unwrap();
    assert!(users.contains_key("from_a"));
    assert!(users.contains_key("from_b"));
}
