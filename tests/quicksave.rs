use std::fs;

use tower_trial::{FileStore, GameConfig, Session};

fn session_in(dir: &std::path::Path) -> Session {
    let store = FileStore::open(dir).expect("open store");
    let mut session = Session::tower(GameConfig::default(), Box::new(store)).expect("tower loads");
    session.start();
    session
}

#[test]
fn quicksave_survives_a_new_session() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut first = session_in(dir.path());
    first.run("take tome_basic");
    first.run("use tome_basic");
    first.run("go east");
    let out = first.run("save");
    assert!(out.contains("Game quicksaved!"));
    assert!(dir.path().join("tower_trial_quicksave.json").exists());

    let mut second = session_in(dir.path());
    assert_eq!(second.current_room(), "entrance");
    let out = second.run("load");
    assert!(out.contains("Game quickloaded!"));
    assert!(out.contains("Game progress loaded!"));

    assert_eq!(second.current_room(), "garden");
    assert!(second.player().knows_spell("fireball"));
    assert!(second.player().has_item("tome_basic"));
    assert!(second.player().has_flag("garden_intro"));
    assert_eq!(second.player(), first.player());
}

#[test]
fn corrupt_quicksave_leaves_the_game_alone() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(dir.path());
    session.run("go east");

    fs::write(dir.path().join("tower_trial_quicksave.json"), "{\"health\": ").expect("write");

    let before = session.player().clone();
    let out = session.run("quickload");
    assert!(out.contains("No quicksave found."));
    assert_eq!(session.player(), &before);
    assert_eq!(session.current_room(), "garden");
}

#[test]
fn missing_quicksave_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut session = session_in(dir.path());
    let out = session.run("quickload");
    assert!(out.contains("No quicksave found."));
}

#[test]
fn custom_key_names_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GameConfig::from_toml_str("quicksave_key = \"slot_2\"").expect("config");
    let store = FileStore::open(dir.path()).expect("open store");
    let mut session = Session::tower(config, Box::new(store)).expect("tower loads");

    session.run("quicksave");
    assert!(dir.path().join("slot_2.json").exists());
    assert!(!dir.path().join("tower_trial_quicksave.json").exists());
}

#[test]
fn blobs_round_trip_between_sessions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut first = session_in(dir.path());
    first.run("take tome_basic");

    let blob = first.save_blob().expect("encode");
    let mut second = session_in(dir.path());
    assert!(second.restore_blob(&blob));
    assert!(second.player().has_item("tome_basic"));

    assert!(!second.restore_blob("not a save"));
    assert!(second.player().has_item("tome_basic"));
}
