use storage::repository::{ProgressRecord, ProgressStore};
use storage::sqlite::SqliteProgressStore;
use tutor_core::model::{NavigationState, SectionId, SectionList, TutorialKey};
use tutor_core::time::fixed_now;

async fn open_store(name: &str) -> SqliteProgressStore {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    SqliteProgressStore::open(&url)
        .await
        .expect("in-memory sqlite should open")
}

fn transformer_sections() -> SectionList {
    SectionList::from_names([
        "intro",
        "basics",
        "attention",
        "self-attention",
        "multi-head",
        "positional",
        "architecture",
        "examples",
    ])
    .unwrap()
}

#[tokio::test]
async fn round_trips_progress_record() {
    let store = open_store("memdb_roundtrip").await;
    let sections = transformer_sections();

    let mut state = NavigationState::initial(&sections);
    state.enter(SectionId::new("attention"));
    state.enter(SectionId::new("basics"));

    let record = ProgressRecord::from_state(TutorialKey::new("transformer"), &state, fixed_now());
    store.save(&record).await.unwrap();

    let loaded = store
        .load(&TutorialKey::new("transformer"))
        .await
        .unwrap()
        .expect("record saved");

    assert_eq!(loaded.current_section, "basics");
    assert_eq!(
        loaded.visited,
        vec![
            "intro".to_owned(),
            "attention".to_owned(),
            "basics".to_owned()
        ]
    );
    assert_eq!(loaded.saved_at, fixed_now());
}

#[tokio::test]
async fn missing_tutorial_loads_as_none() {
    let store = open_store("memdb_missing").await;
    let loaded = store.load(&TutorialKey::new("infonce")).await.unwrap();
    assert!(loaded.is_none());
}

#[tokio::test]
async fn upsert_replaces_existing_record() {
    let store = open_store("memdb_upsert").await;
    let sections = transformer_sections();

    let mut state = NavigationState::initial(&sections);
    let first = ProgressRecord::from_state(TutorialKey::new("transformer"), &state, fixed_now());
    store.save(&first).await.unwrap();

    state.enter(SectionId::new("multi-head"));
    let second = ProgressRecord::from_state(
        TutorialKey::new("transformer"),
        &state,
        fixed_now() + chrono::Duration::minutes(5),
    );
    store.save(&second).await.unwrap();

    let loaded = store
        .load(&TutorialKey::new("transformer"))
        .await
        .unwrap()
        .expect("record saved");
    assert_eq!(loaded.current_section, "multi-head");
    assert_eq!(loaded.saved_at, second.saved_at);
}

#[tokio::test]
async fn migration_is_idempotent() {
    let store = open_store("memdb_migrate").await;
    store.migrate().await.expect("re-running migrations is fine");
}

#[tokio::test]
async fn records_are_keyed_per_tutorial() {
    let store = open_store("memdb_keys").await;
    let sections = transformer_sections();
    let state = NavigationState::initial(&sections);

    store
        .save(&ProgressRecord::from_state(
            TutorialKey::new("transformer"),
            &state,
            fixed_now(),
        ))
        .await
        .unwrap();

    assert!(store.load(&TutorialKey::new("trm")).await.unwrap().is_none());
}
