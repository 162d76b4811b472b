//! Launch configuration wired to file-backed storage.
//!
//! Runs the production runtime with the host a [`TuiConfig`] describes and a
//! redb file in a scratch directory, the way `main` does, but with a
//! scripted driver in place of the terminal.

use miniapp_core::{PartialInsets, ProfileStore, RedbStorage, SimHost, UserKey};
use miniapp_harness::{InvariantRegistry, SimDriver};
use miniapp_tui::{KeyInput, Runtime, StorageChoice, TuiConfig};

const TOKEN: &str = "user=%7B%22id%22%3A7%2C%22first_name%22%3A%22Ann%22%2C%22last_name%22%3A%22Doe%22%7D&auth_date=1700000000&hash=abc";

async fn run(config: &TuiConfig, driver: &SimDriver) -> Runtime<SimDriver, SimHost, RedbStorage> {
    let StorageChoice::File(path) = &config.storage else {
        panic!("expected file storage");
    };
    let storage = RedbStorage::open(path).expect("open storage");

    let mut runtime = Runtime::new(driver.clone(), config.host(), storage, config.launch_url.clone());
    let mut done = runtime.start().expect("start");
    while !done {
        done = runtime.process_cycle().await.expect("cycle");
    }
    runtime
}

#[tokio::test]
async fn profile_saved_to_file_loads_on_next_launch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = TuiConfig {
        init_data: Some(TOKEN.to_string()),
        storage: StorageChoice::File(dir.path().join("profiles.redb")),
        ..TuiConfig::default()
    };

    let driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    driver.inject_key(KeyInput::Char('p'));
    driver.inject_key(KeyInput::Ctrl('s'));
    let runtime = run(&config, &driver).await;
    assert_eq!(driver.last_status().as_deref(), Some("Profile saved"));
    drop(runtime);

    let relaunch = SimDriver::new();
    let runtime = run(&config, &relaunch).await;
    assert!(runtime.app().profile_loaded());
    assert_eq!(runtime.app().profile().first_name, "Ann");
    assert_eq!(runtime.app().profile().last_name, "Doe");

    let stored = ProfileStore::new(runtime.bridge().store().storage().clone())
        .load_saved(&UserKey::Id(7))
        .expect("load");
    assert!(stored.is_some());
}

#[tokio::test]
async fn configured_insets_reach_the_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = TuiConfig {
        safe_area: Some(PartialInsets::new(47.0, 0.0, 34.0, 0.0)),
        content_safe_area: Some(PartialInsets::new(20.0, 0.0, 0.0, 0.0)),
        storage: StorageChoice::File(dir.path().join("profiles.redb")),
        ..TuiConfig::default()
    };

    let runtime = run(&config, &SimDriver::new()).await;
    let safe_area = runtime.app().safe_area();
    assert_eq!(safe_area.layout_top, 44.0);
    assert_eq!(safe_area.insets.bottom, 34.0);
}
