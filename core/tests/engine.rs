//! End-to-end flow through the public API: report, match, claim, dashboard.

use chrono::{TimeDelta, Utc};
use lostfound_core::LostFoundCore;
use lostfound_core::store::db::ItemDb;
use lostfound_core::store::{DeliveryError, DirectoryError, ItemStore, Notifier, UserDirectory};
use lostfound_core::types::{
    Config, EngineConfig, ItemDraft, ItemStatus, User, UserId,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct StaticDirectory(Vec<User>);

impl UserDirectory for StaticDirectory {
    fn get(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.0.iter().find(|u| &u.id == id).cloned())
    }
}

#[derive(Default)]
struct Outbox(Mutex<Vec<(String, String)>>);

impl Notifier for Outbox {
    fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
        self.0
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

fn user(id: &str, first: &str, last: &str, email: &str) -> User {
    User {
        id: UserId::try_from(id).unwrap(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn report_match_claim_dashboard_flow() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(
        ItemDb::open(Config {
            base_path: temp_dir.path().to_path_buf(),
        })
        .unwrap(),
    );
    let directory = StaticDirectory(vec![
        user("alice", "Alice", "Ng", "alice@example.com"),
        user("bob", "Bob", "Ortiz", "bob@example.com"),
    ]);
    let outbox = Arc::new(Outbox::default());

    let engine = LostFoundCore::new(
        Arc::clone(&store),
        directory,
        Arc::clone(&outbox),
        &EngineConfig::default(),
    );

    let start = Utc::now();
    let alice = UserId::try_from("alice").unwrap();

    // Alice loses her backpack and an umbrella.
    let mut lost = ItemDraft::new(alice.clone(), "Blue Backpack");
    lost.item_type = "Bag".to_string();
    lost.location = "Main library".to_string();
    let lost = engine.report(lost, start).unwrap();

    engine
        .report(
            ItemDraft::new(alice.clone(), "Umbrella"),
            start + TimeDelta::minutes(1),
        )
        .unwrap();

    // Bob finds a backpack; the name matches case-insensitively.
    let mut found = ItemDraft::new(UserId::try_from("bob").unwrap(), "blue backpack");
    found.status = ItemStatus::Found;
    found.item_type = "Bag".to_string();
    let found = engine
        .report(found, start + TimeDelta::minutes(2))
        .unwrap();

    // Alice claims the found item; a second claim is a no-op.
    assert!(engine.claim(&found.id).unwrap());
    assert!(!engine.claim(&found.id).unwrap());
    assert_eq!(
        store.get(&found.id).unwrap().unwrap().status,
        ItemStatus::Claimed
    );

    // Alice's lost report is untouched by the claim.
    assert_eq!(
        store.get(&lost.id).unwrap().unwrap().status,
        ItemStatus::Lost
    );

    let summary = engine.dashboard(&alice).unwrap();
    assert_eq!(summary.lost_count, 2);
    assert_eq!(summary.found_count, 0);
    assert_eq!(summary.claimed_count, 0);
    assert_eq!(summary.recent_items.len(), 2);
    assert_eq!(summary.recent_items[0].name, "Umbrella");
    assert_eq!(summary.reporter_display_name, "Alice Ng");

    engine.shutdown();

    let sent = outbox.0.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "alice@example.com");
    assert_eq!(sent[0].1, "A similar item has been found!");
}
