//! Populates a demo database and walks the report/match/claim flow.
//!
//! Run with: `cargo run -q --example seed_data -p lostfound_core`

use chrono::Utc;
use lostfound_core::LostFoundCore;
use lostfound_core::store::db::ItemDb;
use lostfound_core::store::{DeliveryError, DirectoryError, ItemStore, Notifier, UserDirectory};
use lostfound_core::types::{Config, EngineConfig, ItemDraft, ItemStatus, User, UserId};
use std::path::PathBuf;
use std::sync::Arc;

struct DemoDirectory(Vec<User>);

impl UserDirectory for DemoDirectory {
    fn get(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self.0.iter().find(|u| &u.id == id).cloned())
    }
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        println!("--- mail to {to}: {subject}\n{body}\n---");
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

fn main() {
    let base_path = PathBuf::from("target/demo-data");
    println!("Using data path: {}", base_path.display());

    let store = Arc::new(
        ItemDb::open(Config {
            base_path: base_path.clone(),
        })
        .expect("failed to open item database"),
    );

    let directory = DemoDirectory(vec![
        user("alice", "Alice", "Ng", "alice@example.com"),
        user("bob", "Bob", "Ortiz", "bob@example.com"),
    ]);

    let engine = LostFoundCore::new(
        Arc::clone(&store),
        directory,
        Arc::new(StdoutNotifier),
        &EngineConfig::default(),
    );

    let now = Utc::now();
    let alice = UserId::try_from("alice").unwrap();
    let bob = UserId::try_from("bob").unwrap();

    println!("\n[Lost reports]");
    for name in ["Blue Backpack", "Umbrella", "Student ID Card"] {
        let item = engine
            .report(ItemDraft::new(alice.clone(), name), now)
            .expect("report failed");
        println!("  {} -> {}", item.id, item.name);
    }

    println!("\n[Found report: triggers matching]");
    let mut found = ItemDraft::new(bob.clone(), "blue backpack");
    found.status = ItemStatus::Found;
    found.item_type = "Bag".to_string();
    found.location = "Cafeteria".to_string();
    let found = engine.report(found, now).expect("report failed");
    println!("  {} -> {}", found.id, found.name);

    println!("\n[Claim]");
    println!("  first claim:  {}", engine.claim(&found.id).expect("claim failed"));
    println!("  second claim: {}", engine.claim(&found.id).expect("claim failed"));

    println!("\n[Dashboard for alice]");
    let summary = engine.dashboard(&alice).expect("dashboard failed");
    println!(
        "  {}: {} lost, {} found, {} claimed",
        summary.reporter_display_name,
        summary.lost_count,
        summary.found_count,
        summary.claimed_count
    );
    for recent in &summary.recent_items {
        println!("  - [{}] {} ({})", recent.status, recent.name, recent.id);
    }

    engine.shutdown();

    let lost = store
        .find_by_status(ItemStatus::Lost)
        .expect("query failed");
    println!("\nDatabase now has {} lost items in total", lost.len());
}
