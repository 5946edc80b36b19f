//! Found-vs-lost matching and notification job construction.

use crate::notify::NotificationJob;
use crate::store::{ItemStore, StoreError, UserDirectory};
use crate::types::{Item, ItemStatus};

/// Subject line for match notifications.
pub const MATCH_SUBJECT: &str = "A similar item has been found!";

/// Builds one notification job per LOST item whose name equals the found
/// item's name under case-insensitive comparison.
///
/// Matching is exact name equality, not fuzzy or substring matching.
/// Candidates whose reporter cannot be resolved are skipped without
/// aborting the batch. Jobs come out in candidate query order and are not
/// deduplicated: two lost reports with the same name by one user yield two
/// jobs.
pub fn jobs_for_found_item<S, U>(
    found: &Item,
    store: &S,
    users: &U,
) -> Result<Vec<NotificationJob>, StoreError>
where
    S: ItemStore,
    U: UserDirectory,
{
    let candidates = store.find_by_name_ignore_case(&found.name)?;

    let mut jobs = Vec::new();
    for lost in candidates {
        if lost.status != ItemStatus::Lost {
            continue;
        }

        let reporter = match users.get(&lost.reporter_id) {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!(reporter = %lost.reporter_id, "match candidate skipped: reporter unknown");
                continue;
            }
            Err(e) => {
                tracing::warn!(reporter = %lost.reporter_id, error = %e, "match candidate skipped: directory lookup failed");
                continue;
            }
        };

        jobs.push(NotificationJob {
            recipient: reporter.email.clone(),
            subject: MATCH_SUBJECT.to_string(),
            body: notification_body(&lost, found, &reporter.first_name),
        });
    }

    Ok(jobs)
}

fn notification_body(lost: &Item, found: &Item, first_name: &str) -> String {
    format!(
        "Hi {first_name},\n\n\
         We noticed that you reported a lost item: {lost_name}.\n\
         Good news! A similar item was just reported as FOUND.\n\n\
         Item details:\n\
         - Name: {found_name}\n\
         - Type: {found_type}\n\
         - Reported on: {reported_on}\n\n\
         Please log in to the Lost & Found portal to check it out.\n\n\
         Best regards,\n\
         Lost & Found Team",
        lost_name = lost.name,
        found_name = found.name,
        found_type = found.item_type,
        reported_on = found.reported_at.format("%Y-%m-%d %H:%M"),
    )
}
