//! Poll-driven subscription to a single space record.

use std::time::Duration;

use sqlx::PgPool;
use tokio::sync::watch;

use super::models::Space;
use super::queries;

const WATCH_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Subscribe to a space record by id. The receiver holds the latest snapshot
/// and is updated whenever the stored record changes. The poll task stops once
/// every receiver is dropped.
pub fn watch_space(pool: PgPool, space_id: String) -> watch::Receiver<Option<Space>> {
    let (tx, rx) = watch::channel::<Option<Space>>(None);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(WATCH_POLL_INTERVAL);
        loop {
            interval.tick().await;
            if tx.is_closed() {
                break;
            }
            match queries::get_space(&pool, &space_id).await {
                Ok(snapshot) => {
                    tx.send_if_modified(|current| {
                        if *current != snapshot {
                            *current = snapshot;
                            true
                        } else {
                            false
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!("Watch poll for {} failed: {}", space_id, e);
                }
            }
        }
    });

    rx
}
