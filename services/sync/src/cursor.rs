use chrono::{DateTime, Months, Utc};

use helma_common::error::HelmaResult;
use helma_db::sync::repositories::SyncStateRepository;

/// Start cursor for an entity that has never synced: "now minus N months".
pub fn backfill_start(now: DateTime<Utc>, months: u32) -> i64 {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(now)
        .timestamp()
}

/// Resolve the cursor an incremental sync should resume from: the stored
/// watermark when one exists, the backfill horizon otherwise.
pub async fn resolve_start_cursor<S: SyncStateRepository>(
    sync_repo: &S,
    entity: &str,
    backfill_months: u32,
) -> HelmaResult<i64> {
    match sync_repo.last_synced_at(entity).await? {
        Some(ts) => {
            tracing::info!(entity, start_time = ts, "resuming from stored cursor");
            Ok(ts)
        }
        None => {
            let ts = backfill_start(Utc::now(), backfill_months);
            tracing::info!(
                entity,
                start_time = ts,
                months = backfill_months,
                "no cursor yet, backfilling"
            );
            Ok(ts)
        }
    }
}
