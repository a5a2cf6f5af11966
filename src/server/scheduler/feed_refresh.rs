use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::subscription::SubscriptionService, state::AppState};

/// Starts the feed refresh scheduler.
///
/// Every known feed is rebuilt once right away, then again every `POLL_INTERVAL`
/// minutes. Each run rebuilds the users one at a time under the index lock, so
/// gateway events can interleave with a long refresh.
///
/// # Arguments
/// - `state`: Application state with the poll interval and event source
pub async fn start_scheduler(state: AppState) -> Result<(), AppError> {
    refresh_all(&state).await;

    let scheduler = JobScheduler::new().await?;
    let interval = Duration::from_secs(state.config.poll_interval_minutes.saturating_mul(60));

    let job_state = state.clone();
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let state = job_state.clone();

        Box::pin(async move {
            refresh_all(&state).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Feed refresh scheduler started, running every {} minutes",
        state.config.poll_interval_minutes
    );

    Ok(())
}

async fn refresh_all(state: &AppState) {
    match SubscriptionService::new(state).refresh_all().await {
        Ok(count) => tracing::info!("Refreshed {} calendars", count),
        Err(e) => tracing::error!("Error refreshing calendars: {}", e),
    }
}
