use crate::algs::trending::TrendingEngine;
use crate::common::time::now_utc;
use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Periodically drops events past the retention horizon and expired cached results.
pub async fn start_scheduler(
    trending: Arc<TrendingEngine>,
    cron_expression: &str,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job_engine = Arc::clone(&trending);
    scheduler
        .add(Job::new_async(cron_expression, move |_uuid, _l| {
            let job_engine = Arc::clone(&job_engine);
            Box::pin(async move {
                job_engine.sweep(now_utc());
            })
        })?)
        .await?;

    scheduler.start().await?;

    Ok(scheduler)
}
