//! Background writer for stat events.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::repositories::StatsRepository;
use crate::domain::stat_event::StatEvent;

/// Queues a stat event without blocking the caller.
///
/// When the queue is full the event is handed to a spawned task that waits
/// for capacity, so records are delayed rather than lost. Events are only
/// dropped once the worker has shut down.
pub fn enqueue(sender: &mpsc::Sender<StatEvent>, event: StatEvent) {
    match sender.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            debug!(id = %event.id, "Stat queue full, deferring record");
            let sender = sender.clone();
            tokio::spawn(async move {
                if let Err(e) = sender.send(event).await {
                    metrics::counter!("stats_dropped_total").increment(1);
                    warn!(id = %e.0.id, "Stat worker gone, dropping record");
                }
            });
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("stats_dropped_total").increment(1);
            warn!(id = %event.id, "Stat worker gone, dropping record");
        }
    }
}

/// Drains the stat queue into the repository until every sender is dropped.
///
/// Write failures are logged and swallowed: the response they belong to has
/// already been sent.
pub async fn run_stat_worker(
    mut rx: mpsc::Receiver<StatEvent>,
    repository: Arc<dyn StatsRepository>,
) {
    while let Some(event) = rx.recv().await {
        let id = event.id.clone();

        if let Err(e) = repository.append_stat(event.into_new_stat()).await {
            metrics::counter!("stats_dropped_total").increment(1);
            warn!(id = %id, error = %e, "Failed to record stat");
        }
    }

    debug!("Stat worker stopped");
}
