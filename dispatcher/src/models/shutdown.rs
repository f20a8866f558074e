use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;

pub(crate) struct ShutdownSignal {
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    fn new(notify: Arc<Notify>) -> Self {
        Self { notify }
    }

    /// Resolves after `run_for_millis`, or on Ctrl+C when no deadline is set.
    async fn wait(&self, run_for_millis: Option<u64>) {
        match run_for_millis {
            Some(time_to_live_millis) => {
                tokio::time::sleep(Duration::from_millis(time_to_live_millis)).await;
                info!("Run time of {} ms elapsed. Stopping dispatcher", time_to_live_millis);
            }
            None => {
                if let Err(e) = signal::ctrl_c().await {
                    error!("Error while waiting for Ctrl+C: {}", e);
                } else {
                    info!("Ctrl+C received. Stopping dispatcher");
                }
            }
        }
        // notify_one stores a permit, so a waiter that registers late still wakes.
        self.notify.notify_one();
    }
}

/// Spawns a task that notifies `notify` after `run_for_millis`, or on Ctrl+C when none is given.
pub fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for_millis: Option<u64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_signal = ShutdownSignal::new(notify);
        shutdown_signal.wait(run_for_millis).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_shutdown_signal_with_timeout() {
        let notify = Arc::new(Notify::new());
        let handle = listen_for_shutdown(notify.clone(), Some(100));

        let result = timeout(Duration::from_millis(500), notify.notified()).await;
        assert!(result.is_ok(), "Shutdown signal was not received in time");

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_late_waiter_still_notified() {
        let notify = Arc::new(Notify::new());
        listen_for_shutdown(notify.clone(), Some(10)).await.unwrap();

        let result = timeout(Duration::from_millis(100), notify.notified()).await;
        assert!(result.is_ok());
    }
}
