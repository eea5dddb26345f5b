//! Background task driving a controller from scroll measurements

use super::trigger::{ScrollMetrics, ScrollTrigger};
use crate::controller::PaginationController;
use crate::error::Error;
use crate::pagination::Status;
use crate::types::Direction;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle of a running scroll listener; stops the listener when dropped
#[derive(Debug)]
pub struct ScrollSubscription {
    handle: JoinHandle<()>,
}

impl ScrollSubscription {
    /// Stop listening
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Check if the listener has stopped on its own
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Listen with the default threshold
///
/// The controller should already be initialized; measurements arriving
/// before the first page is ready are ignored.
pub fn listen(
    controller: Arc<PaginationController>,
    metrics: watch::Receiver<ScrollMetrics>,
) -> ScrollSubscription {
    listen_with(controller, metrics, ScrollTrigger::new())
}

/// Listen using the given trigger
pub fn listen_with(
    controller: Arc<PaginationController>,
    metrics: watch::Receiver<ScrollMetrics>,
    trigger: ScrollTrigger,
) -> ScrollSubscription {
    let handle = tokio::spawn(run(controller, metrics, trigger));
    ScrollSubscription { handle }
}

async fn run(
    controller: Arc<PaginationController>,
    mut metrics: watch::Receiver<ScrollMetrics>,
    mut trigger: ScrollTrigger,
) {
    debug!(
        "Scroll listener started (threshold {}px)",
        trigger.threshold_px()
    );

    loop {
        if !controller.is_attached() {
            break;
        }

        let state = controller.state();
        if state.exhausted {
            debug!("Feed exhausted; scroll listener stopping");
            break;
        }

        let current = *metrics.borrow_and_update();
        let ready = matches!(state.status, Status::Ready);

        if ready {
            if let Some(intent) = trigger.observe(&current, state.active_page_index) {
                let result = controller.advance(intent.direction).await;
                trigger.resolve(intent.from_page_index);

                // Measurements taken while the page was loading are stale
                metrics.borrow_and_update();

                match result {
                    Ok(state) if state.exhausted => {
                        debug!("Feed exhausted; scroll listener stopping");
                        break;
                    }
                    Ok(_) => {}
                    Err(Error::Detached) => break,
                    Err(e) => warn!("Scroll advance failed: {}", e),
                }
            }
        }

        if metrics.changed().await.is_err() {
            debug!("Scroll source closed");
            break;
        }
    }
}
