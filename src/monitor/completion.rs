use std::time::Duration;

use anyhow::Context;
use tokio::sync::oneshot;

use crate::units::TransferRate;

/// Summary delivered once the transfer has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub total_length: u64,
    pub files: usize,
    pub elapsed: Duration,
}

impl Completion {
    pub fn average_rate(&self) -> TransferRate {
        TransferRate::from_bytes(self.total_length, self.elapsed)
    }
}

/// Receiving half of the one-shot completion notification.
///
/// The sending side never waits for a receiver, so the monitor can finish before anyone calls
/// [`CompletionSignal::wait`].
#[derive(Debug)]
pub struct CompletionSignal(oneshot::Receiver<Completion>);

impl CompletionSignal {
    pub fn channel() -> (oneshot::Sender<Completion>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self(rx))
    }

    /// Waits until the monitor reports completion.
    pub async fn wait(self) -> anyhow::Result<Completion> {
        self.0
            .await
            .context("monitor stopped without reporting completion")
    }
}
