pub mod aggregator;
pub mod completion;
pub mod config;
pub mod estimator;
pub mod report;

use std::io::Write;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::monitor::aggregator::aggregate;
use crate::monitor::estimator::{Sample, ThroughputEstimator};
use crate::monitor::report::{StatusLine, StatusWriter};
use crate::transfer::TransferHandle;

pub use completion::{Completion, CompletionSignal};
pub use config::Config;

const COMPLETED_MESSAGE: &str = "Download completed!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Running,
    Done(Completion),
}

/// Periodically samples a transfer, keeps a one-line status report up to date and reports
/// completion exactly once.
pub struct Monitor<H, W> {
    handle: Arc<H>,
    config: Config,
    estimator: ThroughputEstimator,
    status: StatusWriter<W>,
    started: Instant,
}

impl<H, W> Monitor<H, W>
where
    H: TransferHandle,
    W: Write + Send + 'static,
{
    /// The transfer's metadata must already be known and the engine told to start; a zero
    /// total length is still tolerated and reported as 0%.
    pub fn new(handle: Arc<H>, config: Config, output: W) -> Self {
        let estimator = ThroughputEstimator::new(&config);
        Self {
            handle,
            config,
            estimator,
            status: StatusWriter::new(output),
            started: Instant::now(),
        }
    }

    /// Runs the monitor on its own task. Same preconditions as [`Monitor::new`].
    pub fn spawn(self) -> CompletionSignal {
        let (tx, signal) = CompletionSignal::channel();
        tokio::spawn(async move {
            let completion = self.run().await;
            if tx.send(completion).is_err() {
                warn!("completion signal dropped before delivery");
            }
        });
        signal
    }

    /// Ticks until the transfer is complete. There is no other way out of the loop.
    pub async fn run(mut self) -> Completion {
        info!(
            "monitoring {} ({} bytes) every {:?}",
            self.handle.name(),
            self.handle.total_length(),
            self.config.tick_interval
        );
        self.started = Instant::now();
        let mut ticks = interval(self.config.tick_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            if let MonitorState::Done(completion) = self.tick(Instant::now()) {
                return completion;
            }
        }
    }

    fn tick(&mut self, now: Instant) -> MonitorState {
        let bytes_completed = self.handle.bytes_completed();
        let total_length = self.handle.total_length();
        let eta = self
            .estimator
            .update(Sample::new(now, bytes_completed), total_length);
        let files = aggregate(&self.handle.files());
        debug!(
            "sampled {}/{} bytes, rate {:.0} B/s, eta {}",
            bytes_completed,
            total_length,
            self.estimator.smoothed_rate(),
            eta
        );

        let line = StatusLine {
            bytes_completed,
            total_length,
            files,
            eta,
        };
        if let Err(err) = self.status.overwrite(&line) {
            warn!("failed writing status line: {}", err);
        }

        if bytes_completed != total_length {
            return MonitorState::Running;
        }

        if let Err(err) = self.status.finish(COMPLETED_MESSAGE) {
            warn!("failed writing completion line: {}", err);
        }
        let completion = Completion {
            total_length,
            files: line.files.total,
            elapsed: now.saturating_duration_since(self.started),
        };
        info!(
            "transfer completed in {:?} ({})",
            completion.elapsed,
            completion.average_rate()
        );
        MonitorState::Done(completion)
    }
}
