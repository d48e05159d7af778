use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::info;
use rand::Rng;
use size::Size;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::transfer::{FileStatus, TransferHandle};

/// In-process stand-in for a transfer engine. Files are filled in order, a few at a time, at a
/// jittered throughput.
pub struct SimulatedTransfer {
    name: String,
    files: Vec<SimulatedFile>,
}

struct SimulatedFile {
    path: String,
    length: u64,
    completed: AtomicU64,
}

impl SimulatedFile {
    fn remaining(&self) -> u64 {
        self.length
            .saturating_sub(self.completed.load(Ordering::Acquire))
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Average amount written per step
    pub chunk_size: Size,
    /// Time between steps
    pub step_interval: Duration,
    /// Maximum number of files written to concurrently
    pub parallel_files: usize,
}

impl EngineConfig {
    pub fn new(chunk_size: Size) -> Self {
        Self {
            chunk_size,
            step_interval: Duration::from_millis(250),
            parallel_files: 2,
        }
    }
}

pub struct Engine {
    task: JoinHandle<()>,
}

impl Engine {
    /// Stops writing (if still running) and waits for the engine task to wind down.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.task.abort();
        match self.task.await {
            Err(err) if !err.is_cancelled() => Err(err.into()),
            _ => {
                info!("engine stopped");
                Ok(())
            }
        }
    }
}

impl SimulatedTransfer {
    pub fn new<P: Into<String>>(
        name: impl Into<String>,
        files: impl IntoIterator<Item = (P, Size)>,
    ) -> Self {
        let files = files
            .into_iter()
            .map(|(path, length)| SimulatedFile {
                path: path.into(),
                length: length.bytes().max(0) as u64,
                completed: AtomicU64::new(0),
            })
            .collect();
        Self {
            name: name.into(),
            files,
        }
    }

    pub fn start(self: &Arc<Self>, config: EngineConfig) -> Engine {
        let transfer = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut steps = interval(config.step_interval);
            steps.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                steps.tick().await;
                let budget = jittered(config.chunk_size);
                if !transfer.step(budget, config.parallel_files.max(1)) {
                    break;
                }
            }
        });
        Engine { task }
    }

    /// Spreads `budget` bytes over the first `parallel` incomplete files. Returns whether any
    /// work remains.
    fn step(&self, budget: u64, parallel: usize) -> bool {
        let active: Vec<_> = self
            .files
            .iter()
            .filter(|file| file.remaining() > 0)
            .take(parallel)
            .collect();
        if active.is_empty() {
            return false;
        }
        let share = (budget / active.len() as u64).max(1);
        for file in active {
            let written = share.min(file.remaining());
            file.completed.fetch_add(written, Ordering::AcqRel);
        }
        self.files.iter().any(|file| file.remaining() > 0)
    }
}

fn jittered(chunk_size: Size) -> u64 {
    let factor: f64 = rand::rng().random_range(0.5..1.5);
    ((chunk_size.bytes().max(0) as f64) * factor) as u64
}

impl TransferHandle for SimulatedTransfer {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn total_length(&self) -> u64 {
        self.files.iter().map(|file| file.length).sum()
    }

    fn bytes_completed(&self) -> u64 {
        self.files
            .iter()
            .map(|file| file.completed.load(Ordering::Acquire))
            .sum()
    }

    fn files(&self) -> Vec<FileStatus> {
        self.files
            .iter()
            .map(|file| {
                FileStatus::new(
                    file.path.clone(),
                    file.length,
                    file.completed.load(Ordering::Acquire),
                )
            })
            .collect()
    }
}
