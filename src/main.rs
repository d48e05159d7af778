use std::io;
use std::sync::Arc;

use log::info;
use size::Size;

use crate::monitor::{Config, Monitor};
use crate::transfer::TransferHandle;
use crate::transfer::simulated::{EngineConfig, SimulatedTransfer};

mod monitor;
mod transfer;
mod units;

const NAME: &str = "debian-12.5.0-amd64-DVD";

fn files() -> Vec<(&'static str, Size)> {
    vec![
        ("debian-12.5.0-amd64-DVD/README.txt", Size::from_kibibytes(12)),
        ("debian-12.5.0-amd64-DVD/SHA256SUMS", Size::from_bytes(0)),
        ("debian-12.5.0-amd64-DVD/debian-12.5.0-amd64-DVD-1.iso", Size::from_mebibytes(96)),
        ("debian-12.5.0-amd64-DVD/debian-12.5.0-amd64-DVD-2.iso", Size::from_mebibytes(48)),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let transfer = Arc::new(SimulatedTransfer::new(NAME, files()));
    println!("Downloading: {}", transfer.name());

    let engine = transfer.start(EngineConfig::new(Size::from_mebibytes(4)));
    let signal = Monitor::new(Arc::clone(&transfer), Config::new(), io::stdout()).spawn();

    let completion = signal.wait().await?;
    info!(
        "{} files, {} bytes, average {}",
        completion.files,
        completion.total_length,
        completion.average_rate()
    );
    engine.shutdown().await?;

    println!("Exiting application...");
    Ok(())
}
