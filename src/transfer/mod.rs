pub mod simulated;

/// Live, read-only view of an in-progress multi-file transfer owned by some engine.
///
/// Implementations must be safe to read while the engine keeps writing: the monitor polls
/// from its own task.
pub trait TransferHandle: Send + Sync + 'static {
    /// Display name of the transfer.
    fn name(&self) -> String;

    /// Total number of bytes across all files. Fixed once metadata is known.
    fn total_length(&self) -> u64;

    /// Bytes completed so far, never more than `total_length` and never decreasing.
    fn bytes_completed(&self) -> u64;

    /// Per-file status, in the engine's order.
    fn files(&self) -> Vec<FileStatus>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub display_path: String,
    pub length: u64,
    pub bytes_completed: u64,
}

impl FileStatus {
    pub fn new(display_path: impl Into<String>, length: u64, bytes_completed: u64) -> Self {
        Self {
            display_path: display_path.into(),
            length,
            bytes_completed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bytes_completed == self.length
    }

    pub fn is_started(&self) -> bool {
        self.bytes_completed > 0
    }
}
