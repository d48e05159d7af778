pub mod duration;
pub mod transfer_rate;

pub use duration::HumanDuration;
pub use transfer_rate::TransferRate;
