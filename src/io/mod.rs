/// CSV report export.
pub mod export;
