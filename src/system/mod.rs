pub mod collector;
#[cfg(test)]
pub(crate) mod fake;
pub mod guard;
pub mod platform;
pub mod process;
pub mod ranker;
pub mod snapshot;
pub mod source;
pub mod stats;
