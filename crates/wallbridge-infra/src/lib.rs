//! wallbridge-infra: host desktop-shell adapters and the bridge that drives them.

pub mod bridge;
pub mod env_detect;
pub mod process_runner;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_util;
