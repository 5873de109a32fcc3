// Library root: re-exports all modules so integration tests and the binary
// share one public API.

pub mod boxscore;
pub mod config;
pub mod free_agents;
pub mod league;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod stats;
pub mod store;
