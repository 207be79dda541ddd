// ABOUTME: Library root for spinup - the deployment pipeline and its event stream.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod inject;
pub mod output;
pub mod pipeline;
pub mod runner;
