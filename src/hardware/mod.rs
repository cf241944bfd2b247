//! Hardware detection module
//!
//! Detects CPU, RAM, OS, GPU and network identity using sysinfo,
//! nvidia-smi for NVIDIA GPUs, and the system resolver for the host address.

pub mod cpu;
pub mod gpu;
pub mod network;
pub mod ram;
mod system;

use thiserror::Error;

pub use system::{CollectOptions, Specs};

/// Failure of a collection attempt.
///
/// Any of these aborts the whole collection; the caller reports the
/// message instead of partial data.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("No CPU detected")]
    NoCpu,

    #[error("Invalid nvidia-smi output: {0}")]
    GpuOutput(String),

    #[error("Hostname unavailable: {0}")]
    Hostname(String),

    #[error("Could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Hostname {0} did not resolve to any address")]
    NoAddress(String),
}
