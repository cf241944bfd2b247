//! RAM detection module

use sysinfo::System;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// RAM information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamInfo {
    /// Total memory visible to the OS, in bytes
    pub total_bytes: u64,
}

impl RamInfo {
    /// Detect total RAM via sysinfo
    pub fn detect() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        RamInfo {
            total_bytes: sys.total_memory(),
        }
    }

    /// Total RAM rounded to the nearest whole GB
    pub fn total_gb(&self) -> u64 {
        (self.total_bytes as f64 / BYTES_PER_GB).round() as u64
    }

    /// Report value, e.g. "16 GB"
    pub fn display(&self) -> String {
        format!("{} GB", self.total_gb())
    }
}
