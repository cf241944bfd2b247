//! CPU detection module
//!
//! Detects CPU information using:
//! - Cross-platform: sysinfo crate for the brand string and vendor id
//! - Windows: `PROCESSOR_IDENTIFIER` for the raw processor identifier

use sysinfo::System;

use super::CollectError;

const UNKNOWN: &str = "Unknown";

/// CPU information
#[derive(Debug, Clone, PartialEq)]
pub struct CpuInfo {
    /// CPU brand string (e.g., "AMD Ryzen 7 5800X 8-Core Processor")
    pub brand: String,
    /// Raw processor identifier.
    ///
    /// Windows reports the full `PROCESSOR_IDENTIFIER`
    /// (e.g., "Intel64 Family 6 Model 158 Stepping 10, GenuineIntel"). Elsewhere this
    /// is the CPU vendor id (e.g., "GenuineIntel") rather than `uname -p`, which is
    /// usually empty or just the architecture on Linux.
    pub identifier: String,
    /// Machine architecture (e.g., "x86_64")
    pub architecture: String,
}

impl CpuInfo {
    /// Detect CPU information (platform-specific)
    pub fn detect() -> Result<Self, CollectError> {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let first_cpu = sys.cpus().first().ok_or(CollectError::NoCpu)?;

        let architecture = machine_architecture();
        let brand = non_empty(first_cpu.brand()).unwrap_or_else(|| UNKNOWN.to_string());
        let identifier = processor_identifier(first_cpu.vendor_id(), &architecture);

        tracing::debug!(%brand, %identifier, %architecture, "cpu detected");

        Ok(CpuInfo {
            brand,
            identifier,
            architecture,
        })
    }
}

/// Architecture of the running machine
pub fn machine_architecture() -> String {
    std::env::consts::ARCH.to_string()
}

fn processor_identifier(vendor_id: &str, architecture: &str) -> String {
    #[cfg(target_os = "windows")]
    {
        if let Some(id) = std::env::var("PROCESSOR_IDENTIFIER")
            .ok()
            .and_then(|id| non_empty(&id))
        {
            return id;
        }
    }

    pick_identifier(vendor_id, architecture)
}

/// Vendor id when the platform reports one, otherwise the architecture
fn pick_identifier(vendor_id: &str, architecture: &str) -> String {
    non_empty(vendor_id).unwrap_or_else(|| architecture.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
