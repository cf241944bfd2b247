//! System information aggregator

use sysinfo::System;

use super::cpu::CpuInfo;
use super::gpu::GpuInfo;
use super::network::NetworkIdentity;
use super::ram::RamInfo;
use super::CollectError;
use crate::report::{ReportValue, SpecsReport};

pub const PROCESSOR_NAME: &str = "Processor Name";
pub const PROCESSOR: &str = "Processor";
pub const ARCHITECTURE: &str = "Architecture";
pub const PLATFORM: &str = "Platform";
pub const PLATFORM_VERSION: &str = "Platform Version";
pub const PLATFORM_RELEASE: &str = "Platform Release";
pub const RAM: &str = "RAM";
pub const GPUS: &str = "GPUs (NVDIA)";
pub const HOSTNAME: &str = "Hostname";
pub const IP_ADDRESS: &str = "IP Address";

/// What to collect beyond the basic CPU/OS/RAM facts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Enumerate GPUs (extended report)
    pub include_gpus: bool,
    /// Include hostname and resolved IP address
    pub include_network: bool,
}

/// Operating system identity
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformInfo {
    /// OS family (e.g., "Linux", "Windows", "Darwin")
    pub name: String,
    /// OS build version (`uname -v` on Unix, the OS version elsewhere)
    pub version: String,
    /// OS / kernel release
    pub release: String,
}

impl PlatformInfo {
    pub fn detect() -> Self {
        PlatformInfo {
            name: platform_name(std::env::consts::OS),
            version: platform_version(),
            release: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

fn platform_version() -> String {
    #[cfg(unix)]
    {
        if let Some(version) = uname_version() {
            return version;
        }
    }

    System::os_version().unwrap_or_else(|| "Unknown".to_string())
}

/// Kernel build version from uname(2), e.g. "#1 SMP PREEMPT_DYNAMIC ..."
#[cfg(unix)]
fn uname_version() -> Option<String> {
    // SAFETY: utsname is plain C data; uname only fills the struct it is given.
    let mut name: libc::utsname = unsafe { std::mem::zeroed() };
    if unsafe { libc::uname(&mut name) } != 0 {
        tracing::debug!("uname failed, falling back to OS version");
        return None;
    }
    utsname_field(&name.version)
}

/// NUL-terminated utsname field as trimmed text, `None` when empty
#[cfg(unix)]
fn utsname_field(field: &[libc::c_char]) -> Option<String> {
    let bytes: Vec<u8> = field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    let text = String::from_utf8_lossy(&bytes).trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Map a Rust OS identifier to the conventional OS family name
fn platform_name(os: &str) -> String {
    match os {
        "linux" => "Linux",
        "windows" => "Windows",
        "macos" => "Darwin",
        "freebsd" => "FreeBSD",
        "netbsd" => "NetBSD",
        "openbsd" => "OpenBSD",
        "android" => "Android",
        "ios" => "iOS",
        other => other,
    }
    .to_string()
}

/// Complete system snapshot for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Specs {
    pub cpu: CpuInfo,
    pub platform: PlatformInfo,
    pub ram: RamInfo,
    /// Present only when GPUs were requested
    pub gpus: Option<Vec<GpuInfo>>,
    /// Present only when network identity was requested
    pub network: Option<NetworkIdentity>,
}

impl Specs {
    /// Detect all requested system information.
    ///
    /// The first failing query aborts the whole collection.
    pub fn detect(options: &CollectOptions) -> Result<Self, CollectError> {
        let cpu = CpuInfo::detect()?;
        let platform = PlatformInfo::detect();
        let ram = RamInfo::detect();

        let gpus = if options.include_gpus {
            Some(GpuInfo::detect_all()?)
        } else {
            None
        };

        let network = if options.include_network {
            Some(NetworkIdentity::detect()?)
        } else {
            None
        };

        tracing::info!(
            gpus = gpus.as_ref().map_or(0, Vec::len),
            network = network.is_some(),
            "system specs collected"
        );

        Ok(Specs {
            cpu,
            platform,
            ram,
            gpus,
            network,
        })
    }
}

impl From<Specs> for SpecsReport {
    fn from(specs: Specs) -> Self {
        let mut report = SpecsReport::new();

        report.insert(PROCESSOR_NAME, specs.cpu.brand);
        report.insert(PROCESSOR, specs.cpu.identifier);
        report.insert(ARCHITECTURE, specs.cpu.architecture);
        report.insert(PLATFORM, specs.platform.name);
        report.insert(PLATFORM_VERSION, specs.platform.version);
        report.insert(PLATFORM_RELEASE, specs.platform.release);
        report.insert(RAM, specs.ram.display());

        if let Some(gpus) = specs.gpus {
            let records = gpus.iter().map(GpuInfo::to_record).collect();
            report.insert(GPUS, ReportValue::Records(records));
        }

        if let Some(network) = specs.network {
            report.insert(HOSTNAME, network.hostname);
            report.insert(IP_ADDRESS, network.ip_address.to_string());
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    const BASIC_LABELS: [&str; 7] = [
        PROCESSOR_NAME,
        PROCESSOR,
        ARCHITECTURE,
        PLATFORM,
        PLATFORM_VERSION,
        PLATFORM_RELEASE,
        RAM,
    ];

    fn sample_specs() -> Specs {
        Specs {
            cpu: CpuInfo {
                brand: "Test CPU 9000".to_string(),
                identifier: "GenuineIntel".to_string(),
                architecture: "x86_64".to_string(),
            },
            platform: PlatformInfo {
                name: "Linux".to_string(),
                version: "#1 SMP PREEMPT_DYNAMIC".to_string(),
                release: "6.8.0".to_string(),
            },
            ram: RamInfo {
                total_bytes: 32 * 1024 * 1024 * 1024,
            },
            gpus: None,
            network: None,
        }
    }

    fn test_gpu() -> GpuInfo {
        GpuInfo {
            id: 0,
            name: "Test GPU".to_string(),
            load_percent: Some(50.0),
            memory_free_mb: Some(6144.0),
            memory_used_mb: Some(2048.0),
            memory_total_mb: Some(8192.0),
            temperature_c: Some(60.0),
        }
    }

    #[test]
    fn basic_report_has_exactly_seven_scalar_lines() {
        let report = SpecsReport::from(sample_specs());

        assert_eq!(report.labels().collect::<Vec<_>>(), BASIC_LABELS);
        assert_eq!(
            report.render(),
            "Processor Name: Test CPU 9000\n\
             Processor: GenuineIntel\n\
             Architecture: x86_64\n\
             Platform: Linux\n\
             Platform Version: #1 SMP PREEMPT_DYNAMIC\n\
             Platform Release: 6.8.0\n\
             RAM: 32 GB\n"
        );
    }

    #[test]
    fn network_identity_is_appended_last() {
        let mut specs = sample_specs();
        specs.network = Some(NetworkIdentity {
            hostname: "workstation".to_string(),
            ip_address: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42)),
        });

        let report = SpecsReport::from(specs);
        let labels: Vec<_> = report.labels().collect();

        assert_eq!(labels.len(), 9);
        assert_eq!(&labels[7..], [HOSTNAME, IP_ADDRESS]);
        assert!(report.render().ends_with("Hostname: workstation\nIP Address: 192.168.1.42\n"));
    }

    #[test]
    fn extended_report_renders_gpu_block() {
        let mut specs = sample_specs();
        specs.gpus = Some(vec![test_gpu()]);

        let report = SpecsReport::from(specs);
        assert_eq!(report.labels().nth(7), Some(GPUS));
        assert!(report.render().ends_with(
            "GPUs (NVDIA):\n\
             \x20   GPU Name: Test GPU\n\
             \x20   GPU ID: 0\n\
             \x20   GPU Load: 50.0%\n\
             \x20   GPU Free Memory: 6144.0MB\n\
             \x20   GPU Used Memory: 2048.0MB\n\
             \x20   GPU Total Memory: 8192.0MB\n\
             \x20   GPU Temperature: 60.0 °C\n"
        ));
    }

    #[test]
    fn extended_report_without_gpus_keeps_empty_header() {
        let mut specs = sample_specs();
        specs.gpus = Some(Vec::new());

        let report = SpecsReport::from(specs);
        assert_eq!(report.get(GPUS), Some(&ReportValue::Records(Vec::new())));
        assert!(report.render().ends_with("RAM: 32 GB\nGPUs (NVDIA):\n"));
    }

    #[test]
    fn gpus_come_before_network_identity() {
        let mut specs = sample_specs();
        specs.gpus = Some(vec![test_gpu()]);
        specs.network = Some(NetworkIdentity {
            hostname: "rig".to_string(),
            ip_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
        });

        let labels: Vec<_> = SpecsReport::from(specs).labels().map(String::from).collect();
        assert_eq!(labels[7..], [GPUS, HOSTNAME, IP_ADDRESS]);
    }

    #[test]
    fn platform_names_follow_os_family() {
        assert_eq!(platform_name("linux"), "Linux");
        assert_eq!(platform_name("macos"), "Darwin");
        assert_eq!(platform_name("windows"), "Windows");
        assert_eq!(platform_name("haiku"), "haiku");
    }

    #[cfg(unix)]
    fn c_chars(text: &[u8]) -> Vec<libc::c_char> {
        text.iter().map(|&b| b as libc::c_char).collect()
    }

    #[cfg(unix)]
    #[test]
    fn utsname_field_stops_at_nul() {
        let raw = c_chars(b"#1 SMP PREEMPT_DYNAMIC @0\0stale bytes");
        assert_eq!(
            utsname_field(&raw),
            Some("#1 SMP PREEMPT_DYNAMIC @0".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn empty_utsname_field_is_none() {
        assert_eq!(utsname_field(&c_chars(b"\0\0\0")), None);
        assert_eq!(utsname_field(&c_chars(b"  \0")), None);
    }

    #[cfg(unix)]
    #[test]
    fn platform_version_is_kernel_build_version() {
        let output = std::process::Command::new("uname")
            .arg("-v")
            .output()
            .expect("uname is available on unix hosts");
        let expected = String::from_utf8_lossy(&output.stdout).trim().to_string();

        assert_eq!(platform_version(), expected);
        assert_eq!(PlatformInfo::detect().version, expected);
    }

    #[test]
    fn detect_basic_specs_on_this_host() {
        let specs = Specs::detect(&CollectOptions::default()).expect("basic collection");
        let report = SpecsReport::from(specs);

        assert!(!report.is_error());
        assert_eq!(report.labels().collect::<Vec<_>>(), BASIC_LABELS);
    }
}
