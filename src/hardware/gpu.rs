//! GPU detection module
//!
//! Enumerates NVIDIA GPUs through `nvidia-smi` (cross-platform). Machines
//! without the NVIDIA driver or without `nvidia-smi` on PATH report no GPUs.

use std::process::Command;

use super::CollectError;
use crate::report::Record;

/// Fields requested from nvidia-smi, in column order
const QUERY_FIELDS: &str =
    "index,name,utilization.gpu,memory.free,memory.used,memory.total,temperature.gpu";
const FIELD_COUNT: usize = 7;

/// GPU information
#[derive(Debug, Clone, PartialEq)]
pub struct GpuInfo {
    /// Device index as reported by the driver
    pub id: u32,
    /// GPU name (e.g., "NVIDIA GeForce RTX 4070 Super")
    pub name: String,
    /// Utilization percentage (if reported)
    pub load_percent: Option<f64>,
    /// Free VRAM in MB (if reported)
    pub memory_free_mb: Option<f64>,
    /// Used VRAM in MB (if reported)
    pub memory_used_mb: Option<f64>,
    /// Total VRAM in MB (if reported)
    pub memory_total_mb: Option<f64>,
    /// Temperature in Celsius (if reported)
    pub temperature_c: Option<f64>,
}

impl GpuInfo {
    /// Enumerate every GPU visible to nvidia-smi
    pub fn detect_all() -> Result<Vec<Self>, CollectError> {
        let output = match Command::new("nvidia-smi")
            .arg(format!("--query-gpu={}", QUERY_FIELDS))
            .arg("--format=csv,noheader,nounits")
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(error = %err, "nvidia-smi not available, reporting no GPUs");
                return Ok(Vec::new());
            }
        };

        if !output.status.success() {
            tracing::debug!(status = %output.status, "nvidia-smi failed, reporting no GPUs");
            return Ok(Vec::new());
        }

        let gpus = parse_nvidia_smi_csv(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(count = gpus.len(), "gpus detected");
        Ok(gpus)
    }

    /// Report record, fields in display order
    pub fn to_record(&self) -> Record {
        vec![
            ("GPU Name".to_string(), self.name.clone()),
            ("GPU ID".to_string(), self.id.to_string()),
            ("GPU Load".to_string(), with_unit(self.load_percent, "%")),
            ("GPU Free Memory".to_string(), with_unit(self.memory_free_mb, "MB")),
            ("GPU Used Memory".to_string(), with_unit(self.memory_used_mb, "MB")),
            ("GPU Total Memory".to_string(), with_unit(self.memory_total_mb, "MB")),
            ("GPU Temperature".to_string(), with_unit(self.temperature_c, " °C")),
        ]
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.1}{}", value, unit),
        None => "N/A".to_string(),
    }
}

/// Parse `--format=csv,noheader,nounits` output for the fields in [`QUERY_FIELDS`].
///
/// Metrics the driver does not expose (`[N/A]`, `[Not Supported]`) become `None`.
/// A wrong column count, a non-numeric index or any other non-numeric metric is
/// malformed output. nvidia-smi does not quote fields, so a name containing a
/// comma shows up as an extra column.
pub fn parse_nvidia_smi_csv(text: &str) -> Result<Vec<GpuInfo>, CollectError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut gpus = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| CollectError::GpuOutput(err.to_string()))?;

        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != FIELD_COUNT {
            return Err(CollectError::GpuOutput(format!(
                "expected {} columns, got {}",
                FIELD_COUNT,
                record.len()
            )));
        }

        let id = record[0].parse::<u32>().map_err(|_| {
            CollectError::GpuOutput(format!("invalid GPU index {:?}", &record[0]))
        })?;

        gpus.push(GpuInfo {
            id,
            name: record[1].to_string(),
            load_percent: metric(&record[2])?,
            memory_free_mb: metric(&record[3])?,
            memory_used_mb: metric(&record[4])?,
            memory_total_mb: metric(&record[5])?,
            temperature_c: metric(&record[6])?,
        });
    }

    Ok(gpus)
}

/// Numeric metric, or `None` for a bracketed "not available" marker
fn metric(field: &str) -> Result<Option<f64>, CollectError> {
    if field.starts_with('[') && field.ends_with(']') {
        return Ok(None);
    }

    field
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(Some)
        .ok_or_else(|| CollectError::GpuOutput(format!("invalid metric value {:?}", field)))
}
