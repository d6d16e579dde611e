//! System metrics collection using sysinfo.

use std::path::Path;

use sysinfo::{Disks, System};
use thiserror::Error;
use tracing::warn;

use crate::sample::Sample;

/// Mount whose usage is reported as the disk figure.
const ROOT_MOUNT: &str = "/";

/// A single OS metric query that could not produce a value.
#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("no CPUs reported by the system")]
    NoCpus,

    #[error("total physical memory reported as zero")]
    NoMemory,

    #[error("no filesystem mounted at '{0}'")]
    MountNotFound(&'static str),

    #[error("filesystem at '{0}' reports zero total space")]
    EmptyFilesystem(&'static str),
}

/// Sampler for CPU, memory, and disk utilization.
///
/// The `System` handle persists across ticks so CPU usage is a
/// point-in-time read against the previous refresh rather than a
/// blocking interval measurement.
pub struct SystemSampler {
    system: System,
    disks: Disks,
}

impl SystemSampler {
    /// Create a new sampler.
    pub fn new() -> Self {
        Self {
            system: System::new_all(),
            disks: Disks::new_with_refreshed_list(),
        }
    }

    /// Take one full sample stamped with the given address.
    ///
    /// The three measurements are independent; a failed one is logged
    /// and rendered as 0 without affecting the others.
    pub fn collect(&mut self, client_ip: &str) -> Sample {
        let cpu = self.measure_cpu();
        let memory = self.measure_memory();
        let disk = self.measure_disk();
        fill_sample(client_ip, cpu, memory, disk)
    }

    /// CPU utilization across all cores, percent.
    pub fn measure_cpu(&mut self) -> Result<f64, MeasureError> {
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(MeasureError::NoCpus);
        }

        Ok(f64::from(self.system.global_cpu_usage()))
    }

    /// Used physical memory over total, percent.
    pub fn measure_memory(&mut self) -> Result<f64, MeasureError> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(MeasureError::NoMemory);
        }

        Ok(self.system.used_memory() as f64 / total as f64 * 100.0)
    }

    /// Used space on the root filesystem, percent.
    pub fn measure_disk(&mut self) -> Result<f64, MeasureError> {
        self.disks.refresh(true);

        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == Path::new(ROOT_MOUNT))
            .ok_or(MeasureError::MountNotFound(ROOT_MOUNT))?;

        let total = disk.total_space();
        if total == 0 {
            return Err(MeasureError::EmptyFilesystem(ROOT_MOUNT));
        }

        let used = total.saturating_sub(disk.available_space());
        Ok(used as f64 / total as f64 * 100.0)
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble a sample from the three measurement outcomes, substituting
/// 0 for failed fields.
pub fn fill_sample(
    client_ip: &str,
    cpu: Result<f64, MeasureError>,
    memory: Result<f64, MeasureError>,
    disk: Result<f64, MeasureError>,
) -> Sample {
    Sample {
        client_ip: client_ip.to_string(),
        cpu_usage: field_or_zero("cpu", cpu),
        memory_usage: field_or_zero("memory", memory),
        disk_usage: field_or_zero("disk", disk),
    }
}

fn field_or_zero(field: &'static str, value: Result<f64, MeasureError>) -> f64 {
    match value {
        Ok(v) => v,
        Err(e) => {
            warn!(field, error = %e, "measurement failed, reporting 0");
            0.0
        }
    }
}
