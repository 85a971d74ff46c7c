//! Device detection: which backends this machine could run.
//!
//! Probing is cheap but done once; the result is cached for the process.

use std::path::Path;
use std::sync::OnceLock;

use crate::tag::Backend;

/// What the current machine offers.
#[derive(Clone, Debug, Default)]
pub struct DeviceCaps {
    pub num_cores: usize,
    pub intel_cpu: bool,
    pub intel_gpu: Option<String>,
    pub nvidia_gpu: Option<String>,
}

impl DeviceCaps {
    /// Backends with a device present, most capable first.
    pub fn backends(&self) -> Vec<Backend> {
        let mut out = Vec::with_capacity(4);
        if self.nvidia_gpu.is_some() {
            out.push(Backend::NvidiaGpu);
        }
        if self.intel_gpu.is_some() {
            out.push(Backend::IntelGpu);
        }
        if self.intel_cpu {
            out.push(Backend::IntelCpu);
        }
        out.push(Backend::Host);
        out
    }

    pub fn has(&self, backend: Backend) -> bool {
        match backend {
            Backend::Host => true,
            Backend::IntelCpu => self.intel_cpu,
            Backend::IntelGpu => self.intel_gpu.is_some(),
            Backend::NvidiaGpu => self.nvidia_gpu.is_some(),
        }
    }
}

static CAPS: OnceLock<DeviceCaps> = OnceLock::new();

/// Detect devices (cached after first call).
pub fn detect() -> &'static DeviceCaps {
    CAPS.get_or_init(|| {
        let caps = DeviceCaps {
            num_cores: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            intel_cpu: detect_intel_cpu(),
            intel_gpu: detect_intel_gpu(),
            nvidia_gpu: detect_nvidia_gpu(),
        };
        tracing::debug!(?caps, "detected devices");
        caps
    })
}

#[cfg(target_arch = "x86_64")]
fn detect_intel_cpu() -> bool {
    // Vendor string "GenuineIntel" lives in ebx, edx, ecx of leaf 0.
    let leaf = core::arch::x86_64::__cpuid(0);
    let mut vendor = [0u8; 12];
    vendor[..4].copy_from_slice(&leaf.ebx.to_le_bytes());
    vendor[4..8].copy_from_slice(&leaf.edx.to_le_bytes());
    vendor[8..].copy_from_slice(&leaf.ecx.to_le_bytes());
    &vendor == b"GenuineIntel"
}

#[cfg(not(target_arch = "x86_64"))]
fn detect_intel_cpu() -> bool {
    false
}

/// Detect Intel GPU via DRI device nodes.
fn detect_intel_gpu() -> Option<String> {
    if !Path::new("/dev/dri/renderD128").exists() {
        return None;
    }
    // 0x8086 is Intel's PCI vendor id.
    let vendor = std::fs::read_to_string("/sys/class/drm/renderD128/device/vendor").ok()?;
    if vendor.trim() != "0x8086" {
        return None;
    }
    match std::fs::read_to_string("/sys/class/drm/card0/device/product_name") {
        Ok(name) => Some(name.trim().to_string()),
        Err(_) => Some("Intel GPU (unknown model)".to_string()),
    }
}

/// Detect an NVIDIA GPU via the driver's device node.
fn detect_nvidia_gpu() -> Option<String> {
    if !Path::new("/dev/nvidia0").exists() {
        return None;
    }
    let info = std::fs::read_dir("/proc/driver/nvidia/gpus")
        .ok()
        .and_then(|mut dirs| dirs.next())
        .and_then(|entry| entry.ok())
        .and_then(|entry| std::fs::read_to_string(entry.path().join("information")).ok());
    let model = info.as_deref().and_then(|text| {
        text.lines()
            .find_map(|line| line.strip_prefix("Model:"))
            .map(|m| m.trim().to_string())
    });
    Some(model.unwrap_or_else(|| "NVIDIA GPU (unknown model)".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_detect_caps() {
        let caps = detect();
        assert!(caps.num_cores > 0);
        assert!(caps.has(Backend::Host));
        assert_eq!(caps.backends().last(), Some(&Backend::Host));
        // cached
        assert!(std::ptr::eq(caps, detect()));
    }

    #[test]
    fn test_backend_preference() {
        let caps = DeviceCaps {
            num_cores: 8,
            intel_cpu: true,
            intel_gpu: Some("Arc".into()),
            nvidia_gpu: None,
        };
        assert_eq!(
            caps.backends(),
            vec![Backend::IntelGpu, Backend::IntelCpu, Backend::Host]
        );
        assert!(!caps.has(Backend::NvidiaGpu));
    }
}
