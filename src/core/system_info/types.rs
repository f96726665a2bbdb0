use serde::{Deserialize, Serialize};

/// Value of every string field the platform did not report.
pub const UNKNOWN: &str = "<unknown>";

/// Value of every numeric field the platform did not report.
pub const UNKNOWN_NUMBER: i64 = -1;

pub(crate) fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Complete hardware snapshot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    pub cpus: Vec<Cpu>,
    pub memory: Vec<Memory>,
    pub gpus: Vec<Gpu>,
    pub mainboards: Vec<MainBoard>,
    pub disks: Vec<Disk>,
    pub networks: Vec<Network>,
    pub monitors: Vec<Monitor>,
    pub os: Vec<Os>,
    pub batteries: Vec<Battery>, // Only on laptops
}

/// One physical CPU package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub id: i64,
    pub vendor: String,
    pub model_name: String,
    pub num_physical_cores: i64,
    pub num_logical_cores: i64,
    pub max_clock_speed_mhz: i64,
    pub regular_clock_speed_mhz: i64,
    pub min_clock_speed_mhz: i64,
    pub l3_cache_size_bytes: i64,
    pub flags: Vec<String>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self {
            id: UNKNOWN_NUMBER,
            vendor: unknown(),
            model_name: unknown(),
            num_physical_cores: UNKNOWN_NUMBER,
            num_logical_cores: UNKNOWN_NUMBER,
            max_clock_speed_mhz: UNKNOWN_NUMBER,
            regular_clock_speed_mhz: UNKNOWN_NUMBER,
            min_clock_speed_mhz: UNKNOWN_NUMBER,
            l3_cache_size_bytes: UNKNOWN_NUMBER,
            flags: Vec::new(),
        }
    }
}

/// An attached display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub vendor: String,
    pub model: String,
    /// `"<width>x<height>"`
    pub resolution: String,
    /// Refresh rate in Hz
    pub refresh_rate: String,
    pub serial_number: String,
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            vendor: unknown(),
            model: unknown(),
            resolution: unknown(),
            refresh_rate: unknown(),
            serial_number: unknown(),
        }
    }
}

/// A network adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub index: String,
    pub description: String,
    pub mac: String,
    pub ip4: String,
    pub ip6: String,
    pub interface_type: String,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            index: unknown(),
            description: unknown(),
            mac: unknown(),
            ip4: unknown(),
            ip6: unknown(),
            interface_type: unknown(),
        }
    }
}

/// Installed RAM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub total_bytes: i64,
    pub free_bytes: i64,
    pub available_bytes: i64,
    pub modules: Vec<MemoryModule>,
}

impl Default for Memory {
    fn default() -> Self {
        Self {
            total_bytes: UNKNOWN_NUMBER,
            free_bytes: UNKNOWN_NUMBER,
            available_bytes: UNKNOWN_NUMBER,
            modules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryModule {
    pub id: i64,
    pub vendor: String,
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub total_bytes: i64,
    pub frequency_hz: i64,
}

impl Default for MemoryModule {
    fn default() -> Self {
        Self {
            id: UNKNOWN_NUMBER,
            vendor: unknown(),
            name: unknown(),
            model: unknown(),
            serial_number: unknown(),
            total_bytes: UNKNOWN_NUMBER,
            frequency_hz: UNKNOWN_NUMBER,
        }
    }
}

/// A block device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub id: i64,
    pub vendor: String,
    pub model: String,
    pub serial_number: String,
    pub size_bytes: i64,
    pub free_bytes: i64,
}

impl Default for Disk {
    fn default() -> Self {
        Self {
            id: UNKNOWN_NUMBER,
            vendor: unknown(),
            model: unknown(),
            serial_number: unknown(),
            size_bytes: UNKNOWN_NUMBER,
            free_bytes: UNKNOWN_NUMBER,
        }
    }
}

/// A graphics adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    pub id: i64,
    pub vendor: String,
    pub name: String,
    pub driver_version: String,
    /// PCI vendor id, `0x`-prefixed
    pub vendor_id: String,
    /// PCI device id, `0x`-prefixed
    pub device_id: String,
    pub memory_bytes: i64,
}

impl Default for Gpu {
    fn default() -> Self {
        Self {
            id: UNKNOWN_NUMBER,
            vendor: unknown(),
            name: unknown(),
            driver_version: unknown(),
            vendor_id: unknown(),
            device_id: unknown(),
            memory_bytes: UNKNOWN_NUMBER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainBoard {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub serial_number: String,
}

impl Default for MainBoard {
    fn default() -> Self {
        Self {
            vendor: unknown(),
            name: unknown(),
            version: unknown(),
            serial_number: unknown(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Os {
    pub name: String,
    pub version: String,
    pub kernel: String,
    pub is_64bit: bool,
}

impl Default for Os {
    fn default() -> Self {
        Self {
            name: unknown(),
            version: unknown(),
            kernel: unknown(),
            is_64bit: cfg!(target_pointer_width = "64"),
        }
    }
}

/// Battery Information (laptops only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battery {
    pub id: i64,
    pub vendor: String,
    pub model: String,
    pub serial_number: String,
    pub technology: String,
    pub energy_full_mwh: i64,
    pub energy_design_mwh: i64,
    pub energy_now_mwh: i64,
    pub capacity_percent: f64,
    /// `None` when the platform reports neither charging nor discharging
    pub charging: Option<bool>,
}

impl Default for Battery {
    fn default() -> Self {
        Self {
            id: UNKNOWN_NUMBER,
            vendor: unknown(),
            model: unknown(),
            serial_number: unknown(),
            technology: unknown(),
            energy_full_mwh: UNKNOWN_NUMBER,
            energy_design_mwh: UNKNOWN_NUMBER,
            energy_now_mwh: UNKNOWN_NUMBER,
            capacity_percent: UNKNOWN_NUMBER as f64,
            charging: None,
        }
    }
}

impl Battery {
    /// Wear level: full capacity relative to design capacity, in percent.
    pub fn health_percent(&self) -> Option<f64> {
        if self.energy_full_mwh > 0 && self.energy_design_mwh > 0 {
            Some(self.energy_full_mwh as f64 / self.energy_design_mwh as f64 * 100.0)
        } else {
            None
        }
    }
}
