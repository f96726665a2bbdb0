//! procfs/sysfs data source (Linux).

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use sysinfo::Networks;

use super::{
    fs_list_directory, fs_read_binary, fs_read_link, fs_read_text, DeviceHandle, DeviceKind,
    DisplayConnector, DisplayMode, HardwareDataSource, ManagementRow, NetworkInterface,
};

pub const DRM_CLASS_DIR: &str = "/sys/class/drm";
pub const NET_CLASS_DIR: &str = "/sys/class/net";

/// `card0-HDMI-A-1`, `card1-eDP-1`, ... (plain `card0` is the GPU itself).
static CONNECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^card\d+-.+$").expect("connector pattern is valid"));

/// `1920x1080`, optionally followed by a suffix such as `i`.
static MODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)x(\d+)").expect("mode pattern is valid"));

/// Reads `/proc`, `/sys` and `/etc` below a root directory.
///
/// The live system uses `/` as root. Tests point the root at a temporary
/// directory holding a fake tree; every absolute path handed to the source is
/// then resolved below that directory.
#[derive(Debug, Clone)]
pub struct SysfsDataSource {
    root: PathBuf,
}

impl SysfsDataSource {
    /// Source for the running system.
    pub fn new() -> Self {
        Self::with_root("/")
    }

    /// Source reading a tree rooted at `root` instead of `/`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_live(&self) -> bool {
        self.root == Path::new("/")
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("/") {
            Ok(relative) => self.root.join(relative),
            Err(_) => self.root.join(path),
        }
    }

    fn display_connectors(&self) -> Vec<DeviceHandle> {
        let drm_dir = Path::new(DRM_CLASS_DIR);

        self.list_directory(drm_dir)
            .into_iter()
            .filter(|name| CONNECTOR_RE.is_match(name))
            .map(|name| {
                let entry = drm_dir.join(&name);
                let connected = self
                    .read_text(&entry.join("status"))
                    .map(|status| status.trim() == "connected")
                    .unwrap_or(false);
                let modes = self
                    .read_text(&entry.join("modes"))
                    .map(|modes| parse_modes(&modes))
                    .unwrap_or_default();

                DeviceHandle::Display(DisplayConnector {
                    name,
                    connected,
                    modes,
                    edid_path: Some(entry.join("edid")),
                    ..Default::default()
                })
            })
            .collect()
    }

    fn network_interfaces(&self) -> Vec<DeviceHandle> {
        // Addresses only make sense for the machine we are running on.
        let networks = if self.is_live() {
            Some(Networks::new_with_refreshed_list())
        } else {
            None
        };

        self.list_directory(Path::new(NET_CLASS_DIR))
            .into_iter()
            .map(|name| {
                let addresses: Vec<IpAddr> = networks
                    .as_ref()
                    .and_then(|networks| networks.list().get(&name))
                    .map(|data| data.ip_networks().iter().map(|net| net.addr).collect())
                    .unwrap_or_default();

                DeviceHandle::NetworkInterface(NetworkInterface { name, addresses })
            })
            .collect()
    }
}

impl Default for SysfsDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareDataSource for SysfsDataSource {
    fn read_text(&self, path: &Path) -> Option<String> {
        fs_read_text(&self.resolve(path))
    }

    fn read_binary(&self, path: &Path) -> Option<Vec<u8>> {
        fs_read_binary(&self.resolve(path))
    }

    fn run_management_query(&self, _query: &str) -> Option<Vec<ManagementRow>> {
        None
    }

    fn enumerate_devices(&self, kind: DeviceKind) -> Vec<DeviceHandle> {
        match kind {
            DeviceKind::DisplayConnector => self.display_connectors(),
            DeviceKind::NetworkInterface => self.network_interfaces(),
        }
    }

    fn list_directory(&self, path: &Path) -> Vec<String> {
        fs_list_directory(&self.resolve(path))
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        fs_read_link(&self.resolve(path))
    }
}

/// Parse the `modes` file of a DRM connector. sysfs does not expose the
/// refresh rate of a mode.
fn parse_modes(content: &str) -> Vec<DisplayMode> {
    content
        .lines()
        .filter_map(|line| {
            let caps = MODE_RE.captures(line.trim())?;
            Some(DisplayMode {
                width: caps[1].parse().ok()?,
                height: caps[2].parse().ok()?,
                refresh_hz: None,
            })
        })
        .collect()
}
