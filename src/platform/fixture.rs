//! In-memory data source.
//!
//! Holds pre-recorded file contents, query rows and device handles. Used by
//! the test suites and by callers replaying data captured on another
//! machine.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};

use parking_lot::RwLock;

use super::{DeviceHandle, DeviceKind, HardwareDataSource, ManagementRow};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct FixtureDataSource {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    directories: BTreeSet<PathBuf>,
    links: BTreeMap<PathBuf, PathBuf>,
    queries: HashMap<String, Vec<ManagementRow>>,
    devices: Vec<DeviceHandle>,
}

impl FixtureDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.with_binary(path, content.into().into_bytes())
    }

    pub fn with_binary(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.files.get_mut().insert(path.into(), content.into());
        self
    }

    /// Register an empty directory (directories holding files are implicit).
    pub fn with_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.insert(path.into());
        self
    }

    pub fn with_link(mut self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.links.insert(path.into(), target.into());
        self
    }

    /// Register the rows returned for an exact query string.
    pub fn with_query(mut self, query: impl Into<String>, rows: Vec<ManagementRow>) -> Self {
        self.queries.insert(query.into(), rows);
        self
    }

    /// Register query rows recorded as a JSON object mapping each query
    /// string to its array of rows.
    pub fn with_recorded_queries(mut self, json: &str) -> Result<Self> {
        let recorded: HashMap<String, Vec<ManagementRow>> = serde_json::from_str(json)?;
        self.queries.extend(recorded);
        Ok(self)
    }

    /// Like [`Self::with_recorded_queries`], reading the recording from disk.
    pub fn load_recorded_queries(self, path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        self.with_recorded_queries(&json)
    }

    pub fn with_device(mut self, handle: DeviceHandle) -> Self {
        self.devices.push(handle);
        self
    }

    /// Replace the content of a text file after construction, e.g. to
    /// advance `/proc/stat` between two samples.
    pub fn replace_text(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .insert(path.into(), content.into().into_bytes());
    }

    fn known_paths(&self) -> Vec<PathBuf> {
        let files = self.files.read();
        files
            .keys()
            .chain(self.directories.iter())
            .chain(self.links.keys())
            .cloned()
            .collect()
    }
}

impl HardwareDataSource for FixtureDataSource {
    fn read_text(&self, path: &Path) -> Option<String> {
        self.files
            .read()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_binary(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().get(path).cloned()
    }

    fn run_management_query(&self, query: &str) -> Option<Vec<ManagementRow>> {
        self.queries.get(query).cloned()
    }

    fn enumerate_devices(&self, kind: DeviceKind) -> Vec<DeviceHandle> {
        self.devices
            .iter()
            .filter(|handle| {
                matches!(
                    (kind, handle),
                    (DeviceKind::DisplayConnector, DeviceHandle::Display(_))
                        | (DeviceKind::NetworkInterface, DeviceHandle::NetworkInterface(_))
                )
            })
            .cloned()
            .collect()
    }

    fn list_directory(&self, path: &Path) -> Vec<String> {
        let names: BTreeSet<String> = self
            .known_paths()
            .iter()
            .filter_map(|known| known.strip_prefix(path).ok())
            .filter_map(|relative| match relative.components().next() {
                Some(Component::Normal(name)) => Some(name.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();
        names.into_iter().collect()
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        self.links.get(path).cloned()
    }
}

/// Build a [`ManagementRow`] from a JSON object literal.
///
/// Anything other than an object yields an empty row.
pub fn row(value: serde_json::Value) -> ManagementRow {
    match value {
        serde_json::Value::Object(map) => map,
        _ => ManagementRow::new(),
    }
}
