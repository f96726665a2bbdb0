use hwinfo::platform::SysfsDataSource;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway `/proc` + `/sys` + `/etc` tree for `SysfsDataSource`.
pub struct FakeTree {
    dir: TempDir,
}

impl FakeTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `contents` at the absolute path `path` below the tree root.
    pub fn file(&self, path: &str, contents: impl AsRef<[u8]>) -> &Self {
        let target = self.dir.path().join(path.trim_start_matches('/'));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(target, contents).unwrap();
        self
    }

    pub fn dir(&self, path: &str) -> &Self {
        fs::create_dir_all(self.dir.path().join(path.trim_start_matches('/'))).unwrap();
        self
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source(&self) -> SysfsDataSource {
        SysfsDataSource::with_root(self.root())
    }
}

/// A 128-byte EDID base block with one detailed timing descriptor.
pub fn edid_block(
    vendor: &str,
    product: u16,
    serial: u32,
    (width, height): (u16, u16),
    (h_blank, v_blank): (u16, u16),
    pixel_clock: u16,
) -> Vec<u8> {
    let mut edid = vec![0u8; 128];
    edid[..8].copy_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    edid[8..10].copy_from_slice(&hwinfo::core::system_info::edid::encode_manufacturer(vendor).unwrap());
    edid[10..12].copy_from_slice(&product.to_le_bytes());
    edid[12..16].copy_from_slice(&serial.to_le_bytes());
    edid[54..56].copy_from_slice(&pixel_clock.to_le_bytes());
    edid[56] = (width & 0xFF) as u8;
    edid[57] = (h_blank & 0xFF) as u8;
    edid[58] = (((width >> 8) as u8) << 4) | ((h_blank >> 8) as u8 & 0x0F);
    edid[59] = (height & 0xFF) as u8;
    edid[60] = (v_blank & 0xFF) as u8;
    edid[61] = (((height >> 8) as u8) << 4) | ((v_blank >> 8) as u8 & 0x0F);
    edid
}
