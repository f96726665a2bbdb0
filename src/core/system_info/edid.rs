//! EDID base block decoder.
//!
//! Only the first 128-byte block is decoded: manufacturer, product code,
//! serial number, physical size and the preferred mode. The preferred mode
//! is the first of the four 18-byte descriptors that carries a pixel clock;
//! descriptors with a zero clock hold a monitor name or range limits instead.

use serde::{Deserialize, Serialize};

pub const EDID_BLOCK_LENGTH: usize = 128;

/// Offsets of the four 18-byte descriptors of the base block.
const DESCRIPTOR_OFFSETS: [usize; 4] = [54, 72, 90, 108];

/// Fields decoded from an EDID block. `None` means the block does not carry
/// the value (or carries a placeholder such as a zero serial).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdidInfo {
    /// Three-letter PNP manufacturer id, e.g. `DEL`
    pub vendor: Option<String>,
    /// Product code in decimal
    pub model: Option<String>,
    /// Serial number in decimal
    pub serial_number: Option<String>,
    /// Preferred mode, `(width, height)` in pixels
    pub resolution: Option<(u32, u32)>,
    /// Refresh rate of the preferred mode in Hz
    pub refresh_hz: Option<u32>,
    /// Width and height of the image area in millimetres
    pub physical_size_mm: Option<(u32, u32)>,
}

impl EdidInfo {
    /// `"1920x1080"`
    pub fn resolution_string(&self) -> Option<String> {
        self.resolution.map(|(w, h)| format!("{}x{}", w, h))
    }
}

/// Decode an EDID blob. Blobs shorter than one block decode to all `None`.
pub fn decode(edid: &[u8]) -> EdidInfo {
    if edid.len() < EDID_BLOCK_LENGTH {
        return EdidInfo::default();
    }

    let product_code = u16::from_le_bytes([edid[10], edid[11]]);
    let serial = u32::from_le_bytes([edid[12], edid[13], edid[14], edid[15]]);

    let (resolution, refresh_hz) = preferred_timing(edid);

    EdidInfo {
        vendor: decode_manufacturer(edid[8], edid[9]),
        model: Some(product_code.to_string()),
        serial_number: (serial != 0).then(|| serial.to_string()),
        resolution,
        refresh_hz,
        physical_size_mm: physical_size_mm(edid),
    }
}

/// Unpack the three 5-bit letters of the manufacturer id. Values outside
/// `A..=Z` mean the id is garbage.
pub fn decode_manufacturer(high: u8, low: u8) -> Option<String> {
    let codes = [
        (high >> 2) & 0x1F,
        ((high & 0x03) << 3) | (low >> 5),
        low & 0x1F,
    ];

    codes
        .iter()
        .map(|&code| match code {
            1..=26 => Some(char::from(b'A' + code - 1)),
            _ => None,
        })
        .collect()
}

/// Pack a three-letter manufacturer id into EDID bytes 8 and 9.
pub fn encode_manufacturer(id: &str) -> Option<[u8; 2]> {
    let letters: Vec<u8> = id.bytes().collect();
    if letters.len() != 3 || !letters.iter().all(u8::is_ascii_uppercase) {
        return None;
    }

    let codes: Vec<u16> = letters.iter().map(|b| u16::from(b - b'A' + 1)).collect();
    let packed = (codes[0] << 10) | (codes[1] << 5) | codes[2];
    Some(packed.to_be_bytes())
}

fn preferred_timing(edid: &[u8]) -> (Option<(u32, u32)>, Option<u32>) {
    let timed = DESCRIPTOR_OFFSETS.iter().find_map(|&offset| {
        let timing = detailed_timing(&edid[offset..offset + 18])?;
        Some((Some(timing.0), timing.1))
    });
    if let Some(timing) = timed {
        return timing;
    }

    // No descriptor has a clock; the first one may still carry the size.
    let first = &edid[54..72];
    match active_size(first) {
        Some(size) => (Some(size), None),
        None => (None, None),
    }
}

/// Active size and refresh rate of a detailed timing descriptor, `None`
/// for display descriptors and empty timings.
fn detailed_timing(descriptor: &[u8]) -> Option<((u32, u32), Option<u32>)> {
    // 10 kHz units
    let pixel_clock = u32::from(u16::from_le_bytes([descriptor[0], descriptor[1]]));
    if pixel_clock == 0 {
        return None;
    }
    let (h_active, v_active) = active_size(descriptor)?;

    let h_blank = u32::from(descriptor[3]) | (u32::from(descriptor[4] & 0x0F) << 8);
    let v_blank = u32::from(descriptor[6]) | (u32::from(descriptor[7] & 0x0F) << 8);
    let total = f64::from((h_active + h_blank) * (v_active + v_blank));
    let refresh_hz = (f64::from(pixel_clock) * 10_000.0 / total).round() as u32;

    Some(((h_active, v_active), Some(refresh_hz)))
}

fn active_size(descriptor: &[u8]) -> Option<(u32, u32)> {
    let h_active = u32::from(descriptor[2]) | (u32::from(descriptor[4] & 0xF0) << 4);
    let v_active = u32::from(descriptor[5]) | (u32::from(descriptor[7] & 0xF0) << 4);
    (h_active != 0 && v_active != 0).then_some((h_active, v_active))
}

fn physical_size_mm(edid: &[u8]) -> Option<(u32, u32)> {
    let (width_cm, height_cm) = (u32::from(edid[21]), u32::from(edid[22]));
    if width_cm == 0 || height_cm == 0 {
        return None;
    }
    Some((width_cm * 10, height_cm * 10))
}
