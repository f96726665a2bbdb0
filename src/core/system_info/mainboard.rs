use std::path::Path;

use crate::core::system_info::types::{unknown, MainBoard};
use crate::platform::{default_source, read_trimmed, row_string, HardwareDataSource};

pub const DMI_DIR: &str = "/sys/class/dmi/id";
pub const BASEBOARD_QUERY: &str = "SELECT * FROM Win32_BaseBoard";

/// Firmware placeholders that carry no information.
const PLACEHOLDERS: &[&str] = &[
    "To be filled by O.E.M.",
    "Default string",
    "Not Applicable",
    "None",
];

pub fn get_all_mainboards() -> Vec<MainBoard> {
    collect_from(default_source().as_ref())
}

pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<MainBoard> {
    let dmi = Path::new(DMI_DIR);
    let read = |file: &str| {
        read_trimmed(source, dmi.join(file)).filter(|value| !PLACEHOLDERS.contains(&value.as_str()))
    };

    let mut boards = Vec::new();
    let fields = [
        read("board_vendor"),
        read("board_name"),
        read("board_version"),
        // Root only
        read("board_serial"),
    ];

    if fields.iter().any(Option::is_some) {
        let [vendor, name, version, serial_number] = fields;
        boards.push(MainBoard {
            vendor: vendor.unwrap_or_else(unknown),
            name: name.unwrap_or_else(unknown),
            version: version.unwrap_or_else(unknown),
            serial_number: serial_number.unwrap_or_else(unknown),
        });
        return boards;
    }

    for row in source.run_management_query(BASEBOARD_QUERY).unwrap_or_default() {
        let field = |key: &str| {
            row_string(&row, key).filter(|value| !PLACEHOLDERS.contains(&value.as_str()))
        };
        let board = MainBoard {
            vendor: field("Manufacturer").unwrap_or_else(unknown),
            name: field("Product").unwrap_or_else(unknown),
            version: field("Version").unwrap_or_else(unknown),
            serial_number: field("SerialNumber").unwrap_or_else(unknown),
        };
        if board != MainBoard::default() {
            boards.push(board);
        }
    }

    boards
}
