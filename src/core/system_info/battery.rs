use std::path::Path;

use crate::core::system_info::types::{unknown, Battery, UNKNOWN_NUMBER};
use crate::platform::{
    default_source, read_number, read_trimmed, row_i64, row_string, HardwareDataSource,
    ManagementRow,
};

pub const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
pub const BATTERY_QUERY: &str = "SELECT * FROM Win32_Battery";

/// Get all batteries of this machine (empty on desktops).
///
/// Falls back to the `battery` crate when the platform source finds none.
pub fn get_all_batteries() -> Vec<Battery> {
    let batteries = collect_from(default_source().as_ref());
    if !batteries.is_empty() {
        return batteries;
    }
    get_fallback()
}

pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Battery> {
    let supplies: Vec<String> = source
        .list_directory(Path::new(POWER_SUPPLY_DIR))
        .into_iter()
        .filter(|name| name.starts_with("BAT"))
        .collect();

    if !supplies.is_empty() {
        return supplies
            .iter()
            .enumerate()
            .map(|(index, name)| battery_from_sysfs(source, index as i64, name))
            .collect();
    }

    source
        .run_management_query(BATTERY_QUERY)
        .map(|rows| from_battery_rows(&rows))
        .unwrap_or_default()
}

/// Batteries as reported by the `battery` crate.
pub fn get_fallback() -> Vec<Battery> {
    use battery::units::energy::watt_hour;
    use battery::units::ratio::percent;
    use battery::State;

    let manager = match battery::Manager::new() {
        Ok(manager) => manager,
        Err(e) => {
            log::warn!("Failed to open battery manager: {}", e);
            return Vec::new();
        }
    };
    let batteries = match manager.batteries() {
        Ok(batteries) => batteries,
        Err(e) => {
            log::warn!("Failed to enumerate batteries: {}", e);
            return Vec::new();
        }
    };

    let mwh = |energy: battery::units::Energy| (energy.get::<watt_hour>() * 1000.0).round() as i64;
    let text = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(unknown)
    };

    batteries
        .enumerate()
        .filter_map(|(index, battery)| match battery {
            Ok(battery) => Some(Battery {
                id: index as i64,
                vendor: text(battery.vendor()),
                model: text(battery.model()),
                serial_number: text(battery.serial_number()),
                technology: battery.technology().to_string(),
                energy_full_mwh: mwh(battery.energy_full()),
                energy_design_mwh: mwh(battery.energy_full_design()),
                energy_now_mwh: mwh(battery.energy()),
                capacity_percent: f64::from(battery.state_of_charge().get::<percent>()),
                charging: match battery.state() {
                    State::Charging => Some(true),
                    State::Discharging | State::Full | State::Empty => Some(false),
                    _ => None,
                },
            }),
            Err(e) => {
                log::warn!("Failed to read battery {}: {}", index, e);
                None
            }
        })
        .collect()
}

fn battery_from_sysfs(source: &dyn HardwareDataSource, id: i64, name: &str) -> Battery {
    let dir = Path::new(POWER_SUPPLY_DIR).join(name);
    let text = |file: &str| read_trimmed(source, dir.join(file));
    let number = |file: &str| read_number(source, dir.join(file)).filter(|v| *v >= 0);

    // Some drivers report charge (µAh) instead of energy (µWh).
    let voltage_uv = number("voltage_min_design");
    let energy_mwh = |energy_file: &str, charge_file: &str| {
        number(energy_file)
            .map(|uwh| uwh / 1000)
            .or_else(|| {
                let uah = number(charge_file)?;
                Some(uah.checked_mul(voltage_uv?)? / 1_000_000_000)
            })
            .unwrap_or(UNKNOWN_NUMBER)
    };

    let energy_full_mwh = energy_mwh("energy_full", "charge_full");
    let energy_now_mwh = energy_mwh("energy_now", "charge_now");

    let capacity_percent = number("capacity")
        .map(|percent| percent as f64)
        .or_else(|| {
            (energy_full_mwh > 0 && energy_now_mwh >= 0)
                .then(|| energy_now_mwh as f64 / energy_full_mwh as f64 * 100.0)
        })
        .unwrap_or(UNKNOWN_NUMBER as f64);

    Battery {
        id,
        vendor: text("manufacturer").unwrap_or_else(unknown),
        model: text("model_name").unwrap_or_else(unknown),
        serial_number: text("serial_number").unwrap_or_else(unknown),
        technology: text("technology").unwrap_or_else(unknown),
        energy_full_mwh,
        energy_design_mwh: energy_mwh("energy_full_design", "charge_full_design"),
        energy_now_mwh,
        capacity_percent,
        charging: text("status").and_then(|status| match status.as_str() {
            "Charging" => Some(true),
            "Discharging" | "Not charging" | "Full" => Some(false),
            _ => None,
        }),
    }
}

fn from_battery_rows(rows: &[ManagementRow]) -> Vec<Battery> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let mwh = |key: &str| {
                row_i64(row, key)
                    .filter(|v| *v > 0)
                    .unwrap_or(UNKNOWN_NUMBER)
            };
            let energy_full_mwh = mwh("FullChargeCapacity");
            let capacity_percent = row_i64(row, "EstimatedChargeRemaining")
                .map(|percent| percent as f64)
                .unwrap_or(UNKNOWN_NUMBER as f64);

            Battery {
                id: index as i64,
                vendor: row_string(row, "Manufacturer").unwrap_or_else(unknown),
                model: row_string(row, "Name").unwrap_or_else(unknown),
                serial_number: row_string(row, "DeviceID").unwrap_or_else(unknown),
                technology: row_i64(row, "Chemistry")
                    .and_then(chemistry_name)
                    .map(str::to_string)
                    .unwrap_or_else(unknown),
                energy_full_mwh,
                energy_design_mwh: mwh("DesignCapacity"),
                energy_now_mwh: if energy_full_mwh > 0 && capacity_percent >= 0.0 {
                    (energy_full_mwh as f64 * capacity_percent / 100.0).round() as i64
                } else {
                    UNKNOWN_NUMBER
                },
                capacity_percent,
                charging: match row_i64(row, "BatteryStatus") {
                    Some(2) | Some(6..=9) => Some(true),
                    Some(1) | Some(3..=5) | Some(11) => Some(false),
                    _ => None,
                },
            }
        })
        .collect()
}

/// `Win32_Battery.Chemistry`
fn chemistry_name(code: i64) -> Option<&'static str> {
    let name = match code {
        3 => "Lead Acid",
        4 => "Nickel Cadmium",
        5 => "Nickel Metal Hydride",
        6 => "Lithium-ion",
        7 => "Zinc air",
        8 => "Lithium Polymer",
        _ => return None,
    };
    Some(name)
}
