use crate::core::system_info::{collect_system_info, SystemInfo};
use crate::ui::system_formatters::{self, DisplayFilter};
use anyhow::{Context, Result};
use clap::ArgMatches;

/// Print the hardware inventory, either as coloured sections or as JSON
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let filter = filter_from_matches(matches);
    let json = matches.get_flag("json");

    if !json {
        println!("Collecting hardware information...");
    }

    let system_info = collect_system_info();

    if json {
        println!("{}", to_json(&system_info, &filter)?);
    } else {
        system_formatters::format_system_info(&system_info, &filter);
    }

    Ok(())
}

/// Build the section filter from the flags; no flags means everything
pub fn filter_from_matches(matches: &ArgMatches) -> DisplayFilter {
    let filter = DisplayFilter {
        cpu: matches.get_flag("cpu"),
        gpu: matches.get_flag("gpu"),
        memory: matches.get_flag("ram"),
        disk: matches.get_flag("disk"),
        motherboard: matches.get_flag("mbo"),
        network: matches.get_flag("network"),
        monitor: matches.get_flag("monitor"),
        os: matches.get_flag("os"),
        battery: matches.get_flag("battery"),
    };

    if filter.is_empty() {
        DisplayFilter::all()
    } else {
        filter
    }
}

/// Serialize the selected sections; unselected ones are emptied rather than
/// dropped so the shape stays stable for scripts.
pub fn to_json(info: &SystemInfo, filter: &DisplayFilter) -> Result<String> {
    let selected = SystemInfo {
        cpus: if filter.cpu { info.cpus.clone() } else { Vec::new() },
        memory: if filter.memory { info.memory.clone() } else { Vec::new() },
        gpus: if filter.gpu { info.gpus.clone() } else { Vec::new() },
        mainboards: if filter.motherboard { info.mainboards.clone() } else { Vec::new() },
        disks: if filter.disk { info.disks.clone() } else { Vec::new() },
        networks: if filter.network { info.networks.clone() } else { Vec::new() },
        monitors: if filter.monitor { info.monitors.clone() } else { Vec::new() },
        os: if filter.os { info.os.clone() } else { Vec::new() },
        batteries: if filter.battery { info.batteries.clone() } else { Vec::new() },
    };

    serde_json::to_string_pretty(&selected).context("Failed to serialize hardware information")
}
