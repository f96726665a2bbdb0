use crate::core::system_info::types::*;
use crate::ui::formatters::{format_count, format_mhz, format_ratio, format_size};
use colored::*;

/// Filter for controlling which hardware sections to display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFilter {
    pub cpu: bool,
    pub gpu: bool,
    pub memory: bool,
    pub disk: bool,
    pub motherboard: bool,
    pub network: bool,
    pub monitor: bool,
    pub os: bool,
    pub battery: bool,
}

impl DisplayFilter {
    /// Returns a filter that shows all sections
    pub fn all() -> Self {
        Self {
            cpu: true,
            gpu: true,
            memory: true,
            disk: true,
            motherboard: true,
            network: true,
            monitor: true,
            os: true,
            battery: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn format_system_info(info: &SystemInfo, filter: &DisplayFilter) {
    println!("\n{}", "HARDWARE INFORMATION".bold().bright_cyan());
    println!("{}", "=".repeat(80));

    if filter.cpu {
        print_cpu_info(&info.cpus);
    }

    if filter.memory {
        print_memory_info(&info.memory);
    }

    if filter.gpu {
        print_gpu_info(&info.gpus);
    }

    if filter.motherboard {
        print_mainboard_info(&info.mainboards);
    }

    if filter.disk {
        print_disk_info(&info.disks);
    }

    if filter.network {
        print_network_info(&info.networks);
    }

    if filter.monitor {
        print_monitor_info(&info.monitors);
    }

    if filter.os {
        print_os_info(&info.os);
    }

    // Only laptops have one
    if filter.battery && !info.batteries.is_empty() {
        print_battery_info(&info.batteries);
    }

    println!();
}

fn print_section_header(title: &str) {
    println!("\n{}", title.bold().green());
    println!("{}", "-".repeat(title.len()));
}

fn print_none_found(what: &str) {
    println!("  {}", format!("No {} found", what).dimmed());
}

fn print_cpu_info(cpus: &[Cpu]) {
    print_section_header("CPU");
    if cpus.is_empty() {
        print_none_found("CPU");
        return;
    }

    for cpu in cpus {
        println!("  {} {}", format!("[{}]", cpu.id).dimmed(), cpu.model_name.bold());
        println!("    Vendor: {}", cpu.vendor);
        println!(
            "    Cores: {} physical, {} logical",
            format_count(cpu.num_physical_cores),
            format_count(cpu.num_logical_cores)
        );
        println!(
            "    Clock: {} base, {} max, {} min",
            format_mhz(cpu.regular_clock_speed_mhz),
            format_mhz(cpu.max_clock_speed_mhz),
            format_mhz(cpu.min_clock_speed_mhz)
        );
        println!("    L3 Cache: {}", format_size(cpu.l3_cache_size_bytes));

        if !cpu.flags.is_empty() {
            let highlighted = highlighted_flags(&cpu.flags);
            if highlighted.is_empty() {
                println!("    Flags: {} reported", cpu.flags.len());
            } else {
                println!(
                    "    Flags: {} ({} total)",
                    highlighted.join(", ").cyan(),
                    cpu.flags.len()
                );
            }
        }
    }
}

/// The extensions worth calling out in a summary line.
fn highlighted_flags(flags: &[String]) -> Vec<&str> {
    const NOTABLE: &[&str] = &[
        "sse4_2", "avx", "avx2", "avx512f", "aes", "sha_ni", "fma", "neon", "asimd", "sve",
    ];
    NOTABLE
        .iter()
        .copied()
        .filter(|notable| flags.iter().any(|flag| flag == notable))
        .collect()
}

fn print_memory_info(memory: &[Memory]) {
    print_section_header("Memory");
    if memory.is_empty() {
        print_none_found("memory information");
        return;
    }

    for mem in memory {
        println!("  Total: {}", format_size(mem.total_bytes).bold());
        println!("  Free: {}", format_size(mem.free_bytes));
        println!("  Available: {}", format_size(mem.available_bytes));

        if mem.total_bytes > 0 && mem.available_bytes >= 0 {
            let used = mem.total_bytes - mem.available_bytes;
            let usage = used as f64 / mem.total_bytes as f64;
            let usage_str = format_ratio(usage);
            let colored_usage = if usage > 0.9 {
                usage_str.red()
            } else if usage > 0.7 {
                usage_str.yellow()
            } else {
                usage_str.green()
            };
            println!("  Usage: {}", colored_usage);
        }

        for module in &mem.modules {
            let speed = if module.frequency_hz > 0 {
                format!(" @ {} MHz", module.frequency_hz / 1_000_000)
            } else {
                String::new()
            };
            println!(
                "    {} {} {} {}{}",
                format!("[{}]", module.name).dimmed(),
                format_size(module.total_bytes),
                module.vendor,
                module.model,
                speed
            );
        }
    }
}

fn print_gpu_info(gpus: &[Gpu]) {
    print_section_header("GPU");
    if gpus.is_empty() {
        print_none_found("GPU");
        return;
    }

    for gpu in gpus {
        println!("  {} {}", format!("[{}]", gpu.id).dimmed(), gpu.name.bold());
        println!("    Vendor: {} ({}:{})", gpu.vendor, gpu.vendor_id, gpu.device_id);
        println!("    Driver: {}", gpu.driver_version);
        if gpu.memory_bytes > 0 {
            println!("    Memory: {}", format_size(gpu.memory_bytes));
        }
    }
}

fn print_mainboard_info(boards: &[MainBoard]) {
    print_section_header("Motherboard");
    if boards.is_empty() {
        print_none_found("motherboard information");
        return;
    }

    for board in boards {
        println!("  Manufacturer: {}", board.vendor);
        println!("  Product: {}", board.name.bold());
        println!("  Version: {}", board.version);
        println!("  Serial: {}", board.serial_number);
    }
}

fn print_disk_info(disks: &[Disk]) {
    print_section_header("Storage");
    if disks.is_empty() {
        print_none_found("disk");
        return;
    }

    for disk in disks {
        println!("  {} {}", format!("[{}]", disk.id).dimmed(), disk.model.bold());
        println!("    Vendor: {}", disk.vendor);
        println!("    Serial: {}", disk.serial_number);
        println!(
            "    Size: {} ({} free)",
            format_size(disk.size_bytes),
            format_size(disk.free_bytes)
        );
    }
}

fn print_network_info(networks: &[Network]) {
    print_section_header("Network");
    if networks.is_empty() {
        print_none_found("network adapter");
        return;
    }

    for network in networks {
        println!(
            "  {} {} ({})",
            format!("[{}]", network.index).dimmed(),
            network.description.bold(),
            network.interface_type.cyan()
        );
        println!("    MAC: {}", network.mac);
        println!("    IPv4: {}", network.ip4);
        println!("    IPv6: {}", network.ip6);
    }
}

fn print_monitor_info(monitors: &[Monitor]) {
    print_section_header("Monitors");
    if monitors.is_empty() {
        print_none_found("connected monitor");
        return;
    }

    for monitor in monitors {
        println!("  {} {}", monitor.vendor.bold(), monitor.model);
        println!(
            "    Resolution: {} @ {} Hz",
            monitor.resolution, monitor.refresh_rate
        );
        println!("    Serial: {}", monitor.serial_number);
    }
}

fn print_os_info(os: &[Os]) {
    print_section_header("Operating System");
    if os.is_empty() {
        print_none_found("operating system information");
        return;
    }

    for system in os {
        println!("  Name: {}", system.name.bold());
        println!("  Version: {}", system.version);
        println!("  Kernel: {}", system.kernel);
        println!(
            "  Architecture: {}",
            if system.is_64bit { "64-bit" } else { "32-bit" }
        );
    }
}

fn print_battery_info(batteries: &[Battery]) {
    print_section_header("Battery");

    for battery in batteries {
        println!(
            "  {} {} {}",
            format!("[{}]", battery.id).dimmed(),
            battery.vendor,
            battery.model.bold()
        );
        println!("    Technology: {}", battery.technology);

        if battery.capacity_percent >= 0.0 {
            let charge = format!("{:.0}%", battery.capacity_percent);
            let colored_charge = if battery.capacity_percent < 20.0 {
                charge.red()
            } else if battery.capacity_percent < 50.0 {
                charge.yellow()
            } else {
                charge.green()
            };
            let state = match battery.charging {
                Some(true) => " (charging)",
                Some(false) => " (discharging)",
                None => "",
            };
            println!("    Charge: {}{}", colored_charge, state);
        }

        println!(
            "    Energy: {} mWh now, {} mWh full, {} mWh design",
            format_count(battery.energy_now_mwh),
            format_count(battery.energy_full_mwh),
            format_count(battery.energy_design_mwh)
        );
        if let Some(health) = battery.health_percent() {
            println!("    Health: {:.0}%", health);
        }
    }
}

/// Print a utilization sample: the aggregate ratio and optionally one line
/// per logical CPU.
pub fn format_utilization(aggregate: f64, threads: &[f64]) {
    print_section_header("CPU Utilization");
    println!("  Total: {}", format_ratio(aggregate).bold());

    for (index, ratio) in threads.iter().enumerate() {
        let bar_width = if (0.0..=1.0).contains(ratio) {
            (ratio * 40.0).round() as usize
        } else {
            0
        };
        println!(
            "  {:>4} {:>7} {}",
            format!("#{}", index),
            format_ratio(*ratio),
            "#".repeat(bar_width).cyan()
        );
    }
    println!();
}
