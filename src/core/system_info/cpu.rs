use std::collections::BTreeSet;
use std::path::Path;

use crate::core::system_info::arm;
use crate::core::system_info::types::{unknown, Cpu, UNKNOWN_NUMBER};
use crate::platform::{
    default_source, read_number, row_i64, row_string, HardwareDataSource, ManagementRow,
};
use crate::utils::strings::{
    normalize_hex, parse_int, parse_leading_int, split_blocks, split_key_value,
};

pub const CPUINFO_PATH: &str = "/proc/cpuinfo";
pub const CPU_SYSFS_DIR: &str = "/sys/devices/system/cpu";
pub const PROCESSOR_QUERY: &str = "SELECT * FROM Win32_Processor";

/// Get one record per physical CPU package of this machine.
pub fn get_all_cpus() -> Vec<Cpu> {
    collect_from(default_source().as_ref())
}

/// Read the CPUs from `/proc/cpuinfo`, or from `Win32_Processor` rows when
/// the source has no procfs.
pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Cpu> {
    if let Some(cpuinfo) = source.read_text(Path::new(CPUINFO_PATH)) {
        return parse_cpuinfo(source, &cpuinfo);
    }

    match source.run_management_query(PROCESSOR_QUERY) {
        Some(rows) => from_processor_rows(&rows),
        None => {
            log::debug!("No CPU information available from this source");
            Vec::new()
        }
    }
}

/// Per-logical-core current clock speed in MHz for cores
/// `0..logical_cores`. Cores whose frequency cannot be read are skipped.
pub fn current_clock_speeds_mhz(source: &dyn HardwareDataSource, logical_cores: i64) -> Vec<i64> {
    (0..logical_cores.max(0))
        .filter_map(|core| {
            read_number(
                source,
                format!("{}/cpu{}/cpufreq/scaling_cur_freq", CPU_SYSFS_DIR, core),
            )
        })
        .map(|khz| khz / 1000)
        .collect()
}

/// Fields gathered from one `/proc/cpuinfo` block.
#[derive(Debug, Default)]
struct CpuBlock {
    cpu: Cpu,
    processor: Option<i64>,
    physical_id: Option<i64>,
    implementer: Option<String>,
    variant: Option<String>,
    part: Option<String>,
    known_implementer: bool,
    recognized: bool,
}

/// An ARM core type, keyed by (implementer, variant, part).
#[derive(Debug)]
struct ArmGroup {
    key: (String, String, String),
    record_id: i64,
    count: i64,
    logical_indices: Vec<i64>,
}

fn parse_cpuinfo(source: &dyn HardwareDataSource, cpuinfo: &str) -> Vec<Cpu> {
    let mut cpus: Vec<Cpu> = Vec::new();
    let mut arm_groups: Vec<ArmGroup> = Vec::new();
    let mut is_arm = false;
    let mut processor_index: i64 = 0;
    let mut processor_count: i64 = 0;

    for block in split_blocks(cpuinfo) {
        let parsed = parse_block(block);
        if !parsed.recognized {
            log::debug!("Skipping cpuinfo block without processor fields");
            continue;
        }

        if let Some(index) = parsed.processor {
            processor_index = index;
            processor_count += 1;
        }
        is_arm |= parsed.known_implementer;

        let mut cpu = parsed.cpu;
        if is_arm {
            let key = (
                parsed.implementer.unwrap_or_default(),
                parsed.variant.unwrap_or_default(),
                parsed.part.unwrap_or_default(),
            );

            match arm_groups.iter_mut().find(|group| group.key == key) {
                Some(group) => {
                    if let Some(last) = cpus.last() {
                        cpu.id = last.id;
                    }
                    group.count = processor_count;
                    group.logical_indices.push(processor_index);
                }
                None => {
                    processor_count = 1;
                    cpu.id = processor_index;
                    arm_groups.push(ArmGroup {
                        key,
                        record_id: cpu.id,
                        count: processor_count,
                        logical_indices: vec![processor_index],
                    });
                }
            }
        } else {
            // Without a physical id every block belongs to package 0.
            cpu.id = parsed.physical_id.unwrap_or(0);
        }

        if cpus.iter().any(|existing| existing.id == cpu.id) {
            continue;
        }

        cpu.max_clock_speed_mhz = max_clock_speed_mhz(source, cpu.id);
        cpu.regular_clock_speed_mhz = regular_clock_speed_mhz(source, cpu.id);
        cpu.min_clock_speed_mhz = min_clock_speed_mhz(source, cpu.id);
        cpus.push(cpu);
    }

    if is_arm {
        apply_arm_core_counts(source, &arm_groups, &mut cpus);
    }

    cpus
}

fn parse_block(block: &str) -> CpuBlock {
    let mut parsed = CpuBlock::default();

    for (key, value) in block.lines().filter_map(split_key_value) {
        let cpu = &mut parsed.cpu;
        match key {
            "vendor_id" => cpu.vendor = value.to_string(),
            "CPU implementer" => {
                let code = normalize_hex(value);
                match arm::implementer_name(&code) {
                    Some(name) => {
                        cpu.vendor = name.to_string();
                        parsed.known_implementer = true;
                    }
                    None => cpu.vendor = format!("Unknown Vendor ({})", code),
                }
                parsed.implementer = Some(code);
            }
            "processor" => parsed.processor = number("processor", value),
            "model name" | "Processor" => cpu.model_name = value.to_string(),
            "cache size" => {
                if let Some(bytes) = recover(parse_leading_int("cache size", value))
                    .and_then(|kib| kib.checked_mul(1024))
                {
                    cpu.l3_cache_size_bytes = bytes;
                }
            }
            "siblings" => {
                if let Some(siblings) = number("siblings", value) {
                    cpu.num_logical_cores = siblings;
                }
            }
            "cpu cores" => {
                if let Some(cores) = number("cpu cores", value) {
                    cpu.num_physical_cores = cores;
                }
            }
            "flags" | "Features" => {
                cpu.flags = value.split_whitespace().map(str::to_string).collect();
            }
            "physical id" => parsed.physical_id = number("physical id", value),
            "CPU part" => parsed.part = Some(normalize_hex(value)),
            "CPU variant" => parsed.variant = Some(normalize_hex(value)),
            _ => continue,
        }
        parsed.recognized = true;
    }

    if let (Some(implementer), Some(part)) = (&parsed.implementer, &parsed.part) {
        parsed.cpu.model_name = arm::model_name(implementer, part).to_string();
    }

    parsed
}

/// Replace the first-pass core counts of ARM records with the number of
/// distinct `core_id`s observed for each core type.
fn apply_arm_core_counts(source: &dyn HardwareDataSource, groups: &[ArmGroup], cpus: &mut [Cpu]) {
    for group in groups {
        let core_ids: BTreeSet<i64> = group
            .logical_indices
            .iter()
            .filter_map(|index| {
                read_number(
                    source,
                    format!("{}/cpu{}/topology/core_id", CPU_SYSFS_DIR, index),
                )
            })
            .collect();

        let count = if core_ids.is_empty() {
            group.count
        } else {
            core_ids.len() as i64
        };

        if let Some(cpu) = cpus.iter_mut().find(|cpu| cpu.id == group.record_id) {
            cpu.num_physical_cores = count;
            cpu.num_logical_cores = count;
        }
    }
}

fn max_clock_speed_mhz(source: &dyn HardwareDataSource, core: i64) -> i64 {
    frequency_mhz(
        source,
        core,
        &["scaling_max_freq", "cpuinfo_max_freq"],
        &["scaling_max_freq", "cpuinfo_max_freq"],
    )
}

fn regular_clock_speed_mhz(source: &dyn HardwareDataSource, core: i64) -> i64 {
    frequency_mhz(
        source,
        core,
        &["base_frequency", "scaling_cur_freq", "cpuinfo_cur_freq"],
        &["scaling_cur_freq", "cpuinfo_cur_freq"],
    )
}

fn min_clock_speed_mhz(source: &dyn HardwareDataSource, core: i64) -> i64 {
    frequency_mhz(
        source,
        core,
        &["scaling_min_freq", "cpuinfo_min_freq"],
        &["scaling_min_freq", "cpuinfo_min_freq"],
    )
}

/// First readable frequency among the per-core cpufreq files, then the
/// policy files. sysfs reports kHz.
fn frequency_mhz(
    source: &dyn HardwareDataSource,
    core: i64,
    core_files: &[&str],
    policy_files: &[&str],
) -> i64 {
    let core_dir = format!("{}/cpu{}/cpufreq", CPU_SYSFS_DIR, core);
    let policy_dir = format!("{}/cpufreq/policy{}", CPU_SYSFS_DIR, core);

    core_files
        .iter()
        .map(|file| format!("{}/{}", core_dir, file))
        .chain(policy_files.iter().map(|file| format!("{}/{}", policy_dir, file)))
        .find_map(|path| read_number(source, path).filter(|khz| *khz >= 0))
        .map(|khz| khz / 1000)
        .unwrap_or(UNKNOWN_NUMBER)
}

fn from_processor_rows(rows: &[ManagementRow]) -> Vec<Cpu> {
    let flags = cpuid_flags();

    rows.iter()
        .enumerate()
        .map(|(index, row)| Cpu {
            id: row_string(row, "DeviceID")
                .and_then(|id| id.trim_start_matches("CPU").parse().ok())
                .unwrap_or(index as i64),
            vendor: row_string(row, "Manufacturer").unwrap_or_else(unknown),
            model_name: row_string(row, "Name").unwrap_or_else(unknown),
            num_physical_cores: row_i64(row, "NumberOfCores").unwrap_or(UNKNOWN_NUMBER),
            num_logical_cores: row_i64(row, "NumberOfLogicalProcessors")
                .unwrap_or(UNKNOWN_NUMBER),
            max_clock_speed_mhz: row_i64(row, "MaxClockSpeed").unwrap_or(UNKNOWN_NUMBER),
            regular_clock_speed_mhz: row_i64(row, "CurrentClockSpeed").unwrap_or(UNKNOWN_NUMBER),
            min_clock_speed_mhz: UNKNOWN_NUMBER,
            l3_cache_size_bytes: row_i64(row, "L3CacheSize")
                .filter(|kib| *kib > 0)
                .and_then(|kib| kib.checked_mul(1024))
                .unwrap_or(UNKNOWN_NUMBER),
            flags: flags.clone(),
        })
        .collect()
}

/// Instruction set extensions of the executing CPU, named the way Linux
/// names them in `/proc/cpuinfo`.
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn cpuid_flags() -> Vec<String> {
    use raw_cpuid::CpuId;

    let cpuid = CpuId::new();
    let mut flags = Vec::new();

    if let Some(features) = cpuid.get_feature_info() {
        let checks = [
            ("sse", features.has_sse()),
            ("sse2", features.has_sse2()),
            ("pni", features.has_sse3()),
            ("ssse3", features.has_ssse3()),
            ("fma", features.has_fma()),
            ("sse4_1", features.has_sse41()),
            ("sse4_2", features.has_sse42()),
            ("popcnt", features.has_popcnt()),
            ("aes", features.has_aesni()),
            ("avx", features.has_avx()),
        ];
        flags.extend(checks.iter().filter(|(_, on)| *on).map(|(name, _)| name.to_string()));
    }

    if let Some(extended_features) = cpuid.get_extended_feature_info() {
        let checks = [
            ("bmi1", extended_features.has_bmi1()),
            ("avx2", extended_features.has_avx2()),
            ("bmi2", extended_features.has_bmi2()),
            ("avx512f", extended_features.has_avx512f()),
            ("sha_ni", extended_features.has_sha()),
        ];
        flags.extend(checks.iter().filter(|(_, on)| *on).map(|(name, _)| name.to_string()));
    }

    flags
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn cpuid_flags() -> Vec<String> {
    Vec::new()
}

fn number(field: &'static str, value: &str) -> Option<i64> {
    recover(parse_int(field, value))
}

fn recover(result: crate::error::Result<i64>) -> Option<i64> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}
