use super::support::FakeTree;
use hwinfo::core::system_info::cpu;
use hwinfo::UNKNOWN_NUMBER;

const TWO_SOCKET_CPUINFO: &str = "processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) Gold 6130 CPU @ 2.10GHz
physical id\t: 0
siblings\t: 2
cpu cores\t: 1
cache size\t: 22528 KB
flags\t\t: fpu sse4_2 avx2

processor\t: 1
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) Gold 6130 CPU @ 2.10GHz
physical id\t: 0
siblings\t: 2
cpu cores\t: 1
cache size\t: 22528 KB
flags\t\t: fpu sse4_2 avx2

processor\t: 2
vendor_id\t: GenuineIntel
model name\t: Intel(R) Xeon(R) Gold 6130 CPU @ 2.10GHz
physical id\t: 1
siblings\t: 2
cpu cores\t: 1
cache size\t: 22528 KB
flags\t\t: fpu sse4_2 avx2
";

#[test]
fn test_packages_from_procfs_tree() {
    let tree = FakeTree::new();
    tree.file("/proc/cpuinfo", TWO_SOCKET_CPUINFO)
        .file("/sys/devices/system/cpu/cpu0/cpufreq/scaling_max_freq", "3700000\n")
        .file("/sys/devices/system/cpu/cpu0/cpufreq/base_frequency", "2100000\n")
        .file("/sys/devices/system/cpu/cpu0/cpufreq/scaling_min_freq", "1000000\n");

    let cpus = cpu::collect_from(&tree.source());

    assert_eq!(cpus.len(), 2);
    assert_eq!(cpus[0].id, 0);
    assert_eq!(cpus[1].id, 1);
    assert_eq!(cpus[0].vendor, "GenuineIntel");
    assert_eq!(cpus[0].num_physical_cores, 1);
    assert_eq!(cpus[0].num_logical_cores, 2);
    assert_eq!(cpus[0].l3_cache_size_bytes, 22528 * 1024);
    assert_eq!(cpus[0].flags, vec!["fpu", "sse4_2", "avx2"]);

    assert_eq!(cpus[0].max_clock_speed_mhz, 3700);
    assert_eq!(cpus[0].regular_clock_speed_mhz, 2100);
    assert_eq!(cpus[0].min_clock_speed_mhz, 1000);

    // No cpufreq for the second package
    assert_eq!(cpus[1].max_clock_speed_mhz, UNKNOWN_NUMBER);
}

#[test]
fn test_policy_frequency_fallback() {
    let tree = FakeTree::new();
    tree.file(
        "/proc/cpuinfo",
        "processor\t: 0\nvendor_id\t: AuthenticAMD\nmodel name\t: AMD Ryzen 7 5800X\n",
    )
    .file("/sys/devices/system/cpu/cpufreq/policy0/cpuinfo_max_freq", "4850000\n");

    let cpus = cpu::collect_from(&tree.source());

    assert_eq!(cpus.len(), 1);
    assert_eq!(cpus[0].max_clock_speed_mhz, 4850);
    assert_eq!(cpus[0].regular_clock_speed_mhz, UNKNOWN_NUMBER);
}

#[test]
fn test_arm_big_little_core_ids() {
    let mut cpuinfo = String::new();
    for (index, part) in ["0xd03", "0xd03", "0xd09", "0xd09"].iter().enumerate() {
        cpuinfo.push_str(&format!(
            "processor\t: {}\nBogoMIPS\t: 38.40\nFeatures\t: fp asimd\nCPU implementer\t: 0x41\nCPU architecture: 8\nCPU variant\t: 0x0\nCPU part\t: {}\nCPU revision\t: 4\n\n",
            index, part
        ));
    }

    let tree = FakeTree::new();
    tree.file("/proc/cpuinfo", &cpuinfo);
    for (index, core_id) in [0, 1, 0, 1].iter().enumerate() {
        tree.file(
            &format!("/sys/devices/system/cpu/cpu{}/topology/core_id", index),
            format!("{}\n", core_id),
        );
    }

    let cpus = cpu::collect_from(&tree.source());

    assert_eq!(cpus.len(), 2);
    assert_eq!(cpus[0].vendor, "ARM");
    assert_eq!(cpus[0].model_name, "Cortex-A53");
    assert_eq!(cpus[0].num_physical_cores, 2);
    assert_eq!(cpus[1].model_name, "Cortex-A73");
    assert_eq!(cpus[1].id, 2);
    assert_eq!(cpus[1].num_logical_cores, 2);
    assert_eq!(cpus[1].flags, vec!["fp", "asimd"]);
}

#[test]
fn test_current_clock_speeds() {
    let tree = FakeTree::new();
    tree.file("/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq", "2400000\n")
        .file("/sys/devices/system/cpu/cpu2/cpufreq/scaling_cur_freq", "800000\n");

    let speeds = cpu::current_clock_speeds_mhz(&tree.source(), 3);
    assert_eq!(speeds, vec![2400, 800]);
}

#[test]
fn test_missing_cpuinfo_gives_no_cpus() {
    let tree = FakeTree::new();
    assert!(cpu::collect_from(&tree.source()).is_empty());
}
