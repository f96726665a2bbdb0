use super::support::FakeTree;
use hwinfo::CpuUtilizationSampler;
use std::sync::Arc;
use std::time::Duration;

const STAT_IDLE: &str = "cpu  1000 0 1000 8000 0 0 0 0 0 0
cpu0 500 0 500 4000 0 0 0 0 0 0
cpu1 500 0 500 4000 0 0 0 0 0 0
intr 12345
";

const STAT_BUSY: &str = "cpu  1600 0 1400 8400 0 0 0 0 0 0
cpu0 900 0 800 4100 0 0 0 0 0 0
cpu1 700 0 600 4300 0 0 0 0 0 0
intr 23456
";

#[test]
fn test_sampler_over_proc_stat_tree() {
    let tree = FakeTree::new();
    tree.file("/proc/stat", STAT_IDLE);

    let sampler = CpuUtilizationSampler::with_source(Arc::new(tree.source()))
        .with_warmup(Duration::from_millis(10));

    // Nothing moved during the warm-up
    assert_eq!(sampler.current_utilisation(), -1.0);

    tree.file("/proc/stat", STAT_BUSY);
    // 1000 busy ticks out of 1400
    let aggregate = sampler.current_utilisation();
    assert!((aggregate - 1000.0 / 1400.0).abs() < 1e-9);
}

#[test]
fn test_thread_ratios_over_proc_stat_tree() {
    let tree = FakeTree::new();
    tree.file("/proc/stat", STAT_IDLE);

    let sampler = CpuUtilizationSampler::with_source(Arc::new(tree.source()))
        .with_warmup(Duration::ZERO);
    assert_eq!(sampler.threads_utilisation(), vec![-1.0, -1.0]);

    tree.file("/proc/stat", STAT_BUSY);
    let threads = sampler.threads_utilisation();
    assert_eq!(threads.len(), 2);
    // cpu0: 700 of 800, cpu1: 300 of 600
    assert!((threads[0] - 0.875).abs() < 1e-9);
    assert!((threads[1] - 0.5).abs() < 1e-9);
}

#[test]
fn test_sampler_without_proc_stat() {
    let tree = FakeTree::new();
    let sampler = CpuUtilizationSampler::with_source(Arc::new(tree.source()))
        .with_warmup(Duration::ZERO);

    assert_eq!(sampler.current_utilisation(), -1.0);
    assert_eq!(sampler.thread_utilisation(0), -1.0);
    assert!(sampler.threads_utilisation().is_empty());
}
