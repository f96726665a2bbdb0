//! On-demand CPU utilization sampling from `/proc/stat`.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::platform::{default_source, HardwareDataSource};

pub const STAT_PATH: &str = "/proc/stat";

/// Delay between the baseline and the first sample.
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(1);

/// Cumulative scheduler ticks of one `cpu` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jiffies {
    /// user + nice + system
    pub working: u64,
    /// working + idle + iowait + irq + softirq
    pub all: u64,
}

#[derive(Debug, Default)]
struct Snapshot {
    aggregate: Option<Jiffies>,
    threads: BTreeMap<usize, Jiffies>,
}

#[derive(Debug, Default)]
struct SamplerState {
    warmed_up: bool,
    previous: Snapshot,
}

/// Measures CPU busy ratios between successive calls.
///
/// The first call on a sampler records a baseline and blocks for the
/// warm-up delay; every later call compares against the sample stored by
/// the call before it. Results are in `[0, 1]`, or `-1.0` when no valid
/// ratio can be computed (no `/proc/stat`, no ticks elapsed, counters went
/// backwards).
pub struct CpuUtilizationSampler {
    source: Arc<dyn HardwareDataSource>,
    warmup: Duration,
    state: Mutex<SamplerState>,
}

impl CpuUtilizationSampler {
    /// Sampler over this machine's data source.
    pub fn new() -> Self {
        Self::with_source(Arc::from(default_source()))
    }

    pub fn with_source(source: Arc<dyn HardwareDataSource>) -> Self {
        Self {
            source,
            warmup: DEFAULT_WARMUP,
            state: Mutex::new(SamplerState::default()),
        }
    }

    /// Change the warm-up delay of the first call.
    pub fn with_warmup(mut self, warmup: Duration) -> Self {
        self.warmup = warmup;
        self
    }

    /// Busy ratio of all CPUs together since the previous call.
    pub fn current_utilisation(&self) -> f64 {
        let mut state = self.state.lock();
        let current = self.sample(&mut state);

        let ratio = match (state.previous.aggregate, current.aggregate) {
            (Some(previous), Some(now)) => busy_ratio(previous, now),
            _ => -1.0,
        };
        state.previous.aggregate = current.aggregate;
        ratio
    }

    /// Busy ratio of logical CPU `thread_index` since the previous call.
    pub fn thread_utilisation(&self, thread_index: usize) -> f64 {
        let mut state = self.state.lock();
        let current = self.sample(&mut state);

        let ratio = match (
            state.previous.threads.get(&thread_index),
            current.threads.get(&thread_index),
        ) {
            (Some(previous), Some(now)) => busy_ratio(*previous, *now),
            _ => -1.0,
        };
        if let Some(now) = current.threads.get(&thread_index) {
            state.previous.threads.insert(thread_index, *now);
        }
        ratio
    }

    /// Busy ratio of every logical CPU listed in `/proc/stat`, by index.
    pub fn threads_utilisation(&self) -> Vec<f64> {
        let mut state = self.state.lock();
        let current = self.sample(&mut state);

        let ratios = current
            .threads
            .iter()
            .map(|(index, now)| match state.previous.threads.get(index) {
                Some(previous) => busy_ratio(*previous, *now),
                None => -1.0,
            })
            .collect();
        state.previous.threads = current.threads;
        ratios
    }

    /// Read `/proc/stat`, taking the baseline first if this is the first
    /// call.
    fn sample(&self, state: &mut SamplerState) -> Snapshot {
        if !state.warmed_up {
            state.previous = self.read_snapshot();
            log::debug!("CPU utilization baseline taken, waiting {:?}", self.warmup);
            thread::sleep(self.warmup);
            state.warmed_up = true;
        }
        self.read_snapshot()
    }

    fn read_snapshot(&self) -> Snapshot {
        self.source
            .read_text(Path::new(STAT_PATH))
            .map(|stat| parse_stat(&stat))
            .unwrap_or_default()
    }
}

impl Default for CpuUtilizationSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_stat(stat: &str) -> Snapshot {
    let mut snapshot = Snapshot::default();

    for line in stat.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else {
            continue;
        };
        let Some(suffix) = label.strip_prefix("cpu") else {
            continue;
        };

        let ticks: Vec<u64> = fields.take(7).filter_map(|f| f.parse().ok()).collect();
        if ticks.len() < 7 {
            log::debug!("Ignoring short /proc/stat line: {}", line);
            continue;
        }

        let sum = |part: &[u64]| part.iter().try_fold(0u64, |acc, t| acc.checked_add(*t));
        let (Some(working), Some(all)) = (sum(&ticks[..3]), sum(&ticks)) else {
            log::debug!("Ignoring overflowing /proc/stat line: {}", line);
            continue;
        };
        let jiffies = Jiffies { working, all };

        if suffix.is_empty() {
            snapshot.aggregate = Some(jiffies);
        } else if let Ok(index) = suffix.parse::<usize>() {
            snapshot.threads.insert(index, jiffies);
        }
    }

    snapshot
}

fn busy_ratio(previous: Jiffies, now: Jiffies) -> f64 {
    let work = now.working as f64 - previous.working as f64;
    let total = now.all as f64 - previous.all as f64;
    let ratio = work / total;

    if ratio.is_nan() || !(0.0..=1.0).contains(&ratio) {
        -1.0
    } else {
        ratio
    }
}
