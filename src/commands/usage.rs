use crate::core::system_info::CpuUtilizationSampler;
use crate::ui::system_formatters;
use anyhow::Result;
use clap::ArgMatches;

/// Sample CPU utilization over the warm-up window and print it
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let sampler = CpuUtilizationSampler::new();
    let show_threads = matches.get_flag("threads");

    println!("Sampling CPU utilization...");

    let aggregate = sampler.current_utilisation();
    let threads = if show_threads {
        sampler.threads_utilisation()
    } else {
        Vec::new()
    };

    if aggregate < 0.0 {
        log::warn!("CPU utilization is not available on this system");
    }

    system_formatters::format_utilization(aggregate, &threads);
    Ok(())
}
