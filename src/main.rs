use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use hwinfo::commands::{completions, info, usage};

fn build_cli() -> Command {
    let section = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .help(help)
            .action(ArgAction::SetTrue)
    };

    Command::new("hwinfo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect the hardware of this machine")
        .long_about("Inspect the hardware of this machine\n\nWith no section flags every section is shown.")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue)
        )
        .arg(section("cpu", "Show CPU information"))
        .arg(section("gpu", "Show GPU information"))
        .arg(section("ram", "Show memory information"))
        .arg(section("disk", "Show disk information"))
        .arg(section("mbo", "Show motherboard information"))
        .arg(section("network", "Show network adapters"))
        .arg(section("monitor", "Show connected monitors"))
        .arg(section("os", "Show operating system information"))
        .arg(section("battery", "Show battery information"))
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the selected sections as JSON")
                .action(ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("usage")
                .about("Sample CPU utilization")
                .arg(
                    Arg::new("threads")
                        .short('t')
                        .long("threads")
                        .help("Also show utilization per logical CPU")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for (bash, zsh, fish, powershell, elvish)")
                        .required(true)
                        .index(1)
                )
        )
}

fn main() -> Result<()> {
    hwinfo::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        println!("hwinfo version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match matches.subcommand() {
        Some(("usage", sub_matches)) => usage::execute(sub_matches)?,
        Some(("completions", sub_matches)) => {
            let mut cli = build_cli();
            completions::execute(sub_matches, &mut cli)?;
        }
        _ => info::execute(&matches)?,
    }

    Ok(())
}
