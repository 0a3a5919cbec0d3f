//! Build script for portband-cli.
//!
//! This script generates a man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared here by hand.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs and the command modules.
fn build_cli() -> Command {
    let config_arg = || {
        Arg::new("config")
            .value_name("CONFIG")
            .help("Port configuration file")
            .env("PORTBAND_CONFIG")
            .default_value("ports.yaml")
    };

    Command::new("portband")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate and export service port configuration")
        .long_about(
            "Load a key: value port configuration, check ports against the accepted band, \
             for duplicates and for live conflicts, and export the entries as environment variables",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .help("Settings file to use instead of ~/.portband/settings.yaml")
                .value_name("PATH")
                .global(true)
                .env("PORTBAND_SETTINGS"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Report lines that could not be parsed; validate fails on them")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ignore-env")
                .long("ignore-env")
                .help("Ignore variables already set in the environment")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("scope")
                .long("scope")
                .help("Which ports take part in duplicate and live checks")
                .value_name("SCOPE")
                .value_parser(["in-range", "all"])
                .global(true),
        )
        .arg(
            Arg::new("band")
                .long("band")
                .help("Accepted port band")
                .value_name("MIN-MAX")
                .global(true),
        )
        .arg(
            Arg::new("no-live-check")
                .long("no-live-check")
                .help("Skip the live port check")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("load")
                .about("Load a port configuration and export it")
                .long_about(
                    "Check the ports, ask before continuing past ports in use, and print \
                     export statements or run COMMAND with the exported environment",
                )
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["export", "dotenv", "json"])
                        .default_value("export"),
                )
                .arg(Arg::new("shell").long("shell").value_name("SHELL"))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("on-conflict")
                        .long("on-conflict")
                        .value_name("POLICY")
                        .value_parser(["ask", "continue", "abort"]),
                )
                .arg(
                    Arg::new("command")
                        .value_name("COMMAND")
                        .num_args(1..)
                        .last(true),
                ),
            Command::new("validate")
                .about("Validate a port configuration")
                .long_about("Run the range, duplicate and live checks and exit 1 on any finding")
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["human", "json"])
                        .default_value("human"),
                )
                .arg(
                    Arg::new("fail-on-unknown")
                        .long("fail-on-unknown")
                        .action(ArgAction::SetTrue),
                ),
            Command::new("report")
                .about("Summarize band compliance of a port configuration")
                .long_about("Print compliance counts without exporting anything")
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["human", "json"])
                        .default_value("human"),
                ),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"]),
                ),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("portband.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
