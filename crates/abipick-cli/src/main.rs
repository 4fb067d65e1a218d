mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_ARCHIVE_ERROR, EXIT_CONFIG_ERROR, EXIT_FAILURE};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_ABIS: [&str; 5] = ["x86_64", "x86", "arm64-v8a", "armeabi-v7a", "armeabi"];

#[derive(Debug, Parser)]
#[command(
    name = "abipick",
    version,
    about = "Pick the native ABI to install for a multi-architecture package"
)]
struct Cli {
    /// TOML file overriding the allow, deny and third-party list locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan a package and select the ABI to install.
    Pick {
        /// Path to the package (APK/zip).
        package_file: PathBuf,
        /// Package name, matched against the allow and deny lists.
        #[arg(long)]
        package: String,
        /// ABIs the device supports, in the device's order (repeatable).
        #[arg(long = "abi")]
        abis: Vec<String>,
        /// Index of the device-preferred ABI in the --abi list.
        #[arg(long, default_value_t = 0)]
        prefer: usize,
    },
    /// List the native libraries found per ABI folder.
    Inventory {
        /// Path to the package (APK/zip).
        package_file: PathBuf,
        /// ABI folders to report (repeatable).
        #[arg(long = "abi")]
        abis: Vec<String>,
    },
    /// Show the vendor list locations and their contents.
    Config,
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn abi_list_or_default(abis: Vec<String>) -> Vec<String> {
    if abis.is_empty() {
        DEFAULT_ABIS.iter().map(|a| (*a).to_owned()).collect()
    } else {
        abis
    }
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("ABIPICK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let json_output = cli.json;
    let result = commands::load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Pick {
            package_file,
            package,
            abis,
            prefer,
        } => commands::pick::run(
            &config,
            &package_file,
            &package,
            &abi_list_or_default(abis),
            prefer,
            json_output,
        ),
        Commands::Inventory {
            package_file,
            abis,
        } => commands::inventory::run(
            &config,
            &package_file,
            &abi_list_or_default(abis),
            json_output,
        ),
        Commands::Config => commands::config::run(&config, json_output),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("config error:") {
                EXIT_CONFIG_ERROR
            } else if msg.starts_with("archive error:") {
                EXIT_ARCHIVE_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn empty_abi_list_uses_device_defaults() {
        assert_eq!(abi_list_or_default(Vec::new()), DEFAULT_ABIS);
        assert_eq!(abi_list_or_default(vec!["x86".to_owned()]), ["x86"]);
    }

    #[test]
    fn pick_arguments_parse() {
        let cli = Cli::try_parse_from([
            "abipick", "pick", "app.apk", "--package", "com.a", "--abi", "x86", "--abi",
            "armeabi-v7a", "--prefer", "0", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Pick { abis, prefer, .. } => {
                assert_eq!(abis, ["x86", "armeabi-v7a"]);
                assert_eq!(prefer, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
