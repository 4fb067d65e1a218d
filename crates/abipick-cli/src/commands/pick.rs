use super::{json_pretty, scan_package, EXIT_SUCCESS};
use abipick_config::ConfigStore;
use abipick_core::{AbiChoice, AbiPicker};
use std::path::Path;

pub fn run(
    config: &ConfigStore,
    package_file: &Path,
    package: &str,
    abis: &[String],
    prefer: usize,
    json: bool,
) -> Result<u8, String> {
    let mut picker = AbiPicker::new(package, abis, config).map_err(|e| e.to_string())?;
    let summary = scan_package(&mut picker, package_file)?;
    let choice = picker.select(prefer);

    if json {
        let payload = serde_json::json!({
            "package": package,
            "preferred": prefer,
            "choice": choice,
            "index": choice.index(),
            "allow_listed": picker.is_allow_listed(),
            "deny_listed": config.is_denied(package),
            "scan_complete": summary.is_some(),
            "scan": summary,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        match &choice {
            AbiChoice::Resolved { index, abi } => println!("{abi} ({index})"),
            AbiChoice::Unchanged { index } => println!("unchanged ({index})"),
        }
    }
    Ok(EXIT_SUCCESS)
}
