use super::{json_pretty, scan_package, EXIT_SUCCESS};
use abipick_config::ConfigStore;
use abipick_core::AbiPicker;
use std::path::Path;

pub fn run(
    config: &ConfigStore,
    package_file: &Path,
    abis: &[String],
    json: bool,
) -> Result<u8, String> {
    let mut picker = AbiPicker::new("", abis, config).map_err(|e| e.to_string())?;
    let summary = scan_package(&mut picker, package_file)?;

    if json {
        let payload = serde_json::json!({
            "inventories": picker.inventories(),
            "scan": summary,
        });
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    for inv in picker.inventories() {
        let state = if inv.is_mixed() { " mixed" } else { "" };
        println!("{} ({} libs){state}", inv.abi, inv.lib_count());
        for entry in inv.display_entries() {
            println!("  {entry}");
        }
    }
    if summary.is_none() {
        println!("warning: scan stopped early, listing is partial");
    }
    Ok(EXIT_SUCCESS)
}
