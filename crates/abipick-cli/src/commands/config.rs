use super::{json_pretty, EXIT_SUCCESS};
use abipick_config::ConfigStore;

pub fn run(config: &ConfigStore, json: bool) -> Result<u8, String> {
    let paths = config.paths();
    let allow = config.allow_list().patterns();
    let deny = config.deny_list().patterns();
    let third_party = config.third_party().stems();

    if json {
        let payload = serde_json::json!({
            "paths": paths,
            "allow": allow,
            "deny": deny,
            "third_party": third_party,
        });
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    print_list("allow", &paths.allow_list, allow);
    print_list("deny", &paths.deny_list, deny);
    print_list("third-party", &paths.third_party_list, third_party);
    Ok(EXIT_SUCCESS)
}

fn print_list(kind: &str, path: &std::path::Path, entries: &[String]) {
    println!("{kind}: {} ({} entries)", path.display(), entries.len());
    for e in entries {
        println!("  {e}");
    }
}
