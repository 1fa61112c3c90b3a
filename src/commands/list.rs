//! List command handler: show platforms.

use krawl_core::FetcherRegistry;

/// Prints every platform with its status, usable ones first.
pub fn run_list_fetchers_command(registry: &FetcherRegistry) {
    for platform in registry.available() {
        let procedure = registry
            .get(platform)
            .map(|fetcher| fetcher.sourcing_procedure().as_str())
            .unwrap_or_default();
        println!("{platform:<18} available    {procedure}");
    }
    for (platform, reason) in registry.unavailable() {
        println!("{platform:<18} unavailable  {reason}");
    }
}
