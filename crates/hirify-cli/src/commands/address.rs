use anyhow::Result;
use hirify_core::address::{AddressLookup, AddressSuggestion};

use crate::context::App;

pub async fn search(app: &App, fragment: &str) -> Result<()> {
    let lookup = app.address_lookup()?;
    let suggestions = lookup.search(fragment).await?;

    if suggestions.is_empty() {
        println!(
            "No suggestions (type at least {} characters)",
            app.config.address_lookup.min_query_chars
        );
        return Ok(());
    }

    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("{}. {}", i + 1, suggestion.label);
        if !suggestion.context.is_empty() {
            println!("   {}", suggestion.context);
        }
    }
    Ok(())
}

/// Returns the best suggestion for `fragment`.
pub async fn best_match(app: &App, fragment: &str) -> Result<AddressSuggestion> {
    let lookup = app.address_lookup()?;
    lookup
        .search(fragment)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No address found for '{}'", fragment))
}
