//! Basic usage example for nomadb-rs
//!
//! This example demonstrates how to:
//! - Load the bundled city directory
//! - Browse the listing and a detail page
//! - Filter cities with the listing engine
//! - Read the aggregate stats

use nomadb_core::prelude::*;

fn main() -> Result<()> {
    println!("=== Nomadb Basic Usage Example ===\n");

    // Load the directory
    println!("Loading city directory...");
    let dir = MemoryDirectory::load()?;
    println!("✓ Directory loaded successfully\n");

    // Example 1: Overall stats
    println!("--- Example 1: Directory statistics ---");
    let stats = dir.total_stats()?;
    println!("Cities: {}", stats.cities);
    println!("Reviews: {}", stats.reviews);
    println!("Nomads now: {}", stats.nomads);
    println!();

    // Example 2: The default listing, most liked first
    println!("--- Example 2: Listing, ordered by likes ---");
    let view = ListingView::from_directory(&dir)?;
    for (i, record) in view.visible().iter().take(5).enumerate() {
        println!(
            "{}. {} ({}) — {} likes",
            i + 1,
            record.city.name(),
            record.city.name_en(),
            record.likes()
        );
    }
    println!();

    // Example 3: One city's detail page
    println!("--- Example 3: Detail page by slug ---");
    let jeju = dir.city_by_slug("jeju-city")?;
    println!("{} ({})", jeju.city.name(), jeju.city.name_en());
    println!("Budget: {}", jeju.city.budget.label());
    if let Some(details) = &jeju.details {
        println!("{}", details.description);
    }
    if let Some(costs) = &jeju.costs {
        println!("Monthly total: ₩{}", costs.total());
    }
    println!();

    // Example 4: Filtering
    println!("--- Example 4: Low-budget nature towns ---");
    let mut view = ListingView::from_directory(&dir)?;
    view.set_filters(FilterState {
        budget: Some(BudgetTier::Low),
        environments: [Environment::Nature].into(),
        ..FilterState::default()
    });
    for record in view.visible() {
        println!(
            "- {} — {} · ₩{}/mo",
            record.city.name_en(),
            record.city.korean_region.label(),
            record.city.cost_per_month
        );
    }
    println!();

    // Example 5: Name search across locales
    println!("--- Example 5: Search ---");
    for record in dir.search_cities("부산", 5)? {
        println!("- {} ({})", record.city.name(), record.city.name_en());
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
