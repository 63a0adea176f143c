//! Advanced filtering example for nomadb-rs
//!
//! This example demonstrates how the filter dimensions compose and how the
//! like/dislike interaction flows through the engine.

use nomadb_core::prelude::*;

fn main() -> Result<()> {
    println!("=== Nomadb Advanced Filtering Example ===\n");

    let dir = MemoryDirectory::load()?;
    let records = dir.list_cities(None)?;

    // Example 1: Region wildcard vs a concrete selection
    println!("--- Example 1: Region wildcard vs selection ---");
    let everywhere = FilterState::default();
    println!("All regions: {} cities", everywhere.apply(&records).len());

    let coastal = FilterState {
        regions: RegionFilter::any_of([Region::Gangwon, Region::Jeju]),
        ..FilterState::default()
    };
    println!("Gangwon + Jeju: {} cities", coastal.apply(&records).len());
    println!();

    // Example 2: Environment tags are OR, not AND
    println!("--- Example 2: Environment overlap (OR semantics) ---");
    let filters = FilterState {
        environments: [Environment::Nature, Environment::Coworking].into(),
        ..FilterState::default()
    };
    for record in filters.apply(&records) {
        let tags: Vec<&str> = record.city.environment.iter().map(|e| e.id()).collect();
        println!("- {} [{}]", record.city.name_en(), tags.join(", "));
    }
    println!();

    // Example 3: Every dimension at once
    println!("--- Example 3: Conjunctive dimensions ---");
    let narrow = FilterState {
        budget: Some(BudgetTier::Low),
        regions: RegionFilter::any_of([Region::Gangwon]),
        environments: [Environment::Nature].into(),
        season: Some(Season::Summer),
        query: None,
    };
    for record in narrow.apply(&records) {
        println!("- {}", record.city.name_en());
    }
    println!();

    // Example 4: Free-text query, folded across scripts
    println!("--- Example 4: Query folding ---");
    for q in ["seoul", "서울", "SEO"] {
        let filters = FilterState {
            query: Some(q.into()),
            ..FilterState::default()
        };
        println!("query {:>6?} -> {} hits", q, filters.apply(&records).len());
    }
    println!();

    // Example 5: Optimistic like with confirm
    println!("--- Example 5: Optimistic like flow ---");
    dir.register_profile(UserProfile {
        id: "demo-user".into(),
        username: "demo_user".into(),
        bio: None,
        avatar_url: None,
    });
    let user = Caller::user("demo-user");

    let view = ListingView::from_directory(&dir)?;
    let mut card = view
        .mount_card(&dir, &user, "gangneung")?
        .expect("seed city exists");
    println!("Before: {} likes", card.like_count());

    if let Some(intent) = card.press(Press::Like) {
        let outcome = dir.toggle_like(&user, &intent.city_id, intent.want_like);
        match card.resolve(outcome) {
            Ok(action) => println!("Server says: {action:?}"),
            Err(err) => println!("Rolled back: {err}"),
        }
    }
    println!("After: {} likes (liked={})", card.like_count(), card.liked());
    println!();

    // Example 6: Rollback on failure
    println!("--- Example 6: Rollback for an anonymous press ---");
    let anon = Caller::Anonymous;
    let mut card = view
        .mount_card(&dir, &anon, "sokcho")?
        .expect("seed city exists");
    let before = card.like_count();
    if let Some(intent) = card.press(Press::Like) {
        let outcome = dir.toggle_like(&anon, &intent.city_id, intent.want_like);
        if let Err(err) = card.resolve(outcome) {
            println!("Press failed: {err}");
        }
    }
    println!("Count restored: {} == {}", card.like_count(), before);

    println!("\n=== Example completed successfully ===");
    Ok(())
}
