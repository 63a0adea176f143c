//! Error handling example for nomadb-rs
//!
//! This example demonstrates the failure taxonomy and how frontends are
//! expected to branch on it.

use nomadb_core::prelude::*;

fn main() -> Result<()> {
    println!("=== Nomadb Error Handling Example ===\n");

    // Example 1: Handling directory load errors
    println!("--- Example 1: Loading with error handling ---");
    match MemoryDirectory::load() {
        Ok(dir) => {
            println!("✓ Directory loaded successfully");
            println!("  Cities: {}", dir.total_stats()?.cities);
        }
        Err(e) => {
            eprintln!("✗ Failed to load directory: {e}");
            return Err(e);
        }
    }
    println!();

    let dir = MemoryDirectory::load()?;

    // Example 2: Not-found is distinct from generic failure
    println!("--- Example 2: Unknown slugs ---");
    for slug in ["seoul", "atlantis", "el-dorado"] {
        match dir.city_by_slug(slug) {
            Ok(payload) => println!("  Found: {}", payload.city.name_en()),
            Err(err) if err.is_not_found() => println!("  Not found: {slug}"),
            Err(err) => println!("  Failed: {err}"),
        }
    }
    println!();

    // Example 3: Absent stats are an empty result, not an error
    println!("--- Example 3: Stats not yet computed ---");
    let chuncheon = dir.city_by_slug("chuncheon")?;
    match dir.city_stats(&chuncheon.city.id)? {
        Some(stats) => println!("  {} likes", stats.likes),
        None => println!("  No stats yet for {}", chuncheon.city.name_en()),
    }
    println!();

    // Example 4: Mutations require a signed-in caller
    println!("--- Example 4: Login required ---");
    match dir.toggle_like(&Caller::Anonymous, &chuncheon.city.id, true) {
        Err(err) if err.is_user_error() => println!("  Rejected: {err}"),
        other => println!("  Unexpected: {other:?}"),
    }
    println!();

    // Example 5: Validation happens before any write
    println!("--- Example 5: Validation errors ---");
    dir.register_profile(UserProfile {
        id: "demo".into(),
        username: "demo_user".into(),
        bio: None,
        avatar_url: None,
    });
    let user = Caller::user("demo");

    let bad_rating = dir.create_review(
        &user,
        NewReview {
            city_id: chuncheon.city.id.clone(),
            rating: 6,
            title: "Six stars".into(),
            content: "Off the scale.".into(),
        },
    );
    if let Err(err) = bad_rating {
        println!("  Review rejected: {err}");
    }

    let bad_username = dir.update_profile(
        &user,
        ProfileUpdate {
            username: Some("ab".into()),
            ..ProfileUpdate::default()
        },
    );
    if let Err(err) = bad_username {
        println!("  Username rejected: {err}");
    }
    println!();

    // Example 6: Conflicts
    println!("--- Example 6: Conflicts ---");
    dir.create_review(
        &user,
        NewReview {
            city_id: chuncheon.city.id.clone(),
            rating: 4,
            title: "Lakeside".into(),
            content: "Dakgalbi every day.".into(),
        },
    )?;
    match dir.create_review(
        &user,
        NewReview {
            city_id: chuncheon.city.id.clone(),
            rating: 5,
            title: "Again".into(),
            content: "Still good.".into(),
        },
    ) {
        Err(err) => println!("  Second review rejected: {err}"),
        Ok(_) => println!("  Unexpectedly accepted"),
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
