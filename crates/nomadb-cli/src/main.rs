//! nomadb-cli — Command-line interface for nomadb-core
//!
//! This binary provides a simple way to browse the bundled city directory
//! from your terminal. It supports printing overall statistics, listing and
//! filtering cities, showing a city's detail page, searching by name, and
//! paging through reviews.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ nomadb-cli stats
//!
//! - List all cities, most liked first
//!   $ nomadb-cli list
//!
//! - Filter the listing
//!   $ nomadb-cli list --budget low --region gangwon --region jeju --env nature
//!   $ nomadb-cli list --season summer --query beach
//!
//! - Show one city's details by slug
//!   $ nomadb-cli city jeju-city
//!
//! - Search by name in either locale
//!   $ nomadb-cli search 부산
//!
//! Data source
//! -----------
//!
//! By default, the CLI loads the dataset bundled with the `nomadb-core`
//! crate and automatically caches a binary snapshot next to it for fast
//! subsequent runs. Use `--input <path>` to point to a custom `.json`
//! (or `.json.gz`) dataset.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use nomadb_core::loader;
use nomadb_core::prelude::*;
use std::collections::BTreeSet;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    // Load the dataset (custom path or the bundled default)
    let dataset = match &args.input {
        Some(path) => loader::load_from_path(path)?,
        None => loader::load_default()?,
    };
    let dir = MemoryDirectory::from_dataset(dataset);

    match args.command {
        Commands::Stats => {
            let stats = dir.total_stats()?;
            println!("Directory statistics:");
            println!("  Cities: {}", stats.cities);
            println!("  Reviews: {}", stats.reviews);
            println!("  Nomads now: {}", stats.nomads);
        }

        Commands::List {
            budget,
            regions,
            environments,
            season,
            query,
        } => {
            let filters = build_filters(budget, &regions, &environments, season, query)?;
            let records = dir.list_cities(None)?;
            let visible = filters.apply(&records);

            if visible.is_empty() {
                println!("No cities match the current filters.");
            } else {
                println!("{} cities:", visible.len());
                for record in visible {
                    let city = &record.city;
                    println!(
                        "{} ({}) — {} · {} · ₩{}/mo · {} likes",
                        city.name(),
                        city.name_en(),
                        city.korean_region.label(),
                        city.budget.label(),
                        city.cost_per_month,
                        record.likes()
                    );
                }
            }
        }

        Commands::City { slug } => match dir.city_by_slug(&slug) {
            Ok(payload) => print_city(&payload),
            Err(err) if err.is_not_found() => {
                eprintln!("No city found for slug: {slug}");
            }
            Err(err) => return Err(err.into()),
        },

        Commands::Search { query } => {
            let matches = dir.search_cities(&query, 10)?;
            if matches.is_empty() {
                println!("No cities found matching: {query}");
            } else {
                for record in matches {
                    println!(
                        "{} — {}, {}",
                        record.city.name(),
                        record.city.name_en(),
                        record.city.region
                    );
                }
            }
        }

        Commands::Reviews {
            slug,
            limit,
            offset,
        } => {
            let payload = dir
                .city_by_slug(&slug)
                .with_context(|| format!("unknown city: {slug}"))?;
            let page = dir.reviews_by_city(&payload.city.id, limit, offset)?;
            println!(
                "{} reviews for {} (showing {}):",
                page.total,
                payload.city.name(),
                page.reviews.len()
            );
            for review in page.reviews {
                println!("[{}/5] {} — {}", review.rating, review.title, review.content);
            }
        }
    }

    Ok(())
}

fn build_filters(
    budget: Option<String>,
    regions: &[String],
    environments: &[String],
    season: Option<String>,
    query: Option<String>,
) -> anyhow::Result<FilterState> {
    let budget = budget
        .map(|b| BudgetTier::parse(&b).with_context(|| format!("unknown budget band: {b}")))
        .transpose()?;

    let regions = RegionFilter::from_ids(regions.iter().map(String::as_str))?;

    let mut env_set = BTreeSet::new();
    for e in environments {
        let tag = Environment::parse(e).with_context(|| format!("unknown environment: {e}"))?;
        env_set.insert(tag);
    }

    let season = season
        .map(|s| Season::parse(&s).with_context(|| format!("unknown season: {s}")))
        .transpose()?;

    Ok(FilterState {
        budget,
        regions,
        environments: env_set,
        season,
        query,
    })
}

fn print_city(payload: &CityWithDetails) {
    let city = &payload.city;
    println!("{} ({})", city.name(), city.name_en());
    println!("Region: {} · {}", city.region, city.korean_region.label());
    println!("Budget: {} (₩{}/mo)", city.budget.label(), city.cost_per_month);
    println!(
        "Environment: {}",
        city.environment
            .iter()
            .map(|e| e.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Best season: {}", city.best_season.id());
    println!("Score: {:.1}/5.0 · Safety: {:.1}/5.0", city.overall_score, city.safety_score);
    println!("Internet: {} Mbps", city.internet_speed);

    if let Some(stats) = &payload.stats {
        println!(
            "Stats: {} likes / {} dislikes · {} reviews · {} nomads now",
            stats.likes, stats.dislikes, stats.reviews_count, stats.nomads_now
        );
    } else {
        println!("Stats: not yet computed");
    }

    if let Some(details) = &payload.details {
        println!("\n{}", details.description);
        if !details.highlights.is_empty() {
            println!("Highlights: {}", details.highlights.join(" · "));
        }
        for p in &details.pros {
            println!("  + {p}");
        }
        for c in &details.cons {
            println!("  - {c}");
        }
    }

    if let Some(costs) = &payload.costs {
        println!("\nMonthly costs (₩):");
        println!("  Accommodation: {}", costs.accommodation);
        println!("  Food: {}", costs.food);
        println!("  Transportation: {}", costs.transportation);
        println!("  Utilities: {}", costs.utilities);
        println!("  Total: {}", costs.total());
    }
}
