//! End-to-end behavior of the in-memory directory backend: lookups,
//! mutations, validation and the admin surface.

#![cfg(feature = "json")]

use nomadb_core::prelude::*;

fn directory_with_user(user_id: &str) -> MemoryDirectory {
    let dir = MemoryDirectory::load().expect("bundled dataset loads");
    dir.register_profile(UserProfile {
        id: user_id.into(),
        username: format!("{user_id}_name"),
        bio: None,
        avatar_url: None,
    });
    dir
}

#[test]
fn total_stats_aggregates_the_seed_data() {
    let dir = MemoryDirectory::load().unwrap();
    let stats = dir.total_stats().unwrap();
    assert_eq!(stats.cities, 12);
    assert!(stats.reviews > 0);
    assert!(stats.nomads > 0);
}

#[test]
fn slug_lookup_returns_the_full_payload() {
    let dir = MemoryDirectory::load().unwrap();
    let seoul = dir.city_by_slug("seoul").unwrap();
    assert_eq!(seoul.city.name_en, "Seoul");
    assert!(seoul.details.is_some());
    assert!(seoul.costs.is_some());
    assert!(seoul.stats.is_some());
}

#[test]
fn unknown_slug_is_not_found_distinct_from_generic_failure() {
    let dir = MemoryDirectory::load().unwrap();
    let err = dir.city_by_slug("atlantis").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn stats_for_unknown_city_are_none_not_an_error() {
    let dir = MemoryDirectory::load().unwrap();
    assert!(dir.city_stats("no-such-id").unwrap().is_none());
}

#[test]
fn stats_not_yet_computed_are_none() {
    let dir = MemoryDirectory::load().unwrap();
    // Chuncheon ships without a stats block.
    let chuncheon = dir.city_by_slug("chuncheon").unwrap();
    assert!(dir.city_stats(&chuncheon.city.id).unwrap().is_none());
}

#[test]
fn search_matches_both_locales_and_honors_the_limit() {
    let dir = MemoryDirectory::load().unwrap();
    let hits = dir.search_cities("제주", 10).unwrap();
    assert!(hits.iter().any(|r| r.city.slug == "jeju-city"));

    let limited = dir.search_cities("s", 2).unwrap();
    assert!(limited.len() <= 2);

    assert!(dir.search_cities("   ", 10).unwrap().is_empty());
}

#[test]
fn anonymous_mutations_require_login() {
    let dir = MemoryDirectory::load().unwrap();
    let anon = Caller::Anonymous;

    let err = dir.toggle_like(&anon, "nc-001", true).unwrap_err();
    assert_eq!(err.to_string(), "login required");

    assert!(dir.toggle_bookmark(&anon, "nc-001").is_err());
    assert!(dir
        .create_review(
            &anon,
            NewReview {
                city_id: "nc-001".into(),
                rating: 5,
                title: "t".into(),
                content: "c".into(),
            },
        )
        .is_err());

    // Reads degrade gracefully instead of failing.
    assert_eq!(dir.like_status(&anon, "nc-001").unwrap(), None);
    assert!(!dir.bookmark_status(&anon, "nc-001").unwrap());
}

#[test]
fn like_toggle_walks_the_tri_state() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");
    let baseline = dir.city_stats("nc-001").unwrap().unwrap();

    // none -> like
    assert_eq!(dir.toggle_like(&user, "nc-001", true).unwrap(), ToggleAction::Created);
    assert_eq!(dir.like_status(&user, "nc-001").unwrap(), Some(true));
    let after_like = dir.city_stats("nc-001").unwrap().unwrap();
    assert_eq!(after_like.likes, baseline.likes + 1);

    // like -> dislike switches both counters atomically
    assert_eq!(dir.toggle_like(&user, "nc-001", false).unwrap(), ToggleAction::Updated);
    assert_eq!(dir.like_status(&user, "nc-001").unwrap(), Some(false));
    let after_switch = dir.city_stats("nc-001").unwrap().unwrap();
    assert_eq!(after_switch.likes, baseline.likes);
    assert_eq!(after_switch.dislikes, baseline.dislikes + 1);

    // dislike -> none
    assert_eq!(dir.toggle_like(&user, "nc-001", false).unwrap(), ToggleAction::Removed);
    assert_eq!(dir.like_status(&user, "nc-001").unwrap(), None);
    let restored = dir.city_stats("nc-001").unwrap().unwrap();
    assert_eq!(restored.likes, baseline.likes);
    assert_eq!(restored.dislikes, baseline.dislikes);
}

#[test]
fn liked_cities_lists_only_current_likes_newest_first() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");

    dir.toggle_like(&user, "nc-001", true).unwrap();
    dir.toggle_like(&user, "nc-002", true).unwrap();
    dir.toggle_like(&user, "nc-003", false).unwrap(); // dislike, not listed

    let liked = dir.liked_cities(&user).unwrap();
    let slugs: Vec<&str> = liked.iter().map(|r| r.city.slug.as_str()).collect();
    assert_eq!(slugs, ["busan", "seoul"]);
}

#[test]
fn bookmark_toggle_creates_and_removes() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");

    assert_eq!(dir.toggle_bookmark(&user, "nc-004").unwrap(), ToggleAction::Created);
    assert!(dir.bookmark_status(&user, "nc-004").unwrap());
    assert_eq!(
        dir.bookmarked_cities(&user).unwrap()[0].city.slug,
        "gangneung"
    );

    assert_eq!(dir.toggle_bookmark(&user, "nc-004").unwrap(), ToggleAction::Removed);
    assert!(!dir.bookmark_status(&user, "nc-004").unwrap());
    assert!(dir.bookmarked_cities(&user).unwrap().is_empty());
}

#[test]
fn review_rating_is_validated_before_any_write() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");
    let before = dir.reviews_by_city("nc-002", 10, 0).unwrap().total;

    let err = dir
        .create_review(
            &user,
            NewReview {
                city_id: "nc-002".into(),
                rating: 6,
                title: "too good".into(),
                content: "off the scale".into(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, NomadError::Validation(_)));
    assert_eq!(dir.reviews_by_city("nc-002", 10, 0).unwrap().total, before);
}

#[test]
fn second_review_for_the_same_city_is_a_conflict() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");
    let review = NewReview {
        city_id: "nc-002".into(),
        rating: 4,
        title: "Good".into(),
        content: "Beaches and barbecue.".into(),
    };

    dir.create_review(&user, review.clone()).unwrap();
    let err = dir.create_review(&user, review).unwrap_err();
    assert!(matches!(err, NomadError::Conflict(_)));

    // A different user may still review the same city.
    dir.register_profile(UserProfile {
        id: "u2".into(),
        username: "other_user".into(),
        bio: None,
        avatar_url: None,
    });
    assert!(dir
        .create_review(
            &Caller::user("u2"),
            NewReview {
                city_id: "nc-002".into(),
                rating: 5,
                title: "Great".into(),
                content: "Stayed three months.".into(),
            },
        )
        .is_ok());
}

#[test]
fn review_pages_are_newest_first_with_total() {
    let dir = directory_with_user("u1");
    for i in 0..5 {
        let user_id = format!("reviewer-{i}");
        dir.register_profile(UserProfile {
            id: user_id.clone(),
            username: format!("reviewer_{i}"),
            bio: None,
            avatar_url: None,
        });
        dir.create_review(
            &Caller::user(user_id),
            NewReview {
                city_id: "nc-003".into(),
                rating: 4,
                title: format!("Review {i}"),
                content: "…".into(),
            },
        )
        .unwrap();
    }

    let page = dir.reviews_by_city("nc-003", 2, 0).unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.reviews.len(), 2);
    assert_eq!(page.reviews[0].title, "Review 4");

    let tail = dir.reviews_by_city("nc-003", 10, 4).unwrap();
    assert_eq!(tail.reviews.len(), 1);
    assert_eq!(tail.reviews[0].title, "Review 0");
}

#[test]
fn review_update_and_delete_are_owner_only() {
    let dir = directory_with_user("u1");
    let owner = Caller::user("u1");
    dir.register_profile(UserProfile {
        id: "u2".into(),
        username: "someone_else".into(),
        bio: None,
        avatar_url: None,
    });
    let other = Caller::user("u2");

    let review = dir
        .create_review(
            &owner,
            NewReview {
                city_id: "nc-005".into(),
                rating: 3,
                title: "Quiet".into(),
                content: "Maybe too quiet.".into(),
            },
        )
        .unwrap();

    assert!(dir
        .update_review(&other, &review.id, ReviewUpdate::default())
        .is_err());
    assert!(dir.delete_review(&other, &review.id).is_err());

    let updated = dir
        .update_review(
            &owner,
            &review.id,
            ReviewUpdate {
                rating: Some(4),
                ..ReviewUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.rating, 4);

    dir.delete_review(&owner, &review.id).unwrap();
    assert_eq!(dir.reviews_by_author(&owner).unwrap().len(), 0);
}

#[test]
fn profile_update_enforces_username_rules() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");

    // Too short
    let err = dir
        .update_profile(
            &user,
            ProfileUpdate {
                username: Some("ab".into()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, NomadError::Validation(_)));

    // Valid format
    let updated = dir
        .update_profile(
            &user,
            ProfileUpdate {
                username: Some("valid_user-1".into()),
                bio: Some("Remote from the coast.".into()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.username, "valid_user-1");
    assert_eq!(updated.bio.as_deref(), Some("Remote from the coast."));

    // Taken by someone else
    dir.register_profile(UserProfile {
        id: "u2".into(),
        username: "wanted_name".into(),
        bio: None,
        avatar_url: None,
    });
    let err = dir
        .update_profile(
            &user,
            ProfileUpdate {
                username: Some("wanted_name".into()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, NomadError::Conflict(_)));

    // Keeping your own name is not a conflict
    assert!(dir
        .update_profile(
            &user,
            ProfileUpdate {
                username: Some("valid_user-1".into()),
                ..ProfileUpdate::default()
            },
        )
        .is_ok());
}

#[test]
fn admin_create_validates_slug_and_uniqueness() {
    let dir = MemoryDirectory::load().unwrap();
    let draft = |slug: &str| CityDraft {
        slug: slug.into(),
        name_ko: "포항".into(),
        name_en: "Pohang".into(),
        region: "North Gyeongsang".into(),
        image_url: String::new(),
        budget: BudgetTier::Low,
        korean_region: Region::Gyeongsang,
        environment: vec![Environment::Nature],
        best_season: Season::Summer,
        cost_per_month: 1_300_000,
        overall_score: 3.9,
        internet_speed: 410,
        safety_score: 4.5,
        details: None,
        costs: None,
    };

    assert!(matches!(
        dir.create_city(draft("Bad Slug")).unwrap_err(),
        NomadError::Validation(_)
    ));
    assert!(matches!(
        dir.create_city(draft("seoul")).unwrap_err(),
        NomadError::Conflict(_)
    ));

    let created = dir.create_city(draft("pohang")).unwrap();
    assert!(created.city.rank > 12);
    assert_eq!(dir.total_stats().unwrap().cities, 13);
    assert!(dir
        .cities_for_admin()
        .unwrap()
        .iter()
        .any(|c| c.city.slug == "pohang"));
}

#[test]
fn admin_delete_cascades_attached_rows() {
    let dir = directory_with_user("u1");
    let user = Caller::user("u1");

    dir.toggle_like(&user, "nc-010", true).unwrap();
    dir.toggle_bookmark(&user, "nc-010").unwrap();
    dir.create_review(
        &user,
        NewReview {
            city_id: "nc-010".into(),
            rating: 5,
            title: "Night sea".into(),
            content: "The cable car view.".into(),
        },
    )
    .unwrap();

    dir.delete_city("nc-010").unwrap();

    assert!(dir.city_by_slug("yeosu").unwrap_err().is_not_found());
    assert_eq!(dir.like_status(&user, "nc-010").unwrap(), None);
    assert!(!dir.bookmark_status(&user, "nc-010").unwrap());
    assert!(dir.liked_cities(&user).unwrap().is_empty());
    assert_eq!(dir.reviews_by_author(&user).unwrap().len(), 0);

    // Deleting again is NotFound.
    assert!(dir.delete_city("nc-010").unwrap_err().is_not_found());
}

#[test]
fn server_side_prefilter_is_only_an_optimization() {
    let dir = MemoryDirectory::load().unwrap();
    let filters = FilterState {
        regions: RegionFilter::any_of([Region::Jeju]),
        ..FilterState::default()
    };

    let prefiltered = dir.list_cities(Some(&filters)).unwrap();
    let full = dir.list_cities(None).unwrap();

    // Client-side evaluation over the full set shows exactly the same rows
    // (modulo the evaluator's like-ordering), so re-applying it is always
    // safe and authoritative.
    let client_side = filters.apply(&full);
    let mut a: Vec<&str> = prefiltered.iter().map(|r| r.city.slug.as_str()).collect();
    let mut b: Vec<&str> = client_side.iter().map(|r| r.city.slug.as_str()).collect();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}
