//! Resolution Integration Tests
//!
//! Tests for candidate ordering, per-candidate recovery and absence handling.

mod support;

use std::sync::Arc;
use std::time::Duration;

use resource_loader::core::{Registry, ResolveError, ResourceResolver};
use resource_loader::{Category, StaticSource};
use serde_json::json;

use support::{CountingLoader, DelayedLoader, FailingLoader};

fn resolver(source: StaticSource) -> ResourceResolver {
    ResourceResolver::new(Arc::new(Registry::new(source)))
}

fn scholarships() -> StaticSource {
    StaticSource::new()
        .with_value(
            Category::Scholarships,
            "data/resources/scholarships/fes-eo.json",
            json!({ "default": { "title": "Family Empowerment Scholarship", "type": "EO" } }),
        )
        .with_value(
            Category::Scholarships,
            "data/resources/scholarships/ftc.json",
            json!({ "title": "Florida Tax Credit Scholarship" }),
        )
}

#[tokio::test]
async fn test_resolve_camel_case_slug() {
    let resolver = resolver(scholarships());

    let envelope = resolver.resolve("scholarships", "fesEo").await.unwrap();
    assert_eq!(envelope.slug, "fes-eo");
    assert_eq!(envelope.category, Category::Scholarships);
    assert_eq!(envelope.title(), Some("Family Empowerment Scholarship"));
    assert_eq!(envelope.str_field("type"), Some("EO"));
}

#[tokio::test]
async fn test_resolve_hyphen_slug() {
    let resolver = resolver(scholarships());

    let envelope = resolver.resolve("scholarships", "fes-eo").await.unwrap();
    assert_eq!(envelope.slug, "fes-eo");

    let envelope = resolver.resolve("scholarships", "ftc").await.unwrap();
    assert_eq!(envelope.slug, "ftc");
}

#[tokio::test]
async fn test_camel_case_file_serves_hyphen_route() {
    let resolver = resolver(StaticSource::new().with_value(
        Category::Daycares,
        "daycares/smallSteps.json",
        json!({ "title": "Small Steps" }),
    ));

    let envelope = resolver.resolve("daycares", "small-steps").await.unwrap();
    assert_eq!(envelope.slug, "small-steps");
    assert_eq!(envelope.category, Category::Daycares);
}

#[tokio::test]
async fn test_missing_resource_is_absent() {
    let resolver = resolver(scholarships());

    assert!(resolver.resolve("scholarships", "does-not-exist").await.is_none());

    let err = resolver
        .try_resolve("scholarships", "does-not-exist")
        .await
        .unwrap_err();
    match err {
        ResolveError::NotFound { category, slug } => {
            assert_eq!(category, Category::Scholarships);
            assert_eq!(slug, "does-not-exist");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_category_is_absent() {
    let resolver = resolver(scholarships());

    assert!(resolver.resolve("bogus-category", "x").await.is_none());
    assert!(matches!(
        resolver.try_resolve("bogus-category", "x").await,
        Err(ResolveError::UnknownCategory(_))
    ));
}

#[tokio::test]
async fn test_resolution_is_scoped_to_category() {
    let resolver = resolver(scholarships());
    assert!(resolver.resolve("services", "ftc").await.is_none());
}

#[tokio::test]
async fn test_failing_candidate_falls_through() {
    // "Step-Up" is tried first, then "step-up"
    let resolver = resolver(
        StaticSource::new()
            .with_loader(
                Category::Scholarships,
                "scholarships/Step-Up.json",
                Arc::new(FailingLoader("disk error")),
            )
            .with_value(
                Category::Scholarships,
                "scholarships/stepUp.json",
                json!({ "title": "Step Up For Students" }),
            ),
    );

    let envelope = resolver.resolve("scholarships", "Step-Up").await.unwrap();
    assert_eq!(envelope.slug, "step-up");
    assert_eq!(envelope.title(), Some("Step Up For Students"));
}

#[tokio::test]
async fn test_malformed_candidate_falls_through() {
    let resolver = resolver(
        StaticSource::new()
            .with_value(Category::Services, "services/Aba-Therapy.json", json!({ "default": 7 }))
            .with_value(
                Category::Services,
                "services/abaTherapy.json",
                json!({ "title": "ABA Therapy" }),
            ),
    );

    let envelope = resolver.resolve("services", "Aba-Therapy").await.unwrap();
    assert_eq!(envelope.slug, "aba-therapy");
}

#[tokio::test]
async fn test_record_with_default_field_resolves_whole() {
    let resolver = resolver(
        StaticSource::new()
            .with_value(
                Category::Services,
                "services/aba.json",
                json!({ "title": "ABA", "default": "yes" }),
            )
            .with_value(
                Category::Services,
                "services/ot.json",
                json!({ "title": "OT", "default": { "plan": 1 } }),
            ),
    );

    let aba = resolver.resolve("services", "aba").await.unwrap();
    assert_eq!(aba.title(), Some("ABA"));
    assert_eq!(aba.str_field("default"), Some("yes"));

    let ot = resolver.resolve("services", "ot").await.unwrap();
    assert_eq!(ot.title(), Some("OT"));
    assert_eq!(ot.get("default"), Some(&json!({ "plan": 1 })));
    assert!(ot.get("plan").is_none());
}

#[tokio::test]
async fn test_every_candidate_failing_is_absent() {
    let resolver = resolver(
        StaticSource::new()
            .with_loader(
                Category::Services,
                "services/Speech-Therapy.json",
                Arc::new(FailingLoader("first")),
            )
            .with_value(Category::Services, "services/speechTherapy.json", json!(null)),
    );

    assert!(resolver.resolve("services", "Speech-Therapy").await.is_none());
}

#[tokio::test]
async fn test_first_match_stops_iteration() {
    let first = CountingLoader::new(json!({ "title": "first" }));
    let second = CountingLoader::new(json!({ "title": "second" }));

    let resolver = resolver(
        StaticSource::new()
            .with_loader(Category::Insurances, "insurances/Kid-Care.json", first.clone())
            .with_loader(Category::Insurances, "insurances/kidCare.json", second.clone()),
    );

    let envelope = resolver.resolve("insurances", "Kid-Care").await.unwrap();
    assert_eq!(envelope.slug, "Kid-Care");
    assert_eq!(envelope.title(), Some("first"));
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0);
}

#[tokio::test]
async fn test_loader_runs_on_every_resolution() {
    let loader = CountingLoader::new(json!({ "title": "Medicaid Waiver" }));
    let resolver = resolver(StaticSource::new().with_loader(
        Category::Insurances,
        "insurances/medicaidWaiver.json",
        loader.clone(),
    ));

    assert!(resolver.resolve("insurances", "medicaidWaiver").await.is_some());
    assert!(resolver.resolve("insurances", "medicaid-waiver").await.is_some());
    assert_eq!(loader.calls(), 2);
}

#[tokio::test]
async fn test_collision_later_source_is_served() {
    let resolver = resolver(
        StaticSource::new()
            .with_value(Category::Services, "services/aba-therapy.json", json!({ "title": "old" }))
            .with_value(Category::Services, "services/abaTherapy.json", json!({ "title": "new" })),
    );

    let envelope = resolver.resolve("services", "aba-therapy").await.unwrap();
    assert_eq!(envelope.title(), Some("new"));
    assert_eq!(resolver.registry().slugs(Category::Services), vec!["aba-therapy"]);
}

#[tokio::test]
async fn test_timed_out_candidate_falls_through() {
    let resolver = resolver(
        StaticSource::new()
            .with_loader(
                Category::Daycares,
                "daycares/Little-Stars.json",
                Arc::new(DelayedLoader {
                    delay: Duration::from_secs(30),
                    value: json!({ "title": "slow" }),
                }),
            )
            .with_value(Category::Daycares, "daycares/littleStars.json", json!({ "title": "fast" })),
    )
    .with_load_timeout(Duration::from_millis(20));

    let envelope = resolver.resolve("daycares", "Little-Stars").await.unwrap();
    assert_eq!(envelope.title(), Some("fast"));
}

#[tokio::test]
async fn test_concurrent_resolutions_are_independent() {
    let resolver = resolver(scholarships());

    let (a, b, c) = tokio::join!(
        resolver.resolve("scholarships", "fesEo"),
        resolver.resolve("scholarships", "ftc"),
        resolver.resolve("scholarships", "missing"),
    );

    assert_eq!(a.unwrap().slug, "fes-eo");
    assert_eq!(b.unwrap().slug, "ftc");
    assert!(c.is_none());
}

#[tokio::test]
async fn test_envelope_serializes_flat() {
    let resolver = resolver(scholarships());
    let envelope = resolver.resolve("scholarships", "ftc").await.unwrap();

    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "slug": "ftc",
            "category": "scholarships",
            "title": "Florida Tax Credit Scholarship"
        })
    );
}
