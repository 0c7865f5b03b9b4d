//! Live end-to-end scenarios
//!
//! These tests drive a real Chromium instance against the configured
//! storefront and product API, so they are ignored by default. Run them
//! with:
//!
//! ```text
//! cargo test --test e2e -- --ignored --test-threads=1
//! ```
//!
//! Configuration comes from `config/shopcheck.properties` plus the usual
//! `SHOPCHECK_*` environment overrides; the browser runs headless with the
//! slow-motion pauses disabled to keep the runs fast.

use futures::future::BoxFuture;
use shopcheck::config::Settings;
use shopcheck::error::Result;
use shopcheck::flows;
use shopcheck::scenario::{Scenario, ScenarioContext, ScenarioRunner};

fn live_settings() -> Settings {
    let mut settings = Settings::load();
    settings.set("headless.mode", "true");
    settings.set("slow.mo", "0");
    settings
}

async fn run_named(name: &str) {
    let runner = ScenarioRunner::new(live_settings());
    let catalog = flows::catalog();
    let scenario = catalog
        .iter()
        .find(|s| s.name() == name)
        .unwrap_or_else(|| panic!("scenario {name} not in catalog"));

    let outcome = runner.run_scenario(scenario).await;
    assert!(
        outcome.passed,
        "{name} failed: {}",
        outcome.error.as_deref().unwrap_or("unknown error")
    );
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn product_api_lookup_returns_record_for_id_4() {
    run_named("product-api-lookup").await;
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn login_lands_on_the_product_listing() {
    run_named("login-lands-on-products").await;
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn first_catalog_item_shows_up_in_the_cart() {
    run_named("first-item-into-cart").await;
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn completed_checkout_reaches_the_confirmation() {
    run_named("checkout-confirmation").await;
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn cart_contents_differ_from_the_api_catalog() {
    run_named("api-ui-cross-check").await;
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn full_suite_passes_and_writes_a_summary() {
    let results = tempfile::tempdir().unwrap();
    let mut settings = live_settings();
    settings.set("results.dir", results.path().display().to_string());

    let runner = ScenarioRunner::new(settings);
    let suite = runner.run_suite(&flows::catalog()).await;
    let summary = runner.write_summary(&suite).unwrap();

    assert!(suite.all_passed(), "failures: {:?}", suite.outcomes);
    assert_eq!(suite.total, 5);
    assert!(summary.is_file());

    // Browser-driven scenarios leave a visual trail behind
    let ui_scenario = suite
        .outcomes
        .iter()
        .find(|o| o.name == "checkout-confirmation")
        .unwrap();
    let dir = ui_scenario.artifacts_dir.as_ref().unwrap();
    assert!(dir.join("action-01.png").is_file());
}

fn lookup_missing_element_step(ctx: &mut ScenarioContext) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        let ui = ctx.interactor()?;
        ui.goto(&ctx.settings().base_url()?).await?;
        ui.locate("#element-that-never-exists").await.map(|_| ())
    })
}

#[tokio::test]
#[ignore = "requires a running Chrome/Chromium and network access"]
async fn failing_scenario_captures_a_final_screenshot_and_still_releases() {
    let results = tempfile::tempdir().unwrap();
    let mut settings = live_settings();
    settings.set("results.dir", results.path().display().to_string());
    // Keep the doomed lookup short
    settings.set("default.timeout", "2");

    let runner = ScenarioRunner::new(settings);
    let scenario = Scenario::new("doomed-lookup", Box::new(lookup_missing_element_step));
    let outcome = runner.run_scenario(&scenario).await;

    assert!(!outcome.passed);
    let error = outcome.error.unwrap();
    assert!(error.contains("#element-that-never-exists"));
    assert!(error.contains("2000ms"));

    // Exactly one failure artifact, and teardown did not mask the error
    let dir = outcome.artifacts_dir.unwrap();
    assert!(dir.join("failure.png").is_file());

    // The session was released: a second scenario can launch cleanly
    let follow_up = runner
        .run_scenario(
            flows::catalog()
                .iter()
                .find(|s| s.name() == "login-lands-on-products")
                .unwrap(),
        )
        .await;
    assert!(follow_up.passed, "{:?}", follow_up.error);
}
