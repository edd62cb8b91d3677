//! Integration tests for the seven-pipeline generation fan-out.
//!
//! These exercise the real pipeline code against a scripted provider,
//! so they verify prompt routing and the all-or-nothing contract without
//! any network access.

use shelftalk_core::Marketplace;
use shelftalk_integration_tests::FakeBackend;
use shelftalk_server::ai::ProductInput;
use shelftalk_server::services::generation::run_pipelines;

fn product() -> ProductInput {
    ProductInput {
        name: "Mochila Urbana Impermeável".to_string(),
        description: Some("Compartimento para notebook de 15 polegadas".to_string()),
    }
}

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_fanout_fills_all_seven_fields() {
    let backend = FakeBackend::echo();
    let content = run_pipelines(&backend, &product())
        .await
        .expect("fan-out should succeed with an echoing backend");

    assert!(!content.seo_title.is_empty());
    assert!(!content.long_description.is_empty());
    assert!(!content.tags.is_empty());
    assert!(!content.social_instagram.is_empty());
    assert!(!content.social_tiktok.is_empty());
    assert!(!content.social_facebook.is_empty());
    assert!(!content.social_pinterest.is_empty());
}

#[tokio::test]
async fn test_fanout_makes_exactly_seven_text_calls() {
    let backend = FakeBackend::echo();
    run_pipelines(&backend, &product())
        .await
        .expect("fan-out should succeed");

    assert_eq!(backend.text_call_count(), 7);
}

#[tokio::test]
async fn test_title_defaults_to_the_generic_marketplace() {
    let backend = FakeBackend::echo();
    let content = run_pipelines(&backend, &product())
        .await
        .expect("fan-out should succeed");

    assert!(
        content
            .seo_title
            .contains(Marketplace::default().display_name())
    );
}

#[tokio::test]
async fn test_each_social_field_targets_its_own_channel() {
    let backend = FakeBackend::echo();
    let content = run_pipelines(&backend, &product())
        .await
        .expect("fan-out should succeed");

    assert!(content.social_instagram.contains("Canal: instagram"));
    assert!(content.social_tiktok.contains("Canal: tiktok"));
    assert!(content.social_facebook.contains("Canal: facebook"));
    assert!(content.social_pinterest.contains("Canal: pinterest"));
}

#[tokio::test]
async fn test_every_pipeline_sees_the_product_facts() {
    let backend = FakeBackend::echo();
    run_pipelines(&backend, &product())
        .await
        .expect("fan-out should succeed");

    let calls = backend.calls.lock().expect("mutex should not be poisoned");
    for prompt in calls.iter() {
        assert!(
            prompt.contains("Mochila Urbana Impermeável"),
            "prompt missing product name: {prompt}"
        );
        assert!(
            prompt.contains("Compartimento para notebook"),
            "prompt missing description: {prompt}"
        );
    }
}

// =============================================================================
// All-or-Nothing Failure
// =============================================================================

#[tokio::test]
async fn test_single_pipeline_failure_aborts_the_fanout() {
    // Only the TikTok pipeline's prompt contains this marker.
    let backend = FakeBackend::failing_on("Canal: tiktok");
    let result = run_pipelines(&backend, &product()).await;

    assert!(result.is_err(), "one failed pipeline should fail the whole run");
}

#[tokio::test]
async fn test_title_pipeline_failure_aborts_the_fanout() {
    // The title pipeline is the only one mentioning the marketplace.
    let backend = FakeBackend::failing_on("Marketplace alvo");
    let result = run_pipelines(&backend, &product()).await;

    assert!(result.is_err());
}
