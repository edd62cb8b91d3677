//! Integration tests for vision analysis feeding the text pipelines.

use std::path::PathBuf;

use shelftalk_integration_tests::FakeBackend;
use shelftalk_server::ai::ProductInput;
use shelftalk_server::ai::vision::{VisionAnalysis, analyze_image, format_analysis_for_prompt};
use shelftalk_server::services::generation::{enrich_description, run_pipelines};

const ANALYSIS_JSON: &str = r#"```json
{
  "category": "mochila",
  "colors": ["preto", "cinza"],
  "style": "urbano",
  "materials": ["poliéster"],
  "features": ["zíper impermeável", "alças acolchoadas"],
  "detailedDescription": "Mochila preta com detalhes em cinza e zíperes selados."
}
```"#;

fn temp_image(bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("shelftalk-it-{}.png", uuid::Uuid::new_v4()));
    std::fs::write(&path, bytes).expect("temp file should be writable");
    path
}

#[tokio::test]
async fn test_analysis_flows_into_every_pipeline_prompt() {
    let backend = FakeBackend::with_vision(ANALYSIS_JSON);
    let path = temp_image(b"fake image bytes");

    let analysis = analyze_image(&backend, &path).await;
    std::fs::remove_file(&path).ok();

    let summary = format_analysis_for_prompt(&analysis);
    let product = ProductInput {
        name: "Mochila Urbana".to_string(),
        description: enrich_description(Some("Ideal para o dia a dia"), &summary),
    };

    run_pipelines(&backend, &product)
        .await
        .expect("fan-out should succeed");

    let calls = backend.calls.lock().expect("mutex should not be poisoned");
    assert_eq!(calls.len(), 7);
    for prompt in calls.iter() {
        assert!(prompt.contains("Ideal para o dia a dia"));
        assert!(prompt.contains("Análise visual da imagem:"));
        assert!(prompt.contains("Categoria: mochila"));
        assert!(prompt.contains("Cores: preto, cinza"));
        assert!(prompt.contains("zíper impermeável; alças acolchoadas"));
        assert!(prompt.contains("Descrição visual: Mochila preta"));
    }
}

#[tokio::test]
async fn test_vision_failure_degrades_without_breaking_generation() {
    // Vision calls are scripted to fail; analysis falls back.
    let backend = FakeBackend::echo();
    let path = temp_image(b"fake image bytes");

    let analysis = analyze_image(&backend, &path).await;
    std::fs::remove_file(&path).ok();

    assert_eq!(analysis, VisionAnalysis::fallback());

    // The fallback summary carries no category or style claims.
    let summary = format_analysis_for_prompt(&analysis);
    assert!(!summary.contains("Categoria"));
    assert!(!summary.contains("Estilo"));

    let product = ProductInput {
        name: "Mochila Urbana".to_string(),
        description: enrich_description(None, &summary),
    };

    let content = run_pipelines(&backend, &product)
        .await
        .expect("generation should proceed after vision fallback");
    assert!(!content.seo_title.is_empty());
}

#[tokio::test]
async fn test_unfenced_analysis_is_also_accepted() {
    let backend = FakeBackend::with_vision(
        r#"{"category": "caneca", "style": "minimalista", "detailedDescription": "Caneca branca lisa."}"#,
    );
    let path = temp_image(b"fake image bytes");

    let analysis = analyze_image(&backend, &path).await;
    std::fs::remove_file(&path).ok();

    assert_eq!(analysis.category, "caneca");
    assert!(analysis.colors.is_empty());
    assert_eq!(analysis.detailed_description, "Caneca branca lisa.");
}
