//! Vision enrichment.
//!
//! Extracts structured attributes from a product photo. Enrichment is
//! best-effort by contract: [`analyze_image`] never fails, it degrades to a
//! neutral [`VisionAnalysis::fallback`] and lets text generation proceed on
//! the product facts alone.

use std::path::Path;

use serde::Deserialize;

use crate::ai::{CompletionError, CompletionParams, VisionCompletion};

// Low temperature: this is extraction, not copywriting.
const TEMPERATURE: f32 = 0.3;

/// Sentinel category used when no analysis is available.
pub const FALLBACK_CATEGORY: &str = "produto";
/// Sentinel style used when no analysis is available.
pub const FALLBACK_STYLE: &str = "não identificado";
/// Sentinel description used when no analysis is available.
pub const FALLBACK_DESCRIPTION: &str = "Análise visual não disponível";

const ANALYSIS_PROMPT: &str = r#"Você é um especialista em análise de produtos para e-commerce.
Analise esta imagem de produto e retorne APENAS um JSON válido (sem markdown, sem explicações) com a seguinte estrutura:

{
  "category": "categoria do produto (ex: roupa, eletrônico, acessório)",
  "colors": ["cor1", "cor2"],
  "style": "estilo visual (ex: moderno, clássico, minimalista, esportivo)",
  "materials": ["material1", "material2"],
  "features": ["característica visual 1", "característica visual 2"],
  "detailedDescription": "descrição objetiva do que você vê na imagem em 2-3 frases"
}

Seja preciso e objetivo. Use português brasileiro."#;

/// Structured attributes extracted from a product photo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionAnalysis {
    /// Product category.
    pub category: String,
    /// Dominant colors.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Visual style.
    pub style: String,
    /// Apparent materials.
    #[serde(default)]
    pub materials: Vec<String>,
    /// Notable visual features.
    #[serde(default)]
    pub features: Vec<String>,
    /// Short free-text description of the image.
    pub detailed_description: String,
}

impl VisionAnalysis {
    /// Neutral analysis used when the image cannot be analyzed.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            category: FALLBACK_CATEGORY.to_string(),
            colors: Vec::new(),
            style: FALLBACK_STYLE.to_string(),
            materials: Vec::new(),
            features: Vec::new(),
            detailed_description: FALLBACK_DESCRIPTION.to_string(),
        }
    }
}

/// Analyze a product image on disk.
///
/// Infallible: any I/O, provider, or parse failure is logged and replaced
/// with [`VisionAnalysis::fallback`].
pub async fn analyze_image<C: VisionCompletion>(client: &C, image_path: &Path) -> VisionAnalysis {
    match try_analyze(client, image_path).await {
        Ok(analysis) => {
            tracing::debug!(
                category = %analysis.category,
                colors = analysis.colors.len(),
                "vision analysis complete"
            );
            analysis
        }
        Err(err) => {
            tracing::warn!(path = %image_path.display(), error = %err, "vision analysis failed, using fallback");
            VisionAnalysis::fallback()
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum VisionError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("failed to parse analysis JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

async fn try_analyze<C: VisionCompletion>(
    client: &C,
    image_path: &Path,
) -> Result<VisionAnalysis, VisionError> {
    let image = tokio::fs::read(image_path).await?;
    let mime_type = mime_type_for(image_path);

    let reply = client
        .analyze(
            ANALYSIS_PROMPT,
            &image,
            mime_type,
            CompletionParams::new(TEMPERATURE),
        )
        .await?;

    let analysis = serde_json::from_str(strip_code_fences(&reply))?;
    Ok(analysis)
}

/// MIME type by file extension; unknown extensions are treated as JPEG.
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Strip a markdown code fence the model sometimes wraps JSON in.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

/// Render an analysis as prompt context.
///
/// Sentinel category and style are omitted so the fallback contributes
/// nothing misleading; the detailed description is always included.
#[must_use]
pub fn format_analysis_for_prompt(analysis: &VisionAnalysis) -> String {
    let mut parts = Vec::new();

    if !analysis.category.is_empty() && analysis.category != FALLBACK_CATEGORY {
        parts.push(format!("Categoria: {}", analysis.category));
    }

    if !analysis.colors.is_empty() {
        parts.push(format!("Cores: {}", analysis.colors.join(", ")));
    }

    if !analysis.style.is_empty() && analysis.style != FALLBACK_STYLE {
        parts.push(format!("Estilo: {}", analysis.style));
    }

    if !analysis.materials.is_empty() {
        parts.push(format!("Materiais: {}", analysis.materials.join(", ")));
    }

    if !analysis.features.is_empty() {
        parts.push(format!(
            "Características visuais: {}",
            analysis.features.join("; ")
        ));
    }

    if !analysis.detailed_description.is_empty() {
        parts.push(format!(
            "\nDescrição visual: {}",
            analysis.detailed_description
        ));
    }

    parts.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct ScriptedVision(Result<&'static str, ()>);

    impl VisionCompletion for ScriptedVision {
        async fn analyze(
            &self,
            _prompt: &str,
            _image: &[u8],
            _mime_type: &str,
            _params: CompletionParams,
        ) -> Result<String, CompletionError> {
            self.0
                .map(ToOwned::to_owned)
                .map_err(|()| CompletionError::Provider("scripted failure".to_string()))
        }
    }

    const VALID_JSON: &str = r#"{
        "category": "calçado",
        "colors": ["preto", "branco"],
        "style": "esportivo",
        "materials": ["couro"],
        "features": ["solado alto"],
        "detailedDescription": "Tênis preto com detalhes brancos."
    }"#;

    fn temp_image() -> PathBuf {
        let path = std::env::temp_dir().join(format!("vision-test-{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"not a real png").unwrap();
        path
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("no-extension")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_analyze_parses_fenced_reply() {
        let path = temp_image();
        let client = ScriptedVision(Ok(VALID_JSON));
        let analysis = analyze_image(&client, &path).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(analysis.category, "calçado");
        assert_eq!(analysis.colors, vec!["preto", "branco"]);
        assert_eq!(analysis.detailed_description, "Tênis preto com detalhes brancos.");
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_fallback() {
        let client = ScriptedVision(Ok(VALID_JSON));
        let analysis = analyze_image(&client, Path::new("/nonexistent/image.png")).await;
        assert_eq!(analysis, VisionAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_fallback() {
        let path = temp_image();
        let client = ScriptedVision(Err(()));
        let analysis = analyze_image(&client, &path).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(analysis, VisionAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades_to_fallback() {
        let path = temp_image();
        let client = ScriptedVision(Ok("sorry, I cannot analyze this image"));
        let analysis = analyze_image(&client, &path).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(analysis, VisionAnalysis::fallback());
    }

    #[test]
    fn test_format_omits_sentinel_fields() {
        let formatted = format_analysis_for_prompt(&VisionAnalysis::fallback());
        assert!(!formatted.contains("Categoria"));
        assert!(!formatted.contains("Estilo"));
        assert!(formatted.contains("Descrição visual: Análise visual não disponível"));
    }

    #[test]
    fn test_format_includes_real_fields() {
        let analysis = VisionAnalysis {
            category: "calçado".to_string(),
            colors: vec!["preto".to_string()],
            style: "esportivo".to_string(),
            materials: vec!["couro".to_string()],
            features: vec!["solado alto".to_string()],
            detailed_description: "Tênis preto.".to_string(),
        };
        let formatted = format_analysis_for_prompt(&analysis);
        assert!(formatted.contains("Categoria: calçado"));
        assert!(formatted.contains("Cores: preto"));
        assert!(formatted.contains("Estilo: esportivo"));
        assert!(formatted.contains("Materiais: couro"));
        assert!(formatted.contains("Características visuais: solado alto"));
        assert!(formatted.contains("Descrição visual: Tênis preto."));
    }
}
