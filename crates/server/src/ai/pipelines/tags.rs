//! Tag / keyword extraction pipeline.

use crate::ai::{CompletionError, CompletionParams, TagsInput, TextCompletion};

/// Tag count applied when the caller does not supply one.
pub const DEFAULT_MAX_TAGS: usize = 10;

const TEMPERATURE: f32 = 0.6;

/// Generate a comma-separated keyword list for the product.
///
/// # Errors
///
/// Returns [`CompletionError`] if the provider call fails.
pub async fn run<C: TextCompletion>(
    client: &C,
    input: &TagsInput,
) -> Result<String, CompletionError> {
    tracing::debug!(product = %input.product.name, "generating tags");

    let system = format!(
        "Gere uma lista de palavras-chave (tags) para e-commerce brasileiro. \
         Responda APENAS com as tags separadas por vírgula. \
         Gere no máximo {} tags.",
        input.max_tags
    );

    let user = format!(
        "Nome do produto: {}\nDescrição base (se houver): {}",
        input.product.name,
        input.product.description.as_deref().unwrap_or(""),
    );

    let text = client
        .complete(&system, &user, CompletionParams::new(TEMPERATURE))
        .await?;

    Ok(normalize_tags(&text))
}

/// Normalize separator spacing: exactly one space after each comma, no
/// empty entries, no leading or trailing whitespace.
fn normalize_tags(text: &str) -> String {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ai::ProductInput;
    use crate::ai::testing::{CannedCompletion, EchoCompletion};

    fn input() -> TagsInput {
        TagsInput {
            product: ProductInput {
                name: "Caneca Térmica".to_string(),
                description: None,
            },
            max_tags: DEFAULT_MAX_TAGS,
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_name_and_limit() {
        let out = run(&EchoCompletion, &input()).await.unwrap();
        assert!(out.contains("Nome do produto: Caneca Térmica"));
        assert!(out.contains("no máximo 10 tags"));
    }

    #[tokio::test]
    async fn test_normalizes_separator_spacing() {
        let client = CannedCompletion("a,b ,  c");
        assert_eq!(run(&client, &input()).await.unwrap(), "a, b, c");
    }

    #[tokio::test]
    async fn test_drops_empty_entries_and_outer_whitespace() {
        let client = CannedCompletion("  caneca, , térmica,aço inox,  ");
        assert_eq!(
            run(&client, &input()).await.unwrap(),
            "caneca, térmica, aço inox"
        );
    }
}
