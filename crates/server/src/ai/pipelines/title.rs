//! SEO title pipeline.

use crate::ai::{CompletionError, CompletionParams, TextCompletion, TitleInput};

/// Character limit applied when the caller does not supply one.
pub const DEFAULT_MAX_LENGTH: usize = 80;

const TEMPERATURE: f32 = 0.5;

/// Generate one SEO-optimized product title.
///
/// The output is collapsed to a single line: the model occasionally wraps
/// titles in newlines or pads them with doubled spaces.
///
/// # Errors
///
/// Returns [`CompletionError`] if the provider call fails.
pub async fn run<C: TextCompletion>(
    client: &C,
    input: &TitleInput,
) -> Result<String, CompletionError> {
    tracing::debug!(product = %input.product.name, "generating SEO title");

    let system = format!(
        "Você é especialista em títulos de produtos para e-commerce brasileiro. \
         Gere UM título otimizado para SEO, claro e atrativo. \
         Não use aspas, emojis ou caracteres especiais desnecessários. \
         Limite aproximado de tamanho: até {} caracteres.",
        input.max_length
    );

    let user = format!(
        "Nome do produto: {}\nDescrição base (se houver): {}\nMarketplace alvo (se informado): {}",
        input.product.name,
        input.product.description.as_deref().unwrap_or(""),
        input.marketplace.display_name(),
    );

    let text = client
        .complete(&system, &user, CompletionParams::new(TEMPERATURE))
        .await?;

    Ok(collapse_whitespace(&text))
}

/// Collapse all whitespace runs (including newlines) to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shelftalk_core::Marketplace;

    use super::*;
    use crate::ai::ProductInput;
    use crate::ai::testing::{CannedCompletion, EchoCompletion};

    fn input(name: &str) -> TitleInput {
        TitleInput {
            product: ProductInput {
                name: name.to_string(),
                description: Some("couro legítimo".to_string()),
            },
            max_length: DEFAULT_MAX_LENGTH,
            marketplace: Marketplace::MercadoLivre,
        }
    }

    #[tokio::test]
    async fn test_prompt_interpolates_product_facts() {
        let out = run(&EchoCompletion, &input("Tênis Runner")).await.unwrap();
        assert!(out.contains("Nome do produto: Tênis Runner"));
        assert!(out.contains("couro legítimo"));
        assert!(out.contains("Mercado Livre"));
        assert!(out.contains("até 80 caracteres"));
    }

    #[tokio::test]
    async fn test_collapses_newlines_and_runs_of_spaces() {
        let client = CannedCompletion("Tênis  Runner\nPreto   Masculino \n");
        let out = run(&client, &input("x")).await.unwrap();
        assert_eq!(out, "Tênis Runner Preto Masculino");
    }
}
