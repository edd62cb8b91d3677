//! Long-description pipeline.

use crate::ai::{CompletionError, CompletionParams, ProductInput, TextCompletion};

const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "Você é um copywriter especializado em e-commerce. \
     Gere uma descrição detalhada, envolvente e clara para o produto informado. \
     Use português brasileiro, tom profissional mas acessível. \
     Evite repetir o nome do produto em todas as frases.";

/// Generate a multi-paragraph product description.
///
/// Output is returned verbatim: paragraph breaks are part of the copy.
///
/// # Errors
///
/// Returns [`CompletionError`] if the provider call fails.
pub async fn run<C: TextCompletion>(
    client: &C,
    input: &ProductInput,
) -> Result<String, CompletionError> {
    tracing::debug!(product = %input.name, "generating long description");

    let user = format!(
        "Nome do produto: {}\nDescrição base (se houver): {}\n\n\
         Gere um texto em 2 a 4 parágrafos, com foco em benefícios,\n\
         sensação de uso e adequação a diferentes contextos.",
        input.name,
        input.description.as_deref().unwrap_or(""),
    );

    client
        .complete(SYSTEM_PROMPT, &user, CompletionParams::new(TEMPERATURE))
        .await
}
