//! Social-post pipeline.

use shelftalk_core::SocialChannel;

use crate::ai::{CompletionError, CompletionParams, SocialPostInput, TextCompletion};

// High temperature: social copy wants variety over determinism.
const TEMPERATURE: f32 = 0.9;

/// Generate a caption for one social channel.
///
/// # Errors
///
/// Returns [`CompletionError`] if the provider call fails.
pub async fn run<C: TextCompletion>(
    client: &C,
    input: &SocialPostInput,
) -> Result<String, CompletionError> {
    tracing::debug!(
        product = %input.product.name,
        channel = %input.channel,
        "generating social post"
    );

    let system = format!(
        "Você é um social media especializado em criar legendas para e-commerce \
         em português do Brasil. \
         Adapte o texto para o canal e público-alvo específico. \
         Use um tom coerente com a marca: {}. {} \
         Você pode usar emojis com moderação estratégica.",
        input.tone,
        style_guide(input.channel),
    );

    let user = format!(
        "Canal: {}\nNome do produto: {}\nDescrição base (se houver): {}\n\n\
         Crie uma legenda envolvente que incentive o clique, compartilhamento ou compra.",
        input.channel,
        input.product.name,
        input.product.description.as_deref().unwrap_or(""),
    );

    client
        .complete(&system, &user, CompletionParams::new(TEMPERATURE))
        .await
}

/// Per-channel style instructions.
const fn style_guide(channel: SocialChannel) -> &'static str {
    match channel {
        SocialChannel::Instagram => {
            "Formato Instagram: visual, use emojis estrategicamente, inclua 3-5 hashtags \
             relevantes ao final. Tom aspiracional e inspirador."
        }
        SocialChannel::Tiktok => {
            "Formato TikTok: dinâmico, jovem, descontraído. Call-to-action forte. \
             Use linguagem atual e referências de trends quando aplicável."
        }
        SocialChannel::Facebook => {
            "Formato Facebook: conversacional, storytelling, foque em engajamento. \
             Público mais amplo (25-55 anos). Texto pode ser mais longo e detalhado."
        }
        SocialChannel::Pinterest => {
            "Formato Pinterest: descritivo e focado em inspiração e descoberta. \
             Destaque usos, benefícios visuais e ideias de aplicação do produto."
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shelftalk_core::Tone;

    use super::*;
    use crate::ai::ProductInput;
    use crate::ai::testing::EchoCompletion;

    fn input(channel: SocialChannel, tone: Tone) -> SocialPostInput {
        SocialPostInput {
            product: ProductInput {
                name: "Óculos Aviador".to_string(),
                description: None,
            },
            channel,
            tone,
        }
    }

    #[tokio::test]
    async fn test_prompt_carries_channel_and_tone() {
        let out = run(&EchoCompletion, &input(SocialChannel::Tiktok, Tone::Jovem))
            .await
            .unwrap();
        assert!(out.contains("Canal: tiktok"));
        assert!(out.contains("tom coerente com a marca: jovem"));
        assert!(out.contains("Formato TikTok"));
    }

    #[tokio::test]
    async fn test_each_channel_gets_its_own_style_guide() {
        for channel in SocialChannel::ALL {
            let out = run(&EchoCompletion, &input(channel, Tone::default()))
                .await
                .unwrap();
            assert!(out.contains(&format!("Canal: {channel}")));
        }
        assert!(style_guide(SocialChannel::Instagram).contains("hashtags"));
        assert!(style_guide(SocialChannel::Pinterest).contains("descoberta"));
    }
}
