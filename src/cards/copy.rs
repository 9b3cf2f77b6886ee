use crate::cards::catalog::CardCatalog;

/// Source of the per-card interpretation strings and the hook empathy text.
///
/// Production setups plug a text-generation service in here; the returned
/// strings are passed through to the render result unmodified.
pub trait CopyWriter: Send + Sync {
    /// One interpretation per card, in the order of `cards`
    fn card_interpretations(&self, cards: &[usize], theme: &str, hook: Option<&str>) -> Vec<String>;

    /// Text shown on the short video's opening screen
    fn empathy_message(&self, hook: &str) -> String;
}

/// Offline copy built from the card catalog
#[derive(Debug, Clone, Default)]
pub struct CatalogCopyWriter;

impl CopyWriter for CatalogCopyWriter {
    fn card_interpretations(&self, cards: &[usize], _theme: &str, _hook: Option<&str>) -> Vec<String> {
        cards
            .iter()
            .map(|&index| {
                let info = CardCatalog::info(index);
                format!("{}: {}", info.name, info.meaning)
            })
            .collect()
    }

    fn empathy_message(&self, hook: &str) -> String {
        hook.trim().to_string()
    }
}
