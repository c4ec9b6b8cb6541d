use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Syllable counts from a CMU-style pronouncing dictionary.
///
/// Accepts both the upstream `WORD  P1 P2 ...` layout (alternate
/// pronunciations spelled `WORD(2)`) and the `word N P1 P2 ...` layout with a
/// numeric variant column. Only the first pronunciation of a word is kept and
/// its syllables are the phonemes carrying a stress digit.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    syllables: HashMap<String, usize>,
}

impl PronouncingDictionary {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read pronouncing dictionary: {}", path.display()))?;
        let dictionary = Self::parse(&String::from_utf8_lossy(&bytes));
        if dictionary.is_empty() {
            anyhow::bail!("Pronouncing dictionary is empty: {}", path.display());
        }
        tracing::info!(
            "Loaded {} pronunciations from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn parse(text: &str) -> Self {
        let mut syllables = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let word = match word.find('(') {
                Some(pos) if word.ends_with(')') && pos > 0 => &word[..pos],
                _ => word,
            };

            let phonemes: Vec<&str> = fields
                .skip_while(|f| f.chars().all(|c| c.is_ascii_digit()))
                .collect();
            if phonemes.is_empty() {
                continue;
            }
            let count = phonemes
                .iter()
                .filter(|p| p.ends_with(|c: char| c.is_ascii_digit()))
                .count();

            syllables.entry(word.to_lowercase()).or_insert(count);
        }

        Self { syllables }
    }

    /// Syllables of an already lowercased word.
    pub fn syllables(&self, word: &str) -> Option<usize> {
        self.syllables.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }
}
