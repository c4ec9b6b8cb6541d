use super::{Embedder, LlmError};

/// Chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 4;

/// Brute-force cosine index over a handful of chunks.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    entries: Vec<(String, Vec<f32>)>,
}

impl VectorStore {
    pub async fn from_texts(texts: Vec<String>, embedder: &dyn Embedder) -> Result<Self, LlmError> {
        if texts.is_empty() {
            return Ok(Self::default());
        }
        let vectors = embedder.embed(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(LlmError::InvalidResponse(format!(
                "{} returned {} embeddings for {} texts",
                embedder.name(),
                vectors.len(),
                texts.len()
            )));
        }
        tracing::debug!("Indexed {} chunks", texts.len());
        Ok(Self {
            entries: texts.into_iter().zip(vectors).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `k` chunks, most similar first. Ties keep insertion order.
    pub fn most_similar(&self, query: &[f32], k: usize) -> Vec<&str> {
        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (_, v))| (i, cosine_similarity(query, v)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(k)
            .map(|(i, _)| self.entries[i].0.as_str())
            .collect()
    }

    /// Embed `query` and return the `k` closest chunks.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
        embedder: &dyn Embedder,
    ) -> Result<Vec<&str>, LlmError> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("empty embedding response".to_string()))?;
        Ok(self.most_similar(&query_vector, k))
    }
}

/// Cosine of the angle between `a` and `b`; 0 when either is a zero vector.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
