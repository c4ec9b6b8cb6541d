//! Separator-based chunking with overlap.

pub const DEFAULT_SEPARATOR: &str = "\n";
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

#[derive(Debug, Clone)]
pub struct TextSplitter {
    separator: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl TextSplitter {
    pub fn new(separator: impl Into<String>, chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separator: separator.into(),
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size),
        }
    }

    /// Split on the separator, then greedily merge pieces into chunks of at
    /// most `chunk_size` characters. Each new chunk starts with trailing
    /// pieces of the previous one, up to `chunk_overlap` characters.
    ///
    /// A single piece longer than `chunk_size` becomes its own chunk.
    pub fn split(&self, text: &str) -> Vec<String> {
        let sep_len = self.separator.chars().count();
        let pieces: Vec<&str> = text
            .split(self.separator.as_str())
            .filter(|p| !p.is_empty())
            .collect();

        let mut chunks = Vec::new();
        let mut window: Vec<(&str, usize)> = Vec::new();
        let mut total = 0usize;

        // length of the window joined by separators, plus `extra`
        let joined_len = |total: usize, count: usize, extra: usize| {
            let seps = if count > 0 { sep_len } else { 0 };
            total + extra + seps
        };

        for piece in pieces {
            let len = piece.chars().count();

            if !window.is_empty() && joined_len(total, window.len(), len) > self.chunk_size {
                if total > self.chunk_size {
                    tracing::warn!(
                        "Created a chunk of size {}, longer than {}",
                        total,
                        self.chunk_size
                    );
                }
                self.push_chunk(&mut chunks, &window);

                while total > self.chunk_overlap
                    || (total > 0 && joined_len(total, window.len(), len) > self.chunk_size)
                {
                    let (_, first_len) = window.remove(0);
                    total -= first_len + if window.is_empty() { 0 } else { sep_len };
                }
            }

            total += len + if window.is_empty() { 0 } else { sep_len };
            window.push((piece, len));
        }

        self.push_chunk(&mut chunks, &window);
        chunks
    }

    fn push_chunk(&self, chunks: &mut Vec<String>, window: &[(&str, usize)]) {
        let joined = window
            .iter()
            .map(|(piece, _)| *piece)
            .collect::<Vec<_>>()
            .join(&self.separator);
        let trimmed = joined.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = TextSplitter::default().split("line one\nline two\n\nline three");
        assert_eq!(chunks, vec!["line one\nline two\nline three"]);
    }

    #[test]
    fn test_chunks_respect_size_and_overlap() {
        let splitter = TextSplitter::new("\n", 10, 4);
        let chunks = splitter.split("aaaa\nbbbb\ncccc\ndddd");
        assert_eq!(chunks, vec!["aaaa\nbbbb", "bbbb\ncccc", "cccc\ndddd"]);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 10);
        }
    }

    #[test]
    fn test_no_overlap() {
        let splitter = TextSplitter::new("\n", 9, 0);
        let chunks = splitter.split("aaaa\nbbbb\ncccc");
        assert_eq!(chunks, vec!["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn test_oversized_piece_is_kept_whole() {
        let splitter = TextSplitter::new("\n", 5, 0);
        let chunks = splitter.split("ab\nabcdefghij\ncd");
        assert_eq!(chunks, vec!["ab", "abcdefghij", "cd"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(TextSplitter::default().split("").is_empty());
        assert!(TextSplitter::default().split("\n\n").is_empty());
    }
}
