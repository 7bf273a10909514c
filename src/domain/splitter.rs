use crate::domain::{Chunk, Document};

/// Splits document text into overlapping, bounded-size chunks.
///
/// Boundaries prefer a paragraph break, then a line break, then a word
/// break inside the size window before falling back to a hard cut.
/// Consecutive chunks from the same document share up to `chunk_overlap`
/// bytes of content, and every chunk records its byte offset in the source.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            // overlap must leave room for forward progress
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Splits a document into chunks carrying its source identifier.
    ///
    /// A blank document yields no chunks.
    pub fn split_document(&self, doc: &Document) -> Vec<Chunk> {
        self.split(&doc.content)
            .into_iter()
            .map(|(start, piece)| Chunk::new(&doc.source, piece, start))
            .collect()
    }

    fn split(&self, text: &str) -> Vec<(usize, String)> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let len = text.len();
        let mut pieces = Vec::new();
        let mut start = 0;

        while start < len {
            let window_end = self.window_end(text, start);
            let end = if window_end >= len {
                len
            } else {
                self.breakpoint(text, start, window_end)
            };

            pieces.push((start, text[start..end].to_string()));

            if end >= len {
                break;
            }

            let mut next = floor_char_boundary(text, end.saturating_sub(self.chunk_overlap));
            if next <= start {
                next = end;
            }
            start = next;
        }

        pieces
    }

    fn window_end(&self, text: &str, start: usize) -> usize {
        let len = text.len();
        let capped = (start + self.chunk_size).min(len);
        if capped >= len {
            return len;
        }
        let aligned = floor_char_boundary(text, capped);
        if aligned > start {
            aligned
        } else {
            // a single char wider than the window still has to fit somewhere
            next_char_boundary(text, start + 1)
        }
    }

    fn breakpoint(&self, text: &str, start: usize, window_end: usize) -> usize {
        let window = &text[start..window_end];
        for (sep, width) in [("\n\n", 2), ("\n", 1), (" ", 1)] {
            if let Some(i) = window.rfind(sep) {
                if i > 0 {
                    return start + i + width;
                }
            }
        }
        window_end
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 200)
    }
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn next_char_boundary(text: &str, mut idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_text(splitter: &TextSplitter, text: &str) -> Vec<(usize, String)> {
        splitter.split(text)
    }

    #[test]
    fn test_short_document_single_chunk() {
        let splitter = TextSplitter::default();
        let pieces = split_text(&splitter, "The sky is blue. The grass is green.");

        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].0, 0);
        assert_eq!(pieces[0].1, "The sky is blue. The grass is green.");
    }

    #[test]
    fn test_blank_document_yields_nothing() {
        let splitter = TextSplitter::default();
        assert!(split_text(&splitter, "").is_empty());
        assert!(split_text(&splitter, "   \n\n  \t ").is_empty());
    }

    #[test]
    fn test_no_chunk_exceeds_max_size() {
        let splitter = TextSplitter::new(50, 10);
        let text = "one two three four five six seven eight nine ten eleven twelve ".repeat(8);
        let pieces = split_text(&splitter, &text);

        assert!(pieces.len() > 1);
        for (_, piece) in &pieces {
            assert!(piece.len() <= 50, "chunk too large: {}", piece.len());
            assert!(!piece.is_empty());
        }
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let splitter = TextSplitter::new(40, 0);
        let text = "First paragraph here.\n\nSecond paragraph that keeps going for a while.";
        let pieces = split_text(&splitter, text);

        assert!(pieces[0].1.starts_with("First paragraph here."));
        assert!(pieces[0].1.ends_with("\n\n"));
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let splitter = TextSplitter::new(50, 10);
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu nu xi";
        let pieces = split_text(&splitter, text);

        assert!(pieces.len() > 1);
        for pair in pieces.windows(2) {
            let (prev_start, prev) = (&pair[0].0, &pair[0].1);
            let (next_start, _) = (&pair[1].0, &pair[1].1);
            let prev_end = prev_start + prev.len();
            assert!(*next_start < prev_end, "chunks must overlap or abut");
        }
    }

    #[test]
    fn test_spans_cover_whole_document() {
        let splitter = TextSplitter::new(30, 8);
        let text = "Rust is a systems language.\nIt is fast.\n\nIt is also safe. \
                    Fearless concurrency is the slogan everyone quotes."
            .to_string();
        let pieces = split_text(&splitter, &text);

        assert_eq!(pieces[0].0, 0);
        let mut covered = 0;
        for (start, piece) in &pieces {
            // every chunk is a literal slice of the source at its offset
            assert_eq!(&text[*start..*start + piece.len()], piece);
            assert!(*start <= covered, "gap before offset {start}");
            covered = covered.max(start + piece.len());
        }
        assert_eq!(covered, text.len());
    }

    #[test]
    fn test_multibyte_text_stays_on_char_boundaries() {
        let splitter = TextSplitter::new(10, 3);
        let text = "héllö wörld ünïcödé ev\u{00e9}rywhere";
        let pieces = split_text(&splitter, text);

        for (start, piece) in &pieces {
            assert!(text.is_char_boundary(*start));
            assert_eq!(&text[*start..*start + piece.len()], piece);
        }
    }

    #[test]
    fn test_split_document_carries_source_and_offset() {
        let splitter = TextSplitter::new(30, 5);
        let doc = Document::new("notes.txt", "A first line of text.\nA second line of text here.");
        let chunks = splitter.split_document(&doc);

        assert!(!chunks.is_empty());
        assert_eq!(chunks[0].start_offset, 0);
        for chunk in &chunks {
            assert_eq!(chunk.source, "notes.txt");
        }
    }
}
