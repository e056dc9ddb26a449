//! First-match word lookup
//!
//! For every target word, finds the first chunk (in page, then block order)
//! whose normalized content contains the lowercased word. Each word is
//! searched independently, so one chunk may answer several words.
//!
//! Content normalization is deliberately narrow: lowercase, turn the
//! chunker's line break marker back into a space, then replace each
//! non-overlapping pair of spaces with one space in a single pass. A run of
//! three spaces therefore still contains two.

use std::sync::Arc;

use serde::Serialize;

use crate::document::{Chunk, WordMatch};

/// Normalize a target word for matching
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
}

/// Normalize chunk content for matching
pub fn normalize_content(content: &str) -> String {
    content.to_lowercase().replace('\n', " ").replace("  ", " ")
}

/// First chunk whose normalized content contains `word`
pub fn find_first<'a>(word: &str, chunks: &'a [Chunk]) -> Option<&'a Chunk> {
    let needle = normalize_word(word);
    chunks
        .iter()
        .find(|chunk| normalize_content(&chunk.content).contains(&needle))
}

/// Locate every word, one result slot per word in the given order
pub fn locate<'a, S: AsRef<str>>(words: &[S], chunks: &'a [Chunk]) -> Vec<Option<&'a Chunk>> {
    if words.is_empty() {
        return Vec::new();
    }

    let haystacks: Vec<String> = chunks.iter().map(|c| normalize_content(&c.content)).collect();

    words
        .iter()
        .map(|word| {
            let needle = normalize_word(word.as_ref());
            haystacks
                .iter()
                .position(|content| content.contains(&needle))
                .map(|idx| &chunks[idx])
        })
        .collect()
}

/// The ordered target word list, fixed at startup
#[derive(Debug, Clone, Default)]
pub struct TargetWords {
    words: Arc<[String]>,
}

impl TargetWords {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words: words.into(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Match result for a document's chunks
    ///
    /// An unknown document is just an empty chunk list: every slot is `None`.
    pub fn locate(&self, chunks: &[Chunk]) -> Vec<Option<Chunk>> {
        locate(self.as_slice(), chunks)
            .into_iter()
            .map(|found| found.cloned())
            .collect()
    }

    /// Match result paired with the words it answers
    pub fn matches(&self, chunks: &[Chunk]) -> Vec<WordMatch> {
        self.words
            .iter()
            .zip(locate(self.as_slice(), chunks))
            .map(|(word, found)| WordMatch {
                word: word.clone(),
                chunk: found.cloned(),
            })
            .collect()
    }
}

/// One target word across several documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub word: String,
    /// First matching chunk per document, in the requested document order
    pub chunks: Vec<Option<Chunk>>,
}

/// Side-by-side match table: one row per target word, one column per document
pub fn compare<S: AsRef<str>>(words: &[S], documents: &[&[Chunk]]) -> Vec<ComparisonRow> {
    let columns: Vec<Vec<Option<&Chunk>>> = documents
        .iter()
        .map(|chunks| locate(words, chunks))
        .collect();

    words
        .iter()
        .enumerate()
        .map(|(row, word)| ComparisonRow {
            word: word.as_ref().to_string(),
            chunks: columns.iter().map(|col| col[row].cloned()).collect(),
        })
        .collect()
}

impl From<Vec<String>> for TargetWords {
    fn from(words: Vec<String>) -> Self {
        Self::new(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BoundingBox;

    fn chunk(id: &str, content: &str, page_number: u32) -> Chunk {
        Chunk {
            content: content.to_string(),
            bbox: BoundingBox { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 },
            id: id.to_string(),
            page_number,
        }
    }

    fn sample() -> Vec<Chunk> {
        vec![
            chunk("c1", "Issuer Acme Corp senior notes", 1),
            chunk("c2", "the  Coupon rate is 5%", 1),
            chunk("c3", "coupon payable semi-annually", 2),
        ]
    }

    #[test]
    fn test_double_space_and_case_are_normalized() {
        let chunks = sample();
        let found = find_first("Coupon", &chunks).unwrap();
        assert_eq!(found.id, "c2");
        assert!(find_first("the coupon rate", &chunks).is_some());
    }

    #[test]
    fn test_missing_word_keeps_its_slot() {
        let chunks = sample();
        let result = locate(&["Coupon", "Maturity", "issuer"], &chunks);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].map(|c| c.id.as_str()), Some("c2"));
        assert!(result[1].is_none());
        assert_eq!(result[2].map(|c| c.id.as_str()), Some("c1"));
    }

    #[test]
    fn test_no_chunks_gives_all_none() {
        let words = TargetWords::new(vec!["a".into(), "b".into(), "c".into()]);
        let result = words.locate(&[]);
        assert_eq!(result, vec![None, None, None]);
    }

    #[test]
    fn test_empty_word_list() {
        let chunks = sample();
        let empty: [&str; 0] = [];
        assert!(locate(&empty, &chunks).is_empty());
        assert!(TargetWords::default().locate(&chunks).is_empty());
    }

    #[test]
    fn test_three_spaces_not_fully_collapsed() {
        assert_eq!(normalize_content("a   b"), "a  b");
        assert_eq!(normalize_content("a    b"), "a  b");

        let chunks = vec![chunk("c1", "coupon   rate", 1)];
        assert!(find_first("coupon rate", &chunks).is_none());
        assert!(find_first("coupon  rate", &chunks).is_some());
    }

    #[test]
    fn test_line_break_marker_is_a_space() {
        let chunks = vec![chunk("c1", "annual coupon\nrate of interest", 1)];
        assert!(find_first("Coupon Rate", &chunks).is_some());
    }

    #[test]
    fn test_same_chunk_answers_several_words() {
        let chunks = sample();
        let result = locate(&["rate", "coupon"], &chunks);
        assert_eq!(result[0].unwrap().id, "c2");
        assert_eq!(result[1].unwrap().id, "c2");
    }

    #[test]
    fn test_reordering_words_permutes_result() {
        let chunks = sample();
        let forward = locate(&["coupon", "maturity", "senior"], &chunks);
        let reversed = locate(&["senior", "maturity", "coupon"], &chunks);

        let ids = |r: &[Option<&Chunk>]| -> Vec<Option<String>> {
            r.iter().map(|c| c.map(|c| c.id.clone())).collect()
        };
        let mut expected = ids(&forward);
        expected.reverse();
        assert_eq!(ids(&reversed), expected);
    }

    #[test]
    fn test_deterministic() {
        let chunks = sample();
        let words = TargetWords::new(vec!["coupon".into(), "notes".into(), "x".into()]);
        assert_eq!(words.locate(&chunks), words.locate(&chunks));
    }

    #[test]
    fn test_matches_pairs_words() {
        let chunks = sample();
        let words = TargetWords::new(vec!["Semi-Annually".into(), "Maturity".into()]);
        let matches = words.matches(&chunks);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].word, "Semi-Annually");
        assert_eq!(matches[0].chunk.as_ref().unwrap().page_number, 2);
        assert!(matches[1].chunk.is_none());
    }

    #[test]
    fn test_compare_columns_follow_document_order() {
        let first = sample();
        let second = vec![chunk("d1", "Maturity date 2030", 1)];
        let rows = compare(&["coupon", "maturity"], &[first.as_slice(), &[], second.as_slice()]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].word, "coupon");
        assert_eq!(rows[0].chunks.len(), 3);
        assert_eq!(rows[0].chunks[0].as_ref().unwrap().id, "c2");
        assert!(rows[0].chunks[1].is_none());
        assert!(rows[0].chunks[2].is_none());
        assert!(rows[1].chunks[0].is_none());
        assert_eq!(rows[1].chunks[2].as_ref().unwrap().id, "d1");
    }

    #[test]
    fn test_target_words_from_vec() {
        let words = TargetWords::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(words.as_slice(), &["a".to_string(), "b".to_string()][..]);
        assert_eq!(words.len(), 2);
    }
}
