//! Candidate collection and similarity ranking.

use crate::access::PdfAccess;
use crate::error::{Error, Result};
use crate::model::{PageBlockText, ScoredBlock};

use super::embed::{cosine_similarity, Embedder};

/// Number of sections reported by default.
pub const TOP_K: usize = 5;

/// Collect one candidate block per non-empty page of a document.
///
/// Page text is trimmed and newlines are collapsed to spaces; pages with no
/// text are skipped entirely.
pub fn collect_page_blocks(access: &dyn PdfAccess, document: &str) -> Result<Vec<PageBlockText>> {
    let mut blocks = Vec::new();

    for page in 1..=access.page_count() {
        let text = access.page_text(page)?;
        let text = text.trim().replace('\n', " ");
        if text.is_empty() {
            continue;
        }
        blocks.push(PageBlockText {
            document: document.to_string(),
            page_number: page,
            text,
        });
    }

    Ok(blocks)
}

/// Rank pooled candidate blocks against a query.
///
/// All texts plus the query go through one `embed` call. Returns the top
/// `top_k` blocks by descending cosine similarity; ties keep the pooled
/// order, which is document listing order then page order.
pub fn rank_blocks(
    embedder: &dyn Embedder,
    query: &str,
    blocks: Vec<PageBlockText>,
    top_k: usize,
) -> Result<Vec<ScoredBlock>> {
    if blocks.is_empty() || top_k == 0 {
        return Ok(Vec::new());
    }

    let mut texts: Vec<String> = blocks.iter().map(|b| b.text.clone()).collect();
    texts.push(query.to_string());

    let vectors = embedder.embed(&texts)?;
    let (query_vec, block_vecs) = vectors
        .split_last()
        .ok_or_else(|| Error::Embedding("embedder returned no vectors".to_string()))?;

    let mut scored: Vec<ScoredBlock> = blocks
        .into_iter()
        .zip(block_vecs)
        .map(|(block, vec)| ScoredBlock {
            score: cosine_similarity(query_vec, vec),
            block,
        })
        .collect();

    // Stable sort keeps pooled order on ties
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(top_k);

    log::debug!("ranked {} blocks, kept {}", block_vecs.len(), scored.len());
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, TextBlock};

    struct PagesAccess {
        pages: Vec<&'static str>,
    }

    impl PdfAccess for PagesAccess {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }
        fn page_blocks(&self, _page: u32) -> Result<Vec<TextBlock>> {
            Ok(vec![])
        }
        fn page_tables(&self, _page: u32) -> Result<Vec<BBox>> {
            Ok(vec![])
        }
        fn page_text(&self, page: u32) -> Result<String> {
            Ok(self.pages[(page - 1) as usize].to_string())
        }
    }

    /// Scores each text by its length; deterministic and transparent.
    struct LengthEmbedder;

    impl Embedder for LengthEmbedder {
        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }
        fn dimension(&self) -> usize {
            2
        }
    }

    fn block(doc: &str, page: u32, text: &str) -> PageBlockText {
        PageBlockText {
            document: doc.to_string(),
            page_number: page,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_collect_skips_empty_pages() {
        let access = PagesAccess {
            pages: vec!["First page\ntext", "   ", "Third page"],
        };
        let blocks = collect_page_blocks(&access, "doc.pdf").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].page_number, 1);
        assert_eq!(blocks[0].text, "First page text");
        assert_eq!(blocks[1].page_number, 3);
    }

    #[test]
    fn test_rank_empty_pool() {
        let ranked = rank_blocks(&LengthEmbedder, "query", vec![], TOP_K).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_truncates_to_top_k() {
        let blocks: Vec<_> = (1..=8)
            .map(|i| block("a.pdf", i, &"x".repeat(i as usize * 10)))
            .collect();
        let ranked = rank_blocks(&LengthEmbedder, "q", blocks, 5).unwrap();
        assert_eq!(ranked.len(), 5);
        // Longest texts score highest under the length embedder
        assert_eq!(ranked[0].block.page_number, 8);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_keeps_all_when_fewer_than_k() {
        let blocks = vec![block("a.pdf", 1, "short"), block("a.pdf", 2, "a bit longer")];
        let ranked = rank_blocks(&LengthEmbedder, "q", blocks, 5).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_rank_ties_keep_pool_order() {
        // Identical texts embed identically, so scores tie exactly
        let blocks = vec![
            block("a.pdf", 1, "same text"),
            block("b.pdf", 1, "same text"),
            block("c.pdf", 1, "same text"),
        ];
        let ranked = rank_blocks(&LengthEmbedder, "q", blocks, 3).unwrap();
        let docs: Vec<&str> = ranked.iter().map(|s| s.block.document.as_str()).collect();
        assert_eq!(docs, ["a.pdf", "b.pdf", "c.pdf"]);
    }
}
