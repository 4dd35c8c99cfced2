//! Persona-driven relevance ranking pipeline.
//!
//! Pools one text block per non-empty page across a set of documents,
//! embeds them together with a persona/task query, and reports the top
//! sections by cosine similarity.

mod embed;
mod ranker;
mod report;

pub use embed::{cosine_similarity, Embedder, HashEmbedder};
pub use ranker::{collect_page_blocks, rank_blocks, TOP_K};
pub use report::build_report;
