//! Text embedding.
//!
//! The ranking pipeline only needs a vector per text plus cosine
//! similarity, so the embedder sits behind a trait. The built-in
//! implementation hashes character n-grams into a fixed number of buckets;
//! it is fully deterministic and runs offline with no model files.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Maps texts to fixed-dimension vectors.
pub trait Embedder {
    /// Embed every text in one call. The output has one vector per input,
    /// in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Dimension of the produced vectors.
    fn dimension(&self) -> usize;
}

/// Hashed character n-gram embedder.
///
/// Lowercases the text, slides n-gram windows over its characters, hashes
/// each n-gram into one of `dimension` buckets, and L2-normalizes the bucket
/// counts. Texts sharing character n-grams land close in cosine space.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    ngram_sizes: Vec<usize>,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self {
            dimension: 256,
            ngram_sizes: vec![2, 3, 4],
        }
    }
}

impl HashEmbedder {
    /// Create an embedder with a custom dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];
        let chars: Vec<char> = text.to_lowercase().chars().collect();

        for &n in &self.ngram_sizes {
            if chars.len() < n {
                continue;
            }
            for window in chars.windows(n) {
                let mut hasher = DefaultHasher::new();
                window.hash(&mut hasher);
                let bucket = (hasher.finish() % self.dimension as u64) as usize;
                vector[bucket] += 1.0;
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.dimension == 0 {
            return Err(Error::Embedding("dimension must be non-zero".to_string()));
        }
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Cosine similarity of two vectors. Zero-norm vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_deterministic() {
        let e = HashEmbedder::default();
        let texts = vec!["travel planning in the south of France".to_string()];
        let a = e.embed(&texts).unwrap();
        let b = e.embed(&texts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_embed_dimensions() {
        let e = HashEmbedder::with_dimension(64);
        let out = e
            .embed(&["one".to_string(), "two".to_string()])
            .unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.len() == 64));
        assert_eq!(e.dimension(), 64);
    }

    #[test]
    fn test_embed_normalized() {
        let e = HashEmbedder::default();
        let out = e.embed(&["some reasonable text".to_string()]).unwrap();
        let norm: f32 = out[0].iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_similar_texts_score_higher() {
        let e = HashEmbedder::default();
        let out = e
            .embed(&[
                "itinerary for a coastal trip with hotels".to_string(),
                "hotel itinerary for a trip along the coast".to_string(),
                "thermodynamic properties of ideal gases".to_string(),
            ])
            .unwrap();
        let near = cosine_similarity(&out[0], &out[1]);
        let far = cosine_similarity(&out[0], &out[2]);
        assert!(near > far, "near={} far={}", near, far);
    }

    #[test]
    fn test_cosine_identity_and_zero() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(&v, &[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let e = HashEmbedder::default();
        let out = e.embed(&[String::new()]).unwrap();
        assert!(out[0].iter().all(|v| *v == 0.0));
    }
}
