//! Sparse term-weight vectors and cosine similarity

use std::collections::HashMap;

/// Sparse TF-IDF vector. A term absent from the map carries an implicit
/// weight of zero; a vector with no non-zero terms is the empty map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TfIdfVector {
    weights: HashMap<String, f64>,
}

impl TfIdfVector {
    /// Build an augmented-frequency TF-IDF vector for one token sequence.
    ///
    /// Term frequency is normalized by the sequence's maximum term frequency
    /// as `0.5 + 0.5 * (tf / max_tf)`, then multiplied by the term's IDF.
    /// Terms missing from the IDF table, or whose weight works out to zero,
    /// are omitted.
    pub fn build(tokens: &[String], idf: &HashMap<String, f64>) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let Some(max_tf) = counts.values().copied().max() else {
            return Self::default();
        };

        let mut weights = HashMap::new();
        for (term, freq) in counts {
            let idf_weight = idf.get(term).copied().unwrap_or(0.0);
            let weight = (0.5 + 0.5 * (freq as f64 / max_tf as f64)) * idf_weight;
            if weight != 0.0 {
                weights.insert(term.to_string(), weight);
            }
        }

        Self { weights }
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    /// Cosine similarity: dot product over the intersection of non-zero
    /// terms, divided by the product of Euclidean norms. Zero when either
    /// vector has zero magnitude.
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        if self.weights.is_empty() || other.weights.is_empty() {
            return 0.0;
        }

        let dot: f64 = self
            .weights
            .iter()
            .filter_map(|(term, weight)| other.weights.get(term).map(|w| weight * w))
            .sum();

        let denominator = self.magnitude() * other.magnitude();
        if denominator == 0.0 {
            0.0
        } else {
            dot / denominator
        }
    }
}
