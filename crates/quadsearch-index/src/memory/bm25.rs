//! BM25 lexical scoring over an inverted index.
//!
//! - IDF: `ln(1 + (N - n + 0.5) / (n + 0.5))`, always positive
//! - term score: `IDF * tf * (k1 + 1) / (tf + k1 * (1 - b + b * len / avg_len))`

use std::collections::HashMap;

/// Tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation
    pub k1: f64,
    /// Length normalisation strength, 0..=1
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

/// Inverse document frequency of a term found in `doc_freq` of `total_docs`.
pub fn compute_idf(total_docs: usize, doc_freq: usize) -> f64 {
    let n = total_docs as f64;
    let df = doc_freq as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Contribution of one query term to one document's score.
pub fn compute_term_score(
    tf: f64,
    idf: f64,
    doc_len: f64,
    avg_doc_len: f64,
    params: &Bm25Params,
) -> f64 {
    let len_norm = if avg_doc_len > 0.0 {
        doc_len / avg_doc_len
    } else {
        1.0
    };
    let denominator = tf + params.k1 * (1.0 - params.b + params.b * len_norm);
    idf * (tf * (params.k1 + 1.0)) / denominator
}

/// Term postings and document lengths, keyed by document id.
#[derive(Debug, Default)]
pub struct LexicalIndex {
    /// term -> (doc id -> term frequency)
    postings: HashMap<String, HashMap<String, u32>>,
    /// doc id -> token count
    lengths: HashMap<String, usize>,
    total_len: usize,
}

impl LexicalIndex {
    /// Index a document's tokens. The id must not already be present.
    pub fn insert(&mut self, id: &str, tokens: &[String]) {
        for token in tokens {
            *self
                .postings
                .entry(token.clone())
                .or_default()
                .entry(id.to_string())
                .or_insert(0) += 1;
        }
        self.lengths.insert(id.to_string(), tokens.len());
        self.total_len += tokens.len();
    }

    /// Remove a document previously indexed with these tokens.
    pub fn remove(&mut self, id: &str, tokens: &[String]) {
        for token in tokens {
            if let Some(docs) = self.postings.get_mut(token) {
                docs.remove(id);
                if docs.is_empty() {
                    self.postings.remove(token);
                }
            }
        }
        if let Some(len) = self.lengths.remove(id) {
            self.total_len -= len;
        }
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.postings.clear();
        self.lengths.clear();
        self.total_len = 0;
    }

    /// BM25 score of every document matching at least one query term.
    pub fn score(&self, query_terms: &[String], params: &Bm25Params) -> HashMap<String, f64> {
        let mut scores = HashMap::new();
        let total_docs = self.lengths.len();
        if total_docs == 0 {
            return scores;
        }
        let avg_doc_len = self.total_len as f64 / total_docs as f64;

        let mut seen = Vec::with_capacity(query_terms.len());
        for term in query_terms {
            if seen.contains(&term) {
                continue;
            }
            seen.push(term);

            let Some(docs) = self.postings.get(term) else {
                continue;
            };
            let idf = compute_idf(total_docs, docs.len());

            for (id, tf) in docs {
                let doc_len = self.lengths.get(id).copied().unwrap_or_default() as f64;
                let contribution =
                    compute_term_score(*tf as f64, idf, doc_len, avg_doc_len, params);
                *scores.entry(id.clone()).or_insert(0.0) += contribution;
            }
        }
        scores
    }
}
