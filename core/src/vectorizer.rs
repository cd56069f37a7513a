use crate::tokenizer::{tokenize, tokenize_stemmed};
use crate::MAX_FEATURES;
use std::collections::{BTreeMap, HashMap};

pub type TermId = u32;

#[derive(Debug, Clone, Copy)]
pub struct VectorizerOptions {
    /// Keep at most this many terms, ranked by total corpus count.
    pub max_features: usize,
    /// Apply English stemming to terms before counting.
    pub stem: bool,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self { max_features: MAX_FEATURES, stem: false }
    }
}

/// L2-normalized sparse vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0f64;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    /// Cosine of the angle between two vectors; 0 when either is all-zero.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

/// TF-IDF model fitted once over a corpus. Immutable after [`TfidfVectorizer::fit_transform`].
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    options: VectorizerOptions,
    vocabulary: HashMap<String, TermId>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and idf weights, returning the model and the
    /// document-term matrix (one normalized row per document, in input order).
    pub fn fit_transform<S: AsRef<str>>(docs: &[S], options: VectorizerOptions) -> (Self, Vec<SparseVector>) {
        let analyzed: Vec<Vec<String>> = docs.iter().map(|d| analyze(d.as_ref(), options.stem)).collect();

        // term -> (total count, document frequency), lexicographic order
        let mut stats: BTreeMap<&str, (u64, u32)> = BTreeMap::new();
        for terms in &analyzed {
            let mut seen: Vec<&str> = Vec::new();
            for term in terms {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                if !seen.contains(&term.as_str()) {
                    entry.1 += 1;
                    seen.push(term.as_str());
                }
            }
        }

        let mut kept: Vec<(&str, (u64, u32))> = stats.into_iter().collect();
        if kept.len() > options.max_features {
            // stable sort keeps lexicographic order among equal counts
            kept.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
            kept.truncate(options.max_features);
            kept.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n = analyzed.len() as f64;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (tid, (term, (_, df))) in kept.iter().enumerate() {
            vocabulary.insert(term.to_string(), tid as TermId);
            idf.push(((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0);
        }
        tracing::debug!(terms = vocabulary.len(), docs = analyzed.len(), "vocabulary fitted");

        let model = Self { options, vocabulary, idf };
        let matrix = analyzed.iter().map(|terms| model.weigh(terms)).collect();
        (model, matrix)
    }

    /// Project text into the fitted space. Unknown terms are ignored, so the
    /// result may be all-zero.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text, self.options.stem))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.vocabulary.get(term).copied()
    }

    fn weigh(&self, terms: &[String]) -> SparseVector {
        let mut tf: BTreeMap<TermId, u32> = BTreeMap::new();
        for term in terms {
            if let Some(&tid) = self.vocabulary.get(term) {
                *tf.entry(tid).or_insert(0) += 1;
            }
        }
        let mut vector = SparseVector {
            entries: tf
                .into_iter()
                .map(|(tid, count)| (tid, count as f64 * self.idf[tid as usize]))
                .collect(),
        };
        let norm = vector.norm();
        if norm > 0.0 {
            for (_, w) in vector.entries.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }
}

fn analyze(text: &str, stem: bool) -> Vec<String> {
    if stem {
        tokenize_stemmed(text)
    } else {
        tokenize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_normalized() {
        let docs = ["cocomelon nursery rhymes", "cooking cheftv"];
        let (_, matrix) = TfidfVectorizer::fit_transform(&docs, VectorizerOptions::default());
        for row in &matrix {
            assert!((row.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn vocabulary_is_capped_by_total_count() {
        let docs = ["kids kids kids", "songs songs", "abc zebra"];
        let opts = VectorizerOptions { max_features: 2, stem: false };
        let (model, _) = TfidfVectorizer::fit_transform(&docs, opts);
        assert_eq!(model.vocabulary_len(), 2);
        assert_eq!(model.term_id("kids"), Some(0));
        assert_eq!(model.term_id("songs"), Some(1));
        assert_eq!(model.term_id("zebra"), None);
    }

    #[test]
    fn ties_at_the_cap_prefer_lexicographic_order() {
        let docs = ["zebra abc", "moose"];
        let opts = VectorizerOptions { max_features: 2, stem: false };
        let (model, _) = TfidfVectorizer::fit_transform(&docs, opts);
        assert!(model.term_id("abc").is_some());
        assert!(model.term_id("moose").is_some());
        assert!(model.term_id("zebra").is_none());
    }

    #[test]
    fn stemming_merges_inflections() {
        let docs = ["abc song", "cooking"];
        let opts = VectorizerOptions { stem: true, ..VectorizerOptions::default() };
        let (model, matrix) = TfidfVectorizer::fit_transform(&docs, opts);
        let q = model.transform("abc songs");
        assert!((q.cosine(&matrix[0]) - 1.0).abs() < 1e-9);

        let (plain, plain_matrix) = TfidfVectorizer::fit_transform(&docs, VectorizerOptions::default());
        assert!(plain.transform("abc songs").cosine(&plain_matrix[0]) < 1.0 - 1e-9);
    }

    #[test]
    fn unseen_terms_give_zero_vector() {
        let (model, matrix) = TfidfVectorizer::fit_transform(&["nursery rhymes"], VectorizerOptions::default());
        let q = model.transform("completely unrelated");
        assert!(q.is_zero());
        assert_eq!(q.cosine(&matrix[0]), 0.0);
    }

    #[test]
    fn smooth_idf_weights_rare_terms_higher() {
        let docs = ["kids song", "kids dance"];
        let (model, _) = TfidfVectorizer::fit_transform(&docs, VectorizerOptions::default());
        let v = model.transform("kids song");
        let kids = v.entries.iter().find(|(t, _)| Some(*t) == model.term_id("kids")).map(|e| e.1).unwrap();
        let song = v.entries.iter().find(|(t, _)| Some(*t) == model.term_id("song")).map(|e| e.1).unwrap();
        assert!(song > kids);
    }
}
