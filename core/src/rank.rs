use crate::corpus::{Corpus, VideoRecord};
use crate::vectorizer::{SparseVector, TfidfVectorizer, VectorizerOptions};
use serde::Serialize;
use std::cmp::Ordering;

/// One entry of the JSON recommendation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub views: String,
    pub image_url: String,
}

impl From<&VideoRecord> for Recommendation {
    fn from(r: &VideoRecord) -> Self {
        Recommendation {
            id: r.id.clone(),
            title: r.title.clone(),
            channel_name: r.channel_name.clone(),
            views: format_views(r.view_count),
            image_url: thumbnail_url(&r.id),
        }
    }
}

pub fn thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/hqdefault.jpg")
}

/// `1234567` -> `"1,234,567"`, unknown -> `"N/A"`.
pub fn format_views(views: Option<u64>) -> String {
    let Some(v) = views else { return "N/A".to_string() };
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Corpus plus its fitted tf-idf model and document matrix.
#[derive(Debug, Clone)]
pub struct Recommender {
    corpus: Corpus,
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
}

impl Recommender {
    pub fn fit(corpus: Corpus, options: VectorizerOptions) -> Self {
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&corpus.combined_features(), options);
        tracing::info!(rows = corpus.len(), terms = vectorizer.vocabulary_len(), "tf-idf matrix computed");
        Self { corpus, vectorizer, matrix }
    }

    /// Cosine similarity of the keyword query against every row, in row order.
    pub fn scores(&self, keywords: &str) -> Vec<f64> {
        let query = self.vectorizer.transform(keywords);
        self.matrix.iter().map(|row| query.cosine(row)).collect()
    }

    /// Row indices of the `n` best matches. Equal scores keep corpus order.
    pub fn top_indices(&self, keywords: &str, n: usize) -> Vec<usize> {
        let scores = self.scores(keywords);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
        order.truncate(n);
        order
    }

    pub fn recommend(&self, keywords: &str, n: usize) -> Vec<Recommendation> {
        self.top_indices(keywords, n)
            .into_iter()
            .filter_map(|idx| self.corpus.get(idx))
            .map(Recommendation::from)
            .collect()
    }
}
