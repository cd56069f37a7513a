pub mod corpus;
pub mod dedup;
pub mod error;
pub mod rank;
pub mod tokenizer;
pub mod vectorizer;

pub use corpus::{Corpus, CorpusStatus, VideoRecord};
pub use dedup::{dedup_file, DedupReport, Encoding};
pub use error::{Error, Result};
pub use rank::{Recommendation, Recommender};
pub use vectorizer::{SparseVector, TfidfVectorizer, VectorizerOptions};

/// Curated keyword query used for the homepage recommendation set.
pub const DEFAULT_KEYWORDS: &str = "kids cartoons, nursery rhymes, cocomelon, peppa pig, \
children songs, educational videos for toddlers, kids learning videos, \
baby songs, cartoon for kids, abc songs for kids, numbers song for children, \
learning alphabets for kids, phonics songs, bedtime stories for children, \
animated stories for kids, kids educational shows, toddler songs, \
kids dance songs, kindergarten learning videos, preschool learning videos";

/// Number of recommendations returned per request.
pub const TOP_N: usize = 10;

/// Upper bound on the fitted vocabulary size.
pub const MAX_FEATURES: usize = 5000;
