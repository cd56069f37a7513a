use crate::error::{Error, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the cleaned video dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub channel_name: String,
    pub view_count: Option<u64>,
}

impl VideoRecord {
    /// Text the vectorizer sees for this record.
    pub fn combined_features(&self) -> String {
        format!("{} {}", self.title, self.channel_name)
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "channelName", default)]
    channel_name: Option<String>,
    #[serde(rename = "viewCount", default)]
    view_count: Option<String>,
}

impl From<CsvRow> for VideoRecord {
    fn from(row: CsvRow) -> Self {
        VideoRecord {
            id: row.id,
            title: row.title.unwrap_or_default(),
            channel_name: row.channel_name.unwrap_or_default(),
            view_count: row.view_count.as_deref().and_then(parse_view_count),
        }
    }
}

/// Accepts `1234` as well as float renderings such as `1234.0`.
pub fn parse_view_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Some(v as u64),
        _ => None,
    }
}

/// Row-ordered video records. Row index is the join key into the tf-idf matrix.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<VideoRecord>,
}

impl Corpus {
    pub fn new(records: Vec<VideoRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| Error::data_load(&label, e))?;
        Self::from_reader(file).map_err(|e| match e {
            Error::DataLoad { reason, .. } => Error::data_load(label, reason),
            other => other,
        })
    }

    /// Parse a UTF-8 CSV with `id`, `title` and `channelName` columns.
    /// Missing trailing cells read as empty; rows wider than the header are an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers().map_err(|e| Error::data_load("<reader>", e))?.clone();
        if headers.is_empty() {
            return Err(Error::data_load("<reader>", "no header row"));
        }
        for required in ["id", "title", "channelName"] {
            if !headers.iter().any(|h| h == required) {
                return Err(Error::data_load("<reader>", format!("missing column {required}")));
            }
        }
        let mut records = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| Error::data_load("<reader>", e))?;
            if record.len() > headers.len() {
                let line = record.position().map_or(0, |p| p.line());
                return Err(Error::data_load(
                    "<reader>",
                    format!("expected {} fields on line {line}, saw {}", headers.len(), record.len()),
                ));
            }
            let row: CsvRow = record.deserialize(Some(&headers)).map_err(|e| Error::data_load("<reader>", e))?;
            records.push(VideoRecord::from(row));
        }
        Ok(Self { records })
    }

    pub fn get(&self, idx: usize) -> Option<&VideoRecord> {
        self.records.get(idx)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn combined_features(&self) -> Vec<String> {
        self.records.iter().map(VideoRecord::combined_features).collect()
    }
}

/// Outcome of loading the dataset at startup.
#[derive(Debug, Clone)]
pub enum CorpusStatus {
    Loaded(Corpus),
    Unavailable(String),
}

impl CorpusStatus {
    /// Fail-soft load: any error is logged and reported as `Unavailable`.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        match Corpus::from_path(path.as_ref()) {
            Ok(corpus) => {
                tracing::info!(rows = corpus.len(), path = %path.as_ref().display(), "dataset loaded");
                CorpusStatus::Loaded(corpus)
            }
            Err(e) => {
                tracing::error!(error = %e, "dataset unavailable");
                CorpusStatus::Unavailable(e.to_string())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CorpusStatus::Loaded(_))
    }
}
