use crate::error::{Error, Result};
use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Text encoding of the raw input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn decode(&self, bytes: &[u8]) -> io::Result<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            // every byte maps to the code point of the same value
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Ok(Encoding::Latin1),
            other => Err(format!("unsupported encoding: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupReport {
    pub rows_read: usize,
    pub rows_written: usize,
}

impl DedupReport {
    pub fn duplicates_removed(&self) -> usize {
        self.rows_read - self.rows_written
    }
}

/// Drop rows identical to an earlier row (all columns), keeping header and
/// first-occurrence order. Short rows are padded with empty cells to the
/// header width; rows wider than the header are rejected. Output is UTF-8 CSV.
pub fn dedup_csv(text: &str) -> io::Result<(Vec<u8>, DedupReport)> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
    let mut wtr = csv::Writer::from_writer(Vec::new());
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "no columns to parse from file"));
    }
    wtr.write_record(&headers)?;

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut report = DedupReport { rows_read: 0, rows_written: 0 };
    for record in rdr.records() {
        let record = record?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected {} fields on line {line}, saw {}", headers.len(), record.len()),
            ));
        }
        report.rows_read += 1;
        let mut row: Vec<String> = record.iter().map(str::to_owned).collect();
        row.resize(headers.len(), String::new());
        if !seen.contains(&row) {
            wtr.write_record(&row)?;
            seen.insert(row);
            report.rows_written += 1;
        }
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok((bytes, report))
}

/// Deduplicate `source` into `dest`. Nothing is written unless the whole
/// source decodes and parses.
pub fn dedup_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q, encoding: Encoding) -> Result<DedupReport> {
    let source = source.as_ref();
    let dest = dest.as_ref();
    let src_label = source.display().to_string();
    let bytes = std::fs::read(source).map_err(|e| Error::io(&src_label, e))?;
    let text = encoding.decode(&bytes).map_err(|e| Error::io(&src_label, e))?;
    let (out, report) = dedup_csv(&text).map_err(|e| Error::io(&src_label, e))?;
    std::fs::write(dest, out).map_err(|e| Error::io(dest.display().to_string(), e))?;
    tracing::info!(rows_read = report.rows_read, rows_written = report.rows_written, dest = %dest.display(), "duplicates removed");
    Ok(report)
}
