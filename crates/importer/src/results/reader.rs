use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ByteRecord;
use storage::models::FinishTime;
use thiserror::Error;
use tracing::debug;

use crate::Result;

/// One line of a results file, fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// 1-based physical line, counting the header and blank lines.
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    pub header_skipped: bool,
    pub rows: Vec<CsvRow>,
}

/// Reads every line of a `<cpf>,<HH:MM:SS>` results file.
///
/// The first line is taken as a header, and dropped, when it has fewer
/// than two fields or its second field is not a valid finish time. A broken
/// first data row is therefore skipped silently, like a header would be.
/// Each physical line is one row: a blank line in the body comes back with
/// no fields, so it is rejected as malformed on its own line number. Bytes
/// that are not UTF-8 are replaced rather than failing the file.
pub fn read_rows<R: Read>(mut source: R) -> Result<CsvRows> {
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;

    let mut parsed = CsvRows::default();

    for (index, raw) in physical_lines(&contents).into_iter().enumerate() {
        let line = index + 1;
        let fields = parse_line(raw, line == 1)?;

        if line == 1 && looks_like_header(&fields) {
            debug!("Skipping header row: {:?}", fields);
            parsed.header_skipped = true;
            continue;
        }

        parsed.rows.push(CsvRow { line, fields });
    }

    Ok(parsed)
}

// The csv reader drops blank lines, so lines are split here and each one is
// parsed on its own. A single trailing newline does not open a new line.
fn physical_lines(contents: &[u8]) -> Vec<&[u8]> {
    let body = contents.strip_suffix(b"\n").unwrap_or(contents);
    if body.is_empty() {
        return Vec::new();
    }

    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

fn parse_line(raw: &[u8], first: bool) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw);

    let mut record = ByteRecord::new();
    if !reader.read_byte_record(&mut record)? {
        return Ok(Vec::new());
    }

    Ok(decode(&record, first))
}

fn decode(record: &ByteRecord, first: bool) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let decoded = String::from_utf8_lossy(raw);
            let mut field: &str = &decoded;
            if first && i == 0 {
                field = field.trim_start_matches('\u{feff}');
            }
            field.trim().to_string()
        })
        .collect()
}

fn looks_like_header(fields: &[String]) -> bool {
    fields.len() < 2 || !FinishTime::is_valid(&fields[1])
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileCheckError {
    #[error("file not found")]
    NotFound,

    #[error("file must have a .csv extension")]
    NotCsv,

    #[error("file is empty")]
    Empty,

    #[error("file must have at least 2 columns (CPF, time), found {0}")]
    TooFewColumns(usize),

    #[error("could not read file: {0}")]
    Unreadable(String),
}

/// Quick sanity check of a results file before importing it.
///
/// Returns the number of records in the file, header included.
pub fn check_csv_file(path: &Path) -> std::result::Result<usize, FileCheckError> {
    if !path.is_file() {
        return Err(FileCheckError::NotFound);
    }

    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(FileCheckError::NotCsv);
    }

    let file = File::open(path).map_err(|e| FileCheckError::Unreadable(e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut record = ByteRecord::new();
    let mut total = 0;
    while reader
        .read_byte_record(&mut record)
        .map_err(|e| FileCheckError::Unreadable(e.to_string()))?
    {
        if total == 0 && record.len() < 2 {
            return Err(FileCheckError::TooFewColumns(record.len()));
        }
        total += 1;
    }

    if total == 0 {
        return Err(FileCheckError::Empty);
    }

    Ok(total)
}
