use crate::error::{FeedFixerError, csv_err, io_err};
use csv::{Reader, ReaderBuilder, StringRecord, Writer, WriterBuilder};
use std::fs::File;
use std::path::Path;

pub fn open_reader(path: &Path) -> Result<Reader<File>, FeedFixerError> {
    if !path.exists() {
        return Err(FeedFixerError::MissingFile(path.display().to_string()));
    }

    ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| csv_err!(path.display(), e))
}

pub fn open_writer(path: &Path) -> Result<Writer<File>, FeedFixerError> {
    let file = File::create(path).map_err(|e| io_err!(path, e))?;
    Ok(WriterBuilder::new().flexible(true).from_writer(file))
}

pub fn headers(reader: &mut Reader<File>, path: &Path) -> Result<StringRecord, FeedFixerError> {
    reader
        .headers()
        .cloned()
        .map_err(|e| csv_err!(path.display(), e))
}

pub fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

pub fn required_column(
    headers: &StringRecord,
    name: &str,
    file_name: &str,
) -> Result<usize, FeedFixerError> {
    column(headers, name).ok_or_else(|| FeedFixerError::MissingColumn {
        file_name: file_name.to_string(),
        column: name.to_string(),
    })
}

/// Field at `idx`, empty when the row is short.
pub fn field<'a>(record: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|idx| record.get(idx)).unwrap_or("").trim()
}

/// Sets `idx` in a row being rewritten, padding short rows.
pub fn set_field(fields: &mut Vec<String>, idx: usize, value: String) {
    if fields.len() <= idx {
        fields.resize(idx + 1, String::new());
    }
    fields[idx] = value;
}
