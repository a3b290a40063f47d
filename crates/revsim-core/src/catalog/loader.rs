use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{Corpus, Document};
use crate::config::DataConfig;
use crate::error::{Result, RevsimError};
use crate::trace_time;

/// On-disk layout of a review catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Pick from the file extension
    #[default]
    Auto,
    /// Comma separated values with a header row
    Csv,
    /// A JSON array of objects
    Json,
    /// One JSON object per line
    Jsonl,
}

impl CatalogFormat {
    /// Resolve `Auto` against a path's extension; unknown extensions read as CSV
    pub fn resolve(self, path: &Path) -> CatalogFormat {
        if self != CatalogFormat::Auto {
            return self;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => CatalogFormat::Json,
            Some("jsonl") | Some("ndjson") => CatalogFormat::Jsonl,
            Some("csv") => CatalogFormat::Csv,
            other => {
                debug!(extension = ?other, "unrecognised catalog extension, reading as csv");
                CatalogFormat::Csv
            }
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = RevsimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(CatalogFormat::Auto),
            "csv" => Ok(CatalogFormat::Csv),
            "json" => Ok(CatalogFormat::Json),
            "jsonl" | "ndjson" => Ok(CatalogFormat::Jsonl),
            other => Err(RevsimError::invalid_value("catalog format", other)),
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogFormat::Auto => write!(f, "auto"),
            CatalogFormat::Csv => write!(f, "csv"),
            CatalogFormat::Json => write!(f, "json"),
            CatalogFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Column names the loader must find in every catalog
#[derive(Debug, Clone, Copy)]
struct Columns<'a> {
    item: &'a str,
    text: &'a str,
}

impl<'a> Columns<'a> {
    fn from_config(data: &'a DataConfig) -> Self {
        Columns {
            item: &data.item_column,
            text: &data.text_column,
        }
    }

    /// Fail with `DataSchema` if either required column is absent
    fn validate<'b, I>(&self, available: I) -> Result<()>
    where
        I: IntoIterator<Item = &'b str>,
    {
        let available: Vec<String> = available.into_iter().map(str::to_string).collect();
        let missing: Vec<String> = [self.item, self.text]
            .into_iter()
            .filter(|col| !available.iter().any(|a| a == col))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(RevsimError::schema(missing, available))
        }
    }
}

/// Load a review catalog from disk
///
/// The schema is validated once, before any row is converted. Rows with an
/// empty item id are skipped with a warning; missing text becomes the empty
/// string.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_catalog(path: &Path, data: &DataConfig) -> Result<Corpus> {
    let start = Instant::now();

    if !path.exists() {
        return Err(RevsimError::CatalogNotFound {
            path: path.to_path_buf(),
        });
    }

    let columns = Columns::from_config(data);
    let format = data.format.resolve(path);
    debug!(%format, item_column = columns.item, text_column = columns.text, "loading catalog");

    let corpus = match format {
        CatalogFormat::Csv | CatalogFormat::Auto => {
            let file = fs::File::open(path)
                .map_err(|e| RevsimError::io_operation("open", path.display(), e))?;
            read_csv(file, columns)?
        }
        CatalogFormat::Json => {
            let content = read_to_string(path)?;
            read_json(&content, columns)?
        }
        CatalogFormat::Jsonl => {
            let content = read_to_string(path)?;
            read_jsonl(&content, columns)?
        }
    };

    if corpus.is_empty() {
        return Err(RevsimError::EmptyCatalog);
    }

    trace_time!(start, "load_catalog", documents = corpus.len());
    Ok(corpus)
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| RevsimError::io_operation("read", path.display(), e))
}

/// Only a truly empty id is skipped; whitespace is a valid id
fn is_blank(id: &str) -> bool {
    id.is_empty()
}

fn read_csv<R: Read>(reader: R, columns: Columns<'_>) -> Result<Corpus> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    columns.validate(headers.iter())?;

    // Both lookups succeed after validation
    let position = |name: &str| headers.iter().position(|h| h == name);
    let (item_idx, text_idx) = match (position(columns.item), position(columns.text)) {
        (Some(i), Some(t)) => (i, t),
        _ => return Err(RevsimError::Other("column lookup failed".to_string())),
    };

    let mut documents = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let item_id = record.get(item_idx).unwrap_or_default();
        if is_blank(item_id) {
            // Header is line 1, so data row 0 is line 2
            warn!(line = row + 2, "skipping catalog row with empty item id");
            continue;
        }
        let text = record.get(text_idx).map(str::to_string);
        documents.push(Document::with_optional_text(item_id, text));
    }

    Ok(Corpus::new(documents))
}

fn read_json(content: &str, columns: Columns<'_>) -> Result<Corpus> {
    let value: Value = serde_json::from_str(content)?;
    let rows = match value {
        Value::Array(rows) => rows,
        other => {
            return Err(RevsimError::invalid_value(
                "catalog",
                format!("expected a JSON array of objects, found {}", json_kind(&other)),
            ))
        }
    };

    let objects = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| into_object(row, i + 1))
        .collect::<Result<Vec<_>>>()?;

    objects_to_corpus(objects, columns)
}

fn read_jsonl(content: &str, columns: Columns<'_>) -> Result<Corpus> {
    let mut objects = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row: Value = serde_json::from_str(line)?;
        objects.push(into_object(row, i + 1)?);
    }

    objects_to_corpus(objects, columns)
}

fn into_object(row: Value, record: usize) -> Result<Map<String, Value>> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(RevsimError::invalid_value(
            "catalog",
            format!("record {} is {}, expected an object", record, json_kind(&other)),
        )),
    }
}

fn objects_to_corpus(objects: Vec<Map<String, Value>>, columns: Columns<'_>) -> Result<Corpus> {
    // Available columns are the union of keys across all records
    let available: BTreeSet<&str> = objects
        .iter()
        .flat_map(|obj| obj.keys().map(String::as_str))
        .collect();
    columns.validate(available.iter().copied())?;

    let mut documents = Vec::new();
    for (i, obj) in objects.iter().enumerate() {
        let item_id = match scalar_to_string(obj.get(columns.item), columns.item)? {
            Some(id) if !is_blank(&id) => id,
            _ => {
                warn!(record = i + 1, "skipping catalog record with empty item id");
                continue;
            }
        };
        let text = scalar_to_string(obj.get(columns.text), columns.text)?;
        documents.push(Document::with_optional_text(item_id, text));
    }

    Ok(Corpus::new(documents))
}

/// Strings pass through, numbers and booleans are rendered, null is `None`
fn scalar_to_string(value: Option<&Value>, column: &str) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(RevsimError::invalid_value(
            &format!("value in column '{}'", column),
            json_kind(other),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
