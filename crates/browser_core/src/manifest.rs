use serde_json::{Map, Value};
use url::Url;

use crate::{ErrorKind, ErrorRecord};

/// A named website from the manifest. Both fields are trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteEntry {
    name: String,
    url: String,
}

impl WebsiteEntry {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            url: url.trim().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The URL exactly as listed in the manifest (trimmed).
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn parsed_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}

const UNPARSABLE: &str = "Unable to parse content from the source URL.";

/// Parse manifest text, a JSON array of `{"name": .., "url": ..}` objects,
/// into entries in input order.
///
/// One bad record fails the whole batch. An empty array parses to an empty
/// list; deciding whether that is an error is up to the caller.
pub fn parse_manifest(text: &str) -> Result<Vec<WebsiteEntry>, ErrorRecord> {
    let records: Vec<Value> = serde_json::from_str(text).map_err(malformed)?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let record = record
                .as_object()
                .ok_or_else(|| malformed(format!("Record {index} is not an object.")))?;
            entry_from_record(record, index)
        })
        .collect()
}

fn entry_from_record(
    record: &Map<String, Value>,
    index: usize,
) -> Result<WebsiteEntry, ErrorRecord> {
    let url = record.get("url").ok_or_else(|| malformed(UNPARSABLE))?;
    let name = record
        .get("name")
        .ok_or_else(|| malformed(format!("Record {index} has no name.")))?;
    Ok(WebsiteEntry::new(
        &field_text(name, "name", index)?,
        &field_text(url, "url", index)?,
    ))
}

fn malformed(message: impl ToString) -> ErrorRecord {
    ErrorRecord::new(ErrorKind::MalformedInput, message.to_string())
}

/// Strings are taken as-is; numbers and booleans are rendered as text.
fn field_text(value: &Value, field: &str, index: usize) -> Result<String, ErrorRecord> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(malformed(format!("Record {index} has a non-text {field}.")))
        }
    }
}
