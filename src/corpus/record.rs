use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// One job posting. Title and description are always present (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    /// Explicit `id` from the source, else the 0-based row position.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Remaining scalar fields, stringified.
    pub metadata: BTreeMap<String, String>,
}

impl JobRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builds a record from one JSON object; `row` is its position in the source.
    pub(crate) fn from_json_object(row: usize, object: Map<String, Value>) -> Result<Self, String> {
        let mut id = None;
        let mut title = String::new();
        let mut description = String::new();
        let mut metadata = BTreeMap::new();

        for (key, value) in object {
            match key.as_str() {
                "title" => title = scalar_text(&key, value)?.unwrap_or_default(),
                "description" => description = scalar_text(&key, value)?.unwrap_or_default(),
                "id" => id = scalar_text(&key, value)?,
                _ => {
                    if let Ok(Some(text)) = scalar_text(&key, value) {
                        metadata.insert(key, text);
                    }
                }
            }
        }

        Ok(Self {
            id: id.unwrap_or_else(|| row.to_string()),
            title,
            description,
            metadata,
        })
    }

    /// Title for diagnostics, or `job <id>` when the title is blank.
    pub fn label(&self) -> String {
        if self.title.trim().is_empty() {
            format!("job {}", self.id)
        } else {
            self.title.clone()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn company(&self) -> Option<&str> {
        self.get("company")
    }

    pub fn location(&self) -> Option<&str> {
        self.get("location")
    }

    pub fn job_type(&self) -> Option<&str> {
        self.get("job_type")
    }

    pub fn date_posted(&self) -> Option<&str> {
        self.get("date_posted")
    }

    pub fn company_url(&self) -> Option<&str> {
        self.get("company_url")
    }

    pub fn job_url(&self) -> Option<&str> {
        self.get("job_url")
    }

    pub fn job_url_direct(&self) -> Option<&str> {
        self.get("job_url_direct")
    }
}

/// `None` for null; strings as-is; numbers and bools stringified; containers rejected.
fn scalar_text(key: &str, value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(format!("field `{}` must be a scalar", key)),
    }
}
