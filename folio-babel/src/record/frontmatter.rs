//! Front-matter block
//!
//! A persisted record is a `---` delimited header of `key: value` lines
//! followed by the Markdown body:
//!
//! ```text
//! ---
//! title: "Hello \"world\""
//! pubDate: 2023-03-12
//! views: 12
//! draft: false
//! ---
//!
//! Body text
//! ```
//!
//! Strings are always double-quoted with `\\`, `\"` and `\n` escaped. Dates,
//! integers and booleans are bare. Key order is the insertion order.
//!
//! Rendering is done here by hand so the layout stays byte-stable; reading
//! goes through `serde_yaml`.

use crate::error::{PipelineError, Result};
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;

pub const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontValue {
    Str(String),
    Date(NaiveDate),
    Int(i64),
    Bool(bool),
}

impl FrontValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Map a YAML scalar onto a front-matter value. Strings that are
    /// exactly an ISO date read back as dates.
    fn from_yaml(key: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(FrontValue::Bool(*b)),
            Value::Number(n) => n.as_i64().map(FrontValue::Int).ok_or_else(|| {
                PipelineError::FrontMatter(format!("{key}: {n} is not an integer"))
            }),
            Value::String(s) => Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(FrontValue::Date)
                .unwrap_or_else(|_| FrontValue::Str(s.clone()))),
            Value::Null => Ok(FrontValue::Str(String::new())),
            _ => Err(PipelineError::FrontMatter(format!(
                "{key}: expected a scalar value"
            ))),
        }
    }
}

impl fmt::Display for FrontValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontValue::Str(s) => write!(f, "\"{}\"", escape(s)),
            FrontValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FrontValue::Int(n) => write!(f, "{n}"),
            FrontValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for FrontValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FrontValue::Str(s) => serializer.serialize_str(s),
            FrontValue::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            FrontValue::Int(n) => serializer.serialize_i64(*n),
            FrontValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for FrontValue {
    fn from(value: &str) -> Self {
        FrontValue::Str(value.to_string())
    }
}

impl From<String> for FrontValue {
    fn from(value: String) -> Self {
        FrontValue::Str(value)
    }
}

impl From<NaiveDate> for FrontValue {
    fn from(value: NaiveDate) -> Self {
        FrontValue::Date(value)
    }
}

impl From<i64> for FrontValue {
    fn from(value: i64) -> Self {
        FrontValue::Int(value)
    }
}

impl From<u32> for FrontValue {
    fn from(value: u32) -> Self {
        FrontValue::Int(i64::from(value))
    }
}

impl From<bool> for FrontValue {
    fn from(value: bool) -> Self {
        FrontValue::Bool(value)
    }
}

/// Ordered `key: value` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    entries: Vec<(String, FrontValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<FrontValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&FrontValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header, blank line, body, trailing newline.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in &self.entries {
            out.push_str(&format!("{key}: {value}\n"));
        }
        out.push_str(DELIMITER);
        out.push_str("\n\n");
        out.push_str(body);
        out.push('\n');
        out
    }

    /// Split a persisted record into its header and body. The header is
    /// read as YAML, so records written by other tools (single-quoted
    /// scalars, `\t` escapes, comments) read back too.
    pub fn parse(text: &str) -> Result<(FrontMatter, String)> {
        let mut lines = text.lines();
        if lines.next().map(str::trim_end) != Some(DELIMITER) {
            return Err(PipelineError::FrontMatter(
                "record does not start with ---".to_string(),
            ));
        }

        let mut header = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == DELIMITER {
                closed = true;
                break;
            }
            header.push(line);
        }
        if !closed {
            return Err(PipelineError::FrontMatter(
                "missing closing ---".to_string(),
            ));
        }

        let mut front = FrontMatter::new();
        let header = header.join("\n");
        if !header.trim().is_empty() {
            let mapping: Mapping = serde_yaml::from_str(&header)?;
            for (key, value) in &mapping {
                let key = key.as_str().ok_or_else(|| {
                    PipelineError::FrontMatter(format!("non-string key {key:?}"))
                })?;
                front.push(key, FrontValue::from_yaml(key, value)?);
            }
        }

        let body = lines.collect::<Vec<_>>().join("\n");
        Ok((front, body.trim().to_string()))
    }
}

impl Serialize for FrontMatter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrontMatter {
        let mut front = FrontMatter::new();
        front.push("title", r#"Say "hi" \ bye"#);
        front.push("pubDate", NaiveDate::from_ymd_opt(2023, 3, 12).unwrap());
        front.push("views", 12u32);
        front.push("draft", false);
        front
    }

    #[test]
    fn test_render() {
        insta::assert_snapshot!(sample().render("Body").trim_end(), @r###"
        ---
        title: "Say \"hi\" \\ bye"
        pubDate: 2023-03-12
        views: 12
        draft: false
        ---

        Body
        "###);
    }

    #[test]
    fn test_parse_reads_rendered_record() {
        let text = sample().render("# Heading\n\nText");
        let (front, body) = FrontMatter::parse(&text).unwrap();
        assert_eq!(front, sample());
        assert_eq!(body, "# Heading\n\nText");
    }

    #[test]
    fn test_newlines_are_escaped() {
        let mut front = FrontMatter::new();
        front.push("description", "two\nlines");
        let text = front.render("");
        assert!(text.contains(r#"description: "two\nlines""#));
        let (parsed, _) = FrontMatter::parse(&text).unwrap();
        assert_eq!(parsed.get("description").unwrap().as_str(), Some("two\nlines"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(FrontMatter::parse("title: x").is_err());
        assert!(FrontMatter::parse("---\ntitle: \"x\"\n").is_err());
        assert!(FrontMatter::parse("---\nno colon here\n---\n").is_err());
        assert!(FrontMatter::parse("---\ntitle: \"open\n---\n").is_err());
    }

    #[test]
    fn test_parse_single_quoted_and_escaped_scalars() {
        let text = "---\ntitle: 'It''s: here'\ndescription: \"tab\\there\"\n# written by hand\norder: 4\n---\nbody\n";
        let (front, body) = FrontMatter::parse(text).unwrap();
        assert_eq!(front.get("title").unwrap().as_str(), Some("It's: here"));
        assert_eq!(front.get("description").unwrap().as_str(), Some("tab\there"));
        assert_eq!(front.get("order"), Some(&FrontValue::Int(4)));
        assert_eq!(front.keys().collect::<Vec<_>>(), vec!["title", "description", "order"]);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_empty_header() {
        let (front, body) = FrontMatter::parse("---\n---\n\ntext").unwrap();
        assert!(front.is_empty());
        assert_eq!(body, "text");
    }

    #[test]
    fn test_json_keeps_order_and_types() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Say \"hi\" \\ bye","pubDate":"2023-03-12","views":12,"draft":false}"#
        );
    }
}
