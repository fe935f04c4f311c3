//! YAML frontmatter merging and post rendering
//!
//! A discussion body may already start with its own header:
//! ```markdown
//! ---
//! title: "Custom title"
//! draft: true
//! ---
//!
//! Content here
//! ```
//! That header is lifted out of the body and layered over the metadata
//! derived from the discussion itself. The merged mapping keeps insertion
//! order, so derived keys (`title`, `date`, `categories`) always come first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use tracing::warn;

use crate::discussion::Discussion;
use crate::error::Result;

const FRONTMATTER_DELIMITER: &str = "---";
const FLOW_INDICATORS: [char; 7] = [',', '[', ']', '{', '}', '#', ':'];

static YAML11_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}(?:(?:[Tt]|[ \t]+)[0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)?$",
    )
    .unwrap()
});
static YAML11_BOOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:y|Y|yes|Yes|YES|n|N|no|No|NO|on|On|ON|off|Off|OFF)$").unwrap());

/// A discussion ready to be written as `index.md`
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub frontmatter: Mapping,
    pub body: String,
}

impl RenderedDocument {
    /// Merge derived and embedded metadata for `discussion`
    pub fn from_discussion(discussion: &Discussion) -> Self {
        let (embedded, body) = split_frontmatter(&discussion.body);
        let frontmatter = merge_frontmatter(base_frontmatter(discussion), embedded);

        Self {
            frontmatter,
            body: body.trim().to_string(),
        }
    }

    pub fn to_markdown(&self) -> Result<String> {
        Ok(write_with_frontmatter(&self.frontmatter, &self.body)?)
    }
}

/// Render a discussion into the final markdown text
pub fn render_discussion(discussion: &Discussion) -> Result<String> {
    RenderedDocument::from_discussion(discussion).to_markdown()
}

/// Metadata derived from the discussion record
pub fn base_frontmatter(discussion: &Discussion) -> Mapping {
    let categories = discussion
        .label_names()
        .into_iter()
        .map(Value::String)
        .collect::<Vec<_>>();

    let mut mapping = Mapping::new();
    mapping.insert("title".into(), discussion.title.clone().into());
    mapping.insert(
        "date".into(),
        discussion.created_at.clone().unwrap_or_default().into(),
    );
    mapping.insert("categories".into(), Value::Sequence(categories));
    mapping
}

/// Overlay `embedded` on `base`.
///
/// Existing keys keep their position and take the embedded value whole;
/// embedded-only keys are appended in their original order.
pub fn merge_frontmatter(mut base: Mapping, embedded: Mapping) -> Mapping {
    for (key, value) in embedded {
        base.insert(key, value);
    }
    base
}

/// Split a leading `---` header block off `raw`.
///
/// Returns the parsed header and the text after the closing delimiter. A
/// header that fails to parse, or is not a string-keyed mapping, yields an
/// empty mapping but is still stripped. Without a closing delimiter the body
/// is returned untouched.
pub fn split_frontmatter(raw: &str) -> (Mapping, String) {
    match find_header_block(raw) {
        Some((header, rest)) => (parse_header(header), rest.to_string()),
        None => (Mapping::new(), raw.to_string()),
    }
}

/// Write content with YAML frontmatter
pub fn write_with_frontmatter(
    frontmatter: &Mapping,
    body: &str,
) -> std::result::Result<String, serde_yaml::Error> {
    let yaml = frontmatter
        .iter()
        .map(|(key, value)| render_entry(key, value))
        .collect::<std::result::Result<Vec<_>, _>>()?
        .join("\n");

    Ok(format!(
        "{FRONTMATTER_DELIMITER}\n{}\n{FRONTMATTER_DELIMITER}\n\n{}\n",
        yaml.trim_end(),
        body.trim()
    ))
}

/// One top-level `key: value` entry.
///
/// Scalars and scalar-only sequences stay on one line (`categories: [news]`);
/// anything nested falls back to serde_yaml's block layout.
fn render_entry(key: &Value, value: &Value) -> std::result::Result<String, serde_yaml::Error> {
    let inline = match value {
        Value::Sequence(items) => items
            .iter()
            .map(flow_item)
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .map(|items| format!("[{}]", items.join(", "))),
        _ => inline_scalar(value)?,
    };

    match inline {
        Some(rendered) => Ok(format!("{}: {}", serde_yaml::to_string(key)?.trim_end(), rendered)),
        None => {
            let mut entry = Mapping::new();
            entry.insert(key.clone(), value.clone());
            Ok(serde_yaml::to_string(&entry)?.trim_end().to_string())
        }
    }
}

fn inline_scalar(value: &Value) -> std::result::Result<Option<String>, serde_yaml::Error> {
    match value {
        Value::String(text) if text.chars().any(char::is_control) => Ok(None),
        Value::String(text) if is_yaml11_special(text) => Ok(Some(single_quoted(text))),
        Value::String(_) | Value::Bool(_) | Value::Number(_) | Value::Null => {
            let rendered = serde_yaml::to_string(value)?;
            let rendered = rendered.trim_end();
            if rendered.contains('\n') {
                Ok(None)
            } else {
                Ok(Some(rendered.to_string()))
            }
        }
        _ => Ok(None),
    }
}

fn flow_item(value: &Value) -> std::result::Result<Option<String>, serde_yaml::Error> {
    let Some(rendered) = inline_scalar(value)? else {
        return Ok(None);
    };
    match value {
        Value::String(text)
            if !rendered.starts_with(['\'', '"']) && text.contains(FLOW_INDICATORS) =>
        {
            Ok(Some(single_quoted(text)))
        }
        _ => Ok(Some(rendered)),
    }
}

/// Plain strings that a YAML 1.1 loader would read as a timestamp or boolean
fn is_yaml11_special(text: &str) -> bool {
    YAML11_TIMESTAMP.is_match(text) || YAML11_BOOL.is_match(text)
}

fn single_quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

fn find_header_block(raw: &str) -> Option<(&str, &str)> {
    let mut lines = raw.split_inclusive('\n');
    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if is_delimiter(line) {
            return Some((&raw[header_start..offset], &raw[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == FRONTMATTER_DELIMITER
}

fn parse_header(yaml: &str) -> Mapping {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(mapping)) => stringify_keys(mapping).unwrap_or_else(|| {
            warn!("embedded frontmatter has null or nested keys; ignoring it");
            Mapping::new()
        }),
        Ok(Value::Null) => Mapping::new(),
        Ok(_) => {
            warn!("embedded frontmatter is not a key-value mapping; ignoring it");
            Mapping::new()
        }
        Err(err) => {
            warn!(error = %err, "embedded frontmatter is not valid YAML; ignoring it");
            Mapping::new()
        }
    }
}

/// Number and boolean keys become strings; null or nested keys reject the header
fn stringify_keys(mapping: Mapping) -> Option<Mapping> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let key = match key {
                Value::String(key) => key,
                Value::Number(key) => key.to_string(),
                Value::Bool(key) => key.to_string(),
                _ => return None,
            };
            Some((Value::String(key), value))
        })
        .collect()
}
