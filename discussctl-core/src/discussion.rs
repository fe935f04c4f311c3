//! Discussion records as returned by the repository discussions endpoint.
//!
//! The API reports labels in two shapes: a plain array of `{name}` objects,
//! or a GraphQL-style connection `{nodes: [{name}]}`. Both are resolved into
//! a flat list of names by [`Discussion::label_names`] before anything else
//! looks at them.

use serde::Deserialize;

/// Category name kept by default.
pub const ANNOUNCEMENTS: &str = "Announcements";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Discussion {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub labels: Option<Labels>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Label {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Labels {
    List(Vec<Label>),
    Connection {
        #[serde(default)]
        nodes: Vec<Label>,
    },
}

impl Labels {
    pub fn names(&self) -> Vec<String> {
        let labels = match self {
            Labels::List(labels) => labels,
            Labels::Connection { nodes } => nodes,
        };
        labels
            .iter()
            .filter(|label| !label.name.is_empty())
            .map(|label| label.name.clone())
            .collect()
    }
}

impl Discussion {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn is_in_category(&self, category: &str) -> bool {
        self.category_name() == Some(category)
    }

    /// Label names in API order; empty when the discussion has no labels.
    pub fn label_names(&self) -> Vec<String> {
        self.labels.as_ref().map(Labels::names).unwrap_or_default()
    }
}

/// Keep only discussions filed under `category`, preserving order.
pub fn filter_by_category(discussions: Vec<Discussion>, category: &str) -> Vec<Discussion> {
    discussions
        .into_iter()
        .filter(|discussion| discussion.is_in_category(category))
        .collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
