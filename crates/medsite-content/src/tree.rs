//! Content tree model
//!
//! Typed view of a generated website's editable text, organized as
//! page → section → field. The tree is read-only input for every
//! validation call.
//!
//! ```text
//! {
//!   "pages": { "home": { "hero": { "title": { "text": "...", "editable": true, "type": "title" } } } },
//!   "metadata": { "title": { "text": "..." }, "description": { "text": "..." } }
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{ContentError, Result};
use crate::field::value_to_text;

/// Root of a generated site's content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentTree {
    /// Pages keyed by name; only `home` is validated
    #[serde(default)]
    pub pages: Pages,

    /// Top-level SEO metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SeoMetadata>,
}

impl ContentTree {
    /// Decode from an already-parsed JSON value
    ///
    /// # Errors
    /// `NotAnObject` if the root is not an object, `InvalidJson` if the
    /// shape does not match.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(ContentError::NotAnObject(json_kind(value)));
        }
        Ok(Self::deserialize(value)?)
    }

    /// Decode as much of a tree as the value allows
    ///
    /// Entries that do not fit the tree shape are skipped, and each one
    /// is described in the returned messages.
    ///
    /// # Errors
    /// `NotAnObject` if the root is not an object.
    pub fn decode_partial(value: &JsonValue) -> Result<(Self, Vec<String>)> {
        let JsonValue::Object(root) = value else {
            return Err(ContentError::NotAnObject(json_kind(value)));
        };
        let mut issues = Vec::new();
        let mut tree = Self::default();

        match root.get("pages") {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::Object(pages)) => match pages.get("home") {
                None | Some(JsonValue::Null) => {}
                Some(JsonValue::Object(home)) => {
                    tree.pages.home = Page::decode_partial(home, &mut issues);
                }
                Some(_) => issues.push("Home page is malformed".to_string()),
            },
            Some(_) => issues.push("Pages are malformed".to_string()),
        }

        match root.get("metadata") {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::Object(metadata)) => {
                tree.metadata = Some(SeoMetadata::decode_partial(metadata, &mut issues));
            }
            Some(_) => issues.push("SEO metadata is malformed".to_string()),
        }

        if !issues.is_empty() {
            tracing::debug!("Skipped {} malformed tree entries", issues.len());
        }
        Ok((tree, issues))
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or not an object
    pub fn from_json(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or not a mapping
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Self::from_value(&value)
    }

    /// The home page
    #[inline]
    #[must_use]
    pub fn home(&self) -> &Page {
        &self.pages.home
    }

    /// All text in the home page joined with single spaces
    ///
    /// Depth-first: each section's fields in order (field text, then the
    /// field's items), then the section's own items.
    #[must_use]
    pub fn flatten_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for section in self.home().sections.values() {
            for field in section.fields.values() {
                parts.extend(field.text());
                for item in &field.items {
                    item.collect_text(&mut parts);
                }
            }
            for item in &section.items {
                item.collect_text(&mut parts);
            }
        }

        parts.join(" ")
    }
}

/// Page collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pages {
    /// Home page
    #[serde(default)]
    pub home: Page,
}

/// A page: ordered sections keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    /// Sections in source order
    pub sections: IndexMap<String, Section>,
}

impl Page {
    /// Section by name
    #[inline]
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Whether the page has a section with this name
    #[inline]
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    fn decode_partial(sections: &Map<String, JsonValue>, issues: &mut Vec<String>) -> Self {
        let mut page = Self::default();
        for (name, value) in sections {
            match value {
                JsonValue::Object(entries) => {
                    let section = Section::decode_partial(name, entries, issues);
                    page.sections.insert(name.clone(), section);
                }
                _ => issues.push(format!("Section '{name}' is malformed")),
            }
        }
        page
    }
}

/// A section: named fields plus an optional item list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section-level items (e.g. the services list)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,

    /// Fields in source order
    #[serde(flatten)]
    pub fields: IndexMap<String, Field>,
}

impl Section {
    /// Field by name
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Trimmed, non-empty text of a field
    #[inline]
    #[must_use]
    pub fn text_of(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Field::text)
    }

    fn decode_partial(name: &str, entries: &Map<String, JsonValue>, issues: &mut Vec<String>) -> Self {
        let mut section = Self::default();

        for (key, value) in entries {
            if key == "items" {
                match value {
                    JsonValue::Null => {}
                    JsonValue::Array(items) => {
                        for (i, item) in items.iter().enumerate() {
                            match decode_object::<Item>(item) {
                                Some(item) => section.items.push(item),
                                None => issues.push(format!("Item {} in section '{name}' is malformed", i + 1)),
                            }
                        }
                    }
                    _ => issues.push(format!("Items in section '{name}' are malformed")),
                }
                continue;
            }

            match decode_object::<Field>(value) {
                Some(field) => {
                    section.fields.insert(key.clone(), field);
                }
                None => issues.push(format!("Field '{key}' in section '{name}' is malformed")),
            }
        }

        section
    }
}

/// Leaf unit of editable content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field text; scalars are stringified
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Whether the user may edit this field
    #[serde(default)]
    pub editable: bool,

    /// Rule key selecting the validation ruleset
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    /// Ordered sub-records
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

impl Field {
    /// Create an editable field of the given type
    #[must_use]
    pub fn new(field_type: FieldType, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            editable: true,
            field_type,
            items: Vec::new(),
        }
    }

    /// Trimmed text, `None` when absent or blank
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Sub-record of a field or section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Free text
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Item name (services)
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Item description (services)
    #[serde(default, deserialize_with = "scalar_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    /// Service-style item with a name and description
    #[must_use]
    pub fn service(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: None,
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    /// Trimmed, non-empty name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Trimmed, non-empty description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(non_blank(self.name.as_deref()));
        out.extend(non_blank(self.description.as_deref()));
        out.extend(non_blank(self.text.as_deref()));
    }
}

/// Top-level SEO record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoMetadata {
    /// Page title for search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Field>,

    /// Meta description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Field>,
}

impl SeoMetadata {
    /// Trimmed, non-empty title text
    #[inline]
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(Field::text)
    }

    /// Trimmed, non-empty description text
    #[inline]
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_ref().and_then(Field::text)
    }

    fn decode_partial(entries: &Map<String, JsonValue>, issues: &mut Vec<String>) -> Self {
        let mut decode = |key: &str| match entries.get(key) {
            None | Some(JsonValue::Null) => None,
            Some(value) => {
                let field = decode_object::<Field>(value);
                if field.is_none() {
                    issues.push(format!("SEO {key} is malformed"));
                }
                field
            }
        };

        let title = decode("title");
        let description = decode("description");
        Self { title, description }
    }
}

/// Validation ruleset selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Headline text
    Title,
    /// Secondary headline
    Subtitle,
    /// Body paragraph
    Description,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Postal address
    Address,
    /// Button label
    Button,
    /// Entry in a list
    ListItem,
    /// Web link
    Url,
    /// Unknown tag; validation is skipped
    #[default]
    #[serde(other)]
    Other,
}

impl FieldType {
    /// Every type that carries a ruleset
    pub const KNOWN: [FieldType; 9] = [
        Self::Title,
        Self::Subtitle,
        Self::Description,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::Button,
        Self::ListItem,
        Self::Url,
    ];

    /// Rule key as used in content trees
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Description => "description",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Button => "button",
            Self::ListItem => "listItem",
            Self::Url => "url",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ContentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ContentError::UnknownFieldType(s.to_string()))
    }
}

/// Decode an object-shaped value, `None` for anything else
fn decode_object<T: DeserializeOwned>(value: &JsonValue) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    T::deserialize(value).ok()
}

/// Accept any JSON scalar as text; `null` reads as absent
fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(None),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            Err(serde::de::Error::custom("expected text, found a nested value"))
        }
        scalar => Ok(Some(value_to_text(&scalar))),
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
