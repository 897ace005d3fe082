//! API documents and read-only views over them
//!
//! A [`Document`] owns the parsed tree. Everything else in this module is a
//! cheap borrowed view whose accessors never fail: a missing or mis-shaped
//! key reads as an empty mapping, an empty sequence, or `false`. The differ
//! and the linter rely on that so they can walk any plausible document
//! without existence checks of their own.
//!
//! ```text
//! Document
//! ├── info.version
//! └── paths ──► PathItem ──► Operation
//!                              ├── parameters ──► Parameter
//!                              └── responses  ──► Response ──► SchemaView
//!                                                               └── properties ──► SchemaView
//! ```

use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::error::{Result, SpecError};

/// Keys with this prefix are vendor extensions, never HTTP methods
const EXTENSION_PREFIX: &str = "x-";

/// Whether a value counts as "present": `null`, `false`, `0`, `""`, `[]`
/// and `{}` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// YAML 1.1 spellings of `false` that YAML 1.2 loaders keep as strings
const YAML11_FALSE: [&str; 4] = ["false", "no", "n", "off"];

/// Whether a boolean flag such as `required` or `deprecated` is set
///
/// Like [`is_truthy`], except that the YAML 1.1 words `no`, `n`, `off` and
/// `false` (any case) are read as unset.
pub fn is_flag_set(value: &Value) -> bool {
    match value {
        Value::String(s) => {
            !s.is_empty() && !YAML11_FALSE.iter().any(|word| s.eq_ignore_ascii_case(word))
        }
        other => is_truthy(other),
    }
}

/// Render a schema `type` for finding details
///
/// Strings render bare, other shapes as compact JSON, absence as `none`.
pub fn describe_type(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "none".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn entries<'a>(
    map: Option<&'a Map<String, Value>>,
) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
    map.into_iter()
        .flat_map(|m| m.iter())
        .map(|(k, v)| (k.as_str(), v))
}

/// Serialization a document was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` are YAML, everything else is read as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// A parsed API schema document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Value,
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

impl Document {
    /// Wrap an already parsed tree
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self::from_value(serde_json::from_str(text)?))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
        Ok(Self::from_value(yaml_to_json(yaml)))
    }

    pub fn parse(text: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Json => Self::from_json_str(text),
            DocumentFormat::Yaml => Self::from_yaml_str(text),
        }
    }

    /// Read and parse a document, choosing the parser from the file extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let format = DocumentFormat::from_path(path);
        tracing::debug!(path = %path.display(), ?format, "loading document");
        Self::parse(&text, format)
    }

    /// The `paths` mapping
    pub fn paths(&self) -> Paths<'_> {
        Paths {
            map: object(self.root.get("paths")),
        }
    }

    /// `info.version`, if present and non-empty
    pub fn version(&self) -> Option<&Value> {
        object(self.root.get("info"))
            .and_then(|info| info.get("version"))
            .filter(|v| is_truthy(v))
    }
}

/// The `paths` mapping of a document
#[derive(Debug, Clone, Copy, Default)]
pub struct Paths<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Paths<'a> {
    /// Paths in document order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, PathItem<'a>)> + 'a {
        entries(self.map).map(|(path, item)| (path, PathItem::from_value(item)))
    }

    pub fn get(&self, path: &str) -> Option<PathItem<'a>> {
        self.map
            .and_then(|m| m.get(path))
            .map(PathItem::from_value)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.map.map(|m| m.contains_key(path)).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.map.map(Map::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The operations attached to one path
#[derive(Debug, Clone, Copy, Default)]
pub struct PathItem<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> PathItem<'a> {
    fn from_value(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// `(method, operation)` pairs in document order, skipping `x-` extensions
    pub fn operations(&self) -> impl Iterator<Item = (&'a str, Operation<'a>)> + 'a {
        entries(self.map)
            .filter(|(key, _)| !key.starts_with(EXTENSION_PREFIX))
            .map(|(method, op)| (method, Operation::from_value(op)))
    }

    pub fn operation(&self, method: &str) -> Option<Operation<'a>> {
        self.map
            .and_then(|m| m.get(method))
            .map(Operation::from_value)
    }
}

/// One HTTP-method handler
#[derive(Debug, Clone, Copy, Default)]
pub struct Operation<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Operation<'a> {
    fn from_value(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key))
    }

    pub fn has_operation_id(&self) -> bool {
        self.get("operationId").map(is_truthy).unwrap_or(false)
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        self.get("parameters")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(Parameter::from_value)
    }

    pub fn responses(&self) -> Responses<'a> {
        Responses {
            map: object(self.get("responses")),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        self.get("deprecated").map(is_flag_set).unwrap_or(false)
    }
}

/// An operation parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct Parameter<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Parameter<'a> {
    fn from_value(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    pub fn name(&self) -> Option<&'a str> {
        self.map.and_then(|m| m.get("name")).and_then(Value::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.map
            .and_then(|m| m.get("required"))
            .map(is_flag_set)
            .unwrap_or(false)
    }
}

/// Status code to response mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct Responses<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Responses<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Response<'a>)> + 'a {
        entries(self.map).map(|(code, resp)| (code, Response::from_value(resp)))
    }

    /// The response for a status code, even if it is empty
    pub fn get(&self, code: &str) -> Option<Response<'a>> {
        self.map.and_then(|m| m.get(code)).map(Response::from_value)
    }
}

/// A single response object
#[derive(Debug, Clone, Copy, Default)]
pub struct Response<'a> {
    value: Option<&'a Value>,
}

impl<'a> Response<'a> {
    fn from_value(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// Whether the response holds anything at all
    pub fn is_present(&self) -> bool {
        self.value.map(is_truthy).unwrap_or(false)
    }

    fn map(&self) -> Option<&'a Map<String, Value>> {
        self.value.and_then(Value::as_object)
    }

    /// The effective body schema, see [`extract_schema`]
    pub fn schema(&self) -> SchemaView<'a> {
        extract_schema(self)
    }
}

/// Locate the effective body schema of a response
///
/// A non-empty `content` mapping wins: the schema under its first media type
/// is used (empty if that media type has none). Otherwise the top-level
/// `schema` key is used. Absence yields an empty schema.
pub fn extract_schema<'a>(response: &Response<'a>) -> SchemaView<'a> {
    let map = response.map();
    let first_media = entries(object(map.and_then(|m| m.get("content")))).next();
    match first_media {
        Some((_, media)) => {
            SchemaView::from_option(object(Some(media)).and_then(|m| m.get("schema")))
        }
        None => SchemaView::from_option(map.and_then(|m| m.get("schema"))),
    }
}

/// `type` and `properties` of a schema; every other keyword is ignored
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaView<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> SchemaView<'a> {
    fn from_option(value: Option<&'a Value>) -> Self {
        Self { map: object(value) }
    }

    pub fn from_value(value: &'a Value) -> Self {
        Self::from_option(Some(value))
    }

    /// The raw `type`, with `null` treated as absent
    pub fn type_value(&self) -> Option<&'a Value> {
        self.map
            .and_then(|m| m.get("type"))
            .filter(|t| !t.is_null())
    }

    /// The `type`, only if it is non-empty
    pub fn declared_type(&self) -> Option<&'a Value> {
        self.type_value().filter(|t| is_truthy(t))
    }

    /// `(field, schema)` pairs in document order
    pub fn properties(&self) -> impl Iterator<Item = (&'a str, SchemaView<'a>)> + 'a {
        entries(object(self.map.and_then(|m| m.get("properties"))))
            .map(|(name, prop)| (name, SchemaView::from_value(prop)))
    }

    pub fn property(&self, name: &str) -> Option<SchemaView<'a>> {
        object(self.map.and_then(|m| m.get("properties")))
            .and_then(|props| props.get(name))
            .map(SchemaView::from_value)
    }

    pub fn is_empty(&self) -> bool {
        self.map.map(Map::is_empty).unwrap_or(true)
    }
}

/// Convert a YAML tree to the JSON model
///
/// Mapping keys become strings (`200:` reads as `"200"`), tags are dropped.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_json(v)))
                .collect(),
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
