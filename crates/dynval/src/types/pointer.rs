use std::fmt::{Display, Formatter, Result as FmtResult};

use serde_json::Value;

/// A parsed RFC 6901 JSON Pointer addressing a location in a data tree.
///
/// Segments are stored unescaped (`~1` becomes `/`, `~0` becomes `~`), so a
/// pointer is parsed once and walked many times.
///
/// Both `""` and `"/"` address the whole tree. Lookups never fail loudly: a
/// missing key, a non-numeric array index, or an out-of-range index all
/// produce `None`.
///
/// # Example
///
/// ```
/// use dynval::JsonPointer;
/// use serde_json::json;
///
/// let data = json!({"items": [{"name": "first"}], "a/b": 1});
///
/// assert_eq!(JsonPointer::parse("/items/0/name").lookup(&data), Some(&json!("first")));
/// assert_eq!(JsonPointer::parse("/a~1b").lookup(&data), Some(&json!(1)));
/// assert_eq!(JsonPointer::parse("/items/x").lookup(&data), None);
/// assert_eq!(JsonPointer::parse("/").lookup(&data), Some(&data));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// A pointer to the whole data tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a pointer string.
    ///
    /// The leading `/` is optional, so `"items/0"` and `"/items/0"` are the
    /// same pointer.
    pub fn parse(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            return Self::root();
        }
        let path = path.strip_prefix('/').unwrap_or(path);
        let segments = path.split('/').map(unescape).collect();
        Self { segments }
    }

    /// Build a pointer from already unescaped segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The unescaped path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if this pointer addresses the whole tree.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk `data` along this pointer.
    pub fn lookup<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        let mut current = data;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                    return None;
                }
            };
        }
        Some(current)
    }
}

/// Undo RFC 6901 escaping. `~1` is replaced before `~0` so that `~01`
/// decodes to `~1` rather than `/`.
fn unescape(segment: &str) -> String {
    if segment.contains('~') {
        segment.replace("~1", "/").replace("~0", "~")
    } else {
        segment.to_string()
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl From<&str> for JsonPointer {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}
