use std::path::Path;

/// Separator between display name and path in a persisted playlist entry.
pub const NAME_SEPARATOR: &str = "|#|";

/// A playlist entry: a path (or stream URL) with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub path: String,
    pub name: Option<String>,
}

impl TrackRef {
    pub fn bare(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    pub fn named(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
        }
    }

    /// The explicit name, or the final component of the path.
    pub fn display_name(&self) -> &str {
        if let Some(name) = self.name.as_deref() {
            return name;
        }
        Path::new(&self.path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.path)
    }

    /// Encode as stored in the session file: `path` or `name|#|path`.
    pub fn encode(&self) -> String {
        match &self.name {
            Some(name) => format!("{name}{NAME_SEPARATOR}{}", self.path),
            None => self.path.clone(),
        }
    }

    /// Inverse of [`TrackRef::encode`]; splits on the first separator only.
    pub fn decode(raw: &str) -> Self {
        match raw.split_once(NAME_SEPARATOR) {
            Some((name, path)) => Self::named(name, path),
            None => Self::bare(raw),
        }
    }
}
