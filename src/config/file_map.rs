//! File listings of an artifact source
//!
//! A source lists its files either as plain names (copied under the same
//! name) or as an explicit `source: destination` mapping. Both shapes are
//! resolved once, when the manifest is loaded, into a [`FileMap`].

use serde_yaml::Value;

use crate::error::{FwError, Result};

use super::check_relative;

/// A file listing as declared in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileList {
    /// `[a, b]` - every name maps to itself
    Names(Vec<String>),
    /// `{a: x/a, b: y/b}` - explicit source to destination pairs
    Explicit(Vec<(String, String)>),
}

impl FileList {
    /// Classify a YAML value as one of the two accepted shapes
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Sequence(items) => items
                .iter()
                .map(|item| as_string(item, "file name"))
                .collect::<Result<Vec<_>>>()
                .map(FileList::Names),
            Value::Mapping(mapping) => mapping
                .iter()
                .map(|(k, v)| Ok((as_string(k, "file map key")?, as_string(v, "file map value")?)))
                .collect::<Result<Vec<_>>>()
                .map(FileList::Explicit),
            other => Err(FwError::ConfigInvalid {
                message: format!(
                    "invalid file map: expected a list of names or a mapping, got {}",
                    describe(other)
                ),
            }),
        }
    }
}

fn as_string(value: &Value, what: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(FwError::ConfigInvalid {
            message: format!("invalid {}: expected a string, got {}", what, describe(other)),
        }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Canonical `source key -> destination path` mapping, in declaration order
///
/// Keys are unique. Destinations are relative paths and may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    entries: Vec<(String, String)>,
}

impl FileMap {
    /// Identity mapping over `names`
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(names.into_iter().map(|n| {
            let n = n.into();
            (n.clone(), n)
        }))
    }

    /// Mapping from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (key, dest) in pairs {
            let key = key.into();
            let dest = dest.into();

            if entries.iter().any(|(k, _)| *k == key) {
                return Err(FwError::ConfigInvalid {
                    message: format!("duplicate file map entry '{}'", key),
                });
            }
            check_relative(&key, "file map key")?;
            check_relative(&dest, "file map destination")?;

            entries.push((key, dest));
        }
        Ok(Self { entries })
    }

    /// Normalize a YAML file listing
    pub fn from_value(value: &Value) -> Result<Self> {
        FileList::from_value(value)?.try_into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl TryFrom<FileList> for FileMap {
    type Error = FwError;

    fn try_from(list: FileList) -> Result<Self> {
        match list {
            FileList::Names(names) => FileMap::from_names(names),
            FileList::Explicit(pairs) => FileMap::from_pairs(pairs),
        }
    }
}
