use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::HashMap;

use super::SerializationError;

/// Environment variable names mapped to their values.
///
/// Entries keep the order they were inserted in. Inserting a name that is
/// already present replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMap {
    entries: Vec<(String, String)>,
    /// Position of each name in `entries`
    index: HashMap<String, usize>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Build a map from a JSON object, coercing scalars to text.
    ///
    /// Numbers and booleans use their JSON spelling. `null`, arrays and
    /// nested objects are rejected.
    pub fn from_json(value: &Value) -> Result<Self, SerializationError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(SerializationError::NotAnObject {
                    kind: json_kind(other),
                })
            }
        };

        let mut map = Self::new();
        for (name, value) in object {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(SerializationError::UnsupportedValue {
                        name: name.clone(),
                        kind: json_kind(other),
                    })
                }
            };
            map.insert(name.clone(), text);
        }

        Ok(map)
    }

    /// Snapshot the current process environment through a filter
    pub fn capture(filter: &VarFilter) -> Result<Self, SerializationError> {
        Self::from_os_vars(std::env::vars_os(), filter)
    }

    pub(crate) fn from_os_vars<I>(vars: I, filter: &VarFilter) -> Result<Self, SerializationError>
    where
        I: IntoIterator<Item = (std::ffi::OsString, std::ffi::OsString)>,
    {
        let mut map = Self::new();

        for (name, value) in vars {
            let lossy = name.to_string_lossy();
            if !filter.matches(&lossy) {
                continue;
            }

            let name = name
                .into_string()
                .map_err(|n| SerializationError::NonUnicodeName(n.to_string_lossy().into_owned()))?;
            let value = value
                .into_string()
                .map_err(|_| SerializationError::NonUnicodeValue(name.clone()))?;

            map.insert(name, value);
        }

        tracing::debug!("Captured {} environment variables", map.len());
        Ok(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Serializes as a JSON object in insertion order
impl Serialize for EnvironmentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Selects which environment variables take part in a fingerprint
#[derive(Debug, Clone)]
pub struct VarFilter {
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl VarFilter {
    /// An empty include list selects every variable. Excludes always win.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let include = if include.is_empty() {
            None
        } else {
            Some(build_globset(include)?)
        };

        Ok(Self {
            include,
            exclude: build_globset(exclude)?,
        })
    }

    pub fn all() -> Self {
        Self {
            include: None,
            exclude: GlobSet::empty(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.exclude.is_match(name) {
            return false;
        }
        self.include.as_ref().map_or(true, |set| set.is_match(name))
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .with_context(|| format!("Invalid variable pattern: {}", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build variable filter")
}
