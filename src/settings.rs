//! In-memory store for chart style settings
//!
//! Keys are dot-delimited matplotlib-style identifiers (`lines.linewidth`)
//! and values are opaque strings; the remote renderer is responsible for
//! interpreting or rejecting them.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Default style sheet shown when the window opens, mirroring the common
/// matplotlib rcParams. Any string is a legal value.
const DEFAULT_STYLE: &[(&str, &str)] = &[
    // General settings
    ("figure.figsize", "8, 6"),
    ("figure.dpi", "80"),
    // Axes settings
    ("axes.facecolor", "w"),
    ("axes.edgecolor", "k"),
    ("axes.linewidth", "1.0"),
    ("axes.grid", "False"),
    ("axes.titlesize", "large"),
    ("axes.labelsize", "medium"),
    // Lines settings
    ("lines.linewidth", "1.0"),
    ("lines.linestyle", "-"),
    ("lines.color", "b"),
    ("lines.marker", "None"),
    ("lines.markerfacecolor", "auto"),
    ("lines.markeredgecolor", "auto"),
    ("lines.markeredgewidth", "0.5"),
    ("lines.markersize", "6"),
    // Marker props
    ("markers.fillstyle", "full"),
    // Patches
    ("patch.linewidth", "1.0"),
    ("patch.facecolor", "b"),
    ("patch.edgecolor", "k"),
    // Font
    ("font.family", "sans-serif"),
    ("font.style", "normal"),
    ("font.size", "12.0"),
    // Text
    ("text.color", "k"),
    ("text.usetex", "False"),
    // Ticks
    ("xtick.major.size", "4"),
    ("xtick.minor.size", "2"),
    ("ytick.major.size", "4"),
    ("ytick.minor.size", "2"),
    // Grid
    ("grid.color", "k"),
    ("grid.linestyle", ":"),
    ("grid.linewidth", "0.5"),
    // Legend
    ("legend.fontsize", "large"),
    ("legend.frameon", "True"),
    // Figure titles
    ("figure.titlesize", "medium"),
    ("figure.titleweight", "normal"),
    // Image
    ("image.cmap", "jet"),
    ("image.aspect", "equal"),
    // Contour
    ("contour.negative_linestyle", "dashed"),
    // Errorbar
    ("errorbar.capsize", "3"),
    // Scatter
    ("scatter.marker", "o"),
    // Boxplot
    ("boxplot.notch", "False"),
    ("boxplot.vertical", "True"),
    // Agg rendering
    ("agg.path.chunksize", "0"),
];

/// Editable mapping of style keys to string values.
///
/// Entries keep their insertion order so the form lays fields out the same
/// way on every frame. Keys are unique; values are never validated here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSettings {
    entries: Vec<(String, String)>,
}

impl StyleSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default style sheet injected at app construction.
    pub fn matplotlib_defaults() -> Self {
        let entries = DEFAULT_STYLE
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { entries }
    }

    /// Replace `key`'s value, or append the key if it is not present yet.
    /// Every other entry is left untouched.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// All entries in insertion order, with values editable in place.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.entries
            .iter_mut()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Distinct namespace prefixes, each listed once in first-seen order.
    pub fn group_prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = Vec::new();
        for (key, _) in &self.entries {
            let prefix = key_prefix(key);
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }
        prefixes
    }

    /// Entries whose namespace (text before the first `.`) equals `prefix`.
    ///
    /// The match is exact, so `axes` never picks up an `axes3d.*` key.
    pub fn group<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries
            .iter()
            .filter(move |(key, _)| key_prefix(key) == prefix)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Same partition as [`group`](Self::group), with values editable in place.
    pub fn group_mut<'a>(
        &'a mut self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a mut String)> {
        self.entries
            .iter_mut()
            .filter(move |(key, _)| key_prefix(key) == prefix)
            .map(|(key, value)| (key.as_str(), value))
    }
}

/// Namespace of a key: everything before the first `.`, or the whole key
/// when it carries no delimiter.
pub fn key_prefix(key: &str) -> &str {
    key.split_once('.').map_or(key, |(prefix, _)| prefix)
}

/// Serialized as a flat JSON object of string-to-string entries, the shape
/// the renderer endpoint expects inside the request payload.
impl Serialize for StyleSettings {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
