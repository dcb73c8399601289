// Configuration path input.
//
// The device API accepts three shapes of path input: none at all, a single
// location given as a flat list of segments, or a list mixing plain segments
// with nested locations that gets split into a batch of operations. The
// shapes are modeled explicitly so the payload builder can match on them
// exhaustively instead of probing JSON at every call site.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One element of a batched path input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    /// A plain segment, appended to the location being accumulated.
    Segment(String),
    /// A complete location of its own.
    Location(Vec<String>),
}

impl From<&str> for PathElement {
    fn from(segment: &str) -> Self {
        Self::Segment(segment.to_owned())
    }
}

impl From<String> for PathElement {
    fn from(segment: String) -> Self {
        Self::Segment(segment)
    }
}

impl<S: Into<String>> From<Vec<S>> for PathElement {
    fn from(location: Vec<S>) -> Self {
        Self::Location(location.into_iter().map(Into::into).collect())
    }
}

/// Path input of a single API call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<PathElement>")]
pub enum ConfigPath {
    /// No path constraint (`path: []`).
    #[default]
    Empty,
    /// Exactly one configuration location.
    Location(Vec<String>),
    /// Mixed segments and nested locations, split into one operation per
    /// location.
    Batch(Vec<PathElement>),
}

impl ConfigPath {
    /// Single location from anything yielding string-like segments.
    pub fn location<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Location(segments.into_iter().map(Into::into).collect())
    }

    /// One operation per location, in order.
    pub fn batch<I, L, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Batch(
            locations
                .into_iter()
                .map(|loc| PathElement::Location(loc.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// The `["now"]` path used by reboot and poweroff when no schedule is given.
    pub fn now() -> Self {
        Self::location(["now"])
    }

    /// Classify raw elements into the narrowest matching shape.
    ///
    /// Nothing → `Empty`; only plain segments → `Location`; a single nested
    /// location → that location unwrapped; anything else → `Batch`.
    pub fn from_elements(mut elements: Vec<PathElement>) -> Self {
        if elements.is_empty() {
            return Self::Empty;
        }

        if let [PathElement::Location(location)] = elements.as_mut_slice() {
            return Self::Location(std::mem::take(location));
        }

        if elements.iter().all(|e| matches!(e, PathElement::Segment(_))) {
            return Self::Location(
                elements
                    .into_iter()
                    .filter_map(|e| match e {
                        PathElement::Segment(s) => Some(s),
                        PathElement::Location(_) => None,
                    })
                    .collect(),
            );
        }

        Self::Batch(elements)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Location(_) => false,
            Self::Batch(elements) => elements.is_empty(),
        }
    }
}

impl From<ConfigPath> for Vec<PathElement> {
    fn from(path: ConfigPath) -> Self {
        match path {
            ConfigPath::Empty => Vec::new(),
            ConfigPath::Location(segments) => {
                segments.into_iter().map(PathElement::Segment).collect()
            }
            ConfigPath::Batch(elements) => elements,
        }
    }
}

impl<'de> Deserialize<'de> for ConfigPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<PathElement>::deserialize(deserializer)?;
        Ok(Self::from_elements(elements))
    }
}

impl From<Vec<String>> for ConfigPath {
    fn from(segments: Vec<String>) -> Self {
        Self::location(segments)
    }
}

impl From<&[&str]> for ConfigPath {
    fn from(segments: &[&str]) -> Self {
        Self::location(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for ConfigPath {
    fn from(segments: [&str; N]) -> Self {
        Self::location(segments)
    }
}

impl From<Vec<Vec<String>>> for ConfigPath {
    fn from(locations: Vec<Vec<String>>) -> Self {
        Self::batch(locations)
    }
}

impl From<Vec<PathElement>> for ConfigPath {
    fn from(elements: Vec<PathElement>) -> Self {
        Self::from_elements(elements)
    }
}

impl fmt::Display for ConfigPath {
    /// Space-separated segments, locations separated by `; `.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Location(segments) => f.write_str(&segments.join(" ")),
            Self::Batch(elements) => {
                let mut first = true;
                let mut in_segments = false;
                for element in elements {
                    match element {
                        PathElement::Segment(s) => {
                            if !first {
                                f.write_str(if in_segments { " " } else { "; " })?;
                            }
                            f.write_str(s)?;
                            in_segments = true;
                        }
                        PathElement::Location(location) => {
                            if !first {
                                f.write_str("; ")?;
                            }
                            f.write_str(&location.join(" "))?;
                            in_segments = false;
                        }
                    }
                    first = false;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flat_elements_collapse_to_location() {
        let path = ConfigPath::from_elements(vec!["interfaces".into(), "ethernet".into()]);
        assert_eq!(path, ConfigPath::location(["interfaces", "ethernet"]));
    }

    #[test]
    fn single_nested_location_is_unwrapped() {
        let path = ConfigPath::from_elements(vec![vec!["system", "host-name"].into()]);
        assert_eq!(path, ConfigPath::location(["system", "host-name"]));
    }

    #[test]
    fn mixed_elements_stay_batched() {
        let elements: Vec<PathElement> = vec!["a".into(), vec!["b", "c"].into()];
        assert_eq!(
            ConfigPath::from_elements(elements.clone()),
            ConfigPath::Batch(elements)
        );
    }

    #[test]
    fn deserializes_every_shape() {
        let empty: ConfigPath = serde_json::from_str("[]").unwrap();
        assert_eq!(empty, ConfigPath::Empty);

        let flat: ConfigPath = serde_json::from_str(r#"["system","ntp"]"#).unwrap();
        assert_eq!(flat, ConfigPath::location(["system", "ntp"]));

        let batch: ConfigPath = serde_json::from_str(r#"[["a","b"],["c"]]"#).unwrap();
        assert_eq!(batch, ConfigPath::batch([vec!["a", "b"], vec!["c"]]));

        let mixed: ConfigPath = serde_json::from_str(r#"["a",["b","c"],"d"]"#).unwrap();
        assert!(matches!(mixed, ConfigPath::Batch(ref e) if e.len() == 3));
    }

    #[test]
    fn serializes_back_to_raw_shape() {
        let path = ConfigPath::batch([vec!["a"], vec!["b", "c"]]);
        assert_eq!(
            serde_json::to_string(&path).unwrap(),
            r#"[["a"],["b","c"]]"#
        );
        assert_eq!(serde_json::to_string(&ConfigPath::Empty).unwrap(), "[]");
    }

    #[test]
    fn display_joins_segments() {
        assert_eq!(ConfigPath::now().to_string(), "now");
        let batch = ConfigPath::Batch(vec!["a".into(), "b".into(), vec!["c", "d"].into()]);
        assert_eq!(batch.to_string(), "a b; c d");
    }

    #[test]
    fn empty_batch_is_empty() {
        assert!(ConfigPath::Batch(Vec::new()).is_empty());
        assert!(!ConfigPath::now().is_empty());
    }
}
