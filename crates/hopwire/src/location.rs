//! Hierarchical location paths
//!
//! A [`Location`] scopes a registration's applicability. The empty (root)
//! location is global; a registration at `"a/b"` applies to requests at
//! `"a/b"` and anything nested below it, unless a more specific registration
//! shadows it. Locations are immutable value objects compared by content.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Ordered path of non-empty segments used to scope registrations
///
/// The root location has no segments and displays as `""`. Prefixes of a path
/// form a total order by length, which is what makes longest-prefix lookup
/// deterministic.
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Location {
    segments: Vec<String>,
}

impl Location {
    /// The global (root) location
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated path into a location
    ///
    /// The empty string parses to the root location. Empty segments
    /// (`"a//b"`, `"/a"`, `"a/"`) are rejected with
    /// [`Error::InvalidLocation`].
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::root());
        }
        let segments: Vec<String> = path.split('/').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::invalid_location(path));
        }
        Ok(Self { segments })
    }

    /// Whether this is the global location
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments in the path
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The path segments, most general first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// A new location with one extra trailing segment
    pub fn child(&self, segment: &str) -> Result<Self> {
        if segment.is_empty() || segment.contains('/') {
            return Err(Error::invalid_location(segment));
        }
        let mut segments = self.segments.clone();
        segments.push(segment.to_owned());
        Ok(Self { segments })
    }

    /// The location one level up, or `None` at the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Whether `self` is a (non-strict) prefix of `other`
    pub fn is_prefix_of(&self, other: &Location) -> bool {
        other.segments.len() >= self.segments.len()
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Iterate from this location up to the root, most specific first
    ///
    /// Yields `self`, then each parent in turn, ending with the root. This is
    /// the hop order of the fallback chain.
    pub fn ancestors(&self) -> impl Iterator<Item = Location> + '_ {
        (0..=self.segments.len()).rev().map(|len| Location {
            segments: self.segments[..len].to_vec(),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
