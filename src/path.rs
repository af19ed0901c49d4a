//! Property paths.
//!
//! A [`PropertyPath`] names a node of the validated object graph relative to
//! the validation root. It grows by one segment per descent: the property name
//! when a child adaptor enters a nested object, then an index when a collection
//! adaptor enters an element. Rendered, a path reads `Addresses[2].City`.
//!
//! ```rust
//! use inquest::PropertyPath;
//!
//! let city = PropertyPath::root()
//!     .push_field("Addresses")
//!     .push_index(2)
//!     .push_field("City");
//!
//! assert_eq!(city.to_string(), "Addresses[2].City");
//! assert_eq!(PropertyPath::parse("Addresses[2].City"), city);
//! ```

use std::fmt::{self, Display, Write};

use serde::{Serialize, Serializer};

/// One step from a node to its child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named property.
    Field(String),
    /// Zero-based position in a collection, counted before any filtering.
    Index(usize),
}

/// Location of a node relative to the validation root.
///
/// The root is the empty path and renders as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// A one-segment path naming a top-level property.
    pub fn from_field(name: impl Into<String>) -> Self {
        let mut path = Self::root();
        path.add(name);
        path
    }

    /// Parses a rendered path such as `Customer.Addresses[0].City`.
    ///
    /// A bracketed part that is not a non-negative integer stays part of the
    /// field name, so parsing never fails.
    pub fn parse(rendered: &str) -> Self {
        let mut path = Self::root();
        for part in rendered.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };
            let mut name = name.to_string();
            while let Some((index, tail)) = leading_index(rest) {
                if !name.is_empty() {
                    path.add(std::mem::take(&mut name));
                }
                path.add_index(index);
                rest = tail;
            }
            name.push_str(rest);
            path.add(name);
        }
        path
    }

    /// Copy of this path with `name` appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.add(name);
        path
    }

    /// Copy of this path with `index` appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.add_index(index);
        path
    }

    /// Appends `name`. An empty name leaves the path unchanged.
    pub fn add(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.segments.push(PathSegment::Field(name));
        }
    }

    pub fn add_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True when `self` is `ancestor` or lies underneath it.
    ///
    /// Comparison is per segment, so `CustomerId` is not under `Customer`.
    pub fn starts_with(&self, ancestor: &PropertyPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }
}

/// Splits `[n]` off the front of `rest`.
fn leading_index(rest: &str) -> Option<(usize, &str)> {
    let inner = rest.strip_prefix('[')?;
    let close = inner.find(']')?;
    let index = inner[..close].parse().ok()?;
    Some((index, &inner[close + 1..]))
}

impl Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => {
                    if !first {
                        f.write_char('.')?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for PropertyPath {
    fn from(rendered: &str) -> Self {
        Self::parse(rendered)
    }
}

impl Serialize for PropertyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        assert!(PropertyPath::root().is_root());
        assert_eq!(PropertyPath::root().to_string(), "");
    }

    #[test]
    fn test_rendering() {
        let mut path = PropertyPath::from_field("Orders");
        path.add_index(3);
        path.add("Total");
        assert_eq!(path.to_string(), "Orders[3].Total");
        assert_eq!(PropertyPath::root().push_index(0).push_field("Name").to_string(), "[0].Name");
    }

    #[test]
    fn test_empty_name_is_ignored() {
        let mut path = PropertyPath::from_field("");
        path.add("");
        assert!(path.is_root());
    }

    #[test]
    fn test_push_leaves_original_untouched() {
        let base = PropertyPath::from_field("Addresses");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "Addresses");
        assert_eq!(first.to_string(), "Addresses[0]");
        assert_eq!(second.to_string(), "Addresses[1]");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            PropertyPath::parse("Customer.Addresses[2].City").segments(),
            [
                PathSegment::Field("Customer".into()),
                PathSegment::Field("Addresses".into()),
                PathSegment::Index(2),
                PathSegment::Field("City".into()),
            ]
        );
        assert_eq!(
            PropertyPath::parse("Grid[1][4]").segments(),
            [
                PathSegment::Field("Grid".into()),
                PathSegment::Index(1),
                PathSegment::Index(4),
            ]
        );
        assert!(PropertyPath::parse("").is_root());
    }

    #[test]
    fn test_parse_keeps_non_numeric_brackets_in_name() {
        assert_eq!(
            PropertyPath::parse("Tags[x]").segments(),
            [PathSegment::Field("Tags[x]".into())]
        );
    }

    #[test]
    fn test_parse_round_trips_rendering() {
        for rendered in ["Age", "Addresses[0].City", "[3].Name", "Order.Lines[10].Quantity"] {
            assert_eq!(PropertyPath::parse(rendered).to_string(), rendered);
        }
    }

    #[test]
    fn test_starts_with_compares_segments() {
        let customer = PropertyPath::from_field("Customer");
        let city = customer.push_field("Address").push_field("City");
        assert!(city.starts_with(&customer));
        assert!(customer.starts_with(&customer));
        assert!(!customer.starts_with(&city));
        assert!(!PropertyPath::from_field("CustomerId").starts_with(&customer));
        assert!(customer.push_index(1).starts_with(&customer));
    }

    #[test]
    fn test_serializes_as_string() {
        let path = PropertyPath::from_field("Addresses").push_index(1);
        assert_eq!(
            serde_json::to_value(&path).unwrap(),
            serde_json::json!("Addresses[1]")
        );
    }
}
