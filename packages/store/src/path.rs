//! Path type with validated Unicode identifier components.

use std::fmt;

/// Errors related to path parsing and resolution.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path component is not a valid Unicode identifier.
    #[error("invalid path component '{component}' at position {position}: {message}")]
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
    /// The path string is invalid.
    #[error("invalid path: {message}")]
    InvalidPath { message: String },
    /// Resolution descended into a scalar value instead of a child store.
    #[error("cannot descend through value '{component}' at position {position}")]
    ValueSegment { component: String, position: usize },
}

/// A validated path addressing a value or child store from a given root.
///
/// Path components must be valid Unicode identifiers (per UAX#31) or
/// numeric strings (for iteration-numbered keys). Empty segments are
/// rejected: a leading, trailing, or doubled slash is an error, not a
/// normalization, because paths are write addresses and `data//x` must
/// not silently alias `data/x`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// Parse a path string, validating components.
    ///
    /// # Path Syntax
    ///
    /// - Components are separated by `/`
    /// - The path must contain at least one component
    /// - Empty components (leading, trailing, or doubled slashes) are errors
    /// - Each component must be a valid identifier or numeric string
    ///
    /// # Examples
    ///
    /// ```rust
    /// use stephist_store::Path;
    ///
    /// let path = Path::parse("designs/3/objective").unwrap();
    /// assert_eq!(path.len(), 3);
    ///
    /// assert!(Path::parse("designs//objective").is_err());
    /// assert!(Path::parse("/designs").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::InvalidPath {
                message: "empty path".to_string(),
            });
        }

        let components: Vec<String> = s.split('/').map(|c| c.to_string()).collect();

        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }

        Ok(Path { components })
    }

    /// Try to create a path from components, validating each.
    pub fn try_from_components(components: Vec<String>) -> Result<Self, PathError> {
        if components.is_empty() {
            return Err(PathError::InvalidPath {
                message: "empty path".to_string(),
            });
        }
        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }
        Ok(Path { components })
    }

    /// Validate a single path component.
    fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
        if component.is_empty() {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "empty segment".to_string(),
            });
        }

        // Allow pure numeric strings (for iteration-numbered keys)
        if component.chars().all(|c| c.is_ascii_digit()) {
            return Ok(());
        }

        let mut chars = component.chars();
        let first = chars.next().expect("component checked non-empty");

        // First char: XID_Start or underscore followed by XID_Continue
        let valid_start = unicode_ident::is_xid_start(first)
            || (first == '_'
                && chars
                    .clone()
                    .next()
                    .is_some_and(unicode_ident::is_xid_continue));

        if !valid_start {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "must start with a letter or underscore followed by letter/digit"
                    .to_string(),
            });
        }

        // Rest: XID_Continue
        for c in chars {
            if !unicode_ident::is_xid_continue(c) {
                return Err(PathError::InvalidComponent {
                    component: component.to_string(),
                    position,
                    message: format!("invalid character '{}' in identifier", c),
                });
            }
        }

        Ok(())
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// A parsed path always has at least one component; the conventional
    /// probe exists for collection-style call sites.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Path { components }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

/// Macro for creating paths at compile time.
///
/// # Example
///
/// ```rust
/// use stephist_store::path;
///
/// let p = path!("designs/3/objective");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s).expect("invalid path literal")
    };
}
