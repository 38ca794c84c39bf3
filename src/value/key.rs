//! Property keys.

use std::fmt;
use std::sync::Arc;

/// Largest valid array index plus one (`2^32 - 1`).
pub const MAX_ARRAY_LENGTH: usize = 4_294_967_295;

/// The name of an object property.
///
/// Keys are always strings; element positions of arrays are the canonical
/// decimal form of the index (`"0"`, `"1"`, ...). [`PropertyKey::as_index`]
/// recovers the position.
///
/// # Examples
///
/// ```rust
/// use utilbelt::value::PropertyKey;
///
/// assert_eq!(PropertyKey::from(3usize).as_index(), Some(3));
/// assert_eq!(PropertyKey::from("03").as_index(), None);
/// assert_eq!(PropertyKey::from("name").as_str(), "name");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey(Arc<str>);

impl PropertyKey {
    /// Creates a key from a string.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the array index this key denotes, if it is a canonical one.
    ///
    /// A canonical index has no sign, no leading zeros (except `"0"` itself)
    /// and is below [`MAX_ARRAY_LENGTH`].
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        let text = self.as_str();
        let bytes = text.as_bytes();
        if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
            return None;
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return None;
        }
        text.parse::<usize>()
            .ok()
            .filter(|index| *index < MAX_ARRAY_LENGTH)
    }

    /// Returns `true` for the `length` key.
    #[must_use]
    pub fn is_length(&self) -> bool {
        self.as_str() == "length"
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<Arc<str>> for PropertyKey {
    fn from(name: Arc<str>) -> Self {
        Self(name)
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        Self(Arc::from(index.to_string()))
    }
}

impl From<&PropertyKey> for PropertyKey {
    fn from(key: &PropertyKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", self.as_str())
    }
}

/// Orders keys the way own properties are enumerated: integer-like keys in
/// ascending numeric order, then the rest in their given (insertion) order.
pub(crate) fn enumeration_order(keys: Vec<PropertyKey>) -> Vec<PropertyKey> {
    let (mut indexed, named): (Vec<_>, Vec<_>) =
        keys.into_iter().partition(|key| key.as_index().is_some());
    indexed.sort_by_key(|key| key.as_index());
    indexed.extend(named);
    indexed
}
