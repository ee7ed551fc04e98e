//! Name component

use std::fmt;

/// Maximum number of UTF-8 bytes a name can hold
pub const NAME_CAPACITY: usize = 63;

/// Fixed-capacity display name
///
/// Names longer than [`NAME_CAPACITY`] bytes are truncated on a character boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NameComponent {
    name: String,
}

impl NameComponent {
    /// Create a name, truncating it to capacity
    pub fn new(name: &str) -> Self {
        let mut component = Self::default();
        component.set(name);
        component
    }

    /// Replace the name, truncating it to capacity
    pub fn set(&mut self, name: &str) {
        let mut end = name.len().min(NAME_CAPACITY);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        if end < name.len() {
            log::debug!("Truncating name '{}' to {} bytes", name, end);
        }
        self.name.clear();
        self.name.push_str(&name[..end]);
    }

    /// The stored name
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_kept() {
        assert_eq!(NameComponent::new("camera").as_str(), "camera");
    }

    #[test]
    fn test_long_name_truncated() {
        let long = "x".repeat(100);
        assert_eq!(NameComponent::new(&long).as_str().len(), NAME_CAPACITY);
    }

    #[test]
    fn test_truncation_respects_char_boundary() {
        // 62 ASCII bytes followed by a two-byte character straddling the cap
        let name = format!("{}é", "a".repeat(62));
        let component = NameComponent::new(&name);
        assert_eq!(component.as_str().len(), 62);
    }
}
