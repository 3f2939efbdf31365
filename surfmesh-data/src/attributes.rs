//! Ordered registry of named per-vertex attributes.
//!
//! Registration order is kept forever: it fixes the column order of the PLY
//! `property` lines. Position attributes are registered by name only, their
//! values live in [`Mesh::vertices`](crate::Mesh::vertices).

/// Prefix shared by every attribute that maps to a PLY vertex property.
pub const VERTEX_PREFIX: &str = "vertex_";
pub const VERTEX_X: &str = "vertex_x";
pub const VERTEX_Y: &str = "vertex_y";
pub const VERTEX_Z: &str = "vertex_z";
pub const VERTEX_CHARGE: &str = "vertex_charge";

/// Axis index (0, 1, 2) of a position attribute name.
pub fn position_axis(name: &str) -> Option<usize> {
    match name {
        VERTEX_X => Some(0),
        VERTEX_Y => Some(1),
        VERTEX_Z => Some(2),
        _ => None,
    }
}

/// PLY property name for an attribute: the text after `vertex_`.
pub fn property_name(attribute: &str) -> Option<&str> {
    attribute.strip_prefix(VERTEX_PREFIX)
}

/// Whether `name` can be stored and written as a single PLY property token:
/// non-empty, no whitespace, and not the bare `vertex_` prefix.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != VERTEX_PREFIX && !name.chars().any(char::is_whitespace)
}

/// Attribute name for a PLY vertex property (`x` -> `vertex_x`).
pub fn attribute_name(property: &str) -> String {
    format!("{VERTEX_PREFIX}{property}")
}

/// Insertion-ordered map from attribute name to values.
///
/// An entry without values is a name-only registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRegistry {
    entries: Vec<(String, Option<Vec<f32>>)>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name without storing values. Returns `true` if it was new.
    pub fn register(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.push((name.to_string(), None));
        true
    }

    /// Store `values` under `name`, registering it if needed.
    /// Returns `true` if the name was new.
    pub fn insert(&mut self, name: &str, values: Vec<f32>) -> bool {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => {
                *slot = Some(values);
                false
            }
            None => {
                self.entries.push((name.to_string(), Some(values)));
                true
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Stored values for `name`; `None` for unknown or name-only entries.
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, values)| values.as_deref())
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries that carry stored values, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries
            .iter()
            .filter_map(|(n, values)| values.as_deref().map(|v| (n.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_registration_order() {
        let mut registry = AttributeRegistry::new();
        assert!(registry.insert("vertex_a", vec![1.0]));
        assert!(registry.insert("vertex_b", vec![2.0]));
        assert!(!registry.insert("vertex_a", vec![3.0]));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["vertex_a", "vertex_b"]);
        assert_eq!(registry.get("vertex_a"), Some(&[3.0][..]));
    }

    #[test]
    fn test_name_only_registration() {
        let mut registry = AttributeRegistry::new();
        assert!(registry.register(VERTEX_X));
        assert!(!registry.register(VERTEX_X));
        assert!(registry.contains(VERTEX_X));
        assert_eq!(registry.get(VERTEX_X), None);
        assert_eq!(registry.iter().count(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_property_name_strips_prefix_once() {
        assert_eq!(property_name("vertex_charge"), Some("charge"));
        assert_eq!(property_name("vertex_si_ddc"), Some("si_ddc"));
        assert_eq!(property_name("charge"), None);
        assert_eq!(attribute_name("hbond"), "vertex_hbond");
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("vertex_charge"));
        assert!(is_valid_name("iface"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("vertex_"));
        assert!(!is_valid_name("vertex_two words"));
        assert!(!is_valid_name("vertex_tab\t"));
    }

    #[test]
    fn test_position_axis() {
        assert_eq!(position_axis(VERTEX_X), Some(0));
        assert_eq!(position_axis(VERTEX_Z), Some(2));
        assert_eq!(position_axis(VERTEX_CHARGE), None);
    }
}
