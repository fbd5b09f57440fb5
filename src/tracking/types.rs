//! Identifier type for tracked tags.

/// Marker identifier reported by the detector.
///
/// One tracked object exists per identifier. The value is the raw integer
/// decoded from the fiducial and is written unchanged into outgoing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub i32);

impl TagId {
    /// Create a new TagId with the given value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag{}", self.0)
    }
}

impl From<i32> for TagId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_id_equality() {
        assert_eq!(TagId::new(7), TagId::from(7));
        assert_ne!(TagId::new(7), TagId::new(8));
    }

    #[test]
    fn test_tag_id_display() {
        assert_eq!(format!("{}", TagId::new(-3)), "Tag-3");
    }

    #[test]
    fn test_tag_id_orders_by_raw_value() {
        let mut ids = vec![TagId::new(4), TagId::new(-2), TagId::new(0), TagId::new(-10)];
        ids.sort();
        assert_eq!(ids, vec![TagId::new(-10), TagId::new(-2), TagId::new(0), TagId::new(4)]);
        assert!(TagId::new(-1) < TagId::new(1));
        assert_eq!(TagId::new(i32::MIN).0, i32::MIN);
    }
}
