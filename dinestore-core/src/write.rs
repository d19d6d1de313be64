//! Write acknowledgment reporting.

use serde::{Deserialize, Serialize};

/// Normalized outcome of a replace operation.
///
/// Acknowledgment and modification are reported separately: a store can accept a
/// write that changes nothing (identical content, or no matching document).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Whether the store confirmed it accepted the write.
    pub acknowledged: bool,
    /// Number of documents actually altered.
    pub modified_count: u64,
}

impl WriteResult {
    pub fn new(acknowledged: bool, modified_count: u64) -> Self {
        Self { acknowledged, modified_count }
    }

    /// Acknowledged and at least one document changed.
    pub fn is_modified(&self) -> bool {
        self.acknowledged && self.modified_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledgment_alone_is_not_a_modification() {
        assert!(WriteResult::new(true, 1).is_modified());
        assert!(!WriteResult::new(true, 0).is_modified());
        assert!(!WriteResult::new(false, 0).is_modified());
        assert!(!WriteResult::new(false, 3).is_modified());
    }
}
