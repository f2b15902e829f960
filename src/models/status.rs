use serde::{Deserialize, Serialize};

/// Lifecycle status of a mission or a target.
///
/// - `Ongoing`: Work is in progress
/// - `Completed`: Terminal; there is no transition back
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ongoing,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "ONGOING",
            Self::Completed => "COMPLETED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ONGOING" => Some(Self::Ongoing),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_uppercase() {
        assert_eq!(
            serde_json::to_string(&Status::Ongoing).unwrap(),
            "\"ONGOING\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"COMPLETED\"").unwrap(),
            Status::Completed
        );
    }

    #[test]
    fn from_str_matches_as_str() {
        for status in [Status::Ongoing, Status::Completed] {
            assert_eq!(Status::from_str(status.as_str()), Some(status));
        }
        assert_eq!(Status::from_str("ongoing"), None);
    }
}
