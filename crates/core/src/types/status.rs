//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Severity of a toast notification.
///
/// Serialized under the `type` field of a toast as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl ToastKind {
    /// The wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToastKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            _ => Err(format!("invalid toast kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ToastKind::Warning).unwrap(),
            "\"warning\""
        );
        let kind: ToastKind = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(kind, ToastKind::Success);
    }

    #[test]
    fn test_from_str_matches_display() {
        for kind in [
            ToastKind::Success,
            ToastKind::Error,
            ToastKind::Info,
            ToastKind::Warning,
        ] {
            assert_eq!(kind.to_string().parse::<ToastKind>().unwrap(), kind);
        }
        assert!("fatal".parse::<ToastKind>().is_err());
    }
}
