//! # Control Item Ratings
//!
//! The five states a control item can be in. Four are real assessment
//! outcomes; `NotStarted` is the state every item is created in.
//!
//! | Rating          | Weight | In compliance denominator |
//! |-----------------|-------:|:-------------------------:|
//! | `compliant`     | 1.0    | yes |
//! | `partial`       | 0.5    | yes |
//! | `non_compliant` | 0.0    | yes |
//! | `not_applicable`| none   | no  |
//! | `not_started`   | 0.0    | yes |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;

/// Outcome recorded against a single control item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Not yet assessed.
    #[default]
    NotStarted,
    /// Requirement fully met.
    Compliant,
    /// Requirement partially met.
    Partial,
    /// Requirement not met.
    NonCompliant,
    /// Requirement does not apply to the assessed system.
    NotApplicable,
}

impl Rating {
    /// Every rating, in display order.
    pub const ALL: [Rating; 5] = [
        Rating::Compliant,
        Rating::Partial,
        Rating::NonCompliant,
        Rating::NotApplicable,
        Rating::NotStarted,
    ];

    /// Fraction of the item maximum awarded for this rating.
    ///
    /// `None` for `NotApplicable`: the item carries no score at all.
    pub fn weight(&self) -> Option<f64> {
        match self {
            Self::Compliant => Some(1.0),
            Self::Partial => Some(0.5),
            Self::NonCompliant | Self::NotStarted => Some(0.0),
            Self::NotApplicable => None,
        }
    }

    /// Score awarded for this rating against an item worth `max_score`.
    pub fn score(&self, max_score: f64) -> f64 {
        self.weight().map_or(0.0, |w| w * max_score)
    }

    /// Whether the item counts toward the compliance-rate denominator.
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    /// Whether an assessor has recorded an outcome for the item.
    pub fn is_assessed(&self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// The snake_case identifier used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Compliant => "compliant",
            Self::Partial => "partial",
            Self::NonCompliant => "non_compliant",
            Self::NotApplicable => "not_applicable",
        }
    }

    /// Display label shown to assessors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "未评估",
            Self::Compliant => "符合",
            Self::Partial => "部分符合",
            Self::NonCompliant => "不符合",
            Self::NotApplicable => "不适用",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "compliant" => Ok(Self::Compliant),
            "partial" => Ok(Self::Partial),
            "non_compliant" => Ok(Self::NonCompliant),
            "not_applicable" => Ok(Self::NotApplicable),
            other => Err(ValidationError::UnknownRating(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_follow_weights() {
        assert_eq!(Rating::Compliant.score(5.0), 5.0);
        assert_eq!(Rating::Partial.score(5.0), 2.5);
        assert_eq!(Rating::NonCompliant.score(5.0), 0.0);
        assert_eq!(Rating::NotApplicable.score(5.0), 0.0);
        assert_eq!(Rating::NotStarted.score(5.0), 0.0);
    }

    #[test]
    fn not_applicable_has_no_weight() {
        assert_eq!(Rating::NotApplicable.weight(), None);
        assert!(!Rating::NotApplicable.is_applicable());
        assert!(Rating::NotStarted.is_applicable());
    }

    #[test]
    fn only_not_started_is_unassessed() {
        for rating in Rating::ALL {
            assert_eq!(rating.is_assessed(), rating != Rating::NotStarted);
        }
    }

    #[test]
    fn as_str_roundtrip() {
        for rating in Rating::ALL {
            let parsed: Rating = rating.as_str().parse().unwrap();
            assert_eq!(parsed, rating);
        }
    }

    #[test]
    fn serde_format_matches_as_str() {
        for rating in Rating::ALL {
            let json = serde_json::to_string(&rating).unwrap();
            assert_eq!(json, format!("\"{}\"", rating.as_str()));
        }
    }

    #[test]
    fn unknown_rating_rejected() {
        let err = "excellent".parse::<Rating>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownRating("excellent".into()));
        assert!("Compliant".parse::<Rating>().is_err());
    }

    #[test]
    fn default_is_not_started() {
        assert_eq!(Rating::default(), Rating::NotStarted);
    }
}
