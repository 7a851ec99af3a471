//! Point category definitions
//!
//! Two closed sets describe every calculation:
//! - [`PointCategory`]: the *supply* dimensions a hardware unit provides
//! - [`RequirementCategory`]: the *demand* dimensions the engineer must host
//!
//! Each requirement category carries a fixed, hand-ordered list of the supply
//! categories allowed to serve it. The order is part of the allocation policy
//! and must not be changed.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Supply categories
// ============================================================================

/// Physical I/O point types provided by controllers and expansion modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PointCategory {
    /// Universal input
    #[serde(rename = "UI")]
    Ui,
    /// Analog input
    #[serde(rename = "AI")]
    Ai,
    /// Binary input
    #[serde(rename = "BI")]
    Bi,
    /// Point usable as analog output or binary input
    #[serde(rename = "AO_BI")]
    AoBi,
    /// Fully universal input/output
    #[serde(rename = "UIO")]
    Uio,
    /// Dry-contact binary output
    #[serde(rename = "BO_Dry")]
    BoDry,
    /// Wet (powered) binary output
    #[serde(rename = "BO_Wet")]
    BoWet,
}

impl PointCategory {
    /// Number of supply categories
    pub const COUNT: usize = 7;

    /// All supply categories in canonical order
    pub fn all() -> &'static [PointCategory] {
        &[
            Self::Ui,
            Self::Ai,
            Self::Bi,
            Self::AoBi,
            Self::Uio,
            Self::BoDry,
            Self::BoWet,
        ]
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        match self {
            Self::Ui => 0,
            Self::Ai => 1,
            Self::Bi => 2,
            Self::AoBi => 3,
            Self::Uio => 4,
            Self::BoDry => 5,
            Self::BoWet => 6,
        }
    }

    /// Catalog label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui => "UI",
            Self::Ai => "AI",
            Self::Bi => "BI",
            Self::AoBi => "AO_BI",
            Self::Uio => "UIO",
            Self::BoDry => "BO_Dry",
            Self::BoWet => "BO_Wet",
        }
    }

    /// Parse from a label, ignoring ASCII case
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Shared categories can serve more than one requirement category
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Ui | Self::AoBi | Self::Uio)
    }
}

impl fmt::Display for PointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Demand categories
// ============================================================================

/// Point types an engineer needs to host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequirementCategory {
    /// Analog input
    #[serde(rename = "AI")]
    Ai,
    /// Binary input
    #[serde(rename = "BI")]
    Bi,
    /// Analog output
    #[serde(rename = "AO")]
    Ao,
    /// Dry-contact binary output
    #[serde(rename = "BO_Dry")]
    BoDry,
    /// Wet (powered) binary output
    #[serde(rename = "BO_Wet")]
    BoWet,
}

impl RequirementCategory {
    /// Number of requirement categories
    pub const COUNT: usize = 5;

    /// All requirement categories in canonical order.
    ///
    /// This is also the allocation order: earlier categories get first claim
    /// on the shared sources `UI`, `AO_BI` and `UIO`.
    pub fn all() -> &'static [RequirementCategory] {
        &[Self::Ai, Self::Bi, Self::Ao, Self::BoDry, Self::BoWet]
    }

    /// Position in canonical order
    pub fn index(&self) -> usize {
        match self {
            Self::Ai => 0,
            Self::Bi => 1,
            Self::Ao => 2,
            Self::BoDry => 3,
            Self::BoWet => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Bi => "BI",
            Self::Ao => "AO",
            Self::BoDry => "BO_Dry",
            Self::BoWet => "BO_Wet",
        }
    }

    /// Parse from a label, ignoring ASCII case
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Supply categories allowed to serve this requirement, in draw order
    ///
    /// | Requirement | Sources |
    /// |-------------|---------|
    /// | AI | AI → UI → UIO |
    /// | BI | BI → UI → AO_BI → UIO |
    /// | AO | AO_BI → UIO |
    /// | BO_Dry | BO_Dry → UIO |
    /// | BO_Wet | BO_Wet → UIO |
    pub fn source_priority(&self) -> &'static [PointCategory] {
        use PointCategory as P;
        match self {
            Self::Ai => &[P::Ai, P::Ui, P::Uio],
            Self::Bi => &[P::Bi, P::Ui, P::AoBi, P::Uio],
            Self::Ao => &[P::AoBi, P::Uio],
            Self::BoDry => &[P::BoDry, P::Uio],
            Self::BoWet => &[P::BoWet, P::Uio],
        }
    }

    /// Check whether the given supply category may serve this requirement
    pub fn can_draw_from(&self, source: PointCategory) -> bool {
        self.source_priority().contains(&source)
    }
}

impl fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_canonical_order() {
        for (i, cat) in PointCategory::all().iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
        for (i, cat) in RequirementCategory::all().iter().enumerate() {
            assert_eq!(cat.index(), i);
        }
        assert_eq!(PointCategory::all().len(), PointCategory::COUNT);
        assert_eq!(RequirementCategory::all().len(), RequirementCategory::COUNT);
    }

    #[test]
    fn test_labels_round_trip() {
        for cat in PointCategory::all() {
            assert_eq!(PointCategory::try_parse(cat.as_str()), Some(*cat));
        }
        assert_eq!(PointCategory::try_parse("bo_dry"), Some(PointCategory::BoDry));
        assert_eq!(PointCategory::try_parse("AO"), None);
        assert_eq!(RequirementCategory::try_parse("ao"), Some(RequirementCategory::Ao));
        assert_eq!(RequirementCategory::try_parse("AO_BI"), None);
    }

    #[test]
    fn test_source_priority_table() {
        use PointCategory as P;
        assert_eq!(
            RequirementCategory::Ai.source_priority(),
            &[P::Ai, P::Ui, P::Uio]
        );
        assert_eq!(
            RequirementCategory::Bi.source_priority(),
            &[P::Bi, P::Ui, P::AoBi, P::Uio]
        );
        assert_eq!(RequirementCategory::Ao.source_priority(), &[P::AoBi, P::Uio]);
        assert!(!RequirementCategory::Ao.can_draw_from(P::Ui));
        assert!(RequirementCategory::BoWet.can_draw_from(P::Uio));
    }

    #[test]
    fn test_uio_serves_every_requirement() {
        for req in RequirementCategory::all() {
            assert_eq!(req.source_priority().last(), Some(&PointCategory::Uio));
        }
    }

    #[test]
    fn test_shared_categories() {
        let shared: Vec<_> = PointCategory::all()
            .iter()
            .filter(|c| c.is_shared())
            .copied()
            .collect();
        assert_eq!(
            shared,
            vec![PointCategory::Ui, PointCategory::AoBi, PointCategory::Uio]
        );
        // every shared category serves more than one requirement
        for category in shared {
            let served = RequirementCategory::all()
                .iter()
                .filter(|r| r.can_draw_from(category))
                .count();
            assert!(served > 1, "{category}");
        }
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&PointCategory::AoBi).unwrap();
        assert_eq!(json, "\"AO_BI\"");
        let req: RequirementCategory = serde_json::from_str("\"BO_Wet\"").unwrap();
        assert_eq!(req, RequirementCategory::BoWet);
    }
}
