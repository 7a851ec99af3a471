//! Capacity vectors
//!
//! A [`CapacityVector`] holds one non-negative point count per
//! [`PointCategory`]. It is used both for a unit's nameplate capacity and for
//! the combined / remaining capacity of a candidate combination.

use crate::points::PointCategory;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, IndexMut};

/// Point counts per supply category
///
/// Field names serialize to the catalog labels (`UI`, `AI`, ..., `BO_Wet`);
/// missing fields default to 0 when deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapacityVector {
    #[serde(rename = "UI", default)]
    pub ui: u32,
    #[serde(rename = "AI", default)]
    pub ai: u32,
    #[serde(rename = "BI", default)]
    pub bi: u32,
    #[serde(rename = "AO_BI", default)]
    pub ao_bi: u32,
    #[serde(rename = "UIO", default)]
    pub uio: u32,
    #[serde(rename = "BO_Dry", default)]
    pub bo_dry: u32,
    #[serde(rename = "BO_Wet", default)]
    pub bo_wet: u32,
}

impl CapacityVector {
    /// All-zero vector
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from counts in canonical category order
    /// (`UI, AI, BI, AO_BI, UIO, BO_Dry, BO_Wet`)
    pub fn from_array(counts: [u32; PointCategory::COUNT]) -> Self {
        let [ui, ai, bi, ao_bi, uio, bo_dry, bo_wet] = counts;
        Self {
            ui,
            ai,
            bi,
            ao_bi,
            uio,
            bo_dry,
            bo_wet,
        }
    }

    /// Counts in canonical category order
    pub fn to_array(&self) -> [u32; PointCategory::COUNT] {
        [
            self.ui,
            self.ai,
            self.bi,
            self.ao_bi,
            self.uio,
            self.bo_dry,
            self.bo_wet,
        ]
    }

    /// Builder-style setter
    pub fn with(mut self, category: PointCategory, count: u32) -> Self {
        self[category] = count;
        self
    }

    pub fn get(&self, category: PointCategory) -> u32 {
        self[category]
    }

    /// Sum over all categories, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.to_array()
            .iter()
            .fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }

    /// (category, count) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (PointCategory, u32)> + '_ {
        PointCategory::all().iter().map(move |c| (*c, self[*c]))
    }
}

impl Index<PointCategory> for CapacityVector {
    type Output = u32;

    fn index(&self, category: PointCategory) -> &u32 {
        match category {
            PointCategory::Ui => &self.ui,
            PointCategory::Ai => &self.ai,
            PointCategory::Bi => &self.bi,
            PointCategory::AoBi => &self.ao_bi,
            PointCategory::Uio => &self.uio,
            PointCategory::BoDry => &self.bo_dry,
            PointCategory::BoWet => &self.bo_wet,
        }
    }
}

impl IndexMut<PointCategory> for CapacityVector {
    fn index_mut(&mut self, category: PointCategory) -> &mut u32 {
        match category {
            PointCategory::Ui => &mut self.ui,
            PointCategory::Ai => &mut self.ai,
            PointCategory::Bi => &mut self.bi,
            PointCategory::AoBi => &mut self.ao_bi,
            PointCategory::Uio => &mut self.uio,
            PointCategory::BoDry => &mut self.bo_dry,
            PointCategory::BoWet => &mut self.bo_wet,
        }
    }
}

/// Element-wise sum; each category saturates at `u32::MAX`
impl AddAssign<&CapacityVector> for CapacityVector {
    fn add_assign(&mut self, rhs: &CapacityVector) {
        for category in PointCategory::all() {
            self[*category] = self[*category].saturating_add(rhs[*category]);
        }
    }
}

impl AddAssign for CapacityVector {
    fn add_assign(&mut self, rhs: CapacityVector) {
        *self += &rhs;
    }
}

impl Add for CapacityVector {
    type Output = CapacityVector;

    fn add(mut self, rhs: CapacityVector) -> CapacityVector {
        self += &rhs;
        self
    }
}
