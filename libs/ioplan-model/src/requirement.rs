//! Requirement vectors and headroom
//!
//! A [`RequirementVector`] is the point demand to host, one count per
//! [`RequirementCategory`]. The same shape is reused for per-source usage
//! counts and for post-allocation shortfalls.

use crate::error::{ModelError, Result};
use crate::points::RequirementCategory;
use crate::validation::{validate_headroom_fraction, validate_headroom_percent};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Point counts per requirement category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequirementVector {
    #[serde(rename = "AI", default)]
    pub ai: u32,
    #[serde(rename = "BI", default)]
    pub bi: u32,
    #[serde(rename = "AO", default)]
    pub ao: u32,
    #[serde(rename = "BO_Dry", default)]
    pub bo_dry: u32,
    #[serde(rename = "BO_Wet", default)]
    pub bo_wet: u32,
}

impl RequirementVector {
    pub fn new(ai: u32, bi: u32, ao: u32, bo_dry: u32, bo_wet: u32) -> Self {
        Self {
            ai,
            bi,
            ao,
            bo_dry,
            bo_wet,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, category: RequirementCategory, count: u32) -> Self {
        self[category] = count;
        self
    }

    /// Apply headroom: `floor(raw × (1 + h))` per category
    ///
    /// Results above `u32::MAX` are clamped to `u32::MAX`.
    pub fn with_headroom(&self, headroom: Headroom) -> Self {
        let factor = 1.0 + headroom.fraction();
        let mut adjusted = *self;
        for category in RequirementCategory::all() {
            let scaled = (f64::from(self[*category]) * factor).floor();
            adjusted[*category] = if scaled >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                scaled as u32
            };
        }
        adjusted
    }

    /// Sum over all categories, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.iter().fold(0u32, |acc, (_, n)| acc.saturating_add(n))
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, n)| n == 0)
    }

    /// (category, count) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (RequirementCategory, u32)> + '_ {
        RequirementCategory::all()
            .iter()
            .map(move |c| (*c, self[*c]))
    }
}

impl Index<RequirementCategory> for RequirementVector {
    type Output = u32;

    fn index(&self, category: RequirementCategory) -> &u32 {
        match category {
            RequirementCategory::Ai => &self.ai,
            RequirementCategory::Bi => &self.bi,
            RequirementCategory::Ao => &self.ao,
            RequirementCategory::BoDry => &self.bo_dry,
            RequirementCategory::BoWet => &self.bo_wet,
        }
    }
}

impl IndexMut<RequirementCategory> for RequirementVector {
    fn index_mut(&mut self, category: RequirementCategory) -> &mut u32 {
        match category {
            RequirementCategory::Ai => &mut self.ai,
            RequirementCategory::Bi => &mut self.bi,
            RequirementCategory::Ao => &mut self.ao,
            RequirementCategory::BoDry => &mut self.bo_dry,
            RequirementCategory::BoWet => &mut self.bo_wet,
        }
    }
}

/// Safety margin applied to raw requirements, as a fraction in `[0, 1]`
///
/// Deserializes from a plain number and rejects values outside the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Headroom(f64);

impl Headroom {
    pub const NONE: Headroom = Headroom(0.0);

    /// Create from a fraction (`0.25` = 25 %)
    pub fn from_fraction(fraction: f64) -> Result<Self> {
        validate_headroom_fraction(fraction)?;
        Ok(Self(fraction))
    }

    /// Create from a percentage in `[0, 100]`
    pub fn from_percent(percent: f64) -> Result<Self> {
        validate_headroom_percent(percent)?;
        Ok(Self(percent / 100.0))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl TryFrom<f64> for Headroom {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_fraction(value)
    }
}

impl From<Headroom> for f64 {
    fn from(headroom: Headroom) -> f64 {
        headroom.0
    }
}
