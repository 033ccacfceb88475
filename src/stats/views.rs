//! Aggregate view types handed to the display layer.

use crate::data::schema::medal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Medal value of a medal row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MedalType {
    Gold,
    Silver,
    Bronze,
}

impl MedalType {
    pub const ALL: [MedalType; 3] = [MedalType::Gold, MedalType::Silver, MedalType::Bronze];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedalType::Gold => medal::GOLD,
            MedalType::Silver => medal::SILVER,
            MedalType::Bronze => medal::BRONZE,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for MedalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Medal-type selector of the country view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum MedalFilter {
    #[default]
    All,
    Gold,
    Silver,
    Bronze,
}

impl MedalFilter {
    pub const OPTIONS: [MedalFilter; 4] = [
        MedalFilter::All,
        MedalFilter::Gold,
        MedalFilter::Silver,
        MedalFilter::Bronze,
    ];

    /// `None` for `All`.
    pub fn medal_type(&self) -> Option<MedalType> {
        match self {
            MedalFilter::All => None,
            MedalFilter::Gold => Some(MedalType::Gold),
            MedalFilter::Silver => Some(MedalType::Silver),
            MedalFilter::Bronze => Some(MedalType::Bronze),
        }
    }

    pub fn label(&self) -> &'static str {
        self.medal_type().map(|m| m.as_str()).unwrap_or("All")
    }
}

impl fmt::Display for MedalFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gold/Silver/Bronze counts for one key (or for the whole dataset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MedalTally {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl MedalTally {
    pub fn add(&mut self, medal: MedalType, count: usize) {
        match medal {
            MedalType::Gold => self.gold += count,
            MedalType::Silver => self.silver += count,
            MedalType::Bronze => self.bronze += count,
        }
    }

    pub fn get(&self, medal: MedalType) -> usize {
        match medal {
            MedalType::Gold => self.gold,
            MedalType::Silver => self.silver,
            MedalType::Bronze => self.bronze,
        }
    }

    pub fn total(&self) -> usize {
        self.gold + self.silver + self.bronze
    }
}

/// One row of the year x medal-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearMedals {
    pub year: i64,
    #[serde(flatten)]
    pub medals: MedalTally,
}

/// A left-closed, right-open age interval `[lower, lower + WIDTH)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AgeBin {
    pub lower: u32,
}

impl AgeBin {
    pub const START: u32 = 10;
    pub const WIDTH: u32 = 20;
    pub const COUNT: u32 = 4;

    /// Bins `[10,30) [30,50) [50,70) [70,90)`.
    pub fn all() -> Vec<AgeBin> {
        (0..Self::COUNT)
            .map(|i| AgeBin {
                lower: Self::START + i * Self::WIDTH,
            })
            .collect()
    }

    /// Bin containing `age`, or `None` outside `[10, 90)`.
    pub fn of(age: f64) -> Option<AgeBin> {
        let start = Self::START as f64;
        let end = (Self::START + Self::COUNT * Self::WIDTH) as f64;
        if age.is_nan() || age < start || age >= end {
            return None;
        }
        let index = ((age - start) / Self::WIDTH as f64).floor() as u32;
        Some(AgeBin {
            lower: Self::START + index * Self::WIDTH,
        })
    }

    pub fn upper(&self) -> u32 {
        self.lower + Self::WIDTH
    }

    pub fn label(&self) -> String {
        format!("[{}, {})", self.lower, self.upper())
    }
}

/// One row of the age-bin x medal-type table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBinMedals {
    pub bin: AgeBin,
    #[serde(flatten)]
    pub medals: MedalTally,
}

/// A grouping key and its medal count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCount {
    pub key: String,
    pub count: usize,
}

impl RankedCount {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AgeRangeError {
    #[error("Age range bounds must lie within {min}..={max}, got {lo}..={hi}")]
    OutOfBounds { lo: u32, hi: u32, min: u32, max: u32 },
    #[error("Age range lower bound {lo} exceeds upper bound {hi}")]
    Inverted { lo: u32, hi: u32 },
}

/// Inclusive age interval chosen with the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct AgeRange {
    lo: u32,
    hi: u32,
}

impl AgeRange {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 100;

    pub fn new(lo: u32, hi: u32) -> Result<Self, AgeRangeError> {
        if lo > hi {
            return Err(AgeRangeError::Inverted { lo, hi });
        }
        if lo < Self::MIN || hi > Self::MAX {
            return Err(AgeRangeError::OutOfBounds {
                lo,
                hi,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.lo as f64 && age <= self.hi as f64
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { lo: 20, hi: 30 }
    }
}

impl TryFrom<[u32; 2]> for AgeRange {
    type Error = AgeRangeError;

    fn try_from([lo, hi]: [u32; 2]) -> Result<Self, Self::Error> {
        Self::new(lo, hi)
    }
}

impl From<AgeRange> for [u32; 2] {
    fn from(range: AgeRange) -> Self {
        [range.lo, range.hi]
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// Every aggregate view of one rendering pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub participations: usize,
    pub medal_counts: MedalTally,
    pub medals_per_year: Vec<YearMedals>,
    pub top_athletes: Vec<RankedCount>,
    pub top_sports: Vec<RankedCount>,
    pub medals_by_age_bin: Vec<AgeBinMedals>,
    pub medals_by_gender: Vec<RankedCount>,
    pub medals_by_season: Vec<RankedCount>,
    pub medal_filter: MedalFilter,
    pub medals_by_country: Vec<RankedCount>,
    pub age_range: AgeRange,
    pub athletes_in_age_range: usize,
}
