//! Stats module - aggregate view computations

mod calculator;
mod views;

pub use calculator::{AggregateCalculator, CalcError, TOP_N};
pub use views::{
    AgeBin, AgeBinMedals, AgeRange, AgeRangeError, DashboardViews, MedalFilter, MedalTally,
    MedalType, RankedCount, YearMedals,
};
