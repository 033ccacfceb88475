//! Dashboard Pipeline
//! Runs load -> merge -> clean once, then derives the aggregate views on demand.

use crate::data::{DataLoader, DataProcessor, LoaderError, NullPolicy, ProcessorError};
use crate::stats::{
    AgeRange, AggregateCalculator, CalcError, DashboardViews, MedalFilter, RankedCount,
};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] ProcessorError),
    #[error("Failed to compute view: {0}")]
    Calc(#[from] CalcError),
}

/// Live parameters of the interactive views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub medal_filter: MedalFilter,
    pub age_range: AgeRange,
}

/// Holds the cleaned dataset of one session. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Pipeline {
    cleaned: DataFrame,
    merged_rows: usize,
}

impl Pipeline {
    /// Load both sources from disk, merge and clean them.
    pub fn load(loader: &DataLoader, policy: NullPolicy) -> Result<Self, PipelineError> {
        info!(
            "Loading {} and {}",
            loader.athletes_path().display(),
            loader.regions_path().display()
        );
        let merged = loader.load_merged()?;
        Self::from_merged(&merged, policy)
    }

    /// Merge and clean in-memory source tables. No merged dump is written.
    pub fn from_frames(
        athletes: DataFrame,
        regions: DataFrame,
        policy: NullPolicy,
    ) -> Result<Self, PipelineError> {
        let mut merged = DataLoader::merge(athletes, regions)?;
        DataLoader::rename_region_columns(&mut merged)?;
        Self::from_merged(&merged, policy)
    }

    /// Clean an already merged table.
    pub fn from_merged(merged: &DataFrame, policy: NullPolicy) -> Result<Self, PipelineError> {
        let cleaned = DataProcessor::clean(merged, policy)?;
        Ok(Self {
            cleaned,
            merged_rows: merged.height(),
        })
    }

    pub fn cleaned(&self) -> &DataFrame {
        &self.cleaned
    }

    /// Row count of the merged table before cleaning.
    pub fn merged_rows(&self) -> usize {
        self.merged_rows
    }

    /// Compute every view for one rendering pass.
    pub fn views(&self, params: ViewParams) -> Result<DashboardViews, PipelineError> {
        let df = &self.cleaned;
        debug!(
            "Computing views (medal filter {}, age range {})",
            params.medal_filter, params.age_range
        );

        Ok(DashboardViews {
            participations: AggregateCalculator::participation_count(df)?,
            medal_counts: AggregateCalculator::medal_counts(df)?,
            medals_per_year: AggregateCalculator::medals_per_year(df)?,
            top_athletes: AggregateCalculator::top_athletes(df)?,
            top_sports: AggregateCalculator::top_sports(df)?,
            medals_by_age_bin: AggregateCalculator::medals_by_age_bin(df)?,
            medals_by_gender: AggregateCalculator::medals_by_gender(df)?,
            medals_by_season: AggregateCalculator::medals_by_season(df)?,
            medal_filter: params.medal_filter,
            medals_by_country: self.medals_by_country(params.medal_filter)?,
            age_range: params.age_range,
            athletes_in_age_range: self.athletes_in_age_range(params.age_range)?,
        })
    }

    pub fn medals_by_country(&self, filter: MedalFilter) -> Result<Vec<RankedCount>, PipelineError> {
        Ok(AggregateCalculator::medals_by_country(&self.cleaned, filter)?)
    }

    pub fn athletes_in_age_range(&self, range: AgeRange) -> Result<usize, PipelineError> {
        Ok(AggregateCalculator::athletes_in_age_range(&self.cleaned, range)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MedalTally;

    fn athletes() -> DataFrame {
        df!(
            "Name" => ["A", "A", "B", "C"],
            "Sex" => ["M", "M", "F", "M"],
            "Age" => [24i64, 28, 22, 26],
            "NOC" => ["USA", "USA", "NOR", "USA"],
            "Games" => ["2000 Summer", "2004 Summer", "2000 Summer", "2004 Summer"],
            "Year" => [2000i64, 2004, 2000, 2004],
            "Season" => ["Summer", "Summer", "Summer", "Summer"],
            "Sport" => ["Swimming", "Swimming", "Rowing", "Judo"],
            "Medal" => [Some("Gold"), Some("Gold"), Some("Silver"), None]
        )
        .unwrap()
    }

    fn regions() -> DataFrame {
        df!(
            "NOC" => ["USA", "NOR"],
            "region" => ["USA", "Norway"],
            "notes" => ["-", "-"]
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_views() {
        let pipeline = Pipeline::from_frames(athletes(), regions(), NullPolicy::Global).unwrap();
        let views = pipeline.views(ViewParams::default()).unwrap();

        assert_eq!(views.participations, 2);
        assert_eq!(views.medal_counts, MedalTally { gold: 2, silver: 1, bronze: 0 });
        assert_eq!(
            views.top_athletes,
            vec![RankedCount::new("A", 2), RankedCount::new("B", 1)]
        );
        let country_total: usize = views.medals_by_country.iter().map(|r| r.count).sum();
        assert_eq!(country_total, 3);
        assert_eq!(views.medal_filter, MedalFilter::All);
        assert_eq!(views.age_range, AgeRange::default());
    }

    #[test]
    fn test_used_columns_policy_counts_non_medal_athletes() {
        let pipeline =
            Pipeline::from_frames(athletes(), regions(), NullPolicy::UsedColumns).unwrap();
        assert_eq!(pipeline.cleaned().height(), 4);

        let range = AgeRange::new(20, 30).unwrap();
        assert_eq!(pipeline.athletes_in_age_range(range).unwrap(), 3);

        let views = pipeline.views(ViewParams::default()).unwrap();
        assert_eq!(views.medal_counts.total(), 3);
    }

    #[test]
    fn test_live_views_are_recomputed_per_parameter() {
        let pipeline = Pipeline::from_frames(athletes(), regions(), NullPolicy::Global).unwrap();

        let silver = pipeline.medals_by_country(MedalFilter::Silver).unwrap();
        assert_eq!(silver, vec![RankedCount::new("NOR", 1)]);

        let narrow = AgeRange::new(27, 30).unwrap();
        assert_eq!(pipeline.athletes_in_age_range(narrow).unwrap(), 1);
    }

    #[test]
    fn test_unmatched_region_rows_are_dropped_by_global_policy() {
        let regions = df!(
            "NOC" => ["USA", "NOR", "ABC"],
            "region" => ["USA", "Norway", "Nowhere"],
            "notes" => ["-", "-", "-"]
        )
        .unwrap();
        let pipeline = Pipeline::from_frames(athletes(), regions, NullPolicy::Global).unwrap();

        assert_eq!(pipeline.merged_rows(), 5);
        assert_eq!(pipeline.cleaned().height(), 3);
    }
}
