//! Aggregate Calculator Module
//! Group-by and count computations over the cleaned Olympic dataset.
//!
//! Every function is a pure function of the cleaned frame (and, for the live
//! views, of the selected parameter). Groups come out in order of first
//! appearance; rankings are stable sorts of that order.

use crate::data::schema::athlete;
use crate::stats::views::{
    AgeBin, AgeBinMedals, AgeRange, MedalFilter, MedalTally, MedalType, RankedCount, YearMedals,
};
use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

/// Number of entries in the athlete and sport rankings.
pub const TOP_N: usize = 5;

const COUNT_COL: &str = "Medals";

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Handles aggregate view computations.
pub struct AggregateCalculator;

impl AggregateCalculator {
    /// Number of distinct games identifiers.
    pub fn participation_count(df: &DataFrame) -> Result<usize, CalcError> {
        let games = df.column(athlete::GAMES)?.as_materialized_series().drop_nulls();
        Ok(games.n_unique()?)
    }

    /// Gold, silver and bronze row counts.
    pub fn medal_counts(df: &DataFrame) -> Result<MedalTally, CalcError> {
        let mut tally = MedalTally::default();
        for row in Self::count_medals_by(df, athlete::MEDAL, None)? {
            if let Some(medal) = MedalType::parse(&row.key) {
                tally.add(medal, row.count);
            }
        }
        Ok(tally)
    }

    /// Medal rows per (year, medal type), one entry per year in ascending order,
    /// missing combinations zero.
    pub fn medals_per_year(df: &DataFrame) -> Result<Vec<YearMedals>, CalcError> {
        let grouped = Self::medal_rows(df)
            .group_by_stable([col(athlete::YEAR), col(athlete::MEDAL)])
            .agg([col(athlete::MEDAL).count().alias(COUNT_COL)])
            .collect()?;

        let years = grouped.column(athlete::YEAR)?.cast(&DataType::Int64)?;
        let medals = grouped.column(athlete::MEDAL)?.cast(&DataType::String)?;
        let counts = grouped.column(COUNT_COL)?.cast(&DataType::Int64)?;

        let mut by_year: BTreeMap<i64, MedalTally> = BTreeMap::new();
        for ((year, medal), count) in years
            .i64()?
            .into_iter()
            .zip(medals.str()?.into_iter())
            .zip(counts.i64()?.into_iter())
        {
            let (Some(year), Some(medal), Some(count)) = (year, medal.and_then(MedalType::parse), count)
            else {
                continue;
            };
            by_year.entry(year).or_default().add(medal, count as usize);
        }

        Ok(by_year
            .into_iter()
            .map(|(year, medals)| YearMedals { year, medals })
            .collect())
    }

    /// Top athletes by medal count.
    pub fn top_athletes(df: &DataFrame) -> Result<Vec<RankedCount>, CalcError> {
        Self::top_by(df, athlete::NAME, TOP_N)
    }

    /// Top sports by medal count.
    pub fn top_sports(df: &DataFrame) -> Result<Vec<RankedCount>, CalcError> {
        Self::top_by(df, athlete::SPORT, TOP_N)
    }

    /// Medal rows per (age bin, medal type). Every bin is present, zero-filled;
    /// ages outside the bins are not counted.
    pub fn medals_by_age_bin(df: &DataFrame) -> Result<Vec<AgeBinMedals>, CalcError> {
        let rows = Self::medal_rows(df)
            .select([
                col(athlete::AGE).cast(DataType::Float64),
                col(athlete::MEDAL).cast(DataType::String),
            ])
            .collect()?;

        let mut by_bin: BTreeMap<AgeBin, MedalTally> =
            AgeBin::all().into_iter().map(|bin| (bin, MedalTally::default())).collect();

        let ages = rows.column(athlete::AGE)?;
        let medals = rows.column(athlete::MEDAL)?;
        for (age, medal) in ages.f64()?.into_iter().zip(medals.str()?.into_iter()) {
            let (Some(bin), Some(medal)) = (age.and_then(AgeBin::of), medal.and_then(MedalType::parse))
            else {
                continue;
            };
            by_bin.entry(bin).or_default().add(medal, 1);
        }

        Ok(by_bin
            .into_iter()
            .map(|(bin, medals)| AgeBinMedals { bin, medals })
            .collect())
    }

    /// Medal rows per sex.
    pub fn medals_by_gender(df: &DataFrame) -> Result<Vec<RankedCount>, CalcError> {
        Self::count_medals_by(df, athlete::SEX, None)
    }

    /// Medal rows per season.
    pub fn medals_by_season(df: &DataFrame) -> Result<Vec<RankedCount>, CalcError> {
        Self::count_medals_by(df, athlete::SEASON, None)
    }

    /// Medal rows per country code, restricted to the selected medal type,
    /// sorted by descending count.
    pub fn medals_by_country(
        df: &DataFrame,
        filter: MedalFilter,
    ) -> Result<Vec<RankedCount>, CalcError> {
        let mut counts = Self::count_medals_by(df, athlete::NOC, filter.medal_type())?;
        Self::rank(&mut counts);
        Ok(counts)
    }

    /// Distinct athlete names whose age lies in the inclusive range.
    pub fn athletes_in_age_range(df: &DataFrame, range: AgeRange) -> Result<usize, CalcError> {
        let age = col(athlete::AGE).cast(DataType::Float64);
        let in_range = df
            .clone()
            .lazy()
            .filter(
                age.clone()
                    .gt_eq(lit(range.lo() as f64))
                    .and(age.lt_eq(lit(range.hi() as f64))),
            )
            .select([col(athlete::NAME)])
            .collect()?;

        let names = in_range
            .column(athlete::NAME)?
            .as_materialized_series()
            .drop_nulls();
        Ok(names.n_unique()?)
    }

    /// Ranking of `key` by medal count, at most `n` entries.
    pub fn top_by(df: &DataFrame, key: &str, n: usize) -> Result<Vec<RankedCount>, CalcError> {
        let mut counts = Self::count_medals_by(df, key, None)?;
        Self::rank(&mut counts);
        counts.truncate(n);
        Ok(counts)
    }

    /// Stable sort by descending count.
    fn rank(counts: &mut [RankedCount]) {
        counts.sort_by(|a, b| b.count.cmp(&a.count));
    }

    /// Rows carrying a medal value.
    fn medal_rows(df: &DataFrame) -> LazyFrame {
        df.clone().lazy().filter(col(athlete::MEDAL).is_not_null())
    }

    /// Count medal rows per value of `key`, optionally for one medal type only.
    fn count_medals_by(
        df: &DataFrame,
        key: &str,
        medal: Option<MedalType>,
    ) -> Result<Vec<RankedCount>, CalcError> {
        let mut rows = Self::medal_rows(df);
        if let Some(medal) = medal {
            rows = rows.filter(col(athlete::MEDAL).eq(lit(medal.as_str())));
        }

        let grouped = rows
            .group_by_stable([col(key)])
            .agg([col(athlete::MEDAL).count().alias(COUNT_COL)])
            .collect()?;

        let keys = grouped.column(key)?.cast(&DataType::String)?;
        let counts = grouped.column(COUNT_COL)?.cast(&DataType::Int64)?;

        Ok(keys
            .str()?
            .into_iter()
            .zip(counts.i64()?.into_iter())
            .filter_map(|(key, count)| Some(RankedCount::new(key?, count.unwrap_or(0) as usize)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medal_fixture() -> DataFrame {
        df!(
            "Name" => ["A", "B", "A", "C", "D", "B", "E"],
            "Sex" => ["M", "F", "M", "F", "M", "F", "M"],
            "Age" => [25i64, 30, 29, 50, 71, 31, 95],
            "NOC" => ["USA", "NOR", "USA", "NOR", "GER", "NOR", "GER"],
            "Games" => ["2000 Summer", "2000 Summer", "2004 Summer", "2002 Winter", "2004 Summer", "2004 Summer", "2002 Winter"],
            "Year" => [2000i64, 2000, 2004, 2002, 2004, 2004, 2002],
            "Season" => ["Summer", "Summer", "Summer", "Winter", "Summer", "Summer", "Winter"],
            "Sport" => ["Swimming", "Rowing", "Swimming", "Biathlon", "Sailing", "Rowing", "Curling"],
            "Medal" => ["Gold", "Silver", "Gold", "Bronze", "Gold", "Bronze", "Silver"]
        )
        .unwrap()
    }

    #[test]
    fn test_participation_count_ignores_row_order() {
        let df = medal_fixture();
        let reversed = df.reverse();
        assert_eq!(AggregateCalculator::participation_count(&df).unwrap(), 3);
        assert_eq!(AggregateCalculator::participation_count(&reversed).unwrap(), 3);
    }

    #[test]
    fn test_medal_counts_sum_to_medal_rows() {
        let df = medal_fixture();
        let tally = AggregateCalculator::medal_counts(&df).unwrap();
        assert_eq!(tally, MedalTally { gold: 3, silver: 2, bronze: 2 });
        assert_eq!(tally.total(), df.height());
    }

    #[test]
    fn test_medals_per_year_sums_match_rows() {
        let per_year = AggregateCalculator::medals_per_year(&medal_fixture()).unwrap();

        let years: Vec<i64> = per_year.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2000, 2002, 2004]);

        assert_eq!(per_year[0].medals, MedalTally { gold: 1, silver: 1, bronze: 0 });
        assert_eq!(per_year[1].medals, MedalTally { gold: 0, silver: 1, bronze: 1 });
        assert_eq!(per_year[2].medals.total(), 3);
    }

    #[test]
    fn test_top_athletes_sorted_and_stable() {
        let top = AggregateCalculator::top_athletes(&medal_fixture()).unwrap();
        assert_eq!(
            top,
            vec![
                RankedCount::new("A", 2),
                RankedCount::new("B", 2),
                RankedCount::new("C", 1),
                RankedCount::new("D", 1),
                RankedCount::new("E", 1),
            ]
        );
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_top_by_returns_all_when_fewer_than_n() {
        let top = AggregateCalculator::top_by(&medal_fixture(), "NOC", TOP_N).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0], RankedCount::new("NOR", 3));
    }

    #[test]
    fn test_top_sports() {
        let top = AggregateCalculator::top_sports(&medal_fixture()).unwrap();
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], RankedCount::new("Swimming", 2));
        assert_eq!(top[1], RankedCount::new("Rowing", 2));
    }

    #[test]
    fn test_medals_by_age_bin() {
        let bins = AggregateCalculator::medals_by_age_bin(&medal_fixture()).unwrap();
        assert_eq!(bins.len(), 4);

        // 25 and 29 -> [10,30); 30 and 31 -> [30,50); 50 -> [50,70); 71 -> [70,90); 95 dropped
        assert_eq!(bins[0].bin, AgeBin { lower: 10 });
        assert_eq!(bins[0].medals, MedalTally { gold: 2, silver: 0, bronze: 0 });
        assert_eq!(bins[1].medals, MedalTally { gold: 0, silver: 1, bronze: 1 });
        assert_eq!(bins[2].medals, MedalTally { gold: 0, silver: 0, bronze: 1 });
        assert_eq!(bins[3].medals, MedalTally { gold: 1, silver: 0, bronze: 0 });
    }

    #[test]
    fn test_age_thirty_lands_in_second_bin() {
        let df = df!(
            "Age" => [30i64],
            "Medal" => ["Gold"]
        )
        .unwrap();
        let bins = AggregateCalculator::medals_by_age_bin(&df).unwrap();
        assert_eq!(bins[0].medals.total(), 0);
        assert_eq!(bins[1].bin, AgeBin { lower: 30 });
        assert_eq!(bins[1].medals.gold, 1);
    }

    #[test]
    fn test_medals_by_gender_and_season() {
        let df = medal_fixture();
        assert_eq!(
            AggregateCalculator::medals_by_gender(&df).unwrap(),
            vec![RankedCount::new("M", 4), RankedCount::new("F", 3)]
        );
        assert_eq!(
            AggregateCalculator::medals_by_season(&df).unwrap(),
            vec![RankedCount::new("Summer", 5), RankedCount::new("Winter", 2)]
        );
    }

    #[test]
    fn test_country_filter_all_dominates_specific_types() {
        let df = medal_fixture();
        let all = AggregateCalculator::medals_by_country(&df, MedalFilter::All).unwrap();
        assert_eq!(all[0], RankedCount::new("NOR", 3));

        for filter in [MedalFilter::Gold, MedalFilter::Silver, MedalFilter::Bronze] {
            let specific = AggregateCalculator::medals_by_country(&df, filter).unwrap();
            assert!(specific.windows(2).all(|w| w[0].count >= w[1].count));
            for row in &specific {
                let total = all.iter().find(|r| r.key == row.key).unwrap();
                assert!(total.count >= row.count);
            }
        }

        let gold = AggregateCalculator::medals_by_country(&df, MedalFilter::Gold).unwrap();
        assert_eq!(
            gold,
            vec![RankedCount::new("USA", 2), RankedCount::new("GER", 1)]
        );
    }

    #[test]
    fn test_athletes_in_age_range() {
        let df = df!(
            "Name" => ["X", "Y", "Z"],
            "Age" => [19i64, 25, 31]
        )
        .unwrap();
        let count = AggregateCalculator::athletes_in_age_range(&df, AgeRange::default()).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_athletes_in_age_range_counts_distinct_names() {
        let df = medal_fixture();
        let range = AgeRange::new(25, 31).unwrap();
        // A (25, 29) and B (30, 31)
        assert_eq!(AggregateCalculator::athletes_in_age_range(&df, range).unwrap(), 2);
    }

    #[test]
    fn test_views_ignore_rows_without_medal() {
        let df = df!(
            "Name" => ["A", "C"],
            "NOC" => ["USA", "USA"],
            "Medal" => [Some("Gold"), None]
        )
        .unwrap();
        assert_eq!(
            AggregateCalculator::top_athletes(&df).unwrap(),
            vec![RankedCount::new("A", 1)]
        );
        let countries = AggregateCalculator::medals_by_country(&df, MedalFilter::All).unwrap();
        assert_eq!(countries, vec![RankedCount::new("USA", 1)]);
    }

    #[test]
    fn test_empty_frame_degrades_to_empty_views() {
        let df = medal_fixture().head(Some(0));
        assert_eq!(AggregateCalculator::participation_count(&df).unwrap(), 0);
        assert_eq!(AggregateCalculator::medal_counts(&df).unwrap().total(), 0);
        assert!(AggregateCalculator::medals_per_year(&df).unwrap().is_empty());
        assert!(AggregateCalculator::top_athletes(&df).unwrap().is_empty());
        assert!(AggregateCalculator::medals_by_country(&df, MedalFilter::Gold)
            .unwrap()
            .is_empty());
        assert_eq!(
            AggregateCalculator::athletes_in_age_range(&df, AgeRange::default()).unwrap(),
            0
        );
    }
}
