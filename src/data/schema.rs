//! Column-name constants for the two source tables and the merged dataset.
//! Single source of truth for every column the pipeline touches.

// ── Athlete-events columns ──────────────────────────────────────────────────
pub mod athlete {
    pub const NAME: &str = "Name";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const NOC: &str = "NOC";
    pub const GAMES: &str = "Games";
    pub const YEAR: &str = "Year";
    pub const SEASON: &str = "Season";
    pub const SPORT: &str = "Sport";
    pub const MEDAL: &str = "Medal";
}

// ── NOC-region columns (as found in the source file) ────────────────────────
pub mod region {
    pub const NOC: &str = "NOC";
    pub const REGION: &str = "region";
    pub const NOTES: &str = "notes";
}

// ── Merged dataset ──────────────────────────────────────────────────────────
pub mod merged {
    pub const JOIN_KEY: &str = super::athlete::NOC;
    pub const REGION: &str = "Region";
    pub const NOTES: &str = "Notes";

    /// Region-table columns relabeled to the merged table's canonical names.
    pub const RENAMES: [(&str, &str); 2] = [
        (super::region::REGION, REGION),
        (super::region::NOTES, NOTES),
    ];

    /// Columns read by the aggregate views, `Medal` excluded.
    pub const USED_NON_MEDAL: [&str; 8] = [
        super::athlete::NAME,
        super::athlete::SEX,
        super::athlete::AGE,
        super::athlete::NOC,
        super::athlete::GAMES,
        super::athlete::YEAR,
        super::athlete::SEASON,
        super::athlete::SPORT,
    ];
}

// ── Medal values ────────────────────────────────────────────────────────────
pub mod medal {
    pub const GOLD: &str = "Gold";
    pub const SILVER: &str = "Silver";
    pub const BRONZE: &str = "Bronze";
}

/// Token the athlete-events file uses for missing values.
pub const NA_TOKEN: &str = "NA";
