//! Data Processor Module
//! Cleans the merged dataset: duplicate removal and null dropping.

use crate::data::schema::merged;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Which columns the null-drop step inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Drop a row when any column is null
    #[default]
    Global,
    /// Drop a row only when a column read by the views (other than Medal) is null
    UsedColumns,
}

/// Handles data cleaning operations. Every step returns a new frame.
pub struct DataProcessor;

impl DataProcessor {
    /// Remove exact-duplicate rows, keeping the first occurrence in input order.
    pub fn drop_duplicates(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let deduped = df
            .clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(deduped)
    }

    /// Remove rows holding a null in the columns selected by `policy`.
    pub fn drop_nulls(df: &DataFrame, policy: NullPolicy) -> Result<DataFrame, ProcessorError> {
        let filtered = match policy {
            NullPolicy::Global => df.drop_nulls::<String>(None)?,
            NullPolicy::UsedColumns => {
                let subset: Vec<String> = merged::USED_NON_MEDAL
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                df.drop_nulls(Some(subset.as_slice()))?
            }
        };
        Ok(filtered)
    }

    /// Dedup then null-drop. Idempotent.
    pub fn clean(df: &DataFrame, policy: NullPolicy) -> Result<DataFrame, ProcessorError> {
        let deduped = Self::drop_duplicates(df)?;
        let cleaned = Self::drop_nulls(&deduped, policy)?;

        info!(
            "Cleaned dataset: {} -> {} rows ({} duplicates, {} with nulls, policy {:?})",
            df.height(),
            cleaned.height(),
            df.height() - deduped.height(),
            deduped.height() - cleaned.height(),
            policy
        );
        Ok(cleaned)
    }
}
