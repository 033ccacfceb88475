//! CSV Data Loader Module
//! Loads the athlete-events and NOC-region tables with Polars and merges them on NOC.

use crate::data::schema::{self, merged, region};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Temporary column used to keep athlete rows in file order through the join.
const ROW_ORDER_COL: &str = "__row_order";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Failed to write merged file {path}: {source}")]
    DumpError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Where the two source tables live and where the merged dump goes.
#[derive(Debug, Clone)]
pub struct DataLoader {
    athletes_path: PathBuf,
    regions_path: PathBuf,
    merged_output: Option<PathBuf>,
    infer_schema_length: Option<usize>,
}

impl DataLoader {
    pub fn new(athletes_path: impl Into<PathBuf>, regions_path: impl Into<PathBuf>) -> Self {
        Self {
            athletes_path: athletes_path.into(),
            regions_path: regions_path.into(),
            merged_output: None,
            infer_schema_length: None,
        }
    }

    /// Also write the merged (pre-clean) table to `path`.
    pub fn with_merged_output(mut self, path: Option<PathBuf>) -> Self {
        self.merged_output = path;
        self
    }

    /// Rows scanned for schema inference; `None` scans the whole file.
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    pub fn athletes_path(&self) -> &Path {
        &self.athletes_path
    }

    pub fn regions_path(&self) -> &Path {
        &self.regions_path
    }

    pub fn merged_output(&self) -> Option<&Path> {
        self.merged_output.as_deref()
    }

    /// Load both sources, merge them, write the optional dump and apply the
    /// canonical column names.
    pub fn load_merged(&self) -> Result<DataFrame, LoaderError> {
        let athletes = Self::load_csv(&self.athletes_path, self.infer_schema_length)?;
        let regions = Self::load_csv(&self.regions_path, self.infer_schema_length)?;

        let mut df = Self::merge(athletes, regions)?;

        if let Some(path) = &self.merged_output {
            Self::write_csv(&mut df, path)?;
            info!("Merged dataset written to {}", path.display());
        }

        Self::rename_region_columns(&mut df)?;
        Ok(df)
    }

    /// Load a CSV file using Polars. `NA` and empty cells become null.
    pub fn load_csv(path: &Path, infer_schema_length: Option<usize>) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let to_load_error = |source: PolarsError| LoaderError::CsvError {
            path: path.to_path_buf(),
            source,
        };

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(infer_schema_length)
            .with_null_values(Some(NullValues::AllColumnsSingle(schema::NA_TOKEN.into())))
            .finish()
            .map_err(to_load_error)?
            .collect()
            .map_err(to_load_error)?;

        info!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Full outer join on NOC. Unmatched rows from either side are kept with the
    /// other side's fields null; athlete rows keep their file order and unmatched
    /// regions follow them.
    pub fn merge(athletes: DataFrame, regions: DataFrame) -> Result<DataFrame, LoaderError> {
        let joined = athletes
            .lazy()
            .with_row_index(ROW_ORDER_COL, None)
            .join(
                regions.lazy(),
                [col(merged::JOIN_KEY)],
                [col(region::NOC)],
                JoinArgs::new(JoinType::Full).with_coalesce(JoinCoalesce::CoalesceColumns),
            )
            .sort(
                [ROW_ORDER_COL],
                SortMultipleOptions::default()
                    .with_nulls_last(true)
                    .with_maintain_order(true),
            )
            .collect()?;

        let df = joined.drop(ROW_ORDER_COL)?;
        debug!("Merged dataset: {} rows, {} columns", df.height(), df.width());
        Ok(df)
    }

    /// Relabel `region`/`notes` to `Region`/`Notes`.
    pub fn rename_region_columns(df: &mut DataFrame) -> Result<(), LoaderError> {
        for (from, to) in merged::RENAMES {
            df.rename(from, to.into())?;
        }
        Ok(())
    }

    /// Write a DataFrame as CSV with a header row.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<(), LoaderError> {
        let mut file = File::create(path).map_err(|source| LoaderError::DumpError {
            path: path.to_path_buf(),
            source,
        })?;

        CsvWriter::new(&mut file).include_header(true).finish(df)?;
        Ok(())
    }
}
