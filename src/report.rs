//! Dashboard Report Export
//! Writes a JSON snapshot of the views and static PNG charts.

use crate::charts::{RenderResult, StaticChartRenderer};
use crate::stats::{DashboardViews, RankedCount};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Bars drawn in the static country chart; the JSON keeps every country.
pub const COUNTRY_CHART_LIMIT: usize = 20;

pub const JSON_FILE_NAME: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize dashboard: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to render {chart}: {message}")]
    Render { chart: String, message: String },
}

/// Write the views as pretty-printed JSON.
pub fn write_json(views: &DashboardViews, path: &Path) -> Result<(), ReportError> {
    let io_error = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, views)?;
    writer.flush().map_err(io_error)?;
    info!("Dashboard snapshot written to {}", path.display());
    Ok(())
}

/// Write `dashboard.json` and one PNG per chart into `dir`, creating it if
/// needed. Returns the written files in order.
pub fn export_dashboard(views: &DashboardViews, dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let json_path = dir.join(JSON_FILE_NAME);
    write_json(views, &json_path)?;
    let mut written = vec![json_path];

    let countries = country_chart_rows(&views.medals_by_country);
    let country_title = format!("Number of {} Medals per Country", views.medal_filter);

    let charts: [(&str, Box<dyn Fn(&Path) -> RenderResult + '_>); 7] = [
        (
            "medals_per_year.png",
            Box::new(|p: &Path| StaticChartRenderer::render_medals_per_year(&views.medals_per_year, p)),
        ),
        (
            "top_athletes.png",
            Box::new(|p: &Path| StaticChartRenderer::render_ranking("Top 5 Athletes", &views.top_athletes, p)),
        ),
        (
            "top_sports.png",
            Box::new(|p: &Path| StaticChartRenderer::render_ranking("Top 5 Sports", &views.top_sports, p)),
        ),
        (
            "medals_by_age_bin.png",
            Box::new(|p: &Path| StaticChartRenderer::render_age_bins(&views.medals_by_age_bin, p)),
        ),
        (
            "medals_by_gender.png",
            Box::new(|p: &Path| StaticChartRenderer::render_pie("Medals by Gender", &views.medals_by_gender, p)),
        ),
        (
            "medals_by_season.png",
            Box::new(|p: &Path| {
                StaticChartRenderer::render_bar_chart("Medals by Season", "Season", &views.medals_by_season, p)
            }),
        ),
        (
            "medals_by_country.png",
            Box::new(move |p: &Path| render_countries(&country_title, countries, p)),
        ),
    ];

    for (file_name, render) in charts {
        let path = dir.join(file_name);
        render(&path).map_err(|e| ReportError::Render {
            chart: file_name.to_string(),
            message: e.to_string(),
        })?;
        info!("Chart written to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Leading rows drawn in the country chart.
fn country_chart_rows(rows: &[RankedCount]) -> &[RankedCount] {
    &rows[..rows.len().min(COUNTRY_CHART_LIMIT)]
}

fn render_countries(title: &str, rows: &[RankedCount], path: &Path) -> RenderResult {
    StaticChartRenderer::render_bar_chart(title, "Country", rows, path)
}
