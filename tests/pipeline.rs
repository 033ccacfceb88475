use olympic_dashboard::cli::Args;
use olympic_dashboard::config::Config;
use olympic_dashboard::data::{DataLoader, NullPolicy};
use olympic_dashboard::pipeline::{Pipeline, PipelineError, ViewParams};
use olympic_dashboard::report;
use olympic_dashboard::stats::{AgeRange, MedalFilter, MedalTally, RankedCount};
use std::path::Path;

const ATHLETES: &str = "\
ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal
1,A,M,24,180,80,United States,USA,2000 Summer,2000,Summer,Sydney,Swimming,Swimming 100m,Gold
1,A,M,28,180,80,United States,USA,2004 Summer,2004,Summer,Athina,Swimming,Swimming 100m,Gold
2,B,F,22,170,60,Norway,NOR,2000 Summer,2000,Summer,Sydney,Rowing,Rowing Single,Silver
3,C,M,26,175,75,United States,USA,2004 Summer,2004,Summer,Athina,Judo,Judo Lightweight,NA
";

const REGIONS: &str = "\
NOC,region,notes
USA,USA,-
NOR,Norway,-
";

fn write_inputs(dir: &Path) -> DataLoader {
    let athletes = dir.join("athlete_events.csv");
    let regions = dir.join("noc_regions.csv");
    std::fs::write(&athletes, ATHLETES).unwrap();
    std::fs::write(&regions, REGIONS).unwrap();
    DataLoader::new(athletes, regions)
}

#[test]
fn test_full_pipeline_from_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("merged_file.csv");
    let loader = write_inputs(dir.path()).with_merged_output(Some(dump.clone()));

    let pipeline = Pipeline::load(&loader, NullPolicy::Global).unwrap();
    assert_eq!(pipeline.merged_rows(), 4);
    assert_eq!(pipeline.cleaned().height(), 3);

    let views = pipeline.views(ViewParams::default()).unwrap();
    assert_eq!(views.participations, 2);
    assert_eq!(views.medal_counts, MedalTally { gold: 2, silver: 1, bronze: 0 });
    assert_eq!(
        views.top_athletes,
        vec![RankedCount::new("A", 2), RankedCount::new("B", 1)]
    );
    assert_eq!(
        views.medals_by_country,
        vec![RankedCount::new("USA", 2), RankedCount::new("NOR", 1)]
    );
    assert_eq!(views.medals_per_year.len(), 2);

    let dump = std::fs::read_to_string(&dump).unwrap();
    assert_eq!(dump.lines().count(), 5);
    assert!(dump.lines().next().unwrap().ends_with("region,notes"));
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DataLoader::new(dir.path().join("missing.csv"), dir.path().join("also.csv"));
    assert!(matches!(
        Pipeline::load(&loader, NullPolicy::Global),
        Err(PipelineError::Load(_))
    ));
}

#[test]
fn test_config_drives_pipeline_and_export() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let args = Args {
        athletes: Some(dir.path().join("athlete_events.csv")),
        regions: Some(dir.path().join("noc_regions.csv")),
        no_dump: true,
        medal_filter: Some(MedalFilter::Gold),
        age_min: Some(20),
        age_max: Some(25),
        ..Default::default()
    };
    let mut config = Config::default();
    config.merge_with_args(&args).unwrap();

    let pipeline = Pipeline::load(&config.loader(), config.pipeline.null_policy).unwrap();
    let views = pipeline.views(config.view_params()).unwrap();
    assert_eq!(views.medals_by_country, vec![RankedCount::new("USA", 2)]);
    assert_eq!(views.age_range, AgeRange::new(20, 25).unwrap());
    assert_eq!(views.athletes_in_age_range, 2);

    let out = dir.path().join("export");
    report::write_json(&views, &out.with_extension("json")).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.with_extension("json")).unwrap())
            .unwrap();
    assert_eq!(json["medal_filter"], "gold");
    assert!(!dir.path().join("merged_file.csv").exists());
}
