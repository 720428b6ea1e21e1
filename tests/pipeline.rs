//! End-to-end runs of the analysis over fixture files.

use std::path::PathBuf;
use titanic_eda::importance::correlation;
use titanic_eda::loader::{load_from_reader, load_passengers};
use titanic_eda::{analyze, Analysis, AnalysisConfig, EdaError, Feature, ImputationPolicy, Passenger, Port, Title};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .display()
        .to_string()
}

fn run(name: &str, imputation: ImputationPolicy) -> (Vec<Passenger>, Analysis) {
    let (mut data, _) = load_passengers(&fixture(name)).expect("fixture should load");
    let analysis = analyze(&mut data, &AnalysisConfig { imputation });
    (data, analysis)
}

#[test]
fn four_passenger_walkthrough() {
    let (data, a) = run("four_passengers.csv", ImputationPolicy::Snapshot);

    assert_eq!(data[2].age, Some(29.0));
    assert_eq!(a.preprocess.imputed_age, 1);
    assert_eq!(a.overview.total, 4);
    assert_eq!(a.overview.survived_pct, Some(50.0));
    assert_eq!(format!("{:.2}", a.overview.perished_pct.unwrap()), "50.00");

    let sex = a
        .categorical
        .iter()
        .find(|r| r.feature == Feature::Sex)
        .unwrap();
    let female = sex.get("female").unwrap();
    let male = sex.get("male").unwrap();
    assert_eq!((female.rate, female.total), (100.0, 2));
    assert_eq!((male.rate, male.total), (0.0, 2));

    let finding = a.key_finding.expect("a factor should be selected");
    assert_eq!(finding.factor, "Gender");
    assert_eq!(finding.detail, "Female: 100.00%, Male: 0.00%");
}

#[test]
fn non_numeric_age_is_imputed_with_the_median() {
    let csv = "Survived,Pclass,Name,Sex,Age,SibSp,Parch,Fare,Embarked\n\
               1,1,\"Smith, Mrs. Jane\",female,29,0,0,100,C\n\
               0,3,\"Jones, Mr. Tom\",male,NaN,1,0,7,S\n\
               1,1,\"Brown, Miss. Ann\",female,22,0,0,unknown,C\n\
               0,3,\"Lee, Mr. Sam\",male,30,0,0,8,S\n";
    let (mut data, _) = load_from_reader(csv.as_bytes()).unwrap();
    let a = analyze(&mut data, &AnalysisConfig::default());
    assert_eq!(data[1].age, Some(29.0));
    assert_eq!(a.preprocess.imputed_age, 1);

    let fare = a.stats.iter().find(|s| s.feature == Feature::Fare).unwrap();
    let fare = fare.stats.unwrap();
    assert_eq!((fare.min, fare.max), (7.0, 100.0));
    let fare_missing = a
        .missing_values
        .iter()
        .find(|m| m.feature == Feature::Fare)
        .unwrap();
    assert_eq!(fare_missing.missing, 1);
}

#[test]
fn live_policy_matches_snapshot_with_a_single_gap() {
    let (snap, _) = run("four_passengers.csv", ImputationPolicy::Snapshot);
    let (live, _) = run("four_passengers.csv", ImputationPolicy::Live);
    assert_eq!(snap, live);
}

#[test]
fn processed_records_satisfy_invariants() {
    let (data, a) = run("titanic_sample.csv", ImputationPolicy::Snapshot);
    assert_eq!(data.len(), 32);
    assert_eq!(a.preprocess.imputed_age, 6);
    assert_eq!(a.preprocess.age_fill, Some(29.5));
    assert_eq!(a.preprocess.imputed_embarked, 1);

    for p in &data {
        assert!(p.age.is_some_and(f64::is_finite));
        assert!(matches!(p.embarked, Some(Port::C | Port::Q | Port::S)));
        let family = p.sib_sp + p.parch + 1;
        assert_eq!(p.family_size, Some(family));
        assert_eq!(p.is_alone, Some(family == 1));
        assert!(p.title.is_some());
    }
    let don = data.iter().find(|p| p.name.starts_with("Uruchurtu")).unwrap();
    assert_eq!(don.title, Some(Title::Other));

    let age_missing = a
        .missing_values
        .iter()
        .find(|m| m.feature == Feature::Age)
        .unwrap();
    assert_eq!(age_missing.missing, 0);
}

#[test]
fn category_totals_cover_the_dataset() {
    let (data, a) = run("titanic_sample.csv", ImputationPolicy::Snapshot);
    for result in &a.categorical {
        let total: usize = result.categories.iter().map(|c| c.total).sum();
        assert_eq!(total, data.len(), "{}", result.feature);
    }
    let class_total: usize = a
        .breakdowns
        .by_class
        .iter()
        .map(|c| c.survived + c.perished)
        .sum();
    assert_eq!(class_total, data.len());
    let age_total: usize = a
        .breakdowns
        .age_histogram
        .iter()
        .map(|c| c.survived + c.perished)
        .sum();
    assert_eq!(age_total, data.len());
}

#[test]
fn sample_key_finding_is_gender() {
    let (_, a) = run("titanic_sample.csv", ImputationPolicy::Live);
    let finding = a.key_finding.unwrap();
    assert_eq!(finding.factor, "Gender");
    assert_eq!(finding.detail, "Female: 81.25%, Male: 18.75%");
    assert!((finding.impact - 62.5).abs() < 1e-9);
}

#[test]
fn correlations_match_direct_computation() {
    let (data, a) = run("titanic_sample.csv", ImputationPolicy::Snapshot);
    let y: Vec<f64> = data
        .iter()
        .map(|p| if p.survived { 1.0 } else { 0.0 })
        .collect();
    let fare: Vec<f64> = data.iter().map(|p| p.fare.unwrap()).collect();
    let got = a
        .correlations
        .iter()
        .find(|c| c.feature == Feature::Fare)
        .unwrap();
    assert_eq!(got.samples, data.len());
    assert!(!got.degenerate);
    assert!((got.coefficient - correlation(&fare, &y)).abs() < 1e-12);
    assert!(a.correlations.iter().all(|c| (-1.0..=1.0).contains(&c.coefficient)));
}

#[test]
fn analysis_is_stable_when_rerun_on_processed_data() {
    let (mut data, first) = run("titanic_sample.csv", ImputationPolicy::Snapshot);
    let before = data.clone();
    let second = analyze(&mut data, &AnalysisConfig::default());
    assert_eq!(data, before);
    assert_eq!(second.preprocess.imputed_age, 0);
    assert_eq!(second.overview, first.overview);
    assert_eq!(second.categorical, first.categorical);
    assert_eq!(second.stats, first.stats);
}

#[test]
fn summary_serializes_to_json() {
    let (_, a) = run("four_passengers.csv", ImputationPolicy::Snapshot);
    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["overview"]["total"], 4);
    assert_eq!(json["key_finding"]["factor"], "Gender");
    assert_eq!(json["stats"][0]["feature"], "Age");
}

#[test]
fn schema_violations_stop_the_run() {
    let err = load_from_reader("Survived,Pclass,Sex\n1,1,female\n".as_bytes()).unwrap_err();
    assert!(matches!(err, EdaError::MissingColumns(_)));

    let err = load_passengers(&fixture("does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, EdaError::Load { .. }));
}
