use super::*;
use ndarray::array;

fn seeded(n_folds: usize, seed: u64) -> Option<CrossValidationParams> {
    Some(CrossValidationParams {
        n_folds,
        random_state: Some(seed),
        parallel: false,
    })
}

#[test]
fn test_default_params() {
    let params = CrossValidationParams::default();
    assert_eq!(params.n_folds, 5);
    assert_eq!(params.random_state, None);
    assert!(!params.parallel);
}

#[test]
fn test_separable_data_scores_perfectly() {
    let records = separable_by_n();
    let report = cross_validate(&records, None, seeded(5, 42)).unwrap();

    assert_eq!(report.n_folds(), 5);
    for fold in report.folds() {
        assert_abs_diff_eq!(fold.accuracy, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fold.precision, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fold.recall, 1.0, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(report.mean_accuracy(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.mean_precision(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(report.mean_recall(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_unseeded_run_still_reports_every_fold() {
    let records = separable_by_n();
    let report = cross_validate(&records, None, None).unwrap();

    assert_eq!(report.n_folds(), 5);
    assert_abs_diff_eq!(report.mean_accuracy(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_seeded_runs_are_identical() {
    let records: Vec<Record> = (0..30)
        .map(|i| {
            let x = i as f64;
            let label = match i % 3 {
                0 => "rice",
                1 => "maize",
                _ => "jute",
            };
            Record::from_values(
                [x % 7.0, (x * 3.0) % 11.0, x % 5.0, 20.0, 60.0 + x, 6.5, (x * 13.0) % 17.0],
                label,
            )
        })
        .collect();

    let first = cross_validate(&records, None, seeded(4, 7)).unwrap();
    let second = cross_validate(&records, None, seeded(4, 7)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());

    let parallel = cross_validate(
        &records,
        Some(DecisionTreeParams {
            parallel: true,
            ..Default::default()
        }),
        Some(CrossValidationParams {
            n_folds: 4,
            random_state: Some(7),
            parallel: true,
        }),
    )
    .unwrap();
    assert_eq!(first, parallel);
}

#[test]
fn test_remainder_does_not_change_fold_count() {
    let mut records = separable_by_n();
    records.push(Record::from_values([3.0, 20.0, 10.0, 25.0, 80.0, 6.5, 200.0], "rice"));
    records.push(Record::from_values([115.0, 20.0, 10.0, 25.0, 80.0, 6.5, 200.0], "maize"));

    let report = cross_validate(&records, None, seeded(5, 3)).unwrap();
    assert_eq!(report.n_folds(), 5);
}

#[test]
fn test_records_are_not_modified() {
    let records = three_crops();
    let before = records.clone();
    cross_validate(&records, None, seeded(3, 11)).unwrap();
    assert_eq!(records, before);
}

#[test]
fn test_empty_dataset() {
    let result = cross_validate(&[], None, None);
    assert_eq!(result, Err(ModelError::EmptyDataset));
}

#[test]
fn test_invalid_fold_counts() {
    let records = separable_by_n();
    assert!(matches!(
        cross_validate(&records, None, seeded(1, 0)),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        cross_validate(&records, None, seeded(0, 0)),
        Err(ModelError::InputValidationError(_))
    ));

    let few = rice_and_maize();
    assert!(matches!(
        cross_validate(&few, None, seeded(5, 0)),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_missing_feature_aborts_run() {
    let mut records = separable_by_n();
    let mut incomplete = Record::new("rice");
    for feature in Feature::ALL.into_iter().filter(|&f| f != Feature::N) {
        incomplete.set_value(feature, 1.0);
    }
    records.push(incomplete);

    // 21 records into 3 folds: nothing is left out
    let result = cross_validate(&records, None, seeded(3, 5));
    assert_eq!(result, Err(ModelError::MissingFeature(Feature::N)));
}

#[test]
fn test_fold_metrics_macro_average() {
    let predicted = array!["rice", "rice", "maize", "maize"];
    let actual = array!["rice", "rice", "rice", "maize"];
    let metrics = FoldMetrics::evaluate(&predicted, &actual);

    assert_abs_diff_eq!(metrics.accuracy, 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.precision, (1.0 + 0.5) / 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.recall, (2.0 / 3.0 + 1.0) / 2.0, epsilon = 1e-12);
}

#[test]
fn test_fold_metrics_average_over_actual_labels_only() {
    // "jute" is predicted but never occurs, so it is not averaged in
    let predicted = array!["jute", "rice", "maize"];
    let actual = array!["rice", "rice", "maize"];
    let metrics = FoldMetrics::evaluate(&predicted, &actual);

    assert_abs_diff_eq!(metrics.accuracy, 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.precision, 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.recall, (0.5 + 1.0) / 2.0, epsilon = 1e-12);
}

#[test]
fn test_fold_metrics_empty() {
    let empty: ndarray::Array1<&str> = ndarray::Array1::from_vec(Vec::new());
    let metrics = FoldMetrics::evaluate(&empty, &empty);
    assert_eq!(
        metrics,
        FoldMetrics {
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
        }
    );
}

#[test]
fn test_fold_metrics_display() {
    let metrics = FoldMetrics {
        accuracy: 0.931818,
        precision: 0.5,
        recall: 1.0,
    };
    assert_eq!(metrics.to_string(), "Acc=93.18%, Prec=50.00%, Rec=100.00%");
}

#[test]
fn test_report_display_and_means() {
    let report = CrossValidationReport::new(vec![
        FoldMetrics {
            accuracy: 1.0,
            precision: 1.0,
            recall: 1.0,
        },
        FoldMetrics {
            accuracy: 0.5,
            precision: 0.25,
            recall: 0.75,
        },
    ]);

    assert_eq!(
        report.to_string(),
        "Fold 1: Acc=100.00%, Prec=100.00%, Rec=100.00%\n\
         Fold 2: Acc=50.00%, Prec=25.00%, Rec=75.00%\n"
    );
    assert_abs_diff_eq!(report.mean_accuracy(), 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(report.mean_precision(), 0.625, epsilon = 1e-12);
    assert_abs_diff_eq!(report.mean_recall(), 0.875, epsilon = 1e-12);
}

#[test]
fn test_empty_report() {
    let report = CrossValidationReport::new(Vec::new());
    assert_eq!(report.n_folds(), 0);
    assert_eq!(report.mean_accuracy(), 0.0);
    assert_eq!(report.to_string(), "");
}
