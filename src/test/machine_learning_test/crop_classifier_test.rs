use super::*;

fn trained_on_three_crops() -> CropClassifier {
    let mut classifier = CropClassifier::new(
        None,
        Some(CrossValidationParams {
            n_folds: 3,
            random_state: Some(42),
            parallel: false,
        }),
    );
    classifier.train(&three_crops()).unwrap();
    classifier
}

#[test]
fn test_new_classifier_is_untrained() {
    let classifier = CropClassifier::new(None, None);

    assert!(!classifier.is_trained());
    assert!(classifier.training_report().is_none());
    assert!(classifier.get_model().get_root().is_none());
    assert_eq!(classifier.get_cv_params(), CrossValidationParams::default());
}

#[test]
fn test_recommend_before_training() {
    let classifier = CropClassifier::default();
    let result = classifier.recommend(["10", "10", "0", "0", "0", "0", "0"]);
    assert_eq!(result, Err(ModelError::NotFitted));

    let query = Record::from_values([10.0; 7], "");
    assert_eq!(classifier.predict(&query), Err(ModelError::NotFitted));
}

#[test]
fn test_train_and_recommend() {
    let classifier = trained_on_three_crops();
    assert!(classifier.is_trained());

    assert_eq!(
        classifier
            .recommend(["10", "10", "0", "0", "0", "0", "0"])
            .unwrap(),
        "rice"
    );
    assert_eq!(
        classifier
            .recommend(["100", "60", "0", "0", "0", "0", "0"])
            .unwrap(),
        "maize"
    );
    assert_eq!(
        classifier
            .recommend([" 118 ", "95.5", "1", "2", "3", "4", "5"])
            .unwrap(),
        "jute"
    );
}

#[test]
fn test_recommend_parse_error() {
    let classifier = trained_on_three_crops();
    let result = classifier.recommend(["10", "abc", "0", "0", "0", "0", "0"]);
    assert_eq!(
        result,
        Err(ModelError::ParseError {
            feature: Feature::P,
            value: "abc".to_string(),
        })
    );

    let result = classifier.recommend(["10", "10", "0", "0", "0", "", "0"]);
    assert!(matches!(
        result,
        Err(ModelError::ParseError {
            feature: Feature::Ph,
            ..
        })
    ));
}

#[test]
fn test_training_report() {
    let classifier = trained_on_three_crops();
    let report = classifier.training_report().unwrap();

    assert_eq!(report.tree.feature(), Some(Feature::N));
    assert_eq!(report.tree.threshold(), Some(65.0));
    assert_eq!(report.cross_validation.n_folds(), 3);

    let text = report.to_string();
    assert!(text.starts_with("Decision Tree:\nN = N <= 65.0:\n"));
    assert!(text.contains("\n\nResults:\nFold 1: Acc="));
    assert!(text.ends_with('\n'));
    assert_eq!(text.matches("Fold ").count(), 3);
}

#[test]
fn test_train_returns_the_stored_report() {
    let mut classifier = CropClassifier::new(
        None,
        Some(CrossValidationParams {
            n_folds: 2,
            random_state: Some(9),
            parallel: false,
        }),
    );
    let text = classifier.train(&separable_by_n()).unwrap().to_string();

    let stored = classifier.training_report().unwrap();
    assert_eq!(text, stored.to_string());
    assert_abs_diff_eq!(stored.cross_validation.mean_accuracy(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_training_leaves_records_untouched() {
    let records = three_crops();
    let before = records.clone();
    let mut classifier = CropClassifier::new(
        None,
        Some(CrossValidationParams {
            n_folds: 2,
            random_state: Some(1),
            parallel: true,
        }),
    );
    classifier.train(&records).unwrap();
    assert_eq!(records, before);
}

#[test]
fn test_failed_training_resets_state() {
    let mut classifier = trained_on_three_crops();
    assert!(classifier.is_trained());

    // Two records cannot be split into three folds
    let result = classifier.train(&rice_and_maize());
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
    assert!(!classifier.is_trained());
    assert_eq!(
        classifier.recommend(["10", "10", "0", "0", "0", "0", "0"]),
        Err(ModelError::NotFitted)
    );
}

#[test]
fn test_train_on_empty_dataset() {
    let mut classifier = CropClassifier::default();
    let result = classifier.train(&[]);
    assert!(matches!(result, Err(ModelError::EmptyDataset)));
    assert!(!classifier.is_trained());
}
