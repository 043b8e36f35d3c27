use std::num::NonZeroUsize;

use gradient_regression::{
    training::{GradientMode, TrainState, TrainingConfig},
    LinearRegression, RegressionErr,
};
use ndarray::{array, Array2};

fn config(learning_rate: f32, iterations: usize, batch_size: usize) -> TrainingConfig {
    TrainingConfig {
        learning_rate,
        iterations: NonZeroUsize::new(iterations).unwrap(),
        batch_size: NonZeroUsize::new(batch_size).unwrap(),
    }
}

fn doubling(config: TrainingConfig) -> LinearRegression {
    LinearRegression::from_rows(
        &[[1.0f32], [2.], [3.], [4.]],
        &[[2.0f32], [4.], [6.], [8.]],
        config,
    )
    .unwrap()
}

/// y = 3a - 2b + 1 over 23 rows, so batches of 5 leave 3 rows out.
fn plane() -> (Array2<f32>, Array2<f32>) {
    let x = Array2::from_shape_fn((23, 2), |(i, j)| {
        let i = i as f32 + 1.;
        if j == 0 {
            i
        } else {
            (i * 7.) % 5.
        }
    });
    let y = Array2::from_shape_fn((23, 1), |(i, _)| 3. * x[[i, 0]] - 2. * x[[i, 1]] + 1.);
    (x, y)
}

#[test]
fn converges_on_doubling_function() {
    let mut model = doubling(config(0.1, 500, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    let y_pred = model.predict(array![[5.]].view()).unwrap();

    assert!(
        (y_pred[[0, 0]] - 10.).abs() < 0.5,
        "predicted {} for 5",
        y_pred[[0, 0]]
    );
}

#[test]
fn converges_with_mini_batches() {
    let (x, y) = plane();
    let mut model = LinearRegression::new(x, y, config(0.1, 300, 5)).unwrap();
    model.train(GradientMode::MiniBatch).unwrap();

    let y_pred = model.predict(array![[30., 2.]].view()).unwrap();
    assert!((y_pred[[0, 0]] - 87.).abs() < 0.5, "got {}", y_pred[[0, 0]]);

    let r2 = model
        .test(array![[2., 4.], [9., 0.], [12., 3.]].view(), array![[-1.], [28.], [31.]].view())
        .unwrap();
    assert!((r2 - 1.).abs() < 1e-3, "got R² {r2}");
}

#[test]
fn mini_batch_over_whole_set_matches_single_batch() {
    let mut single = doubling(config(0.1, 1, 4));
    let mut mini = doubling(config(0.1, 1, 4));

    single.train(GradientMode::SingleBatch).unwrap();
    mini.train(GradientMode::MiniBatch).unwrap();

    for (a, b) in single.weights().iter().zip(mini.weights()) {
        assert!((a - b).abs() < 1e-6, "{a} != {b}");
    }
    assert_eq!(single.learning_rate(), mini.learning_rate());
}

#[test]
fn history_grows_by_iterations_per_call() {
    let mut model = doubling(config(0.1, 5, 10));
    assert!(model.mse_history().is_empty());

    model.train(GradientMode::SingleBatch).unwrap();
    assert_eq!(model.mse_history().len(), 5);
    let first_run = model.mse_history().chronological();

    model.train(GradientMode::SingleBatch).unwrap();
    let history = model.mse_history().chronological();

    assert_eq!(history.len(), 10);
    assert_eq!(&history[..5], &first_run[..]);
    assert_eq!(model.state(), TrainState::Done { iterations: 5 });
}

#[test]
fn second_train_resumes_from_current_weights() {
    let mut model = doubling(config(0.1, 3, 10));
    model.train(GradientMode::SingleBatch).unwrap();
    let before = model.mse_history().latest().unwrap();

    model.train(GradientMode::SingleBatch).unwrap();
    let after = model.mse_history().latest().unwrap();

    assert!(after < before, "{after} >= {before}");
}

#[test]
fn diverging_error_halves_the_rate_twice() {
    // standardized features make every step scale the error by (1 - rate)
    let mut model = doubling(config(10., 3, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    let history: Vec<_> = model.mse_history().iter().collect();
    assert!(history[0] > history[1] && history[1] > history[2]);
    assert!((model.learning_rate() - 10. / 4.).abs() < 1e-5);
}

#[test]
fn shrinking_error_accelerates_the_rate_twice() {
    let mut model = doubling(config(0.1, 3, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    let history: Vec<_> = model.mse_history().iter().collect();
    assert!(history[0] < history[1] && history[1] < history[2]);
    assert!((model.learning_rate() - 0.1 * 1.05 * 1.05).abs() < 1e-6);
}

#[test]
fn perfect_fit_scores_one() {
    let mut model = doubling(config(0.1, 500, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    let r2 = model
        .test(array![[5.], [6.], [0.]].view(), array![[10.], [12.], [0.]].view())
        .unwrap();

    assert!((r2 - 1.).abs() < 1e-3, "got R² {r2}");
}

#[test]
fn uninformative_feature_scores_zero() {
    // a constant feature standardizes to zero, only the bias (the label mean) is learned
    let mut model = LinearRegression::from_rows(
        &[[1.0f32], [1.], [1.], [1.]],
        &[[1.0f32], [2.], [3.], [4.]],
        config(0.1, 200, 10),
    )
    .unwrap();
    model.train(GradientMode::SingleBatch).unwrap();

    let r2 = model
        .test(array![[1.], [1.]].view(), array![[0.], [5.]].view())
        .unwrap();

    assert!(r2.abs() < 1e-3, "got R² {r2}");
}

#[test]
fn constant_test_labels_are_degenerate() {
    let mut model = doubling(config(0.1, 10, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    let err = model.test(
        array![[1.], [2.], [3.]].view(),
        array![[5.], [5.], [5.]].view(),
    );

    assert!(matches!(err, Err(RegressionErr::DegenerateTarget)));
}

#[test]
fn constant_fractional_test_labels_are_degenerate() {
    let mut model = doubling(config(0.1, 10, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    let features = Array2::from_shape_fn((7, 1), |(i, _)| i as f32);
    let labels = Array2::from_elem((7, 1), 0.1f32);
    let err = model.test(features.view(), labels.view());

    assert!(matches!(err, Err(RegressionErr::DegenerateTarget)));
}

#[test]
fn predict_keeps_one_row_per_observation() {
    let (x, y) = plane();
    let mut model = LinearRegression::new(x, y, config(0.1, 10, 5)).unwrap();
    model.train(GradientMode::SingleBatch).unwrap();

    for rows in [1, 2, 7] {
        let observations = Array2::from_elem((rows, 2), 3.);
        assert_eq!(model.predict(observations.view()).unwrap().dim(), (rows, 1));
    }
}

#[test]
fn predict_before_train_is_missing_statistics() {
    let model = doubling(TrainingConfig::default());

    assert!(matches!(
        model.predict(array![[1.]].view()),
        Err(RegressionErr::StatisticsMissing)
    ));
    assert!(matches!(
        model.test(array![[1.], [2.]].view(), array![[1.], [2.]].view()),
        Err(RegressionErr::StatisticsMissing)
    ));
}

#[test]
fn predict_rejects_wrong_column_count() {
    let mut model = doubling(config(0.1, 1, 10));
    model.train(GradientMode::SingleBatch).unwrap();

    assert!(matches!(
        model.predict(array![[1., 2.]].view()),
        Err(RegressionErr::Shape { .. })
    ));
}

#[test]
fn too_large_batch_fails_before_training() {
    let mut model = doubling(config(0.1, 10, 5));
    let err = model.train(GradientMode::MiniBatch);

    assert!(matches!(
        err,
        Err(RegressionErr::EmptyBatch {
            rows: 4,
            batch_size: 5
        })
    ));
    assert!(model.mse_history().is_empty());
    assert!(model.weights().iter().all(|&w| w == 0.));
    assert_eq!(model.state(), TrainState::Idle);
}

#[test]
fn mismatched_training_rows_are_rejected() {
    let config = TrainingConfig::default();
    let err = LinearRegression::from_rows(&[[1.0f32], [2.]], &[[1.0f32]], config);
    assert!(matches!(err, Err(RegressionErr::Shape { .. })));
}

#[test]
fn ragged_training_rows_are_rejected() {
    let features = vec![vec![1.0f32, 2.], vec![3.]];
    let config = TrainingConfig::default();
    let err = LinearRegression::from_rows(&features, &[[1.0f32], [2.]], config);
    assert!(matches!(err, Err(RegressionErr::Ragged { .. })));
}
