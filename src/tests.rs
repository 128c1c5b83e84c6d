use approx::assert_abs_diff_eq;
use ndarray::array;

use crate::{
    classify, evaluate,
    iris::{IrisClass, IrisSample},
    ClassifierBuilder, Distance, Error, Metric,
};

#[test]
fn test_metric() {
    let arr1 = array![0., 0., 0.];
    let arr2 = array![3., 4., 0.];

    assert_abs_diff_eq!(
        7.,
        Metric::Manhattan.distance(arr1.view(), arr2.view()).unwrap()
    );
    assert_abs_diff_eq!(
        5.,
        Metric::Euclidean.distance(arr1.view(), arr2.view()).unwrap()
    );
    assert_abs_diff_eq!(
        4.,
        Metric::Chebyshev.distance(arr1.view(), arr2.view()).unwrap()
    );
}

#[test]
fn test_metric_dimension_mismatch() {
    let arr1 = array![1., 2.];
    let arr2 = array![1., 2., 3.];

    for metric in &Metric::ALL {
        assert!(
            matches!(
                metric.distance(arr1.view(), arr2.view()),
                Err(Error::DimensionMismatch { left: 2, right: 3 })
            ),
            "{}",
            metric
        );
    }
}

#[test]
fn test_classify_is_deterministic() {
    let candidates = vec![
        IrisSample::new(array![0.1, 0.2], IrisClass::Setosa),
        IrisSample::new(array![0.2, 0.1], IrisClass::Versicolor),
        IrisSample::new(array![0.15, 0.15], IrisClass::Setosa),
        IrisSample::new(array![0.9, 0.9], IrisClass::Virginica),
    ];
    let query = IrisSample::new(array![0.12, 0.18], IrisClass::Setosa);

    for metric in &Metric::ALL {
        let first = classify(3, &query, &candidates, metric).unwrap();
        for _ in 0..10 {
            assert_eq!(first, classify(3, &query, &candidates, metric).unwrap());
        }
        assert_eq!(Some(IrisClass::Setosa), first);
    }
}

#[test]
fn test_leave_one_out_through_classifier() {
    let dataset = vec![
        IrisSample::new(array![0.0, 0.0, 0.0, 0.0], IrisClass::Setosa),
        IrisSample::new(array![0.1, 0.1, 0.0, 0.0], IrisClass::Setosa),
        IrisSample::new(array![0.5, 0.5, 0.5, 0.5], IrisClass::Versicolor),
        IrisSample::new(array![0.6, 0.5, 0.5, 0.5], IrisClass::Versicolor),
        IrisSample::new(array![1.0, 1.0, 1.0, 1.0], IrisClass::Virginica),
        IrisSample::new(array![0.9, 1.0, 1.0, 1.0], IrisClass::Virginica),
    ];

    let classifier = ClassifierBuilder::new()
        .k(1)
        .metric(Metric::Chebyshev)
        .build(dataset.clone())
        .unwrap();

    let eval = classifier.evaluate().unwrap();
    assert_eq!(eval, evaluate(1, &Metric::Chebyshev, &dataset).unwrap());
    assert_eq!(6, eval.total());
    assert_abs_diff_eq!(0., eval.error_rate());
    assert_abs_diff_eq!(1., eval.coverage());
}
