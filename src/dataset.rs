//! Reading labeled feature vectors from comma separated text.
//!
//! Each row holds N numeric fields followed by one label field. Features are normalized
//! column-wise to ```[0, 1]``` before samples are created, so that no single feature dominates
//! the distance. The scaling is fitted on the dataset and returned as a [`Normalizer`], which
//! must be applied to every query before it is classified.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    marker::PhantomData,
    path::Path,
};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_stats::QuantileExt;

use crate::{Category, Error, LabeledSample, Result, Sample, Scalar};

/// Raw rows of a dataset: a feature matrix and one label per row.
#[derive(Clone, Debug, PartialEq)]
pub struct Records {
    features: Array2<Scalar>,
    labels: Vec<String>,
    normalizer: Option<Normalizer>,
}

impl Records {
    /// Returns the feature matrix, one row per record.
    pub fn features(&self) -> ArrayView2<'_, Scalar> {
        self.features.view()
    }

    /// Returns the labels in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns ```true``` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Normalizes every feature column to ```[0, 1]``` and keeps the fitted scaling.
    pub fn normalize(&mut self) -> Result<&Normalizer> {
        let normalizer = normalize(&mut self.features)?;
        Ok(self.normalizer.insert(normalizer))
    }

    /// Returns the scaling fitted by the last call to [`Records::normalize`].
    pub fn normalizer(&self) -> Option<&Normalizer> {
        self.normalizer.as_ref()
    }

    /// Builds one sample per record.
    pub fn into_samples<F: SampleFactory>(self, factory: &F) -> Result<Vec<F::Output>> {
        self.features
            .outer_iter()
            .zip(self.labels.iter())
            .map(|(row, label)| factory.create(row.to_owned(), label))
            .collect()
    }
}

/// Builds dataset specific samples from a feature vector and a raw label.
pub trait SampleFactory {
    /// Sample type produced by this factory.
    type Output: Sample;

    /// Creates a sample.
    fn create(&self, features: Array1<Scalar>, label: &str) -> Result<Self::Output>;
}

/// Factory for [`LabeledSample`], optionally restricted to a fixed number of features.
#[derive(Clone, Copy, Debug)]
pub struct LabeledFactory<C> {
    dim: Option<usize>,
    category: PhantomData<C>,
}

impl<C: Category> LabeledFactory<C> {
    /// Creates a factory accepting any number of features.
    pub fn new() -> Self {
        Self {
            dim: None,
            category: PhantomData,
        }
    }

    /// Creates a factory accepting exactly ```dim``` features.
    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim: Some(dim),
            category: PhantomData,
        }
    }
}

impl<C: Category> Default for LabeledFactory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> SampleFactory for LabeledFactory<C> {
    type Output = LabeledSample<C>;

    fn create(&self, features: Array1<Scalar>, label: &str) -> Result<LabeledSample<C>> {
        if let Some(dim) = self.dim {
            if features.len() != dim {
                return Err(Error::FieldCount {
                    expected: dim,
                    found: features.len(),
                });
            }
        }

        let label = C::parse(label).ok_or_else(|| Error::UnknownLabel(label.trim().to_string()))?;
        Ok(LabeledSample::new(features, label))
    }
}

/// Parses comma separated records. Blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Records> {
    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut width = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lineno = idx + 1;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let expected = *width.get_or_insert(fields.len());
        if fields.len() != expected {
            return Err(Error::RaggedRow {
                line: lineno,
                expected,
                found: fields.len(),
            });
        }

        let (label, numbers) = match fields.split_last() {
            Some(split) => split,
            None => continue,
        };

        for field in numbers {
            let x: Scalar = field.parse().map_err(|_| Error::Parse {
                line: lineno,
                value: field.to_string(),
            })?;

            if !x.is_finite() {
                return Err(Error::NonFinite {
                    line: lineno,
                    value: field.to_string(),
                });
            }

            values.push(x);
        }

        labels.push(label.to_string());
    }

    let ncols = match width {
        Some(w) => w - 1,
        None => return Err(Error::EmptyDataset),
    };

    let features = Array2::from_shape_vec((labels.len(), ncols), values)?;
    Ok(Records {
        features,
        labels,
        normalizer: None,
    })
}

/// Per-column min-max scaling fitted on a feature matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalizer {
    min: Array1<Scalar>,
    range: Array1<Scalar>,
}

impl Normalizer {
    /// Fits the scaling to the columns of ```features```.
    pub fn fit(features: ArrayView2<'_, Scalar>) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }

        let mut min = Array1::zeros(features.ncols());
        let mut range = Array1::zeros(features.ncols());

        for (idx, column) in features.axis_iter(Axis(1)).enumerate() {
            let lo = *column.min()?;
            let hi = *column.max()?;
            min[idx] = lo;
            range[idx] = hi - lo;
        }

        Ok(Self { min, range })
    }

    /// Number of columns the scaling was fitted on.
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// Per-column minimum.
    pub fn min(&self) -> ArrayView1<'_, Scalar> {
        self.min.view()
    }

    /// Per-column range, ```max - min```.
    pub fn range(&self) -> ArrayView1<'_, Scalar> {
        self.range.view()
    }

    /// Scales a raw feature vector in place. Values outside the fitted range fall outside
    /// ```[0, 1]```; a constant column maps to zero.
    pub fn apply(&self, features: &mut Array1<Scalar>) -> Result<()> {
        if features.len() != self.dim() {
            return Err(Error::DimensionMismatch {
                left: self.dim(),
                right: features.len(),
            });
        }

        for ((x, min), range) in features.iter_mut().zip(self.min.iter()).zip(self.range.iter()) {
            *x = if *range > 0. { (*x - min) / range } else { 0. };
        }

        Ok(())
    }
}

/// Min-max normalization of every column to ```[0, 1]```. A constant column becomes zero.
///
/// Returns the fitted scaling so that queries can be put on the same scale.
pub fn normalize(features: &mut Array2<Scalar>) -> Result<Normalizer> {
    let normalizer = Normalizer::fit(features.view())?;

    for (mut column, (min, range)) in features
        .axis_iter_mut(Axis(1))
        .zip(normalizer.min.iter().zip(normalizer.range.iter()))
    {
        if *range > 0. {
            column.mapv_inplace(|x| (x - min) / range);
        } else {
            column.fill(0.);
        }
    }

    Ok(normalizer)
}

/// Reads, normalizes and converts records into samples. Returns the samples together with the
/// scaling fitted on them.
pub fn load<R, F>(reader: R, factory: &F) -> Result<(Vec<F::Output>, Normalizer)>
where
    R: BufRead,
    F: SampleFactory,
{
    let mut records = read_records(reader)?;
    let normalizer = records.normalize()?.clone();
    let samples = records.into_samples(factory)?;
    Ok((samples, normalizer))
}

/// Loads a dataset from a csv file, see [`load`].
pub fn load_csv<P, F>(path: P, factory: &F) -> Result<(Vec<F::Output>, Normalizer)>
where
    P: AsRef<Path>,
    F: SampleFactory,
{
    let file = File::open(path)?;
    load(BufReader::new(file), factory)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;
    use crate::{
        iris::{self, IrisClass},
        ClassifierBuilder, Metric,
    };

    const CSV: &str = "5.1,3.5,1.4,0.2,Iris-setosa
4.9,3.0,1.4,0.2,Iris-setosa

7.0,3.2,4.7,1.4,Iris-versicolor
6.3,3.3,6.0,2.5,Iris-virginica
";

    #[test]
    fn test_read_records() {
        let records = read_records(CSV.as_bytes()).unwrap();
        assert_eq!(4, records.len());
        assert!(!records.is_empty());
        assert_eq!((4, 4), records.features().dim());
        assert_eq!("Iris-versicolor", records.labels()[2]);
        assert_eq!(array![7.0, 3.2, 4.7, 1.4], records.features().row(2));
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            read_records("".as_bytes()),
            Err(Error::EmptyDataset)
        ));
        assert!(matches!(
            read_records("1,2,a\n1,b\n".as_bytes()),
            Err(Error::RaggedRow {
                line: 2,
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            read_records("1,x,a\n".as_bytes()),
            Err(Error::Parse { line: 1, .. })
        ));
        assert!(matches!(
            read_records("1,2,a\n\n1,NaN,b\n".as_bytes()),
            Err(Error::NonFinite { line: 3, .. })
        ));
    }

    #[test]
    fn test_normalize() {
        let mut features = array![[1.0, 5.0, 2.0], [3.0, 5.0, 4.0], [2.0, 5.0, 0.0]];
        let normalizer = normalize(&mut features).unwrap();
        assert_eq!(array![1.0, 5.0, 0.0], normalizer.min());
        assert_eq!(array![2.0, 0.0, 4.0], normalizer.range());

        let expected = array![[0.0, 0.0, 0.5], [1.0, 0.0, 1.0], [0.5, 0.0, 0.0]];
        for (e, x) in expected.iter().zip(features.iter()) {
            assert_abs_diff_eq!(*e, *x, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_load() {
        let (samples, normalizer) = load(CSV.as_bytes(), &iris::factory()).unwrap();
        assert_eq!(4, samples.len());
        assert_eq!(iris::FEATURES, normalizer.dim());

        let labels: Vec<_> = samples.iter().map(|s| s.label()).collect();
        assert_eq!(
            vec![
                IrisClass::Setosa,
                IrisClass::Setosa,
                IrisClass::Versicolor,
                IrisClass::Virginica
            ],
            labels
        );

        for sample in &samples {
            assert_eq!(iris::FEATURES, sample.dim());
            assert!(sample.features().iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn test_factory_errors() {
        let factory = iris::factory();
        assert!(matches!(
            factory.create(array![0.1, 0.2], "Iris-setosa"),
            Err(Error::FieldCount {
                expected: 4,
                found: 2
            })
        ));
        assert!(matches!(
            factory.create(array![0.1, 0.2, 0.3, 0.4], "Iris-unknown"),
            Err(Error::UnknownLabel(_))
        ));

        let any_dim = LabeledFactory::<IrisClass>::new();
        let sample = any_dim.create(array![0.5], "virginica").unwrap();
        assert_eq!(IrisClass::Virginica, sample.label());
    }

    #[test]
    fn test_normalizer_apply() {
        let mut features = array![[1.0, 5.0, 2.0], [3.0, 5.0, 4.0], [2.0, 5.0, 0.0]];
        let normalizer = normalize(&mut features).unwrap();

        let mut row = array![2.0, 5.0, 4.0];
        normalizer.apply(&mut row).unwrap();
        assert_eq!(array![0.5, 0.0, 1.0], row);

        let mut outside = array![5.0, 7.0, -2.0];
        normalizer.apply(&mut outside).unwrap();
        assert_eq!(array![2.0, 0.0, -0.5], outside);

        assert!(matches!(
            normalizer.apply(&mut array![1.0, 2.0]),
            Err(Error::DimensionMismatch { left: 3, right: 2 })
        ));
        assert!(matches!(
            Normalizer::fit(Array2::<Scalar>::zeros((0, 3)).view()),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn test_raw_rows_classify_as_own_label() {
        let (samples, normalizer) = load(CSV.as_bytes(), &iris::factory()).unwrap();
        let raw = read_records(CSV.as_bytes()).unwrap();
        let classifier = ClassifierBuilder::new().k(1).build(samples).unwrap();

        for (row, label) in raw.features().outer_iter().zip(raw.labels()) {
            let mut query = row.to_owned();
            normalizer.apply(&mut query).unwrap();
            assert_eq!(
                IrisClass::parse(label),
                classifier.classify_features(query.view()).unwrap()
            );
        }

        let mut query = array![5.0, 3.4, 1.5, 0.25];
        normalizer.apply(&mut query).unwrap();
        for metric in &Metric::ALL {
            let classifier = ClassifierBuilder::new()
                .k(1)
                .metric(*metric)
                .build(classifier.dataset().to_vec())
                .unwrap();
            assert_eq!(
                Some(IrisClass::Setosa),
                classifier.classify_features(query.view()).unwrap()
            );
        }

        let records = {
            let mut records = read_records(CSV.as_bytes()).unwrap();
            assert!(records.normalizer().is_none());
            records.normalize().unwrap();
            records
        };
        assert_eq!(Some(&normalizer), records.normalizer());
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = load_csv("/nonexistent/iris.csv", &iris::factory());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
