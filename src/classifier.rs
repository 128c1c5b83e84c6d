use std::{collections::HashMap, hash::Hash};

use ndarray::ArrayView1;

use crate::{
    eval::{self, Evaluation},
    Distance, Error, Metric, Neighbour, Result, Sample, Scalar,
};

/// Returns the ```k``` candidates closest to ```query```, ordered by ascending distance.
///
/// Every candidate is measured once. Candidates at equal distance keep their original order, and
/// ```k``` larger than the number of candidates returns all of them.
pub fn nearest<'a, S, D, I>(
    k: usize,
    query: ArrayView1<'_, Scalar>,
    candidates: I,
    metric: &D,
) -> Result<Vec<Neighbour<'a, S>>>
where
    S: Sample + 'a,
    D: Distance + ?Sized,
    I: IntoIterator<Item = &'a S>,
{
    let mut nn = candidates
        .into_iter()
        .enumerate()
        .map(|(idx, sample)| -> Result<Neighbour<'a, S>> {
            let dist = metric.distance(query, sample.features())?;
            Ok(Neighbour::new(idx, dist, sample))
        })
        .collect::<Result<Vec<_>>>()?;

    // Vec::sort_by is stable.
    nn.sort_by(|a, b| a.dist().total_cmp(&b.dist()));
    nn.truncate(k);

    Ok(nn)
}

/// Majority vote over a sequence of labels.
///
/// Returns ```None``` when the sequence is empty or when more than one label shares the highest
/// count.
pub fn vote<L, I>(labels: I) -> Option<L>
where
    L: Eq + Hash,
    I: IntoIterator<Item = L>,
{
    let mut counts: HashMap<L, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let max = counts.values().copied().max()?;
    let mut winners = counts.into_iter().filter(|&(_, count)| count == max);

    match (winners.next(), winners.next()) {
        (Some((label, _)), None) => Some(label),
        _ => None,
    }
}

/// Predicts the label of ```query``` by majority vote among its ```k``` nearest candidates.
///
/// ```Ok(None)``` means no decision: ```k``` is zero, there are no candidates, or the vote is
/// tied. Metric errors, such as a dimension mismatch, abort the call.
pub fn classify<'a, S, D, I>(
    k: usize,
    query: &S,
    candidates: I,
    metric: &D,
) -> Result<Option<S::Label>>
where
    S: Sample + 'a,
    D: Distance + ?Sized,
    I: IntoIterator<Item = &'a S>,
{
    let nn = nearest(k, query.features(), candidates, metric)?;
    Ok(vote(nn.iter().map(|n| n.sample().label())))
}

/// A k-nearest neighbour classifier holding its reference dataset.
#[derive(Clone, Debug)]
pub struct Classifier<S, D = Metric> {
    k: usize,
    metric: D,
    dataset: Vec<S>,
}

impl<S: Sample, D: Distance> Classifier<S, D> {
    /// Classifies a sample against the whole dataset.
    pub fn classify(&self, query: &S) -> Result<Option<S::Label>> {
        classify(self.k, query, &self.dataset, &self.metric)
    }

    /// Classifies a bare feature vector against the whole dataset.
    pub fn classify_features(&self, features: ArrayView1<'_, Scalar>) -> Result<Option<S::Label>> {
        let nn = self.nearest(features)?;
        Ok(vote(nn.iter().map(|n| n.sample().label())))
    }

    /// Classifies a sample against an explicit candidate set with the given ```k```.
    pub fn classify_with<'a, I>(&self, k: usize, query: &S, candidates: I) -> Result<Option<S::Label>>
    where
        S: 'a,
        I: IntoIterator<Item = &'a S>,
    {
        classify(k, query, candidates, &self.metric)
    }

    /// Returns the ```k``` nearest samples of the dataset to a feature vector.
    pub fn nearest(&self, features: ArrayView1<'_, Scalar>) -> Result<Vec<Neighbour<'_, S>>> {
        nearest(self.k, features, &self.dataset, &self.metric)
    }

    /// Leave-one-out evaluation of the dataset with this classifier's ```k``` and metric.
    pub fn evaluate(&self) -> Result<Evaluation> {
        eval::evaluate(self.k, &self.metric, &self.dataset)
    }

    /// Returns the number of neighbours taking part in a vote.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the distance function.
    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// Returns the reference dataset.
    pub fn dataset(&self) -> &[S] {
        &self.dataset
    }
}

/// A build struct for initialising a new classifier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierBuilder<D = Metric> {
    k: Option<usize>,
    metric: D,
}

impl Default for ClassifierBuilder {
    /// Creates a builder with ```k = 1``` and Euclidean metric.
    fn default() -> Self {
        Self {
            k: None,
            metric: Metric::Euclidean,
        }
    }
}

impl ClassifierBuilder {
    /// Creates a builder with default parameters.
    pub fn new() -> Self {
        Self {
            ..Default::default()
        }
    }
}

impl<D: Distance> ClassifierBuilder<D> {
    /// Sets the number of neighbours taking part in a vote.
    pub fn k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Sets the distance function.
    pub fn metric<E: Distance>(self, metric: E) -> ClassifierBuilder<E> {
        ClassifierBuilder { k: self.k, metric }
    }

    /// Constructs a classifier over the given dataset.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the samples do not share one dimension.
    pub fn build<S: Sample>(self, dataset: Vec<S>) -> Result<Classifier<S, D>> {
        if let Some(first) = dataset.first() {
            let dim = first.dim();
            if let Some(other) = dataset.iter().find(|s| s.dim() != dim) {
                return Err(Error::DimensionMismatch {
                    left: dim,
                    right: other.dim(),
                });
            }
        }

        Ok(Classifier {
            k: self.k.unwrap_or(1),
            metric: self.metric,
            dataset,
        })
    }
}
