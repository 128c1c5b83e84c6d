use std::{fmt::Debug, hash::Hash};

use ndarray::{Array1, ArrayView1};

use crate::Scalar;

/// A closed, finite set of class labels.
pub trait Category: Copy + Eq + Hash + Debug + 'static {
    /// Every member of the set.
    const ALL: &'static [Self];

    /// Canonical name of a label.
    fn name(&self) -> &'static str;

    /// Looks up a label by its canonical name.
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

/// A feature vector paired with its class label.
pub trait Sample {
    /// Label type of the dataset this sample belongs to.
    type Label: Category;

    /// Returns the feature vector.
    fn features(&self) -> ArrayView1<'_, Scalar>;

    /// Returns the class label.
    fn label(&self) -> Self::Label;

    /// Returns the dimension of the feature vector.
    fn dim(&self) -> usize {
        self.features().len()
    }
}

/// Immutable labeled sample.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledSample<C> {
    features: Array1<Scalar>,
    label: C,
}

impl<C: Category> LabeledSample<C> {
    /// Creates a new sample.
    pub fn new(features: Array1<Scalar>, label: C) -> Self {
        Self { features, label }
    }
}

impl<C: Category> Sample for LabeledSample<C> {
    type Label = C;

    fn features(&self) -> ArrayView1<'_, Scalar> {
        self.features.view()
    }

    fn label(&self) -> C {
        self.label
    }
}

/// A candidate sample together with its distance to a query point.
#[derive(Debug)]
pub struct Neighbour<'a, S> {
    idx: usize,
    dist: Scalar,
    sample: &'a S,
}

impl<'a, S> Neighbour<'a, S> {
    pub(crate) fn new(idx: usize, dist: Scalar, sample: &'a S) -> Self {
        Self { idx, dist, sample }
    }

    /// Returns the position of the neighbour in the candidate sequence.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Returns the distance for a neighbour to a query point.
    pub fn dist(&self) -> Scalar {
        self.dist
    }

    /// Returns the neighbouring sample.
    pub fn sample(&self) -> &'a S {
        self.sample
    }
}

impl<S> Clone for Neighbour<'_, S> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            dist: self.dist,
            sample: self.sample,
        }
    }
}
