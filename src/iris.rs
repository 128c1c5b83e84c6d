//! The Iris flower dataset: four measurements per flower, three species.
use std::fmt;

use crate::{dataset::LabeledFactory, Category, LabeledSample};

/// Number of measurements per flower.
pub const FEATURES: usize = 4;

/// Iris species.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IrisClass {
    /// Iris setosa.
    Setosa,
    /// Iris versicolor.
    Versicolor,
    /// Iris virginica.
    Virginica,
}

/// A normalized Iris measurement with its species.
pub type IrisSample = LabeledSample<IrisClass>;

impl Category for IrisClass {
    const ALL: &'static [Self] = &[IrisClass::Setosa, IrisClass::Versicolor, IrisClass::Virginica];

    fn name(&self) -> &'static str {
        match self {
            IrisClass::Setosa => "Iris-setosa",
            IrisClass::Versicolor => "Iris-versicolor",
            IrisClass::Virginica => "Iris-virginica",
        }
    }

    /// Accepts ```Iris-setosa``` as well as ```setosa```, ignoring case.
    fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|c| {
            let full = c.name();
            full.eq_ignore_ascii_case(name) || full["Iris-".len()..].eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for IrisClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Factory for Iris rows with exactly [`FEATURES`] measurements.
pub fn factory() -> LabeledFactory<IrisClass> {
    LabeledFactory::with_dim(FEATURES)
}
