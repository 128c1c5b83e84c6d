//! A library for k-nearest neighbour classification by majority vote, with leave-one-out
//! evaluation.
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    rustdoc::broken_intra_doc_links
)]

/// Floating point type of feature vectors and distances.
pub type Scalar = f64;

mod error;
pub use error::{Error, Result};

mod metric;
pub use metric::{Distance, Metric};

mod sample;
pub use sample::{Category, LabeledSample, Neighbour, Sample};

mod classifier;
pub use classifier::{classify, nearest, vote, Classifier, ClassifierBuilder};

mod eval;
pub use eval::{evaluate, Evaluation};

pub mod dataset;
pub mod iris;

#[cfg(test)]
mod tests;
