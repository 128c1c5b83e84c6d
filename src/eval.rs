use std::fmt;

use crate::{classify, Distance, Error, Result, Sample, Scalar};

/// Summary of a leave-one-out evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    errors: usize,
    misses: usize,
    total: usize,
}

impl Evaluation {
    /// Number of samples classified with a wrong label.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Number of samples for which no decision was made.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of samples classified with their own label.
    pub fn correct(&self) -> usize {
        self.total - self.errors - self.misses
    }

    /// Number of evaluated samples.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Fraction of all samples that were classified wrongly.
    pub fn error_rate(&self) -> Scalar {
        self.errors as Scalar / self.total as Scalar
    }

    /// Fraction of all samples that received a decision.
    pub fn coverage(&self) -> Scalar {
        (self.total - self.misses) as Scalar / self.total as Scalar
    }

    /// Fraction of all samples that were classified correctly.
    pub fn accuracy(&self) -> Scalar {
        self.correct() as Scalar / self.total as Scalar
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error rate: {}", self.error_rate())?;
        write!(f, "Coverage: {}", self.coverage())
    }
}

/// Leave-one-out evaluation: every sample is classified against all other samples.
///
/// A tie or an empty vote counts as a miss and lowers the coverage, a wrong label counts as an
/// error. Fails with [`Error::EmptyDataset`] if ```dataset``` is empty.
pub fn evaluate<S, D>(k: usize, metric: &D, dataset: &[S]) -> Result<Evaluation>
where
    S: Sample,
    D: Distance + ?Sized,
{
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut errors = 0;
    let mut misses = 0;

    for (held_out, sample) in dataset.iter().enumerate() {
        let rest = dataset
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != held_out)
            .map(|(_, s)| s);

        match classify(k, sample, rest, metric)? {
            None => misses += 1,
            Some(label) if label != sample.label() => errors += 1,
            Some(_) => {}
        }
    }

    Ok(Evaluation {
        errors,
        misses,
        total: dataset.len(),
    })
}
