use std::{fmt, str::FromStr};

use ndarray::ArrayView1;
use ndarray_stats::DeviationExt;

use crate::{Error, Result, Scalar};

/// A distance function over feature vectors.
///
/// Implementations must be pure: the same pair of vectors always yields the same distance.
pub trait Distance {
    /// Calculate the distance between two points of equal dimension.
    fn distance(&self, a: ArrayView1<'_, Scalar>, b: ArrayView1<'_, Scalar>) -> Result<Scalar>;
}

/// Enum for distance functions in a metric space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// L-1 or Manhattan distance. See [\[Wikipedia\]](https://en.wikipedia.org/wiki/Taxicab_geometry).
    Manhattan,
    /// L-2 or Euclidean distance. See [\[Wikipedia\]](https://en.wikipedia.org/wiki/Euclidean_distance)
    Euclidean,
    /// L-inf or Chebyshev distance, the largest absolute componentwise difference.
    /// See [\[Wikipedia\]](https://en.wikipedia.org/wiki/Chebyshev_distance)
    Chebyshev,
}

impl Metric {
    /// All supported metrics.
    pub const ALL: [Metric; 3] = [Metric::Manhattan, Metric::Euclidean, Metric::Chebyshev];

    /// Lowercase name of the metric.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Euclidean => "euclidean",
            Metric::Chebyshev => "chebyshev",
        }
    }
}

impl Distance for Metric {
    fn distance(&self, a: ArrayView1<'_, Scalar>, b: ArrayView1<'_, Scalar>) -> Result<Scalar> {
        if a.len() != b.len() {
            return Err(Error::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }

        // The deviation routines reject empty input.
        if a.is_empty() {
            return Ok(0.);
        }

        let dist = match self {
            Metric::Manhattan => a.l1_dist(&b)?,
            Metric::Euclidean => a.l2_dist(&b)?,
            Metric::Chebyshev => a.linf_dist(&b)?,
        };

        Ok(dist)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownMetric(name.to_string()))
    }
}
