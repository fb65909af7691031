use ndarray::{Array1, ArrayViewMut1};

use crate::Error;

/// Fixed-width histogram over a half-open range `[min, max)`.
///
/// Each bin `i` covers `[edges[i], edges[i + 1])`, including the last one:
/// values equal to `max` fall outside of the histogram. Values outside of the
/// range (and NaN) are dropped, never clipped into the first or last bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Array1<f64>,
    centers: Array1<f64>,
    width: f64,
}

impl Histogram {
    /// Create a new histogram with `bins` bins of equal width over
    /// `[range[0], range[1])`.
    pub fn new(bins: usize, range: [f64; 2]) -> Result<Histogram, Error> {
        let [min, max] = range;
        if bins == 0 {
            return Err(Error::InvalidHistogramRange(
                "the number of bins must be at least 1".into()
            ));
        }

        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidHistogramRange(format!(
                "the range must be finite, got [{}, {}]", min, max
            )));
        }

        if min >= max {
            return Err(Error::InvalidHistogramRange(format!(
                "the range minimum must be smaller than the maximum, got [{}, {}]", min, max
            )));
        }

        let mut edges = Array1::from_shape_fn(bins + 1, |i| {
            min + (max - min) * (i as f64) / (bins as f64)
        });
        edges[bins] = max;

        let centers = Array1::from_shape_fn(bins, |i| 0.5 * (edges[i] + edges[i + 1]));

        return Ok(Histogram {
            edges: edges,
            centers: centers,
            width: (max - min) / (bins as f64),
        });
    }

    /// Get the number of bins in this histogram
    pub fn bins(&self) -> usize {
        self.centers.len()
    }

    /// Get the range covered by this histogram
    pub fn range(&self) -> [f64; 2] {
        [self.edges[0], self.edges[self.bins()]]
    }

    /// Get the `bins + 1` edges of the bins
    pub fn edges(&self) -> &Array1<f64> {
        &self.edges
    }

    /// Get the center of each bin
    pub fn centers(&self) -> &Array1<f64> {
        &self.centers
    }

    /// Get the index of the bin containing `value`, or `None` if the value is
    /// outside of the histogram range.
    #[inline]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let [min, max] = self.range();
        if value.is_nan() || value < min || value >= max {
            return None;
        }

        let mut bin = usize::min(((value - min) / self.width) as usize, self.bins() - 1);
        // rounding in the division can be off by one compared to the edges
        while value < self.edges[bin] {
            bin -= 1;
        }
        while value >= self.edges[bin + 1] {
            bin += 1;
        }

        return Some(bin);
    }

    /// Add all `values` inside the histogram range to the corresponding bin in
    /// `counts`.
    ///
    /// # Panics
    ///
    /// If `counts` does not contain exactly one entry per bin
    pub fn accumulate<'a>(&self, values: impl IntoIterator<Item = &'a f64>, mut counts: ArrayViewMut1<'_, f64>) {
        assert_eq!(counts.len(), self.bins(), "counts must contain one entry per bin");
        for &value in values {
            if let Some(bin) = self.bin_index(value) {
                counts[bin] += 1.0;
            }
        }
    }

    /// Create a new array containing the counts in each bin for `values`
    pub fn count<'a>(&self, values: impl IntoIterator<Item = &'a f64>) -> Array1<f64> {
        let mut counts = Array1::zeros(self.bins());
        self.accumulate(values, counts.view_mut());
        return counts;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    use super::*;

    #[test]
    fn edges_and_centers() {
        let histogram = Histogram::new(4, [0.0, 2.0]).unwrap();
        assert_eq!(histogram.bins(), 4);
        assert_eq!(histogram.range(), [0.0, 2.0]);
        assert_eq!(*histogram.edges(), array![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(*histogram.centers(), array![0.25, 0.75, 1.25, 1.75]);

        let histogram = Histogram::new(75, [0.0, 15.0]).unwrap();
        assert_eq!(histogram.edges().len(), 76);
        assert_eq!(histogram.edges()[75], 15.0);
        assert_relative_eq!(histogram.centers()[0], 0.1);
    }

    #[test]
    fn mass_conservation() {
        let histogram = Histogram::new(7, [0.0, 10.0]).unwrap();
        let values = Array1::from_shape_fn(100, |i| i as f64 * 0.099);

        let counts = histogram.count(&values);
        assert_eq!(counts.sum(), 100.0);
    }

    #[test]
    fn out_of_range() {
        let histogram = Histogram::new(2, [1.0, 3.0]).unwrap();
        let values = [-1.0, 0.5, 0.999, 1.0, 2.5, 3.0, 3.5, f64::NAN, f64::INFINITY];

        let counts = histogram.count(&values);
        assert_eq!(counts, array![1.0, 1.0]);
    }

    #[test]
    fn bin_edges() {
        let histogram = Histogram::new(10, [0.0, 1.0]).unwrap();

        // internal edges belong to the bin starting at this edge
        for i in 0..10 {
            let edge = histogram.edges()[i];
            assert_eq!(histogram.bin_index(edge), Some(i));
        }

        // values just below an edge belong to the previous bin
        for i in 1..10 {
            let below = histogram.edges()[i] - 1e-12;
            assert_eq!(histogram.bin_index(below), Some(i - 1));
        }

        // the maximum is excluded
        assert_eq!(histogram.bin_index(1.0), None);
        assert_eq!(histogram.bin_index(1.0 - 1e-12), Some(9));
    }

    #[test]
    fn accumulate() {
        let histogram = Histogram::new(3, [0.0, 3.0]).unwrap();
        let mut counts = array![1.0, 2.0, 3.0];
        histogram.accumulate(&[0.5, 0.7, 2.2], counts.view_mut());
        assert_eq!(counts, array![3.0, 2.0, 4.0]);
    }

    #[test]
    fn invalid() {
        let error = Histogram::new(0, [0.0, 1.0]).unwrap_err();
        assert_eq!(error.to_string(), "invalid histogram range: the number of bins must be at least 1");

        let error = Histogram::new(10, [2.0, 1.0]).unwrap_err();
        assert_eq!(error.to_string(), "invalid histogram range: the range minimum must be smaller than the maximum, got [2, 1]");

        assert!(Histogram::new(10, [1.0, 1.0]).is_err());
        assert!(Histogram::new(10, [0.0, f64::INFINITY]).is_err());
        assert!(Histogram::new(10, [f64::NAN, 1.0]).is_err());
    }
}
