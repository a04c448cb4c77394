use ndarray::{Array1, ArrayView1};

/// Evaluate the cosine cutoff function at the distance `r` for the given
/// `cutoff` radius.
///
/// `f(r) = 1/2 * (cos(π r / cutoff) + 1)` for `r <= cutoff` and `0` above. The
/// function is exactly 0 at `r = cutoff`, and exactly 1 at `r = 0`.
#[inline]
#[allow(clippy::float_cmp)]
pub fn cutoff(r: f64, cutoff: f64) -> f64 {
    if r > cutoff {
        return 0.0;
    }

    // cos(π) is not exactly -1 in floating point
    if r == cutoff {
        return 0.0;
    }

    let s = std::f64::consts::PI * r / cutoff;
    0.5 * (f64::cos(s) + 1.0)
}

/// Evaluate the cosine cutoff function for all distances in `r`
pub fn cutoff_array(r: ArrayView1<'_, f64>, rc: f64) -> Array1<f64> {
    r.mapv(|r| cutoff(r, rc))
}
