use itertools::Itertools;
use ndarray::{Array2, ArrayView1};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::numeric::Numeric;

/// Samples `samples` points uniformly from the unit square, labeled by
/// whether they fall inside the disk of area ½ centered at (0.5, 0.5),
/// i.e. radius² < 1/(2π). Returns `(inputs, targets)` with inputs of shape
/// `(samples, 2)` and one-hot targets of shape `(samples, 2)`: column 1 is
/// "inside", column 0 is "outside".
pub fn generate_disc_set<T, R>(samples: usize, rng: &mut R) -> (Array2<T>, Array2<T>)
where
    T: Numeric,
    R: Rng,
{
    let dist = Uniform::new(T::zero(), T::one());
    let inputs = Array2::from_shape_fn((samples, 2), |_| dist.sample(rng));

    let center = T::from_f64(0.5).unwrap();
    let radius_sq = T::from_f64(0.5 / std::f64::consts::PI).unwrap();
    let mut targets = Array2::zeros((samples, 2));
    for (point, mut target) in inputs.rows().into_iter().zip(targets.rows_mut()) {
        let dx = point[0] - center;
        let dy = point[1] - center;
        let inside = dx * dx + dy * dy < radius_sq;
        target[if inside { 1 } else { 0 }] = T::one();
    }
    (inputs, targets)
}

/// Fraction of rows whose argmax matches the target's argmax.
pub fn accuracy<T: Numeric>(predictions: &Array2<T>, targets: &Array2<T>) -> f64 {
    assert_eq!(predictions.dim(), targets.dim());
    let hits = predictions
        .rows()
        .into_iter()
        .zip(targets.rows())
        .filter(|(prediction, target)| argmax(prediction) == argmax(target))
        .count();
    hits as f64 / predictions.nrows() as f64
}

fn argmax<T: Numeric>(row: &ArrayView1<T>) -> usize {
    row.iter()
        .position_max_by(|a, b| a.partial_cmp(b).expect("comparable values"))
        .expect("non-empty row")
}
