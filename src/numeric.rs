use ndarray::NdFloat;
use num::FromPrimitive;
use rand::distributions::uniform::SampleUniform;

/// Element types the engine works with.
///
/// `NdFloat` covers the array arithmetic, `FromPrimitive` the mean/scale
/// conversions, `SampleUniform` the fan-in initialization draws.
pub trait Numeric: NdFloat + FromPrimitive + SampleUniform {}

macro_rules! numeric_impl {
    ($($t: ty),+) => {
        $(
            impl Numeric for $t {}
        )+
    }
}

numeric_impl!(f32, f64);

/// Converts a dimension or batch count to the element type.
pub(crate) fn cast<T: Numeric>(value: usize) -> T {
    T::from_usize(value).expect("count representable as a float")
}
