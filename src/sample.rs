//! Working and output sample representations.
//!
//! Every accepted element type is promoted losslessly to `f64` for
//! computation, which leaves room for NaN as the missing marker. On the way
//! out, values are demoted with the rules below:
//!
//! | type | rule                                                       |
//! |------|------------------------------------------------------------|
//! | u8   | round half away from zero, saturate to 0..=255, NaN → 0     |
//! | f32  | nearest representable f32, NaN stays NaN                    |
//! | f64  | unchanged                                                   |

/// Element types the filler accepts
pub trait Sample: Copy + Send + Sync + 'static {
    /// Promote to the working representation (exact for all implementors)
    fn to_working(self) -> f64;

    /// Demote a working value back to this type
    fn from_working(value: f64) -> Self;

    /// The sentinel as this type would hold it, promoted again
    ///
    /// An f32 image cannot contain `0.1_f64`, so it is compared against the
    /// f32 nearest to it.
    fn sentinel(value: f64) -> f64;
}

impl Sample for u8 {
    fn to_working(self) -> f64 {
        self as f64
    }

    fn from_working(value: f64) -> Self {
        // `as` saturates and maps NaN to 0
        value.round() as u8
    }

    fn sentinel(value: f64) -> f64 {
        value
    }
}

impl Sample for f32 {
    fn to_working(self) -> f64 {
        self as f64
    }

    fn from_working(value: f64) -> Self {
        value as f32
    }

    fn sentinel(value: f64) -> f64 {
        value as f32 as f64
    }
}

impl Sample for f64 {
    fn to_working(self) -> f64 {
        self
    }

    fn from_working(value: f64) -> Self {
        value
    }

    fn sentinel(value: f64) -> f64 {
        value
    }
}
