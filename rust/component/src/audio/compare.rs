//! Tolerant comparisons of samples and buffers.

use super::{Buffer, channels};
use itertools::{EitherOrBoth, Itertools};

/// Whether `a` and `b` are within `e` of each other.
///
/// # Examples
///
/// ```
/// # use gainstage_component::audio::approx_eq;
/// assert!(approx_eq(1.0, 1.01, 0.1));
/// assert!(!approx_eq(1.0, 1.3, 0.1));
/// ```
#[must_use]
pub fn approx_eq(a: f32, b: f32, e: f32) -> bool {
    (a - b).abs() < e
}

/// Whether two sequences have the same length and are pairwise within `e`.
///
/// # Examples
///
/// ```
/// # use gainstage_component::audio::all_approx_eq;
/// assert!(all_approx_eq([1.0, 2.0], [1.01, 2.01], 0.1));
/// assert!(!all_approx_eq([1.0, 2.0], [1.0], 0.1));
/// ```
#[must_use]
pub fn all_approx_eq<L: IntoIterator<Item = f32>, R: IntoIterator<Item = f32>>(
    lhs: L,
    rhs: R,
    e: f32,
) -> bool {
    lhs.into_iter().zip_longest(rhs).all(|x| match x {
        EitherOrBoth::Both(l, r) => approx_eq(l, r, e),
        _ => false,
    })
}

/// Whether two buffers share a channel layout and length, and all their
/// samples are within `e`.
///
/// # Examples
///
/// ```
/// # use gainstage_component::audio::{BufferData, buffer_approx_eq};
/// assert!(buffer_approx_eq(
///   &BufferData::new_mono(vec![1.0, 2.0]),
///   &BufferData::new_mono(vec![1.01, 2.01]),
///   0.1));
/// assert!(!buffer_approx_eq(
///   &BufferData::new_stereo([1.0], [2.0]),
///   &BufferData::new_mono(vec![1.0, 2.0]),
///   0.1));
/// ```
#[must_use]
pub fn buffer_approx_eq<A: Buffer, B: Buffer>(a: &A, b: &B, e: f32) -> bool {
    a.channel_layout() == b.channel_layout()
        && all_approx_eq(
            channels(a).flatten().copied(),
            channels(b).flatten().copied(),
            e,
        )
}
