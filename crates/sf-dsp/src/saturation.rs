//! Saturation nonlinearities

use sf_core::Sample;

/// Symmetric tanh soft clip, bounded to (-1, 1)
#[inline(always)]
pub fn soft_clip(x: Sample) -> Sample {
    x.tanh()
}
