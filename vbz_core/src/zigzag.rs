//! Delta coding and the zigzag mapping.
//!
//! Samples are widened to `i32` before differencing and every step wraps in
//! 32-bit signed arithmetic, so the inverse is exact for any input.

#[inline]
pub fn zigzag_encode(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

#[inline]
pub fn zigzag_decode(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// First differences (the first sample is taken against zero) mapped through
/// zigzag.
pub fn delta_zigzag_encode<I>(samples: I) -> Vec<u32>
where
    I: IntoIterator<Item = i32>,
{
    let samples = samples.into_iter();
    let mut out = Vec::with_capacity(samples.size_hint().0);
    let mut prev = 0i32;
    for sample in samples {
        out.push(zigzag_encode(sample.wrapping_sub(prev)));
        prev = sample;
    }
    out
}

/// Inverse of [`delta_zigzag_encode`]: unzigzag, then prefix-sum.
pub fn delta_zigzag_decode(codes: &[u32]) -> Vec<i32> {
    let mut prev = 0i32;
    codes
        .iter()
        .map(|&code| {
            prev = prev.wrapping_add(zigzag_decode(code));
            prev
        })
        .collect()
}
