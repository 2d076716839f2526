//! Deterministic per-particle random streams
//!
//! Each (seed, frame, particle) triple gets its own value, so the steering pass
//! gives identical results sequentially or split across threads.

/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Uniform value in [-1, 1) for one particle on one frame
#[inline]
pub fn particle_signed_unit(seed: u32, frame: u64, index: usize) -> f32 {
    let mut state = seed
        ^ (frame as u32).wrapping_mul(0x9E37_79B9)
        ^ ((frame >> 32) as u32).wrapping_mul(0xC2B2_AE35)
        ^ (index as u32).wrapping_mul(0x85EB_CA6B);
    if state == 0 {
        state = 0x6D2B_79F5;
    }
    xorshift32(&mut state);
    let bits = xorshift32(&mut state) >> 8;
    (bits as f32 / (1u32 << 24) as f32) * 2.0 - 1.0
}
