//! Tiny, fast LCG.
//! Avoids rand dependency

#[derive(Clone)]
pub struct Lcg(u64);

impl Lcg {
    #[must_use]
    pub fn seed(seed: u64) -> Self {
        Self(seed)
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Uniform sample in `[0, 1]`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX))
    }
}
