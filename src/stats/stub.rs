#[inline(always)]
pub fn record(_steps: u64) {}

#[inline(always)]
pub fn read() -> u64 {
    0
}

#[inline(always)]
pub fn reset() {}
