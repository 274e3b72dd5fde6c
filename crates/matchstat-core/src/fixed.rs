use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Opaque duration unit for matching jobs. [`JobTimer`](crate::timer::JobTimer)
/// reports microseconds; hosts may feed any consistent unit.
pub type Ticks = u64;

/// Convert an f64 to Fixed64. Use only for initialization and tests.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Mean of `total` over `count` samples, or zero when there are none.
///
/// Saturates instead of overflowing when `total` exceeds the Q32.32 range.
pub fn mean_ticks(total: Ticks, count: u64) -> Fixed64 {
    if count == 0 {
        return Fixed64::ZERO;
    }
    let whole = total / count;
    let rem = total % count;
    let whole = Fixed64::saturating_from_num(whole);
    let frac = Fixed64::from_num(rem as f64 / count as f64);
    whole.saturating_add(frac)
}
