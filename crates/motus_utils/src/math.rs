//! Small numeric helpers

use std::collections::TryReserveError;

/// Euclidean distance between (`x1`, `y1`) and (`x2`, `y2`)
pub fn distance<T: Into<f64>>(x1: T, y1: T, x2: T, y2: T) -> f64 {
    let dx = x2.into() - x1.into();
    let dy = y2.into() - y1.into();
    (dx * dx + dy * dy).sqrt()
}

/// `min` if `value < min`, `max` if `value > max`, otherwise `value`
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// The Fibonacci sequence starting `0, 1`, extended `upper_bound` times.
///
/// Values saturate at `u64::MAX` instead of overflowing. Fails when the
/// sequence cannot be allocated.
pub fn fibonacci(upper_bound: usize) -> Result<Vec<u64>, TryReserveError> {
    let len = upper_bound.saturating_add(2);
    let mut sequence: Vec<u64> = Vec::new();
    sequence.try_reserve_exact(len)?;
    sequence.extend([0, 1]);
    for i in 2..len {
        sequence.push(sequence[i - 2].saturating_add(sequence[i - 1]));
    }
    Ok(sequence)
}
