//! Integer arithmetic shared by every error-diffusion path.

/// Division rounding toward negative infinity.
///
/// Error terms are negative whenever a cell is quantized upward, and `/`
/// truncates toward zero, which would bias those fragments upward. Every
/// fragment in the workspace is scaled through this function so that the
/// sequential and wavefront paths agree bit for bit.
///
/// The truncated quotient is decremented when the remainder is nonzero and
/// the operands have opposite signs.
///
/// # Panics
///
/// Panics if `b == 0`, like `/`.
///
/// # Examples
///
/// ```
/// use wavedither_core::floor_div;
///
/// assert_eq!(floor_div(7, 2), 3);
/// assert_eq!(floor_div(-7, 2), -4);
/// assert_eq!(floor_div(-16, 16), -1);
/// ```
#[inline]
pub fn floor_div(a: i32, b: i32) -> i32 {
    let quotient = a / b;
    let remainder = a % b;
    if remainder != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}
