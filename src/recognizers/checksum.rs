//! Eleven-residue checksum ("elfproef") for Dutch citizen service numbers
//!
//! Digits `d0..d8` are weighted `9, 8, 7, 6, 5, 4, 3, 2, -1` from left to right.
//! A number is valid when the signed sum is a nonzero multiple of 11.

const WEIGHTS: [i32; 9] = [9, 8, 7, 6, 5, 4, 3, 2, -1];

/// Signed weighted digit sum, `None` unless the input is exactly nine ASCII digits
pub fn weighted_sum(candidate: &str) -> Option<i32> {
    let bytes = candidate.as_bytes();
    if bytes.len() != WEIGHTS.len() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    Some(
        bytes
            .iter()
            .zip(WEIGHTS)
            .map(|(digit, weight)| i32::from(digit - b'0') * weight)
            .sum(),
    )
}

/// Validate a nine-digit candidate against the eleven-residue rule
///
/// # Examples
///
/// ```
/// use pii_xref::recognizers::checksum::eleven_check;
///
/// assert!(eleven_check("123456782"));
/// assert!(!eleven_check("111111111"));
/// assert!(!eleven_check("000000000"));
/// ```
pub fn eleven_check(candidate: &str) -> bool {
    match weighted_sum(candidate) {
        Some(sum) => sum != 0 && sum.rem_euclid(11) == 0,
        None => false,
    }
}
