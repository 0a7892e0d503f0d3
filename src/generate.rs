// src/generate.rs
// Receipt numbers are sequential per service center, so neighbours of a known
// case make a comparison cohort.

use crate::config::consts::{LOCATION_PREFIX_LEN, RECEIPT_LEN};
use crate::error::{Error, Result};

/// Split `IOE0900000001` into (`IOE0`, `900000001`).
fn split_seed(seed: &str) -> Result<(&str, &str)> {
    let invalid = || Error::InvalidSeed(s!(seed));
    let prefix = seed.get(..LOCATION_PREFIX_LEN).ok_or_else(invalid)?;
    let suffix = &seed[LOCATION_PREFIX_LEN..];
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    Ok((prefix, suffix))
}

/// Up to `count` consecutive receipt numbers around `seed`, starting
/// `ceil(count / 2)` below it. Numbers keep the seed's suffix width and the
/// run stops at the first one longer than a receipt number can be.
pub fn generate_receipt_numbers(seed: &str, count: usize) -> Result<Vec<String>> {
    let (prefix, suffix) = split_seed(seed)?;
    let base: u64 = suffix.parse().map_err(|_| Error::InvalidSeed(s!(seed)))?;
    let width = suffix.len();
    let start = base.saturating_sub(count.div_ceil(2) as u64);

    let mut out = Vec::with_capacity(count);
    for n in (start..).take(count) {
        let num = format!("{prefix}{n:0width$}");
        if num.len() > RECEIPT_LEN {
            break;
        }
        out.push(num);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_on_seed() {
        let v = generate_receipt_numbers("IOE0900000001", 4).unwrap();
        assert_eq!(v, vec!["IOE0899999999", "IOE0900000000", "IOE0900000001", "IOE0900000002"]);
        assert!(v.iter().all(|n| n.starts_with("IOE0") && n.len() <= 13));
    }

    #[test]
    fn odd_count_leans_low() {
        let v = generate_receipt_numbers("IOE0900000010", 3).unwrap();
        assert_eq!(v, vec!["IOE0900000008", "IOE0900000009", "IOE0900000010"]);
    }

    #[test]
    fn stops_before_overflowing_width() {
        let v = generate_receipt_numbers("IOE0999999999", 6).unwrap();
        assert_eq!(v, vec!["IOE0999999996", "IOE0999999997", "IOE0999999998", "IOE0999999999"]);
    }

    #[test]
    fn leading_zeros_are_kept() {
        let v = generate_receipt_numbers("EAC0000000005", 2).unwrap();
        assert_eq!(v, vec!["EAC0000000004", "EAC0000000005"]);
    }

    #[test]
    fn never_goes_below_zero() {
        let v = generate_receipt_numbers("EAC0000000001", 4).unwrap();
        assert_eq!(v[0], "EAC0000000000");
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_receipt_numbers("IOE0900000001", 0).unwrap().is_empty());
    }

    #[test]
    fn bad_seeds_rejected() {
        for seed in ["IOE", "IOE0", "IOE09x0000001", "IOE0+12"] {
            assert!(matches!(generate_receipt_numbers(seed, 2), Err(Error::InvalidSeed(_))), "{seed}");
        }
    }
}
