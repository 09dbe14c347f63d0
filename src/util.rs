use std::cmp::Ordering;

/// Compares two tags the way a human reads version strings: runs of digits
/// compare numerically, everything else byte-wise. `2.7` sorts before
/// `3.8`, and `10.0` sorts after `9.0` instead of between `1.x` and `2.x`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    let mut i = 0;
    let mut j = 0;

    while i < a_bytes.len() && j < b_bytes.len() {
        let ca = a_bytes[i];
        let cb = b_bytes[j];

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let (na, next_i) = take_digit_run(a_bytes, i);
            let (nb, next_j) = take_digit_run(b_bytes, j);
            match cmp_digit_runs(na, nb) {
                Ordering::Equal => {
                    i = next_i;
                    j = next_j;
                }
                other => return other,
            }
        } else {
            match ca.cmp(&cb) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                other => return other,
            }
        }
    }
    (a_bytes.len() - i).cmp(&(b_bytes.len() - j))
}

fn take_digit_run(bytes: &[u8], start: usize) -> (&[u8], usize) {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    (&bytes[start..end], end)
}

/// Compares digit runs of arbitrary length without parsing into an integer:
/// strip leading zeros, then longer run wins, then byte-wise.
fn cmp_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(digits: &[u8]) -> &[u8] {
    let first = digits.iter().position(|d| *d != b'0').unwrap_or(digits.len());
    &digits[first..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_numerically() {
        assert_eq!(natural_cmp("2.7", "3.8"), Ordering::Less);
        assert_eq!(natural_cmp("10.0", "9.0"), Ordering::Greater);
        assert_eq!(natural_cmp("3.8", "3.8"), Ordering::Equal);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("1.07", "1.7"), Ordering::Equal);
        assert_eq!(natural_cmp("1.007", "1.08"), Ordering::Less);
    }

    #[test]
    fn test_mixed_alpha_numeric() {
        assert_eq!(natural_cmp("v2", "v10"), Ordering::Less);
        assert_eq!(natural_cmp("alpha", "beta"), Ordering::Less);
        assert_eq!(natural_cmp("1.0-rc1", "1.0-rc2"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("1.0", "1.0.1"), Ordering::Less);
    }

    #[test]
    fn test_sorting_orders_versions() {
        let mut tags = vec!["3.8", "2.7", "10.0"];
        tags.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(tags, vec!["2.7", "3.8", "10.0"]);
    }
}
