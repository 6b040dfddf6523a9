//! Prime-capacity growth policy shared by both table implementations.
//!
//! Capacities are always prime: the tables hash by integer modulo, and a prime
//! modulus avoids the systematic clustering that power-of-two sizes produce for
//! keys sharing low-bit patterns. Capacity only ever grows.

/// Load-factor ceiling; a table rehashes as soon as `len / capacity` reaches it.
pub(crate) const MAX_LOAD_FACTOR: f64 = 0.75;

/// Default bucket count for `new()`.
pub(crate) const DEFAULT_CAPACITY: usize = 11;

/// Smallest capacity any table may have. Keeps the modulo in `hash` well
/// defined for every constructible table.
pub(crate) const MIN_CAPACITY: usize = 2;

/// Trial-division primality test.
///
/// `0` and `1` have no divisors in `2..=sqrt(n)`, so the loop alone would
/// report them prime; they are ruled out up front.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Smallest prime greater than or equal to `n`.
#[allow(clippy::arithmetic_side_effects)]
pub(crate) fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(MIN_CAPACITY);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}

/// Capacity a constructor should use for a requested bucket count.
pub(crate) fn initial_capacity(requested: usize) -> usize {
    next_prime(requested.max(MIN_CAPACITY))
}

/// Next capacity for a table currently at `current` buckets holding `len`
/// entries: double, advance to the next prime, and keep doubling until the
/// entries fit under the load-factor ceiling.
///
/// The result always leaves the post-rehash load factor at or below the
/// ceiling, so a rehash pass can reinsert entries without triggering a nested
/// rehash.
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub(crate) fn grow_capacity(current: usize, len: usize) -> usize {
    let mut candidate = next_prime(current.saturating_mul(2));
    while len as f64 / candidate as f64 > MAX_LOAD_FACTOR {
        candidate = next_prime(candidate.saturating_mul(2));
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers_are_classified() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(11));
        assert!(!is_prime(21));
        assert!(is_prime(23));
    }

    #[test]
    fn next_prime_rounds_up() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(22), 23);
    }

    #[test]
    fn initial_capacity_is_prime_and_at_least_two() {
        assert_eq!(initial_capacity(0), 2);
        assert_eq!(initial_capacity(1), 2);
        assert_eq!(initial_capacity(11), 11);
        assert_eq!(initial_capacity(12), 13);
        assert!(is_prime(initial_capacity(100)));
    }

    #[test]
    fn grow_capacity_doubles_to_a_prime() {
        // 11 buckets holding 9 entries: 22 -> 23, and 9/23 is under the ceiling.
        assert_eq!(grow_capacity(11, 9), 23);
        assert!(is_prime(grow_capacity(23, 18)));
    }

    #[test]
    fn grow_capacity_keeps_doubling_for_dense_tables() {
        // A len far above the current capacity forces repeated doubling.
        let grown = grow_capacity(11, 100);
        assert!(is_prime(grown));
        #[allow(clippy::cast_precision_loss)]
        let load = 100.0 / grown as f64;
        assert!(load <= MAX_LOAD_FACTOR);
    }

    #[test]
    fn growth_is_monotone() {
        let mut capacity = DEFAULT_CAPACITY;
        for len in [9_usize, 18, 40, 90] {
            let next = grow_capacity(capacity, len);
            assert!(next > capacity);
            capacity = next;
        }
    }
}
