/// Compute `a * b mod n` without overflow.
#[inline(always)]
pub fn mul_mod(a: u64, b: u64, n: u64) -> u64 {
    ((a as u128 * b as u128) % n as u128) as u64
}

/// Compute `b^e mod n`.
pub fn pow_mod(mut b: u64, mut e: u64, n: u64) -> u64 {
    let mut x = 1 % n;
    b %= n;
    while e != 0 {
        if e & 1 != 0 {
            x = mul_mod(x, b, n);
        }
        b = mul_mod(b, b, n);
        e /= 2;
    }

    x
}

/// Do a deterministic Miller test to check if `n` is a prime.
/// Since `n` is a `u64`, a basis of only 7 witnesses has to be tested.
pub fn is_prime_u64(n: u64) -> bool {
    // shortest SPRP basis from Jim Sinclair for testing primality of u64
    let witnesses: [u64; 7] = [2, 325, 9375, 28178, 450775, 9780504, 1795265022];

    if n < 2 {
        return false;
    }

    if n % 2 == 0 {
        return n == 2;
    }

    let mut s = 0;
    let mut d = n - 1;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'test: for a in witnesses {
        let a = a % n;

        if a == 0 {
            continue;
        }

        let mut x = pow_mod(a, d, n);

        if x == 1 || x == n - 1 {
            continue;
        }

        for _ in 0..s {
            x = mul_mod(x, x, n);

            if x == 1 {
                return false;
            }
            if x == n - 1 {
                continue 'test;
            }
        }

        return false;
    }

    true
}

#[cfg(test)]
mod test {
    use super::{is_prime_u64, pow_mod};

    #[test]
    fn primes() {
        let small: Vec<u64> = (0..30).filter(|n| is_prime_u64(*n)).collect();
        assert_eq!(small, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime_u64(18446744073709551557));
        assert!(!is_prime_u64(18446744073709551559));
        assert!(!is_prime_u64(3215031751));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(pow_mod(3, 4, 5), 1);
        assert_eq!(pow_mod(2, 10, 1000), 24);
    }
}
