//! The ring of integers, backed by `rug`. It is used for the integer images
//! of rational polynomials during factorization.
use std::fmt::{Display, Error, Formatter};

use rand::Rng;
pub use rug::Integer;

use super::{EuclideanDomain, InternalOrdering, Ring};

impl InternalOrdering for Integer {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntegerRing;

/// The integer ring.
pub const Z: IntegerRing = IntegerRing;

impl IntegerRing {
    pub fn new() -> IntegerRing {
        IntegerRing
    }
}

/// The representative of `a` modulo `m` in `(-m/2, m/2]`.
pub fn symmetric_mod(a: &Integer, m: &Integer) -> Integer {
    let c = a.clone().div_rem_euc(m.clone()).1;
    if Integer::from(&c * 2u32) > *m {
        c - m
    } else {
        c
    }
}

/// The inverse of `a` modulo `m`, if `a` and `m` are coprime.
pub fn mod_inverse(a: &Integer, m: &Integer) -> Option<Integer> {
    a.clone().invert(m).ok()
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z")
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a + b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a - b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a * b)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += Integer::from(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= Integer::from(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Integer::from(-a)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::from(1)
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        Integer::from(n)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        let mut b = b.clone();
        let mut x = self.one();
        let mut e = e;
        while e != 0 {
            if e & 1 != 0 {
                x *= &b;
            }
            e /= 2;
            if e != 0 {
                b = Integer::from(&b * &b);
            }
        }

        x
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.cmp0().is_eq()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn characteristic(&self) -> u64 {
        0
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Integer::from(rng.gen_range(range.0..range.1))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        _in_product: bool,
        f: &mut W,
    ) -> Result<(), Error> {
        write!(f, "{}", element)
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.clone().div_rem_euc(b.clone()).1
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.clone().div_rem_euc(b.clone())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.clone().gcd(b)
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{EuclideanDomain, Ring};

    use super::{mod_inverse, symmetric_mod, Integer, Z};

    #[test]
    fn arithmetic() {
        let a = Integer::from(-7);
        let b = Integer::from(3);
        assert_eq!(Z.quot_rem(&a, &b), (Integer::from(-3), Integer::from(2)));
        assert_eq!(Z.gcd(&Integer::from(12), &Integer::from(-18)), 6);
        assert_eq!(Z.pow(&b, 4), 81);
        assert_eq!(format!("{}", Z.printer(&a).in_product()), "-7");
    }

    #[test]
    fn residues() {
        let m = Integer::from(7);
        assert_eq!(symmetric_mod(&Integer::from(5), &m), -2);
        assert_eq!(symmetric_mod(&Integer::from(-4), &m), 3);
        assert_eq!(symmetric_mod(&Integer::from(3), &m), 3);
        assert_eq!(mod_inverse(&Integer::from(3), &m), Some(Integer::from(5)));
        assert_eq!(mod_inverse(&Integer::from(14), &m), None);
    }
}
