//! Prime fields `Z/p` with 64-bit residues.
use std::fmt::{Display, Error, Formatter};

use rand::Rng;

use crate::error::InvalidDomainError;
use crate::utils::{is_prime_u64, mul_mod};

use super::{EuclideanDomain, Field, FrobeniusRoot, InternalOrdering, Ring};

/// An element of a prime field, stored as its canonical representative in `[0, p)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiniteFieldElement(pub(crate) u64);

impl InternalOrdering for FiniteFieldElement {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// The prime field `GF(p)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FiniteField {
    p: u64,
}

impl FiniteField {
    /// Create a new prime field. Fails if `p` is not a prime, since
    /// `Z/n` is not a field for composite `n`.
    pub fn new(p: u64) -> Result<FiniteField, InvalidDomainError> {
        if !is_prime_u64(p) {
            return Err(InvalidDomainError::NotPrime(p));
        }

        Ok(FiniteField { p })
    }

    pub fn get_prime(&self) -> u64 {
        self.p
    }

    /// Convert a number to its residue class.
    #[inline(always)]
    pub fn to_element(&self, a: u64) -> FiniteFieldElement {
        FiniteFieldElement(a % self.p)
    }

    /// Convert a signed number to its residue class.
    pub fn to_element_signed(&self, a: i64) -> FiniteFieldElement {
        if a >= 0 {
            self.to_element(a as u64)
        } else {
            self.neg(&self.to_element(a.unsigned_abs()))
        }
    }

    /// Return the canonical representative in `[0, p)`.
    #[inline(always)]
    pub fn from_element(&self, a: &FiniteFieldElement) -> u64 {
        a.0
    }

    /// Return the symmetric representative in `(-p/2, p/2]`.
    pub fn to_symmetric_i64(&self, a: &FiniteFieldElement) -> i64 {
        if a.0 > self.p / 2 {
            -((self.p - a.0) as i64)
        } else {
            a.0 as i64
        }
    }
}

impl Display for FiniteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GF({})", self.p)
    }
}

impl Ring for FiniteField {
    type Element = FiniteFieldElement;

    #[inline(always)]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let t = a.0 as u128 + b.0 as u128;
        if t >= self.p as u128 {
            FiniteFieldElement((t - self.p as u128) as u64)
        } else {
            FiniteFieldElement(t as u64)
        }
    }

    #[inline(always)]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.0 >= b.0 {
            FiniteFieldElement(a.0 - b.0)
        } else {
            FiniteFieldElement(a.0 + (self.p - b.0))
        }
    }

    #[inline(always)]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        FiniteFieldElement(mul_mod(a.0, b.0, self.p))
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        if a.0 == 0 {
            *a
        } else {
            FiniteFieldElement(self.p - a.0)
        }
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        FiniteFieldElement(0)
    }

    #[inline]
    fn one(&self) -> Self::Element {
        FiniteFieldElement(1)
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        self.to_element(n)
    }

    /// Compute b^e % p.
    #[inline]
    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut b = *b;
        let mut x = self.one();
        while e != 0 {
            if e & 1 != 0 {
                x = self.mul(&x, &b);
            }
            b = self.mul(&b, &b);
            e /= 2;
        }

        x
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.0 == 0
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.0 == 1
    }

    fn characteristic(&self) -> u64 {
        self.p
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0.max(0)..range.1.min(self.p.min(i64::MAX as u64) as i64));
        FiniteFieldElement(r as u64)
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        _in_product: bool,
        f: &mut W,
    ) -> Result<(), Error> {
        write!(f, "{}", element.0)
    }
}

impl EuclideanDomain for FiniteField {
    #[inline]
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        FiniteFieldElement(0)
    }

    #[inline]
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), FiniteFieldElement(0))
    }

    #[inline]
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.0 == 0 && b.0 == 0 {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl Field for FiniteField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, &self.inv(b));
    }

    /// Computes x^-1 mod p.
    fn inv(&self, a: &Self::Element) -> Self::Element {
        assert!(a.0 != 0, "0 is not invertible");

        // extended Euclidean algorithm: a x + b p = gcd(x, p) = 1 or a x = 1 (mod p)
        let mut u1: u64 = 1;
        let mut u3 = a.0;
        let mut v1: u64 = 0;
        let mut v3 = self.p;
        let mut even_iter: bool = true;

        while v3 != 0 {
            let q = u3 / v3;
            let t3 = u3 % v3;
            let t1 = u1 + q * v1;
            u1 = v1;
            v1 = t1;
            u3 = v3;
            v3 = t3;
            even_iter = !even_iter;
        }

        debug_assert!(u3 == 1);
        if even_iter {
            FiniteFieldElement(u1)
        } else {
            FiniteFieldElement(self.p - u1)
        }
    }
}

impl FrobeniusRoot for FiniteField {
    /// The Frobenius map is the identity on a prime field.
    fn frobenius_root(&self, a: &Self::Element) -> Option<Self::Element> {
        Some(*a)
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{Field, FrobeniusRoot, Ring};
    use crate::error::InvalidDomainError;

    use super::FiniteField;

    #[test]
    fn composite_modulus() {
        assert_eq!(FiniteField::new(6), Err(InvalidDomainError::NotPrime(6)));
        assert_eq!(FiniteField::new(1), Err(InvalidDomainError::NotPrime(1)));
        assert!(FiniteField::new(2).is_ok());
    }

    #[test]
    fn arithmetic() {
        let f = FiniteField::new(7).unwrap();
        let a = f.to_element(5);
        let b = f.to_element(4);
        assert_eq!(f.add(&a, &b), f.to_element(2));
        assert_eq!(f.sub(&b, &a), f.to_element(6));
        assert_eq!(f.mul(&a, &b), f.to_element(6));
        assert_eq!(f.mul(&a, &f.inv(&a)), f.one());
        assert_eq!(f.div(&b, &a), f.to_element(5));
        assert_eq!(f.neg(&f.zero()), f.zero());
        assert_eq!(f.to_element_signed(-1), f.to_element(6));
        assert_eq!(f.to_symmetric_i64(&f.to_element(6)), -1);
        assert_eq!(f.pow(&a, 6), f.one());
    }

    #[test]
    fn large_prime() {
        let p = 18446744073709551557;
        let f = FiniteField::new(p).unwrap();
        let a = f.to_element(p - 1);
        assert_eq!(f.mul(&a, &a), f.one());
        assert_eq!(f.add(&a, &a), f.to_element(p - 2));
        assert_eq!(f.mul(&f.inv(&a), &a), f.one());
        assert_eq!(f.to_element_signed(-3), f.to_element(p - 3));
    }

    #[test]
    fn frobenius() {
        let f = FiniteField::new(5).unwrap();
        let a = f.to_element(3);
        let r = f.frobenius_root(&a).unwrap();
        assert_eq!(f.pow(&r, 5), a);
    }
}
