//! The field of rational numbers, backed by `rug`.
use std::fmt::{Display, Error, Formatter};

use rand::Rng;
pub use rug::{Integer, Rational};

use super::{EuclideanDomain, Field, FrobeniusRoot, InternalOrdering, Ring};

impl InternalOrdering for Rational {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.cmp(other)
    }
}

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct RationalField;

/// The field of rational numbers.
pub const Q: RationalField = RationalField;

impl RationalField {
    pub fn new() -> RationalField {
        RationalField
    }

    pub fn to_element(&self, num: i64, den: i64) -> Rational {
        Rational::from((num, den))
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q")
    }
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a + b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a - b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Rational::from(a * b)
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
        *a += Rational::from(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= Rational::from(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Rational::from(-a)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Rational::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Rational::from(1)
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        Rational::from(n)
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut b = b.clone();
        let mut x = self.one();
        while e != 0 {
            if e & 1 != 0 {
                x *= &b;
            }
            e /= 2;
            if e != 0 {
                b = Rational::from(&b * &b);
            }
        }

        x
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.cmp0() == std::cmp::Ordering::Equal
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn characteristic(&self) -> u64 {
        0
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let r = rng.gen_range(range.0..range.1);
        Rational::from(r)
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        in_product: bool,
        f: &mut W,
    ) -> Result<(), Error> {
        if in_product && *element.denom() != 1 {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl EuclideanDomain for RationalField {
    #[inline]
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.zero()
    }

    #[inline]
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    #[inline]
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(a) && Self::is_zero(b) {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl Field for RationalField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        assert!(!Self::is_zero(b), "Division by zero");
        Rational::from(a / b)
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        assert!(!Self::is_zero(b), "Division by zero");
        *a /= b;
    }

    #[inline]
    fn inv(&self, a: &Self::Element) -> Self::Element {
        assert!(!Self::is_zero(a), "Division by zero");
        a.clone().recip()
    }
}

impl FrobeniusRoot for RationalField {
    fn frobenius_root(&self, _a: &Self::Element) -> Option<Self::Element> {
        None
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{Field, Ring};

    use super::{Rational, Q};

    #[test]
    fn arithmetic() {
        let a = Q.to_element(3, 4);
        let b = Q.to_element(-1, 6);
        assert_eq!(Q.add(&a, &b), Q.to_element(7, 12));
        assert_eq!(Q.mul(&a, &b), Q.to_element(-1, 8));
        assert_eq!(Q.div(&a, &b), Q.to_element(-9, 2));
        assert_eq!(Q.pow(&a, 3), Q.to_element(27, 64));
        assert!(Q.is_one(&Q.mul(&a, &Q.inv(&a))));
        assert_eq!(Q.nth(5), Rational::from(5));

        let mut c = a.clone();
        Q.sub_mul_assign(&mut c, &a, &Q.nth(2));
        assert_eq!(c, Q.neg(&a));
    }

    #[test]
    fn printing() {
        let a = Q.to_element(-3, 4);
        assert_eq!(format!("{}", Q.printer(&a)), "-3/4");
        assert_eq!(format!("{}", Q.printer(&a).in_product()), "(-3/4)");
        assert_eq!(format!("{}", Q.printer(&Q.nth(2)).in_product()), "2");
    }
}
