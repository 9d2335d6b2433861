//! The Gaussian rationals `Q(i)`.
use std::fmt::{Display, Error, Formatter};

use rand::Rng;

use super::rational::Rational;
use super::{EuclideanDomain, Field, FrobeniusRoot, InternalOrdering, Ring};

/// A number `re + im*i` with rational parts.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct ComplexRational {
    pub re: Rational,
    pub im: Rational,
}

impl ComplexRational {
    pub fn new(re: Rational, im: Rational) -> ComplexRational {
        ComplexRational { re, im }
    }

    pub fn from_real(re: Rational) -> ComplexRational {
        ComplexRational {
            re,
            im: Rational::new(),
        }
    }

    /// The imaginary unit.
    pub fn i() -> ComplexRational {
        ComplexRational {
            re: Rational::new(),
            im: Rational::from(1),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.re.cmp0().is_eq() && self.im.cmp0().is_eq()
    }

    pub fn is_real(&self) -> bool {
        self.im.cmp0().is_eq()
    }

    pub fn conj(&self) -> ComplexRational {
        ComplexRational {
            re: self.re.clone(),
            im: Rational::from(-&self.im),
        }
    }

    /// `re^2 + im^2`.
    pub fn norm_squared(&self) -> Rational {
        Rational::from(&self.re * &self.re) + Rational::from(&self.im * &self.im)
    }

    /// A rational upper bound of the modulus, `|re| + |im|`.
    pub fn modulus_upper_bound(&self) -> Rational {
        Rational::from(self.re.abs_ref()) + Rational::from(self.im.abs_ref())
    }

    /// A rational lower bound of the modulus, `max(|re|, |im|)`.
    pub fn modulus_lower_bound(&self) -> Rational {
        Rational::from(self.re.abs_ref()).max(Rational::from(self.im.abs_ref()))
    }
}

impl InternalOrdering for ComplexRational {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.re.cmp(&other.re).then_with(|| self.im.cmp(&other.im))
    }
}

impl Display for ComplexRational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_real() {
            return write!(f, "{}", self.re);
        }

        if self.re.cmp0().is_ne() {
            write!(f, "{}", self.re)?;
            if self.im.cmp0().is_gt() {
                write!(f, "+")?;
            }
        }

        if self.im == 1 {
            write!(f, "i")
        } else if self.im == -1 {
            write!(f, "-i")
        } else {
            write!(f, "{}i", self.im)
        }
    }
}

/// The field of Gaussian rationals.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ComplexRationalField;

impl ComplexRationalField {
    pub fn new() -> ComplexRationalField {
        ComplexRationalField
    }

    pub fn to_element(&self, re: (i64, i64), im: (i64, i64)) -> ComplexRational {
        ComplexRational::new(Rational::from(re), Rational::from(im))
    }

    pub fn i(&self) -> ComplexRational {
        ComplexRational::i()
    }
}

impl Display for ComplexRationalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q(i)")
    }
}

impl Ring for ComplexRationalField {
    type Element = ComplexRational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ComplexRational {
            re: Rational::from(&a.re + &b.re),
            im: Rational::from(&a.im + &b.im),
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ComplexRational {
            re: Rational::from(&a.re - &b.re),
            im: Rational::from(&a.im - &b.im),
        }
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ComplexRational {
            re: Rational::from(&a.re * &b.re) - Rational::from(&a.im * &b.im),
            im: Rational::from(&a.re * &b.im) + Rational::from(&a.im * &b.re),
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        a.re += &b.re;
        a.im += &b.im;
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        a.re -= &b.re;
        a.im -= &b.im;
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        ComplexRational {
            re: Rational::from(-&a.re),
            im: Rational::from(-&a.im),
        }
    }

    fn zero(&self) -> Self::Element {
        ComplexRational::default()
    }

    fn one(&self) -> Self::Element {
        ComplexRational::from_real(Rational::from(1))
    }

    fn nth(&self, n: u64) -> Self::Element {
        ComplexRational::from_real(Rational::from(n))
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut b = b.clone();
        let mut x = self.one();
        while e != 0 {
            if e & 1 != 0 {
                x = self.mul(&x, &b);
            }
            e /= 2;
            if e != 0 {
                b = self.mul(&b, &b);
            }
        }

        x
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.re == 1 && a.im.cmp0().is_eq()
    }

    fn characteristic(&self) -> u64 {
        0
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        ComplexRational::new(
            Rational::from(rng.gen_range(range.0..range.1)),
            Rational::from(rng.gen_range(range.0..range.1)),
        )
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        in_product: bool,
        f: &mut W,
    ) -> Result<(), Error> {
        let needs_parentheses = if element.is_real() {
            *element.re.denom() != 1
        } else {
            element.re.cmp0().is_ne() || *element.im.denom() != 1
        };

        if in_product && needs_parentheses {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl EuclideanDomain for ComplexRationalField {
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.is_zero() && b.is_zero() {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl Field for ComplexRationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        assert!(!a.is_zero(), "Division by zero");
        let n = a.norm_squared();
        ComplexRational {
            re: Rational::from(&a.re / &n),
            im: Rational::from(-&a.im) / &n,
        }
    }
}

impl FrobeniusRoot for ComplexRationalField {
    fn frobenius_root(&self, _a: &Self::Element) -> Option<Self::Element> {
        None
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{Field, Ring};

    use super::{ComplexRational, ComplexRationalField};

    #[test]
    fn arithmetic() {
        let f = ComplexRationalField::new();
        let i = f.i();
        assert_eq!(f.mul(&i, &i), f.neg(&f.one()));

        let a = f.to_element((1, 2), (3, 1));
        assert!(f.is_one(&f.mul(&a, &f.inv(&a))));
        assert_eq!(f.mul(&a, &a.conj()), ComplexRational::from_real(a.norm_squared()));
        assert_eq!(f.pow(&i, 4), f.one());
    }

    #[test]
    fn printing() {
        let f = ComplexRationalField::new();
        assert_eq!(format!("{}", f.to_element((1, 1), (-2, 1))), "1-2i");
        assert_eq!(format!("{}", f.to_element((0, 1), (1, 1))), "i");
        assert_eq!(format!("{}", f.to_element((0, 1), (-1, 3))), "-1/3i");
        assert_eq!(
            format!("{}", f.printer(&f.to_element((1, 1), (1, 1))).in_product()),
            "(1+i)"
        );
    }
}
