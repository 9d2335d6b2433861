//! Defines the algebraic traits and the coefficient domains.
//!
//! The core trait is [Ring], which has two binary operations, addition and multiplication.
//! Each ring has an associated element type, that should not be confused with the ring type itself.
//! For example:
//! - The prime field [FiniteField](finite_field::FiniteField) has elements of type [FiniteFieldElement](finite_field::FiniteFieldElement).
//! - The integers [IntegerRing](integer::IntegerRing) have elements of type [Integer](integer::Integer).
//! - The rationals [RationalField](rational::RationalField) have elements of type [Rational](rational::Rational).
//! - The Gaussian rationals [ComplexRationalField](complex_rational::ComplexRationalField) have elements of type [ComplexRational](complex_rational::ComplexRational).
//! - A [RationalFunctionField](rational_function::RationalFunctionField) has elements of type [RationalFunction](rational_function::RationalFunction).
//!
//! The ring elements do not implement operations such as addition or multiplication,
//! but rather the ring itself does, since for example a finite field element does not know its prime.
//!
//! The [`EuclideanDomain`] trait adds remainders and gcds, the [`Field`] trait division.
//! [`FrobeniusRoot`] gives access to `p`-th roots in positive characteristic.
pub mod complex_rational;
pub mod finite_field;
pub mod integer;
pub mod rational;
pub mod rational_function;

use std::fmt::{Debug, Display, Error, Formatter};
use std::hash::Hash;

/// The internal ordering trait is used to compare elements of a ring.
/// This ordering is defined even for rings that do not have a total ordering, such
/// as the Gaussian rationals. It is used to sort results canonically.
pub trait InternalOrdering {
    /// Compare two elements using an internal ordering.
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering;
}

macro_rules! impl_internal_ordering {
    ($($t:ty),*) => {
        $(
            impl InternalOrdering for $t {
                fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_internal_ordering!(u64);

macro_rules! impl_internal_ordering_range {
    ($($t:ty),*) => {
        $(
            impl<T: InternalOrdering> InternalOrdering for $t {
                fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
                    match self.len().cmp(&other.len()) {
                        std::cmp::Ordering::Equal => (),
                        ord => return ord,
                    }

                    for (i, j) in self.iter().zip(other) {
                        match i.internal_cmp(&j) {
                            std::cmp::Ordering::Equal => {}
                            ord => return ord,
                        }
                    }

                    std::cmp::Ordering::Equal
                }
            }
        )*
    };
}

impl_internal_ordering_range!([T]);
impl_internal_ordering_range!(Vec<T>);

/// A ring is a set with two binary operations, addition and multiplication.
///
/// Each ring has an element type, that should not be confused with the ring type itself.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug + Display {
    /// The element of a ring. For example, the elements of the rationals are [Rational](rational::Rational).
    type Element: Clone + PartialEq + Eq + Hash + InternalOrdering + Debug;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Return the nth element by computing `n * 1`.
    fn nth(&self, n: u64) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
    /// The characteristic of the ring, 0 for rings of characteristic zero.
    fn characteristic(&self) -> u64;

    /// Sample an element, using `range` to bound integer-like parts.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;

    /// Format a ring element. If `in_product` is set, the element
    /// is about to be multiplied and should be wrapped in parentheses
    /// when it is a sum.
    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        in_product: bool,
        f: &mut W,
    ) -> Result<(), Error>;

    /// Create a new printer for the given ring element that
    /// can be used in a [format!] macro.
    fn printer<'a>(&'a self, element: &'a Self::Element) -> RingPrinter<'a, Self> {
        RingPrinter {
            ring: self,
            element,
            in_product: false,
        }
    }
}

/// A Euclidean domain is a ring that supports division with remainder, quotients, and gcds.
pub trait EuclideanDomain: Ring {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element);
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
}

/// A field is a ring that supports division and inversion.
pub trait Field: EuclideanDomain {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn inv(&self, a: &Self::Element) -> Self::Element;
}

/// Fields that can invert the Frobenius endomorphism `x -> x^p`
/// for (some of) their elements.
pub trait FrobeniusRoot: Field {
    /// Return `b` such that `b^p = a`, where `p` is the characteristic.
    /// Yields `None` if no such element exists in the field or if the
    /// characteristic is zero.
    fn frobenius_root(&self, a: &Self::Element) -> Option<Self::Element>;
}

/// Provides an interface for printing elements of a ring,
/// suitable as an argument to [format!]. Internally, it will call [Ring::format].
pub struct RingPrinter<'a, R: Ring> {
    pub ring: &'a R,
    pub element: &'a R::Element,
    pub in_product: bool,
}

impl<'a, R: Ring> RingPrinter<'a, R> {
    pub fn in_product(mut self) -> Self {
        self.in_product = true;
        self
    }
}

impl<'a, R: Ring> Display for RingPrinter<'a, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.ring.format(self.element, self.in_product, f)
    }
}
