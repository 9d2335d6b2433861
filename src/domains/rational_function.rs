//! Fields of rational functions over a coefficient field, such as `GF(p)(c)`.

use std::cmp::Ordering;
use std::fmt::{Display, Error, Write};
use std::sync::Arc;

use ahash::HashSet;

use crate::error::InvalidDomainError;
use crate::poly::polynomial::{MultivariatePolynomial, PolynomialRing};
use crate::poly::{LexOrder, Variable};

use super::{EuclideanDomain, Field, FrobeniusRoot, InternalOrdering, Ring};

/// The numerator and denominator polynomials of a rational function.
pub type ParameterPolynomial<F> = MultivariatePolynomial<F, u32, LexOrder>;

/// The field of rational functions in one or more parameters over the field `F`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalFunctionField<F: Field> {
    field: F,
    parameters: Arc<Vec<Variable>>,
}

/// A rational function in canonical form: the numerator and denominator are coprime
/// and the denominator has leading coefficient one.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalFunction<F: Field> {
    pub numerator: ParameterPolynomial<F>,
    pub denominator: ParameterPolynomial<F>,
}

impl<F: Field> RationalFunctionField<F> {
    /// Create the field `field(parameters)`.
    pub fn new(field: F, parameters: &[&str]) -> Result<Self, InvalidDomainError> {
        if parameters.is_empty() {
            return Err(InvalidDomainError::NoParameters);
        }

        let mut seen = HashSet::default();
        for p in parameters {
            if !seen.insert(*p) {
                return Err(InvalidDomainError::DuplicateVariable(p.to_string()));
            }
        }

        Ok(RationalFunctionField {
            field,
            parameters: Arc::new(parameters.iter().map(|p| Variable::new(p)).collect()),
        })
    }

    /// Create the field with a parameter list that is known to be non-empty and free of duplicates.
    pub(crate) fn from_parameters(field: F, parameters: Arc<Vec<Variable>>) -> Self {
        RationalFunctionField { field, parameters }
    }

    /// The coefficient field of the numerator and denominator.
    pub fn base_field(&self) -> &F {
        &self.field
    }

    pub fn parameters(&self) -> &Arc<Vec<Variable>> {
        &self.parameters
    }

    /// The ring in which numerators and denominators live.
    pub fn polynomial_ring(&self) -> PolynomialRing<F, u32, LexOrder> {
        PolynomialRing::from_variables(self.field.clone(), self.parameters.clone())
    }

    /// The parameter with index `index` as an element of the field.
    pub fn parameter(&self, index: usize) -> RationalFunction<F> {
        let num = self.polynomial_ring().variable(index);
        let den = num.one();
        RationalFunction {
            numerator: num,
            denominator: den,
        }
    }

    /// Embed an element of the base field.
    pub fn constant(&self, c: F::Element) -> RationalFunction<F> {
        let one = self.polynomial_ring().one();
        RationalFunction {
            numerator: one.constant(c),
            denominator: one,
        }
    }

    /// Embed a polynomial in the parameters.
    pub fn from_polynomial(&self, poly: ParameterPolynomial<F>) -> RationalFunction<F> {
        let den = poly.one();
        RationalFunction {
            numerator: poly,
            denominator: den,
        }
    }

    /// Create the canonical form of `num / den`. Panics when `den` is zero.
    pub fn to_element(
        &self,
        num: ParameterPolynomial<F>,
        den: ParameterPolynomial<F>,
    ) -> RationalFunction<F> {
        if den.is_zero() {
            panic!("Division by zero in rational function");
        }

        if num.is_zero() {
            return RationalFunction {
                denominator: num.one(),
                numerator: num,
            };
        }

        let g = MultivariatePolynomial::gcd(&num, &den);
        let (num, den) = if g.is_one() {
            (num, den)
        } else {
            (&num / &g, &den / &g)
        };

        let lc = den.lcoeff();
        if self.field.is_one(&lc) {
            RationalFunction {
                numerator: num,
                denominator: den,
            }
        } else {
            RationalFunction {
                numerator: num.div_coeff(&lc),
                denominator: den.div_coeff(&lc),
            }
        }
    }
}

impl<F: Field> RationalFunction<F> {
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns true if the rational function does not depend on the parameters.
    pub fn is_constant(&self) -> bool {
        self.numerator.is_constant() && self.denominator.is_constant()
    }

    /// Returns true if the denominator is one.
    pub fn is_polynomial(&self) -> bool {
        self.denominator.is_one()
    }
}

impl<F: Field> InternalOrdering for RationalFunction<F> {
    /// An ordering of rational functions that has no intuitive meaning.
    fn internal_cmp(&self, other: &Self) -> Ordering {
        self.numerator
            .internal_cmp(&other.numerator)
            .then_with(|| self.denominator.internal_cmp(&other.denominator))
    }
}

impl<F: Field> Display for RationalFunctionField<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.field)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, "{}", p)?;
        }
        f.write_char(')')
    }
}

impl<F: Field> Display for RationalFunction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.denominator.is_one() {
            return write!(f, "{}", self.numerator);
        }

        if self.numerator.nterms() > 1 {
            write!(f, "({})", self.numerator)?;
        } else {
            write!(f, "{}", self.numerator)?;
        }

        f.write_char('/')?;

        // a monic single term with one variable does not need parentheses
        if self.denominator.nterms() == 1 && self.denominator.occurring_variables().len() == 1 {
            write!(f, "{}", self.denominator)
        } else {
            write!(f, "({})", self.denominator)
        }
    }
}

impl<F: Field> Ring for RationalFunctionField<F> {
    type Element = RationalFunction<F>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.is_zero() {
            return b.clone();
        }
        if b.is_zero() {
            return a.clone();
        }

        if a.denominator == b.denominator {
            return self.to_element(&a.numerator + &b.numerator, a.denominator.clone());
        }

        let denom_gcd = MultivariatePolynomial::gcd(&a.denominator, &b.denominator);
        let (a_den_red, b_den_red) = if denom_gcd.is_one() {
            (a.denominator.clone(), b.denominator.clone())
        } else {
            (
                &a.denominator / &denom_gcd,
                &b.denominator / &denom_gcd,
            )
        };

        let num = &(&a.numerator * &b_den_red) + &(&b.numerator * &a_den_red);
        let den = &a_den_red * &b.denominator;
        self.to_element(num, den)
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.is_zero() || b.is_zero() {
            return self.zero();
        }

        // cross-cancel first, so that the products stay small
        let gcd1 = MultivariatePolynomial::gcd(&a.numerator, &b.denominator);
        let gcd2 = MultivariatePolynomial::gcd(&a.denominator, &b.numerator);

        let num = &(&a.numerator / &gcd1) * &(&b.numerator / &gcd2);
        let den = &(&a.denominator / &gcd2) * &(&b.denominator / &gcd1);
        self.to_element(num, den)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        RationalFunction {
            numerator: -&a.numerator,
            denominator: a.denominator.clone(),
        }
    }

    fn zero(&self) -> Self::Element {
        let num = self.polynomial_ring().zero();
        RationalFunction {
            denominator: num.one(),
            numerator: num,
        }
    }

    fn one(&self) -> Self::Element {
        let num = self.polynomial_ring().one();
        RationalFunction {
            numerator: num.clone(),
            denominator: num,
        }
    }

    fn nth(&self, n: u64) -> Self::Element {
        self.constant(self.field.nth(n))
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        // numerator and denominator stay coprime
        RationalFunction {
            numerator: b.numerator.pow(e as usize),
            denominator: b.denominator.pow(e as usize),
        }
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.numerator.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.numerator.is_one() && a.denominator.is_one()
    }

    fn characteristic(&self) -> u64 {
        self.field.characteristic()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        self.constant(self.field.sample(rng, range))
    }

    fn format<W: Write>(
        &self,
        element: &Self::Element,
        in_product: bool,
        f: &mut W,
    ) -> Result<(), Error> {
        if in_product && !(element.denominator.is_one() && element.numerator.nterms() <= 1) {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl<F: Field> EuclideanDomain for RationalFunctionField<F> {
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

impl<F: Field> Field for RationalFunctionField<F> {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if a.is_zero() {
            panic!("Cannot invert 0");
        }

        self.to_element(a.denominator.clone(), a.numerator.clone())
    }
}

impl<F: FrobeniusRoot> FrobeniusRoot for RationalFunctionField<F> {
    /// A canonical `n/d` is a `p`-th power exactly when `n` and `d` are.
    fn frobenius_root(&self, a: &Self::Element) -> Option<Self::Element> {
        let num = a.numerator.frobenius_root()?;
        let den = a.denominator.frobenius_root()?;
        Some(self.to_element(num, den))
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::FiniteField;
    use crate::domains::rational::Q;
    use crate::domains::{Field, FrobeniusRoot, Ring};
    use crate::error::InvalidDomainError;

    use super::RationalFunctionField;

    #[test]
    fn construction() {
        let f = FiniteField::new(5).unwrap();
        assert_eq!(
            RationalFunctionField::new(f, &[]),
            Err(InvalidDomainError::NoParameters)
        );
        assert_eq!(
            RationalFunctionField::new(f, &["c", "c"]),
            Err(InvalidDomainError::DuplicateVariable("c".to_string()))
        );

        let k = RationalFunctionField::new(f, &["c"]).unwrap();
        assert_eq!(format!("{}", k), "GF(5)(c)");
    }

    #[test]
    fn arithmetic() {
        let k = RationalFunctionField::new(Q, &["a", "b"]).unwrap();
        let a = k.parameter(0);
        let b = k.parameter(1);

        let s = k.div(&k.one(), &k.add(&a, &b));
        let t = k.mul(&s, &k.add(&a, &b));
        assert!(k.is_one(&t));

        // 1/a - 1/b = (b - a)/(a b)
        let d = k.sub(&k.inv(&a), &k.inv(&b));
        let expected = k.div(&k.sub(&b, &a), &k.mul(&a, &b));
        assert_eq!(d, expected);

        // canonical form: the denominator is monic
        let two = k.nth(2);
        let h = k.div(&a, &k.mul(&two, &b));
        assert!(Q.is_one(h.denominator.max_coeff()));
        assert_eq!(format!("{}", h), "(1/2)*a/b");
    }

    #[test]
    fn frobenius() {
        let f = FiniteField::new(5).unwrap();
        let k = RationalFunctionField::new(f, &["c"]).unwrap();
        let c = k.parameter(0);
        let x = k.div(&k.add(&c, &k.one()), &c);
        let x5 = k.pow(&x, 5);
        assert_eq!(k.frobenius_root(&x5), Some(x));
        assert_eq!(k.frobenius_root(&c), None);
    }
}
