use std::fmt::Write;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use rug::Integer;

use crate::domains::{Field, InternalOrdering, Ring};

use super::Variable;

/// A dense univariate polynomial. The coefficient of `x^k` is stored at index `k`
/// and the last coefficient is never zero.
#[derive(Clone)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Arc<Variable>,
    pub field: F,
}

impl<F: Ring> std::fmt::Debug for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for c in self.coefficients.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?} }}", c)?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring> std::fmt::Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let minus_one = self.field.neg(&self.field.one());
        let mut coeff = String::new();
        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate().rev() {
            if F::is_zero(c) {
                continue;
            }

            coeff.clear();
            let mut wrote_coeff = true;
            if e > 0 && self.field.is_one(c) {
                wrote_coeff = false;
            } else if e > 0 && *c == minus_one {
                coeff.push('-');
                wrote_coeff = false;
            } else {
                self.field.format(c, e > 0, &mut coeff)?;
            }

            if !first && !coeff.starts_with('-') {
                f.write_char('+')?;
            }
            first = false;
            f.write_str(&coeff)?;

            if e > 0 {
                if wrote_coeff {
                    f.write_char('*')?;
                }
                if e == 1 {
                    write!(f, "{}", self.variable)?;
                } else {
                    write!(f, "{}^{}", self.variable, e)?;
                }
            }
        }
        Ok(())
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variable: Arc<Variable>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            field: field.clone(),
            variable,
        }
    }

    /// Constructs a polynomial from its coefficients, lowest degree first.
    pub fn from_coefficients(field: &F, coefficients: Vec<F::Element>, variable: Arc<Variable>) -> Self {
        let mut res = Self {
            coefficients,
            field: field.clone(),
            variable,
        };
        res.truncate();
        res
    }

    /// Constructs a zero polynomial, inheriting the field and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs `coeff * x^exponent`.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut coefficients = vec![self.field.zero(); exponent + 1];
        coefficients[exponent] = coeff;

        Self {
            coefficients,
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Add `coeff` to the coefficient of `x^exponent`.
    pub fn add_coefficient(&mut self, exponent: usize, coeff: &F::Element) {
        if self.coefficients.len() <= exponent {
            self.coefficients.resize(exponent + 1, self.field.zero());
        }
        self.field.add_assign(&mut self.coefficients[exponent], coeff);
        self.truncate();
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Get the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        if self.is_zero() {
            0
        } else {
            self.coefficients.len() - 1
        }
    }

    /// Remove trailing zero coefficients.
    #[inline]
    pub fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter()
            .rposition(|c| !F::is_zero(c))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.coefficients.truncate(d);
    }

    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    /// Multiply by `x^exp`.
    pub fn mul_exp(&self, exp: usize) -> Self {
        if exp == 0 || self.is_zero() {
            return self.clone();
        }

        let mut a = self.zero();
        a.coefficients = vec![self.field.zero(); self.coefficients.len() + exp];
        a.coefficients[exp..].clone_from_slice(&self.coefficients);
        a
    }

    /// Multiply every coefficient with `coeff`.
    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self.truncate();
        self
    }

    /// Evaluate the polynomial using Horner's method.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut res = self.field.zero();
        for c in self.coefficients.iter().rev() {
            res = self.field.mul(&res, x);
            self.field.add_assign(&mut res, c);
        }
        res
    }

    /// Compute `self(other(x))`.
    pub fn compose(&self, other: &Self) -> Self {
        let mut res = self.zero();
        for c in self.coefficients.iter().rev() {
            res = &(&res * other) + &self.constant(c.clone());
        }
        res
    }

    pub fn derivative(&self) -> Self {
        if self.coefficients.len() < 2 {
            return self.zero();
        }

        let mut res = self.zero();
        res.coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(e, c)| self.field.mul(c, &self.field.nth(e as u64)))
            .collect();
        res.truncate();
        res
    }

    /// Map the coefficients to another ring.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        field: U,
    ) -> UnivariatePolynomial<U> {
        let mut res = UnivariatePolynomial {
            coefficients: self.coefficients.iter().map(f).collect(),
            field,
            variable: self.variable.clone(),
        };
        res.truncate();
        res
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Divide every coefficient by `other`.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            self.field.div_assign(c, other);
        }
        self
    }

    /// Make the leading coefficient one.
    pub fn make_monic(self) -> Self {
        if self.is_zero() || self.field.is_one(&self.lcoeff()) {
            return self;
        }

        let l = self.lcoeff();
        self.div_coeff(&l)
    }

    /// Divide with remainder.
    pub fn quot_rem(&self, div: &Self) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0");
        }

        if self.degree() < div.degree() || self.is_zero() {
            return (self.zero(), self.clone());
        }

        let m = div.degree();
        let u = self.field.inv(&div.coefficients[m]);

        let mut q = self.zero();
        q.coefficients = vec![self.field.zero(); self.degree() - m + 1];

        let mut r = self.coefficients.clone();
        for n in (m..r.len()).rev() {
            if F::is_zero(&r[n]) {
                continue;
            }

            let qq = self.field.mul(&r[n], &u);
            for (i, d) in div.coefficients.iter().enumerate() {
                self.field.sub_mul_assign(&mut r[n - m + i], &qq, d);
            }
            q.coefficients[n - m] = qq;
        }

        q.truncate();
        let mut r = Self::from_coefficients(&self.field, r, self.variable.clone());
        r.truncate();

        (q, r)
    }

    /// Compute the remainder `self % div`.
    pub fn rem(&self, div: &Self) -> Self {
        self.quot_rem(div).1
    }

    /// Divide `self` by `div` if there is no remainder.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        let (q, r) = self.quot_rem(div);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    /// Compute the univariate GCD using Euclid's algorithm. The result is monic.
    pub fn gcd(&self, b: &Self) -> Self {
        if self.is_zero() {
            return b.clone().make_monic();
        }
        if b.is_zero() {
            return self.clone().make_monic();
        }

        let mut c = self.clone();
        let mut d = b.clone();
        if self.degree() < b.degree() {
            std::mem::swap(&mut c, &mut d);
        }

        let mut r = c.rem(&d);
        while !r.is_zero() {
            c = d;
            d = r.make_monic();
            r = c.rem(&d);
        }

        d.make_monic()
    }

    /// Compute `(g, s, t)` with `s * self + t * other = g`, where `g` is the monic gcd,
    /// using the extended Euclidean algorithm.
    pub fn eea(&self, other: &Self) -> (Self, Self, Self) {
        if other.is_zero() {
            if self.is_zero() {
                return (self.clone(), self.zero(), self.zero());
            }
            let inv = self.field.inv(&self.lcoeff());
            return (self.clone().make_monic(), self.constant(inv), self.zero());
        }
        if self.is_zero() {
            let inv = self.field.inv(&other.lcoeff());
            return (other.clone().make_monic(), self.zero(), self.constant(inv));
        }

        let mut r0 = self.clone().make_monic();
        let mut r1 = other.clone().make_monic();
        let mut s0 = self.constant(self.field.inv(&self.lcoeff()));
        let mut s1 = self.zero();
        let mut t0 = self.zero();
        let mut t1 = self.constant(self.field.inv(&other.lcoeff()));

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem(&r1);
            if r.is_zero() {
                return (r1, s1, t1);
            }

            let a = self.field.inv(&r.lcoeff());
            (r1, r0) = (r.mul_coeff(&a), r1);
            (s1, s0) = ((&s0 - &(&q * &s1)).mul_coeff(&a), s1);
            (t1, t0) = ((&t0 - &(&q * &t1)).mul_coeff(&a), t1);
        }

        (r0, s0, t0)
    }

    /// Compute `self^n % m`.
    pub fn exp_mod(&self, n: &Integer, m: &Self) -> Self {
        let mut b = self.rem(m);
        let mut x = m.one().rem(m);

        let bits = n.significant_bits();
        for i in 0..bits {
            if n.get_bit(i) {
                x = (&x * &b).rem(m);
            }
            if i + 1 < bits {
                b = (&b * &b).rem(m);
            }
        }

        x
    }
}

impl<F: Ring> PartialEq for UnivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.coefficients == other.coefficients
    }
}

impl<F: Ring> Eq for UnivariatePolynomial<F> {}

impl<F: Ring> std::hash::Hash for UnivariatePolynomial<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
    }
}

impl<F: Ring> InternalOrdering for UnivariatePolynomial<F> {
    fn internal_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.coefficients.internal_cmp(&other.coefficients)
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        let (mut long, short) = if self.coefficients.len() >= other.coefficients.len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };

        for (a, b) in long.coefficients.iter_mut().zip(&short.coefficients) {
            long.field.add_assign(a, b);
        }

        long.truncate();
        long
    }
}

impl<'a, F: Ring> Add<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        &self + other
    }
}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        self + &other.clone().neg()
    }
}

impl<'a, F: Ring> Sub<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        &self + &other.clone().neg()
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        &self + &other.neg()
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        let mut res = self.zero();
        res.coefficients =
            vec![self.field.zero(); self.coefficients.len() + rhs.coefficients.len() - 1];

        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in rhs.coefficients.iter().enumerate() {
                if !F::is_zero(c2) {
                    self.field
                        .add_mul_assign(&mut res.coefficients[e1 + e2], c1, c2);
                }
            }
        }

        res.truncate();
        res
    }
}

impl<'a, F: Ring> Mul<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: Ring> Mul for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        (&self) * &rhs
    }
}

impl<'a, 'b, F: Field> Div<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn div(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        self.divides(other)
            .unwrap_or_else(|| panic!("No clean division of {} by {}", self, other))
    }
}

impl<'a, F: Field> Div<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn div(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self).div(other)
    }
}
