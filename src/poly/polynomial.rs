use std::cmp::Ordering;
use std::fmt::{Display, Write};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use ahash::HashSet;
use smallvec::SmallVec;

use crate::domains::{EuclideanDomain, Field, InternalOrdering, Ring};
use crate::error::InvalidDomainError;

use super::univariate::UnivariatePolynomial;
use super::{Exponent, LexOrder, MonomialOrder, Variable, INLINED_EXPONENTS};

/// A polynomial ring: a coefficient field, an ordered list of variables and
/// a monomial order `O` that is fixed at the type level.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PolynomialRing<F: Ring, E: Exponent = u16, O: MonomialOrder = LexOrder> {
    field: F,
    variables: Arc<Vec<Variable>>,
    _phantom: PhantomData<(E, O)>,
}

impl<F: Ring, E: Exponent, O: MonomialOrder> PolynomialRing<F, E, O> {
    /// Create a polynomial ring over `field` in the variables `names`.
    /// The first variable is the largest in the monomial order.
    pub fn new(field: F, names: &[&str]) -> Result<PolynomialRing<F, E, O>, InvalidDomainError> {
        if names.is_empty() {
            return Err(InvalidDomainError::NoVariables);
        }

        let mut seen = HashSet::default();
        for n in names {
            if !seen.insert(*n) {
                return Err(InvalidDomainError::DuplicateVariable(n.to_string()));
            }
        }

        Ok(PolynomialRing {
            field,
            variables: Arc::new(names.iter().map(|n| Variable::new(n)).collect()),
            _phantom: PhantomData,
        })
    }

    /// Create a ring with a variable list that is known to be valid.
    pub(crate) fn from_variables(field: F, variables: Arc<Vec<Variable>>) -> Self {
        PolynomialRing {
            field,
            variables,
            _phantom: PhantomData,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn variables(&self) -> &Arc<Vec<Variable>> {
        &self.variables
    }

    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Get the index of the variable with name `name`.
    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name() == name)
    }

    pub fn zero(&self) -> MultivariatePolynomial<F, E, O> {
        MultivariatePolynomial::new(&self.field, None, self.variables.clone())
    }

    pub fn one(&self) -> MultivariatePolynomial<F, E, O> {
        self.zero().one()
    }

    pub fn constant(&self, coeff: F::Element) -> MultivariatePolynomial<F, E, O> {
        self.zero().constant(coeff)
    }

    /// The polynomial `x_index`.
    pub fn variable(&self, index: usize) -> MultivariatePolynomial<F, E, O> {
        assert!(index < self.nvars(), "Variable index out of range");
        let mut exp = vec![E::zero(); self.nvars()];
        exp[index] = E::one();
        self.zero().monomial(self.field.one(), exp)
    }

    /// The generators `[1, x_1, ..., x_n]` of the ring.
    pub fn gens(&self) -> Vec<MultivariatePolynomial<F, E, O>> {
        let mut gens = Vec::with_capacity(self.nvars() + 1);
        gens.push(self.one());
        for i in 0..self.nvars() {
            gens.push(self.variable(i));
        }
        gens
    }

    /// Check if `poly` is an element of this ring.
    pub fn contains(&self, poly: &MultivariatePolynomial<F, E, O>) -> bool {
        poly.field == self.field && poly.variables == self.variables
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Display for PolynomialRing<F, E, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[", self.field)?;
        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            write!(f, "{}", v)?;
        }
        f.write_char(']')
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Ring for PolynomialRing<F, E, O> {
    type Element = MultivariatePolynomial<F, E, O>;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a + b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a - b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = &*a * b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a + &(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = &*a - &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.clone().neg()
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        PolynomialRing::zero(self)
    }

    #[inline]
    fn one(&self) -> Self::Element {
        PolynomialRing::one(self)
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        self.constant(self.field.nth(n))
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e as usize)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn characteristic(&self) -> u64 {
        self.field.characteristic()
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        self.constant(self.field.sample(rng, range))
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        in_product: bool,
        f: &mut W,
    ) -> Result<(), std::fmt::Error> {
        if in_product && element.nterms() > 1 {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

/// Multivariate polynomial with a sparse degree and variable dense representation.
#[derive(Clone)]
pub struct MultivariatePolynomial<F: Ring, E: Exponent = u16, O: MonomialOrder = LexOrder> {
    // Data format: the i-th monomial is stored as coefficients[i] and
    // exponents[i * nvars .. (i + 1) * nvars]. Terms are always expanded and sorted
    // ascending under the monomial order `O`, the last term is the leading term.
    pub coefficients: Vec<F::Element>,
    pub exponents: Vec<E>,
    pub field: F,
    pub variables: Arc<Vec<Variable>>,
    pub(crate) _phantom: PhantomData<O>,
}

impl<F: Ring, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable map and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variables: Arc<Vec<Variable>>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            exponents: Vec::with_capacity(cap.unwrap_or(0) * variables.len()),
            field: field.clone(),
            variables,
            _phantom: PhantomData,
        }
    }

    /// Constructs a zero polynomial, inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            field: self.field.clone(),
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    /// Constructs a zero polynomial with the given capacity,
    /// inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap),
            exponents: Vec::with_capacity(cap * self.nvars()),
            field: self.field.clone(),
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable map from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents: vec![E::zero(); self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable map from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        Self {
            coefficients: vec![self.field.one()],
            exponents: vec![E::zero(); self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponents: Vec<E>) -> Self {
        debug_assert!(self.nvars() == exponents.len());

        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents,
            field: self.field.clone(),
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.field.is_one(&self.coefficients[0])
            && self.exponents.iter().all(|x| x.is_zero())
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        if self.nterms() >= 2 {
            return false;
        }
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() || !self.exponents(0).iter().all(|e| e.is_zero()) {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[E] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    #[inline(always)]
    pub fn last_exponents(&self) -> &[E] {
        &self.exponents[(self.nterms() - 1) * self.nvars()..self.nterms() * self.nvars()]
    }

    /// Returns an iterator over the exponents of every monomial.
    #[inline]
    pub fn exponents_iter(&self) -> std::slice::Chunks<E> {
        self.exponents.chunks(self.nvars())
    }

    /// Returns an iterator over the mutable exponents of every monomial.
    #[inline]
    pub fn exponents_iter_mut(&mut self) -> std::slice::ChunksMut<E> {
        let nvars = self.nvars();
        self.exponents.chunks_mut(nvars)
    }

    /// Append a monomial to the back. It merges with the last monomial if the
    /// exponents are equal. The caller must guarantee that `exponents` is not
    /// smaller than the current last monomial.
    #[inline]
    pub fn append_monomial_back(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }

        let nterms = self.nterms();
        if nterms > 0 && exponents == self.last_exponents() {
            self.field
                .add_assign(&mut self.coefficients[nterms - 1], &coefficient);

            if F::is_zero(&self.coefficients[nterms - 1]) {
                self.coefficients.pop();
                self.exponents.truncate((nterms - 1) * self.nvars());
            }
        } else {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
        }
    }

    /// Appends a monomial to the polynomial, keeping the terms sorted.
    pub fn append_monomial(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }
        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // should we append to the back?
        if self.nterms() == 0 || O::cmp(self.last_exponents(), exponents).is_lt() {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
            return;
        }

        // binary search for the first monomial that is not smaller
        let mut l = 0;
        let mut r = self.nterms();
        while l < r {
            let m = (l + r) / 2;
            if O::cmp(self.exponents(m), exponents).is_lt() {
                l = m + 1;
            } else {
                r = m;
            }
        }

        if O::cmp(self.exponents(l), exponents).is_eq() {
            self.field
                .add_assign(&mut self.coefficients[l], &coefficient);
            if F::is_zero(&self.coefficients[l]) {
                self.coefficients.remove(l);
                let i = l * self.nvars();
                self.exponents.drain(i..i + self.nvars());
            }
            return;
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    /// Get the coefficient of the monomial with the given exponents.
    pub fn coefficient(&self, exponents: &[E]) -> Option<&F::Element> {
        let mut l = 0;
        let mut r = self.nterms();
        while l < r {
            let m = (l + r) / 2;
            match O::cmp(self.exponents(m), exponents) {
                Ordering::Less => l = m + 1,
                Ordering::Greater => r = m,
                Ordering::Equal => return Some(&self.coefficients[m]),
            }
        }
        None
    }

    /// Take the derivative of the polynomial w.r.t the variable `var`.
    pub fn derivative(&self, var: usize) -> Self {
        debug_assert!(var < self.nvars());

        let mut res = self.zero_with_capacity(self.nterms());

        let mut exp = vec![E::zero(); self.nvars()];
        for x in self {
            if x.exponents[var] > E::zero() {
                exp.copy_from_slice(x.exponents);
                let pow = exp[var].to_u32() as u64;
                exp[var] = exp[var] - E::one();
                res.append_monomial(self.field.mul(x.coefficient, &self.field.nth(pow)), &exp);
            }
        }

        res
    }

    /// Change the monomial order of the polynomial from `O` to `ON`.
    pub fn reorder<ON: MonomialOrder>(&self) -> MultivariatePolynomial<F, E, ON> {
        let mut sorted_index: Vec<_> = (0..self.nterms()).collect();
        sorted_index.sort_by(|a, b| ON::cmp(self.exponents(*a), self.exponents(*b)));

        let coefficients: Vec<_> = sorted_index
            .iter()
            .map(|i| self.coefficients[*i].clone())
            .collect();
        let exponents: Vec<_> = sorted_index
            .iter()
            .flat_map(|i| self.exponents(*i))
            .cloned()
            .collect();

        MultivariatePolynomial {
            coefficients,
            exponents,
            field: self.field.clone(),
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    /// Move the polynomial to a new list of variables, where the variable `i`
    /// becomes variable `map[i]`. Variables not in the image of `map` do not occur.
    pub fn remap_variables(&self, variables: Arc<Vec<Variable>>, map: &[usize]) -> Self {
        assert_eq!(map.len(), self.nvars());
        let nvars = variables.len();

        let mut terms: Vec<(SmallVec<[E; INLINED_EXPONENTS]>, &F::Element)> = self
            .into_iter()
            .map(|t| {
                let mut e: SmallVec<[E; INLINED_EXPONENTS]> = SmallVec::from_elem(E::zero(), nvars);
                for (old, new) in map.iter().enumerate() {
                    e[*new] = t.exponents[old];
                }
                (e, t.coefficient)
            })
            .collect();
        terms.sort_by(|a, b| O::cmp(&a.0, &b.0));

        let mut res = MultivariatePolynomial::new(&self.field, Some(terms.len()), variables);
        for (e, c) in terms {
            res.coefficients.push(c.clone());
            res.exponents.extend_from_slice(&e);
        }
        res
    }

    /// Multiply every coefficient with `other`.
    pub fn mul_coeff(mut self, other: F::Element) -> Self {
        for c in &mut self.coefficients {
            self.field.mul_assign(c, &other);
        }

        for i in (0..self.nterms()).rev() {
            if F::is_zero(&self.coefficients[i]) {
                self.coefficients.remove(i);
                self.exponents
                    .drain(i * self.nvars()..(i + 1) * self.nvars());
            }
        }

        self
    }

    /// Map a coefficient using the function `f`.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        field: U,
    ) -> MultivariatePolynomial<U, E, O> {
        let mut coefficients = Vec::with_capacity(self.coefficients.len());
        let mut exponents = Vec::with_capacity(self.exponents.len());

        for m in self.into_iter() {
            let nc = f(m.coefficient);
            if !U::is_zero(&nc) {
                coefficients.push(nc);
                exponents.extend(m.exponents);
            }
        }

        MultivariatePolynomial {
            coefficients,
            exponents,
            field,
            variables: self.variables.clone(),
            _phantom: PhantomData,
        }
    }

    /// Add `exponents` to every exponent.
    pub fn mul_exp(mut self, exponents: &[E]) -> Self {
        debug_assert_eq!(self.nvars(), exponents.len());

        if self.nvars() == 0 {
            return self;
        }

        for e in self.exponents_iter_mut() {
            for (e1, e2) in e.iter_mut().zip(exponents) {
                *e1 = e1.checked_add(e2).expect("overflow in adding exponents");
            }
        }

        self
    }

    #[inline]
    pub fn mul_monomial(self, coefficient: &F::Element, exponents: &[E]) -> Self {
        self.mul_coeff(coefficient.clone()).mul_exp(exponents)
    }

    /// The coefficient of the leading term. Panics on the zero polynomial.
    #[inline]
    pub fn max_coeff(&self) -> &F::Element {
        self.coefficients
            .last()
            .expect("Cannot get max coefficient of empty polynomial")
    }

    /// The exponents of the leading term. Panics on the zero polynomial.
    #[inline]
    pub fn max_exp(&self) -> &[E] {
        if self.coefficients.is_empty() {
            panic!("Cannot get max exponent of empty polynomial");
        }

        self.last_exponents()
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }
        self.max_coeff().clone()
    }

    /// Get the degree of the variable `x`.
    /// This operation is O(n).
    pub fn degree(&self, x: usize) -> E {
        if self.nvars() == 0 {
            return E::zero();
        }

        let mut max = E::zero();
        for e in self.exponents.iter().skip(x).step_by(self.nvars()) {
            if max < *e {
                max = *e;
            }
        }
        max
    }

    /// The total degree of the polynomial, or 0 for the zero polynomial.
    pub fn total_degree(&self) -> u32 {
        self.exponents_iter()
            .map(|e| e.iter().map(|x| x.to_u32()).sum::<u32>())
            .max()
            .unwrap_or(0)
    }

    /// The indices of the variables that occur in the polynomial.
    pub fn occurring_variables(&self) -> Vec<usize> {
        (0..self.nvars())
            .filter(|v| !self.degree(*v).is_zero())
            .collect()
    }

    /// If exactly one variable occurs, return its index.
    pub fn univariate_variable(&self) -> Option<usize> {
        let vars = self.occurring_variables();
        if vars.len() == 1 {
            Some(vars[0])
        } else {
            None
        }
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

    /// Write the polynomial as `sum_k c_k var^k` and return the dense list of `c_k`,
    /// which do not contain `var`.
    pub fn coefficients_in(&self, var: usize) -> Vec<Self> {
        let mut list = vec![self.zero(); self.degree(var).to_u32() as usize + 1];
        if self.is_zero() {
            return vec![];
        }

        let mut e = vec![E::zero(); self.nvars()];
        for t in self {
            e.copy_from_slice(t.exponents);
            let k = e[var].to_u32() as usize;
            e[var] = E::zero();
            list[k].append_monomial(t.coefficient.clone(), &e);
        }
        list
    }

    /// The coefficient of the highest power of `var`, as a polynomial without `var`.
    pub fn lcoeff_in(&self, var: usize) -> Self {
        let d = self.degree(var);
        let mut res = self.zero();
        let mut e = vec![E::zero(); self.nvars()];
        for t in self {
            if t.exponents[var] == d {
                e.copy_from_slice(t.exponents);
                e[var] = E::zero();
                res.append_monomial(t.coefficient.clone(), &e);
            }
        }
        res
    }

    /// The inverse of [Self::coefficients_in].
    pub fn from_coefficients_in(&self, list: &[Self], var: usize) -> Self {
        let mut res = self.zero();
        let mut e = vec![E::zero(); self.nvars()];
        for (k, c) in list.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            e[var] = E::from_u32(k as u32);
            res = &res + &c.clone().mul_exp(&e);
        }
        res
    }

    /// Convert a polynomial in which only `var` occurs to a dense univariate polynomial.
    pub fn to_univariate(&self, var: usize) -> UnivariatePolynomial<F> {
        let mut res = UnivariatePolynomial::new(
            &self.field,
            Some(self.degree(var).to_u32() as usize + 1),
            Arc::new(self.variables[var].clone()),
        );

        for t in self {
            debug_assert!(t
                .exponents
                .iter()
                .enumerate()
                .all(|(i, e)| i == var || e.is_zero()));
            res.add_coefficient(t.exponents[var].to_u32() as usize, t.coefficient);
        }

        res
    }

    /// Create a polynomial in the variables of `self` from a univariate polynomial in `var`.
    pub fn from_univariate(&self, poly: &UnivariatePolynomial<F>, var: usize) -> Self {
        let mut res = self.zero_with_capacity(poly.coefficients.len());
        let mut e = vec![E::zero(); self.nvars()];
        for (k, c) in poly.coefficients.iter().enumerate() {
            if !F::is_zero(c) {
                e[var] = E::from_u32(k as u32);
                res.append_monomial(c.clone(), &e);
            }
        }
        res
    }

    /// Substitute the polynomial `value` for the variable of the univariate polynomial `poly`.
    pub fn compose_univariate(poly: &UnivariatePolynomial<F>, value: &Self) -> Self {
        let mut res = value.zero();
        for c in poly.coefficients.iter().rev() {
            res = &(&res * value) + &value.constant(c.clone());
        }
        res
    }
}

impl<F: Field, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Divide every coefficient by `other`.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            self.field.div_assign(c, other);
        }
        self
    }

    /// Make the polynomial monic, i.e., make the leading coefficient `1` by
    /// multiplying all monomials with `1/lcoeff`.
    pub fn make_monic(self) -> Self {
        if self.is_zero() || self.field.is_one(self.max_coeff()) {
            return self;
        }

        let ci = self.field.inv(self.max_coeff());
        self.mul_coeff(ci)
    }

    /// Divide `self` by `div` if there is no remainder.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return Some(self.zero());
        }

        if div.is_constant() {
            return Some(self.clone().div_coeff(&div.coefficients[0]));
        }

        let mut quotient: Vec<(F::Element, Vec<E>)> = vec![];
        let mut r = self.clone();
        while !r.is_zero() {
            if r
                .max_exp()
                .iter()
                .zip(div.max_exp())
                .any(|(a, b)| a < b)
            {
                return None;
            }

            let e: Vec<E> = r
                .max_exp()
                .iter()
                .zip(div.max_exp())
                .map(|(a, b)| *a - *b)
                .collect();
            let c = self.field.div(r.max_coeff(), div.max_coeff());
            r = &r - &div.clone().mul_monomial(&c, &e);
            quotient.push((c, e));
        }

        let mut q = self.zero_with_capacity(quotient.len());
        for (c, e) in quotient.into_iter().rev() {
            q.coefficients.push(c);
            q.exponents.extend_from_slice(&e);
        }
        Some(q)
    }
}

impl<F: EuclideanDomain, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// The gcd of all coefficients, normalized as the coefficient domain does.
    pub fn content(&self) -> F::Element {
        let mut c = self.field.zero();
        for x in &self.coefficients {
            c = self.field.gcd(&c, x);
        }
        c
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> std::fmt::Debug for MultivariatePolynomial<F, E, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{{ {:?}, {:?} }}",
                monomial.coefficient, monomial.exponents
            )?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Display for MultivariatePolynomial<F, E, O> {
    /// Print the polynomial with the leading term first.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_char('0');
        }

        let minus_one = self.field.neg(&self.field.one());
        let mut coeff = String::new();
        for (i, t) in self.into_iter().rev().enumerate() {
            let is_constant = t.exponents.iter().all(|e| e.is_zero());

            coeff.clear();
            let mut wrote_coeff = true;
            if !is_constant && self.field.is_one(t.coefficient) {
                wrote_coeff = false;
            } else if !is_constant && *t.coefficient == minus_one {
                coeff.push('-');
                wrote_coeff = false;
            } else {
                self.field
                    .format(t.coefficient, !is_constant, &mut coeff)?;
            }

            if i > 0 && !coeff.starts_with('-') {
                f.write_char('+')?;
            }
            f.write_str(&coeff)?;

            let mut first_var = !wrote_coeff;
            for (v, e) in self.variables.iter().zip(t.exponents) {
                if e.is_zero() {
                    continue;
                }
                if !first_var {
                    f.write_char('*')?;
                }
                first_var = false;

                if e.to_u32() == 1 {
                    write!(f, "{}", v)?;
                } else {
                    write!(f, "{}^{}", v, e)?;
                }
            }
        }

        Ok(())
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> PartialEq for MultivariatePolynomial<F, E, O> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.nterms() != other.nterms() {
            return false;
        }
        self.variables == other.variables
            && self.exponents.eq(&other.exponents)
            && self.coefficients.eq(&other.coefficients)
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> std::hash::Hash for MultivariatePolynomial<F, E, O> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
        self.exponents.hash(state);
        self.variables.hash(state);
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Eq for MultivariatePolynomial<F, E, O> {}

impl<F: Ring, E: Exponent, O: MonomialOrder> InternalOrdering for MultivariatePolynomial<F, E, O> {
    /// An ordering of polynomials that has no intuitive meaning.
    fn internal_cmp(&self, other: &Self) -> Ordering {
        self.nterms()
            .cmp(&other.nterms())
            .then_with(|| {
                for (a, b) in self.exponents_iter().zip(other.exponents_iter()).rev() {
                    match O::cmp(a, b) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                }
                Ordering::Equal
            })
            .then_with(|| self.coefficients.internal_cmp(&other.coefficients))
    }
}

impl<'a, 'b, F: Ring, E: Exponent, O: MonomialOrder> Add<&'a MultivariatePolynomial<F, E, O>>
    for &'b MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn add(self, other: &MultivariatePolynomial<F, E, O>) -> Self::Output {
        debug_assert_eq!(self.field, other.field);
        debug_assert_eq!(self.variables, other.variables);

        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        // Merge the two polynomials, which are assumed to be already sorted.
        let mut res = self.zero_with_capacity(self.nterms() + other.nterms());
        let mut i = 0;
        let mut j = 0;

        while i < self.nterms() && j < other.nterms() {
            let c = O::cmp(self.exponents(i), other.exponents(j));
            match c {
                Ordering::Less => {
                    res.coefficients.push(self.coefficients[i].clone());
                    res.exponents.extend_from_slice(self.exponents(i));
                    i += 1;
                }
                Ordering::Greater => {
                    res.coefficients.push(other.coefficients[j].clone());
                    res.exponents.extend_from_slice(other.exponents(j));
                    j += 1;
                }
                Ordering::Equal => {
                    let coeff = self
                        .field
                        .add(&self.coefficients[i], &other.coefficients[j]);
                    if !F::is_zero(&coeff) {
                        res.coefficients.push(coeff);
                        res.exponents.extend_from_slice(self.exponents(i));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        while i < self.nterms() {
            res.coefficients.push(self.coefficients[i].clone());
            res.exponents.extend_from_slice(self.exponents(i));
            i += 1;
        }

        while j < other.nterms() {
            res.coefficients.push(other.coefficients[j].clone());
            res.exponents.extend_from_slice(other.exponents(j));
            j += 1;
        }

        res
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Add<&'a MultivariatePolynomial<F, E, O>>
    for MultivariatePolynomial<F, E, O>
{
    type Output = Self;

    fn add(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        &self + other
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Add for MultivariatePolynomial<F, E, O> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl<'a, 'b, F: Ring, E: Exponent, O: MonomialOrder> Sub<&'a MultivariatePolynomial<F, E, O>>
    for &'b MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn sub(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        self + &other.clone().neg()
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Sub<&'a MultivariatePolynomial<F, E, O>>
    for MultivariatePolynomial<F, E, O>
{
    type Output = Self;

    fn sub(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        &self + &other.clone().neg()
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Sub for MultivariatePolynomial<F, E, O> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        &self + &other.neg()
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Neg for MultivariatePolynomial<F, E, O> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        // Negate coefficients of all terms.
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Neg for &'a MultivariatePolynomial<F, E, O> {
    type Output = MultivariatePolynomial<F, E, O>;
    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}

impl<'a, 'b, F: Ring, E: Exponent, O: MonomialOrder> Mul<&'a MultivariatePolynomial<F, E, O>>
    for &'b MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    /// Multiply two polynomials by collecting all products of terms
    /// and sorting them under the monomial order.
    fn mul(self, rhs: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        debug_assert_eq!(self.variables, rhs.variables);

        if self.nterms() == 0 || rhs.nterms() == 0 {
            return self.zero();
        }

        if self.nterms() == 1 {
            return rhs
                .clone()
                .mul_monomial(&self.coefficients[0], &self.exponents);
        }

        if rhs.nterms() == 1 {
            return self
                .clone()
                .mul_monomial(&rhs.coefficients[0], &rhs.exponents);
        }

        let mut products: Vec<(SmallVec<[E; INLINED_EXPONENTS]>, F::Element)> =
            Vec::with_capacity(self.nterms() * rhs.nterms());
        for a in self {
            for b in rhs {
                let e = a
                    .exponents
                    .iter()
                    .zip(b.exponents)
                    .map(|(x, y)| x.checked_add(y).expect("overflow in adding exponents"))
                    .collect();
                products.push((e, self.field.mul(a.coefficient, b.coefficient)));
            }
        }
        products.sort_by(|a, b| O::cmp(&a.0, &b.0));

        let mut res = self.zero_with_capacity(products.len());
        for (e, c) in products {
            res.append_monomial_back(c, &e);
        }
        res
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Mul<&'a MultivariatePolynomial<F, E, O>>
    for MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    #[inline]
    fn mul(self, rhs: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: Ring, E: Exponent, O: MonomialOrder> Mul for MultivariatePolynomial<F, E, O> {
    type Output = MultivariatePolynomial<F, E, O>;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        (&self) * &rhs
    }
}

impl<'a, 'b, F: Field, E: Exponent, O: MonomialOrder> Div<&'a MultivariatePolynomial<F, E, O>>
    for &'b MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn div(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        self.divides(other)
            .unwrap_or_else(|| panic!("No clean division of {} by {}", self, other))
    }
}

impl<'a, F: Field, E: Exponent, O: MonomialOrder> Div<&'a MultivariatePolynomial<F, E, O>>
    for MultivariatePolynomial<F, E, O>
{
    type Output = MultivariatePolynomial<F, E, O>;

    fn div(self, other: &'a MultivariatePolynomial<F, E, O>) -> Self::Output {
        (&self).div(other)
    }
}

/// View object for a term in a multivariate polynomial.
pub struct MonomialView<'a, F: 'a + Ring, E: 'a + Exponent> {
    pub coefficient: &'a F::Element,
    pub exponents: &'a [E],
}

/// Iterator over terms in a multivariate polynomial.
pub struct MonomialViewIterator<'a, F: Ring, E: Exponent, O: MonomialOrder> {
    poly: &'a MultivariatePolynomial<F, E, O>,
    index: usize,
    back: usize,
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> Iterator for MonomialViewIterator<'a, F, E, O> {
    type Item = MonomialView<'a, F, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.back {
            None
        } else {
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: self.poly.exponents(self.index),
            };
            self.index += 1;
            Some(view)
        }
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> DoubleEndedIterator
    for MonomialViewIterator<'a, F, E, O>
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.back {
            None
        } else {
            self.back -= 1;
            Some(MonomialView {
                coefficient: &self.poly.coefficients[self.back],
                exponents: self.poly.exponents(self.back),
            })
        }
    }
}

impl<'a, F: Ring, E: Exponent, O: MonomialOrder> IntoIterator
    for &'a MultivariatePolynomial<F, E, O>
{
    type Item = MonomialView<'a, F, E>;
    type IntoIter = MonomialViewIterator<'a, F, E, O>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            poly: self,
            index: 0,
            back: self.nterms(),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::FiniteField;
    use crate::domains::rational::Q;
    use crate::domains::Ring;
    use crate::error::InvalidDomainError;
    use crate::poly::{GrevLexOrder, LexOrder};

    use super::PolynomialRing;

    #[test]
    fn ring_construction() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y", "x"]);
        assert_eq!(
            r,
            Err(InvalidDomainError::DuplicateVariable("x".to_string()))
        );
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &[]);
        assert_eq!(r, Err(InvalidDomainError::NoVariables));

        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let gens = r.gens();
        assert_eq!(gens.len(), 3);
        assert!(gens[0].is_one());
        assert_eq!(format!("{}", gens[2]), "y");
        assert_eq!(format!("{}", r), "Q[x,y]");
    }

    #[test]
    fn arithmetic() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [_, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let a = &(&x + &y) * &(&x - &y);
        let b = &(&x * &x) - &(&y * &y);
        assert_eq!(a, b);
        assert_eq!((&x + &y).pow(3).nterms(), 4);
        assert_eq!(&a / &(&x + &y), &x - &y);
        assert!(a.divides(&(&x + &r.one())).is_none());
        assert!((&x - &x).is_zero());
    }

    #[test]
    fn printing() {
        let f = FiniteField::new(5).unwrap();
        let r = PolynomialRing::<_, u16, LexOrder>::new(f, &["x", "y"]).unwrap();
        let [_, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let p = &(&(&x * &x) - &(&y * &r.constant(f.to_element(2)))) - &r.one();
        assert_eq!(format!("{}", p), "x^2+3*y+4");

        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [_, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let p = &(&(&x * &y) - &x) + &r.constant(Q.to_element(1, 2));
        assert_eq!(format!("{}", p), "x*y-x+1/2");
        assert_eq!(format!("{}", r.printer(&p).in_product()), "(x*y-x+1/2)");
    }

    #[test]
    fn grevlex_leading_term() {
        let r = PolynomialRing::<_, u16, GrevLexOrder>::new(Q, &["x", "y"]).unwrap();
        let [_, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let p = &(&y * &y) + &x;
        assert_eq!(p.max_exp(), &[0, 2]);

        let lex = p.reorder::<LexOrder>();
        assert_eq!(lex.max_exp(), &[1, 0]);
    }

    #[test]
    fn recursive_view() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let p = &(&(&x * &x) * &y) + &(&y + &one);
        let list = p.coefficients_in(0);
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], &y + &one);
        assert!(list[1].is_zero());
        assert_eq!(list[2], y);
        assert_eq!(p.from_coefficients_in(&list, 0), p);
        assert_eq!(p.lcoeff_in(0), y);
    }
}
