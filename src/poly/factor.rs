//! Square-free factorization and factorization into irreducibles.
//!
//! Univariate polynomials are factored over prime fields by distinct and equal degree
//! factorization, over the rationals by Hensel lifting a modular factorization
//! (Zassenhaus), over the Gaussian rationals through the factors of the norm (Trager),
//! and over rational function fields by clearing denominators and factoring in the
//! polynomial ring over the base field. Multivariate polynomials are reduced to the
//! univariate case by a Kronecker substitution.
use std::sync::Arc;

use ahash::HashMap;
use rand::RngCore;
use rug::Integer;
use tracing::debug;

use crate::combinatorics::CombinationIterator;
use crate::domains::complex_rational::{ComplexRational, ComplexRationalField};
use crate::domains::finite_field::{FiniteField, FiniteFieldElement};
use crate::domains::integer::{mod_inverse, symmetric_mod, IntegerRing, Z};
use crate::domains::rational::{Rational, RationalField};
use crate::domains::rational_function::RationalFunctionField;
use crate::domains::{FrobeniusRoot, Ring};

use super::polynomial::MultivariatePolynomial;
use super::univariate::UnivariatePolynomial;
use super::{Exponent, LexOrder, MonomialOrder, Variable};

/// Primes for the modular images of integer polynomials are searched downwards from `2^31`.
const MODULAR_PRIME_START: u64 = (1 << 31) + 1;

/// The largest degree of a Kronecker image. Polynomials with a larger image are
/// not factored.
const KRONECKER_DEGREE_LIMIT: usize = 1 << 14;

/// Coefficient fields over which univariate polynomials can be factored into irreducibles.
pub trait Factorizable: FrobeniusRoot {
    /// Factor a univariate polynomial without repeated factors into monic
    /// irreducible factors. Constants have no factors.
    fn factor_square_free(
        &self,
        poly: &UnivariatePolynomial<Self>,
        rng: &mut impl RngCore,
    ) -> Vec<UnivariatePolynomial<Self>>;
}

impl Factorizable for FiniteField {
    fn factor_square_free(
        &self,
        poly: &UnivariatePolynomial<Self>,
        rng: &mut impl RngCore,
    ) -> Vec<UnivariatePolynomial<Self>> {
        let mut factors = vec![];
        for (d, f) in poly.distinct_degree_factorization() {
            debug!("DDF {} {}", f, d);
            factors.extend(f.equal_degree_factorization(d, rng));
        }
        factors
    }
}

impl Factorizable for RationalField {
    fn factor_square_free(
        &self,
        poly: &UnivariatePolynomial<Self>,
        rng: &mut impl RngCore,
    ) -> Vec<UnivariatePolynomial<Self>> {
        if poly.is_constant() {
            return vec![];
        }

        // clear denominators
        let mut den = Integer::from(1);
        for c in &poly.coefficients {
            den.lcm_mut(c.denom());
        }
        let integer = poly
            .map_coeff(
                |c| Integer::from(c.numer() * &Integer::from(&den / c.denom())),
                Z,
            )
            .primitive_part();

        integer
            .factor_reconstruct(rng)
            .into_iter()
            .map(|f| f.map_coeff(|c| Rational::from(c.clone()), *self).make_monic())
            .collect()
    }
}

impl Factorizable for ComplexRationalField {
    /// Find a shift `s` such that the norm `N(x) = g(x) * conj(g)(x)` of
    /// `g(x) = f(x - s*i)` is square-free. Every irreducible factor `n` of `N` over
    /// the rationals yields the irreducible factor `gcd(g, n)(x + s*i)` of `f`.
    fn factor_square_free(
        &self,
        poly: &UnivariatePolynomial<Self>,
        rng: &mut impl RngCore,
    ) -> Vec<UnivariatePolynomial<Self>> {
        let f = poly.clone().make_monic();
        if f.is_constant() {
            return vec![];
        }
        if f.degree() == 1 {
            return vec![f];
        }

        let x = f.monomial(self.one(), 1);
        let mut s = 0;
        loop {
            let shift = f.constant(ComplexRational::new(Rational::new(), Rational::from(s)));
            let g = f.compose(&(&x - &shift));
            let conj = g.map_coeff(|c| c.conj(), *self);
            let norm = (&g * &conj).map_coeff(|c| c.re.clone(), RationalField::new());

            if norm.gcd(&norm.derivative()).is_one() {
                debug!("Norm {} for the shift {}", norm, s);
                let back = &x + &shift;
                return RationalField::new()
                    .factor_square_free(&norm, rng)
                    .into_iter()
                    .map(|n| {
                        let n = n.map_coeff(|c| ComplexRational::from_real(c.clone()), *self);
                        g.gcd(&n).compose(&back).make_monic()
                    })
                    .collect();
            }

            s += 1;
        }
    }
}

impl<F: Factorizable> Factorizable for RationalFunctionField<F> {
    /// Clear the denominators and factor in `F[c_1, ..., c_k, x]`. By Gauss's lemma the
    /// factors of positive degree in `x` are the irreducible factors over `F(c)`.
    fn factor_square_free(
        &self,
        poly: &UnivariatePolynomial<Self>,
        rng: &mut impl RngCore,
    ) -> Vec<UnivariatePolynomial<Self>> {
        let f = poly.clone().make_monic();
        if f.is_constant() {
            return vec![];
        }
        if f.degree() == 1 {
            return vec![f];
        }

        let Ok(degree) = u32::try_from(f.degree()) else {
            debug!("Degree of {} exceeds the exponent range", f);
            return vec![f];
        };

        let k = self.parameters().len();
        let variables: Arc<Vec<Variable>> = Arc::new(
            self.parameters()
                .iter()
                .cloned()
                .chain(std::iter::once((*f.variable).clone()))
                .collect(),
        );

        let mut den = self.polynomial_ring().one();
        for c in &f.coefficients {
            den = MultivariatePolynomial::lcm(&den, &c.denominator);
        }

        let mut cleared: MultivariatePolynomial<F, u32, LexOrder> =
            MultivariatePolynomial::new(self.base_field(), None, variables);
        let mut e = vec![0; k + 1];
        for (d, c) in f.coefficients.iter().enumerate() {
            if c.is_zero() {
                continue;
            }

            e[k] = d as u32;
            let num = &c.numerator * &(&den / &c.denominator);
            for t in &num {
                e[..k].copy_from_slice(t.exponents);
                cleared.append_monomial(t.coefficient.clone(), &e);
            }
        }
        debug_assert_eq!(cleared.degree(k), degree);

        let params = self.polynomial_ring();
        let mut factors = vec![];
        for (g, _) in cleared.factor(rng) {
            if g.degree(k) == 0 {
                continue;
            }

            let mut coeffs = vec![params.zero(); g.degree(k) as usize + 1];
            for t in &g {
                coeffs[t.exponents[k] as usize].append_monomial(t.coefficient.clone(), &t.exponents[..k]);
            }

            let coeffs = coeffs.into_iter().map(|c| self.from_polynomial(c)).collect();
            factors.push(
                UnivariatePolynomial::from_coefficients(self, coeffs, f.variable.clone()).make_monic(),
            );
        }
        factors
    }
}

impl<F: FrobeniusRoot, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Compute `g` such that `g^p = self`, where `p` is the characteristic.
    /// Returns `None` if the characteristic is zero, if an exponent is not divisible
    /// by `p` or if a coefficient has no `p`-th root in the field.
    pub fn frobenius_root(&self) -> Option<Self> {
        let p = self.field.characteristic();
        if p == 0 {
            return None;
        }

        let mut res = self.zero_with_capacity(self.nterms());
        for t in self {
            for e in t.exponents {
                if e.to_u32() as u64 % p != 0 {
                    return None;
                }
            }

            res.coefficients.push(self.field.frobenius_root(t.coefficient)?);
            res.exponents.extend(
                t.exponents
                    .iter()
                    .map(|e| E::from_u32((e.to_u32() as u64 / p) as u32)),
            );
        }

        // the map e -> e/p is monotone, so the terms remain sorted
        Some(res)
    }

    /// Perform a square-free factorization.
    /// The output is `a_1^e1*...*a_n^e_n`, where each `a_i` is monic and
    /// relatively prime to the others, and possibly a constant with power 1.
    ///
    /// In positive characteristic, a polynomial in `p`-th powers of the variables
    /// whose coefficients have no `p`-th root is kept in the form `g(x^p)`.
    pub fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![(self.clone(), 1)];
        }

        let c = self.lcoeff();
        let stripped = self.clone().make_monic();

        let mut factors = stripped.square_free_factorization_bernardin();

        if factors.is_empty() || !self.field.is_one(&c) {
            factors.push((self.constant(c), 1))
        }

        factors
    }

    /// The product of the distinct monic square-free factors.
    pub fn square_free_part(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let mut res = self.one();
        for (f, _) in self.square_free_factorization() {
            if !f.is_constant() {
                res = &res * &f;
            }
        }
        res
    }

    /// Bernardin's algorithm for square free factorization.
    fn square_free_factorization_bernardin(&self) -> Vec<(Self, usize)> {
        if self.is_constant() {
            if self.is_one() {
                return vec![];
            } else {
                return vec![(self.clone(), 1)];
            }
        }

        let p = self.field.characteristic() as usize;
        let cap = if p == 0 { usize::MAX } else { p };

        let mut f = self.clone();

        let mut h: HashMap<usize, Self> = HashMap::default();
        let mut hr;
        for var in 0..self.nvars() {
            if f.degree(var) > E::zero() {
                (f, hr) = f.square_free_factorization_yun(var, cap);

                for (part, pow) in hr {
                    h.entry(pow)
                        .and_modify(|f| {
                            *f = &*f * &part;
                        })
                        .or_insert(part);
                }
            }
        }

        let mut factors = vec![];
        if !f.is_constant() {
            // every partial derivative of f vanishes, so all exponents are divisible by p
            debug_assert!((0..f.nvars()).all(|v| f.derivative(v).is_zero()));

            let sub_factors = match f.frobenius_root() {
                Some(b) => b
                    .square_free_factorization_bernardin()
                    .into_iter()
                    .map(|(k, n)| (k, n * p))
                    .collect(),
                None => {
                    debug!("No p-th root of {}, decomposing it as g(x^p)", f);
                    f.inflated_square_free_factorization(p)
                }
            };

            for (mut k, n) in sub_factors {
                if k.is_constant() {
                    continue;
                }

                for (powh, hi) in &mut h {
                    if *powh < p {
                        let g = MultivariatePolynomial::gcd(&k, hi);
                        if !g.is_constant() {
                            k = k / &g;
                            *hi = &*hi / &g;
                            factors.push((g, n + *powh));
                        }
                    }
                }

                if !k.is_constant() {
                    factors.push((k, n));
                }
            }
        }

        for (powh, hi) in h {
            if !hi.is_constant() {
                factors.push((hi, powh));
            }
        }

        factors.sort_by(|a, b| a.1.cmp(&b.1));
        factors
    }

    /// Square-free factorization of `f = g(x_1^p, ..., x_n^p)` when `f` is
    /// not a `p`-th power: factor `g` and substitute back.
    fn inflated_square_free_factorization(&self, p: usize) -> Vec<(Self, usize)> {
        let mut g = self.clone();
        for e in g.exponents.iter_mut() {
            *e = E::from_u32(e.to_u32() / p as u32);
        }

        let mut factors = vec![];
        for (k, n) in g.square_free_factorization_bernardin() {
            let mut lifted = k;
            for e in lifted.exponents.iter_mut() {
                *e = E::from_u32(e.to_u32() * p as u32);
            }

            match lifted.frobenius_root() {
                Some(r) => {
                    for (rk, rn) in r.square_free_factorization_bernardin() {
                        factors.push((rk, rn * p * n));
                    }
                }
                None => factors.push((lifted, n)),
            }
        }
        factors
    }

    /// A modified version of Yun's square free factorization algorithm,
    /// that extracts the factors of multiplicity below `cap`.
    /// Returns the remaining part, which has a vanishing derivative in `var`.
    fn square_free_factorization_yun(&self, var: usize, cap: usize) -> (Self, Vec<(Self, usize)>) {
        let b = self.derivative(var);
        if b.is_zero() {
            return (self.clone(), vec![]);
        }

        let mut c = MultivariatePolynomial::gcd(self, &b);
        let mut w = self / &c;
        let mut v = &b / &c;

        let mut factors = vec![];

        let mut i = 1;
        while !w.is_constant() && i < cap {
            let z = v - w.derivative(var);
            let g = MultivariatePolynomial::gcd(&w, &z);
            w = w / &g;
            v = z / &g;
            c = c / &w;

            if !g.is_one() {
                factors.push((g, i));
            }
            i += 1
        }

        (c, factors)
    }
}

impl<F: Factorizable, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Factor the polynomial into monic irreducible factors with their multiplicities.
    /// The leading coefficient is not part of the output.
    pub fn factor(&self, rng: &mut impl RngCore) -> Vec<(Self, usize)> {
        let mut factors = vec![];
        for (f, n) in self.square_free_factorization() {
            if f.is_constant() {
                continue;
            }

            match f.univariate_variable() {
                Some(var) => {
                    let uf = f.to_univariate(var);
                    for irr in self.field.factor_square_free(&uf, rng) {
                        factors.push((self.from_univariate(&irr, var), n));
                    }
                }
                None => {
                    for g in f.factor_kronecker(rng) {
                        factors.push((g, n));
                    }
                }
            }
        }

        factors
    }

    /// Factor a polynomial in which a single variable occurs into monic irreducible factors.
    /// Returns `None` if more than one variable occurs.
    pub fn factor_univariate(&self, rng: &mut impl RngCore) -> Option<Vec<(Self, usize)>> {
        self.univariate_variable()?;
        Some(self.factor(rng))
    }

    /// Factor a polynomial without repeated factors in two or more variables with the
    /// Kronecker substitution `x_j -> t^(B^j)`, where `B` exceeds every partial degree.
    /// The substitution is injective on the divisors of `self`, so every factor is the
    /// preimage of a product of irreducible factors of the univariate image.
    fn factor_kronecker(&self, rng: &mut impl RngCore) -> Vec<Self> {
        let vars = self.occurring_variables();
        let base = vars
            .iter()
            .map(|v| self.degree(*v).to_u32() as usize + 1)
            .max()
            .unwrap_or(1);

        let mut powers = Vec::with_capacity(vars.len());
        let mut acc: usize = 1;
        for _ in &vars {
            powers.push(acc);
            match acc.checked_mul(base) {
                Some(next) if next <= KRONECKER_DEGREE_LIMIT => acc = next,
                _ => {
                    debug!("Kronecker image of {} exceeds the degree limit", self);
                    return vec![self.clone().make_monic()];
                }
            }
        }

        let mut image = UnivariatePolynomial::new(&self.field, None, Arc::new(Variable::new("t")));
        for t in self {
            let k = vars
                .iter()
                .zip(&powers)
                .map(|(v, p)| t.exponents[*v].to_u32() as usize * p)
                .sum();
            image.add_coefficient(k, t.coefficient);
        }

        let mut parts = vec![];
        for (g, n) in image.factor(rng) {
            for _ in 0..n {
                parts.push(g.clone());
            }
        }
        debug!("Kronecker image of {} has {} factors", self, parts.len());

        let mut rest = self.clone().make_monic();
        let mut factors = vec![];
        let mut s = 1;
        'len: while 2 * s <= parts.len() {
            let mut subsets = CombinationIterator::new(parts.len(), s);
            while let Some(cs) = subsets.next() {
                let mut g = image.one();
                for i in cs {
                    g = &g * &parts[*i];
                }

                let candidate = self.from_kronecker(&g, &vars, base);
                if candidate.is_constant() {
                    continue;
                }

                if let Some(q) = rest.divides(&candidate) {
                    factors.push(candidate.make_monic());
                    for i in cs.to_vec().into_iter().rev() {
                        parts.remove(i);
                    }
                    rest = q;
                    continue 'len;
                }
            }

            s += 1;
        }

        if !rest.is_constant() {
            factors.push(rest.make_monic());
        }
        factors
    }

    /// Map `t^k` to the monomial whose exponents in `vars` are the base `base` digits of `k`.
    fn from_kronecker(&self, g: &UnivariatePolynomial<F>, vars: &[usize], base: usize) -> Self {
        let mut res = self.zero();
        let mut e = vec![E::zero(); self.nvars()];
        for (k, c) in g.coefficients.iter().enumerate() {
            if F::is_zero(c) {
                continue;
            }

            let mut k = k;
            for v in vars {
                // digits are below `base`, which fits in the exponent type
                e[*v] = E::from_u32((k % base) as u32);
                k /= base;
            }
            res.append_monomial(c.clone(), &e);
        }
        res
    }
}

impl<F: Factorizable> UnivariatePolynomial<F> {
    /// Factor the polynomial into monic irreducible factors with their multiplicities.
    pub fn factor(&self, rng: &mut impl RngCore) -> Vec<(Self, usize)> {
        let lift: MultivariatePolynomial<F, u32, LexOrder> = MultivariatePolynomial::new(
            &self.field,
            None,
            Arc::new(vec![(*self.variable).clone()]),
        );

        lift.from_univariate(self, 0)
            .factor(rng)
            .into_iter()
            .map(|(f, n)| {
                let mut u = f.to_univariate(0);
                u.variable = self.variable.clone();
                (u, n)
            })
            .collect()
    }
}

fn residue(a: &Integer, field: &FiniteField) -> FiniteFieldElement {
    let p = Integer::from(field.get_prime());
    field.to_element(a.clone().div_rem_euc(p).1.to_u64_wrapping())
}

impl UnivariatePolynomial<IntegerRing> {
    /// The gcd of the coefficients.
    pub fn content(&self) -> Integer {
        let mut c = Integer::new();
        for x in &self.coefficients {
            c.gcd_mut(x);
        }
        c
    }

    /// Divide by the content and make the leading coefficient positive.
    pub fn primitive_part(self) -> Self {
        let mut c = self.content();
        if c.cmp0().is_eq() {
            return self;
        }
        if self.lcoeff().cmp0().is_lt() {
            c = -c;
        }
        if c == 1 {
            return self;
        }

        self.map_coeff(|x| Integer::from(x / &c), Z)
    }

    /// Divide by `div` if the quotient has integer coefficients and there is no remainder.
    pub fn exact_quotient(&self, div: &Self) -> Option<Self> {
        if div.is_zero() {
            panic!("Cannot divide by 0");
        }
        if self.is_zero() {
            return Some(self.zero());
        }
        if self.degree() < div.degree() {
            return None;
        }

        let m = div.degree();
        let l = div.lcoeff();
        let mut r = self.coefficients.clone();
        let mut q = vec![Integer::new(); self.degree() - m + 1];
        for n in (m..r.len()).rev() {
            if r[n].cmp0().is_eq() {
                continue;
            }

            let (qq, rem) = r[n].clone().div_rem(l.clone());
            if rem.cmp0().is_ne() {
                return None;
            }

            for (i, d) in div.coefficients.iter().enumerate() {
                r[n - m + i] -= Integer::from(&qq * d);
            }
            q[n - m] = qq;
        }

        if r.iter().any(|c| c.cmp0().is_ne()) {
            return None;
        }

        Some(Self::from_coefficients(&Z, q, self.variable.clone()))
    }

    fn to_finite_field(&self, field: &FiniteField) -> UnivariatePolynomial<FiniteField> {
        self.map_coeff(|c| residue(c, field), *field)
    }

    /// Make the polynomial monic modulo `m`, with symmetric coefficients.
    fn monic_mod(self, m: &Integer) -> Self {
        if self.lcoeff() == 1 {
            return self;
        }

        match mod_inverse(&self.lcoeff(), m) {
            Some(inv) => self.map_coeff(|c| symmetric_mod(&Integer::from(c * &inv), m), Z),
            None => self,
        }
    }

    /// Hensel lift a solution of `self = lc * u * w mod p` to `self = lc * u * w mod p^k`
    /// with `p^k > max_p`.
    ///
    /// If the lifting is successful, i.e. the error is 0 at some stage,
    /// it will return `Ok((u,w))` where `u` and `w` are the true factors over
    /// the integers. If a true factorization is not possible, it returns
    /// `Err((u,w))` where `u` and `w` are monic modulo `p^k`.
    fn hensel_lift(
        &self,
        u: UnivariatePolynomial<FiniteField>,
        w: UnivariatePolynomial<FiniteField>,
        max_p: &Integer,
    ) -> Result<(Self, Self), (Self, Self)> {
        let field = u.field;
        let p = Integer::from(field.get_prime());

        let lcoeff = self.lcoeff();
        let mut gamma = lcoeff.clone();
        let lcoeff_p = residue(&lcoeff, &field);

        let a = self.clone().mul_coeff(&gamma);
        let u = u.make_monic().mul_coeff(&lcoeff_p);
        let w = w.make_monic().mul_coeff(&lcoeff_p);

        let (_, s, t) = u.eea(&w);
        debug_assert!((&(&s * &u) + &(&t * &w)).is_one());

        let sym_map = |e: &FiniteFieldElement| Integer::from(field.to_symmetric_i64(e));

        let mut u_i = u.map_coeff(sym_map, Z);
        let mut w_i = w.map_coeff(sym_map, Z);

        // only replace the leading coefficient
        if let Some(c) = u_i.coefficients.last_mut() {
            *c = gamma.clone();
        }
        if let Some(c) = w_i.coefficients.last_mut() {
            *c = lcoeff.clone();
        }

        let mut e = &a - &(&u_i * &w_i);
        let mut m = p.clone();

        while !e.is_zero() && m <= *max_p {
            let e_p = e
                .map_coeff(|c| Integer::from(c / &m), Z)
                .to_finite_field(&field);
            let (q, r) = (&e_p * &s).quot_rem(&w);
            let tau = &(&e_p * &t) + &(&q * &u);

            u_i = &u_i + &tau.map_coeff(sym_map, Z).mul_coeff(&m);
            w_i = &w_i + &r.map_coeff(sym_map, Z).mul_coeff(&m);
            e = &a - &(&u_i * &w_i);

            m *= &p;
        }

        if e.is_zero() {
            let content = u_i.content();
            if content != 1 {
                u_i = u_i.map_coeff(|c| Integer::from(c / &content), Z);
                gamma /= &content;
            }

            if gamma != 1 {
                // true division is possible in this case
                w_i = w_i.map_coeff(|c| Integer::from(c / &gamma), Z);
            }

            Ok((u_i, w_i))
        } else {
            Err((u_i.monic_mod(&m), w_i.monic_mod(&m)))
        }
    }

    /// Lift multiple factors by creating a binary tree and lifting each product.
    fn multi_factor_hensel_lift(
        &self,
        hs: &[UnivariatePolynomial<FiniteField>],
        max_p: &Integer,
    ) -> Vec<Self> {
        if hs.len() == 1 {
            return vec![self.clone().monic_mod(max_p)];
        }

        let (gs, hs) = hs.split_at(hs.len() / 2);

        let mut g = gs[0].one();
        for x in gs {
            g = &g * x;
        }

        let mut h = hs[0].one();
        for x in hs {
            h = &h * x;
        }

        let (g_i, h_i) = self.hensel_lift(g, h, max_p).unwrap_or_else(|e| e);

        let mut factors = g_i.multi_factor_hensel_lift(gs, max_p);
        factors.extend(h_i.multi_factor_hensel_lift(hs, max_p));
        factors
    }

    /// Factor a primitive square-free polynomial over the integers by Hensel lifting
    /// the factors of a modular image and recombining them.
    pub fn factor_reconstruct(&self, rng: &mut impl RngCore) -> Vec<Self> {
        let d = self.degree();
        if d <= 1 {
            return vec![self.clone()];
        }

        let max_norm = self
            .coefficients
            .iter()
            .map(|c| c.clone().abs())
            .max()
            .unwrap_or_default();
        let mut bound = Integer::from(d + 1) << (d + (d + 2) / 2 + 1) as u32;
        bound *= max_norm * self.lcoeff().abs();

        // select a prime that keeps the degree and the image square-free
        let mut prime = MODULAR_PRIME_START;
        let (field, f_p) = loop {
            prime -= 2;
            let Ok(field) = FiniteField::new(prime) else {
                continue;
            };

            let f_p = self.to_finite_field(&field);
            if f_p.degree() == d && f_p.gcd(&f_p.derivative()).is_one() {
                break (field, f_p);
            }
        };

        let hs = field.factor_square_free(&f_p.make_monic(), rng);
        debug!("{} has {} factors modulo {}", self, hs.len(), field.get_prime());

        if hs.len() == 1 {
            return vec![self.clone()];
        }

        let p = Integer::from(field.get_prime());
        let mut max_p = p.clone();
        while max_p < bound {
            max_p *= &p;
        }

        let mut factors = self.multi_factor_hensel_lift(&hs, &max_p);

        // factor recombination
        let mut rec_factors = vec![];
        let mut rest = self.clone();
        let mut s = 1;
        'len: while 2 * s <= factors.len() {
            let mut fs = CombinationIterator::new(factors.len(), s);
            while let Some(cs) = fs.next() {
                let mut g = rest.constant(rest.lcoeff());
                for i in cs {
                    g = (&g * &factors[*i]).map_coeff(|c| symmetric_mod(c, &max_p), Z);
                }
                let g = g.primitive_part();

                if let Some(h) = rest.exact_quotient(&g) {
                    rec_factors.push(g);
                    for i in cs.to_vec().into_iter().rev() {
                        factors.remove(i);
                    }
                    rest = h.primitive_part();
                    continue 'len;
                }
            }

            s += 1;
        }

        rec_factors.push(rest);
        rec_factors
    }
}

impl UnivariatePolynomial<FiniteField> {
    /// Perform distinct degree factorization on a monic and square-free polynomial.
    pub fn distinct_degree_factorization(&self) -> Vec<(usize, Self)> {
        if self.is_constant() {
            return vec![];
        }

        let p = Integer::from(self.field.get_prime());
        let x = self.monomial(self.field.one(), 1);

        let mut factors = vec![];
        let mut h = x.clone();
        let mut f = self.clone().make_monic();
        let mut i: usize = 0;
        while !f.is_one() {
            i += 1;

            h = h.exp_mod(&p, &f);

            let g = (&h - &x).gcd(&f);

            if !g.is_one() {
                f = &f / &g;
                h = h.rem(&f);
                factors.push((i, g));
            }

            if f.degree() < 2 * (i + 1) {
                // f cannot be split more
                if !f.is_constant() {
                    factors.push((f.degree(), f));
                }
                break;
            }
        }

        factors
    }

    /// Perform Cantor-Zassenhaus's probabilistic algorithm for
    /// finding the irreducible factors of degree `d`. The input must be
    /// monic, square-free and a product of irreducibles of degree `d`.
    pub fn equal_degree_factorization(&self, d: usize, rng: &mut impl RngCore) -> Vec<Self> {
        let s = self.clone().make_monic();
        let n = s.degree();

        if n <= d {
            return vec![s];
        }

        let p = self.field.get_prime();
        let exp = if p == 2 {
            Integer::new()
        } else {
            let mut q = Integer::from(1);
            for _ in 0..d {
                q *= p;
            }
            (q - 1u32) / 2u32
        };

        let factor = loop {
            // generate a random non-constant polynomial of degree below n
            let mut random_poly = s.zero();
            for i in 0..n {
                let r = self.field.sample(rng, (0, i64::MAX));
                random_poly.add_coefficient(i, &r);
            }

            if random_poly.degree() == 0 {
                continue;
            }

            let g = random_poly.gcd(&s);
            if !g.is_one() {
                break g;
            }

            let b = if p == 2 {
                // trace map a + a^2 + ... + a^(2^(k-1)) with k = d
                let mut t = random_poly.clone();
                let mut sum = random_poly;
                for _ in 1..d {
                    t = (&t * &t).rem(&s);
                    sum = &sum + &t;
                }
                sum
            } else {
                random_poly.exp_mod(&exp, &s) - s.one()
            };

            let g = b.gcd(&s);
            if !g.is_one() && g != s {
                break g;
            }
        };

        let mut factors = factor.equal_degree_factorization(d, rng);
        factors.extend((&s / &factor).equal_degree_factorization(d, rng));
        factors
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::domains::complex_rational::{ComplexRational, ComplexRationalField};
    use crate::domains::finite_field::FiniteField;
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::Q;
    use crate::domains::rational_function::RationalFunctionField;
    use crate::domains::{Field, FrobeniusRoot, Ring};
    use crate::poly::polynomial::{MultivariatePolynomial, PolynomialRing};
    use crate::poly::univariate::UnivariatePolynomial;
    use crate::poly::{LexOrder, Variable};

    use super::Factorizable;

    fn reconstruct<F: FrobeniusRoot>(
        factors: &[(MultivariatePolynomial<F, u16, LexOrder>, usize)],
        one: &MultivariatePolynomial<F, u16, LexOrder>,
    ) -> MultivariatePolynomial<F, u16, LexOrder> {
        let mut r = one.clone();
        for (f, n) in factors {
            r = &r * &f.pow(*n);
        }
        r
    }

    #[test]
    fn square_free_char_zero() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let a = &x + &y;
        let b = &(&x * &y) - &one;
        let p = &(&a.pow(3) * &b) * &r.constant(Q.to_element(3, 1));

        let sff = p.square_free_factorization();
        assert_eq!(reconstruct(&sff, &one), p);
        assert!(sff.contains(&(a.clone(), 3)));
        assert!(sff.contains(&(b.clone(), 1)));
        assert_eq!(p.square_free_part(), (&a * &b).make_monic());
    }

    #[test]
    fn square_free_char_p() {
        let f = FiniteField::new(3).unwrap();
        let r = PolynomialRing::<_, u16, LexOrder>::new(f, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        // (x + y)^4 (x^3 - y) has a factor with vanishing x-derivative
        let a = &x + &y;
        let b = &x.pow(3) - &y;
        let p = &a.pow(4) * &b;

        let sff = p.square_free_factorization();
        assert_eq!(reconstruct(&sff, &one), p);
        assert!(sff.contains(&(a.clone(), 4)));
        assert!(sff.contains(&(b.clone(), 1)));

        let q = (&x - &y).pow(3);
        assert_eq!(q.frobenius_root(), Some(&x - &y));
        assert_eq!(q.square_free_part(), &x - &y);
    }

    #[test]
    fn square_free_non_perfect() {
        let gf5 = FiniteField::new(5).unwrap();
        let k = RationalFunctionField::new(gf5, &["c"]).unwrap();
        let r = PolynomialRing::<_, u16, LexOrder>::new(k.clone(), &["z"]).unwrap();
        let [_, z]: [_; 2] = r.gens().try_into().unwrap();
        let c = r.constant(k.parameter(0));

        // z^5 - c is irreducible and square-free over GF(5)(c)
        let g = &z.pow(5) - &c;
        assert_eq!(g.frobenius_root(), None);
        assert_eq!(g.square_free_part(), g);

        // (z^2 - c)^5 = z^10 - c^5 has the p-th root z^2 - c
        let h = (&(&z * &z) - &c).pow(5);
        assert_eq!(h.square_free_factorization(), vec![(&(&z * &z) - &c, 5)]);
        assert_eq!(h.square_free_part(), &(&z * &z) - &c);
    }

    #[test]
    fn factor_finite_field() {
        let mut rng = StdRng::seed_from_u64(7);
        for p in [2, 3, 7] {
            let f = FiniteField::new(p).unwrap();
            let r = PolynomialRing::<_, u16, LexOrder>::new(f, &["x"]).unwrap();
            let [one, x]: [_; 2] = r.gens().try_into().unwrap();

            // x^4 - 1 and x^2 + x + 1 over several primes
            let poly = &(&x.pow(4) - &one) * &(&(&x * &x) + &(&x + &one));
            let factors = poly.factor_univariate(&mut rng).unwrap();
            assert_eq!(reconstruct(&factors, &one), poly);

            // a factor of degree at most 3 is irreducible if it has no roots
            for (g, _) in &factors {
                let ug = g.to_univariate(0);
                assert!(ug.degree() <= 2);
                if ug.degree() == 2 {
                    for a in 0..p {
                        assert!(!FiniteField::is_zero(&ug.evaluate(&f.to_element(a))));
                    }
                }
            }
        }
    }

    #[test]
    fn factor_rationals() {
        let mut rng = StdRng::seed_from_u64(1);
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let two = r.constant(Q.to_element(2, 1));

        let d = (&(&x * &x) - &one).factor_univariate(&mut rng).unwrap();
        assert_eq!(d.len(), 2);
        assert!(d.contains(&(&x - &one, 1)));
        assert!(d.contains(&(&x + &one, 1)));

        // x^4 + 1 splits modulo every prime but is irreducible over Q
        let p = &x.pow(4) + &one;
        assert_eq!(p.factor(&mut rng), vec![(p.clone(), 1)]);

        // (x^2 - 2)^2 (3x + 1/2) (x^3 - x - 1)
        let a = &(&x * &x) - &two;
        let b = &x.clone().mul_coeff(Q.to_element(3, 1)) + &r.constant(Q.to_element(1, 2));
        let c = &(&x.pow(3) - &x) - &one;
        let p = &(&a.pow(2) * &b) * &c;
        let d = p.factor(&mut rng);
        assert_eq!(d.len(), 3);
        assert!(d.contains(&(a.clone(), 2)));
        assert!(d.contains(&(b.make_monic(), 1)));
        assert!(d.contains(&(c.clone(), 1)));

        assert!((&x + &y).factor_univariate(&mut rng).is_none());
    }

    #[test]
    fn zassenhaus_recombination() {
        let mut rng = StdRng::seed_from_u64(3);
        let x = Arc::new(Variable::new("x"));
        let poly = |c: &[i64]| {
            UnivariatePolynomial::from_coefficients(&Z, c.iter().map(|i| Integer::from(*i)).collect(), x.clone())
        };

        // (2x^2 + 3)(x^4 + 1)(5x - 7)
        let a = poly(&[3, 0, 2]);
        let b = poly(&[1, 0, 0, 0, 1]);
        let c = poly(&[-7, 5]);
        let f = &(&a * &b) * &c;

        let factors = f.factor_reconstruct(&mut rng);
        assert_eq!(factors.len(), 3);
        for g in [&a, &b, &c] {
            assert!(factors.contains(g));
        }
        assert!(f.exact_quotient(&a).is_some());
        assert!(f.exact_quotient(&poly(&[1, 2])).is_none());
    }

    #[test]
    fn factor_gaussian_rationals() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = ComplexRationalField::new();
        let r = PolynomialRing::<_, u16, LexOrder>::new(field, &["x"]).unwrap();
        let [one, x]: [_; 2] = r.gens().try_into().unwrap();
        let i = r.constant(ComplexRational::i());

        // x^2 + 1 = (x - i)(x + i), while x^2 - 3 stays irreducible
        let p = &(&(&x * &x) + &one) * &(&(&x * &x) - &one.clone().mul_coeff(field.nth(3)));
        let d = p.factor(&mut rng);
        assert_eq!(d.len(), 3);
        assert!(d.contains(&(&x - &i, 1)));
        assert!(d.contains(&(&x + &i, 1)));
        assert_eq!(reconstruct(&d, &one), p);

        let uni = (&(&x * &x) + &one).to_univariate(0);
        assert_eq!(field.factor_square_free(&uni, &mut rng).len(), 2);
    }

    #[test]
    fn factor_rational_function_field() {
        let mut rng = StdRng::seed_from_u64(11);
        let gf5 = FiniteField::new(5).unwrap();
        let k = RationalFunctionField::new(gf5, &["c"]).unwrap();
        let r = PolynomialRing::<_, u16, LexOrder>::new(k.clone(), &["x"]).unwrap();
        let [one, x]: [_; 2] = r.gens().try_into().unwrap();
        let c = r.constant(k.parameter(0));

        // x^2 - c^2 = (x - c)(x + c), x^2 - c is irreducible
        let d = (&(&x * &x) - &(&c * &c)).factor(&mut rng);
        assert_eq!(d.len(), 2);
        assert!(d.contains(&(&x - &c, 1)));
        assert!(d.contains(&(&x + &c, 1)));
        assert_eq!((&(&x * &x) - &c).factor(&mut rng).len(), 1);

        // a denominator: x^2 - 1/c^2 = (x - 1/c)(x + 1/c)
        let inv = r.constant(k.inv(&k.parameter(0)));
        let d = (&(&x * &x) - &(&inv * &inv)).factor(&mut rng);
        assert!(d.contains(&(&x - &inv, 1)));
        assert!(d.contains(&(&x + &inv, 1)));

        // the inseparable z^5 - c stays irreducible
        let g = &x.pow(5) - &c;
        assert_eq!(g.factor(&mut rng), vec![(g.clone(), 1)]);
        assert_eq!(reconstruct(&(&(&x * &x) - &one).factor(&mut rng), &one), &(&x * &x) - &one);
    }

    #[test]
    fn factor_multivariate() {
        let mut rng = StdRng::seed_from_u64(13);
        let f = FiniteField::new(7).unwrap();
        let r = PolynomialRing::<_, u16, LexOrder>::new(f, &["x", "y", "z"]).unwrap();
        let [one, x, y, z]: [_; 4] = r.gens().try_into().unwrap();
        let three = r.constant(f.to_element(3));

        // x^2 - 2y^2 = (x - 3y)(x + 3y) over GF(7)
        let p = &(&x * &x) - &(&(&y * &y) * &r.constant(f.to_element(2)));
        let d = p.factor(&mut rng);
        assert_eq!(d.len(), 2);
        assert!(d.contains(&(&x - &(&three * &y), 1)));
        assert!(d.contains(&(&x + &(&three * &y), 1)));

        // (xy - z)^2 (x + y + 1) (y z + 1)
        let a = &(&x * &y) - &z;
        let b = &(&x + &y) + &one;
        let c = &(&y * &z) + &one;
        let p = &(&a.pow(2) * &b) * &c;
        let d = p.factor(&mut rng);
        assert_eq!(d.len(), 3);
        assert!(d.contains(&(a, 2)));
        assert!(d.contains(&(b, 1)));
        assert!(d.contains(&(c, 1)));

        // x^2 + y^2 + 1 is irreducible
        let q = &(&(&x * &x) + &(&y * &y)) + &one;
        assert_eq!(q.factor(&mut rng).len(), 1);
    }
}
