use std::borrow::Cow;

use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::domains::Field;

use super::polynomial::MultivariatePolynomial;
use super::{Exponent, MonomialOrder, INLINED_EXPONENTS};

impl<F: Field, E: Exponent, O: MonomialOrder> MultivariatePolynomial<F, E, O> {
    /// Get the content of a multivariate polynomial viewed as a
    /// univariate polynomial in `x`, i.e., the gcd of its coefficients,
    /// which are polynomials in the remaining variables.
    pub fn univariate_content(&self, x: usize) -> MultivariatePolynomial<F, E, O> {
        MultivariatePolynomial::repeated_gcd(self.coefficients_in(x))
    }

    /// Divide out the content in `x` and make the result monic.
    pub fn univariate_primitive_part(&self, x: usize) -> MultivariatePolynomial<F, E, O> {
        let c = self.univariate_content(x);
        if c.is_constant() {
            self.clone().make_monic()
        } else {
            (self / &c).make_monic()
        }
    }

    /// Apply a GCD repeatedly to a list of polynomials.
    pub fn repeated_gcd(mut f: Vec<MultivariatePolynomial<F, E, O>>) -> MultivariatePolynomial<F, E, O> {
        f.retain(|p| !p.is_zero());

        if f.is_empty() {
            panic!("Cannot compute the gcd of an empty list");
        }

        if f.len() == 1 {
            return f.swap_remove(0).make_monic();
        }

        f.sort_unstable_by_key(|p| std::cmp::Reverse(p.nterms()));

        let mut gcd = f.pop().unwrap_or_else(|| unreachable!());
        for p in f {
            if gcd.is_one() {
                return gcd;
            }

            gcd = MultivariatePolynomial::gcd(&gcd, &p);
        }
        gcd.make_monic()
    }

    /// Compute a standard GCD-free basis. The input should not
    /// contain 0 or units.
    pub fn gcd_free_basis(mut polys: Vec<Self>) -> Vec<Self> {
        let mut i = 0;
        while i + 1 < polys.len() {
            if polys[i].is_constant() {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < polys.len() {
                if polys[j].is_constant() {
                    j += 1;
                    continue;
                }

                let g = MultivariatePolynomial::gcd(&polys[i], &polys[j]);
                if !g.is_one() {
                    polys[i] = &polys[i] / &g;
                    polys[j] = &polys[j] / &g;
                    polys.push(g);
                }

                j += 1;
            }

            i += 1;
        }

        polys.retain(|p| !p.is_constant());
        polys
    }

    /// Compute the GCD for simple cases.
    #[inline(always)]
    fn simple_gcd(a: &Self, b: &Self) -> Option<Self> {
        if a.is_zero() {
            return Some(b.clone().make_monic());
        }
        if b.is_zero() {
            return Some(a.clone().make_monic());
        }

        if a == b {
            return Some(a.clone().make_monic());
        }

        if a.is_constant() || b.is_constant() {
            return Some(a.one());
        }

        None
    }

    /// Compute the gcd of two multivariate polynomials. The result is monic.
    #[instrument(level = "trace", skip_all)]
    pub fn gcd(a: &Self, b: &Self) -> Self {
        debug_assert_eq!(a.variables, b.variables);

        if let Some(g) = MultivariatePolynomial::simple_gcd(a, b) {
            return g;
        }

        // a and b are only copied when needed
        let mut a = Cow::Borrowed(a);
        let mut b = Cow::Borrowed(b);

        // determine the maximum shared power of every variable
        let mut shared_degree: SmallVec<[E; INLINED_EXPONENTS]> = a.exponents(0).into();
        for p in [&a, &b] {
            for e in p.exponents_iter() {
                for (md, v) in shared_degree.iter_mut().zip(e) {
                    *md = (*md).min(*v);
                }
            }
        }

        // divide out the common monomial factor
        if shared_degree.iter().any(|d| *d > E::zero()) {
            debug!("Shared monomial factor {:?}", shared_degree);
            for p in [&mut a, &mut b] {
                for e in p.to_mut().exponents_iter_mut() {
                    for (v, d) in e.iter_mut().zip(&shared_degree) {
                        *v = *v - *d;
                    }
                }
            }
        }

        let monomial = a.one().mul_exp(&shared_degree);
        let rest = MultivariatePolynomial::gcd_prs(&a, &b);
        (&rest * &monomial).make_monic()
    }

    /// Compute the gcd by recursion on a shared variable, using primitive
    /// pseudo-remainder sequences.
    fn gcd_prs(a: &Self, b: &Self) -> Self {
        if let Some(g) = MultivariatePolynomial::simple_gcd(a, b) {
            return g;
        }

        // if no variable occurs in both, the gcd is a unit
        let Some(var) = (0..a.nvars()).find(|v| !a.degree(*v).is_zero() && !b.degree(*v).is_zero())
        else {
            return a.one();
        };

        let ca = a.univariate_content(var);
        let cb = b.univariate_content(var);
        let content_gcd = MultivariatePolynomial::gcd(&ca, &cb);

        let pa = if ca.is_constant() { a.clone() } else { a / &ca };
        let pb = if cb.is_constant() { b.clone() } else { b / &cb };

        let g = MultivariatePolynomial::primitive_prs(pa, pb, var);
        &g * &content_gcd
    }

    /// Euclid's algorithm in `K[other vars][var]` for inputs that are primitive in `var`.
    fn primitive_prs(a: Self, b: Self, var: usize) -> Self {
        let (mut f, mut g) = if a.degree(var) >= b.degree(var) {
            (a, b)
        } else {
            (b, a)
        };

        loop {
            let r = f.pseudo_rem(&g, var);
            if r.is_zero() {
                return g.univariate_primitive_part(var);
            }

            if r.degree(var).is_zero() {
                return g.one();
            }

            f = g;
            g = r.univariate_primitive_part(var);
        }
    }

    /// Compute the pseudo-remainder `lc(div)^k * self mod div` with respect to `var`.
    pub fn pseudo_rem(&self, div: &Self, var: usize) -> Self {
        let d = div.degree(var);
        let lc = div.lcoeff_in(var);

        let mut r = self.clone();
        let mut shift = vec![E::zero(); self.nvars()];
        while !r.is_zero() && r.degree(var) >= d {
            let dr = r.degree(var);
            let lr = r.lcoeff_in(var);
            shift[var] = dr - d;
            r = &(&r * &lc) - &(&lr * div).mul_exp(&shift);
        }
        r
    }

    /// Compute the least common multiple. The result is monic.
    pub fn lcm(a: &Self, b: &Self) -> Self {
        if a.is_zero() || b.is_zero() {
            return a.zero();
        }

        let g = MultivariatePolynomial::gcd(a, b);
        (&(a / &g) * b).make_monic()
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::FiniteField;
    use crate::domains::rational::Q;
    use crate::poly::polynomial::{MultivariatePolynomial, PolynomialRing};
    use crate::poly::{GrevLexOrder, LexOrder};

    #[test]
    fn gcd_rational() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y", "z"]).unwrap();
        let [one, x, y, z]: [_; 4] = r.gens().try_into().unwrap();

        let common = &(&x * &y) - &(&z + &one);
        let a = &common * &(&x + &(&y * &y));
        let b = &common * &(&(&x * &z) - &one);
        let g = MultivariatePolynomial::gcd(&a, &b);
        assert_eq!(g, common.clone().make_monic());

        let c = &(&x * &x) * &y;
        let d = &(&x * &y) * &y;
        assert_eq!(MultivariatePolynomial::gcd(&c, &d), &x * &y);

        assert!(MultivariatePolynomial::gcd(&x, &y).is_one());
    }

    #[test]
    fn gcd_finite_field_grevlex() {
        let f = FiniteField::new(3).unwrap();
        let r = PolynomialRing::<_, u16, GrevLexOrder>::new(f, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let a = (&x + &y).pow(3);
        let b = &(&x * &x) - &(&y * &y);
        let g = MultivariatePolynomial::gcd(&a, &b);
        assert_eq!(g, (&x + &y).make_monic());

        let l = MultivariatePolynomial::lcm(&(&x + &one), &(&x - &one));
        assert_eq!(l, (&(&x * &x) - &one).make_monic());
    }

    #[test]
    fn contents() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let p = &(&y + &one) * &(&(&x * &x) + &one);
        assert_eq!(p.univariate_content(0), &y + &one);
        assert_eq!(p.univariate_content(1), &(&x * &x) + &one);

        let basis = MultivariatePolynomial::gcd_free_basis(vec![
            &(&x + &one) * &y,
            &(&x + &one) * &(&y + &one),
        ]);
        assert_eq!(basis.len(), 3);
    }
}
