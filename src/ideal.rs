//! Polynomial ideals, represented by their generators and a lazily computed
//! reduced Gröbner basis.
//!
//! All operations work on the reduced Gröbner basis, so two ideals that are equal
//! as sets behave identically, regardless of the generators they were created with.
//! Eliminations use the lexicographic order in an extended ring, in which the
//! extra tag variables are the largest.
pub mod radical;

use std::fmt::{Display, Write};
use std::sync::Arc;

use ahash::HashSet;
use once_cell::sync::OnceCell;

use crate::domains::Field;
use crate::poly::groebner::{divides, GroebnerBasis};
use crate::poly::polynomial::{MultivariatePolynomial, PolynomialRing};
use crate::poly::univariate::UnivariatePolynomial;
use crate::poly::{Exponent, LexOrder, MonomialOrder, Variable};

/// An ideal of the polynomial ring `ring`, generated by a list of polynomials.
#[derive(Clone, Debug)]
pub struct Ideal<F: Field, E: Exponent = u16, O: MonomialOrder = LexOrder> {
    ring: PolynomialRing<F, E, O>,
    generators: Vec<MultivariatePolynomial<F, E, O>>,
    basis: OnceCell<Vec<MultivariatePolynomial<F, E, O>>>,
}

impl<F: Field, E: Exponent, O: MonomialOrder> PolynomialRing<F, E, O> {
    /// Create the ideal generated by `generators`.
    pub fn ideal(&self, generators: Vec<MultivariatePolynomial<F, E, O>>) -> Ideal<F, E, O> {
        Ideal::new(self.clone(), generators)
    }
}

impl<F: Field, E: Exponent, O: MonomialOrder> Ideal<F, E, O> {
    pub fn new(
        ring: PolynomialRing<F, E, O>,
        generators: Vec<MultivariatePolynomial<F, E, O>>,
    ) -> Ideal<F, E, O> {
        Ideal {
            ring,
            generators,
            basis: OnceCell::new(),
        }
    }

    /// Create an ideal from a list that is already a reduced Gröbner basis.
    pub(crate) fn from_groebner_basis(
        ring: PolynomialRing<F, E, O>,
        basis: Vec<MultivariatePolynomial<F, E, O>>,
    ) -> Ideal<F, E, O> {
        let cell = OnceCell::new();
        let _ = cell.set(basis.clone());
        Ideal {
            ring,
            generators: basis,
            basis: cell,
        }
    }

    pub fn ring(&self) -> &PolynomialRing<F, E, O> {
        &self.ring
    }

    /// The generators the ideal was created with.
    pub fn generators(&self) -> &[MultivariatePolynomial<F, E, O>] {
        &self.generators
    }

    /// The reduced Gröbner basis under the monomial order of the ring,
    /// sorted by descending leading monomial. It is computed on first use.
    pub fn groebner_basis(&self) -> &[MultivariatePolynomial<F, E, O>] {
        self.basis
            .get_or_init(|| GroebnerBasis::new(&self.generators).system)
    }

    /// Returns true if the ideal only contains zero.
    pub fn is_zero(&self) -> bool {
        self.groebner_basis().is_empty()
    }

    /// Returns true if the ideal is the whole ring.
    pub fn is_one(&self) -> bool {
        let b = self.groebner_basis();
        b.len() == 1 && b[0].is_one()
    }

    /// The remainder of `poly` after full reduction by the Gröbner basis.
    pub fn normal_form(&self, poly: &MultivariatePolynomial<F, E, O>) -> MultivariatePolynomial<F, E, O> {
        GroebnerBasis::reduce(poly, self.groebner_basis())
    }

    pub fn contains_polynomial(&self, poly: &MultivariatePolynomial<F, E, O>) -> bool {
        self.normal_form(poly).is_zero()
    }

    /// Check if `other` is a subset of this ideal.
    pub fn contains(&self, other: &Ideal<F, E, O>) -> bool {
        other
            .groebner_basis()
            .iter()
            .all(|g| self.contains_polynomial(g))
    }

    /// The ideal `I + J`.
    pub fn sum(&self, other: &Ideal<F, E, O>) -> Ideal<F, E, O> {
        let mut gens = self.groebner_basis().to_vec();
        gens.extend_from_slice(other.groebner_basis());
        self.ring.ideal(gens)
    }

    /// The ideal `I + (poly)`.
    pub fn add_polynomial(&self, poly: &MultivariatePolynomial<F, E, O>) -> Ideal<F, E, O> {
        let mut gens = self.groebner_basis().to_vec();
        gens.push(poly.clone());
        self.ring.ideal(gens)
    }

    /// The ideal `I * J`, generated by the pairwise products of the bases.
    pub fn product(&self, other: &Ideal<F, E, O>) -> Ideal<F, E, O> {
        let mut gens = vec![];
        for a in self.groebner_basis() {
            for b in other.groebner_basis() {
                gens.push(a * b);
            }
        }
        self.ring.ideal(gens)
    }

    /// The intersection `I ∩ J`, computed as `(t*I + (1-t)*J) ∩ K[x]`.
    pub fn intersect(&self, other: &Ideal<F, E, O>) -> Ideal<F, E, O> {
        if self.is_zero() || other.is_one() {
            return self.clone();
        }
        if other.is_zero() || self.is_one() {
            return other.clone();
        }

        let ext = TaggedRing::new(&self.ring, 1);
        let t = ext.tag(0);
        let one_minus_t = &ext.one() - &t;

        let mut gens = vec![];
        for g in self.groebner_basis() {
            gens.push(&t * &ext.lift(g));
        }
        for g in other.groebner_basis() {
            gens.push(&one_minus_t * &ext.lift(g));
        }

        self.ring.ideal(ext.eliminate(&gens))
    }

    /// The quotient `I : (f) = {g | g*f ∈ I}`.
    pub fn quotient(&self, f: &MultivariatePolynomial<F, E, O>) -> Ideal<F, E, O> {
        if f.is_zero() {
            return self.ring.ideal(vec![self.ring.one()]);
        }

        let principal = self.ring.ideal(vec![f.clone()]);
        let gens = self
            .intersect(&principal)
            .groebner_basis()
            .iter()
            .map(|g| g / f)
            .collect();
        self.ring.ideal(gens)
    }

    /// The saturation `I : f^∞`, computed as `(I + (1 - t*f)) ∩ K[x]`.
    pub fn saturation(&self, f: &MultivariatePolynomial<F, E, O>) -> Ideal<F, E, O> {
        if f.is_zero() {
            return self.ring.ideal(vec![self.ring.one()]);
        }
        if f.is_constant() || self.is_zero() {
            return self.clone();
        }

        let ext = TaggedRing::new(&self.ring, 1);
        let mut gens: Vec<_> = self.groebner_basis().iter().map(|g| ext.lift(g)).collect();
        gens.push(&ext.one() - &(&ext.tag(0) * &ext.lift(f)));

        self.ring.ideal(ext.eliminate(&gens))
    }

    /// The ideal quotient `I : J`, the intersection of `I : (g)` over the generators `g` of `J`.
    pub fn quotient_ideal(&self, other: &Ideal<F, E, O>) -> Ideal<F, E, O> {
        let mut res = self.ring.ideal(vec![self.ring.one()]);
        for g in other.groebner_basis() {
            res = res.intersect(&self.quotient(g));
        }
        res
    }

    /// The saturation `I : J^∞`, the intersection of `I : g^∞` over the generators `g` of `J`.
    pub fn saturation_ideal(&self, other: &Ideal<F, E, O>) -> Ideal<F, E, O> {
        let mut res = self.ring.ideal(vec![self.ring.one()]);
        for g in other.groebner_basis() {
            res = res.intersect(&self.saturation(g));
        }
        res
    }

    /// Check if `h` is invertible in `K[x]/I`, i.e., `I + (h)` is the whole ring.
    pub fn is_unit(&self, h: &MultivariatePolynomial<F, E, O>) -> bool {
        self.add_polynomial(h).is_one()
    }

    /// The normal form of the inverse of `h` in `K[x]/I`, or `None` if `h` is not a unit.
    ///
    /// If `h` is a unit, `I + (t*h - 1)` contains `t - a` for the inverse `a`, which is
    /// the only element of its reduced lexicographic basis in which `t` occurs.
    pub fn inverse(&self, h: &MultivariatePolynomial<F, E, O>) -> Option<MultivariatePolynomial<F, E, O>> {
        if self.is_one() {
            return Some(self.ring.zero());
        }
        if !self.is_unit(h) {
            return None;
        }

        let ext = TaggedRing::new(&self.ring, 1);
        let t = ext.tag(0);
        let mut gens: Vec<_> = self.groebner_basis().iter().map(|g| ext.lift(g)).collect();
        gens.push(&(&t * &ext.lift(h)) - &ext.one());

        let g = GroebnerBasis::new(&gens)
            .system
            .into_iter()
            .find(|g| !g.degree(0).is_zero())?;
        let a = &t - &g;
        if !a.degree(0).is_zero() {
            return None;
        }
        Some(self.normal_form(&ext.lower(&a)))
    }

    /// The elimination ideal `I ∩ K[x_count, ..., x_n]`, which does not depend on the
    /// first `count` variables. It is returned as an ideal of the same ring.
    pub fn eliminate(&self, count: usize) -> Ideal<F, E, O> {
        assert!(count <= self.ring.nvars(), "Cannot eliminate more variables than the ring has");

        let lex: Vec<_> = self
            .groebner_basis()
            .iter()
            .map(|g| g.reorder::<LexOrder>())
            .collect();
        let gens = GroebnerBasis::new(&lex)
            .system
            .iter()
            .filter(|g| (0..count).all(|v| g.degree(v).is_zero()))
            .map(|g| g.reorder::<O>())
            .collect();
        self.ring.ideal(gens)
    }

    /// A largest set of variables `U` such that no leading monomial of the
    /// Gröbner basis lies in `K[U]`, so that `I ∩ K[U] = 0`. Of all sets of that
    /// size, the one containing the last variables is taken.
    /// Yields `None` for the unit ideal.
    pub fn maximal_independent_set(&self) -> Option<Vec<usize>> {
        if self.is_one() {
            return None;
        }

        let n = self.ring.nvars();
        let supports: Vec<Vec<usize>> = self
            .groebner_basis()
            .iter()
            .map(|g| (0..n).filter(|i| !g.max_exp()[*i].is_zero()).collect())
            .collect();

        let mut best = vec![];
        extend_independent_set(n, &supports, &mut vec![], &mut best);
        best.sort_unstable();
        Some(best)
    }

    /// The Krull dimension of `K[x]/I`, or `None` for the unit ideal.
    pub fn dimension(&self) -> Option<usize> {
        self.maximal_independent_set().map(|u| u.len())
    }

    /// The dimension of `K[x]/I` as a vector space over `K`, i.e., the number of
    /// monomials that are not divisible by a leading monomial of the basis.
    /// Yields `None` if the ideal is not zero-dimensional.
    pub fn vector_space_dimension(&self) -> Option<usize> {
        match self.dimension() {
            Some(0) => {}
            None => return Some(0),
            Some(_) => return None,
        }

        let leads: Vec<&[E]> = self.groebner_basis().iter().map(|g| g.max_exp()).collect();
        let n = self.ring.nvars();

        let mut standard = HashSet::default();
        let mut stack = vec![vec![E::zero(); n]];
        while let Some(m) = stack.pop() {
            if standard.contains(&m) || leads.iter().any(|l| divides(l, &m)) {
                continue;
            }

            for i in 0..n {
                let mut next = m.clone();
                next[i] += E::one();
                stack.push(next);
            }
            standard.insert(m);
        }

        Some(standard.len())
    }

    /// The monic minimal polynomial of the variable `var` modulo the ideal,
    /// i.e., the generator of `I ∩ K[var]`. Yields `None` if the ideal is not zero-dimensional.
    pub fn minimal_polynomial(&self, var: usize) -> Option<UnivariatePolynomial<F>> {
        let x = self.ring.variable(var);
        self.minimal_polynomial_of(&x, self.ring.variables()[var].clone())
    }

    /// The monic polynomial `m` of least degree such that `m(f) ∈ I`, in the variable `variable`.
    /// Yields `None` if the ideal is not zero-dimensional.
    ///
    /// The normal forms of `1, f, f^2, ...` are kept in echelon form, until the
    /// normal form of a power is a linear combination of the previous ones.
    pub fn minimal_polynomial_of(
        &self,
        f: &MultivariatePolynomial<F, E, O>,
        variable: Variable,
    ) -> Option<UnivariatePolynomial<F>> {
        if self.dimension()? != 0 {
            return None;
        }

        let field = self.ring.field();
        let uni = UnivariatePolynomial::new(field, None, Arc::new(variable));

        // monic rows with distinct leading monomials, and the polynomial in `f` they represent
        let mut rows: Vec<(MultivariatePolynomial<F, E, O>, UnivariatePolynomial<F>)> = vec![];
        let mut power = self.normal_form(&self.ring.one());
        let mut k = 0;
        loop {
            let mut r = power.clone();
            let mut combination = uni.monomial(field.one(), k);

            while !r.is_zero() {
                let Some((row, c)) = rows.iter().find(|(row, _)| row.max_exp() == r.max_exp()) else {
                    break;
                };

                let ratio = r.max_coeff().clone();
                r = &r - &row.clone().mul_coeff(ratio.clone());
                combination = &combination - &c.clone().mul_coeff(&ratio);
            }

            if r.is_zero() {
                return Some(combination.make_monic());
            }

            let inv = field.inv(r.max_coeff());
            rows.push((r.mul_coeff(inv.clone()), combination.mul_coeff(&inv)));

            power = self.normal_form(&(&power * f));
            k += 1;
        }
    }
}

/// Grow `current` to an independent set using the first `remaining` variables,
/// trying to include the last variable first. `best` holds the largest set found so far.
fn extend_independent_set(
    remaining: usize,
    supports: &[Vec<usize>],
    current: &mut Vec<usize>,
    best: &mut Vec<usize>,
) {
    if current.len() + remaining <= best.len() {
        return;
    }

    if remaining == 0 {
        *best = current.clone();
        return;
    }

    let v = remaining - 1;
    current.push(v);
    if supports
        .iter()
        .all(|s| !s.iter().all(|x| current.contains(x)))
    {
        extend_independent_set(remaining - 1, supports, current, best);
    }
    current.pop();

    extend_independent_set(remaining - 1, supports, current, best);
}

/// A ring with `tags` extra variables in front of the variables of a polynomial ring,
/// under the lexicographic order, so that a Gröbner basis eliminates the tags.
struct TaggedRing<F: Field, E: Exponent, O: MonomialOrder> {
    ring: PolynomialRing<F, E, O>,
    variables: Arc<Vec<Variable>>,
    tags: usize,
}

impl<F: Field, E: Exponent, O: MonomialOrder> TaggedRing<F, E, O> {
    fn new(ring: &PolynomialRing<F, E, O>, tags: usize) -> Self {
        let mut variables: Vec<Variable> = (0..tags)
            .map(|i| Variable::new(&format!("_t{}", i)))
            .collect();
        variables.extend(ring.variables().iter().cloned());

        TaggedRing {
            ring: ring.clone(),
            variables: Arc::new(variables),
            tags,
        }
    }

    fn one(&self) -> MultivariatePolynomial<F, E, LexOrder> {
        MultivariatePolynomial::new(self.ring.field(), None, self.variables.clone()).one()
    }

    fn tag(&self, index: usize) -> MultivariatePolynomial<F, E, LexOrder> {
        let mut e = vec![E::zero(); self.variables.len()];
        e[index] = E::one();
        self.one().monomial(self.ring.field().one(), e)
    }

    fn lift(&self, p: &MultivariatePolynomial<F, E, O>) -> MultivariatePolynomial<F, E, LexOrder> {
        let map: Vec<usize> = (self.tags..self.tags + p.nvars()).collect();
        p.reorder::<LexOrder>()
            .remap_variables(self.variables.clone(), &map)
    }

    /// Move a polynomial in which no tag occurs back to the original ring.
    fn lower(&self, p: &MultivariatePolynomial<F, E, LexOrder>) -> MultivariatePolynomial<F, E, O> {
        let mut res = MultivariatePolynomial::<F, E, LexOrder>::new(
            self.ring.field(),
            Some(p.nterms()),
            self.ring.variables().clone(),
        );

        // dropping leading zero exponents keeps the lexicographic order intact
        for t in p {
            res.coefficients.push(t.coefficient.clone());
            res.exponents.extend_from_slice(&t.exponents[self.tags..]);
        }
        res.reorder::<O>()
    }

    /// Compute the basis of `(gens) ∩ K[x]`.
    fn eliminate(&self, gens: &[MultivariatePolynomial<F, E, LexOrder>]) -> Vec<MultivariatePolynomial<F, E, O>> {
        GroebnerBasis::new(gens)
            .system
            .iter()
            .filter(|g| (0..self.tags).all(|t| g.degree(t).is_zero()))
            .map(|g| self.lower(g))
            .collect()
    }
}

impl<F: Field, E: Exponent, O: MonomialOrder> PartialEq for Ideal<F, E, O> {
    fn eq(&self, other: &Self) -> bool {
        self.ring == other.ring && self.groebner_basis() == other.groebner_basis()
    }
}

impl<F: Field, E: Exponent, O: MonomialOrder> Eq for Ideal<F, E, O> {}

impl<F: Field, E: Exponent, O: MonomialOrder> Display for Ideal<F, E, O> {
    /// Print the reduced Gröbner basis.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let basis = self.groebner_basis();
        if basis.is_empty() {
            return f.write_str("(0)");
        }

        f.write_char('(')?;
        for (i, g) in basis.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", g)?;
        }
        f.write_char(')')
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::FiniteField;
    use crate::domains::rational::Q;
    use crate::domains::Ring;
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::{GrevLexOrder, LexOrder, Variable};

    #[test]
    fn membership() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let i = r.ideal(vec![&(&x * &x) + &y, &(&x * &y) - &one]);
        assert_eq!(format!("{}", i), "(x+y^2, y^3+1)");
        assert!(i.contains_polynomial(&(&x + &(&y * &y))));
        assert!(!i.contains_polynomial(&x));
        assert_eq!(i.normal_form(&x), -(&y * &y));

        let j = r.ideal(vec![&(&y * &y * &y) + &one, &x + &(&y * &y)]);
        assert_eq!(i, j);
        assert!(i.contains(&j) && j.contains(&i));

        let unit = r.ideal(vec![x.clone(), &x - &one]);
        assert!(unit.is_one());
        assert_eq!(unit.dimension(), None);
        assert!(r.ideal(vec![r.zero()]).is_zero());
        assert_eq!(format!("{}", r.ideal(vec![])), "(0)");
    }

    #[test]
    fn arithmetic() {
        let r = PolynomialRing::<_, u16, GrevLexOrder>::new(Q, &["x", "y"]).unwrap();
        let [_, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let xy = &x * &y;

        let i = r.ideal(vec![x.clone()]);
        let j = r.ideal(vec![y.clone()]);

        let s = i.sum(&j);
        assert_eq!(s, r.ideal(vec![x.clone(), y.clone()]));
        assert!(s.contains(&i));

        let p = i.product(&j);
        let n = i.intersect(&j);
        assert_eq!(p, r.ideal(vec![xy.clone()]));
        assert_eq!(n, p);

        let k = r.ideal(vec![&xy * &x]);
        assert_eq!(k.quotient(&x), r.ideal(vec![xy.clone()]));
        assert_eq!(k.saturation(&x), j);
        assert!(k.quotient(&r.zero()).is_one());
    }

    #[test]
    fn ideal_quotients() {
        let r = PolynomialRing::<_, u16, GrevLexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let i = r.ideal(vec![&x * &(&y * &y), &x * &x]);
        let m = r.ideal(vec![x.clone(), y.clone()]);
        assert_eq!(i.quotient_ideal(&m), r.ideal(vec![&x * &y, &x * &x]));
        assert_eq!(i.saturation_ideal(&m), r.ideal(vec![x.clone()]));

        assert_eq!(i.quotient_ideal(&r.ideal(vec![one.clone()])), i);
        assert!(i.quotient_ideal(&r.ideal(vec![])).is_one());
        assert!(i.saturation_ideal(&i).is_one());
    }

    #[test]
    fn inverses() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let two = r.constant(Q.to_element(2, 1));

        let i = r.ideal(vec![&(&x * &x) - &two, &y - &one]);
        let h = &x + &y;
        assert!(i.is_unit(&h));
        let inv = i.inverse(&h).unwrap();
        assert_eq!(inv, &x - &one);
        assert_eq!(i.normal_form(&(&h * &inv)), one);

        let half = r.constant(Q.to_element(1, 2));
        assert_eq!(i.inverse(&x), Some(&x * &half));

        assert!(!i.is_unit(&(&y - &one)));
        assert_eq!(i.inverse(&(&y - &one)), None);
        assert_eq!(i.inverse(&r.zero()), None);

        let unit = r.ideal(vec![one.clone()]);
        assert!(unit.is_unit(&x));
        assert_eq!(unit.inverse(&x), Some(r.zero()));
    }

    #[test]
    fn elimination() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let two = r.constant(Q.to_element(2, 1));

        let i = r.ideal(vec![&x - &(&y * &y), &(&y * &y) - &two]);
        assert_eq!(i.groebner_basis()[0], &x - &two);
        assert_eq!(i.eliminate(1), r.ideal(vec![&(&y * &y) - &two]));
        assert!(i.eliminate(2).is_zero());

        let j = r.ideal(vec![&(&x * &y) - &one]);
        assert!(j.eliminate(1).is_zero());
    }

    #[test]
    fn dimension() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y", "z"]).unwrap();
        let [_, x, y, z]: [_; 4] = r.gens().try_into().unwrap();

        let i = r.ideal(vec![&x * &y]);
        assert_eq!(i.maximal_independent_set(), Some(vec![1, 2]));
        assert_eq!(i.dimension(), Some(2));
        assert_eq!(i.vector_space_dimension(), None);
        assert_eq!(r.ideal(vec![]).dimension(), Some(3));

        let j = r.ideal(vec![x.clone(), &y * &z]);
        assert_eq!(j.maximal_independent_set(), Some(vec![2]));
    }

    #[test]
    fn minimal_polynomials() {
        let r = PolynomialRing::<_, u16, GrevLexOrder>::new(Q, &["x", "y"]).unwrap();
        let [_, x, y]: [_; 3] = r.gens().try_into().unwrap();
        let two = r.constant(Q.to_element(2, 1));
        let three = r.constant(Q.to_element(3, 1));

        let i = r.ideal(vec![&(&x * &x) - &two, &(&y * &y) - &three]);
        assert_eq!(i.dimension(), Some(0));
        assert_eq!(i.vector_space_dimension(), Some(4));

        let mx = i.minimal_polynomial(0).unwrap();
        assert_eq!(mx.coefficients, [-2, 0, 1].map(|c| Q.to_element(c, 1)));

        let m = i.minimal_polynomial_of(&(&x + &y), Variable::new("t")).unwrap();
        assert_eq!(m.coefficients, [1, 0, -10, 0, 1].map(|c| Q.to_element(c, 1)));
        assert_eq!(format!("{}", m), "t^4-10*t^2+1");

        assert!(r.ideal(vec![x.clone()]).minimal_polynomial(0).is_none());
    }

    #[test]
    fn finite_field_minimal_polynomial() {
        let f = FiniteField::new(7).unwrap();
        let r = PolynomialRing::<_, u16, LexOrder>::new(f, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        // the points (1, 2) and (2, 1)
        let i = r.ideal(vec![&(&x + &y) - &r.constant(f.to_element(3)), &(&x * &y) - &(&one + &one)]);
        let m = i.minimal_polynomial(1).unwrap();
        assert_eq!(m.degree(), 2);
        assert_eq!(m.evaluate(&f.to_element(1)), f.zero());
        assert_eq!(m.evaluate(&f.to_element(2)), f.zero());
    }
}
