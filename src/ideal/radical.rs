//! Radical decomposition of polynomial ideals.
//!
//! The decomposition is driven by a worklist of candidate ideals, each identified by
//! its reduced Gröbner basis. A candidate is first made square-free elementwise
//! (which extracts `p`-th roots in positive characteristic) and is then split along
//! a factorization `f1*f2` of one of its elements into `J + (f1)` and `J : f1^∞`,
//! since `√J = √(J + (f1)) ∩ √(J : f1^∞)`. Candidates that do not split are made
//! radical: zero-dimensional ones by Seidenberg's lemma, positive-dimensional ones
//! by extension to `K(U)[V]` for a maximal independent set `U` and contraction.
//! A radical candidate is prime if the minimal polynomial of a linear form in `V`
//! is irreducible of degree `dim K(U)[V]/J`; a reducible minimal polynomial gives
//! the next split.
use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::HashSet;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use crate::domains::rational_function::{ParameterPolynomial, RationalFunctionField};
use crate::domains::{FrobeniusRoot, InternalOrdering, Ring};
use crate::error::DecompositionError;
use crate::options::{EngineContext, EngineOptions};
use crate::poly::factor::Factorizable;
use crate::poly::groebner::GroebnerBasis;
use crate::poly::polynomial::{MultivariatePolynomial, PolynomialRing};
use crate::poly::{Exponent, LexOrder, MonomialOrder, Variable};

use super::Ideal;

/// The number of random linear forms tried when testing a zero-dimensional
/// ideal for primality.
const LINEAR_FORM_ATTEMPTS: usize = 8;

impl<F: Factorizable, E: Exponent, O: MonomialOrder> Ideal<F, E, O> {
    /// Compute prime ideals `P_1, ..., P_k` such that `√I = P_1 ∩ ... ∩ P_k`.
    /// No component contains another, and the components are sorted canonically,
    /// so that the result does not depend on the generators of the ideal.
    ///
    /// Primality is certified by a primitive element. Over a small finite field a
    /// component for which none of the sampled linear forms is primitive is returned
    /// as it is; it is radical, but may be the intersection of several primes.
    #[instrument(level = "debug", skip_all)]
    pub fn radical_decomposition(
        &self,
        options: &EngineOptions,
    ) -> Result<Vec<Ideal<F, E, O>>, DecompositionError> {
        let ctx = EngineContext::acquire("radical_decomposition", options);
        self.validate()?;

        let mut decomposer = Decomposer {
            ring: self.ring.clone(),
            rng: ctx.rng(),
            worklist: vec![self.groebner_basis().to_vec()],
            components: vec![],
        };

        let mut seen = HashSet::default();
        let mut steps = 0;
        while let Some(basis) = decomposer.worklist.pop() {
            if basis.len() == 1 && basis[0].is_one() {
                continue;
            }

            if !seen.insert(basis.clone()) {
                continue;
            }

            steps += 1;
            debug!(
                "Candidate {} with {} basis elements, {} pending",
                steps,
                basis.len(),
                decomposer.worklist.len()
            );
            decomposer.process(basis);
        }

        let components = decomposer.remove_redundant();
        ctx.report(format_args!(
            "{} components after {} steps",
            components.len(),
            steps
        ));
        Ok(components)
    }

    /// The radical `√I`, the intersection of the components of the radical decomposition.
    pub fn radical(&self, options: &EngineOptions) -> Result<Ideal<F, E, O>, DecompositionError> {
        let mut radical = self.ring.ideal(vec![self.ring.one()]);
        for c in self.radical_decomposition(options)? {
            radical = radical.intersect(&c);
        }
        Ok(radical)
    }

    /// Check if the ideal equals its radical.
    pub fn is_radical(&self, options: &EngineOptions) -> Result<bool, DecompositionError> {
        Ok(self.radical(options)? == *self)
    }

    fn validate(&self) -> Result<(), DecompositionError> {
        for (index, g) in self.generators.iter().enumerate() {
            if g.variables != *self.ring.variables() {
                return Err(DecompositionError::ForeignGenerator { index });
            }
            if g.field != *self.ring.field() {
                return Err(DecompositionError::ForeignField { index });
            }
        }
        Ok(())
    }
}

struct Decomposer<F: Factorizable, E: Exponent, O: MonomialOrder> {
    ring: PolynomialRing<F, E, O>,
    rng: StdRng,
    /// Candidates, identified by their reduced Gröbner basis.
    worklist: Vec<Vec<MultivariatePolynomial<F, E, O>>>,
    components: Vec<Vec<MultivariatePolynomial<F, E, O>>>,
}

impl<F: Factorizable, E: Exponent, O: MonomialOrder> Decomposer<F, E, O> {
    fn push(&mut self, ideal: &Ideal<F, E, O>) {
        self.worklist.push(ideal.groebner_basis().to_vec());
    }

    fn process(&mut self, basis: Vec<MultivariatePolynomial<F, E, O>>) {
        let ideal = Ideal::from_groebner_basis(self.ring.clone(), basis);

        if ideal.is_zero() {
            // the polynomial ring is a domain
            self.components.push(vec![]);
            return;
        }

        if let Some(reduced) = square_free_reduction(&ideal) {
            self.push(&reduced);
            return;
        }

        if let Some(f) = self.find_split(&ideal) {
            self.split(&ideal, &f);
            return;
        }

        match ideal.dimension() {
            None => {}
            Some(0) => self.zero_dimensional(ideal),
            Some(_) => self.positive_dimensional(ideal),
        }
    }

    fn split(&mut self, ideal: &Ideal<F, E, O>, f: &MultivariatePolynomial<F, E, O>) {
        debug!("Split on {}", f);
        self.push(&ideal.add_polynomial(f));
        self.push(&ideal.saturation(f));
    }

    /// Find a proper factor of a basis element. Contents with respect to a variable
    /// are tried before a full factorization.
    fn find_split(&mut self, ideal: &Ideal<F, E, O>) -> Option<MultivariatePolynomial<F, E, O>> {
        for g in ideal.groebner_basis() {
            let vars = g.occurring_variables();
            if vars.len() > 1 {
                for v in vars {
                    let c = g.univariate_content(v);
                    if !c.is_constant() {
                        return Some(c);
                    }
                }
            }
        }

        for g in ideal.groebner_basis() {
            let factors = g.factor(&mut self.rng);
            if factors.len() > 1 {
                return Some(factors[0].0.clone());
            }
        }

        None
    }

    /// Make a zero-dimensional candidate radical and split it along a reducible
    /// minimal polynomial of a variable or of a random linear form.
    fn zero_dimensional(&mut self, ideal: Ideal<F, E, O>) {
        let radical = zero_dimensional_radical(&ideal);
        if radical.groebner_basis() != ideal.groebner_basis() {
            self.push(&radical);
            return;
        }

        let field = self.ring.field().clone();
        match primitive_split(&ideal, &field, |c| c, &mut self.rng) {
            Some(f) => self.split(&ideal, &f),
            None => self.components.push(ideal.groebner_basis().to_vec()),
        }
    }

    /// Reduce a positive-dimensional candidate `J` to the zero-dimensional case over
    /// `K(U)`. The radical of the extension, contracted back to `K[x]`, is an
    /// equidimensional component; the rest of `√J` lies in `J + (h)`. If `J` is its
    /// own equidimensional component, its primes are those of the extension.
    fn positive_dimensional(&mut self, ideal: Ideal<F, E, O>) {
        let Some(u) = ideal.maximal_independent_set() else {
            return;
        };

        let n = self.ring.nvars();
        let v: Vec<usize> = (0..n).filter(|i| !u.contains(i)).collect();
        let order: Vec<usize> = v.iter().chain(&u).cloned().collect();
        let mut map = vec![0; n];
        for (new, old) in order.iter().enumerate() {
            map[*old] = new;
        }

        let ext = Extension::new(self.ring.field(), self.ring.variables(), &order, v.len());
        debug!(
            "Extension over the parameters {:?}",
            u.iter().map(|i| self.ring.variables()[*i].name()).collect::<Vec<_>>()
        );

        // a lexicographic basis with V > U is a Gröbner basis of the extension
        let lex: Vec<_> = ideal
            .groebner_basis()
            .iter()
            .map(|g| g.reorder::<LexOrder>().remap_variables(ext.variables.clone(), &map))
            .collect();
        let block = GroebnerBasis::new(&lex).system;

        let mut h = ext.one();
        for g in &block {
            h = MultivariatePolynomial::lcm(&h, &ext.leading_coefficient(g));
        }

        let extended = ext
            .ring
            .ideal(block.iter().map(|g| ext.extend(g)).collect());
        let radical = zero_dimensional_radical(&extended);

        let mut cleared = vec![];
        let mut hr = ext.one();
        for g in radical.groebner_basis() {
            let (c, d) = ext.contract(g);
            cleared.push(self.restore(&c, &order));
            hr = MultivariatePolynomial::lcm(&hr, &d);
        }

        let equidimensional = self
            .ring
            .ideal(cleared)
            .saturation(&self.restore(&hr, &order));
        if equidimensional.groebner_basis() != ideal.groebner_basis() {
            self.push(&equidimensional);

            let h = self.restore(&h, &order);
            if !h.is_constant() {
                debug!("Continue with the leading coefficient {}", h);
                self.push(&ideal.add_polynomial(&h));
            }
            return;
        }

        let field = ext.field.clone();
        match primitive_split(&radical, field.base_field(), |c| field.constant(c), &mut self.rng) {
            Some(q) => {
                let (f, _) = ext.contract(&q);
                let f = self.restore(&f, &order);
                self.split(&ideal, &f);
            }
            None => self.components.push(ideal.groebner_basis().to_vec()),
        }
    }

    /// Move a polynomial in the variables `order` back to the ring.
    fn restore(
        &self,
        p: &MultivariatePolynomial<F, E, LexOrder>,
        order: &[usize],
    ) -> MultivariatePolynomial<F, E, O> {
        p.remap_variables(self.ring.variables().clone(), order)
            .reorder::<O>()
    }

    /// Remove duplicates and components that contain another component, and sort the rest.
    fn remove_redundant(self) -> Vec<Ideal<F, E, O>> {
        let mut bases = self.components;
        bases.sort_by(|a, b| a.internal_cmp(b));
        bases.dedup();

        let ideals: Vec<_> = bases
            .into_iter()
            .map(|b| Ideal::from_groebner_basis(self.ring.clone(), b))
            .collect();

        let mut keep = vec![true; ideals.len()];
        for i in 0..ideals.len() {
            for j in 0..ideals.len() {
                if i != j && keep[j] && ideals[i].contains(&ideals[j]) {
                    debug!("Drop {} as it contains {}", ideals[i], ideals[j]);
                    keep[i] = false;
                    break;
                }
            }
        }

        ideals
            .into_iter()
            .zip(keep)
            .filter_map(|(c, k)| if k { Some(c) } else { None })
            .collect()
    }
}

/// Look for a proper factor of the minimal polynomial of a variable or of a random
/// linear form `l` modulo a radical zero-dimensional ideal, with coefficients sampled
/// from `base` and mapped into the field by `embed`. Returns `q(l)` for the first
/// factor `q` found. Yields `None` once a form has an irreducible minimal polynomial
/// of degree `dim K[x]/I`, which makes the ideal prime, or when all forms are tried.
fn primitive_split<K: Factorizable, E: Exponent, O: MonomialOrder, B: Ring>(
    ideal: &Ideal<K, E, O>,
    base: &B,
    embed: impl Fn(B::Element) -> K::Element,
    rng: &mut StdRng,
) -> Option<MultivariatePolynomial<K, E, O>> {
    let ring = ideal.ring();
    let n = ring.nvars();
    let degree = ideal.vector_space_dimension()?;

    let mut forms: Vec<_> = (0..n).map(|i| ring.variable(i)).collect();
    if n > 1 {
        for _ in 0..LINEAR_FORM_ATTEMPTS {
            let mut l = ring.zero();
            for i in 0..n {
                let c = embed(base.sample(rng, (0, 1000)));
                l = &l + &ring.variable(i).mul_coeff(c);
            }
            forms.push(l);
        }
    }

    for l in forms {
        let m = ideal.minimal_polynomial_of(&l, Variable::new("t"))?;
        let factors = m.factor(rng);
        if factors.len() > 1 || factors.iter().any(|(_, k)| *k > 1) {
            return Some(MultivariatePolynomial::compose_univariate(&factors[0].0, &l));
        }

        if m.degree() == degree {
            debug!("Prime component with primitive element {}", l);
            return None;
        }
    }

    debug!("No primitive element among {} linear forms", LINEAR_FORM_ATTEMPTS);
    None
}

/// Replace every basis element by its square-free part. Yields `None` if no element changes.
fn square_free_reduction<F: FrobeniusRoot, E: Exponent, O: MonomialOrder>(
    ideal: &Ideal<F, E, O>,
) -> Option<Ideal<F, E, O>> {
    let mut changed = false;
    let mut gens = vec![];
    for g in ideal.groebner_basis() {
        let s = g.square_free_part();
        if s != *g {
            if g.field.characteristic() > 0 && (0..g.nvars()).all(|v| g.derivative(v).is_zero()) {
                debug!("Inseparable element {}", g);
            }
            debug!("Square-free reduction {} -> {}", g, s);
            changed = true;
        }
        gens.push(s);
    }

    if changed {
        Some(ideal.ring.ideal(gens))
    } else {
        None
    }
}

/// Seidenberg's lemma: a zero-dimensional ideal that contains a square-free
/// univariate polynomial in every variable is radical over a perfect field.
/// Ideals that are not zero-dimensional are returned unchanged.
pub(crate) fn zero_dimensional_radical<F: FrobeniusRoot, E: Exponent, O: MonomialOrder>(
    ideal: &Ideal<F, E, O>,
) -> Ideal<F, E, O> {
    let ring = ideal.ring();
    let mut gens = ideal.groebner_basis().to_vec();
    let mut changed = false;

    for v in 0..ring.nvars() {
        let Some(m) = ideal.minimal_polynomial(v) else {
            return ideal.clone();
        };

        let m = ring.zero().from_univariate(&m, v);
        let s = m.square_free_part();
        if s != m {
            debug!("Minimal polynomial {} has square-free part {}", m, s);
            gens.push(s);
            changed = true;
        }
    }

    if changed {
        ring.ideal(gens)
    } else {
        ideal.clone()
    }
}

/// Polynomials in the variables `V, U` (lexicographic order, `V` first) and their
/// images in `K(U)[V]`.
struct Extension<F: FrobeniusRoot, E: Exponent> {
    field: RationalFunctionField<F>,
    ring: PolynomialRing<RationalFunctionField<F>, E, LexOrder>,
    variables: Arc<Vec<Variable>>,
    nv: usize,
}

impl<F: FrobeniusRoot, E: Exponent> Extension<F, E> {
    fn new(field: &F, variables: &[Variable], order: &[usize], nv: usize) -> Self {
        let variables: Arc<Vec<Variable>> =
            Arc::new(order.iter().map(|i| variables[*i].clone()).collect());
        let field =
            RationalFunctionField::from_parameters(field.clone(), Arc::new(variables[nv..].to_vec()));
        let ring = PolynomialRing::from_variables(field.clone(), Arc::new(variables[..nv].to_vec()));

        Extension {
            field,
            ring,
            variables,
            nv,
        }
    }

    fn one(&self) -> MultivariatePolynomial<F, E, LexOrder> {
        MultivariatePolynomial::new(self.field.base_field(), None, self.variables.clone()).one()
    }

    /// Group the terms by their exponents in `V`, with coefficients in `K[U]`.
    fn split(
        &self,
        g: &MultivariatePolynomial<F, E, LexOrder>,
    ) -> BTreeMap<Vec<E>, ParameterPolynomial<F>> {
        let params = self.field.polynomial_ring();
        let mut terms = BTreeMap::new();
        for t in g {
            let e: Vec<u32> = t.exponents[self.nv..].iter().map(|e| e.to_u32()).collect();
            terms
                .entry(t.exponents[..self.nv].to_vec())
                .or_insert_with(|| params.zero())
                .append_monomial(t.coefficient.clone(), &e);
        }
        terms
    }

    /// Embed a polynomial in `K[U]`.
    fn embed(&self, c: &ParameterPolynomial<F>) -> MultivariatePolynomial<F, E, LexOrder> {
        let mut res = self.one().zero_with_capacity(c.nterms());
        let mut e = vec![E::zero(); self.variables.len()];
        for t in c {
            for (ee, ce) in e[self.nv..].iter_mut().zip(t.exponents) {
                *ee = E::from_u32(*ce);
            }
            res.append_monomial(t.coefficient.clone(), &e);
        }
        res
    }

    /// The coefficient in `K[U]` of the largest power product in `V`.
    fn leading_coefficient(
        &self,
        g: &MultivariatePolynomial<F, E, LexOrder>,
    ) -> MultivariatePolynomial<F, E, LexOrder> {
        match self.split(g).into_iter().next_back() {
            Some((_, c)) => self.embed(&c),
            None => self.one().zero(),
        }
    }

    /// Map a polynomial to `K(U)[V]` and make it monic.
    fn extend(
        &self,
        g: &MultivariatePolynomial<F, E, LexOrder>,
    ) -> MultivariatePolynomial<RationalFunctionField<F>, E, LexOrder> {
        let mut res = self.ring.zero();
        for (e, c) in self.split(g) {
            res.append_monomial_back(self.field.from_polynomial(c), &e);
        }
        res.make_monic()
    }

    /// Clear the denominators of a polynomial in `K(U)[V]`. Returns the polynomial in
    /// `K[V, U]` and the common denominator.
    fn contract(
        &self,
        g: &MultivariatePolynomial<RationalFunctionField<F>, E, LexOrder>,
    ) -> (
        MultivariatePolynomial<F, E, LexOrder>,
        MultivariatePolynomial<F, E, LexOrder>,
    ) {
        let mut d = self.field.polynomial_ring().one();
        for c in &g.coefficients {
            d = MultivariatePolynomial::lcm(&d, &c.denominator);
        }

        let mut res = self.one().zero();
        let mut e = vec![E::zero(); self.variables.len()];
        for t in g {
            e[..self.nv].copy_from_slice(t.exponents);
            let num = &t.coefficient.numerator * &(&d / &t.coefficient.denominator);
            for s in &num {
                for (ee, se) in e[self.nv..].iter_mut().zip(s.exponents) {
                    *ee = E::from_u32(*se);
                }
                res.append_monomial(s.coefficient.clone(), &e);
            }
        }

        (res, self.embed(&d))
    }
}
