//! Gröbner bases with Faugère's F4 algorithm.
use std::cmp::Ordering;
use std::rc::Rc;

use ahash::HashMap;
use tracing::{debug, instrument};

use crate::domains::Field;

use super::polynomial::MultivariatePolynomial;
use super::{Exponent, MonomialOrder};

/// Check if the monomial `a` divides the monomial `b`.
#[inline]
pub(crate) fn divides<E: Exponent>(a: &[E], b: &[E]) -> bool {
    a.iter().zip(b).all(|(ea, eb)| *ea <= *eb)
}

#[derive(Debug)]
pub struct CriticalPair<F: Field, E: Exponent, O: MonomialOrder> {
    lcm_diff_first: Vec<E>,
    poly_first: Rc<MultivariatePolynomial<F, E, O>>,
    lcm_diff_sec: Vec<E>,
    poly_sec: Rc<MultivariatePolynomial<F, E, O>>,
    lcm: Vec<E>,
    degree: u32,
    disjoint: bool,
}

impl<F: Field, E: Exponent, O: MonomialOrder> CriticalPair<F, E, O> {
    pub fn new(
        f1: Rc<MultivariatePolynomial<F, E, O>>,
        f2: Rc<MultivariatePolynomial<F, E, O>>,
    ) -> CriticalPair<F, E, O> {
        // determine the lcm of leading monomials
        let lcm: Vec<E> = f1
            .max_exp()
            .iter()
            .zip(f2.max_exp())
            .map(|(e1, e2)| *e1.max(e2))
            .collect();

        let lcm_diff_first: Vec<E> = lcm
            .iter()
            .zip(f1.max_exp())
            .map(|(e1, e2)| *e1 - *e2)
            .collect();

        let lcm_diff_sec: Vec<E> = lcm
            .iter()
            .zip(f2.max_exp())
            .map(|(e1, e2)| *e1 - *e2)
            .collect();

        CriticalPair {
            disjoint: lcm_diff_first == f2.max_exp(),
            degree: lcm.iter().map(|e| e.to_u32()).sum(),
            lcm_diff_first,
            poly_first: f1,
            lcm_diff_sec,
            poly_sec: f2,
            lcm,
        }
    }
}

/// A reduced Gröbner basis of a polynomial ideal, sorted by descending leading monomial.
#[derive(Clone, Debug)]
pub struct GroebnerBasis<F: Field, E: Exponent, O: MonomialOrder> {
    pub system: Vec<MultivariatePolynomial<F, E, O>>,
}

impl<F: Field, E: Exponent, O: MonomialOrder> GroebnerBasis<F, E, O> {
    /// Construct the reduced Gröbner basis of the ideal generated by `ideal`,
    /// under the monomial order `O`. Zero generators are ignored.
    #[instrument(level = "debug", skip_all)]
    pub fn new(ideal: &[MultivariatePolynomial<F, E, O>]) -> GroebnerBasis<F, E, O> {
        let system: Vec<_> = ideal
            .iter()
            .filter(|p| !p.is_zero())
            .map(|p| p.clone().make_monic())
            .collect();

        if let Some(c) = system.iter().find(|p| p.is_constant()) {
            return GroebnerBasis {
                system: vec![c.one()],
            };
        }

        let mut b = GroebnerBasis { system };
        if !b.system.is_empty() {
            b.f4();
        }
        b.reduce_basis()
    }

    /// Add a new polynomial to the basis, updating and filtering the existing
    /// basis and critical pairs, based on Gebauer and Moeller's redundant pair criteria.
    ///
    /// Adapted from "A Computational Approach to Commutative Algebra" by Thomas Becker Volker Weispfenning.
    fn update(
        basis: &mut Vec<Rc<MultivariatePolynomial<F, E, O>>>,
        critical_pairs: &mut Vec<CriticalPair<F, E, O>>,
        f: MultivariatePolynomial<F, E, O>,
    ) {
        let f = Rc::new(f);

        let mut new_pairs: Vec<_> = basis
            .iter()
            .map(|b| (CriticalPair::new(b.clone(), f.clone()), true))
            .collect();

        for i in 0..new_pairs.len() {
            new_pairs[i].1 = false;
            new_pairs[i].1 = new_pairs[i].0.disjoint
                || new_pairs
                    .iter()
                    .all(|p2| !p2.1 || !divides(&p2.0.lcm, &new_pairs[i].0.lcm));
        }

        new_pairs.retain(|p| p.1 && !p.0.disjoint);

        critical_pairs.retain(|p| {
            !divides(f.max_exp(), &p.lcm)
                || p.poly_first
                    .max_exp()
                    .iter()
                    .zip(f.max_exp())
                    .zip(&p.lcm)
                    .all(|((e1, e2), ecm)| e1.max(e2) == ecm)
                || p.poly_sec
                    .max_exp()
                    .iter()
                    .zip(f.max_exp())
                    .zip(&p.lcm)
                    .all(|((e1, e2), ecm)| e1.max(e2) == ecm)
        });

        critical_pairs.extend(new_pairs.into_iter().map(|np| np.0));

        basis.retain(|b| !divides(f.max_exp(), b.max_exp()));

        basis.push(f);
    }

    /// The F4 algorithm for computing a Groebner basis.
    ///
    /// Adapted from [A new efficient algorithm for computing Gröbner bases (F4)](https://doi.org/10.1016/S0022-4049(99)00005-5) by Jean-Charles Faugére.
    fn f4(&mut self) {
        let nvars = self.system[0].nvars();
        let field = self.system[0].field.clone();

        let mut basis = vec![];
        let mut critical_pairs = vec![];

        for f in self.system.drain(..) {
            Self::update(&mut basis, &mut critical_pairs, f);
        }

        let mut matrix: Vec<Vec<(F::Element, usize)>> = vec![];

        struct MonomialData {
            present: bool,
            column: usize,
        }

        let mut all_monomials: HashMap<Vec<E>, MonomialData> = HashMap::default();
        let mut current_monomials = vec![];
        let mut sorted_monomial_indices = vec![];
        let mut exp = vec![E::zero(); nvars];
        let mut new_polys = vec![];
        let mut buffer = vec![];
        let mut selected_polys: Vec<MultivariatePolynomial<F, E, O>> = vec![];

        let mut iter_count = 1;
        while let Some(lowest_lcm_deg) = critical_pairs.iter().map(|x| x.degree).min() {
            // select the critical pairs with the lowest lcm degree
            debug!(
                "Iteration {}: degree={}, basis length={}, critical pairs={}",
                iter_count,
                lowest_lcm_deg,
                basis.len(),
                critical_pairs.len(),
            );
            iter_count += 1;

            selected_polys.clear();
            let mut i = critical_pairs.len();
            while i > 0 {
                i -= 1;
                if critical_pairs[i].degree == lowest_lcm_deg {
                    let pair = critical_pairs.swap_remove(i);

                    let new_f1 = (*pair.poly_first).clone().mul_exp(&pair.lcm_diff_first);
                    selected_polys.push(new_f1);

                    let new_f2 = (*pair.poly_sec).clone().mul_exp(&pair.lcm_diff_sec);
                    selected_polys.push(new_f2);
                }
            }

            // symbolic preprocessing

            for x in all_monomials.values_mut() {
                x.present = false;
            }

            // flag all head monomials as done
            for p in &selected_polys {
                all_monomials
                    .entry(p.max_exp().to_vec())
                    .and_modify(|m| m.present = true)
                    .or_insert(MonomialData {
                        present: true,
                        column: 0,
                    });
            }

            let mut i = 0;
            while i < selected_polys.len() {
                for monom in selected_polys[i].exponents_iter() {
                    if let Some(m) = all_monomials.get_mut(monom) {
                        if m.present {
                            continue;
                        }
                        m.present = true;
                    } else {
                        all_monomials.insert(
                            monom.to_vec(),
                            MonomialData {
                                present: true,
                                column: 0,
                            },
                        );
                    }

                    // search for a reducer and select the smallest for better performance
                    if let Some(g) = basis
                        .iter()
                        .filter(|g| divides(g.max_exp(), monom))
                        .min_by_key(|g| g.nterms())
                    {
                        for ((e, pe), ge) in exp.iter_mut().zip(monom).zip(g.max_exp()) {
                            *e = *pe - *ge;
                        }

                        new_polys.push((**g).clone().mul_exp(&exp));
                    }
                }

                i += 1;

                selected_polys.append(&mut new_polys);
            }

            // construct a matrix that is sparse in the columns

            current_monomials.clear();
            sorted_monomial_indices.clear();

            for (k, v) in &all_monomials {
                if v.present {
                    current_monomials.extend_from_slice(k);
                }
            }

            sorted_monomial_indices.extend(0..current_monomials.len() / nvars);

            debug!(
                "Matrix shape={}x{}, monomials in use={}",
                selected_polys.len(),
                sorted_monomial_indices.len(),
                all_monomials.len()
            );

            // sort monomials in descending order
            sorted_monomial_indices.sort_unstable_by(|e1, e2| {
                O::cmp(
                    &current_monomials[*e2 * nvars..(*e2 + 1) * nvars],
                    &current_monomials[*e1 * nvars..(*e1 + 1) * nvars],
                )
            });

            for (column, index) in sorted_monomial_indices.iter().enumerate() {
                if let Some(m) =
                    all_monomials.get_mut(&current_monomials[index * nvars..(index + 1) * nvars])
                {
                    m.column = column;
                }
            }

            matrix.clear();
            for p in &selected_polys {
                let row = p
                    .into_iter()
                    .rev()
                    .map(|t| (t.coefficient.clone(), all_monomials[t.exponents].column))
                    .collect();
                matrix.push(row);
            }

            // row-reduce the sparse matrix

            let mut non_empty_pivots = 0;
            for pivot_col in 0..sorted_monomial_indices.len() {
                // find the smallest row with the pivot as leading column
                let mut best_pivot: Option<(usize, usize)> = None;
                for (row_index, row) in matrix[non_empty_pivots..].iter().enumerate() {
                    if row[0].1 == pivot_col && best_pivot.map_or(true, |b| b.1 > row.len()) {
                        best_pivot = Some((non_empty_pivots + row_index, row.len()));
                    }
                }

                match best_pivot {
                    Some(b) => {
                        matrix.swap(non_empty_pivots, b.0);
                    }
                    None => continue,
                }

                let inv_pivot = field.inv(&matrix[non_empty_pivots][0].0);

                for r in 0..matrix.len() {
                    let row = &matrix[r];
                    let pivot = &matrix[non_empty_pivots];
                    if r == non_empty_pivots || row[0].1 != pivot_col {
                        continue;
                    }

                    let ratio = field.neg(&field.mul(&row[0].0, &inv_pivot));

                    let mut pos_pivot = 0;
                    let mut pos_row = 0;

                    buffer.clear();

                    while pos_row < row.len() && pos_pivot < pivot.len() {
                        match row[pos_row].1.cmp(&pivot[pos_pivot].1) {
                            Ordering::Less => {
                                buffer.push((row[pos_row].0.clone(), row[pos_row].1));
                                pos_row += 1;
                            }
                            Ordering::Greater => {
                                buffer.push((
                                    field.mul(&ratio, &pivot[pos_pivot].0),
                                    pivot[pos_pivot].1,
                                ));
                                pos_pivot += 1;
                            }
                            Ordering::Equal => {
                                let new_coeff = field
                                    .add(&row[pos_row].0, &field.mul(&ratio, &pivot[pos_pivot].0));

                                if !F::is_zero(&new_coeff) {
                                    buffer.push((new_coeff, row[pos_row].1));
                                }

                                pos_row += 1;
                                pos_pivot += 1;
                            }
                        }
                    }

                    while pos_row < row.len() {
                        buffer.push((row[pos_row].0.clone(), row[pos_row].1));
                        pos_row += 1;
                    }

                    while pos_pivot < pivot.len() {
                        buffer.push((field.mul(&ratio, &pivot[pos_pivot].0), pivot[pos_pivot].1));
                        pos_pivot += 1;
                    }

                    std::mem::swap(&mut matrix[r], &mut buffer);
                }

                matrix.retain(|r| !r.is_empty());

                non_empty_pivots += 1;
            }

            // rows with a new leading monomial extend the basis
            for m in &matrix {
                let lmi = sorted_monomial_indices[m[0].1];
                let lm = &current_monomials[lmi * nvars..(lmi + 1) * nvars];

                if selected_polys.iter().all(|p| p.max_exp() != lm) {
                    // create the new polynomial in the proper order
                    let mut poly = selected_polys[0].zero_with_capacity(m.len());
                    for (coeff, col) in m.iter().rev() {
                        let index = sorted_monomial_indices[*col];
                        poly.coefficients.push(coeff.clone());
                        poly.exponents
                            .extend_from_slice(&current_monomials[index * nvars..(index + 1) * nvars]);
                    }

                    Self::update(&mut basis, &mut critical_pairs, poly.make_monic());
                }
            }
        }

        self.system = basis.into_iter().map(|x| (*x).clone()).collect();
    }

    /// Completely reduce the polynomial `p` w.r.t the polynomials `gs`.
    /// For example reducing `f=y^2+x` by `g=[x]` yields `y^2`.
    pub fn reduce(
        p: &MultivariatePolynomial<F, E, O>,
        gs: &[MultivariatePolynomial<F, E, O>],
    ) -> MultivariatePolynomial<F, E, O> {
        let nvars = p.nvars();
        let mut r = p.clone();

        // irreducible terms, in descending order
        let mut rest_coeff = vec![];
        let mut rest_exponents = vec![];

        let mut monom = vec![E::zero(); nvars];

        while !r.is_zero() {
            // find a divisor that has the least amount of terms
            if let Some(g) = gs
                .iter()
                .filter(|g| !g.is_zero() && divides(g.max_exp(), r.max_exp()))
                .min_by_key(|g| g.nterms())
            {
                for ((e, e1), e2) in monom.iter_mut().zip(r.max_exp()).zip(g.max_exp()) {
                    *e = *e1 - *e2;
                }

                let ratio = r.field.neg(&r.field.div(r.max_coeff(), g.max_coeff()));
                r = r + &g.clone().mul_monomial(&ratio, &monom);
            } else {
                // strip leading monomial that is not reducible
                let n = r.nterms() - 1;
                rest_exponents.extend_from_slice(r.exponents(n));
                r.exponents.truncate(n * nvars);
                if let Some(c) = r.coefficients.pop() {
                    rest_coeff.push(c);
                }
            }
        }

        // append in ascending order
        let mut q = p.zero_with_capacity(rest_coeff.len());
        while let Some(c) = rest_coeff.pop() {
            let l = rest_coeff.len();
            q.coefficients.push(c);
            q.exponents
                .extend_from_slice(&rest_exponents[l * nvars..(l + 1) * nvars]);
        }

        q
    }

    /// Remove lead-reducible polynomials, fully reduce the rest and make them monic.
    pub fn reduce_basis(mut self) -> Self {
        // filter lead-reducible polynomials
        let mut res = vec![true; self.system.len()];
        'l1: for (i, p1) in self.system.iter().enumerate() {
            for (j, p2) in self.system.iter().enumerate() {
                if i != j && res[j] && divides(p2.max_exp(), p1.max_exp()) {
                    res[i] = false;
                    continue 'l1;
                }
            }
        }

        let mut lead_reduced = vec![];
        for (i, p) in self.system.drain(..).enumerate() {
            if res[i] {
                lead_reduced.push(p);
            }
        }

        let mut basis = vec![];
        for i in 0..lead_reduced.len() {
            lead_reduced.swap(0, i);
            let h = Self::reduce(&lead_reduced[0], &lead_reduced[1..]);
            if !h.is_zero() {
                basis.push(h.make_monic());
            }
        }

        basis.sort_by(|p1, p2| O::cmp(p2.max_exp(), p1.max_exp()));

        GroebnerBasis { system: basis }
    }

    /// Check if `system` is a Gröbner basis by reducing all S-polynomials.
    pub fn is_groebner_basis(system: &[MultivariatePolynomial<F, E, O>]) -> bool {
        for (i, p1) in system.iter().enumerate() {
            for p2 in &system[i + 1..] {
                let lcm: Vec<E> = p1
                    .max_exp()
                    .iter()
                    .zip(p2.max_exp())
                    .map(|(e1, e2)| *e1.max(e2))
                    .collect();

                // construct s-polynomial
                let extra_factor_f1: Vec<E> = lcm
                    .iter()
                    .zip(p1.max_exp())
                    .map(|(e1, e2)| *e1 - *e2)
                    .collect();

                let extra_factor_f2: Vec<E> = lcm
                    .iter()
                    .zip(p2.max_exp())
                    .map(|(e1, e2)| *e1 - *e2)
                    .collect();

                let new_f1 = p1
                    .clone()
                    .mul_exp(&extra_factor_f1)
                    .mul_coeff(p2.max_coeff().clone());
                let new_f2 = p2
                    .clone()
                    .mul_exp(&extra_factor_f2)
                    .mul_coeff(p1.max_coeff().clone());

                let s = new_f1 - new_f2;

                if !Self::reduce(&s, system).is_zero() {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod test {
    use crate::domains::finite_field::FiniteField;
    use crate::domains::rational::Q;
    use crate::domains::Ring;
    use crate::poly::polynomial::PolynomialRing;
    use crate::poly::{GrevLexOrder, LexOrder};

    use super::GroebnerBasis;

    #[test]
    fn lex_basis() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let ideal = [&(&x * &x) + &y, &(&x * &y) - &one];
        let gb = GroebnerBasis::new(&ideal);

        assert_eq!(gb.system, vec![&x + &(&y * &y), &y.pow(3) + &one]);
        assert!(GroebnerBasis::is_groebner_basis(&gb.system));

        // the reduced basis does not depend on the generator order
        let gb2 = GroebnerBasis::new(&[ideal[1].clone(), ideal[0].clone(), ideal[0].clone()]);
        assert_eq!(gb.system, gb2.system);
    }

    #[test]
    fn grevlex_cyclic() {
        let f = FiniteField::new(32003).unwrap();
        let r = PolynomialRing::<_, u16, GrevLexOrder>::new(f, &["x", "y", "z"]).unwrap();
        let [one, x, y, z]: [_; 4] = r.gens().try_into().unwrap();

        let ideal = [
            &(&x + &y) + &z,
            &(&(&x * &y) + &(&y * &z)) + &(&z * &x),
            &(&(&x * &y) * &z) - &one,
        ];
        let gb = GroebnerBasis::new(&ideal);
        assert!(GroebnerBasis::is_groebner_basis(&gb.system));
        for g in &ideal {
            assert!(GroebnerBasis::reduce(g, &gb.system).is_zero());
        }
        assert!(gb.system.iter().all(|p| f.is_one(p.max_coeff())));
    }

    #[test]
    fn unit_and_zero() {
        let r = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
        let [one, x, y]: [_; 3] = r.gens().try_into().unwrap();

        let gb = GroebnerBasis::new(&[&x - &one, &x + &one]);
        assert_eq!(gb.system, vec![one.clone()]);

        let gb = GroebnerBasis::new(&[r.zero()]);
        assert!(gb.system.is_empty());

        assert_eq!(
            GroebnerBasis::reduce(&(&(&y * &y) + &x), &[x.clone()]),
            &y * &y
        );
    }
}
