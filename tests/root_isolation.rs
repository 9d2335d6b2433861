use std::sync::Arc;

use polyrad::{
    domains::{
        complex_rational::{ComplexRational, ComplexRationalField},
        rational::{Rational, RationalField},
    },
    error::IsolationError,
    options::EngineOptions,
    poly::{polynomial::PolynomialRing, univariate::UnivariatePolynomial, Variable},
    roots::{complex_roots, real_roots, refine_roots, ComplexRootRegion},
};
use proptest::prelude::*;

fn from_roots(roots: &[i64]) -> UnivariatePolynomial<RationalField> {
    let x = Arc::new(Variable::new("x"));
    let one = UnivariatePolynomial::from_coefficients(&RationalField::new(), vec![1.into()], x);
    roots.iter().fold(one.clone(), |acc, r| {
        &acc * &(&one.monomial(1.into(), 1) + &one.constant(Rational::from(-r)))
    })
}

fn disjoint(a: &ComplexRootRegion, b: &ComplexRootRegion) -> bool {
    let (ar, br) = (a.real_interval(), b.real_interval());
    let (ai, bi) = (a.imaginary_interval(), b.imaginary_interval());
    ar.1 <= br.0 || br.1 <= ar.0 || ai.1 <= bi.0 || bi.1 <= ai.0
}

#[test]
fn plus_and_minus_i() {
    let ring: PolynomialRing<_> = PolynomialRing::new(RationalField::new(), &["x"]).unwrap();
    let x = ring.variable(0);
    let f = &(&x * &x) + &ring.one();
    let options = EngineOptions::default();

    let mut previous: Option<Vec<ComplexRootRegion>> = None;
    for k in 1..6 {
        let eps = Rational::from((1, 10i64.pow(k)));
        let roots = ring.complex_roots(&f, Some(&eps), &options).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots[0].contains(&ComplexRational::new(0.into(), (-1).into())));
        assert!(roots[1].contains(&ComplexRational::i()));
        assert!(roots.iter().all(|r| r.radius() <= eps));

        if let Some(p) = previous {
            for (old, new) in p.iter().zip(&roots) {
                assert!(new.radius() < old.radius());
            }
        }
        previous = Some(roots);
    }
}

#[test]
fn refinement_is_path_independent() {
    let options = EngineOptions::default();
    let f = from_roots(&[-3, 1, 4]);
    let coarse = Rational::from((1, 10));
    let fine = Rational::from((1, 10_000));

    let mut stepwise = complex_roots(&f, Some(&coarse), &options).unwrap();
    refine_roots(&mut stepwise, &fine, &options).unwrap();
    let direct = complex_roots(&f, Some(&fine), &options).unwrap();

    assert_eq!(stepwise, direct);
    assert!(direct.iter().all(|r| r.radius() <= fine));
}

#[test]
fn display() {
    let options = EngineOptions::default();
    let f = from_roots(&[2, 2]);
    let roots = complex_roots(&f, Some(&Rational::from((1, 4))), &options).unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0], roots[1]);
    assert!(format!("{}", roots[0]).ends_with("(multiplicity 2)"));
}

#[test]
fn gaussian_polynomial() {
    // x^2 - 2i x - 2 = (x - (1 + i))(x - (-1 + i))
    let field = ComplexRationalField::new();
    let f = UnivariatePolynomial::from_coefficients(
        &field,
        vec![
            field.to_element((-2, 1), (0, 1)),
            field.to_element((0, 1), (-2, 1)),
            field.to_element((1, 1), (0, 1)),
        ],
        Arc::new(Variable::new("z")),
    );

    let roots = complex_roots(&f, Some(&Rational::from((1, 100))), &EngineOptions::default()).unwrap();
    assert_eq!(roots.len(), 2);
    assert!(roots[0].contains(&ComplexRational::new((-1).into(), 1.into())));
    assert!(roots[1].contains(&ComplexRational::new(1.into(), 1.into())));
}

#[test]
fn degenerate_input() {
    let options = EngineOptions::default();
    let zero = from_roots(&[]).zero();
    assert_eq!(
        complex_roots(&zero, None, &options),
        Err(IsolationError::ZeroPolynomial)
    );
    assert_eq!(
        real_roots(&zero, None, &options).map(|r| r.len()),
        Err(IsolationError::ZeroPolynomial)
    );

    let f = from_roots(&[1]);
    for eps in [Rational::new(), Rational::from(-1)] {
        assert_eq!(
            complex_roots(&f, Some(&eps), &options),
            Err(IsolationError::NonPositivePrecision)
        );
    }

    let mut roots = complex_roots(&f, None, &options).unwrap();
    assert_eq!(
        refine_roots(&mut roots, &Rational::from(-1), &options),
        Err(IsolationError::NonPositivePrecision)
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn integer_roots_are_isolated(roots in prop::collection::btree_set(-6i64..7, 1..5)) {
        let roots: Vec<i64> = roots.into_iter().collect();
        let f = from_roots(&roots);
        let options = EngineOptions::default();

        let regions = complex_roots(&f, Some(&Rational::from((1, 8))), &options).unwrap();
        prop_assert_eq!(regions.len(), roots.len());
        for r in &roots {
            let z = ComplexRational::from_real(Rational::from(*r));
            prop_assert_eq!(regions.iter().filter(|g| g.contains(&z)).count(), 1);
        }
        for (k, a) in regions.iter().enumerate() {
            for b in &regions[k + 1..] {
                prop_assert!(disjoint(a, b));
            }
        }

        let intervals = real_roots(&f, None, &options).unwrap();
        prop_assert_eq!(intervals.len(), roots.len());
        for (i, r) in intervals.iter().zip(&roots) {
            prop_assert!(i.contains(&Rational::from(*r)));
        }
    }
}
