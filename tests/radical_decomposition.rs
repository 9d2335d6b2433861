use polyrad::{
    domains::{
        finite_field::FiniteField,
        rational::Q,
        rational_function::RationalFunctionField,
    },
    ideal::Ideal,
    options::EngineOptions,
    poly::{polynomial::PolynomialRing, GrevLexOrder, LexOrder},
};
use proptest::prelude::*;

fn same_components<F, E, O>(a: &[Ideal<F, E, O>], b: &[Ideal<F, E, O>]) -> bool
where
    F: polyrad::domains::Field,
    E: polyrad::poly::Exponent,
    O: polyrad::poly::MonomialOrder,
{
    a.len() == b.len() && a.iter().all(|c| b.contains(c))
}

#[test]
fn inseparable_rational_function_field() {
    let gf5 = FiniteField::new(5).unwrap();
    let field = RationalFunctionField::new(gf5, &["c"]).unwrap();
    let ring = PolynomialRing::<_, u16, LexOrder>::new(field.clone(), &["x", "y", "z"]).unwrap();
    let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();
    let c = ring.constant(field.parameter(0));

    let f = (&(&y * &y) - &x).pow(5);
    let g = (&(&z * &z) - &c).pow(5);
    let ideal = ring.ideal(vec![f.clone(), g.clone()]);

    let options = EngineOptions::default().with_diagnostics(true);
    let components = ideal.radical_decomposition(&options).unwrap();
    assert_eq!(components.len(), 1);

    let expected = ring.ideal(vec![&(&y * &y) - &x, &(&z * &z) - &c]);
    assert_eq!(components[0], expected);
    assert!(components[0].contains(&ideal));
    assert!(components[0].is_radical(&options).unwrap());

    // the generators do not depend on the input order
    let swapped = ring.ideal(vec![g, f]).radical_decomposition(&options).unwrap();
    assert!(same_components(&components, &swapped));
}

#[test]
fn separable_power_over_prime_field() {
    let f = FiniteField::new(5).unwrap();
    let ring = PolynomialRing::<_, u16, LexOrder>::new(f, &["x", "y"]).unwrap();
    let [_, x, y]: [_; 3] = ring.gens().try_into().unwrap();

    // (x^5 - y^5) = (x - y)^5
    let i = ring.ideal(vec![&x.pow(5) - &y.pow(5)]);
    let d = i.radical_decomposition(&EngineOptions::default()).unwrap();
    assert_eq!(d, vec![ring.ideal(vec![&x - &y])]);
}

#[test]
fn components_are_radical_and_cover_the_ideal() {
    let f = FiniteField::new(7).unwrap();
    let ring = PolynomialRing::<_, u16, GrevLexOrder>::new(f, &["x", "y", "z"]).unwrap();
    let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();
    let options = EngineOptions::default();

    let i = ring.ideal(vec![
        &(&x * &x) * &y,
        &(&x * &z) - &(&y * &z),
        &z.pow(3) - &z,
    ]);
    let components = i.radical_decomposition(&options).unwrap();
    assert!(!components.is_empty());

    let mut intersection = ring.ideal(vec![ring.one()]);
    for c in &components {
        assert!(c.contains(&i));
        assert_eq!(c.radical_decomposition(&options).unwrap(), vec![c.clone()]);
        intersection = intersection.intersect(c);
    }

    // the intersection is the radical, which contains every element of I
    assert!(intersection.contains(&i));
    assert_eq!(intersection, i.radical(&options).unwrap());

    // no component contains another
    for (k, a) in components.iter().enumerate() {
        for b in &components[k + 1..] {
            assert!(!a.contains(b) && !b.contains(a));
        }
    }
}

#[test]
fn order_independence() {
    let ring = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
    let [_, x, y]: [_; 3] = ring.gens().try_into().unwrap();
    let options = EngineOptions::default();

    // the points (0, 0), (1, 0) and (1, 1)
    let gens = vec![&(&x * &y) - &y, &(&y * &y) - &y, &(&x * &x) - &x];
    let reference = ring.ideal(gens.clone()).radical_decomposition(&options).unwrap();
    assert!(reference.contains(&ring.ideal(vec![&x - &ring.one(), &y - &ring.one()])));

    let mut permuted = gens.clone();
    permuted.rotate_left(1);
    let a = ring.ideal(permuted.clone()).radical_decomposition(&options).unwrap();
    permuted.reverse();
    let b = ring.ideal(permuted).radical_decomposition(&options).unwrap();

    assert!(same_components(&reference, &a));
    assert!(same_components(&reference, &b));
}

#[test]
fn positive_dimension_over_q() {
    let ring = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y", "z"]).unwrap();
    let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();

    // a double structure on the twisted cubic
    let i = ring.ideal(vec![
        (&(&x * &x) - &y).pow(2),
        &(&x * &y) - &z,
    ]);
    let options = EngineOptions::default();
    let components = i.radical_decomposition(&options).unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(
        components[0],
        ring.ideal(vec![&(&x * &x) - &y, &(&x * &y) - &z])
    );
    assert_eq!(components[0].dimension(), Some(1));
}

#[test]
fn irreducible_in_positive_dimension() {
    let options = EngineOptions::default();

    let ring = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "y"]).unwrap();
    let [one, x, y]: [_; 3] = ring.gens().try_into().unwrap();
    let two = ring.constant(Q.to_element(2, 1));

    for p in [
        &(&x * &x) - &(&two * &(&y * &y)),
        &(&(&x * &x) + &(&y * &y)) - &one,
        &(&x * &y * &y) - &(&x * &x * &x) - &one,
    ] {
        let i = ring.ideal(vec![p]);
        assert_eq!(i.radical_decomposition(&options).unwrap(), vec![i.clone()]);
    }

    let f = FiniteField::new(7).unwrap();
    let ring = PolynomialRing::<_, u16, LexOrder>::new(f, &["x", "y", "z"]).unwrap();
    let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();
    let three = ring.constant(f.to_element(3));

    // 3 is not a square modulo 7
    let i = ring.ideal(vec![&(&x * &x) - &(&three * &(&y * &y)), z.clone()]);
    assert_eq!(i.radical_decomposition(&options).unwrap(), vec![i.clone()]);

    let i = ring.ideal(vec![&(&x * &x) - &three, &(&y * &y) - &three]);
    let components = i.radical_decomposition(&options).unwrap();
    assert_eq!(components.len(), 2);
    assert!(components.contains(&ring.ideal(vec![&x - &y, &(&y * &y) - &three])));
    assert!(components.contains(&ring.ideal(vec![&x + &y, &(&y * &y) - &three])));
}

fn small_polynomial() -> impl Strategy<Value = Vec<(u64, u16, u16)>> {
    prop::collection::vec((1u64..7, 0u16..3, 0u16..3), 1..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_ideals_over_gf7(a in small_polynomial(), b in small_polynomial()) {
        let f = FiniteField::new(7).unwrap();
        let ring = PolynomialRing::<_, u16, GrevLexOrder>::new(f, &["x", "y"]).unwrap();

        let build = |terms: &[(u64, u16, u16)]| {
            let mut p = ring.zero();
            for (c, i, j) in terms {
                p.append_monomial(f.to_element(*c), &[*i, *j]);
            }
            p
        };

        let i = ring.ideal(vec![build(&a), build(&b)]);
        let options = EngineOptions::default();
        let components = i.radical_decomposition(&options).unwrap();

        let mut intersection = ring.ideal(vec![ring.one()]);
        for c in &components {
            prop_assert!(c.contains(&i));
            prop_assert!(!c.is_one());
            prop_assert_eq!(c.radical_decomposition(&options).unwrap(), vec![c.clone()]);
            intersection = intersection.intersect(c);
        }

        // every element of the intersection has a power in I, i.e., I : g^∞ = (1)
        for g in intersection.groebner_basis() {
            prop_assert!(i.saturation(g).is_one());
        }

        for (k, a) in components.iter().enumerate() {
            for b in &components[k + 1..] {
                prop_assert!(!a.contains(b) && !b.contains(a));
            }
        }

        let swapped = ring.ideal(vec![build(&b), build(&a)]).radical_decomposition(&options).unwrap();
        prop_assert!(same_components(&components, &swapped));
    }
}
