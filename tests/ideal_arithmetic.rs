use polyrad::{
    domains::{finite_field::FiniteField, rational::Q},
    error::InvalidDomainError,
    poly::{groebner::GroebnerBasis, polynomial::PolynomialRing, GrevLexOrder, LexOrder},
};

#[test]
fn ring_construction() {
    assert_eq!(FiniteField::new(6), Err(InvalidDomainError::NotPrime(6)));
    assert_eq!(
        PolynomialRing::<_, u16, LexOrder>::new(Q, &["x", "x"]).map(|_| ()),
        Err(InvalidDomainError::DuplicateVariable("x".into()))
    );
    assert_eq!(
        PolynomialRing::<_, u16, LexOrder>::new(Q, &[]).map(|_| ()),
        Err(InvalidDomainError::NoVariables)
    );
}

#[test]
fn sum_product_intersection() {
    let ring = PolynomialRing::<_, u16, GrevLexOrder>::new(Q, &["x", "y", "z"]).unwrap();
    let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();

    let i = ring.ideal(vec![&(&x * &x) - &y, &y * &z]);
    let j = ring.ideal(vec![&x - &z, y.clone()]);

    let sum = i.sum(&j);
    assert!(sum.contains(&i) && sum.contains(&j));

    let product = i.product(&j);
    let intersection = i.intersect(&j);
    assert!(intersection.contains(&product));
    assert!(i.contains(&intersection) && j.contains(&intersection));

    for g in i.generators() {
        let q = i.quotient(g);
        assert!(q.is_one());
    }

    let f = &x + &y;
    let q = i.quotient(&f);
    for g in q.groebner_basis() {
        assert!(i.contains_polynomial(&(g * &f)));
    }
}

#[test]
fn canonical_bases() {
    let ring = PolynomialRing::<_, u16, LexOrder>::new(FiniteField::new(13).unwrap(), &["x", "y"]).unwrap();
    let [_, x, y]: [_; 3] = ring.gens().try_into().unwrap();

    let a = vec![&(&x * &y) - &ring.one(), &(&y * &y) - &x];
    let mut b = a.clone();
    b.reverse();
    b.push(&a[0] + &a[1]);

    let ga = GroebnerBasis::new(&a).system;
    let gb = GroebnerBasis::new(&b).system;
    assert!(GroebnerBasis::is_groebner_basis(&ga));
    assert_eq!(ga, gb);
    assert_eq!(ring.ideal(a), ring.ideal(b));
}

#[test]
fn saturation_removes_components() {
    let ring = PolynomialRing::<_, u16, GrevLexOrder>::new(Q, &["x", "y"]).unwrap();
    let [_, x, y]: [_; 3] = ring.gens().try_into().unwrap();

    // the line x = 0 together with the point (1, 0)
    let i = ring.ideal(vec![&x * &y, &(&x * &x) - &x]);
    let s = i.saturation(&x);
    assert_eq!(s, ring.ideal(vec![&x - &ring.one(), y.clone()]));
    assert_eq!(i.dimension(), Some(1));
    assert_eq!(s.dimension(), Some(0));
    assert_eq!(s.vector_space_dimension(), Some(1));
}
