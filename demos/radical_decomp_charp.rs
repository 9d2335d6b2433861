use std::time::Instant;

use polyrad::{
    domains::{finite_field::FiniteField, rational_function::RationalFunctionField},
    options::EngineOptions,
    poly::{polynomial::PolynomialRing, LexOrder},
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn inseparable() {
    let gf5 = FiniteField::new(5).unwrap();
    let field = RationalFunctionField::new(gf5, &["c"]).unwrap();
    let ring = PolynomialRing::<_, u16, LexOrder>::new(field.clone(), &["x", "y", "z"]).unwrap();
    let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();
    let c = ring.constant(field.parameter(0));

    let ideal = ring.ideal(vec![(&(&y * &y) - &x).pow(5), (&(&z * &z) - &c).pow(5)]);

    let start = Instant::now();
    let components = ideal
        .radical_decomposition(&EngineOptions::default().with_diagnostics(true))
        .unwrap();

    println!("> Radical decomposition of {} over {} =", ideal, ring.field());
    for c in &components {
        println!("\t{}", c);
    }
    println!("Computed in {:?}", start.elapsed());
}

fn points() {
    let gf7 = FiniteField::new(7).unwrap();
    let ring = PolynomialRing::<_, u16, LexOrder>::new(gf7, &["x", "y"]).unwrap();
    let [one, x, y]: [_; 3] = ring.gens().try_into().unwrap();

    let ideal = ring.ideal(vec![&x.pow(7) - &x, &(&y * &y) - &(&x + &one)]);

    let start = Instant::now();
    let components = ideal.radical_decomposition(&EngineOptions::default()).unwrap();

    println!("> Radical decomposition of {} over {} =", ideal, ring.field());
    for c in &components {
        println!("\t{}", c);
    }
    println!("Computed in {:?}", start.elapsed());
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("POLYRAD_LOG"))
        .init();

    inseparable();
    points();
}
