use std::time::Instant;

use polyrad::{
    domains::rational::{Rational, Q},
    options::EngineOptions,
    poly::{polynomial::PolynomialRing, LexOrder},
    roots::{real_roots, refine_roots},
};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("POLYRAD_LOG"))
        .init();

    let ring = PolynomialRing::<_, u16, LexOrder>::new(Q, &["x"]).unwrap();
    let [one, x]: [_; 2] = ring.gens().try_into().unwrap();
    let options = EngineOptions::default().with_diagnostics(true);

    let f = &(&x * &x) + &one;
    let start = Instant::now();
    let mut roots = ring.complex_roots(&f, None, &options).unwrap();
    println!("> Roots of {} =", f);
    for r in &roots {
        println!("\t{}", r);
    }

    for k in [10, 1000, 1_000_000] {
        refine_roots(&mut roots, &Rational::from((1, k)), &options).unwrap();
        println!("> Refined to 1/{}:", k);
        for r in &roots {
            println!("\t{}", r);
        }
    }
    println!("Computed in {:?}", start.elapsed());

    let g = &(&x.pow(3) - &x.pow(2)) - &(&(&x + &x) - &one);
    let start = Instant::now();
    let roots = ring
        .complex_roots(&g.pow(2), Some(&Rational::from((1, 100))), &options)
        .unwrap();
    println!("> Roots of ({})^2 =", g);
    for r in &roots {
        println!("\t{}", r);
    }

    let real = real_roots(&g.to_univariate(0), Some(&Rational::from((1, 1000))), &options).unwrap();
    println!("> Real roots of {} =", g);
    for r in &real {
        println!("\t{}", r);
    }
    println!("Computed in {:?}", start.elapsed());
}
