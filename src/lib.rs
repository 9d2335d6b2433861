//! Polyrad is an exact computer algebra engine for two tasks:
//! the radical decomposition of polynomial ideals and the isolation
//! of complex roots of univariate polynomials.
//!
//! Ideals can be defined over prime fields, rational function fields over them,
//! the rationals and the Gaussian rationals. In positive characteristic the
//! inseparable case, where generators are `p`-th powers, is supported.
//!
//! For example:
//!
//! ```
//! use polyrad::{
//!     domains::{finite_field::FiniteField, rational_function::RationalFunctionField},
//!     options::EngineOptions,
//!     poly::polynomial::PolynomialRing,
//! };
//!
//! let gf5 = FiniteField::new(5).unwrap();
//! let field = RationalFunctionField::new(gf5, &["c"]).unwrap();
//! let c = field.parameter(0);
//!
//! let ring: PolynomialRing<_> = PolynomialRing::new(field, &["x", "y", "z"]).unwrap();
//! let [_, x, y, z]: [_; 4] = ring.gens().try_into().unwrap();
//!
//! let f = (&y * &y - &x).pow(5);
//! let g = (&z * &z - &ring.constant(c)).pow(5);
//!
//! let components = ring
//!     .ideal(vec![f, g])
//!     .radical_decomposition(&EngineOptions::default())
//!     .unwrap();
//! assert_eq!(components.len(), 1);
//! ```
pub mod combinatorics;
pub mod domains;
pub mod error;
pub mod ideal;
pub mod options;
pub mod poly;
pub mod roots;
pub mod utils;
