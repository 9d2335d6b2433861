//! Sparse multivariate and dense univariate polynomials, and the algorithms on them.
pub mod factor;
pub mod gcd;
pub mod groebner;
pub mod polynomial;
pub mod univariate;

use std::cmp::Ordering::{self, Equal};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add as OpAdd, AddAssign, Sub};

use smartstring::{LazyCompact, SmartString};

/// The number of exponents that are stored inline before spilling to the heap.
pub const INLINED_EXPONENTS: usize = 6;

/// An exponent of a monomial.
pub trait Exponent:
    Hash
    + Debug
    + Display
    + Ord
    + Sub<Output = Self>
    + OpAdd<Output = Self>
    + AddAssign
    + Clone
    + Copy
    + PartialEq
    + Eq
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    /// Convert the exponent to `u32`. This is always possible, as `u32` is the largest supported exponent type.
    fn to_u32(&self) -> u32;
    /// Convert from `u32`. This function may panic if the exponent is too large.
    fn from_u32(n: u32) -> Self;
    fn is_zero(&self) -> bool;
    fn checked_add(&self, other: &Self) -> Option<Self>;
}

macro_rules! impl_exponent {
    ($($t:ty),*) => {
        $(
            impl Exponent for $t {
                #[inline]
                fn zero() -> Self {
                    0
                }

                #[inline]
                fn one() -> Self {
                    1
                }

                #[inline]
                fn to_u32(&self) -> u32 {
                    *self as u32
                }

                #[inline]
                fn from_u32(n: u32) -> Self {
                    if n <= <$t>::MAX as u32 {
                        n as $t
                    } else {
                        panic!("Exponent {} too large for {}", n, stringify!($t));
                    }
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                #[inline]
                fn checked_add(&self, other: &Self) -> Option<Self> {
                    <$t>::checked_add(*self, *other)
                }
            }
        )*
    };
}

impl_exponent!(u16, u32);

/// The name of a polynomial variable or of a parameter of a rational function field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(SmartString<LazyCompact>);

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable(SmartString::from(name))
    }

    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Variable::new(name)
    }
}

/// A monomial order, used to sort the terms of a polynomial.
pub trait MonomialOrder:
    Clone + Copy + Debug + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    fn cmp<E: Exponent>(a: &[E], b: &[E]) -> Ordering;
}

/// Graded reverse lexicographic ordering of monomials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GrevLexOrder;

impl MonomialOrder for GrevLexOrder {
    #[inline]
    fn cmp<E: Exponent>(a: &[E], b: &[E]) -> Ordering {
        let deg: u32 = a.iter().map(|e| e.to_u32()).sum();
        let deg2: u32 = b.iter().map(|e| e.to_u32()).sum();

        match deg.cmp(&deg2) {
            Equal => {}
            x => {
                return x;
            }
        }

        for (a1, a2) in a.iter().rev().zip(b.iter().rev()) {
            match a1.cmp(a2) {
                Equal => {}
                x => {
                    return x.reverse();
                }
            }
        }

        Equal
    }
}

/// Lexicographic ordering of monomials, where the first variable is the largest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct LexOrder;

impl MonomialOrder for LexOrder {
    #[inline]
    fn cmp<E: Exponent>(a: &[E], b: &[E]) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use super::{GrevLexOrder, LexOrder, MonomialOrder};

    #[test]
    fn orders() {
        let a: [u16; 3] = [1, 0, 2];
        let b: [u16; 3] = [0, 3, 0];
        assert_eq!(LexOrder::cmp(&a, &b), Ordering::Greater);
        assert_eq!(GrevLexOrder::cmp(&a, &b), Ordering::Less);

        // x*z vs y^2 in grevlex: equal degree, smaller last exponent wins
        let c: [u16; 3] = [1, 0, 1];
        let d: [u16; 3] = [0, 2, 0];
        assert_eq!(GrevLexOrder::cmp(&c, &d), Ordering::Less);
    }
}
