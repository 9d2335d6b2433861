//! Isolation and refinement of the roots of univariate polynomials over `Q` and `Q(i)`.
//!
//! The number of complex roots inside a rectangle is the winding number of `f`
//! along its boundary. It is computed exactly: on every edge `a + (b-a)t`,
//! `t ∈ [0, 1]`, the Cauchy index of `Re f / Im f` follows from a Sturm sequence.
//! A rectangle with a root on its boundary gives no answer, in which case the
//! split point of the parent rectangle is moved.
//!
//! ```
//! use polyrad::{
//!     domains::rational::{Rational, RationalField},
//!     options::EngineOptions,
//!     poly::polynomial::PolynomialRing,
//! };
//!
//! let ring: PolynomialRing<_> = PolynomialRing::new(RationalField::new(), &["x"]).unwrap();
//! let x = ring.variable(0);
//! let f = &x * &x + &ring.one();
//!
//! let eps = Rational::from((1, 1000));
//! let roots = ring
//!     .complex_roots(&f, Some(&eps), &EngineOptions::default())
//!     .unwrap();
//! assert_eq!(roots.len(), 2);
//! assert!(roots.iter().all(|r| r.radius() <= eps));
//! ```
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    domains::{
        complex_rational::{ComplexRational, ComplexRationalField},
        rational::{Rational, RationalField},
        Field, FrobeniusRoot, InternalOrdering, Ring,
    },
    error::IsolationError,
    options::{EngineContext, EngineOptions},
    poly::{
        polynomial::{MultivariatePolynomial, PolynomialRing},
        univariate::UnivariatePolynomial,
        Exponent, LexOrder, MonomialOrder,
    },
};

type ComplexPolynomial = UnivariatePolynomial<ComplexRationalField>;
type RealPolynomial = UnivariatePolynomial<RationalField>;

/// A field whose elements are Gaussian rationals.
pub trait ComplexEmbedding: Field {
    fn to_complex(&self, a: &Self::Element) -> ComplexRational;
}

impl ComplexEmbedding for RationalField {
    fn to_complex(&self, a: &Rational) -> ComplexRational {
        ComplexRational::from_real(a.clone())
    }
}

impl ComplexEmbedding for ComplexRationalField {
    fn to_complex(&self, a: &ComplexRational) -> ComplexRational {
        a.clone()
    }
}

/// A closed rectangle `[re.0, re.1] x [im.0, im.1]` with positive width and height.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Rectangle {
    re: (Rational, Rational),
    im: (Rational, Rational),
}

impl Rectangle {
    fn square(half_width: Rational) -> Rectangle {
        let low = Rational::from(-&half_width);
        Rectangle {
            re: (low.clone(), half_width.clone()),
            im: (low, half_width),
        }
    }

    /// The corners in counterclockwise order, starting bottom left.
    fn corners(&self) -> [ComplexRational; 4] {
        [
            ComplexRational::new(self.re.0.clone(), self.im.0.clone()),
            ComplexRational::new(self.re.1.clone(), self.im.0.clone()),
            ComplexRational::new(self.re.1.clone(), self.im.1.clone()),
            ComplexRational::new(self.re.0.clone(), self.im.1.clone()),
        ]
    }

    fn center(&self) -> ComplexRational {
        ComplexRational::new(
            Rational::from(&self.re.0 + &self.re.1) / 2,
            Rational::from(&self.im.0 + &self.im.1) / 2,
        )
    }

    fn radius(&self) -> Rational {
        let w = Rational::from(&self.re.1 - &self.re.0);
        let h = Rational::from(&self.im.1 - &self.im.0);
        (w + h) / 2
    }

    fn contains(&self, z: &ComplexRational) -> bool {
        self.re.0 <= z.re && z.re <= self.re.1 && self.im.0 <= z.im && z.im <= self.im.1
    }

    /// Split into four rectangles at the fraction `s` of the width and height.
    fn quadrisect(&self, s: &Rational) -> [Rectangle; 4] {
        let xm = interpolate(&self.re.0, &self.re.1, s);
        let ym = interpolate(&self.im.0, &self.im.1, s);

        [
            Rectangle {
                re: (self.re.0.clone(), xm.clone()),
                im: (self.im.0.clone(), ym.clone()),
            },
            Rectangle {
                re: (xm.clone(), self.re.1.clone()),
                im: (self.im.0.clone(), ym.clone()),
            },
            Rectangle {
                re: (xm.clone(), self.re.1.clone()),
                im: (ym.clone(), self.im.1.clone()),
            },
            Rectangle {
                re: (self.re.0.clone(), xm),
                im: (ym, self.im.1.clone()),
            },
        ]
    }
}

/// `a + s * (b - a)`.
fn interpolate(a: &Rational, b: &Rational, s: &Rational) -> Rational {
    Rational::from(b - a) * s + a
}

/// The split fraction for the given attempt: `1/2` first, then alternately
/// above and below `1/2`, approaching `1/4` and `3/4`.
fn split_fraction(attempt: usize) -> Rational {
    let half = Rational::from((1, 2));
    if attempt == 0 {
        return half;
    }

    let k = ((attempt + 1) / 2) as i64;
    let delta = Rational::from((k, 4 * k + 8));
    if attempt % 2 == 1 {
        half + delta
    } else {
        half - delta
    }
}

/// The Sturm sequence `a, b, -rem(a, b), ...` with the last entry nonzero.
fn sturm_sequence(a: &RealPolynomial, b: &RealPolynomial) -> Vec<RealPolynomial> {
    let mut seq = vec![a.clone()];
    if b.is_zero() {
        return seq;
    }
    seq.push(b.clone());

    loop {
        let n = seq.len();
        let r = -seq[n - 2].rem(&seq[n - 1]);
        if r.is_zero() {
            return seq;
        }
        seq.push(r);
    }
}

fn sign_variations(seq: &[RealPolynomial], x: &Rational) -> usize {
    let mut last = Ordering::Equal;
    let mut count = 0;
    for p in seq {
        let s = p.evaluate(x).cmp0();
        if s.is_eq() {
            continue;
        }
        if last.is_ne() && s != last {
            count += 1;
        }
        last = s;
    }
    count
}

/// The number of distinct roots of `seq[0]` in `(a, b)`, where neither endpoint is a root.
fn count_between(seq: &[RealPolynomial], a: &Rational, b: &Rational) -> usize {
    sign_variations(seq, a).saturating_sub(sign_variations(seq, b))
}

/// Check if `f` has a root in the open unit interval. `f(0)` and `f(1)` must be nonzero.
fn has_root_in_unit_interval(f: &RealPolynomial) -> bool {
    if f.is_constant() {
        return false;
    }

    let seq = sturm_sequence(f, &f.derivative());
    count_between(&seq, &Rational::new(), &Rational::from(1)) > 0
}

/// Multipliers that rotate the values at the corners off the real axis.
/// For four nonzero values, at least one of them works.
const ROTATIONS: [(i64, i64); 5] = [(1, 0), (0, 1), (1, 1), (1, -1), (2, 1)];

/// Count the roots of the square-free `f` inside the rectangle, or `None`
/// when a root lies on its boundary.
fn count_roots(f: &ComplexPolynomial, rect: &Rectangle) -> Option<usize> {
    let field = f.field;
    let corners = rect.corners();
    let values: Vec<_> = corners.iter().map(|c| f.evaluate(c)).collect();
    if values.iter().any(|v| v.is_zero()) {
        return None;
    }

    // make Im f nonzero at the corners, so that they are not poles of Re f / Im f
    let rotation = ROTATIONS
        .iter()
        .map(|(re, im)| ComplexRational::new(Rational::from(*re), Rational::from(*im)))
        .find(|w| values.iter().all(|v| !field.mul(w, v).is_real()))?;
    let f = f.clone().mul_coeff(&rotation);

    let mut index = 0i64;
    for (k, a) in corners.iter().enumerate() {
        let b = &corners[(k + 1) % 4];
        let edge = UnivariatePolynomial::from_coefficients(
            &field,
            vec![a.clone(), field.sub(b, a)],
            f.variable.clone(),
        );

        let g = f.compose(&edge);
        let re = g.map_coeff(|c| c.re.clone(), RationalField);
        let im = g.map_coeff(|c| c.im.clone(), RationalField);

        if has_root_in_unit_interval(&re.gcd(&im)) {
            return None;
        }

        let seq = sturm_sequence(&im, &re);
        index += sign_variations(&seq, &Rational::new()) as i64;
        index -= sign_variations(&seq, &Rational::from(1)) as i64;
    }

    // twice the winding number: the sum of the Cauchy indices of Re f / Im f
    // along the counterclockwise boundary
    if index < 0 || index % 2 != 0 {
        debug!("Inconsistent winding number {} for {:?}", index, rect);
        return None;
    }
    Some(index as usize / 2)
}

/// Subdivide a rectangle into parts with a root-free boundary, and keep
/// the parts that contain a root.
fn subdivide(
    f: &ComplexPolynomial,
    rect: &Rectangle,
    options: &EngineOptions,
) -> Result<Vec<(Rectangle, usize)>, IsolationError> {
    for attempt in 0..=options.max_perturbations {
        let s = split_fraction(attempt);
        let parts = rect.quadrisect(&s);
        let counts: Option<Vec<usize>> = parts.iter().map(|p| count_roots(f, p)).collect();

        match counts {
            Some(counts) => {
                return Ok(parts
                    .into_iter()
                    .zip(counts)
                    .filter(|(_, n)| *n > 0)
                    .collect())
            }
            None => debug!("Root on a split line at fraction {}, moving it", s),
        }
    }

    Err(IsolationError::PerturbationLimit(options.max_perturbations))
}

/// An upper bound on the modulus of all roots, `1 + max |a_i| / |a_n|`.
fn cauchy_bound(f: &ComplexPolynomial) -> Rational {
    let lc = f.lcoeff().modulus_lower_bound();
    let max = f.coefficients[..f.coefficients.len() - 1]
        .iter()
        .map(|c| c.modulus_upper_bound())
        .max()
        .unwrap_or_default();
    max / lc + 1u32
}

fn isolate(f: &ComplexPolynomial, options: &EngineOptions) -> Result<Vec<Rectangle>, IsolationError> {
    if f.degree() == 0 {
        return Ok(vec![]);
    }

    let mut isolated = vec![];
    let mut queue = vec![(Rectangle::square(cauchy_bound(f)), f.degree())];
    while let Some((rect, n)) = queue.pop() {
        if n == 1 {
            isolated.push(rect);
        } else {
            queue.extend(subdivide(f, &rect, options)?);
        }
    }

    isolated.sort_by(|a, b| a.center().internal_cmp(&b.center()));
    Ok(isolated)
}

/// The non-constant square-free factors with their multiplicities.
fn square_free_factors<F: FrobeniusRoot>(
    f: &UnivariatePolynomial<F>,
) -> Vec<(UnivariatePolynomial<F>, usize)> {
    let template: MultivariatePolynomial<F, u32, LexOrder> =
        MultivariatePolynomial::new(&f.field, None, Arc::new(vec![(*f.variable).clone()]));

    template
        .from_univariate(f, 0)
        .square_free_factorization()
        .into_iter()
        .filter(|(a, _)| !a.is_constant())
        .map(|(a, k)| (a.to_univariate(0), k))
        .collect()
}

fn product<F: Field>(
    f: &UnivariatePolynomial<F>,
    factors: &[(UnivariatePolynomial<F>, usize)],
) -> UnivariatePolynomial<F> {
    factors.iter().fold(f.one(), |acc, (a, _)| &acc * a)
}

fn check_precision(eps: Option<&Rational>) -> Result<(), IsolationError> {
    match eps {
        Some(e) if e.cmp0().is_le() => Err(IsolationError::NonPositivePrecision),
        _ => Ok(()),
    }
}

/// A rectangle in the complex plane that contains exactly one root of a square-free
/// polynomial. Regions of the same polynomial have disjoint interiors,
/// and no boundary passes through a root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexRootRegion {
    poly: Arc<ComplexPolynomial>,
    rect: Rectangle,
    multiplicity: usize,
}

impl ComplexRootRegion {
    /// The interval of real parts.
    pub fn real_interval(&self) -> (&Rational, &Rational) {
        (&self.rect.re.0, &self.rect.re.1)
    }

    /// The interval of imaginary parts.
    pub fn imaginary_interval(&self) -> (&Rational, &Rational) {
        (&self.rect.im.0, &self.rect.im.1)
    }

    pub fn center(&self) -> ComplexRational {
        self.rect.center()
    }

    /// Half the sum of the width and the height, which bounds the distance
    /// of every point in the region to the center.
    pub fn radius(&self) -> Rational {
        self.rect.radius()
    }

    /// The multiplicity of the root in the original polynomial.
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// The square-free polynomial whose root is isolated.
    pub fn polynomial(&self) -> &ComplexPolynomial {
        &self.poly
    }

    pub fn contains(&self, z: &ComplexRational) -> bool {
        self.rect.contains(z)
    }

    /// Shrink the region until its radius is at most `eps`. The new region
    /// lies inside the old one. On failure the region is unchanged.
    pub fn refine(&mut self, eps: &Rational, options: &EngineOptions) -> Result<(), IsolationError> {
        check_precision(Some(eps))?;

        let mut rect = self.rect.clone();
        let mut steps = 0;
        while rect.radius() > *eps {
            if steps == options.max_refinement_steps {
                return Err(IsolationError::RefinementLimit(steps));
            }

            let mut parts = subdivide(&self.poly, &rect, options)?;
            debug_assert_eq!(parts.len(), 1);
            rect = parts
                .pop()
                .map(|(r, _)| r)
                .ok_or(IsolationError::RefinementLimit(steps))?;
            steps += 1;
        }

        self.rect = rect;
        Ok(())
    }
}

impl Display for ComplexRootRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ± {}", self.center(), self.radius())?;
        if self.multiplicity > 1 {
            write!(f, " (multiplicity {})", self.multiplicity)?;
        }
        Ok(())
    }
}

/// Isolate the complex roots of `poly`, one region per root counted with
/// multiplicity, sorted by the real and then the imaginary part of their centers.
/// A root of multiplicity `k` yields `k` equal, adjacent regions. If `eps` is
/// given, every region is refined to a radius of at most `eps`.
#[instrument(level = "debug", skip_all)]
pub fn complex_roots<F: ComplexEmbedding>(
    poly: &UnivariatePolynomial<F>,
    eps: Option<&Rational>,
    options: &EngineOptions,
) -> Result<Vec<ComplexRootRegion>, IsolationError> {
    let ctx = EngineContext::acquire("complex_roots", options);

    if poly.is_zero() {
        return Err(IsolationError::ZeroPolynomial);
    }
    check_precision(eps)?;

    let f = poly.map_coeff(|c| poly.field.to_complex(c), ComplexRationalField);
    let factors = square_free_factors(&f);
    let sqf = Arc::new(product(&f, &factors));
    debug!("Square-free part {}", sqf);

    let mut regions = vec![];
    for rect in isolate(&sqf, options)? {
        let multiplicity = if factors.len() == 1 {
            factors[0].1
        } else {
            factors
                .iter()
                .find(|(a, _)| count_roots(a, &rect) == Some(1))
                .map(|(_, k)| *k)
                .unwrap_or(1)
        };

        let mut region = ComplexRootRegion {
            poly: sqf.clone(),
            rect,
            multiplicity,
        };
        if let Some(eps) = eps {
            region.refine(eps, options)?;
        }
        regions.extend(std::iter::repeat(region).take(multiplicity));
    }

    ctx.report(format_args!(
        "{} regions for a polynomial of degree {}",
        regions.len(),
        poly.degree()
    ));
    Ok(regions)
}

/// Refine all regions to a radius of at most `eps`. Either all regions
/// are refined, or on error none of them is changed.
pub fn refine_roots(
    regions: &mut [ComplexRootRegion],
    eps: &Rational,
    options: &EngineOptions,
) -> Result<(), IsolationError> {
    let ctx = EngineContext::acquire("refine_roots", options);
    check_precision(Some(eps))?;

    let mut refined = regions.to_vec();
    for r in &mut refined {
        r.refine(eps, options)?;
    }
    regions.clone_from_slice(&refined);

    ctx.report(format_args!("refined {} regions to {}", regions.len(), eps));
    Ok(())
}

impl<F: ComplexEmbedding, E: Exponent, O: MonomialOrder> PolynomialRing<F, E, O> {
    /// Isolate the complex roots of a polynomial in at most one variable.
    pub fn complex_roots(
        &self,
        f: &MultivariatePolynomial<F, E, O>,
        eps: Option<&Rational>,
        options: &EngineOptions,
    ) -> Result<Vec<ComplexRootRegion>, IsolationError> {
        if f.is_zero() {
            return Err(IsolationError::ZeroPolynomial);
        }

        let var = match f.occurring_variables().as_slice() {
            [] => 0,
            [v] => *v,
            _ => return Err(IsolationError::NotUnivariate),
        };

        complex_roots(&f.to_univariate(var), eps, options)
    }
}

/// An open interval `(lower, upper)` with rational endpoints that contains
/// exactly one real root of a square-free polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RealRootInterval {
    sturm: Arc<Vec<RealPolynomial>>,
    lower: Rational,
    upper: Rational,
    multiplicity: usize,
}

impl RealRootInterval {
    pub fn lower(&self) -> &Rational {
        &self.lower
    }

    pub fn upper(&self) -> &Rational {
        &self.upper
    }

    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// Half the width of the interval.
    pub fn radius(&self) -> Rational {
        Rational::from(&self.upper - &self.lower) / 2
    }

    pub fn contains(&self, x: &Rational) -> bool {
        self.lower < *x && *x < self.upper
    }

    /// Bisect until the radius is at most `eps`. On failure the interval is unchanged.
    pub fn refine(&mut self, eps: &Rational, options: &EngineOptions) -> Result<(), IsolationError> {
        check_precision(Some(eps))?;

        let mut interval = (self.lower.clone(), self.upper.clone());
        let mut steps = 0;
        while Rational::from(&interval.1 - &interval.0) / 2 > *eps {
            if steps == options.max_refinement_steps {
                return Err(IsolationError::RefinementLimit(steps));
            }

            let mut parts = bisect(&self.sturm, &interval, options)?;
            interval = parts
                .pop()
                .map(|(a, b, _)| (a, b))
                .ok_or(IsolationError::RefinementLimit(steps))?;
            steps += 1;
        }

        (self.lower, self.upper) = interval;
        Ok(())
    }
}

impl Display for RealRootInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)?;
        if self.multiplicity > 1 {
            write!(f, " (multiplicity {})", self.multiplicity)?;
        }
        Ok(())
    }
}

/// Split an interval at a point that is not a root, keeping the parts with a root.
fn bisect(
    sturm: &[RealPolynomial],
    (lower, upper): &(Rational, Rational),
    options: &EngineOptions,
) -> Result<Vec<(Rational, Rational, usize)>, IsolationError> {
    for attempt in 0..=options.max_perturbations {
        let mid = interpolate(lower, upper, &split_fraction(attempt));
        if sturm[0].evaluate(&mid).cmp0().is_eq() {
            debug!("Root at split point {}, moving it", mid);
            continue;
        }

        let (vl, vm, vu) = (
            sign_variations(sturm, lower),
            sign_variations(sturm, &mid),
            sign_variations(sturm, upper),
        );

        return Ok([
            (lower.clone(), mid.clone(), vl.saturating_sub(vm)),
            (mid, upper.clone(), vm.saturating_sub(vu)),
        ]
        .into_iter()
        .filter(|(_, _, n)| *n > 0)
        .collect());
    }

    Err(IsolationError::PerturbationLimit(options.max_perturbations))
}

/// Isolate the real roots of `poly` in open intervals, one per root counted
/// with multiplicity and sorted ascending. The intervals of distinct roots are
/// disjoint. If `eps` is given, every interval is refined to a radius of at most `eps`.
#[instrument(level = "debug", skip_all)]
pub fn real_roots(
    poly: &RealPolynomial,
    eps: Option<&Rational>,
    options: &EngineOptions,
) -> Result<Vec<RealRootInterval>, IsolationError> {
    let ctx = EngineContext::acquire("real_roots", options);

    if poly.is_zero() {
        return Err(IsolationError::ZeroPolynomial);
    }
    check_precision(eps)?;

    let factors = square_free_factors(poly);
    let sqf = product(poly, &factors);
    if sqf.degree() == 0 {
        return Ok(vec![]);
    }

    let sturm = Arc::new(sturm_sequence(&sqf, &sqf.derivative()));
    let bound = cauchy_bound(&sqf.map_coeff(|c| RationalField.to_complex(c), ComplexRationalField));

    let mut isolated = vec![];
    let initial = (Rational::from(-&bound), bound);
    let n = count_between(&sturm, &initial.0, &initial.1);
    let mut queue = vec![(initial.0, initial.1, n)];
    while let Some((lower, upper, n)) = queue.pop() {
        match n {
            0 => {}
            1 => isolated.push((lower, upper)),
            _ => queue.extend(bisect(&sturm, &(lower, upper), options)?),
        }
    }
    isolated.sort();

    let mut intervals = vec![];
    for (lower, upper) in isolated {
        let multiplicity = factors
            .iter()
            .find(|(a, _)| {
                factors.len() == 1
                    || count_between(&sturm_sequence(a, &a.derivative()), &lower, &upper) == 1
            })
            .map(|(_, k)| *k)
            .unwrap_or(1);

        let mut interval = RealRootInterval {
            sturm: sturm.clone(),
            lower,
            upper,
            multiplicity,
        };

        if let Some(eps) = eps {
            interval.refine(eps, options)?;
        }
        intervals.extend(std::iter::repeat(interval).take(multiplicity));
    }

    ctx.report(format_args!(
        "{} real roots for a polynomial of degree {}",
        intervals.len(),
        poly.degree()
    ));
    Ok(intervals)
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            complex_rational::{ComplexRational, ComplexRationalField},
            rational::{Rational, RationalField},
        },
        error::IsolationError,
        options::EngineOptions,
        poly::{polynomial::PolynomialRing, univariate::UnivariatePolynomial, Variable},
    };

    use super::{complex_roots, real_roots, refine_roots, split_fraction};

    fn poly(coeffs: &[i64]) -> UnivariatePolynomial<RationalField> {
        UnivariatePolynomial::from_coefficients(
            &RationalField::new(),
            coeffs.iter().map(|c| Rational::from(*c)).collect(),
            Arc::new(Variable::new("x")),
        )
    }

    fn interiors_disjoint(a: &super::ComplexRootRegion, b: &super::ComplexRootRegion) -> bool {
        let (ar, br) = (a.real_interval(), b.real_interval());
        let (ai, bi) = (a.imaginary_interval(), b.imaginary_interval());
        ar.1 <= br.0 || br.1 <= ar.0 || ai.1 <= bi.0 || bi.1 <= ai.0
    }

    #[test]
    fn split_fractions() {
        assert_eq!(split_fraction(0), Rational::from((1, 2)));
        assert_eq!(split_fraction(1), Rational::from((7, 12)));
        assert_eq!(split_fraction(2), Rational::from((5, 12)));
        assert!((0..100).all(|k| split_fraction(k) > Rational::from((1, 4))
            && split_fraction(k) < Rational::from((3, 4))));
    }

    #[test]
    fn imaginary_unit() {
        let eps = Rational::from((1, 100));
        let roots = complex_roots(&poly(&[1, 0, 1]), Some(&eps), &EngineOptions::default()).unwrap();

        assert_eq!(roots.len(), 2);
        assert!(roots[0].contains(&ComplexRational::new(Rational::new(), Rational::from(-1))));
        assert!(roots[1].contains(&ComplexRational::i()));
        assert!(roots.iter().all(|r| r.radius() <= eps && r.multiplicity() == 1));
        assert!(interiors_disjoint(&roots[0], &roots[1]));
    }

    #[test]
    fn cubic() {
        // (x - 1)(x^2 + x + 1) = x^3 - 1
        let roots = complex_roots(&poly(&[-1, 0, 0, 1]), None, &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(roots.iter().filter(|r| r.contains(&ComplexRational::from_real(1.into()))).count(), 1);

        for (i, a) in roots.iter().enumerate() {
            for b in &roots[i + 1..] {
                assert!(interiors_disjoint(a, b));
            }
        }
    }

    #[test]
    fn multiplicities() {
        // (x - 1)^2 (x + 2) = x^3 - 3x + 2
        let roots = complex_roots(&poly(&[2, -3, 0, 1]), None, &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 3);
        assert!(roots[0].contains(&ComplexRational::from_real((-2).into())));
        assert_eq!(roots[1], roots[2]);

        let one = ComplexRational::from_real(1.into());
        let minus_two = ComplexRational::from_real((-2).into());
        for r in &roots {
            if r.contains(&one) {
                assert_eq!(r.multiplicity(), 2);
            } else {
                assert!(r.contains(&minus_two));
                assert_eq!(r.multiplicity(), 1);
            }
        }
        assert_eq!(roots.iter().filter(|r| r.multiplicity() == 2).count(), 2);

        // (x - 1)^2 refines both copies to the same region
        let options = EngineOptions::default();
        let eps = Rational::from((1, 1000));
        let mut roots = complex_roots(&poly(&[1, -2, 1]), None, &options).unwrap();
        assert_eq!(roots.len(), 2);
        refine_roots(&mut roots, &eps, &options).unwrap();
        assert_eq!(roots[0], roots[1]);
        assert!(roots[0].radius() <= eps && roots[0].contains(&one));
    }

    #[test]
    fn refinement() {
        let options = EngineOptions::default();
        let mut roots = complex_roots(&poly(&[-2, 0, 1]), None, &options).unwrap();
        let before = roots.clone();

        let eps = Rational::from((1, 1000));
        refine_roots(&mut roots, &eps, &options).unwrap();
        for (old, new) in before.iter().zip(&roots) {
            assert!(new.radius() <= eps);
            assert!(old.contains(&new.center()));
            assert!(new.radius() <= old.radius());
        }

        let refined = roots.clone();
        refine_roots(&mut roots, &eps, &options).unwrap();
        assert_eq!(roots, refined);
    }

    #[test]
    fn refinement_limit() {
        let options = EngineOptions::default().with_max_refinement_steps(2);
        let mut roots = complex_roots(&poly(&[-2, 0, 1]), None, &options).unwrap();
        let before = roots.clone();

        let eps = Rational::from((1, 1_000_000));
        assert_eq!(
            refine_roots(&mut roots, &eps, &options),
            Err(IsolationError::RefinementLimit(2))
        );
        assert_eq!(roots, before);
    }

    #[test]
    fn gaussian_coefficients() {
        // x - i
        let field = ComplexRationalField::new();
        let f = UnivariatePolynomial::from_coefficients(
            &field,
            vec![field.to_element((0, 1), (-1, 1)), field.to_element((1, 1), (0, 1))],
            Arc::new(Variable::new("x")),
        );

        let roots = complex_roots(&f, Some(&Rational::from((1, 10))), &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 1);
        assert!(roots[0].contains(&ComplexRational::i()));
    }

    #[test]
    fn errors() {
        let options = EngineOptions::default();
        assert_eq!(
            complex_roots(&poly(&[]), None, &options),
            Err(IsolationError::ZeroPolynomial)
        );
        assert_eq!(
            complex_roots(&poly(&[1, 1]), Some(&Rational::new()), &options),
            Err(IsolationError::NonPositivePrecision)
        );
        assert_eq!(complex_roots(&poly(&[3]), None, &options), Ok(vec![]));

        let ring: PolynomialRing<_> = PolynomialRing::new(RationalField::new(), &["x", "y"]).unwrap();
        let f = &ring.variable(0) * &ring.variable(1);
        assert_eq!(
            ring.complex_roots(&f, None, &options),
            Err(IsolationError::NotUnivariate)
        );
    }

    #[test]
    fn ring_level_roots() {
        let ring: PolynomialRing<_> = PolynomialRing::new(RationalField::new(), &["x", "y"]).unwrap();
        let y = ring.variable(1);
        let f = &(&y * &y) - &ring.constant(4.into());

        let roots = ring.complex_roots(&f, None, &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots[0].contains(&ComplexRational::from_real((-2).into())));
        assert!(roots[1].contains(&ComplexRational::from_real(2.into())));
    }

    #[test]
    fn square_root_of_two() {
        let eps = Rational::from((1, 1000));
        let roots = real_roots(&poly(&[-2, 0, 1]), Some(&eps), &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 2);

        for (r, sign) in roots.iter().zip([-1, 1]) {
            assert!(r.radius() <= eps);
            // the root squared is 2, and the sign is known
            assert!(Rational::from(r.lower() * r.lower()) != 2);
            assert_eq!(r.lower().cmp0(), sign.cmp(&0));
            let (l2, u2) = (
                Rational::from(r.lower() * r.lower()),
                Rational::from(r.upper() * r.upper()),
            );
            assert!(l2.clone().min(u2.clone()) < 2 && 2 < l2.max(u2));
        }
        assert!(roots[0].upper() <= roots[1].lower());
    }

    #[test]
    fn real_roots_with_multiplicity() {
        // (x - 1)^2 (x^2 + 1)
        let f = &poly(&[-1, 1]) * &poly(&[-1, 1]);
        let f = &f * &poly(&[1, 0, 1]);
        let roots = real_roots(&f, None, &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], roots[1]);
        assert!(roots[0].contains(&Rational::from(1)));
        assert_eq!(roots[0].multiplicity(), 2);
    }

    #[test]
    fn rational_roots_on_split_points() {
        // the midpoint of the initial interval is a root
        let roots = real_roots(&poly(&[0, -1, 0, 1]), None, &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 3);
        assert!(roots[1].contains(&Rational::new()));

        let roots = complex_roots(&poly(&[0, -1, 0, 1]), None, &EngineOptions::default()).unwrap();
        assert_eq!(roots.len(), 3);
    }
}
