//! Configuration passed explicitly into the engines, and the scoped
//! context every engine call runs in.
use std::time::Instant;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, info_span, span::EnteredSpan};

/// Settings for a single engine call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EngineOptions {
    /// Emit `info` level summaries (timings, component and region counts).
    pub diagnostics: bool,
    /// The number of times a split point is moved before root isolation gives up.
    pub max_perturbations: usize,
    /// The maximal number of subdivisions performed on a single root region.
    pub max_refinement_steps: usize,
    /// Seed of the random generator used for equal-degree factorization
    /// and random linear forms.
    pub seed: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            diagnostics: false,
            max_perturbations: 64,
            max_refinement_steps: 10_000,
            seed: 0x5EED,
        }
    }
}

impl EngineOptions {
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_perturbations(mut self, max_perturbations: usize) -> Self {
        self.max_perturbations = max_perturbations;
        self
    }

    pub fn with_max_refinement_steps(mut self, max_refinement_steps: usize) -> Self {
        self.max_refinement_steps = max_refinement_steps;
        self
    }
}

/// The scope of one engine call. Creating it enters a tracing span;
/// dropping it reports the elapsed time (with diagnostics on) and leaves the span.
pub struct EngineContext {
    name: &'static str,
    options: EngineOptions,
    start: Instant,
    _span: EnteredSpan,
}

impl EngineContext {
    pub fn acquire(name: &'static str, options: &EngineOptions) -> EngineContext {
        let span = info_span!("engine", call = name).entered();
        EngineContext {
            name,
            options: options.clone(),
            start: Instant::now(),
            _span: span,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// A fresh random generator seeded from the options, so that
    /// every call with the same input is reproducible.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.options.seed)
    }

    /// Log a summary line if diagnostics are enabled.
    pub fn report(&self, message: std::fmt::Arguments<'_>) {
        if self.options.diagnostics {
            info!("{}: {}", self.name, message);
        }
    }
}

impl Drop for EngineContext {
    fn drop(&mut self) {
        if self.options.diagnostics {
            info!("{} finished in {:?}", self.name, self.start.elapsed());
        }
    }
}

#[cfg(test)]
mod test {
    use rand::Rng;

    use super::{EngineContext, EngineOptions};

    #[test]
    fn defaults() {
        let o = EngineOptions::default();
        assert!(!o.diagnostics);
        assert_eq!(o.max_perturbations, 64);
        assert_eq!(o.seed, 0x5EED);

        let o = o.with_max_perturbations(3).with_max_refinement_steps(5);
        assert_eq!((o.max_perturbations, o.max_refinement_steps), (3, 5));
    }

    #[test]
    fn reproducible_rng() {
        let o = EngineOptions::default().with_seed(7);
        let a: u64 = EngineContext::acquire("a", &o).rng().gen();
        let b: u64 = EngineContext::acquire("b", &o).rng().gen();
        assert_eq!(a, b);
    }
}
