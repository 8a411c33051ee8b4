//! Traits for consumers of the Markov chain.

use crate::observables::Sample;

/// Receives flip and sample events from the sweep controller.
///
/// Observers see the chain but never feed back into it. Both methods
/// default to no-ops so a renderer can implement only `on_flip` and a
/// recorder only `on_sample`.
pub trait SimulationObserver {
    /// An accepted flip left `(row, col)` holding `new_spin`.
    fn on_flip(&mut self, _row: usize, _col: usize, _new_spin: i8) {}

    /// Observables were measured.
    fn on_sample(&mut self, _sample: &Sample) {}
}

/// Observer that ignores every event.
impl SimulationObserver for () {}

/// Adapter turning a pair of closures into an observer.
pub struct Callbacks<F, G> {
    pub on_flip: F,
    pub on_sample: G,
}

impl<F, G> SimulationObserver for Callbacks<F, G>
where
    F: FnMut(usize, usize, i8),
    G: FnMut(&Sample),
{
    fn on_flip(&mut self, row: usize, col: usize, new_spin: i8) {
        (self.on_flip)(row, col, new_spin)
    }

    fn on_sample(&mut self, sample: &Sample) {
        (self.on_sample)(sample)
    }
}

impl<O: SimulationObserver + ?Sized> SimulationObserver for &mut O {
    fn on_flip(&mut self, row: usize, col: usize, new_spin: i8) {
        (**self).on_flip(row, col, new_spin)
    }

    fn on_sample(&mut self, sample: &Sample) {
        (**self).on_sample(sample)
    }
}
