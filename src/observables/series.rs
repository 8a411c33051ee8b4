use super::aggregate::Sample;
use crate::sampling::SimulationObserver;

/// Append-only record of sampled observables, in sampling order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservableSeries {
    samples: Vec<Sample>,
}

impl ObservableSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn energies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.energy).collect()
    }

    pub fn magnetizations(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.magnetization).collect()
    }

    pub fn entropies(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.entropy).collect()
    }
}

impl SimulationObserver for ObservableSeries {
    fn on_sample(&mut self, sample: &Sample) {
        self.push(*sample);
    }
}
