use num_traits::{Float, FloatConst};

// First order low-pass (PT1) filter.
pub struct ExponentialFilter<ItemT> {
    alpha: ItemT,
    prev: ItemT,
}

impl<ItemT> ExponentialFilter<ItemT>
where
    ItemT: Float + FloatConst,
{
    pub fn new(alpha: ItemT) -> ExponentialFilter<ItemT> {
        ExponentialFilter {
            alpha,
            prev: ItemT::zero(),
        }
    }

    // alpha = dt / (RC + dt), RC = 1 / (2 * pi * fc)
    pub fn from_cutoff(cutoff_hz: ItemT, dt: ItemT) -> ExponentialFilter<ItemT> {
        ExponentialFilter::new(Self::cutoff_alpha(cutoff_hz, dt))
    }

    pub fn cutoff_alpha(cutoff_hz: ItemT, dt: ItemT) -> ItemT {
        if cutoff_hz <= ItemT::zero() {
            return ItemT::one();
        }
        let two = ItemT::one() + ItemT::one();
        let rc = ItemT::one() / (two * ItemT::PI() * cutoff_hz);
        dt / (rc + dt)
    }

    pub fn reset(&mut self) {
        self.prev = ItemT::zero();
    }

    pub fn update(&mut self, data: ItemT) -> ItemT {
        self.prev = self.prev + self.alpha * (data - self.prev);
        self.prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_alpha_passes_through() {
        let mut filter = ExponentialFilter::new(1.0f32);
        assert_eq!(filter.update(42.0), 42.0);
        assert_eq!(filter.update(-3.0), -3.0);
    }

    #[test]
    fn test_step_response_converges() {
        let mut filter = ExponentialFilter::from_cutoff(30.0f32, 0.001);
        let first = filter.update(100.0);
        assert!(first > 0.0 && first < 100.0);
        let mut out = first;
        for _ in 0..1000 {
            out = filter.update(100.0);
        }
        assert!((out - 100.0).abs() < 0.01);

        filter.reset();
        assert_eq!(filter.update(0.0), 0.0);
    }

    #[test]
    fn test_disabled_cutoff() {
        assert_eq!(ExponentialFilter::<f32>::cutoff_alpha(0.0, 0.001), 1.0);
    }
}
