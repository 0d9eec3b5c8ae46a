use crate::{
    error::{Error, Result},
    window::FixedWindow,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct EmaParams {
    pub alpha: f64,
    pub window_len: u32,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            window_len: 10,
        }
    }
}

impl EmaParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidParams(format!(
                "ema alpha must be in (0, 1]; got {}",
                self.alpha
            )));
        }
        if self.window_len == 0 {
            return Err(Error::InvalidParams(
                "ema window length must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Exponential moving average whose support is truncated to the last
/// `window_len` samples.
///
/// The recursive update `value = a * x + (1 - a) * value` keeps an
/// exponentially decaying tail of every sample seen. Once more than
/// `window_len` samples have been observed, the contribution of the sample
/// leaving the window is subtracted, so that afterwards
/// `value == sum(a * (1 - a)^k * x[t - k] for k in 0..window_len)`.
///
/// The first sample seeds `value` directly and therefore carries weight
/// `(1 - a)^window_len` rather than `a * (1 - a)^window_len` when it leaves the
/// window; its correction is divided by `a` once.
pub struct Ema {
    pub value: f64,
    count: u64,
    window: FixedWindow<f64>,
    alpha: f64,
    window_len: u32,
    coeff: f64,
}

impl Ema {
    pub fn new(params: &EmaParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::new_unchecked(params))
    }

    pub(super) fn new_unchecked(params: &EmaParams) -> Self {
        Self {
            value: 0.0,
            count: 0,
            window: FixedWindow::new(params.window_len as usize),
            alpha: params.alpha,
            window_len: params.window_len,
            coeff: params.alpha * (1.0 - params.alpha).powi(params.window_len as i32),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn window_len(&self) -> u32 {
        self.window_len
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn maturity(&self) -> u32 {
        self.window_len
    }

    pub fn mature(&self) -> bool {
        self.count >= u64::from(self.window_len)
    }

    pub fn add(&mut self, values: &[f64]) {
        for &value in values {
            self.update(value);
        }
    }

    pub fn update(&mut self, x: f64) {
        self.value = match self.count {
            0 => x,
            _ => self.alpha * x + (1.0 - self.alpha) * self.value,
        };
        self.count += 1;

        // Read the oldest sample before the push below evicts it.
        let boundary = u64::from(self.window_len) + 1;
        if let Some(&oldest) = self.window.oldest() {
            if self.count == boundary {
                self.value -= self.coeff / self.alpha * oldest;
            } else if self.count > boundary {
                self.value -= self.coeff * oldest;
            }
        }

        self.window.push(x);
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new_unchecked(&EmaParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Ema, EmaParams};

    fn ema(alpha: f64, window_len: u32) -> Ema {
        Ema::new(&EmaParams { alpha, window_len }).unwrap()
    }

    #[test]
    fn test_default_params() {
        let indicator = Ema::default();
        assert_eq!(indicator.alpha(), 0.5);
        assert_eq!(indicator.window_len(), 10);
        assert_eq!(indicator.value, 0.0);
        assert_eq!(indicator.count(), 0);
    }

    #[test]
    fn test_first_sample_seeds_value() {
        let mut indicator = Ema::default();
        indicator.update(42.0);
        assert_eq!(indicator.value, 42.0);
    }

    #[test]
    fn test_identity_with_unit_alpha_and_window() {
        let mut indicator = ema(1.0, 1);
        for &x in &[3.0, -1.5, 8.0, 8.0, 0.25, 100.0] {
            indicator.update(x);
            assert_eq!(indicator.value, x);
        }
    }

    #[test]
    fn test_boundary_correction() {
        let mut indicator = ema(0.5, 2);
        indicator.add(&[1.0, 2.0]);
        assert_eq!(indicator.value, 1.5);
        // 0.5 * 3 + 0.25 * 2; the seeded 1.0 is removed with weight 0.25.
        indicator.update(3.0);
        assert!((indicator.value - 2.0).abs() < 1e-12);
        // 0.5 * 4 + 0.25 * 3.
        indicator.update(4.0);
        assert!((indicator.value - 2.75).abs() < 1e-12);
    }

    #[test]
    fn test_matches_truncated_weighted_sum() {
        let alpha = 0.3;
        let window_len = 5;
        let xs = [
            10.0, 11.5, 9.0, 12.25, 13.0, 8.5, 7.75, 14.0, 15.5, 9.25, 10.0, 11.0,
        ];

        let mut indicator = ema(alpha, window_len);
        for (t, &x) in xs.iter().enumerate() {
            indicator.update(x);
            if t >= window_len as usize {
                let expected: f64 = (0..window_len as usize)
                    .map(|k| alpha * (1.0 - alpha).powi(k as i32) * xs[t - k])
                    .sum();
                assert!(
                    (indicator.value - expected).abs() < 1e-9,
                    "t {}: expected {} but got {}",
                    t,
                    expected,
                    indicator.value
                );
            }
        }
    }

    #[test]
    fn test_constant_series_converges_to_weight_mass() {
        let mut indicator = ema(0.5, 10);
        indicator.add(&[4.0; 50]);
        let expected = 4.0 * (1.0 - 0.5f64.powi(10));
        assert!((indicator.value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_maturity() {
        let mut indicator = ema(0.5, 3);
        assert_eq!(indicator.maturity(), 3);
        indicator.add(&[1.0, 2.0]);
        assert!(!indicator.mature());
        indicator.update(3.0);
        assert!(indicator.mature());
    }

    #[test]
    fn test_invalid_params() {
        assert!(Ema::new(&EmaParams {
            alpha: 0.0,
            window_len: 10
        })
        .is_err());
        assert!(Ema::new(&EmaParams {
            alpha: 1.5,
            window_len: 10
        })
        .is_err());
        assert!(Ema::new(&EmaParams {
            alpha: f64::NAN,
            window_len: 10
        })
        .is_err());
        assert!(Ema::new(&EmaParams {
            alpha: 0.5,
            window_len: 0
        })
        .is_err());
    }
}
