use crate::{
    error::{Error, Result},
    window::FixedWindow,
};
use serde::{Deserialize, Serialize};
use std::cmp::min;
use tracing::trace;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct RsiParams {
    pub period: u32,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl RsiParams {
    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(Error::InvalidParams(
                "rsi period must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Relative strength index over plain sums of gains and losses.
///
/// `RSI = 100 - 100 / (1 + RS)` where `RS` is the sum of gains over the sum of
/// absolute losses in the trailing window. The first two samples never feed
/// the windows and the first `period + 1` outputs are 0. A window without
/// losses saturates at 100.
pub struct Rsi {
    pub value: f64,

    gains: FixedWindow<f64>,
    losses: FixedWindow<f64>,

    last_price: f64,

    t: u32,
    t1: u32,
}

impl Rsi {
    pub fn new(params: &RsiParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::new_unchecked(params))
    }

    fn new_unchecked(params: &RsiParams) -> Self {
        Self {
            value: 0.0,
            gains: FixedWindow::new(params.period as usize),
            losses: FixedWindow::new(params.period as usize),
            last_price: 0.0,
            t: 0,
            t1: params.period + 2,
        }
    }

    pub fn maturity(&self) -> u32 {
        self.t1
    }

    pub fn mature(&self) -> bool {
        self.t >= self.t1
    }

    pub fn update(&mut self, price: f64) {
        // `t` counts samples including this one, saturated at maturity.
        self.t = min(self.t + 1, self.t1);

        if self.t > 2 {
            let diff = price - self.last_price;
            if diff > 0.0 {
                self.gains.push(diff);
                self.losses.push(0.0);
            } else {
                self.gains.push(0.0);
                self.losses.push(diff);
            }
        }

        if self.t >= self.t1 {
            let gain_sum = self.gains.sum();
            let loss_sum = self.losses.sum().abs();
            self.value = if loss_sum == 0.0 {
                trace!(gain_sum, "rsi window has no losses; saturating");
                100.0
            } else {
                let rs = gain_sum / loss_sum;
                100.0 - 100.0 / (1.0 + rs)
            };
        }

        self.last_price = price;
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new_unchecked(&RsiParams::default())
    }
}

/// RSI(14) of every sample; the first 15 values are 0.
pub fn rsi(series: &[f64]) -> Vec<f64> {
    let mut indicator = Rsi::default();
    series
        .iter()
        .map(|&price| {
            indicator.update(price);
            indicator.value
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{rsi, Rsi, RsiParams};

    #[test]
    fn test_rising_series_saturates() {
        let series: Vec<f64> = (1..=16u32).map(f64::from).collect();
        let output = rsi(&series);
        assert_eq!(output.len(), 16);
        assert_eq!(&output[..15], &[0.0; 15]);
        assert_eq!(output[15], 100.0);
    }

    #[test]
    fn test_flat_series_saturates() {
        let output = rsi(&[7.0; 20]);
        assert_eq!(&output[..15], &[0.0; 15]);
        assert!(output[15..].iter().all(|&v| v == 100.0));
    }

    #[test]
    fn test_falling_series() {
        let series: Vec<f64> = (0..20u32).map(|i| 100.0 - f64::from(i)).collect();
        let output = rsi(&series);
        assert!(output[15..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_mixed_series() {
        // Index 15 sees diffs for indices 2..=15: alternating +2 / -1.
        let mut series = vec![50.0, 50.0];
        for i in 0..14 {
            let last = series[series.len() - 1];
            series.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let output = rsi(&series);
        // gains 7 * 2 = 14, losses 7 * 1 = 7, RS = 2.
        assert!((output[15] - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_short_series() {
        assert!(rsi(&[]).is_empty());
        assert_eq!(rsi(&[1.0, 2.0, 3.0]), vec![0.0; 3]);
    }

    #[test]
    fn test_bounded_after_warm_up() {
        let series: Vec<f64> = (0..200u32)
            .map(|i| 100.0 + 10.0 * (f64::from(i) * 0.37).sin() + f64::from(i % 7))
            .collect();
        let output = rsi(&series);
        assert!(output.iter().all(|&v| (0.0..=100.0).contains(&v)));
    }

    #[test]
    fn test_custom_period() {
        let mut indicator = Rsi::new(&RsiParams { period: 3 }).unwrap();
        assert_eq!(indicator.maturity(), 5);
        for &price in &[1.0, 2.0, 3.0, 2.0] {
            indicator.update(price);
        }
        assert!(!indicator.mature());
        assert_eq!(indicator.value, 0.0);

        indicator.update(3.0);
        assert!(indicator.mature());
        // Windows hold diffs of indices 2, 3 and 4: +1, -1 and +1.
        assert!((indicator.value - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_period() {
        assert!(Rsi::new(&RsiParams { period: 0 }).is_err());
    }
}
