use super::ema::{Ema, EmaParams};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::max;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct MacdParams {
    pub fast_period: u32,
    pub slow_period: u32,
    pub signal_period: u32,
    pub alpha: f64,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            alpha: 0.5,
        }
    }
}

impl MacdParams {
    pub fn validate(&self) -> Result<()> {
        if self.fast_period > self.slow_period {
            return Err(Error::InvalidParams(format!(
                "macd fast period {} exceeds slow period {}",
                self.fast_period, self.slow_period
            )));
        }
        for &window_len in &[self.fast_period, self.slow_period, self.signal_period] {
            self.ema_params(window_len).validate()?;
        }
        Ok(())
    }

    fn ema_params(&self, window_len: u32) -> EmaParams {
        EmaParams {
            alpha: self.alpha,
            window_len,
        }
    }
}

pub struct Macd {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,

    fast_ema: Ema,
    slow_ema: Ema,
    signal_ema: Ema,
}

impl Macd {
    pub fn new(params: &MacdParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            value: 0.0,
            signal: 0.0,
            histogram: 0.0,
            fast_ema: Ema::new(&params.ema_params(params.fast_period))?,
            slow_ema: Ema::new(&params.ema_params(params.slow_period))?,
            signal_ema: Ema::new(&params.ema_params(params.signal_period))?,
        })
    }

    /// Samples until every underlying average has filled its window.
    pub fn maturity(&self) -> u32 {
        max(
            max(self.slow_ema.maturity(), self.fast_ema.maturity()),
            self.signal_ema.maturity(),
        )
    }

    pub fn mature(&self) -> bool {
        self.slow_ema.mature() && self.fast_ema.mature() && self.signal_ema.mature()
    }

    pub fn update(&mut self, price: f64) {
        self.fast_ema.update(price);
        self.slow_ema.update(price);

        self.value = self.fast_ema.value - self.slow_ema.value;
        self.signal_ema.update(self.value);
        self.signal = self.signal_ema.value;
        self.histogram = self.value - self.signal;
    }
}

impl Default for Macd {
    fn default() -> Self {
        let params = MacdParams::default();
        Self {
            value: 0.0,
            signal: 0.0,
            histogram: 0.0,
            fast_ema: Ema::new_unchecked(&params.ema_params(params.fast_period)),
            slow_ema: Ema::new_unchecked(&params.ema_params(params.slow_period)),
            signal_ema: Ema::new_unchecked(&params.ema_params(params.signal_period)),
        }
    }
}

/// MACD(12, 26, 9) line and signal line of every sample.
pub fn macd(series: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut indicator = Macd::default();
    series
        .iter()
        .map(|&price| {
            indicator.update(price);
            (indicator.value, indicator.signal)
        })
        .unzip()
}
