use crate::{
    error::{Error, Result},
    window::FixedWindow,
    Price,
};
use serde::{Deserialize, Serialize};
use std::cmp::min;
use tracing::trace;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct StochParams {
    pub period: u32,
}

impl Default for StochParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl StochParams {
    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(Error::InvalidParams(
                "stochastic period must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Stochastic %K and Williams %R over the quotes of the last `period` samples.
///
/// Both compare the current quote to the trailing high-low range.
pub struct Stoch {
    pub k: f64,
    pub r: f64,
    window: FixedWindow<f64>,
    t: u32,
    t1: u32,
}

impl Stoch {
    pub fn new(params: &StochParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::new_unchecked(params))
    }

    fn new_unchecked(params: &StochParams) -> Self {
        Self {
            k: 0.0,
            r: 0.0,
            window: FixedWindow::new(params.period as usize),
            t: 0,
            t1: params.period + 1,
        }
    }

    pub fn maturity(&self) -> u32 {
        self.t1
    }

    pub fn mature(&self) -> bool {
        self.t >= self.t1
    }

    pub fn update<T: Price>(&mut self, quote: &T) -> Result<()> {
        self.t = min(self.t + 1, self.t1);

        let current = quote.price();
        self.window.push(current);

        if self.t >= self.t1 {
            let (k, r) = oscillators(current, self.window.min()?, self.window.max()?);
            self.k = k;
            self.r = r;
        }
        Ok(())
    }
}

/// %K and %R of `current` within `[lowest, highest]`. A flat range yields 0 for
/// both. Ratios are taken before scaling so a quote at either bound maps to
/// exactly 0, 100 or -100.
fn oscillators(current: f64, lowest: f64, highest: f64) -> (f64, f64) {
    let range = highest - lowest;
    if range == 0.0 {
        trace!(highest, "stochastic range is flat");
        return (0.0, 0.0);
    }
    (
        100.0 * ((current - lowest) / range),
        -100.0 * ((highest - current) / range),
    )
}

impl Default for Stoch {
    fn default() -> Self {
        Self::new_unchecked(&StochParams::default())
    }
}

fn run<T: Price>(series: &[T], output: impl Fn(&Stoch) -> f64) -> Result<Vec<f64>> {
    let mut indicator = Stoch::default();
    let mut values = Vec::with_capacity(series.len());
    for quote in series {
        indicator.update(quote)?;
        values.push(output(&indicator));
    }
    Ok(values)
}

/// Stochastic %K(14) of every sample; the first 14 values are 0.
pub fn proc_k<T: Price>(series: &[T]) -> Result<Vec<f64>> {
    run(series, |indicator| indicator.k)
}

/// Williams %R(14) of every sample; the first 14 values are 0.
pub fn proc_r<T: Price>(series: &[T]) -> Result<Vec<f64>> {
    run(series, |indicator| indicator.r)
}
