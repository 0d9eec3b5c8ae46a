pub mod error;
pub mod features;
pub mod indicators;
pub mod math;
pub mod window;

pub use crate::{
    error::{Error, Result},
    features::{features, Features},
    indicators::{macd, proc_k, proc_r, rsi},
    window::FixedWindow,
};
use serde::{Deserialize, Serialize};

/// Extracts the scalar quote an indicator operates on.
pub trait Price {
    fn price(&self) -> f64;
}

impl Price for f64 {
    fn price(&self) -> f64 {
        *self
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Candle {
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// A flat candle whose every price field equals `close`.
    pub fn with_close(close: f64) -> Self {
        Self {
            open: close,
            high: close,
            low: close,
            close,
            ..Self::default()
        }
    }
}

/// The quote of a candle is its closing price.
impl Price for Candle {
    fn price(&self) -> f64 {
        self.close
    }
}
