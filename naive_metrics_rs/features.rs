use crate::{
    error::Result,
    indicators::{macd, proc_k, proc_r, rsi},
    Price,
};
use serde::Serialize;
use tracing::debug;

/// Every indicator series of one input, aligned sample by sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Features {
    pub rsi: Vec<f64>,
    pub proc_k: Vec<f64>,
    pub proc_r: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl Features {
    pub fn len(&self) -> usize {
        self.rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rsi.is_empty()
    }

    /// Feature vector of sample `i`, ordered as the struct fields.
    pub fn row(&self, i: usize) -> Option<[f64; 5]> {
        if i >= self.len() {
            return None;
        }
        Some([
            self.rsi[i],
            self.proc_k[i],
            self.proc_r[i],
            self.macd[i],
            self.signal[i],
        ])
    }
}

/// Computes all indicators over `series`. The transforms share no state and
/// run on the rayon pool.
pub fn features<T: Price + Sync>(series: &[T]) -> Result<Features> {
    debug!(samples = series.len(), "computing features");

    let quotes: Vec<f64> = series.iter().map(Price::price).collect();
    let ((rsi, (macd, signal)), (proc_k, proc_r)) = rayon::join(
        || rayon::join(|| rsi(&quotes), || macd(&quotes)),
        || rayon::join(|| proc_k(series), || proc_r(series)),
    );

    Ok(Features {
        rsi,
        proc_k: proc_k?,
        proc_r: proc_r?,
        macd,
        signal,
    })
}
