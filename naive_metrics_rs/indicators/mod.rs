mod ema;
mod macd;
mod rsi;
mod stoch;

pub use ema::{Ema, EmaParams};
pub use macd::{macd, Macd, MacdParams};
pub use rsi::{rsi, Rsi, RsiParams};
pub use stoch::{proc_k, proc_r, Stoch, StochParams};
