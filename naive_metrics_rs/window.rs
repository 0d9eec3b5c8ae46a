use crate::{
    error::{Error, Result},
    math::minmax,
    Price,
};
use bounded_vec_deque::BoundedVecDeque;

/// Ring buffer holding the last `capacity` pushed values in insertion order.
pub struct FixedWindow<T> {
    values: BoundedVecDeque<T>,
}

impl<T> FixedWindow<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        Self {
            values: BoundedVecDeque::new(capacity),
        }
    }

    /// Appends `value`, returning the evicted oldest element if the window was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        self.values.push_back(value)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.iter()
    }

    /// The element the next push evicts once the window is full.
    pub fn oldest(&self) -> Option<&T> {
        self.values.front()
    }

    pub fn capacity(&self) -> usize {
        self.values.max_len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.values.max_len()
    }
}

impl<T: Price> FixedWindow<T> {
    pub fn max(&self) -> Result<f64> {
        self.minmax().map(|(_, max)| max)
    }

    pub fn min(&self) -> Result<f64> {
        self.minmax().map(|(min, _)| min)
    }

    fn minmax(&self) -> Result<(f64, f64)> {
        minmax(self.values.iter().map(Price::price)).ok_or(Error::InsufficientData)
    }
}

impl FixedWindow<f64> {
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}
