use log::{debug, trace};
use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// Moving average over the last `window_size` added values that also keeps
/// every value ever added for positional lookup.
///
/// The average is always the window sum divided by `window_size`, even while
/// fewer than `window_size` values have been added. With a window of 5 and the
/// values `[0.0, 1.0]` the average is `0.2`, not `0.5`.
#[derive(Debug, Clone)]
pub struct WindowedAverage<T = f64> {
    window_size: usize,
    divisor: T,
    history: Vec<T>,
    window_sum: T,
    window_start: usize,
}

impl<T> WindowedAverage<T>
where
    T: Float,
{
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size < 1 {
            return Err(Error::InvalidArgument {
                name: "window size",
                value: window_size,
            });
        }
        let divisor = <T as NumCast>::from(window_size).ok_or(Error::InvalidArgument {
            name: "window size",
            value: window_size,
        })?;
        debug!("Created moving average with a window of {window_size}");
        Ok(Self {
            window_size,
            divisor,
            history: Vec::new(),
            window_sum: T::zero(),
            window_start: 0,
        })
    }

    /// Appends `value`, sliding the window by one once it is full.
    ///
    /// Non-finite values are accepted as given.
    pub fn add(&mut self, value: T) {
        self.window_sum = self.window_sum + value;
        if self.history.len() > self.window_size - 1 {
            self.window_sum = self.window_sum - self.history[self.window_start];
            self.window_start += 1;
            trace!("Window now starts at index {}", self.window_start);
        }
        self.history.push(value);
    }

    pub fn moving_average(&self) -> T {
        self.window_sum / self.divisor
    }

    /// Returns the `index`-th value ever added, regardless of the window.
    pub fn get(&self, index: usize) -> Result<T> {
        self.history
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.history.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn window_sum(&self) -> T {
        self.window_sum
    }

    /// Index of the oldest value still counted in the window sum.
    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Number of values currently inside the window.
    pub fn window_len(&self) -> usize {
        self.history.len() - self.window_start
    }
}

impl<T> Extend<T> for WindowedAverage<T>
where
    T: Float,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
