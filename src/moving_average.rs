use num_traits::Float;

use crate::{error::Result, windowed_average::WindowedAverage};

/// An append-only sequence that reports a moving average of its latest values.
pub trait MovingAverage<T> {
    /// Average of the last `n` values added, `n` being the implementation's window.
    fn moving_average(&self) -> T;

    /// Appends `value` to the end of the sequence.
    fn add(&mut self, value: T);

    /// Returns the value at `index`, failing with
    /// [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) past the end.
    fn get(&self, index: usize) -> Result<T>;
}

impl<T> MovingAverage<T> for WindowedAverage<T>
where
    T: Float,
{
    fn moving_average(&self) -> T {
        WindowedAverage::moving_average(self)
    }

    fn add(&mut self, value: T) {
        WindowedAverage::add(self, value)
    }

    fn get(&self, index: usize) -> Result<T> {
        WindowedAverage::get(self, index)
    }
}
