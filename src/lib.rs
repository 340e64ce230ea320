//! Fixed-window moving averages with full positional history.
//!
//! ```
//! use windowed_average::WindowedAverage;
//!
//! let mut average = WindowedAverage::new(5)?;
//! average.add(0.0);
//! average.add(1.0);
//! // Always divided by the window size.
//! assert_eq!(average.moving_average(), 0.2);
//! assert_eq!(average.get(1)?, 1.0);
//! # Ok::<(), windowed_average::Error>(())
//! ```

mod error;
mod moving_average;
mod stream;
mod windowed_average;

pub use error::{Error, Result};
pub use moving_average::MovingAverage;
pub use stream::{format_record, parse_record, StreamSet};
pub use windowed_average::WindowedAverage;
