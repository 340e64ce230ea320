use crate::{
    error::{Error, Result},
    moving_average::MovingAverage,
    windowed_average::WindowedAverage,
};

/// One independent moving average per column of a numeric record stream.
#[derive(Debug, Clone)]
pub struct StreamSet<A = WindowedAverage> {
    streams: Vec<A>,
}

impl StreamSet<WindowedAverage> {
    pub fn new(columns: usize, window_size: usize) -> Result<Self> {
        if columns < 1 {
            return Err(Error::InvalidArgument {
                name: "column count",
                value: columns,
            });
        }
        let streams = (0..columns)
            .map(|_| WindowedAverage::new(window_size))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { streams })
    }
}

impl<A> StreamSet<A>
where
    A: MovingAverage<f64>,
{
    pub fn from_streams(streams: Vec<A>) -> Self {
        Self { streams }
    }

    pub fn columns(&self) -> usize {
        self.streams.len()
    }

    /// Adds one value to each column and returns the updated averages.
    ///
    /// Nothing is added if the record width doesn't match the column count.
    pub fn push(&mut self, record: &[f64]) -> Result<Vec<f64>> {
        if record.len() != self.streams.len() {
            return Err(Error::ColumnCountMismatch {
                expected: self.streams.len(),
                actual: record.len(),
            });
        }
        Ok(self
            .streams
            .iter_mut()
            .zip(record)
            .map(|(stream, &value)| {
                stream.add(value);
                stream.moving_average()
            })
            .collect())
    }

    pub fn averages(&self) -> Vec<f64> {
        self.streams.iter().map(|stream| stream.moving_average()).collect()
    }

    /// Returns the `index`-th value added to `column`.
    pub fn get(&self, column: usize, index: usize) -> Result<f64> {
        let stream = self.streams.get(column).ok_or(Error::ColumnOutOfRange {
            column,
            columns: self.streams.len(),
        })?;
        stream.get(index)
    }
}

/// Splits `line` into numbers.
///
/// Blank lines and `#` comments yield `None`. A space delimiter splits on any
/// run of whitespace.
pub fn parse_record(line: &str, delimiter: char) -> Result<Option<Vec<f64>>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parse = |field: &str| {
        field.parse::<f64>().map_err(|source| Error::ParseValue {
            field: field.to_owned(),
            source,
        })
    };

    let values = if delimiter == ' ' {
        line.split_whitespace().map(parse).collect::<Result<Vec<_>>>()?
    } else {
        line.split(delimiter)
            .map(|field| parse(field.trim()))
            .collect::<Result<Vec<_>>>()?
    };
    Ok(Some(values))
}

pub fn format_record(values: &[f64], delimiter: char, precision: u16) -> String {
    let precision = usize::from(precision);
    values
        .iter()
        .map(|value| format!("{value:.precision$}"))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}
