//! Instance loader for the plain-text wave-selection format.
//!
//! The format is line oriented:
//!
//! ```text
//! <orders> <items> <aisles>
//! <k> <item> <qty> ... <item> <qty>     one line per order
//! <k> <item> <qty> ... <item> <qty>     one line per aisle
//! <lower_bound> <upper_bound>
//! ```
//!
//! Blank lines are skipped and `#` starts a comment that runs to the end of
//! the line. Every error names the 1-based line it was found on.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, WavePickError};
use crate::instance::{ItemQuantity, ProblemInstance};

/// Parses [`ProblemInstance`]s from text.
///
/// # Example
///
/// ```
/// use wavepick_core::InstanceLoader;
///
/// let instance = InstanceLoader::from_str(
///     "2 2 1\n\
///      1 0 3\n\
///      1 1 2\n\
///      2 0 3 1 2\n\
///      1 5\n",
/// )
/// .unwrap();
///
/// assert_eq!(instance.order_count(), 2);
/// assert_eq!(instance.total_stock(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceLoader;

impl InstanceLoader {
    /// Parses an instance from a string slice.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<ProblemInstance> {
        Self::from_bufread(input.as_bytes())
    }

    /// Parses an instance from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<ProblemInstance> {
        Self::from_bufread(BufReader::new(reader))
    }

    /// Parses an instance from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<ProblemInstance> {
        let path = path.as_ref();
        let instance = Self::from_reader(File::open(path)?)?;
        debug!(
            path = %path.display(),
            orders = instance.order_count(),
            items = instance.item_count(),
            aisles = instance.aisle_count(),
            "loaded instance"
        );
        Ok(instance)
    }

    /// Parses an instance from a buffered reader.
    pub fn from_bufread<B: BufRead>(input: B) -> Result<ProblemInstance> {
        let mut lines = Records::new(input);

        let (line, header) = lines.expect("header `<orders> <items> <aisles>`")?;
        let [order_count, item_count, aisle_count] = fixed::<usize, 3>(line, &header)?;

        let mut builder = ProblemInstance::builder(item_count);
        for order in 0..order_count {
            let (line, tokens) = lines.expect(&format!("order {}", order))?;
            builder = builder.order(quantities(line, &tokens, item_count)?);
        }
        for aisle in 0..aisle_count {
            let (line, tokens) = lines.expect(&format!("aisle {}", aisle))?;
            builder = builder.aisle(quantities(line, &tokens, item_count)?);
        }

        let (line, tokens) = lines.expect("bounds `<lower_bound> <upper_bound>`")?;
        let [lower_bound, upper_bound] = fixed::<u64, 2>(line, &tokens)?;

        if let Some((line, _)) = lines.next_record()? {
            return Err(WavePickError::format(line, "unexpected trailing data"));
        }

        builder.bounds(lower_bound, upper_bound).build()
    }
}

/// Non-empty, comment-stripped lines with their line numbers.
struct Records<B> {
    input: B,
    line: usize,
    buf: String,
}

impl<B: BufRead> Records<B> {
    fn new(input: B) -> Self {
        Self {
            input,
            line: 0,
            buf: String::new(),
        }
    }

    fn next_record(&mut self) -> Result<Option<(usize, Vec<String>)>> {
        loop {
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let content = self.buf.split('#').next().unwrap_or("");
            let tokens: Vec<String> = content.split_whitespace().map(str::to_owned).collect();
            if !tokens.is_empty() {
                return Ok(Some((self.line, tokens)));
            }
        }
    }

    fn expect(&mut self, what: &str) -> Result<(usize, Vec<String>)> {
        self.next_record()?.ok_or_else(|| {
            WavePickError::format(
                self.line + 1,
                format!("unexpected end of input, expected {}", what),
            )
        })
    }
}

fn parse<T: FromStr>(line: usize, token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| WavePickError::format(line, format!("invalid number `{}`", token)))
}

fn fixed<T: FromStr + Copy + Default, const N: usize>(
    line: usize,
    tokens: &[String],
) -> Result<[T; N]> {
    if tokens.len() != N {
        return Err(WavePickError::format(
            line,
            format!("expected {} values, found {}", N, tokens.len()),
        ));
    }
    let mut out = [T::default(); N];
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = parse(line, token)?;
    }
    Ok(out)
}

fn quantities(line: usize, tokens: &[String], item_count: usize) -> Result<Vec<ItemQuantity>> {
    let count: usize = parse(line, &tokens[0])?;
    let pairs = &tokens[1..];
    if count.checked_mul(2) != Some(pairs.len()) {
        return Err(WavePickError::format(
            line,
            format!(
                "declared {} item entries but found {} values",
                count,
                pairs.len()
            ),
        ));
    }
    pairs
        .chunks_exact(2)
        .map(|pair| {
            let item: usize = parse(line, &pair[0])?;
            if item >= item_count {
                return Err(WavePickError::format(
                    line,
                    format!("item {} out of range (instance has {} items)", item, item_count),
                ));
            }
            Ok((item, parse(line, &pair[1])?))
        })
        .collect()
}

#[cfg(test)]
#[path = "loading_tests.rs"]
mod tests;
