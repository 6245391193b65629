//! Plain-text problem format
//!
//! ```text
//! m n
//! <m rows of n comma-separated integers: input image A>
//! h w
//! <m rows of n comma-separated integers: observed output C>
//! ```
//!
//! Blank lines anywhere are ignored. The recovered kernel is written as `h`
//! rows of `w` comma-separated integers.

use ndarray::Array2;

use crate::algorithm::problem::{KernelShape, Problem};
use crate::io::configuration::MAX_SYSTEM_ENTRIES;
use crate::io::error::{Result, invalid_parameter, parse_error, shape_mismatch};

/// Non-blank lines paired with their 1-based line numbers
struct ContentLines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> ContentLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }

    fn next_content(&mut self) -> Option<(usize, &'a str)> {
        self.inner
            .by_ref()
            .map(|(index, line)| (index + 1, line.trim()))
            .find(|(_, line)| !line.is_empty())
    }
}

/// Parse a whitespace-separated pair of positive dimensions
fn parse_dimensions(
    line: Option<(usize, &str)>,
    names: (&'static str, &'static str),
) -> Result<(usize, usize)> {
    let expected = format!("expected '{} {}'", names.0, names.1);
    let (line_no, text) = line.ok_or_else(|| parse_error(0, &expected))?;

    let values = text
        .split_whitespace()
        .map(str::parse::<i64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| parse_error(line_no, &format!("{expected}: {e}")))?;

    let [first, second] = values.as_slice() else {
        return Err(parse_error(
            line_no,
            &format!("{expected}, found {} values", values.len()),
        ));
    };

    let positive = |value: i64, name: &'static str| -> Result<usize> {
        usize::try_from(value)
            .ok()
            .filter(|&v| v > 0)
            .ok_or_else(|| invalid_parameter(name, &value, &"must be a positive integer"))
    };

    Ok((positive(*first, names.0)?, positive(*second, names.1)?))
}

/// Parse `rows` lines of `cols` comma-separated integers
fn parse_matrix(
    lines: &mut ContentLines<'_>,
    rows: usize,
    cols: usize,
    what: &'static str,
) -> Result<Array2<i64>> {
    if rows.checked_mul(cols).is_none_or(|entries| entries > MAX_SYSTEM_ENTRIES) {
        return Err(invalid_parameter(
            what,
            &format!("{rows}x{cols}"),
            &format!("declared size exceeds {MAX_SYSTEM_ENTRIES} entries"),
        ));
    }

    let mut values = Vec::new();

    for row in 0..rows {
        let (line_no, text) = lines
            .next_content()
            .ok_or_else(|| shape_mismatch(what, &format!("{rows} rows"), &format!("{row} rows")))?;

        let parsed = text
            .split(',')
            .map(|value| value.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| parse_error(line_no, &format!("invalid integer in {what}: {e}")))?;

        if parsed.len() != cols {
            return Err(shape_mismatch(
                what,
                &format!("{cols} values on line {line_no}"),
                &parsed.len(),
            ));
        }
        values.extend(parsed);
    }

    Array2::from_shape_vec((rows, cols), values)
        .map_err(|e| shape_mismatch(what, &format!("{rows}x{cols}"), &e))
}

/// Parse a problem in the plain-text format
///
/// # Errors
///
/// Returns an error if:
/// - A header line is missing or malformed, or a value is not an integer (`Parse`)
/// - A dimension is zero or negative, or a declared matrix exceeds
///   `MAX_SYSTEM_ENTRIES` (`InvalidParameter`)
/// - A matrix row has the wrong number of values or rows are missing (`ShapeMismatch`)
/// - Non-blank text follows the observed output (`Parse`)
pub fn parse_problem(text: &str) -> Result<Problem> {
    let mut lines = ContentLines::new(text);

    let (m, n) = parse_dimensions(lines.next_content(), ("m", "n"))?;
    let input = parse_matrix(&mut lines, m, n, "input image")?;

    let (h, w) = parse_dimensions(lines.next_content(), ("h", "w"))?;
    let kernel_shape = KernelShape::new(h, w)?;
    let observed = parse_matrix(&mut lines, m, n, "observed output")?;

    if let Some((line_no, _)) = lines.next_content() {
        return Err(parse_error(line_no, &"unexpected content after observed output"));
    }

    Problem::new(input, observed, kernel_shape)
}

/// Format an integer matrix as comma-separated rows, one per line
///
/// This is the output format for recovered kernels and the matrix format
/// inside problem files.
pub fn format_matrix(matrix: &Array2<i64>) -> String {
    matrix
        .rows()
        .into_iter()
        .map(|row| {
            let mut line = row
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            line.push('\n');
            line
        })
        .collect()
}

/// Format a problem so that [`parse_problem`] reads it back unchanged
pub fn format_problem(problem: &Problem) -> String {
    let (m, n) = problem.image_dim();
    let shape = problem.kernel_shape();

    [
        format!("{m} {n}\n"),
        format_matrix(problem.input()),
        format!("{} {}\n", shape.rows(), shape.cols()),
        format_matrix(problem.observed()),
    ]
    .concat()
}
