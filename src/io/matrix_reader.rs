use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    num::IntErrorKind,
    path::Path,
};

use thiserror::Error;

use crate::{errors::InputError, graph::*};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error(transparent)]
    Input(#[from] InputError),
}

pub type Result<T> = std::result::Result<T, ReadError>;

/// Reads a weight matrix in the following text format:
///
/// ```text
/// # comment
/// 3
/// 0 1 2.5
/// 1 0 3
/// 2.5 3 0
/// ```
///
/// The first data line holds the number of vertices `n`, followed by `n` lines of `n`
/// whitespace-separated numbers each. Blank lines and lines starting with `#` are skipped.
pub trait MatrixReader: Sized {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl MatrixReader for WeightMatrix {
    fn try_read_matrix<R: BufRead>(reader: R) -> Result<Self> {
        let rows = MatrixParser::new(reader).parse()?;
        Ok(WeightMatrix::try_from_rows(&rows)?)
    }

    fn try_read_matrix_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_matrix(buf_reader)
    }
}

macro_rules! raise_error_unless {
    ($cond : expr, $line : expr, $info : expr) => {
        if !($cond) {
            return Err(ReadError::Format {
                line: $line,
                message: $info.into(),
            });
        }
    };
}

struct MatrixParser<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> MatrixParser<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn next_data_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some(line));
        }

        Ok(None)
    }

    fn parse_header(&mut self) -> Result<NumNodes> {
        let line = self.next_data_line()?;
        raise_error_unless!(line.is_some(), self.line_number, "No header found");
        let line = line.unwrap_or_default();

        let mut parts = line.split_whitespace();
        let n = parts.next().map(str::parse::<NumNodes>);
        raise_error_unless!(
            !matches!(&n, Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow),
            self.line_number,
            format!("Invalid header; at most {} vertices are supported", NumNodes::MAX)
        );
        raise_error_unless!(
            matches!(n, Some(Ok(_))),
            self.line_number,
            "Invalid header; expected the number of vertices"
        );
        raise_error_unless!(
            parts.next().is_none(),
            self.line_number,
            "Invalid header; expected end of line"
        );

        Ok(n.and_then(|n| n.ok()).unwrap_or_default())
    }

    fn parse_row(&mut self, row: NumNodes, n: NumNodes) -> Result<Vec<Weight>> {
        let line = self.next_data_line()?;
        raise_error_unless!(
            line.is_some(),
            self.line_number,
            format!("Premature end of file; expected {n} rows, found {row}")
        );
        let line = line.unwrap_or_default();

        // the header is untrusted, so rows grow with the data actually read
        let mut weights = Vec::new();
        for token in line.split_whitespace() {
            let parsed = token.parse::<Weight>();
            raise_error_unless!(
                parsed.is_ok(),
                self.line_number,
                format!("Cannot parse \"{token}\" as weight in row {row}")
            );
            weights.push(parsed.unwrap_or_default());
        }

        raise_error_unless!(
            weights.len() == n as usize,
            self.line_number,
            format!("Row {row} has {} entries, expected {n}", weights.len())
        );

        Ok(weights)
    }

    fn parse(mut self) -> Result<Vec<Vec<Weight>>> {
        let n = self.parse_header()?;
        let rows = (0..n)
            .map(|row| self.parse_row(row, n))
            .collect::<Result<Vec<_>>>()?;

        let trailing = self.next_data_line()?;
        raise_error_unless!(
            trailing.is_none(),
            self.line_number,
            "Unexpected data after the last row"
        );

        Ok(rows)
    }
}
