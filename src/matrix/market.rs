//! A minimal Matrix Market-style text (de)serializer for [`SparseCsc`].
//!
//! Grounded in `writeMtx.c`'s format: a header line `m n nnz`, then one
//! `row col value` line per stored entry, 1-based, columns outer and
//! within-column entries inner, in storage order. There is no reader in the
//! original sources; this crate adds one so the round-trip property in the
//! testable-properties list has something to round-trip through.

use std::io::{self, BufRead, Write};

use crate::error::{LamgError, Result};
use crate::matrix::sparse::SparseCsc;

const KERNEL: &str = "matrix_market";

/// Write `a` in Matrix Market form: `m n nnz` followed by one `row col value`
/// line per entry (1-based indices), columns outer / within-column entries
/// inner, in the order they appear in storage.
pub fn write_matrix_market<W: Write>(w: &mut W, a: &SparseCsc) -> Result<()> {
    a.check_invariants(KERNEL)?;
    writeln!(w, "{} {} {}", a.n_rows, a.n_cols, a.nnz()).map_err(io_err)?;
    for j in 0..a.n_cols {
        let (rows, vals) = a.col(j);
        for (&i, &v) in rows.iter().zip(vals) {
            writeln!(w, "{} {} {}", i + 1, j + 1, v).map_err(io_err)?;
        }
    }
    Ok(())
}

/// Parse a matrix previously produced by [`write_matrix_market`] (or any
/// conforming file). Entries may arrive in any order; they are sorted into
/// ascending-row-per-column order to satisfy `SparseCsc`'s invariant, since
/// the text format itself imposes none.
pub fn read_matrix_market<R: BufRead>(r: &mut R) -> Result<SparseCsc> {
    let mut lines = r.lines();
    let header = lines
        .next()
        .ok_or_else(|| LamgError::shape(KERNEL, "empty input, expected a header line"))?
        .map_err(io_err)?;
    let mut header_fields = header.split_whitespace();
    let n_rows = parse_usize(&mut header_fields, "m")?;
    let n_cols = parse_usize(&mut header_fields, "n")?;
    let nnz = parse_usize(&mut header_fields, "nnz")?;

    let mut triplets = Vec::with_capacity(nnz);
    for line in lines {
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let row = parse_usize(&mut fields, "row")? ;
        let col = parse_usize(&mut fields, "col")?;
        let value: f64 = fields
            .next()
            .ok_or_else(|| LamgError::shape(KERNEL, "missing value field"))?
            .parse()
            .map_err(|_| LamgError::type_err(KERNEL, "value field is not a number"))?;
        if row == 0 || col == 0 {
            return Err(LamgError::shape(KERNEL, "row/col indices must be 1-based and non-zero"));
        }
        triplets.push((row - 1, col - 1, value));
    }

    if triplets.len() != nnz {
        return Err(LamgError::shape(
            KERNEL,
            format!("header declared nnz={nnz} but {} entries were read", triplets.len()),
        ));
    }

    Ok(SparseCsc::from_triplets(n_rows, n_cols, &triplets))
}

fn parse_usize<'a>(fields: &mut impl Iterator<Item = &'a str>, name: &'static str) -> Result<usize> {
    fields
        .next()
        .ok_or_else(|| LamgError::shape(KERNEL, format!("missing {name} field")))?
        .parse()
        .map_err(|_| LamgError::type_err(KERNEL, format!("{name} field is not an integer")))
}

fn io_err(e: io::Error) -> LamgError {
    LamgError::type_err(KERNEL, format!("I/O error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_small_matrix() {
        let a = SparseCsc::from_triplets(3, 3, &[(0, 0, 1.0), (1, 1, 2.0), (2, 0, 3.0), (0, 2, 4.0)]);
        let mut buf = Vec::new();
        write_matrix_market(&mut buf, &a).unwrap();

        let mut cursor = Cursor::new(buf);
        let b = read_matrix_market(&mut cursor).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn header_is_m_n_nnz_in_that_order() {
        let a = SparseCsc::from_triplets(2, 3, &[(1, 2, 5.0)]);
        let mut buf = Vec::new();
        write_matrix_market(&mut buf, &a).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().next().unwrap(), "2 3 1");
        assert_eq!(text.lines().nth(1).unwrap(), "2 3 5");
    }

    #[test]
    fn rejects_nnz_mismatch() {
        let text = "2 2 5\n1 1 1.0\n";
        let mut cursor = Cursor::new(text.as_bytes());
        assert!(read_matrix_market(&mut cursor).is_err());
    }
}
