// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//


//! Reading and writing BiMDF problems in a plain text format.
//!
//! The format is whitespace separated. The first line is a comment,
//! followed by the number of nodes, the demand of each node, the number
//! of edges and one record per edge:
//!
//! ```text
//! <u> <v> <u_head> <v_head> <lower> <upper> <cost>
//! ```
//!
//! Head flags are `0` or `1`, an upper bound of `2147483647` is
//! infinite. A cost is one of
//!
//! - `0` zero cost,
//! - `A <target> <weight>` absolute deviation,
//! - `Q <target> <weight>` quadratic deviation,
//! - `S <target> <weight> <eps>` scale factor,
//! - `+ <k> <cost>...` sum of `k` nested costs.
//!
//! Real numbers may be decimal or hexadecimal floats (`0x1.8p+1`). The
//! writer always uses hexadecimal floats, so reading a written file
//! reproduces all values exactly.
//!
//! # Example
//!
//! ```
//! use bimdf::format::{read_from_buf, write};
//!
//! let text = "# two nodes\n2\n1 -1\n1\n0 1 1 0 0 2147483647 A 0x1p+1 1.5\n";
//! let bimdf = read_from_buf(&mut text.as_bytes()).unwrap();
//! assert_eq!(bimdf.num_edges(), 1);
//! assert_eq!(bimdf.demand(0), 1);
//! assert_eq!(bimdf.upper(0), bimdf::INF);
//! assert_eq!(bimdf.evaluate(0, 4), 3.0);
//!
//! let mut out = vec![];
//! write(&mut out, &bimdf).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "# BiMDF file\n2\n1\n-1\n1\n0 1 1 0 0 2147483647 A 0x1p+1 0x1.8p+0\n"
//! );
//! ```

mod parser;

pub use self::parser::{read, read_from_buf, ParseError};

use crate::cost::CostFunction;
use crate::problems::BiMdf;

use std::error;
use std::fmt;
use std::io::{self, Write};

/// Error when reading or writing a BiMDF file.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Parse(ParseError),
    /// The file is well formed but describes an invalid problem.
    Data { msg: String },
    /// The problem cannot be represented in the file format.
    Unsupported { msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Io(err) => err.fmt(fmt),
            Parse(err) => err.fmt(fmt),
            Data { msg } => write!(fmt, "Data error: {}", msg),
            Unsupported { msg } => write!(fmt, "Unsupported: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn cause(&self) -> Option<&dyn error::Error> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Format a float like C's `%a`.
///
/// Trailing zeros of the mantissa are dropped, zero is `0x0p+0`.
pub fn format_hexfloat(x: f64) -> Option<String> {
    if !x.is_finite() {
        return None;
    }
    let bits = x.to_bits();
    let sign = if bits >> 63 != 0 { "-" } else { "" };
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let mantissa = bits & ((1u64 << 52) - 1);

    let (lead, exp) = match (biased, mantissa) {
        (0, 0) => return Some(format!("{}0x0p+0", sign)),
        (0, _) => (0, -1022),
        _ => (1, biased - 1023),
    };
    let digits = format!("{:013x}", mantissa);
    let digits = digits.trim_end_matches('0');
    if digits.is_empty() {
        Some(format!("{}0x{}p{:+}", sign, lead, exp))
    } else {
        Some(format!("{}0x{}.{}p{:+}", sign, lead, digits, exp))
    }
}

fn real(x: f64) -> Result<String> {
    format_hexfloat(x).ok_or_else(|| Error::Unsupported {
        msg: format!("non-finite value {}", x),
    })
}

fn write_cost<W: Write>(w: &mut W, cost: &CostFunction) -> Result<()> {
    match cost {
        CostFunction::Zero => write!(w, "0")?,
        CostFunction::AbsDeviation(f) => write!(w, "A {} {}", real(f.target)?, real(f.weight)?)?,
        CostFunction::QuadDeviation(f) => write!(w, "Q {} {}", real(f.target)?, real(f.weight)?)?,
        CostFunction::ScaleFactor(f) => write!(w, "S {} {} {}", real(f.target)?, real(f.weight)?, real(f.eps)?)?,
        CostFunction::Virtual(_) => {
            return Err(Error::Unsupported {
                msg: "user defined cost functions cannot be written".to_string(),
            })
        }
        CostFunction::Sum(sum) => {
            write!(w, "+ {}", sum.len())?;
            for f in sum.iter() {
                write!(w, " ")?;
                write_cost(w, f)?;
            }
        }
    }
    Ok(())
}

/// Write a BiMDF.
///
/// Fails with `Error::Unsupported` for user defined cost functions and
/// non-finite parameters.
pub fn write<W: Write>(mut w: W, bimdf: &BiMdf) -> Result<()> {
    writeln!(w, "# BiMDF file")?;
    writeln!(w, "{}", bimdf.num_nodes())?;
    for u in bimdf.nodes() {
        writeln!(w, "{}", bimdf.demand(u))?;
    }
    writeln!(w, "{}", bimdf.num_edges())?;
    for e in bimdf.edges() {
        write!(
            w,
            "{} {} {} {} {} {} ",
            bimdf.u(e),
            bimdf.v(e),
            bimdf.u_head(e) as u8,
            bimdf.v_head(e) as u8,
            bimdf.lower(e),
            bimdf.upper(e)
        )?;
        write_cost(&mut w, bimdf.cost(e))?;
        writeln!(w)?;
    }
    Ok(())
}

/// Write a BiMDF to a named file.
pub fn write_to_file(filename: &str, bimdf: &BiMdf) -> Result<()> {
    let mut f = io::BufWriter::new(std::fs::File::create(filename)?);
    write(&mut f, bimdf)?;
    f.flush()?;
    Ok(())
}
