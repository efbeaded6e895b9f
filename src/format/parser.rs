/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use super::{Error, Result};

use crate::cost::CostFunction;
use crate::graph::Flow;
use crate::problems::{BiMdf, EdgeInfo};

use log::debug;

use std::convert::TryFrom;
use std::fs;
use std::io;

use peg;

/// Error raised by the parser.
pub type ParseError = peg::error::ParseError<peg::str::LineCol>;

pub(super) struct Document {
    comment: String,
    demands: Vec<i64>,
    edges: Vec<EdgeLine>,
}

pub(super) struct EdgeLine {
    u: usize,
    v: usize,
    u_head: bool,
    v_head: bool,
    lower: i64,
    upper: i64,
    cost: CostFunction,
}

/// Parse a C99 hexadecimal float literal like `-0x1.8p+1`.
pub(super) fn parse_hexfloat(s: &str) -> Option<f64> {
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    let (mantissa, exp) = match s.find(|c: char| c == 'p' || c == 'P') {
        Some(i) => (&s[..i], s[i + 1..].parse::<i32>().ok()?),
        None => (s, 0),
    };
    let (int_part, frac_part) = match mantissa.find('.') {
        Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut value = 0.0f64;
    for c in int_part.chars().chain(frac_part.chars()) {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let shift = exp.checked_sub(4 * i32::try_from(frac_part.len()).ok()?)?;
    // split the scaling so subnormal results do not underflow early
    let value = value * 2f64.powi(shift / 2) * 2f64.powi(shift - shift / 2);
    Some(if negative { -value } else { value })
}

peg::parser! {

    grammar bimdf_parser() for str {
        pub(super) rule doc() -> Document
            = comment:$((!['\n'] [_])*) "\n"
              _ n:count() demands:demand()*<{n}>
              __ m:count() edges:edge()*<{m}>
              _ ![_]
              { Document { comment: comment.trim().to_string(), demands, edges } }

        rule demand() -> i64
            = __ d:int() { d }

        rule edge() -> EdgeLine
            = __ u:count() __ v:count() __ u_head:flag() __ v_head:flag() __ lower:int() __ upper:int() __ cost:cost()
              { EdgeLine { u, v, u_head, v_head, lower, upper, cost } }

        pub(super) rule cost() -> CostFunction
            = "0" { CostFunction::Zero }
            / "A" __ t:real() __ w:real() { CostFunction::abs_deviation(t, w) }
            / "Q" __ t:real() __ w:real() { CostFunction::quad_deviation(t, w) }
            / "S" __ t:real() __ w:real() __ eps:real() { CostFunction::scale_factor(t, w, eps) }
            / "+" __ k:count() fs:summand()*<{k}> { CostFunction::sum(fs) }

        rule summand() -> CostFunction
            = __ f:cost() { f }

        rule flag() -> bool
            = "0" { false } / "1" { true }

        rule count() -> usize
            = n:$(digit()+) {? n.parse().or(Err("count")) }

        rule int() -> i64
            = n:$(['-' | '+']? digit()+) {? n.parse().or(Err("integer")) }

        pub(super) rule real() -> f64
            = hexfloat() / decimal()

        rule hexfloat() -> f64
            = n:$(['-' | '+']? "0" ['x' | 'X'] hexdigit()* ("." hexdigit()*)? (['p' | 'P'] ['-' | '+']? digit()+)?)
              {? parse_hexfloat(n).ok_or("hexadecimal float") }

        rule decimal() -> f64
            = n:$(['-' | '+']? (digit()+ "."? digit()* / "." digit()+) (['e' | 'E'] ['-' | '+']? digit()+)?)
              {? n.parse().or(Err("float")) }

        rule digit()
            = ['0' ..= '9']

        rule hexdigit()
            = ['0' ..= '9' | 'a' ..= 'f' | 'A' ..= 'F']

        rule __()
            = quiet!{[' ' | '\t' | '\r' | '\n']+}

        rule _()
            = quiet!{[' ' | '\t' | '\r' | '\n']*}
    }
}

fn flow(x: i64, what: &str) -> Result<Flow> {
    Flow::try_from(x).map_err(|_| Error::Data {
        msg: format!("{} {} out of range", what, x),
    })
}

/// Read a BiMDF from a named file.
pub fn read(fname: &str) -> Result<BiMdf> {
    let mut f = fs::File::open(fname)?;
    read_from_buf(&mut f)
}

/// Read a BiMDF from a reader.
///
/// A truncated file is a parse error, node ids out of range and
/// invalid bounds are data errors.
pub fn read_from_buf<R>(buf: &mut R) -> Result<BiMdf>
where
    R: io::Read,
{
    let doc = {
        let mut s = String::new();
        buf.read_to_string(&mut s)?;
        bimdf_parser::doc(&s)?
    };
    debug!("reading BiMDF, file comment {}", doc.comment);

    let mut bimdf = BiMdf::new();
    for &d in &doc.demands {
        bimdf.add_node(flow(d, "demand")?);
    }

    let n = bimdf.num_nodes();
    for (i, edge) in doc.edges.into_iter().enumerate() {
        if edge.u >= n || edge.v >= n {
            return Err(Error::Data {
                msg: format!("invalid node id {} of edge {}", edge.u.max(edge.v), i),
            });
        }
        let lower = flow(edge.lower, "lower bound")?;
        let upper = flow(edge.upper, "upper bound")?;
        if lower > upper {
            return Err(Error::Data {
                msg: format!("lower bound {} exceeds upper bound {} of edge {}", lower, upper, i),
            });
        }
        bimdf.add(EdgeInfo {
            u: edge.u,
            v: edge.v,
            u_head: edge.u_head,
            v_head: edge.v_head,
            cost_function: edge.cost,
            lower,
            upper,
        });
    }

    Ok(bimdf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexfloat() {
        assert_eq!(parse_hexfloat("0x1p+0"), Some(1.0));
        assert_eq!(parse_hexfloat("0x1.8p+1"), Some(3.0));
        assert_eq!(parse_hexfloat("-0x1.8p-1"), Some(-0.75));
        assert_eq!(parse_hexfloat("0X10"), Some(16.0));
        assert_eq!(parse_hexfloat("0x.8"), Some(0.5));
        assert_eq!(parse_hexfloat("0x1.999999999999ap-4"), Some(0.1));
        assert_eq!(parse_hexfloat("0x0.8p-1022"), Some(f64::MIN_POSITIVE / 2.0));
        assert_eq!(parse_hexfloat("0x"), None);
        assert_eq!(parse_hexfloat("1.5"), None);
    }

    #[test]
    fn test_real() {
        assert_eq!(bimdf_parser::real("0x1.4p+2").unwrap(), 5.0);
        assert_eq!(bimdf_parser::real("-2.5e1").unwrap(), -25.0);
        assert_eq!(bimdf_parser::real(".5").unwrap(), 0.5);
        assert_eq!(bimdf_parser::real("0").unwrap(), 0.0);
        assert!(bimdf_parser::real("x").is_err());
    }

    #[test]
    fn test_cost() {
        let f = bimdf_parser::cost("+ 3 A 1 2 0 Q 0x1p+1 1").unwrap();
        assert_eq!(f.components().count(), 2);
        assert_eq!(f.evaluate(1.0), 1.0);
        assert_eq!(f.evaluate(2.0), 2.0);

        let f = bimdf_parser::cost("S 2 1 0x1.999999999999ap-4").unwrap();
        match f {
            CostFunction::ScaleFactor(sf) => assert_eq!(sf.eps, 0.1),
            _ => panic!("expected scale factor"),
        }
        assert!(bimdf_parser::cost("+ 2 A 1 1").is_err());
        assert!(bimdf_parser::cost("X 1 1").is_err());
    }
}
