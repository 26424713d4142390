//! # Parsing and Writing DIMACS Assignment-Problem Lines
//!
//! Internal module containing parsers for the four line kinds of the DIMACS
//! `asn` format. The approach is to accept input instances, even if they are
//! not technically in spec, as long as the input is still reasonable:
//! leading tags are matched case-insensitively and token separation by any
//! amount of whitespace is allowed.
//!
//! ## References
//!
//! - [DIMACS min-cost flow and assignment formats](http://archive.dimacs.rutgers.edu/Challenges/)

use std::io::{self, Write};

use nom::{
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, multispace0, multispace1, u64},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::types::{ArcLine, NodeId, Problem, Weight};

/// The four line kinds of an assignment-problem file, determined by the
/// leading one-letter tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A `p asn <nodes> <arcs>` declaration
    Problem,
    /// A `n <id>` node line
    Node,
    /// A `c <anything>` comment line
    Comment,
    /// An `a <source> <dest> <weight>` arc line
    Arc,
}

/// Determines the kind of a trimmed input line from its leading tag
///
/// The tag letter is matched case-insensitively and must be followed by
/// whitespace or the end of the line. Anything else returns [`None`].
#[must_use]
pub fn classify(line: &str) -> Option<LineKind> {
    let mut chars = line.chars();
    let kind = match chars.next()?.to_ascii_lowercase() {
        'p' => LineKind::Problem,
        'n' => LineKind::Node,
        'c' => LineKind::Comment,
        'a' => LineKind::Arc,
        _ => return None,
    };
    match chars.next() {
        None => Some(kind),
        Some(c) if c.is_whitespace() => Some(kind),
        Some(_) => None,
    }
}

/// Parses a `p asn <nodes> <arcs>` problem line
///
/// Problem kinds other than `asn` are rejected.
pub fn problem_line(input: &str) -> IResult<&str, Problem> {
    let (input, _) = terminated(tag_no_case("p"), multispace1)(input)?;
    let (input, _) = terminated(tag_no_case("asn"), multispace1)(input)?;
    let (input, (n_nodes, _, n_arcs)) = tuple((u64, multispace1, u64))(input)?;
    let (input, _) = all_consuming(multispace0)(input)?;
    Ok((input, Problem::new(n_nodes, n_arcs)))
}

/// Parses a `n <id>` node line
pub fn node_line(input: &str) -> IResult<&str, NodeId> {
    let (input, _) = terminated(tag_no_case("n"), multispace1)(input)?;
    terminated(u64, all_consuming(multispace0))(input)
}

/// Parses an `a <source> <dest> <weight>` arc line
pub fn arc_line(input: &str) -> IResult<&str, ArcLine> {
    let (input, _) = terminated(tag_no_case("a"), multispace1)(input)?;
    let (input, (source, _, dest, _, weight)) =
        tuple((u64, multispace1, u64, multispace1, weight))(input)?;
    let (input, _) = all_consuming(multispace0)(input)?;
    Ok((input, ArcLine {
        source,
        dest,
        weight,
    }))
}

/// Nuclear parser for a non-negative decimal weight
fn weight(input: &str) -> IResult<&str, Weight> {
    let (input, token) = recognize(pair(digit1, opt(preceded(char('.'), digit1))))(input)?;
    Ok((input, Weight::new(token)))
}

/// Writes a `p asn` line with the given sizes
pub fn write_problem_line<W: Write>(writer: &mut W, n_nodes: u64, n_arcs: u64) -> io::Result<()> {
    writeln!(writer, "p asn {n_nodes} {n_arcs}")
}

/// Writes a node line
pub fn write_node_line<W: Write>(writer: &mut W, id: NodeId) -> io::Result<()> {
    writeln!(writer, "n {id}")
}

/// Writes an arc line
///
/// The weight is anything displayable so that both input weights ([`Weight`])
/// and the integral high-cost sentinel can be written through the same path.
pub fn write_arc_line<W: Write, C: std::fmt::Display>(
    writer: &mut W,
    source: NodeId,
    dest: NodeId,
    weight: C,
) -> io::Result<()> {
    writeln!(writer, "a {source} {dest} {weight}")
}
