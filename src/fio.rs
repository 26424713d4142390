//! # Module for File IO (Writing and Parsing)
//!
//! Opening input and output files and the combined error type for everything
//! that can go wrong while augmenting an instance. The line-level parsers and
//! writers live in the [`asn`] submodule.

use std::{fs::File, io, path::Path};

pub mod asn;

/// Combined error type for reading, augmenting, and writing assignment
/// graphs
///
/// Every variant is fatal: the pass over the input aborts on the first error
/// and no output artifact is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO errors, passed through unchanged
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A line matching none of the four DIMACS line kinds
    #[error("unrecognized line {line_num}: [{line}]")]
    UnrecognizedLine {
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// A `p` line that is not a valid `p asn <nodes> <arcs>` declaration
    ///
    /// Also raised for problem kinds other than `asn`.
    #[error("invalid problem line {line_num}: [{line}]")]
    InvalidProblemLine {
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// A second problem declaration
    #[error("multiple problem lines, second at line {line_num}: [{line}]")]
    DuplicateProblemLine {
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// A node line that is not `n <id>`
    #[error("invalid node line {line_num}: [{line}]")]
    InvalidNodeLine {
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// An arc line that is not `a <source> <dest> <weight>`
    #[error("invalid arc line {line_num}: [{line}]")]
    InvalidArcLine {
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// A node id or arc endpoint above the declared node count
    #[error("node id {id} exceeds node count {n_nodes} at line {line_num}: [{line}]")]
    NodeIdOutOfRange {
        /// The out-of-range id
        id: u64,
        /// The declared node count
        n_nodes: u64,
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// A node or arc line before the problem declaration
    #[error("line {line_num} before problem declaration: [{line}]")]
    LineBeforeProblem {
        /// 1-based position of the line in the input
        line_num: usize,
        /// The offending line
        line: String,
    },
    /// The input ended without a problem declaration
    #[error("input contains no problem line")]
    MissingProblemLine,
    /// The number of node lines in the augmented instance disagrees with the
    /// declared node count
    #[error("augmented instance has {found} node lines, expected {expected}")]
    NodeCountMismatch {
        /// Node lines required by the declaration (`2n`)
        expected: u64,
        /// Node lines actually written
        found: u64,
    },
    /// The number of arc lines in the augmented instance disagrees with the
    /// declared arc count
    #[error("augmented instance has {found} arc lines, expected {expected}")]
    ArcCountMismatch {
        /// Arc lines required by the declaration (`2m + n`)
        expected: u64,
        /// Arc lines actually written
        found: u64,
    },
}

/// Opens a reader for the file at Path.
/// With feature `compression` supports bzip2 and gzip compression.
pub fn open_compressed_uncompressed_read<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Read>, io::Error> {
    let path = path.as_ref();
    let raw_reader = File::open(path)?;
    #[cfg(feature = "compression")]
    if let Some(ext) = path.extension() {
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("bz2")) {
            return Ok(Box::new(bzip2::read::BzDecoder::new(raw_reader)));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("gz")) {
            return Ok(Box::new(flate2::read::GzDecoder::new(raw_reader)));
        }
    }
    Ok(Box::new(raw_reader))
}

/// Opens a writer for the file at Path.
/// With feature `compression` supports bzip2 and gzip compression.
pub fn open_compressed_uncompressed_write<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Write>, io::Error> {
    let path = path.as_ref();
    let raw_writer = File::create(path)?;
    #[cfg(feature = "compression")]
    if let Some(ext) = path.extension() {
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("bz2")) {
            return Ok(Box::new(bzip2::write::BzEncoder::new(
                raw_writer,
                bzip2::Compression::fast(),
            )));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("gz")) {
            return Ok(Box::new(flate2::write::GzEncoder::new(
                raw_writer,
                flate2::Compression::fast(),
            )));
        }
    }
    Ok(Box::new(raw_writer))
}
