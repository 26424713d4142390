//! # Graph Augmentation
//!
//! Single-pass streaming rewrite of a DIMACS `asn` instance into its
//! augmented form. Every original node `v` gains a mirror copy `v + n`; the
//! two are joined by a high-cost arc the first time `v` shows up as an arc
//! endpoint, and every input arc `s -> d` additionally produces the cross arc
//! `d+n -> s+n` with the original weight. The rewritten declaration reports
//! `2n` nodes and `2m + n` arcs, and the pass fails if the finished instance
//! does not contain exactly that many node and arc lines.
//!
//! Output is accumulated in three partitions (problem line and comments,
//! node lines, arc lines) backed by anonymous temp files, which are
//! concatenated in that order into the final artifact once the instance has
//! been validated.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::{
    fio::{
        self,
        asn::{self, LineKind},
        Error,
    },
    types::{NodeId, Problem, RsHashSet, DEFAULT_HIGH_COST},
};

/// File name of the merged artifact within the output directory
pub const OUTPUT_FILE_NAME: &str = "augmented.asn";

/// Options for the augmentation transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Weight of the synthetic arcs joining a node and its mirror copy
    ///
    /// Must dwarf every real weight in the instance for downstream min-cost
    /// consumers to treat mirror arcs as a last resort.
    pub high_cost: u64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            high_cost: DEFAULT_HIGH_COST,
        }
    }
}

/// Summary of a completed augmentation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Augmentation {
    path: PathBuf,
    problem: Problem,
    lines_read: usize,
}

impl Augmentation {
    /// Path of the merged augmented instance
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The node count declared by the input problem line
    #[must_use]
    pub fn declared_node_count(&self) -> u64 {
        self.problem.n_nodes()
    }

    /// The arc count declared by the input problem line
    #[must_use]
    pub fn declared_arc_count(&self) -> u64 {
        self.problem.n_arcs()
    }

    /// The node count of the augmented instance (`2n`)
    #[must_use]
    pub fn node_count(&self) -> u64 {
        self.problem.aug_n_nodes()
    }

    /// The arc count of the augmented instance (`2m + n`)
    #[must_use]
    pub fn arc_count(&self) -> u64 {
        self.problem.aug_n_arcs()
    }

    /// Number of input lines processed
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

/// Augments the instance at `input` and writes the result to
/// [`OUTPUT_FILE_NAME`] in `output_dir`
///
/// With feature `compression`, `.gz` and `.bz2` inputs are read
/// transparently.
///
/// # Errors
///
/// If the input cannot be opened, the underlying [`io::Error`] is passed
/// through unchanged. Any malformed line, any id above the declared node
/// count, and any disagreement between the declared sizes and the actual
/// line counts abort the pass with the corresponding [`Error`] variant.
pub fn augment<P1: AsRef<Path>, P2: AsRef<Path>>(
    input: P1,
    output_dir: P2,
) -> Result<Augmentation, Error> {
    augment_with(input, output_dir, Options::default())
}

/// Augments the instance at `input` with non-default [`Options`]
///
/// # Errors
///
/// Identical to [`augment`].
pub fn augment_with<P1: AsRef<Path>, P2: AsRef<Path>>(
    input: P1,
    output_dir: P2,
    opts: Options,
) -> Result<Augmentation, Error> {
    let reader = fio::open_compressed_uncompressed_read(input)?;
    let mut augmenter = Augmenter::new(opts)?;
    augmenter.consume(BufReader::new(reader))?;
    augmenter.finish(output_dir.as_ref())
}

/// One streaming augmentation pass
///
/// Owns the three output partitions and the mirror-node bookkeeping.
/// Processes exactly one input; the partitions are anonymous temp files and
/// disappear on every exit path, including early failure.
#[derive(Debug)]
struct Augmenter {
    opts: Options,
    problem: Option<Problem>,
    /// Mirror ids already materialized; insert-if-absent on this set is what
    /// keeps the high-cost arc and node emission once-per-node
    mirrored: RsHashSet<NodeId>,
    nodes_written: u64,
    arcs_written: u64,
    line_num: usize,
    preamble: BufWriter<File>,
    nodes: BufWriter<File>,
    arcs: BufWriter<File>,
}

impl Augmenter {
    fn new(opts: Options) -> Result<Augmenter, Error> {
        Ok(Augmenter {
            opts,
            problem: None,
            mirrored: RsHashSet::default(),
            nodes_written: 0,
            arcs_written: 0,
            line_num: 0,
            preamble: BufWriter::new(tempfile::tempfile()?),
            nodes: BufWriter::new(tempfile::tempfile()?),
            arcs: BufWriter::new(tempfile::tempfile()?),
        })
    }

    /// Classifies and processes all lines of the input in order
    fn consume<R: BufRead>(&mut self, mut reader: R) -> Result<(), Error> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if reader.read_line(&mut buf)? == 0 {
                return Ok(());
            }
            self.line_num += 1;
            self.process_line(buf.trim())?;
        }
    }

    fn process_line(&mut self, line: &str) -> Result<(), Error> {
        match asn::classify(line) {
            Some(LineKind::Arc) => self.process_arc(line),
            Some(LineKind::Node) => self.process_node(line),
            Some(LineKind::Comment) => self.process_comment(line),
            Some(LineKind::Problem) => self.process_problem(line),
            None => Err(Error::UnrecognizedLine {
                line_num: self.line_num,
                line: line.to_owned(),
            }),
        }
    }

    /// The problem declaration, or the ordering error for lines that require
    /// one
    fn problem(&self, line: &str) -> Result<Problem, Error> {
        self.problem.ok_or_else(|| Error::LineBeforeProblem {
            line_num: self.line_num,
            line: line.to_owned(),
        })
    }

    fn process_problem(&mut self, line: &str) -> Result<(), Error> {
        if self.problem.is_some() {
            return Err(Error::DuplicateProblemLine {
                line_num: self.line_num,
                line: line.to_owned(),
            });
        }
        let Ok((_, problem)) = asn::problem_line(line) else {
            return Err(Error::InvalidProblemLine {
                line_num: self.line_num,
                line: line.to_owned(),
            });
        };
        // the rewritten declaration is fixed as soon as n and m are known
        asn::write_problem_line(
            &mut self.preamble,
            problem.aug_n_nodes(),
            problem.aug_n_arcs(),
        )?;
        self.problem = Some(problem);
        Ok(())
    }

    fn process_comment(&mut self, line: &str) -> Result<(), Error> {
        writeln!(self.preamble, "{line}")?;
        Ok(())
    }

    fn process_node(&mut self, line: &str) -> Result<(), Error> {
        let problem = self.problem(line)?;
        let Ok((_, id)) = asn::node_line(line) else {
            return Err(Error::InvalidNodeLine {
                line_num: self.line_num,
                line: line.to_owned(),
            });
        };
        self.check_bounds(id, problem, line)?;
        // an explicit node line declares an original node in the source
        // role; it does not register a mirror
        self.push_node(id)
    }

    fn process_arc(&mut self, line: &str) -> Result<(), Error> {
        let problem = self.problem(line)?;
        let Ok((_, arc)) = asn::arc_line(line) else {
            return Err(Error::InvalidArcLine {
                line_num: self.line_num,
                line: line.to_owned(),
            });
        };
        self.check_bounds(arc.source, problem, line)?;
        self.check_bounds(arc.dest, problem, line)?;
        let src_mirror = problem.mirror(arc.source);
        let dst_mirror = problem.mirror(arc.dest);
        self.push_arc(arc.source, arc.dest, &arc.weight)?;
        if self.mirrored.insert(src_mirror) {
            // the mirror of a source only ever shows up as an arc target, so
            // it gets no node line
            self.push_arc(arc.source, src_mirror, self.opts.high_cost)?;
        }
        if self.mirrored.insert(dst_mirror) {
            self.push_node(dst_mirror)?;
            self.push_arc(dst_mirror, arc.dest, self.opts.high_cost)?;
        }
        self.push_arc(dst_mirror, src_mirror, &arc.weight)
    }

    fn check_bounds(&self, id: NodeId, problem: Problem, line: &str) -> Result<(), Error> {
        if id > problem.n_nodes() {
            return Err(Error::NodeIdOutOfRange {
                id,
                n_nodes: problem.n_nodes(),
                line_num: self.line_num,
                line: line.to_owned(),
            });
        }
        Ok(())
    }

    fn push_node(&mut self, id: NodeId) -> Result<(), Error> {
        asn::write_node_line(&mut self.nodes, id)?;
        self.nodes_written += 1;
        Ok(())
    }

    fn push_arc<C: fmt::Display>(
        &mut self,
        source: NodeId,
        dest: NodeId,
        weight: C,
    ) -> Result<(), Error> {
        asn::write_arc_line(&mut self.arcs, source, dest, weight)?;
        self.arcs_written += 1;
        Ok(())
    }

    /// Validates the finished instance and concatenates the partitions into
    /// the final artifact
    fn finish(self, output_dir: &Path) -> Result<Augmentation, Error> {
        let problem = self.problem.ok_or(Error::MissingProblemLine)?;
        if self.nodes_written != problem.aug_n_nodes() {
            return Err(Error::NodeCountMismatch {
                expected: problem.aug_n_nodes(),
                found: self.nodes_written,
            });
        }
        if self.arcs_written != problem.aug_n_arcs() {
            return Err(Error::ArcCountMismatch {
                expected: problem.aug_n_arcs(),
                found: self.arcs_written,
            });
        }
        let lines_read = self.line_num;
        let path = output_dir.join(OUTPUT_FILE_NAME);
        let mut output = BufWriter::new(fio::open_compressed_uncompressed_write(&path)?);
        for partition in [self.preamble, self.nodes, self.arcs] {
            let mut file = partition.into_inner().map_err(io::IntoInnerError::into_error)?;
            file.seek(SeekFrom::Start(0))?;
            io::copy(&mut file, &mut output)?;
        }
        output.flush()?;
        Ok(Augmentation {
            path,
            problem,
            lines_read,
        })
    }
}
