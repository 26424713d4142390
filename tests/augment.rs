use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use asngraph::{
    augment::{augment, augment_with, Options, OUTPUT_FILE_NAME},
    fio::Error,
};

const TINY: &str = "c tiny assignment instance
p asn 3 2
n 1
n 2
n 3
n 1
a 1 2 5.0
a 2 3 7.5
";

const TINY_AUGMENTED: &str = "c tiny assignment instance
p asn 6 7
n 1
n 2
n 3
n 1
n 5
n 6
a 1 2 5.0
a 1 4 1000000000
a 5 2 1000000000
a 5 4 5.0
a 2 3 7.5
a 6 3 1000000000
a 6 5 7.5
";

fn write_input(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("input.asn");
    fs::write(&path, content).unwrap();
    path
}

fn augment_str(content: &str) -> Result<(asngraph::augment::Augmentation, String), Error> {
    let dir = tempfile::tempdir().unwrap();
    let aug = augment(write_input(dir.path(), content), dir.path())?;
    let output = fs::read_to_string(aug.path()).unwrap();
    Ok((aug, output))
}

#[test]
fn tiny_instance() {
    let (aug, output) = augment_str(TINY).unwrap();
    assert_eq!(output, TINY_AUGMENTED);
    assert_eq!(aug.declared_node_count(), 3);
    assert_eq!(aug.declared_arc_count(), 2);
    assert_eq!(aug.node_count(), 6);
    assert_eq!(aug.arc_count(), 7);
    assert_eq!(aug.lines_read(), 8);
    assert_eq!(aug.path().file_name().unwrap(), OUTPUT_FILE_NAME);
}

#[test]
fn declared_counts_hold_literally() {
    let (aug, output) = augment_str(TINY).unwrap();
    let n_node_lines = output.lines().filter(|l| l.starts_with("n ")).count() as u64;
    let n_arc_lines = output.lines().filter(|l| l.starts_with("a ")).count() as u64;
    assert_eq!(n_node_lines, aug.node_count());
    assert_eq!(n_arc_lines, aug.arc_count());
    let problem = output
        .lines()
        .find(|l| l.starts_with("p "))
        .expect("output must contain a problem line");
    assert_eq!(problem, "p asn 6 7");
}

#[test]
fn mirror_pair_emitted_once_per_node() {
    // node 1 is the source and node 2 the target of every input arc; the
    // high-cost pair for each must still show up exactly once
    let input = "p asn 2 3
n 1
n 2
n 1
a 1 2 1
a 1 2 2
a 1 2 3
";
    let (aug, output) = augment_str(input).unwrap();
    assert_eq!(aug.node_count(), 4);
    assert_eq!(aug.arc_count(), 8);
    assert_eq!(
        output,
        "p asn 4 8
n 1
n 2
n 1
n 4
a 1 2 1
a 1 3 1000000000
a 4 2 1000000000
a 4 3 1
a 1 2 2
a 4 3 2
a 1 2 3
a 4 3 3
"
    );
    let high_to_mirror = output.lines().filter(|l| *l == "a 1 3 1000000000").count();
    let high_from_mirror = output.lines().filter(|l| *l == "a 4 2 1000000000").count();
    assert_eq!(high_to_mirror, 1);
    assert_eq!(high_from_mirror, 1);
}

#[test]
fn cross_arcs_preserve_weights() {
    let (_, output) = augment_str(TINY).unwrap();
    // cross arc of `a 1 2 5.0` runs from mirror(2)=5 to mirror(1)=4
    assert!(output.lines().any(|l| l == "a 5 4 5.0"));
    // cross arc of `a 2 3 7.5` runs from mirror(3)=6 to mirror(2)=5
    assert!(output.lines().any(|l| l == "a 6 5 7.5"));
    // every arc out of a mirror into its original carries the sentinel
    assert!(output.lines().any(|l| l == "a 5 2 1000000000"));
    assert!(output.lines().any(|l| l == "a 6 3 1000000000"));
}

#[test]
fn configurable_high_cost() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), TINY);
    let aug = augment_with(
        input,
        dir.path(),
        Options { high_cost: 99_999 },
    )
    .unwrap();
    let output = fs::read_to_string(aug.path()).unwrap();
    assert!(output.lines().any(|l| l == "a 1 4 99999"));
    assert!(!output.contains("1000000000"));
}

#[test]
fn messy_whitespace_and_case() {
    // tags are case-insensitive and token separation is free-form, like the
    // output of the DIMACS generators
    let input = "c tiny assignment instance
P \t ASN \t 3 \t 2
N 1
n  2
n 3
N \t 1
A  1  2  5.0
a \t 2 \t 3 \t 7.5
";
    let (_, output) = augment_str(input).unwrap();
    assert_eq!(output, TINY_AUGMENTED);
}

#[test]
fn deterministic_reruns() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let input_a = write_input(dir_a.path(), TINY);
    let input_b = write_input(dir_b.path(), TINY);
    let aug_a = augment(input_a, dir_a.path()).unwrap();
    let aug_b = augment(input_b, dir_b.path()).unwrap();
    assert_eq!(
        fs::read(aug_a.path()).unwrap(),
        fs::read(aug_b.path()).unwrap()
    );
}

#[test]
fn unreadable_input_passes_io_error_through() {
    let dir = tempfile::tempdir().unwrap();
    let err = augment("/surely/does/not/exist.asn", dir.path()).unwrap_err();
    match err {
        Error::Io(io_err) => assert_eq!(io_err.kind(), ErrorKind::NotFound),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn missing_problem_line() {
    let err = augment_str("c nothing but comments\nc more comments\n").unwrap_err();
    assert!(matches!(err, Error::MissingProblemLine));
}

#[test]
fn node_or_arc_before_problem_line() {
    let err = augment_str("n 1\np asn 3 2\n").unwrap_err();
    assert!(matches!(err, Error::LineBeforeProblem { line_num: 1, .. }));
    let err = augment_str("a 1 2 3\np asn 3 2\n").unwrap_err();
    assert!(matches!(err, Error::LineBeforeProblem { line_num: 1, .. }));
}

#[test]
fn duplicate_problem_line() {
    let err = augment_str("p asn 3 2\np asn 3 2\n").unwrap_err();
    assert!(matches!(err, Error::DuplicateProblemLine { line_num: 2, .. }));
}

#[test]
fn non_asn_problem_kind() {
    let err = augment_str("p min 3 2 1 4\n").unwrap_err();
    assert!(matches!(err, Error::InvalidProblemLine { line_num: 1, .. }));
}

#[test]
fn unrecognized_line() {
    let err = augment_str("p asn 3 2\nx 1 2\n").unwrap_err();
    assert!(matches!(err, Error::UnrecognizedLine { line_num: 2, .. }));
    // a tag letter fused to its first token is just as unrecognizable
    let err = augment_str("p asn 3 2\narc 1 2 3\n").unwrap_err();
    assert!(matches!(err, Error::UnrecognizedLine { line_num: 2, .. }));
}

#[test]
fn node_id_too_high_on_node_list() {
    let err = augment_str("p asn 3 2\nn 4\n").unwrap_err();
    assert!(matches!(
        err,
        Error::NodeIdOutOfRange {
            id: 4,
            n_nodes: 3,
            line_num: 2,
            ..
        }
    ));
}

#[test]
fn node_id_too_high_on_arc_list() {
    let err = augment_str("p asn 3 2\na 1 4 5.0\n").unwrap_err();
    assert!(matches!(
        err,
        Error::NodeIdOutOfRange {
            id: 4,
            n_nodes: 3,
            ..
        }
    ));
    let err = augment_str("p asn 3 2\na 4 1 5.0\n").unwrap_err();
    assert!(matches!(err, Error::NodeIdOutOfRange { id: 4, .. }));
}

#[test]
fn malformed_lines() {
    let err = augment_str("p asn 3 2\nn one\n").unwrap_err();
    assert!(matches!(err, Error::InvalidNodeLine { line_num: 2, .. }));
    let err = augment_str("p asn 3 2\na 1 2\n").unwrap_err();
    assert!(matches!(err, Error::InvalidArcLine { line_num: 2, .. }));
    let err = augment_str("p asn 3 2\na 1 2 -5\n").unwrap_err();
    assert!(matches!(err, Error::InvalidArcLine { line_num: 2, .. }));
    let err = augment_str("p asn three two\n").unwrap_err();
    assert!(matches!(err, Error::InvalidProblemLine { line_num: 1, .. }));
}

#[test]
fn declared_arc_count_too_high() {
    let input = TINY.replace("p asn 3 2", "p asn 3 3");
    let err = augment_str(&input).unwrap_err();
    assert!(matches!(
        err,
        Error::ArcCountMismatch {
            expected: 9,
            found: 7
        }
    ));
}

#[test]
fn declared_arc_count_too_low() {
    let input = TINY.replace("p asn 3 2", "p asn 3 1");
    let err = augment_str(&input).unwrap_err();
    assert!(matches!(
        err,
        Error::ArcCountMismatch {
            expected: 5,
            found: 7
        }
    ));
}

#[test]
fn node_line_count_too_low() {
    let input = TINY.replacen("n 1\n", "", 1);
    let err = augment_str(&input).unwrap_err();
    assert!(matches!(
        err,
        Error::NodeCountMismatch {
            expected: 6,
            found: 5
        }
    ));
}

#[test]
fn node_line_count_too_high() {
    let input = TINY.replacen("n 2\n", "n 2\nn 2\n", 1);
    let err = augment_str(&input).unwrap_err();
    assert!(matches!(
        err,
        Error::NodeCountMismatch {
            expected: 6,
            found: 7
        }
    ));
}

#[test]
fn failed_run_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "p asn 3 1\nn 1\n");
    augment(&input, dir.path()).unwrap_err();
    assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());
}
