//! Tests for gen-folds and slice.

use super::{parse, parse_err};
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_gen_folds_defaults() {
    match parse(&["wfjobs", "gen-folds"]) {
        CliCommand::GenFolds {
            ticks,
            output,
            folds,
            embargo_days,
            first_ts,
            last_ts,
        } => {
            assert!(ticks.is_none());
            assert!(output.is_none());
            assert!(folds.is_none());
            assert!(embargo_days.is_none());
            assert!(first_ts.is_none() && last_ts.is_none());
        }
        _ => panic!("expected GenFolds"),
    }
}

#[test]
fn cli_parse_gen_folds_explicit_range() {
    match parse(&[
        "wfjobs",
        "gen-folds",
        "--first-ts",
        "0",
        "--last-ts",
        "900",
        "--folds",
        "3",
        "--embargo-days",
        "0.0001",
        "-o",
        "/tmp/jobs.tsv",
    ]) {
        CliCommand::GenFolds {
            output,
            folds,
            embargo_days,
            first_ts,
            last_ts,
            ..
        } => {
            assert_eq!(first_ts, Some(0.0));
            assert_eq!(last_ts, Some(900.0));
            assert_eq!(folds, Some(3));
            assert_eq!(embargo_days, Some(0.0001));
            assert_eq!(output.as_deref(), Some(Path::new("/tmp/jobs.tsv")));
        }
        _ => panic!("expected GenFolds with range"),
    }
}

#[test]
fn cli_parse_gen_folds_half_range_rejected() {
    assert_eq!(
        parse_err(&["wfjobs", "gen-folds", "--first-ts", "0"]),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_parse_slice() {
    match parse(&[
        "wfjobs",
        "slice",
        "--input",
        "wf_jobs.tsv",
        "--output",
        "out/wf_jobs_sliced.tsv",
        "--parts",
        "4",
    ]) {
        CliCommand::Slice {
            input,
            output,
            parts,
        } => {
            assert_eq!(input.as_deref(), Some(Path::new("wf_jobs.tsv")));
            assert_eq!(output.as_deref(), Some(Path::new("out/wf_jobs_sliced.tsv")));
            assert_eq!(parts, Some(4));
        }
        _ => panic!("expected Slice"),
    }
}

#[test]
fn cli_parse_slice_defaults() {
    match parse(&["wfjobs", "slice"]) {
        CliCommand::Slice {
            input,
            output,
            parts,
        } => {
            assert!(input.is_none() && output.is_none() && parts.is_none());
        }
        _ => panic!("expected Slice"),
    }
}
