//! Exit-behaviour coverage for the compiled `prefdoc` binary.
//!
//! Batch validation failures exit 1 with the report on stdout; structural
//! failures exit 2 with a diagnostic on stderr; success writes the document
//! and exits 0.

mod common;

use std::process::{Command, Output};

use anyhow::{Result, ensure};
use rstest::rstest;

use test_helpers::{
    DISABLED_TAB, FixtureDir, ID_PREFIX, NAME_PREFIX, sample_defaults, sample_markup,
};

fn run_prefdoc(fixture: &FixtureDir) -> Result<Output> {
    let output = Command::new(common::prefdoc_exe())
        .arg(fixture.markup_path())
        .arg(fixture.dtd_path())
        .arg(fixture.defaults_path())
        .args(["--output", fixture.out_path().as_str()])
        .args(["--name-prefix", NAME_PREFIX])
        .args(["--id-prefix", ID_PREFIX])
        .args(["--disabled-tab", DISABLED_TAB])
        .output()?;
    Ok(output)
}

#[rstest]
fn successful_run_writes_the_document_and_exits_zero() -> Result<()> {
    let fixture = FixtureDir::create().map_err(|err| anyhow::anyhow!("{err}"))?;
    let output = run_prefdoc(&fixture)?;
    ensure!(
        output.status.code() == Some(0),
        "expected exit 0, got {:?}",
        output.status.code()
    );
    let document = std::fs::read_to_string(fixture.out_path())?;
    ensure!(document.contains("## General"), "panel section missing");
    ensure!(
        document.contains("### Automatically save outlines"),
        "record heading missing"
    );
    ensure!(
        document.contains("*default: `empty`*"),
        "empty-string marker missing"
    );
    Ok(())
}

#[rstest]
fn extra_default_exits_one_with_the_report_on_stdout() -> Result<()> {
    let defaults = format!("{}colour-scheme: light\n", sample_defaults());
    let fixture = FixtureDir::with_sources(
        &sample_markup(),
        &test_helpers::sample_dtd(),
        &defaults,
    )
    .map_err(|err| anyhow::anyhow!("{err}"))?;
    let output = run_prefdoc(&fixture)?;
    ensure!(
        output.status.code() == Some(1),
        "expected exit 1, got {:?}",
        output.status.code()
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    ensure!(stdout.contains("Undocumented:"), "report header missing");
    ensure!(
        stdout.contains("extensions.scribe.outliner.colour-scheme"),
        "missing key must be listed"
    );
    ensure!(
        !fixture.out_path().exists(),
        "no output may be written on validation failure"
    );
    Ok(())
}

#[rstest]
fn key_name_mismatch_is_a_structural_failure() -> Result<()> {
    let markup = sample_markup().replacen(
        "id=\"pref-outliner-autosave\"",
        "id=\"pref-outliner-wrong\"",
        1,
    );
    let fixture = FixtureDir::with_sources(
        &markup,
        &test_helpers::sample_dtd(),
        &sample_defaults(),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))?;
    let output = run_prefdoc(&fixture)?;
    ensure!(
        output.status.code() == Some(2),
        "expected exit 2, got {:?}",
        output.status.code()
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(
        stderr.contains("fix id for"),
        "structural diagnostic missing: {stderr}"
    );
    Ok(())
}

#[rstest]
fn missing_source_role_is_a_structural_failure() -> Result<()> {
    let fixture = FixtureDir::create().map_err(|err| anyhow::anyhow!("{err}"))?;
    let output = Command::new(common::prefdoc_exe())
        .arg(fixture.markup_path())
        .arg(fixture.dtd_path())
        .args(["--output", fixture.out_path().as_str()])
        .args(["--name-prefix", NAME_PREFIX])
        .args(["--id-prefix", ID_PREFIX])
        .output()?;
    ensure!(
        output.status.code() == Some(2),
        "expected exit 2, got {:?}",
        output.status.code()
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(
        stderr.contains("no defaults source"),
        "missing-role diagnostic expected: {stderr}"
    );
    Ok(())
}
