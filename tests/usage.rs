use std::{error::Error, process::Command};

#[test]
fn run_without_arguments() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_dicelang")).output()?;

    assert!(!output.status.success());
    assert!(std::str::from_utf8(&output.stderr)?.contains("Usage"));

    Ok(())
}

#[test]
fn run_on_missing_file() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_dicelang"))
        .arg("./scripts/does_not_exist.dice")
        .output()?;

    assert!(!output.status.success());

    // the logger decides which stream the report lands on
    let report = format!(
        "{}{}",
        std::str::from_utf8(&output.stdout)?,
        std::str::from_utf8(&output.stderr)?
    );
    assert!(report.contains("failed to open file"));

    Ok(())
}
