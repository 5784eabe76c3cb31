use std::{
    error::Error,
    path::Path,
    process::{Command, Output},
    str,
};

/// Expected streams of a finished interpreter run.
pub struct Expected<'a> {
    pub stdout: &'a str,
    pub stderr: &'a str,
}

impl<'a> Expected<'a> {
    fn assert_matches(self, output: &Output) -> Result<(), Box<dyn Error>> {
        assert_eq!(str::from_utf8(&output.stdout)?, self.stdout);
        assert_eq!(str::from_utf8(&output.stderr)?, self.stderr);
        Ok(())
    }
}

/// Runs the dicelang binary on a script and checks both output streams and a clean
/// exit status.
pub fn check_script(binary: &Path, script: &Path, expected: Expected) -> Result<(), Box<dyn Error>> {
    let output = Command::new(binary).arg(script).output()?;

    expected.assert_matches(&output)?;
    assert!(
        output.status.success(),
        "dicelang exited with status {:?}",
        output.status.code()
    );

    Ok(())
}

/// Runs the dicelang binary on a script that must fail, checking that the error report
/// on stderr mentions every expected fragment.
pub fn check_failing_script(
    binary: &Path,
    script: &Path,
    expected_stderr: &[&str],
) -> Result<(), Box<dyn Error>> {
    let output = Command::new(binary).arg(script).output()?;
    let stderr = str::from_utf8(&output.stderr)?;

    for needle in expected_stderr {
        assert!(
            stderr.contains(needle),
            "stderr is missing '{}':\n{}",
            needle,
            stderr
        );
    }
    assert!(
        !output.status.success(),
        "dicelang should exit with a non-zero status"
    );

    Ok(())
}
