use std::{error::Error, path::Path};

use test_utils::check_failing_script;

#[test]
fn run_unknown_variable() -> Result<(), Box<dyn Error>> {
    check_failing_script(
        Path::new(env!("CARGO_BIN_EXE_dicelang")),
        Path::new("./scripts/unknown_variable.dice"),
        &[
            "dicelang: interpreter error",
            "near token 'identifier' (\"Q\")",
            "unknown variable",
        ],
    )
}
