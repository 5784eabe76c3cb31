use std::{error::Error, path::Path};

use test_utils::{check_script, Expected};

const SRC_PATH: &str = "./scripts/print_die.dice";

#[test]
fn run_print_die() -> Result<(), Box<dyn Error>> {
    let bars = "|".repeat(40);
    let stdout =
        format!("3 ---\n   1\t0.333 {bars}\n   2\t0.333 {bars}\n   3\t0.333 {bars}\n");

    check_script(
        Path::new(env!("CARGO_BIN_EXE_dicelang")),
        Path::new(SRC_PATH),
        Expected {
            stdout: &stdout,
            stderr: "dicelang: no error\n",
        },
    )
}
