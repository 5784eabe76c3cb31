use std::{error::Error, path::Path};

use test_utils::{check_script, Expected};

const SRC_PATH: &str = "./scripts/two_dice.dice";

#[test]
fn run_two_dice() -> Result<(), Box<dyn Error>> {
    let rows = [
        ("   2", "0.028", 6),
        ("   3", "0.056", 13),
        ("   4", "0.083", 20),
        ("   5", "0.111", 26),
        ("   6", "0.139", 33),
        ("   7", "0.167", 40),
        ("   8", "0.139", 33),
        ("   9", "0.111", 26),
        ("  10", "0.083", 20),
        ("  11", "0.056", 13),
        ("  12", "0.028", 6),
    ];

    let mut stdout = String::from("11 ---\n");
    for (value, ratio, bar) in rows {
        stdout.push_str(&format!("{value}\t{ratio} {}\n", "|".repeat(bar)));
    }

    check_script(
        Path::new(env!("CARGO_BIN_EXE_dicelang")),
        Path::new(SRC_PATH),
        Expected {
            stdout: &stdout,
            stderr: "dicelang: no error\n",
        },
    )
}
