use std::collections::HashMap;
use std::io::{self, Write};

use crate::distribution::Distribution;

/// Signature shared by the built-in functions.
///
/// Arguments arrive as the slice of distributions the call pushed onto the value
/// stack; a returning built-in hands back a distribution to push in their place.
pub type BuiltinFn = fn(&[Distribution], &mut dyn Write) -> io::Result<Option<Distribution>>;

/// A built-in callable with its calling convention.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub arity: usize,
    pub returns: bool,
    pub call: BuiltinFn,
}

/// Table of the functions a script can call, populated once at interpreter startup.
pub struct Functions {
    builtins: HashMap<&'static str, Builtin>,
}

impl Default for Functions {
    fn default() -> Self {
        let mut builtins = HashMap::new();

        builtins.insert(
            "print",
            Builtin {
                arity: 1,
                returns: false,
                call: builtin_print,
            },
        );

        Self { builtins }
    }
}

impl Functions {
    /// Look up a built-in by name.
    pub fn find(&self, name: &str) -> Option<Builtin> {
        self.builtins.get(name).copied()
    }
}

/// Prints a distribution: a header with the entry count, then one line per entry with
/// the value, its probability, and a bar scaled against the heaviest entry.
fn builtin_print(args: &[Distribution], out: &mut dyn Write) -> io::Result<Option<Distribution>> {
    let Some(distribution) = args.first() else {
        return Ok(None);
    };

    let sum = distribution
        .entries()
        .iter()
        .fold(0u64, |total, entry| total.saturating_add(entry.weight));
    let max = distribution
        .entries()
        .iter()
        .map(|entry| entry.weight)
        .max()
        .unwrap_or(0);

    writeln!(out, "{} ---", distribution.len())?;

    for entry in distribution.entries() {
        let ratio = entry.weight as f64 / sum as f64;
        let bar = ((entry.weight as f64 / max as f64) * 40.0) as usize;

        writeln!(out, "{:>4}\t{:.3} {}", entry.value, ratio, "|".repeat(bar))?;
    }

    Ok(None)
}
