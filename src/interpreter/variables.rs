use std::collections::HashMap;

use crate::distribution::Distribution;

/// Table of the distributions bound to identifiers, compared by content.
#[derive(Debug, Default)]
pub struct Variables {
    bindings: HashMap<String, Distribution>,
}

impl Variables {
    /// Look up a binding by name.
    pub fn find(&self, name: &str) -> Option<&Distribution> {
        self.bindings.get(name)
    }

    /// Bind a distribution to a name, replacing and dropping any previous binding.
    pub fn set(&mut self, name: &str, value: Distribution) {
        self.bindings.insert(name.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_missing_binding() {
        let variables = Variables::default();

        assert_eq!(None, variables.find("R"));
    }

    #[test]
    fn test_set_then_find() {
        let mut variables = Variables::default();

        variables.set("R", Distribution::singleton(4));

        assert_eq!(Some(&Distribution::singleton(4)), variables.find("R"));
    }

    #[test]
    fn test_set_replaces_previous_binding() {
        let mut variables = Variables::default();

        variables.set("R", Distribution::singleton(4));
        variables.set("R", Distribution::singleton(7));

        assert_eq!(Some(&Distribution::singleton(7)), variables.find("R"));
    }
}
