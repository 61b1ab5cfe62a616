use std::fmt;

use crate::{Error, Result};

/// One source address forwarded to one target address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub source: String,
    pub target: String,
}

impl Rule {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Rules paired positionally from equal-length source and target lists.
///
/// A `Rules` value can only be built through [`Rules::pair`], so holding one
/// means the lists had the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules(Vec<Rule>);

impl Rules {
    pub fn pair(sources: Vec<String>, targets: Vec<String>) -> Result<Self> {
        if sources.len() != targets.len() {
            return Err(Error::LengthMismatch {
                sources: sources.len(),
                targets: targets.len(),
            });
        }

        let rules = sources
            .into_iter()
            .zip(targets)
            .map(|(source, target)| Rule { source, target })
            .collect();
        Ok(Self(rules))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }
}

impl IntoIterator for Rules {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn pairs_positionally() {
        let rules = Rules::pair(
            strings(&["127.0.0.1:8080", "127.0.0.1:8081"]),
            strings(&["10.0.0.1:80", "10.0.0.2:443"]),
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        let rules: Vec<Rule> = rules.into_iter().collect();
        assert_eq!(rules[0], Rule::new("127.0.0.1:8080", "10.0.0.1:80"));
        assert_eq!(rules[1], Rule::new("127.0.0.1:8081", "10.0.0.2:443"));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = Rules::pair(strings(&["a:1", "b:2"]), strings(&["c:3"])).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                sources: 2,
                targets: 1
            }
        ));
    }

    #[test]
    fn empty_lists_are_well_formed() {
        let rules = Rules::pair(vec![], vec![]).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(
            Rule::new("0.0.0.0:22", "10.1.1.1:22").to_string(),
            "0.0.0.0:22 -> 10.1.1.1:22"
        );
    }
}
