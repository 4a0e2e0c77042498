//! Fully-qualified domain names as label sequences.

use std::{fmt, str::FromStr};

use crate::entity::NameError;

/// A fully-qualified domain name, held as its sequence of labels.
///
/// Labels are kept verbatim: no case folding and no IDNA conversion, so an
/// instance label such as `Ärgle Bärgle` survives untouched. Equality is
/// plain value equality over the labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    /// Creates a name from its labels, leftmost first.
    pub fn from_labels<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The labels of this name, leftmost first.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Gets the label at `index`, if there is one.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether this is the root name.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns a new name with `label` in front of this one.
    pub fn prepend(&self, label: impl Into<String>) -> Self {
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.push(label.into());
        labels.extend(self.labels.iter().cloned());
        Self { labels }
    }

    /// Returns this name followed by `suffix`.
    pub fn join(&self, suffix: &Name) -> Self {
        Self {
            labels: self
                .labels
                .iter()
                .chain(suffix.labels.iter())
                .cloned()
                .collect(),
        }
    }

    /// Returns the name left after dropping the first `n` labels.
    pub fn tail(&self, n: usize) -> Self {
        Self {
            labels: self.labels.iter().skip(n).cloned().collect(),
        }
    }
}

impl FromStr for Name {
    type Err = NameError;

    /// Splits a dotted name into labels. `\.` and `\\` escape a literal dot
    /// or backslash inside a label; a single trailing dot is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." {
            return Ok(Self::default());
        }

        let mut labels = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' => current.push(chars.next().unwrap_or('\\')),
                '.' => {
                    if current.is_empty() {
                        return Err(NameError::EmptyLabel(s.to_string()));
                    }
                    labels.push(std::mem::take(&mut current));
                    // root
                    if chars.peek().is_none() {
                        return Ok(Self { labels });
                    }
                }
                c => current.push(c),
            }
        }
        if current.is_empty() {
            return Err(NameError::EmptyLabel(s.to_string()));
        }
        labels.push(current);

        Ok(Self { labels })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            for c in label.chars() {
                if c == '.' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_labels() {
        let name: Name = "_http._tcp.example.com.".parse().unwrap();
        assert_eq!(name.labels(), ["_http", "_tcp", "example", "com"]);
        assert_eq!(name.to_string(), "_http._tcp.example.com");
    }

    #[test]
    fn escaped_dots_stay_in_label() {
        let name: Name = r"My\.Printer._ipp._tcp.example.com".parse().unwrap();
        assert_eq!(name.label(0), Some("My.Printer"));
        assert_eq!(name.len(), 5);
        assert_eq!(name.to_string(), r"My\.Printer._ipp._tcp.example.com");

        let name: Name = r"x.a\\\.".parse().unwrap();
        assert_eq!(name.labels(), ["x", "a\\."]);
        let name: Name = r"x.a\\.".parse().unwrap();
        assert_eq!(name.labels(), ["x", "a\\"]);
        assert!(r"x..".parse::<Name>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for labels in [vec!["a.", "b"], vec!["b", "a."], vec!["c\\", "d"], vec!["d", "c\\."]] {
            let name = Name::from_labels(labels);
            assert_eq!(name.to_string().parse::<Name>().unwrap(), name);
            assert_eq!(format!("{name}.").parse::<Name>().unwrap(), name);
        }
    }

    #[test]
    fn empty_label_rejected() {
        assert!(matches!(
            "foo..example.com".parse::<Name>(),
            Err(NameError::EmptyLabel(_))
        ));
        assert!(".example.com".parse::<Name>().is_err());
    }

    #[test]
    fn root() {
        assert!(".".parse::<Name>().unwrap().is_empty());
        assert!("".parse::<Name>().unwrap().is_empty());
    }

    #[test]
    fn compose() {
        let domain: Name = "example.com".parse().unwrap();
        let service = Name::from_labels(["_http", "_tcp"]).join(&domain);
        let instance = service.prepend("Ärgle Bärgle");
        assert_eq!(instance.len(), 5);
        assert_eq!(instance.tail(1), service);
        assert_eq!(instance.tail(3), domain);
        assert_eq!(instance.label(0), Some("Ärgle Bärgle"));
    }
}
