//! Option specifications and their derived matching patterns.

use std::fmt;

use regex::Regex;

use crate::constraint::OptionConstraint;
use crate::error::{ConfigError, Result};
use crate::types::{Multiplicity, OptionKind, Prefix, Separator};

/// Captures extracted from a token that matched an option's pattern.
///
/// For blank-separator value options the value arrives as the *next* token,
/// so `value` is `None` here even though the option takes one.
#[derive(Debug)]
pub(crate) struct KeyMatch {
    pub(crate) value: Option<String>,
    pub(crate) detail: Option<String>,
}

/// The immutable description of one option within a set.
///
/// An `OptionSpec` knows its key form(s), what arguments it carries, how
/// often it may occur, and the regular expression derived from all of that
/// at construction time. It also carries the display texts consumed by the
/// usage-rendering collaborator. Specs are created through
/// [`OptionSet::add_option`](crate::OptionSet::add_option); the returned
/// mutable reference allows chaining the text setters and
/// [`add_constraint`](OptionSpec::add_constraint) before the first check.
///
/// # Examples
///
/// ```
/// use optset_core::{DataLimit, OptionKind, OptionSet};
///
/// let mut set = OptionSet::new("demo", 0, DataLimit::Limited(0)).unwrap();
/// let opt = set.add_option(OptionKind::Value, "log").unwrap();
/// opt.set_value_text("file").set_help_text("Write a log to <file>");
/// assert_eq!(set.find_option("log").unwrap().value_text(), "file");
/// ```
#[derive(Debug)]
pub struct OptionSpec {
    kind: OptionKind,
    prefix: Prefix,
    alt_prefix: Prefix,
    key: String,
    alt_key: Option<String>,
    separator: Separator,
    multiplicity: Multiplicity,
    exclusive: bool,
    pattern: Regex,
    help_text: String,
    value_text: String,
    detail_text: String,
    constraints: Vec<Box<dyn OptionConstraint>>,
}

impl OptionSpec {
    pub(crate) fn new(
        kind: OptionKind,
        prefix: Prefix,
        alt_prefix: Prefix,
        key: &str,
        alt_key: Option<&str>,
        separator: Separator,
        multiplicity: Multiplicity,
    ) -> Result<Self> {
        let pattern = build_pattern(kind, prefix, key, alt_prefix, alt_key, separator)?;
        Ok(Self {
            kind,
            prefix,
            alt_prefix,
            key: key.to_string(),
            alt_key: alt_key.map(String::from),
            separator,
            multiplicity,
            exclusive: false,
            pattern,
            help_text: String::new(),
            value_text: "value".to_string(),
            detail_text: "detail".to_string(),
            constraints: Vec::new(),
        })
    }

    /// The kind of arguments this option carries.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// The primary key (without prefix).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The alternate key, if one was declared.
    pub fn alt_key(&self) -> Option<&str> {
        self.alt_key.as_deref()
    }

    /// The prefix introducing the primary key.
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// The prefix introducing the alternate key.
    pub fn alt_prefix(&self) -> Prefix {
        self.alt_prefix
    }

    /// The separator between key and value.
    pub fn separator(&self) -> Separator {
        self.separator
    }

    /// The required occurrence cardinality.
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    /// Whether this option belongs to an exclusive group.
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// Whether this option must occur at least once.
    pub fn is_mandatory(&self) -> bool {
        self.multiplicity.is_required()
    }

    /// The help text describing the option's purpose (empty if unset).
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// The placeholder text used for the `<value>` argument in syntax output.
    pub fn value_text(&self) -> &str {
        &self.value_text
    }

    /// The placeholder text used for the `<detail>` argument in syntax output.
    pub fn detail_text(&self) -> &str {
        &self.detail_text
    }

    /// Sets the help text describing the option's purpose.
    pub fn set_help_text(&mut self, text: &str) -> &mut Self {
        self.help_text = text.trim().to_string();
        self
    }

    /// Sets the placeholder text for the `<value>` argument.
    pub fn set_value_text(&mut self, text: &str) -> &mut Self {
        self.value_text = text.trim().to_string();
        self
    }

    /// Sets the placeholder text for the `<detail>` argument.
    pub fn set_detail_text(&mut self, text: &str) -> &mut Self {
        self.detail_text = text.trim().to_string();
        self
    }

    /// Attaches a constraint evaluated against this option's recorded
    /// values after matching.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedConstraint`] if the constraint does
    /// not support this option's kind (e.g. a value constraint on a flag).
    pub fn add_constraint(&mut self, constraint: Box<dyn OptionConstraint>) -> Result<&mut Self> {
        if !constraint.supports(self) {
            return Err(ConfigError::UnsupportedConstraint {
                key: self.key.clone(),
                constraint: constraint.to_string(),
            });
        }
        self.constraints.push(constraint);
        Ok(self)
    }

    pub(crate) fn constraints(&self) -> &[Box<dyn OptionConstraint>] {
        &self.constraints
    }

    pub(crate) fn set_exclusive(&mut self, exclusive: bool) {
        self.exclusive = exclusive;
    }

    pub(crate) fn set_multiplicity(&mut self, multiplicity: Multiplicity) {
        self.multiplicity = multiplicity;
    }

    /// Tries to match a token against this option's pattern, extracting the
    /// embedded value/detail captures on success.
    pub(crate) fn match_token(&self, token: &str) -> Option<KeyMatch> {
        let caps = self.pattern.captures(token)?;
        Some(KeyMatch {
            value: caps.name("value").map(|m| m.as_str().to_string()),
            detail: caps.name("detail").map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alt_key {
            Some(alt) => write!(
                f,
                "({}{}|{}{})",
                self.prefix, self.key, self.alt_prefix, alt
            ),
            None => write!(f, "{}{}", self.prefix, self.key),
        }
    }
}

/// Derives the matching pattern for an option.
///
/// The pattern is anchored at both ends of the token. For blank-separator
/// value options only the key form itself appears in the token; detail
/// captures are a run of word constituents or dots directly after the key,
/// and fixed-separator values consume the remainder of the token.
fn build_pattern(
    kind: OptionKind,
    prefix: Prefix,
    key: &str,
    alt_prefix: Prefix,
    alt_key: Option<&str>,
    separator: Separator,
) -> Result<Regex> {
    let key_form = match alt_key {
        Some(alt) => format!(
            "(?:{}{}|{}{})",
            regex::escape(prefix.as_str()),
            key,
            regex::escape(alt_prefix.as_str()),
            alt
        ),
        None => format!("{}{}", regex::escape(prefix.as_str()), key),
    };

    let pattern = if kind.takes_value() {
        match separator {
            Separator::Blank => {
                if kind.takes_detail() {
                    format!("^{key_form}(?P<detail>[\\w.]+)$")
                } else {
                    format!("^{key_form}$")
                }
            }
            fixed => {
                let sep = regex::escape(&fixed.as_char().to_string());
                if kind.takes_detail() {
                    format!("^{key_form}(?P<detail>[\\w.]+){sep}(?P<value>.+)$")
                } else {
                    format!("^{key_form}{sep}(?P<value>.+)$")
                }
            }
        }
    } else {
        format!("^{key_form}$")
    };

    Regex::new(&pattern).map_err(|source| ConfigError::Pattern {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: OptionKind, separator: Separator) -> OptionSpec {
        OptionSpec::new(
            kind,
            Prefix::Dash,
            Prefix::DoubleDash,
            "log",
            None,
            separator,
            Multiplicity::ZeroOrOne,
        )
        .unwrap()
    }

    #[test]
    fn test_flag_matches_key_form_only() {
        let flag = spec(OptionKind::Flag, Separator::Blank);
        assert!(flag.match_token("-log").is_some());
        assert!(flag.match_token("-logs").is_none());
        assert!(flag.match_token("--log").is_none());
        assert!(flag.match_token("log").is_none());
    }

    #[test]
    fn test_alternate_key_alternation() {
        let flag = OptionSpec::new(
            OptionKind::Flag,
            Prefix::Dash,
            Prefix::DoubleDash,
            "v",
            Some("verbose"),
            Separator::Blank,
            Multiplicity::ZeroOrOne,
        )
        .unwrap();
        assert!(flag.match_token("-v").is_some());
        assert!(flag.match_token("--verbose").is_some());
        assert!(flag.match_token("-verbose").is_none());
    }

    #[test]
    fn test_fixed_separator_captures_value() {
        let opt = spec(OptionKind::Value, Separator::Equals);
        let m = opt.match_token("-log=out.txt").unwrap();
        assert_eq!(m.value.as_deref(), Some("out.txt"));
        assert!(m.detail.is_none());
        assert!(opt.match_token("-log=").is_none());
        assert!(opt.match_token("-log").is_none());
    }

    #[test]
    fn test_blank_separator_matches_bare_key() {
        let opt = spec(OptionKind::Value, Separator::Blank);
        let m = opt.match_token("-log").unwrap();
        assert!(m.value.is_none());
    }

    #[test]
    fn test_detail_with_fixed_separator() {
        let opt = spec(OptionKind::ValueWithDetail, Separator::Equals);
        let m = opt.match_token("-logserver.port=8080").unwrap();
        assert_eq!(m.detail.as_deref(), Some("server.port"));
        assert_eq!(m.value.as_deref(), Some("8080"));
    }

    #[test]
    fn test_detail_with_blank_separator() {
        let opt = spec(OptionKind::ValueWithDetail, Separator::Blank);
        let m = opt.match_token("-logdebug").unwrap();
        assert_eq!(m.detail.as_deref(), Some("debug"));
        assert!(m.value.is_none());
        assert!(opt.match_token("-log").is_none());
    }
}
