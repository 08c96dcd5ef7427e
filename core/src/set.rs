//! Option sets: named collections of options checked together.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::check;
use crate::constraint::ExclusiveGroup;
use crate::error::{ConfigError, Result};
use crate::option::OptionSpec;
use crate::report::{CheckPolicy, CheckReport};
use crate::types::{DataLimit, Multiplicity, OptionKind, Prefix, Separator};

/// Keys may only contain word constituents; in particular no whitespace and
/// no prefix characters.
static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("static regex must compile"));

/// A named, ordered collection of options plus positional-data bounds.
///
/// The declaration order of options is significant: the matching engine
/// tries options in that order and the first match wins. A set is built once
/// through [`add_option`](OptionSet::add_option) and friends, then checked
/// any number of times; every check returns a fresh [`CheckReport`] and
/// leaves the set untouched.
///
/// # Examples
///
/// ```
/// use optset_core::{CheckPolicy, DataLimit, Multiplicity, OptionKind, OptionSet};
///
/// let mut set = OptionSet::new("convert", 1, DataLimit::Unlimited).unwrap();
/// set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne).unwrap();
/// set.add_option(OptionKind::Flag, "force").unwrap();
///
/// let report = set.check(&["-log", "out.txt", "-force", "a.png"], CheckPolicy::default());
/// assert!(report.success());
/// assert_eq!(report.option("log").value_at(0), "out.txt");
/// assert_eq!(report.data_items(), ["a.png"]);
/// ```
#[derive(Debug)]
pub struct OptionSet {
    name: String,
    prefix: Prefix,
    alt_prefix: Prefix,
    value_separator: Separator,
    detail_separator: Separator,
    default_multiplicity: Multiplicity,
    min_data: usize,
    max_data: DataLimit,
    options: Vec<OptionSpec>,
    keys: HashMap<String, usize>,
    alt_keys: HashSet<String>,
    groups: Vec<ExclusiveGroup>,
    data_texts: Vec<String>,
    data_help: Vec<String>,
}

impl OptionSet {
    /// Creates a standalone set with the platform defaults: primary prefix
    /// [`Prefix::platform_default`], alternate prefix
    /// [`Prefix::DoubleDash`], blank value separator, `=` detail separator,
    /// and [`Multiplicity::ZeroOrOne`] for options declared without one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySetName`] or
    /// [`ConfigError::InvertedDataBounds`].
    pub fn new(name: &str, min_data: usize, max_data: DataLimit) -> Result<Self> {
        Self::with_defaults(
            name,
            Prefix::platform_default(),
            Prefix::DoubleDash,
            Separator::Blank,
            Separator::Equals,
            Multiplicity::ZeroOrOne,
            min_data,
            max_data,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_defaults(
        name: &str,
        prefix: Prefix,
        alt_prefix: Prefix,
        value_separator: Separator,
        detail_separator: Separator,
        default_multiplicity: Multiplicity,
        min_data: usize,
        max_data: DataLimit,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptySetName);
        }
        if let DataLimit::Limited(max) = max_data {
            if max < min_data {
                return Err(ConfigError::InvertedDataBounds {
                    min: min_data,
                    max,
                });
            }
        }

        // With an unlimited bound only minData + 1 display texts are
        // meaningful: the required items plus the one inside [...] brackets.
        let slots = match max_data {
            DataLimit::Limited(max) => max,
            DataLimit::Unlimited => min_data + 1,
        };

        Ok(Self {
            name: name.to_string(),
            prefix,
            alt_prefix,
            value_separator,
            detail_separator,
            default_multiplicity,
            min_data,
            max_data,
            options: Vec::new(),
            keys: HashMap::new(),
            alt_keys: HashSet::new(),
            groups: Vec::new(),
            data_texts: vec!["data".to_string(); slots],
            data_help: vec![String::new(); slots],
        })
    }

    /// The name of the set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The primary option prefix for this set.
    pub fn prefix(&self) -> Prefix {
        self.prefix
    }

    /// The alternate option prefix for this set.
    pub fn alt_prefix(&self) -> Prefix {
        self.alt_prefix
    }

    /// The minimum number of positional data items.
    pub fn min_data(&self) -> usize {
        self.min_data
    }

    /// The maximum number of positional data items.
    pub fn max_data(&self) -> DataLimit {
        self.max_data
    }

    /// Whether this set has no upper bound on data items.
    pub fn has_unlimited_data(&self) -> bool {
        self.max_data == DataLimit::Unlimited
    }

    /// Whether this set accepts positional data at all.
    pub fn accepts_data(&self) -> bool {
        self.min_data > 0 || self.max_data != DataLimit::Limited(0)
    }

    /// The multiplicity applied to options declared without one.
    pub fn default_multiplicity(&self) -> Multiplicity {
        self.default_multiplicity
    }

    /// The declared options, in declaration (= match priority) order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// The exclusive groups registered on this set.
    pub fn exclusive_groups(&self) -> &[ExclusiveGroup] {
        &self.groups
    }

    /// Looks up an option by its primary key.
    pub fn find_option(&self, key: &str) -> Option<&OptionSpec> {
        self.keys.get(key).map(|&pos| &self.options[pos])
    }

    /// Looks up an option by its primary key for further configuration.
    pub fn find_option_mut(&mut self, key: &str) -> Option<&mut OptionSpec> {
        match self.keys.get(key) {
            Some(&pos) => Some(&mut self.options[pos]),
            None => None,
        }
    }

    /// Whether every declared option is optional and no data is required.
    /// Such a set trivially accepts an empty token vector.
    pub fn is_purely_optional(&self) -> bool {
        self.min_data == 0 && !self.options.iter().any(OptionSpec::is_mandatory)
    }

    /// Adds an option with the set's default multiplicity and no alternate
    /// key. See [`add_option_with`](OptionSet::add_option_with).
    pub fn add_option(&mut self, kind: OptionKind, key: &str) -> Result<&mut OptionSpec> {
        self.add_option_with(kind, key, None, self.default_multiplicity)
    }

    /// Adds an option to the set.
    ///
    /// The separator is chosen by kind: detail-capturing options use the
    /// set's detail separator, other value options its value separator.
    /// The returned reference allows chaining display-text setters and
    /// constraints onto the new option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKey`] for keys containing characters
    /// outside `[a-zA-Z0-9_]`, and [`ConfigError::DuplicateKey`] /
    /// [`ConfigError::DuplicateAltKey`] when a key form is already taken
    /// within this set.
    pub fn add_option_with(
        &mut self,
        kind: OptionKind,
        key: &str,
        alt_key: Option<&str>,
        multiplicity: Multiplicity,
    ) -> Result<&mut OptionSpec> {
        if !KEY_PATTERN.is_match(key) {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }
        if self.keys.contains_key(key) || self.alt_keys.contains(key) {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }
        if let Some(alt) = alt_key {
            if !KEY_PATTERN.is_match(alt) {
                return Err(ConfigError::InvalidKey(alt.to_string()));
            }
            if self.alt_keys.contains(alt) || self.keys.contains_key(alt) {
                return Err(ConfigError::DuplicateAltKey(alt.to_string()));
            }
        }

        let separator = if kind.takes_detail() {
            self.detail_separator
        } else {
            self.value_separator
        };
        let spec = OptionSpec::new(
            kind,
            self.prefix,
            self.alt_prefix,
            key,
            alt_key,
            separator,
            multiplicity,
        )?;

        let pos = self.options.len();
        self.options.push(spec);
        self.keys.insert(key.to_string(), pos);
        if let Some(alt) = alt_key {
            self.alt_keys.insert(alt.to_string());
        }
        Ok(&mut self.options[pos])
    }

    /// Registers an exclusive group over the named options.
    ///
    /// Each member is marked exclusive and has its multiplicity overridden
    /// by the shared `multiplicity`. The members must already be declared.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ExclusiveGroupTooSmall`] for fewer than two
    /// keys, [`ConfigError::UnknownKey`] for undeclared members, and
    /// [`ConfigError::AlreadyExclusive`] when a member is already part of
    /// another group.
    pub fn add_exclusive_group(
        &mut self,
        multiplicity: Multiplicity,
        keys: &[&str],
    ) -> Result<()> {
        if keys.len() < 2 {
            return Err(ConfigError::ExclusiveGroupTooSmall);
        }
        for key in keys {
            let pos = *self
                .keys
                .get(*key)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            if self.options[pos].is_exclusive() {
                return Err(ConfigError::AlreadyExclusive(key.to_string()));
            }
        }
        for key in keys {
            let pos = self.keys[*key];
            self.options[pos].set_exclusive(true);
            self.options[pos].set_multiplicity(multiplicity);
        }
        self.groups.push(ExclusiveGroup::new(
            keys.iter().map(|k| k.to_string()).collect(),
            multiplicity,
        ));
        Ok(())
    }

    /// The number of data display-text slots: `maxData` when bounded, or
    /// `minData + 1` for unlimited sets.
    pub fn text_slots(&self) -> usize {
        self.data_texts.len()
    }

    /// Sets the placeholder text for the data item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDataIndex`] when `index` is outside
    /// the set's text slots.
    pub fn set_data_text(&mut self, index: usize, text: &str) -> Result<&mut Self> {
        let limit = self.data_texts.len();
        if index >= limit {
            return Err(ConfigError::InvalidDataIndex { index, limit });
        }
        self.data_texts[index] = text.trim().to_string();
        Ok(self)
    }

    /// Sets the help text for the data item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDataIndex`] when `index` is outside
    /// the set's text slots.
    pub fn set_data_help(&mut self, index: usize, text: &str) -> Result<&mut Self> {
        let limit = self.data_help.len();
        if index >= limit {
            return Err(ConfigError::InvalidDataIndex { index, limit });
        }
        self.data_help[index] = text.trim().to_string();
        Ok(self)
    }

    /// The placeholder text for the data item at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the set's text slots.
    pub fn data_text(&self, index: usize) -> &str {
        &self.data_texts[index]
    }

    /// The help text for the data item at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is outside the set's text slots.
    pub fn data_help(&self, index: usize) -> &str {
        &self.data_help[index]
    }

    /// Checks a token vector against this set.
    ///
    /// Runs the matching engine followed by the validation engine and
    /// returns the populated [`CheckReport`]. The set itself is not
    /// modified; checking the same set repeatedly is safe.
    pub fn check<S: AsRef<str>>(&self, tokens: &[S], policy: CheckPolicy) -> CheckReport {
        let tokens: Vec<&str> = tokens.iter().map(|token| token.as_ref()).collect();
        check::run_check(self, &tokens, policy)
    }
}
