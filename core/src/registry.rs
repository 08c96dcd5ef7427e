//! A registry of named option sets with shared creation defaults.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::report::{CheckPolicy, CheckReport};
use crate::set::OptionSet;
use crate::types::{DataLimit, Multiplicity, OptionKind, Prefix, Separator};

/// Holds any number of named [`OptionSet`]s and the defaults applied when
/// sets and options are created.
///
/// Prefix and separator defaults must be configured before the first set
/// exists, because they are baked into every derived matching pattern; the
/// multiplicity and data-bound defaults merely seed sets and options created
/// afterwards.
///
/// # Examples
///
/// ```
/// use optset_core::{CheckPolicy, DataLimit, Multiplicity, OptionKind, OptionRegistry};
///
/// let mut registry = OptionRegistry::new();
/// let set = registry.add_set("convert", 1, DataLimit::Unlimited).unwrap();
/// set.add_option_with(OptionKind::Value, "log", None, Multiplicity::ExactlyOne).unwrap();
///
/// let report = registry.check("convert", &["-log", "out.txt", "in.png"], CheckPolicy::default());
/// assert!(report.success());
/// ```
#[derive(Debug)]
pub struct OptionRegistry {
    sets: BTreeMap<String, OptionSet>,
    default_prefix: Prefix,
    default_alt_prefix: Prefix,
    default_value_separator: Separator,
    default_detail_separator: Separator,
    default_multiplicity: Multiplicity,
    default_min_data: usize,
    default_max_data: DataLimit,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self {
            sets: BTreeMap::new(),
            default_prefix: Prefix::platform_default(),
            default_alt_prefix: Prefix::DoubleDash,
            default_value_separator: Separator::Blank,
            default_detail_separator: Separator::Equals,
            default_multiplicity: Multiplicity::ZeroOrOne,
            default_min_data: 0,
            default_max_data: DataLimit::Limited(0),
        }
    }
}

impl OptionRegistry {
    /// Creates an empty registry with the platform defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefixes used for all options created afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IdenticalPrefixes`] when the two prefixes are
    /// equal and [`ConfigError::DefaultsFrozen`] once any set exists.
    pub fn set_default_prefixes(&mut self, prefix: Prefix, alt_prefix: Prefix) -> Result<&mut Self> {
        if prefix == alt_prefix {
            return Err(ConfigError::IdenticalPrefixes);
        }
        if !self.sets.is_empty() {
            return Err(ConfigError::DefaultsFrozen);
        }
        self.default_prefix = prefix;
        self.default_alt_prefix = alt_prefix;
        Ok(self)
    }

    /// Sets the separators used for value and detail options created
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DefaultsFrozen`] once any set exists.
    pub fn set_default_separators(
        &mut self,
        value_separator: Separator,
        detail_separator: Separator,
    ) -> Result<&mut Self> {
        if !self.sets.is_empty() {
            return Err(ConfigError::DefaultsFrozen);
        }
        self.default_value_separator = value_separator;
        self.default_detail_separator = detail_separator;
        Ok(self)
    }

    /// Sets the multiplicity used for options declared without one. Applies
    /// to sets created after this call.
    pub fn set_default_multiplicity(&mut self, multiplicity: Multiplicity) -> &mut Self {
        self.default_multiplicity = multiplicity;
        self
    }

    /// Sets the data bounds used by
    /// [`add_set_with_defaults`](OptionRegistry::add_set_with_defaults).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedDataBounds`] when the bounds are
    /// inverted.
    pub fn set_default_data(&mut self, min_data: usize, max_data: DataLimit) -> Result<&mut Self> {
        if let DataLimit::Limited(max) = max_data {
            if max < min_data {
                return Err(ConfigError::InvertedDataBounds {
                    min: min_data,
                    max,
                });
            }
        }
        self.default_min_data = min_data;
        self.default_max_data = max_data;
        Ok(self)
    }

    /// Creates a new named set with the given data bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateSet`] when the name is taken, plus
    /// any error from [`OptionSet`] construction.
    pub fn add_set(
        &mut self,
        name: &str,
        min_data: usize,
        max_data: DataLimit,
    ) -> Result<&mut OptionSet> {
        if self.sets.contains_key(name) {
            return Err(ConfigError::DuplicateSet(name.to_string()));
        }
        let set = OptionSet::with_defaults(
            name,
            self.default_prefix,
            self.default_alt_prefix,
            self.default_value_separator,
            self.default_detail_separator,
            self.default_multiplicity,
            min_data,
            max_data,
        )?;
        debug!(set = name, "registered option set");
        Ok(self.sets.entry(name.to_string()).or_insert(set))
    }

    /// Creates a new named set with the registry's default data bounds.
    pub fn add_set_with_defaults(&mut self, name: &str) -> Result<&mut OptionSet> {
        let (min, max) = (self.default_min_data, self.default_max_data);
        self.add_set(name, min, max)
    }

    /// Looks up a set by name.
    pub fn set(&self, name: &str) -> Option<&OptionSet> {
        self.sets.get(name)
    }

    /// Looks up a set by name for further configuration.
    pub fn set_mut(&mut self, name: &str) -> Option<&mut OptionSet> {
        self.sets.get_mut(name)
    }

    /// The names of all registered sets, in name order.
    pub fn set_names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    /// All registered sets, in name order.
    pub fn sets(&self) -> impl Iterator<Item = &OptionSet> {
        self.sets.values()
    }

    /// Adds the same option to every registered set, with the registry's
    /// default multiplicity.
    pub fn add_option_all_sets(&mut self, kind: OptionKind, key: &str) -> Result<()> {
        let multiplicity = self.default_multiplicity;
        self.add_option_all_sets_with(kind, key, None, multiplicity)
    }

    /// Adds the same option to every registered set.
    pub fn add_option_all_sets_with(
        &mut self,
        kind: OptionKind,
        key: &str,
        alt_key: Option<&str>,
        multiplicity: Multiplicity,
    ) -> Result<()> {
        for set in self.sets.values_mut() {
            set.add_option_with(kind, key, alt_key, multiplicity)?;
        }
        Ok(())
    }

    /// Checks a token vector against the named set.
    ///
    /// # Panics
    ///
    /// Panics when no set with that name is registered; use
    /// [`set`](OptionRegistry::set) first when the name is not known to be
    /// valid.
    pub fn check<S: AsRef<str>>(
        &self,
        name: &str,
        tokens: &[S],
        policy: CheckPolicy,
    ) -> CheckReport {
        match self.sets.get(name) {
            Some(set) => set.check(tokens, policy),
            None => panic!("unknown option set '{name}'"),
        }
    }

    /// Checks the token vector against every registered set, in name order,
    /// and returns the first set that matches along with its report.
    pub fn find_matching_set<S: AsRef<str>>(
        &self,
        tokens: &[S],
        policy: CheckPolicy,
    ) -> Option<(&OptionSet, CheckReport)> {
        for set in self.sets.values() {
            let report = set.check(tokens, policy);
            if report.success() {
                debug!(set = set.name(), "token vector matched set");
                return Some((set, report));
            }
        }
        None
    }
}
