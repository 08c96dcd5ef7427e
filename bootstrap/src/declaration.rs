//! Serde DTOs for declaration files.
//!
//! These types mirror the YAML surface one-to-one and know nothing about
//! the core crate beyond its configuration enums. The loader walks them and
//! populates an [`OptionRegistry`](optset_core::OptionRegistry) through the
//! public build API only.

use serde::Deserialize;

use optset_core::{Multiplicity, OptionKind, Prefix, Separator};

/// A complete declaration file.
///
/// ```yaml
/// defaults:
///   prefix: dash
///   multiplicity: zero-or-one
/// sets:
///   - name: convert
///     data: "1:INF"
///     options:
///       - kind: value
///         key: log
///         multiplicity: exactly-one
/// options:
///   - kind: flag
///     key: verbose
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Declaration {
    /// Registry-level defaults, applied before any set is created.
    #[serde(default)]
    pub defaults: Defaults,
    /// The option sets to declare.
    #[serde(default)]
    pub sets: Vec<SetDecl>,
    /// Options added to *every* declared set.
    #[serde(default)]
    pub options: Vec<OptionDecl>,
}

/// Registry-level defaults. Absent fields keep the platform defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Defaults {
    pub prefix: Option<Prefix>,
    pub alt_prefix: Option<Prefix>,
    pub value_separator: Option<Separator>,
    pub detail_separator: Option<Separator>,
    pub multiplicity: Option<Multiplicity>,
    /// Data bounds in specification form: `N`, `MIN:MAX`, or `MIN:INF`.
    pub data: Option<String>,
}

/// One option set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SetDecl {
    pub name: String,
    /// Data bounds in specification form; the registry default applies when
    /// absent.
    pub data: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionDecl>,
    #[serde(default)]
    pub exclusive_groups: Vec<ExclusiveGroupDecl>,
    /// Placeholder texts for the data items, by index.
    #[serde(default)]
    pub data_names: Vec<String>,
    /// Help texts for the data items, by index.
    #[serde(default)]
    pub data_help: Vec<String>,
}

/// One option within a set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OptionDecl {
    pub kind: OptionKind,
    pub key: String,
    pub alt_key: Option<String>,
    /// The set's default multiplicity applies when absent.
    pub multiplicity: Option<Multiplicity>,
    /// Help text describing the option's purpose.
    pub help: Option<String>,
    /// Placeholder text for the `<value>` argument.
    pub value_name: Option<String>,
    /// Placeholder text for the `<detail>` argument.
    pub detail_name: Option<String>,
    #[serde(default)]
    pub constraints: Vec<ConstraintDecl>,
}

/// A constraint declaration, resolved through the
/// [`ConstraintFactory`](crate::ConstraintFactory).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConstraintDecl {
    /// The registered constraint kind, e.g. `string-values`.
    pub kind: String,
    /// The kind-specific specification string, e.g. `+RED|GREEN|BLUE`.
    pub spec: String,
}

/// An exclusive group over previously declared options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExclusiveGroupDecl {
    pub keys: Vec<String>,
    /// The shared multiplicity for all members; the set's default applies
    /// when absent.
    pub multiplicity: Option<Multiplicity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_declaration_parses() {
        let yaml = r#"
defaults:
  prefix: dash
  alt-prefix: double-dash
  value-separator: blank
  multiplicity: zero-or-one
sets:
  - name: convert
    data: "1:INF"
    options:
      - kind: value
        key: log
        alt-key: logfile
        multiplicity: exactly-one
        help: Write a log file
        value-name: file
        constraints:
          - kind: string-values
            spec: "+RED|GREEN|BLUE"
    exclusive-groups:
      - keys: [a, b]
        multiplicity: exactly-one
options:
  - kind: flag
    key: verbose
"#;
        let decl: Declaration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(decl.defaults.prefix, Some(Prefix::Dash));
        assert_eq!(decl.sets.len(), 1);
        assert_eq!(decl.sets[0].options[0].key, "log");
        assert_eq!(
            decl.sets[0].options[0].multiplicity,
            Some(Multiplicity::ExactlyOne)
        );
        assert_eq!(decl.sets[0].exclusive_groups[0].keys, ["a", "b"]);
        assert_eq!(decl.options[0].kind, OptionKind::Flag);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "sets:\n  - name: x\n    bogus: 1\n";
        assert!(serde_yaml::from_str::<Declaration>(yaml).is_err());
    }
}
