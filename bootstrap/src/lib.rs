//! Declarative bootstrap of option-set registries.
//!
//! This crate turns a YAML declaration file into a fully configured
//! [`OptionRegistry`]. It is a pure consumer of the core crate's build API:
//! registry defaults, sets, options, constraints, and exclusive groups are
//! all created through the same public calls an application would make by
//! hand, and the loader gains no privileged access to core internals.
//!
//! Constraints are named by kind and resolved through an explicit,
//! statically-registered [`ConstraintFactory`]: applications register
//! additional kinds with a function call, never by naming types in
//! configuration data.
//!
//! # Example
//!
//! ```
//! use optset_bootstrap::load_str;
//! use optset_core::CheckPolicy;
//!
//! let registry = load_str(
//!     r#"
//! sets:
//!   - name: convert
//!     data: "1:INF"
//!     options:
//!       - kind: value
//!         key: log
//!         multiplicity: exactly-one
//! "#,
//! )
//! .unwrap();
//!
//! let report = registry.check("convert", &["-log", "out.txt", "in.png"], CheckPolicy::default());
//! assert!(report.success());
//! ```

mod declaration;
mod error;
mod factory;

pub use declaration::{
    ConstraintDecl, Declaration, Defaults, ExclusiveGroupDecl, OptionDecl, SetDecl,
};
pub use error::{BootstrapError, Result};
pub use factory::{ConstraintBuilder, ConstraintFactory};

use std::fs;
use std::path::Path;

use tracing::debug;

use optset_core::{DataLimit, OptionRegistry, OptionSet, Prefix, Separator};

/// Loads a declaration from a YAML string, using the built-in constraint
/// kinds.
pub fn load_str(yaml: &str) -> Result<OptionRegistry> {
    load_str_with(yaml, &ConstraintFactory::builtin())
}

/// Loads a declaration from a YAML string with a caller-supplied constraint
/// factory.
pub fn load_str_with(yaml: &str, factory: &ConstraintFactory) -> Result<OptionRegistry> {
    let declaration: Declaration = serde_yaml::from_str(yaml)?;
    build_registry(&declaration, factory)
}

/// Loads a declaration file, using the built-in constraint kinds.
pub fn load_file(path: impl AsRef<Path>) -> Result<OptionRegistry> {
    load_file_with(path, &ConstraintFactory::builtin())
}

/// Loads a declaration file with a caller-supplied constraint factory.
pub fn load_file_with(
    path: impl AsRef<Path>,
    factory: &ConstraintFactory,
) -> Result<OptionRegistry> {
    let yaml = fs::read_to_string(path)?;
    load_str_with(&yaml, factory)
}

/// Populates a registry from a parsed declaration.
pub fn build_registry(
    declaration: &Declaration,
    factory: &ConstraintFactory,
) -> Result<OptionRegistry> {
    if declaration.sets.is_empty() {
        return Err(BootstrapError::NoSets);
    }

    let mut registry = OptionRegistry::new();
    apply_defaults(&mut registry, &declaration.defaults)?;

    for set_decl in &declaration.sets {
        let set = match &set_decl.data {
            Some(spec) => {
                let (min, max) = parse_data_spec(spec)?;
                registry.add_set(&set_decl.name, min, max)?
            }
            None => registry.add_set_with_defaults(&set_decl.name)?,
        };
        populate_set(set, set_decl, &declaration.options, factory)?;
        debug!(
            set = %set_decl.name,
            options = set_decl.options.len(),
            "bootstrapped option set"
        );
    }

    Ok(registry)
}

fn apply_defaults(registry: &mut OptionRegistry, defaults: &Defaults) -> Result<()> {
    if defaults.prefix.is_some() || defaults.alt_prefix.is_some() {
        let prefix = defaults.prefix.unwrap_or_else(Prefix::platform_default);
        let alt_prefix = defaults.alt_prefix.unwrap_or(Prefix::DoubleDash);
        registry.set_default_prefixes(prefix, alt_prefix)?;
    }
    if defaults.value_separator.is_some() || defaults.detail_separator.is_some() {
        let value = defaults.value_separator.unwrap_or(Separator::Blank);
        let detail = defaults.detail_separator.unwrap_or(Separator::Equals);
        registry.set_default_separators(value, detail)?;
    }
    if let Some(multiplicity) = defaults.multiplicity {
        registry.set_default_multiplicity(multiplicity);
    }
    if let Some(spec) = &defaults.data {
        let (min, max) = parse_data_spec(spec)?;
        registry.set_default_data(min, max)?;
    }
    Ok(())
}

fn populate_set(
    set: &mut OptionSet,
    decl: &SetDecl,
    shared_options: &[OptionDecl],
    factory: &ConstraintFactory,
) -> Result<()> {
    for option in &decl.options {
        add_option(set, option, factory)?;
    }
    for option in shared_options {
        add_option(set, option, factory)?;
    }

    for group in &decl.exclusive_groups {
        let multiplicity = group.multiplicity.unwrap_or(set.default_multiplicity());
        let keys: Vec<&str> = group.keys.iter().map(String::as_str).collect();
        set.add_exclusive_group(multiplicity, &keys)?;
    }

    for (index, name) in decl.data_names.iter().enumerate() {
        set.set_data_text(index, name)?;
    }
    for (index, help) in decl.data_help.iter().enumerate() {
        set.set_data_help(index, help)?;
    }

    Ok(())
}

fn add_option(set: &mut OptionSet, decl: &OptionDecl, factory: &ConstraintFactory) -> Result<()> {
    let multiplicity = decl.multiplicity.unwrap_or(set.default_multiplicity());
    let spec = set.add_option_with(decl.kind, &decl.key, decl.alt_key.as_deref(), multiplicity)?;

    if let Some(help) = &decl.help {
        spec.set_help_text(help);
    }
    if let Some(value_name) = &decl.value_name {
        spec.set_value_text(value_name);
    }
    if let Some(detail_name) = &decl.detail_name {
        spec.set_detail_text(detail_name);
    }

    for constraint in &decl.constraints {
        let built = factory.build(&constraint.kind, &constraint.spec)?;
        spec.add_constraint(built)?;
    }

    Ok(())
}

/// Parses a data bounds specification: `N` (exactly N items), `MIN:MAX`, or
/// `MIN:INF` for an unlimited upper bound.
fn parse_data_spec(spec: &str) -> Result<(usize, DataLimit)> {
    let invalid = || BootstrapError::InvalidDataSpec(spec.to_string());

    match spec.split_once(':') {
        None => {
            let n = spec.trim().parse::<usize>().map_err(|_| invalid())?;
            Ok((n, DataLimit::Limited(n)))
        }
        Some((min, max)) => {
            let min = min.trim().parse::<usize>().map_err(|_| invalid())?;
            let max = match max.trim() {
                "INF" => DataLimit::Unlimited,
                bounded => DataLimit::Limited(bounded.parse::<usize>().map_err(|_| invalid())?),
            };
            Ok((min, max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_spec_forms() {
        assert_eq!(parse_data_spec("2").unwrap(), (2, DataLimit::Limited(2)));
        assert_eq!(
            parse_data_spec("1:3").unwrap(),
            (1, DataLimit::Limited(3))
        );
        assert_eq!(
            parse_data_spec("1:INF").unwrap(),
            (1, DataLimit::Unlimited)
        );
        assert!(parse_data_spec("x").is_err());
        assert!(parse_data_spec("1:y").is_err());
    }

    #[test]
    fn test_empty_declaration_rejected() {
        assert!(matches!(load_str("{}"), Err(BootstrapError::NoSets)));
    }
}
