use optset_bootstrap::{ConstraintFactory, load_str, load_str_with};
use optset_core::{CheckPolicy, ConfigError, DataLimit, OptionConstraint, ValueConstraint};

const CONVERT_DECL: &str = r#"
defaults:
  prefix: dash
  alt-prefix: double-dash
  value-separator: blank
  detail-separator: equals
sets:
  - name: convert
    data: "1:INF"
    data-names: [input]
    options:
      - kind: value
        key: log
        alt-key: logfile
        multiplicity: exactly-one
        value-name: file
        help: Write the conversion log to <file>
      - kind: value-with-detail
        key: O
        multiplicity: zero-or-more
        help: Set an output property
  - name: query
    data: "0"
    options:
      - kind: flag
        key: list
      - kind: flag
        key: count
    exclusive-groups:
      - keys: [list, count]
        multiplicity: exactly-one
options:
  - kind: flag
    key: verbose
"#;

#[test]
fn declaration_builds_checkable_registry() {
    let registry = load_str(CONVERT_DECL).unwrap();
    assert_eq!(registry.set_names(), ["convert", "query"]);

    let tokens = ["-log", "out.txt", "-Oquality=90", "-verbose", "a.png"];
    let report = registry.check("convert", &tokens, CheckPolicy::default());
    assert!(report.success(), "log: {}", report.log());
    assert_eq!(report.option("log").value_at(0), "out.txt");
    assert_eq!(report.option("O").detail_at(0), "quality");
    assert_eq!(report.option("O").value_at(0), "90");
    assert_eq!(report.option("verbose").count(), 1);
    assert_eq!(report.data_items(), ["a.png"]);
}

#[test]
fn alternate_keys_and_data_bounds_survive_loading() {
    let registry = load_str(CONVERT_DECL).unwrap();
    let convert = registry.set("convert").unwrap();
    assert_eq!(convert.min_data(), 1);
    assert_eq!(convert.max_data(), DataLimit::Unlimited);
    assert_eq!(convert.data_text(0), "input");

    let log = convert.find_option("log").unwrap();
    assert_eq!(log.alt_key(), Some("logfile"));
    assert_eq!(log.value_text(), "file");

    let report = registry.check(
        "convert",
        &["--logfile", "out.txt", "a.png"],
        CheckPolicy::default(),
    );
    assert!(report.success(), "log: {}", report.log());
}

#[test]
fn shared_options_land_in_every_set() {
    let registry = load_str(CONVERT_DECL).unwrap();
    for name in ["convert", "query"] {
        assert!(
            registry.set(name).unwrap().find_option("verbose").is_some(),
            "set {name} misses the shared option"
        );
    }
}

#[test]
fn exclusive_group_from_declaration_is_enforced() {
    let registry = load_str(CONVERT_DECL).unwrap();

    let both = registry.check("query", &["-list", "-count"], CheckPolicy::default());
    assert!(!both.success());
    assert!(both.log().contains("exclusive group list|count violated"));

    let one = registry.check("query", &["-count"], CheckPolicy::default());
    assert!(one.success(), "log: {}", one.log());
}

#[test]
fn find_matching_set_selects_by_tokens() {
    let registry = load_str(CONVERT_DECL).unwrap();

    let (set, report) = registry
        .find_matching_set(&["-list"], CheckPolicy::default())
        .unwrap();
    assert_eq!(set.name(), "query");
    assert!(report.success());

    assert!(
        registry
            .find_matching_set(&["--mystery"], CheckPolicy::default())
            .is_none()
    );
}

#[test]
fn declared_constraints_are_attached_and_checked() {
    let yaml = r#"
defaults:
  value-separator: equals
sets:
  - name: main
    options:
      - kind: value
        key: color
        multiplicity: exactly-one
        constraints:
          - kind: string-values
            spec: "+RED|GREEN|BLUE"
      - kind: value
        key: level
        multiplicity: zero-or-more
        constraints:
          - kind: int-range
            spec: "7:12"
"#;
    let registry = load_str(yaml).unwrap();

    let good = registry.check("main", &["-color=red"], CheckPolicy::default());
    assert!(good.success(), "log: {}", good.log());

    let bad = registry.check("main", &["-color=purple"], CheckPolicy::default());
    assert!(!bad.success());
    assert!(bad.log().contains("string-values"));

    // One in-range occurrence satisfies the range constraint.
    let mixed = registry.check(
        "main",
        &["-color=BLUE", "-level=99", "-level=9"],
        CheckPolicy::default(),
    );
    assert!(mixed.success(), "log: {}", mixed.log());
}

#[test]
fn user_registered_constraint_kind_resolves() {
    fn even_values(
        _spec: &str,
    ) -> Result<Box<dyn OptionConstraint>, ConfigError> {
        Ok(Box::new(ValueConstraint::ints(&[0, 2, 4, 6, 8])?))
    }

    let mut factory = ConstraintFactory::builtin();
    factory.register("small-even", even_values);

    let yaml = r#"
defaults:
  value-separator: equals
sets:
  - name: main
    options:
      - kind: value
        key: n
        multiplicity: exactly-one
        constraints:
          - kind: small-even
            spec: ""
"#;
    let registry = load_str_with(yaml, &factory).unwrap();
    assert!(
        registry
            .check("main", &["-n=4"], CheckPolicy::default())
            .success()
    );
    assert!(
        !registry
            .check("main", &["-n=3"], CheckPolicy::default())
            .success()
    );
}

#[test]
fn invalid_declarations_are_rejected() {
    // Unknown constraint kind.
    let yaml = r#"
sets:
  - name: main
    options:
      - kind: value
        key: x
        constraints:
          - kind: regex
            spec: ".*"
"#;
    assert!(load_str(yaml).is_err());

    // Constraint on a flag.
    let yaml = r#"
sets:
  - name: main
    options:
      - kind: flag
        key: x
        constraints:
          - kind: int-range
            spec: "1:2"
"#;
    assert!(load_str(yaml).is_err());

    // Duplicate keys within one set.
    let yaml = r#"
sets:
  - name: main
    options:
      - kind: flag
        key: x
      - kind: flag
        key: x
"#;
    assert!(load_str(yaml).is_err());

    // Inverted data bounds.
    assert!(load_str("sets:\n  - name: main\n    data: \"3:1\"\n").is_err());
}
