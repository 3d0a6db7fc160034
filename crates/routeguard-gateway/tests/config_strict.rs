#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use routeguard_core::{Decision, Outcome, Principal, RequestContext};
use routeguard_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
policy:
  default: permit
  rules:
    - pattern: "/decrypt"
      decison: deny_all # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn default_decision_is_required() {
    let bad = r#"
version: 1
policy:
  rules:
    - pattern: "/decrypt"
      decision: deny_all
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\npolicy: { default: permit }\n").unwrap_err();
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn invalid_pattern_and_exempt_deny_fail() {
    let bad_pattern = r#"
version: 1
policy:
  default: deny_all
  rules:
    - { pattern: "decrypt", decision: deny_all }
"#;
    assert_eq!(
        config::load_from_str(bad_pattern).unwrap_err().client_code().as_str(),
        "BAD_CONFIG"
    );

    let exempt_deny = r#"
version: 1
policy:
  default: deny_all
  rules:
    - { pattern: "/decrypt", decision: deny_all, csrf_exempt: true }
"#;
    assert_eq!(
        config::load_from_str(exempt_deny).unwrap_err().client_code().as_str(),
        "BAD_CONFIG"
    );
}

#[test]
fn bad_listen_and_empty_principal_fail() {
    let bad_listen = "version: 1\ngateway: { listen: \"nowhere\" }\npolicy: { default: permit }\n";
    assert!(config::load_from_str(bad_listen).is_err());

    let empty_principal = "version: 1\npolicy: { default: permit }\nauth: { tokens: { t: \" \" } }\n";
    assert!(config::load_from_str(empty_principal).is_err());
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\npolicy:\n  default: deny_all\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.policy.default, Decision::DenyAll);
    assert!(cfg.policy.rules.is_empty());
    assert!(cfg.csrf.enabled);
}

#[test]
fn observed_policy_compiles_from_yaml() {
    let cfg = config::load_from_str(include_str!("../../../routeguard.yaml")).expect("must parse");
    let policy = cfg.compile_policy().unwrap();
    assert_eq!(policy.rules().len(), 2);

    let dev = Some(Principal::new("user:dev"));
    let eval = |path: &str, p: Option<Principal>| policy.evaluate(&RequestContext::new(path, p).unwrap());

    assert_eq!(eval("/decrypt", dev.clone()), Outcome::Rejected);
    assert_eq!(eval("/encrypt", None), Outcome::Unauthorized);
    assert_eq!(
        eval("/encrypt", dev),
        Outcome::Allowed { requires_integrity_check: false }
    );
}

#[test]
fn resolve_path_precedence() {
    assert_eq!(config::resolve_path(Some("a.yaml".into()), Some("b.yaml".into())), "a.yaml");
    assert_eq!(config::resolve_path(None, Some("b.yaml".into())), "b.yaml");
    assert_eq!(config::resolve_path(Some(" ".into()), None), config::DEFAULT_PATH);
}
