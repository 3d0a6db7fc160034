//! Route policy vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use routeguard_core::{Matched, Outcome};

use vector_loader::load;

#[test]
fn policy_vectors() {
    let files = [
        "observed_default_permit.json",
        "observed_default_deny.json",
        "overlapping_rules.json",
        "glob_patterns.json",
    ];

    for f in files {
        let v = load(f);
        let policy = v.policy();

        for case in &v.cases {
            let ctx = case.context();
            let ev = policy.evaluate_detailed(&ctx);
            let tag = format!("vector={} path={}", v.description, case.path);

            assert_eq!(ev.outcome.as_str(), case.expect, "{tag}");

            if let Some(want) = case.requires_integrity_check {
                match ev.outcome {
                    Outcome::Allowed { requires_integrity_check } => {
                        assert_eq!(requires_integrity_check, want, "{tag}")
                    }
                    other => panic!("{tag}: expected allowed, got {other:?}"),
                }
            }

            match (case.matched_index, ev.matched) {
                (Some(want), Matched::Rule { index, .. }) => assert_eq!(index, want, "{tag}"),
                (Some(want), Matched::Default) => panic!("{tag}: expected rule {want}, got default"),
                (None, _) => {}
            }

            // pure: a second evaluation yields the same outcome
            assert_eq!(policy.evaluate(&ctx), ev.outcome, "{tag}");
        }
    }
}
