//! Minimal metrics registry for the guard.
//!
//! Counters with dynamic labels backed by `DashMap`. Labels are flattened
//! into sorted key vectors to keep rendering deterministic.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

#[derive(Default)]
pub struct GuardMetrics {
    /// Labels: `outcome`, `rule` (pattern or `default`).
    pub decisions: CounterVec,
    /// Labels: `reason`.
    pub integrity_failures: CounterVec,
    /// Requests refused before evaluation (malformed context).
    pub invalid_requests: CounterVec,
    draining: AtomicBool,
}

impl GuardMetrics {
    /// Mark draining state.
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }
    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all registered metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.decisions.render("routeguard_decisions_total", &mut out);
        self.integrity_failures.render("routeguard_integrity_failures_total", &mut out);
        self.invalid_requests.render("routeguard_invalid_requests_total", &mut out);

        let _ = writeln!(
            out,
            "# TYPE routeguard_draining gauge\nrouteguard_draining {}",
            if self.is_draining() { 1 } else { 0 }
        );
        for (k, v) in extra {
            let _ = writeln!(out, "{} {}", k, v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_order_insensitive() {
        let m = GuardMetrics::default();
        m.decisions.inc(&[("outcome", "rejected"), ("rule", "/decrypt")]);
        m.decisions.inc(&[("rule", "/decrypt"), ("outcome", "rejected")]);
        assert_eq!(m.decisions.get(&[("outcome", "rejected"), ("rule", "/decrypt")]), 2);
    }

    #[test]
    fn renders_prometheus_text() {
        let m = GuardMetrics::default();
        m.decisions.inc(&[("outcome", "allowed"), ("rule", "default")]);
        m.set_draining();
        let out = m.render(&[("routeguard_policy_rules", 2)]);
        assert!(out.contains("routeguard_decisions_total{outcome=\"allowed\",rule=\"default\"} 1"));
        assert!(out.contains("routeguard_draining 1"));
        assert!(out.contains("routeguard_policy_rules 2"));
    }
}
