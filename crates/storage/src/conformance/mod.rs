//! Conformance test suite for `PactumStorage` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `PactumStorage` implementation can run to verify correctness. The
//! suite covers:
//!
//! - **Load**: missing keys read as absent, saved payloads read back verbatim
//! - **Save**: whole-document replacement, empty and large collections
//! - **Isolation**: the two keys never affect each other
//! - **Collections**: typed round trips through the codec
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function
//! that creates a fresh, empty storage instance for each test:
//!
//! ```ignore
//! use pactum_storage::conformance::run_conformance_suite;
//!
//! #[test]
//! fn memory_conformance() {
//!     let report = run_conformance_suite(MemoryStorage::new);
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod collection;
mod isolation;
mod load;
mod save;

use std::fmt;

use crate::PactumStorage;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "load", "save", "isolation").
    pub category: String,
    /// Test name (e.g. "missing_key_loads_none").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn pass(category: &str, name: &str) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: true,
            message: None,
        }
    }

    fn fail(category: &str, name: &str, msg: String) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: false,
            message: Some(msg),
        }
    }

    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::pass(category, name),
            Err(msg) => Self::fail(category, name, msg),
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// storage instance, ensuring test isolation.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: PactumStorage,
    F: Fn() -> S,
{
    let mut results = Vec::new();

    results.extend(load::run_load_tests(&factory));
    results.extend(save::run_save_tests(&factory));
    results.extend(isolation::run_isolation_tests(&factory));
    results.extend(collection::run_collection_tests(&factory));

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// A contract-shaped JSON array with `n` records.
fn make_contract_payload(n: usize) -> String {
    let records: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "id": format!("contract-{i}"),
                "name": format!("Contract {i}"),
                "blueprintId": "blueprint-1",
                "fields": [],
                "status": "Created",
                "createdAt": "2025-01-01T00:00:00Z",
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

/// A blueprint-shaped JSON array with `n` records.
fn make_blueprint_payload(n: usize) -> String {
    let records: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "id": format!("blueprint-{i}"),
                "name": format!("Blueprint {i}"),
                "fields": [{
                    "id": format!("field-{i}"),
                    "label": "Signer",
                    "type": "text",
                    "position": {"x": 50, "y": 50},
                }],
                "createdAt": "2025-01-01T00:00:00Z",
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

fn load_str<S: PactumStorage>(s: &S, key: crate::StorageKey) -> Result<Option<String>, String> {
    s.load(key).map_err(|e| e.to_string())
}
