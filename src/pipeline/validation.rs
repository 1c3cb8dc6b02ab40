//! Validation engine for summary specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummarySpec`] and collects every diagnostic into a [`ValidationReport`].
//! It never short-circuits on the first error, so users see all problems at
//! once.
//!
//! # Quick start
//!
//! ```rust
//! use rapid_summarize::pipeline::spec::SummarySpec;
//! use rapid_summarize::pipeline::validation::ValidationEngine;
//!
//! let spec = SummarySpec::from_json(r#"{ "v": 1, "budget": { "ratio": 2.0 } }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! assert!(report.has_errors());
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::PipelineSpecError;
use super::spec::{SummarySpec, SPEC_VERSION};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: a severity plus the [`PipelineSpecError`]
/// carrying the code, path, message and hint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: PipelineSpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: PipelineSpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: PipelineSpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &PipelineSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`SummarySpec`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so a long-lived engine can
/// be shared across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"budget_range"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`SummarySpec`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(SpecVersionRule));
        engine.add_rule(Box::new(BudgetRangeRule));
        engine.add_rule(Box::new(BudgetConflictRule));
        engine.add_rule(Box::new(RankParamsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &SummarySpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            let found = rule.validate(spec);
            #[cfg(feature = "tracing")]
            {
                if !found.is_empty() {
                    tracing::debug!(rule = rule.name(), diagnostics = found.len(), "spec rule fired");
                }
            }
            report.diagnostics.extend(found);
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Spec version ────────────────────────────────────────────────────────

struct SpecVersionRule;

impl ValidationRule for SpecVersionRule {
    fn name(&self) -> &str {
        "spec_version"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            PipelineSpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported spec version {}", spec.v),
            )
            .with_hint(format!("Set \"v\" to {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. Budget values in range ──────────────────────────────────────────────

struct BudgetRangeRule;

impl ValidationRule for BudgetRangeRule {
    fn name(&self) -> &str {
        "budget_range"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if spec.budget.word_count == Some(0) {
            out.push(ValidationDiagnostic::error(
                PipelineSpecError::new(
                    ErrorCode::InvalidBudget,
                    "/budget/word_count",
                    "word_count must be a positive integer",
                )
                .with_hint("Remove word_count to use the default of 30 words"),
            ));
        }

        if let Some(ratio) = spec.budget.ratio {
            if !(ratio > 0.0 && ratio <= 1.0) {
                out.push(ValidationDiagnostic::error(
                    PipelineSpecError::new(
                        ErrorCode::InvalidBudget,
                        "/budget/ratio",
                        format!("ratio must be in (0, 1], got {ratio}"),
                    )
                    .with_hint("Use a fraction of the sentences such as 0.2"),
                ));
            }
        }

        out
    }
}

// ─── 3. Both budgets set (word count wins) ──────────────────────────────────

struct BudgetConflictRule;

impl ValidationRule for BudgetConflictRule {
    fn name(&self) -> &str {
        "budget_conflict"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        if spec.budget.word_count.is_some() && spec.budget.ratio.is_some() {
            vec![ValidationDiagnostic::warning(
                PipelineSpecError::new(
                    ErrorCode::ConflictingBudget,
                    "/budget",
                    "both word_count and ratio are set; word_count is used",
                )
                .with_hint("Remove one of the two budget fields"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 4. Ranking parameters in range ─────────────────────────────────────────

struct RankParamsRule;

impl RankParamsRule {
    fn invalid(field: &str, message: String, hint: &str) -> ValidationDiagnostic {
        ValidationDiagnostic::error(
            PipelineSpecError::new(ErrorCode::InvalidValue, format!("/rank/{field}"), message)
                .with_hint(hint),
        )
    }
}

impl ValidationRule for RankParamsRule {
    fn name(&self) -> &str {
        "rank_params"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let rank = &spec.rank;
        let mut out = Vec::new();

        if let Some(d) = rank.damping {
            if !(d > 0.0 && d < 1.0) {
                out.push(Self::invalid(
                    "damping",
                    format!("damping must be between 0 and 1 (exclusive), got {d}"),
                    "The usual value is 0.85",
                ));
            }
        }

        if rank.max_iterations == Some(0) {
            out.push(Self::invalid(
                "max_iterations",
                "max_iterations must be greater than 0".to_string(),
                "Remove max_iterations to use the default of 100",
            ));
        }

        if let Some(t) = rank.threshold {
            if !(t > 0.0 && t.is_finite()) {
                out.push(Self::invalid(
                    "threshold",
                    format!("threshold must be a positive number, got {t}"),
                    "The usual value is 0.0001",
                ));
            }
        }

        if rank.min_significant_terms == Some(0) {
            out.push(Self::invalid(
                "min_significant_terms",
                "min_significant_terms must be greater than 0".to_string(),
                "Remove min_significant_terms to use the default of 2",
            ));
        }

        out
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from the extra fields captured by `#[serde(flatten)]`.
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    PipelineSpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/budget",
            &spec.budget.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/rank",
            &spec.rank.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/stopwords",
            &spec.stopwords.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> SummarySpec {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid specs ────────────────────────────────────────────────────

    #[test]
    fn test_minimal_spec_is_valid() {
        let report = engine().validate(&spec(r#"{ "v": 1 }"#));
        assert!(!report.has_errors());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_full_spec_is_valid() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "budget": { "word_count": 40 },
                "rank": { "damping": 0.85, "max_iterations": 100, "threshold": 0.0001 },
                "stopwords": { "language": "en", "extra": ["sedan"] }
            }"#,
        ));
        assert!(report.diagnostics.is_empty());
    }

    // ─── Individual rules ───────────────────────────────────────────────

    #[test]
    fn test_unsupported_version() {
        let report = engine().validate(&spec(r#"{ "v": 7 }"#));
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::UnsupportedVersion);
        assert_eq!(errors[0].path, "/v");
    }

    #[test]
    fn test_zero_word_count() {
        let report = engine().validate(&spec(r#"{ "v": 1, "budget": { "word_count": 0 } }"#));
        let err = report.errors().next().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidBudget);
        assert_eq!(err.path, "/budget/word_count");
    }

    #[test]
    fn test_ratio_bounds() {
        for bad in ["0", "0.0", "-0.5", "1.01"] {
            let report = engine().validate(&spec(&format!(
                r#"{{ "v": 1, "budget": {{ "ratio": {bad} }} }}"#
            )));
            assert!(report.has_errors(), "ratio {bad} should be rejected");
        }

        let report = engine().validate(&spec(r#"{ "v": 1, "budget": { "ratio": 1.0 } }"#));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_conflicting_budget_is_warning() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "budget": { "word_count": 20, "ratio": 0.5 } }"#,
        ));
        assert!(!report.has_errors());
        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ErrorCode::ConflictingBudget);
    }

    #[test]
    fn test_conflicting_budget_still_checks_ratio() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "budget": { "word_count": 20, "ratio": 3.0 } }"#,
        ));
        assert!(report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_rank_params() {
        let report = engine().validate(&spec(
            r#"{
                "v": 1,
                "rank": {
                    "damping": 0.0,
                    "max_iterations": 0,
                    "threshold": -1.0,
                    "min_significant_terms": 0
                }
            }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/rank/damping",
                "/rank/max_iterations",
                "/rank/threshold",
                "/rank/min_significant_terms"
            ]
        );
        assert!(report.errors().all(|e| e.code == ErrorCode::InvalidValue));
    }

    #[test]
    fn test_unknown_fields_warn_when_lenient() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "extra": 1, "stopwords": { "lang": "en" } }"#,
        ));
        assert!(!report.has_errors());
        let paths: Vec<_> = report.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/extra", "/stopwords/lang"]);
    }

    #[test]
    fn test_unknown_fields_error_when_strict() {
        let report = engine().validate(&spec(
            r#"{ "v": 1, "strict": true, "budget": { "sentences": 3 } }"#,
        ));
        let err = report.errors().next().unwrap();
        assert_eq!(err.code, ErrorCode::UnknownField);
        assert_eq!(err.path, "/budget/sentences");
        assert!(err.hint.is_some());
    }

    #[test]
    fn test_all_problems_reported_at_once() {
        let report = engine().validate(&spec(
            r#"{
                "v": 2,
                "strict": true,
                "bogus": true,
                "budget": { "ratio": 0 },
                "rank": { "damping": 2 }
            }"#,
        ));
        let paths: Vec<_> = report.errors().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/v", "/budget/ratio", "/rank/damping", "/bogus"]);
    }

    // ─── Custom rules ───────────────────────────────────────────────────

    #[test]
    fn test_custom_rule() {
        struct NoGerman;

        impl ValidationRule for NoGerman {
            fn name(&self) -> &str {
                "no_german"
            }

            fn validate(&self, spec: &SummarySpec) -> Vec<ValidationDiagnostic> {
                if spec.stopwords.language.as_deref() == Some("de") {
                    vec![ValidationDiagnostic::error(PipelineSpecError::new(
                        ErrorCode::InvalidValue,
                        "/stopwords/language",
                        "German is not allowed here",
                    ))]
                } else {
                    vec![]
                }
            }
        }

        let mut engine = ValidationEngine::new();
        engine.add_rule(Box::new(NoGerman));

        let report = engine.validate(&spec(r#"{ "v": 1, "stopwords": { "language": "de" } }"#));
        assert!(report.has_errors());
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = engine().validate(&spec(r#"{ "v": 9 }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diag = &json["diagnostics"][0];
        assert_eq!(diag["severity"], "error");
        assert_eq!(diag["code"], "unsupported_version");
        assert_eq!(diag["path"], "/v");
    }
}
