//! Issue and report model.
//!
//! A validation pass produces a tree of [`ValidationReport`]s. Every node has a
//! category name, the issues detected directly in that category (in detection
//! order) and child reports. Reports are assembled bottom-up and are never
//! mutated once built: all contents go through the constructor.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Severity
// ============================================================================

/// Severity of a validation issue.
///
/// Ordered from least to most severe so that `max()` yields the worst
/// severity of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationSeverity {
    /// Advisory information.
    Info,
    /// Advisory warning; the model can still run.
    Warning,
    /// Blocks execution of the model.
    Error,
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationSeverity::Info => "info",
            ValidationSeverity::Warning => "warning",
            ValidationSeverity::Error => "error",
        };
        f.write_str(label)
    }
}

// ============================================================================
// Feature references
// ============================================================================

/// Kind of model entity an issue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Model,
    ModelDefinition,
    Network,
    CoordinateSystem,
    Node,
    Branch,
    Structure,
    CompositeStructure,
    CrossSection,
    CrossSectionDefinition,
    Retention,
    Compartment,
    Route,
    Discretization,
    GridPoint,
    Boundary,
    BoundaryCondition,
    Lateral,
    TimeFrame,
    OutputSettings,
    Channel,
    SedimentFraction,
    WindField,
    MeteoField,
    ThinDam,
    SourceSink,
    FixedWeir,
    Weir,
    Pump,
    Gate,
    Embankment,
    Link,
    Validator,
}

/// Reference to a model entity by kind and name.
///
/// Used both as the subject of an issue and as navigation references. The
/// engine never dereferences these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureRef {
    /// Entity kind.
    pub kind: FeatureKind,
    /// Entity name as known in the model.
    pub name: String,
}

impl FeatureRef {
    /// Create a reference.
    pub fn new(kind: FeatureKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for FeatureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}'", self.kind, self.name)
    }
}

// ============================================================================
// Issues
// ============================================================================

/// A single finding of a validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    subject: FeatureRef,
    severity: ValidationSeverity,
    message: String,
    references: Vec<FeatureRef>,
}

impl ValidationIssue {
    /// Create an issue without navigation references.
    pub fn new(subject: FeatureRef, severity: ValidationSeverity, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "validation issue without message");
        Self {
            subject,
            severity,
            message,
            references: Vec::new(),
        }
    }

    /// Shorthand for an [`ValidationSeverity::Error`] issue.
    pub fn error(subject: FeatureRef, message: impl Into<String>) -> Self {
        Self::new(subject, ValidationSeverity::Error, message)
    }

    /// Shorthand for a [`ValidationSeverity::Warning`] issue.
    pub fn warning(subject: FeatureRef, message: impl Into<String>) -> Self {
        Self::new(subject, ValidationSeverity::Warning, message)
    }

    /// Shorthand for an [`ValidationSeverity::Info`] issue.
    pub fn info(subject: FeatureRef, message: impl Into<String>) -> Self {
        Self::new(subject, ValidationSeverity::Info, message)
    }

    /// Attach one navigation reference.
    pub fn with_reference(mut self, reference: FeatureRef) -> Self {
        self.references.push(reference);
        self
    }

    /// Attach several navigation references.
    pub fn with_references(mut self, references: impl IntoIterator<Item = FeatureRef>) -> Self {
        self.references.extend(references);
        self
    }

    /// The entity this issue is about.
    pub fn subject(&self) -> &FeatureRef {
        &self.subject
    }

    /// Issue severity.
    pub fn severity(&self) -> ValidationSeverity {
        self.severity
    }

    /// Fully formatted message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Entities to navigate to for this issue.
    pub fn references(&self) -> &[FeatureRef] {
        &self.references
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

// ============================================================================
// Reports
// ============================================================================

/// A named node in the validation report tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    name: String,
    issues: Vec<ValidationIssue>,
    sub_reports: Vec<ValidationReport>,
}

impl ValidationReport {
    /// Create a report with its complete contents.
    pub fn new(
        name: impl Into<String>,
        issues: Vec<ValidationIssue>,
        sub_reports: Vec<ValidationReport>,
    ) -> Self {
        Self {
            name: name.into(),
            issues,
            sub_reports,
        }
    }

    /// Create a report without children.
    pub fn leaf(name: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self::new(name, issues, Vec::new())
    }

    /// Create an empty report.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), Vec::new())
    }

    /// Create a report, keeping only the child reports that contain issues.
    pub fn with_non_empty_children(
        name: impl Into<String>,
        issues: Vec<ValidationIssue>,
        sub_reports: Vec<ValidationReport>,
    ) -> Self {
        let sub_reports = sub_reports.into_iter().filter(|r| !r.is_empty()).collect();
        Self::new(name, issues, sub_reports)
    }

    /// Category name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Issues detected directly in this category.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Child reports.
    pub fn sub_reports(&self) -> &[ValidationReport] {
        &self.sub_reports
    }

    /// Find a direct child report by name.
    pub fn sub_report(&self, name: &str) -> Option<&ValidationReport> {
        self.sub_reports.iter().find(|r| r.name == name)
    }

    /// Worst severity in this subtree, `None` when the subtree has no issues.
    pub fn severity(&self) -> Option<ValidationSeverity> {
        let own = self.issues.iter().map(ValidationIssue::severity).max();
        let children = self.sub_reports.iter().filter_map(ValidationReport::severity).max();
        own.max(children)
    }

    /// All issues of the subtree, depth-first in insertion order.
    pub fn all_issues(&self) -> Vec<&ValidationIssue> {
        let mut collected = Vec::with_capacity(self.issues.len());
        self.collect_issues(&mut collected);
        collected
    }

    fn collect_issues<'a>(&'a self, into: &mut Vec<&'a ValidationIssue>) {
        into.extend(self.issues.iter());
        for child in &self.sub_reports {
            child.collect_issues(into);
        }
    }

    fn count(&self, severity: ValidationSeverity) -> usize {
        let own = self.issues.iter().filter(|i| i.severity == severity).count();
        own + self.sub_reports.iter().map(|r| r.count(severity)).sum::<usize>()
    }

    /// Number of errors in the subtree.
    pub fn error_count(&self) -> usize {
        self.count(ValidationSeverity::Error)
    }

    /// Number of warnings in the subtree.
    pub fn warning_count(&self) -> usize {
        self.count(ValidationSeverity::Warning)
    }

    /// Number of informational issues in the subtree.
    pub fn info_count(&self) -> usize {
        self.count(ValidationSeverity::Info)
    }

    /// Total number of issues in the subtree.
    pub fn issue_count(&self) -> usize {
        self.issues.len() + self.sub_reports.iter().map(ValidationReport::issue_count).sum::<usize>()
    }

    /// Whether the subtree holds no issues at all.
    pub fn is_empty(&self) -> bool {
        self.issue_count() == 0
    }

    /// Whether the subtree holds at least one error.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        match self.severity() {
            None => format!("✓ {}: no issues found", self.name),
            Some(ValidationSeverity::Error) => format!(
                "✗ {}: {} error(s), {} warning(s), {} info",
                self.name,
                self.error_count(),
                self.warning_count(),
                self.info_count()
            ),
            Some(_) => format!(
                "✓ {}: valid with {} warning(s), {} info",
                self.name,
                self.warning_count(),
                self.info_count()
            ),
        }
    }
}
