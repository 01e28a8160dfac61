//! Error taxonomies for the validation and phase-transition engine.
//!
//! Three separate categories because callers react differently to each.
//! [`ValidationError`] and [`PhaseTransitionError`] are recoverable: they
//! surface to whoever is editing a date or driving the workflow, and the
//! display strings are the operator-facing text. [`ConfigError`] means the
//! engine's own wiring is wrong; it is fatal and logged at error level
//! rather than shown as a user mistake.

use caseflow_protocol::date_types::CalendarOffset;
use caseflow_protocol::date_types::DateType;
use caseflow_protocol::date_types::DayBoundary;
use caseflow_protocol::documents::DocumentType;
use caseflow_protocol::eastern::EasternDateTime;
use caseflow_protocol::eastern::TimeError;
use caseflow_protocol::phases::PhaseName;
use caseflow_protocol::phases::PhaseStatus;
use thiserror::Error;

/// A proposed date value violates its catalog rule.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The input {date_type} must be a {expected} date in Eastern time, but it is {actual}")]
    BoundaryMismatch {
        date_type: DateType,
        expected: DayBoundary,
        actual: EasternDateTime,
    },

    #[error(
        "The input {date_type} must be greater than {target}, which has value {target_value}, but it is {value}"
    )]
    NotAfter {
        date_type: DateType,
        target: DateType,
        target_value: EasternDateTime,
        value: EasternDateTime,
    },

    #[error(
        "The input {date_type} must be greater than or equal to {target}, which has value {target_value}, but it is {value}"
    )]
    NotAfterOrEqual {
        date_type: DateType,
        target: DateType,
        target_value: EasternDateTime,
        value: EasternDateTime,
    },

    #[error(
        "The input {date_type} must be {offset} after {target}, so the expected value is {expected}, but it is {actual}"
    )]
    OffsetMismatch {
        date_type: DateType,
        target: DateType,
        offset: CalendarOffset,
        expected: EasternDateTime,
        actual: EasternDateTime,
    },

    #[error("{target} was requested while validating {date_type}, but it is not set")]
    MissingDependency { date_type: DateType, target: DateType },

    #[error(transparent)]
    Time(#[from] TimeError),
}

/// A phase may not complete, skip or start yet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhaseTransitionError {
    #[error(
        "The {phase} phase for application {application_id} has status {status}; cannot complete a phase unless it has status of Started"
    )]
    NotStarted {
        application_id: String,
        phase: PhaseName,
        status: PhaseStatus,
    },

    #[error(
        "The {phase} phase for application {application_id} has status {status}; cannot skip a phase unless it has status of Started"
    )]
    SkipNotStarted {
        application_id: String,
        phase: PhaseName,
        status: PhaseStatus,
    },

    #[error("The {phase} phase for application {application_id} cannot be skipped")]
    NotSkippable {
        application_id: String,
        phase: PhaseName,
    },

    #[error(
        "Completing the {phase} phase for application {application_id} requires the date {date_type} to exist, but it does not"
    )]
    MissingDate {
        application_id: String,
        phase: PhaseName,
        date_type: DateType,
    },

    #[error(
        "Completing the {phase} phase for application {application_id} requires at least one document of type {document_type} to exist, but none do"
    )]
    MissingDocument {
        application_id: String,
        phase: PhaseName,
        document_type: DocumentType,
    },

    #[error(
        "Completing the {phase} phase for application {application_id} requires the {prior} phase to be status Completed, but it is {status}"
    )]
    PriorPhaseIncomplete {
        application_id: String,
        phase: PhaseName,
        prior: PhaseName,
        status: PhaseStatus,
    },
}

/// The engine's own wiring is wrong. Unlike the recoverable taxonomies
/// above, this is a deployment bug.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Document type {document_type} is associated with {phase_count} phases, expected exactly 1 phase")]
    DocumentPhaseMapping {
        document_type: DocumentType,
        phase_count: usize,
    },
}
