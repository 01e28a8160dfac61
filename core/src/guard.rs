//! Phase-transition preconditions.
//!
//! A phase may only complete when it is Started and its completion row is
//! satisfied: required dates recorded, required documents uploaded, required
//! prior phases Completed. Concept is additionally skippable, again only
//! from Started. The guard is pure over a borrowed snapshot; it never
//! fetches and never mutates.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use caseflow_protocol::date_types::DateType;
use caseflow_protocol::documents::DocumentType;
use caseflow_protocol::phases::PhaseName;
use caseflow_protocol::phases::PhaseStatus;
use tracing::warn;

use crate::error::PhaseTransitionError;
use crate::validate::ApplicationDateMap;

/// Recorded status per phase; a phase absent from the map has not started.
pub type PhaseStatusMap = BTreeMap<PhaseName, PhaseStatus>;

/// Uploaded documents keyed by the phase they belong to; an absent phase has
/// no documents.
pub type DocumentsByPhase = BTreeMap<PhaseName, BTreeSet<DocumentType>>;

/// Everything the guard consults about one application.
#[derive(Clone, Copy, Debug)]
pub struct ApplicationSnapshot<'a> {
    pub application_id: &'a str,
    pub dates: &'a ApplicationDateMap,
    pub statuses: &'a PhaseStatusMap,
    pub documents: &'a DocumentsByPhase,
}

impl ApplicationSnapshot<'_> {
    fn status_of(&self, phase: PhaseName) -> PhaseStatus {
        self.statuses.get(&phase).copied().unwrap_or_default()
    }

    fn has_date(&self, date_type: DateType) -> bool {
        self.dates.contains_key(&date_type)
    }

    fn has_document(&self, phase: PhaseName, document_type: DocumentType) -> bool {
        self.documents
            .get(&phase)
            .is_some_and(|uploaded| uploaded.contains(&document_type))
    }
}

/// A phase can only complete out of Started; Not Started, Completed and
/// Skipped all reject.
pub fn check_started_for_completion(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
) -> Result<(), PhaseTransitionError> {
    let status = snapshot.status_of(phase);
    if status == PhaseStatus::Started {
        Ok(())
    } else {
        Err(PhaseTransitionError::NotStarted {
            application_id: snapshot.application_id.to_string(),
            phase,
            status,
        })
    }
}

/// Skipping is reserved for Concept, and only out of Started.
pub fn check_started_for_skip(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
) -> Result<(), PhaseTransitionError> {
    if !phase.is_skippable() {
        return Err(PhaseTransitionError::NotSkippable {
            application_id: snapshot.application_id.to_string(),
            phase,
        });
    }
    let status = snapshot.status_of(phase);
    if status == PhaseStatus::Started {
        Ok(())
    } else {
        Err(PhaseTransitionError::SkipNotStarted {
            application_id: snapshot.application_id.to_string(),
            phase,
            status,
        })
    }
}

pub fn check_date_exists(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
    date_type: DateType,
) -> Result<(), PhaseTransitionError> {
    if snapshot.has_date(date_type) {
        Ok(())
    } else {
        Err(PhaseTransitionError::MissingDate {
            application_id: snapshot.application_id.to_string(),
            phase,
            date_type,
        })
    }
}

pub fn check_document_exists(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
    document_type: DocumentType,
) -> Result<(), PhaseTransitionError> {
    if snapshot.has_document(phase, document_type) {
        Ok(())
    } else {
        Err(PhaseTransitionError::MissingDocument {
            application_id: snapshot.application_id.to_string(),
            phase,
            document_type,
        })
    }
}

/// A prior phase satisfies the requirement only when Completed; Skipped does
/// not count.
pub fn check_prior_phase_complete(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
    prior: PhaseName,
) -> Result<(), PhaseTransitionError> {
    let status = snapshot.status_of(prior);
    if status == PhaseStatus::Completed {
        Ok(())
    } else {
        Err(PhaseTransitionError::PriorPhaseIncomplete {
            application_id: snapshot.application_id.to_string(),
            phase,
            prior,
            status,
        })
    }
}

/// What a phase needs before it may complete, beyond being Started.
struct CompletionRule {
    required_dates: &'static [DateType],
    required_documents: &'static [DocumentType],
    required_prior_phases: &'static [PhaseName],
}

const NO_FURTHER_VALIDATION: CompletionRule = CompletionRule {
    required_dates: &[],
    required_documents: &[],
    required_prior_phases: &[],
};

/// Exhaustive with no default arm: a new phase cannot ship without a
/// decided completion row.
const fn completion_rule(phase: PhaseName) -> CompletionRule {
    match phase {
        PhaseName::Concept => CompletionRule {
            required_dates: &[DateType::PreSubmissionSubmittedDate],
            required_documents: &[DocumentType::PreSubmission],
            required_prior_phases: &[],
        },
        PhaseName::StateApplication => CompletionRule {
            required_dates: &[
                DateType::StateApplicationSubmittedDate,
                DateType::CompletenessReviewDueDate,
            ],
            required_documents: &[DocumentType::StateApplication],
            required_prior_phases: &[],
        },
        PhaseName::Completeness => CompletionRule {
            required_dates: &[
                DateType::StateApplicationDeemedComplete,
                DateType::FederalCommentPeriodStartDate,
                DateType::FederalCommentPeriodEndDate,
            ],
            required_documents: &[
                DocumentType::ApplicationCompletenessLetter,
                DocumentType::InternalCompletenessReviewForm,
            ],
            required_prior_phases: &[PhaseName::StateApplication],
        },
        PhaseName::FederalComment => NO_FURTHER_VALIDATION,
        PhaseName::SmeFrt => CompletionRule {
            required_dates: &[
                DateType::ExpectedApprovalDate,
                DateType::SmeReviewDate,
                DateType::FrtInitialMeetingDate,
                DateType::BnpmtInitialMeetingDate,
            ],
            required_documents: &[],
            required_prior_phases: &[
                PhaseName::StateApplication,
                PhaseName::Completeness,
                PhaseName::FederalComment,
            ],
        },
        PhaseName::OgcOmb => CompletionRule {
            required_dates: &[
                DateType::OgcReviewComplete,
                DateType::OmbReviewComplete,
                DateType::PoOgdSignOff,
            ],
            required_documents: &[],
            required_prior_phases: &[
                PhaseName::StateApplication,
                PhaseName::Completeness,
                PhaseName::FederalComment,
                PhaseName::SmeFrt,
            ],
        },
        PhaseName::ApprovalPackage => CompletionRule {
            required_dates: &[],
            required_documents: &[
                DocumentType::FinalBudgetNeutralityFormulationWorkbook,
                DocumentType::QAndA,
                DocumentType::SpecialTermsAndConditions,
                DocumentType::FormalOmbPolicyConcurrenceEmail,
                DocumentType::ApprovalLetter,
                DocumentType::SignedDecisionMemo,
            ],
            required_prior_phases: &[
                PhaseName::StateApplication,
                PhaseName::Completeness,
                PhaseName::FederalComment,
                PhaseName::SmeFrt,
                PhaseName::OgcOmb,
            ],
        },
        PhaseName::PostApproval => CompletionRule {
            required_dates: &[
                DateType::ApplicationDetailsMarkedCompleteDate,
                DateType::ApplicationDemonstrationTypesMarkedCompleteDate,
            ],
            required_documents: &[],
            required_prior_phases: &[
                PhaseName::StateApplication,
                PhaseName::Completeness,
                PhaseName::FederalComment,
                PhaseName::SmeFrt,
                PhaseName::OgcOmb,
                PhaseName::ApprovalPackage,
            ],
        },
    }
}

/// Run every completion precondition for `phase`; the first failure wins.
///
/// The started check always runs first, even for phases whose row needs
/// nothing further, so a Not Started Federal Comment phase still cannot
/// complete. Within the row: dates in listed order, then documents, then
/// prior phases.
pub fn check_phase_completion(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
) -> Result<(), PhaseTransitionError> {
    let result = completion_checks(snapshot, phase);
    if let Err(error) = &result {
        warn!(
            application_id = snapshot.application_id,
            %phase,
            %error,
            "phase completion rejected"
        );
    }
    result
}

fn completion_checks(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
) -> Result<(), PhaseTransitionError> {
    check_started_for_completion(snapshot, phase)?;
    let rule = completion_rule(phase);
    for &date_type in rule.required_dates {
        check_date_exists(snapshot, phase, date_type)?;
    }
    for &document_type in rule.required_documents {
        check_document_exists(snapshot, phase, document_type)?;
    }
    for &prior in rule.required_prior_phases {
        check_prior_phase_complete(snapshot, phase, prior)?;
    }
    Ok(())
}

/// Run the skip preconditions for `phase`.
pub fn check_phase_skip(
    snapshot: ApplicationSnapshot<'_>,
    phase: PhaseName,
) -> Result<(), PhaseTransitionError> {
    let result = check_started_for_skip(snapshot, phase);
    if let Err(error) = &result {
        warn!(
            application_id = snapshot.application_id,
            %phase,
            %error,
            "phase skip rejected"
        );
    }
    result
}
