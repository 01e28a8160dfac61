//! Document-triggered phase starts.
//!
//! Uploading a workflow-relevant document auto-starts the phase it belongs
//! to. The engine resolves the owning phase, asks the caller to perform the
//! transition, and proposes the phase's canonical start date for
//! persistence; re-uploads are no-ops because the transition callback
//! reports that nothing changed.

use serde::Deserialize;
use serde::Serialize;
use tracing::error;
use tracing::info;

use caseflow_protocol::date_types::DateType;
use caseflow_protocol::documents::DocumentType;
use caseflow_protocol::eastern::EasternDateTime;
use caseflow_protocol::eastern::EasternNow;
use caseflow_protocol::phases::PhaseName;

use crate::error::ConfigError;

/// The document → phase association table.
///
/// [`PhaseDocumentCatalog::default`] is the canonical mapping; deployments
/// may load an overriding table from configuration, which is exactly why
/// [`PhaseDocumentCatalog::phase_for`] refuses anything but a one-to-one
/// answer instead of trusting the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDocumentCatalog {
    associations: Vec<(DocumentType, PhaseName)>,
}

impl Default for PhaseDocumentCatalog {
    fn default() -> Self {
        Self {
            associations: vec![
                (DocumentType::PreSubmission, PhaseName::Concept),
                (DocumentType::StateApplication, PhaseName::StateApplication),
                (
                    DocumentType::ApplicationCompletenessLetter,
                    PhaseName::Completeness,
                ),
                (
                    DocumentType::InternalCompletenessReviewForm,
                    PhaseName::Completeness,
                ),
                (DocumentType::PaymentRatioAnalysis, PhaseName::SmeFrt),
                (DocumentType::FinalBnWorksheet, PhaseName::ApprovalPackage),
                (
                    DocumentType::FinalBudgetNeutralityFormulationWorkbook,
                    PhaseName::ApprovalPackage,
                ),
                (DocumentType::QAndA, PhaseName::ApprovalPackage),
                (
                    DocumentType::SpecialTermsAndConditions,
                    PhaseName::ApprovalPackage,
                ),
                (
                    DocumentType::FormalOmbPolicyConcurrenceEmail,
                    PhaseName::ApprovalPackage,
                ),
                (DocumentType::ApprovalLetter, PhaseName::ApprovalPackage),
                (DocumentType::SignedDecisionMemo, PhaseName::ApprovalPackage),
            ],
        }
    }
}

impl PhaseDocumentCatalog {
    /// Build a catalog from explicit associations. Validity is checked at
    /// lookup time, not construction time, so a bad table is loadable but
    /// unusable.
    pub fn new(associations: Vec<(DocumentType, PhaseName)>) -> Self {
        Self { associations }
    }

    /// The phase a document type belongs to.
    ///
    /// Anything but exactly one associated phase is a configuration bug,
    /// reported as [`ConfigError::DocumentPhaseMapping`].
    pub fn phase_for(&self, document_type: DocumentType) -> Result<PhaseName, ConfigError> {
        let mut phases = self
            .associations
            .iter()
            .filter(|(candidate, _)| *candidate == document_type)
            .map(|&(_, phase)| phase);
        match (phases.next(), phases.next()) {
            (Some(phase), None) => Ok(phase),
            (None, _) => {
                error!(%document_type, "document type mapped to no phase");
                Err(ConfigError::DocumentPhaseMapping {
                    document_type,
                    phase_count: 0,
                })
            }
            (Some(_), Some(_)) => {
                let phase_count = 2 + phases.count();
                error!(%document_type, phase_count, "document type mapped to several phases");
                Err(ConfigError::DocumentPhaseMapping {
                    document_type,
                    phase_count,
                })
            }
        }
    }
}

/// A date value the engine wants persisted, subject to normal validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ProposedDate {
    pub date_type: DateType,
    pub value: EasternDateTime,
}

/// React to a newly uploaded document by starting its phase.
///
/// `start_phase` performs the actual transition and reports whether
/// anything changed; reporting `false` (the phase was already started or
/// beyond) makes the whole call a no-op, which is what keeps re-uploads
/// idempotent. On a real start, the phase's canonical start date comes back
/// as a proposal dated to today's Eastern start of day, for the caller to
/// validate and persist. Phases without a canonical start date start
/// without proposing anything.
pub fn start_phase_by_document<F>(
    application_id: &str,
    document_type: DocumentType,
    now: EasternNow,
    catalog: &PhaseDocumentCatalog,
    mut start_phase: F,
) -> Result<Option<ProposedDate>, ConfigError>
where
    F: FnMut(PhaseName) -> bool,
{
    let phase = catalog.phase_for(document_type)?;
    if !start_phase(phase) {
        return Ok(None);
    }
    info!(
        application_id,
        %document_type,
        %phase,
        "phase started by document upload"
    );
    let Some(date_type) = phase.start_date_type() else {
        return Ok(None);
    };
    Ok(Some(ProposedDate {
        date_type,
        value: now.start_of_day,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use chrono::Utc;
    use maplit::btreemap;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn fixed_now() -> EasternNow {
        let instant = DateTime::parse_from_rfc3339("2025-01-10T15:00:00.000Z")
            .expect("valid rfc3339")
            .with_timezone(&Utc);
        EasternNow::for_instant(instant).expect("captures")
    }

    #[test]
    fn default_catalog_maps_every_document_type_to_one_phase() {
        let catalog = PhaseDocumentCatalog::default();
        let expected = btreemap! {
            DocumentType::PreSubmission => PhaseName::Concept,
            DocumentType::StateApplication => PhaseName::StateApplication,
            DocumentType::ApplicationCompletenessLetter => PhaseName::Completeness,
            DocumentType::InternalCompletenessReviewForm => PhaseName::Completeness,
            DocumentType::PaymentRatioAnalysis => PhaseName::SmeFrt,
            DocumentType::FinalBnWorksheet => PhaseName::ApprovalPackage,
            DocumentType::FinalBudgetNeutralityFormulationWorkbook => PhaseName::ApprovalPackage,
            DocumentType::QAndA => PhaseName::ApprovalPackage,
            DocumentType::SpecialTermsAndConditions => PhaseName::ApprovalPackage,
            DocumentType::FormalOmbPolicyConcurrenceEmail => PhaseName::ApprovalPackage,
            DocumentType::ApprovalLetter => PhaseName::ApprovalPackage,
            DocumentType::SignedDecisionMemo => PhaseName::ApprovalPackage,
        };
        for document_type in DocumentType::iter() {
            assert_eq!(
                catalog.phase_for(document_type),
                Ok(expected[&document_type]),
                "{document_type:?}"
            );
        }
    }

    #[test]
    fn first_upload_starts_the_phase_and_proposes_its_start_date() {
        let now = fixed_now();
        let mut started = Vec::new();
        let proposal = start_phase_by_document(
            "app-123",
            DocumentType::PreSubmission,
            now,
            &PhaseDocumentCatalog::default(),
            |phase| {
                started.push(phase);
                true
            },
        )
        .expect("resolves");
        assert_eq!(started, vec![PhaseName::Concept]);
        assert_eq!(
            proposal,
            Some(ProposedDate {
                date_type: DateType::ConceptStartDate,
                value: now.start_of_day,
            })
        );
        assert_eq!(
            proposal.map(|p| p.value.to_string()),
            Some("2025-01-10T00:00:00.000-05:00".to_string())
        );
    }

    #[test]
    fn reupload_is_a_no_op() {
        let mut calls = 0;
        let proposal = start_phase_by_document(
            "app-123",
            DocumentType::StateApplication,
            fixed_now(),
            &PhaseDocumentCatalog::default(),
            |_| {
                calls += 1;
                false
            },
        )
        .expect("resolves");
        assert_eq!(calls, 1);
        assert_eq!(proposal, None);
    }

    #[test]
    fn unmapped_document_type_is_a_config_error() {
        let catalog = PhaseDocumentCatalog::new(vec![(
            DocumentType::PreSubmission,
            PhaseName::Concept,
        )]);
        let result = start_phase_by_document(
            "app-123",
            DocumentType::ApprovalLetter,
            fixed_now(),
            &catalog,
            |_| panic!("must not start a phase for an unmapped document"),
        );
        assert_eq!(
            result,
            Err(ConfigError::DocumentPhaseMapping {
                document_type: DocumentType::ApprovalLetter,
                phase_count: 0,
            })
        );
    }

    #[test]
    fn doubly_mapped_document_type_is_a_config_error() {
        let catalog = PhaseDocumentCatalog::new(vec![
            (DocumentType::QAndA, PhaseName::ApprovalPackage),
            (DocumentType::QAndA, PhaseName::Completeness),
        ]);
        assert_eq!(
            catalog.phase_for(DocumentType::QAndA),
            Err(ConfigError::DocumentPhaseMapping {
                document_type: DocumentType::QAndA,
                phase_count: 2,
            })
        );
    }

    #[test]
    fn catalog_round_trips_through_serde() {
        let catalog = PhaseDocumentCatalog::default();
        let json = serde_json::to_string(&catalog).expect("serializes");
        let back: PhaseDocumentCatalog = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, catalog);

        // A hand-written override table loads fine; the exactly-one guard
        // only trips at lookup time.
        let overridden: PhaseDocumentCatalog = serde_json::from_str(
            r#"{"associations":[["q_and_a","approval_package"],["q_and_a","completeness"]]}"#,
        )
        .expect("deserializes");
        assert!(matches!(
            overridden.phase_for(DocumentType::QAndA),
            Err(ConfigError::DocumentPhaseMapping { phase_count: 2, .. })
        ));
        assert!(matches!(
            overridden.phase_for(DocumentType::PreSubmission),
            Err(ConfigError::DocumentPhaseMapping { phase_count: 0, .. })
        ));
    }

    #[test]
    fn a_phase_without_a_start_date_starts_without_a_proposal() {
        // No canonical document maps to Federal Comment; wire one up to
        // prove the starter copes with start-date-less phases.
        let catalog = PhaseDocumentCatalog::new(vec![(
            DocumentType::PaymentRatioAnalysis,
            PhaseName::FederalComment,
        )]);
        let proposal = start_phase_by_document(
            "app-123",
            DocumentType::PaymentRatioAnalysis,
            fixed_now(),
            &catalog,
            |_| true,
        )
        .expect("resolves");
        assert_eq!(proposal, None);
    }
}
