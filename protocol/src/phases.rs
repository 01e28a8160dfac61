//! Workflow phases and their lifecycle statuses.

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

use crate::date_types::DateType;

/// The fixed review workflow, in order.
///
/// An application moves through these phases front to back. Concept is the
/// only phase that may be skipped; every other phase either completes or the
/// application stalls there.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    #[strum(to_string = "Concept")]
    Concept,
    #[strum(to_string = "State Application")]
    StateApplication,
    #[strum(to_string = "Completeness")]
    Completeness,
    #[strum(to_string = "Federal Comment")]
    FederalComment,
    #[strum(to_string = "SME/FRT")]
    SmeFrt,
    #[strum(to_string = "OGC & OMB")]
    OgcOmb,
    #[strum(to_string = "Approval Package")]
    ApprovalPackage,
    #[strum(to_string = "Post Approval")]
    PostApproval,
}

impl PhaseName {
    /// All phases in workflow order.
    pub const fn all() -> [Self; 8] {
        [
            Self::Concept,
            Self::StateApplication,
            Self::Completeness,
            Self::FederalComment,
            Self::SmeFrt,
            Self::OgcOmb,
            Self::ApprovalPackage,
            Self::PostApproval,
        ]
    }

    /// Phases earlier in the workflow than this one, in workflow order.
    pub const fn prior_phases(self) -> &'static [Self] {
        match self {
            Self::Concept => &[],
            Self::StateApplication => &[Self::Concept],
            Self::Completeness => &[Self::Concept, Self::StateApplication],
            Self::FederalComment => &[Self::Concept, Self::StateApplication, Self::Completeness],
            Self::SmeFrt => &[
                Self::Concept,
                Self::StateApplication,
                Self::Completeness,
                Self::FederalComment,
            ],
            Self::OgcOmb => &[
                Self::Concept,
                Self::StateApplication,
                Self::Completeness,
                Self::FederalComment,
                Self::SmeFrt,
            ],
            Self::ApprovalPackage => &[
                Self::Concept,
                Self::StateApplication,
                Self::Completeness,
                Self::FederalComment,
                Self::SmeFrt,
                Self::OgcOmb,
            ],
            Self::PostApproval => &[
                Self::Concept,
                Self::StateApplication,
                Self::Completeness,
                Self::FederalComment,
                Self::SmeFrt,
                Self::OgcOmb,
                Self::ApprovalPackage,
            ],
        }
    }

    /// The date recorded when this phase starts, where the workflow tracks
    /// one. Federal Comment and Post Approval carry no start date of their
    /// own.
    pub const fn start_date_type(self) -> Option<DateType> {
        match self {
            Self::Concept => Some(DateType::ConceptStartDate),
            Self::StateApplication => Some(DateType::StateApplicationStartDate),
            Self::Completeness => Some(DateType::CompletenessStartDate),
            Self::FederalComment => None,
            Self::SmeFrt => Some(DateType::SdgPreparationStartDate),
            Self::OgcOmb => Some(DateType::OgcOmbReviewStartDate),
            Self::ApprovalPackage => Some(DateType::ApprovalPackageStartDate),
            Self::PostApproval => None,
        }
    }

    /// Concept is the only skippable phase.
    pub const fn is_skippable(self) -> bool {
        matches!(self, Self::Concept)
    }
}

/// Lifecycle status of one phase for one application.
///
/// An application with no recorded status for a phase has not started it,
/// which is what the `Default` impl encodes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    #[strum(to_string = "Not Started")]
    NotStarted,
    #[strum(to_string = "Started")]
    Started,
    #[strum(to_string = "Completed")]
    Completed,
    #[strum(to_string = "Skipped")]
    Skipped,
}
