//! Date vocabulary for the application review workflow.
//!
//! Every date attached to an application is one of the closed set of
//! [`DateType`]s below. Each type carries an expected day boundary and may be
//! constrained relative to other types; those rules live in the engine's
//! catalog, not here.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

/// The wall-clock signature a normalized date is expected to carry.
///
/// Start of day is exactly 00:00:00.000 local Eastern time; end of day is
/// exactly 23:59:59.999. There is no tolerance: one millisecond off either
/// signature fails the boundary check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    #[strum(to_string = "Start of Day")]
    StartOfDay,
    #[strum(to_string = "End of Day")]
    EndOfDay,
}

impl DayBoundary {
    /// Hour, minute, second and millisecond of the boundary wall-clock time.
    pub const fn hms_milli(self) -> (u32, u32, u32, u32) {
        match self {
            Self::StartOfDay => (0, 0, 0, 0),
            Self::EndOfDay => (23, 59, 59, 999),
        }
    }
}

/// A calendar-relative offset: whole calendar days, then an absolute
/// wall-clock time on the resulting day.
///
/// Applying an offset never adds a millisecond count to an instant. It moves
/// the calendar date by `days` and then *sets* the wall-clock time to
/// `hours:minutes:seconds.milliseconds`, so crossing a DST transition leaves
/// the expected local time intact.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CalendarOffset {
    pub days: i64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl CalendarOffset {
    /// `days` calendar days later, at start of day.
    pub const fn days_at_start_of_day(days: i64) -> Self {
        Self {
            days,
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
        }
    }

    /// `days` calendar days later, at end of day.
    pub const fn days_at_end_of_day(days: i64) -> Self {
        Self {
            days,
            hours: 23,
            minutes: 59,
            seconds: 59,
            milliseconds: 999,
        }
    }
}

impl fmt::Display for CalendarOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes, {} seconds, {} milliseconds",
            self.days, self.hours, self.minutes, self.seconds, self.milliseconds
        )
    }
}

/// Every date the workflow records for an application, in workflow order.
///
/// The derived ordering follows the declaration order, which keeps batch
/// validation and map iteration deterministic and roughly chronological.
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
pub enum DateType {
    // Concept
    #[strum(to_string = "Concept Start Date")]
    ConceptStartDate,
    #[strum(to_string = "Pre-Submission Submitted Date")]
    PreSubmissionSubmittedDate,
    #[strum(to_string = "Concept Completion Date")]
    ConceptCompletionDate,
    #[strum(to_string = "Concept Skipped Date")]
    ConceptSkippedDate,
    // State Application
    #[strum(to_string = "State Application Start Date")]
    StateApplicationStartDate,
    #[strum(to_string = "State Application Submitted Date")]
    StateApplicationSubmittedDate,
    #[strum(to_string = "State Application Completion Date")]
    StateApplicationCompletionDate,
    /// When the submission was deemed complete for federal review purposes.
    #[strum(to_string = "State Application Deemed Complete")]
    StateApplicationDeemedComplete,
    // Completeness
    #[strum(to_string = "Completeness Start Date")]
    CompletenessStartDate,
    /// Due 15 days after submission, at end of day.
    #[strum(to_string = "Completeness Review Due Date")]
    CompletenessReviewDueDate,
    #[strum(to_string = "Completeness Completion Date")]
    CompletenessCompletionDate,
    // Federal Comment
    #[strum(to_string = "Federal Comment Period Start Date")]
    FederalCommentPeriodStartDate,
    #[strum(to_string = "Federal Comment Period End Date")]
    FederalCommentPeriodEndDate,
    // SME/FRT
    #[strum(to_string = "SDG Preparation Start Date")]
    SdgPreparationStartDate,
    #[strum(to_string = "Expected Approval Date")]
    ExpectedApprovalDate,
    #[strum(to_string = "SME Review Date")]
    SmeReviewDate,
    #[strum(to_string = "FRT Initial Meeting Date")]
    FrtInitialMeetingDate,
    #[strum(to_string = "BN PMT Initial Meeting Date")]
    BnpmtInitialMeetingDate,
    #[strum(to_string = "SDG Preparation Completion Date")]
    SdgPreparationCompletionDate,
    // OGC & OMB
    #[strum(to_string = "OGC & OMB Review Start Date")]
    OgcOmbReviewStartDate,
    #[strum(to_string = "OGC Review Complete")]
    OgcReviewComplete,
    #[strum(to_string = "OMB Review Complete")]
    OmbReviewComplete,
    #[strum(to_string = "PO & OGD Sign-Off")]
    PoOgdSignOff,
    #[strum(to_string = "OGC & OMB Review Completion Date")]
    OgcOmbReviewCompletionDate,
    // Approval Package
    #[strum(to_string = "Approval Package Start Date")]
    ApprovalPackageStartDate,
    #[strum(to_string = "Approval Package Completion Date")]
    ApprovalPackageCompletionDate,
    // Post Approval
    #[strum(to_string = "Application Details Marked Complete Date")]
    ApplicationDetailsMarkedCompleteDate,
    #[strum(to_string = "Application Demonstration Types Marked Complete Date")]
    ApplicationDemonstrationTypesMarkedCompleteDate,
}
