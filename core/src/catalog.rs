//! Per-date-type validation rules.
//!
//! One static row per [`DateType`]: the expected day boundary, the types the
//! value must fall strictly or weakly after, and the types it must sit at an
//! exact calendar offset from. The checker in [`crate::validate`] consumes
//! these rows; nothing here touches stored data.

use caseflow_protocol::date_types::CalendarOffset;
use caseflow_protocol::date_types::DateType;
use caseflow_protocol::date_types::DayBoundary;

/// The rule row for one date type. Slices reference other date types only,
/// never the type the row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTypeRule {
    pub expected_boundary: DayBoundary,
    /// Strictly after each target, compared by instant.
    pub greater_than: &'static [DateType],
    /// At or after each target.
    pub greater_than_or_equal: &'static [DateType],
    /// Exactly at the target plus the given calendar offset.
    pub offset_from: &'static [(DateType, CalendarOffset)],
}

/// Base row shared by every plain start-of-day date.
const START_OF_DAY: DateTypeRule = DateTypeRule {
    expected_boundary: DayBoundary::StartOfDay,
    greater_than: &[],
    greater_than_or_equal: &[],
    offset_from: &[],
};

/// The completeness review is due 15 calendar days after submission, at end
/// of day: a 16-day window counted inclusively of the submission day.
const SUBMITTED_TO_COMPLETENESS_DUE: CalendarOffset = CalendarOffset::days_at_end_of_day(15);

/// The federal comment period opens the day after the submission is deemed
/// complete.
const DEEMED_COMPLETE_TO_COMMENT_START: CalendarOffset = CalendarOffset::days_at_start_of_day(1);

/// The federal comment period spans 31 calendar days inclusive, closing at
/// end of day.
const COMMENT_START_TO_COMMENT_END: CalendarOffset = CalendarOffset::days_at_end_of_day(30);

/// Look up the rule row for a date type.
///
/// The match is exhaustive with no default arm, so a new `DateType` cannot
/// ship without a decided rule row; an unmapped type is a compile error
/// rather than a runtime failure.
pub const fn rules_for(date_type: DateType) -> DateTypeRule {
    match date_type {
        DateType::ConceptCompletionDate => DateTypeRule {
            greater_than: &[DateType::ConceptStartDate],
            ..START_OF_DAY
        },
        DateType::ConceptSkippedDate => DateTypeRule {
            greater_than_or_equal: &[DateType::ConceptStartDate],
            ..START_OF_DAY
        },
        DateType::StateApplicationCompletionDate => DateTypeRule {
            greater_than: &[DateType::StateApplicationStartDate],
            greater_than_or_equal: &[DateType::ConceptCompletionDate],
            ..START_OF_DAY
        },
        DateType::StateApplicationDeemedComplete => DateTypeRule {
            greater_than: &[DateType::StateApplicationSubmittedDate],
            ..START_OF_DAY
        },
        DateType::CompletenessReviewDueDate => DateTypeRule {
            expected_boundary: DayBoundary::EndOfDay,
            offset_from: &[(
                DateType::StateApplicationSubmittedDate,
                SUBMITTED_TO_COMPLETENESS_DUE,
            )],
            ..START_OF_DAY
        },
        DateType::CompletenessCompletionDate => DateTypeRule {
            greater_than: &[DateType::CompletenessStartDate],
            greater_than_or_equal: &[DateType::StateApplicationCompletionDate],
            ..START_OF_DAY
        },
        DateType::FederalCommentPeriodStartDate => DateTypeRule {
            offset_from: &[(
                DateType::StateApplicationDeemedComplete,
                DEEMED_COMPLETE_TO_COMMENT_START,
            )],
            ..START_OF_DAY
        },
        DateType::FederalCommentPeriodEndDate => DateTypeRule {
            expected_boundary: DayBoundary::EndOfDay,
            offset_from: &[(
                DateType::FederalCommentPeriodStartDate,
                COMMENT_START_TO_COMMENT_END,
            )],
            ..START_OF_DAY
        },
        DateType::SdgPreparationCompletionDate => DateTypeRule {
            greater_than_or_equal: &[DateType::SdgPreparationStartDate],
            ..START_OF_DAY
        },
        DateType::OgcOmbReviewCompletionDate => DateTypeRule {
            greater_than_or_equal: &[DateType::OgcOmbReviewStartDate],
            ..START_OF_DAY
        },
        DateType::ApprovalPackageCompletionDate => DateTypeRule {
            greater_than_or_equal: &[DateType::ApprovalPackageStartDate],
            ..START_OF_DAY
        },
        // Everything else is a plain start-of-day date with no relational
        // rules.
        DateType::ConceptStartDate
        | DateType::PreSubmissionSubmittedDate
        | DateType::StateApplicationStartDate
        | DateType::StateApplicationSubmittedDate
        | DateType::CompletenessStartDate
        | DateType::SdgPreparationStartDate
        | DateType::ExpectedApprovalDate
        | DateType::SmeReviewDate
        | DateType::FrtInitialMeetingDate
        | DateType::BnpmtInitialMeetingDate
        | DateType::OgcOmbReviewStartDate
        | DateType::OgcReviewComplete
        | DateType::OmbReviewComplete
        | DateType::PoOgdSignOff
        | DateType::ApprovalPackageStartDate
        | DateType::ApplicationDetailsMarkedCompleteDate
        | DateType::ApplicationDemonstrationTypesMarkedCompleteDate => START_OF_DAY,
    }
}
