//! Constraint checking for proposed date values.
//!
//! [`validate_one`] checks a single proposal against its catalog row;
//! [`validate_batch`] checks a set of proposals against the stored dates
//! with the proposals taking precedence. Storage stays outside the engine:
//! callers supply referenced values through a `fetch` closure or a map.

use std::collections::BTreeMap;
use std::collections::HashMap;

use caseflow_protocol::date_types::DateType;
use caseflow_protocol::eastern::EasternDateTime;
use tracing::warn;

use crate::catalog::rules_for;
use crate::error::ValidationError;

/// All recorded dates for one application.
pub type ApplicationDateMap = BTreeMap<DateType, EasternDateTime>;

/// Validate one proposed value against its catalog row.
///
/// Check order is fixed and fail-fast: day boundary, then each strict
/// ordering target, then each weak ordering target, then each calendar
/// offset; the first violation wins. `fetch` is consulted at most once per
/// referenced date type per call, however many rule lists mention that
/// type, and a referenced type it cannot supply fails the validation as
/// [`ValidationError::MissingDependency`].
pub fn validate_one<F>(
    date_type: DateType,
    value: EasternDateTime,
    fetch: F,
) -> Result<(), ValidationError>
where
    F: FnMut(DateType) -> Option<EasternDateTime>,
{
    let result = run_checks(date_type, value, fetch);
    if let Err(error) = &result {
        warn!(%date_type, %error, "rejected proposed date");
    }
    result
}

fn run_checks<F>(
    date_type: DateType,
    value: EasternDateTime,
    mut fetch: F,
) -> Result<(), ValidationError>
where
    F: FnMut(DateType) -> Option<EasternDateTime>,
{
    let rule = rules_for(date_type);
    if !value.is_at_boundary(rule.expected_boundary) {
        return Err(ValidationError::BoundaryMismatch {
            date_type,
            expected: rule.expected_boundary,
            actual: value,
        });
    }

    let mut cache: HashMap<DateType, Option<EasternDateTime>> = HashMap::new();
    let mut lookup = |target: DateType| *cache.entry(target).or_insert_with(|| fetch(target));

    for &target in rule.greater_than {
        let target_value =
            lookup(target).ok_or(ValidationError::MissingDependency { date_type, target })?;
        if value <= target_value {
            return Err(ValidationError::NotAfter {
                date_type,
                target,
                target_value,
                value,
            });
        }
    }
    for &target in rule.greater_than_or_equal {
        let target_value =
            lookup(target).ok_or(ValidationError::MissingDependency { date_type, target })?;
        if value < target_value {
            return Err(ValidationError::NotAfterOrEqual {
                date_type,
                target,
                target_value,
                value,
            });
        }
    }
    for &(target, offset) in rule.offset_from {
        let target_value =
            lookup(target).ok_or(ValidationError::MissingDependency { date_type, target })?;
        let expected = target_value.offset_by(&offset)?;
        if value != expected {
            return Err(ValidationError::OffsetMismatch {
                date_type,
                target,
                offset,
                expected,
                actual: value,
            });
        }
    }
    Ok(())
}

/// Validate a batch of proposals against the stored dates.
///
/// The effective view is `existing` overlaid by `proposals`, so one
/// proposal can satisfy another proposal's dependency and a proposal
/// shadows the stored value of its own type. Only proposals are validated;
/// stored dates were validated when they were proposed. Proposals are
/// checked in `DateType` order and the first failure aborts the batch.
pub fn validate_batch(
    proposals: &ApplicationDateMap,
    existing: &ApplicationDateMap,
) -> Result<(), ValidationError> {
    let mut effective = existing.clone();
    effective.extend(proposals);

    for (&date_type, &value) in proposals {
        validate_one(date_type, value, |target| effective.get(&target).copied())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseflow_protocol::date_types::CalendarOffset;
    use caseflow_protocol::date_types::DayBoundary;
    use chrono::NaiveDate;
    use maplit::btreemap;
    use pretty_assertions::assert_eq;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn sod(year: i32, month: u32, d: u32) -> EasternDateTime {
        EasternDateTime::from_local_date(day(year, month, d), DayBoundary::StartOfDay)
            .expect("expands")
    }

    fn eod(year: i32, month: u32, d: u32) -> EasternDateTime {
        EasternDateTime::from_local_date(day(year, month, d), DayBoundary::EndOfDay)
            .expect("expands")
    }

    fn no_deps(_: DateType) -> Option<EasternDateTime> {
        None
    }

    #[test]
    fn plain_start_of_day_date_passes() {
        assert_eq!(
            validate_one(DateType::ConceptStartDate, sod(2025, 1, 1), no_deps),
            Ok(())
        );
    }

    #[test]
    fn wrong_boundary_is_rejected_before_anything_else() {
        // An end-of-day value for a start-of-day type fails on the boundary
        // alone; the fetch closure must not even be consulted.
        let result = validate_one(DateType::ConceptStartDate, eod(2025, 1, 1), |_| {
            panic!("boundary failures must not fetch dependencies")
        });
        assert_eq!(
            result,
            Err(ValidationError::BoundaryMismatch {
                date_type: DateType::ConceptStartDate,
                expected: DayBoundary::StartOfDay,
                actual: eod(2025, 1, 1),
            })
        );

        // Same the other way round: a start-of-day value for the end-of-day
        // due date.
        let result = validate_one(DateType::CompletenessReviewDueDate, sod(2025, 1, 16), |_| {
            panic!("boundary failures must not fetch dependencies")
        });
        assert!(matches!(
            result,
            Err(ValidationError::BoundaryMismatch { .. })
        ));
    }

    #[test]
    fn strict_ordering_rejects_equal_instants() {
        let start = sod(2025, 1, 10);
        let fetch = move |target: DateType| {
            (target == DateType::ConceptStartDate).then_some(start)
        };

        assert_eq!(
            validate_one(DateType::ConceptCompletionDate, sod(2025, 1, 10), fetch),
            Err(ValidationError::NotAfter {
                date_type: DateType::ConceptCompletionDate,
                target: DateType::ConceptStartDate,
                target_value: start,
                value: sod(2025, 1, 10),
            })
        );
        assert_eq!(
            validate_one(DateType::ConceptCompletionDate, sod(2025, 1, 11), fetch),
            Ok(())
        );
    }

    #[test]
    fn weak_ordering_accepts_equal_instants() {
        let start = sod(2025, 1, 10);
        let fetch = move |target: DateType| {
            (target == DateType::ConceptStartDate).then_some(start)
        };

        assert_eq!(
            validate_one(DateType::ConceptSkippedDate, sod(2025, 1, 10), fetch),
            Ok(())
        );
        assert_eq!(
            validate_one(DateType::ConceptSkippedDate, sod(2025, 1, 9), fetch),
            Err(ValidationError::NotAfterOrEqual {
                date_type: DateType::ConceptSkippedDate,
                target: DateType::ConceptStartDate,
                target_value: start,
                value: sod(2025, 1, 9),
            })
        );
    }

    #[test]
    fn completeness_due_accepts_only_the_exact_offset() {
        let submitted = sod(2025, 1, 1);
        let fetch = move |target: DateType| {
            (target == DateType::StateApplicationSubmittedDate).then_some(submitted)
        };

        assert_eq!(
            validate_one(DateType::CompletenessReviewDueDate, eod(2025, 1, 16), fetch),
            Ok(())
        );

        // A day late: valid end-of-day signature, wrong calendar day.
        assert_eq!(
            validate_one(DateType::CompletenessReviewDueDate, eod(2025, 1, 17), fetch),
            Err(ValidationError::OffsetMismatch {
                date_type: DateType::CompletenessReviewDueDate,
                target: DateType::StateApplicationSubmittedDate,
                offset: CalendarOffset::days_at_end_of_day(15),
                expected: eod(2025, 1, 16),
                actual: eod(2025, 1, 17),
            })
        );

        // A day early fails the same way.
        assert!(matches!(
            validate_one(DateType::CompletenessReviewDueDate, eod(2025, 1, 15), fetch),
            Err(ValidationError::OffsetMismatch { .. })
        ));
    }

    #[test]
    fn off_by_one_millisecond_never_passes() {
        // 23:59:59.998 and next-day 00:00:00.000 are the two closest
        // instants to a valid due date; both fail on the boundary check.
        let submitted = sod(2025, 1, 1);
        let fetch = move |target: DateType| {
            (target == DateType::StateApplicationSubmittedDate).then_some(submitted)
        };

        let almost = EasternDateTime::from_utc(
            chrono::DateTime::parse_from_rfc3339("2025-01-17T04:59:59.998Z")
                .expect("valid rfc3339")
                .with_timezone(&chrono::Utc),
        );
        assert_eq!(almost.to_string(), "2025-01-16T23:59:59.998-05:00");
        assert!(matches!(
            validate_one(DateType::CompletenessReviewDueDate, almost, fetch),
            Err(ValidationError::BoundaryMismatch { .. })
        ));

        assert!(matches!(
            validate_one(DateType::CompletenessReviewDueDate, sod(2025, 1, 17), fetch),
            Err(ValidationError::BoundaryMismatch { .. })
        ));
    }

    #[test]
    fn due_date_is_stable_across_spring_forward() {
        let submitted = sod(2025, 2, 24);
        let fetch = move |target: DateType| {
            (target == DateType::StateApplicationSubmittedDate).then_some(submitted)
        };
        assert_eq!(
            validate_one(DateType::CompletenessReviewDueDate, eod(2025, 3, 11), fetch),
            Ok(())
        );
    }

    #[test]
    fn absent_dependency_is_a_missing_dependency_error() {
        assert_eq!(
            validate_one(DateType::CompletenessReviewDueDate, eod(2025, 1, 16), no_deps),
            Err(ValidationError::MissingDependency {
                date_type: DateType::CompletenessReviewDueDate,
                target: DateType::StateApplicationSubmittedDate,
            })
        );
    }

    #[test]
    fn each_referenced_type_is_fetched_at_most_once() {
        let mut fetched = Vec::new();
        let result = validate_one(
            DateType::StateApplicationCompletionDate,
            sod(2025, 2, 1),
            |target| {
                fetched.push(target);
                match target {
                    DateType::StateApplicationStartDate => Some(sod(2025, 1, 20)),
                    DateType::ConceptCompletionDate => Some(sod(2025, 1, 15)),
                    _ => None,
                }
            },
        );
        assert_eq!(result, Ok(()));
        assert_eq!(
            fetched,
            vec![
                DateType::StateApplicationStartDate,
                DateType::ConceptCompletionDate,
            ]
        );
    }

    #[test]
    fn batch_accepts_cross_proposal_dependencies() {
        let proposals = btreemap! {
            DateType::StateApplicationSubmittedDate => sod(2025, 1, 1),
            DateType::CompletenessReviewDueDate => eod(2025, 1, 16),
        };
        assert_eq!(validate_batch(&proposals, &ApplicationDateMap::new()), Ok(()));
    }

    #[test]
    fn batch_proposals_shadow_existing_values() {
        let existing = btreemap! {
            DateType::StateApplicationSubmittedDate => sod(2025, 1, 1),
        };

        // Re-proposing the submission moves the only acceptable due date.
        let proposals = btreemap! {
            DateType::StateApplicationSubmittedDate => sod(2025, 1, 2),
            DateType::CompletenessReviewDueDate => eod(2025, 1, 17),
        };
        assert_eq!(validate_batch(&proposals, &existing), Ok(()));

        let stale = btreemap! {
            DateType::StateApplicationSubmittedDate => sod(2025, 1, 2),
            DateType::CompletenessReviewDueDate => eod(2025, 1, 16),
        };
        assert!(matches!(
            validate_batch(&stale, &existing),
            Err(ValidationError::OffsetMismatch { .. })
        ));
    }

    #[test]
    fn batch_reports_the_first_failure_in_date_type_order() {
        let existing = btreemap! {
            DateType::ConceptStartDate => sod(2025, 1, 10),
        };
        // Both proposals are wrong; ConceptCompletionDate is declared first,
        // so its failure is the one reported.
        let proposals = btreemap! {
            DateType::ConceptCompletionDate => sod(2025, 1, 10),
            DateType::CompletenessReviewDueDate => eod(2025, 1, 16),
        };
        assert!(matches!(
            validate_batch(&proposals, &existing),
            Err(ValidationError::NotAfter {
                date_type: DateType::ConceptCompletionDate,
                ..
            })
        ));
    }

    #[test]
    fn empty_batch_is_ok_even_over_inconsistent_existing_dates() {
        // Stored dates are not re-validated; a catalog tightened after the
        // fact must not make old applications unreadable.
        let existing = btreemap! {
            DateType::CompletenessReviewDueDate => eod(2025, 3, 3),
        };
        assert_eq!(validate_batch(&ApplicationDateMap::new(), &existing), Ok(()));
    }
}
