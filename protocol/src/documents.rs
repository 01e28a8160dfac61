//! Workflow-relevant document types uploaded against an application.

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;

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
pub enum DocumentType {
    #[strum(to_string = "Application Completeness Letter")]
    ApplicationCompletenessLetter,
    #[strum(to_string = "Approval Letter")]
    ApprovalLetter,
    #[strum(to_string = "Final BN Worksheet")]
    FinalBnWorksheet,
    #[strum(to_string = "Final Budget Neutrality Formulation Workbook")]
    FinalBudgetNeutralityFormulationWorkbook,
    #[strum(to_string = "Formal OMB Policy Concurrence Email")]
    FormalOmbPolicyConcurrenceEmail,
    #[strum(to_string = "Internal Completeness Review Form")]
    InternalCompletenessReviewForm,
    #[strum(to_string = "Payment Ratio Analysis")]
    PaymentRatioAnalysis,
    #[strum(to_string = "Pre-Submission")]
    PreSubmission,
    #[strum(to_string = "Q&A")]
    QAndA,
    #[strum(to_string = "Signed Decision Memo")]
    SignedDecisionMemo,
    #[strum(to_string = "Special Terms & Conditions")]
    SpecialTermsAndConditions,
    #[strum(to_string = "State Application")]
    StateApplication,
}
