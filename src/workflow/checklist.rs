//! Inspection checklist vocabulary and validation.
//!
//! The key set is a closed enum: adding a checklist question is a deliberate,
//! type-checked change, and finalization validates across [`ChecklistKey::ALL`]
//! so a missing answer is caught even if it was never saved.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::WorkflowError;

/// Fixed vocabulary of move-out checklist questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistKey {
    RentPaid,
    Cleaned,
    NoDamage,
    UtilitiesSettled,
    CoordinatorSatisfied,
    KeysReturned,
    BankDetails,
}

impl ChecklistKey {
    /// Every checklist question, in presentation order.
    pub const ALL: [ChecklistKey; 7] = [
        ChecklistKey::RentPaid,
        ChecklistKey::Cleaned,
        ChecklistKey::NoDamage,
        ChecklistKey::UtilitiesSettled,
        ChecklistKey::CoordinatorSatisfied,
        ChecklistKey::KeysReturned,
        ChecklistKey::BankDetails,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistKey::RentPaid => "rent_paid",
            ChecklistKey::Cleaned => "cleaned",
            ChecklistKey::NoDamage => "no_damage",
            ChecklistKey::UtilitiesSettled => "utilities_settled",
            ChecklistKey::CoordinatorSatisfied => "coordinator_satisfied",
            ChecklistKey::KeysReturned => "keys_returned",
            ChecklistKey::BankDetails => "bank_details",
        }
    }

    /// Human-readable question text, used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistKey::RentPaid => "Rent paid up to move-out date",
            ChecklistKey::Cleaned => "Bedroom and common areas cleaned",
            ChecklistKey::NoDamage => "No damage/stain caused",
            ChecklistKey::UtilitiesSettled => "All utilities settled/arranged",
            ChecklistKey::CoordinatorSatisfied => "Coordinator satisfied with cleaning",
            ChecklistKey::KeysReturned => "Keys returned",
            ChecklistKey::BankDetails => "Bank details provided for bond refund",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        ChecklistKey::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| WorkflowError::Validation(format!("unknown checklist key '{value}'")))
    }
}

/// One answered checklist question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChecklistAnswer {
    /// Yes/no answer to the question
    pub yes_no: bool,
    /// Explanation, required when the answer is "no"
    #[serde(default)]
    pub description: String,
}

/// A set of answers keyed by checklist question.
pub type ChecklistAnswers = BTreeMap<ChecklistKey, ChecklistAnswer>;

/// Validates the answers that are present: every "no" needs an explanation.
///
/// Used on draft saves, where partial answer sets are allowed.
pub fn validate_answers(answers: &ChecklistAnswers) -> Result<(), WorkflowError> {
    for (key, answer) in answers {
        if !answer.yes_no && answer.description.trim().is_empty() {
            return Err(WorkflowError::Validation(format!(
                "checklist item '{}' ({}) is answered 'no' and needs a description",
                key.as_str(),
                key.label()
            )));
        }
    }
    Ok(())
}

/// Validates a complete answer set across the whole vocabulary.
///
/// Used on finalization: every enumerated key must be present and valid.
pub fn validate_complete(answers: &ChecklistAnswers) -> Result<(), WorkflowError> {
    for key in ChecklistKey::ALL {
        match answers.get(&key) {
            None => {
                return Err(WorkflowError::Validation(format!(
                    "checklist item '{}' ({}) has not been answered",
                    key.as_str(),
                    key.label()
                )));
            }
            Some(answer) if !answer.yes_no && answer.description.trim().is_empty() => {
                return Err(WorkflowError::Validation(format!(
                    "checklist item '{}' ({}) is answered 'no' and needs a description",
                    key.as_str(),
                    key.label()
                )));
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Convenience builder for a fully-"yes" answer set.
pub fn all_yes() -> ChecklistAnswers {
    ChecklistKey::ALL
        .into_iter()
        .map(|key| {
            (
                key,
                ChecklistAnswer {
                    yes_no: true,
                    description: String::new(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_through_strings() {
        for key in ChecklistKey::ALL {
            assert_eq!(ChecklistKey::parse(key.as_str()).unwrap(), key);
        }
        assert!(ChecklistKey::parse("garden_watered").is_err());
    }

    #[test]
    fn no_answer_without_description_is_rejected() {
        let mut answers = all_yes();
        answers.insert(
            ChecklistKey::NoDamage,
            ChecklistAnswer {
                yes_no: false,
                description: "  ".to_string(),
            },
        );
        let err = validate_answers(&answers).unwrap_err();
        assert!(err.to_string().contains("no_damage"));
    }

    #[test]
    fn yes_answer_may_have_empty_description() {
        let answers = all_yes();
        assert!(validate_answers(&answers).is_ok());
        assert!(validate_complete(&answers).is_ok());
    }

    #[test]
    fn no_answer_with_description_is_accepted() {
        let mut answers = all_yes();
        answers.insert(
            ChecklistKey::NoDamage,
            ChecklistAnswer {
                yes_no: false,
                description: "scratch on the desk".to_string(),
            },
        );
        assert!(validate_complete(&answers).is_ok());
    }

    #[test]
    fn finalize_validation_requires_every_key() {
        let mut answers = all_yes();
        answers.remove(&ChecklistKey::BankDetails);
        // Partial sets are fine for draft saves but not for finalization.
        assert!(validate_answers(&answers).is_ok());
        let err = validate_complete(&answers).unwrap_err();
        assert!(err.to_string().contains("bank_details"));
    }
}
