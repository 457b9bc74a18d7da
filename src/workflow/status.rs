//! Lifecycle status vocabulary.
//!
//! All statuses are stored as text columns and parsed into these closed enums
//! at the boundary, so an out-of-vocabulary value can never be written back.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::WorkflowError;

/// Role claim carried by every authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Coordinator,
    Tenant,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Coordinator => "COORDINATOR",
            UserRole::Tenant => "TENANT",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "ADMIN" => Ok(UserRole::Admin),
            "COORDINATOR" => Ok(UserRole::Coordinator),
            "TENANT" => Ok(UserRole::Tenant),
            other => Err(WorkflowError::Validation(format!(
                "unknown user role '{other}'"
            ))),
        }
    }
}

/// Slot within a two-person room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RoomSlot {
    A,
    B,
}

impl RoomSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomSlot::A => "A",
            RoomSlot::B => "B",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "A" => Ok(RoomSlot::A),
            "B" => Ok(RoomSlot::B),
            other => Err(WorkflowError::Validation(format!(
                "unknown room slot '{other}' (expected A or B)"
            ))),
        }
    }
}

/// The six authoritative tenancy lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenancyStatus {
    Occupied,
    MoveOutIntended,
    MoveOutInspectionDraft,
    MoveOutInspectionFinal,
    MoveInPendingSignature,
    Ended,
}

impl TenancyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenancyStatus::Occupied => "OCCUPIED",
            TenancyStatus::MoveOutIntended => "MOVE_OUT_INTENDED",
            TenancyStatus::MoveOutInspectionDraft => "MOVE_OUT_INSPECTION_DRAFT",
            TenancyStatus::MoveOutInspectionFinal => "MOVE_OUT_INSPECTION_FINAL",
            TenancyStatus::MoveInPendingSignature => "MOVE_IN_PENDING_SIGNATURE",
            TenancyStatus::Ended => "ENDED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "OCCUPIED" => Ok(TenancyStatus::Occupied),
            "MOVE_OUT_INTENDED" => Ok(TenancyStatus::MoveOutIntended),
            "MOVE_OUT_INSPECTION_DRAFT" => Ok(TenancyStatus::MoveOutInspectionDraft),
            "MOVE_OUT_INSPECTION_FINAL" => Ok(TenancyStatus::MoveOutInspectionFinal),
            "MOVE_IN_PENDING_SIGNATURE" => Ok(TenancyStatus::MoveInPendingSignature),
            "ENDED" => Ok(TenancyStatus::Ended),
            other => Err(WorkflowError::Validation(format!(
                "unknown tenancy status '{other}'"
            ))),
        }
    }

    /// ENDED is the single terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TenancyStatus::Ended)
    }

    /// Whether the happy-path transition `self -> next` is legal.
    ///
    /// `ENDED` is additionally reachable from every non-terminal state through
    /// the administrative escape hatch.
    pub fn can_transition_to(&self, next: TenancyStatus) -> bool {
        if next == TenancyStatus::Ended {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (TenancyStatus::Occupied, TenancyStatus::MoveOutIntended)
                | (
                    TenancyStatus::MoveOutIntended,
                    TenancyStatus::MoveOutInspectionDraft
                )
                | (
                    TenancyStatus::MoveOutInspectionDraft,
                    TenancyStatus::MoveOutInspectionFinal
                )
                | (
                    TenancyStatus::MoveInPendingSignature,
                    TenancyStatus::Occupied
                )
        )
    }
}

/// Coordinator sign-off state of a move-out intention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignOffStatus {
    Pending,
    Approved,
    Rejected,
}

impl SignOffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignOffStatus::Pending => "PENDING",
            SignOffStatus::Approved => "APPROVED",
            SignOffStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "PENDING" => Ok(SignOffStatus::Pending),
            "APPROVED" => Ok(SignOffStatus::Approved),
            "REJECTED" => Ok(SignOffStatus::Rejected),
            other => Err(WorkflowError::Validation(format!(
                "unknown sign-off status '{other}'"
            ))),
        }
    }
}

/// Inspection lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatus {
    Draft,
    Final,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Draft => "DRAFT",
            InspectionStatus::Final => "FINAL",
        }
    }

    pub fn parse(value: &str) -> Result<Self, WorkflowError> {
        match value {
            "DRAFT" => Ok(InspectionStatus::Draft),
            "FINAL" => Ok(InspectionStatus::Final),
            other => Err(WorkflowError::Validation(format!(
                "unknown inspection status '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TenancyStatus; 6] = [
        TenancyStatus::Occupied,
        TenancyStatus::MoveOutIntended,
        TenancyStatus::MoveOutInspectionDraft,
        TenancyStatus::MoveOutInspectionFinal,
        TenancyStatus::MoveInPendingSignature,
        TenancyStatus::Ended,
    ];

    #[test]
    fn status_round_trips_through_strings() {
        for status in ALL {
            assert_eq!(TenancyStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = TenancyStatus::parse("SUBLET").unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn happy_path_transitions_are_legal() {
        assert!(TenancyStatus::Occupied.can_transition_to(TenancyStatus::MoveOutIntended));
        assert!(
            TenancyStatus::MoveOutIntended
                .can_transition_to(TenancyStatus::MoveOutInspectionDraft)
        );
        assert!(
            TenancyStatus::MoveOutInspectionDraft
                .can_transition_to(TenancyStatus::MoveOutInspectionFinal)
        );
        assert!(TenancyStatus::MoveInPendingSignature.can_transition_to(TenancyStatus::Occupied));
    }

    #[test]
    fn ended_is_reachable_from_every_non_terminal_state() {
        for status in ALL {
            assert_eq!(
                status.can_transition_to(TenancyStatus::Ended),
                !status.is_terminal()
            );
        }
    }

    #[test]
    fn skipping_states_is_illegal() {
        assert!(!TenancyStatus::Occupied.can_transition_to(TenancyStatus::MoveOutInspectionDraft));
        assert!(!TenancyStatus::Occupied.can_transition_to(TenancyStatus::MoveOutInspectionFinal));
        assert!(
            !TenancyStatus::MoveOutIntended.can_transition_to(TenancyStatus::MoveOutInspectionFinal)
        );
        assert!(!TenancyStatus::Ended.can_transition_to(TenancyStatus::Occupied));
        assert!(!TenancyStatus::MoveOutInspectionFinal.can_transition_to(TenancyStatus::Occupied));
    }

    #[test]
    fn role_and_slot_parsing() {
        assert_eq!(UserRole::parse("COORDINATOR").unwrap(), UserRole::Coordinator);
        assert!(UserRole::parse("SUPERUSER").is_err());
        assert_eq!(RoomSlot::parse("B").unwrap(), RoomSlot::B);
        assert!(RoomSlot::parse("C").is_err());
    }
}
