//! Lifecycle workflow service.
//!
//! Orchestrates the move-out → inspection → move-in pipeline over the
//! repository layer. Compound effects (insert child record, then write the
//! parent status) are two sequential writes without a wrapping transaction;
//! a failure between them leaves the child persisted without the transition
//! and is surfaced to the caller for manual reconciliation.

use std::sync::Arc;

use chrono::NaiveDate;
use metrics::counter;
use sea_orm::DatabaseConnection;
use serde_json::json;
use url::Url;
use uuid::Uuid;

use crate::models::{inspection, move_in_acknowledgement, move_out_intention, tenancy};
use crate::repositories::{
    housing::CreateHouseRequest, housing::CreateRoomRequest,
    move_in::CreateAcknowledgementRequest, move_out_intention::CreateIntentionRequest,
    tenancy::CreateTenancyRequest, HousingRepository, InspectionRepository, MoveInRepository,
    MoveOutIntentionRepository, TenancyRepository,
};
use crate::workflow::checklist::{self, ChecklistAnswers};
use crate::workflow::{
    Caller, InspectionStatus, RoomSlot, SignOffStatus, TenancyStatus, UserRole, WorkflowError,
};

/// Hard cap on evidence photos per category, bounding request size.
pub const MAX_PHOTOS_PER_CATEGORY: usize = 10;

/// Tenant-submitted move-out declaration.
#[derive(Debug, Clone)]
pub struct MoveOutSubmission {
    pub planned_move_out_date: NaiveDate,
    pub notes: Option<String>,
    pub rent_paid_up: bool,
    pub areas_cleaned: bool,
    pub has_damage: bool,
    pub damage_description: Option<String>,
    pub key_area_photos: Vec<String>,
    pub damage_photos: Vec<String>,
}

/// Coordinator sign-off decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Admin request to open a tenancy.
#[derive(Debug, Clone)]
pub struct NewTenancy {
    pub room_id: Uuid,
    pub slot: Option<RoomSlot>,
    pub tenant_user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub rental_price: Option<f64>,
    /// When set the tenancy opens awaiting the move-in signature instead of
    /// immediately OCCUPIED.
    pub pending_signature: bool,
}

/// Prior-tenant evidence surfaced to an incoming tenant.
#[derive(Debug, Clone, Default)]
pub struct PriorEvidence {
    pub notes: Option<String>,
    pub damage_description: Option<String>,
    pub key_area_photos: Vec<String>,
    pub damage_photos: Vec<String>,
}

/// The tenancy lifecycle service.
#[derive(Debug, Clone)]
pub struct LifecycleService {
    tenancies: TenancyRepository,
    intentions: MoveOutIntentionRepository,
    inspections: InspectionRepository,
    move_ins: MoveInRepository,
    housing: HousingRepository,
}

impl LifecycleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            tenancies: TenancyRepository::new(Arc::clone(&db)),
            intentions: MoveOutIntentionRepository::new(Arc::clone(&db)),
            inspections: InspectionRepository::new(Arc::clone(&db)),
            move_ins: MoveInRepository::new(Arc::clone(&db)),
            housing: HousingRepository::new(db),
        }
    }

    pub fn tenancies(&self) -> &TenancyRepository {
        &self.tenancies
    }

    pub fn intentions(&self) -> &MoveOutIntentionRepository {
        &self.intentions
    }

    pub fn inspections(&self) -> &InspectionRepository {
        &self.inspections
    }

    pub fn housing(&self) -> &HousingRepository {
        &self.housing
    }

    /// Checks the status machine and writes the next state.
    async fn transition(
        &self,
        row: tenancy::Model,
        next: TenancyStatus,
    ) -> Result<tenancy::Model, WorkflowError> {
        let current = TenancyStatus::parse(&row.status)?;
        if !current.can_transition_to(next) {
            return Err(WorkflowError::State(format!(
                "tenancy {} cannot move from {} to {}",
                row.id,
                current.as_str(),
                next.as_str()
            )));
        }
        let updated = self.tenancies.set_status(row, next).await?;
        counter!("houseflow_tenancy_transitions_total", "to" => next.as_str()).increment(1);
        tracing::info!(
            tenancy_id = %updated.id,
            from = current.as_str(),
            to = next.as_str(),
            "tenancy status transition"
        );
        Ok(updated)
    }

    fn validate_photo_refs(refs: &[String], category: &str) -> Result<(), WorkflowError> {
        if refs.len() > MAX_PHOTOS_PER_CATEGORY {
            return Err(WorkflowError::Validation(format!(
                "at most {MAX_PHOTOS_PER_CATEGORY} {category} photos are allowed, got {}",
                refs.len()
            )));
        }
        for reference in refs {
            if Url::parse(reference).is_err() {
                return Err(WorkflowError::Validation(format!(
                    "'{reference}' is not a valid {category} photo reference"
                )));
            }
        }
        Ok(())
    }

    // ---- Move-out intention recorder (tenant) ----

    /// Records a tenant's intent to vacate and transitions the tenancy to
    /// MOVE_OUT_INTENDED.
    pub async fn submit_move_out_intention(
        &self,
        caller: &Caller,
        tenancy_id: Uuid,
        submission: MoveOutSubmission,
    ) -> Result<move_out_intention::Model, WorkflowError> {
        caller.require_role(UserRole::Tenant)?;
        let tenancy = self.tenancies.require(tenancy_id).await?;
        if tenancy.tenant_user_id != caller.user_id {
            return Err(WorkflowError::Authorization(format!(
                "tenancy {tenancy_id} does not belong to the caller"
            )));
        }

        let current = TenancyStatus::parse(&tenancy.status)?;
        if current != TenancyStatus::Occupied {
            return Err(WorkflowError::State(format!(
                "move-out can only be declared from OCCUPIED, tenancy is {}",
                current.as_str()
            )));
        }
        if self.intentions.pending_for_tenancy(tenancy_id).await?.is_some() {
            return Err(WorkflowError::State(format!(
                "tenancy {tenancy_id} already has a pending move-out intention"
            )));
        }

        if submission.has_damage
            && submission
                .damage_description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .is_empty()
        {
            return Err(WorkflowError::Validation(
                "damage description is required when damage is reported".to_string(),
            ));
        }
        Self::validate_photo_refs(&submission.key_area_photos, "key-area")?;
        Self::validate_photo_refs(&submission.damage_photos, "damage")?;

        let intention = self
            .intentions
            .create(CreateIntentionRequest {
                tenancy_id,
                planned_move_out_date: submission.planned_move_out_date,
                notes: submission.notes,
                rent_paid_up: submission.rent_paid_up,
                areas_cleaned: submission.areas_cleaned,
                has_damage: submission.has_damage,
                damage_description: submission.damage_description,
                key_area_photos: submission.key_area_photos,
                damage_photos: submission.damage_photos,
            })
            .await?;

        // Second, non-atomic write: a failure here leaves the intention
        // without the transition.
        self.transition(tenancy, TenancyStatus::MoveOutIntended)
            .await?;

        Ok(intention)
    }

    // ---- Coordinator review (sign-off) ----

    /// Records the coordinator's approve/reject decision. Does not itself
    /// transition the tenancy; that is driven by inspection creation.
    pub async fn review_move_out_intention(
        &self,
        caller: &Caller,
        intention_id: Uuid,
        decision: ReviewDecision,
        coordinator_notes: &str,
    ) -> Result<move_out_intention::Model, WorkflowError> {
        caller.require_role(UserRole::Coordinator)?;
        if coordinator_notes.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "coordinator notes are required for both approval and rejection".to_string(),
            ));
        }

        let intention = self.intentions.require(intention_id).await?;
        let tenancy = self.tenancies.require(intention.tenancy_id).await?;
        self.require_coordinates_room(caller, tenancy.room_id).await?;

        if SignOffStatus::parse(&intention.sign_off_status)? != SignOffStatus::Pending {
            return Err(WorkflowError::State(format!(
                "move-out intention {intention_id} has already been signed off"
            )));
        }

        let status = match decision {
            ReviewDecision::Approve => SignOffStatus::Approved,
            ReviewDecision::Reject => SignOffStatus::Rejected,
        };
        self.intentions
            .sign_off(
                intention,
                status,
                caller.user_id,
                coordinator_notes.trim().to_string(),
            )
            .await
    }

    async fn require_coordinates_room(
        &self,
        caller: &Caller,
        room_id: Uuid,
    ) -> Result<(), WorkflowError> {
        if !self
            .housing
            .coordinates_room(caller.user_id, room_id)
            .await?
        {
            return Err(WorkflowError::Authorization(
                "caller does not coordinate the house for this room".to_string(),
            ));
        }
        Ok(())
    }

    // ---- Inspection checklist engine (coordinator) ----

    /// Opens a DRAFT inspection for a tenancy with a pending or approved
    /// move-out intention and transitions the tenancy.
    pub async fn create_inspection(
        &self,
        caller: &Caller,
        tenancy_id: Uuid,
    ) -> Result<inspection::Model, WorkflowError> {
        caller.require_role(UserRole::Coordinator)?;
        let tenancy = self.tenancies.require(tenancy_id).await?;
        self.require_coordinates_room(caller, tenancy.room_id).await?;

        // Checked before the insert so an illegal call writes nothing.
        let current = TenancyStatus::parse(&tenancy.status)?;
        if current != TenancyStatus::MoveOutIntended {
            return Err(WorkflowError::State(format!(
                "an inspection can only be opened from MOVE_OUT_INTENDED, tenancy is {}",
                current.as_str()
            )));
        }

        let intention = self
            .intentions
            .latest_for_tenancy(tenancy_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::State(format!(
                    "tenancy {tenancy_id} has no move-out intention to inspect"
                ))
            })?;
        let sign_off = SignOffStatus::parse(&intention.sign_off_status)?;
        if sign_off == SignOffStatus::Rejected {
            return Err(WorkflowError::State(format!(
                "move-out intention {} was rejected; no inspection may be created",
                intention.id
            )));
        }

        let inspection = self
            .inspections
            .create(tenancy_id, tenancy.room_id, caller.user_id)
            .await?;

        self.transition(tenancy, TenancyStatus::MoveOutInspectionDraft)
            .await?;

        Ok(inspection)
    }

    /// Persists a draft checklist via full replacement.
    pub async fn save_checklist(
        &self,
        caller: &Caller,
        inspection_id: Uuid,
        answers: &ChecklistAnswers,
    ) -> Result<(), WorkflowError> {
        caller.require_role(UserRole::Coordinator)?;
        let inspection = self.inspections.require(inspection_id).await?;
        self.require_coordinates_room(caller, inspection.room_id)
            .await?;

        if InspectionStatus::parse(&inspection.status)? == InspectionStatus::Final {
            return Err(WorkflowError::State(format!(
                "inspection {inspection_id} is finalized and cannot be edited"
            )));
        }

        checklist::validate_answers(answers)?;
        self.inspections
            .replace_checklist(inspection_id, answers)
            .await
    }

    /// Validates the full vocabulary, saves, and locks the inspection; then
    /// transitions the tenancy to MOVE_OUT_INSPECTION_FINAL.
    pub async fn finalize_inspection(
        &self,
        caller: &Caller,
        inspection_id: Uuid,
        answers: &ChecklistAnswers,
    ) -> Result<inspection::Model, WorkflowError> {
        caller.require_role(UserRole::Coordinator)?;
        let inspection = self.inspections.require(inspection_id).await?;
        self.require_coordinates_room(caller, inspection.room_id)
            .await?;

        if InspectionStatus::parse(&inspection.status)? == InspectionStatus::Final {
            return Err(WorkflowError::State(format!(
                "inspection {inspection_id} is already finalized"
            )));
        }

        checklist::validate_complete(answers)?;

        self.inspections
            .replace_checklist(inspection_id, answers)
            .await?;
        let tenancy = self.tenancies.require(inspection.tenancy_id).await?;
        let finalized = self.inspections.finalize(inspection).await?;
        self.transition(tenancy, TenancyStatus::MoveOutInspectionFinal)
            .await?;
        counter!("houseflow_inspections_finalized_total").increment(1);

        Ok(finalized)
    }

    // ---- Move-in acknowledgement (tenant) ----

    /// Marks the keys as received by the tenant on their own tenancy.
    pub async fn confirm_keys_received(
        &self,
        caller: &Caller,
        tenancy_id: Uuid,
    ) -> Result<tenancy::Model, WorkflowError> {
        caller.require_role(UserRole::Tenant)?;
        let tenancy = self.tenancies.require(tenancy_id).await?;
        if tenancy.tenant_user_id != caller.user_id {
            return Err(WorkflowError::Authorization(format!(
                "tenancy {tenancy_id} does not belong to the caller"
            )));
        }
        self.tenancies.mark_keys_received(tenancy).await
    }

    /// Completes the move-in: persists the signed acknowledgement, then
    /// transitions the tenancy to OCCUPIED.
    pub async fn complete_move_in(
        &self,
        caller: &Caller,
        tenancy_id: Uuid,
        signature_image_url: &str,
    ) -> Result<tenancy::Model, WorkflowError> {
        caller.require_role(UserRole::Tenant)?;
        let tenancy = self.tenancies.require(tenancy_id).await?;
        if tenancy.tenant_user_id != caller.user_id {
            return Err(WorkflowError::Authorization(format!(
                "tenancy {tenancy_id} does not belong to the caller"
            )));
        }
        if signature_image_url.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "a signature image is required to complete move-in".to_string(),
            ));
        }
        if !tenancy.keys_received {
            return Err(WorkflowError::State(
                "keys must be confirmed as received before completing move-in".to_string(),
            ));
        }
        let current = TenancyStatus::parse(&tenancy.status)?;
        if current != TenancyStatus::MoveInPendingSignature {
            return Err(WorkflowError::State(format!(
                "move-in cannot be completed while the tenancy is {}",
                current.as_str()
            )));
        }

        let inspection = self.inspections.latest_final_for_room(tenancy.room_id).await?;
        self.move_ins
            .create(CreateAcknowledgementRequest {
                tenancy_id,
                inspection_id: inspection.as_ref().map(|i| i.id),
                signed_by: caller.user_id,
                signature_image_url: signature_image_url.trim().to_string(),
                audit: Some(json!({
                    "keys_received_at": tenancy.keys_received_at,
                    "reviewed_inspection": inspection.as_ref().map(|i| i.id),
                })),
            })
            .await?;

        self.transition(tenancy, TenancyStatus::Occupied).await
    }

    /// Surfaces the previous tenant's move-out evidence for a room. Absence
    /// of prior evidence is not an error.
    pub async fn previous_tenant_evidence(
        &self,
        room_id: Uuid,
    ) -> Result<Option<PriorEvidence>, WorkflowError> {
        let Some(prior) = self.tenancies.most_recent_ended_for_room(room_id).await? else {
            return Ok(None);
        };
        let Some(intention) = self.intentions.latest_for_tenancy(prior.id).await? else {
            return Ok(None);
        };
        let (key_area_photos, damage_photos) =
            MoveOutIntentionRepository::photo_refs(&intention);
        Ok(Some(PriorEvidence {
            notes: intention.notes,
            damage_description: intention.damage_description,
            key_area_photos,
            damage_photos,
        }))
    }

    /// The signed acknowledgement for a tenancy, if move-in has completed.
    pub async fn acknowledgement_for_tenancy(
        &self,
        tenancy_id: Uuid,
    ) -> Result<Option<move_in_acknowledgement::Model>, WorkflowError> {
        self.move_ins.for_tenancy(tenancy_id).await
    }

    // ---- Administration ----

    /// Opens a tenancy, enforcing the one-active-occupancy-per-slot
    /// invariant and the slot/capacity rules.
    pub async fn create_tenancy(
        &self,
        caller: &Caller,
        request: NewTenancy,
    ) -> Result<tenancy::Model, WorkflowError> {
        caller.require_role(UserRole::Admin)?;

        let room = self
            .housing
            .get_room(request.room_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("room {} not found", request.room_id)))?;

        match (room.capacity, request.slot) {
            (2, None) => {
                return Err(WorkflowError::Validation(
                    "two-person rooms require a slot (A or B)".to_string(),
                ));
            }
            (1, Some(_)) => {
                return Err(WorkflowError::Validation(
                    "single rooms do not take a slot".to_string(),
                ));
            }
            _ => {}
        }

        let occupants = self
            .tenancies
            .active_for_room(request.room_id, request.slot)
            .await?;
        if !occupants.is_empty() {
            return Err(WorkflowError::State(format!(
                "room {} slot {} already has an active tenancy",
                request.room_id,
                request.slot.map(|s| s.as_str()).unwrap_or("-")
            )));
        }

        let status = if request.pending_signature {
            TenancyStatus::MoveInPendingSignature
        } else {
            TenancyStatus::Occupied
        };
        self.tenancies
            .create(CreateTenancyRequest {
                room_id: request.room_id,
                slot: request.slot,
                tenant_user_id: request.tenant_user_id,
                start_date: request.start_date,
                end_date: request.end_date,
                rental_price: request.rental_price,
                status,
            })
            .await
    }

    /// Administrative escape hatch: ends a tenancy from any non-terminal
    /// state, bypassing the inspection pipeline.
    pub async fn end_tenancy(
        &self,
        caller: &Caller,
        tenancy_id: Uuid,
    ) -> Result<tenancy::Model, WorkflowError> {
        caller.require_role(UserRole::Admin)?;
        let tenancy = self.tenancies.require(tenancy_id).await?;
        let current = TenancyStatus::parse(&tenancy.status)?;
        if current.is_terminal() {
            return Err(WorkflowError::State(format!(
                "tenancy {tenancy_id} has already ended"
            )));
        }
        let ended = self.tenancies.end(tenancy).await?;
        counter!("houseflow_tenancy_transitions_total", "to" => TenancyStatus::Ended.as_str())
            .increment(1);
        tracing::info!(tenancy_id = %ended.id, from = current.as_str(), "tenancy ended by admin");
        Ok(ended)
    }

    /// Creates a house (admin).
    pub async fn create_house(
        &self,
        caller: &Caller,
        request: CreateHouseRequest,
    ) -> Result<crate::models::house::Model, WorkflowError> {
        caller.require_role(UserRole::Admin)?;
        self.housing.create_house(request).await
    }

    /// Creates a room (admin).
    pub async fn create_room(
        &self,
        caller: &Caller,
        request: CreateRoomRequest,
    ) -> Result<crate::models::room::Model, WorkflowError> {
        caller.require_role(UserRole::Admin)?;
        self.housing.create_room(request).await
    }

    /// Assigns a coordinator to a house (admin).
    pub async fn assign_coordinator(
        &self,
        caller: &Caller,
        house_id: Uuid,
        coordinator_user_id: Uuid,
    ) -> Result<crate::models::house_coordinator::Model, WorkflowError> {
        caller.require_role(UserRole::Admin)?;
        self.housing
            .assign_coordinator(house_id, coordinator_user_id)
            .await
    }

    /// Move-out intentions awaiting review in the caller's houses.
    pub async fn reviews_for_coordinator(
        &self,
        caller: &Caller,
    ) -> Result<Vec<move_out_intention::Model>, WorkflowError> {
        caller.require_role(UserRole::Coordinator)?;
        let houses = self.housing.houses_for_coordinator(caller.user_id).await?;
        let mut scoped = Vec::new();
        for intention in self.intentions.list_pending().await? {
            let tenancy = self.tenancies.require(intention.tenancy_id).await?;
            let Some(room) = self.housing.get_room(tenancy.room_id).await? else {
                continue;
            };
            if houses.contains(&room.house_id) {
                scoped.push(intention);
            }
        }
        Ok(scoped)
    }
}
