//! Integration tests for the tenancy lifecycle workflow.
//!
//! Drives the full move-out → inspection → move-in pipeline against an
//! in-memory SQLite database.

mod test_utils;

use std::sync::Arc;

use chrono::NaiveDate;
use houseflow::workflow::checklist::{all_yes, ChecklistAnswer, ChecklistKey};
use houseflow::workflow::service::{MoveOutSubmission, NewTenancy, ReviewDecision};
use houseflow::workflow::{
    Caller, InspectionStatus, LifecycleService, RoomSlot, SignOffStatus, TenancyStatus, UserRole,
    WorkflowError,
};
use houseflow::models::inspection;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use test_utils::{
    assign_coordinator, create_caller, create_house_with_room, create_tenancy_in_slot,
    create_tenancy_with_status, setup_test_db_arc,
};
use uuid::Uuid;

fn submission(has_damage: bool, key_area_photos: Vec<String>) -> MoveOutSubmission {
    MoveOutSubmission {
        planned_move_out_date: NaiveDate::from_ymd_opt(2026, 10, 31).expect("valid date"),
        notes: Some("leaving at the end of the lease".to_string()),
        rent_paid_up: true,
        areas_cleaned: true,
        has_damage,
        damage_description: None,
        key_area_photos,
        damage_photos: Vec::new(),
    }
}

struct Fixture {
    db: Arc<DatabaseConnection>,
    service: LifecycleService,
    tenant: Caller,
    coordinator: Caller,
    house_id: Uuid,
    room_id: Uuid,
}

async fn fixture() -> anyhow::Result<Fixture> {
    let db = setup_test_db_arc().await?;
    let service = LifecycleService::new(Arc::clone(&db));
    let tenant = create_caller(&db, UserRole::Tenant, "tenant@example.com").await?;
    let coordinator = create_caller(&db, UserRole::Coordinator, "coord@example.com").await?;
    let (house_id, room_id) = create_house_with_room(&db).await?;
    assign_coordinator(&db, house_id, &coordinator).await?;
    Ok(Fixture {
        db,
        service,
        tenant,
        coordinator,
        house_id,
        room_id,
    })
}

/// Walks the fixture tenancy up to a signed-off DRAFT inspection.
async fn advance_to_draft_inspection(fx: &Fixture, tenancy_id: Uuid) -> anyhow::Result<Uuid> {
    let intention = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, Vec::new()))
        .await?;
    fx.service
        .review_move_out_intention(
            &fx.coordinator,
            intention.id,
            ReviewDecision::Approve,
            "documented",
        )
        .await?;
    let inspection = fx.service.create_inspection(&fx.coordinator, tenancy_id).await?;
    Ok(inspection.id)
}

#[tokio::test]
async fn submitting_an_intention_records_it_and_transitions_the_tenancy() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let photos = vec![
        "local:///key-area/a/1.jpg".to_string(),
        "local:///key-area/a/2.jpg".to_string(),
    ];
    let intention = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, photos))
        .await
        .unwrap();

    assert_eq!(intention.sign_off_status, SignOffStatus::Pending.as_str());
    assert!(!intention.has_damage);

    let tenancy = fx.service.tenancies().require(tenancy_id).await.unwrap();
    assert_eq!(tenancy.status, TenancyStatus::MoveOutIntended.as_str());
}

#[tokio::test]
async fn damage_without_description_is_rejected_and_nothing_is_written() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let err = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(true, Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    // No row created, no transition.
    assert!(fx
        .service
        .intentions()
        .latest_for_tenancy(tenancy_id)
        .await
        .unwrap()
        .is_none());
    let tenancy = fx.service.tenancies().require(tenancy_id).await.unwrap();
    assert_eq!(tenancy.status, TenancyStatus::Occupied.as_str());
}

#[tokio::test]
async fn only_the_owning_tenant_may_declare_a_move_out() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let other = create_caller(&fx.db, UserRole::Tenant, "other@example.com")
        .await
        .unwrap();
    let err = fx
        .service
        .submit_move_out_intention(&other, tenancy_id, submission(false, Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Authorization(_)));
}

#[tokio::test]
async fn move_out_can_only_be_declared_from_occupied() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::MoveOutIntended,
    )
    .await
    .unwrap();

    let err = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, Vec::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));
}

#[tokio::test]
async fn photo_count_and_shape_are_validated() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let too_many: Vec<String> = (0..11)
        .map(|i| format!("local:///key-area/a/{i}.jpg"))
        .collect();
    let err = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, too_many))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let err = fx
        .service
        .submit_move_out_intention(
            &fx.tenant,
            tenancy_id,
            submission(false, vec!["not a url".to_string()]),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn review_requires_notes_and_an_assigned_coordinator() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let intention = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, Vec::new()))
        .await
        .unwrap();

    let err = fx
        .service
        .review_move_out_intention(&fx.coordinator, intention.id, ReviewDecision::Approve, "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let outsider = create_caller(&fx.db, UserRole::Coordinator, "outsider@example.com")
        .await
        .unwrap();
    let err = fx
        .service
        .review_move_out_intention(&outsider, intention.id, ReviewDecision::Approve, "looks ok")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Authorization(_)));
}

#[tokio::test]
async fn review_records_the_decision_exactly_once() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let intention = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, Vec::new()))
        .await
        .unwrap();

    let reviewed = fx
        .service
        .review_move_out_intention(
            &fx.coordinator,
            intention.id,
            ReviewDecision::Reject,
            "rent outstanding",
        )
        .await
        .unwrap();
    assert_eq!(reviewed.sign_off_status, SignOffStatus::Rejected.as_str());
    assert_eq!(reviewed.coordinator_signed_off_by, Some(fx.coordinator.user_id));
    assert!(reviewed.coordinator_signed_off_at.is_some());
    assert_eq!(reviewed.coordinator_notes.as_deref(), Some("rent outstanding"));

    // The intention does not transition the tenancy.
    let tenancy = fx.service.tenancies().require(tenancy_id).await.unwrap();
    assert_eq!(tenancy.status, TenancyStatus::MoveOutIntended.as_str());

    let err = fx
        .service
        .review_move_out_intention(
            &fx.coordinator,
            intention.id,
            ReviewDecision::Approve,
            "changed my mind",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));
}

#[tokio::test]
async fn creating_an_inspection_opens_a_draft_and_transitions_the_tenancy() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    fx.service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, Vec::new()))
        .await
        .unwrap();

    // A PENDING intention is sufficient; approval is not required first.
    let inspection = fx
        .service
        .create_inspection(&fx.coordinator, tenancy_id)
        .await
        .unwrap();
    assert_eq!(inspection.status, InspectionStatus::Draft.as_str());
    assert_eq!(inspection.room_id, fx.room_id);

    let tenancy = fx.service.tenancies().require(tenancy_id).await.unwrap();
    assert_eq!(tenancy.status, TenancyStatus::MoveOutInspectionDraft.as_str());
}

#[tokio::test]
async fn rejected_intentions_do_not_admit_an_inspection() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let intention = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, Vec::new()))
        .await
        .unwrap();
    fx.service
        .review_move_out_intention(
            &fx.coordinator,
            intention.id,
            ReviewDecision::Reject,
            "not yet",
        )
        .await
        .unwrap();

    let err = fx
        .service
        .create_inspection(&fx.coordinator, tenancy_id)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));
}

#[tokio::test]
async fn a_second_inspection_create_is_rejected_and_writes_nothing() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    advance_to_draft_inspection(&fx, tenancy_id).await.unwrap();

    let err = fx
        .service
        .create_inspection(&fx.coordinator, tenancy_id)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));

    // The rejected call must not leave an orphaned DRAFT behind.
    let rows = inspection::Entity::find()
        .filter(inspection::Column::TenancyId.eq(tenancy_id))
        .all(&*fx.db)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn finalize_rejects_an_incomplete_checklist_and_stays_draft() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let inspection_id = advance_to_draft_inspection(&fx, tenancy_id).await.unwrap();

    // "no" without a description fails validation.
    let mut answers = all_yes();
    answers.insert(
        ChecklistKey::NoDamage,
        ChecklistAnswer {
            yes_no: false,
            description: String::new(),
        },
    );
    let err = fx
        .service
        .finalize_inspection(&fx.coordinator, inspection_id, &answers)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let inspection = fx.service.inspections().require(inspection_id).await.unwrap();
    assert_eq!(inspection.status, InspectionStatus::Draft.as_str());
    assert!(inspection.finalized_at.is_none());
}

#[tokio::test]
async fn finalize_locks_the_inspection_and_transitions_the_tenancy() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let inspection_id = advance_to_draft_inspection(&fx, tenancy_id).await.unwrap();

    let mut answers = all_yes();
    answers.insert(
        ChecklistKey::NoDamage,
        ChecklistAnswer {
            yes_no: false,
            description: "scratch on the desk".to_string(),
        },
    );
    let finalized = fx
        .service
        .finalize_inspection(&fx.coordinator, inspection_id, &answers)
        .await
        .unwrap();
    assert_eq!(finalized.status, InspectionStatus::Final.as_str());
    assert!(finalized.finalized_at.is_some());

    let tenancy = fx.service.tenancies().require(tenancy_id).await.unwrap();
    assert_eq!(tenancy.status, TenancyStatus::MoveOutInspectionFinal.as_str());

    // Any further checklist mutation is a state error.
    let err = fx
        .service
        .save_checklist(&fx.coordinator, inspection_id, &all_yes())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));

    // A second finalize fails and leaves the checklist untouched.
    let before = fx.service.inspections().checklist(inspection_id).await.unwrap();
    let err = fx
        .service
        .finalize_inspection(&fx.coordinator, inspection_id, &all_yes())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));
    let after = fx.service.inspections().checklist(inspection_id).await.unwrap();
    assert_eq!(before.len(), after.len());
    let damage_row = after
        .iter()
        .find(|item| item.key == ChecklistKey::NoDamage.as_str())
        .unwrap();
    assert_eq!(
        damage_row.description_if_no.as_deref(),
        Some("scratch on the desk")
    );
}

#[tokio::test]
async fn draft_saves_replace_prior_answers() {
    let fx = fixture().await.unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let inspection_id = advance_to_draft_inspection(&fx, tenancy_id).await.unwrap();

    let mut partial = houseflow::workflow::checklist::ChecklistAnswers::new();
    partial.insert(
        ChecklistKey::RentPaid,
        ChecklistAnswer {
            yes_no: true,
            description: String::new(),
        },
    );
    fx.service
        .save_checklist(&fx.coordinator, inspection_id, &partial)
        .await
        .unwrap();
    assert_eq!(
        fx.service.inspections().checklist(inspection_id).await.unwrap().len(),
        1
    );

    fx.service
        .save_checklist(&fx.coordinator, inspection_id, &all_yes())
        .await
        .unwrap();
    assert_eq!(
        fx.service.inspections().checklist(inspection_id).await.unwrap().len(),
        ChecklistKey::ALL.len()
    );
}

#[tokio::test]
async fn move_in_requires_keys_then_signature_and_happens_once() {
    let fx = fixture().await.unwrap();
    let incoming = create_caller(&fx.db, UserRole::Tenant, "incoming@example.com")
        .await
        .unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &incoming,
        TenancyStatus::MoveInPendingSignature,
    )
    .await
    .unwrap();

    // Signing before the keys are confirmed is a state error.
    let err = fx
        .service
        .complete_move_in(&incoming, tenancy_id, "local:///key-area/t/sig.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));

    let updated = fx
        .service
        .confirm_keys_received(&incoming, tenancy_id)
        .await
        .unwrap();
    assert!(updated.keys_received);
    assert!(updated.keys_received_at.is_some());

    // An empty signature is a validation error.
    let err = fx
        .service
        .complete_move_in(&incoming, tenancy_id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let occupied = fx
        .service
        .complete_move_in(&incoming, tenancy_id, "local:///key-area/t/sig.jpg")
        .await
        .unwrap();
    assert_eq!(occupied.status, TenancyStatus::Occupied.as_str());

    let acknowledgement = fx
        .service
        .acknowledgement_for_tenancy(tenancy_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(acknowledgement.signed_by, incoming.user_id);

    // Signing again fails: the tenancy is already occupied.
    let err = fx
        .service
        .complete_move_in(&incoming, tenancy_id, "local:///key-area/t/sig.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));
}

#[tokio::test]
async fn previous_tenant_evidence_surfaces_the_ended_tenancy() {
    let fx = fixture().await.unwrap();

    // No ended tenancy: absence is not an error.
    assert!(fx
        .service
        .previous_tenant_evidence(fx.room_id)
        .await
        .unwrap()
        .is_none());

    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let photos = vec!["local:///key-area/a/1.jpg".to_string()];
    fx.service
        .submit_move_out_intention(&fx.tenant, tenancy_id, submission(false, photos.clone()))
        .await
        .unwrap();

    let admin = create_caller(&fx.db, UserRole::Admin, "admin@example.com")
        .await
        .unwrap();
    fx.service.end_tenancy(&admin, tenancy_id).await.unwrap();

    let evidence = fx
        .service
        .previous_tenant_evidence(fx.room_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(evidence.key_area_photos, photos);
    assert!(evidence.damage_photos.is_empty());
    assert_eq!(
        evidence.notes.as_deref(),
        Some("leaving at the end of the lease")
    );
}

#[tokio::test]
async fn tenancy_creation_enforces_slot_and_occupancy_rules() {
    let fx = fixture().await.unwrap();
    let admin = create_caller(&fx.db, UserRole::Admin, "admin@example.com")
        .await
        .unwrap();
    let other = create_caller(&fx.db, UserRole::Tenant, "second@example.com")
        .await
        .unwrap();

    let base = NewTenancy {
        room_id: fx.room_id,
        slot: None,
        tenant_user_id: fx.tenant.user_id,
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        end_date: None,
        rental_price: Some(650.0),
        pending_signature: false,
    };

    // Single room rejects a slot.
    let err = fx
        .service
        .create_tenancy(
            &admin,
            NewTenancy {
                slot: Some(RoomSlot::A),
                ..base.clone()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let opened = fx.service.create_tenancy(&admin, base.clone()).await.unwrap();
    assert_eq!(opened.status, TenancyStatus::Occupied.as_str());

    // One active occupancy per room.
    let err = fx
        .service
        .create_tenancy(
            &admin,
            NewTenancy {
                tenant_user_id: other.user_id,
                ..base.clone()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));

    // Non-admins may not open tenancies.
    let err = fx.service.create_tenancy(&fx.tenant, base).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Authorization(_)));
}

#[tokio::test]
async fn shared_rooms_take_independent_slots() {
    let fx = fixture().await.unwrap();
    let admin = create_caller(&fx.db, UserRole::Admin, "admin@example.com")
        .await
        .unwrap();
    let second = create_caller(&fx.db, UserRole::Tenant, "second@example.com")
        .await
        .unwrap();

    let shared = fx
        .service
        .create_room(
            &admin,
            houseflow::repositories::CreateRoomRequest {
                house_id: fx.house_id,
                label: "3".to_string(),
                capacity: 2,
            },
        )
        .await
        .unwrap();

    let base = NewTenancy {
        room_id: shared.id,
        slot: None,
        tenant_user_id: fx.tenant.user_id,
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        end_date: None,
        rental_price: None,
        pending_signature: false,
    };

    // Two-person rooms require a slot.
    let err = fx.service.create_tenancy(&admin, base.clone()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    fx.service
        .create_tenancy(
            &admin,
            NewTenancy {
                slot: Some(RoomSlot::A),
                ..base.clone()
            },
        )
        .await
        .unwrap();

    // Slot B is still free; slot A is taken.
    fx.service
        .create_tenancy(
            &admin,
            NewTenancy {
                slot: Some(RoomSlot::B),
                tenant_user_id: second.user_id,
                ..base.clone()
            },
        )
        .await
        .unwrap();
    let err = fx
        .service
        .create_tenancy(
            &admin,
            NewTenancy {
                slot: Some(RoomSlot::A),
                tenant_user_id: second.user_id,
                ..base
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));
}

#[tokio::test]
async fn admins_can_end_a_tenancy_from_any_non_terminal_state() {
    let fx = fixture().await.unwrap();
    let admin = create_caller(&fx.db, UserRole::Admin, "admin@example.com")
        .await
        .unwrap();
    let tenancy_id = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::MoveOutInspectionDraft,
    )
    .await
    .unwrap();

    let ended = fx.service.end_tenancy(&admin, tenancy_id).await.unwrap();
    assert_eq!(ended.status, TenancyStatus::Ended.as_str());
    assert!(ended.end_date.is_some());

    let err = fx.service.end_tenancy(&admin, tenancy_id).await.unwrap_err();
    assert!(matches!(err, WorkflowError::State(_)));

    // Tenants cannot use the escape hatch.
    let other_id = create_tenancy_in_slot(
        &fx.db,
        fx.room_id,
        None,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();
    let err = fx.service.end_tenancy(&fx.tenant, other_id).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Authorization(_)));
}

#[tokio::test]
async fn coordinator_review_queue_holds_only_pending_intentions() {
    let fx = fixture().await.unwrap();
    let tenancy_a = create_tenancy_with_status(
        &fx.db,
        fx.room_id,
        &fx.tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    // A second house under the same coordinator, with its own tenant.
    let (house_b, room_b) = create_house_with_room(&fx.db).await.unwrap();
    assign_coordinator(&fx.db, house_b, &fx.coordinator).await.unwrap();
    let other_tenant = create_caller(&fx.db, UserRole::Tenant, "tenant2@example.com")
        .await
        .unwrap();
    let tenancy_b = create_tenancy_with_status(
        &fx.db,
        room_b,
        &other_tenant,
        TenancyStatus::Occupied,
    )
    .await
    .unwrap();

    let first = fx
        .service
        .submit_move_out_intention(&fx.tenant, tenancy_a, submission(false, Vec::new()))
        .await
        .unwrap();
    fx.service
        .submit_move_out_intention(&other_tenant, tenancy_b, submission(false, Vec::new()))
        .await
        .unwrap();

    let queue = fx
        .service
        .reviews_for_coordinator(&fx.coordinator)
        .await
        .unwrap();
    assert_eq!(queue.len(), 2);

    // A decided intention drops out of the queue.
    fx.service
        .review_move_out_intention(
            &fx.coordinator,
            first.id,
            ReviewDecision::Approve,
            "documented",
        )
        .await
        .unwrap();

    let queue = fx
        .service
        .reviews_for_coordinator(&fx.coordinator)
        .await
        .unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].tenancy_id, tenancy_b);
}
