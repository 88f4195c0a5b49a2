use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use guardpost_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    assignment::{
        approve_assignment, create_assignment, end_assignment, get_assignment, list_assignments,
        reject_assignment, transfer_assignment,
    },
    dashboard::get_dashboard,
    document::{create_document, delete_document, list_documents, list_expiring},
    health::{healthz, readyz},
    ledger::{edit_entry, get_entry, list_entries, record_entry, report, set_classification},
    meeting::{cancel_meeting, list_meetings, schedule_meeting},
    messaging::{
        delete_message, inbox, list_broadcasts, mark_broadcast_read, mark_message_read,
        send_broadcast, send_message, sent,
    },
    site::{
        beat_occupancy, create_beat, create_location, get_beat, get_location, list_beats,
        list_locations, update_beat, update_location,
    },
    staff::{
        approve_staff, create_account, get_me, get_staff, list_staff, register_self,
        register_staff, reject_staff, set_user_status,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Personnel
        .route("/registrations", post(register_self))
        .route("/staff", post(register_staff).get(list_staff))
        .route("/staff/accounts", post(create_account))
        .route("/staff/{id}", get(get_staff))
        .route("/staff/{id}/approve", post(approve_staff))
        .route("/staff/{id}/reject", post(reject_staff))
        .route("/users/@me", get(get_me))
        .route("/users/{id}/status", patch(set_user_status))
        // Sites
        .route("/locations", post(create_location).get(list_locations))
        .route("/locations/{id}", get(get_location).patch(update_location))
        .route("/beats", post(create_beat).get(list_beats))
        .route("/beats/{id}", get(get_beat).patch(update_beat))
        .route("/beats/{id}/occupancy", get(beat_occupancy))
        // Assignments
        .route("/assignments", post(create_assignment).get(list_assignments))
        .route("/assignments/{id}", get(get_assignment))
        .route("/assignments/{id}/approve", post(approve_assignment))
        .route("/assignments/{id}/reject", post(reject_assignment))
        .route("/assignments/{id}/end", post(end_assignment))
        .route("/assignments/{id}/transfer", post(transfer_assignment))
        // Messaging
        .route("/messages", post(send_message))
        .route("/messages/inbox", get(inbox))
        .route("/messages/sent", get(sent))
        .route("/messages/{id}/read", post(mark_message_read))
        .route("/messages/{id}", delete(delete_message))
        .route("/broadcasts", post(send_broadcast).get(list_broadcasts))
        .route("/broadcasts/{id}/read", post(mark_broadcast_read))
        // Ledger
        .route("/ledger", post(record_entry).get(list_entries))
        .route("/ledger/report", get(report))
        .route("/ledger/{id}", get(get_entry).patch(edit_entry))
        .route("/ledger/{id}/classification", post(set_classification))
        // Documents
        .route("/documents", post(create_document).get(list_documents))
        .route("/documents/expiring", get(list_expiring))
        .route("/documents/{id}", delete(delete_document))
        // Meetings
        .route("/meetings", post(schedule_meeting).get(list_meetings))
        .route("/meetings/{id}/cancel", post(cancel_meeting))
        // Dashboard
        .route("/dashboard", get(get_dashboard))
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
