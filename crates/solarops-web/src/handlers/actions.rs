//! Form actions forwarded to the backend
//!
//! Every action answers with a `303 See Other` back to the page it came from,
//! carrying a `notice` or `error` flash.

use crate::{handlers::Flash, state::AppState};
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use solarops_client::ClientResult;
use solarops_core::types::{BroadcastRequest, NewStaff};
use solarops_core::utils::{schedule_at, validate_broadcast, validate_new_staff};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Staff picker used by the assign forms
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssignForm {
    /// Staff member to assign
    pub staff_id: String,
}

/// Fields of the broadcast form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastForm {
    /// Selected customer ids; the checkbox name repeats
    pub recipients: Vec<String>,
    /// Message body
    pub message: String,
    /// Optional schedule date, `YYYY-MM-DD`
    pub date: String,
    /// Optional schedule time, `HH:MM`
    pub time: String,
}

impl BroadcastForm {
    /// Parse an urlencoded body, collecting every `recipients` value
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid urlencoded data.
    pub fn parse(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body)?;
        let mut form = Self::default();
        for (name, value) in pairs {
            match name.as_str() {
                "recipients" => form.recipients.push(value),
                "message" => form.message = value,
                "date" => form.date = value,
                "time" => form.time = value,
                _ => {}
            }
        }
        Ok(form)
    }

    /// Request body for the backend
    #[must_use]
    pub fn into_request(self) -> BroadcastRequest {
        let scheduled_at = schedule_at(&self.date, &self.time);
        BroadcastRequest {
            recipients: self.recipients,
            message: self.message.trim().to_string(),
            scheduled_at,
        }
    }
}

fn redirect(target: &str, flash: &Flash) -> Redirect {
    Redirect::to(&flash.location(target))
}

/// Redirect with the success notice, or with the backend's message (or the
/// given fallback) when the request failed
fn finish<T>(
    target: &str,
    action: &str,
    result: ClientResult<T>,
    success: &str,
    failure: Option<&str>,
) -> Redirect {
    let flash = match result {
        Ok(_) => {
            info!("{} succeeded", action);
            Flash::Notice(success.to_string())
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Flash::Error(failure.map_or_else(|| e.to_string(), ToString::to_string))
        }
    };
    redirect(target, &flash)
}

fn lead_page(id: &str) -> String {
    format!("/leads/{}", urlencoding::encode(id))
}

/// Assign a booking to a staff member
pub async fn assign_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<AssignForm>,
) -> Redirect {
    let target = lead_page(&id);
    let staff_id = form.staff_id.trim();
    if staff_id.is_empty() {
        return redirect(&target, &Flash::Error("Please select a staff member".to_string()));
    }
    let result = state.client.assign_lead(&id, staff_id).await;
    finish(
        &target,
        "assign staff to booking",
        result,
        "Staff assigned successfully",
        Some("Failed to assign staff. Please try again."),
    )
}

/// Remove the staff assignment from a booking
pub async fn unassign_lead(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    let result = state.client.unassign_lead(&id).await;
    finish(
        &lead_page(&id),
        "unassign staff from booking",
        result,
        "Staff unassigned successfully",
        Some("Failed to unassign staff. Please try again."),
    )
}

/// Add a staff member after validating the form
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewStaff>,
) -> Redirect {
    let form = NewStaff {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.phone.trim().to_string(),
        password: form.password,
    };
    if let Err(e) = validate_new_staff(&form) {
        warn!("Rejected staff form: {}", e);
        return redirect("/staff", &Flash::Error(e.user_message()));
    }
    let result = state.client.create_staff(&form).await;
    finish("/staff", "add staff", result, "Staff added successfully!", None)
}

/// Delete a staff member
pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    let result = state.client.delete_staff(&id).await;
    finish(
        "/staff",
        "delete staff",
        result,
        "Staff member deleted successfully",
        None,
    )
}

/// Assign an AMC request to a staff member
pub async fn assign_amc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<AssignForm>,
) -> Redirect {
    let staff_id = form.staff_id.trim();
    if staff_id.is_empty() {
        return redirect("/amc", &Flash::Error("Please select a staff member".to_string()));
    }
    let result = state.client.assign_amc(&id, staff_id).await;
    finish("/amc", "assign AMC request", result, "Staff assigned successfully", None)
}

/// Mark an AMC request resolved
pub async fn complete_amc(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    let result = state.client.resolve_amc(&id).await;
    finish("/amc", "complete AMC request", result, "AMC request completed", None)
}

/// Mark a complaint resolved
pub async fn resolve_complaint(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Redirect {
    let result = state.client.resolve_complaint(&id).await;
    finish(
        "/complaints",
        "resolve complaint",
        result,
        "Complaint resolved",
        None,
    )
}

/// Send or schedule a broadcast to the selected customers
pub async fn send_broadcast(State(state): State<Arc<AppState>>, body: String) -> Redirect {
    let form = match BroadcastForm::parse(&body) {
        Ok(form) => form,
        Err(e) => {
            warn!("Malformed broadcast form: {}", e);
            return redirect("/pulse", &Flash::Error("Invalid form submission".to_string()));
        }
    };
    if let Err(e) = validate_broadcast(&form.recipients, &form.message) {
        return redirect("/pulse", &Flash::Error(e.user_message()));
    }

    let request = form.into_request();
    let count = request.recipients.len();
    let success = if request.scheduled_at.is_some() {
        format!("Broadcast scheduled for {count} recipient(s)")
    } else {
        format!("Broadcast sent to {count} recipient(s)")
    };
    let result = state.client.send_broadcast(&request).await;
    finish("/pulse", "send broadcast", result, &success, None)
}
