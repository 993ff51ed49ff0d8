use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::PurchaseRequest;

/// Contact fields are snapshotted onto the request at submission time and do
/// not follow later profile edits.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestPayload {
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestBody {
    pub car_id: Uuid,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
    #[serde(default)]
    pub message: String,
}

impl CreateRequestBody {
    pub fn into_payload(self) -> (Uuid, CreateRequestPayload) {
        (
            self.car_id,
            CreateRequestPayload {
                contact_name: self.contact_name,
                contact_phone: self.contact_phone,
                contact_email: self.contact_email,
                message: self.message,
            },
        )
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequestStatusBody {
    pub status: String,
    #[serde(default)]
    pub manager_comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestCounts {
    pub total: i64,
    pub new: i64,
    pub approved: i64,
    pub rejected: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestList {
    pub items: Vec<PurchaseRequest>,
    pub counts: RequestCounts,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RequestDetail {
    pub request: PurchaseRequest,
    pub can_edit: bool,
    pub can_process: bool,
}
