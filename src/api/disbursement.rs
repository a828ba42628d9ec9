use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::drive::Uploader;
use crate::model::disbursement::SalaryRecord;
use crate::store::RecordStore;

#[derive(Deserialize, ToSchema)]
pub struct SubmitDisbursement {
    #[schema(example = "Alice")]
    pub name: String,

    #[schema(example = "007")]
    pub worker_id: String,

    #[schema(example = "2024-03-15", format = "date")]
    pub date: String,

    /// Raw salary text as typed into the form; validation owns the parsing.
    #[schema(example = "1000")]
    pub salary: String,
}

#[derive(Serialize, ToSchema)]
pub struct DisbursementResponse {
    pub message: String,

    #[schema(example = "666.40")]
    pub primary: String,
    #[schema(example = "133.60")]
    pub expenses: String,
    #[schema(example = "200.00")]
    pub secondary: String,

    #[schema(example = "Alice_007_2024-03-15.txt")]
    pub file_name: String,
    pub drive_file_id: String,
}

/// Submit a disbursement
#[utoipa::path(
    post,
    path = "/api/v1/disbursement",
    request_body = SubmitDisbursement,
    responses(
        (status = 200, description = "Salary split, slip written and uploaded", body = DisbursementResponse),
        (status = 400, description = "Validation failed, nothing written", body = Object, example = json!({
            "message": "Salary must be a number of at least 850.00."
        })),
        (status = 500, description = "Slip could not be written locally"),
        (status = 502, description = "Slip written locally but the upload failed", body = Object, example = json!({
            "message": "Slip saved locally but the upload failed",
            "file_name": "Alice_007_2024-03-15.txt",
            "local_path": "records/Alice_007_2024-03-15.txt"
        }))
    ),
    tag = "Disbursement"
)]
pub async fn submit_disbursement(
    store: web::Data<RecordStore>,
    uploader: web::Data<dyn Uploader>,
    payload: web::Json<SubmitDisbursement>,
) -> actix_web::Result<impl Responder> {
    let record = match SalaryRecord::compute(
        &payload.name,
        &payload.worker_id,
        &payload.date,
        &payload.salary,
    ) {
        Ok(record) => record,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": e.to_string()
            })));
        }
    };

    let slip = RecordStore::render(&record);
    let path = match store.write(&record) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!(error = %e, worker_id = %record.worker_id, "Failed to write slip");
            return Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Failed to write the disbursement slip"
            })));
        }
    };

    let file_name = record.file_name();
    match uploader
        .upload(&file_name, slip.into_bytes(), "text/plain")
        .await
    {
        Ok(drive_file_id) => Ok(HttpResponse::Ok().json(DisbursementResponse {
            message: "Disbursement recorded and uploaded".to_string(),
            primary: format!("{:.2}", record.primary_amount),
            expenses: format!("{:.2}", record.expense_amount),
            secondary: format!("{:.2}", record.secondary_amount),
            file_name,
            drive_file_id,
        })),
        Err(e) => {
            tracing::error!(error = %e, file = %file_name, "Drive upload failed");
            // The slip is already on disk at this point.
            Ok(HttpResponse::BadGateway().json(json!({
                "message": "Slip saved locally but the upload failed",
                "file_name": file_name,
                "local_path": path.display().to_string()
            })))
        }
    }
}
