use crate::api::disbursement::{DisbursementResponse, SubmitDisbursement};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salary Disbursement API",
        version = "1.0.0",
        description = r#"
## Salary Disbursement Service

Accepts a salary disbursement submission, splits the gross amount across the
secondary account (20%), expenses (16.7% of the remainder) and the primary
account, archives the slip as a local text file, and uploads it to Google
Drive.

### Response Format
- JSON-based RESTful responses
- A failed upload after a successful local save is reported distinctly

Built with **Rust**, **Actix Web** and **Utoipa**.
"#,
    ),
    paths(crate::api::disbursement::submit_disbursement),
    components(schemas(SubmitDisbursement, DisbursementResponse)),
    tags(
        (name = "Disbursement", description = "Salary split, slip archival and Drive upload"),
    )
)]
pub struct ApiDoc;
