use actix_multipart::form::MultipartForm;
use actix_web::{post, web, Responder};

use crate::handlers::process_handler::{handle_process_email, ProcessEmailForm};
use crate::routes::app_state::AppState;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(process_email);
}

#[post("/api/process_email")]
async fn process_email(
    data: web::Data<AppState>,
    form: MultipartForm<ProcessEmailForm>,
) -> impl Responder {
    handle_process_email(data, form.into_inner()).await
}
