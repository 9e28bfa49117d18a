use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};

use email_triage::config;
use email_triage::routes;
use email_triage::routes::app_state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    config::init_logging();

    // Built once; requests only ever read it. A failed init is kept so the
    // server can answer 503 instead of refusing to start.
    let state = AppState::from_config();

    let address = config::bind_address();
    let port = config::bind_port();
    log::info!("Starting server on http://{}:{}", address, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::process_routes::init_routes)
            .service(Files::new("/", "./static").index_file("index.html"))
    })
    .bind((address, port))?
    .run()
    .await
}
