use actix_web::{middleware::Logger, web, App, HttpServer};
use bolsa_series::{config::DbConfig, Store, TickerUniverse};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

mod api;

/// Shared handler state: the pooled store plus the ticker universe
/// enumerated once at startup.
pub struct AppState {
    pub store: Store,
    pub universe: TickerUniverse,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "actix_web=info,bolsa_web=info");
    }
    env_logger::init();

    // build pool from .env, then enumerate the selectable tickers
    let store = Store::connect(&DbConfig::from_env()).expect("create store pool");
    let universe = TickerUniverse::load(&store)
        .await
        .expect("enumerate ticker universe");
    log::info!("serving {} tickers", universe.len());

    let state = web::Data::new(AppState { store, universe });

    // create API documentation
    use api::*;
    #[derive(OpenApi)]
    #[openapi(paths(
        series::tickers,
        series::metrics,
        series::historical,
        series::ohlc
    ))]
    struct ApiDoc;
    let openapi = ApiDoc::openapi();

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            // api endpoints
            .service(series::tickers)
            .service(series::metrics)
            .service(series::historical)
            .service(series::ohlc)
            // api documentation
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/openapi.json", openapi.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
