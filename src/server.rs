use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use std::sync::Arc;

use meme_stream_lib::trending::{resolve_topic, TRENDING_TOPICS};
use meme_stream_lib::{logger, HttpMemeSearch, MemeSearch, MemeStreamConfig, SearchOutcome};

struct AppState {
    search: Arc<HttpMemeSearch>,
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
}

#[get("/api/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json("Server is running")
}

#[get("/api/trending")]
async fn trending() -> impl Responder {
    HttpResponse::Ok().json(TRENDING_TOPICS)
}

#[get("/api/search")]
async fn search_memes(
    params: web::Query<SearchParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = params.into_inner().q;
    run_blocking(&data, move |s| s.search(&query)).await
}

#[get("/api/topic/{name}")]
async fn search_topic(path: web::Path<String>, data: web::Data<AppState>) -> impl Responder {
    let query = resolve_topic(&path.into_inner(), &mut rand::thread_rng());
    let outcome = run_blocking(&data, {
        let query = query.clone();
        move |s| s.search(&query)
    })
    .await;
    log::info!("Topic search for '{}' finished", query);
    outcome
}

#[get("/api/ticker")]
async fn ticker_memes(data: web::Data<AppState>) -> impl Responder {
    run_blocking(&data, |s| s.ticker()).await
}

/// Fetches block on the network, so they run on actix's blocking pool.
async fn run_blocking<F>(data: &web::Data<AppState>, f: F) -> HttpResponse
where
    F: FnOnce(&HttpMemeSearch) -> SearchOutcome + Send + 'static,
{
    let search = data.search.clone();
    match web::block(move || f(&search)).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            log::error!("Search task failed: {}", e);
            HttpResponse::InternalServerError().json("Search failed")
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    logger::init();

    let config = match std::env::var("MEME_STREAM_CONFIG") {
        Ok(path) => MemeStreamConfig::load(&path),
        Err(_) => Ok(MemeStreamConfig::default()),
    }
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    // The blocking reqwest client owns a runtime and must not be built inside an async context.
    let meme_search = web::block(move || MemeSearch::from_config(&config))
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    let state = web::Data::new(AppState {
        search: Arc::new(meme_search),
    });

    let bind = std::env::var("MEME_STREAM_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("Starting Web Server at http://{}", bind);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(health_check)
            .service(trending)
            .service(search_memes)
            .service(search_topic)
            .service(ticker_memes)
    })
    .bind(bind)?
    .run()
    .await
}
