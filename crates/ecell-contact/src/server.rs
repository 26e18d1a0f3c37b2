//! HTTP endpoint for the contact form
//!
//! `POST /` with a JSON body. Browsers on any origin may call it; the
//! preflight allows the headers the site's backend client sends.

use crate::error::ContactError;
use crate::form::ContactForm;
use crate::relay::ContactRelay;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Headers allowed on cross-origin requests
pub const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// Contact form routes with CORS
pub fn routes(
    relay: Arc<ContactRelay>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(ALLOWED_HEADERS)
        .allow_methods(["POST", "OPTIONS"]);

    warp::path::end()
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(warp::any().map(move || relay.clone()))
        .and_then(handle_submission)
        .with(cors)
}

async fn handle_submission(body: Bytes, relay: Arc<ContactRelay>) -> Result<impl Reply, Infallible> {
    let result = match serde_json::from_slice::<ContactForm>(&body) {
        Ok(form) => relay.submit(&form).await,
        Err(e) => Err(ContactError::InvalidBody(e.to_string())),
    };

    Ok(match result {
        Ok(response) => warp::reply::with_status(warp::reply::json(&response), StatusCode::OK),
        Err(e) => warp::reply::with_status(
            warp::reply::json(&json!({ "error": e.to_string() })),
            e.status_code(),
        ),
    })
}

/// Serve until ctrl-c
pub async fn serve(relay: Arc<ContactRelay>, addr: SocketAddr) -> Result<(), warp::Error> {
    let (bound, server) = warp::serve(routes(relay)).try_bind_with_graceful_shutdown(addr, async {
        let _ = tokio::signal::ctrl_c().await;
    })?;
    info!(%bound, "contact relay listening");
    server.await;
    info!("contact relay shut down");
    Ok(())
}
