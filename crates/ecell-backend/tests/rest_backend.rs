//! REST client against an in-process stand-in for the hosted API

use ecell_backend::{BackendConfig, RestObjectStorage, RestStore};
use ecell_content::prelude::*;
use ecell_content::{FallbackTier, MemoryCacheStore, ObjectStorage, StorageError};
use ecell_test_utils::{social_link_row, team_member_row};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::http::StatusCode;
use warp::Filter;

const KEY: &str = "anon-key";

#[derive(Default)]
struct Seen {
    requests: Mutex<Vec<String>>,
    keys: Mutex<Vec<String>>,
}

impl Seen {
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn table_rows(table: &str, query: &str) -> Option<Value> {
    match table {
        "team_members" => Some(json!([
            team_member_row("m4", "Arjun", "President", "2024-08-04"),
            team_member_row("m1", "Riya", "Volunteer", "2024-08-01"),
            team_member_row("m3", "Meera", "Vice-President", "2024-08-03"),
        ])),
        "member_social_links" if query.contains("member_id=eq.m4") => Some(json!([
            social_link_row("l1", "m4", "linkedin", "https://linkedin.com/in/arjun-s"),
        ])),
        "member_social_links" => Some(json!([])),
        _ => None,
    }
}

async fn serve() -> (SocketAddr, Arc<Seen>) {
    let seen = Arc::new(Seen::default());
    let with_seen = {
        let seen = seen.clone();
        warp::any().map(move || seen.clone())
    };

    let select = warp::get()
        .and(warp::path!("rest" / "v1" / String))
        .and(warp::query::raw())
        .and(warp::header::<String>("apikey"))
        .and(with_seen.clone())
        .map(|table: String, query: String, key: String, seen: Arc<Seen>| {
            seen.requests.lock().unwrap().push(format!("GET {table}?{query}"));
            seen.keys.lock().unwrap().push(key);
            match table_rows(&table, &query) {
                Some(rows) => warp::reply::with_status(warp::reply::json(&rows), StatusCode::OK),
                None => warp::reply::with_status(
                    warp::reply::json(&json!({"message": "upstream down"})),
                    StatusCode::SERVICE_UNAVAILABLE,
                ),
            }
        });

    let insert = warp::post()
        .and(warp::path!("rest" / "v1" / String))
        .and(warp::header::<String>("prefer"))
        .and(warp::body::json::<Vec<Value>>())
        .and(with_seen.clone())
        .map(|table: String, prefer: String, rows: Vec<Value>, seen: Arc<Seen>| {
            seen.requests.lock().unwrap().push(format!("POST {table} {prefer}"));
            let stored: Vec<Value> = rows
                .into_iter()
                .enumerate()
                .map(|(i, mut row)| {
                    row["id"] = json!(format!("new-{i}"));
                    row
                })
                .collect();
            warp::reply::with_status(warp::reply::json(&stored), StatusCode::CREATED)
        });

    let upload = warp::post()
        .and(warp::path!("storage" / "v1" / "object" / "uploads" / ..))
        .and(warp::path::tail())
        .and(warp::header::<String>("content-type"))
        .and(warp::body::bytes())
        .and(with_seen)
        .map(
            |tail: warp::path::Tail, content_type: String, body: warp::hyper::body::Bytes, seen: Arc<Seen>| {
                seen.requests
                    .lock()
                    .unwrap()
                    .push(format!("UPLOAD {} {content_type} {}", tail.as_str(), body.len()));
                if tail.as_str().contains("dupe") {
                    warp::reply::with_status(
                        warp::reply::json(&json!({"error": "Duplicate"})),
                        StatusCode::CONFLICT,
                    )
                } else {
                    warp::reply::with_status(
                        warp::reply::json(&json!({"Key": tail.as_str()})),
                        StatusCode::OK,
                    )
                }
            },
        );

    let (addr, server) = warp::serve(select.or(insert).or(upload)).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, seen)
}

fn config(addr: SocketAddr) -> BackendConfig {
    BackendConfig::new(format!("http://{addr}"), KEY).with_timeout_secs(5)
}

#[tokio::test]
async fn roster_through_rest_store() {
    let (addr, seen) = serve().await;
    let store = Arc::new(RestStore::new(&config(addr)).unwrap());
    let directory = TeamDirectory::new(ContentLoader::new(store, Arc::new(MemoryCacheStore::default())));

    let view = directory.load_roster("2024-25", Vec::new()).await;

    assert_eq!(view.used_fallback, FallbackTier::None);
    let names: Vec<_> = view.cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Arjun", "Meera", "Riya"]);
    assert_eq!(view.cards[0].handles.linkedin.as_deref(), Some("@arjun-s"));

    let requests = seen.requests();
    assert!(requests.contains(
        &"GET team_members?select=*&batch_year=eq.2024-25&order=created_at.desc".to_string()
    ));
    assert!(requests.contains(&"GET member_social_links?select=*&member_id=eq.m4".to_string()));
    assert!(seen.keys.lock().unwrap().iter().all(|k| k == KEY));
}

#[tokio::test]
async fn http_error_falls_back_to_defaults() {
    let (addr, _seen) = serve().await;
    let loader = ContentLoader::new(
        Arc::new(RestStore::new(&config(addr)).unwrap()),
        Arc::new(MemoryCacheStore::default()),
    );

    let outcome = loader
        .load(LoadOptions::<GalleryItem>::new().with_defaults(defaults::gallery_items()))
        .await;

    assert_eq!(outcome.used_fallback, FallbackTier::Default);
    assert_eq!(outcome.rows.len(), 3);
    let error = outcome.error.unwrap();
    assert!(error.contains("503"), "{error}");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    // Bind and drop to get a port nobody listens on
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let store = RestStore::new(&config(addr)).unwrap();

    let err = store
        .select(&SelectQuery::all(Collection::Testimonials))
        .await
        .unwrap_err();
    assert!(matches!(err, ecell_content::StoreError::Transport(_)), "{err}");
}

#[tokio::test]
async fn insert_asks_for_representation() {
    let (addr, seen) = serve().await;
    let store = RestStore::new(&config(addr)).unwrap();

    let rows = store
        .insert(Collection::Testimonials, vec![json!({"name": "Alum", "message": "Great club"})])
        .await
        .unwrap();

    assert_eq!(rows, vec![json!({"id": "new-0", "name": "Alum", "message": "Great club"})]);
    assert_eq!(seen.requests(), vec!["POST testimonials return=representation".to_string()]);
}

#[tokio::test]
async fn uploads_return_public_urls() {
    let (addr, seen) = serve().await;
    let storage = RestObjectStorage::new(&config(addr)).unwrap();

    let url = storage
        .upload("team/member_1.png", vec![0; 4], "image/png")
        .await
        .unwrap();
    assert_eq!(
        url,
        format!("http://{addr}/storage/v1/object/public/uploads/team/member_1.png")
    );
    assert_eq!(seen.requests(), vec!["UPLOAD team/member_1.png image/png 4".to_string()]);

    let err = storage
        .upload("team/dupe.png", vec![1], "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists(path) if path == "team/dupe.png"));
}
