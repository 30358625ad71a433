use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use core::time::Duration;
use regid::{
    CodeAssigner, Credential, Directory, DirectoryError, DocumentStore, HttpDirectory, NoSleep,
    OverrideTable, Pipeline, RegionError,
};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

const API_KEY: &str = "test-secret";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .is_some_and(|value| value.as_bytes() == API_KEY.as_bytes())
}

async fn regions(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!([
        { "code": 1, "name": "Hà Nội" },
        { "code": "35", "name": "Hà Nam" },
        { "code": "48", "name": "Đà Nẵng" },
    ])))
}

async fn sub_regions(
    headers: HeaderMap,
    Path(code): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    match code.as_str() {
        "1" => Ok(Json(json!([
            {
                "code": "00004",
                "name": "Ba Đình",
                "fullName": "Phường Ba Đình",
                "legacy": [
                    { "code": "00001", "name": "Phúc Xá", "fullName": "Phường Phúc Xá" }
                ]
            }
        ]))),
        "35" => Ok(Json(json!([
            { "code": 13285, "name": "Phủ Lý", "fullName": "Phường Phủ Lý" }
        ]))),
        "7/b?c#d" => Ok(Json(json!([
            { "code": "1", "name": "Odd", "fullName": "Xã Odd" }
        ]))),
        _ => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn serve() -> SocketAddr {
    let app = Router::new()
        .route("/api/regions", get(regions))
        .route("/api/regions/{code}/sub-regions", get(sub_regions));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, key: &str) -> HttpDirectory {
    let credential = Credential::new("x-api-key", key).unwrap();
    HttpDirectory::new(
        &format!("http://{addr}/api/"),
        Some(credential),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn lists_regions_with_credential() {
    let addr = serve().await;
    let directory = client(addr, API_KEY);

    let regions = directory.list_regions().await.unwrap();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0].code, "1");
    assert_eq!(regions[0].name, "Hà Nội");

    let subs = directory.list_sub_regions("1").await.unwrap();
    assert_eq!(subs[0].full_name.as_deref(), Some("Phường Ba Đình"));
    assert_eq!(subs[0].legacy[0].name, "Phúc Xá");
}

#[tokio::test]
async fn wrong_credential_is_a_status_error() {
    let addr = serve().await;
    let directory = client(addr, "wrong");

    let err = directory.list_regions().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Status { status: 401, .. }));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, API_KEY).list_regions().await.unwrap_err();
    assert!(matches!(err, DirectoryError::Transport { .. }));
}

#[tokio::test]
async fn region_code_stays_one_path_segment() {
    let addr = serve().await;
    let directory = client(addr, API_KEY);

    let subs = directory.list_sub_regions("7/b?c#d").await.unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].name, "Odd");
}

#[tokio::test]
async fn truncated_error_body_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        // Promises more bytes than it sends, then hangs up.
        socket
            .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
            .await
            .unwrap();
    });

    let err = client(addr, API_KEY).list_regions().await.unwrap_err();
    match err {
        DirectoryError::Status { status, body, .. } => {
            assert_eq!(status, 502);
            assert!(body.starts_with("<unreadable body: "), "{body}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn base_url_must_be_absolute() {
    assert!(matches!(
        HttpDirectory::new("not a url", None, Duration::from_secs(1)),
        Err(DirectoryError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        HttpDirectory::new("mailto:ops@example.org", None, Duration::from_secs(1)),
        Err(DirectoryError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn credential_rejects_invalid_header() {
    assert!(matches!(
        Credential::new("bad header", API_KEY),
        Err(DirectoryError::InvalidCredential { .. })
    ));
    assert!(matches!(
        Credential::new("x-api-key", "line\nbreak"),
        Err(DirectoryError::InvalidCredential { .. })
    ));
}

#[tokio::test]
async fn end_to_end_export_isolates_failed_region() {
    let addr = serve().await;
    let dir = tempfile::tempdir().unwrap();
    let report = Pipeline::<_, NoSleep>::new(
        client(addr, API_KEY),
        DocumentStore::new(dir.path()),
        CodeAssigner::new(OverrideTable::builtin()),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(report.written.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].region.name, "Đà Nẵng");
    assert!(matches!(
        report.failures[0].error,
        RegionError::Fetch(DirectoryError::Status { status: 500, .. })
    ));

    let store = DocumentStore::new(dir.path());
    let hanoi = store.read_region("HN").unwrap();
    assert_eq!(hanoi.sub_regions[0].prefix, "Phường");
    let hanam = store.read_region("HNA").unwrap();
    assert_eq!(hanam.sub_regions[0].service_code, "13285");

    let index = store.read_index().unwrap();
    let names: Vec<_> = index.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Đà Nẵng", "Hà Nam", "Hà Nội"]);
    assert!(!store.region_path("DNG").exists());
}
