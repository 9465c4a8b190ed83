use std::io::Write;

use pdm_dashboard::config::DashboardConfig;
use pdm_dashboard::data::loader;
use pdm_dashboard::pipeline::RenderOptions;
use pdm_dashboard::server::{build_router, AppState};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const CSV: &str = "\
UDI,Product ID,Type,Air temperature [K],Process temperature [K],Rotational speed [rpm],Torque [Nm],Tool wear [min],Target,Failure Type
1,M14860,M,298.1,308.6,1551,42.8,0,0,No Failure
2,L47181,L,298.2,308.7,1408,46.3,3,0,No Failure
3,L47182,L,298.1,308.5,1498,49.4,5,0,No Failure
4,L47183,L,298.2,308.6,1433,39.5,7,1,Power Failure
";

async fn send_raw(addr: std::net::SocketAddr, path: &str) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

async fn spawn_dashboard(csv: &str) -> std::net::SocketAddr {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("tempfile");
    file.write_all(csv.as_bytes()).expect("write csv");
    let dataset = loader::load_file(file.path()).expect("load dataset");

    let config = DashboardConfig::default();
    let app = build_router(AppState::new(dataset, RenderOptions::static_page(&config)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

#[tokio::test]
async fn root_returns_the_full_dashboard() {
    let addr = spawn_dashboard(CSV).await;

    let (status, head, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("content-type: text/html"));
    assert!(body.contains("<title>Predictive Maintenance Dashboard</title>"));
    assert!(body.contains("25.00%"));
    for id in ["scatter", "box", "bar"] {
        assert!(body.contains(&format!(r#"<div id="{id}" class="plot">"#)), "{id}");
    }
}

#[tokio::test]
async fn repeated_requests_render_identically() {
    let addr = spawn_dashboard(CSV).await;
    let (_, _, first) = send_raw(addr, "/").await;
    let (_, _, second) = send_raw(addr, "/").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn other_routes_are_not_served() {
    let addr = spawn_dashboard(CSV).await;
    let (status, _, _) = send_raw(addr, "/metrics").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn dataset_without_failure_type_still_serves() {
    let csv = "Type,Rotational speed [rpm],Torque [Nm],Tool wear [min],Target\nL,1500,40.0,3,0\n";
    let addr = spawn_dashboard(csv).await;
    let (status, _, body) = send_raw(addr, "/").await;
    assert_eq!(status, 200);
    assert!(body.contains("No data for this chart"));
    assert!(body.contains(r#"<div id="scatter" class="plot">"#));
}
