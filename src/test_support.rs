//! Loopback HTTP fixtures for exercising the feed client without the real service.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A trimmed-down but realistic forecast document: two days, rain, snow and a 4 °C swing.
pub const FORECAST_BODY: &str = r#"{
    "cod": "200",
    "message": 0,
    "cnt": 4,
    "list": [
        {"main": {"temp": 6.0, "humidity": 81}, "weather": [{"main": "Rain", "description": "light rain"}], "rain": {"3h": 0.25}, "dt_txt": "2025-11-17 18:00:00"},
        {"main": {"temp": 2.0, "humidity": 90}, "weather": [{"main": "Snow", "description": "rain and snow"}], "rain": {"3h": 0.1}, "snow": {"3h": 0.4}, "dt_txt": "2025-11-17 21:00:00"},
        {"main": {"temp": 1.0, "humidity": 94}, "weather": [{"main": "Snow", "description": "snow"}], "snow": {"3h": 1.2}, "dt_txt": "2025-11-18 00:00:00"},
        {"main": {"temp": 1.5, "humidity": 88}, "weather": [{"main": "Clouds", "description": "overcast clouds"}], "dt_txt": "2025-11-18 03:00:00"}
    ],
    "city": {"name": "Grenoble", "country": "FR"}
}"#;

/// Serves exactly one HTTP response on a loopback port.
///
/// Returns the URL to request and a handle resolving to the request line that was received.
pub async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{addr}/data/2.5/forecast"), handle)
}
