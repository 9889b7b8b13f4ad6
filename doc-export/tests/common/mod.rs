// Minimal HTTP/1.1 server standing in for the ERP backend and file host.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub type Routes = HashMap<String, (u16, Vec<u8>)>;

pub struct TestServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<String>>>,
    routes: Arc<Mutex<Routes>>,
}

impl TestServer {
    pub fn mount(&self, routes: Routes) {
        self.routes.lock().unwrap().extend(routes);
    }
}

pub fn route(method: &str, path: &str, status: u16, body: &[u8]) -> (String, (u16, Vec<u8>)) {
    (format!("{} {}", method, path), (status, body.to_vec()))
}

/// Serve mounted routes (keyed by "METHOD /path"); anything else answers 404.
pub async fn serve() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();
    let routes = Arc::new(Mutex::new(Routes::new()));
    let served = routes.clone();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let routes = served.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&head).to_string();
                let key = head
                    .lines()
                    .next()
                    .and_then(|line| line.rsplit_once(' '))
                    .map(|(k, _)| k.to_string())
                    .unwrap_or_default();
                seen.lock().unwrap().push(key.clone());

                let found = routes.lock().unwrap().get(&key).cloned();
                let (status, body) = found
                    .unwrap_or((404, b"not found".to_vec()));
                let response_head = format!(
                    "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(response_head.as_bytes()).await;
                let _ = stream.write_all(&body).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    TestServer {
        base_url: format!("http://{}", addr),
        requests,
        routes,
    }
}

/// Listing for order 12: two tramite files, one of which is deletable, and a sales invoice.
pub fn order_12_routes(base_url: &str) -> Routes {
    let listing = format!(
        r#"[
            {{"id": 1, "category": "tramite", "description": "DUCA importación", "file_name": "duca.pdf",
              "file_url": "{base}/files/duca.pdf", "deletable": false}},
            {{"id": 2, "category": "tramite", "description": "BL #2025/A!", "file_name": "bl",
              "file_url": "{base}/files/bl", "deletable": true, "source_model": "attachment", "source_id": 20}},
            {{"id": 3, "category": "factura_venta", "description": "Factura 45", "file_name": "f45.xml",
              "file_url": "{base}/files/f45.xml", "deletable": false}}
        ]"#,
        base = base_url
    );
    Routes::from([
        route(
            "GET",
            "/orders/service-orders/12/documents/",
            200,
            listing.as_bytes(),
        ),
        route("GET", "/files/duca.pdf", 200, b"duca"),
        route("GET", "/files/bl", 200, b"bl"),
        route("GET", "/files/f45.xml", 200, b"<xml/>"),
        route("DELETE", "/documents/attachment/20/", 204, b""),
    ])
}

/// Config file pointing at `base_url` and writing archives into `output_dir`.
pub fn config_for(base_url: &str, output_dir: &std::path::Path) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    write!(
        file,
        "api:\n  base_url: \"{}\"\n  timeout_secs: 5\nexport:\n  output_dir: \"{}\"\n",
        base_url,
        output_dir.display()
    )
    .unwrap();
    file
}
