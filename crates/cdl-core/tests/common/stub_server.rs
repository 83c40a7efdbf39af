//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses keyed by request target (path plus query). Unknown
//! targets get 404. Every request target is recorded in arrival order.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Clone)]
struct Canned {
    status: u16,
    body: Vec<u8>,
}

type Routes = Arc<Mutex<HashMap<String, Canned>>>;

pub struct StubServer {
    base: String,
    routes: Routes,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Binds to an ephemeral port and serves in a background thread until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Routes = Arc::new(Mutex::new(HashMap::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));
        {
            let routes = Arc::clone(&routes);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for stream in listener.incoming().flatten() {
                    let routes = Arc::clone(&routes);
                    let requests = Arc::clone(&requests);
                    thread::spawn(move || handle(stream, &routes, &requests));
                }
            });
        }
        Self {
            base: format!("http://127.0.0.1:{}", port),
            routes,
            requests,
        }
    }

    /// Absolute URL for a request target, e.g. `/img/1.jpg`.
    pub fn url(&self, target: &str) -> String {
        format!("{}{}", self.base, target)
    }

    pub fn ok(&self, target: &str, body: impl Into<Vec<u8>>) {
        self.respond(target, 200, body);
    }

    pub fn respond(&self, target: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.routes.lock().unwrap().insert(
            target.to_string(),
            Canned {
                status,
                body: body.into(),
            },
        );
    }

    /// Request targets seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &Routes, requests: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    requests.lock().unwrap().push(target.clone());

    let canned = routes.lock().unwrap().get(&target).cloned().unwrap_or(Canned {
        status: 404,
        body: b"not found".to_vec(),
    });
    let reason = match canned.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        canned.status,
        reason,
        canned.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&canned.body);
}
