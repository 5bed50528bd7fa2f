//! Minimal HTTP/1.1 server for tests.
//!
//! Serves fixed bodies by path, answers unknown paths with 404, records every
//! requested path, and can announce a longer body than it sends to simulate a
//! connection dropped mid-transfer.

use reqwest::blocking::Client;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Clone)]
enum Route {
    Full { status: u16, body: Vec<u8> },
    Truncated { declared: usize, body: Vec<u8> },
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    requests: Vec<String>,
}

pub struct TestServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl TestServer {
    /// Starts a server in a background thread; it lives until the process exits.
    pub fn start(routes: Vec<(&str, u16, Vec<u8>)>) -> Self {
        let mut state = State::default();
        for (path, status, body) in routes {
            state
                .routes
                .insert(path.to_string(), Route::Full { status, body });
        }
        let state = Arc::new(Mutex::new(state));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// e.g. "http://127.0.0.1:12345/docs"
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Serves `body` at `path` but declares `declared` bytes, then hangs up.
    pub fn truncate(&self, path: &str, declared: usize, body: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), Route::Truncated { declared, body });
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// Client that reaches the loopback server directly, whatever proxy the
/// environment configures.
pub fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

/// A url nobody listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let route = {
        let mut state = state.lock().unwrap();
        state.requests.push(path.clone());
        state.routes.get(&path).cloned()
    };
    let (status, declared, body) = match route {
        Some(Route::Full { status, body }) => (status, body.len(), body),
        Some(Route::Truncated { declared, body }) => (200, declared, body),
        None => (404, 9, b"not found".to_vec()),
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        if status == 200 { "OK" } else { "Error" },
        declared
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}
