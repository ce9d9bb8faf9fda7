//! Minimal HTTP/1.1 server serving canned responses for integration tests.
//!
//! Routes are keyed by the exact request target (path plus query string).
//! Unknown targets get a 404. Optionally requires an exact `Cookie` header,
//! answering 401 otherwise, which is how the real feed treats a missing or
//! expired session.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedServerOptions {
    /// Exact `Cookie` header value requests must carry; mismatch answers 401.
    pub required_cookie: Option<String>,
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until process exit.
pub fn start<T: Into<String>>(routes: Vec<(T, Route)>) -> String {
    start_with_options(routes, FeedServerOptions::default())
}

pub fn start_with_options<T: Into<String>>(
    routes: Vec<(T, Route)>,
    opts: FeedServerOptions,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(target, route)| (target.into(), route))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &routes, &opts));
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>, opts: &FeedServerOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (target, cookie) = parse_request(request);

    if let Some(required) = &opts.required_cookie {
        if cookie.as_deref() != Some(required.as_str()) {
            respond(&mut stream, 401, b"");
            return;
        }
    }

    match routes.get(target) {
        Some(route) => respond(&mut stream, route.status, &route.body),
        None => respond(&mut stream, 404, b"not found"),
    }
}

fn respond(stream: &mut std::net::TcpStream, status: u16, body: &[u8]) {
    let reason = match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    };
    let header = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}

/// Returns (request target, Cookie header value if present).
fn parse_request(request: &str) -> (&str, Option<String>) {
    let mut target = "";
    let mut cookie = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if target.is_empty() {
            target = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("cookie") {
                cookie = Some(value.trim().to_owned());
            }
        }
    }
    (target, cookie)
}
