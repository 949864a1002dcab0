#![allow(dead_code)]

use serde_json::{Value, json};
use std::fs;
use std::io::Read;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

/// A request seen by [`MockServer`].
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

/// Simulated model server answering a fixed script of replies.
///
/// Each reply is served to exactly one request, in order; the thread then
/// stops and hands back what it received.
pub struct MockServer {
    pub host: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl MockServer {
    pub fn start(replies: Vec<(u16, String)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("mock server port");

        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in replies {
                let Ok(mut request) = server.recv() else {
                    break;
                };
                let mut received = String::new();
                let _ = request.as_reader().read_to_string(&mut received);
                seen.push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body: received,
                });
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = request.respond(response);
            }
            seen
        });

        Self {
            host: format!("http://127.0.0.1:{port}"),
            handle,
        }
    }

    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().expect("mock server thread")
    }
}

/// Address nothing is listening on.
pub fn unreachable_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn caption_document(product_name: &str) -> Value {
    json!({
        "product_name": product_name,
        "description": format!("{product_name} photographed on a white background."),
        "attributes": [
            {"name": "Color", "value": "Black", "confidence": 0.9},
            {"name": "Pattern", "value": "Not visible", "confidence": 0.0},
            {"name": "Material", "value": "Leather", "confidence": 0.6}
        ],
        "user_needs": ["daily commute", "gift for dad"],
        "cross_sell_products": [
            {
                "category": "Accessories",
                "product_name": "Leather Belt",
                "search_query": "black leather belt silver buckle",
                "description": "Full-grain leather belt with a brushed silver buckle.",
                "attributes": [
                    {"name": "Color", "value": "Black", "confidence": 0.8},
                    {"name": "Style", "value": "Classic", "confidence": 0.7}
                ]
            }
        ]
    })
}

/// `/api/generate` success body whose `response` wraps the caption in prose.
pub fn generate_reply(product_name: &str) -> String {
    let text = format!(
        "Here is the analysis you asked for:\n```json\n{}\n```\nLet me know if you need more.",
        serde_json::to_string_pretty(&caption_document(product_name)).unwrap()
    );
    generate_envelope(&text)
}

/// `/api/generate` success body with arbitrary model text.
pub fn generate_envelope(text: &str) -> String {
    json!({"model": "gemma3", "response": text, "done": true}).to_string()
}

pub fn tags_reply(names: &[&str]) -> String {
    let models: Vec<Value> = names
        .iter()
        .map(|n| json!({"name": n, "size": 3_338_801_804u64}))
        .collect();
    json!({ "models": models }).to_string()
}

pub fn write_image(root: &Path, relative: &str, bytes: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create image dir");
    }
    fs::write(&path, bytes).expect("write image");
    path
}
