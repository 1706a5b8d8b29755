//! Core API: greeting/ticker endpoints, registration flow and RAG chat.
//!
//! # Responsibilities
//! - `/api/message`, `/api/random`, `/api/get-ticker` plus the deprecated
//!   unprefixed variants kept for old integrations
//! - Registration with an email-domain check and an optional approval
//!   relay; without a relay the request is logged and skipped
//! - Placeholder login that hands out the shared bearer token
//! - Keyword search over a small built-in knowledge base and a chat
//!   endpoint that proxies to the AI binding when one is configured

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::http::response::{json as json_ok, json_status, read_json};
use crate::http::server::AppState;
use crate::http::LabError;

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    #[allow(dead_code)]
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    #[allow(dead_code)]
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: Option<String>,
    #[serde(rename = "topK", default = "default_top_k")]
    top_k: usize,
}

fn default_top_k() -> usize {
    5
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: Option<String>,
}

pub async fn handle(state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    match (req.method(), path.as_str()) {
        (&Method::GET, "/api/message") => Ok(json_ok(&json!({
            "message": "Hello, World!",
            "timestamp": Utc::now().to_rfc3339(),
            "worker": "seclab-edge",
        }))),
        (&Method::GET, "/api/random") => Ok(json_ok(&json!({
            "number": rand::thread_rng().gen_range(0..1000),
            "uuid": Uuid::new_v4(),
            "timestamp": Utc::now().to_rfc3339(),
        }))),
        (&Method::GET, "/api/get-ticker" | "/get-ticker") => Ok(json_ok(&ticker())),

        // Legacy plaintext routes, deprecated in favor of the /api prefix.
        (&Method::GET, "/message") => Ok(plain("Hello, World!")),
        (&Method::GET, "/random") => Ok(plain(Uuid::new_v4().to_string())),

        (&Method::POST, "/api/register") => register(state, req).await,
        (&Method::POST, "/api/login") => login(state, req).await,
        (&Method::GET, "/api/approve-user") => Ok(approve_user(query.as_deref())),
        (&Method::POST, "/api/search") => search(req).await,
        (&Method::POST, "/api/chat") => chat(state, req).await,

        (
            _,
            "/api/message" | "/api/random" | "/api/get-ticker" | "/message" | "/random"
            | "/get-ticker" | "/api/register" | "/api/login" | "/api/approve-user"
            | "/api/search" | "/api/chat",
        ) => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not Found".into())),
    }
}

fn plain(body: impl Into<String>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.into()))
        .unwrap_or_default()
}

fn ticker() -> Value {
    json!({
        "items": [
            { "title": "CVE-2024-1234: Critical RCE in Web Framework" },
            { "title": "New Ransomware Variant Detected" },
            { "title": "Zero-Day Exploit in Popular CMS" },
            { "title": "Critical Authentication Bypass Found" },
            { "title": "SQL Injection in Enterprise Software" }
        ]
    })
}

async fn register(state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let request: RegisterRequest = read_json(req).await?;
    let domain = &state.config.auth.email_domain;
    if !request.email.ends_with(domain.as_str()) {
        return Ok(json_status(
            StatusCode::BAD_REQUEST,
            &json!({ "error": format!("Only {domain} emails allowed") }),
        ));
    }

    send_approval_email(state, &request.name, &request.email).await;

    Ok(json_ok(&json!({
        "success": true,
        "message": "Registration request submitted. Awaiting approval.",
    })))
}

/// Relay failures never fail the registration; the request is logged
/// either way so an operator can approve manually.
async fn send_approval_email(state: &AppState, name: &str, email: &str) {
    let bindings = &state.config.bindings;
    let Some(relay) = bindings.email_relay.as_deref() else {
        tracing::info!(name, email, "no email relay configured, approval request logged only");
        return;
    };

    let approval_token = Uuid::new_v4();
    let approve_url = format!(
        "{}/api/approve-user?token={}&approved=true",
        bindings.site_url, approval_token
    );
    let deny_url = format!(
        "{}/api/approve-user?token={}&approved=false",
        bindings.site_url, approval_token
    );
    let body = format!(
        "<h2>New Access Request</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Requested:</strong> {}</p>\
         <div style=\"margin: 20px 0;\">\
         <a href=\"{approve_url}\">Approve Access</a> \
         <a href=\"{deny_url}\">Deny Access</a>\
         </div>",
        Utc::now().to_rfc3339()
    );

    let payload = json!({
        "to": [{ "email": bindings.approver_email }],
        "subject": format!("Access Request: {name} ({email})"),
        "content": [{ "type": "text/html", "value": body }],
    });

    match state.http.post(relay).json(&payload).send().await {
        Ok(resp) if resp.status().is_success() => {
            tracing::info!(email, "approval email relayed");
        }
        Ok(resp) => {
            tracing::warn!(email, status = %resp.status(), "email relay rejected request");
        }
        Err(error) => {
            tracing::warn!(email, %error, "email relay unreachable");
        }
    }
}

async fn login(state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let request: LoginRequest = read_json(req).await?;
    if request.email.ends_with(state.config.auth.email_domain.as_str()) {
        Ok(json_ok(&json!({
            "success": true,
            "token": state.config.auth.token,
            "message": "Login successful",
        })))
    } else {
        Ok(json_status(
            StatusCode::UNAUTHORIZED,
            &json!({ "error": "Invalid credentials" }),
        ))
    }
}

fn approve_user(query: Option<&str>) -> Response {
    let params: Vec<(&str, &str)> = query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect();
    let token = params.iter().find(|(k, _)| *k == "token").map(|(_, v)| *v);
    let approved = params
        .iter()
        .find(|(k, _)| *k == "approved")
        .map(|(_, v)| *v);

    if token.is_some_and(|t| !t.is_empty()) && approved == Some("true") {
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/html")
            .body(Body::from("User approved! They can now login."))
            .unwrap_or_default()
    } else {
        Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("Invalid approval request"))
            .unwrap_or_default()
    }
}

async fn search(req: Request<Body>) -> Result<Response, LabError> {
    let request: SearchRequest = read_json(req).await?;
    let Some(query) = request.query.filter(|q| !q.is_empty()) else {
        return Ok(json_status(
            StatusCode::BAD_REQUEST,
            &json!({ "error": "Query is required" }),
        ));
    };

    let results = knowledge_search(&query, request.top_k);
    Ok(json_ok(&json!({
        "success": true,
        "query": query,
        "results": results,
    })))
}

async fn chat(state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let request: ChatRequest = read_json(req).await?;
    let Some(message) = request.message.filter(|m| !m.is_empty()) else {
        return Ok(json_status(
            StatusCode::BAD_REQUEST,
            &json!({ "error": "Message is required" }),
        ));
    };

    let Some(endpoint) = state.config.bindings.ai_endpoint.as_deref() else {
        return Ok(json_ok(&json!({
            "success": true,
            "message": message,
            "response": CHAT_FALLBACK,
            "contextUsed": false,
        })));
    };

    let system_prompt = "You are a helpful security expert assistant. Your role is to answer \
                         questions about cybersecurity concepts, SASE, ZTNA, and security best \
                         practices. Be concise, accurate, and professional.";
    let upstream = state
        .http
        .post(endpoint)
        .json(&json!({
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": message },
            ],
            "max_tokens": 1024,
        }))
        .send()
        .await;

    match upstream {
        Ok(resp) => {
            let body: Value = resp.json().await.unwrap_or_default();
            Ok(json_ok(&json!({
                "success": true,
                "message": message,
                "response": body["response"].as_str().unwrap_or_default(),
                "contextUsed": false,
            })))
        }
        Err(error) => {
            tracing::warn!(%error, "ai endpoint unreachable");
            Ok(json_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({ "error": "Chat failed" }),
            ))
        }
    }
}

const CHAT_FALLBACK: &str = "AI service not configured. SASE combines network security functions \
with WAN capabilities delivered from the cloud. ZTNA verifies every user and device before \
granting least-privilege access to applications.";

struct KbDoc {
    id: &'static str,
    title: &'static str,
    content: &'static str,
    category: &'static str,
}

/// Stand-in for semantic search: case-insensitive keyword match over a
/// small built-in corpus, best matches first by hit count.
const KNOWLEDGE_BASE: [KbDoc; 5] = [
    KbDoc {
        id: "kb-sase",
        title: "What is SASE?",
        content: "SASE (Secure Access Service Edge) converges SD-WAN with cloud-delivered security: secure web gateway, CASB, firewall as a service, and zero trust network access.",
        category: "architecture",
    },
    KbDoc {
        id: "kb-ztna",
        title: "Zero Trust Network Access",
        content: "ZTNA replaces implicit network trust with continuous verification of user identity, device posture, and context before granting access to each application.",
        category: "architecture",
    },
    KbDoc {
        id: "kb-edr",
        title: "Endpoint Detection and Response",
        content: "EDR monitors endpoint behavior for malicious activity, records telemetry for investigation, and supports automated response such as isolation and rollback.",
        category: "endpoint",
    },
    KbDoc {
        id: "kb-ransomware",
        title: "Ransomware Defense",
        content: "Layered ransomware defense combines EDR behavioral detection, immutable backups, network segmentation, and rapid incident response playbooks.",
        category: "threats",
    },
    KbDoc {
        id: "kb-pqc",
        title: "Post-Quantum Cryptography",
        content: "Post-quantum cryptography uses lattice-based and hash-based algorithms such as ML-KEM and ML-DSA to resist attacks from quantum computers.",
        category: "cryptography",
    },
];

fn knowledge_search(query: &str, top_k: usize) -> Vec<Value> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let mut scored: Vec<(usize, &KbDoc)> = KNOWLEDGE_BASE
        .iter()
        .filter_map(|doc| {
            let haystack = format!("{} {}", doc.title, doc.content).to_lowercase();
            let hits = terms.iter().filter(|term| haystack.contains(*term)).count();
            (hits > 0).then_some((hits, doc))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(top_k)
        .map(|(hits, doc)| {
            let denominator = terms.len().max(1);
            json!({
                "id": doc.id,
                "score": hits as f64 / denominator as f64,
                "title": doc.title,
                "content": doc.content,
                "category": doc.category,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_has_five_items() {
        assert_eq!(ticker()["items"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn approval_requires_token_and_flag() {
        assert_eq!(
            approve_user(Some("token=abc&approved=true")).status(),
            StatusCode::OK
        );
        assert_eq!(
            approve_user(Some("token=abc&approved=false")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            approve_user(Some("approved=true")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(approve_user(None).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn knowledge_search_ranks_by_term_hits() {
        let results = knowledge_search("zero trust access", 5);
        assert!(!results.is_empty());
        assert_eq!(results[0]["id"], "kb-ztna");
        let results = knowledge_search("nonexistent-term-xyz", 5);
        assert!(results.is_empty());
    }

    #[test]
    fn knowledge_search_honors_top_k() {
        let results = knowledge_search("security", 2);
        assert!(results.len() <= 2);
    }
}
