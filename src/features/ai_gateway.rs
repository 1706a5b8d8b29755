//! AI Gateway Arena: API security test scenarios and findings.

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use serde_json::{json, Value};

use crate::features::subpath;
use crate::http::response::{html, json as json_ok};
use crate::http::server::AppState;
use crate::http::LabError;

pub async fn handle(_state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    match (req.method(), subpath(&path, "/ai-gateway-arena")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::GET, "/api/endpoints") => Ok(json_ok(&api_endpoints())),
        (&Method::GET, "/api/attack-patterns") => Ok(json_ok(&attack_patterns())),
        (&Method::GET, "/api/test-scenarios") => Ok(json_ok(&test_scenarios())),
        (&Method::GET, "/api/findings") => Ok(json_ok(&findings())),
        (
            _,
            "/" | "/api/endpoints" | "/api/attack-patterns" | "/api/test-scenarios"
            | "/api/findings",
        ) => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

fn api_endpoints() -> Value {
    json!([
        {"id": "api-001", "name": "/api/auth/login", "method": "POST", "protection": "OAuth2", "riskScore": 45, "latency": "120ms", "requests": 12500},
        {"id": "api-002", "name": "/api/users/profile", "method": "GET", "protection": "JWT", "riskScore": 62, "latency": "85ms", "requests": 28400},
        {"id": "api-003", "name": "/api/payments/charge", "method": "POST", "protection": "mTLS", "riskScore": 28, "latency": "340ms", "requests": 3200},
        {"id": "api-004", "name": "/api/data/export", "method": "GET", "protection": "API Key", "riskScore": 78, "latency": "220ms", "requests": 540},
        {"id": "api-005", "name": "/api/admin/settings", "method": "PATCH", "protection": "JWT+RBAC", "riskScore": 35, "latency": "110ms", "requests": 85},
        {"id": "api-006", "name": "/api/webhooks/events", "method": "POST", "protection": "Signature", "riskScore": 52, "latency": "95ms", "requests": 15600}
    ])
}

fn attack_patterns() -> Value {
    json!([
        {
            "name": "Credential Brute Force",
            "description": "Automated password guessing attack",
            "difficulty": "EASY",
            "severity": "HIGH",
            "methods": ["POST", "GET"],
            "payload": "Rapid login attempts with common passwords",
            "mitigation": "Rate limiting, account lockout, CAPTCHA"
        },
        {
            "name": "JWT Token Forgery",
            "description": "Create fake JWT tokens to impersonate users",
            "difficulty": "MEDIUM",
            "severity": "CRITICAL",
            "methods": ["GET", "POST"],
            "payload": "Craft unsigned or weak-signed JWT tokens",
            "mitigation": "Verify token signature, check expiration, refresh token rotation"
        },
        {
            "name": "API Key Leakage",
            "description": "Discover hardcoded API keys in responses or logs",
            "difficulty": "EASY",
            "severity": "CRITICAL",
            "methods": ["GET"],
            "payload": "Scan error messages and response headers for API keys",
            "mitigation": "Rotate keys, use secure storage, mask sensitive data in logs"
        },
        {
            "name": "OWASP Injection Attacks",
            "description": "SQL, NoSQL, command injection via API parameters",
            "difficulty": "MEDIUM",
            "severity": "CRITICAL",
            "methods": ["POST", "PATCH", "DELETE"],
            "payload": "Inject SQL/NoSQL/command syntax in request body",
            "mitigation": "Parameterized queries, input validation, escaping"
        },
        {
            "name": "Business Logic Bypasses",
            "description": "Exploit workflow logic to gain unauthorized access",
            "difficulty": "HARD",
            "severity": "CRITICAL",
            "methods": ["POST", "PATCH"],
            "payload": "Manipulate sequences, skip validation steps, modify request order",
            "mitigation": "Comprehensive business logic testing, state validation"
        },
        {
            "name": "Zero-Day API Vulnerability",
            "description": "Discover unknown vulnerabilities in custom APIs",
            "difficulty": "HARD",
            "severity": "CRITICAL",
            "methods": ["POST", "PATCH", "DELETE"],
            "payload": "Fuzzing, mutation testing, format string attacks",
            "mitigation": "Regular security testing, code review, monitoring"
        }
    ])
}

fn test_scenarios() -> Value {
    json!([
        {
            "name": "OWASP API Top 10 Scan",
            "description": "Comprehensive test against all OWASP API Security Top 10",
            "duration": "15-20 min",
            "coverage": "100%",
            "vulnerabilitiesFound": 7,
            "criticalFindings": 2
        },
        {
            "name": "High-Speed Fuzzing",
            "description": "Rapid mutation testing of all API parameters",
            "duration": "5-10 min",
            "coverage": "75%",
            "vulnerabilitiesFound": 3,
            "criticalFindings": 1
        },
        {
            "name": "Authentication Bypass Simulation",
            "description": "Test all authentication mechanisms for weaknesses",
            "duration": "8-12 min",
            "coverage": "95%",
            "vulnerabilitiesFound": 4,
            "criticalFindings": 2
        },
        {
            "name": "Business Logic Testing",
            "description": "Execute real business workflows with variations",
            "duration": "20-30 min",
            "coverage": "85%",
            "vulnerabilitiesFound": 6,
            "criticalFindings": 3
        }
    ])
}

fn findings() -> Value {
    json!([
        {
            "finding": "API Key exposed in error message",
            "endpoint": "/api/data/export",
            "severity": "CRITICAL",
            "status": "OPEN",
            "discovered": "2 hours ago",
            "description": "API key appears in 500 error response when request is malformed"
        },
        {
            "finding": "Missing rate limiting on /api/auth/login",
            "endpoint": "/api/auth/login",
            "severity": "HIGH",
            "status": "OPEN",
            "discovered": "3 hours ago",
            "description": "Endpoint accepts unlimited login attempts from same IP"
        },
        {
            "finding": "JWT token expiration too long (90 days)",
            "endpoint": "/api/users/profile",
            "severity": "HIGH",
            "status": "ASSIGNED",
            "discovered": "5 hours ago",
            "description": "Tokens valid for 90 days, reducing effectiveness of token rotation"
        },
        {
            "finding": "IDOR in /api/users/profile",
            "endpoint": "/api/users/profile",
            "severity": "CRITICAL",
            "status": "RESOLVED",
            "discovered": "1 day ago",
            "description": "User can access any other user's profile by changing user_id parameter"
        },
        {
            "finding": "Missing authentication on /api/admin/settings",
            "endpoint": "/api/admin/settings",
            "severity": "CRITICAL",
            "status": "RESOLVED",
            "discovered": "2 days ago",
            "description": "Admin settings endpoint could be accessed without JWT token"
        }
    ])
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>AI Gateway Arena - API Security Testing</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: #0a0e17; color: #e0e6ed; }
  header { padding: 24px 32px; background: linear-gradient(135deg, #0d2b24, #091d17); border-bottom: 2px solid #00cc88; }
  h1 { margin: 0; font-size: 26px; color: #00cc88; }
  .subtitle { color: #8892a6; margin-top: 4px; }
  .panel { margin: 24px 32px; background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 20px; }
  .item { border-left: 3px solid #00cc88; padding: 10px 14px; margin: 10px 0; background: #0f1524; }
  .sev-critical { border-left-color: #ff3355; } .sev-high { border-left-color: #ffaa00; }
  code { color: #4da3ff; }
</style>
</head>
<body>
<header>
  <h1>&#129302; AI Gateway Arena</h1>
  <div class="subtitle">API endpoint security validation and simulated attack patterns</div>
</header>
<div class="panel"><h2>Monitored Endpoints</h2><div id="endpoints"></div></div>
<div class="panel"><h2>Attack Patterns</h2><div id="patterns"></div></div>
<div class="panel"><h2>Test Scenarios</h2><div id="scenarios"></div></div>
<div class="panel"><h2>Findings</h2><div id="findings"></div></div>
<script>
async function load() {
  const [endpoints, patterns, scenarios, findings] = await Promise.all([
    fetch('/ai-gateway-arena/api/endpoints').then(r => r.json()),
    fetch('/ai-gateway-arena/api/attack-patterns').then(r => r.json()),
    fetch('/ai-gateway-arena/api/test-scenarios').then(r => r.json()),
    fetch('/ai-gateway-arena/api/findings').then(r => r.json())
  ]);
  document.getElementById('endpoints').innerHTML = endpoints.map(e =>
    `<div class="item"><code>${e.method} ${e.name}</code> &middot; ${e.protection}<br>
     Risk ${e.riskScore} &middot; ${e.latency} &middot; ${e.requests.toLocaleString()} req/day</div>`).join('');
  document.getElementById('patterns').innerHTML = patterns.map(p =>
    `<div class="item sev-${p.severity.toLowerCase()}"><strong>${p.name}</strong> [${p.difficulty} / ${p.severity}]<br>
     ${p.description}<br><em>Mitigation: ${p.mitigation}</em></div>`).join('');
  document.getElementById('scenarios').innerHTML = scenarios.map(s =>
    `<div class="item"><strong>${s.name}</strong> (${s.duration}, ${s.coverage} coverage)<br>
     ${s.description}<br>${s.vulnerabilitiesFound} vulns / ${s.criticalFindings} critical</div>`).join('');
  document.getElementById('findings').innerHTML = findings.map(f =>
    `<div class="item sev-${f.severity.toLowerCase()}"><strong>${f.finding}</strong> [${f.status}]<br>
     <code>${f.endpoint}</code> &middot; ${f.discovered}<br>${f.description}</div>`).join('');
}
load();
</script>
</body>
</html>"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_counts() {
        assert_eq!(api_endpoints().as_array().unwrap().len(), 6);
        assert_eq!(attack_patterns().as_array().unwrap().len(), 6);
        assert_eq!(test_scenarios().as_array().unwrap().len(), 4);
        assert_eq!(findings().as_array().unwrap().len(), 5);
    }
}
