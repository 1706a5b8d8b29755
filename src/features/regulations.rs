//! Regulations: compliance framework coverage and status.

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
    match (req.method(), subpath(&path, "/regulations")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::GET, "/api/frameworks") => Ok(json_ok(&frameworks())),
        (&Method::GET, "/api/status") => Ok(json_ok(&compliance_status())),
        (_, "/" | "/api/frameworks" | "/api/status") => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

fn frameworks() -> Value {
    json!([
        {
            "name": "HIPAA",
            "fullName": "Health Insurance Portability and Accountability Act",
            "category": "Healthcare",
            "coverage": 95,
            "status": "COMPLIANT",
            "lastAudit": "Nov 15, 2025",
            "requirements": [
                "Administrative Safeguards",
                "Physical Safeguards",
                "Technical Safeguards",
                "Organizational Policies",
                "Documentation Requirements"
            ],
            "controls": 42,
            "implemented": 40,
            "pendingReview": 2
        },
        {
            "name": "PCI-DSS",
            "fullName": "Payment Card Industry Data Security Standard",
            "category": "Financial",
            "coverage": 98,
            "status": "COMPLIANT",
            "lastAudit": "Dec 01, 2025",
            "requirements": [
                "Network Security",
                "Data Protection",
                "Vulnerability Management",
                "Access Control",
                "Testing & Monitoring"
            ],
            "controls": 55,
            "implemented": 54,
            "pendingReview": 1
        },
        {
            "name": "GDPR",
            "fullName": "General Data Protection Regulation",
            "category": "Data Privacy",
            "coverage": 92,
            "status": "COMPLIANT",
            "lastAudit": "Nov 20, 2025",
            "requirements": [
                "Data Subject Rights",
                "Consent Management",
                "Data Protection Impact",
                "Breach Notification",
                "Privacy by Design"
            ],
            "controls": 48,
            "implemented": 44,
            "pendingReview": 4
        },
        {
            "name": "SOC 2 Type II",
            "fullName": "Service Organization Control Framework",
            "category": "Enterprise",
            "coverage": 96,
            "status": "COMPLIANT",
            "lastAudit": "Oct 30, 2025",
            "requirements": [
                "Security",
                "Availability",
                "Processing Integrity",
                "Confidentiality",
                "Privacy"
            ],
            "controls": 40,
            "implemented": 39,
            "pendingReview": 1
        },
        {
            "name": "FedRAMP",
            "fullName": "Federal Risk and Authorization Management Program",
            "category": "Government",
            "coverage": 99,
            "status": "AUTHORIZED",
            "lastAudit": "Sep 15, 2025",
            "requirements": [
                "System Security Plans",
                "Continuous Monitoring",
                "Incident Response",
                "Access Controls",
                "Audit Logging"
            ],
            "controls": 110,
            "implemented": 109,
            "pendingReview": 1
        },
        {
            "name": "ISO 27001",
            "fullName": "Information Security Management System",
            "category": "Enterprise",
            "coverage": 94,
            "status": "CERTIFIED",
            "lastAudit": "Nov 10, 2025",
            "requirements": [
                "Information Security Policies",
                "Organization Controls",
                "Human Resource Security",
                "Asset Management",
                "Cryptography"
            ],
            "controls": 114,
            "implemented": 107,
            "pendingReview": 7
        },
        {
            "name": "CMMC 2.0",
            "fullName": "Cybersecurity Maturity Model Certification 2.0",
            "category": "Defense",
            "coverage": 89,
            "status": "COMPLIANT",
            "lastAudit": "Dec 05, 2025",
            "requirements": [
                "Asset Management",
                "Data Protection",
                "System and Communications Protection",
                "Incident Response",
                "Supply Chain Risk Management"
            ],
            "controls": 23,
            "implemented": 21,
            "pendingReview": 2
        },
        {
            "name": "NIS2",
            "fullName": "Network and Information Security 2 Directive",
            "category": "EU Cybersecurity",
            "coverage": 85,
            "status": "COMPLIANT",
            "lastAudit": "Nov 25, 2025",
            "requirements": [
                "Governance and Risk Management",
                "Security Operations",
                "Incident Handling",
                "Supply Chain Security",
                "Reporting and Cooperation"
            ],
            "controls": 18,
            "implemented": 15,
            "pendingReview": 3
        },
        {
            "name": "DORA",
            "fullName": "Digital Operational Resilience Act",
            "category": "Financial Services",
            "coverage": 88,
            "status": "COMPLIANT",
            "lastAudit": "Dec 01, 2025",
            "requirements": [
                "ICT Risk Management",
                "Testing and Resilience",
                "Third-Party Risk",
                "Incident Reporting",
                "Competency and Governance"
            ],
            "controls": 20,
            "implemented": 18,
            "pendingReview": 2
        },
        {
            "name": "SEC Cyber Rules",
            "fullName": "SEC Cybersecurity Risk Management Rules",
            "category": "Financial Services",
            "coverage": 91,
            "status": "COMPLIANT",
            "lastAudit": "Dec 03, 2025",
            "requirements": [
                "Governance and Risk Assessment",
                "Incident Detection",
                "Incident Response",
                "Public Disclosure Requirements",
                "Third-Party Service Provider Management"
            ],
            "controls": 15,
            "implemented": 14,
            "pendingReview": 1
        }
    ])
}

fn compliance_status() -> Value {
    json!({
        "totalRequirements": 407,
        "implemented": 393,
        "inProgress": 10,
        "notStarted": 4,
        "complianceScore": 96.6
    })
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Regulations - Compliance Management</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: #0a0e17; color: #e0e6ed; }
  header { padding: 24px 32px; background: linear-gradient(135deg, #1d2410, #121709); border-bottom: 2px solid #c5e14d; }
  h1 { margin: 0; font-size: 26px; color: #c5e14d; }
  .subtitle { color: #8892a6; margin-top: 4px; }
  .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 14px; padding: 24px 32px; }
  .stat { background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 16px; }
  .stat .value { font-size: 24px; font-weight: 700; color: #c5e14d; }
  .stat .label { font-size: 12px; color: #8892a6; text-transform: uppercase; }
  .frameworks { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 16px; padding: 0 32px 24px; }
  .framework { background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 18px; }
  .bar { background: #0f1524; border-radius: 4px; height: 8px; overflow: hidden; margin-top: 8px; }
  .fill { background: #c5e14d; height: 100%; }
  .status { font-size: 12px; color: #00cc88; }
</style>
</head>
<body>
<header>
  <h1>&#9878; Regulations</h1>
  <div class="subtitle">Compliance framework tracking across ten standards</div>
</header>
<div class="stats" id="stats"></div>
<div class="frameworks" id="frameworks"></div>
<script>
async function load() {
  const [status, frameworks] = await Promise.all([
    fetch('/regulations/api/status').then(r => r.json()),
    fetch('/regulations/api/frameworks').then(r => r.json())
  ]);
  document.getElementById('stats').innerHTML = [
    ['Total Requirements', status.totalRequirements], ['Implemented', status.implemented],
    ['In Progress', status.inProgress], ['Not Started', status.notStarted],
    ['Compliance Score', status.complianceScore + '%']
  ].map(([l, v]) => `<div class="stat"><div class="value">${v}</div><div class="label">${l}</div></div>`).join('');
  document.getElementById('frameworks').innerHTML = frameworks.map(f =>
    `<div class="framework"><strong>${f.name}</strong> <span class="status">${f.status}</span><br>
     <small>${f.fullName}</small><br>${f.category} &middot; audit ${f.lastAudit}<br>
     ${f.implemented}/${f.controls} controls, ${f.pendingReview} pending
     <div class="bar"><div class="fill" style="width:${f.coverage}%"></div></div>${f.coverage}% coverage</div>`).join('');
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
    fn ten_frameworks() {
        assert_eq!(frameworks().as_array().unwrap().len(), 10);
    }

    #[test]
    fn status_totals() {
        let status = compliance_status();
        assert_eq!(status["totalRequirements"], 407);
        assert_eq!(status["complianceScore"], 96.6);
    }
}
