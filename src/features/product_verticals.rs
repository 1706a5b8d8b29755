//! Product Verticals: industry-specific solution briefs.

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
    match (req.method(), subpath(&path, "/product-verticals")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::GET, "/api/verticals") => Ok(json_ok(&verticals())),
        (&Method::GET, "/api/use-cases") => Ok(json_ok(&use_cases())),
        (_, "/" | "/api/verticals" | "/api/use-cases") => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

fn verticals() -> Value {
    json!([
        {
            "name": "Healthcare",
            "icon": "\u{1f3e5}",
            "description": "HIPAA-compliant security for patient data protection",
            "solutions": ["Patient Data Protection", "Medical Device Security", "Access Control (RBAC)", "Audit Logging", "Encryption at Rest/Transit"],
            "challenges": ["HIPAA Compliance", "ransomware threats", "Legacy Systems", "Data Breaches"],
            "customers": 450,
            "breachPrevention": "$2.3M avg",
            "complianceScore": 96
        },
        {
            "name": "Financial Services",
            "icon": "\u{1f4b0}",
            "description": "PCI-DSS and SEC-compliant security for financial institutions",
            "solutions": ["Payment Card Protection", "Transaction Monitoring", "Fraud Detection", "API Security", "Risk Management"],
            "challenges": ["PCI Compliance", "Fraud Detection", "Insider Threats", "Regulatory Audits"],
            "customers": 320,
            "breachPrevention": "$4.1M avg",
            "complianceScore": 98
        },
        {
            "name": "Retail & E-commerce",
            "icon": "\u{1f6cd}\u{fe0f}",
            "description": "Protecting customer data and payment processing systems",
            "solutions": ["POS System Security", "Payment Protection", "Customer Data", "Inventory Security", "Website Protection"],
            "challenges": ["PCI DSS", "Customer Data", "Season Traffic", "Fraud"],
            "customers": 680,
            "breachPrevention": "$1.8M avg",
            "complianceScore": 92
        },
        {
            "name": "Manufacturing",
            "icon": "\u{1f3ed}",
            "description": "Operational Technology (OT) and Industrial IoT security",
            "solutions": ["ICS/SCADA Security", "Supply Chain Protection", "Asset Tracking", "Production Monitoring", "IoT Device Security"],
            "challenges": ["OT Networks", "Legacy Equipment", "Supply Chain Attacks", "Downtime Cost"],
            "customers": 210,
            "breachPrevention": "$3.2M avg",
            "complianceScore": 88
        },
        {
            "name": "Government & Public Sector",
            "icon": "\u{1f3db}\u{fe0f}",
            "description": "FedRAMP and government compliance for public agencies",
            "solutions": ["FedRAMP Compliance", "Classified Data Handling", "Citizens Privacy", "Audit Trail", "Security Clearance Integration"],
            "challenges": ["FedRAMP", "Classified Data", "Oversight Audits", "Budget Constraints"],
            "customers": 145,
            "breachPrevention": "$2.1M avg",
            "complianceScore": 99
        },
        {
            "name": "Education",
            "icon": "\u{1f393}",
            "description": "FERPA-compliant security for educational institutions",
            "solutions": ["Student Data Protection", "Network Security", "Research Data", "Distance Learning", "Compliance Reporting"],
            "challenges": ["FERPA Compliance", "Open Networks", "Budget Limits", "Legacy Systems"],
            "customers": 380,
            "breachPrevention": "$900K avg",
            "complianceScore": 91
        }
    ])
}

fn use_cases() -> Value {
    json!([
        {
            "vertical": "Healthcare",
            "title": "Patient Data Breach Prevention",
            "description": "Real-time monitoring and encryption of patient health records",
            "outcome": "99.8% breach prevention rate"
        },
        {
            "vertical": "Financial Services",
            "title": "Fraud Detection & Prevention",
            "description": "AI-powered anomaly detection for financial transactions",
            "outcome": "87% fraud prevention rate"
        },
        {
            "vertical": "Retail & E-commerce",
            "title": "PCI Compliance Automation",
            "description": "Automated PCI-DSS compliance monitoring and remediation",
            "outcome": "100% compliance audit pass rate"
        },
        {
            "vertical": "Manufacturing",
            "title": "OT Network Segmentation",
            "description": "Secure isolation of production networks from IT infrastructure",
            "outcome": "Zero unplanned downtime from cyberattacks"
        }
    ])
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Product Verticals - Industry Solutions</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: #0a0a2e; color: #e0e6ed; }
  header { padding: 24px 32px; background: linear-gradient(135deg, #101840, #0a0f2c); border-bottom: 2px solid #00d4ff; }
  h1 { margin: 0; font-size: 26px; color: #00d4ff; }
  .subtitle { color: #8892a6; margin-top: 4px; }
  .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; padding: 24px 32px; }
  .vertical-card { background: #121a38; border: 1px solid #24305c; border-radius: 8px; padding: 18px; cursor: pointer; }
  .vertical-card:hover { border-color: #00d4ff; }
  .vertical-icon { font-size: 32px; }
  .panel { margin: 0 32px 24px; background: #121a38; border: 1px solid #24305c; border-radius: 8px; padding: 20px; }
  .case { border-left: 3px solid #00d4ff; padding: 10px 14px; margin: 10px 0; background: #0d1430; }
  pre { white-space: pre-wrap; color: #a9b4c9; }
</style>
</head>
<body>
<header>
  <h1>Product Verticals</h1>
  <div class="subtitle">Security solutions tailored per industry</div>
</header>
<div class="grid" id="verticals"></div>
<div class="panel"><h2>Selected Vertical</h2><pre id="detail">Pick a vertical above.</pre></div>
<div class="panel"><h2>Use Cases</h2><div id="cases"></div></div>
<script>
let allVerticals = [];
function showVertical(name) {
  const v = allVerticals.find(x => x.name === name);
  document.getElementById('detail').textContent = JSON.stringify(v, null, 2);
}
async function load() {
  const [verticals, cases] = await Promise.all([
    fetch('/product-verticals/api/verticals').then(r => r.json()),
    fetch('/product-verticals/api/use-cases').then(r => r.json())
  ]);
  allVerticals = verticals;
  document.getElementById('verticals').innerHTML = verticals.map(v =>
    `<div class="vertical-card" onclick="showVertical('${v.name}')">
       <div class="vertical-icon">${v.icon}</div><h3>${v.name}</h3><p>${v.description}</p>
       ${v.customers} customers &middot; ${v.complianceScore}% compliance</div>`).join('');
  document.getElementById('cases').innerHTML = cases.map(c =>
    `<div class="case"><strong>${c.title}</strong> (${c.vertical})<br>${c.description}<br><em>${c.outcome}</em></div>`).join('');
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
        assert_eq!(verticals().as_array().unwrap().len(), 6);
        assert_eq!(use_cases().as_array().unwrap().len(), 4);
    }

    #[test]
    fn every_vertical_carries_solutions() {
        for vertical in verticals().as_array().unwrap() {
            assert!(!vertical["solutions"].as_array().unwrap().is_empty());
        }
    }
}
