//! Hybrid Cloud War Room: multi-cloud incident visibility and runbooks.

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
    let rest = subpath(&path, "/hybrid-cloud-war-room");

    if req.method() != Method::GET {
        return Err(LabError::MethodNotAllowed);
    }

    if let Some(env_id) = rest.strip_prefix("/api/environment/") {
        return environment(env_id)
            .map(|env| json_ok(&env))
            .ok_or_else(|| LabError::NotFound("Environment not found".into()));
    }
    if let Some(incident_id) = rest.strip_prefix("/api/incident/") {
        return incident(incident_id)
            .map(|inc| json_ok(&inc))
            .ok_or_else(|| LabError::NotFound("Incident not found".into()));
    }

    match rest {
        "/" => Ok(html(page())),
        "/api/environments" => Ok(json_ok(&environment_summaries())),
        "/api/incidents" => Ok(json_ok(&incidents())),
        "/api/runbooks" => Ok(json_ok(&runbooks())),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

/// List projection: full environments minus service and threat detail.
fn environment_summaries() -> Value {
    let summaries: Vec<Value> = cloud_environments()
        .as_array()
        .unwrap_or(&Vec::new())
        .iter()
        .map(|env| {
            json!({
                "id": env["id"],
                "provider": env["provider"],
                "region": env["region"],
                "status": env["status"],
                "instances": env["instances"],
                "alerts": env["alerts"],
                "riskScore": env["riskScore"],
                "complianceScore": env["complianceScore"]
            })
        })
        .collect();
    Value::Array(summaries)
}

fn environment(id: &str) -> Option<Value> {
    cloud_environments()
        .as_array()?
        .iter()
        .find(|env| env["id"] == id)
        .cloned()
}

fn incident(id: &str) -> Option<Value> {
    incidents()
        .as_array()?
        .iter()
        .find(|inc| inc["id"] == id)
        .cloned()
}

fn cloud_environments() -> Value {
    json!([
        {
            "id": "prod-aws",
            "provider": "AWS",
            "region": "us-east-1",
            "status": "HEALTHY",
            "instances": 247,
            "alerts": 12,
            "lastScan": "2 minutes ago",
            "services": ["EC2", "S3", "RDS", "Lambda", "VPC"],
            "riskScore": 42,
            "complianceScore": 87,
            "threats": [
                {"severity": "CRITICAL", "count": 2, "example": "Exposed S3 bucket with PII"},
                {"severity": "HIGH", "count": 5, "example": "Unpatched EC2 instances"},
                {"severity": "MEDIUM", "count": 9, "example": "Overly permissive IAM policies"}
            ]
        },
        {
            "id": "prod-azure",
            "provider": "Azure",
            "region": "eastus",
            "status": "HEALTHY",
            "instances": 156,
            "alerts": 8,
            "lastScan": "5 minutes ago",
            "services": ["VMs", "App Service", "SQL Database", "Key Vault", "Virtual Network"],
            "riskScore": 38,
            "complianceScore": 91,
            "threats": [
                {"severity": "CRITICAL", "count": 1, "example": "Unencrypted database"},
                {"severity": "HIGH", "count": 4, "example": "MFA not enforced"},
                {"severity": "MEDIUM", "count": 7, "example": "Resource group permissions too broad"}
            ]
        },
        {
            "id": "prod-gcp",
            "provider": "GCP",
            "region": "us-central1",
            "status": "DEGRADED",
            "instances": 89,
            "alerts": 23,
            "lastScan": "45 seconds ago",
            "services": ["Compute Engine", "Cloud Storage", "Cloud SQL", "Cloud Run", "VPC"],
            "riskScore": 67,
            "complianceScore": 72,
            "threats": [
                {"severity": "CRITICAL", "count": 4, "example": "Public Cloud Storage bucket"},
                {"severity": "HIGH", "count": 8, "example": "Service account with excessive scopes"},
                {"severity": "MEDIUM", "count": 12, "example": "Firewall rules too permissive"}
            ]
        }
    ])
}

fn incidents() -> Value {
    json!([
        {
            "id": "INC-2025-001",
            "title": "Lateral Movement Detected in AWS",
            "description": "Suspicious lateral movement detected between EC2 instances in private subnet",
            "severity": "CRITICAL",
            "status": "ACTIVE",
            "created": "15 min ago",
            "lastUpdated": "2 min ago",
            "cloudProvider": "AWS",
            "affectedResources": ["i-0a1b2c3d4e5f6g7h8", "i-0z9y8x7w6v5u4t3s"],
            "timeline": [
                {"time": "15:32", "action": "Anomalous network traffic detected", "by": "IDS"},
                {"time": "15:34", "action": "User attempted privilege escalation", "by": "EDR"},
                {"time": "15:36", "action": "Incident escalated to CRITICAL", "by": "SOAR"},
                {"time": "15:38", "action": "Isolated affected instances", "by": "Automation"}
            ],
            "responseSteps": [
                "\u{2713} Isolated affected instances from network",
                "\u{2713} Captured memory dump for forensics",
                "\u{29d6} Analyzing lateral movement vector",
                "\u{25cb} Prepare incident report"
            ],
            "teamAssigned": ["alice@company.com", "bob@company.com", "carlos@company.com"]
        },
        {
            "id": "INC-2025-002",
            "title": "Data Exfiltration via Azure App Service",
            "description": "Large data transfer detected from Azure SQL Database to external IP",
            "severity": "CRITICAL",
            "status": "INVESTIGATING",
            "created": "48 min ago",
            "lastUpdated": "12 min ago",
            "cloudProvider": "Azure",
            "affectedResources": ["sqldb-prod-01", "appservice-api-01"],
            "timeline": [
                {"time": "14:44", "action": "Unusual egress traffic detected", "by": "SIEM"},
                {"time": "14:47", "action": "Alert escalated to security team", "by": "SOC"},
                {"time": "14:52", "action": "Database queries logged 500GB transfer", "by": "DBA"},
                {"time": "15:00", "action": "Connection blocked, incident opened", "by": "Automation"}
            ],
            "responseSteps": [
                "\u{2713} Blocked database connections to external IPs",
                "\u{2713} Identified compromised service principal",
                "\u{29d6} Analyzing exfiltrated data scope",
                "\u{25cb} Notify data protection officer"
            ],
            "teamAssigned": ["alice@company.com", "denise@company.com"]
        },
        {
            "id": "INC-2025-003",
            "title": "Cryptocurrency Mining on GCP Compute Engine",
            "description": "Unauthorized cryptomining process detected on 47 GCP instances",
            "severity": "HIGH",
            "status": "RESOLVED",
            "created": "3 hours ago",
            "lastUpdated": "1 hour ago",
            "cloudProvider": "GCP",
            "affectedResources": ["instance-1 through instance-47"],
            "timeline": [
                {"time": "12:15", "action": "Abnormal CPU usage detected", "by": "Monitoring"},
                {"time": "12:22", "action": "Mining process identified in logs", "by": "Threat Detection"},
                {"time": "12:45", "action": "Malicious image terminated", "by": "Automation"},
                {"time": "13:30", "action": "Clean images deployed", "by": "DevOps"}
            ],
            "responseSteps": [
                "\u{2713} Terminated all infected instances",
                "\u{2713} Deployed clean images to all hosts",
                "\u{2713} Blocked malicious repository access",
                "\u{2713} Incident closed and lessons learned documented"
            ],
            "teamAssigned": ["edgar@company.com", "frank@company.com"]
        }
    ])
}

fn runbooks() -> Value {
    json!([
        {
            "name": "Data Exfiltration Response",
            "steps": [
                "1. IMMEDIATE: Isolate affected resource from network",
                "2. IMMEDIATE: Kill all active connections",
                "3. Capture logs and network traffic for forensics",
                "4. Identify affected data classification level",
                "5. Notify Data Protection Officer (DPO)",
                "6. Preserve evidence for legal/regulatory",
                "7. Begin forensic investigation",
                "8. Prepare incident report"
            ]
        },
        {
            "name": "Lateral Movement Containment",
            "steps": [
                "1. IMMEDIATE: Segment network to prevent spread",
                "2. Identify all systems in compromise chain",
                "3. Collect forensic evidence from all systems",
                "4. Reset credentials for compromised accounts",
                "5. Patch exploited vulnerabilities",
                "6. Monitor for C2 communication",
                "7. Analyze attack vector and entry point",
                "8. Close report with mitigation"
            ]
        },
        {
            "name": "Cryptomining/Malware Containment",
            "steps": [
                "1. IMMEDIATE: Isolate affected instances",
                "2. Dump process memory for malware analysis",
                "3. Identify malicious images/containers",
                "4. Block malicious repositories/sources",
                "5. Deploy clean images to all hosts",
                "6. Verify no persistence mechanisms remain",
                "7. Update threat detection rules",
                "8. Close incident and communicate impact"
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
<title>Hybrid Cloud War Room</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: #0a0e17; color: #e0e6ed; }
  header { padding: 24px 32px; background: linear-gradient(135deg, #2b1a3a, #140d22); border-bottom: 2px solid #b366ff; }
  h1 { margin: 0; font-size: 26px; color: #b366ff; }
  .subtitle { color: #8892a6; margin-top: 4px; }
  .clouds { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; padding: 24px 32px; }
  .cloud-card { background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 18px; cursor: pointer; }
  .cloud-card:hover { border-color: #b366ff; }
  .status-healthy { color: #00cc88; } .status-degraded { color: #ffaa00; }
  .panel { margin: 0 32px 24px; background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 20px; }
  .incident { border-left: 3px solid #ff3355; padding: 10px 14px; margin: 10px 0; background: #0f1524; }
  pre { white-space: pre-wrap; color: #a9b4c9; }
</style>
</head>
<body>
<header>
  <h1>&#9729; Hybrid Cloud War Room</h1>
  <div class="subtitle">AWS, Azure, and GCP threat detection with live incident response</div>
</header>
<div class="clouds" id="clouds"></div>
<div class="panel"><h2>Environment Detail</h2><pre id="detail">Select an environment above.</pre></div>
<div class="panel"><h2>Active Incidents</h2><div id="incidents"></div></div>
<div class="panel"><h2>Response Runbooks</h2><div id="runbooks"></div></div>
<script>
async function loadEnvironment(id) {
  const env = await fetch('/hybrid-cloud-war-room/api/environment/' + id).then(r => r.json());
  document.getElementById('detail').textContent = JSON.stringify(env, null, 2);
}
async function load() {
  const [envs, incidents, runbooks] = await Promise.all([
    fetch('/hybrid-cloud-war-room/api/environments').then(r => r.json()),
    fetch('/hybrid-cloud-war-room/api/incidents').then(r => r.json()),
    fetch('/hybrid-cloud-war-room/api/runbooks').then(r => r.json())
  ]);
  document.getElementById('clouds').innerHTML = envs.map(e =>
    `<div class="cloud-card" onclick="loadEnvironment('${e.id}')">
       <strong>${e.provider}</strong> &middot; ${e.region}
       <span class="status-${e.status.toLowerCase()}">${e.status}</span><br>
       ${e.instances} instances &middot; ${e.alerts} alerts<br>
       Risk ${e.riskScore} &middot; Compliance ${e.complianceScore}%</div>`).join('');
  document.getElementById('incidents').innerHTML = incidents.map(i =>
    `<div class="incident"><strong>${i.id}: ${i.title}</strong> [${i.severity} / ${i.status}]<br>
     ${i.description}<br>${i.cloudProvider} &middot; created ${i.created}</div>`).join('');
  document.getElementById('runbooks').innerHTML = runbooks.map(r =>
    `<div class="incident"><strong>${r.name}</strong><br>${r.steps.join('<br>')}</div>`).join('');
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
    fn summaries_drop_detail_fields() {
        let summaries = environment_summaries();
        let first = &summaries.as_array().unwrap()[0];
        assert_eq!(first["id"], "prod-aws");
        assert!(first.get("services").is_none());
        assert!(first.get("threats").is_none());
    }

    #[test]
    fn environment_lookup() {
        assert_eq!(environment("prod-gcp").unwrap()["status"], "DEGRADED");
        assert!(environment("prod-oci").is_none());
    }

    #[test]
    fn incident_lookup() {
        assert_eq!(incident("INC-2025-002").unwrap()["status"], "INVESTIGATING");
        assert!(incident("INC-9999-999").is_none());
    }
}
