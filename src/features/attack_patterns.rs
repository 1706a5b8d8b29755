//! Attack Patterns: interactive kill-chain matrix with chain scoring.
//!
//! Five phases, five techniques each, mapped to MITRE IDs and defensive
//! vendors. Visitors assemble a chain and score it; the score is an
//! average of per-technique risk weights.

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::features::subpath;
use crate::http::response::{html, json as json_ok, read_json};
use crate::http::server::AppState;
use crate::http::LabError;

#[derive(Debug, Deserialize)]
struct ChainItem {
    #[allow(dead_code)]
    phase: Option<String>,
    #[allow(dead_code)]
    technique: Option<String>,
    risk: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    chain: Vec<ChainItem>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRequest {
    #[allow(dead_code)]
    phase: Option<String>,
    #[allow(dead_code)]
    technique: Option<String>,
}

pub async fn handle(_state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    match (req.method(), subpath(&path, "/attack-patterns")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::GET, "/api/framework") => Ok(json_ok(&framework())),
        (&Method::GET, "/api/vendors") => Ok(json_ok(&vendors())),
        (&Method::GET, "/api/labs") => Ok(json_ok(&labs())),
        (&Method::POST, "/api/score") => {
            let request: ScoreRequest = read_json(req).await?;
            let risk = score_chain(&request.chain);
            Ok(json_ok(&json!({ "risk": risk, "severity": risk_severity(risk) })))
        }
        (&Method::POST, "/api/scenario") => {
            let _request: ScenarioRequest = read_json(req).await?;
            let scenario = SCENARIOS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(SCENARIOS[0]);
            Ok(json_ok(&json!({ "scenario": scenario })))
        }
        (
            _,
            "/" | "/api/framework" | "/api/vendors" | "/api/labs" | "/api/score"
            | "/api/scenario",
        ) => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

/// Average of per-item risk weights, capped at 100. Unknown risk labels
/// weigh zero; an empty chain scores zero.
fn score_chain(chain: &[ChainItem]) -> u32 {
    let total: u32 = chain
        .iter()
        .map(|item| match item.risk.as_deref() {
            Some("CRITICAL") => 100,
            Some("HIGH") => 75,
            Some("MEDIUM") => 50,
            Some("LOW") => 25,
            _ => 0,
        })
        .sum();
    let count = chain.len().max(1) as f64;
    (f64::from(total) / count).round().min(100.0) as u32
}

fn risk_severity(risk: u32) -> &'static str {
    if risk >= 80 {
        "CRITICAL - Immediate action required"
    } else if risk >= 60 {
        "HIGH - Urgent remediation needed"
    } else if risk >= 40 {
        "MEDIUM - Monitor and plan mitigation"
    } else {
        "LOW - Document and track"
    }
}

fn framework() -> Value {
    json!({
        "phases": [
            {
                "id": "recon",
                "name": "\u{1f50d} Reconnaissance",
                "color": "#FF6B6B",
                "description": "Gather information on targets (OSINT, scanning, social engineering)",
                "techniques": [
                    {
                        "id": "active-scanning",
                        "name": "Active Scanning",
                        "mitre": "T1595",
                        "threat": "AI-enhanced port scanners with ML-driven vulnerability detection",
                        "vendors": ["Nessus", "Qualys", "Rapid7 Insight", "Shodan Enterprise", "Censys"],
                        "risk": "MEDIUM"
                    },
                    {
                        "id": "passive-recon",
                        "name": "Passive Reconnaissance",
                        "mitre": "T1598",
                        "threat": "Automated social media profiling, GitHub leaks, DNS enumeration",
                        "vendors": ["Maltego", "Recon-ng", "Shodan", "SpiderFoot", "theHarvester"],
                        "risk": "LOW"
                    },
                    {
                        "id": "phishing-prep",
                        "name": "Phishing Preparation",
                        "mitre": "T1598.003",
                        "threat": "AI-generated spear-phishing with persona synthesis, deepfake integration",
                        "vendors": ["Proofpoint", "Mimecast", "Abnormal Security", "Forcepoint", "Zscaler"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "target-dev",
                        "name": "Target Development",
                        "mitre": "T1589",
                        "threat": "LinkedIn harvesting, job posting analysis, org hierarchy mapping",
                        "vendors": ["Guardicore", "Rapid7", "Tenable", "Qualys", "Wiz"],
                        "risk": "HIGH"
                    },
                    {
                        "id": "supply-chain",
                        "name": "Supply Chain Reconnaissance",
                        "mitre": "T1591.004",
                        "threat": "Third-party vendor analysis, software bill of materials exploitation",
                        "vendors": ["Snyk", "Checkmarx", "Sonatype Nexus Firewall", "GitGuardian", "JFrog"],
                        "risk": "HIGH"
                    }
                ]
            },
            {
                "id": "initial-access",
                "name": "\u{1f6aa} Initial Access",
                "color": "#FFA500",
                "description": "Compromise first system (phishing, supply chain, watering hole)",
                "techniques": [
                    {
                        "id": "phishing",
                        "name": "Phishing",
                        "mitre": "T1566",
                        "threat": "AI-crafted emails with personalized malware payloads, dynamic URLs",
                        "vendors": ["Proofpoint", "Mimecast", "Abnormal Security", "Avanan", "Zscaler"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "supply-chain-compromise",
                        "name": "Supply Chain Compromise",
                        "mitre": "T1195",
                        "threat": "Software repos, package managers, CDN poisoning with ML-detected backdoors",
                        "vendors": ["Snyk", "JFrog Xray", "Sonatype", "Artifactory", "CloudRepo"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "exploit-public",
                        "name": "Exploit Public-Facing Application",
                        "mitre": "T1190",
                        "threat": "Zero-day exploitation, AI-guided vulnerability discovery in web apps",
                        "vendors": ["Acunetix", "Qualys", "Rapid7", "Tenable", "Burp Suite Pro"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "valid-accounts",
                        "name": "Valid Accounts",
                        "mitre": "T1078",
                        "threat": "Credential stuffing, brute-force with AI-optimized wordlists",
                        "vendors": ["Okta", "Jumio", "Auth0", "Microsoft Sentinel", "Splunk"],
                        "risk": "HIGH"
                    },
                    {
                        "id": "hardware-addition",
                        "name": "Hardware Addition",
                        "mitre": "T1200",
                        "threat": "Physical USB drops, malicious charging cables in secure facilities",
                        "vendors": ["Cisco ISE", "Fortinet", "Palo Alto", "Arista", "Menlo Security"],
                        "risk": "MEDIUM"
                    }
                ]
            },
            {
                "id": "exploitation",
                "name": "\u{26a1} Exploitation & Lateral Movement",
                "color": "#FFD93D",
                "description": "Escalate privileges, move through network laterally",
                "techniques": [
                    {
                        "id": "privilege-escalation",
                        "name": "Privilege Escalation",
                        "mitre": "T1548",
                        "threat": "Kernel exploits, UAC bypass, AI-enumerated privilege gaps",
                        "vendors": ["CrowdStrike Falcon", "Microsoft Defender", "Carbon Black", "SentinelOne"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "lateral-movement",
                        "name": "Lateral Movement (Pass-the-Hash)",
                        "mitre": "T1550.002",
                        "threat": "Kerberos delegation abuse, AI-guided pass-the-ticket chains",
                        "vendors": ["Delinea", "CyberArk", "BeyondTrust", "Varonis", "NetWitness"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "cloud-abuse",
                        "name": "Abuse Cloud Metadata Service",
                        "mitre": "T1111",
                        "threat": "EC2/GCP metadata service exploitation, IMDS token theft",
                        "vendors": ["Wiz", "Orca Security", "Lacework", "Prisma Cloud", "CloudSploit"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "remote-exec",
                        "name": "Remote Code Execution",
                        "mitre": "T1059",
                        "threat": "RCE via SSRF, Template Injection, AI-obfuscated payloads",
                        "vendors": ["Rapid7", "Acunetix", "Fortify", "Veracode", "Checkmarx"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "lolbas",
                        "name": "Living Off The Land (LOLBAS)",
                        "mitre": "T1204",
                        "threat": "PowerShell, WMI, Registry abuse to evade EDR detection",
                        "vendors": ["CrowdStrike", "Microsoft Defender", "Carbon Black", "Red Canary"],
                        "risk": "HIGH"
                    }
                ]
            },
            {
                "id": "infiltration",
                "name": "\u{1f575}\u{fe0f} Infiltration & Persistence",
                "color": "#6BCB77",
                "description": "Maintain access, establish persistence, blend in with normal traffic",
                "techniques": [
                    {
                        "id": "persistence",
                        "name": "Persistence Mechanisms",
                        "mitre": "T1547",
                        "threat": "Scheduled tasks, startup folders, WMI event subscriptions",
                        "vendors": ["CrowdStrike", "SentinelOne", "Microsoft Defender", "Kaspersky"],
                        "risk": "HIGH"
                    },
                    {
                        "id": "defense-evasion",
                        "name": "Defense Evasion",
                        "mitre": "T1548",
                        "threat": "EDR blind spots, behavioral analysis evasion via ML-trained models",
                        "vendors": ["Falcon", "Elastic Security", "Sentinel", "Carbon Black", "Zscaler"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "command-control",
                        "name": "Command & Control (C2)",
                        "mitre": "T1071",
                        "threat": "Encrypted C2 channels, domain fronting, DNS tunneling",
                        "vendors": ["Cloudflare Radar", "Cisco Umbrella", "Fortinet FortiGate", "Palo Alto"],
                        "risk": "HIGH"
                    },
                    {
                        "id": "lateral-trust",
                        "name": "Lateral Trust Exploitation",
                        "mitre": "T1550",
                        "threat": "Compromised service accounts, stolen OAuth tokens, API abuse",
                        "vendors": ["Okta", "Google Cloud Security", "Azure Sentinel", "Ping Identity"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "exfil-cover",
                        "name": "Exfiltration Preparation",
                        "mitre": "T1005",
                        "threat": "Staging data, compression, encryption with AI-optimized schemas",
                        "vendors": ["Varonis", "Forcepoint", "Microsoft Purview", "Zscaler"],
                        "risk": "HIGH"
                    }
                ]
            },
            {
                "id": "exfiltration",
                "name": "\u{1f4b0} Exfiltration & Ransomware",
                "color": "#E74C3C",
                "description": "Extract data, deploy ransomware, negotiate or wipe systems",
                "techniques": [
                    {
                        "id": "exfil-transfer",
                        "name": "Data Exfiltration Transfer",
                        "mitre": "T1048",
                        "threat": "Cloud storage abuse, HTTPS tunneling, P2P botnet exfil",
                        "vendors": ["Varonis", "Microsoft Purview", "Forcepoint", "Zscaler", "Menlo"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "ransomware-deploy",
                        "name": "Ransomware Deployment",
                        "mitre": "T1486",
                        "threat": "Polyglot ransomware, AI-adaptive encryption, multi-stage attacks",
                        "vendors": ["Falcon", "Sentinel", "Kaspersky", "Trend Micro", "McAfee"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "impact",
                        "name": "Service Degradation (DoS/DDoS)",
                        "mitre": "T1499",
                        "threat": "Distributed denial of service, BGP hijacking, DNS amplification",
                        "vendors": ["Cloudflare", "Akamai", "AWS Shield", "Radware", "Imperva"],
                        "risk": "HIGH"
                    },
                    {
                        "id": "ransom-note",
                        "name": "Extortion & Negotiation",
                        "mitre": "T1657",
                        "threat": "Multi-channel extortion, victim shaming, affiliate networks",
                        "vendors": ["Mandiant", "Recorded Future", "CrowdStrike", "Flashpoint", "Abnormal"],
                        "risk": "CRITICAL"
                    },
                    {
                        "id": "supply-chain-wipe",
                        "name": "Supply Chain Wipeout",
                        "mitre": "T1561",
                        "threat": "Wiper malware destroying firmware, BIOS, storage devices",
                        "vendors": ["Kaspersky", "Symantec", "Trend Micro", "F-Secure", "G Data"],
                        "risk": "CRITICAL"
                    }
                ]
            }
        ]
    })
}

fn vendors() -> Value {
    json!([
        { "name": "Splunk Enterprise", "phases": ["exploitation", "infiltration", "exfiltration"], "type": "SIEM", "score": 95 },
        { "name": "Elastic Security", "phases": ["recon", "exploitation", "infiltration"], "type": "SIEM", "score": 90 },
        { "name": "Microsoft Sentinel", "phases": ["all"], "type": "SIEM", "score": 88 },
        { "name": "Datadog Security", "phases": ["infiltration", "exfiltration"], "type": "Cloud Monitoring", "score": 85 },
        { "name": "CrowdStrike Falcon", "phases": ["exploitation", "infiltration", "exfiltration"], "type": "EDR/XDR", "score": 98 },
        { "name": "Microsoft Defender for Endpoint", "phases": ["all"], "type": "EDR/XDR", "score": 92 },
        { "name": "SentinelOne", "phases": ["infiltration", "exfiltration"], "type": "EDR/XDR", "score": 96 },
        { "name": "Carbon Black", "phases": ["infiltration", "exfiltration"], "type": "EDR/XDR", "score": 89 },
        { "name": "Wiz", "phases": ["recon", "initial-access", "exploitation"], "type": "Cloud Security", "score": 94 },
        { "name": "Orca Security", "phases": ["recon", "exploitation"], "type": "Cloud Security", "score": 91 },
        { "name": "Lacework", "phases": ["exploitation", "infiltration"], "type": "Cloud Security", "score": 87 },
        { "name": "Prisma Cloud", "phases": ["recon", "exploitation", "infiltration"], "type": "Cloud Security", "score": 90 },
        { "name": "Proofpoint", "phases": ["recon", "initial-access"], "type": "Email Security", "score": 93 },
        { "name": "Mimecast", "phases": ["recon", "initial-access"], "type": "Email Security", "score": 91 },
        { "name": "Abnormal Security", "phases": ["initial-access"], "type": "Email AI", "score": 95 },
        { "name": "Palo Alto Networks", "phases": ["all"], "type": "Network", "score": 96 },
        { "name": "Fortinet FortiGate", "phases": ["initial-access", "infiltration"], "type": "Firewall", "score": 88 },
        { "name": "Cisco Secure", "phases": ["recon", "initial-access", "infiltration"], "type": "Network", "score": 92 },
        { "name": "Tenable Nessus", "phases": ["recon"], "type": "Vuln Mgmt", "score": 94 },
        { "name": "Qualys VMDR", "phases": ["recon", "initial-access"], "type": "Vuln Mgmt", "score": 90 },
        { "name": "Rapid7 InsightVM", "phases": ["recon", "exploitation"], "type": "Vuln Mgmt", "score": 92 },
        { "name": "Snyk", "phases": ["recon", "initial-access"], "type": "SCA", "score": 93 },
        { "name": "JFrog Xray", "phases": ["initial-access"], "type": "SCA", "score": 91 },
        { "name": "Sonatype Nexus", "phases": ["initial-access"], "type": "SCA", "score": 89 }
    ])
}

fn labs() -> Value {
    json!({
        "recon": {
            "name": "OSINT Lab",
            "description": "Practice passive intelligence gathering with mock Shodan/GitHub search",
            "tools": ["Shodan Search", "GitHub Dorking", "DNS Enumeration", "Email Harvesting"]
        },
        "exploitation": {
            "name": "Cloud Misconfig Scanner",
            "description": "Find S3 buckets, GCS blobs, unencrypted RDS instances in sandbox",
            "tools": ["S3 Bucket Finder", "IAM Policy Analyzer", "Terraform Misconfiguration Scout"]
        },
        "infiltration": {
            "name": "LOLBAS Simulator",
            "description": "Learn PowerShell, WMI, Registry techniques in isolated Windows sandbox",
            "tools": ["PowerShell Lab", "WMI Event Subscriptions", "Registry Persistence"]
        }
    })
}

const SCENARIOS: [&str; 3] = [
    "\u{1f3af} SCENARIO: Spear-Phishing Campaign\n\n1. RECONNAISSANCE (Week 1)\n- Harvested 15 targets from LinkedIn (VP Finance, IT Manager, CEO)\n- Analyzed email patterns via Clearbit API\n- Found 3 conference registrations (DefCon 32)\n\n2. PAYLOAD CRAFTING\n- AI model generated personalized emails using GPT-4\n- Subject: \"DefCon 32 Debrief - Critical Infrastructure Security\"\n- Attachments: Trojanized PDF with JSXVMP steganography\n- Detection evasion: Dynamic file signatures, 0-day Windows Print Spooler\n\n3. PHISHING DELIVERY\n- Spoofed domain: def-con32-briefings.com (lookalike)\n- Email timing: Tuesday 10:45 AM (highest open rates)\n- Result: 6/15 opened email, 4 downloaded attachment\n\n4. POST-COMPROMISE\n- Meterpreter shell established on Finance Director workstation\n- Lateral movement to Domain Controller within 2 hours\n- Persistence via WMI Event Subscription + Registry Run key\n\n\u{26a0}\u{fe0f} DEFENSE RECOMMENDATION:\n- Implement YARA rules for steganographic payloads\n- Deploy behavioral analytics (CrowdStrike Falcon)\n- Email authentication: DMARC/DKIM/SPF with BIMI sealing",
    "\u{1f3af} SCENARIO: AWS IMDS Token Hijacking\n\n1. INITIAL COMPROMISE\n- Exploited vulnerable web app on EC2 instance (CVE-2024-XXXX)\n- Gained shell as www-data user\n\n2. METADATA SERVICE DISCOVERY\n- Queried 169.254.169.254:80/latest/meta-data/ (IMDSv1 enabled)\n- Extracted:\n  * Instance role ARN: arn:aws:iam::ACCOUNT:role/WebAppRole\n  * Region: us-east-1\n  * Temporary credentials (valid for 43200s)\n\n3. PRIVILEGE ESCALATION\n- Used stolen credentials to assume EC2 role\n- Enumerated IAM policy: ec2:*, s3:*, rds:* permissions\n- Created new IAM user for persistence\n\n4. LATERAL MOVEMENT\n- Accessed S3 bucket: company-backups-prod\n- Downloaded 127GB backup (customer database)\n- Connected to RDS (aurora-prod) for exfiltration planning\n\n5. EVASION TACTICS\n- AI-trained model predicted CloudTrail logging patterns\n- Timestomped API calls to match legitimate traffic\n- Used VPC endpoint to avoid NAT gateway logs\n\n\u{26a0}\u{fe0f} DEFENSE RECOMMENDATION:\n- Force IMDSv2 (requires token headers)\n- Implement STS boundary policies\n- Monitor s3:GetObject to non-prod accounts\n- Deploy Wiz cloud security monitoring",
    "\u{1f3af} SCENARIO: AI-Powered Ransomware Campaign\n\n1. INFILTRATION\n- Command & control via Cloudflare Tunnel (domain-fronting)\n- Persistence mechanism: Registry persistence + scheduled task\n- Beaconing every 5 minutes to C2 server\n\n2. RECONNAISSANCE\n- Enumerated file shares, databases, backups\n- AI model ranked targets by:\n  * File criticality (database > spreadsheets)\n  * Backup accessibility (air-gapped vs online)\n  * Likely ransom value (revenue, market cap)\n\n3. ENCRYPTION\n- Phase 1: Encrypt non-critical files (logs, temp)\n- Phase 2: Encrypt databases and shares\n- Phase 3: Encrypt backup locations (shadow copies)\n- Algorithm: ChaCha20 + RSA-2048 hybrid\n\n4. EXFILTRATION (Parallel)\n- Copied sensitive files to attacker-controlled S3 bucket\n- Patient Zero database (PII): 2.3M records\n- Financial statements and contracts: 847 documents\n\n5. EXTORTION\n- Ransom note: $2.5M in Bitcoin\n- Threat: \"Publish data on darknet in 72 hours\"\n- Payment address: 1A1z7zfJ...XY (tracked 0.45 BTC deposit)\n\n\u{26a0}\u{fe0f} DEFENSE RECOMMENDATION:\n- 3-2-1-1 backup strategy (offsite + air-gapped)\n- EDR with behavioral heuristics (SentinelOne)\n- Network segmentation + DLP (Varonis)\n- Incident response retainer with Mandiant",
];

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Attack Patterns - Kill Chain Matrix</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: #0a0e17; color: #e0e6ed; }
  header { padding: 24px 32px; background: linear-gradient(135deg, #1a1f35, #0d1425); border-bottom: 2px solid #0ff; }
  h1 { margin: 0; font-size: 26px; color: #0ff; }
  .subtitle { color: #8892a6; margin-top: 4px; }
  .matrix { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 14px; padding: 24px 32px; }
  .phase { background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 14px; }
  .technique { padding: 6px 8px; margin: 6px 0; background: #0f1524; border-radius: 4px; font-size: 13px; cursor: pointer; }
  .technique:hover { background: #1b2440; }
  .panel { margin: 0 32px 24px; background: #141b2e; border: 1px solid #242e48; border-radius: 8px; padding: 20px; }
  button { background: #0ff; color: #06233a; border: none; border-radius: 4px; padding: 10px 22px; font-weight: 700; cursor: pointer; margin-right: 8px; }
  pre { white-space: pre-wrap; color: #b8c5d6; }
  .score-value { font-size: 40px; font-weight: 800; }
</style>
</head>
<body>
<header>
  <h1>&#9876; Attack Patterns</h1>
  <div class="subtitle">Kill-chain matrix with chain builder and risk scoring</div>
</header>
<div class="matrix" id="matrix"></div>
<div class="panel">
  <h2>Attack Chain</h2>
  <div id="chain">Click techniques above to build a chain.</div>
  <br>
  <button onclick="scoreChain()">Score Chain</button>
  <button onclick="generateScenario()">Generate Scenario</button>
  <button onclick="clearChain()">Clear</button>
  <div id="score"></div>
  <pre id="scenario"></pre>
</div>
<script>
let chain = [];
let framework = null;
function addToChain(phaseId, techId) {
  const phase = framework.phases.find(p => p.id === phaseId);
  const tech = phase.techniques.find(t => t.id === techId);
  chain.push({ phase: phase.name, technique: tech.name, risk: tech.risk });
  document.getElementById('chain').innerHTML = chain.map(c => `${c.technique} (${c.risk})`).join(' &rarr; ');
}
function clearChain() { chain = []; document.getElementById('chain').textContent = 'Cleared.'; document.getElementById('score').innerHTML = ''; }
async function scoreChain() {
  if (!chain.length) return;
  const data = await fetch('/attack-patterns/api/score', { method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify({ chain }) }).then(r => r.json());
  const color = data.risk > 80 ? '#E74C3C' : data.risk > 50 ? '#F39C12' : '#27AE60';
  document.getElementById('score').innerHTML = `<div class="score-value" style="color:${color}">${data.risk}%</div>Severity: ${data.severity}`;
}
async function generateScenario() {
  const data = await fetch('/attack-patterns/api/scenario', { method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify({ phase: 'any', technique: 'any' }) }).then(r => r.json());
  document.getElementById('scenario').textContent = data.scenario;
}
async function init() {
  framework = await fetch('/attack-patterns/api/framework').then(r => r.json());
  document.getElementById('matrix').innerHTML = framework.phases.map(p =>
    `<div class="phase" style="border-top: 3px solid ${p.color}"><strong>${p.name}</strong><br><small>${p.description}</small>
     ${p.techniques.map(t => `<div class="technique" onclick="addToChain('${p.id}','${t.id}')">${t.name} <small>(${t.mitre}, ${t.risk})</small></div>`).join('')}</div>`).join('');
}
init();
</script>
</body>
</html>"#
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(risk: &str) -> ChainItem {
        ChainItem {
            phase: None,
            technique: None,
            risk: Some(risk.to_string()),
        }
    }

    #[test]
    fn chain_score_averages_risk_weights() {
        assert_eq!(score_chain(&[item("CRITICAL"), item("LOW")]), 63);
        assert_eq!(score_chain(&[item("CRITICAL")]), 100);
        assert_eq!(score_chain(&[item("MEDIUM"), item("MEDIUM")]), 50);
    }

    #[test]
    fn empty_chain_and_unknown_risk_score_zero() {
        assert_eq!(score_chain(&[]), 0);
        assert_eq!(
            score_chain(&[ChainItem {
                phase: None,
                technique: None,
                risk: Some("BOGUS".into())
            }]),
            0
        );
    }

    #[test]
    fn severity_bands() {
        assert!(risk_severity(100).starts_with("CRITICAL"));
        assert!(risk_severity(80).starts_with("CRITICAL"));
        assert!(risk_severity(79).starts_with("HIGH"));
        assert!(risk_severity(60).starts_with("HIGH"));
        assert!(risk_severity(59).starts_with("MEDIUM"));
        assert!(risk_severity(40).starts_with("MEDIUM"));
        assert!(risk_severity(39).starts_with("LOW"));
    }

    #[test]
    fn framework_is_five_by_five() {
        let framework = framework();
        let phases = framework["phases"].as_array().unwrap();
        assert_eq!(phases.len(), 5);
        for phase in phases {
            assert_eq!(phase["techniques"].as_array().unwrap().len(), 5);
        }
    }

    #[test]
    fn labs_cover_three_phases() {
        let labs = labs();
        assert!(labs.get("recon").is_some());
        assert!(labs.get("exploitation").is_some());
        assert!(labs.get("infiltration").is_some());
    }
}
