//! Ultimate Sales Portal: B2B sales enablement fixtures and calculators.
//!
//! Vendor battlecards, objection-handling scripts, analyst quadrant data
//! and case studies, plus three small POST calculators (problem matcher,
//! scenario generator, ROI model) and a rule-based vendor recommender.

use axum::{
    body::Body,
    extract::Query,
    http::{Method, Request},
    response::Response,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::features::subpath;
use crate::http::response::{html, json as json_ok, read_json};
use crate::http::server::AppState;
use crate::http::LabError;

#[derive(Debug, Deserialize)]
struct MatchRequest {
    #[allow(dead_code)]
    #[serde(rename = "vendorId")]
    vendor_id: Option<String>,
    #[allow(dead_code)]
    #[serde(rename = "issueId")]
    issue_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScenarioRequest {
    vertical: String,
    objective: String,
}

#[derive(Debug, Deserialize)]
struct RoiRequest {
    budget: f64,
    #[allow(dead_code)]
    employees: Option<f64>,
    incidents: f64,
    #[serde(rename = "incidentCost")]
    incident_cost: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecommendRequest {
    vertical: String,
    issue: String,
}

pub async fn handle(_state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    match (req.method(), subpath(&path, "/sales-portal")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::GET, "/api/vendors") => Ok(json_ok(&vendors())),
        (&Method::GET, "/api/objections") => Ok(json_ok(&objections())),
        (&Method::GET, "/api/gartner") => Ok(json_ok(&gartner())),
        (&Method::GET, "/api/case-studies") => Ok(json_ok(&case_studies())),
        (&Method::POST, "/api/match") => {
            let _request: MatchRequest = read_json(req).await?;
            Ok(json_ok(&json!({
                "status": "success",
                "recommendations": ["Vendor A", "Vendor B", "Vendor C"],
            })))
        }
        (&Method::POST, "/api/scenario") => {
            let request: ScenarioRequest = read_json(req).await?;
            Ok(json_ok(&json!({
                "status": "success",
                "scenario": format!(
                    "Generated threat scenario for {} - {} objective",
                    request.vertical, request.objective
                ),
            })))
        }
        (&Method::POST, "/api/roi") => {
            let request: RoiRequest = read_json(req).await?;
            if request.budget <= 0.0 {
                return Err(LabError::BadRequest("Invalid request".into()));
            }
            let (savings, roi, payback_days) =
                roi_model(request.budget, request.incidents, request.incident_cost);
            Ok(json_ok(&json!({
                "status": "success",
                "savings": savings,
                "roi": roi,
                "paybackDays": payback_days,
            })))
        }
        (&Method::GET, "/api/recommend") => {
            // Query decodes both %XX and + spellings; absent or malformed
            // params fall back to empty filters.
            let request: RecommendRequest = Query::try_from_uri(req.uri())
                .map(|Query(request)| request)
                .unwrap_or_default();
            Ok(json_ok(&json!({
                "recommendations": recommend(&request.vertical, &request.issue),
            })))
        }
        (&Method::POST, "/api/recommend") => {
            let request: RecommendRequest = read_json(req).await?;
            Ok(json_ok(&json!({
                "recommendations": recommend(&request.vertical, &request.issue),
            })))
        }
        (
            _,
            "/" | "/api/vendors" | "/api/objections" | "/api/gartner" | "/api/case-studies"
            | "/api/match" | "/api/scenario" | "/api/roi" | "/api/recommend",
        ) => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

/// Savings model: a third of incident losses avoided plus a fifth of the
/// existing budget in operational efficiency.
fn roi_model(budget: f64, incidents: f64, incident_cost: f64) -> (i64, i64, i64) {
    let savings = incidents * incident_cost * 0.3 + budget * 0.2;
    let roi = savings / budget * 100.0;
    let payback_days = budget / (savings / 365.0);
    (
        savings.round() as i64,
        roi.round() as i64,
        payback_days.round() as i64,
    )
}

/// Vertical match counts double against a keyword hit in the feature list.
fn recommend(vertical: &str, issue: &str) -> Vec<Value> {
    let vertical = vertical.to_lowercase();
    let issue = issue.to_lowercase();
    let all = vendors();
    let mut scored: Vec<(i64, Value)> = all
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|vendor| {
            let mut score = 0i64;
            let verticals: Vec<String> = vendor["strength_verticals"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|v| v.as_str().map(str::to_lowercase))
                .collect();
            if !vertical.is_empty() && verticals.iter().any(|v| *v == vertical) {
                score += 2;
            }
            let features = vendor["features"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            if !issue.is_empty() && features.contains(&issue) {
                score += 1;
            }
            if score == 0 {
                return None;
            }
            Some((
                score,
                json!({
                    "id": vendor["id"],
                    "name": vendor["name"],
                    "score": score,
                    "category": vendor["category"],
                    "vendor": { "id": vendor["id"], "name": vendor["name"] },
                }),
            ))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(5);
    scored.into_iter().map(|(_, v)| v).collect()
}

fn vendors() -> Value {
    json!([
        {
            "id": "palo-alto-networks",
            "name": "Palo Alto Networks",
            "logo": "\u{1f534}",
            "category": ["NGFW", "Threat Intel", "EDR"],
            "features": ["EDR", "SIEM", "SOAR", "Cloud DLP", "ZTNA", "API Security", "Threat Intelligence"],
            "strength_verticals": ["finance", "government", "healthcare"],
            "typical_cost": "$500K-$2M/year",
            "win_rate_vs_company": 0.35,
            "gartner_position": {"category": "SIEM", "position": "Leader", "score": 0.92},
            "description": "Enterprise-grade network and cloud security platform"
        },
        {
            "id": "crowdstrike",
            "name": "Crowdstrike",
            "logo": "\u{1f985}",
            "category": ["EDR", "XDR"],
            "features": ["EDR", "Threat Intel", "Incident Response", "Managed Threat Hunting"],
            "strength_verticals": ["finance", "healthcare", "enterprise"],
            "typical_cost": "$200K-$800K/year",
            "win_rate_vs_company": 0.42,
            "gartner_position": {"category": "EDR", "position": "Leader", "score": 0.95},
            "description": "Cloud-native endpoint protection and response"
        },
        {
            "id": "zscaler",
            "name": "Zscaler",
            "logo": "\u{26a1}",
            "category": ["SASE", "Zero Trust"],
            "features": ["SASE", "Cloud DLP", "Firewall", "Web Isolation", "Zero Trust"],
            "strength_verticals": ["finance", "retail", "technology"],
            "typical_cost": "$150K-$600K/year",
            "win_rate_vs_company": 0.48,
            "gartner_position": {"category": "SASE", "position": "Leader", "score": 0.91},
            "description": "Zero Trust network access and cloud security"
        },
        {
            "id": "netskope",
            "name": "Netskope",
            "logo": "\u{1f310}",
            "category": ["SASE", "Cloud DLP"],
            "features": ["SASE", "Cloud DLP", "App Security", "Threat Protection", "Data Loss Prevention"],
            "strength_verticals": ["finance", "healthcare", "government"],
            "typical_cost": "$180K-$700K/year",
            "win_rate_vs_company": 0.45,
            "gartner_position": {"category": "SASE", "position": "Leader", "score": 0.88},
            "description": "Cloud-native security with DLP and threat protection"
        },
        {
            "id": "fortinet",
            "name": "Fortinet",
            "logo": "\u{1f6e1}\u{fe0f}",
            "category": ["NGFW", "SASE"],
            "features": ["NGFW", "SASE", "Threat Protection", "VPN", "Endpoint Protection"],
            "strength_verticals": ["manufacturing", "retail", "government"],
            "typical_cost": "$120K-$500K/year",
            "win_rate_vs_company": 0.38,
            "gartner_position": {"category": "NGFW", "position": "Leader", "score": 0.87},
            "description": "Integrated network security and SASE platform"
        },
        {
            "id": "check-point",
            "name": "Check Point",
            "logo": "\u{2713}",
            "category": ["NGFW", "Threat Prevention"],
            "features": ["NGFW", "Threat Prevention", "Endpoint Protection", "Mobile Security"],
            "strength_verticals": ["finance", "government", "healthcare"],
            "typical_cost": "$200K-$800K/year",
            "win_rate_vs_company": 0.33,
            "gartner_position": {"category": "NGFW", "position": "Leader", "score": 0.86},
            "description": "Unified network and endpoint security"
        },
        {
            "id": "f5-networks",
            "name": "F5 Networks",
            "logo": "\u{2699}\u{fe0f}",
            "category": ["Application Security", "DDoS"],
            "features": ["Web Application Firewall", "DDoS Protection", "Bot Management", "API Security"],
            "strength_verticals": ["finance", "ecommerce", "government"],
            "typical_cost": "$250K-$1M/year",
            "win_rate_vs_company": 0.40,
            "gartner_position": {"category": "WAF", "position": "Leader", "score": 0.89},
            "description": "Advanced application security and DDoS protection"
        },
        {
            "id": "sentinelone",
            "name": "SentinelOne",
            "logo": "\u{1f3af}",
            "category": ["EDR", "XDR"],
            "features": ["EDR", "XDR", "Threat Hunting", "Mobile Security", "IoT Security"],
            "strength_verticals": ["enterprise", "government", "healthcare"],
            "typical_cost": "$150K-$600K/year",
            "win_rate_vs_company": 0.44,
            "gartner_position": {"category": "EDR", "position": "Leader", "score": 0.90},
            "description": "Autonomous endpoint protection and response"
        },
        {
            "id": "cisco",
            "name": "Cisco",
            "logo": "\u{1f537}",
            "category": ["Network Security", "Cloud"],
            "features": ["NGFW", "Cloud Security", "Threat Defense", "Secure Access"],
            "strength_verticals": ["enterprise", "finance", "government"],
            "typical_cost": "$300K-$1.2M/year",
            "win_rate_vs_company": 0.37,
            "gartner_position": {"category": "NGFW", "position": "Visionary", "score": 0.82},
            "description": "Enterprise network and cloud security platform"
        },
        {
            "id": "infoblox",
            "name": "Infoblox",
            "logo": "\u{1f535}",
            "category": ["DDI", "Threat Prevention"],
            "features": ["DNS/DHCP/IPAM", "Threat Prevention", "DDoS Protection"],
            "strength_verticals": ["finance", "healthcare", "government"],
            "typical_cost": "$100K-$400K/year",
            "win_rate_vs_company": 0.52,
            "gartner_position": {"category": "DDI", "position": "Leader", "score": 0.91},
            "description": "DNS/DHCP/IPAM security and threat prevention"
        },
        {
            "id": "okta",
            "name": "Okta",
            "logo": "\u{1f511}",
            "category": ["Identity", "Access Management"],
            "features": ["SSO", "MFA", "Access Management", "Identity Verification"],
            "strength_verticals": ["saas", "enterprise", "finance"],
            "typical_cost": "$50K-$300K/year",
            "win_rate_vs_company": 0.55,
            "gartner_position": {"category": "IAM", "position": "Leader", "score": 0.93},
            "description": "Cloud identity and access management"
        }
    ])
}

fn objections() -> Value {
    json!([
        {
            "id": "ransomware-detection-lag",
            "title": "Ransomware detection lag",
            "issue": "Current tool takes too long to detect encrypted files",
            "severity": "CRITICAL",
            "script": "Acknowledge: Your current tool is solid at perimeter defense. Question: What's your average time-to-detect when ransomware hits? Industry average is 228 days. Our EDR detects via behavioral heuristics in 2-4 hours. Advantage: Real-time file activity monitoring + AI behavioral analysis. Next: Let's do a side-by-side POC on 10 systems.",
            "vertices": ["healthcare", "finance", "manufacturing"]
        },
        {
            "id": "sase-complexity",
            "title": "SASE deployment is too complex",
            "issue": "Takes 6+ months to roll out across org",
            "severity": "CRITICAL",
            "script": "Understand: SASE is a big shift from traditional firewall. Pain: Long deployment = security gaps during transition. Our SASE: Agentless for 80% of use cases, 30-day pilot. Advantage: Cloud-native = faster than on-prem. Business case: 3-month faster to value = $500K savings. Next: Let's map your network topology.",
            "vertices": ["enterprise", "finance", "government"]
        },
        {
            "id": "ddi-visibility-gaps",
            "title": "DNS/DDI visibility blind spots",
            "issue": "Can't see internal DNS queries or DHCP leaks",
            "severity": "HIGH",
            "script": "Reality: 70% of lateral movement uses DNS tunneling. Current risk: Attackers hide command & control in DNS. Our DDI: Complete DNS/DHCP/IPAM visibility + threat blocking. Advantage: Stops C2 before it happens. ROI: Prevents 1-2 major incidents/year. Next: Network diagram review.",
            "vertices": ["finance", "healthcare", "government"]
        },
        {
            "id": "cloud-misconfig-undetected",
            "title": "Cloud misconfigurations go undetected",
            "issue": "S3 buckets, RDS publicly exposed, secrets unrotated",
            "severity": "CRITICAL",
            "script": "Challenge: Cloud ownership spans teams, config drift happens fast. Our scanner: Continuous compliance checks + auto-remediation. Advantage: Catches 95% of cloud misconfigs before breach. Business: Reduces breach cost by $4M average. Timeline: Deploy scanner in 2 weeks. Next: Show you the dashboard.",
            "vertices": ["finance", "technology", "healthcare"]
        },
        {
            "id": "zero-trust-gap",
            "title": "Zero Trust implementation incomplete",
            "issue": "Haven't fully implemented device trust or user verification",
            "severity": "HIGH",
            "script": "Partial ZT is partial security. Current state: 40% of employees use unverified devices. Our solution: Device posture verification + real-time user risk scoring. Advantage: Stops insider threats + compromised devices. Business case: 60% fewer endpoint breaches. Pilot: 100 users, 30 days. Next: Audit device posture.",
            "vertices": ["finance", "government", "healthcare"]
        },
        {
            "id": "budget-constraints",
            "title": "Security budget was already spent",
            "issue": "CFO says no budget for new tools until next fiscal year",
            "severity": "HIGH",
            "script": "Credible: Budgets are tight. Reframe: Our solution replaces tool X you're already paying for. Cost shift: Cut Palo Alto EDR ($X) + move to us ($X-20%). ROI: Faster detection = lower incident costs. Business: Justify via incident avoidance. Finance play: Position as operational efficiency, not CapEx. Next: Build 3-year TCO model.",
            "vertices": ["all"]
        },
        {
            "id": "vendor-consolidation",
            "title": "We need FEWER tools, not more",
            "issue": "Tool sprawl = management nightmare, 15+ vendors already",
            "severity": "HIGH",
            "script": "Understand: Tool sprawl kills SOC efficiency. Our advantage: Our EDR + threat intel covers 60% of your current stack. Consolidation play: Replace 3-4 point solutions with us. Advantage: Single console, unified data, 40% less management overhead. Business: Reduce SOC salaries by automating alert triage. Next: Tool stack audit.",
            "vertices": ["enterprise", "finance", "healthcare"]
        },
        {
            "id": "staff-skillset-gaps",
            "title": "We don't have IT staff to manage this",
            "issue": "Security team is overwhelmed, no budget to hire",
            "severity": "MEDIUM",
            "script": "Reality: Staffing is tight industry-wide. Our advantage: Fully managed service available for 30% premium. Automation: 80% of alert triage is automated, not manual. ROI: Saves 3-5 FTE headcount. Business: Show automation ROI vs hiring cost ($200K/FTE). Next: Discuss managed services option.",
            "vertices": ["smb", "healthcare", "retail"]
        },
        {
            "id": "open-source-preference",
            "title": "Our CTO prefers open-source security tools",
            "issue": "Committed to open-source-only architecture",
            "severity": "MEDIUM",
            "script": "Respect: Open-source has huge role. Reality: 99% of production use Wazuh + our commercial solution for threat intel. Our approach: We integrate with Wazuh, ELK, Kafka. Best of both: OSS foundation + our proprietary threat detection. Business: Avoid lock-in risk. Next: Show Wazuh integration.",
            "vertices": ["startups", "technology"]
        },
        {
            "id": "vendor-lock-in-fear",
            "title": "Worried about vendor lock-in with proprietary solutions",
            "issue": "Don't want to be stuck with one vendor",
            "severity": "MEDIUM",
            "script": "Legitimate concern: Switching costs are real. Our promise: All data exports to standard formats (STIX, JSON, logs). No lock-in: Leave anytime, take your data. Contract: Month-to-month terms available. Business advantage: Our performance speaks for itself, we don't need lock-in. Next: Discuss data portability contract.",
            "vertices": ["enterprise", "finance"]
        },
        {
            "id": "competitor-entrenched",
            "title": "We're already locked into competitor X",
            "issue": "Multi-year contract with Crowdstrike/Palo Alto/etc",
            "severity": "MEDIUM",
            "script": "Understand: Switching costs are real. Opportunity: Contracts end eventually, prepare now. Our strategy: Co-exist with your current tool, prove value in parallel. Advantage: You keep current tool, we cover gaps they have. Timeline: When contract renews, you'll be ready. Business: Reduce risk via defense-in-depth. Next: Discuss proof-of-concept.",
            "vertices": ["enterprise", "finance", "government"]
        },
        {
            "id": "compliance-burden",
            "title": "Compliance/audit burden is overwhelming",
            "issue": "HIPAA, SOC2, ISO27001 requirements",
            "severity": "HIGH",
            "script": "Compliance: We meet all major standards + provide audit reports. Our advantage: Built-in compliance logging for HIPAA, SOC2, PCI. Business: Accelerates audit process by 3-4 weeks. ROI: Save $50K-100K in consulting fees. Next: Show compliance dashboard.",
            "vertices": ["healthcare", "finance", "government"]
        },
        {
            "id": "feature-overlap-confusion",
            "title": "Can't figure out which vendor handles which problem",
            "issue": "10 vendors do similar things, can't compare features",
            "severity": "MEDIUM",
            "script": "Confusion: Normal when ecosystem is complex. Our solution: Feature comparison matrix shows exactly what covers what. Advantage: Transparent feature positioning. Business: Faster procurement decisions. Next: Show you the feature matrix.",
            "vertices": ["enterprise", "all"]
        }
    ])
}

fn gartner() -> Value {
    json!({
        "sase": {
            "category": "SASE (Secure Access Service Edge)",
            "leaders": ["Zscaler", "Netskope"],
            "visionaries": ["Palo Alto Networks", "Fortinet"],
            "niche_players": ["Check Point"],
            "challengers": ["Cisco"],
            "market_share": { "zscaler": 0.28, "netskope": 0.22, "palo_alto": 0.18, "fortinet": 0.15, "others": 0.17 },
            "growth": "45% CAGR 2023-2025",
            "key_criteria": ["Architecture", "Performance", "Zero Trust", "DLP", "Cloud Integration"]
        },
        "edr": {
            "category": "EDR (Endpoint Detection & Response)",
            "leaders": ["Crowdstrike", "SentinelOne"],
            "visionaries": ["Microsoft Defender", "Trend Micro"],
            "niche_players": ["Carbon Black", "Cybereason"],
            "challengers": ["Palo Alto EDR"],
            "market_share": { "crowdstrike": 0.32, "sentinelone": 0.18, "microsoft": 0.20, "carbon_black": 0.12, "others": 0.18 },
            "growth": "28% CAGR 2023-2025",
            "key_criteria": ["Detection Accuracy", "Automation", "SOAR Integration", "Threat Intel"]
        },
        "siem": {
            "category": "SIEM (Security Information & Event Management)",
            "leaders": ["Splunk", "Palo Alto Networks"],
            "visionaries": ["Elastic", "IBM QRadar"],
            "niche_players": ["ArcSight", "LogRhythm"],
            "challengers": ["Sumo Logic"],
            "market_share": { "splunk": 0.28, "palo_alto": 0.22, "elastic": 0.15, "ibm_qradar": 0.18, "others": 0.17 },
            "growth": "12% CAGR 2023-2025",
            "key_criteria": ["Log Analysis", "Threat Detection", "Automation", "Cloud Native"]
        },
        "ddi": {
            "category": "DDI (DNS/DHCP/IPAM)",
            "leaders": ["Infoblox"],
            "visionaries": ["Cisco Umbrella", "EfficientIP"],
            "niche_players": ["Bluecat", "Menandmice"],
            "challengers": ["Microsoft", "Alcatel-Lucent"],
            "market_share": { "infoblox": 0.42, "cisco_umbrella": 0.20, "efficientip": 0.15, "bluecat": 0.12, "others": 0.11 },
            "growth": "18% CAGR 2023-2025",
            "key_criteria": ["DNS Security", "Threat Prevention", "Network Visibility", "IoT Support"]
        },
        "ngfw": {
            "category": "NGFW (Next-Gen Firewall)",
            "leaders": ["Palo Alto Networks", "Fortinet"],
            "visionaries": ["Check Point", "Cisco"],
            "niche_players": ["Juniper", "Hillstone"],
            "challengers": ["Stonesoft"],
            "market_share": { "palo_alto": 0.28, "fortinet": 0.25, "check_point": 0.18, "cisco": 0.15, "others": 0.14 },
            "growth": "8% CAGR 2023-2025",
            "key_criteria": ["Throughput", "Threat Prevention", "Cloud Integration", "Automation"]
        },
        "cloud_security": {
            "category": "Cloud Security",
            "leaders": ["Netskope", "Zscaler"],
            "visionaries": ["Palo Alto Prisma", "Trend Micro"],
            "niche_players": ["Check Point CloudGuard"],
            "challengers": ["McAfee Cloud Defender"],
            "market_share": { "netskope": 0.25, "zscaler": 0.22, "palo_alto": 0.20, "trend_micro": 0.15, "others": 0.18 },
            "growth": "42% CAGR 2023-2025",
            "key_criteria": ["Multi-Cloud", "DLP", "Threat Protection", "Compliance"]
        }
    })
}

fn case_studies() -> Value {
    json!([
        {
            "id": "case-1",
            "company": "Fortune 500 Financial Services",
            "vertical": "Finance",
            "challenge": "Ransomware detection too slow (228-day industry avg dwell time)",
            "previous_solution": "Palo Alto NGFW + basic EDR",
            "nexum_solution": "EDR with behavioral analysis",
            "results": "2-hour detection vs 228-day avg. Saved $40M in potential ransom + downtime",
            "roi": "340% Year 1"
        },
        {
            "id": "case-2",
            "company": "Healthcare Network (200+ clinics)",
            "vertical": "Healthcare",
            "challenge": "HIPAA compliance burden, manual audit process",
            "previous_solution": "Multiple point solutions (Splunk, EDR, Firewall)",
            "nexum_solution": "Unified platform with audit logging",
            "results": "Reduced audit time from 8 weeks to 2 weeks. Auto-compliance reporting",
            "roi": "$150K savings in consulting fees"
        },
        {
            "id": "case-3",
            "company": "Tech Startup (500 employees)",
            "vertical": "SaaS/Technology",
            "challenge": "Tool sprawl (15+ vendors), SOC team only 3 people",
            "previous_solution": "Wazuh (OSS) + multiple point solutions",
            "nexum_solution": "Consolidated platform + Wazuh integration",
            "results": "Reduced alerts by 70% via automation, team productivity +3x",
            "roi": "Avoided $600K hiring 3 additional SOC staff"
        },
        {
            "id": "case-4",
            "company": "Manufacturing (10,000+ devices)",
            "vertical": "Manufacturing",
            "challenge": "IoT/OT network visibility, cloud misconfig risks",
            "previous_solution": "Legacy firewall, no cloud monitoring",
            "nexum_solution": "DDI + cloud security",
            "results": "Discovered 247 misconfigurations, fixed before breach. Real-time IoT visibility",
            "roi": "Prevented estimated $5M breach impact"
        },
        {
            "id": "case-5",
            "company": "Government Agency (50,000 users)",
            "vertical": "Government",
            "challenge": "Zero Trust transition from traditional perimeter",
            "previous_solution": "Perimeter-based Cisco + Check Point",
            "nexum_solution": "Zero Trust with device verification",
            "results": "Implemented ZT policy for 10,000 users in 6 months vs estimated 18 months",
            "roi": "2 years saved, $3M in consulting"
        },
        {
            "id": "case-6",
            "company": "Retail Chain (2,000 stores)",
            "vertical": "Retail",
            "challenge": "PCI-DSS compliance across distributed network",
            "previous_solution": "Manual compliance checks",
            "nexum_solution": "Automated compliance with continuous monitoring",
            "results": "From manual to real-time compliance. 0 findings on audit",
            "roi": "$2M operational efficiency"
        },
        {
            "id": "case-7",
            "company": "Education System (100+ schools)",
            "vertical": "Education",
            "challenge": "Ransomware attacks targeting student data",
            "previous_solution": "Basic antivirus + basic firewall",
            "nexum_solution": "EDR + threat intel + DDI",
            "results": "6 ransomware attacks detected in 30 mins, all blocked pre-execution",
            "roi": "$50M+ student data protected"
        },
        {
            "id": "case-8",
            "company": "Insurance Provider (5,000 employees)",
            "vertical": "Finance",
            "challenge": "Insider threat detection, compliance requirements",
            "previous_solution": "SIEM + basic endpoint monitoring",
            "nexum_solution": "XDR with behavioral analytics + user risk scoring",
            "results": "Detected 12 insider threats before data exfiltration",
            "roi": "Prevented $200M in potential fraud/data loss"
        },
        {
            "id": "case-9",
            "company": "Pharma Company (global operations)",
            "vertical": "Healthcare",
            "challenge": "Multi-region SASE deployment, compliance complexity",
            "previous_solution": "Multiple regional firewalls + VPNs",
            "nexum_solution": "Global SASE + unified compliance",
            "results": "Deployed 3 regions in 8 weeks vs 6 months estimated. Compliance simplified",
            "roi": "4 months accelerated time-to-market"
        },
        {
            "id": "case-10",
            "company": "Financial Trading Firm",
            "vertical": "Finance",
            "challenge": "Threat detection must be < 5 minutes for regulatory requirements",
            "previous_solution": "Palo Alto + Splunk (latency issues)",
            "nexum_solution": "Real-time EDR + streaming SIEM",
            "results": "Average detection time: 2 minutes (vs 47-minute avg previously)",
            "roi": "Maintained trading license, avoided $50M+ regulatory fines"
        }
    ])
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Ultimate Sales Portal</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: 'Segoe UI', Tahoma, sans-serif; background: linear-gradient(135deg, #0f0f1e, #1a1a2e); color: #e0e0e0; min-height: 100vh; }
  .header { background: linear-gradient(90deg, #00d9ff, #0099cc); padding: 20px; text-align: center; }
  .header h1 { font-size: 28px; color: #000; font-weight: 700; }
  .container { max-width: 1200px; margin: 0 auto; padding: 20px; }
  .tabs { display: flex; gap: 10px; margin-bottom: 20px; flex-wrap: wrap; }
  .tab-btn { padding: 12px 20px; background: #1a1a2e; color: #e0e0e0; border: 2px solid #00d9ff; border-radius: 8px; cursor: pointer; font-weight: 600; }
  .tab-btn.active { background: #00d9ff; color: #000; }
  .card { background: #1a1a2e; border: 1px solid #00d9ff; border-radius: 12px; padding: 20px; margin-bottom: 20px; }
  .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; margin-top: 20px; }
  .vendor-card { background: #0f0f1e; border: 1px solid #333; border-radius: 8px; padding: 15px; }
  .vendor-name { font-size: 16px; font-weight: 700; color: #00d9ff; margin-bottom: 8px; }
  .vendor-details { font-size: 12px; color: #999; }
  .objection-box { background: #0f0f1e; border-left: 4px solid #ff6b6b; padding: 15px; margin-bottom: 15px; border-radius: 4px; }
  .objection-title { color: #ff6b6b; font-weight: 700; margin-bottom: 8px; }
  .roi-result { background: #1a3a3a; border-left: 4px solid #00ff88; padding: 15px; border-radius: 4px; margin-top: 20px; }
  label { display: block; margin: 12px 0 6px; color: #00d9ff; font-weight: 600; }
  input { width: 100%; padding: 10px; background: #0f0f1e; color: #e0e0e0; border: 1px solid #00d9ff; border-radius: 6px; }
  button.run { margin-top: 16px; padding: 12px 24px; background: linear-gradient(90deg, #00d9ff, #0099cc); color: #000; border: none; border-radius: 6px; font-weight: 700; cursor: pointer; }
</style>
</head>
<body>
<div class="header"><h1>Ultimate Sales Portal</h1></div>
<div class="container">
  <div class="tabs">
    <button class="tab-btn active" onclick="show('vendors')">Vendors</button>
    <button class="tab-btn" onclick="show('objections')">Objections</button>
    <button class="tab-btn" onclick="show('cases')">Case Studies</button>
    <button class="tab-btn" onclick="show('roi')">ROI Calculator</button>
  </div>
  <div class="card" id="tab-vendors"><div class="grid" id="vendors"></div></div>
  <div class="card" id="tab-objections" style="display:none"><div id="objections"></div></div>
  <div class="card" id="tab-cases" style="display:none"><div id="cases"></div></div>
  <div class="card" id="tab-roi" style="display:none">
    <label>Annual security budget ($)</label><input type="number" id="budget" value="500000">
    <label>Incidents per year</label><input type="number" id="incidents" value="4">
    <label>Average incident cost ($)</label><input type="number" id="incidentCost" value="250000">
    <button class="run" onclick="calcRoi()">Calculate</button>
    <div class="roi-result" id="roi-result" style="display:none"></div>
  </div>
</div>
<script>
function show(tab) {
  for (const name of ['vendors', 'objections', 'cases', 'roi'])
    document.getElementById('tab-' + name).style.display = name === tab ? 'block' : 'none';
  document.querySelectorAll('.tab-btn').forEach(b => b.classList.toggle('active', b.textContent.toLowerCase().startsWith(tab.slice(0, 3))));
}
async function load() {
  const [vendors, objections, cases] = await Promise.all([
    fetch('/sales-portal/api/vendors').then(r => r.json()),
    fetch('/sales-portal/api/objections').then(r => r.json()),
    fetch('/sales-portal/api/case-studies').then(r => r.json())
  ]);
  document.getElementById('vendors').innerHTML = vendors.map(v =>
    `<div class="vendor-card"><div class="vendor-name">${v.logo} ${v.name}</div>
     <div class="vendor-details">${v.description}<br>Cost: ${v.typical_cost}<br>Win rate vs us: ${Math.round(v.win_rate_vs_company * 100)}%</div></div>`).join('');
  document.getElementById('objections').innerHTML = objections.map(o =>
    `<div class="objection-box"><div class="objection-title">${o.title} [${o.severity}]</div><div>${o.script}</div></div>`).join('');
  document.getElementById('cases').innerHTML = cases.map(c =>
    `<div class="objection-box" style="border-left-color:#00ff88"><div class="objection-title" style="color:#00ff88">${c.company} (${c.vertical})</div>
     <div><strong>Challenge:</strong> ${c.challenge}<br><strong>Results:</strong> ${c.results}<br><strong>ROI:</strong> ${c.roi}</div></div>`).join('');
}
async function calcRoi() {
  const body = {
    budget: Number(document.getElementById('budget').value),
    incidents: Number(document.getElementById('incidents').value),
    incidentCost: Number(document.getElementById('incidentCost').value)
  };
  const d = await fetch('/sales-portal/api/roi', { method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify(body) }).then(r => r.json());
  const el = document.getElementById('roi-result');
  el.style.display = 'block';
  el.innerHTML = `Estimated savings: $${d.savings.toLocaleString()}<br>ROI: ${d.roi}%<br>Payback: ${d.paybackDays} days`;
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
        assert_eq!(vendors().as_array().unwrap().len(), 11);
        assert_eq!(objections().as_array().unwrap().len(), 13);
        assert_eq!(case_studies().as_array().unwrap().len(), 10);
        assert_eq!(gartner().as_object().unwrap().len(), 6);
    }

    #[test]
    fn roi_model_rounds_to_whole_numbers() {
        // 4 incidents at $250K: savings = 300000 + 100000 = 400000
        let (savings, roi, payback) = roi_model(500_000.0, 4.0, 250_000.0);
        assert_eq!(savings, 400_000);
        assert_eq!(roi, 80);
        assert_eq!(payback, 456);
    }

    #[test]
    fn recommend_prefers_vertical_matches() {
        let recs = recommend("manufacturing", "");
        assert!(!recs.is_empty());
        assert_eq!(recs[0]["id"], "fortinet");
        assert_eq!(recs[0]["score"], 2);
    }

    #[test]
    fn recommend_adds_issue_keyword_hits() {
        let recs = recommend("finance", "siem");
        assert!(recs.len() <= 5);
        // Palo Alto matches both the vertical and the SIEM feature keyword
        assert_eq!(recs[0]["id"], "palo-alto-networks");
        assert_eq!(recs[0]["score"], 3);
    }

    #[test]
    fn recommend_empty_inputs_yield_nothing() {
        assert!(recommend("", "").is_empty());
    }

    #[test]
    fn recommend_query_decodes_percent_and_plus_spellings() {
        for spelling in [
            "/sales-portal/api/recommend?vertical=finance&issue=zero%20trust",
            "/sales-portal/api/recommend?vertical=finance&issue=zero+trust",
        ] {
            let uri: axum::http::Uri = spelling.parse().unwrap();
            let Query(request): Query<RecommendRequest> = Query::try_from_uri(&uri).unwrap();
            assert_eq!(request.vertical, "finance");
            assert_eq!(request.issue, "zero trust");
        }
    }
}
