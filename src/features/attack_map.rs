//! Live Attack Map: synthetic threat-traffic generator with a Leaflet UI.
//!
//! Attack records are generated per request from weighted source-country
//! and target-city tables, so the map animates without any upstream feed.

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use chrono::{Duration, Utc};
use rand::Rng;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::features::subpath;
use crate::http::response::{html, json as json_ok};
use crate::http::server::AppState;
use crate::http::LabError;

const DEFAULT_COUNT: usize = 50;
const MAX_COUNT: usize = 500;

struct Country {
    name: &'static str,
    lat: f64,
    lng: f64,
    weight: u32,
}

struct UsTarget {
    city: &'static str,
    lat: f64,
    lng: f64,
    weight: u32,
}

struct AttackType {
    name: &'static str,
    mitre: &'static str,
    color: &'static str,
    severity: &'static str,
}

// Weighted source countries. Weight zero means the country appears in the
// coordinate table for feed display but never as a generated source.
const SOURCES: [Country; 16] = [
    Country { name: "Russia", lat: 55.7558, lng: 37.6173, weight: 20 },
    Country { name: "China", lat: 39.9042, lng: 116.4074, weight: 25 },
    Country { name: "North Korea", lat: 39.0392, lng: 125.7625, weight: 10 },
    Country { name: "Iran", lat: 35.6892, lng: 51.3890, weight: 10 },
    Country { name: "Brazil", lat: -23.5505, lng: -46.6333, weight: 5 },
    Country { name: "India", lat: 28.6139, lng: 77.2090, weight: 5 },
    Country { name: "Nigeria", lat: 9.0820, lng: 7.4891, weight: 5 },
    Country { name: "Vietnam", lat: 21.0285, lng: 105.8542, weight: 5 },
    Country { name: "Romania", lat: 44.4268, lng: 26.1025, weight: 3 },
    Country { name: "Ukraine", lat: 50.4501, lng: 30.5234, weight: 3 },
    Country { name: "Turkey", lat: 39.9334, lng: 32.8597, weight: 2 },
    Country { name: "Indonesia", lat: -6.2088, lng: 106.8456, weight: 2 },
    Country { name: "Pakistan", lat: 33.6844, lng: 73.0479, weight: 2 },
    Country { name: "Netherlands", lat: 52.3676, lng: 4.9041, weight: 1 },
    Country { name: "Germany", lat: 52.5200, lng: 13.4050, weight: 1 },
    Country { name: "Belarus", lat: 53.9006, lng: 27.5590, weight: 1 },
];

const US_TARGETS: [UsTarget; 24] = [
    UsTarget { city: "Washington DC", lat: 38.9072, lng: -77.0369, weight: 5 },
    UsTarget { city: "New York", lat: 40.7128, lng: -74.0060, weight: 5 },
    UsTarget { city: "San Francisco", lat: 37.7749, lng: -122.4194, weight: 4 },
    UsTarget { city: "Los Angeles", lat: 34.0522, lng: -118.2437, weight: 4 },
    UsTarget { city: "Chicago", lat: 41.8781, lng: -87.6298, weight: 4 },
    UsTarget { city: "Dallas", lat: 32.7767, lng: -96.7970, weight: 3 },
    UsTarget { city: "Houston", lat: 29.7604, lng: -95.3698, weight: 3 },
    UsTarget { city: "Atlanta", lat: 33.7490, lng: -84.3880, weight: 4 },
    UsTarget { city: "Seattle", lat: 47.6062, lng: -122.3321, weight: 4 },
    UsTarget { city: "Boston", lat: 42.3601, lng: -71.0589, weight: 3 },
    UsTarget { city: "Denver", lat: 39.7392, lng: -104.9903, weight: 3 },
    UsTarget { city: "Phoenix", lat: 33.4484, lng: -112.0740, weight: 2 },
    UsTarget { city: "Miami", lat: 25.7617, lng: -80.1918, weight: 3 },
    UsTarget { city: "Philadelphia", lat: 39.9526, lng: -75.1652, weight: 2 },
    UsTarget { city: "Austin", lat: 30.2672, lng: -97.7431, weight: 3 },
    UsTarget { city: "San Diego", lat: 32.7157, lng: -117.1611, weight: 2 },
    UsTarget { city: "Las Vegas", lat: 36.1699, lng: -115.1398, weight: 2 },
    UsTarget { city: "Portland", lat: 45.5155, lng: -122.6789, weight: 2 },
    UsTarget { city: "Minneapolis", lat: 44.9778, lng: -93.2650, weight: 2 },
    UsTarget { city: "Detroit", lat: 42.3314, lng: -83.0458, weight: 2 },
    UsTarget { city: "Ashburn VA", lat: 39.0438, lng: -77.4874, weight: 5 },
    UsTarget { city: "Salt Lake City", lat: 40.7608, lng: -111.8910, weight: 2 },
    UsTarget { city: "Kansas City", lat: 39.0997, lng: -94.5786, weight: 2 },
    UsTarget { city: "Raleigh", lat: 35.7796, lng: -78.6382, weight: 2 },
];

const ATTACK_TYPES: [AttackType; 17] = [
    AttackType { name: "APT", mitre: "TA0001-TA0011", color: "#ff0040", severity: "CRITICAL" },
    AttackType { name: "Ransomware", mitre: "T1486", color: "#ff0080", severity: "CRITICAL" },
    AttackType { name: "Zero-Day", mitre: "T1190", color: "#ff0000", severity: "CRITICAL" },
    AttackType { name: "Wiper", mitre: "T1485", color: "#cc0000", severity: "CRITICAL" },
    AttackType { name: "Supply Chain", mitre: "T1195", color: "#ff3366", severity: "CRITICAL" },
    AttackType { name: "DDoS", mitre: "T1498", color: "#ffcc00", severity: "HIGH" },
    AttackType { name: "Credential Stuffing", mitre: "T1110", color: "#ff6b00", severity: "HIGH" },
    AttackType { name: "Phishing", mitre: "T1566", color: "#00ccff", severity: "HIGH" },
    AttackType { name: "SQLi", mitre: "T1190", color: "#9933ff", severity: "HIGH" },
    AttackType { name: "Data Exfil", mitre: "T1041", color: "#cc00ff", severity: "HIGH" },
    AttackType { name: "Lateral Movement", mitre: "TA0008", color: "#ff6600", severity: "HIGH" },
    AttackType { name: "Malware", mitre: "T1204", color: "#ff3300", severity: "HIGH" },
    AttackType { name: "Botnet C2", mitre: "T1071", color: "#00ff88", severity: "MEDIUM" },
    AttackType { name: "Cryptojacking", mitre: "T1496", color: "#ffff00", severity: "MEDIUM" },
    AttackType { name: "API Abuse", mitre: "T1190", color: "#33ccff", severity: "MEDIUM" },
    AttackType { name: "Port Scan", mitre: "T1046", color: "#888888", severity: "LOW" },
    AttackType { name: "Brute Force", mitre: "T1110", color: "#666666", severity: "LOW" },
];

pub async fn handle(_state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    match (req.method(), subpath(&path, "/attack-map")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::GET, "/api/attacks") => {
            let attacks = generate_attacks(requested_count(query.as_deref()));
            let stats = calculate_stats(&attacks);
            Ok(json_ok(&json!({
                "attacks": attacks,
                "stats": stats,
                "lastUpdated": Utc::now().to_rfc3339(),
            })))
        }
        (&Method::GET, "/api/heatmap") => {
            let attacks = generate_attacks(200);
            let heat: Vec<Value> = attacks
                .iter()
                .map(|a| {
                    json!({
                        "lat": a["target"]["lat"],
                        "lng": a["target"]["lng"],
                        "intensity": severity_priority(a["severity"].as_str().unwrap_or("LOW")) as f64 / 4.0,
                    })
                })
                .collect();
            Ok(json_ok(&json!({ "heatData": heat })))
        }
        (&Method::GET, "/api/otx") => Ok(json_ok(&otx_pulses())),
        (&Method::GET, "/api/feeds") => Ok(json_ok(&json!({ "feeds": threat_feeds() }))),
        (_, "/" | "/api/attacks" | "/api/heatmap" | "/api/otx" | "/api/feeds") => {
            Err(LabError::MethodNotAllowed)
        }
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

/// Attack count from the query string, clamped so a large request cannot
/// stall generation. Absent or unparseable values use the default.
fn requested_count(query: Option<&str>) -> usize {
    query
        .and_then(|q| param(q, "count"))
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_COUNT)
        .min(MAX_COUNT)
}

fn param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

fn pick_weighted<'a, T>(items: &'a [T], weight: impl Fn(&T) -> u32, roll: f64) -> &'a T {
    let total: u32 = items.iter().map(&weight).sum();
    let mut remaining = roll * f64::from(total);
    for item in items {
        remaining -= f64::from(weight(item));
        if remaining <= 0.0 {
            return item;
        }
    }
    &items[items.len() - 1]
}

fn generate_attacks(count: usize) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let now_millis = now.timestamp_millis();
    let mut attacks: Vec<Value> = (0..count)
        .map(|i| {
            let source = pick_weighted(&SOURCES, |c| c.weight, rng.gen::<f64>());
            let target = pick_weighted(&US_TARGETS, |t| t.weight, rng.gen::<f64>());
            let kind = &ATTACK_TYPES[rng.gen_range(0..ATTACK_TYPES.len())];
            let jitter = |rng: &mut rand::rngs::ThreadRng| (rng.gen::<f64>() - 0.5) * 2.0;
            let age_ms = rng.gen_range(0..600_000i64);
            json!({
                "id": format!("attack-{now_millis}-{i}"),
                "source": {
                    "lat": source.lat + jitter(&mut rng),
                    "lng": source.lng + jitter(&mut rng),
                    "country": source.name,
                },
                "target": {
                    "lat": target.lat + jitter(&mut rng) * 0.5,
                    "lng": target.lng + jitter(&mut rng) * 0.5,
                    "city": target.city,
                },
                "type": kind.name,
                "mitre": kind.mitre,
                "color": kind.color,
                "severity": kind.severity,
                "timestamp": (now - Duration::milliseconds(age_ms)).to_rfc3339(),
                "packets": rng.gen_range(100..10100),
                "blocked": rng.gen::<f64>() > 0.15,
            })
        })
        .collect();
    attacks.sort_by(|a, b| {
        b["timestamp"]
            .as_str()
            .unwrap_or("")
            .cmp(a["timestamp"].as_str().unwrap_or(""))
    });
    attacks
}

fn severity_priority(severity: &str) -> u32 {
    match severity {
        "CRITICAL" => 4,
        "HIGH" => 3,
        "MEDIUM" => 2,
        _ => 1,
    }
}

fn calculate_stats(attacks: &[Value]) -> Value {
    let mut rng = rand::thread_rng();
    let total_today = 14523 + rng.gen_range(0..2000);
    let blocked_count = attacks
        .iter()
        .filter(|a| a["blocked"].as_bool().unwrap_or(false))
        .count();
    let count_severity = |level: &str| {
        attacks
            .iter()
            .filter(|a| a["severity"].as_str() == Some(level))
            .count()
    };
    let mut by_country: HashMap<&str, usize> = HashMap::new();
    for attack in attacks {
        if let Some(country) = attack["source"]["country"].as_str() {
            *by_country.entry(country).or_insert(0) += 1;
        }
    }
    let mut top_sources: Vec<(&str, usize)> = by_country.into_iter().collect();
    top_sources.sort_by(|a, b| b.1.cmp(&a.1));
    top_sources.truncate(5);

    let blocked_percent = if attacks.is_empty() {
        0
    } else {
        ((blocked_count as f64 / attacks.len() as f64) * 100.0).round() as u32
    };

    json!({
        "totalToday": total_today,
        "blockedToday": (f64::from(total_today) * 0.88).floor() as i64,
        "activeNow": attacks.len(),
        "bySeverity": {
            "CRITICAL": count_severity("CRITICAL"),
            "HIGH": count_severity("HIGH"),
            "MEDIUM": count_severity("MEDIUM"),
            "LOW": count_severity("LOW"),
        },
        "topSources": top_sources,
        "blockedPercent": blocked_percent,
    })
}

fn otx_pulses() -> Value {
    let now = Utc::now().to_rfc3339();
    json!({
        "pulses": [
            { "id": "pulse-1", "name": "APT29 Infrastructure Threats", "indicators": 45, "modified": now },
            { "id": "pulse-2", "name": "Ransomware IOCs Q4 2024", "indicators": 127, "modified": now },
            { "id": "pulse-3", "name": "Chinese APT Targeting", "indicators": 89, "modified": now }
        ],
        "source": "AlienVault OTX",
        "summary": "Latest OTX threat pulses (simulated)"
    })
}

fn threat_feeds() -> Value {
    json!([
        { "name": "Cisco Talos", "url": "https://blog.talosintelligence.com/feeds/posts/default?alt=rss", "icon": "\u{1f512}", "active": true },
        { "name": "ESET WeLiveSecurity", "url": "https://www.welivesecurity.com/en/rss/feed/", "icon": "\u{1f6e1}\u{fe0f}", "active": true },
        { "name": "Krebs on Security", "url": "https://krebsonsecurity.com/feed/", "icon": "\u{1f4f0}", "active": true },
        { "name": "BleepingComputer", "url": "https://www.bleepingcomputer.com/feed/", "icon": "\u{1f4bb}", "active": true },
        { "name": "The Hacker News", "url": "https://feeds.feedburner.com/TheHackersNews", "icon": "\u{1f513}", "active": true },
        { "name": "Dark Reading", "url": "https://www.darkreading.com/rss.xml", "icon": "\u{1f311}", "active": false },
        { "name": "Threatpost", "url": "https://threatpost.com/feed/", "icon": "\u{26a0}\u{fe0f}", "active": false },
        { "name": "US-CERT/CISA", "url": "https://www.cisa.gov/uscert/ncas/alerts.xml", "icon": "\u{1f1fa}\u{1f1f8}", "active": true }
    ])
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no">
<title>Live Attack Map | Threat Intelligence</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script src="https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js"></script>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: 'Inter', -apple-system, sans-serif; background: #0a0a0f; color: #e0e0e0; overflow: hidden; }
  #map { width: 100vw; height: 100vh; background: #0a0a0f; }
  .leaflet-tile-pane { filter: brightness(0.7) contrast(1.15) saturate(0.9); }
  .header { position: fixed; top: 0; left: 0; right: 0; height: 64px; display: flex; align-items: center;
    justify-content: space-between; padding: 0 20px; z-index: 1000;
    background: linear-gradient(180deg, rgba(10,10,15,0.98), rgba(10,10,15,0.85) 80%, transparent); }
  .stats { position: fixed; bottom: 16px; left: 16px; z-index: 1000; background: rgba(18,18,26,0.92);
    border: 1px solid #1a1a2e; border-radius: 10px; padding: 14px 18px; font-size: 13px; }
  .stats .big { font-size: 22px; font-weight: 800; color: #ff0040; }
  .legend { position: fixed; bottom: 16px; right: 16px; z-index: 1000; background: rgba(18,18,26,0.92);
    border: 1px solid #1a1a2e; border-radius: 10px; padding: 12px 16px; font-size: 12px; }
  .dot { display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin-right: 6px; }
</style>
</head>
<body>
<div class="header"><strong>&#127919; Live Attack Map</strong><span id="updated"></span></div>
<div id="map"></div>
<div class="stats" id="stats">Loading...</div>
<div class="legend">
  <div><span class="dot" style="background:#ff0040"></span>Critical</div>
  <div><span class="dot" style="background:#ff6b00"></span>High</div>
  <div><span class="dot" style="background:#ffcc00"></span>Medium</div>
  <div><span class="dot" style="background:#00ff88"></span>Low</div>
</div>
<script>
const map = L.map('map', { zoomControl: false, preferCanvas: true }).setView([39.8, -98.6], 4);
L.tileLayer('https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png', { maxZoom: 19 }).addTo(map);
let lines = [];
async function refresh() {
  const data = await fetch('/attack-map/api/attacks?count=80').then(r => r.json());
  lines.forEach(l => map.removeLayer(l));
  lines = data.attacks.map(a => L.polyline(
    [[a.source.lat, a.source.lng], [a.target.lat, a.target.lng]],
    { color: a.color, weight: 1.5, opacity: 0.55 }).addTo(map));
  const s = data.stats;
  document.getElementById('stats').innerHTML =
    `<div class="big">${s.totalToday.toLocaleString()}</div>attacks today<br>` +
    `${s.blockedPercent}% blocked &middot; ${s.activeNow} active now`;
  document.getElementById('updated').textContent = new Date(data.lastUpdated).toLocaleTimeString();
}
async function heat() {
  const data = await fetch('/attack-map/api/heatmap').then(r => r.json());
  L.heatLayer(data.heatData.map(p => [p.lat, p.lng, p.intensity]), { radius: 28, blur: 22 }).addTo(map);
}
refresh();
heat();
setInterval(refresh, 8000);
</script>
</body>
</html>"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_with_expected_shape() {
        let attacks = generate_attacks(25);
        assert_eq!(attacks.len(), 25);
        for attack in &attacks {
            assert!(attack["id"].as_str().unwrap().starts_with("attack-"));
            assert!(attack["source"]["country"].is_string());
            assert!(attack["target"]["city"].is_string());
            let packets = attack["packets"].as_i64().unwrap();
            assert!((100..10100).contains(&packets));
            assert!(severity_priority(attack["severity"].as_str().unwrap()) >= 1);
        }
    }

    #[test]
    fn attacks_sorted_newest_first() {
        let attacks = generate_attacks(40);
        for pair in attacks.windows(2) {
            assert!(pair[0]["timestamp"].as_str() >= pair[1]["timestamp"].as_str());
        }
    }

    #[test]
    fn stats_cover_all_severities() {
        let attacks = generate_attacks(100);
        let stats = calculate_stats(&attacks);
        let by_severity = &stats["bySeverity"];
        let total: u64 = ["CRITICAL", "HIGH", "MEDIUM", "LOW"]
            .iter()
            .map(|level| by_severity[*level].as_u64().unwrap())
            .sum();
        assert_eq!(total, 100);
        assert!(stats["topSources"].as_array().unwrap().len() <= 5);
    }

    #[test]
    fn query_param_lookup() {
        assert_eq!(param("count=120&x=1", "count"), Some("120"));
        assert_eq!(param("x=1", "count"), None);
    }

    #[test]
    fn requested_count_is_clamped_and_defaulted() {
        assert_eq!(requested_count(Some("count=9999")), MAX_COUNT);
        assert_eq!(requested_count(Some("count=120")), 120);
        assert_eq!(requested_count(Some("count=lots")), DEFAULT_COUNT);
        assert_eq!(requested_count(None), DEFAULT_COUNT);
    }

    #[test]
    fn weighted_pick_honors_roll() {
        let first = pick_weighted(&SOURCES, |c| c.weight, 0.0);
        assert_eq!(first.name, "Russia");
        let last = pick_weighted(&SOURCES, |c| c.weight, 1.0);
        assert_eq!(last.name, "Belarus");
    }
}
