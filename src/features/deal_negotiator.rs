//! Deal Negotiator: sales ROI calculator and discount optimizer.
//!
//! Discounts stack from two sources: a seat-count tier and a contract-term
//! bonus. The calculator is pure; the handler only does wire plumbing.

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::features::subpath;
use crate::http::response::{html, json as json_ok, read_json};
use crate::http::server::AppState;
use crate::http::LabError;

struct DiscountTier {
    min_seats: u32,
    max_seats: u32,
    base_discount: u32,
}

const DISCOUNT_TIERS: [DiscountTier; 5] = [
    DiscountTier { min_seats: 1, max_seats: 50, base_discount: 0 },
    DiscountTier { min_seats: 51, max_seats: 250, base_discount: 10 },
    DiscountTier { min_seats: 251, max_seats: 1000, base_discount: 20 },
    DiscountTier { min_seats: 1001, max_seats: 5000, base_discount: 30 },
    DiscountTier { min_seats: 5001, max_seats: u32::MAX, base_discount: 40 },
];

struct ContractTerm {
    months: u32,
    discount: u32,
}

const CONTRACT_TERMS: [ContractTerm; 3] = [
    ContractTerm { months: 12, discount: 5 },
    ContractTerm { months: 24, discount: 15 },
    ContractTerm { months: 36, discount: 25 },
];

/// (name, per-seat monthly-equivalent price, blurb)
const PRICING_MODULES: [(&str, u32, &str); 5] = [
    ("Platform Essentials", 50, "Core security platform"),
    ("Advanced Threat Detection", 30, "AI-powered threat detection"),
    ("Compliance & Audit", 25, "Regulatory compliance suite"),
    ("SASE Integration", 40, "Secure access service edge"),
    ("Incident Response", 35, "24/7 incident response"),
];

#[derive(Debug, Deserialize)]
struct DealRequest {
    seats: u32,
    /// Indexes into the pricing module list. Out-of-range entries are
    /// ignored but still count toward moduleCount.
    modules: Vec<i64>,
    #[serde(rename = "contractMonths")]
    contract_months: u32,
}

#[derive(Debug, Serialize, PartialEq)]
struct DealQuote {
    #[serde(rename = "baseValue")]
    base_value: i64,
    #[serde(rename = "seatCount")]
    seat_count: u32,
    #[serde(rename = "moduleCount")]
    module_count: usize,
    #[serde(rename = "contractTerm")]
    contract_term: u32,
    #[serde(rename = "tierDiscount")]
    tier_discount: u32,
    #[serde(rename = "contractDiscount")]
    contract_discount: u32,
    #[serde(rename = "totalDiscount")]
    total_discount: u32,
    #[serde(rename = "discountedValue")]
    discounted_value: i64,
    #[serde(rename = "annualizedValue")]
    annualized_value: i64,
    #[serde(rename = "pricePerSeat")]
    price_per_seat: i64,
}

pub async fn handle(_state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    match (req.method(), subpath(&path, "/deal-negotiator")) {
        (&Method::GET, "/") => Ok(html(page())),
        (&Method::POST, "/api/calculate") => {
            let deal: DealRequest = read_json(req).await?;
            let quote = calculate(&deal)?;
            Ok(json_ok(&quote))
        }
        (&Method::GET, "/api/history") => Ok(json_ok(&deal_history())),
        (&Method::GET, "/api/benchmarks") => Ok(json_ok(&roi_benchmarks())),
        (_, "/" | "/api/calculate" | "/api/history" | "/api/benchmarks") => {
            Err(LabError::MethodNotAllowed)
        }
        _ => Err(LabError::NotFound("Not found".into())),
    }
}

fn calculate(deal: &DealRequest) -> Result<DealQuote, LabError> {
    if deal.seats == 0 || deal.contract_months == 0 {
        return Err(LabError::BadRequest("Invalid request".into()));
    }

    let tier = DISCOUNT_TIERS
        .iter()
        .find(|t| deal.seats >= t.min_seats && deal.seats <= t.max_seats)
        .unwrap_or(&DISCOUNT_TIERS[0]);
    let contract_discount = CONTRACT_TERMS
        .iter()
        .find(|t| t.months == deal.contract_months)
        .map(|t| t.discount)
        .unwrap_or(0);

    let base_value: f64 = deal
        .modules
        .iter()
        .filter_map(|&idx| usize::try_from(idx).ok())
        .filter_map(|idx| PRICING_MODULES.get(idx))
        .map(|&(_, price, _)| f64::from(price) * f64::from(deal.seats))
        .sum();

    let total_discount = tier.base_discount + contract_discount;
    let discounted = base_value * (1.0 - f64::from(total_discount) / 100.0);
    let annualized = discounted / f64::from(deal.contract_months) * 12.0;
    let price_per_seat = (discounted / f64::from(deal.seats)) / (f64::from(deal.contract_months) / 12.0);

    Ok(DealQuote {
        base_value: base_value.round() as i64,
        seat_count: deal.seats,
        module_count: deal.modules.len(),
        contract_term: deal.contract_months,
        tier_discount: tier.base_discount,
        contract_discount,
        total_discount,
        discounted_value: discounted.round() as i64,
        annualized_value: annualized.round() as i64,
        price_per_seat: price_per_seat.round() as i64,
    })
}

fn deal_history() -> Value {
    json!([
        { "companyName": "Tech Corp", "seats": 500, "modules": 3, "contractTerm": 24, "dealValue": 187500, "discount": 25, "closureDate": "Dec 1, 2025", "status": "CLOSED" },
        { "companyName": "Finance Inc", "seats": 250, "modules": 4, "contractTerm": 12, "dealValue": 112500, "discount": 15, "closureDate": "Dec 10, 2025", "status": "CLOSED" },
        { "companyName": "Healthcare Sys", "seats": 1200, "modules": 5, "contractTerm": 36, "dealValue": 720000, "discount": 35, "closureDate": "Dec 8, 2025", "status": "CLOSED" },
        { "companyName": "Retail Chains", "seats": 100, "modules": 2, "contractTerm": 12, "dealValue": 36000, "discount": 5, "closureDate": "Nov 28, 2025", "status": "CLOSED" }
    ])
}

fn roi_benchmarks() -> Value {
    json!({
        "securityBreach": 4300000,
        "complianceFine": 500000,
        "downtimePerHour": 50000,
        "fraudDetectionValue": 250000,
        "automationSavings": 150000
    })
}

fn page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Deal Negotiator - ROI Calculator</title>
<style>
  body { margin: 0; font-family: 'Segoe UI', sans-serif; background: linear-gradient(135deg, #0a0a2e 0%, #16213e 100%); color: #e0e0e0; }
  header { padding: 24px 32px; background: linear-gradient(90deg, #00d4ff 0%, #0099cc 100%); color: #06233a; }
  h1 { margin: 0; font-size: 26px; }
  .panel { margin: 24px 32px; background: #121a38; border: 1px solid #24305c; border-radius: 8px; padding: 20px; }
  label { display: block; margin: 12px 0 4px; color: #8fa3c9; }
  input, select { background: #0d1430; color: #e0e0e0; border: 1px solid #24305c; border-radius: 4px; padding: 8px; width: 260px; }
  button { margin-top: 16px; background: #00d4ff; color: #06233a; border: none; border-radius: 4px; padding: 10px 22px; font-weight: 700; cursor: pointer; }
  .result { margin-top: 16px; font-size: 15px; }
  .result strong { color: #00d4ff; }
  .row { display: grid; grid-template-columns: repeat(6, 1fr); padding: 8px 0; border-bottom: 1px solid #1d2952; font-size: 14px; }
</style>
</head>
<body>
<header><h1>Deal Negotiator</h1>Real-time deal value calculator with discount recommendations</header>
<div class="panel">
  <h2>Quote a Deal</h2>
  <label>Seats</label><input id="seats" type="number" value="500" min="1">
  <label>Modules (checkbox indexes 0-4)</label>
  <div id="modules"></div>
  <label>Contract Term</label>
  <select id="term"><option value="12">1 Year</option><option value="24" selected>2 Years</option><option value="36">3 Years</option></select>
  <br><button onclick="calc()">Calculate</button>
  <div class="result" id="result"></div>
</div>
<div class="panel"><h2>Deal History</h2><div id="history"></div></div>
<div class="panel"><h2>ROI Benchmarks</h2><div id="benchmarks"></div></div>
<script>
const MODULES = ["Platform Essentials ($50)", "Advanced Threat Detection ($30)", "Compliance & Audit ($25)", "SASE Integration ($40)", "Incident Response ($35)"];
document.getElementById('modules').innerHTML = MODULES.map((m, i) =>
  `<label><input type="checkbox" class="mod" value="${i}" ${i < 3 ? 'checked' : ''}> ${m}</label>`).join('');
async function calc() {
  const modules = [...document.querySelectorAll('.mod:checked')].map(c => Number(c.value));
  const body = { seats: Number(document.getElementById('seats').value), modules, contractMonths: Number(document.getElementById('term').value) };
  const q = await fetch('/deal-negotiator/api/calculate', { method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify(body) }).then(r => r.json());
  document.getElementById('result').innerHTML = q.error ? q.error :
    `Base: <strong>$${q.baseValue.toLocaleString()}</strong> &middot; Discount: <strong>${q.totalDiscount}%</strong>
     (tier ${q.tierDiscount}% + term ${q.contractDiscount}%)<br>
     Deal value: <strong>$${q.discountedValue.toLocaleString()}</strong> &middot;
     Annualized: <strong>$${q.annualizedValue.toLocaleString()}</strong> &middot;
     Per seat/yr: <strong>$${q.pricePerSeat}</strong>`;
}
async function load() {
  const [history, bench] = await Promise.all([
    fetch('/deal-negotiator/api/history').then(r => r.json()),
    fetch('/deal-negotiator/api/benchmarks').then(r => r.json())
  ]);
  document.getElementById('history').innerHTML = history.map(d =>
    `<div class="row"><div>${d.companyName}</div><div>${d.seats.toLocaleString()} seats</div><div>${d.modules} modules</div>
     <div>${d.contractTerm} mo</div><div>$${d.dealValue.toLocaleString()}</div><div>${d.discount}% off</div></div>`).join('');
  document.getElementById('benchmarks').innerHTML = Object.entries(bench).map(([k, v]) =>
    `<div class="row"><div>${k}</div><div>$${v.toLocaleString()}</div><div></div><div></div><div></div><div></div></div>`).join('');
}
load();
</script>
</body>
</html>"#
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(seats: u32, modules: Vec<i64>, months: u32) -> DealRequest {
        DealRequest {
            seats,
            modules,
            contract_months: months,
        }
    }

    #[test]
    fn mid_tier_two_year_quote() {
        let quote = calculate(&request(500, vec![0, 1, 2], 24)).unwrap();
        assert_eq!(quote.base_value, 52500);
        assert_eq!(quote.tier_discount, 20);
        assert_eq!(quote.contract_discount, 15);
        assert_eq!(quote.total_discount, 35);
        assert_eq!(quote.discounted_value, 34125);
        assert_eq!(quote.annualized_value, 17063);
        assert_eq!(quote.price_per_seat, 34);
    }

    #[test]
    fn smallest_tier_has_no_seat_discount() {
        let quote = calculate(&request(50, vec![0], 12)).unwrap();
        assert_eq!(quote.tier_discount, 0);
        assert_eq!(quote.contract_discount, 5);
        assert_eq!(quote.base_value, 2500);
    }

    #[test]
    fn top_tier_caps_at_forty() {
        let quote = calculate(&request(10000, vec![0], 36)).unwrap();
        assert_eq!(quote.tier_discount, 40);
        assert_eq!(quote.total_discount, 65);
    }

    #[test]
    fn unknown_term_gets_no_contract_discount() {
        let quote = calculate(&request(100, vec![0], 6)).unwrap();
        assert_eq!(quote.contract_discount, 0);
    }

    #[test]
    fn out_of_range_modules_are_ignored_but_counted() {
        let quote = calculate(&request(100, vec![0, 99, -1], 12)).unwrap();
        assert_eq!(quote.base_value, 5000);
        assert_eq!(quote.module_count, 3);
    }

    #[test]
    fn zero_seats_is_rejected() {
        assert!(matches!(
            calculate(&request(0, vec![0], 12)),
            Err(LabError::BadRequest(_))
        ));
    }
}
