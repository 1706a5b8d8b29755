//! Post-Quantum Revolution experience.
//!
//! # Responsibilities
//! - Hero, threats and solutions pages, served through the TTL cache with
//!   a public cache hint
//! - Shared multi-user simulator room over WebSocket, backed by the
//!   connection registry
//! - Chat endpoint with a read-through response cache and an optional
//!   upstream AI endpoint; without one, a canned PQC answer is returned
//! - Toy APIs: trial-division factoring, simulated PQC keygen, quiz scoring
//!
//! `/post-quantum` is an alias for the hero page kept for old campaign
//! links.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::FromRequestParts,
    http::{Method, Request},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::features::subpath;
use crate::http::response::{html, html_cached, json as json_ok, read_json};
use crate::http::server::AppState;
use crate::http::LabError;
use crate::realtime::{SimRegistry, SimUpdate};

#[derive(Debug, Deserialize)]
struct ChatQuery {
    query: String,
}

#[derive(Debug, Deserialize)]
struct QuizSubmission {
    #[allow(dead_code)]
    answers: Value,
    #[allow(dead_code)]
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FactorRequest {
    n: u64,
}

#[derive(Debug, Deserialize)]
struct KeygenRequest {
    algorithm: String,
}

pub async fn handle(state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    let path = req.uri().path().to_string();
    let rest = if path == "/post-quantum" {
        "/".to_string()
    } else {
        subpath(&path, "/quantum").to_string()
    };

    match (req.method(), rest.as_str()) {
        (&Method::GET, "/") => Ok(cached_page(state, "quantum_hero", HERO_HTML)),
        (&Method::GET, "/threats") => Ok(cached_page(state, "quantum_threats", THREATS_HTML)),
        (&Method::GET, "/solutions") => Ok(cached_page(state, "quantum_solutions", SOLUTIONS_HTML)),
        (&Method::GET, "/sims") => sims_route(state, req).await,
        (&Method::POST, "/chat") => {
            let query: ChatQuery = read_json(req).await?;
            chat(state, &query.query).await
        }
        (&Method::GET, "/quiz") => Ok(html(QUIZ_HTML)),
        (&Method::POST, "/quiz") => {
            let _submission: QuizSubmission = read_json(req).await?;
            let score = rand::thread_rng().gen_range(60..=100u32);
            Ok(json_ok(&json!({ "score": score, "message": score_message(score) })))
        }
        (&Method::POST, "/api/factor") => {
            let request: FactorRequest = read_json(req).await?;
            if request.n < 2 {
                return Err(LabError::BadRequest("Invalid request".into()));
            }
            let ops = (request.n as f64).log2() * 100.0;
            Ok(json_ok(&json!({ "factors": factorize(request.n), "ops": ops })))
        }
        (&Method::POST, "/api/keygen") => {
            let request: KeygenRequest = read_json(req).await?;
            Ok(json_ok(&keygen(&request.algorithm)))
        }
        (&Method::GET, "/api/state") => {
            if !state.config.realtime.enabled {
                return Ok(json_ok(&json!({
                    "state": "offline",
                    "message": "Realtime simulations not configured",
                })));
            }
            Ok(json_ok(&state.sims.snapshot().await))
        }
        (
            _,
            "/" | "/threats" | "/solutions" | "/sims" | "/chat" | "/quiz" | "/api/factor"
            | "/api/keygen" | "/api/state",
        ) => Err(LabError::MethodNotAllowed),
        _ => Err(LabError::NotFound("Not Found".into())),
    }
}

/// Serve a page through the TTL cache. The pages are static, but routing
/// them through the cache keeps the read-through path exercised and the
/// cache headers uniform.
fn cached_page(state: &AppState, key: &str, body: &'static str) -> Response {
    if let Some(cached) = state.cache.get(key) {
        return html_cached(cached);
    }
    state.cache.put(key, body.to_string());
    html_cached(body)
}

async fn sims_route(state: &AppState, req: Request<Body>) -> Result<Response, LabError> {
    if !state.config.realtime.enabled {
        return Ok(html(SIMS_DISABLED_HTML));
    }
    let (mut parts, _body) = req.into_parts();
    match WebSocketUpgrade::from_request_parts(&mut parts, &()).await {
        Ok(upgrade) => {
            let sims = state.sims.clone();
            Ok(upgrade.on_upgrade(move |socket| sim_session(socket, sims)))
        }
        // Plain GET without an Upgrade header lands on the notice page.
        Err(_) => Ok(html(SIMS_DISABLED_HTML)),
    }
}

async fn sim_session(socket: WebSocket, sims: Arc<SimRegistry>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let id = sims.join(tx);

    let forward = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_tx.send(frame).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(frame)) = ws_rx.next().await {
        match frame {
            Message::Text(text) => {
                // Malformed frames are dropped, not fatal to the session.
                if let Ok(raw) = serde_json::from_str::<Value>(text.as_str()) {
                    if let Ok(update) = serde_json::from_value::<SimUpdate>(raw.clone()) {
                        sims.apply_update(id, update, raw).await;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    sims.leave(id);
    forward.abort();
}

async fn chat(state: &AppState, query: &str) -> Result<Response, LabError> {
    let key_stem: String = query.chars().take(50).collect();
    let cache_key = format!("quantum_response_{key_stem}");
    if let Some(cached) = state.cache.get(&cache_key) {
        return Ok(json_ok(&json!({ "response": cached })));
    }

    let Some(endpoint) = state.config.bindings.ai_endpoint.as_deref() else {
        return Ok(json_ok(&json!({ "response": CHAT_FALLBACK })));
    };

    let prompt = format!(
        "You are a quantum cryptography expert. Answer the user's question \
         concisely (be technical but clear, max 200 words).\n\nUSER QUESTION: {query}"
    );
    let upstream = state
        .http
        .post(endpoint)
        .json(&json!({ "prompt": prompt, "max_tokens": 200 }))
        .send()
        .await;

    let answer = match upstream {
        Ok(resp) => match resp.json::<Value>().await {
            Ok(body) => body["response"].as_str().unwrap_or_default().to_string(),
            Err(error) => {
                tracing::warn!(%error, "ai endpoint returned malformed body");
                String::new()
            }
        },
        Err(error) => {
            tracing::warn!(%error, "ai endpoint unreachable");
            return Ok(json_ok(&json!({
                "response": "Unable to generate response. Try again later.",
            })));
        }
    };

    state.cache.put(&cache_key, answer.clone());
    Ok(json_ok(&json!({ "response": answer })))
}

fn factorize(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    let mut divisor = 2u64;
    while divisor * divisor <= n {
        while n % divisor == 0 {
            factors.push(divisor);
            n /= divisor;
        }
        divisor += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

fn keygen(algorithm: &str) -> Value {
    let mut rng = rand::thread_rng();
    let raw: Vec<String> = (0..32).map(|_| format!("{:02x}", rng.gen::<u8>())).collect();
    let public_key = format!("{}...", raw.concat());
    let size = match algorithm {
        "kyber" => 1184,
        "dilithium" => 1312,
        "sphincs" => 32,
        _ => 1000,
    };
    json!({
        "algorithm": algorithm,
        "publicKey": public_key,
        "privateKey": "[PROTECTED]",
        "size": size,
    })
}

fn score_message(score: u32) -> &'static str {
    if score >= 90 {
        "\u{1f31f} Quantum Cryptography Master!"
    } else if score >= 75 {
        "\u{1f680} Advanced quantum knowledge!"
    } else if score >= 60 {
        "\u{1f4da} Good understanding of PQC!"
    } else {
        "\u{1f527} Keep learning about quantum threats!"
    }
}

const CHAT_FALLBACK: &str = "AI service not configured. Post-quantum cryptography uses \
lattice-based, hash-based, and code-based algorithms to resist quantum computer attacks. \
NIST has standardized ML-KEM (Kyber), ML-DSA (Dilithium), and SLH-DSA (SPHINCS+).";

const HERO_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Post-Quantum Revolution</title>
<style>
*{margin:0;padding:0;box-sizing:border-box}
body{background:#0a0e27;color:#00ff88;font-family:monospace;overflow-x:hidden}
#quantum-hero{width:100vw;height:100vh;position:relative}
#canvas{display:block}
#overlay{position:absolute;top:0;left:0;width:100%;height:100%;padding:40px;background:rgba(10,14,39,.7);display:flex;flex-direction:column;justify-content:center;z-index:100}
.title{font-size:3em;font-weight:bold;color:#0ff;text-shadow:0 0 20px #0ff;margin-bottom:20px;animation:glow 2s infinite}
.subtitle{font-size:1.5em;color:#0f0;margin-bottom:30px}
.input-box{background:rgba(0,255,136,.1);border:2px solid #0f0;padding:15px;margin:20px 0;width:400px;color:#0f0;font-family:monospace;font-size:1em}
.btn{background:linear-gradient(135deg,#0f0,#0ff);color:#000;border:none;padding:12px 30px;margin:10px 0;cursor:pointer;font-weight:bold;border-radius:5px;transition:.3s}
.btn:hover{transform:scale(1.05);box-shadow:0 0 20px #0ff}
@keyframes glow{0%,100%{text-shadow:0 0 10px #0ff,0 0 20px #0f0}50%{text-shadow:0 0 20px #0ff,0 0 40px #0f0}}
</style>
</head>
<body>
<div id="quantum-hero">
  <canvas id="canvas"></canvas>
  <div id="overlay">
    <div class="title">&#9883;&#65039; POST-QUANTUM REVOLUTION</div>
    <div class="subtitle">The Era of Quantum-Safe Cryptography</div>
    <input type="text" class="input-box" id="user-query" placeholder="Ask about quantum threats...">
    <button class="btn" onclick="generateAIResponse()">Generate Response</button>
    <div id="ai-response" style="margin-top:20px;font-size:1.1em;color:#00ff88;min-height:40px;"></div>
    <div style="margin-top:20px;">
      <a href="/quantum/threats" style="color:#0ff">Threats</a> &middot;
      <a href="/quantum/solutions" style="color:#0ff">Solutions</a> &middot;
      <a href="/quantum/quiz" style="color:#0ff">Quiz</a>
    </div>
  </div>
</div>
<script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
<script>
const scene=new THREE.Scene();
const camera=new THREE.PerspectiveCamera(75,window.innerWidth/window.innerHeight,.1,1000);
const renderer=new THREE.WebGLRenderer({canvas:document.getElementById('canvas'),antialias:true});
renderer.setSize(window.innerWidth,window.innerHeight);renderer.setClearColor(0x0a0e27);
const particles=[];
for(let i=0;i<500;i++){
  const g=new THREE.IcosahedronGeometry(.5,0);
  const c=Math.random()>.5?0x00ff88:0x00ffff;
  const m=new THREE.MeshPhongMaterial({color:c,emissive:c,wireframe:Math.random()>.3});
  const p=new THREE.Mesh(g,m);
  p.position.set((Math.random()-.5)*100,(Math.random()-.5)*100,(Math.random()-.5)*100);
  p.vel={x:Math.random()-.5,y:Math.random()-.5,z:Math.random()-.5};
  scene.add(p);particles.push(p);
}
const light=new THREE.PointLight(0x00ffff,1);light.position.set(50,50,50);scene.add(light);
scene.add(new THREE.AmbientLight(0x003355,.5));camera.position.z=60;
(function animate(){
  requestAnimationFrame(animate);
  particles.forEach(p=>{
    p.position.add(new THREE.Vector3(p.vel.x,p.vel.y,p.vel.z));
    if(Math.abs(p.position.x)>60)p.vel.x*=-1;
    if(Math.abs(p.position.y)>60)p.vel.y*=-1;
    if(Math.abs(p.position.z)>60)p.vel.z*=-1;
    p.rotation.x+=.001;p.rotation.y+=.001;
  });
  renderer.render(scene,camera);
})();
window.addEventListener('resize',()=>{camera.aspect=window.innerWidth/window.innerHeight;camera.updateProjectionMatrix();renderer.setSize(window.innerWidth,window.innerHeight);});
async function generateAIResponse(){
  const query=document.getElementById('user-query').value;
  if(!query)return;
  document.getElementById('ai-response').textContent='Generating...';
  const r=await fetch('/quantum/chat',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({query})});
  const d=await r.json();
  document.getElementById('ai-response').textContent=d.response;
  particles.forEach(p=>{p.vel.x=(Math.random()-.5)*2;p.vel.y=(Math.random()-.5)*2;p.vel.z=(Math.random()-.5)*2;});
}
</script>
</body>
</html>"#;

const THREATS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Quantum Threats - Post-Quantum</title>
<style>
body{background:#0a0e27;color:#0f0;font-family:monospace;padding:40px;line-height:1.6}
h1{color:#0ff;text-shadow:0 0 10px #0ff;margin-bottom:20px}
.threat{background:rgba(0,255,136,.1);border-left:4px solid #f00;padding:20px;margin:20px 0}
.threat h3{color:#f00}
.shor{background:rgba(0,100,200,.1);border:2px solid #00ffff;padding:20px;margin:20px 0}
.stat{display:inline-block;background:#003355;padding:10px 20px;margin:5px;border-radius:3px;color:#0ff}
.btn{background:#0f0;color:#000;border:none;padding:10px 20px;cursor:pointer;font-weight:bold;border-radius:3px;margin:10px 0}
.btn:hover{background:#0ff;transform:scale(1.05)}
</style>
</head>
<body>
<h1>&#9888;&#65039; QUANTUM THREATS</h1>
<div class="threat">
<h3>Shor's Algorithm - RSA Factorization</h3>
<p>Quantum computers can factor large numbers exponentially faster than classical computers.</p>
<div class="stat">Current Security: 2048-bit RSA</div>
<div class="stat">Break Time (Quantum): Minutes</div>
<div class="stat">Classical: Billions of years</div>
</div>
<div class="threat">
<h3>Grover's Algorithm - Symmetric Key Search</h3>
<p>Halves the effective key length for symmetric encryption.</p>
<div class="stat">AES-256 &rarr; AES-128 equivalent</div>
</div>
<div class="shor">
<h3>Try: Factor a Number with Quantum</h3>
<input type="number" id="factor-input" placeholder="Enter number to factor" min="15" max="1000000">
<button class="btn" onclick="quantumFactor()">Factor with Quantum Sim</button>
<div id="factor-result" style="margin-top:20px;color:#0ff;"></div>
</div>
<button class="btn" onclick="chatWithAI()">Ask AI</button>
<div id="ai-chat" style="margin-top:30px;background:rgba(0,100,200,.1);padding:20px;min-height:100px;"></div>
<script>
async function quantumFactor(){
  const n=parseInt(document.getElementById('factor-input').value);
  if(!n||n<15){alert('Enter valid number');return;}
  document.getElementById('factor-result').textContent='Simulating quantum factorization...';
  const r=await fetch('/quantum/api/factor',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({n})});
  const d=await r.json();
  document.getElementById('factor-result').innerHTML='<strong>Factors of '+n+': '+d.factors.join(' &times; ')+'</strong><br>Quantum ops: '+d.ops;
}
async function chatWithAI(){
  document.getElementById('ai-chat').textContent='AI thinking...';
  const r=await fetch('/quantum/chat',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({query:'Explain the Shor algorithm threat'})});
  const d=await r.json();
  document.getElementById('ai-chat').textContent=d.response;
}
</script>
</body>
</html>"#;

const SOLUTIONS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>PQC Solutions - Post-Quantum</title>
<style>
body{background:#0a0e27;color:#0f0;font-family:monospace;padding:40px;line-height:1.6}
h1{color:#0ff;text-shadow:0 0 10px #0ff}
h2{color:#0f0;margin-top:30px}
.solution{background:rgba(0,255,136,.1);border:1px solid #0f0;padding:20px;margin:20px 0;border-radius:5px}
.nist{background:rgba(0,100,200,.1);border-left:4px solid #0ff;padding:15px;margin:10px 0}
.btn{background:linear-gradient(135deg,#0f0,#0ff);color:#000;border:none;padding:10px 20px;cursor:pointer;font-weight:bold;border-radius:3px;margin:10px 0}
.spec{font-size:.9em;color:#00ff88;margin-top:10px}
</style>
</head>
<body>
<h1>&#128737;&#65039; POST-QUANTUM CRYPTOGRAPHY SOLUTIONS</h1>
<div class="solution">
<h2>NIST-Standardized PQC Algorithms</h2>
<div class="nist">
<strong>ML-KEM (Kyber)</strong><br>
Key Encapsulation: Lattice-based, 256 bytes<br>
<span class="spec">NIST FIPS 203 - Nov 2024</span>
</div>
<div class="nist">
<strong>ML-DSA (Dilithium)</strong><br>
Digital Signature: Lattice-based, 2420 bytes<br>
<span class="spec">NIST FIPS 204 - Nov 2024</span>
</div>
<div class="nist">
<strong>SLH-DSA (SPHINCS+)</strong><br>
Stateless Hash-based Signature<br>
<span class="spec">NIST FIPS 205 - Nov 2024</span>
</div>
</div>
<h2>Interactive: Generate PQC Keys</h2>
<div class="solution">
<button class="btn" onclick="generateKeys('kyber')">Generate ML-KEM (Kyber) Keys</button>
<button class="btn" onclick="generateKeys('dilithium')">Generate ML-DSA (Dilithium) Keys</button>
<div id="key-result" style="margin-top:20px;word-break:break-all;font-size:.9em;color:#00ff88;"></div>
</div>
<button class="btn" onclick="chatWithAI()">Ask AI for Migration Path</button>
<div id="ai-recommendation" style="margin-top:30px;background:rgba(0,100,200,.1);padding:20px;min-height:80px;"></div>
<script>
async function generateKeys(algorithm){
  document.getElementById('key-result').textContent='Generating '+algorithm+' keys...';
  const r=await fetch('/quantum/api/keygen',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({algorithm})});
  const d=await r.json();
  document.getElementById('key-result').innerHTML='<strong>Public Key:</strong><br>'+d.publicKey.substring(0,50)+'...<br><strong>Private Key:</strong> [Protected]<br>Size: '+d.size+' bytes';
}
async function chatWithAI(){
  document.getElementById('ai-recommendation').textContent='AI analyzing...';
  const r=await fetch('/quantum/chat',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({query:'Which PQC algorithm should I migrate to?'})});
  const d=await r.json();
  document.getElementById('ai-recommendation').textContent=d.response;
}
</script>
</body>
</html>"#;

const QUIZ_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>Quantum Quiz</title>
<style>
body{background:#0a0e27;color:#0f0;font-family:monospace;padding:40px}
.quiz{max-width:600px;margin:0 auto}
.q{background:rgba(0,255,136,.1);border:1px solid #0f0;padding:20px;margin:20px 0;border-radius:5px}
.q h3{color:#0ff;margin-bottom:10px}
.opt{display:block;margin:10px 0;padding:10px;background:rgba(0,100,200,.1);border:1px solid #00ffff;cursor:pointer;border-radius:3px}
.opt:hover{background:rgba(0,100,200,.2)}
.opt input{margin-right:10px}
.btn{background:linear-gradient(135deg,#0f0,#0ff);color:#000;border:none;padding:12px 30px;cursor:pointer;font-weight:bold;border-radius:3px;margin:20px 0;width:100%}
.score{text-align:center;font-size:2em;color:#0ff;margin:30px 0}
</style>
</head>
<body>
<div class="quiz">
<h1>&#9883;&#65039; Quantum Cryptography Quiz</h1>
<div class="q"><h3>1. Shor's algorithm threatens which cryptosystem?</h3>
<label class="opt"><input type="radio" name="q1" value="RSA"> RSA</label>
<label class="opt"><input type="radio" name="q1" value="AES"> AES</label>
<label class="opt"><input type="radio" name="q1" value="SHA"> SHA-256</label></div>
<div class="q"><h3>2. Which algorithm is NIST-standardized for post-quantum?</h3>
<label class="opt"><input type="radio" name="q2" value="kyber"> ML-KEM (Kyber)</label>
<label class="opt"><input type="radio" name="q2" value="rsa"> RSA-4096</label>
<label class="opt"><input type="radio" name="q2" value="ecdsa"> ECDSA</label></div>
<div class="q"><h3>3. How many bits does ML-DSA public key have?</h3>
<label class="opt"><input type="radio" name="q3" value="1312"> 1312 bytes (~10496 bits)</label>
<label class="opt"><input type="radio" name="q3" value="256"> 256 bits</label>
<label class="opt"><input type="radio" name="q3" value="2048"> 2048 bits</label></div>
<button class="btn" onclick="submitQuiz()">Submit Quiz</button>
<div id="result"></div>
</div>
<script>
async function submitQuiz(){
  const pick=n=>document.querySelector('input[name="'+n+'"]:checked');
  const answers={q1:pick('q1')&&pick('q1').value,q2:pick('q2')&&pick('q2').value,q3:pick('q3')&&pick('q3').value};
  const r=await fetch('/quantum/quiz',{method:'POST',headers:{'Content-Type':'application/json'},body:JSON.stringify({answers,userId:Math.random().toString(36).substring(7)})});
  const d=await r.json();
  document.getElementById('result').innerHTML='<div class="score">'+d.message+'<br>Score: '+d.score+'%</div>';
}
</script>
</body>
</html>"#;

const SIMS_DISABLED_HTML: &str = r#"<html><body style="background:#0a0e27;color:#0f0;font-family:monospace;padding:40px;"><h1>&#9883;&#65039; Quantum Simulations</h1><p>Real-time multi-user simulations require the realtime broadcaster to be enabled and a WebSocket connection.</p><p>Connect with a WebSocket client to join the shared room.</p></body></html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorization_is_complete() {
        assert_eq!(factorize(15), vec![3, 5]);
        assert_eq!(factorize(8), vec![2, 2, 2]);
        assert_eq!(factorize(13), vec![13]);
        assert_eq!(factorize(360), vec![2, 2, 2, 3, 3, 5]);
    }

    #[test]
    fn keygen_sizes_per_algorithm() {
        assert_eq!(keygen("kyber")["size"], 1184);
        assert_eq!(keygen("dilithium")["size"], 1312);
        assert_eq!(keygen("sphincs")["size"], 32);
        assert_eq!(keygen("unknown")["size"], 1000);
        assert_eq!(keygen("kyber")["privateKey"], "[PROTECTED]");
    }

    #[test]
    fn quiz_messages_by_band() {
        assert!(score_message(95).contains("Master"));
        assert!(score_message(80).contains("Advanced"));
        assert!(score_message(60).contains("Good understanding"));
    }
}
