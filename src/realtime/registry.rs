//! Quantum-simulator connection registry.
//!
//! # Responsibilities
//! - Track live WebSocket peers and their outbound senders
//! - Hold the shared simulation state (qubits, entanglement links)
//! - Fan updates out to every peer except the sender
//!
//! # Design Decisions
//! - Registry is explicit shared state owned by the server, keyed by a
//!   per-connection UUID
//! - Peers that fail to accept a frame are dropped from the registry on
//!   the spot; the socket task notices when its receiver closes

use axum::extract::ws::Message;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::observability::metrics;

/// Shared simulator state, merged from whatever peers send.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimState {
    pub qubits: Vec<serde_json::Value>,
    pub entanglement: Vec<serde_json::Value>,
    pub timestamp: i64,
}

/// One peer's update payload. Absent fields leave that part of the shared
/// state untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct SimUpdate {
    pub qubits: Option<Vec<serde_json::Value>>,
    pub entanglement: Option<Vec<serde_json::Value>>,
}

/// Live connection registry for the simulator room.
pub struct SimRegistry {
    peers: DashMap<Uuid, mpsc::UnboundedSender<Message>>,
    state: RwLock<SimState>,
}

impl SimRegistry {
    pub fn new() -> Self {
        Self {
            peers: DashMap::new(),
            state: RwLock::new(SimState::default()),
        }
    }

    /// Register a peer's outbound channel. Returns its connection ID.
    pub fn join(&self, sender: mpsc::UnboundedSender<Message>) -> Uuid {
        let id = Uuid::new_v4();
        self.peers.insert(id, sender);
        metrics::record_ws_connections(self.peers.len());
        tracing::debug!(connection_id = %id, peers = self.peers.len(), "sim peer joined");
        id
    }

    pub fn leave(&self, id: Uuid) {
        self.peers.remove(&id);
        metrics::record_ws_connections(self.peers.len());
        tracing::debug!(connection_id = %id, peers = self.peers.len(), "sim peer left");
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Merge an update into the shared state and broadcast it to every
    /// other peer.
    pub async fn apply_update(&self, sender_id: Uuid, update: SimUpdate, raw: serde_json::Value) {
        let timestamp = chrono::Utc::now().timestamp_millis();
        {
            let mut state = self.state.write().await;
            if let Some(qubits) = update.qubits {
                state.qubits = qubits;
            }
            if let Some(entanglement) = update.entanglement {
                state.entanglement = entanglement;
            }
            state.timestamp = timestamp;
        }

        let frame = json!({
            "type": "update",
            "data": raw,
            "timestamp": timestamp,
        })
        .to_string();

        let mut dead = Vec::new();
        for peer in self.peers.iter() {
            if *peer.key() == sender_id {
                continue;
            }
            if peer.value().send(Message::Text(frame.clone().into())).is_err() {
                dead.push(*peer.key());
            }
        }
        for id in dead {
            self.leave(id);
        }
    }

    /// Current room snapshot for the state API.
    pub async fn snapshot(&self) -> serde_json::Value {
        let state = self.state.read().await;
        json!({
            "state": "online",
            "connections": self.peers.len(),
            "simulation": *state,
        })
    }
}

impl Default for SimRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn updates_skip_the_sender() {
        let registry = SimRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let a = registry.join(tx_a);
        let _b = registry.join(tx_b);

        let raw = json!({"qubits": [{"id": 0, "alpha": 1.0}]});
        let update: SimUpdate = serde_json::from_value(raw.clone()).unwrap();
        registry.apply_update(a, update, raw).await;

        assert!(rx_a.try_recv().is_err());
        let frame = match rx_b.try_recv().unwrap() {
            Message::Text(text) => text,
            other => panic!("unexpected frame {other:?}"),
        };
        let parsed: serde_json::Value = serde_json::from_str(frame.as_str()).unwrap();
        assert_eq!(parsed["type"], "update");
        assert_eq!(parsed["data"]["qubits"][0]["id"], 0);
    }

    #[tokio::test]
    async fn state_merges_per_field() {
        let registry = SimRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = registry.join(tx);

        let first = json!({"qubits": [{"id": 0}], "entanglement": [{"pair": [0, 1]}]});
        registry
            .apply_update(id, serde_json::from_value(first.clone()).unwrap(), first)
            .await;
        let second = json!({"qubits": [{"id": 0}, {"id": 1}]});
        registry
            .apply_update(id, serde_json::from_value(second.clone()).unwrap(), second)
            .await;

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot["state"], "online");
        assert_eq!(snapshot["simulation"]["qubits"].as_array().unwrap().len(), 2);
        assert_eq!(
            snapshot["simulation"]["entanglement"].as_array().unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn closed_peers_are_pruned() {
        let registry = SimRegistry::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        let a = registry.join(tx_a);
        let _b = registry.join(tx_b);
        drop(rx_b);

        let raw = json!({"qubits": []});
        registry
            .apply_update(a, serde_json::from_value(raw.clone()).unwrap(), raw)
            .await;
        assert_eq!(registry.peer_count(), 1);
    }
}
