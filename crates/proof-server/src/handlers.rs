//! HTTP request handlers for tree state and proofs.

use std::sync::Arc;

use ark_bn254::Fr;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info};

use membership_circuits::{AuthenticationPath, LeafIndex, TreeError, CAPACITY};
use membership_prover::prove::{self, MembershipProof};
use membership_prover::verify;

use crate::store;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Parse hex string to Fr
pub(crate) fn parse_fr(hex: &str) -> Result<Fr, String> {
    let bytes = hex::decode(hex.trim_start_matches("0x"))
        .map_err(|e| format!("Invalid hex: {}", e))?;

    if bytes.len() != 32 {
        return Err("Field element must be 32 bytes".to_string());
    }

    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);

    Ok(Fr::from_le_bytes_mod_order(&arr))
}

/// Serialize Fr to hex string
pub(crate) fn serialize_fr(f: &Fr) -> String {
    let mut bytes = Vec::new();
    f.serialize_compressed(&mut bytes).unwrap();
    format!("0x{}", hex::encode(bytes))
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(error: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

// ============ Tree state ============

#[derive(Serialize)]
pub struct TreeResponse {
    pub nodes: Vec<String>,
    pub next_index: usize,
    pub capacity: usize,
    pub root: String,
}

pub async fn get_tree(State(state): State<Arc<RwLock<AppState>>>) -> Json<TreeResponse> {
    let state = state.read().await;

    Json(TreeResponse {
        nodes: state.tree.nodes().iter().map(serialize_fr).collect(),
        next_index: state.tree.next_index(),
        capacity: CAPACITY,
        root: serialize_fr(&state.tree.root()),
    })
}

#[derive(Serialize)]
pub struct NodeResponse {
    pub index: usize,
    pub hash: String,
}

pub async fn get_node(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(index): Path<usize>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.tree.node(index) {
        Ok(hash) => (
            StatusCode::OK,
            Json(NodeResponse {
                index,
                hash: serialize_fr(&hash),
            }),
        )
            .into_response(),
        Err(e) => bad_request(e.to_string()),
    }
}

#[derive(Serialize)]
pub struct PathResponse {
    pub leaf_index: usize,
    pub leaf: String,
    pub siblings: Vec<String>,
    pub directions: Vec<u8>,
    pub root: String,
}

pub async fn get_path(
    State(state): State<Arc<RwLock<AppState>>>,
    Path(leaf_index): Path<usize>,
) -> impl IntoResponse {
    let index = match LeafIndex::new(leaf_index) {
        Ok(index) => index,
        Err(e) => return bad_request(e.to_string()),
    };

    let state = state.read().await;
    let path = AuthenticationPath::for_leaf(&state.tree, index);

    (
        StatusCode::OK,
        Json(PathResponse {
            leaf_index,
            leaf: serialize_fr(&state.tree.leaf(index)),
            siblings: path.siblings().iter().map(serialize_fr).collect(),
            directions: path.directions().iter().map(|&b| u8::from(b)).collect(),
            root: serialize_fr(&state.tree.root()),
        }),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct InsertLeafRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct InsertLeafResponse {
    pub index: usize,
    pub root: String,
}

pub async fn insert_leaf(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<InsertLeafRequest>,
) -> impl IntoResponse {
    let value = match parse_fr(&req.value) {
        Ok(v) => v,
        Err(e) => return bad_request(e),
    };

    let mut state = state.write().await;

    // Stage the insert on a copy; the shared tree is only replaced once the
    // snapshot write has succeeded.
    let mut tree = state.tree.clone();
    let index = match tree.insert(value) {
        Ok(index) => index,
        Err(e @ TreeError::CapacityExceeded) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => return bad_request(e.to_string()),
    };

    if let Err(e) = store::save_tree(&state.state_path, &tree) {
        error!("Failed to persist tree state: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to persist tree state: {}", e),
            }),
        )
            .into_response();
    }

    state.tree = tree;
    info!(index = index.as_usize(), "Inserted leaf");

    (
        StatusCode::OK,
        Json(InsertLeafResponse {
            index: index.as_usize(),
            root: serialize_fr(&state.tree.root()),
        }),
    )
        .into_response()
}

// ============ Proofs ============

/// Common proof response
#[derive(Serialize)]
pub struct ProofResponse {
    pub proof: String,
    pub public_inputs: Vec<String>,
}

#[derive(Deserialize)]
pub struct ProveMembershipRequest {
    pub leaf_index: usize,
}

pub async fn prove_membership(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<ProveMembershipRequest>,
) -> impl IntoResponse {
    let index = match LeafIndex::new(req.leaf_index) {
        Ok(index) => index,
        Err(e) => return bad_request(e.to_string()),
    };

    let state = state.read().await;

    // Proof generation is CPU-bound but short at this depth; run it inline.
    match prove::prove_membership(&state.keys.proving_key, &state.tree, index) {
        Ok(membership_proof) => {
            let proof_bytes = membership_proof.serialize_proof().unwrap();
            info!(leaf_index = req.leaf_index, "Generated membership proof");

            let response = ProofResponse {
                proof: format!("0x{}", hex::encode(proof_bytes)),
                public_inputs: membership_proof
                    .public_inputs
                    .iter()
                    .map(serialize_fr)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Proof generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyMembershipRequest {
    pub proof: String,
    pub root: String,
}

#[derive(Serialize)]
pub struct VerifyMembershipResponse {
    pub valid: bool,
}

pub async fn verify_membership(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<VerifyMembershipRequest>,
) -> impl IntoResponse {
    let proof_bytes = match hex::decode(req.proof.trim_start_matches("0x")) {
        Ok(b) => b,
        Err(e) => return bad_request(format!("Invalid hex: {}", e)),
    };

    let proof = match MembershipProof::deserialize_proof(&proof_bytes) {
        Ok(p) => p,
        Err(e) => return bad_request(e.to_string()),
    };

    let root = match parse_fr(&req.root) {
        Ok(r) => r,
        Err(e) => return bad_request(e),
    };

    let state = state.read().await;

    match verify::verify_membership(&state.keys.verifying_key, &proof, root) {
        Ok(valid) => (StatusCode::OK, Json(VerifyMembershipResponse { valid })).into_response(),
        Err(e) => {
            error!("Proof verification failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
