//! API route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;

use crate::handlers;
use crate::AppState;

/// Create API routes
pub fn api_routes() -> Router<Arc<RwLock<AppState>>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Tree state
        .route("/api/tree", get(handlers::get_tree))
        .route("/api/tree/nodes/:index", get(handlers::get_node))
        .route("/api/tree/path/:leaf_index", get(handlers::get_path))
        .route("/api/tree/leaves", post(handlers::insert_leaf))
        // Proofs
        .route("/api/prove/membership", post(handlers::prove_membership))
        .route("/api/verify/membership", post(handlers::verify_membership))
}
