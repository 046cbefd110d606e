//! HTTP API server for the membership tree and its proofs.
//!
//! The server owns the single writable tree. All tree reads and writes go
//! through one `RwLock`, so insertions are serialized while proof generation
//! and tree queries can run concurrently.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod handlers;
mod routes;
mod store;

use ark_std::rand::{rngs::StdRng, SeedableRng};
use membership_circuits::{MembershipTree, Poseidon};
use membership_prover::setup::{setup_membership, MembershipKeys};

/// Application state shared across handlers
pub struct AppState {
    pub keys: Arc<MembershipKeys>,
    pub tree: MembershipTree<Poseidon>,
    pub state_path: PathBuf,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = env_or("PORT", "3001").parse().expect("PORT must be a number");
    let keys_dir = PathBuf::from(env_or("KEYS_DIR", "keys"));
    let state_path = PathBuf::from(env_or("TREE_STATE", "tree.json"));

    // Load or generate circuit keys
    let keys = if keys_dir.exists() {
        info!("Loading circuit keys from {:?}", keys_dir);
        MembershipKeys::load_from_directory(&keys_dir).expect("Failed to load circuit keys")
    } else {
        info!("Running trusted setup (this may take a while)...");
        let mut rng = StdRng::from_entropy();
        let keys = setup_membership(&mut rng).expect("Failed to setup circuit");
        keys.save_to_directory(&keys_dir)
            .expect("Failed to save circuit keys");
        info!("Circuit keys saved to {:?}", keys_dir);
        keys
    };

    // Restore the tree from its snapshot, or start empty
    let tree = match store::load_tree(&state_path).expect("Failed to read tree state") {
        Some(tree) => {
            info!(
                leaves = tree.next_index(),
                "Restored tree state from {:?}", state_path
            );
            tree
        }
        None => {
            info!("No tree state at {:?}, starting empty", state_path);
            MembershipTree::new(Poseidon::new())
        }
    };

    let state = Arc::new(RwLock::new(AppState {
        keys: Arc::new(keys),
        tree,
        state_path,
    }));

    let app = Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
