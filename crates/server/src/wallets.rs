//! Wallets API endpoints.

use api_types::wallet::WalletView;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn wallet_view(wallet: engine::Wallet) -> WalletView {
    WalletView {
        id: wallet.id,
        balance: wallet.balance.to_major(),
    }
}

pub async fn wallet_new(
    State(state): State<ServerState>,
) -> Result<(StatusCode, Json<WalletView>), ServerError> {
    let wallet = state.engine.create_wallet().await?;
    Ok((StatusCode::CREATED, Json(wallet_view(wallet))))
}

pub async fn wallet_get(
    State(state): State<ServerState>,
    Path(wallet_id): Path<String>,
) -> Result<Json<WalletView>, ServerError> {
    let wallet = state.engine.wallet(&wallet_id).await?;
    Ok(Json(wallet_view(wallet)))
}
