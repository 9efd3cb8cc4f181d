//! Transfer and history API endpoints.

use api_types::transaction::{SendMoney, TransactionView};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use engine::{MoneyCents, TransferCmd};

use crate::{ServerError, server::ServerState};

fn transaction_view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        time: tx.time,
        from: tx.from,
        to: tx.to,
        amount: tx.amount.to_major(),
    }
}

pub async fn send(
    State(state): State<ServerState>,
    Path(wallet_id): Path<String>,
    payload: Result<Json<SendMoney>, JsonRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Json(payload) = payload?;
    let amount = MoneyCents::from_major(payload.amount)?;

    let tx = state
        .engine
        .transfer(TransferCmd::new(wallet_id, payload.to, amount))
        .await?;
    Ok(Json(transaction_view(tx)))
}

pub async fn history(
    State(state): State<ServerState>,
    Path(wallet_id): Path<String>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let txs = state.engine.history(&wallet_id).await?;
    Ok(Json(txs.into_iter().map(transaction_view).collect()))
}
