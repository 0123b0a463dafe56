use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    pkg::{
        internal::tor::service::{DepartmentRow, department_view},
        server::state::{AppState, GetTxn},
    },
    prelude::Result,
};

pub async fn view(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<DepartmentRow>>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let rows = department_view(&mut *tx, &account_id).await?;
    Ok(Json(rows))
}
