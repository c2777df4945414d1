//! # ヘルスチェックハンドラ
//!
//! Login Service の稼働状態を確認するためのエンドポイント。
//!
//! ## エンドポイント
//!
//! - `GET /health` - Liveness（プロセスが応答できるか）
//! - `GET /health/ready` - Readiness（ユーザーストアに到達できるか）
//!
//! レスポンス型は [`carport_shared::health`] を参照。

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use carport_shared::{
    HealthResponse,
    health::{CheckStatus, ReadinessResponse, ReadinessStatus},
};

/// Readiness Check 用の共有状態
pub struct ReadinessState {
    pub client:      aws_sdk_dynamodb::Client,
    pub users_table: String,
}

/// Login Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Login Service の Readiness Check エンドポイント
///
/// ユーザーテーブルへの `DescribeTable` で DynamoDB への到達性を確認する。
/// 到達できない場合は 503 を返し、ロードバランサーからの振り分けを止める。
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let dynamodb_status = match state
        .client
        .describe_table()
        .table_name(&state.users_table)
        .send()
        .await
    {
        Ok(_) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!("Readiness Check: DynamoDB に到達できません: {}", e);
            CheckStatus::Error
        }
    };

    let mut checks = HashMap::new();
    checks.insert("dynamodb".to_string(), dynamodb_status);

    let all_ok = checks.values().all(|status| *status == CheckStatus::Ok);
    let (http_status, status) = if all_ok {
        (StatusCode::OK, ReadinessStatus::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ReadinessStatus::NotReady)
    };

    (http_status, Json(ReadinessResponse { status, checks }))
}
