//! # ログインハンドラ
//!
//! メールアドレスとパスワードによる認証エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /login?email=...&password=...` - パスワード認証
//!
//! 元の API 互換のため、認証情報はクエリパラメータで受け取る。
//! 成功時はボディなしの 204 を返す。後続 API の呼び出しに使う
//! トークンの発行は本サービスの責務外。

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use carport_domain::{password::PlainPassword, user::Email};
use serde::Deserialize;

use crate::{error::LoginError, usecase::LoginUseCase};

/// ログインハンドラの共有状態
pub struct LoginState {
    pub usecase: Arc<dyn LoginUseCase>,
}

/// ログインリクエスト（クエリパラメータ）
///
/// 欠落を [`LoginError::BadRequest`] として扱うため、
/// 両フィールドとも Option で受け取る。
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub email:    Option<String>,
    pub password: Option<String>,
}

/// GET /login
///
/// パスワード認証を実行する。
///
/// ## エラー
///
/// - パラメータ欠落 → 400 Bad Request
/// - メール形式・パスワード長の違反 → 400 Validation Error
/// - 認証失敗（原因を問わず） → 401 Unauthorized
pub async fn login(
    State(state): State<Arc<LoginState>>,
    Query(query): Query<LoginQuery>,
) -> Result<impl IntoResponse, LoginError> {
    // 必須パラメータの存在確認
    let (Some(email), Some(password)) = (query.email, query.password) else {
        return Err(LoginError::BadRequest(
            "email と password はクエリパラメータで必須です".to_string(),
        ));
    };

    // 値オブジェクトの生成と同時にバリデーション
    let email = Email::new(email)?;
    let password = PlainPassword::new(password)?;

    state.usecase.verify_credentials(&email, &password).await?;

    Ok(StatusCode::NO_CONTENT)
}
