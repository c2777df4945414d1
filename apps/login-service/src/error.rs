//! # Login Service エラー定義
//!
//! Login Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ユーザー列挙の防止
//!
//! 認証に関わる失敗（ユーザー不存在、パスワード不一致、ストア障害、
//! 認証情報の破損）はすべて [`LoginError::Unauthorized`] に収束し、
//! レスポンスは完全に同一になる。失敗の内訳はサーバー側のログにのみ残す。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use carport_domain::DomainError;
use carport_shared::ErrorResponse;
use thiserror::Error;

/// 認証失敗時にクライアントへ返す固定メッセージ
///
/// ユーザー不存在とパスワード不一致を区別できないよう、
/// すべての認証失敗で同一の文言を使用する。
pub const UNAUTHORIZED_DETAIL: &str = "invalid userid or password";

/// Login Service で発生するエラー
#[derive(Debug, Error)]
pub enum LoginError {
    /// リクエスト形式不正（必須パラメータの欠落）
    #[error("リクエスト形式が不正です: {0}")]
    BadRequest(String),

    /// バリデーションエラー（メール形式、パスワード長）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 認証失敗（原因を問わず同一レスポンス）
    #[error("認証に失敗しました")]
    Unauthorized,
}

impl From<DomainError> for LoginError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => LoginError::Validation(msg),
            // 認証情報の破損は fail closed（詳細を漏らさない）
            DomainError::Credential(_) => LoginError::Unauthorized,
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        let body = match &self {
            LoginError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            LoginError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
            LoginError::Unauthorized => ErrorResponse::unauthorized(UNAUTHORIZED_DETAIL),
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    async fn response_parts(err: LoginError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_bad_requestは400を返す() {
        let (status, json) = response_parts(LoginError::BadRequest("email が必要".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["type"],
            "https://carport.example.com/errors/bad-request"
        );
    }

    #[tokio::test]
    async fn test_validationは400を返す() {
        let (status, json) =
            response_parts(LoginError::Validation("パスワードが短い".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["type"],
            "https://carport.example.com/errors/validation-error"
        );
    }

    #[tokio::test]
    async fn test_unauthorizedは401と固定メッセージを返す() {
        let (status, json) = response_parts(LoginError::Unauthorized).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["detail"], UNAUTHORIZED_DETAIL);
    }

    #[tokio::test]
    async fn test_ドメインのバリデーションエラーはvalidationに変換される() {
        let err: LoginError = DomainError::Validation("形式不正".into()).into();

        assert!(matches!(err, LoginError::Validation(_)));
    }

    #[tokio::test]
    async fn test_ドメインの認証情報エラーはunauthorizedに変換される() {
        let err: LoginError = DomainError::Credential("壊れた BLOB".into()).into();

        assert!(matches!(err, LoginError::Unauthorized));
    }
}
