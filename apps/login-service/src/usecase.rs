//! # ユースケース層
//!
//! Login Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリとパスワードチェッカーを外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod login;

use async_trait::async_trait;
use carport_domain::{password::PlainPassword, user::Email};
pub use login::LoginUseCaseImpl;

use crate::error::LoginError;

/// 認証ユースケーストレイト
///
/// Login Service のビジネスロジックを定義する。
/// 具体的な実装は `LoginUseCaseImpl` で提供される。
#[async_trait]
pub trait LoginUseCase: Send + Sync {
    /// メールアドレスとパスワードで認証する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(())`: 認証成功
    /// - `Err(LoginError::Unauthorized)`: 認証失敗（原因を問わず同一）
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &PlainPassword,
    ) -> Result<(), LoginError>;
}

/// LoginUseCaseImpl に LoginUseCase トレイトを実装
#[async_trait]
impl LoginUseCase for LoginUseCaseImpl {
    async fn verify_credentials(
        &self,
        email: &Email,
        password: &PlainPassword,
    ) -> Result<(), LoginError> {
        self.verify_credentials(email, password).await
    }
}
