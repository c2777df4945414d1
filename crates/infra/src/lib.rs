//! # Carport インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **DynamoDB 接続**: ユーザーストアへのクライアント管理とテーブル確認
//! - **リポジトリ実装**: ユーザーレコードの検索（[`repository`]）
//! - **パスワード検証**: PBKDF2 による鍵導出と定数時間比較（[`password`]）
//!
//! ## 依存関係
//!
//! ```text
//! app → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB 接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワード検証
//! - [`repository`] - リポジトリ実装

pub mod dynamodb;
pub mod error;
pub mod password;
pub mod repository;

pub use error::InfraError;
pub use password::{PasswordChecker, Pbkdf2PasswordChecker};
