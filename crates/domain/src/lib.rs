//! # Carport ドメイン層
//!
//! 認証ドメインの中核となる値オブジェクトとエンティティを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 生成時にバリデーションを実行し、不正な値の存在を
//!   型レベルで排除する（例: [`user::Email`], [`password::PlainPassword`]）
//! - **エンティティ**: ユーザーストアから読み出した状態をそのまま表現する
//!   読み取り専用のモデル（[`user::UserRecord`]）
//! - **ドメインエラー**: バリデーション違反と認証情報の破損を表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! app → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DynamoDB、暗号プリミティブ）に一切依存しない。
//! 認証情報 BLOB のバイナリレイアウト（[`credential`]）は純粋なデータ変換
//! としてここに置き、鍵導出そのものはインフラ層に委ねる。
//!
//! ## モジュール構成
//!
//! - [`credential`] - 認証情報 BLOB のエンコード/デコード
//! - [`error`] - ドメイン層エラー定義
//! - [`password`] - パスワード関連の値オブジェクト
//! - [`user`] - メールアドレスとユーザーレコード

pub mod credential;
pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;

/// ログへの出力を抑制する際のプレースホルダ
///
/// 存在しないユーザーのメールアドレスなど、記録するとユーザー列挙の
/// 手掛かりになり得る値の代わりに使用する。
pub const REDACTED: &str = "[REDACTED]";
