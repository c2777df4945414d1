//! # ドメイン層エラー定義
//!
//! 入力値のバリデーション違反と、保存された認証情報の構造的な破損を
//! 表現するエラー型。
//!
//! ## エラーの種類と扱い
//!
//! | エラー種別 | 扱い |
//! |-----------|------|
//! | `Validation` | API 層で 400 Validation Error に変換 |
//! | `Credential` | 認証失敗として扱う（詳細は呼び出し元に漏らさない） |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成や認証情報 BLOB のデコードで発生する例外状態を
/// 表現する。API 層でこのエラーを受け取り、適切な HTTP レスポンスに
/// 変換する。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 入力値が要求される形式を満たしていない場合に使用する。
    ///
    /// # 例
    ///
    /// - メールアドレスの形式不正
    /// - パスワードの文字数不足
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 認証情報の破損
    ///
    /// 保存された認証情報 BLOB が規定のレイアウトにデコードできない
    /// 場合に使用する。登録プロセスの不具合やデータ破損が原因であり、
    /// 呼び出し元では必ず認証失敗（fail closed）として扱う。
    #[error("認証情報が不正です: {0}")]
    Credential(String),
}
