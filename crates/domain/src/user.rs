//! # ユーザー
//!
//! ユーザーレコードとメールアドレスの値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Email`] | メールアドレス | ユーザーストアの一意キー |
//! | [`UserRecord`] | ユーザーレコード | 登録プロセスが作成し、本システムは読み取りのみ |
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: Email は生成時に形式を検証する
//! - **読み取り専用**: UserRecord に状態遷移メソッドは存在しない。
//!   作成・更新・削除はすべて本システムのスコープ外

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, credential::CredentialBlob};

/// メールアドレス（値オブジェクト）
///
/// ユーザーストアの一意キー。
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `@` を含み、ローカル部とドメイン部がともに空でない
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        // 基本的な構造検証: local@domain の形式であること
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーレコード
///
/// ユーザーストアに保存されたユーザーを表現する。
/// スコープ外の登録プロセスが作成したものを読み出すだけであり、
/// 本システムから変更されることはない。
///
/// # 不変条件
///
/// - `email` はストア全体で一意（パーティションキー）
/// - `credential` は認証情報 BLOB（解釈は検証時に行う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    email:      Email,
    credential: CredentialBlob,
    created_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// ストアから取得したデータでユーザーレコードを復元する
    ///
    /// `created_at` は登録プロセスのバージョンによっては存在しないため
    /// Option で受け取る。
    pub fn from_store(
        email: Email,
        credential: CredentialBlob,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            email,
            credential,
            created_at,
        }
    }

    // Getter メソッド

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn credential(&self) -> &CredentialBlob {
        &self.credential
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    // フィクスチャ

    #[fixture]
    fn record() -> UserRecord {
        UserRecord::from_store(
            Email::new("user@example.com").unwrap(),
            CredentialBlob::new(vec![0; 48]),
            Some(DateTime::from_timestamp(1_700_000_000, 0).unwrap()),
        )
    }

    // Email のテスト

    #[test]
    fn test_メールアドレスは正常な形式を受け入れる() {
        assert!(Email::new("user@example.com").is_ok());
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("no-at-sign", "@記号なし")]
    #[case("@", "@のみ")]
    #[case("@example.com", "ローカル部分が空")]
    #[case("user@", "ドメイン部分が空")]
    #[case(&format!("{}@example.com", "a".repeat(256)), "255文字超過")]
    fn test_メールアドレスは不正な形式を拒否する(
        #[case] input: &str,
        #[case] _reason: &str,
    ) {
        assert!(Email::new(input).is_err());
    }

    #[test]
    fn test_メールアドレスのdisplay出力は元の文字列() {
        let email = Email::new("user@example.com").unwrap();
        assert_eq!(email.to_string(), "user@example.com");
    }

    // UserRecord のテスト

    #[rstest]
    fn test_ストアから復元したレコードの各フィールドを取得できる(record: UserRecord) {
        assert_eq!(record.email().as_str(), "user@example.com");
        assert_eq!(record.credential().as_bytes().len(), 48);
        assert!(record.created_at().is_some());
    }

    #[rstest]
    fn test_created_atなしのレコードも復元できる() {
        let record = UserRecord::from_store(
            Email::new("legacy@example.com").unwrap(),
            CredentialBlob::new(vec![0; 48]),
            None,
        );

        assert_eq!(record.created_at(), None);
    }
}
