//! # パスワード検証
//!
//! PBKDF2-HMAC-SHA256 によるパスワード検証を提供する。
//!
//! ## 検証手順
//!
//! 1. 認証情報 BLOB をデコードし、ソルト・反復回数・保存ハッシュを取り出す
//! 2. 入力パスワードから保存ハッシュと同じ長さの鍵を導出する
//! 3. 導出結果と保存ハッシュを定数時間で比較する
//!
//! 比較には `subtle` を使用し、最初の不一致バイトで打ち切らない。
//! タイミング差からハッシュ内容を推測されることを防ぐ。

use carport_domain::{
    credential::{CredentialBlob, StoredCredential},
    password::{PasswordVerifyResult, PlainPassword},
};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq as _;

use crate::InfraError;

/// パスワード検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// パスワードを認証情報 BLOB と照合する
    ///
    /// # Errors
    ///
    /// - BLOB が規定のレイアウトにデコードできない場合
    fn verify(
        &self,
        password: &PlainPassword,
        credential: &CredentialBlob,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// 入力パスワードから鍵を導出する
///
/// PBKDF2-HMAC-SHA256 で `hash_len` バイトの鍵を導出する。
/// 同じ入力に対して常に同じ結果を返す（決定的）。
pub fn derive_hash(
    password: &PlainPassword,
    salt: &[u8],
    iterations: u32,
    hash_len: usize,
) -> Vec<u8> {
    let mut out = vec![0u8; hash_len];
    pbkdf2_hmac::<Sha256>(password.as_str().as_bytes(), salt, iterations, &mut out);
    out
}

/// PBKDF2 によるパスワード検証の実装
///
/// 保存ハッシュの導出パラメータ（ソルト・反復回数・ハッシュ長）は
/// 認証情報 BLOB 側が持つため、このチェッカー自体は状態を持たない。
pub struct Pbkdf2PasswordChecker;

impl Pbkdf2PasswordChecker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Pbkdf2PasswordChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordChecker for Pbkdf2PasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        credential: &CredentialBlob,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let stored = StoredCredential::decode(credential)
            .map_err(|e| InfraError::unexpected(format!("認証情報の復号に失敗: {e}")))?;

        let derived = derive_hash(
            password,
            stored.salt(),
            stored.iterations(),
            stored.hash().len(),
        );

        // 定数時間比較（最初の不一致バイトで打ち切らない）
        let matched: bool = derived.ct_eq(stored.hash()).into();

        Ok(PasswordVerifyResult::from(matched))
    }
}
