//! # 認証情報 BLOB
//!
//! ユーザーストアに保存される認証情報のバイナリ表現を定義する。
//!
//! ## バイナリレイアウト
//!
//! ```text
//! +----------------+------------------+----------------+------------------+
//! | ソルト長 (4B)  | 反復回数 (4B)    | ソルト         | 導出ハッシュ     |
//! | u32 BE         | u32 BE           | ソルト長バイト | 残り全バイト     |
//! +----------------+------------------+----------------+------------------+
//! ```
//!
//! 不変条件: `全体長 == 8 + ソルト長 + ハッシュ長`。
//! この形にデコードできない BLOB は破損として扱い、認証は必ず失敗する
//! （fail closed）。デコード処理が panic する経路は存在しない。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`CredentialBlob`] | 認証情報 BLOB | ストアに保存される不透明なバイト列 |
//! | [`StoredCredential`] | 認証情報 | デコード済みのソルト・反復回数・ハッシュ |

use crate::DomainError;

/// ヘッダ長（ソルト長 4 バイト + 反復回数 4 バイト）
const HEADER_LEN: usize = 8;

/// 認証情報 BLOB（ストアに保存される不透明なバイト列）
///
/// ユーザーレコードの `hash` 属性そのもの。中身の解釈は
/// [`StoredCredential::decode`] が行う。
///
/// # セキュリティ
///
/// Debug 出力では中身を出さず、バイト数のみを表示する。
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialBlob(Vec<u8>);

impl std::fmt::Debug for CredentialBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CredentialBlob({} bytes)", self.0.len())
    }
}

impl CredentialBlob {
    /// バイト列から認証情報 BLOB を作成する
    ///
    /// この時点ではレイアウトの検証は行わない。検証は
    /// [`StoredCredential::decode`] に集約する。
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// バイト列参照を取得する
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 所有権を持つバイト列に変換する
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// デコード済みの認証情報
///
/// [`CredentialBlob`] をレイアウトに従って分解した結果。
/// 鍵導出に必要なパラメータ（ソルト・反復回数）と照合対象のハッシュを
/// 保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    salt:       Vec<u8>,
    iterations: u32,
    hash:       Vec<u8>,
}

impl StoredCredential {
    /// 構成要素から認証情報を作成する
    ///
    /// # エラー
    ///
    /// - 反復回数が 0 の場合
    /// - ハッシュが空の場合
    pub fn new(
        salt: impl Into<Vec<u8>>,
        iterations: u32,
        hash: impl Into<Vec<u8>>,
    ) -> Result<Self, DomainError> {
        let salt = salt.into();
        let hash = hash.into();

        if iterations == 0 {
            return Err(DomainError::Credential(
                "反復回数は 1 以上である必要があります".to_string(),
            ));
        }
        if hash.is_empty() {
            return Err(DomainError::Credential(
                "ハッシュは 1 バイト以上である必要があります".to_string(),
            ));
        }

        Ok(Self {
            salt,
            iterations,
            hash,
        })
    }

    /// 認証情報 BLOB をデコードする
    ///
    /// レイアウトの不変条件を満たさない BLOB は
    /// [`DomainError::Credential`] を返す。
    pub fn decode(blob: &CredentialBlob) -> Result<Self, DomainError> {
        let bytes = blob.as_bytes();

        if bytes.len() < HEADER_LEN {
            return Err(DomainError::Credential(format!(
                "全体長 {} バイトはヘッダ長 {HEADER_LEN} バイトに満たない",
                bytes.len()
            )));
        }

        let salt_len = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        let iterations = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        let body = &bytes[HEADER_LEN..];
        if salt_len > body.len() {
            return Err(DomainError::Credential(format!(
                "ソルト長 {salt_len} がデータ部 {} バイトを超えている",
                body.len()
            )));
        }

        let (salt, hash) = body.split_at(salt_len);
        Self::new(salt, iterations, hash)
    }

    /// 認証情報 BLOB にエンコードする
    ///
    /// [`decode`](Self::decode) の逆変換。登録プロセスおよびテストで
    /// 使用する。
    pub fn encode(&self) -> CredentialBlob {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.salt.len() + self.hash.len());
        bytes.extend_from_slice(&u32::to_be_bytes(self.salt.len() as u32));
        bytes.extend_from_slice(&self.iterations.to_be_bytes());
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.hash);
        CredentialBlob::new(bytes)
    }

    /// ソルトを取得する
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// 反復回数を取得する
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// 導出ハッシュを取得する
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
}
