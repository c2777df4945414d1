//! # UserRepository
//!
//! ユーザーレコードの検索を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: ユーザーストアは DynamoDB の `users` テーブル
//! - **完全一致検索**: PK = email の `GetItem` のみ（スキャンはしない）
//! - **読み取り専用**: 書き込みはスコープ外の登録プロセスが行う

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use carport_domain::{
    credential::CredentialBlob,
    user::{Email, UserRecord},
};
use chrono::{DateTime, Utc};

use crate::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// メールアドレスでユーザーレコードを検索する
    ///
    /// レコードが存在しない場合は `Ok(None)` を返す。
    /// 「存在しない」と「ストア障害」の区別は呼び出し元がログにのみ残し、
    /// レスポンスには反映しない。
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError>;
}

/// DynamoDB 実装の UserRepository
pub struct DynamoDbUserRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbUserRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl UserRepository for DynamoDbUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, InfraError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("email", AttributeValue::S(email.as_str().to_string()))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("ユーザーレコードの取得に失敗: {e}")))?;

        match output.item() {
            Some(item) => convert_item_to_user_record(item).map(Some),
            None => Ok(None),
        }
    }
}

/// DynamoDB アイテムを UserRecord に変換する
fn convert_item_to_user_record(
    item: &HashMap<String, AttributeValue>,
) -> Result<UserRecord, InfraError> {
    let email_str = get_s(item, "email")?;
    let credential_bytes = get_b(item, "hash")?;

    // created_at は登録プロセスのバージョンによっては存在しない
    let created_at = item
        .get("created_at")
        .and_then(|v| v.as_s().ok())
        .map(|s| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
        .transpose()
        .map_err(|e| InfraError::dynamo_db(format!("created_at のパースに失敗: {e}")))?;

    let email = Email::new(email_str)
        .map_err(|e| InfraError::dynamo_db(format!("email 属性が不正: {e}")))?;

    Ok(UserRecord::from_store(
        email,
        CredentialBlob::new(credential_bytes),
        created_at,
    ))
}

/// DynamoDB アイテムから文字列属性を取得する
fn get_s(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, InfraError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| InfraError::dynamo_db(format!("属性 '{key}' が見つかりません")))
}

/// DynamoDB アイテムからバイナリ属性を取得する
fn get_b(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Vec<u8>, InfraError> {
    item.get(key)
        .and_then(|v| v.as_b().ok())
        .map(|b| b.clone().into_inner())
        .ok_or_else(|| InfraError::dynamo_db(format!("バイナリ属性 '{key}' が見つかりません")))
}
