//! # DynamoDB 接続管理
//!
//! Amazon DynamoDB への接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: DynamoDB Local を使用（`DYNAMODB_ENDPOINT` で指定）
//! - **本番環境**: IAM ロールによる認証で Amazon DynamoDB に接続
//! - **テーブル自動作成**: アプリケーション起動時にテーブルが存在しなければ作成（冪等）
//!
//! ## DynamoDB の用途
//!
//! Carport では DynamoDB を以下の目的で使用する:
//!
//! - **ユーザーストア**: メールアドレスをキーとするユーザーレコードの読み出し
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use carport_infra::dynamodb;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = dynamodb::create_client("us-east-1", Some("http://localhost:8000")).await;
//!     dynamodb::ensure_users_table(&client, "users").await?;
//!     Ok(())
//! }
//! ```

use aws_sdk_dynamodb::{
    Client,
    types::{
        AttributeDefinition,
        BillingMode,
        KeySchemaElement,
        KeyType,
        ScalarAttributeType,
    },
};

use crate::InfraError;

/// DynamoDB クライアントを作成する
///
/// `endpoint` が指定された場合は DynamoDB Local 向けのクライアントを作成し、
/// 認証情報にはダミー値を使用する（DynamoDB Local は認証情報を検証しない）。
/// 指定がない場合は既定の認証情報プロバイダ（IAM ロール等）を使用する。
///
/// # 引数
///
/// * `region` - AWS リージョン（例: `us-east-1`）
/// * `endpoint` - DynamoDB エンドポイント URL（例: `http://localhost:8000`）
pub async fn create_client(region: &str, endpoint: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(endpoint) = endpoint {
        loader = loader
            .endpoint_url(endpoint)
            // DynamoDB Local はクレデンシャルを検証しないが、SDK はプロバイダが必要
            .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                "local", "local", None, None, "local",
            ));
    }

    let config = loader.load().await;
    Client::new(&config)
}

/// ユーザーテーブルが存在しなければ作成する（冪等）
///
/// テーブルスキーマ:
/// - PK: `email` (String) — メールアドレス（ストア全体で一意）
///
/// レコードの書き込みはスコープ外の登録プロセスが行うため、
/// ここではスキーマの確認と作成のみを行う。
///
/// # 引数
///
/// * `client` - DynamoDB クライアント
/// * `table_name` - テーブル名
pub async fn ensure_users_table(client: &Client, table_name: &str) -> Result<(), InfraError> {
    // テーブルの存在確認
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!("テーブル '{}' は既に存在します", table_name);
            return Ok(());
        }
        Err(err) => {
            // ResourceNotFoundException の場合のみテーブル作成に進む
            let service_err = err.as_service_error();
            if !service_err
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false)
            {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の確認に失敗: {}",
                    table_name, err
                )));
            }
        }
    }

    // テーブル作成
    tracing::info!("テーブル '{}' を作成します", table_name);

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("email")
                .key_type(KeyType::Hash)
                .build()
                .map_err(|e| InfraError::dynamo_db(format!("KeySchema 構築エラー: {}", e)))?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("email")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| {
                    InfraError::dynamo_db(format!("AttributeDefinition 構築エラー: {}", e))
                })?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match create_result {
        Ok(_) => {
            tracing::info!("テーブル '{}' を作成しました", table_name);
            Ok(())
        }
        Err(err) => {
            // ResourceInUseException は並行呼び出し時に発生しうる（テーブルが作成中）
            // この場合は冪等として成功扱いにする
            let is_resource_in_use = err
                .as_service_error()
                .map(|e| e.is_resource_in_use_exception())
                .unwrap_or(false);
            if !is_resource_in_use {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の作成に失敗: {}",
                    table_name, err
                )));
            }
            tracing::debug!(
                "テーブル '{}' は既に作成中または存在します（ResourceInUseException）",
                table_name
            );
            Ok(())
        }
    }
}
