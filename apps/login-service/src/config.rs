//! # Login Service 設定
//!
//! 環境変数から Login Service サーバーの設定を読み込む。

use std::env;

/// Login Service サーバーの設定
#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// バインドアドレス
    pub host:              String,
    /// ポート番号
    pub port:              u16,
    /// ユーザーテーブル名
    pub users_table:       String,
    /// AWS リージョン
    pub aws_region:        String,
    /// DynamoDB エンドポイント（ローカル開発時のみ指定）
    pub dynamodb_endpoint: Option<String>,
}

impl LoginConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host:              env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:              env::var("LOGIN_PORT")
                .expect("LOGIN_PORT が設定されていません")
                .parse()
                .expect("LOGIN_PORT は有効なポート番号である必要があります"),
            users_table:       env::var("USERS_TABLE").unwrap_or_else(|_| "users".to_string()),
            aws_region:        env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
        })
    }
}
