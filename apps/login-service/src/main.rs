//! # Login Service サーバー
//!
//! メールアドレスとパスワードによる認証を担当する API サーバー。
//!
//! ## 役割
//!
//! - **パスワード認証**: DynamoDB の `users` テーブルに保存された
//!   認証情報 BLOB とのパスワード照合
//! - **ユーザー列挙の防止**: 失敗原因を問わず同一レスポンスを返す
//! - **タイミング攻撃対策**: ユーザー不存在時もダミー鍵導出を実行
//!
//! トークン発行・ユーザー登録・ロックアウト等は本サービスの責務外。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `LOGIN_PORT` | **Yes** | ポート番号 |
//! | `USERS_TABLE` | No | ユーザーテーブル名（デフォルト: `users`） |
//! | `AWS_REGION` | No | AWS リージョン（デフォルト: `us-east-1`） |
//! | `DYNAMODB_ENDPOINT` | No | DynamoDB Local のエンドポイント |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（DynamoDB Local）
//! LOGIN_PORT=13001 DYNAMODB_ENDPOINT=http://localhost:8000 \
//!     cargo run -p carport-login-service
//!
//! # 本番環境
//! LOGIN_PORT=13001 LOG_FORMAT=json cargo run -p carport-login-service --release
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use carport_infra::{
    PasswordChecker,
    Pbkdf2PasswordChecker,
    dynamodb,
    repository::{DynamoDbUserRepository, UserRepository},
};
use carport_shared::observability::{TracingConfig, make_request_span};
use config::LoginConfig;
use handler::{LoginState, ReadinessState, health_check, login, readiness_check};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use usecase::LoginUseCaseImpl;

/// Login Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("login-service");
    carport_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "login-service").entered();

    // 設定読み込み
    let config = LoginConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Login Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // DynamoDB クライアントを作成し、ユーザーテーブルを確認
    let client =
        dynamodb::create_client(&config.aws_region, config.dynamodb_endpoint.as_deref()).await;
    dynamodb::ensure_users_table(&client, &config.users_table)
        .await
        .expect("ユーザーテーブルの確認に失敗しました");
    tracing::info!("ユーザーストアに接続しました: {}", config.users_table);

    // Readiness Check 用 State（client が move される前に clone）
    let readiness_state = Arc::new(ReadinessState {
        client:      client.clone(),
        users_table: config.users_table.clone(),
    });

    // 依存コンポーネントを初期化
    let user_repository: Arc<dyn UserRepository> =
        Arc::new(DynamoDbUserRepository::new(client, config.users_table));
    let password_checker: Arc<dyn PasswordChecker> = Arc::new(Pbkdf2PasswordChecker::new());
    let login_usecase = LoginUseCaseImpl::new(user_repository, password_checker);
    let login_state = Arc::new(LoginState {
        usecase: Arc::new(login_usecase),
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/login", get(login))
        .with_state(login_state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Login Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
