//! # 認証ユースケース
//!
//! Login Service のビジネスロジックを実装する。
//!
//! ## ユーザー列挙の防止
//!
//! ユーザー不存在・パスワード不一致・ストア障害・認証情報の破損は、
//! すべて同一の認証失敗（[`LoginError::Unauthorized`]）に収束する。
//! 失敗の内訳はサーバー側の構造化ログにのみ残す。
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミー認証情報で鍵導出を実行し、
//! 処理時間を均一化する。

use std::sync::Arc;

use carport_domain::{
    credential::CredentialBlob,
    password::PlainPassword,
    user::Email,
};
use carport_infra::{PasswordChecker, repository::UserRepository};
use carport_shared::{
    event_log::{error as error_field, event},
    log_business_event,
};

use crate::error::LoginError;

/// 認証ユースケースの実装
pub struct LoginUseCaseImpl {
    user_repository:  Arc<dyn UserRepository>,
    password_checker: Arc<dyn PasswordChecker>,
}

impl LoginUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_checker: Arc<dyn PasswordChecker>,
    ) -> Self {
        Self {
            user_repository,
            password_checker,
        }
    }

    /// メールアドレスとパスワードで認証する
    ///
    /// ## タイミング攻撃対策
    ///
    /// ユーザーレコードが見つからない場合もダミー認証情報で鍵導出を
    /// 実行し、処理時間を均一化する。
    pub async fn verify_credentials(
        &self,
        email: &Email,
        password: &PlainPassword,
    ) -> Result<(), LoginError> {
        // ユーザーレコードを取得
        let record = match self.user_repository.find_by_email(email).await {
            Ok(record) => record,
            Err(e) => {
                // ストア障害もクライアントには認証失敗として返す
                tracing::error!(
                    error.category = error_field::category::INFRASTRUCTURE,
                    error.kind = error_field::kind::USER_LOOKUP,
                    "ユーザー検索に失敗: {}",
                    e
                );
                self.dummy_verification(password);
                return Err(LoginError::Unauthorized);
            }
        };

        let Some(user) = record else {
            // タイミング攻撃対策: ユーザーが存在しない場合もダミー検証を実行
            self.dummy_verification(password);

            log_business_event!(
                event.category = event::category::AUTH,
                event.action = event::action::LOGIN_FAILURE,
                event.entity_type = event::entity_type::USER,
                event.entity_id = carport_domain::REDACTED,
                event.result = event::result::FAILURE,
                event.reason = "user_not_found",
                "ログイン失敗: ユーザー不存在"
            );
            return Err(LoginError::Unauthorized);
        };

        // パスワードを検証
        match self.password_checker.verify(password, user.credential()) {
            Ok(result) if result.is_match() => {
                log_business_event!(
                    event.category = event::category::AUTH,
                    event.action = event::action::LOGIN_SUCCESS,
                    event.entity_type = event::entity_type::USER,
                    event.entity_id = %user.email(),
                    event.result = event::result::SUCCESS,
                    "ログイン成功"
                );
                Ok(())
            }
            Ok(_) => {
                log_business_event!(
                    event.category = event::category::AUTH,
                    event.action = event::action::LOGIN_FAILURE,
                    event.entity_type = event::entity_type::USER,
                    event.entity_id = %user.email(),
                    event.result = event::result::FAILURE,
                    event.reason = "password_mismatch",
                    "ログイン失敗: パスワード不一致"
                );
                Err(LoginError::Unauthorized)
            }
            Err(e) => {
                // 認証情報の破損や暗号処理の失敗も認証失敗に収束させる
                tracing::error!(
                    error.category = error_field::category::INFRASTRUCTURE,
                    error.kind = error_field::kind::PASSWORD_VERIFICATION,
                    "パスワード検証に失敗: {}",
                    e
                );
                Err(LoginError::Unauthorized)
            }
        }
    }

    /// ダミー認証情報で鍵導出を実行する（タイミング攻撃対策）
    ///
    /// ユーザーが存在しない場合も実際のパスワード検証と同等の時間を消費する。
    /// 固定 sleep ではなく実際に PBKDF2 導出を実行することで、
    /// CPU 状況による自然な変動も含めて同じ時間特性になる。
    fn dummy_verification(&self, password: &PlainPassword) {
        // ダミー認証情報 BLOB（16 バイトのソルト、1000 回、32 バイトのハッシュ）
        let mut bytes = Vec::with_capacity(8 + 16 + 32);
        bytes.extend_from_slice(&16u32.to_be_bytes());
        bytes.extend_from_slice(&1000u32.to_be_bytes());
        bytes.extend_from_slice(&[0u8; 48]);
        let dummy = CredentialBlob::new(bytes);

        // 結果は無視（一致することはない）
        let _ = self.password_checker.verify(password, &dummy);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use carport_domain::{password::PasswordVerifyResult, user::UserRecord};
    use carport_infra::InfraError;

    use super::*;

    // テスト用スタブ

    struct StubUserRepository {
        record:     Option<UserRecord>,
        store_fail: bool,
    }

    impl StubUserRepository {
        fn with_record() -> Self {
            Self {
                record:     Some(UserRecord::from_store(
                    Email::new("user@example.com").unwrap(),
                    CredentialBlob::new(vec![0u8; 56]),
                    None,
                )),
                store_fail: false,
            }
        }

        fn empty() -> Self {
            Self {
                record:     None,
                store_fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                record:     None,
                store_fail: true,
            }
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn find_by_email(&self, _email: &Email) -> Result<Option<UserRecord>, InfraError> {
            if self.store_fail {
                Err(InfraError::dynamo_db("接続失敗"))
            } else {
                Ok(self.record.clone())
            }
        }
    }

    struct StubPasswordChecker {
        result:      bool,
        verify_fail: bool,
    }

    impl StubPasswordChecker {
        fn success() -> Self {
            Self {
                result:      true,
                verify_fail: false,
            }
        }

        fn failure() -> Self {
            Self {
                result:      false,
                verify_fail: false,
            }
        }

        fn error() -> Self {
            Self {
                result:      false,
                verify_fail: true,
            }
        }
    }

    impl PasswordChecker for StubPasswordChecker {
        fn verify(
            &self,
            _password: &PlainPassword,
            _credential: &CredentialBlob,
        ) -> Result<PasswordVerifyResult, InfraError> {
            if self.verify_fail {
                Err(InfraError::unexpected("認証情報の復号に失敗"))
            } else {
                Ok(PasswordVerifyResult::from(self.result))
            }
        }
    }

    fn create_sut(repo: StubUserRepository, checker: StubPasswordChecker) -> LoginUseCaseImpl {
        LoginUseCaseImpl::new(Arc::new(repo), Arc::new(checker))
    }

    fn test_input() -> (Email, PlainPassword) {
        (
            Email::new("user@example.com").unwrap(),
            PlainPassword::new("password123").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_verify_credentials_成功() {
        // Given
        let sut = create_sut(
            StubUserRepository::with_record(),
            StubPasswordChecker::success(),
        );
        let (email, password) = test_input();

        // When
        let result = sut.verify_credentials(&email, &password).await;

        // Then
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_credentials_パスワード不一致() {
        // Given
        let sut = create_sut(
            StubUserRepository::with_record(),
            StubPasswordChecker::failure(),
        );
        let (email, password) = test_input();

        // When
        let result = sut.verify_credentials(&email, &password).await;

        // Then
        assert!(matches!(result, Err(LoginError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_verify_credentials_ユーザー不存在() {
        // Given
        let sut = create_sut(StubUserRepository::empty(), StubPasswordChecker::success());
        let (email, password) = test_input();

        // When
        let result = sut.verify_credentials(&email, &password).await;

        // Then
        assert!(matches!(result, Err(LoginError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_verify_credentials_ストア障害も認証失敗として返す() {
        // Given
        let sut = create_sut(
            StubUserRepository::failing(),
            StubPasswordChecker::success(),
        );
        let (email, password) = test_input();

        // When
        let result = sut.verify_credentials(&email, &password).await;

        // Then
        assert!(matches!(result, Err(LoginError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_verify_credentials_検証エラーも認証失敗として返す() {
        // Given
        let sut = create_sut(StubUserRepository::with_record(), StubPasswordChecker::error());
        let (email, password) = test_input();

        // When
        let result = sut.verify_credentials(&email, &password).await;

        // Then
        assert!(matches!(result, Err(LoginError::Unauthorized)));
    }
}
