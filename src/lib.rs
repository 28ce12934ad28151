pub mod features;
pub mod shared;

use features::auth::Session;
use features::subscriptions::{SqliteSubscriptionStore, SubscriptionService};
use log::{error, info};
use shared::config::{
    initialize_application, initialize_logging_system, load_environment_variables,
    log_initialization_complete, EnvironmentConfig, InitializationResult,
};
use shared::database::open_database;
use shared::errors::AppResult;

/// 初期化済みのアプリケーション（データベース接続を保持）
pub struct AppContext {
    pub config: EnvironmentConfig,
    pub initialization: InitializationResult,
    pub store: SqliteSubscriptionStore,
}

impl AppContext {
    /// ログイン済みユーザー向けのサービスに変換する
    pub fn into_service(self, session: Session) -> SubscriptionService<SqliteSubscriptionStore> {
        SubscriptionService::new(self.store, session)
    }
}

/// 環境変数・ログ・データベースを初期化する
pub fn initialize_app() -> AppResult<AppContext> {
    load_environment_variables();
    initialize_logging_system();

    let config = EnvironmentConfig::from_env();
    initialize_app_with(config)
}

/// 指定された設定でデータベースを初期化する
pub fn initialize_app_with(config: EnvironmentConfig) -> AppResult<AppContext> {
    info!("アプリケーション初期化を開始します...");

    let initialization = initialize_application(&config)?;

    info!("データベースを初期化しています...");
    let conn = open_database(&initialization.database_path).map_err(|e| {
        error!("データベースの初期化に失敗しました: {e}");
        e
    })?;

    log_initialization_complete(&initialization);

    Ok(AppContext {
        config,
        initialization,
        store: SqliteSubscriptionStore::new(conn),
    })
}
