use crate::shared::config::{get_database_filename, Environment, EnvironmentConfig};
use crate::shared::errors::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// アプリケーションデータディレクトリ名
pub const APP_DIR_NAME: &str = "subscription-tracker";

/// アプリケーション初期化の結果を表す構造体
#[derive(Debug)]
pub struct InitializationResult {
    /// 初回起動かどうか
    pub is_first_run: bool,
    /// アプリケーションデータディレクトリのパス
    pub app_data_dir: PathBuf,
    /// データベースファイルのパス
    pub database_path: PathBuf,
    /// 実行環境
    pub environment: Environment,
}

/// アプリケーションの初期化を実行する
///
/// # 処理内容
/// 1. データベースファイルパスの決定（環境変数での上書きを優先）
/// 2. 親ディレクトリの作成
/// 3. 初回起動の判定
pub fn initialize_application(config: &EnvironmentConfig) -> AppResult<InitializationResult> {
    let environment = config.environment;

    let database_path = match &config.database_path {
        Some(path) => path.clone(),
        None => default_app_data_dir()?.join(get_database_filename(environment)),
    };

    let app_data_dir = database_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    ensure_directory(&app_data_dir)?;

    // データベースファイルの存在で初回起動を判定
    let is_first_run = !database_path.exists();

    if is_first_run {
        log_first_run_initialization(environment, &app_data_dir, &database_path);
    }

    Ok(InitializationResult {
        is_first_run,
        app_data_dir,
        database_path,
        environment,
    })
}

/// OS標準のデータディレクトリ配下のアプリケーションディレクトリを取得する
fn default_app_data_dir() -> AppResult<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::configuration("アプリデータディレクトリの取得に失敗しました"))
}

/// ディレクトリが存在しない場合は作成する
fn ensure_directory(dir: &Path) -> AppResult<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|e| {
        AppError::configuration(format!("アプリデータディレクトリの作成に失敗: {e}"))
    })?;
    log::info!("アプリケーションデータディレクトリを作成しました: {dir:?}");

    Ok(())
}

/// 初回起動時の初期化ログを出力する
fn log_first_run_initialization(
    environment: Environment,
    app_data_dir: &Path,
    database_path: &Path,
) {
    log::info!("=== アプリケーション初回起動 ===");
    log::info!("実行環境: {environment:?}");
    log::info!("アプリデータディレクトリ: {app_data_dir:?}");
    log::info!("データベースファイル: {database_path:?}");
}

/// 初期化完了ログを出力する
pub fn log_initialization_complete(result: &InitializationResult) {
    if result.is_first_run {
        log::info!("初回起動の初期化が正常に完了しました");
    } else {
        log::info!("アプリケーション起動完了（既存データベースを使用）");
    }
    log::info!("環境: {:?}", result.environment);
    log::info!("データベース: {:?}", result.database_path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(path: PathBuf) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: Environment::Development,
            debug_mode: true,
            log_level: "debug".to_string(),
            database_path: Some(path),
        }
    }

    #[test]
    fn test_initialize_with_path_override_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let result = initialize_application(&config_for(db_path.clone())).unwrap();

        assert!(result.is_first_run);
        assert_eq!(result.database_path, db_path);
        assert_eq!(result.app_data_dir, temp_dir.path().join("nested"));
        assert!(result.app_data_dir.exists());
        assert_eq!(result.environment, Environment::Development);
    }

    #[test]
    fn test_existing_database_is_not_first_run() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("existing.db");
        fs::write(&db_path, b"").unwrap();

        let result = initialize_application(&config_for(db_path)).unwrap();
        assert!(!result.is_first_run);
    }

    #[test]
    fn test_log_initialization_complete() {
        let result = InitializationResult {
            is_first_run: true,
            app_data_dir: PathBuf::from("/tmp/test"),
            database_path: PathBuf::from("/tmp/test/subscriptions.db"),
            environment: Environment::Production,
        };

        // パニックしないことを確認
        log_initialization_complete(&result);
    }
}
