use std::path::PathBuf;

/// データベースパスを上書きする環境変数名
pub const DATABASE_PATH_VAR: &str = "SUBSCRIPTION_DB_PATH";

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

impl Environment {
    /// 環境名の文字列表現
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: Environment,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
    /// データベースファイルパスの上書き（未設定ならアプリデータディレクトリを使用）
    pub database_path: Option<PathBuf>,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        let environment = get_environment();
        let debug_mode = environment == Environment::Development;
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });
        let database_path = std::env::var(DATABASE_PATH_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self {
            environment,
            debug_mode,
            log_level,
            database_path,
        }
    }

    /// プロダクション環境かどうかを判定
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// 開発環境かどうかを判定
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// 設定されたログレベルをフィルタに変換する
    ///
    /// 不明な値はInfoとして扱う
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. コンパイル時埋め込み環境変数を最優先
/// 2. 実行時環境変数 ENVIRONMENT を確認
/// 3. デバッグビルドの場合は Development
/// 4. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Some(embedded_env) = option_env!("EMBEDDED_ENVIRONMENT") {
        let env = Environment::from_name(embedded_env);
        log::debug!("環境判定: コンパイル時埋め込み値を使用 -> {embedded_env} -> {env:?}");
        return env;
    }

    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = Environment::from_name(&env_var);
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    // フォールバック: ビルド設定に基づく判定
    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # ファイル名の規則
/// - 開発環境: "dev_subscriptions.db"
/// - プロダクション環境: "subscriptions.db"
pub fn get_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_subscriptions.db",
        Environment::Production => "subscriptions.db",
    }
}

/// 環境に応じた.envファイルを読み込む
///
/// ファイルが見つからない場合は警告のみ出力し、直接設定された環境変数を使用する
pub fn load_environment_variables() {
    if let Some(env) = option_env!("EMBEDDED_ENVIRONMENT") {
        log::info!("コンパイル時埋め込み環境設定を使用: {env}");
        return;
    }

    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env",
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) if env_file != ".env" => match dotenv::dotenv() {
            Ok(_) => {
                log::warn!(
                    "{env_file}が見つからないため、デフォルトの.envファイルを読み込みました"
                );
            }
            Err(_) => {
                log::warn!(
                    "環境変数ファイルが見つかりません。直接設定された環境変数を使用します。"
                );
            }
        },
        Err(_) => {
            log::warn!(".envファイルが見つかりません。直接設定された環境変数を使用します。");
        }
    }
}

/// ログシステムを初期化する
///
/// 二回目以降の呼び出しは何もしない
pub fn initialize_logging_system() {
    let env_config = EnvironmentConfig::from_env();

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(env_config.level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .is_ok();

    if initialized {
        log::info!(
            "ログシステムを初期化しました: level={}, environment={}",
            env_config.log_level,
            env_config.environment.as_str()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> EnvironmentConfig {
        EnvironmentConfig {
            environment: Environment::Development,
            debug_mode: true,
            log_level: level.to_string(),
            database_path: None,
        }
    }

    #[test]
    fn test_get_database_filename() {
        assert_eq!(
            get_database_filename(Environment::Development),
            "dev_subscriptions.db"
        );
        assert_eq!(
            get_database_filename(Environment::Production),
            "subscriptions.db"
        );
    }

    #[test]
    fn test_environment_names() {
        assert_eq!(Environment::Development.as_str(), "development");
        assert_eq!(Environment::Production.as_str(), "production");
        assert_eq!(
            Environment::from_name("production"),
            Environment::Production
        );
        // 不明な値は開発環境として扱う
        assert_eq!(Environment::from_name("staging"), Environment::Development);
    }

    #[test]
    fn test_get_environment() {
        // 実際の値はビルド設定に依存する
        let env = get_environment();
        assert!(matches!(
            env,
            Environment::Development | Environment::Production
        ));
    }

    #[test]
    fn test_environment_config_from_env() {
        let config = EnvironmentConfig::from_env();
        assert!(!config.log_level.is_empty());
        assert_eq!(config.debug_mode, config.is_development());
    }

    #[test]
    fn test_environment_config_methods() {
        let dev_config = config_with_level("debug");
        let prod_config = EnvironmentConfig {
            environment: Environment::Production,
            debug_mode: false,
            log_level: "info".to_string(),
            database_path: None,
        };

        assert!(dev_config.is_development());
        assert!(!dev_config.is_production());
        assert!(!prod_config.is_development());
        assert!(prod_config.is_production());
    }

    #[test]
    fn test_level_filter() {
        let cases = [
            ("WARN", log::LevelFilter::Warn),
            ("trace", log::LevelFilter::Trace),
            ("off", log::LevelFilter::Off),
            // 不明な値はInfo
            ("verbose", log::LevelFilter::Info),
        ];
        for (level, expected) in cases {
            assert_eq!(config_with_level(level).level_filter(), expected);
        }
    }

    #[test]
    fn test_load_environment_variables() {
        // パニックしないことを確認
        load_environment_variables();
    }

    #[test]
    fn test_initialize_logging_system_twice() {
        // 二回目の初期化でもパニックしないことを確認
        initialize_logging_system();
        initialize_logging_system();
    }
}
