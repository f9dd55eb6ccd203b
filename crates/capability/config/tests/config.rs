use secadmin_config::{AppConfig, ConfigError};

// 环境变量为进程级共享状态，按顺序在同一个测试中覆盖各分支。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var/remove_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("SECADMIN_HTTP_ADDR", "127.0.0.1:8081");
        std::env::remove_var("SECADMIN_DATABASE_URL");
        std::env::remove_var("SECADMIN_DB_MAX_CONNECTIONS");
        std::env::remove_var("SECADMIN_WARN_DEVICE_NAME_CONFLICTS");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert!(config.database_url.is_none());
    assert!(!config.uses_database());
    assert_eq!(config.db_max_connections, 8);
    assert!(config.warn_device_name_conflicts);

    unsafe {
        std::env::set_var("SECADMIN_DATABASE_URL", "postgresql://localhost/secadmin");
        std::env::set_var("SECADMIN_DB_MAX_CONNECTIONS", "16");
        std::env::set_var("SECADMIN_WARN_DEVICE_NAME_CONFLICTS", "off");
    }
    let config = AppConfig::from_env().expect("config");
    assert!(config.uses_database());
    assert_eq!(config.db_max_connections, 16);
    assert!(!config.warn_device_name_conflicts);

    unsafe {
        std::env::set_var("SECADMIN_DB_MAX_CONNECTIONS", "many");
    }
    let err = AppConfig::from_env().expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "SECADMIN_DB_MAX_CONNECTIONS"));

    unsafe {
        std::env::set_var("SECADMIN_DB_MAX_CONNECTIONS", "0");
    }
    assert!(AppConfig::from_env().is_err());

    unsafe {
        std::env::remove_var("SECADMIN_DB_MAX_CONNECTIONS");
    }
}
