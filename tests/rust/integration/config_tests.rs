//! Configuration loading from the environment and from YAML files

#[cfg(test)]
mod config_tests {
    use std::env;
    use std::fs;

    use cyphercheck::config::{ConfigError, ValidatorConfig};
    use cyphercheck::query_validator::CypherValidator;
    use serial_test::serial;
    use tempfile::TempDir;

    const ENV_KEYS: [&str; 8] = [
        "CYPHERCHECK_GRAMMAR_VALIDATION",
        "CYPHERCHECK_SCHEMA_VALIDATION",
        "CYPHERCHECK_NEO4J_URL",
        "CYPHERCHECK_USERNAME",
        "CYPHERCHECK_PASSWORD",
        "CYPHERCHECK_DATABASE",
        "CYPHERCHECK_SCHEMA_PATH",
        "CYPHERCHECK_REQUEST_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = ValidatorConfig::from_env().unwrap();
        assert!(!config.grammar_validation);
        assert!(!config.schema_validation);
        assert_eq!(config.database, "neo4j");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        clear_env();
        env::set_var("CYPHERCHECK_GRAMMAR_VALIDATION", "true");
        env::set_var("CYPHERCHECK_NEO4J_URL", "http://localhost:7474");
        env::set_var("CYPHERCHECK_USERNAME", "neo4j");
        env::set_var("CYPHERCHECK_PASSWORD", "secret");
        env::set_var("CYPHERCHECK_REQUEST_TIMEOUT_SECS", "5");

        let config = ValidatorConfig::from_env().unwrap();
        clear_env();

        assert!(config.grammar_validation);
        assert_eq!(config.neo4j_url.as_deref(), Some("http://localhost:7474"));
        assert_eq!(config.request_timeout_secs, 5);
        assert!(config.check().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_values() {
        clear_env();
        env::set_var("CYPHERCHECK_SCHEMA_VALIDATION", "sometimes");
        let result = ValidatorConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));

        env::set_var("CYPHERCHECK_REQUEST_TIMEOUT_SECS", "900");
        let result = ValidatorConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_from_yaml_file_builds_validator() {
        let dir = TempDir::new().unwrap();
        let schema_path = dir.path().join("schema.json");
        fs::write(
            &schema_path,
            r#"[{"Label": "Person", "Type": "Node", "Attributes": ["name"]}]"#,
        )
        .unwrap();
        let config_path = dir.path().join("cyphercheck.yaml");
        fs::write(
            &config_path,
            format!(
                "schema_validation: true\nschema_path: {}\n",
                schema_path.display()
            ),
        )
        .unwrap();

        let config = ValidatorConfig::from_yaml_file(&config_path).unwrap();
        let validator = CypherValidator::from_config(&config).unwrap();
        assert!(validator
            .validate_schema("MATCH (p:Person) RETURN p.name")
            .unwrap()
            .is_valid());
    }

    #[test]
    fn test_enabled_feature_without_parameters() {
        let config = ValidatorConfig {
            grammar_validation: true,
            ..Default::default()
        };
        assert!(CypherValidator::from_config(&config).is_err());
    }
}
