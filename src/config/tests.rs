use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_savor_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SAVOR_DATA_PATH");
        env::remove_var("SAVOR_MODEL");
        env::remove_var("SAVOR_API_KEY");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("SAVOR_ENDPOINT");
        env::remove_var("SAVOR_REPLY_CEILING");
        env::remove_var("SAVOR_FETCH_REPLY_CEILING");
        env::remove_var("SAVOR_ANALYZE_REPLY_CEILING");
        env::remove_var("SAVOR_SCORE_REPLY_CEILING");
        env::remove_var("SAVOR_AGENT_BACKEND");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.data_path, PathBuf::from("restaurant-data.txt"));
    assert_eq!(config.model, "gpt-4o-mini");
    assert!(config.api_key.is_none());
    assert!(config.endpoint.is_none());
    assert_eq!(config.reply_ceilings, ReplyCeilings::uniform(3));
    assert_eq!(config.agent_backend, AgentBackend::Offline);
}

#[test]
fn test_debug_redacts_api_key() {
    let config = Config {
        api_key: Some("sk-very-secret".to_string()),
        ..Default::default()
    };

    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("sk-very-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_reply_ceilings_for_stage() {
    let ceilings = ReplyCeilings {
        fetch: 1,
        analyze: 2,
        score: 4,
    };

    assert_eq!(ceilings.for_stage(StageKind::Fetch), 1);
    assert_eq!(ceilings.for_stage(StageKind::Analyze), 2);
    assert_eq!(ceilings.for_stage(StageKind::Score), 4);
}

#[test]
fn test_agent_backend_from_str() {
    assert_eq!("genai".parse::<AgentBackend>().unwrap(), AgentBackend::Genai);
    assert_eq!("LLM".parse::<AgentBackend>().unwrap(), AgentBackend::Genai);
    assert_eq!(
        " offline ".parse::<AgentBackend>().unwrap(),
        AgentBackend::Offline
    );
    assert!(matches!(
        "carrier-pigeon".parse::<AgentBackend>(),
        Err(ConfigError::UnknownAgentBackend { .. })
    ));
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_savor_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.data_path, PathBuf::from("restaurant-data.txt"));
    assert_eq!(config.reply_ceilings, ReplyCeilings::uniform(3));
    assert_eq!(config.agent_backend, AgentBackend::Offline);
}

#[test]
#[serial]
fn test_from_env_custom_data_path_and_model() {
    clear_savor_env();

    with_env_vars(
        &[
            ("SAVOR_DATA_PATH", "/tmp/reviews.txt"),
            ("SAVOR_MODEL", "gpt-4o"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.data_path, PathBuf::from("/tmp/reviews.txt"));
            assert_eq!(config.model, "gpt-4o");
        },
    );
}

#[test]
#[serial]
fn test_from_env_api_key_selects_genai_backend() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_API_KEY", "sk-test")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.agent_backend, AgentBackend::Genai);
    });
}

#[test]
#[serial]
fn test_from_env_falls_back_to_openai_key() {
    clear_savor_env();

    with_env_vars(&[("OPENAI_API_KEY", "sk-openai")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.api_key.as_deref(), Some("sk-openai"));
    });
}

#[test]
#[serial]
fn test_from_env_explicit_backend_overrides_key_presence() {
    clear_savor_env();

    with_env_vars(
        &[("SAVOR_API_KEY", "sk-test"), ("SAVOR_AGENT_BACKEND", "offline")],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.agent_backend, AgentBackend::Offline);
        },
    );
}

#[test]
#[serial]
fn test_from_env_blank_api_key_is_ignored() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_API_KEY", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert!(config.api_key.is_none());
        assert_eq!(config.agent_backend, AgentBackend::Offline);
    });
}

#[test]
#[serial]
fn test_from_env_uniform_reply_ceiling() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_REPLY_CEILING", "5")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.reply_ceilings, ReplyCeilings::uniform(5));
    });
}

#[test]
#[serial]
fn test_from_env_per_stage_ceiling_overrides_base() {
    clear_savor_env();

    with_env_vars(
        &[
            ("SAVOR_REPLY_CEILING", "4"),
            ("SAVOR_ANALYZE_REPLY_CEILING", "2"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.reply_ceilings.fetch, 4);
            assert_eq!(config.reply_ceilings.analyze, 2);
            assert_eq!(config.reply_ceilings.score, 4);
        },
    );
}

#[test]
#[serial]
fn test_from_env_zero_ceiling_rejected() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_SCORE_REPLY_CEILING", "0")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidReplyCeiling {
                name: "SAVOR_SCORE_REPLY_CEILING",
                ..
            })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_non_numeric_ceiling_rejected() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_REPLY_CEILING", "three")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::ReplyCeilingParseError { .. })
        ));
    });
}

#[test]
#[serial]
fn test_from_env_unknown_backend_rejected() {
    clear_savor_env();

    with_env_vars(&[("SAVOR_AGENT_BACKEND", "telepathy")], || {
        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownAgentBackend { .. })
        ));
    });
}

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_genai_without_key_fails() {
    let config = Config {
        agent_backend: AgentBackend::Genai,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar { .. })
    ));
}

#[test]
fn test_validate_rejects_bad_endpoint() {
    let config = Config {
        endpoint: Some("ftp://example.com".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidEndpoint { .. })
    ));
}

#[test]
fn test_validate_rejects_empty_model() {
    let config = Config {
        model: "  ".to_string(),
        ..Default::default()
    };

    assert!(matches!(config.validate(), Err(ConfigError::EmptyModel)));
}

#[test]
fn test_validate_rejects_directory_as_data_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::offline(dir.path());

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
fn test_validate_allows_missing_data_file() {
    let config = Config::offline("/definitely/not/here/restaurant-data.txt");
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_ceiling_set_directly() {
    let config = Config {
        reply_ceilings: ReplyCeilings {
            fetch: 3,
            analyze: 0,
            score: 3,
        },
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidReplyCeiling { .. })
    ));
}
