//! Grammar validation through a stand-in transaction runner

#[cfg(test)]
mod grammar_tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use cyphercheck::query_validator::{
        CypherValidator, TransactionError, WriteTransactionRunner,
    };

    /// Accepts statements that start with one of its prefixes and records
    /// everything it was asked to run
    struct PrefixRunner {
        accepted_prefixes: Vec<&'static str>,
        seen: Mutex<Vec<String>>,
    }

    impl PrefixRunner {
        fn new(accepted_prefixes: Vec<&'static str>) -> Self {
            PrefixRunner {
                accepted_prefixes,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WriteTransactionRunner for PrefixRunner {
        async fn run_write(&self, query: &str) -> Result<(), TransactionError> {
            self.seen.lock().unwrap().push(query.to_string());
            if self
                .accepted_prefixes
                .iter()
                .any(|prefix| query.starts_with(prefix))
            {
                Ok(())
            } else {
                Err(TransactionError::Rejected {
                    code: "Neo.ClientError.Statement.SyntaxError".to_string(),
                    message: format!("Invalid input near {:?}", query),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_grammar_verdicts() {
        let runner = Arc::new(PrefixRunner::new(vec!["MATCH", "CREATE"]));
        let validator = CypherValidator::new().with_grammar_runner(runner.clone());

        assert!(validator
            .validate_grammar("MATCH (n) RETURN n")
            .await
            .unwrap());
        assert!(!validator.validate_grammar("MATHC (n) RETURN n").await.unwrap());
        assert_eq!(runner.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_grammar_and_schema_are_independent() {
        let runner = Arc::new(PrefixRunner::new(vec!["MATCH"]));
        let validator = CypherValidator::new().with_grammar_runner(runner);

        assert!(validator.validate_grammar("MATCH (n) RETURN n").await.unwrap());
        assert!(validator.validate_schema("MATCH (n) RETURN n").is_err());
    }

    #[tokio::test]
    async fn test_enable_grammar_validation_builds_http_runner() {
        let mut validator = CypherValidator::new();
        validator
            .enable_grammar_validation("http://localhost:7474", "neo4j", "secret")
            .unwrap();
    }
}
