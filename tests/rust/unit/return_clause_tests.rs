//! RETURN list dedupe and variable inclusion

#[cfg(test)]
mod return_clause_tests {
    use cyphercheck::cypher_scan::{dedupe_return_variables, include_variables};

    #[test]
    fn test_dedupe_plain_list() {
        assert_eq!(
            dedupe_return_variables("RETURN a, b, a, b").as_deref(),
            Some("RETURN a, b")
        );
    }

    /// Dedupe applied twice changes nothing the second time
    #[test]
    fn test_dedupe_is_idempotent() {
        let queries = [
            "MATCH (p:Person) RETURN p.name, p.age, p.name",
            "MATCH (p) RETURN p,p , p",
            "MATCH (p) RETURN count(p), count(p), p",
            "RETURN 'a, a', 'a, a'",
        ];
        for query in queries {
            let once = dedupe_return_variables(query).unwrap();
            let twice = dedupe_return_variables(&once).unwrap();
            assert_eq!(once, twice, "dedupe of {:?} is not stable", query);
        }
    }

    #[test]
    fn test_dedupe_only_touches_final_return() {
        let query = "MATCH (n) WITH n, n RETURN n, n";
        assert_eq!(
            dedupe_return_variables(query).as_deref(),
            Some("MATCH (n) WITH n, n RETURN n")
        );
    }

    #[test]
    fn test_lowercase_return_keyword() {
        assert_eq!(
            dedupe_return_variables("match (n) return n, n").as_deref(),
            Some("match (n) return n")
        );
    }

    #[test]
    fn test_include_keeps_returned_items() {
        let query = "MATCH (a)-[r]->(b) RETURN a.name";
        let result = include_variables(query, vec![("a", None), ("r", None), ("b", None)]).unwrap();
        assert!(result.ends_with("a.name"));
        for name in ["a", "r", "b"] {
            assert!(
                result.contains(&format!("{}, ", name)),
                "{} missing from {}",
                name,
                result
            );
        }
    }

    #[test]
    fn test_include_without_return() {
        assert_eq!(include_variables("MATCH (n) DELETE n", vec![("n", None)]), None);
    }
}
