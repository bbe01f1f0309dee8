//! Literal masking, offset mapping and edit application edge cases

#[cfg(test)]
mod scanning_edge_cases {
    use cyphercheck::cypher_scan::patterns::{is_reserved_type_name, property_keys};
    use cyphercheck::cypher_scan::{
        apply_edits, mask_string_literals, queries_equivalent_modulo_whitespace, MaskedQuery,
        TextEdit,
    };

    /// Pattern-like text inside literals must not survive masking
    #[test]
    fn test_literals_hide_patterns() {
        let masked =
            mask_string_literals("MATCH (n) WHERE n.bio = '(x:Robot)-[:OWNS]->(y)' RETURN n");
        assert!(!masked.contains("Robot"));
        assert!(!masked.contains("OWNS"));
        assert!(masked.starts_with("MATCH (n) WHERE n.bio = "));
        assert!(masked.ends_with(" RETURN n"));
    }

    #[test]
    fn test_offsets_after_literal_map_back() {
        let query = "RETURN 'some long literal', n.name";
        let masked = MaskedQuery::new(query);
        let masked_at = masked.as_str().find("n.name").unwrap();
        let original_at = masked.to_original(masked_at);
        assert_eq!(&query[original_at..], "n.name");
    }

    #[test]
    fn test_unterminated_literal_is_left_alone() {
        let query = "RETURN 'open";
        assert_eq!(mask_string_literals(query), query);
    }

    #[test]
    fn test_edits_in_any_order() {
        let query = "MATCH (:Person)-[:KNOWS]->(:Person)";
        let edits = vec![
            TextEdit::insert(27, "node3"),
            TextEdit::insert(7, "node0"),
            TextEdit::insert(17, "relation2"),
        ];
        assert_eq!(
            apply_edits(query, edits),
            "MATCH (node0:Person)-[relation2:KNOWS]->(node3:Person)"
        );
    }

    #[test]
    fn test_property_map_keys() {
        assert_eq!(
            property_keys("{name: 'Ann', age: 3}"),
            vec!["name".to_string(), "age".to_string()]
        );
        assert!(property_keys("{}").is_empty());
    }

    #[test]
    fn test_reserved_type_names() {
        assert!(is_reserved_type_name("Integer"));
        assert!(!is_reserved_type_name("Person"));
    }

    #[test]
    fn test_whitespace_equivalence() {
        assert!(queries_equivalent_modulo_whitespace(
            "MATCH (n)\n  RETURN n",
            "MATCH (n) RETURN n"
        ));
        assert!(!queries_equivalent_modulo_whitespace(
            "MATCH (n) RETURN n",
            "MATCH (m) RETURN m"
        ));
    }
}
