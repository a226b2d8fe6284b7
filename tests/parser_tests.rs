use pathquill::{Parser, PathSegment, PathSpec};

#[test]
fn test_index_segment() {
    assert_eq!(Parser::parse("[3]").segments, vec![PathSegment::index(3)]);
}

#[test]
fn test_field_with_index_suffix() {
    assert_eq!(
        Parser::parse("name[2]").segments,
        vec![PathSegment::field("name"), PathSegment::index(2)]
    );
}

#[test]
fn test_method_with_placeholders() {
    assert_eq!(
        Parser::parse("substring({0},{1})").segments,
        vec![PathSegment::method("substring", vec![0, 1])]
    );
}

#[test]
fn test_mixed_path() {
    let path = Parser::parse("users[0].getName().split({0})[1][0]");
    assert_eq!(
        path.segments,
        vec![
            PathSegment::field("users"),
            PathSegment::index(0),
            PathSegment::method("getName", vec![]),
            PathSegment::method("split", vec![0]),
            PathSegment::index(1),
            PathSegment::index(0),
        ]
    );
}

#[test]
fn test_unbalanced_method_is_field() {
    assert_eq!(
        Parser::parse_segment("getName("),
        PathSegment::field("getName(")
    );
}

#[test]
fn test_from_str_matches_parse() {
    let spec: PathSpec = "a.b({0})[1]".parse().unwrap();
    assert_eq!(spec, Parser::parse("a.b({0})[1]"));
    assert_eq!(spec.to_string(), "a.b({0})[1]");
}

#[test]
fn test_string_parsed_paths_round_trip_through_display() {
    for text in ["a", "a.b[0][1]", "[2].get({0})", "x.f({0},{1})[3].y"] {
        let path = Parser::parse(text);
        assert_eq!(Parser::parse(&path.to_string()), path, "path {}", text);
    }
}

#[test]
fn test_pre_split_tokens_keep_dots() {
    let spec = Parser::parse_tokens(vec!["config.yaml", "size()"]);
    assert_eq!(
        spec.segments,
        vec![
            PathSegment::field("config.yaml"),
            PathSegment::method("size", vec![]),
        ]
    );
}
