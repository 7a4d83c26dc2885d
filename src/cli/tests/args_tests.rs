use clap::Parser;

use super::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["lighttag"]).expect("default args should parse");

    assert!(args.types.is_empty());
    assert_eq!(args.format, OutputFormat::Text);
    assert!(!args.no_cache);
    assert!(!args.short);
    assert!(!args.list);
    assert_eq!(args.pretty, None);
}

#[test]
fn parses_repeated_types_and_flags() {
    let args = CliArgs::try_parse_from([
        "lighttag",
        "--type",
        "List[Int]",
        "-t",
        "Predef.Str",
        "--format",
        "JSON",
        "--no-cache",
        "--short",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.types, vec!["List[Int]", "Predef.Str"]);
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.no_cache);
    assert!(args.short);
}

#[test]
fn parses_pretty_as_explicit_bool() {
    let args = CliArgs::try_parse_from(["lighttag", "--pretty", "false"])
        .expect("pretty should parse");
    assert_eq!(args.pretty, Some(false));
}

#[test]
fn rejects_unknown_format() {
    let result = CliArgs::try_parse_from(["lighttag", "--format", "yaml"]);
    assert!(result.is_err());
}
