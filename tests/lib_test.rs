//! Library integration tests.

use yurt::YurtError;

#[test]
fn error_types_are_public() {
    let err = YurtError::ExampleNotFound {
        name: "with-router".into(),
    };
    assert!(err.to_string().contains("with-router"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> yurt::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use yurt::cli::{Cli, Commands};

    // Actually test parsing with parse_from
    let cli = Cli::parse_from(["yurt", "cache", "stats"]);
    assert!(matches!(cli.command, Commands::Cache(_)));
}

#[test]
fn classification_is_public() {
    use yurt::template::{classify, TemplateArg};

    assert!(matches!(
        classify("https://github.com/acme/widgets"),
        TemplateArg::GithubUrl(_)
    ));
}
