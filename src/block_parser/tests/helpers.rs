use crate::block_parser::{BlockParser, Lexed};
use crate::config::Config;
use crate::extensions::ExtensionRegistry;

pub fn lex_with(config: &Config, input: &str) -> Lexed {
    let extensions = ExtensionRegistry::new();
    BlockParser::new(config, &extensions)
        .parse(input)
        .expect("block parse should succeed")
}

pub fn lex(input: &str) -> Lexed {
    lex_with(&Config::default(), input)
}

pub fn token_kinds(lexed: &Lexed) -> Vec<String> {
    lexed.tokens.iter().map(|t| t.kind()).collect()
}

pub fn assert_token_kinds(input: &str, expected: &[&str]) {
    let lexed = lex(input);
    assert_eq!(
        token_kinds(&lexed),
        expected,
        "Token kinds did not match for input:\n{}",
        input
    );
}
