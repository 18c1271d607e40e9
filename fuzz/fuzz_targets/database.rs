#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pgn_tree::{parse_database_with, OnMalformedGame, ParserConfig};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    config: ParserConfig,
    pgn: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let config = input
        .config
        .with_max_variation_depth(input.config.max_variation_depth % 257);

    let first = parse_database_with(input.pgn, &config);
    let second = parse_database_with(input.pgn, &config);
    assert_eq!(first, second);

    match (config.on_malformed_game, first) {
        (OnMalformedGame::Abort, Ok(db)) => assert!(db.error.is_none()),
        (OnMalformedGame::SkipRemainder, Err(err)) => panic!("skip remainder failed: {err}"),
        (_, Ok(db)) => {
            if let Some(err) = db.error {
                assert!(err.offset() <= input.pgn.len());
            }
        }
        (_, Err(err)) => assert!(err.offset() <= input.pgn.len()),
    }
});
