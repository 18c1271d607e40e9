use pgn_tree::{
    parse_database, parse_database_with, san::San, CastlingSide, Comment, Disambiguation, Error,
    File, GameResult, Nag, Node, OnMalformedGame, ParserConfig, Rank, Reader, Role, SanMove,
    DEFAULT_MAX_VARIATION_DEPTH,
};
use proptest::prelude::*;

fn nested(depth: usize) -> String {
    let mut pgn = String::from("1. e4");
    for _ in 0..depth {
        pgn.push_str(" (1. d4");
    }
    for _ in 0..depth {
        pgn.push(')');
    }
    pgn.push_str(" *");
    pgn
}

#[test]
fn test_single_game_result_matches_terminator() -> Result<(), Error> {
    for (pgn, result) in [
        ("1. e4 e5 1-0", GameResult::WhiteWins),
        ("1. f3 e5 2. g4 Qh4# 0-1", GameResult::BlackWins),
        ("[Result \"1/2-1/2\"] 1/2-1/2", GameResult::Draw),
        ("1. d4 *", GameResult::Unknown),
    ] {
        let db = parse_database(pgn)?;
        assert_eq!(db.len(), 1, "{pgn}");
        assert_eq!(db.games[0].result, result, "{pgn}");
    }
    Ok(())
}

#[test]
fn test_classification() {
    let nbd7: SanMove = "Nbd7".parse().expect("valid san");
    let San::Piece {
        role,
        disambiguation,
        to,
        capture,
    } = nbd7.san
    else {
        panic!("expected piece move");
    };
    assert_eq!(role, Role::Knight);
    assert_eq!(disambiguation, Disambiguation::File(File::B));
    assert_eq!(to.chars(), ('d', '7'));
    assert!(!capture);

    let nxe4: SanMove = "Nxe4+".parse().expect("valid san");
    assert_eq!(
        nxe4.san,
        San::Piece {
            role: Role::Knight,
            disambiguation: Disambiguation::None,
            to: "e4".parse().expect("valid square"),
            capture: true,
        }
    );
    assert!(nxe4.is_check);
    assert!(nxe4.san.is_capture());

    let exd5: SanMove = "exd5".parse().expect("valid san");
    let San::Pawn {
        from_file, to, capture, ..
    } = exd5.san
    else {
        panic!("expected pawn move");
    };
    assert_eq!(from_file, Some(File::E));
    assert_eq!(to.file(), File::D);
    assert_eq!(to.rank(), Rank::Fifth);
    assert!(capture);

    assert_eq!(
        "O-O-O".parse::<SanMove>().map(|m| m.san),
        Ok(San::Castle(CastlingSide::QueenSide))
    );
}

#[test]
fn test_nesting() -> Result<(), Error> {
    let db = parse_database("1. e4 e5 (1... c5 2. Nf3) 2. Nf3 *")?;
    assert_eq!(db.len(), 1);
    let game = &db.games[0];
    assert_eq!(game.result, GameResult::Unknown);

    let nodes = &game.movetext.nodes;
    assert_eq!(nodes.len(), 4);
    assert!(matches!(nodes[0], Node::Element(_)));
    assert!(matches!(nodes[1], Node::Element(_)));
    assert!(matches!(nodes[3], Node::Element(_)));
    let Node::Variation(variation) = &nodes[2] else {
        panic!("expected variation after the second element");
    };
    assert_eq!(variation.len(), 2);
    assert_eq!(variation.elements().count(), 2);
    assert_eq!(game.ply_count(), 3);
    Ok(())
}

#[test]
fn test_comment_placement() -> Result<(), Error> {
    let db = parse_database("{pre} 1. e4 {post} *")?;
    let element = db.games[0].mainline().next().expect("element");
    assert_eq!(element.leading_comment, Some(Comment::from("pre")));
    assert_eq!(element.move_number, Some(1));
    assert_eq!(element.trailing_comment, Some(Comment::from("post")));
    Ok(())
}

#[test]
fn test_annotations() -> Result<(), Error> {
    let db = parse_database("1. e4 {best by test} $1 $18 {and more} e5?! *")?;
    let elements: Vec<_> = db.games[0].mainline().collect();
    assert_eq!(elements[0].nag_comment, Some(Comment::from("best by test")));
    assert_eq!(elements[0].nags, [Nag(1), Nag(18)]);
    assert_eq!(elements[0].trailing_comment, Some(Comment::from("and more")));
    assert_eq!(elements[1].nags, [Nag::DUBIOUS_MOVE]);
    Ok(())
}

#[test]
fn test_depth_guard() -> Result<(), Error> {
    let db = parse_database(&nested(DEFAULT_MAX_VARIATION_DEPTH))?;
    assert_eq!(db.games[0].movetext.variations().count(), 1);

    let pgn = nested(DEFAULT_MAX_VARIATION_DEPTH + 1);
    let err = parse_database(&pgn).expect_err("nested too deep");
    assert!(matches!(
        err,
        Error::RecursionLimitExceeded { depth, .. } if depth == DEFAULT_MAX_VARIATION_DEPTH + 1
    ));
    assert_eq!(&pgn[err.offset()..err.offset() + 1], "(");

    let config = ParserConfig::default()
        .with_max_variation_depth(3)
        .with_on_malformed_game(OnMalformedGame::SkipRemainder);
    let db = parse_database_with(&nested(4), &config)?;
    assert!(db.is_empty());
    assert!(matches!(
        db.error,
        Some(Error::RecursionLimitExceeded { depth: 4, .. })
    ));
    Ok(())
}

#[test]
fn test_san_error_offset() {
    assert_eq!(
        parse_database("[White \"Fischer\"] 1. Z9 *"),
        Err(Error::San {
            offset: 21,
            reason: "not a recognized move token",
        })
    );
}

#[test]
fn test_skip_remainder() -> Result<(), Error> {
    let pgn = "[Event \"One\"]\n\n1. e4 e5 1-0\n\n\
               [Event \"Two\"]\n\n1. e4 Z9 0-1\n\n\
               [Event \"Three\"]\n\n1. d4 d5 *\n";

    let config = ParserConfig::default().with_on_malformed_game(OnMalformedGame::SkipRemainder);
    let db = parse_database_with(pgn, &config)?;
    assert_eq!(db.len(), 1);
    assert_eq!(db.games[0].tags.get("Event"), Some("One"));
    let err = db.error.expect("error recorded");
    assert!(matches!(err, Error::San { .. }));
    assert_eq!(&pgn[err.offset()..err.offset() + 2], "Z9");

    assert_eq!(parse_database(pgn), Err(err));
    Ok(())
}

#[test]
fn test_reader_matches_database() -> Result<(), Error> {
    let pgn = "[Event \"A\"] 1. e4 1-0\n[Event \"B\"] 1. d4 (1. c4) 0-1\n[Event \"C\"] *\n";
    let db = parse_database(pgn)?;
    let games = Reader::new(pgn).games().collect::<Result<Vec<_>, _>>()?;
    assert_eq!(db.games, games);
    Ok(())
}

#[test]
fn test_empty_variation_is_error() {
    assert!(matches!(
        parse_database("1. e4 () *"),
        Err(Error::Movetext { offset: 7, .. })
    ));
}

#[test]
fn test_missing_result() {
    assert!(matches!(
        parse_database("1. e4 e5"),
        Err(Error::Game {
            reason: "missing result",
            ..
        })
    ));
}

fn movetext_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "e4", "d5", "exd5", "Nf3", "Nbd7", "R1e2", "Qh4xe1+", "O-O", "O-O-O", "e8=Q#",
            "--", "Z0", "Kxf7",
        ]),
        0..40,
    )
}

proptest! {
    #[test]
    fn test_arbitrary_text_never_panics(pgn in "\\PC{0,200}") {
        match parse_database(&pgn) {
            Ok(db) => prop_assert!(db.error.is_none()),
            Err(err) => prop_assert!(err.offset() <= pgn.len()),
        }
    }

    #[test]
    fn test_pgn_like_text_is_idempotent(pgn in "[\\[\\]{}()$.*!?;\"a-hxKQRBNO0-9+#=/ \n-]{0,120}") {
        prop_assert_eq!(parse_database(&pgn), parse_database(&pgn));
    }

    #[test]
    fn test_generated_games(moves in movetext_strategy(), annotate in any::<bool>()) {
        let mut pgn = String::from("[Event \"Generated\"]\n\n");
        for (i, san) in moves.iter().enumerate() {
            if i % 2 == 0 {
                pgn.push_str(&format!("{}. ", i / 2 + 1));
            }
            pgn.push_str(san);
            if annotate {
                pgn.push_str(" $1 {note}");
            }
            pgn.push(' ');
        }
        pgn.push_str("1/2-1/2\n");

        let db = parse_database(&pgn)?;
        prop_assert_eq!(db.len(), 1);
        let game = &db.games[0];
        prop_assert_eq!(game.ply_count(), moves.len());
        prop_assert_eq!(game.result, GameResult::Draw);
        for (element, san) in game.mainline().zip(&moves) {
            prop_assert_eq!(element.san, san.parse::<SanMove>().expect("valid san"));
            prop_assert_eq!(element.nags.len(), usize::from(annotate));
        }
        prop_assert_eq!(parse_database(&pgn)?, db);
    }
}
