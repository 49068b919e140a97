//! Flat text snapshot codec.
//!
//! ## Format
//!
//! One record per line, list entries comma-terminated:
//!
//! ```text
//! PieceName:Point,Point,...,
//! PiecePlayer:1,2,...,
//! PiecePosX:0,0,...,
//! PiecePosY:1,4,...,
//! PieceDirection:up,down,...,
//! CurrentPlayer:1
//! Winner:0
//! Turn:0
//! PlayerInCheck:0
//! SumTurn:0
//! ```
//!
//! The first four lists are aligned: entry `i` of each describes piece `i`,
//! in board order. `PieceDirection` has one entry per Point, in the order
//! the Points appear.
//!
//! Decoding validates everything it reads and builds a fresh `GameState`;
//! nothing is mutated until the whole snapshot has been accepted.

use std::fmt::Write as _;
use std::str::{FromStr, Lines};

use crate::core::{Board, EngineConfig, GameState, PlayerId, Square};
use crate::error::{Result, SnapshotError};
use crate::pieces::{Facing, Piece, PieceKind};
use crate::rules::GameResult;

const PIECE_NAME: &str = "PieceName";
const PIECE_PLAYER: &str = "PiecePlayer";
const PIECE_POS_X: &str = "PiecePosX";
const PIECE_POS_Y: &str = "PiecePosY";
const PIECE_DIRECTION: &str = "PieceDirection";
const CURRENT_PLAYER: &str = "CurrentPlayer";
const WINNER: &str = "Winner";
const TURN: &str = "Turn";
const PLAYER_IN_CHECK: &str = "PlayerInCheck";
const SUM_TURN: &str = "SumTurn";

/// Render `state` in the snapshot format.
#[must_use]
pub fn encode(state: &GameState) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_snapshot(&mut out, state);
    out
}

fn write_snapshot(out: &mut String, state: &GameState) -> std::fmt::Result {
    let board = &state.board;
    write_list(out, PIECE_NAME, board.iter().map(|p| p.kind().name()))?;
    write_list(out, PIECE_PLAYER, board.iter().map(|p| p.owner().raw()))?;
    write_list(out, PIECE_POS_X, board.iter().map(|p| p.square().x()))?;
    write_list(out, PIECE_POS_Y, board.iter().map(|p| p.square().y()))?;
    write_list(
        out,
        PIECE_DIRECTION,
        board.iter().filter_map(Piece::facing).map(Facing::as_str),
    )?;
    writeln!(out, "{CURRENT_PLAYER}:{}", state.current_player.raw())?;
    writeln!(out, "{WINNER}:{}", state.winner_code())?;
    writeln!(out, "{TURN}:{}", state.turn)?;
    writeln!(out, "{PLAYER_IN_CHECK}:{}", state.check_code())?;
    write!(out, "{SUM_TURN}:{}", state.sum_turn)
}

fn write_list<T: std::fmt::Display>(
    out: &mut String,
    field: &str,
    items: impl Iterator<Item = T>,
) -> std::fmt::Result {
    write!(out, "{field}:")?;
    for item in items {
        write!(out, "{item},")?;
    }
    writeln!(out)
}

/// Parse a snapshot into a new state.
///
/// `config` bounds the `Turn` counter.
pub fn decode(text: &str, config: &EngineConfig) -> Result<GameState> {
    let mut records = Records::new(text);

    let names = list(PIECE_NAME, records.field(PIECE_NAME)?)?;
    let players = list(PIECE_PLAYER, records.field(PIECE_PLAYER)?)?;
    let xs = list(PIECE_POS_X, records.field(PIECE_POS_X)?)?;
    let ys = list(PIECE_POS_Y, records.field(PIECE_POS_Y)?)?;
    let directions = list(PIECE_DIRECTION, records.field(PIECE_DIRECTION)?)?;

    for (field, len) in [
        (PIECE_PLAYER, players.len()),
        (PIECE_POS_X, xs.len()),
        (PIECE_POS_Y, ys.len()),
    ] {
        if len != names.len() {
            return Err(SnapshotError::LengthMismatch {
                field,
                expected: names.len(),
                found: len,
            });
        }
    }

    let kinds = names
        .iter()
        .map(|name| PieceKind::from_str(name).map_err(SnapshotError::UnknownPieceKind))
        .collect::<Result<Vec<_>>>()?;

    let point_count = kinds.iter().filter(|k| **k == PieceKind::Point).count();
    if directions.len() != point_count {
        return Err(SnapshotError::LengthMismatch {
            field: PIECE_DIRECTION,
            expected: point_count,
            found: directions.len(),
        });
    }
    let mut facings = directions
        .iter()
        .map(|d| Facing::from_str(d).map_err(SnapshotError::UnknownFacing));

    let mut board = Board::new();
    for (i, kind) in kinds.into_iter().enumerate() {
        let owner = player(PIECE_PLAYER, players[i])?;
        let x: i32 = number(PIECE_POS_X, xs[i])?;
        let y: i32 = number(PIECE_POS_Y, ys[i])?;
        let square = Square::new(x, y).ok_or(SnapshotError::OffBoard { x, y })?;
        if board.is_occupied(square) {
            return Err(SnapshotError::DuplicateSquare { x, y });
        }

        let mut piece = Piece::new(kind, owner, square);
        if kind == PieceKind::Point {
            // Lengths were checked above, so a facing is always available
            if let Some(facing) = facings.next() {
                piece = piece.with_facing(facing?);
            }
        }
        board.place(piece);
    }

    let current_player = player(CURRENT_PLAYER, records.field(CURRENT_PLAYER)?)?;

    let winner: i8 = number(WINNER, records.field(WINNER)?)?;
    let result = GameResult::from_code(winner).map_err(|value| SnapshotError::OutOfRange {
        field: WINNER,
        value: i64::from(value),
    })?;

    let turn: u8 = number(TURN, records.field(TURN)?)?;
    if turn >= config.transform_period {
        return Err(SnapshotError::OutOfRange {
            field: TURN,
            value: i64::from(turn),
        });
    }

    let check_raw = records.field(PLAYER_IN_CHECK)?;
    let player_in_check = if number::<i64>(PLAYER_IN_CHECK, check_raw)? == 0 {
        None
    } else {
        Some(player(PLAYER_IN_CHECK, check_raw)?)
    };

    let sum_turn: u32 = number(SUM_TURN, records.field(SUM_TURN)?)?;
    // The next accepted move must still be countable
    if sum_turn == u32::MAX {
        return Err(SnapshotError::OutOfRange {
            field: SUM_TURN,
            value: i64::from(sum_turn),
        });
    }
    records.finish()?;

    Ok(GameState {
        board,
        current_player,
        player_in_check,
        turn,
        sum_turn,
        result,
    })
}

/// Sequential reader over the snapshot's lines.
struct Records<'a> {
    lines: Lines<'a>,
    line_no: usize,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line_no: 0,
        }
    }

    /// Body of the next line, which must be `field:...`.
    fn field(&mut self, field: &'static str) -> Result<&'a str> {
        let line = self
            .lines
            .next()
            .ok_or(SnapshotError::MissingLine { field })?;
        self.line_no += 1;

        line.strip_prefix(field)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(|| SnapshotError::UnexpectedLine {
                line: self.line_no,
                expected: field,
                found: line.to_string(),
            })
    }

    /// Only blank lines may follow the last record.
    fn finish(mut self) -> Result<()> {
        match self.lines.find(|l| !l.trim().is_empty()) {
            None => Ok(()),
            Some(extra) => Err(SnapshotError::UnexpectedLine {
                line: self.line_no + 1,
                expected: "end of snapshot",
                found: extra.to_string(),
            }),
        }
    }
}

/// Split a comma-terminated list.
fn list<'a>(field: &'static str, body: &'a str) -> Result<Vec<&'a str>> {
    let mut parts: Vec<&str> = body.split(',').collect();
    // `split` always yields at least one part: the text after the last comma
    let trailing = parts.pop().unwrap_or_default();
    if !trailing.trim().is_empty() {
        return Err(SnapshotError::Unterminated {
            field,
            trailing: trailing.to_string(),
        });
    }
    Ok(parts.into_iter().map(str::trim).collect())
}

fn number<T>(field: &'static str, value: &str) -> Result<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| SnapshotError::InvalidNumber {
            field,
            value: value.to_string(),
            source,
        })
}

fn player(field: &'static str, value: &str) -> Result<PlayerId> {
    let raw: i64 = number(field, value)?;
    u8::try_from(raw)
        .ok()
        .and_then(PlayerId::from_raw)
        .ok_or(SnapshotError::InvalidPlayer { field, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::starting_board;

    const SMALL: &str = "PieceName:Point,Sun,Point,Sun,\n\
                         PiecePlayer:1,1,2,2,\n\
                         PiecePosX:0,3,0,3,\n\
                         PiecePosY:1,0,4,5,\n\
                         PieceDirection:up,down,\n\
                         CurrentPlayer:2\n\
                         Winner:0\n\
                         Turn:3\n\
                         PlayerInCheck:0\n\
                         SumTurn:7";

    fn sq(x: i32, y: i32) -> Square {
        Square::new(x, y).unwrap()
    }

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn test_encode_starting_position() {
        let text = encode(&GameState::new(starting_board()));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("PieceName:Point,Point,"));
        assert!(lines[0].ends_with("Time,Time,Sun,Sun,"));
        assert!(lines[1].starts_with("PiecePlayer:1,2,1,2,"));
        assert_eq!(lines[4].matches(',').count(), 14);
        assert!(lines[4].starts_with("PieceDirection:up,down,up,down,"));
        assert_eq!(lines[5], "CurrentPlayer:1");
        assert_eq!(lines[6], "Winner:0");
        assert_eq!(lines[7], "Turn:0");
        assert_eq!(lines[8], "PlayerInCheck:0");
        assert_eq!(lines[9], "SumTurn:0");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_decode_small() {
        let state = decode(SMALL, &config()).unwrap();

        assert_eq!(state.board.len(), 4);
        assert_eq!(state.current_player, PlayerId::TWO);
        assert_eq!(state.turn, 3);
        assert_eq!(state.sum_turn, 7);
        assert_eq!(state.result, None);
        assert_eq!(state.player_in_check, None);

        let point = state.board.piece_at(sq(0, 4)).unwrap();
        assert_eq!(point.owner(), PlayerId::TWO);
        assert_eq!(point.facing(), Some(Facing::Down));
        assert_eq!(state.board.sun_of(PlayerId::ONE).map(Piece::square), Some(sq(3, 0)));
    }

    #[test]
    fn test_roundtrip_preserves_order_and_flags() {
        let mut state = decode(SMALL, &config()).unwrap();
        state.result = Some(GameResult::Draw);
        state.player_in_check = Some(PlayerId::ONE);

        let decoded = decode(&encode(&state), &config()).unwrap();
        assert_eq!(decoded, state);
        let order: Vec<_> = decoded.board.iter().map(Piece::square).collect();
        assert_eq!(order, vec![sq(0, 1), sq(3, 0), sq(0, 4), sq(3, 5)]);
    }

    #[test]
    fn test_decode_accepts_trailing_newline_and_crlf() {
        let crlf = SMALL.replace('\n', "\r\n") + "\r\n";
        assert!(decode(&crlf, &config()).is_ok());
    }

    #[test]
    fn test_decode_empty_board() {
        let text = "PieceName:\nPiecePlayer:\nPiecePosX:\nPiecePosY:\nPieceDirection:\n\
                    CurrentPlayer:1\nWinner:-1\nTurn:0\nPlayerInCheck:0\nSumTurn:0";
        let state = decode(text, &config()).unwrap();
        assert!(state.board.is_empty());
        assert_eq!(state.result, Some(GameResult::Draw));
    }

    #[test]
    fn test_missing_line() {
        let text = SMALL.rsplit_once('\n').unwrap().0;
        let err = decode(text, &config()).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingLine { field: "SumTurn" }));
    }

    #[test]
    fn test_wrong_prefix() {
        let text = SMALL.replace("Winner:", "Victor:");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnexpectedLine { line: 7, expected: "Winner", .. }
        ));
    }

    #[test]
    fn test_unknown_piece_kind() {
        let text = SMALL.replace("PieceName:Point,Sun", "PieceName:Point,Queen");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(err, SnapshotError::UnknownPieceKind(ref k) if k == "Queen"));
    }

    #[test]
    fn test_bad_number() {
        let text = SMALL.replace("PiecePosX:0,3", "PiecePosX:zero,3");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidNumber { field: "PiecePosX", .. }));
    }

    #[test]
    fn test_length_mismatch() {
        let text = SMALL.replace("PiecePlayer:1,1,2,2,", "PiecePlayer:1,1,2,");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::LengthMismatch { field: "PiecePlayer", expected: 4, found: 3 }
        ));

        let text = SMALL.replace("PieceDirection:up,down,", "PieceDirection:up,");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(err, SnapshotError::LengthMismatch { field: "PieceDirection", .. }));
    }

    #[test]
    fn test_unterminated_entry() {
        let text = SMALL.replace("PiecePosY:1,0,4,5,", "PiecePosY:1,0,4,5");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(err, SnapshotError::Unterminated { field: "PiecePosY", .. }));
    }

    #[test]
    fn test_invalid_values() {
        let off = SMALL.replace("PiecePosX:0,3,0,3,", "PiecePosX:0,3,0,7,");
        assert!(matches!(
            decode(&off, &config()).unwrap_err(),
            SnapshotError::OffBoard { x: 7, y: 5 }
        ));

        let dup = SMALL.replace("PiecePosY:1,0,4,5,", "PiecePosY:1,0,1,5,");
        assert!(matches!(
            decode(&dup, &config()).unwrap_err(),
            SnapshotError::DuplicateSquare { x: 0, y: 1 }
        ));

        let bad_player = SMALL.replace("CurrentPlayer:2", "CurrentPlayer:3");
        assert!(matches!(
            decode(&bad_player, &config()).unwrap_err(),
            SnapshotError::InvalidPlayer { field: "CurrentPlayer", value: 3 }
        ));

        let bad_turn = SMALL.replace("Turn:3", "Turn:4");
        assert!(matches!(
            decode(&bad_turn, &config()).unwrap_err(),
            SnapshotError::OutOfRange { field: "Turn", value: 4 }
        ));

        let bad_winner = SMALL.replace("Winner:0", "Winner:5");
        assert!(matches!(
            decode(&bad_winner, &config()).unwrap_err(),
            SnapshotError::OutOfRange { field: "Winner", value: 5 }
        ));

        let bad_sum = SMALL.replace("SumTurn:7", "SumTurn:4294967295");
        assert!(matches!(
            decode(&bad_sum, &config()).unwrap_err(),
            SnapshotError::OutOfRange { field: "SumTurn", value: 4294967295 }
        ));

        let bad_facing = SMALL.replace("PieceDirection:up,down,", "PieceDirection:up,left,");
        assert!(matches!(
            decode(&bad_facing, &config()).unwrap_err(),
            SnapshotError::UnknownFacing(ref f) if f == "left"
        ));
    }

    #[test]
    fn test_trailing_garbage() {
        let text = format!("{SMALL}\nExtra:1");
        let err = decode(&text, &config()).unwrap_err();
        assert!(matches!(err, SnapshotError::UnexpectedLine { line: 11, .. }));
    }
}
