//! The game engine: selection, move application and persistence.
//!
//! ## Turn flow
//!
//! ```text
//! select(from) ──► apply(to) ──► Rejected(reason)        (nothing changes)
//!                            └─► Played { .. }
//!                                  capture, move, Point turnaround
//!                                  counters, Time/Plus transform
//!                                  win/draw decision
//!                                  flip + toggle player (game not over)
//! ```
//!
//! The board is always oriented for the player to move. Squares passed in
//! and returned are in that orientation.
//!
//! ## Self-check guard
//!
//! When the check flag names the player to move, a requested move is first
//! played on a clone of the board. If the mover's Sun is still attacked
//! there, the move is rejected. Other moves are not guarded, so a player not
//! flagged in check can expose their own Sun.

use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::core::{
    Board, EngineConfig, GameState, Move, MoveOutcome, PlayerId, RejectReason, Square,
};
use crate::error::Result;
use crate::pieces::{legal_moves, MoveList, Piece, PieceKind};
use crate::rules::{decide, in_check, GameResult};
use crate::snapshot;

use super::setup::starting_board;

/// A Talabia game in progress.
///
/// ## Example
///
/// ```
/// use talabia::core::Square;
/// use talabia::game::Engine;
///
/// let mut engine = Engine::new();
/// let from = Square::new(0, 1).unwrap();
/// let to = Square::new(0, 3).unwrap();
///
/// assert!(engine.play(from, to).is_played());
/// assert_eq!(engine.sum_turn(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Engine {
    state: GameState,
    selection: Option<Square>,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Start a game with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Start a game with `config`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::from_state(GameState::new(starting_board()), config)
    }

    /// Resume from an arbitrary state.
    #[must_use]
    pub fn from_state(state: GameState, config: EngineConfig) -> Self {
        Self {
            state,
            selection: None,
            config,
        }
    }

    /// Reset to the starting layout.
    pub fn new_game(&mut self) {
        self.state = GameState::new(starting_board());
        self.selection = None;
        info!("new game");
    }

    // === Selection ===

    /// Select the piece on `square`, whoever owns it.
    ///
    /// Returns false, leaving any previous selection in place, if the square
    /// is empty.
    pub fn select(&mut self, square: Square) -> bool {
        match self.state.board.piece_at(square) {
            Some(piece) => {
                debug!(square = %square, kind = %piece.kind(), owner = piece.owner().raw(), "selected");
                self.selection = Some(square);
                true
            }
            None => false,
        }
    }

    /// The selected piece.
    #[must_use]
    pub fn selection(&self) -> Option<&Piece> {
        self.selection.and_then(|sq| self.state.board.piece_at(sq))
    }

    /// Destinations of the selected piece.
    ///
    /// Empty when nothing is selected or the selection belongs to the player
    /// not on move.
    #[must_use]
    pub fn legal_moves_of_selection(&self) -> MoveList {
        match self.selection() {
            Some(piece) if piece.owner() == self.state.current_player => {
                legal_moves(piece, &self.state.board)
            }
            _ => MoveList::new(),
        }
    }

    /// Select the piece on `square` and return its destinations.
    ///
    /// Empty if the square is empty.
    pub fn moves_from(&mut self, square: Square) -> MoveList {
        if self.select(square) {
            self.legal_moves_of_selection()
        } else {
            MoveList::new()
        }
    }

    /// Every move the player to move may request, in board order.
    ///
    /// The self-check guard is not applied, so when the player is in check
    /// some of these will be rejected.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_over() {
            return Vec::new();
        }
        let board = &self.state.board;
        board
            .pieces_of(self.state.current_player)
            .flat_map(|piece| {
                let from = piece.square();
                legal_moves(piece, board)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    // === Moves ===

    /// Move the selected piece to `to`.
    ///
    /// The selection is cleared whatever the outcome.
    pub fn apply(&mut self, to: Square) -> MoveOutcome {
        let Some(from) = self.selection.take() else {
            return reject(RejectReason::NoSelection);
        };
        if self.state.is_over() {
            return reject(RejectReason::GameOver);
        }

        let mover = self.state.current_player;
        let Some(&piece) = self.state.board.piece_at(from) else {
            return reject(RejectReason::NoSelection);
        };
        if piece.owner() != mover {
            return reject(RejectReason::NotYourPiece);
        }
        if !legal_moves(&piece, &self.state.board).contains(&to) {
            return reject(RejectReason::IllegalDestination);
        }

        if self.state.player_in_check == Some(mover) {
            let still_in_check = self.leaves_sun_in_check(from, to);
            self.state.player_in_check = still_in_check.then_some(mover);
            if still_in_check {
                return reject(RejectReason::LeavesSunInCheck);
            }
        }

        let captured = move_piece(&mut self.state.board, from, to);

        self.state.sum_turn = self.state.sum_turn.saturating_add(1);
        let transformed = self.advance_turn();
        if transformed {
            let replaced = self.state.board.transform_time_plus();
            info!(replaced, sum_turn = self.state.sum_turn, "time and plus transformed");
        }

        let verdict = decide(&self.state.board, mover, &self.config);
        self.state.player_in_check = verdict.player_in_check;
        self.state.result = verdict.result;

        let mv = Move::new(from, to);
        debug!(
            player = mover.raw(),
            mv = %mv,
            captured = ?captured.map(|p| p.kind()),
            check = self.state.check_code(),
            "move played"
        );

        match verdict.result {
            Some(result) => info!(
                result = %result,
                mover_won = result.is_winner(mover),
                sum_turn = self.state.sum_turn,
                "game over"
            ),
            None => {
                self.state.board.flip();
                self.state.current_player = mover.opponent();
            }
        }

        MoveOutcome::Played {
            mv,
            captured,
            transformed,
            result: verdict.result,
        }
    }

    /// Select `from` and move it to `to`.
    pub fn play(&mut self, from: Square, to: Square) -> MoveOutcome {
        self.selection = None;
        self.select(from);
        self.apply(to)
    }

    /// Play `from -> to` on a clone, including the transform this ply would
    /// trigger, and report whether the mover's Sun is still attacked.
    fn leaves_sun_in_check(&self, from: Square, to: Square) -> bool {
        let mover = self.state.current_player;
        let mut trial = self.state.board.clone();
        move_piece(&mut trial, from, to);
        if self.state.turn + 1 >= self.config.transform_period {
            trial.transform_time_plus();
        }
        let attacked = in_check(&trial, mover);
        trace!(player = mover.raw(), from = %from, to = %to, attacked, "self-check trial");
        attacked
    }

    /// Advance the cycle counter. Returns true when it wraps.
    fn advance_turn(&mut self) -> bool {
        self.state.turn += 1;
        if self.state.turn >= self.config.transform_period {
            self.state.turn = 0;
            true
        } else {
            false
        }
    }

    // === Accessors ===

    /// Pieces in board order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.state.board.iter()
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.state.board.piece_at(square)
    }

    /// First piece of `kind` owned by `player`, in board order.
    #[must_use]
    pub fn find_piece(&self, kind: PieceKind, player: PlayerId) -> Option<&Piece> {
        self.state.board.find(kind, player)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player
    }

    #[must_use]
    pub fn player_in_check(&self) -> Option<PlayerId> {
        self.state.player_in_check
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.result
    }

    /// Winner flag: 0 in progress, 1 or 2, -1 draw.
    #[must_use]
    pub fn winner_code(&self) -> i8 {
        self.state.winner_code()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Half-moves since the last transform.
    #[must_use]
    pub fn turn(&self) -> u8 {
        self.state.turn
    }

    /// Total half-moves played.
    #[must_use]
    pub fn sum_turn(&self) -> u32 {
        self.state.sum_turn
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Persistence ===

    /// The current state in snapshot form.
    #[must_use]
    pub fn snapshot(&self) -> String {
        snapshot::encode(&self.state)
    }

    /// Replace the state with a decoded snapshot.
    ///
    /// On error the current state is kept.
    pub fn restore(&mut self, text: &str) -> Result<()> {
        let state = snapshot::decode(text, &self.config).inspect_err(|e| {
            warn!(error = %e, "snapshot rejected");
        })?;
        self.replace_state(state);
        Ok(())
    }

    /// Save to the configured file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.config.save_path)
    }

    /// Load from the configured file.
    pub fn load(&mut self) -> Result<()> {
        let path = self.config.save_path.clone();
        self.load_from(path)
    }

    /// Save to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        snapshot::write_file(path, &self.state)?;
        info!(path = %path.display(), sum_turn = self.state.sum_turn, "game saved");
        Ok(())
    }

    /// Load from `path`. On error the current state is kept.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let state = snapshot::read_file(path, &self.config).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "load failed");
        })?;
        self.replace_state(state);
        info!(path = %path.display(), sum_turn = self.state.sum_turn, "game loaded");
        Ok(())
    }

    fn replace_state(&mut self, state: GameState) {
        self.state = state;
        self.selection = None;
    }
}

fn reject(reason: RejectReason) -> MoveOutcome {
    debug!(?reason, "move rejected");
    MoveOutcome::Rejected(reason)
}

/// Capture whatever is on `to`, move the piece and turn a Point around on
/// its far rank. Returns the captured piece.
fn move_piece(board: &mut Board, from: Square, to: Square) -> Option<Piece> {
    let captured = board.remove_at(to);
    if board.relocate(from, to) {
        board.update_at(to, |piece| {
            piece.turn_around_at_far_rank();
        });
    }
    captured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Facing;

    fn sq(x: i32, y: i32) -> Square {
        Square::new(x, y).unwrap()
    }

    fn p1(kind: PieceKind, x: i32, y: i32) -> Piece {
        Piece::new(kind, PlayerId::ONE, sq(x, y))
    }

    fn p2(kind: PieceKind, x: i32, y: i32) -> Piece {
        Piece::new(kind, PlayerId::TWO, sq(x, y))
    }

    fn engine_from(pieces: &[Piece], to_move: PlayerId) -> Engine {
        let state = GameState::from_pieces(pieces.iter().copied(), to_move).unwrap();
        Engine::from_state(state, EngineConfig::default())
    }

    #[test]
    fn test_new_engine() {
        let engine = Engine::new();
        assert_eq!(engine.pieces().count(), 28);
        assert_eq!(engine.current_player(), PlayerId::ONE);
        assert_eq!(engine.player_in_check(), None);
        assert_eq!(engine.winner_code(), 0);
        assert!(engine.selection().is_none());
    }

    #[test]
    fn test_select() {
        let mut engine = Engine::new();

        assert!(engine.select(sq(0, 1)));
        assert_eq!(engine.selection().map(Piece::square), Some(sq(0, 1)));

        // Empty square keeps the previous selection
        assert!(!engine.select(sq(3, 3)));
        assert_eq!(engine.selection().map(Piece::square), Some(sq(0, 1)));

        // Opponent pieces can be selected but have no moves
        assert!(engine.select(sq(0, 4)));
        assert!(engine.legal_moves_of_selection().is_empty());
    }

    #[test]
    fn test_opening_moves() {
        let engine = Engine::new();
        let moves = engine.legal_moves();

        // 7 Points × 2 + 2 Hourglasses × 2
        assert_eq!(moves.len(), 18);
        assert!(moves.contains(&Move::new(sq(1, 0), sq(0, 2))));
        assert!(moves.iter().all(|m| engine.piece_at(m.from).unwrap().owner() == PlayerId::ONE));
    }

    #[test]
    fn test_apply_without_selection() {
        let mut engine = Engine::new();
        let outcome = engine.apply(sq(0, 2));
        assert_eq!(outcome.rejection(), Some(RejectReason::NoSelection));
    }

    #[test]
    fn test_apply_rejections_clear_selection() {
        let mut engine = Engine::new();
        let before = engine.state().clone();

        engine.select(sq(0, 4));
        assert_eq!(engine.apply(sq(0, 3)).rejection(), Some(RejectReason::NotYourPiece));
        assert!(engine.selection().is_none());

        engine.select(sq(0, 1));
        assert_eq!(engine.apply(sq(0, 4)).rejection(), Some(RejectReason::IllegalDestination));
        assert!(engine.selection().is_none());

        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_play_flips_and_toggles() {
        let mut engine = Engine::new();
        let outcome = engine.play(sq(0, 1), sq(0, 3));

        assert_eq!(
            outcome,
            MoveOutcome::Played {
                mv: Move::new(sq(0, 1), sq(0, 3)),
                captured: None,
                transformed: false,
                result: None,
            }
        );
        assert_eq!(engine.current_player(), PlayerId::TWO);
        assert_eq!(engine.turn(), 1);
        assert_eq!(engine.sum_turn(), 1);

        // The moved Point is now seen from player 2's side
        let moved = engine.piece_at(sq(6, 2)).unwrap();
        assert_eq!(moved.owner(), PlayerId::ONE);
        assert_eq!(moved.facing(), Some(Facing::Down));
        // Player 2's Points are at the bottom facing up
        assert_eq!(engine.piece_at(sq(0, 1)).map(Piece::owner), Some(PlayerId::TWO));
    }

    #[test]
    fn test_capture() {
        let mut engine = engine_from(
            &[
                p1(PieceKind::Sun, 3, 0),
                p1(PieceKind::Plus, 0, 0),
                p2(PieceKind::Hourglass, 0, 4),
                p2(PieceKind::Sun, 6, 5),
            ],
            PlayerId::ONE,
        );

        let outcome = engine.play(sq(0, 0), sq(0, 4));
        let MoveOutcome::Played { captured, result, .. } = outcome else {
            panic!("capture was rejected");
        };
        assert_eq!(captured.map(|p| p.kind()), Some(PieceKind::Hourglass));
        assert_eq!(result, None);
        assert_eq!(engine.pieces().count(), 3);
        // (0,4) seen from player 2
        assert_eq!(engine.piece_at(sq(6, 1)).map(Piece::kind), Some(PieceKind::Plus));
    }

    #[test]
    fn test_point_turns_around_on_far_rank() {
        let mut engine = engine_from(
            &[
                p1(PieceKind::Sun, 0, 0),
                p1(PieceKind::Point, 2, 4),
                p2(PieceKind::Sun, 6, 5),
                p2(PieceKind::Point, 6, 3),
            ],
            PlayerId::ONE,
        );

        assert!(engine.play(sq(2, 4), sq(2, 5)).is_played());
        // Now faces down; after the flip that reads as up from (4, 0)
        let point = engine.piece_at(sq(4, 0)).unwrap();
        assert_eq!(point.owner(), PlayerId::ONE);
        assert_eq!(point.facing(), Some(Facing::Up));
    }

    #[test]
    fn test_transform_every_fourth_ply() {
        let mut engine = Engine::new();
        let plies = [
            (sq(0, 1), sq(0, 2)),
            (sq(0, 1), sq(0, 2)),
            (sq(1, 1), sq(1, 2)),
        ];
        for (from, to) in plies {
            let outcome = engine.play(from, to);
            assert!(matches!(outcome, MoveOutcome::Played { transformed: false, .. }));
        }
        assert_eq!(engine.turn(), 3);

        let outcome = engine.play(sq(1, 1), sq(1, 2));
        assert!(matches!(outcome, MoveOutcome::Played { transformed: true, .. }));
        assert_eq!(engine.turn(), 0);
        assert_eq!(engine.sum_turn(), 4);
        assert_eq!(engine.piece_at(sq(0, 0)).map(Piece::kind), Some(PieceKind::Time));
        assert_eq!(engine.piece_at(sq(2, 0)).map(Piece::kind), Some(PieceKind::Plus));
        assert_eq!(engine.piece_at(sq(2, 5)).map(Piece::kind), Some(PieceKind::Plus));
    }

    #[test]
    fn test_self_check_guard() {
        let mut engine = engine_from(
            &[
                p1(PieceKind::Sun, 3, 0),
                p1(PieceKind::Time, 2, 0),
                p1(PieceKind::Point, 0, 1),
                p2(PieceKind::Plus, 3, 4),
                p2(PieceKind::Sun, 6, 5),
            ],
            PlayerId::ONE,
        );
        assert_eq!(engine.player_in_check(), Some(PlayerId::ONE));
        let before = engine.state().clone();

        let outcome = engine.play(sq(0, 1), sq(0, 2));
        assert_eq!(outcome.rejection(), Some(RejectReason::LeavesSunInCheck));
        assert_eq!(engine.state(), &before);

        // Blocking the file is accepted
        let outcome = engine.play(sq(2, 0), sq(3, 1));
        assert!(outcome.is_played());
        assert_eq!(engine.player_in_check(), None);
        assert_eq!(engine.current_player(), PlayerId::TWO);
    }

    #[test]
    fn test_guard_trial_includes_pending_transform() {
        let pieces = [
            p1(PieceKind::Sun, 3, 0),
            p1(PieceKind::Point, 0, 1),
            p2(PieceKind::Time, 5, 2),
            p2(PieceKind::Sun, 6, 5),
        ];

        // Mid-cycle the Time keeps checking along the diagonal
        let mut engine = engine_from(&pieces, PlayerId::ONE);
        assert_eq!(engine.player_in_check(), Some(PlayerId::ONE));
        let outcome = engine.play(sq(0, 1), sq(0, 2));
        assert_eq!(outcome.rejection(), Some(RejectReason::LeavesSunInCheck));

        // On the last ply of the cycle it turns into a Plus first
        let mut state = GameState::from_pieces(pieces, PlayerId::ONE).unwrap();
        state.turn = 3;
        let mut engine = Engine::from_state(state, EngineConfig::default());
        let outcome = engine.play(sq(0, 1), sq(0, 2));
        assert!(matches!(
            outcome,
            MoveOutcome::Played { transformed: true, result: None, .. }
        ));
        assert_eq!(engine.player_in_check(), None);
        assert_eq!(engine.turn(), 0);
        // The Plus from (5, 2), seen from player 2
        assert_eq!(engine.piece_at(sq(1, 3)).map(Piece::kind), Some(PieceKind::Plus));
    }

    #[test]
    fn test_sum_turn_saturates() {
        let mut state = GameState::new(starting_board());
        state.sum_turn = u32::MAX;
        let mut engine = Engine::from_state(state, EngineConfig::default());

        assert!(engine.play(sq(0, 1), sq(0, 2)).is_played());
        assert_eq!(engine.sum_turn(), u32::MAX);
    }

    #[test]
    fn test_unguarded_when_not_flagged() {
        // Flag not set, so exposing the Sun is allowed
        let mut engine = engine_from(
            &[
                p1(PieceKind::Sun, 3, 0),
                p1(PieceKind::Hourglass, 3, 1),
                p2(PieceKind::Plus, 3, 4),
                p2(PieceKind::Sun, 6, 5),
            ],
            PlayerId::ONE,
        );
        assert_eq!(engine.player_in_check(), None);

        assert!(engine.play(sq(3, 1), sq(1, 2)).is_played());
        assert_eq!(engine.player_in_check(), Some(PlayerId::ONE));
    }

    #[test]
    fn test_checkmate_ends_game_without_flip() {
        let mut engine = engine_from(
            &[
                p1(PieceKind::Sun, 1, 3),
                p1(PieceKind::Plus, 4, 0),
                p2(PieceKind::Sun, 0, 5),
                p2(PieceKind::Point, 6, 0),
            ],
            PlayerId::ONE,
        );

        let outcome = engine.play(sq(4, 0), sq(4, 5));
        assert!(matches!(
            outcome,
            MoveOutcome::Played { result: Some(GameResult::Winner(PlayerId::ONE)), .. }
        ));
        assert_eq!(engine.winner_code(), 1);
        assert_eq!(engine.player_in_check(), Some(PlayerId::TWO));
        assert_eq!(engine.current_player(), PlayerId::ONE);
        assert_eq!(engine.piece_at(sq(4, 5)).map(Piece::kind), Some(PieceKind::Plus));

        // Nothing moves after the end
        assert!(engine.legal_moves().is_empty());
        assert_eq!(engine.play(sq(1, 3), sq(1, 2)).rejection(), Some(RejectReason::GameOver));
    }

    #[test]
    fn test_new_game_resets() {
        let mut engine = Engine::new();
        engine.play(sq(0, 1), sq(0, 3));
        engine.select(sq(0, 1));

        engine.new_game();
        assert_eq!(engine.sum_turn(), 0);
        assert_eq!(engine.current_player(), PlayerId::ONE);
        assert!(engine.selection().is_none());
        assert_eq!(engine.state(), &GameState::new(starting_board()));
    }

    #[test]
    fn test_restore_failure_keeps_state() {
        let mut engine = Engine::new();
        engine.play(sq(0, 1), sq(0, 3));
        let before = engine.state().clone();

        assert!(engine.restore("PieceName:Point,\nPiecePlayer:9,\n").is_err());
        assert_eq!(engine.state(), &before);

        let text = engine.snapshot();
        let mut other = Engine::new();
        other.restore(&text).unwrap();
        assert_eq!(other.state(), &before);
    }
}
