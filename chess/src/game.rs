//! Game facade used by the user interface

use crate::assets::{self, Asset, AssetResolver, FsAssetResolver};
use crate::board::{Board, Square, MAX_PIECES};
use crate::config::Config;
use crate::moves::{self, MoveOutcome, MoveRecord};
use crate::piece::{Piece, PieceId};
use crate::registry::Facing;
use crate::selection::Selection;
use crate::types::{Coord, OutOfRange, PieceKind, Side};

use std::collections::HashMap;

use arrayvec::ArrayVec;
use log::{debug, info};

static PLACEHOLDER: Asset = Asset::Placeholder;

type AssetKey = (PieceKind, Side, Facing);

fn asset_key(piece: &Piece) -> AssetKey {
    (
        piece.kind(),
        piece.side(),
        Facing::from_initial_file(piece.initial().file()),
    )
}

/// Position tracker driven by square clicks and move confirmations
///
/// The game owns the board, the selection, the history of taken pieces and the loaded piece
/// images. The user interface only gets shared access to the board, so all the mutations go
/// through [`Game::on_square_chosen()`] and [`Game::on_move_confirmed()`].
///
/// # Example
///
/// ```
/// # use chesstrack::{Game, config::Config, assets::NoAssets, moves::MoveOutcome, Board};
/// #
/// let mut game = Game::with_board(Board::initial(), Config::default(), &NoAssets);
/// game.on_square_chosen(2, 5).unwrap();
/// game.on_square_chosen(4, 5).unwrap();
/// assert!(matches!(game.on_move_confirmed(), Some(MoveOutcome::Quiet(_))));
/// assert_eq!(game.board().as_layout(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    selection: Selection,
    taken: ArrayVec<PieceId, MAX_PIECES>,
    history: Vec<MoveRecord>,
    assets: HashMap<AssetKey, Asset>,
    config: Config,
}

impl Game {
    /// Creates a game in the initial position, loading images from `config.asset_dir`
    pub fn new(config: Config) -> Game {
        let resolver = FsAssetResolver::new(config.asset_dir.clone(), config.player_color);
        Game::with_board(Board::initial(), config, &resolver)
    }

    /// Creates a game with the given position and image source
    ///
    /// Images that cannot be loaded are replaced with [`Asset::Placeholder`].
    pub fn with_board(mut board: Board, config: Config, resolver: &dyn AssetResolver) -> Game {
        board.clear_flags();
        let mut loaded = HashMap::new();
        for (_, piece) in board.live_pieces() {
            let key = asset_key(piece);
            loaded
                .entry(key)
                .or_insert_with(|| assets::resolve_or_placeholder(resolver, key.0, key.1, key.2));
        }
        info!(
            "game created with {} pieces, {} assets resolved",
            board.live_pieces().count(),
            loaded.values().filter(|a: &&Asset| !a.is_placeholder()).count()
        );
        Game {
            board,
            selection: Selection::Empty,
            taken: ArrayVec::new(),
            history: Vec::new(),
            assets: loaded,
            config,
        }
    }

    /// Handles a click on the square with the given row and column (both in `1..=8`)
    pub fn on_square_chosen(&mut self, row: i32, col: i32) -> Result<(), OutOfRange> {
        let coord = Coord::from_row_col(row, col)?;
        self.selection.choose(&mut self.board, coord, self.config.king_safety);
        Ok(())
    }

    /// Tries to move from the first selected square to the second one
    ///
    /// Returns `None` and changes nothing if two squares are not selected. Otherwise, the
    /// selection is reset whatever the outcome is.
    pub fn on_move_confirmed(&mut self) -> Option<MoveOutcome> {
        let (src, dst) = self.selection.pair()?;
        let outcome = moves::attempt_move(&mut self.board, src, dst, self.config.king_safety);
        if let Some(record) = outcome.record() {
            if let Some(taken) = record.captured() {
                // A piece is captured at most once, so the roster bounds the history
                self.taken.push(taken);
            }
            self.history.push(*record);
        }
        self.selection.reset(&mut self.board);
        debug!("move {}-{} confirmed: {:?}", src, dst, outcome);
        Some(outcome)
    }

    /// Returns all 64 squares with their occupants, starting from a1 row by row
    pub fn board_snapshot(&self) -> impl Iterator<Item = (&Square, Option<&Piece>)> + '_ {
        self.board
            .all_squares()
            .map(move |sq| (sq, sq.occupant().map(|id| self.board.piece(id))))
    }

    /// Returns the captured pieces in capture order
    pub fn taken_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.taken.iter().map(move |&id| self.board.piece(id))
    }

    /// Returns the applied moves in order
    #[inline]
    pub fn moves(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the image of the piece `id`
    pub fn asset(&self, id: PieceId) -> &Asset {
        self.assets
            .get(&asset_key(self.board.piece(id)))
            .unwrap_or(&PLACEHOLDER)
    }
}
