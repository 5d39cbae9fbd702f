//! # Chess position tracker
//!
//! `chesstrack` keeps the authoritative state of a chess board driven by a user interface. For
//! a piece on a given square it decides which destinations are legal, and then applies the
//! chosen move (quiet move, capture or castle) keeping squares and pieces consistent.
//!
//! Rendering, mouse handling and windowing are left to the caller. The caller feeds clicks
//! into [`Game::on_square_chosen()`], confirms moves with [`Game::on_move_confirmed()`] and
//! reads the state back with [`Game::board_snapshot()`] and [`Game::taken_pieces()`].
//!
//! There is no turn order and no check detection: either side may move at any time.
//!
//! # Example
//!
//! ```
//! # use chesstrack::{Board, Coord, Game, assets::NoAssets, config::Config, moves::MoveOutcome};
//! #
//! let mut game = Game::with_board(Board::initial(), Config::default(), &NoAssets);
//!
//! // Knight b1 to c3
//! game.on_square_chosen(1, 2).unwrap();
//! let avail: Vec<_> = game.board().available().into_iter().map(|c| c.to_string()).collect();
//! assert_eq!(avail, vec!["a3", "c3"]);
//! game.on_square_chosen(3, 3).unwrap();
//! assert!(matches!(game.on_move_confirmed(), Some(MoveOutcome::Quiet(_))));
//!
//! // Nothing is selected now
//! assert_eq!(game.on_move_confirmed(), None);
//! ```

pub use chesstrack_base::{bitboard, geometry, types};

pub mod assets;
pub mod between;
pub mod board;
pub mod config;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod registry;
pub mod selection;
pub mod ticker;

pub use bitboard::Bitboard;
pub use board::{Board, Square};
pub use game::Game;
pub use moves::{IllegalMove, MoveOutcome};
pub use piece::{Piece, PieceId};
pub use types::{Color, Coord, File, OutOfRange, PieceKind, Rank, Side};
