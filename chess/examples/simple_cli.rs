// Simple command-line front end for the position tracker
//
// Type square names (like `e2`) to select them, `go` to confirm the move, `taken` to list the
// captured pieces and `quit` to exit. Set `RUST_LOG=debug` to see what the tracker does.

use chesstrack::{
    board::PrettyStyle, config::Config, moves::MoveOutcome, ticker::Ticker, Coord, Game,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = Config::default();
    let frames = Arc::new(AtomicUsize::new(0));
    let ticker = Ticker::spawn(config.redraw_interval, {
        let frames = Arc::clone(&frames);
        move || {
            frames.fetch_add(1, Ordering::Relaxed);
        }
    })?;

    let mut game = Game::new(config);
    let mut stdin = io::stdin().lock();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Utf8));
        print!("> ");
        io::stdout().flush()?;
        let mut s = String::new();
        if stdin.read_line(&mut s)? == 0 {
            break;
        }

        match s.trim() {
            "quit" => break,
            "go" => match game.on_move_confirmed() {
                None => println!("Select two squares first"),
                Some(MoveOutcome::Rejected(e)) => println!("Bad move: {}", e),
                Some(outcome) => {
                    if let Some(record) = outcome.record() {
                        println!("Moved: {}", record);
                    }
                }
            },
            "taken" => {
                let taken: String = game.taken_pieces().map(|p| p.as_char()).collect();
                println!("Taken: {}", taken);
            }
            other => match Coord::from_str(other) {
                Ok(c) => {
                    if let Err(e) = game.on_square_chosen(c.row(), c.col()) {
                        println!("Bad square: {}", e);
                    }
                }
                Err(e) => println!("Bad command: {}", e),
            },
        }
        println!();
    }

    ticker.stop();
    println!("Redraw ticks: {}", frames.load(Ordering::Relaxed));
    Ok(())
}
