use chesstrack::{
    movegen::{self, KingSafety},
    moves, Board, Coord, Side,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const BOARDS: [(&str, &str); 6] = [
    ("initial", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
    ("middle", "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K"),
    ("open_position", "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3"),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8"),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3"),
    ("max", "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1"),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, layout)| (name, Board::from_layout(layout).unwrap()))
}

fn all_moves(board: &Board, safety: KingSafety) -> Vec<(Coord, Coord)> {
    board
        .occupied()
        .into_iter()
        .flat_map(|src| {
            movegen::legal_destinations_with(board, src, safety)
                .into_iter()
                .map(move |dst| (src, dst))
        })
        .collect()
}

fn bench_destinations(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_destinations");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(all_moves(&board, KingSafety::Geometric).len()))
        });
    }
}

fn bench_destinations_guarded(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_destinations_guarded");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(all_moves(&board, KingSafety::Guarded).len()))
        });
    }
}

fn bench_attempt_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("attempt_move");
    for (name, board) in boards() {
        let moves = all_moves(&board, KingSafety::Geometric);
        group.bench_function(name, |b| {
            b.iter(|| {
                for &(src, dst) in &moves {
                    let mut board = board.clone();
                    black_box(moves::attempt_move(&mut board, src, dst, KingSafety::Geometric));
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for side in [Side::Player, Side::Opponent] {
                    for coord in Coord::iter() {
                        black_box(movegen::is_attacked(&board, coord, side));
                    }
                }
            })
        });
    }
}

criterion_group!(
    tracker,
    bench_destinations,
    bench_destinations_guarded,
    bench_attempt_move,
    bench_is_attacked,
);

criterion_main!(tracker);
