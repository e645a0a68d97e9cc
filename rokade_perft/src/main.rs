use std::time::{Duration, Instant};

use clap::Parser;
use rokade_core::{perft::perft, Board, UciMove};

/// Perft tester for the rokade move generator.
///
/// Runs perft to debug move generation issues and check generator
/// performance.
#[derive(Parser, Debug)]
struct Args {
    /// Starting position of the board.
    ///
    /// Expects either the string "startpos" or a position descriptor.
    /// Additional alterations to the position can be specified via the
    /// --moves option.
    #[arg(short, long, default_value = "startpos", value_parser = parse_position)]
    position: Board,

    /// Additional moves to play before running perft.
    ///
    /// Moves should consist of the starting square in algebraic notation
    /// followed by the ending square, plus an optional promotion target as
    /// a lowercase letter, e.g. `d2d4`, `e7e8q`.
    #[arg(short, long, num_args(0..))]
    moves: Vec<UciMove>,

    /// Exact depth to search to.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..), default_value_t = 6)]
    depth: u8,

    /// Run in divide mode.
    ///
    /// Lists each legal move in the current position along with the node
    /// count found under that move, for identifying the exact line a
    /// discrepancy occurs on.
    #[arg(long)]
    divide: bool,
}

fn parse_position(s: &str) -> Result<Board, String> {
    if s == "startpos" {
        Ok(Board::starting_position())
    } else {
        Board::new(s).map_err(|e| format!("Expected `startpos` or a valid position descriptor: {e}"))
    }
}

fn generic_perft(mut board: Board, max_depth: usize) {
    let mut total_time = Duration::ZERO;
    let mut last_depth_time = Duration::ZERO;
    let mut total_nodes = 0;

    for depth in 0..=max_depth {
        let start_time = Instant::now();
        let nodes = perft(&mut board, depth);
        let time_taken = start_time.elapsed();

        println!(
            "Depth: {depth}\tNodes: {nodes}\tTime taken: {:.3}s",
            time_taken.as_secs_f64()
        );

        total_time += time_taken;
        last_depth_time = time_taken;
        total_nodes += nodes;
    }

    println!();

    let nodes_per_second = total_nodes as f64 / last_depth_time.as_secs_f64().max(f64::EPSILON);
    println!(
        "Total nodes: {total_nodes}\tTotal time: {:.3}s\tNodes per second: {:.3}",
        total_time.as_secs_f64(),
        nodes_per_second
    );
}

fn specific_perft(mut board: Board, depth: usize) {
    assert!(depth >= 1);

    let side = board.side_to_move();
    let legal_moves = board.legal_moves(side).to_vec();

    let mut total_nodes = 0;
    for mv in legal_moves {
        let move_spec = UciMove {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        };

        board.make_move(&mv);
        let nodes = perft(&mut board, depth - 1);
        board.undo_move().expect("move was just made");

        total_nodes += nodes;
        println!("{move_spec}: {nodes}");
    }

    println!();
    println!("Nodes searched: {total_nodes}");
}

fn main() -> Result<(), String> {
    let Args {
        position,
        moves,
        depth,
        divide,
    } = Args::parse();

    let mut board = position;
    for move_spec in moves {
        board
            .try_make_move(move_spec.from, move_spec.to, move_spec.promotion)
            .map_err(|e| {
                format!(
                    "Move `{move_spec}` is invalid to play in this position ({}): {e}",
                    board.describe_position()
                )
            })?;
    }

    if divide {
        specific_perft(board, depth as _);
    } else {
        generic_perft(board, depth as _);
    }

    Ok(())
}
