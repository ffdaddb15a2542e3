//! Generate a puzzle and print it with its solution.
//!
//! Usage: cargo run --example generate -- [difficulty] [seed]

use nusantara_core::{Difficulty, Generator, Position};

fn main() {
    let mut args = std::env::args().skip(1);
    let difficulty: Difficulty = args
        .next()
        .map(|s| s.parse().unwrap_or_else(|e| panic!("{}", e)))
        .unwrap_or(Difficulty::Jawa);
    let mut generator = match args.next() {
        Some(seed) => Generator::with_seed(seed.parse().expect("seed must be a number")),
        None => Generator::new(),
    };

    let generated = generator.generate(difficulty);
    let culture = difficulty.culture();
    println!(
        "{} {} ({}) - {} petak kosong\n",
        culture.icon,
        culture.name,
        culture.level,
        difficulty.removed_cells()
    );

    for row in 0..9 {
        if row % 3 == 0 {
            println!("+-------+-------+-------+");
        }
        for col in 0..9 {
            if col % 3 == 0 {
                print!("| ");
            }
            let value = generated.puzzle.get(Position::new(row, col));
            if value == 0 {
                print!(". ");
            } else {
                print!("{} ", value);
            }
        }
        println!("|");
    }
    println!("+-------+-------+-------+");
}
