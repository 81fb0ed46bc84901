use minesweeper_ai::{Game, GameError, GameState, Move, Position};

fn main() {
    match run_game() {
        Ok(state) => match state {
            GameState::Won => println!("Solved it!"),
            GameState::Lost => println!("Hit a mine. Better luck next time."),
            GameState::Playing => unreachable!(),
        },
        Err(e) => eprintln!("Game error: {}", e),
    }
}

fn run_game() -> Result<GameState, GameError> {
    let mut game = Game::new(8, 8, 8)?;
    let mut rng = rand::thread_rng();

    while game.state() == GameState::Playing {
        match game.step(&mut rng)? {
            Move::Safe(pos) => println!("Playing known-safe cell ({}, {})", pos.row, pos.col),
            Move::Random(pos) => println!("No safe cell known, guessing ({}, {})", pos.row, pos.col),
            Move::Exhausted => println!("No playable cell left"),
        }
        print_board(&game);
    }

    Ok(game.state())
}

fn print_board(game: &Game) {
    let (width, height) = game.dimensions();
    let engine = game.engine();

    print!("  ");
    for col in 0..width {
        print!("{} ", col);
    }
    println!();

    for row in 0..height {
        print!("{} ", row);
        for col in 0..width {
            let pos = Position::new(row as i32, col as i32);
            if engine.moves_made().contains(&pos) {
                match game.board().nearby_mines(pos) {
                    Ok(0) => print!("  "),
                    Ok(n) => print!("{} ", n),
                    Err(_) => print!("? "),
                }
            } else if game.board().is_flagged(pos) {
                print!("⚑ ");
            } else if engine.safes().contains(&pos) {
                print!(". ");
            } else {
                print!("□ ");
            }
        }
        println!();
    }
    println!();
}
