use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_engine::session::{GameSession, GameState};
use connect4_engine::solver::{DEFAULT_DEPTH, MAX_DEPTH};
use connect4_engine::*;

mod display;
use display::display;

/// Prints `prompt` and reads one trimmed, lowercased line
fn ask(stdin: &Stdin, prompt: &str) -> Result<String> {
    print!("{}", prompt);
    stdout().flush()?;
    let mut buffer = String::new();
    stdin.read_line(&mut buffer)?;
    Ok(buffer.trim().to_lowercase())
}

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // choose who starts
    let mut session = loop {
        let answer = ask(&stdin, "Who moves first? (p)layer, (a)i or (r)andom: ")?;
        match answer.chars().next() {
            Some('p') => break GameSession::new(Side::Player),
            Some('a') => break GameSession::new(Side::Ai),
            Some('r') => break GameSession::with_random_first(&mut rand::rng()),
            _ => println!("Unknown answer given"),
        }
    };

    // choose difficulty
    let depth = loop {
        let answer = ask(
            &stdin,
            &format!("Search depth 1-{} [{}]: ", MAX_DEPTH, DEFAULT_DEPTH),
        )?;
        if answer.is_empty() {
            break DEFAULT_DEPTH;
        }
        match answer.parse::<usize>() {
            Ok(depth @ 1..=MAX_DEPTH) => break depth,
            _ => println!("Invalid depth: {}", answer),
        }
    };

    let verbose = loop {
        match ask(&stdin, "Show the AI's analysis? y/n: ")?.chars().next() {
            Some('y') => break true,
            Some('n') => break false,
            _ => println!("Unknown answer given"),
        }
    };

    let mut solver = Solver::new(depth).with_tie_break(TieBreak::Random);

    // game loop
    loop {
        display(session.board())?;

        match session.state() {
            GameState::Playing => {
                let next_move = match session.turn() {
                    Side::Ai => {
                        let column = if verbose {
                            solver.choose_move_verbose(session.board(), Side::Ai)
                        } else {
                            let spinner = ProgressBar::new_spinner();
                            spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
                            spinner.set_message("AI is thinking...");
                            spinner.enable_steady_tick(100);
                            let column = solver.choose_move(session.board(), Side::Ai);
                            spinner.finish_and_clear();
                            column
                        };

                        // the session only hands out boards with open columns while playing
                        let column = match column {
                            Some(column) => column,
                            None => break,
                        };
                        println!("AI plays column {}", column + 1);
                        column
                    }
                    Side::Player => {
                        let input = ask(&stdin, "Move input > ")?;
                        match input.parse::<usize>() {
                            Ok(column @ 1..=COLS) => column - 1,
                            _ => {
                                println!("Invalid number: {}", input);
                                continue;
                            }
                        }
                    }
                };

                if let Err(err) = session.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::PlayerWin => {
                println!("You win!");
                break;
            }
            GameState::AiWin => {
                println!("The AI wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }

    let moves: String = session.moves().iter().map(|column| (column + 1).to_string()).collect();
    println!("Moves played: {}", moves);
    Ok(())
}
