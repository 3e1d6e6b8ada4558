use std::io::{self, Write};

use crate::core::parsing::move_to_uci;
use crate::driver::GameDriver;
use crate::players::{choose_greedy_move, choose_random_move, PlayerKind};
use crate::printer::print_board;
use crate::{core::Color, persistence};

/// Which side is driven by a human versus an auto-player, selected by `--mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanVsHuman,
    HumanVsAi,
    AiVsAi,
}

/// Parsed form of the §6.3 flag set. Parsing is hand-rolled, matching the original
/// engine's `parseArgs` loop and the teacher's own absence of an argument-parsing
/// crate anywhere in its tree.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub new_game: bool,
    pub load_path: Option<String>,
    pub save_path: Option<String>,
    pub mode: GameMode,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            new_game: true,
            load_path: None,
            save_path: None,
            mode: GameMode::HumanVsHuman,
        }
    }
}

pub fn print_help() {
    println!("usage: chess_engine [--new] [--file <path>] [--eval <path>] [--mode <hvh|hva|ava>]");
    println!();
    println!("  --help, -h         print this message and exit");
    println!("  --new, -n          start a fresh game (default if --file is absent)");
    println!("  --file, -f <path>  load a previously saved game from <path>");
    println!("  --eval, -e <path>  save the game to <path> when it ends");
    println!("  --mode <mode>      hvh (human vs human), hva (human vs ai), ava (ai vs ai)");
    println!();
    println!("At the move prompt: enter a UCI move (e.g. e2e4), or one of the reserved");
    println!("tokens draw, resign, save, exit.");
}

/// Parses argv (excluding the program name). Returns `Err(message)` for malformed
/// flags; the caller should print the message and exit non-zero.
pub fn parse_args(args: &[String]) -> Result<CliConfig, String> {
    let mut config = CliConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--new" | "-n" => {
                config.new_game = true;
                config.load_path = None;
            }
            "--file" | "-f" => {
                i += 1;
                let path = args.get(i).ok_or("--file requires a path argument")?;
                config.load_path = Some(path.clone());
                config.new_game = false;
            }
            "--eval" | "-e" => {
                i += 1;
                let path = args.get(i).ok_or("--eval requires a path argument")?;
                config.save_path = Some(path.clone());
            }
            "--mode" => {
                i += 1;
                let mode = args.get(i).ok_or("--mode requires hvh, hva, or ava")?;
                config.mode = match mode.as_str() {
                    "hvh" => GameMode::HumanVsHuman,
                    "hva" => GameMode::HumanVsAi,
                    "ava" => GameMode::AiVsAi,
                    other => return Err(format!("unknown mode '{}'", other)),
                };
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
        i += 1;
    }
    Ok(config)
}

fn player_for(mode: GameMode, color: Color) -> PlayerKind {
    match (mode, color) {
        (GameMode::HumanVsHuman, _) => PlayerKind::Human,
        (GameMode::HumanVsAi, Color::White) => PlayerKind::Human,
        (GameMode::HumanVsAi, Color::Black) => PlayerKind::GreedyAi,
        (GameMode::AiVsAi, _) => PlayerKind::RandomAi,
    }
}

/// Drives one game to completion on stdin/stdout, grounded in the original engine's
/// `startGame`/`askForMove`/`playerMove` loop.
pub fn run_game(config: &CliConfig) -> io::Result<()> {
    let (mut driver, white_player, black_player) = if let Some(path) = &config.load_path {
        match persistence::load_game(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("could not load '{}': {}", path, e);
                return Ok(());
            }
        }
    } else {
        (
            GameDriver::new_game(),
            player_for(config.mode, Color::White),
            player_for(config.mode, Color::Black),
        )
    };

    loop {
        print_board(driver.position());
        if driver.status().is_terminal() {
            println!("game over: {:?}", driver.status());
            break;
        }

        let side = driver.side_to_move();
        let player = match side {
            Color::White => white_player,
            Color::Black => black_player,
        };

        let chosen = match player {
            PlayerKind::RandomAi => choose_random_move(&driver),
            PlayerKind::GreedyAi => choose_greedy_move(&driver),
            PlayerKind::Human => match prompt_human_move(&mut driver, config, white_player, black_player)? {
                HumanInput::Move(mv) => Some(mv),
                HumanInput::Exit => break,
                HumanInput::HandledInPlace => continue,
            },
        };

        match chosen {
            Some(mv) => {
                println!("{:?} plays {}", side, move_to_uci(mv));
                driver.apply(mv);
            }
            None => {
                println!("{:?} has no legal move", side);
                break;
            }
        }
    }

    if let Some(path) = &config.save_path {
        if let Err(e) = persistence::save_game(path, &driver, white_player, black_player) {
            eprintln!("could not save to '{}': {}", path, e);
        }
    }

    Ok(())
}

enum HumanInput {
    Move(crate::core::Move),
    /// The loop should print the board and re-prompt without applying a move
    /// (a resignation or a draw offer already mutated `driver` in place).
    HandledInPlace,
    Exit,
}

/// Reads moves from stdin, recognizing the reserved tokens `draw`, `resign`, `save`,
/// `exit` alongside UCI moves, per §6.3 and the original `makeHumanMove`.
fn prompt_human_move(
    driver: &mut GameDriver,
    config: &CliConfig,
    white_player: PlayerKind,
    black_player: PlayerKind,
) -> io::Result<HumanInput> {
    loop {
        print!("{:?} to move> ", driver.side_to_move());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(HumanInput::Exit);
        }
        let input = line.trim();

        match input {
            "exit" => return Ok(HumanInput::Exit),
            "resign" => {
                let side = driver.side_to_move();
                driver.resign(side);
                println!("{:?} resigns", side);
                return Ok(HumanInput::HandledInPlace);
            }
            "draw" => {
                driver.agree_draw();
                println!("draw agreed");
                return Ok(HumanInput::HandledInPlace);
            }
            "save" => {
                match &config.save_path {
                    Some(path) => match persistence::save_game(path, driver, white_player, black_player) {
                        Ok(()) => println!("saved to {}", path),
                        Err(e) => println!("could not save to '{}': {}", path, e),
                    },
                    None => println!("no --eval path configured, nothing saved"),
                }
                continue;
            }
            uci => match driver.parse_move(uci) {
                Ok(mv) if driver.is_legal(mv) => return Ok(HumanInput::Move(mv)),
                Ok(_) => {
                    println!("illegal move, try again");
                    continue;
                }
                Err(e) => {
                    println!("could not parse '{}': {}", uci, e);
                    continue;
                }
            },
        }
    }
}
