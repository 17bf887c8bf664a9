use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_engine::{
    bench, selector::best_scored_column, Cell, GameState, Outcome, Player, Position, Searcher,
    DEFAULT_SEARCH_DEPTH, HEIGHT, WIDTH,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("bench") => run_bench(&args[1..]),
        Some(other) => Err(anyhow!("unknown argument '{}', expected 'bench' or nothing", other)),
        None => play(),
    }
}

fn run_bench(args: &[String]) -> Result<()> {
    let plies = match args.get(0) {
        Some(plies) => plies.parse::<usize>()?,
        None => 4,
    };
    let depth = match args.get(1) {
        Some(depth) => depth.parse::<usize>()?,
        None => DEFAULT_SEARCH_DEPTH,
    };

    let report = bench::run(plies, depth, true);
    println!(
        "Openings of {} moves at depth {}\nPositions: {}, Mean time: {:.6}ms, Mean no. of nodes: {:.1}, kpos/s: {:.1}",
        plies,
        depth,
        report.positions,
        report.mean_time().as_secs_f64() * 1000.0,
        report.mean_nodes(),
        report.kpos_per_sec(),
    );
    Ok(())
}

fn play() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let ai_players = (
        ask_yes_no(&stdin, "Is player 1 AI controlled? y/n: ")?,
        ask_yes_no(&stdin, "Is player 2 AI controlled? y/n: ")?,
    );
    let depth = if ai_players.0 || ai_players.1 {
        ask_depth(&stdin)?
    } else {
        DEFAULT_SEARCH_DEPTH
    };

    let mut game = GameState::new();

    // game loop
    loop {
        display(&game)?;

        match game.outcome() {
            Outcome::InProgress => {
                let player = game.active_player();
                let next_move = if (player == Player::First && ai_players.0)
                    || (player == Player::Second && ai_players.1)
                {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(std::time::Duration::new(1, 0));
                    }

                    let mut searcher = Searcher::new(depth, player);
                    let scores = searcher.score_columns(game.board());
                    let best_move = best_scored_column(&scores)
                        .ok_or_else(|| anyhow!("no legal moves left"))?;

                    let scores: Vec<String> = scores
                        .iter()
                        .map(|score| score.map_or("-".to_string(), |s| s.to_string()))
                        .collect();
                    println!("Column scores: {}", scores.join(" "));
                    println!(
                        "Best move: {} ({} positions searched)",
                        best_move + 1,
                        searcher.node_count
                    );
                    best_move
                // human player
                } else {
                    print!("Move input > ");
                    stdout().flush()?;
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    match input_str.trim().parse::<usize>() {
                        Ok(column) if column >= 1 => column - 1,
                        _ => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                    }
                };

                if let Err(err) = connect4_engine::apply_move(&mut game, next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            Outcome::Won(player, _) => {
                let number = if player == Player::First { 1 } else { 2 };
                println!("Player {} wins!", number);
                break;
            }
            Outcome::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    println!("Moves played: {}", game.history());
    Ok(())
}

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.trim().to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_depth(stdin: &Stdin) -> Result<usize> {
    loop {
        let mut buffer = String::new();
        print!("AI search depth (default {}): ", DEFAULT_SEARCH_DEPTH);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(DEFAULT_SEARCH_DEPTH);
        }
        match answer.parse::<usize>() {
            Ok(depth) if depth >= 1 => return Ok(depth),
            _ => println!("Invalid depth: {}", answer),
        }
    }
}

fn display(game: &GameState) -> Result<()> {
    let mut stdout = stdout();
    let winning_line = match game.outcome() {
        Outcome::Won(_, line) => Some(line),
        _ => None,
    };

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let highlighted = winning_line
                .map_or(false, |line| line.contains(Position::new(row, column)));
            let background = if highlighted {
                Color::DarkGreen
            } else {
                Color::DarkBlue
            };
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(match game.board().cell(row, column) {
                        Cell::Occupied(Player::First) => Color::Red,
                        Cell::Occupied(Player::Second) => Color::Yellow,
                        Cell::Empty => background,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
