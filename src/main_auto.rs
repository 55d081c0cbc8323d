// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use std::sync::Arc;
use tilesmith::{
    display, error, game_config,
    game_state::{GamePlayer, GameResult, GameState},
    lexicon, mcts,
    move_picker::MovePicker,
    return_error,
};

thread_local! {
    static RNG: std::cell::RefCell<Box<dyn RngCore>> =
        std::cell::RefCell::new(Box::new(rand_chacha::ChaCha20Rng::from_os_rng()));
}

#[derive(Default, serde::Deserialize)]
#[serde(default)]
struct AutoConfig {
    game: Option<game_config::GameConfig>,
    mcts: mcts::MctsParams,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_picker(s: &str, mcts_params: &mcts::MctsParams) -> error::Returns<MovePicker> {
    Ok(match s {
        "random" => MovePicker::Random,
        "longest" => MovePicker::Longest,
        "most-points" | "mostpoints" => MovePicker::MostPoints,
        "mcts" => MovePicker::Mcts(mcts_params.clone()),
        _ => {
            if let Some(iterations) = s.strip_prefix("mcts:") {
                MovePicker::Mcts(mcts::MctsParams {
                    iterations: iterations.parse()?,
                    ..mcts_params.clone()
                })
            } else {
                return_error!(format!("invalid picker {s:?}"));
            }
        }
    })
}

fn make_players(
    game_config: &game_config::GameConfig,
    pickers: &[(String, MovePicker)],
) -> Vec<GamePlayer> {
    (0..game_config.num_players())
        .map(|i| {
            let (name, picker) = &pickers[i % pickers.len()];
            GamePlayer::new(format!("p{}-{}", i + 1, name), picker.clone())
        })
        .collect()
}

// Plays to the end. Returns None if a player needs a person to answer.
fn play_out(game_state: &mut GameState, rng: &mut dyn RngCore, verbose: bool) -> Option<()> {
    while !game_state.check_game_ended() {
        let play = game_state.pick_move(rng)?;
        match game_state.play(&play) {
            Ok(outcome) => {
                if verbose {
                    println!("{}", outcome.description);
                    display::print_game(game_state);
                    println!();
                }
            }
            Err(err) => {
                panic!("{} picked an illegal move: {err}", game_state.current_player().name);
            }
        }
    }
    Some(())
}

fn print_result(result: &GameResult) {
    for player in result.players.iter() {
        println!("{}: {}", player.name, player.score);
    }
    match result.winners.len() {
        0 => {}
        1 => println!("{} wins", result.players[result.winners[0]].name),
        _ => println!(
            "tie between {}",
            result
                .winners
                .iter()
                .map(|&i| &result.players[i].name[..])
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn watch_one(
    game_config: Arc<game_config::GameConfig>,
    lexicon: Arc<lexicon::Lexicon>,
    pickers: &[(String, MovePicker)],
) -> error::Returns<()> {
    RNG.with(|rng| -> error::Returns<()> {
        let mut rng = rng.borrow_mut();
        let rng: &mut dyn RngCore = &mut **rng;
        let players = make_players(&game_config, pickers);
        let mut game_state = GameState::new(game_config, lexicon, players, rng);
        display::print_game(&game_state);
        println!();
        if play_out(&mut game_state, rng, true).is_none() {
            return_error!("auto cannot drive a human player".into());
        }
        println!("game over after {} rounds", game_state.round);
        print_result(&game_state.result());
        Ok(())
    })
}

fn run_many(
    game_config: Arc<game_config::GameConfig>,
    lexicon: Arc<lexicon::Lexicon>,
    pickers: Vec<(String, MovePicker)>,
    num_games: usize,
    out_path: &str,
) -> error::Returns<()> {
    let pickers = Arc::new(pickers);
    let num_threads = num_cpus::get().clamp(1, num_games.max(1));
    let next_game = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut threads = vec![];
    let (tx, rx) = std::sync::mpsc::channel();
    for _ in 0..num_threads {
        let tx = tx.clone();
        let game_config = Arc::clone(&game_config);
        let lexicon = Arc::clone(&lexicon);
        let pickers = Arc::clone(&pickers);
        let next_game = Arc::clone(&next_game);
        threads.push(std::thread::spawn(move || {
            RNG.with(|rng| {
                let mut rng = rng.borrow_mut();
                let rng: &mut dyn RngCore = &mut **rng;
                loop {
                    let game_num = next_game.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                    if game_num >= num_games {
                        break;
                    }
                    let players = make_players(&game_config, &pickers);
                    let mut game_state = GameState::new(
                        Arc::clone(&game_config),
                        Arc::clone(&lexicon),
                        players,
                        rng,
                    );
                    if play_out(&mut game_state, rng, false).is_none() {
                        break;
                    }
                    if tx.send((game_num, game_state.result())).is_err() {
                        break;
                    }
                }
            })
        }));
    }
    drop(tx);

    let mut csv_out = csv::Writer::from_path(out_path)?;
    csv_out.serialize(("game", "rounds", "player", "score", "won"))?;
    let num_players = game_config.num_players();
    let mut wins = vec![0.0f64; num_players];
    let mut total_scores = vec![0i64; num_players];
    let mut num_done = 0usize;
    for (game_num, result) in rx.iter() {
        for (i, player) in result.players.iter().enumerate() {
            let won = if result.winners.contains(&i) {
                1.0 / result.winners.len() as f64
            } else {
                0.0
            };
            wins[i] += won;
            total_scores[i] += player.score as i64;
            csv_out.serialize((game_num, result.rounds, &player.name, player.score, won))?;
        }
        num_done += 1;
        if num_done % 10 == 0 {
            csv_out.flush()?;
            tracing::info!(num_done, num_games, "progress");
        }
    }
    csv_out.flush()?;
    for thread in threads {
        if let Err(e) = thread.join() {
            std::panic::resume_unwind(e);
        }
    }

    println!("{num_done} games written to {out_path}");
    let names = make_players(&game_config, &pickers);
    for (i, player) in names.iter().enumerate() {
        println!(
            "{}: {} wins ({:.1}%), average {:.2} points",
            player.name,
            wins[i],
            wins[i] * 100.0 / num_done.max(1) as f64,
            total_scores[i] as f64 / num_done.max(1) as f64
        );
    }
    Ok(())
}

fn main() -> error::Returns<()> {
    init_logging();
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        println!(
            "args:
  auto WORDLIST.txt
    watch one game, most-points against mcts
  auto WORDLIST.txt OUT.csv NUM_GAMES PICKER1 PICKER2 [CONFIG.json]
    play many games on all cpus and write the final scores to OUT.csv
pickers: random, longest, most-points, mcts, mcts:ITERATIONS
CONFIG.json: {{ \"game\": {{ \"board_size\": 15, ... }}, \"mcts\": {{ \"iterations\": 30, ... }} }}"
        );
        return Ok(());
    }
    let lexicon = Arc::new(lexicon::Lexicon::from_path(&args[1])?);
    if lexicon.is_empty() {
        return_error!(format!("{}: no words", args[1]));
    }

    if args.len() == 2 {
        let params = mcts::MctsParams::default();
        let pickers = vec![
            ("most-points".to_string(), MovePicker::MostPoints),
            ("mcts".to_string(), MovePicker::Mcts(params)),
        ];
        let game_config = Arc::new(game_config::make_english_game_config());
        return watch_one(game_config, lexicon, &pickers);
    }

    if args.len() < 6 {
        return_error!("need OUT.csv NUM_GAMES PICKER1 PICKER2".into());
    }
    let auto_config = match args.get(6) {
        Some(path) => serde_json::from_str::<AutoConfig>(&std::fs::read_to_string(path)?)?,
        None => AutoConfig::default(),
    };
    let game_config = Arc::new(
        auto_config
            .game
            .unwrap_or_else(game_config::make_english_game_config),
    );
    game_config.check();
    let num_games = args[3].parse::<usize>()?;
    let mut pickers = Vec::with_capacity(2);
    for s in &args[4..6] {
        pickers.push((s.clone(), parse_picker(s, &auto_config.mcts)?));
    }
    tracing::info!(
        num_games,
        board_size = game_config.board_size(),
        picker1 = %args[4],
        picker2 = %args[5],
        "starting"
    );
    run_many(game_config, lexicon, pickers, num_games, &args[2])
}
