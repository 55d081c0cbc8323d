// Copyright (C) 2020-2026 Andy Kurnia.

use rand::prelude::*;
use std::sync::Arc;
use tilesmith::{
    display, error, game_config,
    game_state::{GamePlayer, GameState},
    lexicon, mcts, move_picker,
    move_picker::MovePicker,
    movegen::Move,
    return_error,
};

static HELP: &str = "commands:
  move ROW,COL,a|d,WORD  place WORD (ROW and COL in hex, as on the board)
  skip                   pass the turn
  hint [N]               show the N best scoring moves (default 5)
  board                  show the board, scores and your rack
  new                    start another game
  source FILE            run commands from FILE
  help                   this text
  exit                   quit";

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

struct Session {
    game_config: Arc<game_config::GameConfig>,
    lexicon: Arc<lexicon::Lexicon>,
    opponent: MovePicker,
    game_state: GameState,
    rng: Box<dyn RngCore>,
}

impl Session {
    fn new_game(
        game_config: &Arc<game_config::GameConfig>,
        lexicon: &Arc<lexicon::Lexicon>,
        opponent: &MovePicker,
        rng: &mut dyn RngCore,
    ) -> GameState {
        let mut players = vec![
            GamePlayer::new("you", MovePicker::Human),
            GamePlayer::new("computer", opponent.clone()),
        ];
        players.truncate(game_config.num_players());
        GameState::new(Arc::clone(game_config), Arc::clone(lexicon), players, &mut *rng)
    }

    fn restart(&mut self) {
        self.game_state = Self::new_game(
            &self.game_config,
            &self.lexicon,
            &self.opponent,
            &mut *self.rng,
        );
        display::print_game(&self.game_state);
    }

    // Lets the computer move until a person has to answer or the game ends.
    fn advance(&mut self) {
        loop {
            if self.game_state.check_game_ended() {
                self.print_result();
                return;
            }
            let Some(play) = self.game_state.pick_move(&mut *self.rng) else {
                display::print_game(&self.game_state);
                return;
            };
            match self.game_state.play(&play) {
                Ok(outcome) => println!("{}", outcome.description),
                Err(err) => panic!("computer picked an illegal move: {err}"),
            }
        }
    }

    fn print_result(&self) {
        display::print_game(&self.game_state);
        println!("game over after {} rounds", self.game_state.round);
        let winners = self.game_state.winners();
        match winners.len() {
            1 => println!("{} wins", self.game_state.players[winners[0]].name),
            _ => println!("tie"),
        }
    }

    fn human_play(&mut self, play: &Move) {
        if self.game_state.is_over() {
            println!("game is over, new for another");
            return;
        }
        match self.game_state.play(play) {
            Ok(outcome) => {
                println!("{}", outcome.description);
                self.advance();
            }
            Err(err) => println!("{err}"),
        }
    }

    fn hint(&mut self, n: usize) {
        if self.game_state.is_over() {
            println!("game is over");
            return;
        }
        let moves = self.game_state.legal_moves();
        if moves.is_empty() {
            println!("no moves, skip");
            return;
        }
        let num_moves = moves.len();
        for play in move_picker::top_moves(&self.game_state, moves, n) {
            println!("{:>4} {}", self.game_state.score(&play), play.fmt_compact());
        }
        println!("({num_moves} moves)");
    }
}

fn main() -> error::Returns<()> {
    init_logging();
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        println!(
            "args:
  shell WORDLIST.txt [mcts|most-points|longest|random]"
        );
        return Ok(());
    }
    let lexicon = Arc::new(lexicon::Lexicon::from_path(&args[1])?);
    let opponent = match args.get(2).map(|s| s.as_str()) {
        None | Some("mcts") => MovePicker::Mcts(mcts::MctsParams::default()),
        Some("most-points") => MovePicker::MostPoints,
        Some("longest") => MovePicker::Longest,
        Some("random") => MovePicker::Random,
        Some(s) => {
            return_error!(format!("invalid opponent {s:?}"));
        }
    };
    let game_config = Arc::new(game_config::make_english_game_config());
    let mut rng: Box<dyn RngCore> = Box::new(rand_chacha::ChaCha20Rng::from_os_rng());
    let game_state = Session::new_game(&game_config, &lexicon, &opponent, &mut *rng);
    let mut session = Session {
        game_config,
        lexicon,
        opponent,
        game_state,
        rng,
    };
    display::print_game(&session.game_state);

    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = &source {
                println!("{filename}:{line_num}> {line}");
            }
            let strings = match shell_words::split(&line) {
                Ok(strings) => strings,
                Err(err) => {
                    match &source {
                        Some((filename, line_num)) => {
                            tracing::warn!(%filename, line_num, "skipped: {err}")
                        }
                        None => println!("Bad quoting: {err:?}"),
                    }
                    continue;
                }
            };
            if strings.is_empty() {
                continue;
            }
            match strings[0].as_str() {
                "help" => {
                    println!("{HELP}");
                }
                "exit" => {
                    break;
                }
                "board" => {
                    display::print_game(&session.game_state);
                }
                "new" => {
                    session.restart();
                }
                "skip" => {
                    session.human_play(&Move::Skip);
                }
                "move" | "m" => {
                    if strings.len() > 1 {
                        match strings[1..].join(" ").parse::<Move>() {
                            Ok(play) => session.human_play(&play),
                            Err(err) => println!("{err}"),
                        }
                    } else {
                        println!("need a move, like move 7,7,a,WORD");
                    }
                }
                "hint" => {
                    let n = match strings.get(1).map(|s| s.parse::<usize>()) {
                        None => 5,
                        Some(Ok(n)) => n,
                        Some(Err(err)) => {
                            println!("{err}");
                            continue;
                        }
                    };
                    session.hint(n);
                }
                "source" => {
                    if strings.len() > 1 {
                        match std::fs::read_to_string(&strings[1]) {
                            Ok(whole_file) => {
                                let v = cmd_stack.len();
                                for (line_num, line) in whole_file.lines().enumerate() {
                                    cmd_stack.push((
                                        line.to_string(),
                                        Some((strings[1].clone(), line_num + 1)),
                                    ));
                                }
                                cmd_stack[v..].reverse();
                            }
                            Err(err) => {
                                println!("cannot open file: {err:?}");
                            }
                        }
                    } else {
                        println!("need another arg");
                    }
                }
                _ => {
                    println!("invalid input, help for help");
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {err:?}");
                    break;
                }
            }
        }
    }

    Ok(())
}
