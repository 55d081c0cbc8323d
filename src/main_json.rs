// Copyright (C) 2020-2026 Andy Kurnia.

use tilesmith::{
    alphabet::{Letter, RackTally},
    board::Board,
    display, error, game_config, lexicon, matrix, movegen, play_scorer,
    return_error,
};

// size: board size, defaults to 15.
// board: one string per row, uppercase letters, '-' or '.' for empty.
// rack: uppercase letters.
// count: maximum number of moves returned, highest score first.
#[derive(serde::Deserialize)]
struct Question {
    #[serde(default = "default_size")]
    size: usize,
    #[serde(default)]
    board: Vec<String>,
    rack: String,
    #[serde(rename = "count", default = "default_count")]
    max_gen: usize,
}

fn default_size() -> usize {
    15
}

fn default_count() -> usize {
    15
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_board(question: &Question) -> error::Returns<Board> {
    let n = question.size;
    if n == 0 {
        return_error!("board: size must be positive".into());
    }
    let mut board = Board::new(n);
    if question.board.is_empty() {
        return Ok(board);
    }
    if question.board.len() != n {
        return_error!(format!(
            "board: need {} rows, found {} rows",
            n,
            question.board.len()
        ));
    }
    for (row_num, row) in question.board.iter().enumerate() {
        let cells = row.chars().collect::<Vec<_>>();
        if cells.len() != n {
            return_error!(format!(
                "board row {} (0-based): need {} cols, found {} cols",
                row_num,
                n,
                cells.len()
            ));
        }
        for (col_num, &c) in cells.iter().enumerate() {
            if c == '-' || c == '.' || c == ' ' {
                continue;
            }
            match Letter::try_from(c) {
                Ok(letter) => board.set(matrix::Direction::Across, row_num, col_num, &[letter]),
                Err(_) => {
                    return_error!(format!(
                        "board row {row_num} col {col_num} (0-based): invalid letter {c:?}"
                    ));
                }
            }
        }
    }
    Ok(board)
}

fn main() -> error::Returns<()> {
    init_logging();
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 2 {
        println!(
            "args:
  json WORDLIST.txt
    reads a question from stdin
  json WORDLIST.txt QUESTION.json"
        );
        return Ok(());
    }
    let lexicon = lexicon::Lexicon::from_path(&args[1])?;
    let data = match args.get(2) {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let question = serde_json::from_str::<Question>(&data)?;

    let rack = question
        .rack
        .chars()
        .map(Letter::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let mut board = read_board(&question)?;
    let game_config = game_config::make_english_game_config_with_size(question.size);
    board.refresh_cross_checks(&lexicon);
    display::print_board(&board);

    let moves = movegen::gen_moves(&board, &lexicon, RackTally::new(&rack));
    let mut scored = moves
        .into_iter()
        .map(|m| (play_scorer::compute_score(&board, &game_config, &m), m))
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    println!("found {} moves", scored.len());
    scored.truncate(question.max_gen);

    let mut result = Vec::<serde_json::Value>::with_capacity(scored.len());
    for (score, play) in scored.iter() {
        if let movegen::Move::Place {
            row,
            col,
            direction,
            word,
        } = play
        {
            // row and col are 0-based, the same as the board rows above.
            result.push(serde_json::json!({
                "row": row,
                "col": col,
                "direction": direction,
                "word": word,
                "text": play.fmt_compact(),
                "score": score }));
        }
    }
    let ret = serde_json::to_value(result)?;
    println!("{}", serde_json::to_string_pretty(&ret)?);

    Ok(())
}
