use crossword::{Event, GameSession, KeyToken, Outcome, Puzzle, HINT_LIMIT};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;

// Simulated typing speed and a safety cap on the number of key presses.
const MS_PER_KEY: u64 = 1_500;
const MAX_KEYSTROKES: u32 = 10_000;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 4 {
        eprintln!("Usage: {} [seed] [mistake_rate] [max_hints]", args[0]);
        std::process::exit(1);
    }
    let mut rng = match args.get(1) {
        Some(seed) => SmallRng::seed_from_u64(seed.parse()?),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };
    let mistake_rate: f64 = match args.get(2) {
        Some(rate) => rate.parse()?,
        None => 0.1,
    };
    if !(0.0..1.0).contains(&mistake_rate) {
        anyhow::bail!("mistake_rate must be in [0, 1)");
    }
    let max_hints: u32 = match args.get(3) {
        Some(n) => n.parse()?,
        None => HINT_LIMIT,
    };

    let puzzle = Puzzle::sample().map_err(|e| anyhow::anyhow!(e))?;
    let mut clock: u64 = 0;
    let mut session = GameSession::new(puzzle, clock);
    let mut keystrokes: u32 = 0;
    let mut hints_requested: u32 = 0;
    let mut result = None;

    while result.is_none() && keystrokes < MAX_KEYSTROKES {
        clock += MS_PER_KEY;
        keystrokes += 1;
        let (row, col) = session.cursor().position();
        let cell = *session
            .puzzle()
            .grid()
            .cell_at(row, col)
            .map_err(|e| anyhow::anyhow!(e))?;
        let Some(solution) = cell.solution() else {
            anyhow::bail!("cursor left the open cells at ({}, {})", row, col);
        };

        // An already correct cell is skipped by retyping it.
        let event = if cell.is_correct() {
            Event::Key(KeyToken::Letter(solution))
        } else if hints_requested < max_hints && rng.random_bool(0.05) {
            hints_requested += 1;
            Event::Hint
        } else if rng.random_bool(mistake_rate) {
            let wrong = loop {
                let c = char::from(b'A' + rng.random_range(0..26u8));
                if c != solution {
                    break c;
                }
            };
            Event::Key(KeyToken::Letter(wrong))
        } else {
            Event::Key(KeyToken::Letter(solution))
        };

        if let Outcome::Solved(completion) = session.handle(event, clock) {
            result = Some(completion);
        }
    }

    let output = json!({
        "solved": result.is_some(),
        "score": result.map(|c| c.score).unwrap_or(0),
        "errors": session.error_count(),
        "hints": session.hints().used(),
        "keystrokes": keystrokes,
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}
