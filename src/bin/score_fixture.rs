use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use nba_edge::engine::{self, EngineConfig};
use nba_edge::export::ExportRow;
use nba_edge::fake_slate;
use nba_edge::logging;
use nba_edge::snapshot::Matchup;

#[derive(Debug, serde::Deserialize)]
struct SlateFile {
    #[serde(default)]
    date: Option<String>,
    games: Vec<Matchup>,
}

fn load_slate(arg: Option<String>) -> anyhow::Result<SlateFile> {
    // `fake:<seed>:<games>` scores a synthetic slate instead of a file.
    if let Some(spec) = arg.as_deref().and_then(|a| a.strip_prefix("fake:")) {
        let mut parts = spec.split(':');
        let seed = parts.next().unwrap_or("1").parse::<u64>().context("fake seed")?;
        let games = parts.next().unwrap_or("10").parse::<usize>().context("fake game count")?;
        return Ok(SlateFile {
            date: None,
            games: fake_slate::fake_slate(seed, games),
        });
    }

    let path = arg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/slate.json"));
    let raw = fs::read_to_string(&path).with_context(|| format!("read slate {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse slate {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_logging();

    let config = EngineConfig::from_env()?;
    let slate = load_slate(std::env::args().nth(1))?;
    tracing::info!(
        date = slate.date.as_deref().unwrap_or("-"),
        games = slate.games.len(),
        factor_set = config.factor_set.name(),
        "scoring slate"
    );

    // No network, no persistence: score what was given and print one row per game.
    let pool = engine::build_slate_pool();
    let results = engine::with_slate_pool(pool.as_ref(), || engine::score_slate(&config, &slate.games));

    for (game, result) in slate.games.iter().zip(results) {
        match result {
            Ok(score) => println!("{}", serde_json::to_string(&ExportRow::from_score(&score))?),
            Err(err) => eprintln!(
                "{} @ {}: insufficient data to score this game ({err})",
                game.away.team, game.home.team
            ),
        }
    }
    Ok(())
}
