mod config;
mod logger;

use anyhow::Context;
use clap::Parser;
use torus_snake::game::Game;
use torus_snake::grid::Grid;
use torus_snake::terminal::Terminal;

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();
    logger::init(args.log_file.as_deref(), &args.log_level)?;
    tracing::info!(seed = ?args.seed, mute = args.mute, "starting");

    let terminal =
        Terminal::enter(Grid::default(), args.mute).context("failed to set up the terminal")?;
    let mut game = Game::new(args.rng(), terminal)?;
    game.run()?;

    let (score, level) = (game.state().score(), game.state().level());
    drop(game);
    println!("Game Over! Final score: {score}, level: {level}");
    Ok(())
}
