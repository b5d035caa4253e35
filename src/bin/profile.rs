use std::time::Instant;

use mazeweave::{config::MazeConfig, logging::init_logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = MazeConfig::from_env();
    config.width = 40;
    config.height = 1000;
    let _guard = init_logging(&config)?;

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);

    let mut rng = config.rng();
    for iter in 0..num_iters {
        let mut maze = config.build_maze()?;

        let started = Instant::now();
        maze.generate(None, &[], config.open_chance, &mut rng);
        let generated = started.elapsed();

        let started = Instant::now();
        let start = (maze.width() / 2, maze.height() / 2);
        let goal = (maze.width() - 1, maze.height() - 1);
        let path = maze.solve(start, goal, true);
        let solved = started.elapsed();

        tracing::info!(
            "[profile] iteration {}: generated in {:?}, solved in {:?}",
            iter,
            generated,
            solved
        );
        println!(
            "{}: generated {}x{} in {:?}, solved in {:?} ({} steps)",
            iter,
            maze.width(),
            maze.height(),
            generated,
            solved,
            path.map_or(0, |p| p.len() - 1)
        );
    }
    Ok(())
}
