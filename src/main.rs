use std::{io::Stdout, time::Duration};

use crossterm::{
    cursor, execute,
    terminal::{self, ClearType},
};
use mazeweave::{Maze, MazeError, OpenChance, Region, config::MazeConfig, logging::init_logging};
use rand::rngs::StdRng;

/// File the last drawn maze is written to.
const SNAPSHOT_FILE: &str = "maze.txt";
/// Pause between animation frames.
const FRAME_TIME: Duration = Duration::from_millis(250);
/// Number of frames played by the animated scenarios.
const FRAMES: usize = 20;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = MazeConfig::from_env();
    let _guard = init_logging(&config)?;
    let mut rng = config.rng();
    let mut stdout = std::io::stdout();

    println!(
        "Maze {}x{}, open chance {}. Set MAZEWEAVE_* variables to change.",
        config.width, config.height, config.open_chance
    );
    let mut input = String::new();
    loop {
        println!("Select a scenario (empty line to quit):");
        println!("1. Full maze");
        println!("2. Protected zones, solved corner to corner");
        println!("3. Wandering window");
        println!("4. Shifting quadrants");
        input.clear();
        std::io::stdin().read_line(&mut input)?;

        let mut maze = config.build_maze()?;
        let result = match input.trim() {
            "" => break,
            "1" => full_maze(&mut maze, &config, &mut rng, &mut stdout),
            "2" => protected_zones(&mut maze, &config, &mut rng, &mut stdout),
            "3" => wandering_window(&mut maze, &config, &mut rng, &mut stdout),
            "4" => shifting_quadrants(&mut maze, &mut rng, &mut stdout),
            _ => {
                eprintln!("Invalid selection.");
                continue;
            }
        };
        if let Err(err) = result {
            eprintln!("{}", err);
            continue;
        }
        maze.save(SNAPSHOT_FILE)?;
        println!("Saved to {}", SNAPSHOT_FILE);
    }
    Ok(())
}

/// Clears the terminal and draws the maze.
fn show(maze: &Maze, stdout: &mut Stdout) -> std::io::Result<()> {
    execute!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
    )?;
    maze.display(stdout)
}

fn full_maze(
    maze: &mut Maze,
    config: &MazeConfig,
    rng: &mut StdRng,
    stdout: &mut Stdout,
) -> Result<(), MazeError> {
    maze.generate(None, &[], config.open_chance, rng);
    show(maze, stdout)?;
    Ok(())
}

/// Four quadrants meeting at the center, with the corners and the center kept open.
struct Layout {
    quadrants: [Region; 4],
    zones: [Region; 5],
}

impl Layout {
    /// Smallest side that leaves the corner zones and the center zone apart.
    const MIN_SIDE: usize = 4;

    fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width < Self::MIN_SIDE || height < Self::MIN_SIDE {
            return Err(MazeError::MazeTooSmall {
                width,
                height,
                min_width: Self::MIN_SIDE,
                min_height: Self::MIN_SIDE,
            });
        }
        let (w, h) = (width - 1, height - 1);
        let center = (width / 2 - 1, height / 2 - 1);
        Ok(Layout {
            quadrants: [
                Region::with_endpoint((0, 0), center),
                Region::with_endpoint((0, h), (center.0, center.1 + 1)),
                Region::with_endpoint((w, 0), (center.0 + 1, center.1)),
                Region::with_endpoint((w, h), (center.0 + 1, center.1 + 1)),
            ],
            zones: [
                Region::with_endpoint((0, 0), (1, 1)),
                Region::with_endpoint((0, h), (1, h - 1)),
                Region::with_endpoint((w, 0), (w - 1, 1)),
                Region::with_endpoint((w, h), (w - 1, h - 1)),
                Region::with_size(center, (2, 2))?,
            ],
        })
    }

    /// Opens every protected zone and labels it.
    fn open_zones(&self, maze: &mut Maze) {
        for zone in &self.zones {
            maze.open(Some(zone), &[], true);
            maze.set_region_content(zone, "H");
        }
    }
}

fn protected_zones(
    maze: &mut Maze,
    config: &MazeConfig,
    rng: &mut StdRng,
    stdout: &mut Stdout,
) -> Result<(), MazeError> {
    let layout = Layout::new(maze.width(), maze.height())?;
    for quadrant in &layout.quadrants {
        maze.generate(Some(quadrant), &layout.zones, config.open_chance, rng);
    }
    layout.open_zones(maze);

    let goal = (maze.width() - 1, maze.height() - 1);
    let solved = maze.solve((0, 0), goal, true);
    show(maze, stdout)?;
    match solved {
        Some(path) => println!("Solved in {} steps.", path.len() - 1),
        None => println!("No path found to the goal."),
    }
    Ok(())
}

fn wandering_window(
    maze: &mut Maze,
    config: &MazeConfig,
    rng: &mut StdRng,
    stdout: &mut Stdout,
) -> Result<(), MazeError> {
    let size = (maze.width().min(6), maze.height().min(6));
    let mut window = Region::with_size((0, 0), size)?;
    maze.generate(Some(&window), &[], config.open_chance, rng);
    maze.set_content(window.position(), "P");

    for _ in 0..FRAMES {
        show(maze, stdout)?;
        std::thread::sleep(FRAME_TIME);

        maze.reset(Some(&window), &[]);
        let (x, y) = window.position();
        let next = if x + 1 < maze.width() {
            (x + 1, y)
        } else if y + 1 < maze.height() {
            (0, y + 1)
        } else {
            (0, 0)
        };
        window = window.moved_to(next)?;
        maze.generate(Some(&window), &[], config.open_chance, rng);
        maze.set_content(next, "P");
        tracing::debug!("[driver] window moved to {}", window);
    }
    show(maze, stdout)?;
    Ok(())
}

fn shifting_quadrants(
    maze: &mut Maze,
    rng: &mut StdRng,
    stdout: &mut Stdout,
) -> Result<(), MazeError> {
    let layout = Layout::new(maze.width(), maze.height())?;
    for quadrant in &layout.quadrants {
        maze.generate(Some(quadrant), &layout.zones, OpenChance::DEFAULT, rng);
    }
    layout.open_zones(maze);
    let goal = (maze.width() - 1, maze.height() - 1);

    for frame in 0..FRAMES {
        let solved = maze.solve((0, 0), goal, true);
        show(maze, stdout)?;
        match solved {
            Some(path) => println!("Round {}: solved in {} steps.", frame, path.len() - 1),
            None => println!("Round {}: no path found.", frame),
        }
        std::thread::sleep(FRAME_TIME);

        let quadrant = &layout.quadrants[frame % layout.quadrants.len()];
        maze.reset(Some(quadrant), &[]);
        maze.generate(Some(quadrant), &layout.zones, OpenChance::ALWAYS, rng);
        layout.open_zones(maze);
    }
    Ok(())
}
