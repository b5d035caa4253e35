use rand::Rng;

use super::OpenChance;
use crate::maze::{Direction, DirectionSet, Maze, Position, Region};

/// Carves passages through `region` with a randomized depth-first search, backtracking along a
/// stack of positions whenever the current cell has nowhere left to go.
///
/// Cells outside `region`, inside any of `exemptions`, or already visited are never carved into.
/// After each successful step, `open_chance` decides whether to also knock down the wall towards
/// one more already visited neighbor, adding a loop to the maze.
pub fn braided_backtrack<R: Rng>(
    maze: &mut Maze,
    region: &Region,
    exemptions: &[Region],
    open_chance: OpenChance,
    rng: &mut R,
) {
    let valid = maze.valid_cell_set(region, exemptions);
    if valid.is_empty() {
        tracing::debug!("[generate] no cells to carve in {}", region);
        return;
    }

    // Initialize the stack with a random starting point
    let start = valid[rng.random_range(0..valid.len())];
    maze.visit(start);
    let mut stack = vec![start];
    let mut braided = 0usize;

    while let Some(&current) = stack.last() {
        let mut candidates = DirectionSet::full();
        loop {
            // Every direction failed, so go back to the previous cell
            let Some(direction) = candidates.choose(rng) else {
                stack.pop();
                break;
            };

            let Some(target) = trailblaze(maze, current, direction, region, exemptions) else {
                candidates.remove(direction);
                continue;
            };
            stack.push(target);

            // The extra wall is drawn from the directions not yet ruled out for this cell
            if open_chance.roll(rng) && braid(maze, current, &candidates, rng) {
                braided += 1;
            }
            break;
        }
    }

    tracing::debug!(
        "[generate] carved {} from {:?} with {} extra openings",
        region,
        start,
        braided
    );
}

/// Knocks down the wall between `from` and its neighbor in `direction` and visits the neighbor.
///
/// Returns the neighbor, or `None` when it is off the grid, exempt, outside `region` or already
/// visited.
fn trailblaze(
    maze: &mut Maze,
    from: Position,
    direction: Direction,
    region: &Region,
    exemptions: &[Region],
) -> Option<Position> {
    let target = maze.neighbor(from, direction)?;
    if exemptions.iter().any(|exemption| exemption.contains(target)) {
        return None;
    }
    if maze.is_visited(target) || !region.contains(target) {
        return None;
    }
    maze.set_wall(from, direction, false);
    maze.visit(target);
    Some(target)
}

/// Opens the wall from `from` towards a random candidate direction if the neighbor there has
/// already been visited. Returns whether a wall was opened.
fn braid<R: Rng>(maze: &mut Maze, from: Position, candidates: &DirectionSet, rng: &mut R) -> bool {
    let Some(direction) = candidates.choose(rng) else {
        return false;
    };
    match maze.neighbor(from, direction) {
        Some(neighbor) if maze.is_visited(neighbor) => {
            maze.set_wall(from, direction, false);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::get_rng,
        maze::tests::{assert_wall_symmetry, count_edges, reachable},
    };

    #[test]
    fn test_perfect_maze_is_spanning_tree() {
        for seed in 0..10 {
            let mut rng = get_rng(Some(seed));
            let mut maze = Maze::new(9, 7, 2).unwrap();
            maze.generate(None, &[], OpenChance::NEVER, &mut rng);
            assert_wall_symmetry(&maze);

            let region = maze.region().clone();
            let cell_count = region.to_set().len();
            assert_eq!(count_edges(&maze, &region), cell_count - 1);
            assert_eq!(reachable(&maze, &region, (0, 0)).len(), cell_count);
            assert!(maze.cells().all(|c| c.is_visited()));
        }
    }

    #[test]
    fn test_sub_region_leaves_outside_untouched() {
        let mut rng = get_rng(Some(1));
        let mut maze = Maze::new(10, 10, 2).unwrap();
        let region = Region::with_size((2, 3), (5, 4)).unwrap();
        maze.generate(Some(&region), &[], OpenChance::NEVER, &mut rng);
        assert_wall_symmetry(&maze);

        let cell_count = region.to_set().len();
        assert_eq!(count_edges(&maze, &region), cell_count - 1);
        assert_eq!(reachable(&maze, &region, (2, 3)).len(), cell_count);
        for cell in maze.cells().filter(|c| !region.contains(c.position())) {
            assert!(cell.is_enclosed());
            assert!(!cell.is_visited());
        }
    }

    #[test]
    fn test_region_past_the_edge_is_clipped() {
        let mut rng = get_rng(Some(2));
        let mut maze = Maze::new(6, 4, 2).unwrap();
        let region = Region::with_size((3, 1), (20, 20)).unwrap();
        maze.generate(Some(&region), &[], OpenChance::NEVER, &mut rng);
        assert_wall_symmetry(&maze);
        let clipped = Region::with_endpoint((3, 1), (5, 3));
        assert_eq!(count_edges(&maze, &clipped), clipped.to_set().len() - 1);
        assert_eq!(maze.cells().filter(|c| c.is_visited()).count(), 9);
    }

    #[test]
    fn test_exemptions_are_avoided() {
        let mut rng = get_rng(Some(4));
        let mut maze = Maze::new(12, 12, 2).unwrap();
        let exemptions = [
            Region::with_size((1, 6), (10, 1)).unwrap(),
            Region::with_size((0, 0), (3, 3)).unwrap(),
        ];
        maze.generate(None, &exemptions, OpenChance::ALWAYS, &mut rng);
        assert_wall_symmetry(&maze);
        for cell in maze.cells() {
            let exempt = exemptions.iter().any(|e| e.contains(cell.position()));
            assert_eq!(cell.is_visited(), !exempt, "at {:?}", cell.position());
            if exempt {
                assert!(cell.is_enclosed());
            }
        }
    }

    #[test]
    fn test_braiding_adds_loops_without_disconnecting() {
        let mut rng = get_rng(Some(8));
        let mut maze = Maze::new(15, 15, 2).unwrap();
        maze.generate(None, &[], OpenChance::ALWAYS, &mut rng);
        assert_wall_symmetry(&maze);

        let region = maze.region().clone();
        let cell_count = region.to_set().len();
        let edges = count_edges(&maze, &region);
        assert!(edges >= cell_count - 1);
        assert!(edges > cell_count - 1, "a 15x15 braided maze should contain loops");
        assert_eq!(reachable(&maze, &region, (7, 7)).len(), cell_count);
    }

    #[test]
    fn test_regenerating_next_to_a_maze_keeps_it_connected() {
        let mut rng = get_rng(Some(13));
        let mut maze = Maze::new(10, 5, 2).unwrap();
        let left = Region::with_endpoint((0, 0), (4, 4));
        let right = Region::with_endpoint((5, 0), (9, 4));
        maze.generate(Some(&left), &[], OpenChance::NEVER, &mut rng);
        let before = count_edges(&maze, &left);

        maze.generate(Some(&right), &[], OpenChance::ALWAYS, &mut rng);
        assert_wall_symmetry(&maze);
        assert!(count_edges(&maze, &left) >= before);
        assert_eq!(reachable(&maze, &left, (0, 0)).len(), 25);
        assert_eq!(reachable(&maze, &right, (9, 4)).len(), 25);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let build = |seed| {
            let mut rng = get_rng(Some(seed));
            let mut maze = Maze::new(8, 8, 2).unwrap();
            maze.generate(None, &[], OpenChance::DEFAULT, &mut rng);
            maze.render()
        };
        assert_eq!(build(21), build(21));
    }

    #[test]
    fn test_scenario_generate_then_solve() {
        let mut rng = get_rng(Some(99));
        let mut maze = Maze::new(5, 5, 2).unwrap();
        maze.generate(None, &[], OpenChance::NEVER, &mut rng);

        let region = maze.region().clone();
        assert_eq!(count_edges(&maze, &region), 24);
        assert_eq!(reachable(&maze, &region, (0, 0)).len(), 25);

        let path = maze.solve((0, 0), (4, 4), false).unwrap();
        let steps = path.len() - 1;
        assert!((8..=24).contains(&steps));
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(4, 4)));
        for pair in path.windows(2) {
            assert!(maze.accessible_neighbors(pair[0]).any(|n| n == pair[1]));
        }
    }
}
