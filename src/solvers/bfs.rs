use std::collections::{HashMap, VecDeque};

use crate::maze::{Maze, Position};

/// Breadth-first search from `start` to `goal` across open walls.
///
/// Returns the shortest path including both ends, or `None` if `start` is off the grid or `goal`
/// cannot be reached. Does not touch the maze.
pub fn solve_bfs(maze: &Maze, start: Position, goal: Position) -> Option<Vec<Position>> {
    if !maze.is_valid_position(start) {
        tracing::debug!("[solve] start {:?} is outside the maze", start);
        return None;
    }

    // Maps every reached cell to the cell it was reached from
    let mut parents: HashMap<Position, Position> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            // Backtrack to build the path
            let mut path = vec![current];
            let mut child = current;
            while let Some(&parent) = parents.get(&child) {
                path.push(parent);
                child = parent;
            }
            path.reverse();
            tracing::debug!(
                "[solve] found path of {} steps from {:?} to {:?}",
                path.len() - 1,
                start,
                goal
            );
            return Some(path);
        }

        for neighbor in maze.accessible_neighbors(current) {
            if neighbor != start && !parents.contains_key(&neighbor) {
                parents.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    tracing::debug!("[solve] no path from {:?} to {:?}", start, goal);
    None
}
