mod bfs;

pub use bfs::solve_bfs;
