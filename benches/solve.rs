use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mazer::{solve, Algorithm, Direction, Grid, Point};

/// An open maze with endpoints in opposite corners.
fn open_maze(size: usize) -> Grid {
    let mut grid = Grid::blank(size, size);
    grid.set_start(Some(Point { row: 0, col: 0 }));
    grid.set_end(Some(Point {
        row: size - 1,
        col: size - 1,
    }));
    grid
}

/// A serpentine maze: each row is walled off from the next except for a
/// single gap on alternating sides, forcing one long corridor.
fn corridor_maze(size: usize) -> Grid {
    let mut grid = open_maze(size);
    for row in 0..size - 1 {
        let gap = if row % 2 == 0 { size - 1 } else { 0 };
        for col in 0..size {
            if col != gap {
                let id = grid.cell(Point { row, col }).wall(Direction::Down);
                grid.toggle_wall(id);
            }
        }
    }
    grid
}

fn bench_maze(c: &mut Criterion, name: &str, mut grid: Grid, algorithm: Algorithm) {
    c.bench_function(name, |b| {
        b.iter(|| {
            let report = solve(black_box(&mut grid), black_box(algorithm)).unwrap();
            assert!(report.solved);
        })
    });
}

pub fn open_small(c: &mut Criterion) {
    bench_maze(c, "open_8_dfs", open_maze(8), Algorithm::Dfs);
    bench_maze(c, "open_8_bfs", open_maze(8), Algorithm::Bfs);
}

pub fn open_large(c: &mut Criterion) {
    bench_maze(c, "open_64_dfs", open_maze(64), Algorithm::Dfs);
    bench_maze(c, "open_64_bfs", open_maze(64), Algorithm::Bfs);
}

pub fn corridor(c: &mut Criterion) {
    bench_maze(c, "corridor_32_dfs", corridor_maze(32), Algorithm::Dfs);
    bench_maze(c, "corridor_32_bfs", corridor_maze(32), Algorithm::Bfs);
}

criterion_group!(benches, open_small, open_large, corridor);
criterion_main!(benches);
