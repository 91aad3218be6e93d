use anyhow::Context;
use mazer::{compare, read_grid, solve, Grid, Point};

fn print_steps(grid: &Grid) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            print!("{:3} ", grid.cell(Point { row, col }).step());
        }
        println!();
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: mazer <maze.txt> [dfs|bfs|vs]")?;
    let mode = args.next().unwrap_or_else(|| "dfs".to_string());

    let mut grid = read_grid(&path)?;
    println!("{}", grid);

    if mode == "vs" {
        let comparison = compare(&mut grid)?;
        println!("dfs: {:.3}ms", comparison.dfs.elapsed_ms());
        println!("bfs: {:.3}ms", comparison.bfs.elapsed_ms());
    } else {
        let report = solve(&mut grid, mode.parse()?)?;
        print_steps(&grid);
        if report.solved {
            println!(
                "{} found a {}-cell path in {:.3}ms",
                report.algorithm,
                report.path_len,
                report.elapsed_ms()
            );
        } else {
            println!(
                "{} explored the maze in {:.3}ms without reaching the end",
                report.algorithm,
                report.elapsed_ms()
            );
        }
    }

    Ok(())
}
