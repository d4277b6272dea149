use docopt::Docopt;
use itertools::Itertools;
use log::info;
use mazes::{
    events::{Event, MazeDemo, PathfinderDemo},
    geometry::{Position, Rect},
    grid::Grid,
    player::{Keys, PlayerStep},
    settings::Settings,
    units::EdgesCount,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    convert::TryFrom,
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver maze [--grid-width=<w> --grid-height=<h> --cell-size=<n> --seed=<s> --text-out=<path> --save-edges=<path>]
    mazes_driver pathfind [--width=<w> --height=<h> --player-size=<n> --speed=<n> --block-size=<n> --start-x=<x> --start-y=<y> --target-x=<x> --target-y=<y> --max-ticks=<n>] [--block=<xy>]...

Options:
    -h --help              Show this screen.
    --grid-width=<w>       The maze width in cells [default: 20].
    --grid-height=<h>      The maze height in cells [default: 20].
    --cell-size=<n>        Pixel side length of one maze cell [default: 20].
    --seed=<s>             Seed for the walker's random choices. Random if not given.
    --text-out=<path>      Output file path for a textual rendering of the maze. Printed if not given.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --width=<w>            Pathfinding area width in pixels [default: 800].
    --height=<h>           Pathfinding area height in pixels [default: 600].
    --player-size=<n>      Pixel side length of the player [default: 20].
    --speed=<n>            Pixels moved per step, also the search step size [default: 3].
    --block-size=<n>       Obstacle lattice spacing in pixels [default: 50].
    --start-x=<x>          Player start x [default: 0].
    --start-y=<y>          Player start y [default: 0].
    --target-x=<x>         Target x. The target defaults to the bottom right corner.
    --target-y=<y>         Target y.
    --max-ticks=<n>        Give up after this many ticks [default: 100000].
    --block=<xy>           Click at pixel `x,y` to place (or remove) an obstacle block. Repeatable.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    cmd_maze: bool,
    cmd_pathfind: bool,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_cell_size: u32,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_save_edges: String,
    flag_width: i32,
    flag_height: i32,
    flag_player_size: i32,
    flag_speed: i32,
    flag_block_size: i32,
    flag_start_x: i32,
    flag_start_y: i32,
    flag_target_x: Option<i32>,
    flag_target_y: Option<i32>,
    flag_max_ticks: usize,
    flag_block: Vec<String>,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Demo(::mazes::events::DemoError);
            BadNumber(::std::num::ParseIntError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    if args.cmd_maze {
        run_maze(&args)
    } else if args.cmd_pathfind {
        run_pathfind(&args)
    } else {
        Ok(())
    }
}

fn run_maze(args: &DriverArgs) -> Result<()> {
    let settings = Settings {
        width: pixel_extent(args.flag_grid_width, args.flag_cell_size)?,
        height: pixel_extent(args.flag_grid_height, args.flag_cell_size)?,
        cell_size: args.flag_cell_size,
        ..Settings::default()
    };
    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("maze walk seed {}", seed);

    let mut demo = MazeDemo::new(&settings, XorShiftRng::seed_from_u64(seed))?;
    demo.handle(Event::ToggleWalk)?;
    let mut ticks = 0usize;
    while !demo.is_finished() {
        let _ = demo.tick();
        ticks += 1;
    }
    let EdgesCount(max_passages) = demo.grid().max_passages();
    info!("maze complete in {} ticks with {} of {} possible passages",
          ticks, demo.grid().passages_count(), max_passages);

    let text = format!("{}", demo.grid());
    if args.flag_text_out.is_empty() {
        println!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(demo.grid(), &args.flag_save_edges)?;
    }

    Ok(())
}

fn run_pathfind(args: &DriverArgs) -> Result<()> {
    let settings = Settings {
        width: args.flag_width,
        height: args.flag_height,
        player_size: args.flag_player_size,
        player_speed: args.flag_speed,
        block_size: args.flag_block_size,
        player_start: Position::new(args.flag_start_x, args.flag_start_y),
        ..Settings::default()
    };
    let mut demo = PathfinderDemo::new(&settings)?;

    if let (Some(x), Some(y)) = (args.flag_target_x, args.flag_target_y) {
        demo.set_target(Some(Rect::new(x, y, settings.target_size, settings.target_size)));
    }

    for click in &args.flag_block {
        let pos = parse_position(click)?;
        demo.handle(Event::PlaceObstacle(pos));
    }

    demo.handle(Event::ToggleManual);
    for tick in 0..args.flag_max_ticks {
        if demo.player().reached_target() {
            println!("target reached after {} ticks at {}", tick, demo.player().position());
            return Ok(());
        }
        match demo.tick(Keys::default()) {
            PlayerStep::Followed(pos) => println!("{}", pos),
            PlayerStep::Planned(waypoints) => info!("planned {} waypoints", waypoints),
            PlayerStep::NoPath => {
                println!("no path to the target");
                return Ok(());
            }
            _ => {}
        }
    }

    println!("gave up after {} ticks", args.flag_max_ticks);
    Ok(())
}

/// Screen size in pixels for `cells` cells of `cell_size` pixels each.
fn pixel_extent(cells: usize, cell_size: u32) -> Result<i32> {
    u32::try_from(cells).ok()
        .and_then(|cells| cells.checked_mul(cell_size))
        .and_then(|pixels| i32::try_from(pixels).ok())
        .ok_or_else(|| format!("A maze of {} cells of size {} is too large to lay out in pixels",
                               cells, cell_size).into())
}

fn parse_position(text: &str) -> Result<Position> {
    let mut parts = text.splitn(2, ',');
    match (parts.next(), parts.next()) {
        (Some(x), Some(y)) => Ok(Position::new(x.trim().parse()?, y.trim().parse()?)),
        _ => Err(format!("Expected a pixel position as `x,y`, got `{}`", text).into()),
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {
    let passages = maze_grid.passages();

    let header = format!("{} {}", maze_grid.size(), passages.len());
    let edges = passages.iter()
        .map(|&(src, dst)| format!("{} {}", src + 1, dst + 1));
    let mut graph_data = Some(header).into_iter().chain(edges).join("\n");
    graph_data.push('\n');

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
