//! Terminal demo: random weighted terrain, one agent, a few turns of movement.
//!
//! Run: cargo run --bin strider-demo -- --seed 7 --turns 4
//!
//! Set `RUST_LOG=debug` to watch the planner.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strider_core::{Cell, Vec2};
use strider_march::{MarchConfig, MoveEvent, Mover, PlanOutcome};
use strider_paths::{BLOCKED, CostModel, GridCostModel, cell_at, travel_cost};

#[derive(Debug, Parser)]
#[command(name = "strider-demo", about = "Plan and walk a route across random terrain")]
struct Args {
    /// TOML file with movement settings; missing keys take defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 24)]
    width: u32,
    #[arg(long, default_value_t = 12)]
    height: u32,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Start cell as `COL,ROW`.
    #[arg(long, value_parser = parse_cell, default_value = "0,0")]
    from: Cell,
    /// Destination cell as `COL,ROW`; defaults to the far corner.
    #[arg(long, value_parser = parse_cell)]
    to: Option<Cell>,
    /// Maximum number of turns to simulate.
    #[arg(long, default_value_t = 8)]
    turns: u32,
    /// Override the allowance restored every turn.
    #[arg(long)]
    moves: Option<f64>,
}

fn parse_cell(s: &str) -> Result<Cell, String> {
    let (c, r) = s
        .split_once(',')
        .ok_or_else(|| format!("expected COL,ROW, got {s:?}"))?;
    let col = c.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let row = r.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok(Cell::new(col, row))
}

fn load_config(args: &Args) -> Result<MarchConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => toml::from_str::<MarchConfig>(&fs::read_to_string(path)?)?,
        None => MarchConfig::default(),
    };
    if let Some(moves) = args.moves {
        config.moves_per_turn = moves;
    }
    config.validate()?;
    Ok(config)
}

/// Roughly one cell in seven is blocked; the rest cost 1 to 3. The two
/// endpoints are always open ground.
fn terrain(args: &Args, goal: Cell) -> Result<GridCostModel, Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let grid = GridCostModel::from_fn(args.width, args.height, |c| {
        if c == args.from || c == goal {
            1.0
        } else if rng.random_bool(0.15) {
            BLOCKED
        } else {
            rng.random_range(1..=3) as f64
        }
    })?;
    Ok(grid)
}

fn render(grid: &GridCostModel, mover: &Mover) -> String {
    let cell_size = mover.config().cell_size;
    let overlay = mover.overlay();
    let affordable = overlay.as_ref().map_or(&[][..], |o| &o.affordable[..]);
    let deferred = overlay.as_ref().map_or(&[][..], |o| &o.deferred[..]);
    let touches = |points: &[Vec2], c: Cell| points.iter().any(|p| cell_at(*p, cell_size) == c);
    let marker = overlay.as_ref().map(|o| cell_at(o.marker.pos, cell_size));

    let mut out = String::new();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let c = Cell::new(col, row);
            let ch = if c == mover.cell() {
                '@'
            } else if marker == Some(c) {
                '*'
            } else if touches(affordable, c) {
                'o'
            } else if touches(deferred, c) {
                'x'
            } else {
                match grid.cost_at(c) {
                    Ok(Some(cost)) => char::from_digit(cost as u32, 10).unwrap_or('?'),
                    _ => '#',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Plan toward `goal`. Returns why there is nothing to walk, if so.
fn plan_route(
    grid: &GridCostModel,
    mover: &mut Mover,
    goal: Cell,
) -> Result<Option<String>, Box<dyn Error>> {
    let from = mover.cell();
    match mover.plan_to(grid, goal) {
        Ok(PlanOutcome::Planned) => Ok(None),
        Ok(PlanOutcome::AlreadyThere) => Ok(Some(format!("already at {goal}"))),
        Err(e) if e.is_no_path() => Ok(Some(format!("no route from {from} to {goal}"))),
        Err(e) => Err(e.into()),
    }
}

fn walk_turn(grid: &GridCostModel, mover: &mut Mover) -> Result<MoveEvent, Box<dyn Error>> {
    if !mover.begin_moving(grid)? {
        return Ok(MoveEvent::Idle);
    }
    loop {
        match mover.update(grid)? {
            MoveEvent::Moving | MoveEvent::Stepped(_) => {}
            ev => return Ok(ev),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(&args)?;
    let goal = args.to.unwrap_or(Cell::new(
        args.width as i32 - 1,
        args.height as i32 - 1,
    ));
    let grid = terrain(&args, goal)?;

    let mut mover = Mover::at_cell(args.from, config)?;
    if let Some(reason) = plan_route(&grid, &mut mover, goal)? {
        println!("{}", render(&grid, &mover));
        println!("{reason}");
        return Ok(());
    }
    if let Some(route) = mover.route() {
        let waypoints = route.waypoints(config.cell_size);
        println!(
            "route {} -> {goal}: {} cells, search cost {:.2}, travel cost {:.2}",
            args.from,
            route.len(),
            route.total_cost(),
            travel_cost(&waypoints, &grid, config.cell_size)?
        );
    }

    for turn in 1..=args.turns {
        println!("turn {turn}, {:.2} moves", mover.moves_left());
        println!("{}", render(&grid, &mover));
        let event = walk_turn(&grid, &mut mover)?;
        println!(
            "  -> {event:?} at {}, {:.2} moves left",
            mover.cell(),
            mover.moves_left()
        );
        if matches!(event, MoveEvent::Arrived(_)) {
            println!("{}", render(&grid, &mover));
            return Ok(());
        }
        mover.new_turn(&grid)?;
    }
    log::info!("stopped after {} turns short of {goal}", args.turns);
    Ok(())
}
