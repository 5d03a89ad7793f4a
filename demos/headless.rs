use grid_navigation::loader::parse_ascii_map;
use grid_navigation::{Navigator, NavigatorConfig, Point, TickOutcome};

// Sends the agent around a wall on a small map and prints its progress.
// Run with RUST_LOG=debug to see every retired waypoint.
fn main() {
    env_logger::init();
    let grid = parse_ascii_map(
        "
..........
..#####...
......#...
..#...#.##
..#.......
",
    )
    .expect("map is well formed");
    println!("{}", grid);

    let mut navigator = Navigator::new(grid, NavigatorConfig::default());
    let goal = Point::new(9, 4);
    let path = navigator.request_route(goal);
    println!("Route to {}: {:?}", goal, path);

    let mut ticks = 0;
    loop {
        ticks += 1;
        match navigator.tick() {
            TickOutcome::Idle => break,
            TickOutcome::Moving => {}
            TickOutcome::WaypointReached { remaining } => println!(
                "Tick {ticks}: reached {} ({remaining} waypoints left)",
                navigator.agent().current_cell()
            ),
            TickOutcome::PathComplete => {
                println!("Tick {ticks}: arrived at {}", navigator.agent().position())
            }
        }
    }
}
