use glam::Vec2;
use grid_navigation::coords::cell_center;
use grid_navigation::loader::parse_ascii_map;
use grid_navigation::{Agent, Navigator, NavigatorConfig, OccupancyGrid, Point, TickOutcome};
use rand::prelude::*;

const MAX_TICKS: usize = 10_000;

fn assert_unit_or_zero(direction: Vec2) {
    let length = direction.length();
    assert!(
        length == 0.0 || (length - 1.0).abs() < 1e-4,
        "direction {direction} has length {length}"
    );
}

/// Ticks until the agent is idle, checking the waypoint count never grows and the direction is
/// always a unit or zero vector. Returns the number of ticks taken.
fn run_to_completion(navigator: &mut Navigator) -> usize {
    let mut remaining = navigator.agent().remaining_waypoints();
    for tick in 0..MAX_TICKS {
        if navigator.agent().is_idle() {
            return tick;
        }
        assert_unit_or_zero(navigator.agent().direction());
        navigator.tick();
        let now = navigator.agent().remaining_waypoints();
        assert!(now <= remaining);
        remaining = now;
    }
    panic!("agent did not finish its route within {MAX_TICKS} ticks");
}

#[test]
fn waypoints_drain_to_goal() {
    let _ = env_logger::builder().is_test(true).try_init();
    let grid = parse_ascii_map(
        "
..........
..#####...
......#...
..#...#.##
..#.......
",
    )
    .unwrap();
    let mut navigator = Navigator::new(grid, NavigatorConfig::default());
    let goal = Point::new(9, 4);
    let path = navigator.request_route(goal).clone();
    assert!(!path.is_empty());
    assert_eq!(navigator.agent().remaining_waypoints(), path.len());

    run_to_completion(&mut navigator);
    let end = navigator.agent().position();
    let center = cell_center(goal, 32.0);
    assert!((end.x - center.x).abs() <= 2.0 && (end.y - center.y).abs() <= 2.0);
    assert!(navigator.path().is_empty());
}

/// Random routes on random maps always end within tolerance of the goal center, also for agents
/// that move much further per tick than the tolerance.
#[test]
fn random_routes_complete() {
    let mut rng = StdRng::seed_from_u64(7);
    let configs = [
        NavigatorConfig::default(),
        NavigatorConfig::default()
            .with_speed(11.0)
            .with_waypoint_tolerance(1.0),
    ];
    for config in configs {
        let tolerance = config.waypoint_tolerance;
        for _ in 0..100 {
            let blocked: Vec<bool> = (0..12 * 12).map(|_| rng.gen_bool(0.3)).collect();
            let grid =
                OccupancyGrid::new(12, 12, |x, y| (x, y) == (1, 1) || !blocked[y * 12 + x]);
            let goal = Point::new(rng.gen_range(0..12), rng.gen_range(0..12));
            let mut navigator = Navigator::new(grid, config.clone());
            if navigator.request_route(goal).is_empty() {
                assert!(navigator.agent().is_idle());
                continue;
            }
            run_to_completion(&mut navigator);
            let offset = (navigator.agent().position() - cell_center(goal, 32.0)).abs();
            assert!(offset.x <= tolerance && offset.y <= tolerance);
            assert_eq!(navigator.agent().current_cell(), goal);
        }
    }
}

/// An agent within tolerance of its next waypoint retires it on the next tick and heads for the
/// one after, without skipping it.
#[test]
fn waypoint_adjacent_agent() {
    let mut agent = Agent::with_params(Vec2::new(81.5, 17.0), 2.0, 2.0, 32.0);
    agent.set_path(&[Point::new(2, 0), Point::new(3, 0), Point::new(4, 0)]);
    assert_eq!(agent.tick(), TickOutcome::WaypointReached { remaining: 2 });
    assert_eq!(agent.waypoints().next(), Some(&Vec2::new(112.0, 16.0)));
    assert!(agent.direction().x > 0.99);
}

#[test]
fn empty_path_keeps_agent_still() {
    let mut agent = Agent::new(&NavigatorConfig::default());
    agent.set_path(&[]);
    assert!(agent.is_idle());
    assert_eq!(agent.direction(), Vec2::ZERO);
    for _ in 0..10 {
        assert_eq!(agent.tick(), TickOutcome::Idle);
    }
    assert_eq!(agent.position(), Vec2::new(60.0, 60.0));
}

/// A new request mid-route drops the old waypoints but continues from the current position.
#[test]
fn new_request_supersedes_route() {
    let grid = OccupancyGrid::new(10, 10, |_, _| true);
    let mut navigator = Navigator::new(grid, NavigatorConfig::default());
    navigator.request_route(Point::new(8, 1));
    for _ in 0..40 {
        navigator.tick();
    }
    let position = navigator.agent().position();
    let path = navigator.request_route(Point::new(1, 8)).clone();
    assert_eq!(navigator.agent().position(), position);
    assert_eq!(path.first(), Some(&navigator.agent().current_cell()));
    assert_eq!(navigator.agent().remaining_waypoints(), path.len());

    run_to_completion(&mut navigator);
    assert_eq!(navigator.agent().current_cell(), Point::new(1, 8));
}

#[test]
fn blocked_corridor_has_no_route() {
    let grid = parse_ascii_map("..#..").unwrap();
    let config = NavigatorConfig::default().with_spawn(Vec2::new(16.0, 16.0));
    let mut navigator = Navigator::new(grid, config);
    assert!(navigator.request_route(Point::new(4, 0)).is_empty());
    assert!(navigator.agent().is_idle());
    assert!(navigator.path_overlay().is_empty());
    assert_eq!(navigator.tick(), TickOutcome::Idle);
}
