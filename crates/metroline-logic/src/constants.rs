//! Tuning constants shared by the engine and the offline tools.

use std::time::Duration;

/// Seats per vehicle.
pub const VEHICLE_CAPACITY: usize = 6;

/// Edge progress gained per elapsed millisecond while in transit.
pub const VEHICLE_SPEED: f32 = 0.0005;

/// Interaction radius of a station, in canvas units.
pub const STATION_RADIUS: f32 = 15.0;

/// Visual radius of a rider, in canvas units.
pub const RIDER_RADIUS: f32 = 5.0;

/// Points deducted by each score-decay tick.
pub const SCORE_DECAY_AMOUNT: i32 = 2;

/// Wall-clock period between score-decay ticks.
pub const SCORE_DECAY_INTERVAL: Duration = Duration::from_secs(10);

/// Points awarded when a rider reaches their destination.
pub const DELIVERY_REWARD: i32 = 10;

/// Logical canvas size the driver renders into.
pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 600.0;

/// Side/bottom margin kept clear when placing stations.
pub const PLACEMENT_MARGIN: f32 = 50.0;

/// Top reserve kept clear for the title and score strip.
pub const PLACEMENT_TOP_MARGIN: f32 = 150.0;

/// Minimum center-to-center distance between randomly placed stations.
pub const MIN_STATION_SPACING: f32 = 100.0;

/// Placement retries before accepting an overlapping position.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// Vehicles spawned by the default setup.
pub const FLEET_SIZE: usize = 3;

/// Riders spawned by the default setup.
pub const RIDER_COUNT: usize = 20;
