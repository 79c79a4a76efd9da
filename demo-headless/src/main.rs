use clap::Parser;
use comet_trail_core::{
    CometMarker, FixedStep, PointCloudFrame, RenderSink, TrailConfig, TrailSimulation, Vec3,
    WallClock,
};
use nalgebra::Point3;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Comet trail demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "comet-trail-demo")]
#[command(about = "Headless comet particle-trail simulation", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 1200)]
    frames: u64,

    /// Fixed frame rate used for the simulation step
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Use wall-clock frame deltas instead of a fixed step
    #[arg(long)]
    realtime: bool,

    /// Report interval in frames
    #[arg(short, long, default_value_t = 60)]
    report_every: u64,

    /// Particle pool capacity
    #[arg(short, long, default_value_t = 10_000)]
    capacity: usize,

    /// Particles spawned per frame
    #[arg(short, long, default_value_t = 5)]
    gen_rate: usize,

    /// Spawn position jitter half-width
    #[arg(long, default_value_t = 0.1)]
    position_jitter: f32,

    /// Heading jitter half-width
    #[arg(long, default_value_t = 0.3)]
    velocity_jitter: f32,

    /// Spawn velocity scale
    #[arg(long, default_value_t = 0.1)]
    velocity_scale: f32,

    /// Minimum particle lifetime in seconds
    #[arg(long, default_value_t = 0.1)]
    ttl_min: f32,

    /// Maximum particle lifetime in seconds
    #[arg(long, default_value_t = 0.5)]
    ttl_max: f32,

    /// Per-frame velocity damping factor (0-1)
    #[arg(short, long, default_value_t = 0.90)]
    damping: f32,

    /// Seed for particle jitter (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Render sink that keeps summary statistics instead of drawing
#[derive(Default)]
struct StatsSink {
    frames: u64,
    visible: usize,
    peak_visible: usize,
    comet: Vec3,
    comet_radius: f32,
    bounds: Option<(Point3<f32>, Point3<f32>)>,
}

impl RenderSink for StatsSink {
    fn draw_points(&mut self, frame: &PointCloudFrame<'_>) {
        self.frames += 1;
        self.visible = 0;
        self.bounds = None;

        for position in frame.visible_positions() {
            self.visible += 1;
            let p = Point3::from(*position);
            self.bounds = Some(match self.bounds {
                Some((min, max)) => (min.inf(&p), max.sup(&p)),
                None => (p, p),
            });
        }
        self.peak_visible = self.peak_visible.max(self.visible);
    }

    fn place_comet(&mut self, comet: &CometMarker) {
        self.comet = comet.position;
        self.comet_radius = comet.radius;
    }
}

impl StatsSink {
    fn report(&self) {
        print!(
            "Frame {:>6}: comet ({:>6.2}, {:>6.2}, {:>6.2}) r={:.2}, {:>5} visible",
            self.frames,
            self.comet.x,
            self.comet.y,
            self.comet.z,
            self.comet_radius,
            self.visible
        );
        if let Some((min, max)) = self.bounds {
            println!(
                ", extent ({:.2}, {:.2}, {:.2})",
                max.x - min.x,
                max.y - min.y,
                max.z - min.z
            );
        } else {
            println!();
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Comet Trail Demo ===\n");

    let config = TrailConfig {
        capacity: args.capacity,
        gen_rate: args.gen_rate,
        position_jitter: args.position_jitter,
        velocity_jitter: args.velocity_jitter,
        velocity_scale: args.velocity_scale,
        ttl_min: args.ttl_min,
        ttl_max: args.ttl_max,
        damping: args.damping,
        seed: args.seed,
        ..Default::default()
    };

    let mut sim = match TrailSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Pool: {} slots, {} particles/frame, {} keyframes",
        args.capacity,
        args.gen_rate,
        sim.pather().keyframes().len()
    );

    let mut sink = StatsSink::default();
    let report_every = args.report_every.max(1);

    if args.realtime {
        println!("Running {} frames against the wall clock\n", args.frames);
        for dt in WallClock::new().take(args.frames as usize) {
            run_frame(&mut sim, &mut sink, dt, report_every);
        }
    } else {
        if !(args.fps.is_finite() && args.fps > 0.0) {
            eprintln!("Invalid fps: {}", args.fps);
            return ExitCode::FAILURE;
        }
        println!("Running {} frames at {:.1} fps\n", args.frames, args.fps);
        for dt in FixedStep::from_fps(args.fps, args.frames) {
            run_frame(&mut sim, &mut sink, dt, report_every);
        }
    }

    println!("\n=== Summary ===");
    println!("Frames: {}", sim.frame_count());
    println!("Live particles: {}", sim.pool().live_count());
    println!("Peak visible: {}", sink.peak_visible);

    ExitCode::SUCCESS
}

fn run_frame(sim: &mut TrailSimulation, sink: &mut StatsSink, dt: f32, report_every: u64) {
    let report = sim.step(dt);
    sim.render(sink);

    if (report.frame + 1) % report_every == 0 {
        sink.report();
    }
}
