use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use clap::Parser;
use log::info;

use maze_steps::grids::DEFAULT_DIMS;
use maze_steps::{new_generator, Generator, GeneratorKind};

mod renderer;
use renderer::Renderer;

/// Watch a maze being generated one step at a time.
#[derive(Parser, Debug)]
#[command(name = "maze-steps", version)]
struct Args {
    /// Generator to run: `random-dfs` or `wilson`
    #[arg(short, long, default_value_t = GeneratorKind::Wilson)]
    algorithm: GeneratorKind,

    /// Maze width in cells
    #[arg(long, default_value_t = DEFAULT_DIMS.0)]
    width: usize,

    /// Maze height in cells
    #[arg(long, default_value_t = DEFAULT_DIMS.1)]
    height: usize,

    /// Seed for a reproducible maze
    #[arg(short, long)]
    seed: Option<u64>,

    /// Redraw the maze while it is generated instead of printing the result once
    #[arg(long)]
    animate: bool,

    /// Generation speed while animating, defaults to one step per maze cell every second
    #[arg(long)]
    steps_per_second: Option<f64>,

    /// Time between two frames
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Frames to keep drawing after the maze is finished
    #[arg(long, default_value_t = 0)]
    final_frames: u32,
}

pub struct State {
    pub maze_generator: Box<dyn Generator>,
    pub steps: usize,
    pub running: bool,

    // time not yet spent on steps
    backlog: Duration,
    tick: Duration,
}

impl State {
    fn new(maze_generator: Box<dyn Generator>, steps_per_second: f64) -> Self {
        Self {
            maze_generator,
            steps: 0,
            running: true,
            backlog: Duration::from_secs(0),
            tick: Duration::from_secs_f64(1.0 / steps_per_second),
        }
    }

    // spends the elapsed time on as many steps as it pays for
    fn update(&mut self, elapsed: Duration) {
        self.backlog += elapsed;

        while self.running && self.backlog >= self.tick {
            self.backlog -= self.tick;
            self.running = self.maze_generator.step();
            if self.running {
                self.steps += 1;
            }
        }
    }
}

fn animate(state: &mut State, frame: Duration, mut final_frames: u32) -> Result<()> {
    let mut renderer = Renderer::new(io::stdout(), true);
    let mut last = Instant::now();

    loop {
        renderer.draw(&state.maze_generator.snapshot())?;

        if !state.running {
            if final_frames == 0 {
                break;
            }
            final_frames -= 1;
        }

        thread::sleep(frame);
        let now = Instant::now();
        state.update(now - last);
        last = now;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let maze_generator = new_generator(args.algorithm, args.width, args.height, args.seed)?;
    let steps_per_second = args
        .steps_per_second
        .unwrap_or((args.width * args.height) as f64);
    ensure!(
        steps_per_second.is_finite() && steps_per_second > 0.0,
        "steps per second must be a positive number, got {}",
        steps_per_second
    );

    let mut state = State::new(maze_generator, steps_per_second);
    let started = Instant::now();

    if args.animate {
        animate(
            &mut state,
            Duration::from_millis(args.frame_ms),
            args.final_frames,
        )?;
    } else {
        while state.maze_generator.step() {
            state.steps += 1;
        }
        state.running = false;
        Renderer::new(io::stdout(), false).draw(&state.maze_generator.snapshot())?;
    }

    info!(
        "{} maze of {}x{} cells done in {} steps ({:?})",
        args.algorithm,
        args.width,
        args.height,
        state.steps,
        started.elapsed()
    );

    Ok(())
}
