//! Fixed-cadence tick driver
//!
//! Calls [`LifeGrid::advance`] once per tick and hands the new generation to a
//! [`Renderer`] whenever the grid reports a change. The grid itself knows
//! nothing about time.

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::game_of_life::{CellSet, LifeGrid};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Consumer of published generations
pub trait Renderer {
    fn render(&mut self, generation: u64, snapshot: &CellSet) -> Result<()>;
}

/// Outcome of a driver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u64,
    pub final_population: usize,
    pub frames: u64,
    pub coalesced_ticks: u64,
    pub extinct: bool,
}

/// Longest tick accepted; longer intervals are clamped to it
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub struct Driver {
    interval: Duration,
    stop_when_extinct: bool,
}

impl Driver {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.min(MAX_TICK_INTERVAL),
            stop_when_extinct: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(Duration::from_millis(config.tick_interval_ms))
            .stop_when_extinct(config.stop_when_extinct)
    }

    pub fn stop_when_extinct(mut self, stop: bool) -> Self {
        self.stop_when_extinct = stop;
        self
    }

    /// Render the current state, then advance up to `generations` times at
    /// the configured cadence
    pub fn run<R: Renderer>(
        &self,
        grid: &mut LifeGrid,
        generations: u64,
        renderer: &mut R,
    ) -> Result<RunSummary> {
        info!(
            generations,
            interval_ms = self.interval.as_millis() as u64,
            population = grid.population(),
            "starting simulation"
        );

        let mut summary = RunSummary {
            generations: 0,
            final_population: grid.population(),
            frames: 0,
            coalesced_ticks: 0,
            extinct: false,
        };

        grid.take_dirty();
        renderer.render(grid.generation(), &grid.snapshot())?;
        summary.frames += 1;

        let mut deadline = Instant::now() + self.interval;
        for _ in 0..generations {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }

            grid.advance();
            summary.generations += 1;

            if grid.take_dirty() {
                renderer.render(grid.generation(), &grid.snapshot())?;
                summary.frames += 1;
            }

            if self.stop_when_extinct && grid.is_empty() {
                summary.extinct = true;
                info!(generation = grid.generation(), "population died out");
                break;
            }

            let (next, skipped) = schedule_next(deadline, Instant::now(), self.interval);
            if skipped > 0 {
                warn!(
                    skipped,
                    generation = grid.generation(),
                    "advance overran tick interval, coalescing ticks"
                );
                summary.coalesced_ticks += skipped;
            }
            deadline = next;
        }

        summary.final_population = grid.population();
        debug!(?summary, "simulation finished");
        Ok(summary)
    }
}

/// Next tick deadline after `deadline`, collapsing every tick that already
/// passed by `now` into one immediate tick. Returns the deadline and the
/// number of ticks dropped.
pub fn schedule_next(deadline: Instant, now: Instant, interval: Duration) -> (Instant, u64) {
    let next = deadline + interval;
    if interval.is_zero() || now < next {
        return (next, 0);
    }

    let behind = (now - next).as_nanos() / interval.as_nanos();
    let skipped = u64::try_from(behind).unwrap_or(u64::MAX);
    let factor = u32::try_from(skipped).unwrap_or(u32::MAX);
    (next + interval.saturating_mul(factor), skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{library, Cell};

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(u64, CellSet)>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, generation: u64, snapshot: &CellSet) -> Result<()> {
            self.frames.push((generation, snapshot.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_run_renders_every_generation() {
        let mut grid = LifeGrid::new();
        grid.seed(0, 0, &library::get("blinker").unwrap()).unwrap();
        let mut renderer = RecordingRenderer::default();

        let summary = Driver::new(Duration::ZERO)
            .run(&mut grid, 4, &mut renderer)
            .unwrap();

        assert_eq!(summary.generations, 4);
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.final_population, 3);
        assert!(!summary.extinct);
        assert!(!grid.is_dirty());

        let generations: Vec<u64> = renderer.frames.iter().map(|(g, _)| *g).collect();
        assert_eq!(generations, vec![0, 1, 2, 3, 4]);
        assert_eq!(renderer.frames[0].1, renderer.frames[2].1);
        assert!(renderer.frames[1].1.contains(&Cell::new(0, -1)));
    }

    #[test]
    fn test_stop_when_extinct() {
        let mut grid = LifeGrid::from_cells([Cell::new(0, 0), Cell::new(5, 5)]);
        let mut renderer = RecordingRenderer::default();

        let summary = Driver::new(Duration::ZERO)
            .stop_when_extinct(true)
            .run(&mut grid, 10, &mut renderer)
            .unwrap();

        assert!(summary.extinct);
        assert_eq!(summary.generations, 1);
        assert_eq!(summary.final_population, 0);
    }

    #[test]
    fn test_huge_interval_is_clamped() {
        let mut grid = LifeGrid::from_cells([Cell::new(0, 0)]);
        let mut renderer = RecordingRenderer::default();

        let summary = Driver::new(Duration::MAX)
            .run(&mut grid, 0, &mut renderer)
            .unwrap();

        assert_eq!(summary.frames, 1);
        assert_eq!(summary.generations, 0);
    }

    #[test]
    fn test_run_waits_for_ticks() {
        let mut grid = LifeGrid::from_cells([
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(0, 1),
            Cell::new(1, 1),
        ]);
        let mut renderer = RecordingRenderer::default();
        let start = Instant::now();

        Driver::new(Duration::from_millis(10))
            .run(&mut grid, 3, &mut renderer)
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_schedule_next_on_time() {
        let start = Instant::now();
        let interval = Duration::from_millis(10);

        let (next, skipped) = schedule_next(start, start + Duration::from_millis(4), interval);
        assert_eq!(next, start + interval);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_schedule_next_coalesces() {
        let start = Instant::now();
        let interval = Duration::from_millis(10);

        // Work finished at 35ms: ticks at 10 and 20 are dropped, the one at 30 runs immediately
        let (next, skipped) = schedule_next(start, start + Duration::from_millis(35), interval);
        assert_eq!(skipped, 2);
        assert_eq!(next, start + Duration::from_millis(30));
    }
}
