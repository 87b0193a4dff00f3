//! The per-frame step.
//!
//! [`FrameLoop::tick`] runs once per redraw: it checks the stop signal,
//! samples the clock, populates the scene once the assets arrive, advances
//! the orbit controls and renders. The window schedules the next tick.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    assets::PendingAssets,
    config::SceneConfig,
    gfx::{
        camera::CameraRig,
        rendering::traits::SceneRenderer,
        scene::{builder, Scene},
    },
};

/// What the caller should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Cloneable signal that ends the loop at its next tick
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Monotonic time since the loop was created
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

pub struct FrameLoop {
    scene: Scene,
    rig: CameraRig,
    pending: PendingAssets,
    scene_config: SceneConfig,
    rng: StdRng,
    clock: Clock,
    stop: StopHandle,
    frames: u64,
}

impl FrameLoop {
    /// Seeds the scatter from `scene_config.seed`, or from the OS when unset.
    pub fn new(scene: Scene, rig: CameraRig, pending: PendingAssets, scene_config: SceneConfig) -> Self {
        let rng = match scene_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            scene,
            rig,
            pending,
            scene_config,
            rng,
            clock: Clock::new(),
            stop: StopHandle::default(),
            frames: 0,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera_rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn camera_rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn tick<R: SceneRenderer + ?Sized>(&mut self, renderer: &mut R) -> LoopControl {
        if self.stop.is_stopped() {
            return LoopControl::Stop;
        }

        let elapsed = self.clock.elapsed();
        log::trace!("Frame {} at {:.3}s", self.frames, elapsed.as_secs_f32());

        self.poll_assets();
        self.rig.update();

        if let Err(e) = renderer.render(&self.scene, &self.rig.camera) {
            log::error!("Stopping render loop: {}", e);
            self.stop.stop();
            return LoopControl::Stop;
        }

        self.frames += 1;
        LoopControl::Continue
    }

    fn poll_assets(&mut self) {
        match self.pending.poll() {
            None => {}
            Some(Ok(assets)) => {
                if let Err(e) =
                    builder::populate(&mut self.scene, assets, &self.scene_config, &mut self.rng)
                {
                    log::warn!("Could not build scene text, leaving the scene empty: {}", e);
                }
            }
            Some(Err(e)) => {
                log::warn!("Failed to load assets, leaving the scene empty: {}", e);
            }
        }
    }
}
