//! Hold → transition playback state machine.
//!
//! The sequencer owns only timing and frame-index state. It never touches
//! cells or geometry; each [`tick`](Sequencer::tick) emits at most one
//! [`SequencerCommand`] telling the owner what to do with the cell store.

use bevy::prelude::*;

/// What the owner must do with the cell store after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequencerCommand {
    /// A hold elapsed: load `frame` and retarget every cell toward it.
    /// The sequencer has already entered the transition phase.
    Retarget {
        /// Index of the frame to load.
        frame: usize,
    },
    /// Mid-transition: blend all cells at progress `t` (clamped to `[0, 1]`,
    /// easing is applied by the cell store).
    Blend {
        /// Raw transition progress.
        t: f32,
    },
    /// The transition completed: snap all cells to their targets.
    Snap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Holding,
    Transitioning,
}

/// Drives which frame is displayed and how far the blend toward it has come.
///
/// Pausing freezes the machine in place; [`play`](Sequencer::play) resumes
/// whichever phase was active. Non-looping playback stops by itself after the
/// last frame's hold and stays parked there.
#[derive(Debug)]
pub struct Sequencer {
    frame_count: usize,
    frame_hold_duration: f32,
    transition_duration: f32,
    looping: bool,
    current_frame: usize,
    phase: Phase,
    hold_timer: f32,
    progress: f32,
    playing: bool,
}

impl Sequencer {
    /// Creates a sequencer over `frame_count` frames, parked on frame 0.
    pub fn new(
        frame_count: usize,
        frame_hold_duration: f32,
        transition_duration: f32,
        looping: bool,
        playing: bool,
    ) -> Self {
        Self {
            frame_count,
            frame_hold_duration: frame_hold_duration.max(0.0),
            transition_duration: transition_duration.max(0.0),
            looping,
            current_frame: 0,
            phase: Phase::Holding,
            hold_timer: 0.0,
            progress: 0.0,
            playing,
        }
    }

    /// Adopts new timing/loop settings without disturbing playback position.
    pub fn set_timing(&mut self, frame_hold_duration: f32, transition_duration: f32, looping: bool) {
        self.frame_hold_duration = frame_hold_duration.max(0.0);
        self.transition_duration = transition_duration.max(0.0);
        self.looping = looping;
    }

    /// Advances by `dt` seconds and reports what the owner should do.
    ///
    /// Returns `None` while idle or mid-hold.
    pub fn tick(&mut self, dt: f32) -> Option<SequencerCommand> {
        if !self.playing || self.frame_count == 0 {
            return None;
        }

        match self.phase {
            Phase::Holding => {
                self.hold_timer += dt;
                if self.hold_timer < self.frame_hold_duration {
                    return None;
                }

                let mut next = self.current_frame + 1;
                if next >= self.frame_count {
                    if self.looping {
                        next = 0;
                    } else {
                        // End of a non-looping sequence: park, don't error.
                        info!("pixel heightmap playback finished at frame {}", self.current_frame);
                        self.playing = false;
                        return None;
                    }
                }

                self.current_frame = next;
                self.phase = Phase::Transitioning;
                self.progress = 0.0;
                Some(SequencerCommand::Retarget { frame: next })
            }
            Phase::Transitioning => {
                if self.transition_duration > 0.0 {
                    self.progress += dt / self.transition_duration;
                } else {
                    self.progress = 1.0;
                }

                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    self.phase = Phase::Holding;
                    self.hold_timer = 0.0;
                    Some(SequencerCommand::Snap)
                } else {
                    Some(SequencerCommand::Blend { t: self.progress })
                }
            }
        }
    }

    /// Starts or resumes playback in whatever phase was active.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Freezes playback in place.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stops playback and rewinds to frame 0. The owner is expected to load
    /// frame 0 with an immediate snap.
    pub fn stop(&mut self) {
        self.playing = false;
        self.phase = Phase::Holding;
        self.hold_timer = 0.0;
        self.progress = 0.0;
        self.current_frame = 0;
    }

    /// Jumps to `frame` without blending, preserving the play/pause flag.
    /// The owner is expected to load the frame with an immediate snap.
    pub fn force_frame(&mut self, frame: usize) {
        debug_assert!(frame < self.frame_count);
        self.current_frame = frame;
        self.phase = Phase::Holding;
        self.hold_timer = 0.0;
        self.progress = 0.0;
    }

    /// Index of the frame currently displayed (or being blended toward).
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Whether playback is advancing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether a blend toward the current frame is underway.
    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    /// Number of frames the sequencer cycles through.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}
