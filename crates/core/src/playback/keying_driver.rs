use std::time::Duration;

use crossbeam_channel::{select, Receiver, Sender};

use crate::keying::domain::frame_effect::FrameEffect;
use crate::playback::domain::frame_sink::FrameSink;
use crate::playback::domain::frame_source::FrameSource;
use crate::playback::domain::playback_event::{PlaybackEvent, PlaybackState};

pub type EventSender = Sender<PlaybackEvent>;
pub type EventReceiver = Receiver<PlaybackEvent>;

/// Unbounded channel for feeding lifecycle signals to [`KeyingDriver::run`].
pub fn event_channel() -> (EventSender, EventReceiver) {
    crossbeam_channel::unbounded()
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The driver is stopped; nothing was captured.
    Idle,
    /// One frame was captured, keyed and presented.
    Presented,
    /// The source ran dry; the driver stopped as if the video had ended.
    Exhausted,
}

/// Realtime capture → key → present loop bound to a video's lifecycle.
///
/// `Play` starts the fixed-interval cycle, every other [`PlaybackEvent`]
/// stops it. Ticks run to completion one at a time on the caller's thread;
/// stopping only prevents the next tick.
pub struct KeyingDriver<'e> {
    effect: &'e dyn FrameEffect,
    interval: Duration,
    state: PlaybackState,
    presented: usize,
}

impl<'e> KeyingDriver<'e> {
    pub fn new(effect: &'e dyn FrameEffect, interval: Duration) -> Self {
        Self {
            effect,
            interval,
            state: PlaybackState::Stopped,
            presented: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Frames presented since construction.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Applies a lifecycle signal. A second `Play` while playing is ignored;
    /// every other signal stops the timer and a later `Play` restarts it.
    pub fn handle(&mut self, event: PlaybackEvent) -> PlaybackState {
        match self.state {
            PlaybackState::Stopped if !event.stops() => {
                log::debug!("Keying started ({} ms interval)", self.interval.as_millis());
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Playing if event.stops() => {
                log::debug!(
                    "Keying stopped on {:?} after {} frames",
                    event,
                    self.presented
                );
                self.state = PlaybackState::Stopped;
            }
            PlaybackState::Playing => {
                log::debug!("Play received while already playing; keeping the current timer");
            }
            PlaybackState::Stopped => {}
        }
        self.state
    }

    /// Runs one capture → key → present cycle if playing.
    pub fn tick(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
    ) -> Result<TickOutcome, Box<dyn std::error::Error>> {
        if self.state != PlaybackState::Playing {
            return Ok(TickOutcome::Idle);
        }

        let result = self.cycle(source, sink);
        if result.is_err() {
            self.handle(PlaybackEvent::Error);
        }
        result
    }

    fn cycle(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
    ) -> Result<TickOutcome, Box<dyn std::error::Error>> {
        let Some(mut frame) = source.capture()? else {
            self.handle(PlaybackEvent::Ended);
            return Ok(TickOutcome::Exhausted);
        };
        self.effect.apply(&mut frame)?;
        sink.present(&frame)?;
        self.presented += 1;
        Ok(TickOutcome::Presented)
    }

    /// Ticks on the configured interval while reacting to `events`.
    ///
    /// Stop signals only pause the timer, so the source can be played again
    /// after `Pause`, `Ended`, `Abort` or `Error`. Returns the total number of
    /// presented frames once the source runs dry or `events` disconnects while
    /// stopped; a tick error stops the driver and is returned. A disconnected
    /// channel during playback keeps playing to the end.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
        events: &EventReceiver,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let ticker = crossbeam_channel::tick(self.interval);
        let closed: EventReceiver = crossbeam_channel::never();
        let mut events_open = true;

        loop {
            let inbox = if events_open { events } else { &closed };
            select! {
                recv(inbox) -> msg => match msg {
                    Ok(event) => {
                        self.handle(event);
                    }
                    Err(_) => {
                        events_open = false;
                        if self.state == PlaybackState::Stopped {
                            break;
                        }
                    }
                },
                recv(ticker) -> _ => {
                    if self.tick(source, sink)? == TickOutcome::Exhausted {
                        break;
                    }
                }
            }
        }

        log::info!("Playback finished after {} frames", self.presented);
        Ok(self.presented)
    }
}
