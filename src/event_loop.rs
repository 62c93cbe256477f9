//! Tracking loops: the interactive terminal view and the headless reporter.

use crossterm::event::Event;
use futures_util::{Stream, StreamExt};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::camera::{Frame, FrameSource};
use crate::error::AppError;
use crate::input::{handle_key_event, KeyAction};
use crate::renderer::{render_waiting, Renderer};
use crate::session::Session;
use crate::vision::{FrameAnalysis, Tracker};

/// Frame tick, roughly 30 fps.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Counts gathered while a loop runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopSummary {
    /// Frames run through the tracker
    pub frames: u64,
    /// Frames in which an object was tracked
    pub tracked: u64,
}

impl LoopSummary {
    fn record(&mut self, analysis: &FrameAnalysis) {
        self.frames += 1;
        if analysis.detection.tracked().is_some() {
            self.tracked += 1;
        }
    }
}

/// Where the interactive loop reads events from and draws to.
pub struct Screen<'a, E, W> {
    /// Terminal events, normally a crossterm `EventStream`
    pub events: &'a mut E,
    pub out: &'a mut W,
    /// Initial `(cols, rows)`; resize events replace it
    pub size: (u16, u16),
}

/// Interactive loop over terminal events and the frame tick.
///
/// Expects `screen.out` to be a terminal in raw mode on the alternate
/// screen. Returns when a quit key is pressed, the event stream ends, or
/// the source stops producing frames.
pub async fn run_interactive<S, E, W>(
    source: &mut S,
    session: &mut Session,
    screen: Screen<'_, E, W>,
    interval: Duration,
) -> Result<LoopSummary, AppError>
where
    S: FrameSource,
    E: Stream<Item = io::Result<Event>> + Unpin,
    W: Write,
{
    let Screen { events, out, size } = screen;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut renderer = Renderer::new();
    let (mut cols, mut rows) = size;
    let mut current: Option<(Frame, FrameAnalysis)> = None;
    let mut summary = LoopSummary::default();

    loop {
        let mut redraw = false;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => match handle_key_event(key, session) {
                        KeyAction::Quit => break,
                        KeyAction::Handled => {
                            // Re-run the pipeline so filter edits show on the current frame
                            if let Some((frame, analysis)) = current.as_mut() {
                                *analysis = session.tracker.process(frame)?;
                            }
                            redraw = true;
                        }
                        KeyAction::Ignored => {}
                    },
                    Some(Ok(Event::Resize(c, r))) => {
                        cols = c;
                        rows = r;
                        redraw = true;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(AppError::Terminal(e)),
                    None => break,
                }
            }

            _ = ticker.tick() => {
                if let Some(frame) = source.latest_frame() {
                    let analysis = session.tracker.process(&frame)?;
                    summary.record(&analysis);
                    current = Some((frame, analysis));
                    redraw = true;
                } else if current.is_none() {
                    redraw = true;
                }
                if source.is_exhausted() {
                    log::warn!("Frame source stopped after {} frames", summary.frames);
                    break;
                }
            }
        }

        if redraw {
            let text = match &current {
                Some((frame, analysis)) => renderer.render(session, frame, analysis, cols, rows),
                None => render_waiting(session, cols, rows),
            };
            out.write_all(text.as_bytes())
                .and_then(|_| out.flush())
                .map_err(AppError::Terminal)?;
        }
    }

    Ok(summary)
}

/// Settings for [`run_headless`].
#[derive(Debug, Clone, Copy)]
pub struct HeadlessOptions {
    pub interval: Duration,
    /// Stop after this many processed frames
    pub max_frames: Option<u64>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            interval: FRAME_INTERVAL,
            max_frames: None,
        }
    }
}

/// Track without a terminal, writing `x,y area` to `out` for every frame
/// with a tracked object.
///
/// Ends when `stop` is set, after `max_frames`, or when the source is done.
pub async fn run_headless<S: FrameSource, W: Write>(
    source: &mut S,
    tracker: &Tracker,
    options: HeadlessOptions,
    stop: &AtomicBool,
    out: &mut W,
) -> Result<LoopSummary, AppError> {
    let mut ticker = tokio::time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut summary = LoopSummary::default();

    loop {
        if stop.load(Ordering::SeqCst) {
            log::info!("Stop requested");
            break;
        }
        if options.max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }

        ticker.tick().await;

        if let Some(frame) = source.latest_frame() {
            let analysis = tracker.process(&frame)?;
            summary.record(&analysis);
            if let Some(obj) = analysis.detection.tracked() {
                writeln!(out, "{},{} {}", obj.x, obj.y, obj.area)?;
                out.flush()?;
            } else {
                log::trace!("{}", analysis.detection.status_message());
            }
        }

        if source.is_exhausted() {
            log::info!("Frame source finished");
            break;
        }
    }

    Ok(summary)
}
