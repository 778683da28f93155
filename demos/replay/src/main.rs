use geodash::{default_config, init_logging, Completion, Duration, FrameOutput, Globe};
use tracing::{event, info, warn, Level};

/// Fixed 60 Hz step so a replay is identical run to run.
const DT: Duration = Duration::from_micros(16_667);
const MAX_FRAMES_PER_STEP: u32 = 5_000;
const SEED: u64 = 7;

#[derive(Debug, Clone, Copy)]
enum Step {
    Fly,
    ZoomIn,
    ZoomOut,
    Reset,
}

struct Replay {
    globe: Globe,
    dump_frames: bool,
    frames: u64,
}

impl Replay {
    /// Runs frames until `want` completes. Returns the completing frame.
    fn run_until(&mut self, want: Completion) -> Option<FrameOutput> {
        for _ in 0..MAX_FRAMES_PER_STEP {
            let out = self.globe.update_with_dt(DT);
            self.frames += 1;
            if self.dump_frames {
                match serde_json::to_string(&out) {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!("frame {} not serialized: {e}", out.frame),
                }
            }
            if let Some(done) = out.completion {
                if let Completion::Abandoned(phase) = done.completion {
                    warn!(?phase, frame = done.frame, "phase abandoned by stall guard");
                }
                if done.completion.outcome() == want {
                    return Some(out);
                }
            }
        }
        warn!(?want, "gave up waiting");
        None
    }

    fn step(&mut self, anchor: &str, step: Step) {
        let (accepted, want) = match step {
            Step::Fly => (
                self.globe.go_to_anchor(anchor).map_err(|e| warn!("{e}")).is_ok(),
                Completion::Arrived,
            ),
            Step::ZoomIn => (self.globe.zoom_in(), Completion::ZoomedIn),
            Step::ZoomOut => (self.globe.zoom_out(), Completion::ZoomedOut),
            Step::Reset => {
                self.globe.reset_view();
                // nothing to fly back to when no flight ever happened
                (!self.globe.controller().is_settled(), Completion::Arrived)
            }
        };
        if !accepted {
            warn!(?step, anchor, "step refused");
            return;
        }

        if let Some(out) = self.run_until(want) {
            let distance = self.globe.camera().distance();
            info!(
                ?step,
                anchor,
                frame = out.frame,
                distance,
                markers = out.markers.len(),
                controls = out.controls_enabled,
                "step done"
            );
        }
    }
}

pub fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let dump_frames = args.iter().any(|a| a == "--frames");
    let mut anchors: Vec<String> = args.into_iter().filter(|a| !a.starts_with("--")).collect();

    let config = default_config();
    if anchors.is_empty() {
        anchors = config.anchors.iter().map(|a| a.name.clone()).collect();
    }

    let globe = match Globe::with_seed(&config, SEED) {
        Ok(globe) => globe,
        Err(e) => {
            event!(Level::ERROR, "cannot build globe: {e}");
            std::process::exit(1);
        }
    };
    let mut replay = Replay {
        globe,
        dump_frames,
        frames: 0,
    };
    replay.globe.set_viewport(1280.0, 720.0);
    replay.globe.set_auto_rotate(false);

    for anchor in &anchors {
        for step in [Step::Fly, Step::ZoomIn, Step::ZoomOut, Step::Reset] {
            replay.step(anchor, step);
        }
    }

    info!(frames = replay.frames, anchors = anchors.len(), "replay finished");
}
