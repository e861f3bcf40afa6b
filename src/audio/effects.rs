use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

#[derive(Clone, Copy, Debug)]
pub enum Cue {
    Correct,
    Wrong,
    Celebrate,
}

impl Cue {
    fn file_name(self) -> &'static str {
        match self {
            Cue::Correct => "correct.wav",
            Cue::Wrong => "wrong.wav",
            Cue::Celebrate => "celebrate.wav",
        }
    }
}

/// Fire-and-forget answer cues. Disabled entirely when no sound directory is
/// configured; playback errors are swallowed so a missing file or player never
/// interrupts a round.
pub struct SoundEffects {
    sound_dir: Option<PathBuf>,
    command: Vec<String>,
}

impl SoundEffects {
    pub fn new(sound_dir: Option<PathBuf>, command: Vec<String>) -> Self {
        Self { sound_dir, command }
    }

    pub fn play(&self, cue: Cue) {
        let Some(dir) = &self.sound_dir else {
            return;
        };
        let Some((program, args)) = self.command.split_first() else {
            return;
        };
        let path = dir.join(cue.file_name());
        if !path.exists() {
            return;
        }
        let spawned = Command::new(program)
            .args(args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Ok(mut child) = spawned {
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
    }
}
