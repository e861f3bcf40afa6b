use std::collections::HashMap;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::audio::queue::{ClipId, ClipPlayer};
use crate::event::AppEvent;

/// Plays clips through an external player command (e.g. `mpv --really-quiet`).
/// A watcher thread per clip reports process exit back through the app event
/// channel; `halt` kills the process so stop is immediate.
pub struct ProcessPlayer {
    command: Vec<String>,
    tx: Sender<AppEvent>,
    children: HashMap<ClipId, Arc<Mutex<Child>>>,
}

impl ProcessPlayer {
    pub fn new(command: Vec<String>, tx: Sender<AppEvent>) -> Self {
        Self {
            command,
            tx,
            children: HashMap::new(),
        }
    }

    fn reap_finished(&mut self) {
        self.children.retain(|_, child| {
            let mut child = match child.lock() {
                Ok(child) => child,
                Err(_) => return false,
            };
            !matches!(child.try_wait(), Ok(Some(_)))
        });
    }
}

impl ClipPlayer for ProcessPlayer {
    fn begin(&mut self, id: ClipId, url: &str) -> bool {
        self.reap_finished();

        let Some((program, args)) = self.command.split_first() else {
            return false;
        };
        let child = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let child = match child {
            Ok(child) => Arc::new(Mutex::new(child)),
            Err(_) => return false,
        };

        self.children.insert(id, Arc::clone(&child));
        let tx = self.tx.clone();
        thread::spawn(move || {
            loop {
                {
                    let mut child = match child.lock() {
                        Ok(child) => child,
                        Err(_) => return,
                    };
                    match child.try_wait() {
                        Ok(Some(_)) | Err(_) => break,
                        Ok(None) => {}
                    }
                }
                thread::sleep(Duration::from_millis(50));
            }
            let _ = tx.send(AppEvent::ClipFinished(id));
        });
        true
    }

    fn halt(&mut self, id: ClipId) {
        if let Some(child) = self.children.remove(&id)
            && let Ok(mut child) = child.lock()
        {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
