use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::audio::effects::{Cue, SoundEffects};
use crate::audio::narration::NarrationSequencer;
use crate::audio::player::ProcessPlayer;
use crate::audio::queue::{AudioQueue, ClipId};
use crate::catalog;
use crate::config::Config;
use crate::content::client::{ContentClient, ContentError};
use crate::content::tts::SpeechSynthesizer;
use crate::content::{ExplainRequest, Explanation, Problem};
use crate::engine::facts::RoundMode;
use crate::event::AppEvent;
use crate::session::fast_multiply::{AnswerOutcome, FastPhase, FastRound};
use crate::session::play::{PlayPhase, PlaySession, ProblemFetcher};
use crate::store::schema::MathSection;
use crate::store::session_store::SessionStore;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Play,
    FastMultiply,
    Shop,
    Explore,
}

/// Home menu entries, in display order: the five sections followed by the
/// other destinations.
pub const HOME_EXTRA_ENTRIES: [&str; 3] = ["Fast Multiplication", "Shop", "Explore"];

/// Runs each fetch on its own thread and posts the tagged result back through
/// the app event channel.
pub struct SpawningFetcher {
    client: Arc<ContentClient>,
    tx: Sender<AppEvent>,
}

impl ProblemFetcher for SpawningFetcher {
    fn fetch_problem(&mut self, seq: u64, section: MathSection, level: u8) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.generate_problem(section, level);
            let _ = tx.send(AppEvent::ProblemReady { seq, result });
        });
    }

    fn fetch_explanation(&mut self, seq: u64, request: ExplainRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.explain(&request);
            let _ = tx.send(AppEvent::ExplanationReady { seq, result });
        });
    }
}

pub struct App {
    pub screen: AppScreen,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: SessionStore,
    pub play: Option<PlaySession>,
    pub fast: FastRound,
    pub home_selected: usize,
    pub shop_selected: usize,
    pub explore_selected: usize,
    pub should_quit: bool,
    fetcher: SpawningFetcher,
    audio: AudioQueue<ProcessPlayer>,
    narration: NarrationSequencer,
    synthesizer: Arc<SpeechSynthesizer>,
    effects: SoundEffects,
    tx: Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config, store: SessionStore, tx: Sender<AppEvent>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let client = Arc::new(ContentClient::from_config(&config));
        let synthesizer = Arc::new(SpeechSynthesizer::from_config(&config));
        let player = ProcessPlayer::new(config.audio_player.clone(), tx.clone());
        let effects = SoundEffects::new(
            config.sound_dir.as_ref().map(PathBuf::from),
            config.audio_player.clone(),
        );

        Self {
            screen: AppScreen::Home,
            theme,
            config,
            store,
            play: None,
            fast: FastRound::new(SmallRng::from_entropy()),
            home_selected: 0,
            shop_selected: 0,
            explore_selected: 0,
            should_quit: false,
            fetcher: SpawningFetcher {
                client,
                tx: tx.clone(),
            },
            audio: AudioQueue::new(player),
            narration: NarrationSequencer::new(),
            synthesizer,
            effects,
            tx,
        }
    }

    pub fn home_entry_count(&self) -> usize {
        catalog::SECTIONS.len() + HOME_EXTRA_ENTRIES.len()
    }

    pub fn go_home(&mut self) {
        self.stop_narration();
        self.play = None;
        self.screen = AppScreen::Home;
    }

    pub fn open_home_entry(&mut self) {
        let sections = catalog::SECTIONS.len();
        match self.home_selected {
            i if i < sections => self.start_play(catalog::SECTIONS[i].id),
            i if i == sections => self.screen = AppScreen::FastMultiply,
            i if i == sections + 1 => self.screen = AppScreen::Shop,
            _ => self.screen = AppScreen::Explore,
        }
    }

    pub fn start_play(&mut self, section: MathSection) {
        let level = self.store.data().sections.get(section).level;
        self.play = Some(PlaySession::begin(section, level, &mut self.fetcher));
        self.screen = AppScreen::Play;
    }

    // ---- async event plumbing ----

    pub fn on_problem_ready(&mut self, seq: u64, result: Result<Problem, ContentError>) {
        if let Some(play) = self.play.as_mut() {
            play.on_problem_ready(seq, result);
        }
    }

    pub fn on_explanation_ready(&mut self, seq: u64, result: Result<Explanation, ContentError>) {
        if let Some(play) = self.play.as_mut() {
            play.on_explanation_ready(seq, result);
        }
    }

    pub fn on_narration_ready(&mut self, batch: u64, step: usize, path: Option<PathBuf>) {
        let urls = self
            .narration
            .resolve(batch, step, path.map(|p| p.to_string_lossy().to_string()));
        for url in urls {
            self.audio.enqueue(url);
        }
    }

    pub fn on_clip_finished(&mut self, id: ClipId) {
        self.audio.on_finished(id);
    }

    pub fn on_tick(&mut self) {
        if self.screen == AppScreen::FastMultiply {
            let before = self.fast.phase();
            let _ = self.fast.tick(&mut self.store, Instant::now());
            if before == FastPhase::Playing && self.fast.phase() == FastPhase::RoundEnd {
                self.effects.play(Cue::Celebrate);
            }
        }
    }

    // ---- play screen actions ----

    pub fn play_push_digit(&mut self, digit: char) {
        if let Some(play) = self.play.as_mut() {
            play.push_digit(digit);
        }
    }

    pub fn play_backspace(&mut self) {
        if let Some(play) = self.play.as_mut() {
            play.backspace();
        }
    }

    pub fn play_submit(&mut self) {
        let Some(play) = self.play.as_mut() else {
            return;
        };
        let _ = play.submit(&mut self.store, &mut self.fetcher);
        match play.phase() {
            PlayPhase::Correct => self.effects.play(Cue::Correct),
            PlayPhase::FirstWrong | PlayPhase::Wrong => self.effects.play(Cue::Wrong),
            _ => {}
        }
    }

    pub fn play_try_again(&mut self) {
        if let Some(play) = self.play.as_mut() {
            play.try_again();
        }
    }

    pub fn play_advance(&mut self) {
        self.stop_narration();
        if let Some(play) = self.play.as_mut() {
            play.advance(&self.store, &mut self.fetcher);
        }
    }

    /// Read the current explanation aloud: one synthesis thread per step,
    /// playback strictly in step order.
    pub fn read_aloud(&mut self) {
        if !self.config.narration_enabled || !self.synthesizer.is_configured() {
            return;
        }
        let Some(steps) = self
            .play
            .as_ref()
            .and_then(|p| p.explanation())
            .map(|e| e.steps.clone())
        else {
            return;
        };
        if steps.is_empty() {
            return;
        }

        self.stop_narration();
        let batch = self.narration.start(steps.len());
        for (step, text) in steps.into_iter().enumerate() {
            let synthesizer = Arc::clone(&self.synthesizer);
            let tx = self.tx.clone();
            thread::spawn(move || {
                let path = synthesizer.synthesize(&text);
                let _ = tx.send(AppEvent::NarrationReady { batch, step, path });
            });
        }
    }

    pub fn stop_narration(&mut self) {
        self.narration.cancel();
        self.audio.stop();
    }

    pub fn narration_playing(&self) -> bool {
        self.audio.is_playing()
    }

    // ---- fast multiplication actions ----

    pub fn fast_select_mode(&mut self, mode: RoundMode) {
        let history = self.store.data().multiplication.miss_history.clone();
        self.fast.select_mode(mode, &history, Instant::now());
    }

    pub fn fast_push_digit(&mut self, digit: char) {
        self.fast.push_digit(digit);
    }

    pub fn fast_backspace(&mut self) {
        self.fast.backspace();
    }

    pub fn fast_submit(&mut self) {
        let outcome = self
            .fast
            .submit(&mut self.store, Instant::now())
            .unwrap_or(None);
        match outcome {
            Some(AnswerOutcome::Correct) => self.effects.play(Cue::Correct),
            Some(AnswerOutcome::Wrong) => self.effects.play(Cue::Wrong),
            None => {}
        }
    }

    pub fn fast_continue(&mut self) {
        match self.fast.phase() {
            FastPhase::RoundEnd => self.fast.continue_after_round(Instant::now()),
            FastPhase::DrillEnd => {
                self.effects.play(Cue::Celebrate);
                self.fast.continue_after_drill();
            }
            _ => {}
        }
    }

    /// Leaving the screen abandons any in-progress round; nothing transient
    /// survives navigation.
    pub fn leave_fast(&mut self) {
        self.fast = FastRound::new(SmallRng::from_entropy());
        self.go_home();
    }

    pub fn boss_available(&self) -> bool {
        !self.store.data().multiplication.miss_history.is_empty()
    }

    // ---- shop actions ----

    /// Buy the selected item if unowned (and affordable), otherwise toggle it
    /// on or off the avatar.
    pub fn shop_activate(&mut self) {
        let Some(item) = catalog::SHOP_ITEMS.get(self.shop_selected) else {
            return;
        };
        let owned = self
            .store
            .data()
            .purchased_items
            .iter()
            .any(|id| id == item.id);
        if !owned {
            let _ = self.store.purchase(item.id, item.cost);
            return;
        }
        let equipped = self.store.data().equipped.slot(item.category) == Some(item.id);
        if equipped {
            let _ = self.store.unequip(item.category);
        } else {
            let _ = self.store.equip(item.category, item.id);
        }
    }
}
