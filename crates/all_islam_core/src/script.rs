//! crates/all_islam_core/src/script.rs
//!
//! Pure model of the scripted onboarding conversation: an ordered sequence
//! of staged reveals with fixed per-role delays. The model owns no timers;
//! a driver loop (the UI) polls the player with its own clock, which keeps
//! the sequence deterministic and replayable.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Language code every [`MultiLangText`] is expected to carry; unknown
/// languages fall back to it.
pub const DEFAULT_LANG: &str = "en";

//=========================================================================================
// Message content
//=========================================================================================

/// Text available in several languages, keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiLangText {
    translations: BTreeMap<String, String>,
}

impl MultiLangText {
    pub fn new<I, K, V>(translations: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            translations: translations
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The text for `lang`, falling back to [`DEFAULT_LANG`] and then to any
    /// available translation.
    pub fn resolve(&self, lang: &str) -> Option<&str> {
        self.translations
            .get(lang)
            .or_else(|| self.translations.get(DEFAULT_LANG))
            .or_else(|| self.translations.values().next())
            .map(String::as_str)
    }
}

/// Message content is a tagged variant rather than an untyped payload, so
/// renderers and tests can exhaustively match on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "camelCase")]
pub enum MessageContent {
    Plain(String),
    MultiLang(MultiLangText),
}

impl MessageContent {
    /// The display text for `lang`. Plain content ignores the language.
    pub fn resolve(&self, lang: &str) -> &str {
        match self {
            MessageContent::Plain(text) => text,
            MessageContent::MultiLang(text) => text.resolve(lang).unwrap_or_default(),
        }
    }
}

//=========================================================================================
// Steps and scripts
//=========================================================================================

/// Who a scripted message comes from. The reveal delay is fixed per role:
/// the visitor "types" faster than the scholar "replies".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Visitor,
    Scholar,
}

impl Role {
    pub fn reveal_delay(self) -> Duration {
        match self {
            Role::Visitor => Duration::from_millis(1500),
            Role::Scholar => Duration::from_millis(2500),
        }
    }
}

/// One staged reveal: a message plus the delay before it appears,
/// measured from the previous step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub role: Role,
    pub content: MessageContent,
    pub delay: Duration,
}

impl ScriptStep {
    /// A step with the role's standard reveal delay.
    pub fn new(role: Role, content: MessageContent) -> Self {
        Self {
            role,
            content,
            delay: role.reveal_delay(),
        }
    }

    pub fn with_delay(role: Role, content: MessageContent, delay: Duration) -> Self {
        Self {
            role,
            content,
            delay,
        }
    }
}

/// An ordered, fixed sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total elapsed time after which every step is revealed.
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }

    pub fn player(&self) -> ScriptPlayer<'_> {
        ScriptPlayer::new(self)
    }
}

//=========================================================================================
// Player
//=========================================================================================

/// Advances a [`Script`] against an external clock. Each call to
/// [`ScriptPlayer::poll`] receives the total elapsed time since the script
/// started and returns the steps that became visible since the last poll.
#[derive(Debug)]
pub struct ScriptPlayer<'a> {
    script: &'a Script,
    /// Cumulative reveal time of each step.
    schedule: Vec<Duration>,
    revealed: usize,
}

impl<'a> ScriptPlayer<'a> {
    pub fn new(script: &'a Script) -> Self {
        let mut schedule = Vec::with_capacity(script.len());
        let mut at = Duration::ZERO;
        for step in script.steps() {
            at += step.delay;
            schedule.push(at);
        }
        Self {
            script,
            schedule,
            revealed: 0,
        }
    }

    /// Steps newly revealed at `elapsed`. Polling with a smaller elapsed
    /// than before reveals nothing; the player never re-emits a step.
    pub fn poll(&mut self, elapsed: Duration) -> &[ScriptStep] {
        let from = self.revealed;
        while self.revealed < self.schedule.len() && self.schedule[self.revealed] <= elapsed {
            self.revealed += 1;
        }
        &self.script.steps()[from..self.revealed]
    }

    /// Every step revealed so far.
    pub fn revealed(&self) -> &[ScriptStep] {
        &self.script.steps()[..self.revealed]
    }

    /// The delay until the next reveal, or `None` when finished.
    pub fn next_reveal_at(&self) -> Option<Duration> {
        self.schedule.get(self.revealed).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.revealed == self.script.len()
    }

    /// Rewinds to the start so the same sequence replays identically.
    pub fn reset(&mut self) {
        self.revealed = 0;
    }
}

//=========================================================================================
// Tests
//=========================================================================================
