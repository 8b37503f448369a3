// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The service that owns the style state.
//!
//! All state that the editor plugin used to keep in globals lives here: the
//! style map, the four samples, the pending-save flag and the formatter's
//! lazy build bookkeeping. The host forwards setting changes and scheduled
//! tasks to it from a single thread.

use tracing::{debug, trace, warn};

use crate::error::StyleError;
use crate::style::cache::{MemoryCache, PreferenceCache};
use crate::style::config::StyleConfig;
use crate::style::formatter;
use crate::style::preferences::PreferencesWriter;
use crate::style::rules::{SIGNATURE_SLOTS, default_rules};
use crate::style::sample::StyleSample;
use crate::style::scheduler::{Scheduler, Task, TimerQueue};
use crate::style::settings::{JsonSettings, SettingsSource};
use crate::style::style_map::StyleMap;

/// Where the formatter is in building the style map it depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No usable map yet; `attempts` lazy builds were tried so far.
    Uninitialized { attempts: u8 },
    /// The map is built and formatting is active.
    Ready,
    /// Every build attempt failed. Formatting stays the identity.
    GivenUp,
}

type HostProbe = Box<dyn Fn() -> bool + Send>;

/// Derives the style from the settings, formats snippets with it and keeps
/// the preferences document in sync.
pub struct StyleService<T = JsonSettings, C = MemoryCache, S = TimerQueue> {
    config: StyleConfig,
    settings: T,
    cache: C,
    scheduler: S,
    samples: Vec<StyleSample>,
    style_map: Option<StyleMap>,
    lifecycle: Lifecycle,
    writer: PreferencesWriter,
    host_ready: HostProbe,
}

impl<T, C, S> std::fmt::Debug for StyleService<T, C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleService")
            .field("config", &self.config)
            .field("samples", &self.samples)
            .field("style_map", &self.style_map)
            .field("lifecycle", &self.lifecycle)
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}

impl Default for StyleService {
    fn default() -> Self {
        Self::new(JsonSettings::new(), MemoryCache::new(), TimerQueue::new())
    }
}

impl<T, C, S> StyleService<T, C, S>
where
    T: SettingsSource,
    C: PreferenceCache,
    S: Scheduler,
{
    /// Creates a service with the default configuration.
    pub fn new(settings: T, cache: C, scheduler: S) -> Self {
        Self::with_config(StyleConfig::default(), settings, cache, scheduler)
    }

    /// Creates a service with a custom configuration.
    pub fn with_config(config: StyleConfig, settings: T, cache: C, scheduler: S) -> Self {
        let samples = default_rules(&config.indent_unit)
            .into_iter()
            .map(StyleSample::new)
            .collect();
        let writer = PreferencesWriter::new(&config);
        Self {
            config,
            settings,
            cache,
            scheduler,
            samples,
            style_map: None,
            lifecycle: Lifecycle::Uninitialized { attempts: 0 },
            writer,
            host_ready: Box::new(|| true),
        }
    }

    /// Sets the check [`StyleService::initialize`] uses to decide whether the
    /// host can be queried yet.
    pub fn with_host_probe(mut self, probe: impl Fn() -> bool + Send + 'static) -> Self {
        self.host_ready = Box::new(probe);
        self
    }

    /// Reads all style settings once the host is ready.
    ///
    /// While the host is not ready, a [`Task::Initialize`] is scheduled and
    /// this returns false.
    pub fn initialize(&mut self) -> bool {
        if !(self.host_ready)() {
            trace!("host not ready, deferring initialization");
            self.scheduler
                .schedule(self.config.init_retry_delay, Task::Initialize);
            return false;
        }
        self.update();
        true
    }

    /// Applies every style setting. Returns true if any slot changed.
    pub fn update(&mut self) -> bool {
        let mut changed = false;
        for index in 0..self.samples.len() {
            changed |= self.apply_sample(index);
        }
        changed
    }

    /// Applies one changed setting. Unknown keys are ignored.
    ///
    /// Returns true if the style map changed.
    pub fn on_setting_changed(&mut self, key: &str) -> bool {
        match self.samples.iter().position(|s| s.setting_key() == key) {
            Some(index) => self.apply_sample(index),
            None => {
                trace!(key, "ignoring unrelated setting");
                false
            }
        }
    }

    fn apply_sample(&mut self, index: usize) -> bool {
        let sample = &mut self.samples[index];
        let value = self.settings.get(sample.setting_key());
        let Some(fragments) = sample.apply(value.as_deref()) else {
            return false;
        };

        self.style_map
            .get_or_insert_with(StyleMap::new)
            .apply(fragments);
        self.writer
            .mark(&mut self.scheduler, self.config.save_delay);
        true
    }

    /// Runs a task delivered by the scheduler.
    pub fn run_task(&mut self, task: Task) -> Result<(), StyleError> {
        match task {
            Task::Initialize => {
                self.initialize();
                Ok(())
            }
            Task::SavePreferences => self.save_preferences().map(|_| ()),
        }
    }

    /// Writes the preferences document now. Returns true if the cache was
    /// written.
    pub fn save_preferences(&mut self) -> Result<bool, StyleError> {
        match &self.style_map {
            Some(map) => self.writer.save(map, &mut self.cache),
            None => {
                self.writer.clear();
                Ok(false)
            }
        }
    }

    /// Formats `text` with the current signature style.
    ///
    /// Until the style map is built, the text is returned unchanged and each
    /// call makes one build attempt, up to the configured bound. After that
    /// the formatter gives up for the lifetime of the service.
    pub fn format_statement(&mut self, text: &str) -> String {
        match self.lifecycle {
            Lifecycle::Ready => {}
            Lifecycle::GivenUp => return text.to_string(),
            Lifecycle::Uninitialized { attempts } => {
                if self.is_built() {
                    self.lifecycle = Lifecycle::Ready;
                } else {
                    self.attempt_build(attempts);
                    return text.to_string();
                }
            }
        }

        match &self.style_map {
            Some(map) => formatter::format_statement(map, text),
            None => text.to_string(),
        }
    }

    fn attempt_build(&mut self, attempts: u8) {
        if attempts >= self.config.max_build_attempts {
            self.lifecycle = Lifecycle::GivenUp;
            return;
        }

        let attempts = attempts + 1;
        debug!(attempts, "building style map for formatter");
        self.update();

        self.lifecycle = if self.is_built() {
            Lifecycle::Ready
        } else if attempts >= self.config.max_build_attempts {
            warn!(attempts, "no signature style available, formatting disabled");
            Lifecycle::GivenUp
        } else {
            Lifecycle::Uninitialized { attempts }
        };
    }

    fn is_built(&self) -> bool {
        self.style_map
            .as_ref()
            .is_some_and(|map| map.contains_all(&SIGNATURE_SLOTS))
    }

    /// The current style map, if any slot was extracted.
    pub fn style_map(&self) -> Option<&StyleMap> {
        self.style_map.as_ref()
    }

    /// Where the formatter's lazy build stands.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns true while a preferences write is scheduled.
    pub fn is_save_pending(&self) -> bool {
        self.writer.is_pending()
    }

    /// Number of preference writes that reached the cache.
    pub fn preference_writes(&self) -> usize {
        self.writer.writes()
    }

    /// The value last applied for a setting.
    pub fn applied_sample(&self, key: &str) -> Option<&str> {
        self.samples
            .iter()
            .find(|s| s.setting_key() == key)
            .and_then(StyleSample::current)
    }

    /// The configuration in use.
    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// The settings source.
    pub fn settings(&self) -> &T {
        &self.settings
    }

    /// Mutable access to the settings source. Changes take effect through
    /// [`StyleService::on_setting_changed`] or [`StyleService::update`].
    pub fn settings_mut(&mut self) -> &mut T {
        &mut self.settings
    }

    /// The preferences cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
