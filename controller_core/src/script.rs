//! Input scripts.
//!
//! A script is a list of segments, each holding one raw input sample for a
//! number of ticks. Replaying goes through an `InputSampler`, so a button held
//! across a whole segment produces a single press edge.

use std::path::Path;

use anyhow::Context;
use controller_shared::input::{InputSampler, InputSnapshot, RawInput};
use serde::{Deserialize, Serialize};

use crate::runner::InputSource;

/// One raw input held for `ticks` ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSegment {
    pub ticks: u32,
    #[serde(default)]
    pub input: RawInput,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse script {}", path.display()))
    }

    /// Appends a segment, builder style.
    pub fn hold(mut self, ticks: u32, input: RawInput) -> Self {
        self.segments.push(ScriptSegment { ticks, input });
        self
    }

    pub fn total_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }
}

/// Replays an `InputScript`, then idles.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: InputScript,
    segment: usize,
    used: u32,
    sampler: InputSampler,
}

impl ScriptedInput {
    pub fn new(script: InputScript) -> Self {
        Self {
            script,
            segment: 0,
            used: 0,
            sampler: InputSampler::new(),
        }
    }

    /// Scripted ticks not yet replayed.
    pub fn remaining_ticks(&self) -> u64 {
        let ahead: u64 = self.script.segments[self.segment.min(self.script.segments.len())..]
            .iter()
            .map(|s| u64::from(s.ticks))
            .sum();
        ahead.saturating_sub(u64::from(self.used))
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_ticks() == 0
    }

    fn next_raw(&mut self) -> RawInput {
        while let Some(seg) = self.script.segments.get(self.segment) {
            if self.used < seg.ticks {
                self.used += 1;
                return seg.input;
            }
            self.segment += 1;
            self.used = 0;
        }
        RawInput::default()
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> InputSnapshot {
        let raw = self.next_raw();
        self.sampler.sample(&raw)
    }
}
