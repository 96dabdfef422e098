//! Tier aggregation: per-tier counts, derived status, and summary text.

use crate::models::{AppVersion, Counts, RenderedMessage, Severity, TierId, TierStatus};

#[derive(Clone, Debug)]
/// One tier of the rendered report. General tiers are keyed by number;
/// compatibility pseudo-tiers by their app/version pair.
pub struct Tier {
    pub id: TierId,
    pub app: Option<AppVersion>,
    pub tests_were_run: bool,
    pub counts: Counts,
    pub messages: Vec<RenderedMessage>,
}

impl Tier {
    pub fn general(id: u32, tests_were_run: bool) -> Self {
        Tier {
            id: TierId::General(id),
            app: None,
            tests_were_run,
            counts: Counts::default(),
            messages: Vec::new(),
        }
    }

    /// Compatibility pseudo-tiers only exist because a message landed in
    /// them, so they always count as run.
    pub fn compat(app: AppVersion) -> Self {
        Tier {
            id: TierId::Compat(app.tier_key()),
            app: Some(app),
            tests_were_run: true,
            counts: Counts::default(),
            messages: Vec::new(),
        }
    }

    pub fn tally(&mut self, sev: Severity) {
        self.counts.add(sev);
    }

    /// Tally and append one placement, keeping counts and messages in
    /// lockstep.
    pub fn push(&mut self, msg: RenderedMessage) {
        self.tally(msg.severity);
        self.messages.push(msg);
    }

    pub fn status(&self) -> TierStatus {
        if !self.tests_were_run {
            TierStatus::NotRun
        } else if self.counts.error > 0 {
            TierStatus::Failed
        } else if self.counts.warning > 0 {
            TierStatus::PassedWithWarnings
        } else if self.counts.notice > 0 {
            TierStatus::PassedWithNotices
        } else {
            TierStatus::Passed
        }
    }

    /// Heading for display: "Tier N", or "<App> <version> Tests" for
    /// compatibility pseudo-tiers.
    pub fn title(&self) -> String {
        match (&self.app, &self.id) {
            (Some(app), _) => format!("{} {} Tests", app.app_name(), app.version),
            (None, id) => format!("Tier {}", id),
        }
    }

    /// Human summary. Counts are suppressed for tiers that were not run.
    pub fn summary_text(&self) -> String {
        if !self.tests_were_run {
            return "These tests were not run.".to_string();
        }
        if self.counts.total() == 0 {
            return "All tests passed successfully.".to_string();
        }
        format!(
            "{}, {}, {}",
            plural(self.counts.error, "error", "errors"),
            plural(self.counts.warning, "warning", "warnings"),
            plural(self.counts.notice, "notice", "notices"),
        )
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}
