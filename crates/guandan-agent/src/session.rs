use crate::protocol::{Handled, Response, handle_line};
use guandan_bot::bot::StrategyParams;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{Level, event};

/// Counters for one serve loop. Owned by the loop and dropped with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub requests: u64,
    pub decisions: u64,
    pub plays: u64,
    pub passes: u64,
    pub errors: u64,
    pub total_decision_us: u64,
}

impl SessionStats {
    pub fn mean_decision_us(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.total_decision_us as f64 / self.decisions as f64
        }
    }

    fn record(&mut self, handled: &Handled) {
        self.requests += 1;
        match handled {
            Handled::Decided { decision, .. } => {
                self.decisions += 1;
                if decision.is_pass() {
                    self.passes += 1;
                } else {
                    self.plays += 1;
                }
                self.total_decision_us += decision.stats.elapsed_us;
            }
            Handled::Other(Response::Error { .. }) => self.errors += 1,
            Handled::Other(_) => {}
        }
    }
}

/// Answers requests line by line until `input` is exhausted. Blank lines are skipped.
pub fn serve<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    params: &StrategyParams,
) -> std::io::Result<SessionStats> {
    let mut stats = SessionStats::default();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let handled = handle_line(line, params);
        stats.record(&handled);
        writeln!(output, "{}", handled.response().to_line())?;
        output.flush()?;
    }

    event!(
        target: "guandan_agent::session",
        Level::INFO,
        requests = stats.requests,
        decisions = stats.decisions,
        plays = stats.plays,
        passes = stats.passes,
        errors = stats.errors,
        mean_decision_us = stats.mean_decision_us(),
        "session finished"
    );
    Ok(stats)
}
