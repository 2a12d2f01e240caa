use chrono::Utc;
use std::{future::Future, io::Write};
use tokio::time::sleep;

use crate::config::{Config, Target};
use crate::{IdleError, IdleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    PrintedOnce(u64),
    TargetReached(u64),
    Cancelled,
}

/// Samples an idle source and writes the values to `output`, one per line.
pub struct Poller<S, W> {
    source: S,
    output: W,
    config: Config,
}

impl<S: IdleSource, W: Write> Poller<S, W> {
    pub fn new(source: S, output: W, config: Config) -> Self {
        Self {
            source,
            output,
            config,
        }
    }

    /// Polls until the target is reached or `shutdown` resolves.
    ///
    /// `shutdown` is only observed while waiting for the next sample, so a
    /// query in flight always completes.
    pub async fn run(
        &mut self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<PollOutcome, IdleError> {
        if self.config.target == Target::PrintOnce {
            let current = self.source.millis_since_input().await?;
            writeln!(self.output, "{current}")?;

            return Ok(PollOutcome::PrintedOnce(current));
        }

        tokio::pin!(shutdown);
        let mut current = 0;
        while !self.is_reached(current) {
            tokio::select! {
                () = &mut shutdown => {
                    debug!("Termination requested at {current}ms of idle time");
                    return Ok(PollOutcome::Cancelled);
                }
                () = sleep(self.config.interval) => {}
            }

            current = self.source.millis_since_input().await?;
            if !self.config.quiet {
                self.print_sample(current)?;
            }
        }

        if !self.config.quiet {
            writeln!(
                self.output,
                "Reached idle target: {current} | timestamp: {}",
                Utc::now().timestamp()
            )?;
        }

        Ok(PollOutcome::TargetReached(current))
    }

    fn is_reached(&self, current: u64) -> bool {
        match self.config.target {
            Target::Millis(target) => current >= target,
            Target::Unbounded | Target::PrintOnce => false,
        }
    }

    fn print_sample(&mut self, current: u64) -> std::io::Result<()> {
        if self.config.verbose {
            writeln!(self.output, "{} - {current}", Utc::now().timestamp())
        } else {
            writeln!(self.output, "{current}")
        }
    }
}
