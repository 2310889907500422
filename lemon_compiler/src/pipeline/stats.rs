use serde::Serialize;
use std::time::Duration;

/// Counters for one compilation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub functions_compiled: usize,
    pub statements_compiled: usize,
    pub statements_failed: usize,
    pub tokens_processed: usize,
    pub locals_declared: usize,
    pub threads_used: usize,
    #[serde(skip)]
    pub processing_duration: Duration,
}

impl PipelineStats {
    pub fn total_statements(&self) -> usize {
        self.statements_compiled + self.statements_failed
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_statements() == 0 {
            0.0
        } else {
            self.statements_compiled as f64 / self.total_statements() as f64
        }
    }

    pub fn tokens_per_second(&self) -> f64 {
        if self.processing_duration.as_secs_f64() > 0.0 {
            self.tokens_processed as f64 / self.processing_duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Fold the counters of one function into the run totals
    pub fn absorb(&mut self, function: &FunctionStats) {
        self.functions_compiled += 1;
        self.statements_compiled += function.statements_compiled;
        self.statements_failed += function.statements_failed;
        self.tokens_processed += function.tokens_processed;
        self.locals_declared += function.locals_declared;
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionStats {
    pub statements_compiled: usize,
    pub statements_failed: usize,
    pub tokens_processed: usize,
    pub locals_declared: usize,
}
