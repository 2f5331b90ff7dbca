//! The rainbow highlighter.

use crate::error::{Error, Result};
use crate::highlight::parallel::{execute_parallel, plan_work};
use crate::highlight::series::execute_series;
use crate::highlight::strategy::{ExecutionMode, Strategy, available_cpus};
use crate::pool::{ThreadPool, WorkerPool};
use crate::progress::{ProgressReporter, best_effort};
use crate::random::{RandomSource, XorShift64};
use crate::text::{LineWrapper, StyledText, WidthWrapper, split_rows};
use crate::unicode::WidthMethod;
use std::time::Duration;

/// Options for a [`Highlighter`].
#[derive(Clone, Debug)]
pub struct HighlightOptions {
    /// Hue of the very first character. Drawn at random when `None`.
    pub initial_hue: Option<f64>,
    /// Hue change between consecutive characters of a row.
    pub char_step: f64,
    /// Hue change between the first characters of consecutive rows.
    pub row_step: f64,
    /// Wrap rows to this many columns. When `None`, split only at newlines.
    pub display_width: Option<usize>,
    /// Forced or automatic strategy selection.
    pub mode: ExecutionMode,
    /// CPU count used for strategy selection and pool size.
    /// Discovered from the host when `None`.
    pub cpu_count: Option<usize>,
    /// How often a parallel run reports progress.
    pub poll_interval: Duration,
    /// Progress description; the strategy name is appended.
    pub progress_label: String,
    /// Width method for ambiguous-width characters when wrapping.
    pub width_method: WidthMethod,
    /// Tab stop interval when wrapping.
    pub tab_width: usize,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            initial_hue: None,
            char_step: -0.015,
            row_step: -0.03,
            display_width: None,
            mode: ExecutionMode::Auto,
            cpu_count: None,
            poll_interval: Duration::from_secs(1),
            progress_label: "Colorizing".to_string(),
            width_method: WidthMethod::default(),
            tab_width: 8,
        }
    }
}

impl HighlightOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn initial_hue(mut self, hue: f64) -> Self {
        self.initial_hue = Some(hue);
        self
    }

    #[must_use]
    pub const fn char_step(mut self, step: f64) -> Self {
        self.char_step = step;
        self
    }

    #[must_use]
    pub const fn row_step(mut self, step: f64) -> Self {
        self.row_step = step;
        self
    }

    #[must_use]
    pub const fn display_width(mut self, width: usize) -> Self {
        self.display_width = Some(width);
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn cpu_count(mut self, cpus: usize) -> Self {
        self.cpu_count = Some(cpus);
        self
    }

    #[must_use]
    pub const fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = label.into();
        self
    }

    #[must_use]
    pub const fn width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    #[must_use]
    pub const fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Check every option against its accepted domain.
    ///
    /// Non-finite steps are valid: they randomize the next hue.
    pub fn validate(&self) -> Result<()> {
        if let Some(hue) = self.initial_hue {
            if !hue.is_finite() || !(0.0..1.0).contains(&hue) {
                return Err(Error::invalid("initial_hue", hue, "must be finite and in [0, 1)"));
            }
        }
        if self.display_width == Some(0) {
            return Err(Error::invalid("display_width", 0, "must be at least 1"));
        }
        if self.cpu_count == Some(0) {
            return Err(Error::invalid("cpu_count", 0, "must be at least 1"));
        }
        if self.tab_width == 0 {
            return Err(Error::invalid("tab_width", 0, "must be at least 1"));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::invalid("poll_interval", "0s", "must be nonzero"));
        }
        Ok(())
    }
}

/// Colors every character of a text with a rotating hue.
///
/// The running hue persists across calls: each row advances it by
/// `row_step`, so consecutive calls continue the gradient.
///
/// Rows run on the calling thread or on a worker pool depending on the
/// input size (see [`choose`](crate::highlight::choose)). Without an
/// injected pool, a [`ThreadPool`] is spawned for each parallel call.
pub struct Highlighter<P: WorkerPool = ThreadPool> {
    options: HighlightOptions,
    hue: f64,
    rng: Box<dyn RandomSource + Send>,
    pool: Option<P>,
    wrapper: Box<dyn LineWrapper + Send + Sync>,
}

impl Highlighter {
    /// Create a highlighter with an entropy-seeded random source.
    pub fn new(options: HighlightOptions) -> Result<Self> {
        Self::with_random_source(options, XorShift64::from_entropy())
    }

    /// Create a highlighter drawing random hues from `rng`.
    ///
    /// When no initial hue is configured, the first draw from `rng` becomes
    /// the starting hue.
    pub fn with_random_source(
        options: HighlightOptions,
        mut rng: impl RandomSource + Send + 'static,
    ) -> Result<Self> {
        options.validate()?;
        let hue = options.initial_hue.unwrap_or_else(|| rng.next_unit());
        let wrapper = WidthWrapper::new()
            .width_method(options.width_method)
            .tab_width(options.tab_width);
        Ok(Self {
            options,
            hue,
            rng: Box::new(rng),
            pool: None,
            wrapper: Box::new(wrapper),
        })
    }
}

impl<P: WorkerPool> Highlighter<P> {
    /// Run parallel batches on `pool` instead of spawning threads per call.
    #[must_use]
    pub fn with_pool<Q: WorkerPool>(self, pool: Q) -> Highlighter<Q> {
        Highlighter {
            options: self.options,
            hue: self.hue,
            rng: self.rng,
            pool: Some(pool),
            wrapper: self.wrapper,
        }
    }

    /// Replace the line wrapper used when a display width is set.
    #[must_use]
    pub fn with_wrapper(mut self, wrapper: impl LineWrapper + Send + Sync + 'static) -> Self {
        self.wrapper = Box::new(wrapper);
        self
    }

    /// The running hue: the start hue of the next row to be colorized.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Options in effect.
    #[must_use]
    pub const fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Colorize `text`, replacing all of its spans.
    ///
    /// The returned text has the same content, plus one `'\n'` at every
    /// wrap point when a display width is set. Empty text is returned as is.
    pub fn highlight(&mut self, text: StyledText) -> Result<StyledText> {
        self.run(text, None)
    }

    /// Like [`highlight`](Self::highlight), reporting progress to `reporter`.
    ///
    /// The reporter receives the row count as its total, then a label with
    /// the chosen strategy appended, then completion updates. Reporter
    /// failures are logged and otherwise ignored.
    pub fn highlight_with_progress(
        &mut self,
        text: StyledText,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<StyledText> {
        self.run(text, Some(reporter))
    }

    /// Strategy that would be used for a workload of this shape.
    #[must_use]
    pub fn strategy_for(&self, n_chars: usize, n_rows: usize) -> Strategy {
        self.options.mode.resolve(n_chars, n_rows, self.cpus())
    }

    fn cpus(&self) -> Option<usize> {
        self.options.cpu_count.or_else(available_cpus)
    }

    fn rows_of(&self, text: &StyledText) -> Vec<StyledText> {
        let ranges = match self.options.display_width {
            Some(width) => self.wrapper.wrap(text.plain(), width),
            None => split_rows(text.plain()),
        };
        text.pieces(&ranges)
    }

    fn run(
        &mut self,
        text: StyledText,
        mut reporter: Option<&mut dyn ProgressReporter>,
    ) -> Result<StyledText> {
        if text.is_empty() {
            return Ok(text);
        }

        let rows = self.rows_of(&text);
        let chars = text.len();
        let n_rows = rows.len();
        drop(text);

        let cpus = self.cpus();
        let strategy = self.options.mode.resolve(chars, n_rows, cpus);
        tracing::debug!(chars, rows = n_rows, cpus = ?cpus, %strategy, "selected strategy");

        if let Some(reporter) = reporter.as_deref_mut() {
            best_effort("set_total", reporter.set_total(n_rows));
            let label = format!("{} ({strategy})", self.options.progress_label);
            best_effort("set_label", reporter.set_label(&label));
        }

        let _span = tracing::debug_span!("colorize", %strategy, rows = n_rows).entered();
        let (char_step, row_step) = (self.options.char_step, self.options.row_step);
        let colored = match strategy {
            Strategy::Series => {
                execute_series(rows, &mut self.hue, char_step, row_step, &mut self.rng, reporter)
            }
            Strategy::Parallel => {
                // The running hue only moves once the whole batch succeeds.
                let mut hue = self.hue;
                let items = plan_work(rows, &mut hue, char_step, row_step, &mut self.rng);
                let interval = self.options.poll_interval;
                let colored = match &self.pool {
                    Some(pool) => execute_parallel(pool, items, interval, reporter)?,
                    None => {
                        let pool = ThreadPool::new(cpus.unwrap_or(1))?;
                        execute_parallel(&pool, items, interval, reporter)?
                    }
                };
                self.hue = hue;
                colored
            }
        };

        Ok(StyledText::join_owned(colored, "\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::highlight::hue::next_hue;

    fn fixed(options: HighlightOptions) -> Highlighter {
        Highlighter::with_random_source(options, XorShift64::new(7)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let options = HighlightOptions::default();
        assert_eq!(options.char_step, -0.015);
        assert_eq!(options.row_step, -0.03);
        assert_eq!(options.poll_interval, Duration::from_secs(1));
        assert_eq!(options.progress_label, "Colorizing");
        assert_eq!(options.mode, ExecutionMode::Auto);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        for options in [
            HighlightOptions::new().initial_hue(1.0),
            HighlightOptions::new().initial_hue(-0.1),
            HighlightOptions::new().initial_hue(f64::NAN),
            HighlightOptions::new().display_width(0),
            HighlightOptions::new().cpu_count(0),
            HighlightOptions::new().tab_width(0),
            HighlightOptions::new().poll_interval(Duration::ZERO),
        ] {
            assert!(matches!(
                Highlighter::new(options),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_non_finite_steps_are_valid() {
        let options = HighlightOptions::new()
            .char_step(f64::NAN)
            .row_step(f64::INFINITY);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_random_initial_hue_comes_from_source() {
        let h = fixed(HighlightOptions::new());
        let expected = XorShift64::new(7).next_unit();
        assert_eq!(h.hue(), expected);
    }

    #[test]
    fn test_empty_text_unchanged() {
        let mut h = fixed(HighlightOptions::new().initial_hue(0.25));
        let mut text = StyledText::default();
        text.stylize(0, 0, Rgb::RED);
        let out = h.highlight(text.clone()).unwrap();
        assert_eq!(out, text);
        assert_eq!(h.hue(), 0.25);
    }

    #[test]
    fn test_small_text_colors_every_char() {
        let mut h = fixed(HighlightOptions::new().initial_hue(0.5));
        let mut input = StyledText::new("ab\ncd");
        input.stylize(0, 5, Rgb::BLACK);
        let out = h.highlight(input).unwrap();

        assert_eq!(out.plain(), "ab\ncd");
        let colored: Vec<usize> = out.spans().iter().map(|s| s.start()).collect();
        assert_eq!(colored, [0, 1, 3, 4]);
        assert_eq!(out.spans()[0].color, Rgb::new(0, 255, 255));
        assert!(out.spans().iter().all(|s| s.color != Rgb::BLACK));
    }

    #[test]
    fn test_hue_advances_per_row_across_calls() {
        let mut h = fixed(HighlightOptions::new().initial_hue(0.5).row_step(-0.25));
        h.highlight(StyledText::new("a\nb")).unwrap();
        assert!((h.hue() - 0.0).abs() < 1e-12);

        let out = h.highlight(StyledText::new("c")).unwrap();
        assert_eq!(out.spans()[0].color, Rgb::from_hsv(0.0, 1.0, 1.0));
        assert!((h.hue() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_wraps_at_display_width() {
        let mut h = fixed(HighlightOptions::new().initial_hue(0.0).display_width(5));
        let out = h.highlight(StyledText::new("aaaa bbbb")).unwrap();
        assert_eq!(out.plain(), "aaaa \nbbbb");
        assert_eq!(out.spans().len(), 9);
    }

    #[test]
    fn test_tab_width_moves_wrap_point() {
        let mut h = fixed(HighlightOptions::new().initial_hue(0.0).display_width(6));
        let out = h.highlight(StyledText::new("ab\tcd")).unwrap();
        assert_eq!(out.plain(), "ab\t\ncd");

        let mut h = fixed(
            HighlightOptions::new()
                .initial_hue(0.0)
                .display_width(6)
                .tab_width(4),
        );
        let out = h.highlight(StyledText::new("ab\tcd")).unwrap();
        assert_eq!(out.plain(), "ab\tcd");
    }

    #[test]
    fn test_forced_parallel_matches_series() {
        let text = StyledText::new("alpha\nbeta\ngamma\ndelta");
        let mut series = fixed(
            HighlightOptions::new()
                .initial_hue(0.3)
                .mode(ExecutionMode::Series),
        );
        let mut parallel = fixed(
            HighlightOptions::new()
                .initial_hue(0.3)
                .mode(ExecutionMode::Parallel)
                .cpu_count(2),
        );
        let a = series.highlight(text.clone()).unwrap();
        let b = parallel.highlight(text).unwrap();
        assert_eq!(a, b);
        assert_eq!(series.hue(), parallel.hue());
    }

    #[test]
    fn test_injected_pool() {
        let pool = ThreadPool::new(2).unwrap();
        let mut h = fixed(
            HighlightOptions::new()
                .initial_hue(0.1)
                .mode(ExecutionMode::Parallel),
        )
        .with_pool(&pool);
        let out = h.highlight(StyledText::new("x\ny\nz")).unwrap();
        assert_eq!(out.spans().len(), 3);

        let expected = next_hue(0.1, -0.03, &mut XorShift64::new(0));
        assert_eq!(out.spans()[1].color, Rgb::from_hsv(expected, 1.0, 1.0));
    }

    #[test]
    fn test_strategy_for_uses_cpu_override() {
        let h = fixed(HighlightOptions::new().cpu_count(8));
        assert_eq!(h.strategy_for(600_000, 3), Strategy::Parallel);
        assert_eq!(h.strategy_for(600_000, 2), Strategy::Series);
    }
}
