//! Scene-facing drawing helpers.
//!
//! A [`Stage`] wraps the active renderer for the duration of one scene and
//! provides the operations every scene shares: timed waits that a key press
//! can cut short, centred text reveal with paging, positioned text, and line
//! prompts.

use std::time::Duration;

use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::config::RevealConfig;
use crate::error::CoreResult;
use crate::render::{Key, Renderer, Viewport};
use crate::reveal::{Pacing, centred_column, centred_start_row, paginate};

/// How typed characters are shown by [`Stage::prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Show what is typed.
    Visible,
    /// Show one `*` per typed character.
    Masked,
}

impl Echo {
    fn render(self, input: &str) -> String {
        match self {
            Self::Visible => input.to_string(),
            Self::Masked => "*".repeat(input.chars().count()),
        }
    }
}

/// Exclusive drawing access for the running scene.
pub struct Stage<'r> {
    renderer: &'r mut dyn Renderer,
    config: RevealConfig,
}

impl<'r> Stage<'r> {
    /// Wrap a renderer with the given pacing defaults.
    pub fn new(renderer: &'r mut dyn Renderer, config: RevealConfig) -> Self {
        Self { renderer, config }
    }

    /// Pacing defaults for scenes that do not set their own.
    pub fn config(&self) -> RevealConfig {
        self.config
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Viewport {
        self.renderer.viewport()
    }

    /// Wait up to `delay` for a key press.
    ///
    /// Returns `true` when the whole delay passed and `false` when a key cut
    /// it short. A zero delay returns `false` at once, so zero works as
    /// "already skipping".
    pub fn sleep_key(&mut self, delay: Duration) -> CoreResult<bool> {
        if delay.is_zero() {
            return Ok(false);
        }
        Ok(self.renderer.wait_key_or_timeout(delay)?.is_none())
    }

    /// Reveal `text` centred horizontally, starting at row `y_pos`.
    ///
    /// Rows below 1 are treated as 1. Text taller than the viewport is shown
    /// page by page with `pager_delay` between pages; each page repeats the
    /// last [`PAGE_OVERLAP`](crate::PAGE_OVERLAP) lines of the one before.
    ///
    /// A key press during a line wait stops pacing for the rest of the text.
    /// A key press during a page wait stops the reveal altogether. After the
    /// last page there is one more `pager_delay` hold for every page turn.
    ///
    /// Returns `true` if the first page was skipped or any page turn was
    /// interrupted. A key pressed only while a later page is drawn speeds up
    /// the reveal but is not reported.
    pub fn reveal_centred(
        &mut self,
        y_pos: i64,
        text: &str,
        delay: Duration,
        pager_delay: Duration,
    ) -> CoreResult<bool> {
        let row = u16::try_from(y_pos.max(1)).unwrap_or(u16::MAX);
        let lines: Vec<&str> = text.lines().collect();
        let pages = paginate(lines.len(), self.viewport().text_rows());
        let last = pages.len() - 1;

        let mut pacing = Pacing::from_delay(delay);
        let mut first_skipped = false;
        for (index, page) in pages.into_iter().enumerate() {
            pacing = self.reveal_page(row, &lines[page], pacing)?;
            if index == 0 {
                first_skipped = pacing.is_fast_forward();
            }
            if index == last {
                break;
            }

            let skip_all = !self.sleep_key(pager_delay)?;
            self.clear()?;
            if skip_all {
                debug!(page = index + 1, "remaining pages skipped");
                return Ok(true);
            }
        }

        for _ in 0..last {
            self.sleep_key(pager_delay)?;
        }
        Ok(first_skipped)
    }

    /// Reveal `text` centred both horizontally and vertically.
    ///
    /// See [`Stage::reveal_centred`] for pacing and paging.
    pub fn reveal_all_centred(
        &mut self,
        text: &str,
        delay: Duration,
        pager_delay: Duration,
    ) -> CoreResult<bool> {
        let start = centred_start_row(self.viewport().height, text.lines().count());
        self.reveal_centred(start, text, delay, pager_delay)
    }

    /// Draw one page that fits the viewport, line by line.
    fn reveal_page(&mut self, row: u16, lines: &[&str], mut pacing: Pacing) -> CoreResult<Pacing> {
        let width = self.viewport().width;
        for (offset, line) in lines.iter().enumerate() {
            let line = line.trim();
            let offset = u16::try_from(offset).unwrap_or(u16::MAX);
            self.renderer
                .place_text(centred_column(width, line), row.saturating_add(offset), line)?;
            self.renderer.refresh()?;

            if line.is_empty() {
                continue;
            }
            if !self.sleep_key(pacing.delay())? {
                pacing = Pacing::FastForward;
            }
        }
        Ok(pacing)
    }

    /// Draw `text` at a fixed position and show it.
    pub fn place(&mut self, column: u16, row: u16, text: &str) -> CoreResult<()> {
        self.renderer.place_text(column, row, text)?;
        self.renderer.refresh()
    }

    /// Flush pending draws to the display.
    pub fn refresh(&mut self) -> CoreResult<()> {
        self.renderer.refresh()
    }

    /// Erase the screen and redraw the border.
    pub fn clear(&mut self) -> CoreResult<()> {
        self.renderer.clear_and_redraw_borders()
    }

    /// Sleep for `duration`, ignoring key presses.
    pub fn pause(&mut self, duration: Duration) {
        self.renderer.pause(duration);
    }

    /// Forget key presses made before now.
    pub fn flush_input(&mut self) -> CoreResult<()> {
        self.renderer.flush_input()
    }

    /// Show `label` at a position and read a line typed after it.
    ///
    /// Enter finishes the line; Backspace removes the last character.
    pub fn prompt(&mut self, column: u16, row: u16, label: &str, echo: Echo) -> CoreResult<String> {
        self.place(column, row, label)?;
        let input_column = column.saturating_add(u16::try_from(label.width()).unwrap_or(u16::MAX));

        let mut input = String::new();
        loop {
            match self.renderer.read_key()? {
                Key::Enter => return Ok(input),
                Key::Backspace => {
                    if input.pop().is_none() {
                        continue;
                    }
                }
                Key::Char(c) => input.push(c),
                Key::Esc | Key::Other => continue,
            }
            // the trailing blank erases a character removed by Backspace
            let shown = format!("{} ", echo.render(&input));
            self.place(input_column, row, &shown)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::scripted::{DrawOp, ScriptedRenderer};

    const SEC: Duration = Duration::from_secs(1);
    const PAGE: Duration = Duration::from_secs(2);

    fn numbered(count: usize) -> String {
        (1..=count).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn zero_delay_signals_skip_without_waiting() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        assert!(!stage.sleep_key(Duration::ZERO).unwrap());
        assert!(r.waits().is_empty());
        assert_eq!(r.now(), Duration::ZERO);
    }

    #[test]
    fn full_delay_reports_true() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        assert!(stage.sleep_key(SEC).unwrap());
        assert_eq!(r.now(), SEC);
    }

    #[test]
    fn key_press_reports_false() {
        let mut r = ScriptedRenderer::new(80, 24).with_key_at(Duration::ZERO, Key::Char(' '));
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        assert!(!stage.sleep_key(SEC).unwrap());
    }

    #[test]
    fn hello_is_centred_and_skipped() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred("hello", Duration::ZERO, SEC).unwrap();
        assert!(skipped);
        assert_eq!(r.placed(), vec![(38, 12, "hello")]);
        assert!(r.waits().is_empty());
    }

    #[test]
    fn every_line_is_refreshed_as_it_is_placed() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        stage.reveal_centred(3, "a\nb", Duration::ZERO, SEC).unwrap();
        assert_eq!(
            r.ops(),
            &[
                DrawOp::Place { column: 40, row: 3, text: "a".into() },
                DrawOp::Refresh,
                DrawOp::Place { column: 40, row: 4, text: "b".into() },
                DrawOp::Refresh,
            ]
        );
    }

    #[test]
    fn lines_are_trimmed_before_centring() {
        let mut r = ScriptedRenderer::new(20, 10);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        stage.reveal_centred(1, "   abcd   ", Duration::ZERO, SEC).unwrap();
        assert_eq!(r.placed(), vec![(8, 1, "abcd")]);
    }

    #[test]
    fn row_below_one_is_clamped() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        stage.reveal_centred(-7, "x", Duration::ZERO, SEC).unwrap();
        stage.reveal_centred(0, "y", Duration::ZERO, SEC).unwrap();
        assert_eq!(r.placed(), vec![(40, 1, "x"), (40, 1, "y")]);
    }

    #[test]
    fn paced_reveal_waits_after_each_line() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_centred(1, "one\ntwo\nthree", SEC, SEC).unwrap();
        assert!(!skipped);
        assert_eq!(r.waits(), &[SEC, SEC, SEC]);
        assert_eq!(r.now(), Duration::from_secs(3));
    }

    #[test]
    fn blank_lines_never_wait() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_centred(1, "one\n\n   \ntwo", SEC, SEC).unwrap();
        assert!(!skipped);
        assert_eq!(r.placed_texts(), vec!["one", "", "", "two"]);
        assert_eq!(r.waits().len(), 2);
    }

    #[test]
    fn skip_mid_block_stops_pacing() {
        let mut r = ScriptedRenderer::new(80, 24)
            .with_key_at(Duration::from_millis(1500), Key::Char(' '));
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_centred(1, &numbered(5), SEC, SEC).unwrap();
        assert!(skipped);
        // first wait runs out, second is interrupted, the rest never happen
        assert_eq!(r.waits(), &[SEC, SEC]);
        assert_eq!(r.placed().len(), 5);
        assert_eq!(r.now(), Duration::from_millis(1500));
    }

    #[test]
    fn fitting_text_places_every_line_once() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        stage.reveal_all_centred(&numbered(22), Duration::ZERO, SEC).unwrap();
        let expected: Vec<String> = (1..=22).map(|n| format!("line {n}")).collect();
        assert_eq!(r.placed_texts(), expected);
        assert_eq!(r.clears(), 0);
    }

    #[test]
    fn long_text_pages_with_overlap() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred(&numbered(30), Duration::ZERO, SEC).unwrap();
        assert!(skipped);

        let placed = r.placed();
        assert_eq!(placed.len(), 22 + 13);
        // second page repeats lines 18..=22 and ends with line 30
        assert_eq!(placed[22], (36, 1, "line 18"));
        assert_eq!(placed[34].2, "line 30");
        assert!(placed.iter().all(|(_, row, _)| (1..=22).contains(row)));
        assert_eq!(r.clears(), 1);
        // one page turn and one hold on the last page
        assert_eq!(r.waits(), &[SEC, SEC]);
    }

    #[test]
    fn zero_pager_delay_skips_remaining_pages() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage
            .reveal_all_centred(&numbered(30), Duration::ZERO, Duration::ZERO)
            .unwrap();
        assert!(skipped);
        assert_eq!(r.placed().len(), 22);
        assert_eq!(r.clears(), 1);
    }

    #[test]
    fn key_during_page_turn_skips_all() {
        // 22 paced lines take 22s; the key lands during the page turn
        let mut r = ScriptedRenderer::new(80, 24)
            .with_key_at(Duration::from_millis(22_500), Key::Enter);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred(&numbered(60), SEC, SEC).unwrap();
        assert!(skipped);
        assert_eq!(r.placed().len(), 22);
        assert_eq!(r.waits().len(), 23);
        assert_eq!(r.clears(), 1);
    }

    #[test]
    fn skip_on_first_page_cascades_to_later_pages() {
        let mut r = ScriptedRenderer::new(80, 24).with_key_at(Duration::ZERO, Key::Char('x'));
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred(&numbered(30), SEC, SEC).unwrap();
        assert!(skipped);
        // one interrupted line wait, then only the page turn and the final hold
        assert_eq!(r.waits(), &[SEC, SEC, SEC]);
        assert_eq!(r.placed().len(), 35);
    }

    #[test]
    fn skip_on_later_page_is_not_reported() {
        // page one: 22 lines, 22s; page turn ends at 23s; key during page two
        let mut r = ScriptedRenderer::new(80, 24)
            .with_key_at(Duration::from_millis(25_500), Key::Char('x'));
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred(&numbered(30), SEC, SEC).unwrap();
        assert!(!skipped);
        assert_eq!(r.placed().len(), 35);
        // 22 + 3 line waits, then the page turn and the final hold
        assert_eq!(r.waits().len(), 27);
    }

    #[test]
    fn key_during_later_page_turn_skips_all() {
        // pages of 10 rows: 0..10, 5..15, 10..20; the second turn starts at 21s
        let mut r = ScriptedRenderer::new(80, 12)
            .with_key_at(Duration::from_millis(21_500), Key::Enter);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred(&numbered(20), SEC, SEC).unwrap();
        assert!(skipped);
        assert_eq!(r.placed().len(), 20);
        assert_eq!(r.waits().len(), 22);
        assert_eq!(r.clears(), 2);
    }

    #[test]
    fn every_page_turn_gets_a_final_hold() {
        let mut r = ScriptedRenderer::new(80, 12);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        stage.reveal_all_centred(&numbered(20), Duration::ZERO, SEC).unwrap();
        assert_eq!(r.placed().len(), 30);
        assert_eq!(r.clears(), 2);
        // two page turns, then two holds on the last page
        assert_eq!(r.waits(), &[SEC; 4]);
    }

    #[test]
    fn unskipped_paged_reveal_reports_false() {
        let mut r = ScriptedRenderer::new(80, 24);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let skipped = stage.reveal_all_centred(&numbered(30), SEC, SEC).unwrap();
        assert!(!skipped);
        // 22 + 13 line waits, one page turn, one final hold
        assert_eq!(r.waits().len(), 37);
    }

    #[test]
    fn tiny_viewport_still_terminates() {
        let mut r = ScriptedRenderer::new(20, 3);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        stage.reveal_all_centred(&numbered(4), Duration::ZERO, SEC).unwrap();
        assert_eq!(r.placed_texts(), vec!["line 1", "line 2", "line 3", "line 4"]);
        assert_eq!(r.clears(), 3);
        assert_eq!(r.waits().len(), 6);
    }

    #[test]
    fn prompt_reads_a_line() {
        let mut r = ScriptedRenderer::new(40, 10).with_line_at(Duration::ZERO, "alice");
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let input = stage.prompt(1, 3, "Login: ", Echo::Visible).unwrap();
        assert_eq!(input, "alice");
        assert_eq!(r.row_text(3), " Login: alice");
    }

    #[test]
    fn prompt_masks_and_handles_backspace() {
        let mut r = ScriptedRenderer::new(40, 10)
            .with_key_at(Duration::ZERO, Key::Backspace)
            .with_key_at(Duration::ZERO, Key::Char('a'))
            .with_key_at(Duration::ZERO, Key::Char('b'))
            .with_key_at(Duration::ZERO, Key::Esc)
            .with_key_at(Duration::ZERO, Key::Backspace)
            .with_key_at(Duration::ZERO, Key::Char('c'))
            .with_key_at(Duration::ZERO, Key::Enter);
        let mut stage = Stage::new(&mut r, RevealConfig::default());
        let input = stage.prompt(0, 0, "Password: ", Echo::Masked).unwrap();
        assert_eq!(input, "ac");
        assert_eq!(r.row_text(0), "Password: **");
        assert!(!r.screen_contains("ac"));
    }

    proptest! {
        #[test]
        fn fitting_text_places_each_line_once(height in 3u16..60, lines in 1usize..60) {
            let count = lines.min(usize::from(height - 2));
            let mut r = ScriptedRenderer::new(80, height);
            Stage::new(&mut r, RevealConfig::default())
                .reveal_all_centred(&numbered(count), SEC, PAGE)
                .unwrap();
            let expected: Vec<String> = (1..=count).map(|n| format!("line {n}")).collect();
            prop_assert_eq!(r.placed_texts(), expected);
            prop_assert_eq!(r.clears(), 0);
        }

        #[test]
        fn no_line_waits_after_an_interruption(lines in 1usize..80, key_ms in 0u64..120_000) {
            let key_at = Duration::from_millis(key_ms);
            let mut r = ScriptedRenderer::new(80, 24).with_key_at(key_at, Key::Char(' '));
            let skipped = Stage::new(&mut r, RevealConfig::default())
                .reveal_all_centred(&numbered(lines), SEC, PAGE)
                .unwrap();

            let pages = paginate(lines, 22);
            let first_page = pages[0].len();
            let full: usize = pages.iter().map(|page| page.len()).sum();

            let waits = r.waits().to_vec();
            let mut elapsed = Duration::ZERO;
            let hit = waits.iter().position(|wait| {
                elapsed += *wait;
                elapsed >= key_at
            });
            match hit {
                None => {
                    prop_assert!(!skipped);
                    prop_assert_eq!(r.pending_keys(), 1);
                }
                Some(i) => {
                    prop_assert!(waits[i + 1..].iter().all(|wait| *wait != SEC));
                    if r.placed().len() < full {
                        // an interrupted page turn: nothing may follow
                        prop_assert_eq!(waits[i], PAGE);
                        prop_assert_eq!(i + 1, waits.len());
                        prop_assert!(skipped);
                    } else {
                        // only a key on the first page is reported
                        prop_assert_eq!(skipped, i < first_page);
                    }
                }
            }
        }
    }
}
