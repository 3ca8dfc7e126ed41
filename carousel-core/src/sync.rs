//! Slide synchronization controller.
//!
//! Keeps `Document.slides[active_index].scene_json` and the live
//! surface mutually consistent, and never lets stale data leak across
//! a slide switch. Two guards close the switch/commit race:
//!
//! 1. Sequencing: [`SyncController::switch_slide`] flushes any pending
//!    pull into the *old* index before loading the new slide.
//! 2. Tagging: asynchronous completions (font waits, generation calls)
//!    carry a [`CommitTag`]; [`SyncController::commit_if_current`]
//!    discards completions whose tag no longer matches.

use crate::{CarouselResult, Document, SceneSurface, SlidePatch};

/// Controller state, per document instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Surface and document agree.
    Idle,
    /// A surface load is in flight.
    Loading,
    /// The surface has uncommitted changes pending a pull.
    Dirty,
}

/// Identifies the slide an asynchronous operation was started against.
///
/// A tag is minted by [`SyncController::tag`] when the operation begins
/// and checked when it completes; mismatches mean the user navigated
/// away and the result must be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitTag {
    epoch: u64,
    index: usize,
}

/// The single subscriber to surface change notifications and the only
/// writer of scene snapshots into the document.
#[derive(Debug)]
pub struct SyncController {
    state: SyncState,
    /// Incremented on every slide switch; stale tags fail the check.
    epoch: u64,
}

impl SyncController {
    /// Create a controller in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SyncState::Idle,
            epoch: 0,
        }
    }

    /// Current controller state.
    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Mint a tag for an asynchronous operation targeting the active slide.
    #[must_use]
    pub fn tag(&self, document: &Document) -> CommitTag {
        CommitTag {
            epoch: self.epoch,
            index: document.active_index(),
        }
    }

    /// Whether `tag` still names the active slide with no switch since
    /// it was minted. Async operations check this before applying their
    /// result to the surface.
    #[must_use]
    pub fn is_current(&self, document: &Document, tag: CommitTag) -> bool {
        tag.epoch == self.epoch && tag.index == document.active_index()
    }

    /// Drain surface change notifications and, if any arrived, pull the
    /// surface snapshot into the active slide.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the document write fails;
    /// the controller is left dirty so a later pump retries.
    pub fn pump(
        &mut self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
    ) -> CarouselResult<()> {
        let events = surface.take_events();
        if events.is_empty() {
            return Ok(());
        }
        for event in &events {
            tracing::debug!(?event, "surface change observed");
        }
        self.state = SyncState::Dirty;
        self.commit(document, surface)
    }

    /// Pull the current surface snapshot into the active slide.
    ///
    /// Safe to call at any time; with no intervening surface change the
    /// stored snapshot is unchanged (commit is idempotent).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the document write fails.
    pub fn commit(
        &mut self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
    ) -> CarouselResult<()> {
        // Notifications covered by this snapshot are consumed with it.
        let _ = surface.take_events();
        let snapshot = surface.serialize()?;
        let index = document.active_index();
        document.update_slide_at(index, SlidePatch::scene(snapshot))?;
        self.state = SyncState::Idle;
        tracing::debug!(index, "surface snapshot committed");
        Ok(())
    }

    /// Commit only if `tag` still names the active slide and no switch
    /// happened since the tag was minted. Returns whether the commit
    /// was applied.
    ///
    /// # Errors
    ///
    /// Returns an error if an applied commit fails; a discarded stale
    /// completion is `Ok(false)`, not an error.
    pub fn commit_if_current(
        &mut self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        tag: CommitTag,
    ) -> CarouselResult<bool> {
        if tag.epoch != self.epoch || tag.index != document.active_index() {
            tracing::debug!(
                tagged = tag.index,
                active = document.active_index(),
                "discarding stale async completion"
            );
            return Ok(false);
        }
        self.commit(document, surface)?;
        Ok(true)
    }

    /// Switch the active slide, pushing the target slide's stored scene
    /// onto the surface.
    ///
    /// Any pull pending from the outgoing slide is committed to the
    /// *old* index before the switch begins, so the new slide's content
    /// can never be written into the old slide's record.
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range index (document and surface
    /// untouched), or if the target slide's scene JSON is malformed. In
    /// the latter case the stored slide is left untouched and the
    /// surface is cleared to empty rather than left partially loaded.
    pub fn switch_slide(
        &mut self,
        document: &mut Document,
        surface: &mut dyn SceneSurface,
        index: usize,
    ) -> CarouselResult<()> {
        self.pump(document, surface)?;

        document.set_active_index(index)?;
        self.epoch += 1;
        self.state = SyncState::Loading;

        let slide = document.active_slide();
        let background = slide.background_color.clone();
        let result = surface.load(slide.scene_json.as_ref());
        // Background is stored out-of-band and wins over whatever the
        // scene snapshot carried.
        surface.set_background(&background);
        self.state = SyncState::Idle;

        match result {
            Ok(()) => {
                surface.render();
                tracing::debug!(index, "slide activated");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(index, "slide load failed: {e}");
                Err(e)
            }
        }
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}
