use pageflip::{PageHost, Pager, PagerOptions, Result};

use crate::{FlingModel, FlingOptions, SettleAction, SettleOptions, SettleStep, SmoothSettler};

/// A framework-neutral controller that wraps a [`Pager`] and snaps it onto whole pages.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `layout` when the viewport or data set changes
/// - `on_scroll` for drag deltas, `on_fling` when a drag is released with velocity and
///   `on_scroll_idle` when it is released without one
/// - `tick(now_ms)` each frame while [`Self::is_settling`]
///
/// A new drag, fling or scroll request always supersedes a settle that is still running.
#[derive(Clone, Debug)]
pub struct FlipController {
    pager: Pager,
    settle: SettleOptions,
    fling: FlingModel,
    settler: Option<SmoothSettler>,
}

impl FlipController {
    pub fn new(
        pager_options: PagerOptions,
        settle: SettleOptions,
        fling: FlingOptions,
    ) -> Result<Self> {
        Self::from_pager(Pager::new(pager_options)?, settle, fling)
    }

    pub fn from_pager(pager: Pager, settle: SettleOptions, fling: FlingOptions) -> Result<Self> {
        settle.validate()?;
        Ok(Self {
            pager,
            settle,
            fling: FlingModel::new(fling)?,
            settler: None,
        })
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn into_pager(self) -> Pager {
        self.pager
    }

    pub fn settle_options(&self) -> &SettleOptions {
        &self.settle
    }

    pub fn is_settling(&self) -> bool {
        self.settler.is_some()
    }

    /// The page a running settle is heading for.
    pub fn settle_target(&self) -> Option<usize> {
        self.settler.map(|s| s.target())
    }

    pub fn cancel_settle(&mut self) {
        if self.settler.take().is_some() {
            pdebug!(page = self.pager.page(), "settle cancelled");
        }
    }

    /// See [`Pager::layout`].
    pub fn layout<H: PageHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        self.pager.layout(host)
    }

    /// Applies a drag delta. Cancels any running settle.
    pub fn on_scroll<H: PageHost + ?Sized>(&mut self, delta: i32, host: &mut H) -> Result<i32> {
        self.cancel_settle();
        self.pager.scroll_by(delta, host)
    }

    /// Handles a drag released at `(vx, vy)` px/s.
    ///
    /// Returns the settle that was started, or `None` when the fling is too slow or there is
    /// nothing to snap to; the adapter should then fall back to [`Self::on_scroll_idle`].
    pub fn on_fling(&mut self, vx: f64, vy: f64, now_ms: u64) -> Option<SettleAction> {
        let min = self.settle.min_fling_velocity;
        if vx.abs() <= min && vy.abs() <= min {
            ptrace!(vx, vy, min, "fling below minimum velocity");
            return None;
        }

        let distance = self.fling.distance(vx, vy);
        let target = self.pager.snap().pick_target_page_for(distance)?;
        pdebug!(
            vx,
            vy,
            distance = distance.main(self.pager.orientation()),
            from = self.pager.page(),
            target,
            "fling"
        );
        self.start_settle(target, now_ms)
    }

    /// Handles a drag released without a fling: settles back onto the nearest whole page.
    ///
    /// Does nothing while a settle is already running.
    pub fn on_scroll_idle(&mut self, now_ms: u64) -> Option<SettleAction> {
        if self.settler.is_some() {
            return None;
        }
        let target = self.pager.snap_page()?;
        self.start_settle(target, now_ms)
    }

    /// Animates onto `page`, however far away it is.
    ///
    /// A pager with nothing laid out yet, or with no distance to cover, jumps to a different
    /// page instead; the next layout pass clamps it.
    pub fn smooth_scroll_to_page<H: PageHost + ?Sized>(
        &mut self,
        page: usize,
        now_ms: u64,
        host: &mut H,
    ) -> Option<SettleAction> {
        let unmeasured =
            self.pager.item_count() == 0 || self.pager.distance_to_settle(page) == 0;
        if unmeasured && page != self.pager.page() {
            self.scroll_to_page(page, host);
            return None;
        }
        self.start_settle(page, now_ms)
    }

    /// Jumps to `page`. Cancels any running settle.
    pub fn scroll_to_page<H: PageHost + ?Sized>(&mut self, page: usize, host: &mut H) {
        self.cancel_settle();
        self.pager.scroll_to_page(page, host);
    }

    /// Advances a running settle. Returns `None` when idle.
    pub fn tick<H: PageHost + ?Sized>(
        &mut self,
        now_ms: u64,
        host: &mut H,
    ) -> Result<Option<SettleStep>> {
        let Some(settler) = self.settler.as_mut() else {
            return Ok(None);
        };

        let step = match settler.step(&mut self.pager, host, now_ms) {
            Ok(step) => step,
            Err(err) => {
                pwarn!(error = %err, "settle aborted");
                self.settler = None;
                return Err(err);
            }
        };
        if step.finished {
            pdebug!(
                page = self.pager.page(),
                offset = self.pager.offset(),
                "settled"
            );
            self.settler = None;
        }
        Ok(Some(step))
    }

    fn start_settle(&mut self, target: usize, now_ms: u64) -> Option<SettleAction> {
        self.cancel_settle();
        let (settler, action) = SmoothSettler::start(&self.pager, target, now_ms, &self.settle)?;
        pdebug!(
            target = settler.target(),
            duration_ms = action.duration_ms,
            dx = action.dx,
            dy = action.dy,
            "settle started"
        );
        self.settler = Some(settler);
        Some(action)
    }
}
