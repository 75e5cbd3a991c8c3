use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_i32(&mut self, start: i32, end_exclusive: i32) -> i32 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive as i64 - start as i64) as u64;
        (start as i64 + (self.next_u64() % span) as i64) as i32
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Attach(usize),
    Detach(usize),
    Layout(usize, PageBounds),
}

#[derive(Debug, Default)]
struct TestHost {
    count: usize,
    viewport: PageBounds,
    attached: Vec<usize>,
    states: BTreeMap<usize, PageState>,
    events: Vec<Event>,
    unsupported: Option<usize>,
    vertical_only: bool,
    layout_requests: usize,
}

impl TestHost {
    fn vertical(count: usize, height: i32) -> Self {
        Self {
            count,
            viewport: PageBounds::new(0, 0, 200, height),
            ..Self::default()
        }
    }

    fn horizontal(count: usize, width: i32) -> Self {
        Self {
            count,
            viewport: PageBounds::new(0, 0, width, 400),
            ..Self::default()
        }
    }

    fn visible(&self, index: usize) -> bool {
        self.states.get(&index).is_some_and(|s| s.visible)
    }

    fn degree(&self, index: usize) -> Option<i32> {
        self.states.get(&index).map(|s| s.degree)
    }
}

impl PageHost for TestHost {
    fn item_count(&self) -> usize {
        self.count
    }

    fn viewport(&self) -> PageBounds {
        self.viewport
    }

    fn can_scroll(&self, orientation: Orientation) -> bool {
        !self.vertical_only || orientation == Orientation::Vertical
    }

    fn attach(&mut self, index: usize) -> bool {
        if self.unsupported == Some(index) {
            return false;
        }
        self.events.push(Event::Attach(index));
        self.attached.push(index);
        true
    }

    fn detach(&mut self, index: usize) {
        self.events.push(Event::Detach(index));
        self.attached.retain(|&i| i != index);
        self.states.remove(&index);
    }

    fn layout_page(&mut self, index: usize, bounds: PageBounds) {
        self.events.push(Event::Layout(index, bounds));
    }

    fn update_page(&mut self, state: PageState) {
        self.states.insert(state.index, state);
    }

    fn request_layout(&mut self) {
        self.layout_requests += 1;
    }
}

fn vertical_pager(host: &mut TestHost) -> Pager {
    let mut pager = Pager::new(PagerOptions::new(Orientation::Vertical)).unwrap();
    pager.layout(host).unwrap();
    pager
}

#[test]
fn layout_attaches_resting_page_and_next_neighbor() {
    let mut host = TestHost::vertical(3, 300);
    let pager = vertical_pager(&mut host);

    assert_eq!(pager.item_length(), 300);
    assert_eq!(pager.attached(), &[0, 1]);
    assert!(host.visible(0));
    assert!(!host.visible(1));
    assert_eq!(
        host.events,
        [
            Event::Attach(0),
            Event::Layout(0, host.viewport),
            Event::Attach(1),
            Event::Layout(1, host.viewport),
        ]
    );
}

#[test]
fn scroll_within_page_keeps_page_and_turns_it() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    host.events.clear();

    assert_eq!(pager.scroll_by(100, &mut host).unwrap(), 100);
    assert_eq!(pager.page(), 0);
    assert_eq!(pager.offset(), 100);
    assert_eq!(host.degree(0), Some(60));
    assert!(host.visible(1));
    // Same page: no attach/detach/layout, only state refresh.
    assert!(host.events.is_empty());
}

#[test]
fn crossing_half_page_moves_resting_page() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);

    pager.scroll_by(100, &mut host).unwrap();
    assert_eq!(pager.scroll_by(80, &mut host).unwrap(), 80);
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.offset(), -120);
    assert_eq!(pager.attached(), &[0, 1, 2]);
    assert!(host.visible(0));
    assert!(host.visible(1));
    assert!(!host.visible(2));
    assert_eq!(host.degree(1), Some(-72));
    assert_eq!(host.degree(0), Some(0));
}

#[test]
fn overscroll_past_last_page_is_absorbed() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(600, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (2, 0));

    let before = pager.geometry();
    assert_eq!(pager.scroll_by(500, &mut host).unwrap(), 0);
    assert_eq!(pager.geometry(), before);
}

#[test]
fn overscroll_before_first_page_is_absorbed() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    assert_eq!(pager.scroll_by(-50, &mut host).unwrap(), 0);

    pager.scroll_by(40, &mut host).unwrap();
    assert_eq!(pager.scroll_by(-100, &mut host).unwrap(), -40);
    assert_eq!((pager.page(), pager.offset()), (0, 0));
}

#[test]
fn zero_delta_is_a_no_op() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(120, &mut host).unwrap();
    host.events.clear();

    let before = pager.geometry();
    assert_eq!(pager.scroll_by(0, &mut host).unwrap(), 0);
    assert_eq!(pager.geometry(), before);
    assert!(host.events.is_empty());
}

#[test]
fn backward_scroll_reveals_previous_page() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(300, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (1, 0));
    assert!(!host.visible(0));
    assert!(!host.visible(2));

    pager.scroll_by(-40, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (1, -40));
    assert!(host.visible(0));
    assert!(!host.visible(2));
    assert_eq!(host.degree(1), Some(-24));

    pager.scroll_by(-120, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (0, 140));
    assert!(host.visible(1));
}

#[test]
fn page_change_detaches_pages_out_of_range() {
    let mut host = TestHost::vertical(5, 100);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(100, &mut host).unwrap();
    assert_eq!(pager.attached(), &[0, 1, 2]);
    host.events.clear();

    pager.scroll_by(100, &mut host).unwrap();
    assert_eq!(pager.page(), 2);
    assert_eq!(pager.attached(), &[1, 2, 3]);
    assert_eq!(
        host.events,
        [
            Event::Detach(0),
            Event::Attach(3),
            Event::Layout(3, host.viewport),
        ]
    );
    let mut attached = host.attached.clone();
    attached.sort_unstable();
    assert_eq!(attached, pager.attached());
}

#[test]
fn horizontal_pager_uses_width_and_dx() {
    let mut host = TestHost::horizontal(4, 240);
    let mut pager = Pager::new(PagerOptions::new(Orientation::Horizontal)).unwrap();
    pager.layout(&mut host).unwrap();
    assert_eq!(pager.item_length(), 240);

    pager.scroll_by(60, &mut host).unwrap();
    assert_eq!(pager.snap().settle_vector(1), ScrollVector { dx: 180, dy: 0 });
    assert_eq!(pager.snap().pick_target_page_for(ScrollVector { dx: 70, dy: 900 }), Some(1));
    assert_eq!(host.degree(0), Some(45));
}

#[test]
fn empty_host_detaches_everything_and_ignores_scrolls() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(400, &mut host).unwrap();

    host.count = 0;
    pager.layout(&mut host).unwrap();
    assert!(pager.attached().is_empty());
    assert!(host.attached.is_empty());
    assert_eq!((pager.page(), pager.offset()), (0, 0));

    assert_eq!(pager.scroll_by(100, &mut host).unwrap(), 0);
    assert!(pager.attached().is_empty());
    assert_eq!(pager.snap().pick_target_page(500), None);
    assert_eq!(pager.scroll_vector_for_page(0), None);
    assert_eq!(pager.snap_page(), None);
}

#[test]
fn item_count_shrink_clamps_page() {
    let mut host = TestHost::vertical(6, 100);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(420, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (4, 20));

    host.count = 3;
    pager.on_item_count_changed(&mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (2, 0));
    assert_eq!(pager.attached(), &[1, 2]);
    let mut attached = host.attached.clone();
    attached.sort_unstable();
    assert_eq!(attached, [1, 2]);
}

#[test]
fn stale_page_is_clamped_before_scrolling() {
    let mut host = TestHost::vertical(6, 100);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(500, &mut host).unwrap();
    assert_eq!(pager.page(), 5);

    // The host shrank without telling the pager.
    host.count = 2;
    assert_eq!(pager.scroll_by(30, &mut host).unwrap(), 0);
    assert_eq!((pager.page(), pager.offset()), (1, 0));
    assert_eq!(pager.attached(), &[0, 1]);
}

#[test]
fn scroll_after_silent_shrink_drops_vanished_page() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(300, &mut host).unwrap();
    assert_eq!(pager.attached(), &[0, 1, 2]);

    // Page 1 still exists, so nothing is clamped; page 2 must go anyway.
    host.count = 2;
    assert_eq!(pager.scroll_by(-10, &mut host).unwrap(), -10);
    assert_eq!((pager.page(), pager.offset()), (1, -10));
    assert_eq!(pager.attached(), &[0, 1]);
    assert!(!host.attached.contains(&2));
    assert!(!host.states.contains_key(&2));

    pager.on_item_count_changed(&mut host).unwrap();
    assert_eq!(pager.attached(), &[0, 1]);

    // Growing back attaches the next page before the scroll.
    host.count = 3;
    pager.scroll_by(10, &mut host).unwrap();
    assert_eq!(pager.attached(), &[0, 1, 2]);
}

#[test]
fn unsupported_page_aborts_attachment() {
    let mut host = TestHost::vertical(3, 300);
    host.unsupported = Some(1);
    let mut pager = Pager::new(PagerOptions::default()).unwrap();
    assert_eq!(
        pager.layout(&mut host),
        Err(Error::UnsupportedPage { index: 1 })
    );
}

#[test]
fn incompatible_host_is_rejected() {
    let mut host = TestHost::horizontal(3, 300);
    host.vertical_only = true;
    let mut pager = Pager::new(PagerOptions::new(Orientation::Horizontal)).unwrap();
    assert_eq!(
        pager.layout(&mut host),
        Err(Error::IncompatibleHost {
            orientation: Orientation::Horizontal
        })
    );
    assert!(host.attached.is_empty());
}

#[test]
fn degree_tracks_offset_and_never_reaches_ninety() {
    let mut g = GeometryState::new(Orientation::Vertical);
    g.item_length = 300;
    g.page = 1;

    for (offset, degree) in [(0, 0), (75, 45), (-75, -45), (149, 89), (-150, -89), (1, 1)] {
        g.offset = offset;
        assert_eq!(g.degree(), degree, "offset={offset}");
    }

    // Odd lengths fold the exact midpoint toward the nearer page.
    g.item_length = 301;
    g.page = 0;
    g.offset = 0;
    let (g2, _) = g.scrolled(150, 3);
    assert_eq!((g2.page, g2.offset), (0, 150));
    let (g3, _) = g.scrolled(151, 3);
    assert_eq!((g3.page, g3.offset), (1, -150));
    assert_eq!(g2.degree(), 89);
}

#[test]
fn exact_half_page_normalizes_to_next_page() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(150, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (1, -150));
    assert_eq!(host.degree(1), Some(-MAX_DEGREE));
}

#[test]
fn distance_to_settle_matches_offset() {
    let mut host = TestHost::vertical(5, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(380, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (1, 80));

    assert_eq!(pager.distance_to_settle(1), -80);
    assert_eq!(pager.distance_to_settle(2), 220);
    assert_eq!(pager.distance_to_settle(0), -380);
    assert_eq!(pager.distance_to_settle(4), 820);
    assert_eq!(pager.settle_vector(2), ScrollVector { dx: 0, dy: 220 });
    assert_eq!(pager.snap_page(), Some(1));
}

#[test]
fn pick_target_page_moves_at_most_one_page() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(300, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (1, 0));

    assert_eq!(pager.pick_target_page(200), Some(2));
    assert_eq!(pager.pick_target_page(150), Some(1));
    assert_eq!(pager.pick_target_page(-151), Some(0));
    assert_eq!(pager.pick_target_page(5_000), Some(2));
    assert_eq!(pager.pick_target_page(0), Some(1));

    pager.scroll_by(300, &mut host).unwrap();
    assert_eq!(pager.page(), 2);
    assert_eq!(pager.pick_target_page(10_000), Some(2));
}

#[test]
fn pick_target_page_uses_projected_offset() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(100, &mut host).unwrap();

    // 100 + 60 = 160 > 150.
    assert_eq!(pager.pick_target_page(60), Some(1));
    // 100 - 40 = 60: stays.
    assert_eq!(pager.pick_target_page(-40), Some(0));
    // Nothing before page 0.
    assert_eq!(pager.pick_target_page(-400), Some(0));
}

#[test]
fn scroll_to_page_requests_layout_and_is_clamped_by_it() {
    let mut host = TestHost::vertical(4, 100);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(30, &mut host).unwrap();

    pager.scroll_to_page(9, &mut host);
    assert_eq!(host.layout_requests, 1);
    assert_eq!((pager.page(), pager.offset()), (9, 0));

    pager.layout(&mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (3, 0));
    assert_eq!(pager.attached(), &[2, 3]);
}

#[test]
fn on_page_change_fires_once_per_change() {
    let calls = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicUsize::new(usize::MAX));
    let (c, l) = (Arc::clone(&calls), Arc::clone(&last));
    let options = PagerOptions::new(Orientation::Vertical).with_on_page_change(Some(
        move |_old: usize, new: usize| {
            c.fetch_add(1, Ordering::SeqCst);
            l.store(new, Ordering::SeqCst);
        },
    ));

    let mut host = TestHost::vertical(4, 100);
    let mut pager = Pager::new(options).unwrap();
    pager.layout(&mut host).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    pager.scroll_by(40, &mut host).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    pager.scroll_by(20, &mut host).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 1);

    pager.scroll_by(-70, &mut host).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(last.load(Ordering::SeqCst), 0);
}

#[test]
fn draw_order_puts_resting_page_last() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(400, &mut host).unwrap();
    assert_eq!((pager.page(), pager.offset()), (1, 100));

    let order: Vec<usize> = pager.draw_order().map(|s| s.index).collect();
    assert_eq!(order, [2, 1]);

    pager.scroll_by(-100, &mut host).unwrap();
    let order: Vec<usize> = pager.draw_order().map(|s| s.index).collect();
    assert_eq!(order, [1]);
}

#[test]
fn snapshot_roundtrips_through_layout() {
    let mut host = TestHost::vertical(5, 200);
    let mut pager = vertical_pager(&mut host);
    pager.scroll_by(530, &mut host).unwrap();
    let snap = pager.snapshot();
    assert_eq!(snap, PagerSnapshot { page: 3, offset: -70 });

    let mut other = vertical_pager(&mut host);
    other.restore_snapshot(snap, &mut host);
    other.layout(&mut host).unwrap();
    assert_eq!(other.geometry(), pager.geometry());

    // Offsets that do not fit the page length are dropped.
    other.restore_snapshot(PagerSnapshot { page: 1, offset: 150 }, &mut host);
    assert_eq!((other.page(), other.offset()), (1, 0));
}

#[test]
fn resize_relays_out_attached_pages() {
    let mut host = TestHost::vertical(3, 300);
    let mut pager = vertical_pager(&mut host);
    host.events.clear();

    host.viewport = PageBounds::from_size_with_padding(200, 420, [0, 10, 0, 10]);
    pager.layout(&mut host).unwrap();
    assert_eq!(pager.item_length(), 400);
    assert_eq!(
        host.events,
        [
            Event::Layout(0, host.viewport),
            Event::Layout(1, host.viewport),
        ]
    );
}

#[test]
fn random_scrolls_preserve_invariants() {
    let mut rng = Lcg::new(0x5eed_f11e);
    for _ in 0..50 {
        let count = rng.gen_range_usize(1, 8);
        let len = rng.gen_range_i32(1, 400);
        let mut host = TestHost::vertical(count, len);
        let mut pager = vertical_pager(&mut host);
        let max = len as i64 * (count as i64 - 1);
        let mut logical = 0i64;

        for _ in 0..200 {
            let delta = rng.gen_range_i32(-3 * len, 3 * len + 1);
            let consumed = pager.scroll_by(delta, &mut host).unwrap();
            logical += consumed as i64;

            let g = pager.geometry();
            assert_eq!(g.logical_position(), logical);
            assert!((0..=max).contains(&logical), "logical={logical} max={max}");
            assert!(g.page < count);
            assert!(2 * (g.offset as i64) < len as i64, "offset={} len={len}", g.offset);
            assert!(2 * (g.offset as i64) >= -(len as i64), "offset={} len={len}", g.offset);
            assert!(g.degree().abs() < 90);
            assert!(delta.signum() * consumed.signum() >= 0);
            assert_eq!(pager.distance_to_settle(g.page), -g.offset);

            let expected: Vec<usize> = g.candidates(count).collect();
            assert_eq!(pager.attached(), expected.as_slice());
            let mut attached = host.attached.clone();
            attached.sort_unstable();
            assert_eq!(attached, expected);
            for state in pager.page_states() {
                if state.index != g.page {
                    assert_eq!(state.degree, 0);
                }
            }
        }
    }
}
