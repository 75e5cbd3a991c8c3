use kurbo::Rect;
use pageflip::{Orientation, PageBounds, PageHost, PageState, PagerOptions};
use pageflip_adapter::{
    Canvas, FlingOptions, FlipCompositor, FlipController, FlipOptions, Perspective, Rgba8,
    SettleOptions, page_rect,
};

#[derive(Default)]
struct Host {
    states: Vec<PageState>,
}

impl PageHost for Host {
    fn item_count(&self) -> usize {
        8
    }

    fn viewport(&self) -> PageBounds {
        PageBounds::new(0, 0, 360, 640)
    }

    fn attach(&mut self, _index: usize) -> bool {
        true
    }

    fn detach(&mut self, index: usize) {
        self.states.retain(|s| s.index != index);
    }

    fn layout_page(&mut self, _index: usize, _bounds: PageBounds) {}

    fn update_page(&mut self, state: PageState) {
        self.states.retain(|s| s.index != state.index);
        self.states.push(state);
    }

    fn request_layout(&mut self) {}
}

/// Counts draw calls instead of painting.
#[derive(Default)]
struct CountingCanvas {
    clips: usize,
    shades: Vec<u8>,
}

impl Canvas for CountingCanvas {
    fn save(&mut self) {}
    fn restore(&mut self) {}

    fn clip_rect(&mut self, _rect: Rect) {
        self.clips += 1;
    }

    fn concat(&mut self, _matrix: &Perspective) {}

    fn fill_rect(&mut self, _rect: Rect, color: Rgba8) {
        self.shades.push(color.a);
    }
}

fn main() {
    // Example: drag, release with a fling, then let the controller settle onto the next page.
    //
    // An adapter would:
    // - forward drag deltas to on_scroll
    // - call on_fling on release (falling back to on_scroll_idle if it returns None)
    // - call tick(now_ms) every frame while is_settling()
    // - draw pages in pager.draw_order() through the compositor
    let mut host = Host::default();
    let mut c = FlipController::new(
        PagerOptions::new(Orientation::Vertical),
        SettleOptions::default().with_density_dpi(320.0),
        FlingOptions::default().with_density(2.0),
    )
    .expect("default options are valid");
    c.layout(&mut host).expect("host pages vertically");

    c.on_scroll(120, &mut host).expect("pages draw raw");
    let action = c
        .on_fling(0.0, 2_500.0, 0)
        .or_else(|| c.on_scroll_idle(0));
    println!("release: action={action:?} target={:?}", c.settle_target());

    let compositor = FlipCompositor::new(FlipOptions::default()).expect("camera is valid");
    let bounds = page_rect(c.pager().bounds());

    let mut now_ms = 0u64;
    while c.is_settling() {
        now_ms += 16;
        let step = c.tick(now_ms, &mut host).expect("pages draw raw");

        let mut canvas = CountingCanvas::default();
        for state in c.pager().draw_order() {
            compositor.render_page(&mut canvas, bounds, state, &mut |_: &mut CountingCanvas| {});
        }
        println!(
            "t={now_ms} step={step:?} page={} offset={} shades={:?}",
            c.pager().page(),
            c.pager().offset(),
            canvas.shades
        );
    }

    println!(
        "settled: page={} offset={}",
        c.pager().page(),
        c.pager().offset()
    );
}
